
use nalgebra::Point3;

use crate::function::{FunctionType, SurfaceParams};
use crate::misc::{lerp_unclamped, smooth_step, FloatingPoint};

/// Blend two surface functions at the same `(u, v, t)` sample.
///
/// Both surfaces are evaluated and interpolated component-wise. The blend
/// factor is the S-curve ease of `progress`; the interpolation itself does
/// not clamp, so a progress outside [0, 1] saturates through the ease
/// rather than the lerp.
pub fn morph<T: FloatingPoint>(
    u: T,
    v: T,
    t: T,
    from: FunctionType,
    to: FunctionType,
    progress: T,
    params: &SurfaceParams<T>,
) -> Point3<T> {
    let a = from.evaluate(u, v, t, params);
    let b = to.evaluate(u, v, t, params);
    lerp_unclamped(&a, &b, smooth_step(progress))
}
