use nalgebra::Point3;

use crate::misc::FloatingPoint;

/// Hermite S-curve ease: clamps `t` to [0, 1] and returns `3t² − 2t³`.
pub fn smooth_step<T: FloatingPoint>(t: T) -> T {
    let three = T::from_f64(3.0).unwrap();
    let two = T::from_f64(2.0).unwrap();
    let s = t.clamp(T::zero(), T::one());
    s * s * (three - two * s)
}

/// Component-wise linear interpolation between two points without clamping
/// `t`, so values outside [0, 1] extrapolate.
pub fn lerp_unclamped<T: FloatingPoint>(a: &Point3<T>, b: &Point3<T>, t: T) -> Point3<T> {
    Point3::from(a.coords.lerp(&b.coords, t))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    use super::*;

    #[test]
    fn test_smooth_step_endpoints_and_midpoint() {
        assert_relative_eq!(smooth_step(0.0), 0.0);
        assert_relative_eq!(smooth_step(1.0), 1.0);
        assert_relative_eq!(smooth_step(0.5), 0.5);
    }

    #[test]
    fn test_smooth_step_clamps_outside_unit_interval() {
        assert_relative_eq!(smooth_step(-2.5), 0.0);
        assert_relative_eq!(smooth_step(1.75), 1.0);
    }

    #[test]
    fn test_smooth_step_is_monotonic() {
        let mut last = 0.0;
        for i in 1..=100 {
            let s = smooth_step(i as f64 / 100.0);
            assert!(s >= last);
            last = s;
        }
    }

    #[test]
    fn test_lerp_unclamped_extrapolates() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 2.0, 4.0);
        let p = lerp_unclamped(&a, &b, 2.0);
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 4.0);
        assert_relative_eq!(p.z, 8.0);
    }
}
