use nalgebra::Point3;

use crate::misc::FloatingPoint;

/// Shared shape parameters of the surface functions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceParams<T: FloatingPoint> {
    /// Vertical amplitude of the oscillating terms.
    pub amplitude: T,
    /// Base frequency multiplier. Sphere and torus clamp it to a narrow
    /// band to keep their radii positive.
    pub frequency: T,
    /// Rate at which the multi-wave phase terms drift against each other.
    pub morphing_rate: T,
}

impl<T: FloatingPoint> SurfaceParams<T> {
    pub fn new(amplitude: T, frequency: T, morphing_rate: T) -> Self {
        Self {
            amplitude,
            frequency,
            morphing_rate,
        }
    }
}

impl<T: FloatingPoint> Default for SurfaceParams<T> {
    fn default() -> Self {
        Self::new(T::one(), T::one(), T::one())
    }
}

/// Single sine sheet: `y = A·sin((u + v + t)·π·f)`.
pub fn wave<T: FloatingPoint>(u: T, v: T, t: T, params: &SurfaceParams<T>) -> Point3<T> {
    let y = params.amplitude * ((u + v + t) * T::pi() * params.frequency).sin();
    Point3::new(u, y, v)
}

/// Sum of three sine terms at different phase and frequency multipliers,
/// scaled by 2/3 so the peaks stay within the amplitude.
pub fn multi_wave<T: FloatingPoint>(u: T, v: T, t: T, params: &SurfaceParams<T>) -> Point3<T> {
    let pi = T::pi();
    let half = T::from_f64(0.5).unwrap();
    let two = T::from_f64(2.0).unwrap();
    let three = T::from_f64(3.0).unwrap();

    let mut y = params.amplitude * ((u + t * params.morphing_rate) * pi * params.frequency).sin();
    y += params.amplitude * ((v + t) * pi * params.frequency * two).sin() * half;
    y += params.amplitude
        * ((u + v + t * params.morphing_rate * half) * pi * params.frequency).sin();
    y *= two / three;
    Point3::new(u, y, v)
}

/// Radial wave attenuated away from the origin:
/// `y = A·sin((4d − t)·π·f) / (1 + 10d)` with `d = √(u² + v²)`.
pub fn ripple<T: FloatingPoint>(u: T, v: T, t: T, params: &SurfaceParams<T>) -> Point3<T> {
    let pi = T::pi();
    let four = T::from_f64(4.0).unwrap();
    let ten = T::from_f64(10.0).unwrap();

    let d = (u * u + v * v).sqrt();
    let y = params.amplitude * ((four * d - t) * pi * params.frequency).sin() / (T::one() + ten * d);
    Point3::new(u, y, v)
}

/// Sphere with a rippling radius, mapping `u` to the longitude and `v` to
/// the latitude over `[-1, 1]`.
pub fn sphere<T: FloatingPoint>(u: T, v: T, t: T, params: &SurfaceParams<T>) -> Point3<T> {
    let pi = T::pi();
    let half = T::from_f64(0.5).unwrap();

    let frequency = params.frequency.clamp(T::one(), T::from_f64(3.0).unwrap());
    let phase = pi * (T::from_f64(12.0).unwrap() * u + T::from_f64(8.0).unwrap() * v + t);
    let r = params.amplitude
        * (T::from_f64(0.9).unwrap() + T::from_f64(0.1).unwrap() * (phase * frequency).sin());
    let s = r * (half * pi * v).cos();
    Point3::new(s * (pi * u).sin(), r * (half * pi * v).sin(), s * (pi * u).cos())
}

/// Torus with both radii modulated by clamped-frequency sine terms, mapping
/// `u` to the major angle and `v` to the minor angle.
pub fn torus<T: FloatingPoint>(u: T, v: T, t: T, params: &SurfaceParams<T>) -> Point3<T> {
    let pi = T::pi();
    let half = T::from_f64(0.5).unwrap();

    let frequency = params.frequency.clamp(T::one(), T::from_f64(2.0).unwrap());
    let r1 = T::from_f64(0.7).unwrap()
        + T::from_f64(0.1).unwrap()
            * (pi * (T::from_f64(8.0).unwrap() * u + half * t) * frequency).sin()
            * params.amplitude;
    let r2 = T::from_f64(0.15).unwrap()
        + T::from_f64(0.05).unwrap()
            * (pi
                * (T::from_f64(16.0).unwrap() * u
                    + T::from_f64(8.0).unwrap() * v
                    + T::from_f64(3.0).unwrap() * t)
                * frequency)
                .sin()
            * params.amplitude;
    let s = r1 + r2 * (pi * v).cos();
    Point3::new(s * (pi * u).sin(), r2 * (pi * v).sin(), s * (pi * u).cos())
}
