use crate::function::SurfaceParams;
use crate::misc::FloatingPoint;

/// Grid and shape settings of the CPU evaluation path.
///
/// Values are clamped to their slider ranges at the setter boundary, so a
/// config is always valid and the per-tick evaluation never has to check.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig<T: FloatingPoint> {
    resolution: usize,
    resolution_bounds: (usize, usize),
    amplitude: T,
    frequency: T,
    size: T,
    morphing_rate: T,
}

/// Inclusive slider range for the amplitude.
pub const AMPLITUDE_RANGE: (f64, f64) = (0.1, 2.0);
/// Inclusive slider range for the frequency.
pub const FREQUENCY_RANGE: (f64, f64) = (0.1, 5.0);
/// Inclusive slider range for the point size factor.
pub const SIZE_RANGE: (f64, f64) = (0.1, 7.0);
/// Inclusive slider range for the morphing rate.
pub const MORPHING_RATE_RANGE: (f64, f64) = (0.1, 1.0);

fn clamp_to<T: FloatingPoint>(value: T, range: (f64, f64)) -> T {
    value.clamp(
        T::from_f64(range.0).unwrap(),
        T::from_f64(range.1).unwrap(),
    )
}

impl<T: FloatingPoint> GraphConfig<T> {
    /// Config with all shape parameters at one and the minimum resolution
    /// of the given bounds.
    pub fn new(resolution_bounds: (usize, usize)) -> Self {
        Self {
            resolution: resolution_bounds.0,
            resolution_bounds,
            amplitude: T::one(),
            frequency: T::one(),
            size: T::one(),
            morphing_rate: T::one(),
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn resolution_bounds(&self) -> (usize, usize) {
        self.resolution_bounds
    }

    pub fn set_resolution(&mut self, resolution: usize) {
        let (min, max) = self.resolution_bounds;
        self.resolution = resolution.clamp(min, max);
    }

    pub fn amplitude(&self) -> T {
        self.amplitude
    }

    pub fn set_amplitude(&mut self, amplitude: T) {
        self.amplitude = clamp_to(amplitude, AMPLITUDE_RANGE);
    }

    pub fn frequency(&self) -> T {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: T) {
        self.frequency = clamp_to(frequency, FREQUENCY_RANGE);
    }

    /// Point size factor; the uniform per-point scale is `step · size`.
    pub fn size(&self) -> T {
        self.size
    }

    pub fn set_size(&mut self, size: T) {
        self.size = clamp_to(size, SIZE_RANGE);
    }

    pub fn morphing_rate(&self) -> T {
        self.morphing_rate
    }

    pub fn set_morphing_rate(&mut self, morphing_rate: T) {
        self.morphing_rate = clamp_to(morphing_rate, MORPHING_RATE_RANGE);
    }

    /// The shape parameters handed to the surface functions.
    pub fn surface_params(&self) -> SurfaceParams<T> {
        SurfaceParams::new(self.amplitude, self.frequency, self.morphing_rate)
    }
}
