use rand::Rng;

use crate::function::{FunctionType, TransitionMode};
use crate::graph::Graph;
use crate::misc::{smooth_step, FloatingPoint};
use crate::render::{ComputeTarget, FrameParams, KernelSelector};
use crate::transition::TransitionTimer;

/// GPU evaluation path: advances the same transition timer as the CPU
/// path, but instead of evaluating points it emits per-frame parameters and
/// a kernel selection to a [`ComputeTarget`], which runs the identical math
/// in a parallel kernel.
#[derive(Debug, Clone)]
pub struct DispatchGraph<T: FloatingPoint> {
    timer: TransitionTimer<T>,
    resolution: usize,
    time: T,
}

impl<T: FloatingPoint> DispatchGraph<T> {
    pub const MIN_RESOLUTION: usize = 10;
    pub const MAX_RESOLUTION: usize = 700;
    /// Work group edge length of the evaluation kernels.
    pub const WORK_GROUP_SIZE: usize = 8;

    /// Graph at the minimum resolution, showing [`FunctionType::Wave`] with
    /// transitions off.
    pub fn new() -> Self {
        let mut timer = TransitionTimer::new();
        // transitions default to off on the dispatch path
        timer.set_transitions_enabled(false).unwrap();
        Self {
            timer,
            resolution: Self::MIN_RESOLUTION,
            time: T::zero(),
        }
    }

    /// Reserve the position buffer at the fixed maximum capacity, so later
    /// resolution changes never reallocate.
    pub fn initialize(&mut self, target: &mut impl ComputeTarget<T>) {
        target.allocate(Self::MAX_RESOLUTION * Self::MAX_RESOLUTION);
        #[cfg(feature = "log")]
        log::debug!(
            "dispatch graph allocated {} buffer cells",
            Self::MAX_RESOLUTION * Self::MAX_RESOLUTION
        );
    }

    /// Release the position buffer.
    pub fn shutdown(&mut self, target: &mut impl ComputeTarget<T>) {
        target.release();
        #[cfg(feature = "log")]
        log::debug!("dispatch graph shut down");
    }

    /// Advance one frame using the thread-local rng for the random
    /// transition policy.
    pub fn tick(&mut self, dt: T, target: &mut impl ComputeTarget<T>) -> Option<FunctionType> {
        self.tick_with(dt, &mut rand::rng(), target)
    }

    /// Advance one frame: advance the transition timer by `dt`, upload the
    /// frame parameters and dispatch enough work groups to cover the grid.
    ///
    /// Returns the newly selected function when this tick started a
    /// transition.
    pub fn tick_with<R: Rng + ?Sized>(
        &mut self,
        dt: T,
        rng: &mut R,
        target: &mut impl ComputeTarget<T>,
    ) -> Option<FunctionType> {
        self.time += dt;
        let changed = self.timer.tick(dt, rng);
        target.write_frame_params(&self.frame_params());

        let groups = self.resolution.div_ceil(Self::WORK_GROUP_SIZE);
        target.dispatch([groups, groups]);

        changed
    }

    /// The parameters the next dispatch would carry.
    pub fn frame_params(&self) -> FrameParams<T> {
        let two = T::from_f64(2.0).unwrap();
        let n = T::from_usize(self.resolution).unwrap();
        let transitioning = self.timer.is_transitioning();
        FrameParams {
            resolution: self.resolution,
            step: two / n,
            time: self.time,
            transition_progress: if transitioning {
                smooth_step(self.timer.progress())
            } else {
                T::zero()
            },
            kernel: KernelSelector::new(self.timer.previous(), self.timer.current()),
            bounds_extent: two + two / n,
        }
    }

    /// Elapsed time since the graph was created.
    pub fn time(&self) -> T {
        self.time
    }
}

impl<T: FloatingPoint> Default for DispatchGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatingPoint> Graph<T> for DispatchGraph<T> {
    fn resolution(&self) -> usize {
        self.resolution
    }

    fn set_resolution(&mut self, resolution: usize) {
        self.resolution = resolution.clamp(Self::MIN_RESOLUTION, Self::MAX_RESOLUTION);
    }

    fn resolution_bounds(&self) -> (usize, usize) {
        (Self::MIN_RESOLUTION, Self::MAX_RESOLUTION)
    }

    fn function(&self) -> FunctionType {
        self.timer.current()
    }

    fn set_function(&mut self, function: FunctionType) {
        self.timer.set_current(function);
    }

    fn transition_mode(&self) -> TransitionMode {
        self.timer.mode()
    }

    fn set_transition_mode(&mut self, mode: TransitionMode) {
        self.timer.set_mode(mode);
    }

    fn has_transitions(&self) -> bool {
        self.timer.transitions_enabled()
    }

    fn set_transitions_enabled(&mut self, enabled: bool) -> anyhow::Result<()> {
        self.timer.set_transitions_enabled(enabled)
    }

    fn function_duration(&self) -> T {
        self.timer.function_duration()
    }

    fn set_function_duration(&mut self, duration: T) -> anyhow::Result<()> {
        self.timer.set_function_duration(duration)
    }

    fn transition_duration(&self) -> T {
        self.timer.transition_duration()
    }

    fn set_transition_duration(&mut self, duration: T) -> anyhow::Result<()> {
        self.timer.set_transition_duration(duration)
    }
}
