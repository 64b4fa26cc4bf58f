use itertools::Itertools;
use nalgebra::Vector3;
use rand::Rng;

use crate::function::{FunctionType, TransitionMode};
use crate::graph::{Graph, GraphConfig, PointArena};
use crate::misc::FloatingPoint;
use crate::morph::morph;
use crate::render::RenderTarget;
use crate::transition::TransitionTimer;

/// CPU evaluation path: recomputes every grid point's position and scale
/// each tick and writes them through a [`RenderTarget`].
///
/// Point slots are leased from a [`PointArena`] sized for the maximum
/// resolution, so changing the resolution reuses slots instead of
/// reallocating the target.
#[derive(Debug, Clone)]
pub struct PointGraph<T: FloatingPoint> {
    config: GraphConfig<T>,
    timer: TransitionTimer<T>,
    arena: PointArena,
    time: T,
}

impl<T: FloatingPoint> PointGraph<T> {
    pub const MIN_RESOLUTION: usize = 10;
    pub const MAX_RESOLUTION: usize = 70;

    /// Graph at the minimum resolution, showing [`FunctionType::Wave`] with
    /// transitions enabled.
    pub fn new() -> Self {
        Self {
            config: GraphConfig::new((Self::MIN_RESOLUTION, Self::MAX_RESOLUTION)),
            timer: TransitionTimer::new(),
            arena: PointArena::new(Self::MAX_RESOLUTION * Self::MAX_RESOLUTION),
            time: T::zero(),
        }
    }

    /// Allocate the render target and lease the initial point slots.
    pub fn initialize(&mut self, target: &mut impl RenderTarget<T>) -> anyhow::Result<()> {
        target.allocate(self.arena.capacity());
        self.arena.acquire(self.point_count())?;
        #[cfg(feature = "log")]
        log::debug!("point graph initialized with {} points", self.point_count());
        Ok(())
    }

    /// Release the leased slots and the render target storage.
    pub fn shutdown(&mut self, target: &mut impl RenderTarget<T>) {
        self.arena.release_all();
        target.release();
        #[cfg(feature = "log")]
        log::debug!("point graph shut down");
    }

    /// Advance one frame using the thread-local rng for the random
    /// transition policy.
    pub fn tick(&mut self, dt: T, target: &mut impl RenderTarget<T>) -> Option<FunctionType> {
        self.tick_with(dt, &mut rand::rng(), target)
    }

    /// Advance one frame: advance the transition timer by `dt`, then
    /// evaluate all grid points at the shared frame time and write them to
    /// the target. The graph must have been initialized so the point slots
    /// are leased.
    ///
    /// Returns the newly selected function when this tick started a
    /// transition.
    pub fn tick_with<R: Rng + ?Sized>(
        &mut self,
        dt: T,
        rng: &mut R,
        target: &mut impl RenderTarget<T>,
    ) -> Option<FunctionType> {
        self.time += dt;
        let changed = self.timer.tick(dt, rng);

        let n = self.config.resolution();
        let step = T::from_f64(2.0).unwrap() / T::from_usize(n).unwrap();
        let half = T::from_f64(0.5).unwrap();
        let scale = Vector3::repeat(step * self.config.size());
        let params = self.config.surface_params();
        let t = self.time;

        let transitioning = self.timer.is_transitioning();
        let from = self.timer.previous();
        let to = self.timer.current();
        let progress = if transitioning {
            self.timer.progress()
        } else {
            T::zero()
        };

        let slots = self.arena.active();
        for (i, (z, x)) in (0..n).cartesian_product(0..n).enumerate() {
            let u = (T::from_usize(x).unwrap() + half) * step - T::one();
            let v = (T::from_usize(z).unwrap() + half) * step - T::one();
            let position = if transitioning {
                morph(u, v, t, from, to, progress, &params)
            } else {
                to.evaluate(u, v, t, &params)
            };
            target.write_point(slots[i], position, scale);
        }

        changed
    }

    /// Total number of grid points, `resolution²`.
    pub fn point_count(&self) -> usize {
        self.config.resolution() * self.config.resolution()
    }

    /// Elapsed time since the graph was created.
    pub fn time(&self) -> T {
        self.time
    }

    pub fn amplitude(&self) -> T {
        self.config.amplitude()
    }

    pub fn set_amplitude(&mut self, amplitude: T) {
        self.config.set_amplitude(amplitude);
    }

    pub fn frequency(&self) -> T {
        self.config.frequency()
    }

    pub fn set_frequency(&mut self, frequency: T) {
        self.config.set_frequency(frequency);
    }

    pub fn size(&self) -> T {
        self.config.size()
    }

    pub fn set_size(&mut self, size: T) {
        self.config.set_size(size);
    }

    pub fn morphing_rate(&self) -> T {
        self.config.morphing_rate()
    }

    pub fn set_morphing_rate(&mut self, morphing_rate: T) {
        self.config.set_morphing_rate(morphing_rate);
    }

    pub fn config(&self) -> &GraphConfig<T> {
        &self.config
    }

    /// Slot indices the grid is currently written to, in grid order.
    pub fn slots(&self) -> &[usize] {
        self.arena.active()
    }
}

impl<T: FloatingPoint> Default for PointGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatingPoint> Graph<T> for PointGraph<T> {
    fn resolution(&self) -> usize {
        self.config.resolution()
    }

    fn set_resolution(&mut self, resolution: usize) {
        self.config.set_resolution(resolution);
        // the arena is sized for the maximum resolution, so the lease
        // cannot overflow
        self.arena
            .acquire(self.config.resolution() * self.config.resolution())
            .unwrap();
    }

    fn resolution_bounds(&self) -> (usize, usize) {
        self.config.resolution_bounds()
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
