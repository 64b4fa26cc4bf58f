use anyhow::ensure;
use rand::Rng;

use crate::function::{FunctionType, TransitionMode};
use crate::misc::FloatingPoint;

/// Phase of the function transition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Showing a single function.
    Steady,
    /// Morphing from the previous function to the current one.
    Transitioning,
}

/// Tick-driven state machine that alternates between showing a surface
/// function for `function_duration` seconds and morphing to the next one
/// over `transition_duration` seconds.
///
/// Elapsed time wraps by subtracting the finished phase's duration, so the
/// remainder carries into the next phase instead of resetting to zero.
#[derive(Debug, Clone)]
pub struct TransitionTimer<T: FloatingPoint> {
    current: FunctionType,
    previous: FunctionType,
    mode: TransitionMode,
    enabled: bool,
    function_duration: T,
    transition_duration: T,
    duration: T,
    phase: TransitionPhase,
}

impl<T: FloatingPoint> Default for TransitionTimer<T> {
    fn default() -> Self {
        Self {
            current: FunctionType::default(),
            previous: FunctionType::default(),
            mode: TransitionMode::default(),
            enabled: true,
            function_duration: T::one(),
            transition_duration: T::one(),
            duration: T::zero(),
            phase: TransitionPhase::Steady,
        }
    }
}

impl<T: FloatingPoint> TransitionTimer<T> {
    /// Timer starting steady on [`FunctionType::Wave`] with one-second
    /// durations and transitions enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer with explicit settings.
    ///
    /// Durations must be non-negative, and the transition duration must be
    /// positive while transitions are enabled so that the progress ratio
    /// stays finite.
    pub fn try_new(
        function: FunctionType,
        mode: TransitionMode,
        enabled: bool,
        function_duration: T,
        transition_duration: T,
    ) -> anyhow::Result<Self> {
        ensure!(
            function_duration >= T::zero(),
            "function duration must be non-negative"
        );
        ensure!(
            transition_duration >= T::zero(),
            "transition duration must be non-negative"
        );
        ensure!(
            !enabled || transition_duration > T::zero(),
            "transition duration must be positive while transitions are enabled"
        );
        Ok(Self {
            current: function,
            previous: function,
            mode,
            enabled,
            function_duration,
            transition_duration,
            ..Self::default()
        })
    }

    /// The function being shown, or morphed toward while transitioning.
    pub fn current(&self) -> FunctionType {
        self.current
    }

    /// The function being morphed away from. Only meaningful while
    /// transitioning; equals `current` otherwise.
    pub fn previous(&self) -> FunctionType {
        if self.is_transitioning() {
            self.previous
        } else {
            self.current
        }
    }

    /// Set the current function without reporting a change.
    pub fn set_current(&mut self, function: FunctionType) {
        self.current = function;
    }

    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TransitionMode) {
        self.mode = mode;
    }

    pub fn transitions_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable automatic transitions. While disabled the timer is
    /// frozen and the evaluator always takes the steady path.
    pub fn set_transitions_enabled(&mut self, enabled: bool) -> anyhow::Result<()> {
        ensure!(
            !enabled || self.transition_duration > T::zero(),
            "transition duration must be positive while transitions are enabled"
        );
        self.enabled = enabled;
        Ok(())
    }

    pub fn function_duration(&self) -> T {
        self.function_duration
    }

    pub fn set_function_duration(&mut self, duration: T) -> anyhow::Result<()> {
        ensure!(duration >= T::zero(), "function duration must be non-negative");
        self.function_duration = duration;
        Ok(())
    }

    pub fn transition_duration(&self) -> T {
        self.transition_duration
    }

    pub fn set_transition_duration(&mut self, duration: T) -> anyhow::Result<()> {
        ensure!(
            duration >= T::zero(),
            "transition duration must be non-negative"
        );
        ensure!(
            !self.enabled || duration > T::zero(),
            "transition duration must be positive while transitions are enabled"
        );
        self.transition_duration = duration;
        Ok(())
    }

    /// Raw phase flag, untouched by the enabled switch.
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Whether the evaluator should take the morph path this frame. A
    /// frozen timer always reads as steady.
    pub fn is_transitioning(&self) -> bool {
        self.enabled && self.phase == TransitionPhase::Transitioning
    }

    /// Elapsed time in the active phase.
    pub fn duration(&self) -> T {
        self.duration
    }

    /// Morph progress of the active transition, `duration / transition_duration`.
    pub fn progress(&self) -> T {
        self.duration / self.transition_duration
    }

    /// Advance the timer by `dt` seconds of real time.
    ///
    /// At most one phase flip happens per tick. Returns the newly selected
    /// function when a steady phase ends, which is the only point a
    /// function change is ever reported.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: T, rng: &mut R) -> Option<FunctionType> {
        if !self.enabled {
            return None;
        }

        self.duration += dt;
        match self.phase {
            TransitionPhase::Transitioning => {
                if self.duration >= self.transition_duration {
                    self.duration -= self.transition_duration;
                    self.phase = TransitionPhase::Steady;
                }
                None
            }
            TransitionPhase::Steady => {
                if self.duration >= self.function_duration {
                    self.duration -= self.function_duration;
                    self.phase = TransitionPhase::Transitioning;
                    self.previous = self.current;
                    self.current = self.mode.pick_next(rng, self.current);
                    #[cfg(feature = "log")]
                    log::debug!(
                        "transitioning from {} to {}",
                        self.previous,
                        self.current
                    );
                    Some(self.current)
                } else {
                    None
                }
            }
        }
    }
}
