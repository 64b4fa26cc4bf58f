pub mod arena;
pub mod config;
pub mod dispatch_graph;
pub mod point_graph;

#[cfg(test)]
mod tests;

use crate::function::{FunctionType, TransitionMode};
use crate::misc::FloatingPoint;

pub use arena::*;
pub use config::*;
pub use dispatch_graph::*;
pub use point_graph::*;

/// Configuration surface shared by every graph variant.
///
/// The evaluation entry points stay on the concrete types since the CPU and
/// GPU paths drive different adapter contracts; this trait is what a host
/// UI binds its widgets against.
pub trait Graph<T: FloatingPoint> {
    /// Points per grid axis; the grid has `resolution²` points.
    fn resolution(&self) -> usize;

    /// Set the resolution, clamped to [`Graph::resolution_bounds`].
    fn set_resolution(&mut self, resolution: usize);

    /// Inclusive resolution bounds of this variant.
    fn resolution_bounds(&self) -> (usize, usize);

    /// The surface function currently shown.
    fn function(&self) -> FunctionType;

    /// Set the surface function. Never reported as a function change, so a
    /// UI echoing change notifications back does not loop.
    fn set_function(&mut self, function: FunctionType);

    fn transition_mode(&self) -> TransitionMode;

    fn set_transition_mode(&mut self, mode: TransitionMode);

    /// Whether timed transitions between functions are running.
    fn has_transitions(&self) -> bool;

    fn set_transitions_enabled(&mut self, enabled: bool) -> anyhow::Result<()>;

    /// Seconds a function is shown before the next transition starts.
    fn function_duration(&self) -> T;

    fn set_function_duration(&mut self, duration: T) -> anyhow::Result<()>;

    /// Seconds a morph between two functions takes.
    fn transition_duration(&self) -> T;

    fn set_transition_duration(&mut self, duration: T) -> anyhow::Result<()>;
}
