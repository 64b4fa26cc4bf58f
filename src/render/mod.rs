pub mod compute;
pub mod point_buffer;

use nalgebra::{Point3, Vector3};

use crate::misc::FloatingPoint;

pub use compute::*;
pub use point_buffer::*;

/// Sink for the per-point output of the CPU evaluation path.
///
/// The evaluator allocates once, writes every active point each frame, and
/// releases on shutdown. Indices passed to `write_point` are slot indices
/// below the allocated capacity; slots above the active count keep their
/// last written value.
pub trait RenderTarget<T: FloatingPoint> {
    /// Reserve storage for `capacity` point slots.
    fn allocate(&mut self, capacity: usize);

    /// Write one point's position and uniform scale.
    fn write_point(&mut self, index: usize, position: Point3<T>, scale: Vector3<T>);

    /// Drop the reserved storage.
    fn release(&mut self);
}
