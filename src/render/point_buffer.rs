use nalgebra::{Point3, Vector3};

use crate::misc::FloatingPoint;
use crate::render::RenderTarget;

/// In-memory render target holding the evaluated positions and scales,
/// for hosts that consume the point data directly.
#[derive(Debug, Clone)]
pub struct PointBuffer<T: FloatingPoint> {
    positions: Vec<Point3<T>>,
    scales: Vec<Vector3<T>>,
}

impl<T: FloatingPoint> PointBuffer<T> {
    pub fn new() -> Self {
        Self {
            positions: vec![],
            scales: vec![],
        }
    }

    /// Number of allocated point slots.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<T>] {
        &self.positions
    }

    pub fn scales(&self) -> &[Vector3<T>] {
        &self.scales
    }

    pub fn position(&self, index: usize) -> &Point3<T> {
        &self.positions[index]
    }

    pub fn scale(&self, index: usize) -> &Vector3<T> {
        &self.scales[index]
    }
}

impl<T: FloatingPoint> Default for PointBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatingPoint> RenderTarget<T> for PointBuffer<T> {
    fn allocate(&mut self, capacity: usize) {
        self.positions.resize(capacity, Point3::origin());
        self.scales.resize(capacity, Vector3::zeros());
    }

    fn write_point(&mut self, index: usize, position: Point3<T>, scale: Vector3<T>) {
        self.positions[index] = position;
        self.scales[index] = scale;
    }

    fn release(&mut self) {
        self.positions = vec![];
        self.scales = vec![];
    }
}
