use crate::function::FunctionType;
use crate::misc::FloatingPoint;

/// Identifies which `(from, to)` function pair a compute kernel invocation
/// evaluates. The kernel table covers every ordered pair, identity pairs
/// included, so steady frames select `(current, current)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelSelector {
    from: FunctionType,
    to: FunctionType,
}

impl KernelSelector {
    /// Number of kernel entry points an adapter must provide.
    pub const TABLE_LEN: usize = FunctionType::COUNT * FunctionType::COUNT;

    pub fn new(from: FunctionType, to: FunctionType) -> Self {
        Self { from, to }
    }

    /// Identity pair for a steady frame.
    pub fn steady(function: FunctionType) -> Self {
        Self::new(function, function)
    }

    /// The function being morphed away from.
    pub fn source(&self) -> FunctionType {
        self.from
    }

    /// The function being shown or morphed toward.
    pub fn target(&self) -> FunctionType {
        self.to
    }

    /// Flat kernel table index: `to + from × FunctionType::COUNT`.
    pub fn index(&self) -> usize {
        self.to.index() + self.from.index() * FunctionType::COUNT
    }

    /// Selector for a flat kernel table index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Self::TABLE_LEN {
            return None;
        }
        let from = FunctionType::from_index(index / FunctionType::COUNT)?;
        let to = FunctionType::from_index(index % FunctionType::COUNT)?;
        Some(Self::new(from, to))
    }

    /// Whether this is an identity pair.
    pub fn is_steady(&self) -> bool {
        self.from == self.to
    }
}

/// Per-frame parameters the dispatch path hands to a compute adapter.
/// The adapter's kernel performs the same per-element math as the CPU
/// evaluator and writes into a position buffer consumed by an instanced
/// draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams<T: FloatingPoint> {
    /// Points per grid axis.
    pub resolution: usize,
    /// Grid cell size, `2 / resolution`.
    pub step: T,
    /// Shared time value for every point of the frame.
    pub time: T,
    /// Eased morph progress; zero while steady.
    pub transition_progress: T,
    /// Kernel variant for the active `(from, to)` pair.
    pub kernel: KernelSelector,
    /// Edge length of the cube bounding the animated grid, `2 + 2/resolution`.
    pub bounds_extent: T,
}

/// Sink for the GPU evaluation path: a compute buffer plus a kernel table
/// of [`KernelSelector::TABLE_LEN`] entry points.
///
/// The dispatcher allocates the position buffer once at activation, uploads
/// frame parameters and dispatches every tick, and releases the buffer on
/// shutdown. Any synchronization before reading results back is the
/// adapter's responsibility.
pub trait ComputeTarget<T: FloatingPoint> {
    /// Reserve a position buffer of `capacity` cells.
    fn allocate(&mut self, capacity: usize);

    /// Upload the frame parameters for the next dispatch.
    fn write_frame_params(&mut self, params: &FrameParams<T>);

    /// Run the selected kernel over a 2D grid of work groups.
    fn dispatch(&mut self, groups: [usize; 2]);

    /// Drop the position buffer.
    fn release(&mut self);
}
