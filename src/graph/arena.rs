use anyhow::ensure;

/// Index-based pool of reusable point slots.
///
/// A fixed-capacity backing store is addressed by slot index; inactive
/// slots sit on a free list and are handed out again before any new slot is
/// touched. Active slots keep their acquisition order, which is the order
/// the evaluator writes the grid in.
#[derive(Debug, Clone)]
pub struct PointArena {
    capacity: usize,
    allocated: usize,
    active: Vec<usize>,
    free: Vec<usize>,
}

impl PointArena {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            allocated: 0,
            active: vec![],
            free: vec![],
        }
    }

    /// Upper bound on concurrently active slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Active slot indices in acquisition order.
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    /// Number of active slots.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Resize the active set to exactly `count` slots and return them in
    /// order.
    ///
    /// Surplus slots are deactivated from the tail; a shortfall is filled
    /// from the free list first, then from never-used slots. Slots that
    /// stay active keep their indices, so re-acquiring a larger count after
    /// a shrink sees the same leading slots again.
    pub fn acquire(&mut self, count: usize) -> anyhow::Result<&[usize]> {
        ensure!(
            count <= self.capacity,
            "requested {} slots from an arena of capacity {}",
            count,
            self.capacity
        );

        while self.active.len() > count {
            let slot = self.active.pop().unwrap();
            self.free.push(slot);
        }

        while self.active.len() < count {
            let slot = match self.free.pop() {
                Some(slot) => slot,
                None => {
                    let slot = self.allocated;
                    self.allocated += 1;
                    slot
                }
            };
            self.active.push(slot);
        }

        Ok(&self.active)
    }

    /// Deactivate one slot. Returns false if the slot was not active.
    pub fn release(&mut self, slot: usize) -> bool {
        match self.active.iter().position(|&s| s == slot) {
            Some(index) => {
                self.active.remove(index);
                self.free.push(slot);
                true
            }
            None => false,
        }
    }

    /// Deactivate every slot.
    pub fn release_all(&mut self) {
        self.free.extend(self.active.drain(..));
    }
}
