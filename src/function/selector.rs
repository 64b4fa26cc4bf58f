use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::FunctionType;

/// Policy for choosing the next surface function when a steady phase ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionMode {
    /// Walk the variants in ordinal order, wrapping around.
    #[default]
    Cycle,
    /// Draw a variant uniformly from everything but the current one.
    Random,
}

impl TransitionMode {
    /// All modes in ordinal order.
    pub const ALL: [TransitionMode; 2] = [TransitionMode::Cycle, TransitionMode::Random];

    /// Ordinal index of the mode.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Mode at the given ordinal index, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Choose the function following `current` under this policy.
    pub fn pick_next<R: Rng + ?Sized>(&self, rng: &mut R, current: FunctionType) -> FunctionType {
        match self {
            TransitionMode::Cycle => current.next(),
            TransitionMode::Random => random_other_than(rng, current),
        }
    }
}

impl fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransitionMode::Cycle => "Cycle",
            TransitionMode::Random => "Random",
        };
        f.write_str(name)
    }
}

impl FromStr for TransitionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cycle" => Ok(TransitionMode::Cycle),
            "Random" => Ok(TransitionMode::Random),
            _ => anyhow::bail!("unknown transition mode: {}", s),
        }
    }
}

/// Draw a variant uniformly from all variants except `current`, rejecting
/// and re-drawing on collision.
pub fn random_other_than<R: Rng + ?Sized>(rng: &mut R, current: FunctionType) -> FunctionType {
    loop {
        let choice = FunctionType::ALL[rng.random_range(0..FunctionType::COUNT)];
        if choice != current {
            return choice;
        }
    }
}
