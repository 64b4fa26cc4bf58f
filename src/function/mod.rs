pub mod library;
pub mod selector;


use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;

use crate::misc::FloatingPoint;

pub use library::*;
pub use selector::*;

/// Procedural surface variants, in cycle order.
/// The ordinal order is significant: it defines the cycle order of the
/// transition policy and the kernel table indexing on the dispatch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionType {
    #[default]
    Wave,
    MultiWave,
    Ripple,
    Sphere,
    Torus,
}

impl FunctionType {
    /// All variants in ordinal order.
    pub const ALL: [FunctionType; 5] = [
        FunctionType::Wave,
        FunctionType::MultiWave,
        FunctionType::Ripple,
        FunctionType::Sphere,
        FunctionType::Torus,
    ];

    /// Number of surface variants.
    pub const COUNT: usize = Self::ALL.len();

    /// Ordinal index of the variant.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Variant at the given ordinal index, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Ordinal successor, wrapping to the first variant after the last.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// Evaluate the surface at the given `(u, v)` parameters and time `t`
    /// to get a point.
    pub fn evaluate<T: FloatingPoint>(
        &self,
        u: T,
        v: T,
        t: T,
        params: &SurfaceParams<T>,
    ) -> Point3<T> {
        match self {
            FunctionType::Wave => wave(u, v, t, params),
            FunctionType::MultiWave => multi_wave(u, v, t, params),
            FunctionType::Ripple => ripple(u, v, t, params),
            FunctionType::Sphere => sphere(u, v, t, params),
            FunctionType::Torus => torus(u, v, t, params),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FunctionType::Wave => "Wave",
            FunctionType::MultiWave => "MultiWave",
            FunctionType::Ripple => "Ripple",
            FunctionType::Sphere => "Sphere",
            FunctionType::Torus => "Torus",
        };
        f.write_str(name)
    }
}

impl FromStr for FunctionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Wave" => Ok(FunctionType::Wave),
            "MultiWave" => Ok(FunctionType::MultiWave),
            "Ripple" => Ok(FunctionType::Ripple),
            "Sphere" => Ok(FunctionType::Sphere),
            "Torus" => Ok(FunctionType::Torus),
            _ => anyhow::bail!("unknown function type: {}", s),
        }
    }
}
