pub mod easing;
pub mod floating_point;

pub use easing::*;
pub use floating_point::*;
