//! Module of algorithms working on graphs.
use num_traits::Zero;

pub mod path;
pub mod spanning;

pub use path::*;
pub use spanning::*;

/// Numeric edge weight usable by the algorithms in this module.
///
/// Weights are assumed non-negative; negative weights are not checked for and produce
/// meaningless results. Path costs are summed with plain `+`, so integer weights must be small
/// enough that no path cost exceeds the type's maximum: overflow panics in debug builds and wraps
/// in release builds. Incomparable values (floating-point NaN) are treated as equal to anything
/// they are compared with.
pub trait Weight: Copy + PartialOrd + Zero {}

impl<T: Copy + PartialOrd + Zero> Weight for T {}
