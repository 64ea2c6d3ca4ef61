//! Plot coordinate system and curve sampling

pub mod axes;
pub mod curve;

pub use axes::{AxisRange, Axes};
pub use curve::PartialSumCurve;
