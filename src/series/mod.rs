//! Convergent series definitions
//! Provides the term formulas the timeline sums

pub mod types;

pub use types::{BaselSeries, GeometricSeries, PSeries, Series, SeriesKind};
