//! convergeviz v0.3.0 - Convergent series animator
//!
//! Sums a series one term at a time, keeping the running total, and hands
//! each step to a renderer as an immutable frame.
//!
//! # Architecture
//!
//! - **timeline**: the convergence driver and its phase machine
//! - **series**: term formulas (1/n², p-series, geometric)
//! - **plot / render / scene**: coordinates, the renderer interface, and the
//!   storyboard that connects a timeline to a renderer
//! - **cli / telemetry / export**: the terminal tool around it

pub mod errors;
pub mod series;
pub mod timeline;

// Re-export commonly used types
pub use errors::{Result, VizError};
pub use series::{BaselSeries, Series, SeriesKind};
pub use timeline::{ConvergenceTimeline, PartialSumState, PositionMapper, RenderFrame};

// Presentation layer
pub mod plot;
pub mod render;
pub mod scene;

// Terminal tool
pub mod cli;
pub mod export;
pub mod telemetry;
