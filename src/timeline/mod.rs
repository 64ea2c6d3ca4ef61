//! Convergence timeline
//!
//! Owns a series and its running partial sum, advances it one index at a
//! time, and hands out immutable render frames.

pub mod driver;
pub mod state;
pub mod types;

pub use driver::ConvergenceTimeline;
pub use state::{TimelineEvent, TimelinePhase};
pub use types::{IdentityMapper, PartialSumState, Point, PositionMapper, RenderFrame};
