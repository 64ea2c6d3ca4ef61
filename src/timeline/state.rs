//! Timeline phase machine
//!
//! Deterministic finite state machine:
//! - Initialized on construction (index = 1)
//! - Advancing after the first successful step below the bound
//! - Terminal once index == max_index, with no way out

use crate::errors::{Result, VizError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timeline lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelinePhase {
    /// State at n = 1 populated, nothing advanced yet
    Initialized,

    /// At least one step taken, bound not reached
    Advancing,

    /// index == max_index (terminal)
    Terminal,
}

/// Events that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    /// A step was taken and the bound is still ahead
    Advance,

    /// The bound was reached
    ReachBound,
}

impl TimelinePhase {
    /// Check if this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, TimelinePhase::Terminal)
    }

    /// Attempt phase transition
    ///
    /// Valid transitions:
    /// 1. Initialized → Advancing (on: Advance)
    /// 2. Initialized → Terminal  (on: ReachBound)
    /// 3. Advancing   → Advancing (on: Advance)
    /// 4. Advancing   → Terminal  (on: ReachBound)
    pub fn transition(&self, event: TimelineEvent) -> Result<TimelinePhase> {
        use TimelineEvent::*;
        use TimelinePhase::*;

        let next = match (self, event) {
            (Initialized, Advance) | (Advancing, Advance) => Advancing,
            (Initialized, ReachBound) | (Advancing, ReachBound) => Terminal,

            (Terminal, event) => {
                return Err(VizError::InvalidTransition {
                    from: format!("{:?}", Terminal),
                    event: format!("{:?}", event),
                });
            }
        };

        Ok(next)
    }

    /// Human-readable phase name
    pub fn display_name(&self) -> &'static str {
        match self {
            TimelinePhase::Initialized => "Initialized",
            TimelinePhase::Advancing => "Advancing",
            TimelinePhase::Terminal => "Terminal",
        }
    }
}

impl fmt::Display for TimelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
