//! Convergence timeline driver
//! Steps a series' partial sum toward its limit and exposes each step as a frame

use crate::errors::{Result, VizError};
use crate::series::Series;
use crate::timeline::state::{TimelineEvent, TimelinePhase};
use crate::timeline::types::{PartialSumState, PositionMapper, RenderFrame};

/// Owns a series, the current partial sum and the bound on the index.
///
/// The sum is carried forward one term at a time; a full run of `M` steps
/// costs O(M) term evaluations.
pub struct ConvergenceTimeline<S: Series = Box<dyn Series>> {
    /// Term source
    series: S,

    /// Last index the timeline may reach
    max_index: u64,

    /// Current state
    state: PartialSumState,

    /// Lifecycle phase
    phase: TimelinePhase,
}

impl<S: Series> ConvergenceTimeline<S> {
    /// Create a timeline positioned at n = 1.
    ///
    /// Fails with `InvalidConfiguration` when `max_index < 1` or when the
    /// series' first term is not a positive finite number.
    pub fn initialize(series: S, max_index: u64) -> Result<Self> {
        if max_index < 1 {
            return Err(VizError::invalid(format!(
                "max_index must be at least 1, got {}",
                max_index
            )));
        }

        let first = series.term(1);
        if !(first.is_finite() && first > 0.0) {
            return Err(VizError::invalid(format!(
                "series '{}' must start with a positive finite term, got {}",
                series.name(),
                first
            )));
        }

        let mut timeline = Self {
            series,
            max_index,
            state: PartialSumState::first(first),
            phase: TimelinePhase::Initialized,
        };
        timeline.settle_initial_phase()?;

        Ok(timeline)
    }

    // A bound of 1 is reached as soon as n = 1 is populated.
    fn settle_initial_phase(&mut self) -> Result<()> {
        self.phase = TimelinePhase::Initialized;
        if self.state.index == self.max_index {
            self.phase = self.phase.transition(TimelineEvent::ReachBound)?;
        }
        Ok(())
    }

    /// Step to n + 1 and return the new state.
    ///
    /// Fails with `TimelineExhausted` once the bound is reached; the state is
    /// left untouched in that case.
    pub fn advance(&mut self) -> Result<PartialSumState> {
        if self.is_terminal() {
            return Err(VizError::TimelineExhausted {
                max_index: self.max_index,
            });
        }

        let next = self.state.next(self.series.term(self.state.index + 1));
        let event = if next.index == self.max_index {
            TimelineEvent::ReachBound
        } else {
            TimelineEvent::Advance
        };

        self.phase = self.phase.transition(event)?;
        self.state = next;

        Ok(next)
    }

    /// Map the current state to a frame. Pure: no mutation, same input gives
    /// the same frame.
    pub fn current_frame<M>(&self, mapper: &M) -> RenderFrame
    where
        M: PositionMapper + ?Sized,
    {
        RenderFrame {
            state: self.state,
            position: mapper.map(self.state.index, self.state.cumulative_sum),
        }
    }

    /// True iff index == max_index
    pub fn is_terminal(&self) -> bool {
        self.state.index == self.max_index
    }

    /// Frames for every remaining step, starting with the current one
    pub fn run_to_end<M>(&mut self, mapper: &M) -> Result<Vec<RenderFrame>>
    where
        M: PositionMapper + ?Sized,
    {
        let mut frames = Vec::new();
        frames.push(self.current_frame(mapper));
        while !self.is_terminal() {
            self.advance()?;
            frames.push(self.current_frame(mapper));
        }
        Ok(frames)
    }

    /// Return to n = 1 with the same series and bound
    pub fn reset(&mut self) -> Result<()> {
        self.state = PartialSumState::first(self.series.term(1));
        self.settle_initial_phase()
    }

    /// Distance from the current sum to the series' known limit
    pub fn gap_to_limit(&self) -> Option<f64> {
        self.series
            .limit()
            .map(|limit| limit - self.state.cumulative_sum)
    }

    /// Steps left before the bound
    pub fn remaining(&self) -> u64 {
        self.max_index - self.state.index
    }

    /// Get current state
    pub fn state(&self) -> PartialSumState {
        self.state
    }

    /// Get current phase
    pub fn phase(&self) -> TimelinePhase {
        self.phase
    }

    /// Get the bound
    pub fn max_index(&self) -> u64 {
        self.max_index
    }

    /// Get the series
    pub fn series(&self) -> &S {
        &self.series
    }
}
