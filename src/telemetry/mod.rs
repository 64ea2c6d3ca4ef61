//! Telemetry system for convergeviz
//!
//! Collects typed events while a scene plays and prints a summary at the end.

use crate::cli::Verbosity;
use crate::timeline::{PartialSumState, TimelinePhase};
use colored::Colorize;
use std::time::{Duration, Instant};

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    // Timeline events
    PhaseTransition {
        from: TimelinePhase,
        to: TimelinePhase,
        timestamp: Instant,
    },
    FrameEmitted {
        index: u64,
        cumulative_sum: f64,
        timestamp: Instant,
    },

    // Renderer events
    MarkerMoved {
        index: u64,
        timestamp: Instant,
    },
    LabelWritten {
        text: String,
        timestamp: Instant,
    },
    LabelsFaded {
        count: usize,
        timestamp: Instant,
    },
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub frames_emitted: usize,
    pub phase_transitions: usize,
    pub marker_moves: usize,
    pub labels_written: usize,
    pub labels_faded: usize,
    pub last_state: Option<PartialSumState>,
}

/// Telemetry collector
#[derive(Debug, Clone)]
pub struct TelemetryCollector {
    events: Vec<TelemetryEvent>,
    stats: TelemetryStats,
    start_time: Instant,
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            stats: TelemetryStats::default(),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&mut self, event: TelemetryEvent) {
        match &event {
            TelemetryEvent::PhaseTransition { .. } => {
                self.stats.phase_transitions += 1;
            }
            TelemetryEvent::FrameEmitted { .. } => {
                self.stats.frames_emitted += 1;
            }
            TelemetryEvent::MarkerMoved { .. } => {
                self.stats.marker_moves += 1;
            }
            TelemetryEvent::LabelWritten { .. } => {
                self.stats.labels_written += 1;
            }
            TelemetryEvent::LabelsFaded { count, .. } => {
                self.stats.labels_faded += count;
            }
        }

        self.events.push(event);
    }

    /// Record a frame together with the state it carried
    pub fn record_frame(&mut self, state: PartialSumState) {
        self.stats.last_state = Some(state);
        self.record(TelemetryEvent::FrameEmitted {
            index: state.index,
            cumulative_sum: state.cumulative_sum,
            timestamp: Instant::now(),
        });
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        self.stats.clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Sums recorded by FrameEmitted events, in order
    pub fn sum_trace(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TelemetryEvent::FrameEmitted { cumulative_sum, .. } => Some(*cumulative_sum),
                _ => None,
            })
            .collect()
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple telemetry display
pub struct TelemetryDisplay<'a> {
    collector: &'a TelemetryCollector,
    verbosity: Verbosity,
}

impl<'a> TelemetryDisplay<'a> {
    /// Create a new display
    pub fn new(collector: &'a TelemetryCollector, verbosity: Verbosity) -> Self {
        Self {
            collector,
            verbosity,
        }
    }

    /// Display summary statistics
    pub fn display_summary(&self, limit: Option<f64>) {
        if !self.verbosity.show_progress() {
            return;
        }

        let stats = self.collector.get_stats();

        println!("\n{}", "Run Summary".bold().cyan());
        println!("─────────────────────────────────────");
        println!("Duration:          {:?}", self.collector.elapsed());
        println!("Frames emitted:    {}", stats.frames_emitted);
        if let Some(state) = stats.last_state {
            println!("Final index:       {}", state.index);
            println!("Partial sum:       {:.10}", state.cumulative_sum);
            if let Some(limit) = limit {
                println!("Limit:             {:.10}", limit);
                println!("Gap:               {:.3e}", limit - state.cumulative_sum);
            }
        }

        if self.should_show_details() {
            println!("Events recorded:   {}", self.collector.event_count());
            println!("Phase transitions: {}", stats.phase_transitions);
            println!("Marker moves:      {}", stats.marker_moves);
            println!("Labels written:    {}", stats.labels_written);
        }

        if self.verbosity.show_trace() {
            for (i, sum) in self.collector.sum_trace().iter().enumerate() {
                println!("  S({:>3}) = {:.10}", i + 1, sum);
            }
        }
        println!();
    }

    /// Check if should show detailed output
    pub fn should_show_details(&self) -> bool {
        self.verbosity.show_events()
    }
}
