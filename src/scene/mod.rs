//! Convergence scene storyboard
//!
//! Wires a timeline to a renderer in a fixed order:
//! 1. axes and axis titles, then the partial-sum curve
//! 2. marker at the first frame
//! 3. per index: move marker, term label, total label, pause, fade both
//! 4. final-value label and a hold
//!
//! The loop stops on `is_terminal()`, so a scene never calls `advance` on a
//! finished timeline.

use crate::errors::Result;
use crate::plot::{Axes, PartialSumCurve};
use crate::render::labels;
use crate::render::{LabelAnchor, LabelPlacement, SceneRenderer};
use crate::series::Series;
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use crate::timeline::{ConvergenceTimeline, PartialSumState, RenderFrame, TimelinePhase};
use std::time::{Duration, Instant};

/// Nominal animation lengths for each storyboard step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackTimings {
    pub move_marker: Duration,
    pub write_label: Duration,
    pub pause: Duration,
    pub fade_out: Duration,
    pub final_hold: Duration,
}

impl Default for PlaybackTimings {
    fn default() -> Self {
        Self {
            move_marker: Duration::from_millis(1000),
            write_label: Duration::from_millis(1000),
            pause: Duration::from_millis(200),
            fade_out: Duration::from_millis(1000),
            final_hold: Duration::from_millis(2000),
        }
    }
}

/// Outcome of a played scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub frames: usize,
    pub final_state: PartialSumState,
    pub final_phase: TimelinePhase,
    pub gap_to_limit: Option<f64>,
    pub final_label: String,
}

/// A timeline plus everything needed to show it
pub struct ConvergenceScene<S: Series = Box<dyn Series>> {
    timeline: ConvergenceTimeline<S>,
    axes: Axes,
    timings: PlaybackTimings,
    curve_samples: usize,
    telemetry: TelemetryCollector,
}

impl<S: Series> ConvergenceScene<S> {
    /// Create scene with default timings
    pub fn new(timeline: ConvergenceTimeline<S>, axes: Axes) -> Self {
        Self {
            timeline,
            axes,
            timings: PlaybackTimings::default(),
            curve_samples: 241,
            telemetry: TelemetryCollector::new(),
        }
    }

    /// Override animation timings
    pub fn with_timings(mut self, timings: PlaybackTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Override curve resolution
    pub fn with_curve_samples(mut self, samples: usize) -> Self {
        self.curve_samples = samples;
        self
    }

    /// Play the whole storyboard against `renderer`
    pub fn play<R>(&mut self, renderer: &mut R) -> Result<SceneSummary>
    where
        R: SceneRenderer + ?Sized,
    {
        renderer.draw_axes(&self.axes)?;

        let curve = PartialSumCurve::sample(self.timeline.series(), &self.axes, self.curve_samples)?;
        renderer.draw_curve(&curve)?;

        let mut frame = self.timeline.current_frame(&self.axes);
        renderer.place_marker(frame.position)?;
        self.telemetry.record_frame(frame.state);
        let mut frames = 1;

        loop {
            self.annotate(renderer, &frame)?;

            if self.timeline.is_terminal() {
                break;
            }

            let previous = frame.position;
            self.step()?;
            frame = self.timeline.current_frame(&self.axes);
            self.telemetry.record_frame(frame.state);
            frames += 1;

            renderer.move_marker(previous, frame.position, self.timings.move_marker)?;
            self.telemetry.record(TelemetryEvent::MarkerMoved {
                index: frame.state.index,
                timestamp: Instant::now(),
            });
        }

        let final_label = labels::final_label(self.timeline.series(), &frame.state);
        renderer.write_label(
            &final_label,
            LabelAnchor::Point(frame.position),
            LabelPlacement::Above,
            self.timings.write_label,
        )?;
        self.telemetry.record(TelemetryEvent::LabelWritten {
            text: final_label.clone(),
            timestamp: Instant::now(),
        });
        renderer.wait(self.timings.final_hold)?;
        renderer.finish()?;

        Ok(SceneSummary {
            frames,
            final_state: frame.state,
            final_phase: self.timeline.phase(),
            gap_to_limit: self.timeline.gap_to_limit(),
            final_label,
        })
    }

    // Advance one index, recording any phase change
    fn step(&mut self) -> Result<PartialSumState> {
        let before = self.timeline.phase();
        let state = self.timeline.advance()?;

        let after = self.timeline.phase();
        if before != after {
            self.telemetry.record(TelemetryEvent::PhaseTransition {
                from: before,
                to: after,
                timestamp: Instant::now(),
            });
        }
        Ok(state)
    }

    // Term label above the marker, total below it, pause, fade both
    fn annotate<R>(&mut self, renderer: &mut R, frame: &RenderFrame) -> Result<()>
    where
        R: SceneRenderer + ?Sized,
    {
        let term_text = labels::term_label(self.timeline.series(), &frame.state);
        let term = renderer.write_label(
            &term_text,
            LabelAnchor::Point(frame.position),
            LabelPlacement::Above,
            self.timings.write_label,
        )?;

        let total_text = labels::total_label(&frame.state);
        let total = renderer.write_label(
            &total_text,
            LabelAnchor::Label(term),
            LabelPlacement::Below,
            self.timings.write_label,
        )?;

        for text in [term_text, total_text] {
            self.telemetry.record(TelemetryEvent::LabelWritten {
                text,
                timestamp: Instant::now(),
            });
        }

        renderer.wait(self.timings.pause)?;
        renderer.fade_out(&[term, total], self.timings.fade_out)?;
        self.telemetry.record(TelemetryEvent::LabelsFaded {
            count: 2,
            timestamp: Instant::now(),
        });
        Ok(())
    }

    pub fn timeline(&self) -> &ConvergenceTimeline<S> {
        &self.timeline
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn telemetry(&self) -> &TelemetryCollector {
        &self.telemetry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingRenderer, RenderCommand};
    use crate::series::BaselSeries;

    fn scene(max_index: u64) -> ConvergenceScene<BaselSeries> {
        let timeline = ConvergenceTimeline::initialize(BaselSeries, max_index).unwrap();
        ConvergenceScene::new(timeline, Axes::default())
    }

    #[test]
    fn test_play_reaches_terminal() {
        let mut scene = scene(10);
        let mut renderer = RecordingRenderer::new();
        let summary = scene.play(&mut renderer).unwrap();

        assert_eq!(summary.frames, 10);
        assert_eq!(summary.final_state.index, 10);
        assert_eq!(summary.final_phase, TimelinePhase::Terminal);
        assert_eq!(summary.final_label, "π²/6 ≈ 1.5498");
        assert!(summary.gap_to_limit.unwrap() > 0.0);
    }

    #[test]
    fn test_storyboard_order() {
        let mut scene = scene(2);
        let mut renderer = RecordingRenderer::new();
        scene.play(&mut renderer).unwrap();

        let kinds: Vec<&str> = renderer.commands().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "draw_axes",
                "draw_curve",
                "place_marker",
                "write_label",
                "write_label",
                "wait",
                "fade_out",
                "move_marker",
                "write_label",
                "write_label",
                "wait",
                "fade_out",
                "write_label",
                "wait",
            ]
        );
        assert_eq!(renderer.visible_labels(), vec!["π²/6 ≈ 1.25"]);
    }

    #[test]
    fn test_label_texts() {
        let mut scene = scene(3);
        let mut renderer = RecordingRenderer::new();
        scene.play(&mut renderer).unwrap();

        let texts: Vec<String> = renderer
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::WriteLabel { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "1/1^2 = 1.0",
                "Total: 1.0",
                "1/2^2 = 0.25",
                "Total: 1.25",
                "1/3^2 = 0.1111",
                "Total: 1.3611",
                "π²/6 ≈ 1.3611",
            ]
        );
    }

    #[test]
    fn test_single_index_scene() {
        let mut scene = scene(1);
        let mut renderer = RecordingRenderer::new();
        let summary = scene.play(&mut renderer).unwrap();

        assert_eq!(summary.frames, 1);
        assert_eq!(renderer.count("move_marker"), 0);
    }

    #[test]
    fn test_telemetry_counts() {
        let mut scene = scene(4);
        let mut renderer = RecordingRenderer::new();
        scene.play(&mut renderer).unwrap();

        let stats = scene.telemetry().get_stats();
        assert_eq!(stats.frames_emitted, 4);
        assert_eq!(stats.marker_moves, 3);
        assert_eq!(stats.labels_written, 9);
        assert_eq!(stats.labels_faded, 8);
        // Initialized -> Advancing, Advancing -> Terminal
        assert_eq!(stats.phase_transitions, 2);
        // one LabelsFaded event per annotated frame
        assert_eq!(scene.telemetry().event_count(), 4 + 3 + 9 + 2 + 4);
    }

    #[test]
    fn test_custom_timings() {
        let timings = PlaybackTimings {
            move_marker: Duration::from_millis(10),
            write_label: Duration::from_millis(10),
            pause: Duration::ZERO,
            fade_out: Duration::from_millis(10),
            final_hold: Duration::ZERO,
        };
        let mut scene = scene(2).with_timings(timings).with_curve_samples(11);
        let mut renderer = RecordingRenderer::new();
        scene.play(&mut renderer).unwrap();

        // 2 frames * (2 writes + fade) + 1 move + final write
        assert_eq!(renderer.total_duration(), Duration::from_millis(80));
        assert!(renderer
            .commands()
            .contains(&RenderCommand::DrawCurve { points: 11 }));
    }
}
