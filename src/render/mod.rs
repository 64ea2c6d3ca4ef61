//! Rendering collaborator interface
//!
//! The scene only ever talks to a `SceneRenderer`. Two implementations ship:
//! a command recorder (tests, dry runs) and a character-canvas terminal
//! renderer.

pub mod labels;
pub mod recorder;
pub mod terminal;

pub use recorder::RecordingRenderer;
pub use terminal::{TerminalOptions, TerminalRenderer, MIN_PLAYBACK_SPEED};

use crate::errors::Result;
use crate::plot::{Axes, PartialSumCurve};
use crate::timeline::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Handle to a label currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelId(pub u64);

/// Which side of the anchor a label goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPlacement {
    Above,
    Below,
}

/// What a label is positioned relative to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAnchor {
    /// A canvas point (usually the marker)
    Point(Point),

    /// Another label still on screen
    Label(LabelId),
}

/// Capabilities the scene needs from a display.
///
/// Durations are the nominal animation lengths; how (or whether) a renderer
/// paces them is up to the renderer.
pub trait SceneRenderer {
    /// Draw both axes with ticks and axis titles
    fn draw_axes(&mut self, axes: &Axes) -> Result<()>;

    /// Draw the partial-sum curve
    fn draw_curve(&mut self, curve: &PartialSumCurve) -> Result<()>;

    /// Put the marker at a point without animating
    fn place_marker(&mut self, at: Point) -> Result<()>;

    /// Animate the marker between two points
    fn move_marker(&mut self, from: Point, to: Point, duration: Duration) -> Result<()>;

    /// Write a text label next to an anchor
    fn write_label(
        &mut self,
        text: &str,
        anchor: LabelAnchor,
        placement: LabelPlacement,
        duration: Duration,
    ) -> Result<LabelId>;

    /// Fade out and remove labels
    fn fade_out(&mut self, labels: &[LabelId], duration: Duration) -> Result<()>;

    /// Hold the current picture
    fn wait(&mut self, duration: Duration) -> Result<()>;

    /// Called once after the last command
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A single renderer call, as recorded or exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RenderCommand {
    DrawAxes {
        x_label: String,
        y_label: String,
        x_ticks: Vec<f64>,
        y_ticks: Vec<f64>,
    },
    DrawCurve {
        points: usize,
    },
    PlaceMarker {
        at: Point,
    },
    MoveMarker {
        from: Point,
        to: Point,
        duration_ms: u64,
    },
    WriteLabel {
        id: LabelId,
        text: String,
        anchor: LabelAnchor,
        placement: LabelPlacement,
        duration_ms: u64,
    },
    FadeOut {
        ids: Vec<LabelId>,
        duration_ms: u64,
    },
    Wait {
        duration_ms: u64,
    },
}

impl RenderCommand {
    /// Short command name
    pub fn kind(&self) -> &'static str {
        match self {
            RenderCommand::DrawAxes { .. } => "draw_axes",
            RenderCommand::DrawCurve { .. } => "draw_curve",
            RenderCommand::PlaceMarker { .. } => "place_marker",
            RenderCommand::MoveMarker { .. } => "move_marker",
            RenderCommand::WriteLabel { .. } => "write_label",
            RenderCommand::FadeOut { .. } => "fade_out",
            RenderCommand::Wait { .. } => "wait",
        }
    }

    /// Nominal on-screen time of this command
    pub fn duration_ms(&self) -> u64 {
        match self {
            RenderCommand::MoveMarker { duration_ms, .. }
            | RenderCommand::WriteLabel { duration_ms, .. }
            | RenderCommand::FadeOut { duration_ms, .. }
            | RenderCommand::Wait { duration_ms } => *duration_ms,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_kind_and_duration() {
        let cmd = RenderCommand::Wait { duration_ms: 200 };
        assert_eq!(cmd.kind(), "wait");
        assert_eq!(cmd.duration_ms(), 200);

        let cmd = RenderCommand::DrawCurve { points: 10 };
        assert_eq!(cmd.duration_ms(), 0);
    }

    #[test]
    fn test_command_json_tag() {
        let cmd = RenderCommand::PlaceMarker {
            at: Point::new(1.0, 2.0),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"command\":\"place_marker\""));
    }
}
