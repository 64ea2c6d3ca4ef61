//! Renderer that records commands instead of drawing

use crate::errors::{Result, VizError};
use crate::plot::{Axes, PartialSumCurve};
use crate::render::{LabelAnchor, LabelId, LabelPlacement, RenderCommand, SceneRenderer};
use crate::timeline::Point;
use std::time::Duration;

/// Records every call as a `RenderCommand`, and tracks what would be visible
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
    marker: Option<Point>,
    visible: Vec<(LabelId, String)>,
    next_label: u64,
}

impl RecordingRenderer {
    /// Create empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands, in order
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Current marker position
    pub fn marker(&self) -> Option<Point> {
        self.marker
    }

    /// Text of labels still on screen
    pub fn visible_labels(&self) -> Vec<&str> {
        self.visible.iter().map(|(_, text)| text.as_str()).collect()
    }

    /// Sum of nominal durations
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.commands.iter().map(|c| c.duration_ms()).sum())
    }

    /// Number of commands of a given kind
    pub fn count(&self, kind: &str) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }

    fn is_visible(&self, id: LabelId) -> bool {
        self.visible.iter().any(|(visible, _)| *visible == id)
    }
}

impl SceneRenderer for RecordingRenderer {
    fn draw_axes(&mut self, axes: &Axes) -> Result<()> {
        self.commands.push(RenderCommand::DrawAxes {
            x_label: axes.x_label().to_string(),
            y_label: axes.y_label().to_string(),
            x_ticks: axes.x_range().ticks(),
            y_ticks: axes.y_range().ticks(),
        });
        Ok(())
    }

    fn draw_curve(&mut self, curve: &PartialSumCurve) -> Result<()> {
        self.commands
            .push(RenderCommand::DrawCurve { points: curve.len() });
        Ok(())
    }

    fn place_marker(&mut self, at: Point) -> Result<()> {
        self.marker = Some(at);
        self.commands.push(RenderCommand::PlaceMarker { at });
        Ok(())
    }

    fn move_marker(&mut self, from: Point, to: Point, duration: Duration) -> Result<()> {
        if self.marker.is_none() {
            return Err(VizError::RenderError(
                "move_marker called before place_marker".to_string(),
            ));
        }
        self.marker = Some(to);
        self.commands.push(RenderCommand::MoveMarker {
            from,
            to,
            duration_ms: duration.as_millis() as u64,
        });
        Ok(())
    }

    fn write_label(
        &mut self,
        text: &str,
        anchor: LabelAnchor,
        placement: LabelPlacement,
        duration: Duration,
    ) -> Result<LabelId> {
        if let LabelAnchor::Label(parent) = anchor {
            if !self.is_visible(parent) {
                return Err(VizError::RenderError(format!(
                    "label anchored to missing label {:?}",
                    parent
                )));
            }
        }

        let id = LabelId(self.next_label);
        self.next_label += 1;
        self.visible.push((id, text.to_string()));
        self.commands.push(RenderCommand::WriteLabel {
            id,
            text: text.to_string(),
            anchor,
            placement,
            duration_ms: duration.as_millis() as u64,
        });
        Ok(id)
    }

    fn fade_out(&mut self, labels: &[LabelId], duration: Duration) -> Result<()> {
        self.visible.retain(|(id, _)| !labels.contains(id));
        self.commands.push(RenderCommand::FadeOut {
            ids: labels.to_vec(),
            duration_ms: duration.as_millis() as u64,
        });
        Ok(())
    }

    fn wait(&mut self, duration: Duration) -> Result<()> {
        self.commands.push(RenderCommand::Wait {
            duration_ms: duration.as_millis() as u64,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_tracking() {
        let mut renderer = RecordingRenderer::new();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(5.0, 5.0);

        assert!(renderer.move_marker(a, b, Duration::from_millis(10)).is_err());

        renderer.place_marker(a).unwrap();
        renderer.move_marker(a, b, Duration::from_millis(10)).unwrap();
        assert_eq!(renderer.marker(), Some(b));
        assert_eq!(renderer.count("move_marker"), 1);
    }

    #[test]
    fn test_label_lifecycle() {
        let mut renderer = RecordingRenderer::new();
        let anchor = LabelAnchor::Point(Point::new(1.0, 1.0));

        let term = renderer
            .write_label("1/1^2 = 1.0", anchor, LabelPlacement::Above, Duration::ZERO)
            .unwrap();
        let total = renderer
            .write_label(
                "Total: 1.0",
                LabelAnchor::Label(term),
                LabelPlacement::Below,
                Duration::ZERO,
            )
            .unwrap();
        assert_ne!(term, total);
        assert_eq!(renderer.visible_labels(), vec!["1/1^2 = 1.0", "Total: 1.0"]);

        renderer.fade_out(&[term, total], Duration::ZERO).unwrap();
        assert!(renderer.visible_labels().is_empty());

        let orphan = renderer.write_label(
            "orphan",
            LabelAnchor::Label(term),
            LabelPlacement::Below,
            Duration::ZERO,
        );
        assert!(orphan.is_err());
    }

    #[test]
    fn test_total_duration() {
        let mut renderer = RecordingRenderer::new();
        renderer.wait(Duration::from_millis(200)).unwrap();
        renderer.wait(Duration::from_millis(300)).unwrap();
        assert_eq!(renderer.total_duration(), Duration::from_millis(500));
    }
}
