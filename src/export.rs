//! Frame export
//!
//! Runs a timeline to its bound and packages every frame with run metadata,
//! for external renderers or inspection.

use crate::errors::Result;
use crate::render::labels::{format_rounded, DISPLAY_PLACES};
use crate::series::Series;
use crate::timeline::{ConvergenceTimeline, PositionMapper, RenderFrame};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

/// Every frame of one run plus where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameExport {
    /// Unique run ID
    pub run_id: String,
    /// Export timestamp
    pub generated_at: DateTime<Utc>,
    /// Series name
    pub series: String,
    /// Closed-form limit, if known
    pub limit: Option<f64>,
    /// Timeline bound
    pub max_index: u64,
    /// Frames in index order
    pub frames: Vec<RenderFrame>,
}

impl FrameExport {
    /// Run `timeline` from its current state to the bound.
    ///
    /// `on_frame` is called once per frame (for progress reporting).
    pub fn collect<S, M, F>(
        timeline: &mut ConvergenceTimeline<S>,
        mapper: &M,
        mut on_frame: F,
    ) -> Result<Self>
    where
        S: Series,
        M: PositionMapper + ?Sized,
        F: FnMut(&RenderFrame),
    {
        let mut frames = Vec::new();
        loop {
            let frame = timeline.current_frame(mapper);
            on_frame(&frame);
            frames.push(frame);
            if timeline.is_terminal() {
                break;
            }
            timeline.advance()?;
        }

        Ok(Self {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            series: timeline.series().name().to_string(),
            limit: timeline.series().limit(),
            max_index: timeline.max_index(),
            frames,
        })
    }

    /// Last frame, if any
    pub fn final_frame(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }

    /// Pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously exported JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Aligned text table, one row per frame
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "# series: {}  max_index: {}  run: {}\n",
            self.series, self.max_index, self.run_id
        ));
        out.push_str(&format!(
            "{:>8}  {:>12}  {:>14}  {:>12}  {:>10}  {:>10}\n",
            "n", "term", "sum", "gap", "x", "y"
        ));

        for frame in &self.frames {
            let gap = match self.limit {
                Some(limit) => format!("{:.3e}", limit - frame.state.cumulative_sum),
                None => "-".to_string(),
            };
            out.push_str(&format!(
                "{:>8}  {:>12}  {:>14.10}  {:>12}  {:>10.3}  {:>10.3}\n",
                frame.state.index,
                format_rounded(frame.state.term_value, DISPLAY_PLACES),
                frame.state.cumulative_sum,
                gap,
                frame.position.x,
                frame.position.y
            ));
        }
        out
    }

    /// Write `contents` to a file, or stdout when `path` is None
    pub fn write_to(contents: &str, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                std::fs::write(path, contents)?;
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(contents.as_bytes())?;
                if !contents.ends_with('\n') {
                    handle.write_all(b"\n")?;
                }
                handle.flush()?;
            }
        }
        Ok(())
    }
}
