//! Axes and coordinate mapping
//!
//! Maps domain values (n, partial sum) onto a canvas whose origin is the
//! top-left corner, y growing downward.

use crate::errors::{Result, VizError};
use crate::timeline::{Point, PositionMapper};
use serde::{Deserialize, Serialize};

/// Upper bound on `span / step` for a single axis
pub const MAX_TICK_STEPS: f64 = 1000.0;

/// One axis: inclusive range plus tick spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl AxisRange {
    /// Create a validated range
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        let range = Self { min, max, step };
        range.validate()?;
        Ok(range)
    }

    /// Check min < max, step > 0 with a bounded tick count, all finite
    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(VizError::invalid("axis bounds must be finite"));
        }
        if self.min >= self.max {
            return Err(VizError::invalid(format!(
                "axis min ({}) must be below max ({})",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(VizError::invalid(format!(
                "axis step must be positive, got {}",
                self.step
            )));
        }
        if self.span() / self.step > MAX_TICK_STEPS {
            return Err(VizError::invalid(format!(
                "axis step {} is too small for span {} (at most {} ticks)",
                self.step,
                self.span(),
                MAX_TICK_STEPS
            )));
        }
        Ok(())
    }

    /// Span of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Fraction of the way through the range (not clamped)
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Tick positions from min to max inclusive
    pub fn ticks(&self) -> Vec<f64> {
        let count = (self.span() / self.step + 1e-9).floor() as usize;
        (0..=count).map(|i| self.min + i as f64 * self.step).collect()
    }

    /// Whether `value` lies inside the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A pair of axes laid out on a `width` x `height` canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    x: AxisRange,
    y: AxisRange,
    width: usize,
    height: usize,
    x_label: String,
    y_label: String,
}

impl Axes {
    /// Create axes, validating both ranges and the canvas size
    pub fn new(x: AxisRange, y: AxisRange, width: usize, height: usize) -> Result<Self> {
        x.validate()?;
        y.validate()?;
        if width < 2 || height < 2 {
            return Err(VizError::invalid(format!(
                "canvas must be at least 2x2, got {}x{}",
                width, height
            )));
        }

        Ok(Self {
            x,
            y,
            width,
            height,
            x_label: "n".to_string(),
            y_label: "Partial Sum".to_string(),
        })
    }

    /// Override the axis labels
    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Domain coordinates to canvas coordinates
    pub fn c2p(&self, x: f64, y: f64) -> Point {
        let px = self.x.normalize(x) * (self.width - 1) as f64;
        let py = (1.0 - self.y.normalize(y)) * (self.height - 1) as f64;
        Point::new(px, py)
    }

    /// Canvas coordinates back to domain coordinates
    pub fn p2c(&self, point: Point) -> (f64, f64) {
        let x = self.x.min + point.x / (self.width - 1) as f64 * self.x.span();
        let y = self.y.min + (1.0 - point.y / (self.height - 1) as f64) * self.y.span();
        (x, y)
    }

    /// Canvas point of the domain origin, clamped into the ranges
    pub fn origin(&self) -> Point {
        let x = 0.0_f64.clamp(self.x.min, self.x.max);
        let y = 0.0_f64.clamp(self.y.min, self.y.max);
        self.c2p(x, y)
    }

    pub fn x_range(&self) -> &AxisRange {
        &self.x
    }

    pub fn y_range(&self) -> &AxisRange {
        &self.y
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            x: AxisRange { min: 0.0, max: 10.0, step: 1.0 },
            y: AxisRange { min: 0.0, max: 2.0, step: 0.5 },
            width: 61,
            height: 21,
            x_label: "n".to_string(),
            y_label: "Partial Sum".to_string(),
        }
    }
}

impl PositionMapper for Axes {
    fn map(&self, index: u64, cumulative_sum: f64) -> Point {
        self.c2p(index as f64, cumulative_sum)
    }
}
