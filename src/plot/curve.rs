//! Sampled partial-sum curve
//!
//! The plotted graph is the step function x ↦ Σ term(n) for n in 1..=⌊x⌋,
//! which is 0 left of x = 1.

use crate::errors::{Result, VizError};
use crate::plot::axes::Axes;
use crate::series::Series;
use crate::timeline::Point;

/// Canvas points of the partial-sum step function across the x range
#[derive(Debug, Clone, PartialEq)]
pub struct PartialSumCurve {
    points: Vec<Point>,
}

impl PartialSumCurve {
    /// Sample the curve at `samples` evenly spaced x values.
    ///
    /// Samples are visited in increasing x, so the sum is carried forward
    /// instead of being re-reduced per sample.
    pub fn sample<S: Series + ?Sized>(series: &S, axes: &Axes, samples: usize) -> Result<Self> {
        if samples < 2 {
            return Err(VizError::invalid(format!(
                "curve needs at least 2 samples, got {}",
                samples
            )));
        }

        let range = axes.x_range();
        let dx = range.span() / (samples - 1) as f64;

        let mut points = Vec::with_capacity(samples);
        let mut n: u64 = 0;
        let mut sum = 0.0;

        for i in 0..samples {
            let x = range.min + i as f64 * dx;
            let upto = if x >= 1.0 { x.floor() as u64 } else { 0 };
            while n < upto {
                n += 1;
                sum += series.term(n);
            }
            points.push(axes.c2p(x, sum));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::BaselSeries;

    #[test]
    fn test_sample_count() {
        let axes = Axes::default();
        let curve = PartialSumCurve::sample(&BaselSeries, &axes, 101).unwrap();
        assert_eq!(curve.len(), 101);
        assert!(!curve.is_empty());
    }

    #[test]
    fn test_too_few_samples() {
        let axes = Axes::default();
        assert!(PartialSumCurve::sample(&BaselSeries, &axes, 1).is_err());
    }

    #[test]
    fn test_step_values() {
        let axes = Axes::default();
        // x = 0, 1, 2, ..., 10
        let curve = PartialSumCurve::sample(&BaselSeries, &axes, 11).unwrap();
        let points = curve.points();

        assert_eq!(points[0], axes.c2p(0.0, 0.0));
        assert_eq!(points[1], axes.c2p(1.0, 1.0));
        assert_eq!(points[2], axes.c2p(2.0, 1.25));

        let (_, last) = axes.p2c(points[10]);
        assert!((last - BaselSeries.prefix_sum(10)).abs() < 1e-9);
    }

    #[test]
    fn test_curve_non_decreasing_in_value() {
        let axes = Axes::default();
        let curve = PartialSumCurve::sample(&BaselSeries, &axes, 200).unwrap();
        // canvas y grows downward
        for pair in curve.points().windows(2) {
            assert!(pair[1].y <= pair[0].y + 1e-12);
        }
    }
}
