//! Series type definitions

use crate::errors::{Result, VizError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// An ordered sequence of strictly positive, decreasing terms indexed from 1
pub trait Series {
    /// Value of the n-th term (n >= 1)
    fn term(&self, n: u64) -> f64;

    /// Short human-readable name
    fn name(&self) -> &str;

    /// Display form of the n-th term, e.g. `1/3^2`
    fn term_label(&self, n: u64) -> String;

    /// Closed-form sum of the whole series, if known
    fn limit(&self) -> Option<f64> {
        None
    }

    /// Symbolic form of the limit used in the final label
    fn limit_symbol(&self) -> Option<&'static str> {
        None
    }

    /// Sum of the first `n` terms, re-reduced from scratch.
    ///
    /// O(n) per call. The timeline never uses this; it carries the sum forward.
    fn prefix_sum(&self, n: u64) -> f64 {
        (1..=n).map(|k| self.term(k)).sum()
    }
}

impl<S: Series + ?Sized> Series for Box<S> {
    fn term(&self, n: u64) -> f64 {
        (**self).term(n)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn term_label(&self, n: u64) -> String {
        (**self).term_label(n)
    }

    fn limit(&self) -> Option<f64> {
        (**self).limit()
    }

    fn limit_symbol(&self) -> Option<&'static str> {
        (**self).limit_symbol()
    }
}

/// The Basel problem: sum of 1/n², converging to π²/6
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BaselSeries;

impl Series for BaselSeries {
    fn term(&self, n: u64) -> f64 {
        let n = n as f64;
        1.0 / (n * n)
    }

    fn name(&self) -> &str {
        "basel"
    }

    fn term_label(&self, n: u64) -> String {
        format!("1/{}^2", n)
    }

    fn limit(&self) -> Option<f64> {
        Some(PI * PI / 6.0)
    }

    fn limit_symbol(&self) -> Option<&'static str> {
        Some("π²/6")
    }
}

/// p-series: sum of 1/n^p, convergent for p > 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PSeries {
    p: f64,
}

impl PSeries {
    /// Create a p-series, rejecting divergent exponents
    pub fn new(p: f64) -> Result<Self> {
        if !p.is_finite() || p <= 1.0 {
            return Err(VizError::invalid(format!(
                "p-series exponent must be a finite number greater than 1, got {}",
                p
            )));
        }
        Ok(Self { p })
    }

    /// Exponent
    pub fn p(&self) -> f64 {
        self.p
    }

    fn is_exponent(&self, value: f64) -> bool {
        (self.p - value).abs() < f64::EPSILON
    }
}

impl Series for PSeries {
    fn term(&self, n: u64) -> f64 {
        1.0 / (n as f64).powf(self.p)
    }

    fn name(&self) -> &str {
        "p-series"
    }

    fn term_label(&self, n: u64) -> String {
        format!("1/{}^{}", n, self.p)
    }

    fn limit(&self) -> Option<f64> {
        if self.is_exponent(2.0) {
            Some(PI * PI / 6.0)
        } else if self.is_exponent(4.0) {
            Some(PI.powi(4) / 90.0)
        } else {
            None
        }
    }

    fn limit_symbol(&self) -> Option<&'static str> {
        if self.is_exponent(2.0) {
            Some("π²/6")
        } else if self.is_exponent(4.0) {
            Some("π⁴/90")
        } else {
            None
        }
    }
}

/// Geometric series r + r² + r³ + ..., convergent for 0 < r < 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricSeries {
    ratio: f64,
}

impl GeometricSeries {
    /// Create a geometric series, rejecting ratios outside (0, 1)
    pub fn new(ratio: f64) -> Result<Self> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(VizError::invalid(format!(
                "geometric ratio must lie strictly between 0 and 1, got {}",
                ratio
            )));
        }
        Ok(Self { ratio })
    }

    /// Common ratio
    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Series for GeometricSeries {
    fn term(&self, n: u64) -> f64 {
        self.ratio.powi(n.min(i32::MAX as u64) as i32)
    }

    fn name(&self) -> &str {
        "geometric"
    }

    fn term_label(&self, n: u64) -> String {
        format!("{}^{}", self.ratio, n)
    }

    fn limit(&self) -> Option<f64> {
        Some(self.ratio / (1.0 - self.ratio))
    }
}

/// Series selection as it appears in config files and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SeriesKind {
    Basel,
    PSeries { p: f64 },
    Geometric { ratio: f64 },
}

impl Default for SeriesKind {
    fn default() -> Self {
        SeriesKind::Basel
    }
}

impl SeriesKind {
    /// Build the concrete series, validating its parameters
    pub fn build(&self) -> Result<Box<dyn Series>> {
        match *self {
            SeriesKind::Basel => Ok(Box::new(BaselSeries)),
            SeriesKind::PSeries { p } => Ok(Box::new(PSeries::new(p)?)),
            SeriesKind::Geometric { ratio } => Ok(Box::new(GeometricSeries::new(ratio)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basel_terms() {
        let series = BaselSeries;
        assert_eq!(series.term(1), 1.0);
        assert_eq!(series.term(2), 0.25);
        assert!((series.term(3) - 1.0 / 9.0).abs() < f64::EPSILON);
        assert_eq!(series.term_label(3), "1/3^2");
    }

    #[test]
    fn test_basel_limit() {
        let limit = BaselSeries.limit().unwrap();
        assert!((limit - 1.644934).abs() < 1e-6);
        assert_eq!(BaselSeries.limit_symbol(), Some("π²/6"));
    }

    #[test]
    fn test_terms_decreasing() {
        let series: Vec<Box<dyn Series>> = vec![
            Box::new(BaselSeries),
            Box::new(PSeries::new(1.5).unwrap()),
            Box::new(GeometricSeries::new(0.5).unwrap()),
        ];
        for s in &series {
            for n in 1..200 {
                assert!(s.term(n) > 0.0, "{} term {} not positive", s.name(), n);
                assert!(s.term(n) > s.term(n + 1), "{} not decreasing at {}", s.name(), n);
            }
        }
    }

    #[test]
    fn test_p_series_validation() {
        assert!(PSeries::new(1.0).is_err());
        assert!(PSeries::new(0.5).is_err());
        assert!(PSeries::new(f64::NAN).is_err());
        assert!(PSeries::new(2.0).is_ok());
    }

    #[test]
    fn test_p_series_known_limits() {
        let p2 = PSeries::new(2.0).unwrap();
        assert_eq!(p2.limit(), BaselSeries.limit());
        let p4 = PSeries::new(4.0).unwrap();
        assert!((p4.limit().unwrap() - 1.082323).abs() < 1e-6);
        assert_eq!(p4.limit_symbol(), Some("π⁴/90"));
        assert!(PSeries::new(3.0).unwrap().limit().is_none());
    }

    #[test]
    fn test_geometric_series() {
        assert!(GeometricSeries::new(1.0).is_err());
        assert!(GeometricSeries::new(0.0).is_err());
        let half = GeometricSeries::new(0.5).unwrap();
        assert_eq!(half.term(1), 0.5);
        assert_eq!(half.term(3), 0.125);
        assert_eq!(half.limit(), Some(1.0));
    }

    #[test]
    fn test_prefix_sum() {
        let sum = BaselSeries.prefix_sum(3);
        assert!((sum - (1.0 + 0.25 + 1.0 / 9.0)).abs() < 1e-12);
        assert_eq!(BaselSeries.prefix_sum(0), 0.0);
    }

    #[test]
    fn test_series_kind_build() {
        let series = SeriesKind::default().build().unwrap();
        assert_eq!(series.name(), "basel");
        assert!(SeriesKind::PSeries { p: 0.9 }.build().is_err());
        assert!(SeriesKind::Geometric { ratio: 0.25 }.build().is_ok());
    }

    #[test]
    fn test_series_kind_toml() {
        let kind: SeriesKind = toml::from_str("kind = \"p-series\"\np = 3.0").unwrap();
        assert_eq!(kind, SeriesKind::PSeries { p: 3.0 });
    }
}
