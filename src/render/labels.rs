//! Label text for the scene
//!
//! Rounding here is for display only; the timeline keeps full precision.

use crate::series::Series;
use crate::timeline::PartialSumState;

/// Decimal places shown in every label
pub const DISPLAY_PLACES: i32 = 4;

/// Round half away from zero to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Rounded value, always printed with a fractional part (`1.0`, `0.25`)
pub fn format_rounded(value: f64, places: i32) -> String {
    let rounded = round_to(value, places);
    let text = format!("{}", rounded);
    if rounded.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// `1/2^2 = 0.25`
pub fn term_label<S: Series + ?Sized>(series: &S, state: &PartialSumState) -> String {
    format!(
        "{} = {}",
        series.term_label(state.index),
        format_rounded(state.term_value, DISPLAY_PLACES)
    )
}

/// `Total: 1.25`
pub fn total_label(state: &PartialSumState) -> String {
    format!("Total: {}", format_rounded(state.cumulative_sum, DISPLAY_PLACES))
}

/// `π²/6 ≈ 1.5498`; falls back to the numeric limit, then to `Σ`
pub fn final_label<S: Series + ?Sized>(series: &S, state: &PartialSumState) -> String {
    let symbol = match (series.limit_symbol(), series.limit()) {
        (Some(symbol), _) => symbol.to_string(),
        (None, Some(limit)) => format_rounded(limit, DISPLAY_PLACES),
        (None, None) => "Σ".to_string(),
    };
    format!(
        "{} ≈ {}",
        symbol,
        format_rounded(state.cumulative_sum, DISPLAY_PLACES)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{BaselSeries, GeometricSeries, PSeries};

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.0 / 9.0, 4), 0.1111);
        assert_eq!(round_to(1.361111, 4), 1.3611);
        assert_eq!(round_to(-0.25, 1), -0.3);
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(1.0, 4), "1.0");
        assert_eq!(format_rounded(0.25, 4), "0.25");
        assert_eq!(format_rounded(1.0 / 9.0, 4), "0.1111");
        assert_eq!(format_rounded(0.000001, 4), "0.0");
    }

    #[test]
    fn test_term_and_total_labels() {
        let state = PartialSumState::first(1.0).next(0.25);
        assert_eq!(term_label(&BaselSeries, &state), "1/2^2 = 0.25");
        assert_eq!(total_label(&state), "Total: 1.25");
    }

    #[test]
    fn test_final_label_variants() {
        let state = PartialSumState::first(0.5);
        assert_eq!(final_label(&BaselSeries, &state), "π²/6 ≈ 0.5");
        assert_eq!(
            final_label(&GeometricSeries::new(0.5).unwrap(), &state),
            "1.0 ≈ 0.5"
        );
        assert_eq!(final_label(&PSeries::new(3.0).unwrap(), &state), "Σ ≈ 0.5");
    }
}
