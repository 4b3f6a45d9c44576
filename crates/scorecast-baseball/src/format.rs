// Display formatting for computed stats. Rounding only ever happens here.

use serde::{Deserialize, Serialize};

/// How average-family rates are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateStyle {
    /// ".300", "1.000"
    #[default]
    Baseball,
    /// "0.300", "1.000"
    Decimal,
}

/// Three decimal places. Non-finite values render as "-".
pub fn format_rate(value: f64, style: RateStyle) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let text = format!("{value:.3}");
    match style {
        RateStyle::Decimal => text,
        RateStyle::Baseball => {
            if let Some(rest) = text.strip_prefix("0.") {
                format!(".{rest}")
            } else if let Some(rest) = text.strip_prefix("-0.") {
                format!("-.{rest}")
            } else {
                text
            }
        }
    }
}

/// A fraction printed as a percentage with one decimal place.
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "-".to_string();
    }
    format!("{:.1}%", fraction * 100.0)
}

/// Runs per play with two decimals, zero-guarded.
pub fn format_ratio(runs: u32, plays: u32) -> String {
    let ratio = crate::stats::safe_ratio(runs as f64, plays as f64);
    format!("{ratio:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseball_style_drops_leading_zero() {
        assert_eq!(format_rate(0.3, RateStyle::Baseball), ".300");
        assert_eq!(format_rate(0.28571, RateStyle::Baseball), ".286");
        assert_eq!(format_rate(0.0, RateStyle::Baseball), ".000");
        assert_eq!(format_rate(1.0, RateStyle::Baseball), "1.000");
        assert_eq!(format_rate(1.25, RateStyle::Baseball), "1.250");
        assert_eq!(format_rate(-0.05, RateStyle::Baseball), "-.050");
    }

    #[test]
    fn decimal_style_keeps_leading_zero() {
        assert_eq!(format_rate(0.3, RateStyle::Decimal), "0.300");
        assert_eq!(format_rate(0.9996, RateStyle::Decimal), "1.000");
    }

    #[test]
    fn non_finite_is_dash() {
        assert_eq!(format_rate(f64::NAN, RateStyle::Baseball), "-");
        assert_eq!(format_rate(f64::INFINITY, RateStyle::Decimal), "-");
        assert_eq!(format_percent(f64::NAN), "-");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.253), "25.3%");
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn ratio_guards_zero_plays() {
        assert_eq!(format_ratio(0, 0), "0.00");
        assert_eq!(format_ratio(3, 2), "1.50");
    }
}
