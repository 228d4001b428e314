//! Display formatting for heatmap tile labels.

use serde_json::Value;

use super::metric::Metric;
use super::normalize::coerce_or_zero;

/// Render a raw field value into a metric-appropriate display string.
///
/// Pure; malformed input formats as the zero value for the metric.
///
/// - `change_percent`: explicit sign, two decimals, `%` suffix
/// - `volume`: millions with one decimal, `M` suffix
/// - `market_cap`: billions with one decimal, `$` prefix and `B` suffix
pub fn format_value(value: &Value, metric: Metric) -> String {
    let n = coerce_or_zero(value);
    // Canonicalize IEEE -0.0 so the sign prefix below stays single
    let n = if n == 0.0 { 0.0 } else { n };
    match metric {
        Metric::ChangePercent => {
            if n >= 0.0 {
                format!("+{:.2}%", n)
            } else {
                format!("{:.2}%", n)
            }
        }
        Metric::Volume => format!("{:.1}M", n / 1e6),
        Metric::MarketCap => format!("${:.1}B", n / 1e9),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_percent_formatting() {
        assert_eq!(format_value(&json!(3.456), Metric::ChangePercent), "+3.46%");
        assert_eq!(format_value(&json!(-1), Metric::ChangePercent), "-1.00%");
        assert_eq!(format_value(&json!(0), Metric::ChangePercent), "+0.00%");
    }

    #[test]
    fn test_negative_zero_renders_as_positive_zero() {
        // IEEE -0.0 is non-negative for display purposes; a naive sign
        // prefix would emit "+-0.00%"
        assert_eq!(format_value(&json!(-0.0), Metric::ChangePercent), "+0.00%");
        assert_eq!(
            format_value(&json!("-0.0"), Metric::ChangePercent),
            "+0.00%"
        );
    }

    #[test]
    fn test_volume_formatting() {
        assert_eq!(format_value(&json!(2_500_000), Metric::Volume), "2.5M");
        assert_eq!(format_value(&json!(980_000), Metric::Volume), "1.0M");
    }

    #[test]
    fn test_market_cap_formatting() {
        assert_eq!(
            format_value(&json!(1_200_000_000i64), Metric::MarketCap),
            "$1.2B"
        );
        assert_eq!(
            format_value(&json!(250_000_000_000i64), Metric::MarketCap),
            "$250.0B"
        );
    }

    #[test]
    fn test_non_finite_formats_as_zero() {
        assert_eq!(format_value(&Value::Null, Metric::ChangePercent), "+0.00%");
        assert_eq!(format_value(&json!("n/a"), Metric::Volume), "0.0M");
        assert_eq!(format_value(&Value::Null, Metric::MarketCap), "$0.0B");
    }
}
