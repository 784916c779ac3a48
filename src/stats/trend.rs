//! Linear HRV trend classification.

use std::fmt;

use serde::Serialize;

// ---

/// Normalised slope (percent of the mean per day) beyond which a trend is
/// called improving or declining.
const TREND_THRESHOLD_PCT: f64 = 0.5;

/// Points needed before a trend is reported at all.
const MIN_POINTS: usize = 3;

/// Direction of a series, with the magnitude of the normalised slope in
/// percent of the series mean per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum HrvTrend {
    // ---
    InsufficientData,
    Stable,
    Improving { percent_per_day: f64 },
    Declining { percent_per_day: f64 },
}

impl fmt::Display for HrvTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HrvTrend::InsufficientData => f.write_str("Insufficient data"),
            HrvTrend::Stable => f.write_str("Stable"),
            HrvTrend::Improving { percent_per_day } => {
                write!(f, "Improving (+{percent_per_day:.1}%/day)")
            }
            HrvTrend::Declining { percent_per_day } => {
                write!(f, "Declining (-{percent_per_day:.1}%/day)")
            }
        }
    }
}

/// Classify a chronological series by its least-squares slope against
/// `0..n`, expressed as a percentage of the series mean.
///
/// Fewer than three points is [`HrvTrend::InsufficientData`]. A degenerate
/// regression or a zero mean is [`HrvTrend::Stable`].
pub fn hrv_trend(values: &[f64]) -> HrvTrend {
    // ---
    let n = values.len();
    if n < MIN_POINTS {
        return HrvTrend::InsufficientData;
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let n = n as f64;
    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        return HrvTrend::Stable;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let mean = sum_y / n;
    if mean == 0.0 {
        return HrvTrend::Stable;
    }

    let normalized = slope / mean * 100.0;
    if !normalized.is_finite() {
        return HrvTrend::Stable;
    }

    if normalized > TREND_THRESHOLD_PCT {
        HrvTrend::Improving {
            percent_per_day: normalized.abs(),
        }
    } else if normalized < -TREND_THRESHOLD_PCT {
        HrvTrend::Declining {
            percent_per_day: normalized.abs(),
        }
    } else {
        HrvTrend::Stable
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_short_series_is_insufficient() {
        // ---
        assert_eq!(hrv_trend(&[]), HrvTrend::InsufficientData);
        assert_eq!(hrv_trend(&[50.0]), HrvTrend::InsufficientData);
        assert_eq!(hrv_trend(&[50.0, 55.0]), HrvTrend::InsufficientData);
        assert_eq!(HrvTrend::InsufficientData.to_string(), "Insufficient data");
    }

    #[test]
    fn test_flat_series_is_stable() {
        // ---
        assert_eq!(hrv_trend(&[60.0; 5]), HrvTrend::Stable);
        assert_eq!(hrv_trend(&[0.0; 4]), HrvTrend::Stable);
    }

    #[test]
    fn test_rising_series_is_improving() {
        // ---
        // slope 5/day over a mean of 60
        let trend = hrv_trend(&[50.0, 55.0, 60.0, 65.0, 70.0]);
        match trend {
            HrvTrend::Improving { percent_per_day } => {
                assert!((percent_per_day - 8.333).abs() < 0.01, "{percent_per_day}");
            }
            other => panic!("expected improving, got {other:?}"),
        }
        assert_eq!(trend.to_string(), "Improving (+8.3%/day)");
    }

    #[test]
    fn test_falling_series_is_declining() {
        // ---
        let trend = hrv_trend(&[70.0, 65.0, 60.0, 55.0, 50.0]);
        assert!(matches!(trend, HrvTrend::Declining { .. }));
        assert_eq!(trend.to_string(), "Declining (-8.3%/day)");
    }

    #[test]
    fn test_small_drift_stays_stable() {
        // ---
        // slope 0.2/day over a mean of ~60 is about 0.33%/day
        assert_eq!(hrv_trend(&[60.0, 60.2, 60.4, 60.6]), HrvTrend::Stable);
    }

    #[test]
    fn test_serializes_with_direction_tag() {
        // ---
        let json = serde_json::to_value(HrvTrend::Stable).unwrap();
        assert_eq!(json, serde_json::json!({ "direction": "stable" }));

        let json = serde_json::to_value(HrvTrend::Declining { percent_per_day: 1.5 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "direction": "declining", "percent_per_day": 1.5 })
        );
    }
}
