//! Classification and display helpers shared by the digests.

use std::fmt;

use serde::Serialize;

use crate::models::Sleep;

// ---

/// WHOOP recovery tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryColor {
    // ---
    Green,
    Yellow,
    Red,
}

impl fmt::Display for RecoveryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecoveryColor::Green => "green",
            RecoveryColor::Yellow => "yellow",
            RecoveryColor::Red => "red",
        };
        f.write_str(name)
    }
}

/// `>= 67` green, `>= 34` yellow, otherwise red. Lower bounds are inclusive.
pub fn recovery_color(score: f64) -> RecoveryColor {
    // ---
    if score >= 67.0 {
        RecoveryColor::Green
    } else if score >= 34.0 {
        RecoveryColor::Yellow
    } else {
        RecoveryColor::Red
    }
}

/// WHOOP's strain bands on the 0-21 scale.
pub fn strain_category(strain: f64) -> &'static str {
    // ---
    if strain >= 18.0 {
        "All Out"
    } else if strain >= 14.0 {
        "Strenuous"
    } else if strain >= 10.0 {
        "Moderate"
    } else if strain >= 7.0 {
        "Light"
    } else {
        "Minimal"
    }
}

/// Whole minutes, floored: `"45m"` or `"7h 0m"`. Negative input reads as zero.
pub fn millis_to_minutes(millis: i64) -> String {
    // ---
    let total_minutes = millis.max(0) / 60_000;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours == 0 {
        format!("{minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// The main (non-nap) sleep of a day: the one with the longest in-bed time.
/// The first one wins a tie.
pub fn primary_sleep(sleeps: &[Sleep]) -> Option<&Sleep> {
    // ---
    let mut best: Option<&Sleep> = None;
    for sleep in non_nap_sleeps(sleeps) {
        if best.map_or(true, |b| sleep.in_bed_millis() > b.in_bed_millis()) {
            best = Some(sleep);
        }
    }
    best
}

pub fn non_nap_sleeps(sleeps: &[Sleep]) -> impl Iterator<Item = &Sleep> {
    sleeps.iter().filter(|s| !s.nap)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::test_support::sleep;

    #[test]
    fn test_millis_to_minutes() {
        // ---
        assert_eq!(millis_to_minutes(0), "0m");
        assert_eq!(millis_to_minutes(90_000), "1m");
        assert_eq!(millis_to_minutes(1_800_000), "30m");
        assert_eq!(millis_to_minutes(25_200_000), "7h 0m");
        assert_eq!(millis_to_minutes(27_900_000), "7h 45m");
        assert_eq!(millis_to_minutes(-5), "0m");
    }

    #[test]
    fn test_recovery_color_bounds() {
        // ---
        assert_eq!(recovery_color(100.0), RecoveryColor::Green);
        assert_eq!(recovery_color(67.0), RecoveryColor::Green);
        assert_eq!(recovery_color(66.9), RecoveryColor::Yellow);
        assert_eq!(recovery_color(34.0), RecoveryColor::Yellow);
        assert_eq!(recovery_color(33.0), RecoveryColor::Red);
        assert_eq!(recovery_color(0.0), RecoveryColor::Red);
        assert_eq!(RecoveryColor::Yellow.to_string(), "yellow");
    }

    #[test]
    fn test_strain_category() {
        // ---
        assert_eq!(strain_category(18.0), "All Out");
        assert_eq!(strain_category(14.0), "Strenuous");
        assert_eq!(strain_category(10.0), "Moderate");
        assert_eq!(strain_category(7.0), "Light");
        assert_eq!(strain_category(6.9), "Minimal");
    }

    #[test]
    fn test_primary_sleep_picks_longest_non_nap() {
        // ---
        assert!(primary_sleep(&[]).is_none());

        let sleeps = vec![
            sleep("short", 10_000, false, 50.0),
            sleep("nap", 99_999_999, true, 90.0),
            sleep("long", 25_200_000, false, 85.0),
            sleep("tie", 25_200_000, false, 70.0),
        ];
        assert_eq!(primary_sleep(&sleeps).map(|s| s.id.as_str()), Some("long"));

        let only_naps = vec![sleep("nap", 3_600_000, true, 90.0)];
        assert!(primary_sleep(&only_naps).is_none());
    }

    #[test]
    fn test_non_nap_sleeps_keeps_order() {
        // ---
        let sleeps = vec![
            sleep("a", 1, false, 0.0),
            sleep("b", 1, true, 0.0),
            sleep("c", 1, false, 0.0),
        ];
        let ids: Vec<&str> = non_nap_sleeps(&sleeps).map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
