// src/utils/time.rs

use chrono::{DateTime, Utc};

/// Below this many seconds left the countdown is shown as urgent.
pub const URGENT_THRESHOLD_SECS: u32 = 300;

/// Countdown clock, `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Time taken on a leaderboard row, e.g. `4m 7s`.
pub fn format_minutes_seconds(seconds: u32) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

pub fn is_urgent(remaining_seconds: u32) -> bool {
    remaining_seconds < URGENT_THRESHOLD_SECS
}

/// Colour band of the countdown, by share of the total time left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTier {
    Plenty,
    Warning,
    Critical,
}

pub fn timer_tier(remaining_seconds: u32, total_seconds: u32) -> TimerTier {
    if total_seconds == 0 {
        return TimerTier::Critical;
    }
    let ratio = f64::from(remaining_seconds) / f64::from(total_seconds);
    if ratio > 0.5 {
        TimerTier::Plenty
    } else if ratio > 0.25 {
        TimerTier::Warning
    } else {
        TimerTier::Critical
    }
}

/// `Mar 4, 2025` for an RFC 3339 timestamp; unparseable input is returned as is.
pub fn format_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => date.with_timezone(&Utc).format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(900), "15:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(5999), "99:59");
    }

    #[test]
    fn leaderboard_times() {
        assert_eq!(format_minutes_seconds(247), "4m 7s");
        assert_eq!(format_minutes_seconds(59), "0m 59s");
    }

    #[test]
    fn tiers_follow_the_share_left() {
        assert_eq!(timer_tier(600, 900), TimerTier::Plenty);
        assert_eq!(timer_tier(450, 900), TimerTier::Warning);
        assert_eq!(timer_tier(225, 900), TimerTier::Critical);
        assert!(is_urgent(299));
        assert!(!is_urgent(300));
    }

    #[test]
    fn dates() {
        assert_eq!(format_date("2025-03-04T10:00:00Z"), "Mar 4, 2025");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
