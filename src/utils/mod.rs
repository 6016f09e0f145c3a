//! Utility functions and helpers for the workload exporter.
//!
//! This module provides the small time helpers used throughout the pipeline:
//! - Whole-hour rounding for the export time window
//! - Parsing of cluster setting values into durations
//! - Timestamp literal formatting for SQL filters

/// Time and duration utilities
pub mod time {
    use std::time::Duration;

    use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

    /// Round a timestamp down to the top of its hour.
    ///
    /// Minute, second, and nanosecond become zero; the date and hour are
    /// unchanged. Already-rounded input maps to itself.
    pub fn floor_to_hour(t: DateTime<Utc>) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(t.year(), t.month(), t.day(), t.hour(), 0, 0)
            .single()
            .unwrap_or(t)
    }

    /// Round a timestamp up to the last whole second of its hour.
    ///
    /// Minute and second become 59, nanosecond becomes zero; the date and
    /// hour are unchanged. Already-rounded input maps to itself.
    pub fn end_of_hour(t: DateTime<Utc>) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(t.year(), t.month(), t.day(), t.hour(), 59, 59)
            .single()
            .unwrap_or(t)
    }

    /// Format a timestamp as a SQL literal without timezone suffix.
    ///
    /// The fixed `YYYY-MM-DD HH:MM:SS` form is what the time-column filter
    /// embeds into the COPY query.
    pub fn sql_timestamp(t: DateTime<Utc>) -> String {
        t.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Parse a cluster setting value into a duration.
    ///
    /// Servers render interval-valued settings as `HH:MM:SS[.frac]`,
    /// optionally prefixed with `N days`. Duration shorthand such as `1h`
    /// or `10m` is accepted as well.
    pub fn parse_interval(s: &str) -> Option<Duration> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(d) = humantime::parse_duration(s) {
            return Some(d);
        }

        let (days, clock) = match s.split_once(" day") {
            Some((d, rest)) => {
                let days: u64 = d.trim().parse().ok()?;
                (days, rest.trim_start_matches('s').trim())
            }
            None => (0, s),
        };

        if clock.is_empty() {
            return Some(Duration::from_secs(days * 86_400));
        }

        let mut parts = clock.split(':');
        let hours: u64 = parts.next()?.parse().ok()?;
        let minutes: u64 = parts.next()?.parse().ok()?;
        let secs_part = parts.next().unwrap_or("0");
        if parts.next().is_some() {
            return None;
        }

        let (whole, frac) = match secs_part.split_once('.') {
            Some((w, fr)) => (w, fr),
            None => (secs_part, ""),
        };
        let seconds: u64 = whole.parse().ok()?;

        let nanos: u32 = if frac.is_empty() {
            0
        } else {
            if frac.len() > 9 || !frac.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let scale = 10u32.pow(9 - frac.len() as u32);
            frac.parse::<u32>().ok()? * scale
        };

        let total = days * 86_400 + hours * 3_600 + minutes * 60 + seconds;
        Some(Duration::new(total, nanos))
    }
}
