// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Calendar day of a timestamp as `YYYY-MM-DD`.
pub fn day_key(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Clock time of a timestamp as `HH:MM`.
pub fn clock_label(date: DateTime<Utc>) -> String {
    date.format("%H:%M").to_string()
}

/// Day formatted the way the map header shows it: `MM-DD-YYYY`.
pub fn map_date_label(day: NaiveDate) -> String {
    day.format("%m-%d-%Y").to_string()
}

/// Milliseconds since the Unix epoch, the timestamp unit of the geocode cache.
pub fn epoch_millis(date: DateTime<Utc>) -> i64 {
    date.timestamp_millis()
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, `datetime-local` style values without an offset (read
/// as UTC), bare dates (midnight UTC) and epoch milliseconds. Anything else
/// is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    raw.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}
