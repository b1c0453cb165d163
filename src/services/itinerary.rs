// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Day-by-day itinerary view of the journey.

use crate::models::Place;
use crate::time_utils::{clock_label, day_key, map_date_label};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bucket for entries with neither a start time nor an added time.
pub const UNSCHEDULED: &str = "Unscheduled";

/// One journey entry as shown in the itinerary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryEntry {
    /// Position in the stored journey list (used for removal)
    pub index: usize,
    pub place: Place,
    /// `HH:MM` of the scheduled start, if any
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    /// `YYYY-MM-DD` or [`UNSCHEDULED`]
    pub day: String,
    pub entries: Vec<ItineraryEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub days: Vec<DayGroup>,
    /// First and last day, only when both are scheduled
    pub date_range: Option<(String, String)>,
    /// Header date for the map, `MM-DD-YYYY`
    pub map_date_label: String,
}

/// Group journey entries by day.
///
/// Entries are bucketed by the day of their start time, else the day they
/// were added. Days sort ascending with [`UNSCHEDULED`] last; entries within
/// a day sort by the same timestamp, keeping journey order for ties.
pub fn group_by_day(journey: &[Place], today: NaiveDate) -> Itinerary {
    let mut buckets: BTreeMap<String, Vec<ItineraryEntry>> = BTreeMap::new();

    for (index, place) in journey.iter().enumerate() {
        let day = place
            .schedule_time()
            .map(day_key)
            .unwrap_or_else(|| UNSCHEDULED.to_string());

        buckets.entry(day).or_default().push(ItineraryEntry {
            index,
            place: place.clone(),
            start_time: place.start_time().map(clock_label),
            end_time: place.end_time().map(clock_label),
        });
    }

    let days: Vec<DayGroup> = buckets
        .into_iter()
        .map(|(day, mut entries)| {
            // Entries without a timestamp go last
            entries.sort_by_key(|e| (e.place.schedule_time().is_none(), e.place.schedule_time()));
            DayGroup { day, entries }
        })
        .collect();

    let date_range = match (days.first(), days.last()) {
        (Some(first), Some(last)) if first.day != UNSCHEDULED && last.day != UNSCHEDULED => {
            Some((first.day.clone(), last.day.clone()))
        }
        _ => None,
    };

    let first_scheduled = days
        .iter()
        .find(|d| d.day != UNSCHEDULED)
        .and_then(|d| NaiveDate::parse_from_str(&d.day, "%Y-%m-%d").ok());

    Itinerary {
        days,
        date_range,
        map_date_label: map_date_label(first_scheduled.unwrap_or(today)),
    }
}
