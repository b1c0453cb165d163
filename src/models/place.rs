// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Saved place model (journey entry and swipe card).

use crate::time_utils::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Name used on the map when an entry carries no usable name.
pub const UNNAMED_PLACE: &str = "Saved place";

/// Localized text as returned by the places API (`{"text": "..."}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
}

/// A place as stored in the journey list and vote record.
///
/// Entries come from several sources (swipe deck, detail page, older
/// clients), so only `name` is always present and the address may live in
/// one of three fields. Fields this model does not know about are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[validate(length(max = 200, message = "Place name is too long"))]
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[validate(length(max = 500, message = "Address is too long"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL or photo resource reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Price tier text (e.g. "AU$50")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Rating on a 0-5 scale
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Scheduled start as written by the client; see [`Place::start_time`]
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Place {
    /// Convenience constructor for a named place at an address.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: Some(address.into()),
            ..Default::default()
        }
    }

    /// Identity used for deduplication: `name + "__" + address`, case-sensitive.
    pub fn identity_key(&self) -> String {
        format!("{}__{}", self.name, self.address.as_deref().unwrap_or(""))
    }

    /// Address used for geocoding: `address`, then `formattedAddress`, then
    /// `vicinity`. Empty strings count as missing.
    pub fn map_address(&self) -> Option<&str> {
        [&self.address, &self.formatted_address, &self.vicinity]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|value| !value.is_empty())
    }

    /// Label shown on the map: `name`, then `displayName.text`, then a placeholder.
    pub fn map_label(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        self.display_name
            .as_ref()
            .map(|d| d.text.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(UNNAMED_PLACE)
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start.as_deref().and_then(parse_timestamp)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end.as_deref().and_then(parse_timestamp)
    }

    pub fn added_time(&self) -> Option<DateTime<Utc>> {
        self.added_at.as_deref().and_then(parse_timestamp)
    }

    /// Timestamp used to place the entry in the itinerary: scheduled start, else when added.
    pub fn schedule_time(&self) -> Option<DateTime<Utc>> {
        self.start_time().or_else(|| self.added_time())
    }
}

/// `null` reads as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps are kept as written. Numbers (epoch millis) are kept as their
/// decimal text; other non-string values read as missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Normalized form of an address used as geocode cache key and dedup key.
pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}
