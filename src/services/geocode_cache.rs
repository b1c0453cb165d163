// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Time-bounded geocode cache persisted alongside the journey.

use crate::db::{keys, LocalStore};
use crate::error::AppError;
use crate::models::{CachedCoordinates, Coordinates};
use crate::time_utils::epoch_millis;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Entries older than this are ignored (but not deleted).
pub const GEOCODE_TTL_MINUTES: i64 = 15;

/// Normalized address → coordinates, loaded from and saved to the local store.
///
/// Entries are never evicted; a stale entry is overwritten the next time its
/// address is resolved.
#[derive(Debug, Clone, Default)]
pub struct GeocodeCache {
    entries: HashMap<String, CachedCoordinates>,
}

impl GeocodeCache {
    /// Load the persisted cache; a missing or corrupt document yields an empty cache.
    pub async fn load(store: &LocalStore) -> Self {
        Self {
            entries: store.read_json_or_default(keys::GEOCODE_CACHE).await,
        }
    }

    /// Persist the whole cache.
    pub async fn save(&self, store: &LocalStore) -> Result<(), AppError> {
        store.write_json(keys::GEOCODE_CACHE, &self.entries).await
    }

    /// Coordinates for `address_key` if resolved less than 15 minutes before `now`.
    pub fn get(&self, address_key: &str, now: DateTime<Utc>) -> Option<Coordinates> {
        let entry = self.entries.get(address_key)?;
        let age_millis = epoch_millis(now) - entry.timestamp;
        if age_millis < Duration::minutes(GEOCODE_TTL_MINUTES).num_milliseconds() {
            Some(entry.coordinates())
        } else {
            None
        }
    }

    /// Store coordinates for `address_key`, replacing any previous entry.
    pub fn put(&mut self, address_key: impl Into<String>, coordinates: Coordinates, now: DateTime<Utc>) {
        self.entries.insert(
            address_key.into(),
            CachedCoordinates {
                lat: coordinates.lat,
                lng: coordinates.lng,
                timestamp: epoch_millis(now),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
