// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Journey store: the ordered list of saved places.

use crate::db::{keys, LocalStore};
use crate::error::AppError;
use crate::models::Place;
use chrono::{SecondsFormat, Utc};

/// Persisted journey list.
///
/// Uniqueness by identity key is enforced on `add` only; duplicates written
/// by other clients are left as they are. `add` and `remove` refuse to write
/// over a stored list they could not parse.
#[derive(Clone)]
pub struct JourneyStore {
    store: LocalStore,
}

impl JourneyStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Saved places in insertion order. Corrupt storage reads as empty.
    pub async fn list(&self) -> Vec<Place> {
        self.store.read_json_or_default(keys::JOURNEY).await
    }

    /// Stored list for modification. Fails if the document is unreadable.
    async fn load(&self) -> Result<Vec<Place>, AppError> {
        Ok(self
            .store
            .load_json(keys::JOURNEY)
            .await?
            .unwrap_or_default())
    }

    /// Append `place` unless an entry with the same identity key exists.
    ///
    /// Returns `true` if inserted. `addedAt` is stamped when missing.
    pub async fn add(&self, mut place: Place) -> Result<bool, AppError> {
        let mut journey = self.load().await?;
        let key = place.identity_key();

        if journey.iter().any(|p| p.identity_key() == key) {
            tracing::debug!(key = %key, "Place already in journey");
            return Ok(false);
        }

        if place.added_at.is_none() {
            place.added_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        journey.push(place);
        self.store.write_json(keys::JOURNEY, &journey).await?;

        tracing::info!(key = %key, count = journey.len(), "Place added to journey");
        Ok(true)
    }

    /// Remove the entry at `index`. Returns `false` if out of bounds.
    pub async fn remove(&self, index: usize) -> Result<bool, AppError> {
        let mut journey = self.load().await?;
        if index >= journey.len() {
            return Ok(false);
        }

        let removed = journey.remove(index);
        self.store.write_json(keys::JOURNEY, &journey).await?;

        tracing::info!(index, key = %removed.identity_key(), "Place removed from journey");
        Ok(true)
    }
}
