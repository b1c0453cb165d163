// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Swipe vote recorder.

use crate::db::{keys, LocalStore};
use crate::error::AppError;
use crate::models::{Place, VoteEntry, VoteRecord};
use chrono::Utc;

/// Records accept/reject decisions made while swiping.
#[derive(Clone)]
pub struct VoteRecorder {
    store: LocalStore,
}

impl VoteRecorder {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Current record. Corrupt storage reads as empty.
    pub async fn record(&self) -> VoteRecord {
        self.store.read_json_or_default(keys::VOTES).await
    }

    /// Append a timestamped snapshot of `place` to the matching bucket unless
    /// that bucket already holds its identity key. The record is written back
    /// in either case (read-modify-write, not atomic). An unreadable stored
    /// record is reported as a storage error and left untouched.
    ///
    /// Returns `true` if a new entry was appended.
    pub async fn record_vote(&self, place: &Place, interested: bool) -> Result<bool, AppError> {
        let mut record: VoteRecord = self
            .store
            .load_json(keys::VOTES)
            .await?
            .unwrap_or_default();
        let key = place.identity_key();
        let bucket = record.bucket_mut(interested);

        let inserted = if bucket.iter().any(|e| e.place.identity_key() == key) {
            false
        } else {
            bucket.push(VoteEntry::new(place.clone(), Utc::now()));
            true
        };

        self.store.write_json(keys::VOTES, &record).await?;

        tracing::debug!(key = %key, interested, inserted, "Vote recorded");
        Ok(inserted)
    }
}
