// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Swipe vote record.

use super::place::Place;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a place at the moment it was voted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteEntry {
    #[serde(flatten)]
    pub place: Place,
    pub voted_at: DateTime<Utc>,
}

impl VoteEntry {
    /// Snapshot `place` as voted at `voted_at`.
    ///
    /// A `votedAt` carried over in the place's unknown fields (a snapshot
    /// sent back by the client) is dropped so the entry holds one timestamp.
    pub fn new(mut place: Place, voted_at: DateTime<Utc>) -> Self {
        place.extra.remove("votedAt");
        Self { place, voted_at }
    }
}

/// Both vote buckets. Each bucket is deduplicated by identity key on its own,
/// so the same place can end up in both across sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    #[serde(default)]
    pub interested: Vec<VoteEntry>,
    #[serde(default)]
    pub not_interested: Vec<VoteEntry>,
}

impl VoteRecord {
    /// Bucket a vote lands in.
    pub fn bucket_mut(&mut self, interested: bool) -> &mut Vec<VoteEntry> {
        if interested {
            &mut self.interested
        } else {
            &mut self.not_interested
        }
    }
}
