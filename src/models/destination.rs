// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Destination detail page model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Enriched information shown on a destination's detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDetail {
    pub images: Vec<String>,
    pub opening_hours: String,
    pub duration: String,
    pub perfect_timing: String,
    pub features: Vec<String>,
    pub description: String,
    pub tips: String,
    pub reviews: ReviewSummary,
    pub nearby: Vec<NearbyPlace>,
}

/// Aggregate rating block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub overall: f64,
    pub total_count: u32,
    /// Share of reviews per star (percent), keyed by star count.
    pub breakdown: BTreeMap<u8, u8>,
    pub featured: FeaturedReview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedReview {
    pub author: String,
    pub text: String,
}

/// A place near the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub name: String,
    /// Human-readable distance, e.g. "2km from here"
    pub distance: String,
    pub rating: f64,
    pub image: String,
}
