// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Destination reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";
pub const DEFAULT_AUTHOR: &str = "Traveller";

/// Review as submitted by the client. A rating of 0 means "not selected".
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    #[validate(
        custom(function = "not_blank", message = "Destination is required"),
        length(max = 200, message = "Destination is too long")
    )]
    pub destination: String,
    #[validate(range(min = 1, max = 5, message = "Please select a rating"))]
    #[serde(default)]
    pub rating: u8,
    #[validate(length(max = 2000, message = "Review text is too long"))]
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub visit_time: Option<String>,
    #[serde(default)]
    pub wait_time: Option<String>,
    #[serde(default)]
    pub recommend_tickets: Option<bool>,
    /// Photo URLs attached to the review
    #[serde(default)]
    pub photos: Vec<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Stored review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub destination: String,
    pub rating: u8,
    pub text: String,
    pub anonymous: bool,
    pub author_name: String,
    pub visit_time: Option<String>,
    pub wait_time: Option<String>,
    pub recommend_tickets: Option<bool>,
    pub photos: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Review {
    /// Stamp an already validated draft.
    pub fn from_draft(draft: ReviewDraft, now: DateTime<Utc>) -> Self {
        let author_name = if draft.anonymous {
            ANONYMOUS_AUTHOR.to_string()
        } else {
            draft
                .author_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string())
        };

        Self {
            destination: draft.destination.trim().to_string(),
            rating: draft.rating,
            text: draft.text,
            anonymous: draft.anonymous,
            author_name,
            visit_time: draft.visit_time,
            wait_time: draft.wait_time,
            recommend_tickets: draft.recommend_tickets,
            photos: draft.photos,
            timestamp: now,
        }
    }
}
