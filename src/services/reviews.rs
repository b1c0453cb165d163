// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User reviews of destinations.

use crate::db::{keys, LocalStore};
use crate::error::AppError;
use crate::models::{Review, ReviewDraft};
use chrono::Utc;
use validator::Validate;

/// Persisted list of submitted reviews.
#[derive(Clone)]
pub struct ReviewBook {
    store: LocalStore,
}

impl ReviewBook {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Validate and store a review.
    ///
    /// Invalid drafts are rejected with `BadRequest` and nothing is written.
    pub async fn submit(&self, draft: ReviewDraft) -> Result<Review, AppError> {
        draft.validate()?;

        let review = Review::from_draft(draft, Utc::now());
        let mut reviews: Vec<Review> = self
            .store
            .load_json(keys::REVIEWS)
            .await?
            .unwrap_or_default();
        reviews.push(review.clone());
        self.store.write_json(keys::REVIEWS, &reviews).await?;

        tracing::info!(
            destination = %review.destination,
            rating = review.rating,
            anonymous = review.anonymous,
            "Review submitted"
        );
        Ok(review)
    }

    /// Reviews for `destination`, oldest first.
    pub async fn list(&self, destination: &str) -> Vec<Review> {
        self.all()
            .await
            .into_iter()
            .filter(|r| r.destination == destination)
            .collect()
    }

    async fn all(&self) -> Vec<Review> {
        self.store.read_json_or_default(keys::REVIEWS).await
    }
}
