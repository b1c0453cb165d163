// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Location resolver: journey entries → ordered, geocoded map locations.

use crate::db::LocalStore;
use crate::models::{normalize_address, Place, ResolvedLocation};
use crate::services::geocode_cache::GeocodeCache;
use crate::services::journey::JourneyStore;
use crate::services::providers::Geocoder;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;

/// Maximum number of locations placed on the map per render.
pub const MAX_RENDER_MARKERS: usize = 8;

/// A journey entry selected for resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub address: String,
    /// Normalized address, used as cache key
    pub cache_key: String,
}

/// Pick the entries to resolve, in journey order.
///
/// Entries without any address are skipped. An entry is a duplicate when an
/// earlier one has the same label and the same normalized address; only the
/// first is kept, so two differently named places at one address both stay
/// and the route can hold two stops at the same coordinates. The result is
/// capped at [`MAX_RENDER_MARKERS`] before any lookup happens.
pub fn plan_candidates(journey: &[Place]) -> Vec<Candidate> {
    let mut seen = HashSet::new();

    journey
        .iter()
        .filter_map(|place| {
            let address = place.map_address()?;
            let name = place.map_label();
            let cache_key = normalize_address(address);
            if !seen.insert((name, cache_key.clone())) {
                return None;
            }
            Some(Candidate {
                name: name.to_string(),
                address: address.to_string(),
                cache_key,
            })
        })
        .take(MAX_RENDER_MARKERS)
        .collect()
}

/// Resolves journey entries to coordinates, cache first.
#[derive(Clone)]
pub struct LocationResolver {
    store: LocalStore,
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(store: LocalStore, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { store, geocoder }
    }

    /// Resolve the persisted journey.
    pub async fn resolve_saved(&self) -> Vec<ResolvedLocation> {
        let journey = JourneyStore::new(self.store.clone()).list().await;
        self.resolve(&journey).await
    }

    /// Resolve `journey` as of now.
    pub async fn resolve(&self, journey: &[Place]) -> Vec<ResolvedLocation> {
        self.resolve_at(journey, Utc::now()).await
    }

    /// Resolve `journey` with cache freshness judged against `now`.
    ///
    /// Never fails: entries whose lookup fails are dropped, and when nothing
    /// resolves the default city centre is returned as the only location.
    pub async fn resolve_at(&self, journey: &[Place], now: DateTime<Utc>) -> Vec<ResolvedLocation> {
        let candidates = plan_candidates(journey);
        let mut cache = GeocodeCache::load(&self.store).await;
        let mut cache_updated = false;
        let mut resolved = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if let Some(coordinates) = cache.get(&candidate.cache_key, now) {
                resolved.push(ResolvedLocation::new(candidate.name, candidate.address, coordinates));
                continue;
            }

            match self.geocoder.geocode(&candidate.address).await {
                Ok(coordinates) => {
                    cache.put(candidate.cache_key, coordinates, now);
                    cache_updated = true;
                    resolved.push(ResolvedLocation::new(candidate.name, candidate.address, coordinates));
                }
                Err(e) => {
                    tracing::warn!(
                        address = %candidate.address,
                        no_match = e.is_empty_result(),
                        error = %e,
                        "Failed to geocode address, skipping"
                    );
                }
            }
        }

        if cache_updated {
            if let Err(e) = cache.save(&self.store).await {
                tracing::warn!(error = %e, "Failed to persist geocode cache");
            }
        }

        if resolved.is_empty() {
            tracing::debug!("No journey locations resolved, using default centre");
            return vec![ResolvedLocation::fallback()];
        }

        tracing::debug!(count = resolved.len(), "Journey locations resolved");
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_dedups_same_place_at_same_address() {
        let journey = vec![
            Place::new("Eiffel Tower", "Paris"),
            Place::new("Eiffel Tower", " PARIS "),
            Place::new("Louvre", "Paris"),
            Place::new("Tate", "London"),
        ];
        let plan = plan_candidates(&journey);
        let names: Vec<&str> = plan.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Eiffel Tower", "Louvre", "Tate"]);
        // First occurrence wins, with its original spelling
        assert_eq!(plan[0].address, "Paris");
        assert_eq!(plan[0].cache_key, plan[1].cache_key);
    }

    #[test]
    fn test_plan_skips_entries_without_address_and_caps() {
        let mut journey = vec![Place {
            name: "Nowhere".to_string(),
            ..Default::default()
        }];
        journey.extend((0..12).map(|i| Place::new(format!("Stop {}", i), format!("{} Queen St", i))));

        let plan = plan_candidates(&journey);
        assert_eq!(plan.len(), MAX_RENDER_MARKERS);
        assert_eq!(plan[0].name, "Stop 0");
        assert_eq!(plan[7].name, "Stop 7");
    }
}
