// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Destination detail page: photos, opening hours, tags, tips, review
//! summary and nearby places for one destination.

use crate::models::{Coordinates, DestinationDetail, FeaturedReview, NearbyPlace, ReviewSummary};
use crate::services::discovery::GENERIC_IMAGE;
use crate::services::google::{field_masks, ApiPlace, TextSearch};
use crate::services::providers::PlaceSearch;
use geo::{Distance, Haversine, Point};
use std::collections::BTreeMap;
use std::sync::Arc;

const MAX_IMAGES: usize = 5;
const DETAIL_PHOTO_HEIGHT: u32 = 800;
const DETAIL_PHOTO_WIDTH: u32 = 1200;
const NEARBY_PHOTO_HEIGHT: u32 = 400;
const NEARBY_PHOTO_WIDTH: u32 = 600;
const MAX_NEARBY: u32 = 3;

const MAX_FEATURES: usize = 5;
const MIN_FEATURES: usize = 3;
const GENERIC_FEATURES: [&str; 3] = ["Casual", "Photography", "Walking"];

const DEFAULT_OVERALL: f64 = 4.0;
const DEFAULT_NEARBY_NAME: &str = "Nearby Attraction";

/// Place type → feature tag.
const FEATURE_TAGS: &[(&str, &str)] = &[
    ("tourist_attraction", "Sightseeing"),
    ("park", "Outdoor"),
    ("museum", "Educational"),
    ("restaurant", "Dining"),
    ("lodging", "Accommodation"),
    ("shopping_mall", "Shopping"),
    ("amusement_park", "Entertainment"),
    ("zoo", "Family Friendly"),
    ("aquarium", "Family Friendly"),
    ("art_gallery", "Cultural"),
    ("church", "Historical"),
    ("establishment", "Popular"),
    ("point_of_interest", "Must See"),
];

/// Looks up and enriches destination details.
#[derive(Clone)]
pub struct DetailService {
    search: Arc<dyn PlaceSearch>,
}

impl DetailService {
    pub fn new(search: Arc<dyn PlaceSearch>) -> Self {
        Self { search }
    }

    /// Details for the destination `name` at `address`.
    ///
    /// Never fails: no match or a failed search gives [`fallback_detail`].
    pub async fn detail(&self, name: &str, address: &str) -> DestinationDetail {
        let search = TextSearch {
            text_query: format!("{} {}", name, address),
            included_type: None,
            location_bias: None,
            max_result_count: 1,
            field_mask: field_masks::DETAIL,
        };

        let place = match self.search.search_text(&search).await {
            Ok(places) => places.into_iter().next(),
            Err(e) => {
                tracing::warn!(destination = name, error = %e, "Detail search failed, using fallback");
                return fallback_detail();
            }
        };

        let Some(place) = place else {
            tracing::debug!(destination = name, "No place matched, using fallback detail");
            return fallback_detail();
        };

        let types: Vec<&str> = place.types.iter().map(String::as_str).collect();

        let mut images: Vec<String> = place
            .photos
            .iter()
            .take(MAX_IMAGES)
            .map(|p| {
                self.search
                    .photo_url(&p.name, DETAIL_PHOTO_HEIGHT, DETAIL_PHOTO_WIDTH)
            })
            .collect();
        if images.is_empty() {
            images.push(GENERIC_IMAGE.to_string());
        }

        let opening_hours = place
            .regular_opening_hours
            .as_ref()
            .and_then(|h| h.weekday_descriptions.first().cloned())
            .unwrap_or_else(|| "Opening hours vary".to_string());

        let description = place
            .editorial_summary
            .as_ref()
            .map(|s| s.text.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| describe(&types, name));

        let featured_text = place
            .reviews
            .first()
            .and_then(|r| r.text.as_ref())
            .map(|t| t.text.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Great experience at {}. Highly recommended for visitors to Brisbane.",
                    name
                )
            });
        let featured_author = place
            .reviews
            .first()
            .and_then(|r| r.author_attribution.as_ref())
            .and_then(|a| a.display_name.clone())
            .unwrap_or_else(|| "Alex".to_string());

        let nearby = self.nearby(address, place.coordinates()).await;

        DestinationDetail {
            images,
            opening_hours,
            duration: visit_duration(&types).to_string(),
            perfect_timing: optimal_timing(&types).to_string(),
            features: features(&types),
            description,
            tips: tips(&types, name),
            reviews: ReviewSummary {
                overall: place.rating.unwrap_or(DEFAULT_OVERALL),
                total_count: place.user_rating_count.unwrap_or(0),
                breakdown: breakdown([84, 12, 3, 1, 0]),
                featured: FeaturedReview {
                    author: featured_author,
                    text: featured_text,
                },
            },
            nearby,
        }
    }

    /// Up to three attractions near `address`, or [`fallback_nearby`] on failure.
    async fn nearby(&self, address: &str, origin: Option<Coordinates>) -> Vec<NearbyPlace> {
        let search = TextSearch {
            text_query: format!("attractions near {}", address),
            included_type: None,
            location_bias: None,
            max_result_count: MAX_NEARBY,
            field_mask: field_masks::NEARBY,
        };

        match self.search.search_text(&search).await {
            Ok(places) => places
                .iter()
                .map(|p| self.to_nearby(p, origin))
                .collect(),
            Err(e) => {
                tracing::warn!(address, error = %e, "Nearby search failed, using fallback");
                fallback_nearby()
            }
        }
    }

    fn to_nearby(&self, place: &ApiPlace, origin: Option<Coordinates>) -> NearbyPlace {
        let distance = match (origin, place.coordinates()) {
            (Some(a), Some(b)) => distance_label(a, b),
            _ => "Nearby".to_string(),
        };

        NearbyPlace {
            name: place.display_text().unwrap_or(DEFAULT_NEARBY_NAME).to_string(),
            distance,
            rating: place.rating.unwrap_or(DEFAULT_OVERALL),
            image: place
                .photos
                .first()
                .map(|p| {
                    self.search
                        .photo_url(&p.name, NEARBY_PHOTO_HEIGHT, NEARBY_PHOTO_WIDTH)
                })
                .unwrap_or_else(|| GENERIC_IMAGE.to_string()),
        }
    }
}

/// Great-circle distance, whole kilometres rounded up, at least 1.
pub fn distance_label(from: Coordinates, to: Coordinates) -> String {
    let meters = Haversine.distance(Point::from(from), Point::from(to));
    let km = (meters / 1000.0).ceil().max(1.0);
    format!("{}km from here", km as u64)
}

/// Feature tags for the given place types.
///
/// Mapped tags come first (in type order, no repeats, at most five); short
/// lists are padded from the generic tags until there are three.
pub fn features(types: &[&str]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for place_type in types {
        let Some((_, tag)) = FEATURE_TAGS.iter().find(|(t, _)| t == place_type) else {
            continue;
        };
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
        if tags.len() == MAX_FEATURES {
            break;
        }
    }

    for generic in GENERIC_FEATURES {
        if tags.len() >= MIN_FEATURES {
            break;
        }
        if !tags.iter().any(|t| t == generic) {
            tags.push(generic.to_string());
        }
    }
    tags
}

fn describe(types: &[&str], name: &str) -> String {
    if types.contains(&"tourist_attraction") {
        format!("{} is a popular tourist destination offering unique experiences and memorable moments for visitors of all ages.", name)
    } else if types.contains(&"park") {
        format!("{} is a beautiful green space perfect for relaxation, outdoor activities, and connecting with nature in the heart of Brisbane.", name)
    } else if types.contains(&"museum") {
        format!("{} showcases fascinating exhibits and collections, providing educational and cultural experiences for curious minds.", name)
    } else if types.contains(&"restaurant") {
        format!("{} offers delicious cuisine and dining experiences, serving both locals and visitors with quality food and service.", name)
    } else {
        format!("{} is a notable location in Brisbane, offering visitors a unique and enjoyable experience worth exploring.", name)
    }
}

/// Suggested time to spend at the place.
pub fn visit_duration(types: &[&str]) -> &'static str {
    let has = |t: &str| types.iter().any(|x| *x == t);
    if has("museum") || has("art_gallery") {
        "1-2 hours"
    } else if has("park") || has("tourist_attraction") {
        "0.5-2 hours"
    } else if has("restaurant") {
        "1-1.5 hours"
    } else if has("shopping_mall") {
        "1-3 hours"
    } else {
        "0.5-1 hours"
    }
}

/// Best time of day to visit.
pub fn optimal_timing(types: &[&str]) -> &'static str {
    if types.contains(&"restaurant") {
        "12:00-14:00 or 18:00-20:00"
    } else if types.contains(&"park") {
        "9:00-16:00"
    } else if types.contains(&"museum") {
        "10:00-15:00"
    } else {
        "9:00-14:00"
    }
}

fn tips(types: &[&str], name: &str) -> String {
    if types.contains(&"park") {
        "Best visited during weekday mornings for a quieter experience. Bring water and comfortable walking shoes. Check weather conditions before visiting.".to_string()
    } else if types.contains(&"museum") {
        "Consider purchasing tickets online to avoid queues. Allow extra time for special exhibitions. Photography policies may vary by section.".to_string()
    } else if types.contains(&"restaurant") {
        "Reservations recommended, especially for dinner. Check opening hours as they may vary on weekends and holidays.".to_string()
    } else {
        format!("Visit {} during off-peak hours for the best experience. Comfortable walking shoes recommended. Check latest opening hours before your visit.", name)
    }
}

/// Star breakdown from percentages listed five stars first.
fn breakdown(percentages: [u8; 5]) -> BTreeMap<u8, u8> {
    (1..=5u8).rev().zip(percentages).collect()
}

/// Detail shown when the destination cannot be looked up.
pub fn fallback_detail() -> DestinationDetail {
    DestinationDetail {
        images: vec![GENERIC_IMAGE.to_string()],
        opening_hours: "All day".to_string(),
        duration: "0.5-1 hours".to_string(),
        perfect_timing: "9:00-14:00".to_string(),
        features: vec!["Casual".to_string(), "Outdoor".to_string(), "Popular".to_string()],
        description: "A wonderful destination in Brisbane offering unique experiences for visitors."
            .to_string(),
        tips: "Visit during off-peak hours for the best experience. Comfortable walking shoes recommended."
            .to_string(),
        reviews: ReviewSummary {
            overall: 4.5,
            total_count: 1250,
            breakdown: breakdown([75, 15, 7, 2, 1]),
            featured: FeaturedReview {
                author: "Visitor".to_string(),
                text: "Great place to visit in Brisbane. Highly recommended!".to_string(),
            },
        },
        nearby: fallback_nearby(),
    }
}

/// Nearby places shown when the nearby search fails.
pub fn fallback_nearby() -> Vec<NearbyPlace> {
    vec![
        NearbyPlace {
            name: "Brisbane River".to_string(),
            distance: "2km from here".to_string(),
            rating: 4.5,
            image: GENERIC_IMAGE.to_string(),
        },
        NearbyPlace {
            name: "Queen Street Mall".to_string(),
            distance: "3km from here".to_string(),
            rating: 4.2,
            image: GENERIC_IMAGE.to_string(),
        },
    ]
}
