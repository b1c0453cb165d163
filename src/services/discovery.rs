// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Swipe deck: candidate destinations around the default city.

use crate::models::location::DEFAULT_CENTER;
use crate::models::Place;
use crate::services::google::{field_masks, ApiPlace, LocationBias, TextSearch};
use crate::services::providers::PlaceSearch;
use futures_util::future::join_all;
use std::sync::Arc;

/// Radius of the search bias circle around the city centre.
const SEARCH_RADIUS_METERS: f64 = 50_000.0;
const MAX_RESULTS_PER_SEARCH: u32 = 10;

const DECK_PHOTO_HEIGHT: u32 = 600;
const DECK_PHOTO_WIDTH: u32 = 800;

const DEFAULT_NAME: &str = "Unknown Place";
const DEFAULT_DESCRIPTION: &str = "Great place to visit in Brisbane";
const DEFAULT_ADDRESS: &str = "Brisbane, QLD";
const DEFAULT_RATING: f64 = 4.0;
const DEFAULT_PRICE: &str = "AU$50";

const LODGING_IMAGE: &str =
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800&h=600&fit=crop";
const RESTAURANT_IMAGE: &str =
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=800&h=600&fit=crop";
/// Image used wherever a place has no photo of its own.
pub const GENERIC_IMAGE: &str =
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=600&fit=crop";

/// One category of the deck.
struct DeckSection {
    query: &'static str,
    place_type: &'static str,
    take: usize,
}

const SECTIONS: [DeckSection; 3] = [
    DeckSection {
        query: "hotels in Brisbane",
        place_type: "lodging",
        take: 5,
    },
    DeckSection {
        query: "restaurants in Brisbane",
        place_type: "restaurant",
        take: 5,
    },
    DeckSection {
        query: "tourist attractions in Brisbane",
        place_type: "tourist_attraction",
        take: 10,
    },
];

/// Builds the swipe deck from places search results.
#[derive(Clone)]
pub struct DiscoveryService {
    search: Arc<dyn PlaceSearch>,
}

impl DiscoveryService {
    pub fn new(search: Arc<dyn PlaceSearch>) -> Self {
        Self { search }
    }

    /// Hotels, then restaurants, then attractions.
    ///
    /// A failed search contributes nothing. If every search comes back
    /// empty, the fixed [`mock_destinations`] are returned instead.
    pub async fn deck(&self) -> Vec<Place> {
        let searches: Vec<TextSearch> = SECTIONS
            .iter()
            .map(|section| TextSearch {
                text_query: section.query.to_string(),
                included_type: Some(section.place_type.to_string()),
                location_bias: Some(LocationBias::circle(DEFAULT_CENTER, SEARCH_RADIUS_METERS)),
                max_result_count: MAX_RESULTS_PER_SEARCH,
                field_mask: field_masks::DECK,
            })
            .collect();

        let results = join_all(searches.iter().map(|s| self.search.search_text(s))).await;

        let mut deck = Vec::new();
        for (section, result) in SECTIONS.iter().zip(results) {
            match result {
                Ok(places) => {
                    tracing::debug!(
                        place_type = section.place_type,
                        results = places.len(),
                        "Deck section fetched"
                    );
                    deck.extend(
                        places
                            .iter()
                            .take(section.take)
                            .map(|p| self.to_deck_place(p, section.place_type)),
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        query = section.query,
                        error = %e,
                        "Places search failed, skipping section"
                    );
                }
            }
        }

        if deck.is_empty() {
            tracing::warn!("No destinations from places search, using built-in list");
            return mock_destinations();
        }

        tracing::info!(count = deck.len(), "Swipe deck built");
        deck
    }

    fn to_deck_place(&self, place: &ApiPlace, place_type: &str) -> Place {
        let image = match place.photos.first() {
            Some(photo) => self
                .search
                .photo_url(&photo.name, DECK_PHOTO_HEIGHT, DECK_PHOTO_WIDTH),
            None => default_image(place_type).to_string(),
        };

        Place {
            name: place.display_text().unwrap_or(DEFAULT_NAME).to_string(),
            description: Some(
                place
                    .editorial_summary
                    .as_ref()
                    .map(|s| s.text.clone())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            ),
            rating: Some(place.rating.unwrap_or(DEFAULT_RATING)),
            price: Some(price_text(place.price_level.as_deref()).to_string()),
            address: Some(
                place
                    .formatted_address
                    .clone()
                    .filter(|a| !a.is_empty())
                    .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            ),
            image: Some(image),
            ..Default::default()
        }
    }
}

/// Price tier shown on a card.
pub fn price_text(price_level: Option<&str>) -> &'static str {
    match price_level {
        Some("PRICE_LEVEL_FREE") => "Free",
        Some("PRICE_LEVEL_INEXPENSIVE") => "AU$25",
        Some("PRICE_LEVEL_MODERATE") => "AU$50",
        Some("PRICE_LEVEL_EXPENSIVE") => "AU$100",
        Some("PRICE_LEVEL_VERY_EXPENSIVE") => "AU$150",
        _ => DEFAULT_PRICE,
    }
}

fn default_image(place_type: &str) -> &'static str {
    match place_type {
        "lodging" => LODGING_IMAGE,
        "restaurant" => RESTAURANT_IMAGE,
        _ => GENERIC_IMAGE,
    }
}

/// Fixed destinations used when search returns nothing at all.
pub fn mock_destinations() -> Vec<Place> {
    let mock = |name: &str, description: &str, rating: f64, price: &str, address: &str, image: &str| Place {
        description: Some(description.to_string()),
        rating: Some(rating),
        price: Some(price.to_string()),
        image: Some(image.to_string()),
        ..Place::new(name, address)
    };

    vec![
        mock(
            "Sunnybank Hotel",
            "Unassuming roadside property featuring a steakhouse with a sports bar, as well as free parking.",
            4.9,
            "AU$100",
            "555 Lang St, St Lucia",
            LODGING_IMAGE,
        ),
        mock(
            "Brisbane River Cruise",
            "Scenic river cruise showcasing Brisbane's iconic landmarks and beautiful cityscape views.",
            4.7,
            "AU$45",
            "Brisbane River",
            "https://images.unsplash.com/photo-1544966503-7cc5ac882d5e?w=800&h=600&fit=crop",
        ),
        mock(
            "Story Bridge Adventure",
            "Thrilling bridge climb experience offering panoramic views of Brisbane city and surrounds.",
            4.8,
            "AU$89",
            "Story Bridge",
            GENERIC_IMAGE,
        ),
        mock(
            "Queensland Museum",
            "Fascinating museum with natural history exhibits, planetarium shows and interactive displays.",
            4.5,
            "AU$25",
            "South Bank",
            "https://images.unsplash.com/photo-1565204189813-68fe0aa8c8be?w=800&h=600&fit=crop",
        ),
        mock(
            "Lone Pine Koala Sanctuary",
            "World-famous koala sanctuary where you can cuddle koalas and hand-feed kangaroos.",
            4.6,
            "AU$35",
            "Lone Pine Sanctuary",
            "https://images.unsplash.com/photo-1459262838948-3e2de6c1ec80?w=800&h=600&fit=crop",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::place::LocalizedText;
    use crate::services::google::ApiPhoto;
    use futures_util::future::BoxFuture;

    /// Returns `count` numbered places for the given type, or fails.
    struct FakeSearch {
        fail_types: Vec<&'static str>,
        count: usize,
    }

    impl PlaceSearch for FakeSearch {
        fn search_text<'a>(
            &'a self,
            search: &'a TextSearch,
        ) -> BoxFuture<'a, Result<Vec<ApiPlace>, AppError>> {
            Box::pin(async move {
                let place_type = search.included_type.clone().unwrap_or_default();
                if self.fail_types.contains(&place_type.as_str()) {
                    return Err(AppError::PlacesApi("HTTP 500".to_string()));
                }
                Ok((0..self.count)
                    .map(|i| ApiPlace {
                        display_name: Some(LocalizedText {
                            text: format!("{} {}", place_type, i),
                        }),
                        ..Default::default()
                    })
                    .collect())
            })
        }

        fn photo_url(&self, photo_name: &str, max_height: u32, max_width: u32) -> String {
            format!("photo://{}/{}x{}", photo_name, max_height, max_width)
        }
    }

    #[tokio::test]
    async fn test_deck_order_and_limits() {
        let service = DiscoveryService::new(Arc::new(FakeSearch {
            fail_types: vec![],
            count: 10,
        }));
        let deck = service.deck().await;

        assert_eq!(deck.len(), 20);
        assert_eq!(deck[0].name, "lodging 0");
        assert_eq!(deck[5].name, "restaurant 0");
        assert_eq!(deck[10].name, "tourist_attraction 0");
        assert_eq!(deck[19].name, "tourist_attraction 9");

        // Defaults for missing fields
        assert_eq!(deck[0].address.as_deref(), Some(DEFAULT_ADDRESS));
        assert_eq!(deck[0].rating, Some(DEFAULT_RATING));
        assert_eq!(deck[0].price.as_deref(), Some("AU$50"));
        assert_eq!(deck[0].image.as_deref(), Some(LODGING_IMAGE));
        assert_eq!(deck[5].image.as_deref(), Some(RESTAURANT_IMAGE));
    }

    #[tokio::test]
    async fn test_failed_section_is_skipped() {
        let service = DiscoveryService::new(Arc::new(FakeSearch {
            fail_types: vec!["restaurant"],
            count: 2,
        }));
        let deck = service.deck().await;
        let names: Vec<&str> = deck.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["lodging 0", "lodging 1", "tourist_attraction 0", "tourist_attraction 1"]
        );
    }

    #[tokio::test]
    async fn test_empty_deck_uses_mock_destinations() {
        let service = DiscoveryService::new(Arc::new(FakeSearch {
            fail_types: vec!["lodging", "restaurant", "tourist_attraction"],
            count: 3,
        }));
        let deck = service.deck().await;
        assert_eq!(deck.len(), 5);
        assert_eq!(deck[0].name, "Sunnybank Hotel");
    }

    #[test]
    fn test_photo_and_price_mapping() {
        let search = FakeSearch {
            fail_types: vec![],
            count: 0,
        };
        let service = DiscoveryService::new(Arc::new(search));
        let place = ApiPlace {
            photos: vec![ApiPhoto {
                name: "places/a/photos/b".to_string(),
            }],
            price_level: Some("PRICE_LEVEL_VERY_EXPENSIVE".to_string()),
            ..Default::default()
        };
        let card = service.to_deck_place(&place, "lodging");
        assert_eq!(card.name, DEFAULT_NAME);
        assert_eq!(card.image.as_deref(), Some("photo://places/a/photos/b/600x800"));
        assert_eq!(card.price.as_deref(), Some("AU$150"));
        assert_eq!(price_text(Some("PRICE_LEVEL_FREE")), "Free");
        assert_eq!(price_text(None), "AU$50");
    }
}
