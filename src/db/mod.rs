//! Persistence layer (local JSON documents).

pub mod local;

pub use local::LocalStore;

/// Storage keys, shared with the web client.
pub mod keys {
    /// Ordered list of saved places
    pub const JOURNEY: &str = "frame8.myJourney.v1";
    /// `{interested, notInterested}` swipe decisions
    pub const VOTES: &str = "frame8.votes.v1";
    /// Normalized address → `{lat, lng, timestamp}`
    pub const GEOCODE_CACHE: &str = "frame8.mapGeocodeCache.v1";
    /// Submitted destination reviews
    pub const REVIEWS: &str = "frame8.reviews.v1";
}
