//! Service seams between the search domain and the network.

pub mod api;

pub use api::{RECOMMENDATIONS_PATH, RecommendationApi};
