//! Snapshot of the model surface for presentation layers.
//! Prefer importing from this module when wiring a client front end.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::fallback::{FALLBACK_LEN, fallback_recommendations};
pub use super::query::{SearchQuery, SearchQueryBuilder};
pub use super::recommendation::{
    RecommendationRecord, format_score_percentage,
};
