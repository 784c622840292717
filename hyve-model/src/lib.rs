//! Core data model definitions shared across HYVE crates.
#![allow(missing_docs)]

pub mod error;
pub mod fallback;
pub mod prelude;
pub mod query;
pub mod recommendation;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use fallback::{FALLBACK_LEN, fallback_recommendations};
pub use query::{SearchQuery, SearchQueryBuilder};
pub use recommendation::{
    RecommendationRecord, format_score_percentage,
};
