//! Common imports for front ends built on this crate.

pub use crate::domains::search::{
    FailureKind, RequestCoordinator, SearchFailure, SearchOutcome,
    SearchSession, SearchTicket,
};
pub use crate::infra::api_client::{ApiClient, ApiError};
pub use crate::infra::services::api::RecommendationApi;
pub use crate::view_models::{
    ChartSection, CityCard, ImageCatalog, RecommendationView,
    StaticImageCatalog,
};
pub use hyve_model::prelude::*;
