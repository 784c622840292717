//! Canned demonstration dataset shown whenever the service cannot be used.

use crate::recommendation::RecommendationRecord;

/// Number of records in the fallback dataset.
pub const FALLBACK_LEN: usize = 5;

/// Fixed fallback recommendations, ordered by descending score.
///
/// The set is deterministic: every call returns the same records in the same
/// order, so screens rendered from it are stable across failures.
pub fn fallback_recommendations() -> Vec<RecommendationRecord> {
    vec![
        RecommendationRecord::new(
            "Seattle",
            "WA",
            1943.12,
            1,
            0.953,
            "Seattle combines a strong tech job market with natural beauty and outdoor recreation. The city offers a thriving cultural scene, mild climate, and excellent public amenities despite the rainy reputation.",
        ),
        RecommendationRecord::new(
            "Herndon",
            "VA",
            1906.35,
            1,
            0.922,
            "Herndon offers excellent proximity to the Dulles Technology Corridor, making it ideal for tech professionals. With access to Washington DC metro area jobs, good schools, and lower housing costs than nearby Arlington, it's a practical choice for professionals.",
        ),
        RecommendationRecord::new(
            "Arlington",
            "VA",
            2178.71,
            1,
            0.851,
            "Arlington provides exceptional access to government and contractor jobs with an extensive public transit system connecting to DC. The area features excellent schools, vibrant urban villages, and numerous dining and entertainment options.",
        ),
        RecommendationRecord::new(
            "San Diego",
            "CA",
            2342.01,
            1,
            0.715,
            "San Diego offers an unbeatable combination of year-round perfect weather, beautiful beaches, and a growing tech and biotech industry. The city provides a more relaxed lifestyle than other California tech hubs while maintaining excellent career opportunities.",
        ),
        RecommendationRecord::new(
            "Rockland",
            "MA",
            2450.00,
            1,
            0.625,
            "Rockland combines affordable living with proximity to the Boston metro job market. It offers a small-town New England feel with historic charm while providing access to city amenities and coastal recreation options.",
        ),
    ]
}
