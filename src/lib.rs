//! Doctor Recommender - symptom-based doctor recommendation service
//!
//! This library maps free-text symptoms to a medical specialty and recommends
//! nearby doctors of that specialty, filtered by distance, fee and rating with
//! progressive search-radius expansion.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{RecommendationEngine, distance::{distance_km, haversine_distance}};
pub use models::{DoctorRecord, DoctorTable, Coordinates, MatchType, MatchStatus, RecommendationQuery, RecommendationResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let point = Coordinates::new(28.5921, 77.0460);
        assert_eq!(distance_km(point, point), 0.0);
    }
}
