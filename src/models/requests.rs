use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to predict a specialist from symptoms
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SymptomRequest {
    #[validate(length(min = 1))]
    pub symptoms: String,
}

/// Request to recommend doctors
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    pub symptoms: String,
    #[validate(length(min = 1))]
    #[serde(alias = "locationText")]
    pub location_text: String,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(alias = "maxDistanceKm")]
    pub max_distance_km: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "maxFees")]
    pub max_fees: f64,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(alias = "minRating")]
    pub min_rating: f64,
}
