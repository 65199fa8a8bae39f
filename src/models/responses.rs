use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchType, RecommendedDoctor};

/// Conversational reply carrying only a message and follow-up actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotResponse {
    pub message: String,
    pub next_actions: Vec<String>,
}

/// Response for the symptoms endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomResponse {
    pub specialist: String,
    pub message: String,
    pub next_actions: Vec<String>,
}

/// Filters echoed back with a recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersApplied {
    pub location: String,
    /// Radius tier that produced the match
    pub max_distance_km: u32,
    pub max_fees: f64,
    pub min_rating: f64,
}

/// Doctor as shown to the patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorView {
    pub doctor_name: String,
    pub area: String,
    pub distance_km: f64,
    pub rating: f64,
    pub fees: f64,
    pub contact: String,
    pub address: String,
    pub availability_text: String,
}

impl From<&RecommendedDoctor> for DoctorView {
    fn from(rec: &RecommendedDoctor) -> Self {
        Self {
            doctor_name: rec.doctor.name.clone(),
            area: rec.doctor.area.clone(),
            distance_km: rec.distance_km,
            rating: rec.doctor.rating,
            fees: rec.doctor.fees,
            contact: rec.doctor.contact.clone(),
            address: rec.doctor.address.clone(),
            availability_text: rec.doctor.availability_text.clone(),
        }
    }
}

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters_applied: Option<FiltersApplied>,
    pub doctors: Vec<DoctorView>,
    pub next_actions: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub doctors_loaded: usize,
    pub radius_tiers_km: Vec<u32>,
    pub location_cache_entries: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
