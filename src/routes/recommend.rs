use actix_web::{web, HttpResponse, Responder};
use chrono::Timelike;
use std::sync::Arc;
use validator::Validate;

use crate::core::RecommendationEngine;
use crate::models::{
    BotResponse, DoctorView, ErrorResponse, FiltersApplied, HealthResponse, RecommendRequest,
    RecommendResponse, RecommendationQuery, SymptomRequest, SymptomResponse,
};
use crate::services::NominatimGeocoder;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub geocoder: Arc<NominatimGeocoder>,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/greet", web::get().to(greet))
        .route("/symptoms", web::post().to(process_symptoms))
        .route("/recommend", web::post().to(recommend))
        .route("/reset", web::post().to(reset));
}

fn actions(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Greeting for an hour of the day (0-23)
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 17 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        doctors_loaded: state.engine.table().len(),
        radius_tiers_km: state.engine.tiers().as_slice().to_vec(),
        location_cache_entries: state.geocoder.cache().stats().entries,
        timestamp: chrono::Utc::now(),
    })
}

/// Time-of-day greeting
///
/// GET /api/v1/greet
async fn greet() -> impl Responder {
    let hour = chrono::Local::now().hour();

    HttpResponse::Ok().json(BotResponse {
        message: format!(
            "{}! I'm your AI medical assistant. Please tell me what symptoms you are experiencing.",
            greeting_for_hour(hour)
        ),
        next_actions: actions(&["enter_symptoms"]),
    })
}

/// Predict a specialist from symptoms
///
/// POST /api/v1/symptoms
///
/// Request body:
/// ```json
/// { "symptoms": "chest pain and breathlessness" }
/// ```
async fn process_symptoms(
    state: web::Data<AppState>,
    req: web::Json<SymptomRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let specialist = state.engine.classify(&req.symptoms);
    tracing::info!("Predicted specialist: {}", specialist);

    HttpResponse::Ok().json(SymptomResponse {
        message: format!(
            "Based on your symptoms, you should consult a {} specialist. \
             Please enter your location so I can find nearby doctors.",
            specialist
        ),
        specialist,
        next_actions: actions(&["enter_location"]),
    })
}

/// Recommend doctors
///
/// POST /api/v1/recommend
///
/// Request body:
/// ```json
/// {
///   "symptoms": "string",
///   "location_text": "Dwarka, Delhi",
///   "max_distance_km": 3,
///   "max_fees": 2000,
///   "min_rating": 4.0
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return validation_error(errors);
    }

    let patient = match state.geocoder.geocode(&req.location_text).await {
        Ok(Some(coordinates)) => coordinates,
        Ok(None) => return HttpResponse::Ok().json(location_unresolved()),
        Err(e) => {
            tracing::warn!("Geocoding '{}' failed: {}", req.location_text, e);
            return HttpResponse::Ok().json(location_unresolved());
        }
    };

    let query = RecommendationQuery {
        symptoms: req.symptoms.clone(),
        patient,
        location_text: req.location_text.clone(),
        max_distance_km: req.max_distance_km,
        max_fees: req.max_fees,
        min_rating: req.min_rating,
    };

    let result = state.engine.recommend(&query);

    let (Some(used_radius), Some(match_type)) = (result.used_radius_km, result.match_type) else {
        tracing::info!("No match for '{}' near '{}' ({:?})", result.specialist, req.location_text, result.status);
        return HttpResponse::Ok().json(RecommendResponse {
            message: "I couldn't find doctors matching your preferences nearby. \
                      You may try increasing the distance or adjusting filters."
                .to_string(),
            specialist: Some(result.specialist),
            match_type: None,
            filters_applied: None,
            doctors: Vec::new(),
            next_actions: actions(&["change_filters", "search_another_symptom"]),
        });
    };

    HttpResponse::Ok().json(RecommendResponse {
        message: format!(
            "Here are the best doctors found within {} km of {}, based on your preferences.",
            used_radius, req.location_text
        ),
        specialist: Some(result.specialist.clone()),
        match_type: Some(match_type),
        filters_applied: Some(FiltersApplied {
            location: req.location_text.clone(),
            max_distance_km: used_radius,
            max_fees: req.max_fees,
            min_rating: req.min_rating,
        }),
        doctors: result.doctors.iter().map(DoctorView::from).collect(),
        next_actions: actions(&["change_filters", "search_another_symptom"]),
    })
}

fn location_unresolved() -> RecommendResponse {
    RecommendResponse {
        message: "I couldn't understand the location you entered. \
                  Please try entering a nearby area or locality."
            .to_string(),
        specialist: None,
        match_type: None,
        filters_applied: None,
        doctors: Vec::new(),
        next_actions: actions(&["reenter_location"]),
    }
}

/// Reset the conversation flow
async fn reset() -> impl Responder {
    HttpResponse::Ok().json(BotResponse {
        message: "Alright, let's start fresh. Please tell me what symptoms you are experiencing."
            .to_string(),
        next_actions: actions(&["enter_symptoms"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_for_hour() {
        assert_eq!(greeting_for_hour(0), "Good Morning");
        assert_eq!(greeting_for_hour(11), "Good Morning");
        assert_eq!(greeting_for_hour(12), "Good Afternoon");
        assert_eq!(greeting_for_hour(16), "Good Afternoon");
        assert_eq!(greeting_for_hour(17), "Good Evening");
        assert_eq!(greeting_for_hour(23), "Good Evening");
    }

    #[test]
    fn test_location_unresolved_response() {
        let response = location_unresolved();
        assert!(response.doctors.is_empty());
        assert_eq!(response.next_actions, vec!["reenter_location"]);
    }
}
