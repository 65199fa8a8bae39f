// Integration tests for Doctor Recommender

use std::sync::Arc;

use doctor_recommender::core::{
    KeywordClassifier, RadiusTiers, RecommendationEngine, SpecialtyResolver,
};
use doctor_recommender::models::{
    Coordinates, DoctorRecord, DoctorTable, MatchStatus, MatchType, RecommendationQuery,
};

// Dwarka Sector 12, Delhi
const PATIENT: Coordinates = Coordinates { latitude: 28.5921, longitude: 77.0460 };

// Offset a point `km` north of the patient
fn north(km: f64) -> f64 {
    PATIENT.latitude + km / 111.19
}

fn create_doctor(name: &str, specialty: &str, area: &str, km: f64, fees: f64, rating: f64) -> DoctorRecord {
    DoctorRecord {
        name: name.to_string(),
        specialty: specialty.to_string(),
        area: area.to_string(),
        latitude: north(km),
        longitude: PATIENT.longitude,
        fees,
        rating,
        contact: "9810000000".to_string(),
        address: format!("{}, Delhi", area),
        availability_text: "Mon-Sat 10am-6pm".to_string(),
    }
}

fn create_query(symptoms: &str, location: &str, max_distance_km: f64, max_fees: f64, min_rating: f64) -> RecommendationQuery {
    RecommendationQuery {
        symptoms: symptoms.to_string(),
        patient: PATIENT,
        location_text: location.to_string(),
        max_distance_km,
        max_fees,
        min_rating,
    }
}

fn create_engine(doctors: Vec<DoctorRecord>) -> RecommendationEngine {
    RecommendationEngine::with_defaults(Arc::new(DoctorTable::new(doctors)))
}

fn cardiology_table() -> Vec<DoctorRecord> {
    vec![
        create_doctor("Dr. Near Cheap", "cardiology", "dwarka sector 12", 1.0, 1500.0, 4.2),
        create_doctor("Dr. Near Pricey", "cardiology", "dwarka sector 6", 2.0, 2500.0, 4.6),
        create_doctor("Dr. Mid", "cardiologist", "janakpuri", 4.0, 1000.0, 4.5),
        create_doctor("Dr. Far", "cardiology", "rohini", 8.0, 900.0, 4.9),
        create_doctor("Dr. Very Far", "cardiology", "noida", 15.0, 500.0, 5.0),
    ]
}

#[test]
fn test_scenario_fee_filter_first_tier() {
    let engine = create_engine(vec![
        create_doctor("Dr. Cheap", "cardiology", "dwarka", 1.0, 1500.0, 4.2),
        create_doctor("Dr. Pricey", "cardiology", "dwarka", 2.5, 2500.0, 4.6),
    ]);

    let result = engine.recommend(&create_query("chest pain", "Dwarka, Delhi", 3.0, 2000.0, 4.0));

    assert_eq!(result.status, MatchStatus::Matched);
    assert_eq!(result.len(), 1);
    assert_eq!(result.doctors[0].doctor.name, "Dr. Cheap");
    assert_eq!(result.used_radius_km, Some(3));
}

#[test]
fn test_scenario_no_doctor_meets_rating() {
    let engine = create_engine(vec![
        create_doctor("A", "cardiology", "dwarka", 1.0, 500.0, 4.0),
        create_doctor("B", "cardiology", "janakpuri", 6.0, 500.0, 4.4),
        create_doctor("C", "cardiology", "noida", 12.0, 500.0, 4.9),
    ]);

    // Locality matches "dwarka" here; the result is still empty
    let with_locality = engine.recommend(&create_query("chest pain", "Dwarka", 3.0, 5000.0, 4.5));
    assert!(with_locality.is_empty());
    assert_eq!(with_locality.status, MatchStatus::NoRadiusMatch);

    let without_locality = engine.recommend(&create_query("chest pain", "Saket", 3.0, 5000.0, 4.5));
    assert!(without_locality.is_empty());
    assert_eq!(without_locality.status, MatchStatus::NoRadiusMatch);
}

#[test]
fn test_scenario_dwarka_prefix_locality() {
    let engine = create_engine(vec![
        create_doctor("Sector Doc", "cardiology", "dwarka sector 12", 1.0, 1000.0, 4.0),
        create_doctor("Other Doc", "cardiology", "palam", 0.5, 1000.0, 4.9),
    ]);

    let result = engine.recommend(&create_query("chest pain", "Dwarka, Delhi", 3.0, 2000.0, 3.5));

    assert_eq!(result.match_type, Some(MatchType::Locality));
    assert_eq!(result.len(), 1);
    assert_eq!(result.doctors[0].doctor.area, "dwarka sector 12");
}

#[test]
fn test_locality_fallback_uses_full_specialist_set() {
    let engine = create_engine(cardiology_table());

    let result = engine.recommend(&create_query("heart racing", "Saket", 10.0, 10_000.0, 0.0));

    assert_eq!(result.match_type, Some(MatchType::Distance));
    // Everything of the specialty within 10 km
    let mut names: Vec<&str> = result.doctors.iter().map(|d| d.doctor.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Dr. Far", "Dr. Mid", "Dr. Near Cheap", "Dr. Near Pricey"]);
}

#[test]
fn test_tier_floor_property() {
    let engine = create_engine(cardiology_table());

    for max_distance in [0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 9.0, 10.0] {
        let result = engine.recommend(&create_query("chest pain", "Saket", max_distance, 10_000.0, 0.0));
        let used = result.used_radius_km.expect("every request up to 10 km has a match");
        assert!([3, 5, 10].contains(&used));
        assert!(f64::from(used) >= max_distance, "used {} < requested {}", used, max_distance);
    }
}

#[test]
fn test_radius_monotonicity() {
    // Only doctors beyond 3 km, so the first tier is empty for small requests
    let engine = create_engine(vec![
        create_doctor("Mid", "cardiology", "janakpuri", 4.0, 1000.0, 4.5),
        create_doctor("Far", "cardiology", "rohini", 8.0, 900.0, 4.9),
    ]);

    let mut previous_radius = 0;
    let mut previous_count = 0;
    for max_distance in [1.0, 3.0, 4.0, 5.0, 6.0, 10.0] {
        let result = engine.recommend(&create_query("chest pain", "Saket", max_distance, 10_000.0, 0.0));
        let used = result.used_radius_km.unwrap();
        assert!(used >= previous_radius);
        assert!(result.len() >= previous_count);
        previous_radius = used;
        previous_count = result.len();
    }
}

#[test]
fn test_request_beyond_ceiling_returns_empty() {
    let engine = create_engine(cardiology_table());

    let result = engine.recommend(&create_query("chest pain", "Dwarka", 20.0, 10_000.0, 0.0));

    assert!(result.is_empty());
    assert_eq!(result.status, MatchStatus::NoRadiusMatch);
}

#[test]
fn test_ranking_order() {
    let engine = create_engine(vec![
        create_doctor("A", "cardiology", "dwarka", 2.0, 500.0, 4.5),
        create_doctor("B", "cardiology", "dwarka", 1.0, 500.0, 4.5),
        create_doctor("C", "cardiology", "dwarka", 0.5, 500.0, 3.9),
        create_doctor("D", "cardiology", "dwarka", 2.5, 500.0, 4.8),
    ]);

    let result = engine.recommend(&create_query("chest pain", "Dwarka", 3.0, 1000.0, 0.0));

    let names: Vec<&str> = result.doctors.iter().map(|d| d.doctor.name.as_str()).collect();
    assert_eq!(names, vec!["D", "B", "A", "C"]);

    for pair in result.doctors.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        assert!(
            first.doctor.rating > second.doctor.rating
                || (first.doctor.rating == second.doctor.rating && first.distance_km <= second.distance_km),
            "Results not ranked"
        );
    }
}

#[test]
fn test_distance_recomputed_per_query() {
    let engine = create_engine(vec![create_doctor("A", "cardiology", "dwarka", 2.0, 500.0, 4.5)]);

    let near = engine.recommend(&create_query("chest pain", "Dwarka", 3.0, 1000.0, 0.0));
    let mut moved = create_query("chest pain", "Dwarka", 3.0, 1000.0, 0.0);
    moved.patient = Coordinates::new(north(1.0), PATIENT.longitude);
    let closer = engine.recommend(&moved);

    assert!(closer.doctors[0].distance_km < near.doctors[0].distance_km);
}

#[test]
fn test_custom_tiers_and_synonyms() {
    let mut synonyms = std::collections::HashMap::new();
    synonyms.insert("cardiology".to_string(), vec!["heart specialist".to_string()]);

    let engine = RecommendationEngine::new(
        Arc::new(DoctorTable::new(vec![
            create_doctor("A", "heart specialist", "dwarka", 6.0, 500.0, 4.5),
            create_doctor("B", "cardiology", "dwarka", 1.0, 500.0, 4.5),
        ])),
        SpecialtyResolver::new(synonyms),
        RadiusTiers::new(vec![2, 7]),
        Arc::new(KeywordClassifier::default()),
    );

    let result = engine.recommend(&create_query("chest pain", "Dwarka", 2.0, 1000.0, 0.0));

    assert_eq!(result.used_radius_km, Some(7));
    assert_eq!(result.len(), 1);
    assert_eq!(result.doctors[0].doctor.name, "A");
}

#[test]
fn test_engine_over_bundled_dataset() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/clean_doctor_dataset.csv");
    let table = DoctorTable::load_csv(path).expect("bundled dataset loads");
    let engine = RecommendationEngine::with_defaults(Arc::new(table));

    let result = engine.recommend(&create_query("chest pain and breathlessness", "Dwarka, Delhi", 3.0, 2000.0, 4.0));

    assert_eq!(result.specialist, "cardiology");
    assert_eq!(result.match_type, Some(MatchType::Locality));
    assert_eq!(result.used_radius_km, Some(3));
    assert_eq!(result.doctors[0].doctor.name, "Dr. Anil Mehta");
}
