// Core recommendation exports
pub mod classifier;
pub mod distance;
pub mod engine;
pub mod locality;
pub mod radius;
pub mod specialty;

pub use classifier::{KeywordClassifier, SymptomClassifier, DEFAULT_SPECIALIST};
pub use distance::{distance_km, haversine_distance};
pub use engine::RecommendationEngine;
pub use locality::{extract_user_area, match_locality, LocalityMatch};
pub use radius::{expand_radius, passes_constraints, rank, Candidate, RadiusTiers, TierMatch, DEFAULT_RADIUS_TIERS_KM};
pub use specialty::SpecialtyResolver;
