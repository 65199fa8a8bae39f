// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Coordinates, DoctorRecord, DoctorTable, MatchStatus, MatchType, RecommendationQuery,
    RecommendationResult, RecommendedDoctor, SearchConstraints,
};
pub use requests::{RecommendRequest, SymptomRequest};
pub use responses::{
    BotResponse, DoctorView, ErrorResponse, FiltersApplied, HealthResponse, RecommendResponse,
    SymptomResponse,
};
