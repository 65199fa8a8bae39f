use serde::{Deserialize, Serialize};

/// One doctor or clinic from the cleaned dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorRecord {
    #[serde(rename = "doctor_name")]
    pub name: String,
    pub specialty: String,
    pub area: String,
    pub latitude: f64,
    pub longitude: f64,
    pub fees: f64,
    pub rating: f64,
    pub contact: String,
    pub address: String,
    pub availability_text: String,
}

impl DoctorRecord {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Read-only doctor table, loaded once per process and shared across workers
#[derive(Debug, Clone, Default)]
pub struct DoctorTable {
    records: Vec<DoctorRecord>,
}

impl DoctorTable {
    pub fn new(records: Vec<DoctorRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DoctorRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DoctorRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// How the base set was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Restricted to doctors whose area starts with the user's locality
    Locality,
    /// Locality matched nothing; every doctor of the specialty was considered
    Distance,
}

/// Outcome of a recommendation run. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    NoSpecialtyMatch,
    NoRadiusMatch,
}

/// Per-request filter thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConstraints {
    pub max_distance_km: f64,
    pub max_fees: f64,
    pub min_rating: f64,
}

/// Fully resolved recommendation request
#[derive(Debug, Clone)]
pub struct RecommendationQuery {
    pub symptoms: String,
    pub patient: Coordinates,
    pub location_text: String,
    pub max_distance_km: f64,
    pub max_fees: f64,
    pub min_rating: f64,
}

impl RecommendationQuery {
    pub fn constraints(&self) -> SearchConstraints {
        SearchConstraints {
            max_distance_km: self.max_distance_km,
            max_fees: self.max_fees,
            min_rating: self.min_rating,
        }
    }
}

/// A doctor that survived filtering, with per-query distance
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedDoctor {
    #[serde(flatten)]
    pub doctor: DoctorRecord,
    pub distance_km: f64,
    pub used_radius_km: u32,
}

/// Ranked recommendation output
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub specialist: String,
    pub status: MatchStatus,
    pub doctors: Vec<RecommendedDoctor>,
    pub used_radius_km: Option<u32>,
    pub match_type: Option<MatchType>,
}

impl RecommendationResult {
    pub fn empty(specialist: impl Into<String>, status: MatchStatus) -> Self {
        Self {
            specialist: specialist.into(),
            status,
            doctors: Vec::new(),
            used_radius_km: None,
            match_type: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }
}
