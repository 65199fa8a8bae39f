use std::sync::Arc;

use crate::core::{
    classifier::{KeywordClassifier, SymptomClassifier},
    distance::distance_km,
    locality::match_locality,
    radius::{expand_radius, Candidate, RadiusTiers},
    specialty::SpecialtyResolver,
};
use crate::models::{
    DoctorTable, MatchStatus, RecommendationQuery, RecommendationResult, RecommendedDoctor,
};

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Classify symptoms into a specialist label
/// 2. Specialty filter (synonym-aware, exact match)
/// 3. Locality prefix match with distance fallback
/// 4. Per-query Haversine distance for every base-set doctor
/// 5. Radius expansion with fee and rating thresholds
/// 6. Ranking by rating, then distance
///
/// Holds only immutable state, so one instance is shared across workers.
#[derive(Clone)]
pub struct RecommendationEngine {
    table: Arc<DoctorTable>,
    resolver: SpecialtyResolver,
    tiers: RadiusTiers,
    classifier: Arc<dyn SymptomClassifier>,
}

impl RecommendationEngine {
    pub fn new(
        table: Arc<DoctorTable>,
        resolver: SpecialtyResolver,
        tiers: RadiusTiers,
        classifier: Arc<dyn SymptomClassifier>,
    ) -> Self {
        Self {
            table,
            resolver,
            tiers,
            classifier,
        }
    }

    /// Engine with the built-in synonym table, default tiers and keyword classifier
    pub fn with_defaults(table: Arc<DoctorTable>) -> Self {
        Self::new(
            table,
            SpecialtyResolver::builtin(),
            RadiusTiers::default(),
            Arc::new(KeywordClassifier::default()),
        )
    }

    pub fn table(&self) -> &DoctorTable {
        &self.table
    }

    pub fn tiers(&self) -> &RadiusTiers {
        &self.tiers
    }

    /// Predicted specialist label for free-text symptoms
    pub fn classify(&self, symptoms: &str) -> String {
        self.classifier.classify(symptoms).trim().to_lowercase()
    }

    /// Run the full pipeline for a query
    pub fn recommend(&self, query: &RecommendationQuery) -> RecommendationResult {
        let specialist = self.classify(&query.symptoms);
        tracing::debug!("Predicted specialist: {}", specialist);

        self.recommend_for_specialty(&specialist, query)
    }

    /// Run the pipeline for an already-known specialist label
    ///
    /// `query.symptoms` is ignored.
    pub fn recommend_for_specialty(
        &self,
        specialist: &str,
        query: &RecommendationQuery,
    ) -> RecommendationResult {
        let specialist = specialist.trim().to_lowercase();

        let specialists = self.resolver.filter(&specialist, &self.table);
        if specialists.is_empty() {
            tracing::info!("No doctors of specialty '{}' in table", specialist);
            return RecommendationResult::empty(specialist, MatchStatus::NoSpecialtyMatch);
        }

        let locality = match_locality(specialists, &query.location_text);
        let match_type = locality.match_type;

        let base: Vec<Candidate> = locality
            .doctors
            .into_iter()
            .map(|doctor| Candidate {
                doctor,
                distance_km: distance_km(query.patient, doctor.coordinates()),
            })
            .collect();

        tracing::debug!(
            "Base set for '{}': {} doctors ({:?} match)",
            specialist,
            base.len(),
            match_type
        );

        let Some(tier) = expand_radius(&base, &self.tiers, &query.constraints()) else {
            tracing::info!(
                "No '{}' doctors within {:?} km satisfy fees <= {} and rating >= {}",
                specialist,
                self.tiers.ceiling(),
                query.max_fees,
                query.min_rating
            );
            return RecommendationResult::empty(specialist, MatchStatus::NoRadiusMatch);
        };

        let radius_km = tier.radius_km;
        let doctors: Vec<RecommendedDoctor> = tier
            .doctors
            .into_iter()
            .map(|c| RecommendedDoctor {
                doctor: c.doctor.clone(),
                distance_km: c.distance_km,
                used_radius_km: radius_km,
            })
            .collect();

        tracing::info!(
            "Recommending {} '{}' doctors within {} km ({:?} match)",
            doctors.len(),
            specialist,
            radius_km,
            match_type
        );

        RecommendationResult {
            specialist,
            status: MatchStatus::Matched,
            doctors,
            used_radius_km: Some(radius_km),
            match_type: Some(match_type),
        }
    }
}
