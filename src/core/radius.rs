use std::cmp::Ordering;

use crate::models::{DoctorRecord, SearchConstraints};

/// Default search radii in kilometers
pub const DEFAULT_RADIUS_TIERS_KM: [u32; 3] = [3, 5, 10];

/// Ascending, de-duplicated list of search radii
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadiusTiers {
    tiers: Vec<u32>,
}

impl RadiusTiers {
    pub fn new(mut tiers: Vec<u32>) -> Self {
        tiers.sort_unstable();
        tiers.dedup();
        Self { tiers }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.tiers
    }

    /// Largest configured tier, the hard search ceiling
    pub fn ceiling(&self) -> Option<u32> {
        self.tiers.last().copied()
    }

    /// Tiers at or above the requested distance, ascending
    pub fn eligible(&self, max_distance_km: f64) -> impl Iterator<Item = u32> + '_ {
        self.tiers
            .iter()
            .copied()
            .filter(move |&r| f64::from(r) >= max_distance_km)
    }
}

impl Default for RadiusTiers {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_TIERS_KM.to_vec())
    }
}

/// Base-set doctor annotated with its distance to the patient
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub doctor: &'a DoctorRecord,
    pub distance_km: f64,
}

/// Winning tier and its ranked doctors
#[derive(Debug, Clone)]
pub struct TierMatch<'a> {
    pub radius_km: u32,
    pub doctors: Vec<Candidate<'a>>,
}

/// Distance, fee and rating check for a single tier
#[inline]
pub fn passes_constraints(
    candidate: &Candidate<'_>,
    radius_km: u32,
    constraints: &SearchConstraints,
) -> bool {
    candidate.distance_km <= f64::from(radius_km)
        && candidate.doctor.fees <= constraints.max_fees
        && candidate.doctor.rating >= constraints.min_rating
}

/// Walk the eligible tiers in ascending order and return the first non-empty one
///
/// Tiers below the requested distance are skipped. Returns `None` when no tier up
/// to the ceiling satisfies all three constraints.
pub fn expand_radius<'a>(
    base: &[Candidate<'a>],
    tiers: &RadiusTiers,
    constraints: &SearchConstraints,
) -> Option<TierMatch<'a>> {
    for radius_km in tiers.eligible(constraints.max_distance_km) {
        let mut doctors: Vec<Candidate<'a>> = base
            .iter()
            .filter(|c| passes_constraints(c, radius_km, constraints))
            .copied()
            .collect();

        tracing::debug!("Radius {} km: {} of {} candidates pass", radius_km, doctors.len(), base.len());

        if !doctors.is_empty() {
            rank(&mut doctors);
            return Some(TierMatch { radius_km, doctors });
        }
    }

    None
}

/// Sort by rating (descending) and then by distance (ascending)
pub fn rank(candidates: &mut [Candidate<'_>]) {
    candidates.sort_by(|a, b| {
        b.doctor
            .rating
            .partial_cmp(&a.doctor.rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(Ordering::Equal)
            })
    });
}
