use crate::models::{DoctorRecord, MatchType};

/// Base set chosen by the locality stage
#[derive(Debug, Clone)]
pub struct LocalityMatch<'a> {
    pub doctors: Vec<&'a DoctorRecord>,
    pub match_type: MatchType,
}

/// First comma-delimited segment of the location text, lowercased and trimmed
///
/// `"Dwarka, Delhi"` -> `"dwarka"`. Blank input yields `""`.
pub fn extract_user_area(location_text: &str) -> String {
    location_text
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Restrict specialists to those whose area starts with the user's locality
///
/// Falls back to the full specialist set (tagged `Distance`) when nothing matches.
/// An empty locality prefix-matches every area.
pub fn match_locality<'a>(
    specialists: Vec<&'a DoctorRecord>,
    location_text: &str,
) -> LocalityMatch<'a> {
    let user_area = extract_user_area(location_text);

    let local: Vec<&DoctorRecord> = specialists
        .iter()
        .copied()
        .filter(|doctor| doctor.area.starts_with(&user_area))
        .collect();

    if local.is_empty() {
        tracing::debug!("No area starts with '{}', falling back to distance match", user_area);
        LocalityMatch {
            doctors: specialists,
            match_type: MatchType::Distance,
        }
    } else {
        LocalityMatch {
            doctors: local,
            match_type: MatchType::Locality,
        }
    }
}
