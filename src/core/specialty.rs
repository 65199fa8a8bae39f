use std::collections::HashMap;

use crate::models::{DoctorRecord, DoctorTable};

/// Built-in synonym table: classifier label -> dataset spellings
const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("orthopedics", &["orthopedics", "orthopaedics", "ortho"]),
    ("cardiology", &["cardiology", "cardiologist"]),
    ("dermatology", &["dermatology", "dermatologist"]),
    ("neurology", &["neurology", "neurologist"]),
    ("general medicine", &["general medicine", "physician", "general"]),
];

/// Maps a specialist label to the specialty strings accepted in the dataset
///
/// Immutable after construction. Unknown labels only match themselves.
#[derive(Debug, Clone)]
pub struct SpecialtyResolver {
    synonyms: HashMap<String, Vec<String>>,
}

impl SpecialtyResolver {
    pub fn new(table: HashMap<String, Vec<String>>) -> Self {
        let synonyms = table
            .into_iter()
            .map(|(label, spellings)| {
                let spellings = spellings.iter().map(|s| normalize(s)).collect();
                (normalize(&label), spellings)
            })
            .collect();

        Self { synonyms }
    }

    pub fn builtin() -> Self {
        let table = BUILTIN_SYNONYMS
            .iter()
            .map(|(label, spellings)| {
                (
                    label.to_string(),
                    spellings.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();

        Self::new(table)
    }

    /// Acceptable dataset spellings for `label`
    pub fn acceptable(&self, label: &str) -> Vec<String> {
        let label = normalize(label);
        match self.synonyms.get(&label) {
            Some(spellings) => spellings.clone(),
            None => vec![label],
        }
    }

    /// Doctors whose specialty is one of the acceptable spellings (exact match)
    pub fn filter<'a>(&self, label: &str, table: &'a DoctorTable) -> Vec<&'a DoctorRecord> {
        let accepted = self.acceptable(label);
        table
            .iter()
            .filter(|doctor| accepted.iter().any(|s| *s == doctor.specialty))
            .collect()
    }
}

impl Default for SpecialtyResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
