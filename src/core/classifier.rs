/// Label returned when nothing more specific can be inferred
pub const DEFAULT_SPECIALIST: &str = "general medicine";

/// Ordered keyword rules; the first rule with a matching keyword wins
const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (&["joint", "knee", "bone", "arthritis"], "orthopedics"),
    (&["skin", "rash", "itch", "acne"], "dermatology"),
    (&["chest", "heart", "palpitation"], "cardiology"),
    (&["headache", "migraine", "seizure"], "neurology"),
    (&["fever", "vomiting", "cold", "weakness", "fatigue"], "general medicine"),
];

/// Maps free-text symptoms to a lowercase specialist label
///
/// Implementations must not fail: on uncertainty they return a safe default.
pub trait SymptomClassifier: Send + Sync {
    fn classify(&self, symptoms: &str) -> String;
}

impl<F> SymptomClassifier for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn classify(&self, symptoms: &str) -> String {
        self(symptoms)
    }
}

/// Rule-based classifier with an optional pluggable fallback
pub struct KeywordClassifier {
    default_label: String,
    fallback: Option<Box<dyn SymptomClassifier>>,
}

impl KeywordClassifier {
    pub fn new(default_label: impl Into<String>) -> Self {
        Self {
            default_label: default_label.into().trim().to_lowercase(),
            fallback: None,
        }
    }

    /// Consulted when no keyword rule fires
    pub fn with_fallback(mut self, fallback: Box<dyn SymptomClassifier>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    fn match_rules(text: &str) -> Option<&'static str> {
        KEYWORD_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
            .map(|(_, label)| *label)
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIALIST)
    }
}

impl SymptomClassifier for KeywordClassifier {
    fn classify(&self, symptoms: &str) -> String {
        let text = symptoms.trim().to_lowercase();

        if let Some(label) = Self::match_rules(&text) {
            return label.to_string();
        }

        if let Some(fallback) = &self.fallback {
            let label = fallback.classify(&text).trim().to_lowercase();
            if !label.is_empty() {
                return label;
            }
        }

        self.default_label.clone()
    }
}
