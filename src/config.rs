use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::{RadiusTiers, SpecialtyResolver, DEFAULT_RADIUS_TIERS_KM, DEFAULT_SPECIALIST};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    /// Specialist label -> accepted dataset spellings. Empty uses the built-in table.
    #[serde(default)]
    pub specialties: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub classifier: ClassifierSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self { path: default_dataset_path() }
    }
}

fn default_dataset_path() -> String { "data/clean_doctor_dataset.csv".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_radius_tiers")]
    pub radius_tiers_km: Vec<u32>,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self { radius_tiers_km: default_radius_tiers() }
    }
}

fn default_radius_tiers() -> Vec<u32> { DEFAULT_RADIUS_TIERS_KM.to_vec() }

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    #[serde(default = "default_label")]
    pub default_label: String,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self { default_label: default_label() }
    }
}

fn default_label() -> String { DEFAULT_SPECIALIST.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_geocoder_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoder_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_geocoder_timeout(),
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_geocoder_endpoint() -> String { "https://nominatim.openstreetmap.org".to_string() }
fn default_user_agent() -> String { "ai_medical_bot".to_string() }
fn default_geocoder_timeout() -> u64 { 10 }
fn default_cache_size() -> u64 { 1000 }
fn default_cache_ttl() -> u64 { 86_400 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Unrecognized names fall back to compact output
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

impl LoggingSettings {
    pub fn log_format(&self) -> LogFormat {
        LogFormat::from_name(&self.format)
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local override file (config/local.toml)
    /// 4. Environment variables (prefixed with DOCREC_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DOCREC__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("DOCREC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DOCREC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn radius_tiers(&self) -> RadiusTiers {
        RadiusTiers::new(self.recommendation.radius_tiers_km.clone())
    }

    pub fn specialty_resolver(&self) -> SpecialtyResolver {
        if self.specialties.is_empty() {
            SpecialtyResolver::builtin()
        } else {
            SpecialtyResolver::new(self.specialties.clone())
        }
    }
}

/// Apply well-known unprefixed environment variables
///
/// `DOCTOR_DATASET` overrides `dataset.path`, `GEOCODER_URL` overrides `geocoder.endpoint`.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = env::var("DOCTOR_DATASET") {
        builder = builder.set_override("dataset.path", path)?;
    }
    if let Ok(endpoint) = env::var("GEOCODER_URL") {
        builder = builder.set_override("geocoder.endpoint", endpoint)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_tiers() {
        let settings = RecommendationSettings::default();
        assert_eq!(settings.radius_tiers_km, vec![3, 5, 10]);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
        assert_eq!(LoggingSettings::default().log_format(), LogFormat::Json);
    }

    #[test]
    fn test_log_format_names() {
        assert_eq!(LogFormat::from_name("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_name(" Pretty "), LogFormat::Pretty);
        assert_eq!(LogFormat::from_name("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_name("plain"), LogFormat::Compact);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[recommendation]
radius_tiers_km = [10, 2, 5]

[specialties]
pediatrics = ["pediatrics", "paediatrics"]
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.radius_tiers().as_slice(), &[2, 5, 10]);
        assert_eq!(settings.dataset.path, "data/clean_doctor_dataset.csv");
        assert_eq!(settings.classifier.default_label, "general medicine");
        assert_eq!(
            settings.specialty_resolver().acceptable("pediatrics"),
            vec!["pediatrics", "paediatrics"]
        );
    }

    #[test]
    fn test_empty_specialties_use_builtin() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 8081").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert!(settings.specialty_resolver().acceptable("orthopedics").contains(&"ortho".to_string()));
    }
}
