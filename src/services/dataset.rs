use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{DoctorRecord, DoctorTable};

/// Errors that can occur while loading the doctor dataset
///
/// All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Column {0} has no values to impute from")]
    NoValues(String),

    #[error("Dataset contains no usable doctor rows")]
    Empty,
}

/// Required columns and the header spellings accepted for each,
/// after header normalization
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("doctor_name", &["doctor_name", "doctor_/_clinic_name", "name"]),
    ("speciality", &["speciality", "specialty"]),
    ("area", &["area"]),
    ("latitude", &["latitude"]),
    ("longitude", &["longitude"]),
    ("fees", &["fees", "fees_(₹)"]),
    ("rating", &["rating"]),
];

/// One CSV row as exported, before normalization and imputation
#[derive(Debug, Deserialize)]
struct RawDoctorRow {
    #[serde(alias = "doctor_/_clinic_name", alias = "name")]
    doctor_name: String,
    #[serde(alias = "specialty")]
    speciality: String,
    area: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    longitude: Option<f64>,
    #[serde(default, alias = "fees_(₹)", deserialize_with = "csv::invalid_option")]
    fees: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    rating: Option<f64>,
    #[serde(default, alias = "contact_number")]
    contact: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, alias = "availability")]
    availability_text: Option<String>,
}

impl DoctorTable {
    /// Load and normalize the doctor table from a CSV file
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::from_csv_reader(file)?;
        tracing::info!("Loaded {} doctors from {}", table.len(), path.as_ref().display());
        Ok(table)
    }

    /// Parse and normalize a doctor table from any CSV source
    ///
    /// - Headers are trimmed, lowercased and have spaces replaced by `_`
    /// - Specialty and area are lowercased and trimmed
    /// - Rows without coordinates are dropped
    /// - Missing fees and ratings are imputed with the column median
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: csv::StringRecord = reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();
        check_required_columns(&headers)?;
        reader.set_headers(headers);

        let rows = reader
            .deserialize::<RawDoctorRow>()
            .collect::<Result<Vec<_>, _>>()?;

        // Imputed over every row, including those dropped below for missing coordinates
        let fee_median = median(rows.iter().filter_map(|r| r.fees).collect())
            .ok_or_else(|| DatasetError::NoValues("fees".to_string()))?;
        let rating_median = median(rows.iter().filter_map(|r| r.rating).collect())
            .ok_or_else(|| DatasetError::NoValues("rating".to_string()))?;

        let total = rows.len();
        let records: Vec<DoctorRecord> = rows
            .into_iter()
            .filter_map(|row| {
                Some(DoctorRecord {
                    latitude: row.latitude?,
                    longitude: row.longitude?,
                    name: row.doctor_name,
                    specialty: row.speciality.trim().to_lowercase(),
                    area: row.area.trim().to_lowercase(),
                    fees: row.fees.unwrap_or(fee_median),
                    rating: row.rating.unwrap_or(rating_median),
                    contact: row.contact.unwrap_or_default(),
                    address: row.address.unwrap_or_default(),
                    availability_text: row.availability_text.unwrap_or_default(),
                })
            })
            .collect();

        if records.len() < total {
            tracing::warn!("Dropped {} doctor rows without coordinates", total - records.len());
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(DoctorTable::new(records))
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn check_required_columns(headers: &csv::StringRecord) -> Result<(), DatasetError> {
    for (column, accepted) in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| accepted.contains(&h)) {
            return Err(DatasetError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// Median of the values, averaging the middle pair for even counts
fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
