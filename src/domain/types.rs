//! Shared domain types.
//!
//! `CarRecord` mirrors the estimator's input schema exactly; anything that can
//! be rejected (negative kilometres, free-text names) lives in `FormInput`
//! until it has been validated.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Column names of the estimator's input schema, in artifact order.
pub const RECORD_COLUMNS: [&str; 5] = ["name", "company", "year", "kms_driven", "fuel_type"];

/// One structured input to the estimator.
///
/// Built fresh per submission and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRecord {
    pub company: String,
    /// Serialized as `name` to match the reference table header.
    #[serde(rename = "name")]
    pub model_name: String,
    pub year: i32,
    pub kms_driven: u64,
    pub fuel_type: String,
}

impl CarRecord {
    /// Categorical value for a schema column, `None` for numeric or unknown columns.
    pub fn categorical(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.model_name),
            "company" => Some(&self.company),
            "fuel_type" => Some(&self.fuel_type),
            _ => None,
        }
    }

    /// Numeric value for a schema column, `None` for categorical or unknown columns.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "year" => Some(f64::from(self.year)),
            "kms_driven" => Some(self.kms_driven as f64),
            _ => None,
        }
    }
}

/// A form submission before validation.
///
/// `kms_driven` is signed because that is what a user can type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub company: String,
    pub model_name: String,
    pub year: i32,
    pub kms_driven: i64,
    pub fuel_type: String,
}

/// Result of one submission, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A successful estimate. `formatted` is the INR currency string.
    Estimate { price: f64, formatted: String },
    /// Rejected input; the estimator was not invoked.
    Warning(String),
    /// The estimator failed.
    Error(String),
}

impl Outcome {
    pub fn is_estimate(&self) -> bool {
        matches!(self, Self::Estimate { .. })
    }
}

/// Locations of the two startup artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub model: PathBuf,
    pub data: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_exposes_every_schema_column() {
        let record = CarRecord {
            company: "Maruti".to_string(),
            model_name: "Maruti Suzuki Swift".to_string(),
            year: 2015,
            kms_driven: 30_000,
            fuel_type: "Petrol".to_string(),
        };

        for column in RECORD_COLUMNS {
            assert!(
                record.categorical(column).is_some() ^ record.numeric(column).is_some(),
                "column {column} should be exactly one of categorical/numeric"
            );
        }
        assert_eq!(record.categorical("name"), Some("Maruti Suzuki Swift"));
        assert_eq!(record.numeric("kms_driven"), Some(30_000.0));
        assert_eq!(record.numeric("price"), None);
    }
}
