//! One-hot linear regression over the `CarRecord` schema.
//!
//! The artifact stores, per categorical column, the categories seen in training
//! and one coefficient each; numeric columns carry a single coefficient. At
//! prediction time a dense design row is filled (one-hot block per categorical
//! column, raw values for numeric columns) and dotted with the weights.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::domain::{CarRecord, RECORD_COLUMNS};
use crate::error::PriceError;
use crate::models::PriceEstimator;

/// Model kind tag stored in the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Linear,
}

/// On-disk schema of the model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub kind: ModelKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub trained_at: Option<NaiveDate>,
    pub intercept: f64,
    pub categorical: Vec<CategoricalTerm>,
    pub numeric: Vec<NumericTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalTerm {
    pub column: String,
    pub categories: Vec<String>,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericTerm {
    pub column: String,
    pub coefficient: f64,
}

/// Display metadata about a loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub target: String,
    pub trained_at: Option<NaiveDate>,
    pub n_features: usize,
}

#[derive(Debug, Clone)]
struct Encoder {
    column: String,
    index: HashMap<String, usize>,
}

/// A validated, ready-to-use linear model.
#[derive(Debug, Clone)]
pub struct LinearModel {
    intercept: f64,
    weights: DVector<f64>,
    encoders: Vec<Encoder>,
    numeric: Vec<(String, usize)>,
    info: ModelInfo,
}

impl LinearModel {
    /// Load and validate a model artifact from disk.
    pub fn load(path: &Path) -> Result<Self, PriceError> {
        let file = crate::io::artifact::read_model_json(path)?;
        let model = Self::from_file(file)
            .map_err(|e| PriceError::ModelUnavailable(format!("{}: {e}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            features = model.info.n_features,
            "loaded price model"
        );
        Ok(model)
    }

    /// Validate an artifact against the `CarRecord` schema.
    ///
    /// Errors are plain messages; callers wrap them as `ModelUnavailable`.
    pub fn from_file(file: ModelFile) -> Result<Self, String> {
        if !file.intercept.is_finite() {
            return Err("Non-finite intercept.".to_string());
        }

        let mut seen = HashSet::new();
        let mut weights = Vec::new();
        let mut encoders = Vec::with_capacity(file.categorical.len());
        let mut numeric = Vec::with_capacity(file.numeric.len());

        for term in file.categorical {
            if !seen.insert(term.column.clone()) {
                return Err(format!("Column `{}` appears more than once.", term.column));
            }
            if !is_categorical_column(&term.column) {
                return Err(format!("Column `{}` is not a categorical input.", term.column));
            }
            if term.categories.len() != term.coefficients.len() {
                return Err(format!(
                    "Column `{}` has {} categories but {} coefficients.",
                    term.column,
                    term.categories.len(),
                    term.coefficients.len()
                ));
            }
            if term.coefficients.iter().any(|c| !c.is_finite()) {
                return Err(format!("Column `{}` has a non-finite coefficient.", term.column));
            }

            let offset = weights.len();
            let mut index = HashMap::with_capacity(term.categories.len());
            for (i, category) in term.categories.into_iter().enumerate() {
                if index.insert(category.clone(), offset + i).is_some() {
                    return Err(format!(
                        "Column `{}` lists category '{category}' twice.",
                        term.column
                    ));
                }
            }
            weights.extend(term.coefficients);
            encoders.push(Encoder {
                column: term.column,
                index,
            });
        }

        for term in file.numeric {
            if !seen.insert(term.column.clone()) {
                return Err(format!("Column `{}` appears more than once.", term.column));
            }
            if is_categorical_column(&term.column) || !RECORD_COLUMNS.contains(&term.column.as_str()) {
                return Err(format!("Column `{}` is not a numeric input.", term.column));
            }
            if !term.coefficient.is_finite() {
                return Err(format!("Column `{}` has a non-finite coefficient.", term.column));
            }
            numeric.push((term.column, weights.len()));
            weights.push(term.coefficient);
        }

        let missing: Vec<&str> = RECORD_COLUMNS
            .iter()
            .copied()
            .filter(|c| !seen.contains(*c))
            .collect();
        if !missing.is_empty() {
            return Err(format!("Model is missing input columns: {}", missing.join(", ")));
        }

        let info = ModelInfo {
            target: file.target.unwrap_or_else(|| "Price".to_string()),
            trained_at: file.trained_at,
            n_features: weights.len(),
        };

        Ok(Self {
            intercept: file.intercept,
            weights: DVector::from_vec(weights),
            encoders,
            numeric,
            info,
        })
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    /// Fill the dense design row for a record.
    fn design_row(&self, record: &CarRecord) -> Result<DVector<f64>, PriceError> {
        let mut row = DVector::zeros(self.weights.len());

        for encoder in &self.encoders {
            let value = record.categorical(&encoder.column).ok_or_else(|| {
                PriceError::PredictionError(format!("Record has no column `{}`.", encoder.column))
            })?;
            let idx = encoder.index.get(value).ok_or_else(|| {
                PriceError::PredictionError(format!(
                    "Found unknown category '{value}' in column `{}`.",
                    encoder.column
                ))
            })?;
            row[*idx] = 1.0;
        }

        for (column, idx) in &self.numeric {
            row[*idx] = record.numeric(column).ok_or_else(|| {
                PriceError::PredictionError(format!("Record has no column `{column}`."))
            })?;
        }

        Ok(row)
    }
}

impl PriceEstimator for LinearModel {
    fn predict(&self, record: &CarRecord) -> Result<f64, PriceError> {
        let row = self.design_row(record)?;
        let y = self.intercept + self.weights.dot(&row);
        if !y.is_finite() {
            return Err(PriceError::PredictionError(
                "Model produced a non-finite price.".to_string(),
            ));
        }
        Ok(y)
    }
}

fn is_categorical_column(column: &str) -> bool {
    matches!(column, "name" | "company" | "fuel_type")
}
