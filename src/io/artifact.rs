//! Read model artifact JSON files.
//!
//! The artifact is the portable form of the trained regression: kind tag,
//! intercept, and per-column coefficients. The schema is `models::ModelFile`;
//! compatibility with `CarRecord` is checked by `LinearModel::from_file`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::PriceError;
use crate::models::ModelFile;

/// Read a model artifact without validating it against the record schema.
pub fn read_model_json(path: &Path) -> Result<ModelFile, PriceError> {
    let file = File::open(path).map_err(|e| {
        PriceError::ModelUnavailable(format!("Failed to open model '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        PriceError::ModelUnavailable(format!("Invalid model JSON '{}': {e}", path.display()))
    })
}
