//! Price estimators.
//!
//! The form only depends on `PriceEstimator`; `LinearModel` is the concrete
//! implementation loaded from the exported model artifact.

pub mod model;

pub use model::*;

use crate::domain::CarRecord;
use crate::error::PriceError;

/// An opaque trained predictor: one record in, one price out.
///
/// Implementations must be pure: the same record always yields the same
/// result, and a failure is reported as `PriceError::PredictionError`.
pub trait PriceEstimator {
    fn predict(&self, record: &CarRecord) -> Result<f64, PriceError>;
}
