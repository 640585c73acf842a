//! Shared "load -> submit -> render" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! kms check -> catalog check -> typed record -> predict -> round -> INR string
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::catalog::Catalog;
use crate::domain::{CarRecord, FormInput, Outcome, RunPaths};
use crate::error::PriceError;
use crate::models::{LinearModel, PriceEstimator};

/// Dependencies loaded once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct Session<E> {
    pub catalog: Catalog,
    pub estimator: E,
}

impl<E: PriceEstimator> Session<E> {
    pub fn new(catalog: Catalog, estimator: E) -> Self {
        Self { catalog, estimator }
    }

    pub fn submit(&self, input: &FormInput) -> Outcome {
        submit(&self.catalog, &self.estimator, input)
    }
}

/// Load the model artifact and the reference table.
///
/// Either failure is fatal: the caller must stop before showing any form.
pub fn startup(paths: &RunPaths) -> Result<Session<LinearModel>, PriceError> {
    let estimator = LinearModel::load(&paths.model)?;
    let catalog = Catalog::load(&paths.data)?;
    Ok(Session::new(catalog, estimator))
}

/// Validate a submission into the estimator's record type.
pub fn build_record(catalog: &Catalog, input: &FormInput) -> Result<CarRecord, PriceError> {
    let kms_driven = u64::try_from(input.kms_driven).map_err(|_| {
        PriceError::InvalidInput("Please enter a valid number of kilometers.".to_string())
    })?;
    catalog.validate(input)?;

    Ok(CarRecord {
        company: input.company.clone(),
        model_name: input.model_name.clone(),
        year: input.year,
        kms_driven,
        fuel_type: input.fuel_type.clone(),
    })
}

/// Predict and format one record: `(price rounded to paise, INR string)`.
pub fn estimate<E>(estimator: &E, record: &CarRecord) -> Result<(f64, String), PriceError>
where
    E: PriceEstimator + ?Sized,
{
    let raw = estimator.predict(record)?;
    let paise = crate::report::to_paise(raw)?;
    Ok((paise as f64 / 100.0, crate::report::format_paise(paise)))
}

/// Run one form submission end to end.
///
/// Rejected input never reaches the estimator. Nothing is retained between
/// calls, so identical inputs give identical outcomes.
pub fn submit<E>(catalog: &Catalog, estimator: &E, input: &FormInput) -> Outcome
where
    E: PriceEstimator + ?Sized,
{
    let record = match build_record(catalog, input) {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(company = %input.company, model = %input.model_name, "rejected input: {err}");
            return Outcome::Warning(err.to_string());
        }
    };

    match estimate(estimator, &record) {
        Ok((price, formatted)) => {
            tracing::info!(
                company = %record.company,
                model = %record.model_name,
                year = record.year,
                kms = record.kms_driven,
                fuel = %record.fuel_type,
                price,
                "estimated price"
            );
            Outcome::Estimate { price, formatted }
        }
        Err(err) => {
            tracing::error!(model = %record.model_name, "prediction failed: {err}");
            Outcome::Error(format!("An error occurred during prediction: {err}"))
        }
    }
}
