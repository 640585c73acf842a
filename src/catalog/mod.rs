//! The reference catalog of known cars.
//!
//! Built once from the cleaned car table and never mutated afterwards. Every
//! dropdown in the form is derived from here, and free-text submissions are
//! checked against it before they can reach the estimator.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::domain::FormInput;
use crate::error::PriceError;

/// One usable row of the reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub company: String,
    pub model_name: String,
    pub year: i32,
    pub fuel_type: String,
}

/// Read-only set of known companies, models, fuel types and years.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    models: BTreeMap<String, BTreeSet<String>>,
    fuel_types: Vec<String>,
    years: BTreeSet<i32>,
}

impl Catalog {
    /// Load the catalog from a CSV file.
    pub fn load(path: &Path) -> Result<Self, PriceError> {
        crate::io::ingest::load_catalog(path).map(|ingested| ingested.catalog)
    }

    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = CatalogRow>,
    {
        let mut catalog = Self::default();
        for row in rows {
            catalog
                .models
                .entry(row.company)
                .or_default()
                .insert(row.model_name);
            if !catalog.fuel_types.contains(&row.fuel_type) {
                catalog.fuel_types.push(row.fuel_type);
            }
            catalog.years.insert(row.year);
        }
        catalog
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Known companies, sorted ascending.
    pub fn companies(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    /// Model names seen with `company`, sorted ascending. Unknown company yields an empty list.
    pub fn models_for(&self, company: &str) -> Vec<&str> {
        self.models
            .get(company)
            .map(|models| models.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Fuel types in first-seen source order.
    pub fn fuel_types(&self) -> &[String] {
        &self.fuel_types
    }

    /// Known years, newest first.
    pub fn years(&self) -> Vec<i32> {
        self.years.iter().rev().copied().collect()
    }

    /// Check that every categorical field of a submission is a known choice.
    ///
    /// Form selections satisfy this by construction; the `predict` command
    /// takes free text and relies on it.
    pub fn validate(&self, input: &FormInput) -> Result<(), PriceError> {
        let Some(models) = self.models.get(&input.company) else {
            return Err(PriceError::InvalidInput(format!(
                "Unknown car company '{}'.",
                input.company
            )));
        };
        if !models.contains(&input.model_name) {
            return Err(PriceError::InvalidInput(format!(
                "Unknown model '{}' for company '{}'.",
                input.model_name, input.company
            )));
        }
        if !self.years.contains(&input.year) {
            return Err(PriceError::InvalidInput(format!(
                "Unknown year of purchase {}.",
                input.year
            )));
        }
        if !self.fuel_types.contains(&input.fuel_type) {
            return Err(PriceError::InvalidInput(format!(
                "Unknown fuel type '{}'.",
                input.fuel_type
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn row(company: &str, model: &str, year: i32, fuel: &str) -> CatalogRow {
        CatalogRow {
            company: company.to_string(),
            model_name: model.to_string(),
            year,
            fuel_type: fuel.to_string(),
        }
    }

    pub(crate) fn sample_catalog() -> Catalog {
        Catalog::from_rows(vec![
            row("Maruti", "Swift", 2015, "Petrol"),
            row("Hyundai", "i20", 2012, "Diesel"),
            row("Maruti", "Alto", 2010, "Petrol"),
            row("Maruti", "Swift", 2017, "Diesel"),
            row("Hyundai", "Creta", 2019, "Petrol"),
            row("Audi", "A4", 2015, "LPG"),
        ])
    }

    #[test]
    fn companies_are_sorted_and_unique() {
        let catalog = sample_catalog();
        assert_eq!(catalog.companies(), vec!["Audi", "Hyundai", "Maruti"]);
    }

    #[test]
    fn models_only_cooccur_with_their_company() {
        let catalog = sample_catalog();
        assert_eq!(catalog.models_for("Maruti"), vec!["Alto", "Swift"]);
        assert_eq!(catalog.models_for("Hyundai"), vec!["Creta", "i20"]);

        for company in catalog.companies() {
            let models = catalog.models_for(company);
            assert!(models.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn unknown_company_has_no_models() {
        assert!(sample_catalog().models_for("Tesla").is_empty());
    }

    #[test]
    fn years_strictly_descending() {
        let years = sample_catalog().years();
        assert_eq!(years, vec![2019, 2017, 2015, 2012, 2010]);
        assert!(years.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn fuel_types_keep_source_order() {
        assert_eq!(sample_catalog().fuel_types(), ["Petrol", "Diesel", "LPG"]);
    }

    #[test]
    fn validate_names_the_offending_field() {
        let catalog = sample_catalog();
        let mut input = FormInput {
            company: "Maruti".to_string(),
            model_name: "Creta".to_string(),
            year: 2015,
            kms_driven: 100,
            fuel_type: "Petrol".to_string(),
        };

        let err = catalog.validate(&input).unwrap_err();
        assert!(matches!(&err, PriceError::InvalidInput(m) if m.contains("Creta")));

        input.model_name = "Swift".to_string();
        assert!(catalog.validate(&input).is_ok());

        input.fuel_type = "Electric".to_string();
        assert!(matches!(
            catalog.validate(&input),
            Err(PriceError::InvalidInput(m)) if m.contains("fuel type")
        ));
    }
}
