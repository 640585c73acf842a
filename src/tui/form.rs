//! Form state: which choice is selected in each field.
//!
//! Every choice list is copied out of the catalog, so any `FormInput` built
//! from this state is valid by construction (except kilometres, which is typed).

use crate::catalog::Catalog;
use crate::domain::FormInput;

/// Step used by ←/→ on the kilometres field.
pub const KMS_STEP: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Company,
    Model,
    Year,
    Kms,
    Fuel,
    Submit,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Company,
        Field::Model,
        Field::Year,
        Field::Kms,
        Field::Fuel,
        Field::Submit,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Company => "Car Company",
            Field::Model => "Car Model",
            Field::Year => "Year of Purchase",
            Field::Kms => "Kilometres Driven",
            Field::Fuel => "Fuel Type",
            Field::Submit => "Predict Price",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub companies: Vec<String>,
    pub company: usize,
    pub models: Vec<String>,
    pub model: usize,
    pub years: Vec<i32>,
    pub year: usize,
    pub fuel_types: Vec<String>,
    pub fuel: usize,
    pub kms: i64,
    pub selected: Field,
}

impl FormState {
    pub fn new(catalog: &Catalog) -> Self {
        let companies: Vec<String> = catalog.companies().into_iter().map(str::to_string).collect();
        let models = companies
            .first()
            .map(|c| models_of(catalog, c))
            .unwrap_or_default();

        Self {
            companies,
            company: 0,
            models,
            model: 0,
            years: catalog.years(),
            year: 0,
            fuel_types: catalog.fuel_types().to_vec(),
            fuel: 0,
            kms: 0,
            selected: Field::Company,
        }
    }

    pub fn select_prev(&mut self) {
        let idx = self.selected.index();
        if idx > 0 {
            self.selected = Field::ALL[idx - 1];
        }
    }

    pub fn select_next(&mut self) {
        let idx = self.selected.index();
        if idx + 1 < Field::ALL.len() {
            self.selected = Field::ALL[idx + 1];
        }
    }

    /// Move the selected field's choice by `delta` (wrapping), or step kilometres.
    pub fn adjust(&mut self, catalog: &Catalog, delta: i32) {
        match self.selected {
            Field::Company => {
                let next = wrap(self.company, self.companies.len(), delta);
                if next != self.company {
                    self.company = next;
                    // The model list depends on the company.
                    self.models = models_of(catalog, &self.companies[next]);
                    self.model = 0;
                }
            }
            Field::Model => self.model = wrap(self.model, self.models.len(), delta),
            Field::Year => self.year = wrap(self.year, self.years.len(), delta),
            Field::Fuel => self.fuel = wrap(self.fuel, self.fuel_types.len(), delta),
            Field::Kms => {
                let next = self.kms.saturating_add(KMS_STEP * i64::from(delta));
                self.kms = if delta < 0 { next.max(0) } else { next };
            }
            Field::Submit => {}
        }
    }

    /// Display value for a field.
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Company => self.companies.get(self.company).cloned().unwrap_or_default(),
            Field::Model => self.models.get(self.model).cloned().unwrap_or_default(),
            Field::Year => self
                .years
                .get(self.year)
                .map(i32::to_string)
                .unwrap_or_default(),
            Field::Kms => self.kms.to_string(),
            Field::Fuel => self.fuel_types.get(self.fuel).cloned().unwrap_or_default(),
            Field::Submit => String::new(),
        }
    }

    /// The current submission, or `None` if a choice list is empty.
    pub fn input(&self) -> Option<FormInput> {
        Some(FormInput {
            company: self.companies.get(self.company)?.clone(),
            model_name: self.models.get(self.model)?.clone(),
            year: *self.years.get(self.year)?,
            kms_driven: self.kms,
            fuel_type: self.fuel_types.get(self.fuel)?.clone(),
        })
    }
}

fn models_of(catalog: &Catalog, company: &str) -> Vec<String> {
    catalog
        .models_for(company)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn wrap(cur: usize, len: usize, delta: i32) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (cur as i64 + i64::from(delta)).rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    #[test]
    fn starts_on_first_choices() {
        let form = FormState::new(&sample_catalog());
        let input = form.input().unwrap();
        assert_eq!(input.company, "Audi");
        assert_eq!(input.model_name, "A4");
        assert_eq!(input.year, 2019);
        assert_eq!(input.fuel_type, "Petrol");
        assert_eq!(input.kms_driven, 0);
    }

    #[test]
    fn changing_company_resets_model() {
        let catalog = sample_catalog();
        let mut form = FormState::new(&catalog);
        form.adjust(&catalog, 2);
        assert_eq!(form.value(Field::Company), "Maruti");
        assert_eq!(form.models, vec!["Alto", "Swift"]);

        form.selected = Field::Model;
        form.adjust(&catalog, 1);
        assert_eq!(form.value(Field::Model), "Swift");

        form.selected = Field::Company;
        form.adjust(&catalog, -1);
        assert_eq!(form.value(Field::Company), "Hyundai");
        assert_eq!(form.value(Field::Model), "Creta");
    }

    #[test]
    fn choices_wrap_around() {
        let catalog = sample_catalog();
        let mut form = FormState::new(&catalog);
        form.selected = Field::Year;
        form.adjust(&catalog, -1);
        assert_eq!(form.value(Field::Year), "2010");
        form.adjust(&catalog, 1);
        assert_eq!(form.value(Field::Year), "2019");
    }

    #[test]
    fn kms_steps_do_not_go_below_zero() {
        let catalog = sample_catalog();
        let mut form = FormState::new(&catalog);
        form.selected = Field::Kms;
        form.adjust(&catalog, 1);
        form.adjust(&catalog, 1);
        assert_eq!(form.kms, 1000);
        form.adjust(&catalog, -1);
        form.adjust(&catalog, -1);
        form.adjust(&catalog, -1);
        assert_eq!(form.kms, 0);
    }

    #[test]
    fn selection_stops_at_the_ends() {
        let mut form = FormState::new(&sample_catalog());
        form.select_prev();
        assert_eq!(form.selected, Field::Company);
        for _ in 0..10 {
            form.select_next();
        }
        assert_eq!(form.selected, Field::Submit);
    }

    #[test]
    fn empty_catalog_has_no_input() {
        let form = FormState::new(&Catalog::default());
        assert!(form.input().is_none());
    }
}
