//! Formatted output for the form and the CLI.
//!
//! Formatting lives in one place so the estimator and catalog stay free of
//! presentation concerns, and so both front-ends render identical text.

use crate::catalog::Catalog;
use crate::domain::Outcome;
use crate::error::PriceError;

/// Indian Rupee sign.
pub const INR_SYMBOL: char = '₹';

/// Round an amount to whole paise, half to even (`123456.125` -> `12345612`).
///
/// This is the only place a price is rounded.
pub fn to_paise(value: f64) -> Result<i128, PriceError> {
    if !value.is_finite() {
        return Err(PriceError::PredictionError(format!(
            "Cannot format non-finite price {value}."
        )));
    }

    let paise = (value * 100.0).round_ties_even();
    if paise.abs() >= i128::MAX as f64 {
        return Err(PriceError::PredictionError(format!(
            "Price {value} is out of range."
        )));
    }
    Ok(paise as i128)
}

/// Format an amount as Indian Rupees with Indian digit grouping.
///
/// `123456.784` -> `₹1,23,456.78`, `-1500` -> `-₹1,500.00`.
pub fn format_inr(value: f64) -> Result<String, PriceError> {
    to_paise(value).map(format_paise)
}

/// Format an exact paise amount: `12345678` -> `₹1,23,456.78`.
pub fn format_paise(paise: i128) -> String {
    let sign = if paise < 0 { "-" } else { "" };
    let paise = paise.unsigned_abs();
    let rupees = group_indian(&(paise / 100).to_string());

    format!("{sign}{INR_SYMBOL}{rupees}.{:02}", paise % 100)
}

/// Group a run of ASCII digits the Indian way: `12345678` -> `1,23,45,678`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last3) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{last3}", groups.join(","))
}

/// The single message shown for a submission.
pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Estimate { price, formatted } if *price < 0.0 => format!(
            "Estimated Car Price: {formatted} (the model extrapolated below zero for this car)"
        ),
        Outcome::Estimate { formatted, .. } => format!("Estimated Car Price: {formatted}"),
        Outcome::Warning(message) | Outcome::Error(message) => message.clone(),
    }
}

/// Plain-text listing of the catalog choices for the `catalog` command.
pub fn format_catalog(catalog: &Catalog, company: Option<&str>) -> String {
    let mut out = String::new();

    let companies = catalog.companies();
    out.push_str(&format!("Companies ({}):\n", companies.len()));
    for c in &companies {
        out.push_str(&format!("  {c}\n"));
    }

    let years: Vec<String> = catalog.years().iter().map(i32::to_string).collect();
    out.push_str(&format!("Years: {}\n", years.join(", ")));
    out.push_str(&format!("Fuel types: {}\n", catalog.fuel_types().join(", ")));

    if let Some(company) = company {
        let models = catalog.models_for(company);
        if models.is_empty() {
            out.push_str(&format!("No models known for '{company}'.\n"));
        } else {
            out.push_str(&format!("Models for {company} ({}):\n", models.len()));
            for m in models {
                out.push_str(&format!("  {m}\n"));
            }
        }
    }

    out
}
