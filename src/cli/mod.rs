//! Command-line parsing for the car price estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the catalog/estimator code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{FormInput, RunPaths};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "carprice", version, about = "Car Price Predictor")]
pub struct Cli {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive form.
    Tui,
    /// Estimate one car's price from flags and print the result.
    Predict(PredictArgs),
    /// Print the companies, years and fuel types known to the reference table.
    Catalog(CatalogArgs),
}

/// Startup artifact locations, shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct ArtifactArgs {
    /// Trained model artifact (JSON).
    #[arg(long, global = true, env = "CARPRICE_MODEL", default_value = "LinearModel.json")]
    pub model: PathBuf,

    /// Cleaned reference car table (CSV).
    #[arg(long, global = true, env = "CARPRICE_DATA", default_value = "cleaned_car_data.csv")]
    pub data: PathBuf,

    /// Write logs to this file (the form owns the terminal, so it logs nowhere otherwise).
    #[arg(long, global = true, env = "CARPRICE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl ArtifactArgs {
    pub fn paths(&self) -> RunPaths {
        RunPaths {
            model: self.model.clone(),
            data: self.data.clone(),
        }
    }
}

/// One car to price.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Car company (e.g. Maruti).
    #[arg(long)]
    pub company: String,

    /// Car model as listed in the reference table (e.g. "Maruti Suzuki Swift").
    #[arg(long = "model-name")]
    pub model_name: String,

    /// Year of purchase.
    #[arg(long)]
    pub year: i32,

    /// Kilometres driven.
    #[arg(long, allow_negative_numbers = true)]
    pub kms: i64,

    /// Fuel type (e.g. Petrol, Diesel, LPG).
    #[arg(long)]
    pub fuel: String,
}

impl PredictArgs {
    pub fn to_input(&self) -> FormInput {
        FormInput {
            company: self.company.clone(),
            model_name: self.model_name.clone(),
            year: self.year,
            kms_driven: self.kms,
            fuel_type: self.fuel.clone(),
        }
    }
}

/// Options for listing the catalog.
#[derive(Debug, Args, Clone)]
pub struct CatalogArgs {
    /// Also list the models known for this company.
    #[arg(long)]
    pub company: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_accepts_negative_kms() {
        let cli = Cli::try_parse_from([
            "carprice",
            "predict",
            "--company",
            "Maruti",
            "--model-name",
            "Maruti Suzuki Swift",
            "--year",
            "2015",
            "--kms",
            "-10",
            "--fuel",
            "Petrol",
        ])
        .unwrap();

        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.to_input().kms_driven, -10);
        assert_eq!(args.to_input().model_name, "Maruti Suzuki Swift");
    }

    #[test]
    fn artifact_flags_are_global() {
        let cli = Cli::try_parse_from(["carprice", "catalog", "--data", "cars.csv", "--company", "Tata"])
            .unwrap();
        assert_eq!(cli.artifacts.data, PathBuf::from("cars.csv"));
        assert!(matches!(cli.command, Command::Catalog(CatalogArgs { company: Some(ref c) }) if c == "Tata"));
    }
}
