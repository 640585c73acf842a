//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - loads the model artifact and reference table (fatal on failure)
//! - hands the loaded session to the form or runs a one-shot command

use clap::Parser;

use crate::cli::{CatalogArgs, Command, PredictArgs};
use crate::domain::{Outcome, RunPaths};
use crate::error::AppError;
use crate::logging::{LogTarget, init_tracing};

pub mod pipeline;

/// Global flags that take a separate value (`--data cars.csv`).
const GLOBAL_VALUE_FLAGS: [&str; 3] = ["--model", "--data", "--log-file"];

/// Entry point for the `carprice` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `carprice` and `carprice --model X` behave like `carprice tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let interactive = matches!(cli.command, Command::Tui);
    init_tracing(&LogTarget::resolve(cli.artifacts.log_file.as_deref(), interactive))?;

    let paths = cli.artifacts.paths();
    match cli.command {
        Command::Tui => handle_tui(&paths),
        Command::Predict(args) => handle_predict(&paths, &args),
        Command::Catalog(args) => handle_catalog(&paths, &args),
    }
}

fn handle_tui(paths: &RunPaths) -> Result<(), AppError> {
    // Load before touching the terminal so a fatal error is a plain message.
    let session = pipeline::startup(paths)?;
    crate::tui::run(&session)
}

fn handle_predict(paths: &RunPaths, args: &PredictArgs) -> Result<(), AppError> {
    let session = pipeline::startup(paths)?;
    let outcome = session.submit(&args.to_input());
    let message = crate::report::render_outcome(&outcome);

    match outcome {
        Outcome::Estimate { .. } => {
            println!("{message}");
            Ok(())
        }
        Outcome::Warning(_) => Err(AppError::new(3, message)),
        Outcome::Error(_) => Err(AppError::new(4, message)),
    }
}

fn handle_catalog(paths: &RunPaths, args: &CatalogArgs) -> Result<(), AppError> {
    let catalog = crate::catalog::Catalog::load(&paths.data)?;
    print!(
        "{}",
        crate::report::format_catalog(&catalog, args.company.as_deref())
    );
    Ok(())
}

/// Rewrite argv so `carprice` defaults to `carprice tui`.
///
/// Rules:
/// - `carprice`                      -> `carprice tui`
/// - `carprice --model M.json ...`   -> `carprice tui --model M.json ...`
/// - `carprice --help/--version/-h`  -> unchanged (show top-level help/version)
/// - any explicit subcommand         -> unchanged
///
/// Only the first token that is neither a flag nor a flag's value can name a
/// subcommand, so `--data catalog` is a file called `catalog`.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version");
    if is_top_level_help_or_version {
        return argv;
    }

    if first_positional(&argv[1..]).is_some() {
        // Either a subcommand or something clap should reject itself.
        return argv;
    }

    // Only global flags were given; treat them as form flags.
    argv.insert(1, "tui".to_string());
    argv
}

/// First argument that is not a global flag or the value of one.
fn first_positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if GLOBAL_VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return Some(arg.as_str());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_form() {
        assert_eq!(rewrite_args(args(&["carprice"])), args(&["carprice", "tui"]));
    }

    #[test]
    fn global_flags_alone_open_form() {
        assert_eq!(
            rewrite_args(args(&["carprice", "--model", "m.json"])),
            args(&["carprice", "tui", "--model", "m.json"])
        );
    }

    #[test]
    fn flag_values_named_like_subcommands_open_form() {
        assert_eq!(
            rewrite_args(args(&["carprice", "--data", "catalog"])),
            args(&["carprice", "tui", "--data", "catalog"])
        );
        assert_eq!(
            rewrite_args(args(&["carprice", "--model=predict", "--log-file", "tui"])),
            args(&["carprice", "tui", "--model=predict", "--log-file", "tui"])
        );
        assert_eq!(
            rewrite_args(args(&["carprice", "--data", "catalog", "predict"])),
            args(&["carprice", "--data", "catalog", "predict"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_are_untouched() {
        let predict = args(&["carprice", "--data", "d.csv", "predict", "--kms", "5"]);
        assert_eq!(rewrite_args(predict.clone()), predict);
        assert_eq!(rewrite_args(args(&["carprice", "--help"])), args(&["carprice", "--help"]));
        assert_eq!(rewrite_args(args(&["carprice", "catalog"])), args(&["carprice", "catalog"]));
    }

    #[test]
    fn predict_rejects_negative_kms_with_exit_code_3() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("LinearModel.json");
        serde_json::to_writer(
            std::fs::File::create(&model).unwrap(),
            &crate::models::model::tests::sample_file(),
        )
        .unwrap();
        let data = dir.path().join("cleaned_car_data.csv");
        std::fs::write(&data, "name,company,year,fuel_type\nSwift,Maruti,2015,Petrol\n").unwrap();
        let paths = RunPaths { model, data };

        let predict = PredictArgs {
            company: "Maruti".to_string(),
            model_name: "Swift".to_string(),
            year: 2015,
            kms: -1,
            fuel: "Petrol".to_string(),
        };
        let err = handle_predict(&paths, &predict).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.message(), "Please enter a valid number of kilometers.");

        let ok = PredictArgs { kms: 30_000, ..predict };
        assert!(handle_predict(&paths, &ok).is_ok());
    }

    #[test]
    fn predict_without_model_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunPaths {
            model: dir.path().join("LinearModel.json"),
            data: dir.path().join("cleaned_car_data.csv"),
        };
        let predict = PredictArgs {
            company: "Maruti".to_string(),
            model_name: "Swift".to_string(),
            year: 2015,
            kms: 10,
            fuel: "Petrol".to_string(),
        };
        let err = handle_predict(&paths, &predict).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().starts_with("Model or data files not found."));
    }
}
