//! `car-price` library crate.
//!
//! The binary (`carprice`) is a thin wrapper around this library so that:
//!
//! - catalog, estimator and submission logic are testable without a terminal
//! - the form and the one-shot CLI share the same pipeline

pub mod app;
pub mod catalog;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;
