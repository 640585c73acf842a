//! Domain types shared by the catalog, the estimator, and the front-ends.
//!
//! This module defines:
//!
//! - the typed estimator input (`CarRecord`)
//! - the raw form submission (`FormInput`) and its result (`Outcome`)
//! - resolved artifact locations (`RunPaths`)

pub mod types;

pub use types::*;
