//! Input helpers for the two startup artifacts.
//!
//! - reference CSV ingest + validation (`ingest`)
//! - model artifact JSON (`artifact`)

pub mod artifact;
pub mod ingest;

pub use artifact::*;
pub use ingest::*;
