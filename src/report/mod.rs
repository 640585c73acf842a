//! Reporting utilities: currency formatting and rendered messages.

pub mod format;

pub use format::*;
