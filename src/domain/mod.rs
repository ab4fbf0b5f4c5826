//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - observations (`DataPoint`)
//! - the fitted line (`FitParameters`)
//! - derived fit quality (`Metrics`, `Residual`)

pub mod types;

pub use types::*;
