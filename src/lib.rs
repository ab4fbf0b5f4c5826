//! `regression-lab` library crate.
//!
//! The binary (`reglab`) is a thin wrapper around this library so that:
//!
//! - the statistics core is testable without spawning processes
//! - the CLI and the terminal lab share one state controller
//! - the AI integration stays behind a trait that tests can fake

pub mod ai;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
pub mod settings;
pub mod tui;
