//! AI-assisted analysis of the current regression line.

pub mod client;
pub mod errors;
pub mod jobs;
pub mod prompt;
pub mod provider;

pub use client::{AnalysisClient, AnalysisRequest, AnalysisService};
pub use errors::AnalysisError;
pub use jobs::{AnalysisJobs, AnalysisOutcome};
pub use provider::{ModelId, Provider, validate_api_key};
