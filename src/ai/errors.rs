//! Analysis failure categories.
//!
//! Providers do not share a structured error contract, so failures are
//! classified by matching known markers in the lowercased raw message. This is
//! best-effort: a message can land in the wrong bucket if a provider words it
//! unexpectedly (an HTTP 400 saying "invalid argument" is reported as a
//! credential problem, for example). All of that guessing lives in
//! [`AnalysisError::classify`].

use crate::error::{AppError, EXIT_CONFIG, EXIT_RUNTIME};

const CREDENTIAL_MARKERS: [&str; 4] = ["401", "unauthorized", "api key", "invalid"];
const QUOTA_MARKERS: [&str; 3] = ["429", "rate limit", "quota"];
const NETWORK_MARKERS: [&str; 2] = ["network", "fetch"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Missing, invalid or expired API key.
    Credential(String),
    /// Rate limit or exhausted quota.
    Quota(String),
    /// The request never got a response.
    Network(String),
    Unclassified(String),
}

impl AnalysisError {
    /// Map a raw failure message to a category. Markers are checked in order:
    /// credential, quota, network.
    pub fn classify(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        let has = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

        let message = raw.to_string();
        if has(&CREDENTIAL_MARKERS[..]) {
            AnalysisError::Credential(message)
        } else if has(&QUOTA_MARKERS[..]) {
            AnalysisError::Quota(message)
        } else if has(&NETWORK_MARKERS[..]) {
            AnalysisError::Network(message)
        } else {
            AnalysisError::Unclassified(message)
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisError::Credential(_) => "API key invalid or expired",
            AnalysisError::Quota(_) => "API quota exhausted",
            AnalysisError::Network(_) => "Network connection failed",
            AnalysisError::Unclassified(_) => "Analysis failed",
        }
    }

    /// The raw message the category was derived from.
    pub fn message(&self) -> &str {
        match self {
            AnalysisError::Credential(m)
            | AnalysisError::Quota(m)
            | AnalysisError::Network(m)
            | AnalysisError::Unclassified(m) => m,
        }
    }

    pub fn is_credential(&self) -> bool {
        matches!(self, AnalysisError::Credential(_))
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.message())
    }
}

impl std::error::Error for AnalysisError {}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let code = if err.is_credential() { EXIT_CONFIG } else { EXIT_RUNTIME };
        AppError::new(code, err.to_string())
    }
}
