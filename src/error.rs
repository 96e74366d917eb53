//! Error types for rhythm extraction

use std::fmt;

/// Errors that can occur at the beat-tracking engine boundary
///
/// The tempo estimation core never fails: malformed tick sequences degrade to
/// a zero or fallback result. Only calls that reach the external engine return
/// an error, so a failure is never confused with "no beats found".
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters (sample rate, tempo range, method name, ...)
    InvalidInput(String),

    /// The external beat-tracking engine failed internally
    EngineFailure(String),
}

impl AnalysisError {
    /// True if this error originated inside the external engine
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, AnalysisError::EngineFailure(_))
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::EngineFailure(msg) => write!(f, "Engine failure: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}
