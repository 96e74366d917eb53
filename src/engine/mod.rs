//! Beat-tracking engine boundary
//!
//! The signal-processing beat tracker lives outside this crate. This module
//! defines the contract it must satisfy ([`BeatTracker`]), the closed set of
//! tracker variants ([`BeatTrackerMethod`]) and the one-time initialization
//! guard ([`EngineContext`]).

pub mod scripted;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::analysis::result::OnsetRate;
use crate::error::AnalysisError;

/// Sample rate the engine accepts, in Hz
pub const REQUIRED_SAMPLE_RATE: u32 = 44100;

/// Beat tracker variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeatTrackerMethod {
    /// Multi-feature tracker; reports a confidence in roughly [0, 5.32]
    #[default]
    MultiFeature,
    /// Degara tracker; no confidence output (always 0)
    Degara,
}

impl BeatTrackerMethod {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            BeatTrackerMethod::MultiFeature => "multifeature",
            BeatTrackerMethod::Degara => "degara",
        }
    }

    /// Whether this variant produces a confidence score
    pub fn yields_confidence(&self) -> bool {
        matches!(self, BeatTrackerMethod::MultiFeature)
    }
}

impl fmt::Display for BeatTrackerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeatTrackerMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multifeature" => Ok(BeatTrackerMethod::MultiFeature),
            "degara" => Ok(BeatTrackerMethod::Degara),
            other => Err(AnalysisError::InvalidInput(format!(
                "Unknown beat tracker method: {:?} (expected \"multifeature\" or \"degara\")",
                other
            ))),
        }
    }
}

/// Parameters forwarded to the beat tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRequest {
    /// Sample rate of the input in Hz
    pub sample_rate: u32,

    /// Minimum tempo to search (BPM)
    pub min_tempo: u32,

    /// Maximum tempo to search (BPM)
    pub max_tempo: u32,

    /// Tracker variant
    pub method: BeatTrackerMethod,
}

/// Raw beat tracker output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeatTrackerOutput {
    /// Beat times in seconds, in detection order
    pub ticks: Vec<f64>,

    /// Tracker confidence, if the variant reports one
    pub confidence: Option<f64>,
}

/// External beat-tracking engine
///
/// Implementations wrap the signal-processing tracker. Any internal failure
/// must come back as `AnalysisError::EngineFailure`, never as an empty output.
pub trait BeatTracker: Send + Sync {
    /// Process-wide engine setup, called at most once per [`EngineContext`]
    fn initialize(&self) -> Result<(), AnalysisError>;

    /// Track beats in mono samples
    fn track_beats(
        &self,
        samples: &[f32],
        request: &TrackingRequest,
    ) -> Result<BeatTrackerOutput, AnalysisError>;

    /// Detect onsets and the overall onset rate
    fn detect_onsets(&self, samples: &[f32], sample_rate: u32) -> Result<OnsetRate, AnalysisError>;
}

/// Beat tracker with lazy, thread-safe one-time initialization
///
/// Create one per process (e.g. in a `once_cell::sync::Lazy` static) and pass
/// it to every call. Concurrent first use runs `initialize` exactly once; a
/// failed initialization is returned as an error and retried on the next call.
pub struct EngineContext<T: BeatTracker> {
    tracker: T,
    initialized: OnceCell<()>,
}

impl<T: BeatTracker> EngineContext<T> {
    /// Wrap a tracker; nothing is initialized until first use
    pub fn new(tracker: T) -> Self {
        Self {
            tracker,
            initialized: OnceCell::new(),
        }
    }

    /// True once initialization has succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized.get().is_some()
    }

    /// Borrow the wrapped tracker
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Run engine setup if it has not succeeded yet and return the tracker
    pub fn ensure_initialized(&self) -> Result<&T, AnalysisError> {
        self.initialized
            .get_or_try_init(|| {
                log::debug!("Initializing beat tracking engine");
                self.tracker.initialize().map_err(|e| {
                    log::warn!("Beat tracking engine initialization failed: {}", e);
                    if e.is_engine_failure() {
                        e
                    } else {
                        AnalysisError::EngineFailure(e.to_string())
                    }
                })
            })
            .map(|_| &self.tracker)
    }

    /// Track beats, initializing the engine on first use
    ///
    /// # Errors
    ///
    /// `InvalidInput` for empty samples or an unsupported sample rate,
    /// `EngineFailure` if the engine fails.
    pub fn track_beats(
        &self,
        samples: &[f32],
        request: &TrackingRequest,
    ) -> Result<BeatTrackerOutput, AnalysisError> {
        validate_samples(samples, request.sample_rate)?;
        let tracker = self.ensure_initialized()?;

        let mut output = tracker.track_beats(samples, request).map_err(|e| {
            log::warn!("Beat tracking ({}) failed: {}", request.method, e);
            e
        })?;

        if !request.method.yields_confidence() {
            output.confidence = None;
        }

        log::debug!(
            "Beat tracker ({}) returned {} ticks",
            request.method,
            output.ticks.len()
        );
        Ok(output)
    }

    /// Detect onsets, initializing the engine on first use
    pub fn detect_onsets(&self, samples: &[f32], sample_rate: u32) -> Result<OnsetRate, AnalysisError> {
        validate_samples(samples, sample_rate)?;
        let tracker = self.ensure_initialized()?;
        tracker.detect_onsets(samples, sample_rate).map_err(|e| {
            log::warn!("Onset detection failed: {}", e);
            e
        })
    }
}

fn validate_samples(samples: &[f32], sample_rate: u32) -> Result<(), AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput("Empty audio samples".to_string()));
    }
    if sample_rate != REQUIRED_SAMPLE_RATE {
        return Err(AnalysisError::InvalidInput(format!(
            "Expected sample_rate={}, got {}",
            REQUIRED_SAMPLE_RATE, sample_rate
        )));
    }
    Ok(())
}
