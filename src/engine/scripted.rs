//! Scripted beat tracker
//!
//! Replays a fixed tick sequence (or a fixed failure) instead of analyzing
//! audio. Useful for exercising the extraction pipeline without a native
//! engine, and for reproducing tracker output captured elsewhere.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{BeatTracker, BeatTrackerOutput, TrackingRequest};
use crate::analysis::result::OnsetRate;
use crate::error::AnalysisError;

/// Beat tracker that returns pre-recorded results
#[derive(Debug, Default)]
pub struct ScriptedTracker {
    output: BeatTrackerOutput,
    onsets: OnsetRate,
    failure: Option<String>,
    init_failures: AtomicUsize,
    init_calls: AtomicUsize,
    last_request: Mutex<Option<TrackingRequest>>,
}

impl ScriptedTracker {
    /// Tracker that always reports `ticks` and `confidence`
    pub fn with_ticks(ticks: Vec<f64>, confidence: Option<f64>) -> Self {
        Self {
            output: BeatTrackerOutput { ticks, confidence },
            ..Self::default()
        }
    }

    /// Tracker whose every analysis call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Report these onsets from `detect_onsets`
    pub fn with_onsets(mut self, onsets: OnsetRate) -> Self {
        self.onsets = onsets;
        self
    }

    /// Fail the first `count` initialization attempts
    pub fn failing_init(self, count: usize) -> Self {
        self.init_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Number of times `initialize` has been called
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    /// Most recent request passed to `track_beats`
    pub fn last_request(&self) -> Option<TrackingRequest> {
        self.last_request.lock().ok().and_then(|guard| *guard)
    }

    fn check_failure(&self) -> Result<(), AnalysisError> {
        match &self.failure {
            Some(message) => Err(AnalysisError::EngineFailure(message.clone())),
            None => Ok(()),
        }
    }
}

impl BeatTracker for ScriptedTracker {
    fn initialize(&self) -> Result<(), AnalysisError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.init_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.init_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(AnalysisError::EngineFailure(
                "scripted initialization failure".to_string(),
            ));
        }
        Ok(())
    }

    fn track_beats(
        &self,
        _samples: &[f32],
        request: &TrackingRequest,
    ) -> Result<BeatTrackerOutput, AnalysisError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(*request);
        }
        self.check_failure()?;
        Ok(self.output.clone())
    }

    fn detect_onsets(&self, _samples: &[f32], _sample_rate: u32) -> Result<OnsetRate, AnalysisError> {
        self.check_failure()?;
        Ok(self.onsets.clone())
    }
}
