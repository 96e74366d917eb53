//! Rhythm extraction result types

use serde::{Deserialize, Serialize};

/// Final tempo estimate for one tick sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoEstimate {
    /// Tempo in BPM (0.0 when no usable interval was found)
    pub bpm: f64,

    /// Engine confidence, forwarded unchanged
    ///
    /// Roughly [0, 5.32] for the multifeature tracker, always 0 for Degara.
    pub confidence: f64,

    /// Beat times in seconds, as delivered by the tracker
    pub ticks: Vec<f64>,

    /// Per-interval BPM estimates that entered the final mean
    pub bpm_estimates: Vec<f64>,

    /// Inter-beat intervals in seconds
    #[serde(rename = "bpm_intervals")]
    pub intervals: Vec<f64>,

    /// Histogram candidate tempo, when octave correction ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_bpm: Option<f64>,
}

impl TempoEstimate {
    /// Result for a sequence with no usable interval
    pub fn empty(ticks: Vec<f64>, confidence: f64) -> Self {
        Self {
            bpm: 0.0,
            confidence,
            ticks,
            bpm_estimates: Vec::new(),
            intervals: Vec::new(),
            candidate_bpm: None,
        }
    }

    /// True if a tempo was found
    pub fn has_tempo(&self) -> bool {
        self.bpm > 0.0
    }

    /// Mean beat period in seconds implied by `bpm`
    pub fn beat_period(&self) -> Option<f64> {
        self.has_tempo().then(|| 60.0 / self.bpm)
    }
}

/// Onset detection result, passed through from the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnsetRate {
    /// Onsets per second over the whole input
    pub onset_rate: f64,

    /// Onset times in seconds
    pub onsets: Vec<f64>,
}
