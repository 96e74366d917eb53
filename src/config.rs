//! Configuration parameters for rhythm extraction

use serde::{Deserialize, Serialize};

use crate::engine::BeatTrackerMethod;
use crate::error::AnalysisError;
use crate::features::tempo::aggregate::BpmPolicy;
use crate::features::tempo::histogram::{HistogramConfig, MAX_BINS};

/// Default lower bound of the engine's tempo search range (BPM)
pub const DEFAULT_MIN_TEMPO: u32 = 40;

/// Default upper bound of the engine's tempo search range (BPM)
pub const DEFAULT_MAX_TEMPO: u32 = 208;

/// Default absolute tolerance around the candidate tempo (BPM)
pub const DEFAULT_TOLERANCE_BPM: f64 = 5.0;

/// Rhythm extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoConfig {
    // Engine
    /// Minimum tempo searched by the beat tracker (default: 40)
    ///
    /// Only forwarded to the engine; the tempo estimation core does not
    /// re-apply it.
    pub min_tempo: u32,

    /// Maximum tempo searched by the beat tracker (default: 208)
    pub max_tempo: u32,

    /// Beat tracker variant (default: MultiFeature)
    pub method: BeatTrackerMethod,

    // Tempo estimation
    /// Aggregation policy for the final BPM (default: CorrectedMean)
    pub policy: BpmPolicy,

    /// Absolute tolerance in BPM around the candidate tempo (default: 5.0)
    /// Estimates further away than this are discarded before averaging
    pub tolerance_bpm: f64,

    /// Histogram layout used for octave disambiguation
    pub histogram: HistogramConfig,
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            min_tempo: DEFAULT_MIN_TEMPO,
            max_tempo: DEFAULT_MAX_TEMPO,
            method: BeatTrackerMethod::MultiFeature,
            policy: BpmPolicy::CorrectedMean,
            tolerance_bpm: DEFAULT_TOLERANCE_BPM,
            histogram: HistogramConfig::default(),
        }
    }
}

impl TempoConfig {
    /// Check the engine search range and the estimation parameters
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if `min_tempo` is zero or not
    /// strictly below `max_tempo`, if `tolerance_bpm` is not a finite positive
    /// value, or if the histogram layout is degenerate (non-finite bounds,
    /// non-positive width, empty range, or more than `MAX_BINS` bins).
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.min_tempo == 0 || self.min_tempo >= self.max_tempo {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid tempo range: min_tempo={} max_tempo={}",
                self.min_tempo, self.max_tempo
            )));
        }
        if !self.tolerance_bpm.is_finite() || self.tolerance_bpm <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid tolerance: {} BPM",
                self.tolerance_bpm
            )));
        }
        if !self.histogram.is_valid() {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid histogram layout: bin_width={} min_bpm={} max_bpm={} (at most {} bins)",
                self.histogram.bin_width, self.histogram.min_bpm, self.histogram.max_bpm, MAX_BINS
            )));
        }
        Ok(())
    }
}
