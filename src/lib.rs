//! # Rhythm Extractor
//!
//! Robust tempo estimation from the beat ticks of an external beat tracker.
//!
//! ## Features
//!
//! - **Interval extraction**: ticks to inter-beat intervals and per-interval BPM
//! - **Octave correction**: histogram of halved estimates to undo double/half tempo locks
//! - **Outlier filtering**: absolute tolerance band around the candidate tempo
//! - **Engine boundary**: pluggable [`BeatTracker`] with one-time initialization
//!   and explicit failure reporting
//!
//! ## Quick Start
//!
//! ```
//! use rhythm_extractor::{estimate_tempo, TempoConfig};
//!
//! // Ticks from a beat tracker, in seconds
//! let ticks = vec![0.5, 1.0, 1.5, 2.0];
//!
//! let estimate = estimate_tempo(&ticks, 3.1, &TempoConfig::default());
//!
//! assert_eq!(estimate.bpm, 120.0);
//! assert_eq!(estimate.confidence, 3.1);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Ticks → Intervals → Halved-BPM Histogram → Candidate → Tolerance Filter → Mean
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;

// Re-export main types
pub use analysis::result::{OnsetRate, TempoEstimate};
pub use config::TempoConfig;
pub use engine::{BeatTracker, BeatTrackerMethod, EngineContext, TrackingRequest};
pub use error::AnalysisError;
pub use features::tempo::aggregate::BpmPolicy;

use features::tempo::aggregate::aggregate_bpm;
use features::tempo::intervals::extract_intervals;

/// Estimate tempo from a beat tick sequence
///
/// Pure function of its inputs: no I/O, no shared state, safe to call from
/// many threads at once.
///
/// # Arguments
///
/// * `ticks` - Beat times in seconds, expected non-decreasing
/// * `confidence` - Tracker confidence, forwarded unchanged
/// * `config` - Aggregation policy, tolerance and histogram layout
///
/// # Returns
///
/// `TempoEstimate` with `bpm = 0.0` when fewer than two usable ticks exist.
/// Never fails.
///
/// # Example
///
/// ```
/// use rhythm_extractor::{estimate_tempo, BpmPolicy, TempoConfig};
///
/// // Tracker alternates between 60 BPM and the doubled 120 BPM
/// let ticks = vec![0.0, 1.0, 1.5, 2.5, 3.0, 4.0, 4.5];
///
/// let corrected = estimate_tempo(&ticks, 0.0, &TempoConfig::default());
/// assert_eq!(corrected.bpm, 60.0);
///
/// let plain = TempoConfig { policy: BpmPolicy::PlainMean, ..TempoConfig::default() };
/// assert_eq!(estimate_tempo(&ticks, 0.0, &plain).bpm, 90.0);
/// ```
pub fn estimate_tempo(ticks: &[f64], confidence: f64, config: &TempoConfig) -> TempoEstimate {
    log::debug!(
        "Estimating tempo from {} ticks ({:?})",
        ticks.len(),
        config.policy
    );

    let intervals = extract_intervals(ticks);
    if intervals.is_empty() {
        log::debug!("No usable intervals, reporting 0 BPM");
        return TempoEstimate::empty(ticks.to_vec(), confidence);
    }

    let aggregate = aggregate_bpm(
        &intervals.bpm_estimates,
        config.policy,
        config.tolerance_bpm,
        &config.histogram,
    );

    log::debug!(
        "Estimated {:.2} BPM from {} of {} intervals",
        aggregate.bpm,
        aggregate.bpm_estimates.len(),
        intervals.len()
    );

    TempoEstimate {
        bpm: aggregate.bpm,
        confidence,
        ticks: ticks.to_vec(),
        bpm_estimates: aggregate.bpm_estimates,
        intervals: intervals.intervals,
        candidate_bpm: aggregate.candidate.map(|c| c.bpm),
    }
}

/// Track beats in audio and estimate its tempo
///
/// Runs the external tracker through `engine` (initializing it on first use)
/// and feeds its ticks to [`estimate_tempo`].
///
/// # Arguments
///
/// * `engine` - Initialization-guarded beat tracker
/// * `samples` - Mono audio samples
/// * `sample_rate` - Must be [`engine::REQUIRED_SAMPLE_RATE`]
/// * `config` - Tracker range/method and tempo estimation parameters
///
/// # Errors
///
/// `InvalidInput` for bad samples, sample rate or tempo range;
/// `EngineFailure` if the tracker fails. A track where the tracker finds no
/// beats is `Ok` with `bpm = 0.0`.
///
/// # Example
///
/// ```
/// use rhythm_extractor::engine::scripted::ScriptedTracker;
/// use rhythm_extractor::{extract_rhythm, EngineContext, TempoConfig};
///
/// let engine = EngineContext::new(ScriptedTracker::with_ticks(vec![0.5, 1.0, 1.5], Some(4.0)));
/// let samples = vec![0.0f32; 44100];
///
/// let estimate = extract_rhythm(&engine, &samples, 44100, &TempoConfig::default())?;
/// assert_eq!(estimate.bpm, 120.0);
/// assert_eq!(estimate.confidence, 4.0);
/// # Ok::<(), rhythm_extractor::AnalysisError>(())
/// ```
pub fn extract_rhythm<T: BeatTracker>(
    engine: &EngineContext<T>,
    samples: &[f32],
    sample_rate: u32,
    config: &TempoConfig,
) -> Result<TempoEstimate, AnalysisError> {
    config.validate()?;

    let request = TrackingRequest {
        sample_rate,
        min_tempo: config.min_tempo,
        max_tempo: config.max_tempo,
        method: config.method,
    };

    log::debug!(
        "Tracking beats: {} samples at {} Hz, {}-{} BPM, method={}",
        samples.len(),
        sample_rate,
        request.min_tempo,
        request.max_tempo,
        request.method
    );

    let output = engine.track_beats(samples, &request)?;
    let confidence = output.confidence.unwrap_or(0.0);

    Ok(estimate_tempo(&output.ticks, confidence, config))
}

/// Detect onsets in audio through the external engine
///
/// # Errors
///
/// Same as [`extract_rhythm`].
pub fn detect_onsets<T: BeatTracker>(
    engine: &EngineContext<T>,
    samples: &[f32],
    sample_rate: u32,
) -> Result<OnsetRate, AnalysisError> {
    let onsets = engine.detect_onsets(samples, sample_rate)?;
    log::debug!(
        "Detected {} onsets ({:.2}/s)",
        onsets.onsets.len(),
        onsets.onset_rate
    );
    Ok(onsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scripted::ScriptedTracker;

    #[test]
    fn test_estimate_tempo_too_few_ticks() {
        for policy in [BpmPolicy::PlainMean, BpmPolicy::CorrectedMean] {
            let config = TempoConfig {
                policy,
                ..TempoConfig::default()
            };
            let estimate = estimate_tempo(&[3.0], 1.7, &config);
            assert_eq!(estimate.bpm, 0.0);
            assert_eq!(estimate.confidence, 1.7);
            assert!(estimate.intervals.is_empty());
            assert!(estimate.bpm_estimates.is_empty());
        }
    }

    #[test]
    fn test_extract_rhythm_forwards_range_and_method() {
        let engine = EngineContext::new(ScriptedTracker::with_ticks(vec![0.5, 1.0], Some(2.0)));
        let config = TempoConfig {
            min_tempo: 60,
            max_tempo: 180,
            method: BeatTrackerMethod::Degara,
            ..TempoConfig::default()
        };

        let estimate = extract_rhythm(&engine, &[0.1; 64], 44100, &config).unwrap();
        assert_eq!(estimate.confidence, 0.0);
        assert_eq!(estimate.bpm, 120.0);

        let request = engine.tracker().last_request().unwrap();
        assert_eq!(request.min_tempo, 60);
        assert_eq!(request.max_tempo, 180);
        assert_eq!(request.method, BeatTrackerMethod::Degara);
    }

    #[test]
    fn test_extract_rhythm_rejects_bad_range() {
        let engine = EngineContext::new(ScriptedTracker::with_ticks(vec![0.5, 1.0], None));
        let config = TempoConfig {
            min_tempo: 200,
            max_tempo: 100,
            ..TempoConfig::default()
        };
        let err = extract_rhythm(&engine, &[0.1; 64], 44100, &config).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
        assert_eq!(engine.tracker().init_calls(), 0);
    }
}
