//! Final BPM aggregation
//!
//! Two caller-selected policies:
//! - `PlainMean`: arithmetic mean of all raw estimates, no octave handling
//! - `CorrectedMean`: histogram candidate + tolerance filter, then mean

use serde::{Deserialize, Serialize};

use super::histogram::HistogramConfig;
use super::octave::find_candidate;
use super::tolerance::{filter_by_tolerance, filtered_mean_or_candidate};
use super::{mean, TempoCandidate};

/// Aggregation policy for the final BPM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BpmPolicy {
    /// Mean of every raw estimate; fast but exposed to octave errors
    PlainMean,
    /// Octave-corrected, outlier-filtered mean
    #[default]
    CorrectedMean,
}

/// Aggregated BPM with the estimates that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct BpmAggregate {
    /// Final tempo in BPM (0.0 when there were no estimates)
    pub bpm: f64,

    /// Estimates that entered the mean
    pub bpm_estimates: Vec<f64>,

    /// Histogram candidate (corrected policy only)
    pub candidate: Option<TempoCandidate>,
}

impl BpmAggregate {
    fn empty() -> Self {
        Self {
            bpm: 0.0,
            bpm_estimates: Vec::new(),
            candidate: None,
        }
    }
}

/// Aggregate raw per-interval estimates into one BPM
///
/// # Arguments
///
/// * `bpm_estimates` - Raw per-interval estimates
/// * `policy` - Aggregation policy
/// * `tolerance_bpm` - Filter tolerance (corrected policy only)
/// * `histogram` - Histogram layout (corrected policy only)
///
/// # Returns
///
/// Never fails: no estimates gives 0 BPM, an empty filter gives the candidate.
pub fn aggregate_bpm(
    bpm_estimates: &[f64],
    policy: BpmPolicy,
    tolerance_bpm: f64,
    histogram: &HistogramConfig,
) -> BpmAggregate {
    if bpm_estimates.is_empty() {
        return BpmAggregate::empty();
    }

    match policy {
        BpmPolicy::PlainMean => plain_mean(bpm_estimates),
        BpmPolicy::CorrectedMean => match find_candidate(bpm_estimates, histogram) {
            Some(candidate) => {
                let filtered = filter_by_tolerance(bpm_estimates, candidate.bpm, tolerance_bpm);
                log::debug!(
                    "Kept {} of {} estimates within {:.1} BPM of candidate",
                    filtered.len(),
                    bpm_estimates.len(),
                    tolerance_bpm
                );
                BpmAggregate {
                    bpm: filtered_mean_or_candidate(&filtered, candidate.bpm),
                    bpm_estimates: filtered,
                    candidate: Some(candidate),
                }
            }
            None => {
                log::warn!(
                    "No estimate inside histogram range, falling back to plain mean of {} estimates",
                    bpm_estimates.len()
                );
                plain_mean(bpm_estimates)
            }
        },
    }
}

fn plain_mean(bpm_estimates: &[f64]) -> BpmAggregate {
    BpmAggregate {
        bpm: mean(bpm_estimates).unwrap_or(0.0),
        bpm_estimates: bpm_estimates.to_vec(),
        candidate: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(estimates: &[f64], policy: BpmPolicy) -> BpmAggregate {
        aggregate_bpm(estimates, policy, 5.0, &HistogramConfig::default())
    }

    #[test]
    fn test_empty_estimates() {
        for policy in [BpmPolicy::PlainMean, BpmPolicy::CorrectedMean] {
            let result = aggregate(&[], policy);
            assert_eq!(result.bpm, 0.0);
            assert!(result.bpm_estimates.is_empty());
            assert!(result.candidate.is_none());
        }
    }

    #[test]
    fn test_plain_mean_keeps_everything() {
        let result = aggregate(&[58.0, 62.0, 121.0, 119.0], BpmPolicy::PlainMean);
        assert_eq!(result.bpm, 90.0);
        assert_eq!(result.bpm_estimates.len(), 4);
    }

    #[test]
    fn test_corrected_mean_discards_octave_pair() {
        let result = aggregate(&[58.0, 62.0, 121.0, 119.0], BpmPolicy::CorrectedMean);
        assert_eq!(result.bpm_estimates, vec![58.0, 62.0]);
        assert!((result.bpm - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_corrected_mean_empty_filter_uses_candidate() {
        // 61 halves to 30.5, which rounds up to the 31 bin: candidate 62, 1 BPM away
        let result = aggregate_bpm(
            &[61.0, 61.0],
            BpmPolicy::CorrectedMean,
            0.5,
            &HistogramConfig::default(),
        );
        assert!(result.bpm_estimates.is_empty());
        assert_eq!(result.bpm, 62.0);
        assert_eq!(result.candidate.map(|c| c.bpm), Some(62.0));
    }

    #[test]
    fn test_out_of_range_falls_back_to_plain_mean() {
        let result = aggregate(&[6000.0, 7000.0], BpmPolicy::CorrectedMean);
        assert_eq!(result.bpm, 6500.0);
        assert!(result.candidate.is_none());
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(BpmPolicy::default(), BpmPolicy::CorrectedMean);
    }
}
