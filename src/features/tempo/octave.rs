//! Octave error disambiguation
//!
//! Beat trackers often lock onto half or double the perceived tempo, which
//! turns the per-interval estimates into a bimodal mixture. Halving every
//! estimate before binning folds the doubled mode onto the true tempo's half,
//! so the histogram peak lands on a single octave.
//!
//! # Algorithm
//!
//! 1. Halve every raw estimate
//! 2. Histogram the halved values (see [`HistogramConfig`])
//! 3. Take the highest bin (lowest index on ties)
//! 4. Candidate = bin center x 2

use super::histogram::{HistogramConfig, TempoHistogram};
use super::TempoCandidate;

/// Find the candidate tempo for a set of raw BPM estimates
///
/// # Arguments
///
/// * `bpm_estimates` - Raw (un-halved) per-interval estimates
/// * `config` - Histogram layout on the halved scale
///
/// # Returns
///
/// `None` when no estimate falls inside the histogram range (including the
/// empty input case).
///
/// # Example
///
/// ```
/// use rhythm_extractor::features::tempo::histogram::HistogramConfig;
/// use rhythm_extractor::features::tempo::octave::find_candidate;
///
/// // Two estimates at 60 BPM, two at the doubled 120 BPM
/// let candidate = find_candidate(&[60.0, 120.0, 60.0, 120.0], &HistogramConfig::default())
///     .unwrap();
/// assert_eq!(candidate.bpm, 60.0);
/// ```
pub fn find_candidate(bpm_estimates: &[f64], config: &HistogramConfig) -> Option<TempoCandidate> {
    if bpm_estimates.is_empty() {
        return None;
    }

    let halved: Vec<f64> = bpm_estimates.iter().map(|bpm| bpm / 2.0).collect();
    let histogram = TempoHistogram::from_values(&halved, *config);

    if histogram.total() < halved.len() {
        log::debug!(
            "{} of {} halved estimates fell outside the histogram range",
            halved.len() - histogram.total(),
            halved.len()
        );
    }

    let (bin_index, count) = histogram.peak()?;
    let bpm = histogram.bin_center(bin_index) * 2.0;

    log::debug!(
        "Tempo candidate: {:.2} BPM (bin {}, {} of {} estimates, {} occupied bins)",
        bpm,
        bin_index,
        count,
        bpm_estimates.len(),
        histogram.counts().iter().filter(|&&c| c > 0).count()
    );

    Some(TempoCandidate {
        bin_index,
        count,
        bpm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_estimates() {
        assert_eq!(find_candidate(&[], &HistogramConfig::default()), None);
    }

    #[test]
    fn test_uniform_estimates() {
        let candidate = find_candidate(&[120.0, 120.0, 120.0], &HistogramConfig::default()).unwrap();
        assert_eq!(candidate.bpm, 120.0);
        assert_eq!(candidate.count, 3);
    }

    #[test]
    fn test_octave_mixture_resolves_to_lower_tempo() {
        // Half the intervals at 90 BPM, half doubled to 180 BPM
        let estimates = [90.0, 180.0, 90.0, 180.0, 90.0, 180.0];
        let candidate = find_candidate(&estimates, &HistogramConfig::default()).unwrap();
        assert!((candidate.bpm - 90.0).abs() < 5.0, "got {}", candidate.bpm);
    }

    #[test]
    fn test_majority_wins_over_first_bin() {
        let estimates = [58.0, 120.0, 119.5, 120.4];
        let candidate = find_candidate(&estimates, &HistogramConfig::default()).unwrap();
        assert_eq!(candidate.bpm, 120.0);
        assert_eq!(candidate.count, 3);
    }

    #[test]
    fn test_all_out_of_range() {
        // 6000 BPM halved is still above the histogram range
        assert_eq!(find_candidate(&[6000.0, 6000.0], &HistogramConfig::default()), None);
    }

    #[test]
    fn test_spread_estimates_pick_first_bin() {
        let candidate =
            find_candidate(&[58.0, 62.0, 121.0, 119.0], &HistogramConfig::default()).unwrap();
        assert_eq!(candidate.bpm, 58.0);
    }
}
