//! Inter-beat interval extraction
//!
//! Converts a beat tick sequence into parallel lists of intervals and
//! instantaneous BPM estimates.

use super::IntervalSample;

/// Intervals and raw BPM estimates, index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalSet {
    /// Retained inter-beat intervals in seconds
    pub intervals: Vec<f64>,

    /// `60 / interval` for each retained interval
    pub bpm_estimates: Vec<f64>,
}

impl IntervalSet {
    /// Number of retained intervals
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// True if no usable interval was found
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

/// Compute interval samples from adjacent ticks
///
/// Pairs with a non-positive duration (duplicate or out-of-order ticks) are
/// skipped, so the result may be shorter than `ticks.len() - 1`.
pub fn interval_samples(ticks: &[f64]) -> Vec<IntervalSample> {
    ticks
        .windows(2)
        .filter_map(|pair| IntervalSample::from_duration(pair[1] - pair[0]))
        .collect()
}

/// Extract intervals and raw BPM estimates from a tick sequence
///
/// # Arguments
///
/// * `ticks` - Beat times in seconds, expected non-decreasing
///
/// # Returns
///
/// Parallel interval and estimate lists in tick order. Fewer than two ticks
/// yields an empty set.
///
/// # Example
///
/// ```
/// use rhythm_extractor::features::tempo::intervals::extract_intervals;
///
/// let set = extract_intervals(&[0.5, 1.0, 1.5, 2.0]);
/// assert_eq!(set.intervals, vec![0.5, 0.5, 0.5]);
/// assert_eq!(set.bpm_estimates, vec![120.0, 120.0, 120.0]);
/// ```
pub fn extract_intervals(ticks: &[f64]) -> IntervalSet {
    if ticks.len() < 2 {
        return IntervalSet::default();
    }

    let samples = interval_samples(ticks);
    let skipped = ticks.len() - 1 - samples.len();
    if skipped > 0 {
        log::debug!(
            "Skipped {} non-positive intervals out of {}",
            skipped,
            ticks.len() - 1
        );
    }

    let (intervals, bpm_estimates): (Vec<f64>, Vec<f64>) = samples
        .iter()
        .map(|s| (s.duration, s.instantaneous_bpm))
        .unzip();

    IntervalSet {
        intervals,
        bpm_estimates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_ticks() {
        assert!(extract_intervals(&[]).is_empty());
        assert!(extract_intervals(&[1.25]).is_empty());
    }

    #[test]
    fn test_uniform_ticks() {
        let set = extract_intervals(&[0.5, 1.0, 1.5, 2.0]);
        assert_eq!(set.len(), 3);
        assert!(set.bpm_estimates.iter().all(|&bpm| bpm == 120.0));
    }

    #[test]
    fn test_duplicate_and_out_of_order_ticks_skipped() {
        // 1.0 -> 1.0 is a duplicate, 1.5 -> 1.4 runs backwards
        let set = extract_intervals(&[0.5, 1.0, 1.0, 1.5, 1.4, 2.0]);

        assert_eq!(set.intervals.len(), set.bpm_estimates.len());
        assert_eq!(set.len(), 3);
        for &bpm in &set.bpm_estimates {
            assert!(bpm.is_finite() && bpm > 0.0, "bad estimate {}", bpm);
        }
        assert!(set.intervals.iter().all(|&d| d > 0.0));
    }

    #[test]
    fn test_order_preserved() {
        let set = extract_intervals(&[0.0, 0.5, 1.5]);
        assert_eq!(set.intervals, vec![0.5, 1.0]);
        assert_eq!(set.bpm_estimates, vec![120.0, 60.0]);
    }
}
