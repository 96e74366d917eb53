//! Tolerance filtering around the candidate tempo
//!
//! Drops residual outliers (unresolved octave errors, jitter from spuriously
//! short or long intervals) by keeping only estimates close to the candidate.

/// Keep estimates strictly within `tolerance_bpm` of `candidate_bpm`
///
/// # Arguments
///
/// * `bpm_estimates` - Raw (un-halved) per-interval estimates
/// * `candidate_bpm` - Candidate tempo from octave disambiguation
/// * `tolerance_bpm` - Absolute tolerance in BPM
///
/// # Returns
///
/// Retained estimates in their original order. May be empty.
///
/// # Example
///
/// ```
/// use rhythm_extractor::features::tempo::tolerance::filter_by_tolerance;
///
/// let kept = filter_by_tolerance(&[58.0, 62.0, 121.0, 119.0], 58.0, 5.0);
/// assert_eq!(kept, vec![58.0, 62.0]);
/// ```
pub fn filter_by_tolerance(bpm_estimates: &[f64], candidate_bpm: f64, tolerance_bpm: f64) -> Vec<f64> {
    bpm_estimates
        .iter()
        .copied()
        .filter(|bpm| (candidate_bpm - bpm).abs() < tolerance_bpm)
        .collect()
}

/// Mean of the filtered estimates, or the candidate itself if none survived
pub fn filtered_mean_or_candidate(filtered: &[f64], candidate_bpm: f64) -> f64 {
    match super::mean(filtered) {
        Some(bpm) => bpm,
        None => {
            log::warn!(
                "No estimate within tolerance of candidate {:.2} BPM, using candidate",
                candidate_bpm
            );
            candidate_bpm
        }
    }
}
