//! Tempo estimation from beat ticks
//!
//! Turn a beat tick sequence into one BPM value:
//! - Interval extraction
//! - Histogram-based octave disambiguation
//! - Tolerance filtering
//! - Aggregation (plain or corrected mean)

pub mod aggregate;
pub mod histogram;
pub mod intervals;
pub mod octave;
pub mod tolerance;

/// One inter-beat interval and the tempo it implies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalSample {
    /// Elapsed time between two consecutive ticks in seconds (always > 0)
    pub duration: f64,

    /// Instantaneous tempo, `60 / duration`
    pub instantaneous_bpm: f64,
}

impl IntervalSample {
    /// Build a sample from a duration
    ///
    /// Rejects non-positive durations and any duration whose tempo is not
    /// finite (subnormal gaps overflow `60 / duration`).
    pub fn from_duration(duration: f64) -> Option<Self> {
        if duration.is_nan() || duration <= 0.0 {
            return None;
        }
        let instantaneous_bpm = 60.0 / duration;
        (instantaneous_bpm.is_finite() && duration.is_finite()).then_some(Self {
            duration,
            instantaneous_bpm,
        })
    }
}

/// Histogram-derived best guess at the true tempo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoCandidate {
    /// Winning histogram bin
    pub bin_index: usize,

    /// Number of halved estimates that fell into the bin
    pub count: usize,

    /// Bin center doubled back to full-tempo scale
    pub bpm: f64,
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_sample_rejects_non_positive() {
        assert!(IntervalSample::from_duration(0.0).is_none());
        assert!(IntervalSample::from_duration(-0.25).is_none());
        assert!(IntervalSample::from_duration(f64::NAN).is_none());

        assert!(IntervalSample::from_duration(f64::INFINITY).is_none());

        let sample = IntervalSample::from_duration(0.5).unwrap();
        assert_eq!(sample.instantaneous_bpm, 120.0);
    }

    #[test]
    fn test_interval_sample_rejects_subnormal_duration() {
        assert!(IntervalSample::from_duration(1e-310).is_none());
        assert!(IntervalSample::from_duration(1e-300).is_some());
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[58.0, 62.0]), Some(60.0));
    }
}
