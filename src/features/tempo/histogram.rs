//! Fixed-width tempo histogram
//!
//! Bins halved BPM estimates over a bounded plausible range. Bin `i` is
//! centered on `min_bpm + i * bin_width`; each value is assigned to the
//! nearest center.

use serde::{Deserialize, Serialize};

/// Default bin width on the halved scale (2 BPM at full scale)
pub const DEFAULT_BIN_WIDTH: f64 = 1.0;

/// Default lowest bin center on the halved scale
pub const DEFAULT_MIN_BPM: f64 = 10.0;

/// Default highest bin center on the halved scale
pub const DEFAULT_MAX_BPM: f64 = 300.0;

/// Largest number of bins a layout may request
pub const MAX_BINS: usize = 100_000;

/// Histogram layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// Width of one bin in BPM (default: 1.0)
    pub bin_width: f64,

    /// Center of the first bin in BPM (default: 10.0)
    pub min_bpm: f64,

    /// Center of the last bin in BPM (default: 300.0)
    pub max_bpm: f64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bin_width: DEFAULT_BIN_WIDTH,
            min_bpm: DEFAULT_MIN_BPM,
            max_bpm: DEFAULT_MAX_BPM,
        }
    }
}

impl HistogramConfig {
    /// Number of bins covering `[min_bpm, max_bpm]`
    ///
    /// 0 for a degenerate layout: non-finite bounds, non-positive width,
    /// `min_bpm >= max_bpm`, or more than [`MAX_BINS`] bins.
    pub fn num_bins(&self) -> usize {
        if !self.bin_width.is_finite()
            || self.bin_width <= 0.0
            || !self.min_bpm.is_finite()
            || !self.max_bpm.is_finite()
            || self.max_bpm <= self.min_bpm
        {
            return 0;
        }
        let span = ((self.max_bpm - self.min_bpm) / self.bin_width).floor();
        if !span.is_finite() || span >= MAX_BINS as f64 {
            return 0;
        }
        span as usize + 1
    }

    /// True if the layout yields a usable histogram
    pub fn is_valid(&self) -> bool {
        self.num_bins() > 0
    }
}

/// Tempo histogram: bin index -> count
#[derive(Debug, Clone, PartialEq)]
pub struct TempoHistogram {
    config: HistogramConfig,
    counts: Vec<usize>,
}

impl TempoHistogram {
    /// Create an empty histogram
    ///
    /// A degenerate layout gives a histogram with no bins, which counts
    /// nothing and has no peak.
    pub fn new(config: HistogramConfig) -> Self {
        let num_bins = config.num_bins();
        if num_bins == 0 {
            log::warn!("Degenerate histogram layout {:?}, no bins allocated", config);
        }
        Self {
            config,
            counts: vec![0; num_bins],
        }
    }

    /// Build a histogram from a set of values
    pub fn from_values(values: &[f64], config: HistogramConfig) -> Self {
        let mut histogram = Self::new(config);
        for &value in values {
            histogram.add(value);
        }
        histogram
    }

    /// Bin index for a value, or `None` if it lies outside the range
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || self.counts.is_empty() {
            return None;
        }
        let position = (value - self.config.min_bpm) / self.config.bin_width + 0.5;
        if position < 0.0 {
            return None;
        }
        let index = position.floor() as usize;
        (index < self.counts.len()).then_some(index)
    }

    /// Center value of a bin
    pub fn bin_center(&self, index: usize) -> f64 {
        self.config.min_bpm + index as f64 * self.config.bin_width
    }

    /// Count a value; returns false if it fell outside the range
    pub fn add(&mut self, value: f64) -> bool {
        match self.bin_index(value) {
            Some(index) => {
                self.counts[index] += 1;
                true
            }
            None => false,
        }
    }

    /// Per-bin counts
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of counted values
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bin with the highest count as `(index, count)`
    ///
    /// Ties go to the lowest index. Returns `None` for an empty histogram.
    pub fn peak(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for (index, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((index, count)),
            }
        }
        best
    }
}
