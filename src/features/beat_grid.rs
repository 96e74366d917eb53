//! Beat grid quantization
//!
//! Snaps onset times onto a regular grid derived from the beat ticks. The grid
//! spacing is the mean of the first few beat intervals, extended backwards to
//! time zero and forwards past the last onset.

/// Number of leading beats used to estimate the grid spacing
const GRID_SPACING_BEATS: usize = 4;

/// Onsets further than this fraction of a beat from the grid are dropped
const SNAP_FRACTION: f64 = 0.25;

/// Build a regular beat grid around the detected beats
///
/// # Arguments
///
/// * `beats` - Beat times in seconds (sorted)
/// * `until` - Grid is extended forwards until it passes this time
///
/// # Returns
///
/// Sorted grid times (all >= 0). Empty if fewer than two beats or the leading
/// beats do not give a positive spacing.
pub fn build_beat_grid(beats: &[f64], until: f64) -> Vec<f64> {
    if beats.len() < 2 {
        return vec![];
    }

    let Some(spacing) = grid_spacing(beats) else {
        return vec![];
    };

    let first = beats[0];
    let last = beats[beats.len() - 1];

    let mut grid = Vec::with_capacity(beats.len() + 8);

    let mut t = first - spacing;
    while t >= 0.0 {
        grid.push(t);
        t -= spacing;
    }
    grid.reverse();

    grid.extend_from_slice(beats);

    let until = if until.is_finite() { until } else { last };
    let end = until.max(last) + spacing;
    let mut t = last + spacing;
    while t <= end {
        grid.push(t);
        t += spacing;
    }

    grid.sort_by(|a, b| a.total_cmp(b));
    grid
}

/// Quantize onset times to the nearest beat grid position
///
/// # Arguments
///
/// * `onsets` - Onset times in seconds
/// * `beats` - Beat times in seconds (sorted)
///
/// # Returns
///
/// Sorted, de-duplicated grid times that received at least one onset within a
/// quarter beat.
///
/// # Example
///
/// ```
/// use rhythm_extractor::features::beat_grid::quantize_onsets;
///
/// let beats = [1.0, 1.5, 2.0, 2.5];
/// let onsets = [0.52, 1.02, 1.3, 2.49];
/// assert_eq!(quantize_onsets(&onsets, &beats), vec![0.5, 1.0, 2.5]);
/// ```
pub fn quantize_onsets(onsets: &[f64], beats: &[f64]) -> Vec<f64> {
    if onsets.is_empty() {
        return vec![];
    }

    let until = onsets.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let grid = build_beat_grid(beats, until);
    let Some(spacing) = grid_spacing(beats) else {
        return vec![];
    };
    let max_distance = spacing * SNAP_FRACTION;

    let mut quantized: Vec<f64> = onsets
        .iter()
        .filter_map(|&onset| {
            let nearest = nearest(&grid, onset)?;
            ((nearest - onset).abs() < max_distance).then_some(nearest)
        })
        .collect();

    quantized.sort_by(|a, b| a.total_cmp(b));
    quantized.dedup();

    log::debug!(
        "Quantized {} onsets onto {} grid positions",
        onsets.len(),
        quantized.len()
    );

    quantized
}

fn grid_spacing(beats: &[f64]) -> Option<f64> {
    let lead = &beats[..beats.len().min(GRID_SPACING_BEATS)];
    let spacing = super::tempo::mean(
        &lead.windows(2).map(|pair| pair[1] - pair[0]).collect::<Vec<_>>(),
    )?;
    (spacing > 0.0 && spacing.is_finite()).then_some(spacing)
}

fn nearest(grid: &[f64], time: f64) -> Option<f64> {
    let idx = grid.partition_point(|&g| g < time);
    let after = grid.get(idx).copied();
    let before = idx.checked_sub(1).and_then(|i| grid.get(i).copied());
    match (before, after) {
        (Some(b), Some(a)) => Some(if time - b <= a - time { b } else { a }),
        (Some(b), None) => Some(b),
        (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}
