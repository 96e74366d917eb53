//! Metronome click track rendering
//!
//! Renders a click track from tracked beats and quantized onsets, and mixes it
//! under the source audio. Strong clicks mark beats; weaker, lower clicks mark
//! quantized onsets that do not coincide with a beat.
//!
//! # Example
//!
//! ```
//! use rhythm_extractor::features::metronome::render_metronome;
//!
//! let beats = [0.5, 1.0, 1.5];
//! let track = render_metronome(&beats, &[0.75], 44100 * 2, 44100);
//!
//! let peak = track.iter().fold(0.0f32, |m, &x| m.max(x.abs()));
//! assert!((peak - 0.8).abs() < 1e-4);
//! ```

use std::f64::consts::PI;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Click envelope decay rate (1/s)
const CLICK_DECAY: f64 = 35.0;

/// Beat click: duration in seconds, frequency in Hz, gain
const STRONG_CLICK: (f64, f64, f32) = (0.05, 1000.0, 1.0);

/// Onset click: duration in seconds, frequency in Hz, gain
const WEAK_CLICK: (f64, f64, f32) = (0.03, 800.0, 0.6);

/// Onsets closer than this to a beat (seconds) get no extra click
pub const ONSET_BEAT_EXCLUSION_S: f64 = 0.05;

/// Peak level of rendered and mixed tracks
pub const OUTPUT_PEAK: f32 = 0.8;

/// Source gain in the mix
pub const MIX_SOURCE_GAIN: f32 = 0.3;

/// Click track gain in the mix
pub const MIX_METRONOME_GAIN: f32 = 0.7;

/// Exponentially decaying sine click
///
/// # Arguments
///
/// * `sample_rate` - Sample rate in Hz
/// * `duration` - Click length in seconds
/// * `frequency` - Sine frequency in Hz
pub fn click(sample_rate: u32, duration: f64, frequency: f64) -> Vec<f32> {
    let len = (sample_rate as f64 * duration) as usize;
    let step = if len > 1 { duration / (len - 1) as f64 } else { 0.0 };
    (0..len)
        .map(|i| {
            let t = i as f64 * step;
            ((2.0 * PI * frequency * t).sin() * (-CLICK_DECAY * t).exp()) as f32
        })
        .collect()
}

/// Render a click track
///
/// # Arguments
///
/// * `beats` - Beat times in seconds (strong clicks)
/// * `quantized_onsets` - Onset grid times in seconds (weak clicks, skipped
///   within [`ONSET_BEAT_EXCLUSION_S`] of a beat)
/// * `num_samples` - Output length
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// Click track normalized to [`OUTPUT_PEAK`], or silence if nothing was placed.
pub fn render_metronome(
    beats: &[f64],
    quantized_onsets: &[f64],
    num_samples: usize,
    sample_rate: u32,
) -> Vec<f32> {
    let mut track = vec![0.0f32; num_samples];

    let (duration, frequency, gain) = STRONG_CLICK;
    let strong = scaled_click(sample_rate, duration, frequency, gain);
    for &beat in beats {
        place(&mut track, &strong, beat, sample_rate);
    }

    let (duration, frequency, gain) = WEAK_CLICK;
    let weak = scaled_click(sample_rate, duration, frequency, gain);
    let mut placed_onsets = 0;
    for &onset in quantized_onsets {
        let nearest_beat = beats
            .iter()
            .map(|beat| (onset - beat).abs())
            .fold(f64::INFINITY, f64::min);
        if nearest_beat > ONSET_BEAT_EXCLUSION_S {
            place(&mut track, &weak, onset, sample_rate);
            placed_onsets += 1;
        }
    }

    log::debug!(
        "Rendered metronome: {} beat clicks, {} onset clicks, {} samples",
        beats.len(),
        placed_onsets,
        num_samples
    );

    normalize_peak(&mut track, OUTPUT_PEAK);
    track
}

/// Mix a click track under the source audio
///
/// Output has the source's length; the result is normalized to
/// [`OUTPUT_PEAK`].
pub fn mix_with_source(source: &[f32], metronome: &[f32]) -> Vec<f32> {
    let mut mixed: Vec<f32> = source
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let click = metronome.get(i).copied().unwrap_or(0.0);
            s * MIX_SOURCE_GAIN + click * MIX_METRONOME_GAIN
        })
        .collect();
    normalize_peak(&mut mixed, OUTPUT_PEAK);
    mixed
}

/// Scale `samples` so the absolute peak equals `target`; silence is left as is
pub fn normalize_peak(samples: &mut [f32], target: f32) {
    let peak = samples.iter().map(|&x| x.abs()).fold(0.0f32, f32::max);
    if peak <= EPSILON {
        return;
    }
    let gain = target / peak;
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}

fn scaled_click(sample_rate: u32, duration: f64, frequency: f64, gain: f32) -> Vec<f32> {
    click(sample_rate, duration, frequency)
        .into_iter()
        .map(|x| x * gain)
        .collect()
}

fn place(track: &mut [f32], click: &[f32], time: f64, sample_rate: u32) {
    if !time.is_finite() || time < 0.0 {
        return;
    }
    let start = (time * sample_rate as f64) as usize;
    if start >= track.len() {
        return;
    }
    let end = (start + click.len()).min(track.len());
    for (out, &c) in track[start..end].iter_mut().zip(click) {
        *out += c;
    }
}
