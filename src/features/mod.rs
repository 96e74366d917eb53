//! Feature extraction modules
//!
//! - Tempo estimation from beat ticks (intervals, octave correction, filtering)
//! - Beat grid quantization of onsets
//! - Metronome click track rendering

pub mod beat_grid;
pub mod metronome;
pub mod tempo;
