//! Example: Run rhythm extraction for many tick sequences in parallel
//!
//! Usage:
//!   cargo run --release --example batch_estimate -- [--method multifeature|degara]
//!
//! Each job goes through a shared `EngineContext`, so the engine is
//! initialized once no matter how many workers start at the same time.

use once_cell::sync::Lazy;
use rayon::prelude::*;
use rhythm_extractor::engine::scripted::ScriptedTracker;
use rhythm_extractor::{extract_rhythm, BeatTrackerMethod, EngineContext, TempoConfig};
use std::env;
use std::time::Instant;

const SAMPLE_RATE: u32 = 44100;

static ENGINE: Lazy<EngineContext<ScriptedTracker>> = Lazy::new(|| {
    let period = 60.0 / 126.0;
    let ticks = (0..64).map(|i| 0.25 + i as f64 * period).collect();
    EngineContext::new(ScriptedTracker::with_ticks(ticks, Some(3.9)))
});

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut config = TempoConfig::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--method" {
            config.method = args.next().ok_or("--method needs a value")?.parse::<BeatTrackerMethod>()?;
        }
    }

    let silence = vec![0.0f32; SAMPLE_RATE as usize];
    let start = Instant::now();

    let results: Vec<_> = (0..16)
        .into_par_iter()
        .map(|job| (job, extract_rhythm(&*ENGINE, &silence, SAMPLE_RATE, &config)))
        .collect();

    for (job, result) in results {
        match result {
            Ok(estimate) => println!(
                "job {:2}: {:.2} BPM (confidence {:.2})",
                job, estimate.bpm, estimate.confidence
            ),
            Err(e) => eprintln!("job {:2}: {}", job, e),
        }
    }

    println!(
        "{} engine init call(s), {:.2} ms total",
        ENGINE.tracker().init_calls(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
