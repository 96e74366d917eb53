//! Example: Estimate tempo from a tick list
//!
//! Usage:
//!   cargo run --example estimate_ticks -- [--plain] [--confidence C] <t1> <t2> ...
//!
//! Prints the `TempoEstimate` as JSON.

use rhythm_extractor::{estimate_tempo, BpmPolicy, TempoConfig};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut config = TempoConfig::default();
    let mut confidence = 0.0;
    let mut ticks = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--plain" => config.policy = BpmPolicy::PlainMean,
            "--confidence" => {
                confidence = args.next().ok_or("--confidence needs a value")?.parse::<f64>()?;
            }
            tick => ticks.push(tick.parse::<f64>()?),
        }
    }

    if ticks.is_empty() {
        // Tracker output that flips to double tempo every fourth beat
        ticks = vec![0.0, 0.5, 1.0, 1.5, 1.75, 2.0, 2.5, 3.0, 3.5, 3.75, 4.0, 4.5];
    }

    let estimate = estimate_tempo(&ticks, confidence, &config);

    println!("{}", serde_json::to_string_pretty(&estimate)?);
    eprintln!(
        "BPM: {:.2} ({} of {} intervals used, policy {:?})",
        estimate.bpm,
        estimate.bpm_estimates.len(),
        estimate.intervals.len(),
        config.policy
    );

    Ok(())
}
