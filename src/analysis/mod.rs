//! Analysis result types
//!
//! - Tempo estimate (BPM, passthrough confidence, supporting evidence)
//! - Onset rate passthrough

pub mod result;
