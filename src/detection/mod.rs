//! Detection result and signal types shared across the engine

pub mod result;
pub mod signal;

pub use result::{Detection, DetectorResult, DetectorResultSet, DetectorStatus, NEUTRAL_SCORE};
pub use signal::{ContinuousProfile, DetectorSignal};
