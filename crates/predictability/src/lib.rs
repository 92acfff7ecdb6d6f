//! # Incrolink Predictability
//!
//! A fixed, ordered chain of rules that grades how predictable an acquisition
//! target is, given its implied growth, its sector's sell-side activity, the
//! age of its CEO, its size and its margin.
//!
//! The chain records a line for every rule it evaluates, so the result explains
//! itself. A rule whose inputs are missing is skipped rather than matched.

pub mod classifier;
pub mod signals;

pub use classifier::PredictabilityClassifier;
pub use signals::{PredictabilityResult, PredictabilitySignals};
