//! Configuration management for streamtune.
//!
//! This module holds the two configuration layers of the engine: the
//! per-run control configuration ([`control`]) and the categorical
//! hyperparameter selectors ([`selectors`]) that decode integer codes into
//! typed configuration choices.

pub mod control;
pub mod selectors;

pub use control::{ControlOverrides, EvalControl};
pub use selectors::{LeafModel, LeafPrediction, MaxDepth, SplitterStrategy};
