//! Core infrastructure module for streamtune.
//!
//! This module provides the foundational components shared by the rest of
//! the crate:
//!
//! - [`types`]: fundamental data types and enumerations
//! - [`constants`]: schema widths and configuration defaults
//! - [`error`]: error taxonomy and the crate-wide `Result` alias
//! - [`traits`]: collaborator seams (dataset, metric, learner, evaluator)

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{Result, TuneError};
pub use traits::{MemorySource, Metric, ProgressiveEvaluator, RecordSource, StreamingRegressor};
pub use types::*;
