//! # streamtune
//!
//! An objective-function evaluation engine for hyperparameter tuning of
//! online-learning models. The crate maps numeric hyperparameter rows to
//! fully configured streaming-model specifications, drives them through a
//! progressive (streaming) evaluation procedure, and reduces the per-step
//! metric readings into one scalar objective value per row — the shape an
//! external black-box optimizer consumes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ndarray::array;
//! use streamtune::{ControlOverrides, MemorySource, ProgressiveEvaluator, StreamTuner};
//!
//! # fn run(evaluator: Arc<dyn ProgressiveEvaluator>) -> streamtune::Result<()> {
//! let dataset = Arc::new(MemorySource::default());
//! let mut tuner = StreamTuner::new(evaluator);
//!
//! // One Holt-Winters candidate: alpha, beta, gamma, seasonality, multiplicative
//! let x = array![[0.3, 0.1, 0.6, 12.0, 1.0]];
//! let overrides = ControlOverrides::new()
//!     .with_data(dataset)
//!     .with_horizon(12);
//! let objective = tuner.holt_winters(x, &overrides)?;
//! assert_eq!(objective.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: fundamental types, error taxonomy, and the collaborator
//!   seams (dataset, metric, learner, progressive evaluator)
//! - [`config`]: per-run control configuration and categorical selectors
//! - [`features`]: calendar feature extraction for timestamped records
//! - [`model`]: per-family hyperparameter schemas and model builders
//! - [`eval`]: metric snapshot reduction and the default MAE metric
//! - [`objective`]: the batch driver and per-family entry points
//!
//! ## Failure policy
//!
//! Schema violations and unknown categorical codes are caller contract
//! defects and abort an objective call with no partial output. A
//! learner-internal failure while evaluating one row degrades that row's
//! objective value to NaN and is logged with its row index and cause; the
//! remaining rows are unaffected, so every call returns a result vector of
//! the full input length.

#![warn(missing_docs)]
#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

pub mod config;
pub mod core;
pub mod eval;
pub mod features;
pub mod model;
pub mod objective;

pub use crate::core::{
    constants::*,
    error::{Result, TuneError},
    traits::{MemorySource, Metric, ProgressiveEvaluator, RecordSource, StreamingRegressor},
    types::{
        Checkpoint, FieldValue, MetricSnapshot, Observation, ProgressiveReport, VerbosityLevel,
    },
};

pub use config::{ControlOverrides, EvalControl, LeafModel, LeafPrediction, MaxDepth, SplitterStrategy};
pub use eval::{mean_of_snapshots, Mae};
pub use features::{CalendarFeature, FeatureFlags, FeatureMap, FeaturePipeline};
pub use model::{
    schema::{Column, ColumnKind, Schema},
    HoeffdingTreeSpec, HoltWintersSpec, ModelSpec, ScaledRegressor, SnarimaxSpec,
    TabularPreprocessing,
};
pub use objective::{RowMatrix, StreamTuner};

/// Version information.
pub use crate::core::constants::STREAMTUNE_VERSION as VERSION;

/// Initialize the streamtune library.
///
/// Sets up env_logger-backed logging. Safe to call more than once; later
/// calls are no-ops.
pub fn init() {
    let _ = env_logger::Builder::from_default_env().try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_schema_dims_reexported() {
        assert_eq!(SNARIMAX_DIM, 12);
        assert_eq!(HOLT_WINTERS_DIM, 5);
        assert_eq!(HOEFFDING_TREE_DIM, 11);
    }
}
