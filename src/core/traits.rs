//! Core trait abstractions for streamtune.
//!
//! These traits are the seams between the objective-function engine and its
//! external collaborators: the streaming dataset, the metric, the streaming
//! learner, and the progressive evaluation procedure. The engine never looks
//! below these seams; in particular, learner-internal failures cross the
//! [`ProgressiveEvaluator`] boundary as `anyhow::Error` and are contained
//! there.

use std::collections::BTreeMap;

use crate::core::types::{MetricSnapshot, Observation, ProgressiveReport};
use crate::model::ModelSpec;

/// A streaming evaluation metric.
///
/// The control configuration holds one metric instance as a prototype; each
/// row evaluation clones a fresh instance via [`Metric::clone_box`] so no
/// metric state leaks between rows.
pub trait Metric: Send + Sync {
    /// Fold one (truth, prediction) pair into the metric state.
    fn update(&mut self, y_true: f64, y_pred: f64);

    /// Current metric value.
    fn get(&self) -> f64;

    /// Metric name for logging.
    fn name(&self) -> &'static str;

    /// Clone into a fresh boxed instance.
    fn clone_box(&self) -> Box<dyn Metric>;
}

impl Clone for Box<dyn Metric> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Handle to an ordered streaming dataset.
///
/// Dataset acquisition and cleaning live outside this crate; the engine only
/// threads the handle through to the evaluator.
pub trait RecordSource: Send + Sync {
    /// Iterate the records in time order.
    fn records(&self) -> Box<dyn Iterator<Item = Observation> + '_>;

    /// Number of records, if known up front.
    fn len_hint(&self) -> Option<usize> {
        None
    }
}

/// In-memory record source, mainly for tests and small datasets.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    observations: Vec<Observation>,
}

impl MemorySource {
    /// Wrap a vector of observations.
    pub fn new(observations: Vec<Observation>) -> Self {
        MemorySource { observations }
    }
}

impl RecordSource for MemorySource {
    fn records(&self) -> Box<dyn Iterator<Item = Observation> + '_> {
        Box::new(self.observations.iter().cloned())
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.observations.len())
    }
}

/// Capability set of a streaming regression learner, as consumed by
/// progressive evaluators: alternate predict-then-learn over one record at
/// a time. Implementations live outside this crate.
pub trait StreamingRegressor {
    /// Update the learner with one observed (features, target) pair.
    fn learn_one(&mut self, features: &BTreeMap<String, f64>, target: f64);

    /// Predict the target for one feature mapping.
    fn predict_one(&self, features: &BTreeMap<String, f64>) -> f64;
}

/// The external progressive evaluation procedure.
///
/// Implementations instantiate a concrete model from the [`ModelSpec`],
/// stream the dataset through it, and score it with a fresh clone of the
/// metric prototype. Both methods may fail for learner-internal reasons
/// (invalid parameter combinations, resource exhaustion); such failures are
/// reported as `anyhow::Error` and absorbed by the batch driver's per-row
/// fallback, never below this boundary.
pub trait ProgressiveEvaluator: Send + Sync {
    /// Horizon-based evaluation of a forecasting model: at each checkpoint,
    /// forecast `horizon` steps ahead and score each step, skipping metric
    /// updates during the initial `grace_period` observations.
    ///
    /// Returns one metric snapshot per horizon step.
    fn evaluate_horizon(
        &self,
        data: &dyn RecordSource,
        model: &ModelSpec,
        metric: &dyn Metric,
        horizon: usize,
        grace_period: Option<usize>,
    ) -> anyhow::Result<Vec<MetricSnapshot>>;

    /// Iter-progressive evaluation of a regression model: alternate
    /// predict-then-learn over every record, recording a metric checkpoint
    /// every `step` observations.
    fn evaluate_iter(
        &self,
        data: &dyn RecordSource,
        model: &ModelSpec,
        metric: &dyn Metric,
        step: usize,
        verbose: bool,
    ) -> anyhow::Result<ProgressiveReport>;
}
