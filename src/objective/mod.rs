//! Objective-function entry points and the batch evaluation driver.
//!
//! A [`StreamTuner`] turns a matrix of hyperparameter rows into one
//! objective value per row: each row is decoded into a model configuration,
//! run through the injected progressive evaluator, and reduced to a scalar.
//! Rows are independent; the control configuration is merged once at call
//! entry and read-only afterwards.
//!
//! Failure policy: schema violations and unknown categorical codes abort the
//! whole call (caller contract defects), while evaluation failures degrade
//! only the failing row's value to NaN so the outer optimizer always
//! receives a full-length result vector.

use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rayon::prelude::*;
use std::sync::Arc;

use crate::config::control::{ControlOverrides, EvalControl};
use crate::core::error::Result;
use crate::core::traits::{Metric, ProgressiveEvaluator};
use crate::core::types::VerbosityLevel;
use crate::eval::{mean_of_snapshots, Mae};
use crate::model::schema::Schema;
use crate::model::{HoeffdingTreeSpec, HoltWintersSpec, ModelSpec, SnarimaxSpec};

/// A batch of hyperparameter rows.
///
/// Wraps a two-dimensional matrix; a single one-dimensional vector is
/// normalized to a one-row matrix on conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMatrix(Array2<f64>);

impl RowMatrix {
    /// Number of hyperparameter rows.
    pub fn nrows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of hyperparameter columns.
    pub fn ncols(&self) -> usize {
        self.0.ncols()
    }

    /// View of the underlying matrix.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.0.view()
    }
}

impl From<Array2<f64>> for RowMatrix {
    fn from(x: Array2<f64>) -> Self {
        RowMatrix(x)
    }
}

impl From<Array1<f64>> for RowMatrix {
    fn from(x: Array1<f64>) -> Self {
        RowMatrix(x.insert_axis(Axis(0)))
    }
}

/// Absorb recoverable evaluation failures into a NaN objective value.
///
/// This is the single place in the crate where a per-row failure is
/// converted into the missing-value marker; anything non-recoverable
/// propagates and aborts the batch.
fn attempt_with_fallback<F>(family: &'static str, row: usize, f: F) -> Result<f64>
where
    F: FnOnce() -> Result<f64>,
{
    match f() {
        Ok(value) => Ok(value),
        Err(err) if err.is_recoverable() => {
            warn!(
                "{} row {}: evaluation failed ({}): {}; recording NaN",
                family,
                row,
                err.category(),
                err
            );
            Ok(f64::NAN)
        }
        Err(err) => Err(err),
    }
}

/// Objective-function evaluation engine for online-learning models.
///
/// Holds the per-run control configuration and the injected progressive
/// evaluator. One entry point per model family maps a hyperparameter row
/// matrix to an objective vector of the same row count and order.
pub struct StreamTuner {
    control: EvalControl,
    evaluator: Arc<dyn ProgressiveEvaluator>,
}

impl StreamTuner {
    /// Create a tuner with a default control configuration.
    pub fn new(evaluator: Arc<dyn ProgressiveEvaluator>) -> Self {
        StreamTuner {
            control: EvalControl::default(),
            evaluator,
        }
    }

    /// Create a tuner with an explicit control configuration.
    pub fn with_control(evaluator: Arc<dyn ProgressiveEvaluator>, control: EvalControl) -> Self {
        StreamTuner { control, evaluator }
    }

    /// The current control configuration.
    pub fn control(&self) -> &EvalControl {
        &self.control
    }

    /// Objective function of the seasonal autoregressive (SNARIMAX) family.
    ///
    /// Each of the 12 columns of `x` parameterizes one candidate model:
    /// orders `p`, `d`, `q`, season length `m`, their seasonal counterparts,
    /// the inner regressor's learning rates, and three calendar feature
    /// flags. Returns the mean of the per-step metric values for each row.
    pub fn snarimax(
        &mut self,
        x: impl Into<RowMatrix>,
        overrides: &ControlOverrides,
    ) -> Result<Array1<f64>> {
        let x = x.into();
        self.control.apply(overrides);
        let specs = build_specs(&x, SnarimaxSpec::schema(), |row| {
            SnarimaxSpec::from_row(row).map(ModelSpec::Snarimax)
        })?;
        self.horizon_batch(&specs)
    }

    /// Objective function of the Holt-Winters exponential-smoothing family.
    ///
    /// The 5 columns of `x` are the level/trend/seasonal smoothing factors,
    /// the season length, and the multiplicative-mode flag. Returns the
    /// mean of the per-step metric values for each row.
    pub fn holt_winters(
        &mut self,
        x: impl Into<RowMatrix>,
        overrides: &ControlOverrides,
    ) -> Result<Array1<f64>> {
        let x = x.into();
        self.control.apply(overrides);
        let specs = build_specs(&x, HoltWintersSpec::schema(), |row| {
            HoltWintersSpec::from_row(row).map(ModelSpec::HoltWinters)
        })?;
        self.horizon_batch(&specs)
    }

    /// Objective function of the Hoeffding tree regressor family.
    ///
    /// The 11 columns of `x` parameterize the tree learner; four of them
    /// are selector codes (depth limit, leaf prediction, leaf model,
    /// splitter). Each row's model is run through iter-progressive
    /// evaluation under a fixed MAE metric and its report score is divided
    /// by the configured sample count.
    pub fn hoeffding_tree(
        &mut self,
        x: impl Into<RowMatrix>,
        overrides: &ControlOverrides,
    ) -> Result<Array1<f64>> {
        let x = x.into();
        self.control.apply(overrides);
        let specs = build_specs(&x, HoeffdingTreeSpec::schema(), |row| {
            HoeffdingTreeSpec::from_row(row).map(ModelSpec::HoeffdingTree)
        })?;
        self.iter_batch(&specs)
    }

    /// Evaluate horizon-based specs, one objective value per spec.
    fn horizon_batch(&self, specs: &[ModelSpec]) -> Result<Array1<f64>> {
        let data = Arc::clone(self.control.data()?);
        let horizon = self.control.horizon()?;
        let grace_period = self.control.effective_grace_period();
        let metric = &self.control.metric;

        let family = specs.first().map(|s| s.family()).unwrap_or("horizon");
        let eval_one = |(index, spec): (usize, &ModelSpec)| -> Result<f64> {
            attempt_with_fallback(family, index, || {
                let snapshots = self.evaluator.evaluate_horizon(
                    data.as_ref(),
                    spec,
                    metric.as_ref(),
                    horizon,
                    grace_period,
                )?;
                mean_of_snapshots(&snapshots)
            })
        };

        self.collect_ordered(specs, eval_one)
    }

    /// Evaluate tree-family specs through iter-progressive evaluation.
    fn iter_batch(&self, specs: &[ModelSpec]) -> Result<Array1<f64>> {
        let data = Arc::clone(self.control.data()?);
        let n_samples = self.control.n_samples()?;
        let step = self.control.step;
        let verbose = self.control.verbosity > VerbosityLevel::Silent;

        if self.control.verbosity >= VerbosityLevel::Detailed {
            for (index, spec) in specs.iter().enumerate() {
                if let ModelSpec::HoeffdingTree(tree) = spec {
                    debug!(
                        "row {}: grace_period={} max_depth={} delta={} tau={} \
                         leaf_prediction={} leaf_model={} model_selector_decay={} \
                         splitter={} min_samples_split={} binary_split={} max_size={}",
                        index,
                        tree.grace_period,
                        tree.max_depth,
                        tree.delta,
                        tree.tau,
                        tree.leaf_prediction,
                        tree.leaf_model,
                        tree.model_selector_decay,
                        tree.splitter,
                        tree.min_samples_split,
                        tree.binary_split,
                        tree.max_size_mb,
                    );
                }
            }
        }

        // The tree family is always scored under MAE, independent of the
        // control metric used by the forecasting families.
        let metric: Box<dyn Metric> = Box::new(Mae::new());

        let family = specs.first().map(|s| s.family()).unwrap_or("iter");
        let eval_one = |(index, spec): (usize, &ModelSpec)| -> Result<f64> {
            attempt_with_fallback(family, index, || {
                let report = self.evaluator.evaluate_iter(
                    data.as_ref(),
                    spec,
                    metric.as_ref(),
                    step,
                    verbose,
                )?;
                Ok(report.score()? / n_samples as f64)
            })
        };

        self.collect_ordered(specs, eval_one)
    }

    /// Run the per-row evaluation over all specs, sequentially or in
    /// parallel, always producing outputs in input-row order.
    fn collect_ordered<F>(&self, specs: &[ModelSpec], eval_one: F) -> Result<Array1<f64>>
    where
        F: Fn((usize, &ModelSpec)) -> Result<f64> + Send + Sync,
    {
        let values: Vec<f64> = if self.control.parallel {
            // indexed collect keeps output positions mapped to input rows
            specs
                .par_iter()
                .enumerate()
                .map(|(i, s)| eval_one((i, s)))
                .collect::<Result<_>>()?
        } else {
            specs
                .iter()
                .enumerate()
                .map(eval_one)
                .collect::<Result<_>>()?
        };
        Ok(Array1::from_vec(values))
    }
}

impl std::fmt::Debug for StreamTuner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTuner")
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}

/// Validate the matrix width against the family schema, then decode every
/// row in input order. Any build failure aborts the call at the failing
/// row; no partial output is produced.
fn build_specs<F>(x: &RowMatrix, schema: Schema, decode: F) -> Result<Vec<ModelSpec>>
where
    F: Fn(ndarray::ArrayView1<'_, f64>) -> Result<ModelSpec>,
{
    schema.validate_width(x.ncols())?;
    x.view().rows().into_iter().map(decode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TuneError;
    use ndarray::array;

    #[test]
    fn test_row_matrix_normalizes_vectors() {
        let x: RowMatrix = array![1.0, 2.0, 3.0].into();
        assert_eq!(x.nrows(), 1);
        assert_eq!(x.ncols(), 3);
    }

    #[test]
    fn test_row_matrix_keeps_matrices() {
        let x: RowMatrix = array![[1.0, 2.0], [3.0, 4.0]].into();
        assert_eq!(x.nrows(), 2);
        assert_eq!(x.ncols(), 2);
    }

    #[test]
    fn test_fallback_absorbs_recoverable_errors() {
        let value =
            attempt_with_fallback("test", 0, || Err(TuneError::evaluation("boom"))).unwrap();
        assert!(value.is_nan());
    }

    #[test]
    fn test_fallback_propagates_contract_defects() {
        let result = attempt_with_fallback("test", 0, || {
            Err(TuneError::control("missing horizon"))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_fallback_passes_values_through() {
        let value = attempt_with_fallback("test", 0, || Ok(1.5)).unwrap();
        assert_eq!(value, 1.5);
    }
}
