//! Shared test fixtures: mock progressive evaluators and synthetic
//! streaming datasets.

use anyhow::bail;
use chrono::NaiveDate;
use std::sync::Arc;

use streamtune::{
    MemorySource, Metric, MetricSnapshot, ModelSpec, Observation, ProgressiveEvaluator,
    ProgressiveReport, RecordSource, StreamingRegressor,
};

/// Sentinel hyperparameter value that makes the mock evaluators fail, used
/// to test the per-row fallback policy.
pub const FAIL_TAG: f64 = 99.0;

/// Sentinel grace period that makes iter-progressive evaluation fail.
pub const FAIL_GRACE: usize = 666;

/// A small monthly dataset with constant target `target`.
pub fn constant_series(n: usize, target: f64) -> Arc<dyn RecordSource> {
    let observations = (0..n)
        .map(|i| {
            let ts = NaiveDate::from_ymd_opt(1960, 1 + (i % 12) as u32, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            Observation::new(ts, target).with_numeric("level", target)
        })
        .collect();
    Arc::new(MemorySource::new(observations))
}

/// Tag a forecasting spec with a scalar an assertion can recognize: the
/// autoregressive order for SNARIMAX rows, the level smoothing factor for
/// Holt-Winters rows.
fn spec_tag(model: &ModelSpec) -> anyhow::Result<f64> {
    match model {
        ModelSpec::Snarimax(s) => Ok(s.p as f64),
        ModelSpec::HoltWinters(s) => Ok(s.alpha),
        ModelSpec::HoeffdingTree(_) => bail!("tree specs are not forecasting specs"),
    }
}

/// Predicts the last observed target; the simplest streaming regressor.
#[derive(Default)]
struct LastValueRegressor {
    last: f64,
}

impl StreamingRegressor for LastValueRegressor {
    fn learn_one(&mut self, _features: &std::collections::BTreeMap<String, f64>, target: f64) {
        self.last = target;
    }

    fn predict_one(&self, _features: &std::collections::BTreeMap<String, f64>) -> f64 {
        self.last
    }
}

/// Mock progressive evaluator.
///
/// Horizon evaluation emits one snapshot per horizon step whose value is
/// the spec's tag, so objective values identify their input rows. Iter
/// evaluation streams the dataset through a last-value regressor scored by
/// a clone of the metric prototype, checkpointing every `step` records.
/// Both paths fail on the sentinel hyperparameters above.
pub struct MockEvaluator;

impl ProgressiveEvaluator for MockEvaluator {
    fn evaluate_horizon(
        &self,
        _data: &dyn RecordSource,
        model: &ModelSpec,
        _metric: &dyn Metric,
        horizon: usize,
        _grace_period: Option<usize>,
    ) -> anyhow::Result<Vec<MetricSnapshot>> {
        let tag = spec_tag(model)?;
        if tag == FAIL_TAG {
            bail!("synthetic learner failure for tag {tag}");
        }
        Ok((1..=horizon)
            .map(|step| MetricSnapshot::new(step, tag))
            .collect())
    }

    fn evaluate_iter(
        &self,
        data: &dyn RecordSource,
        model: &ModelSpec,
        metric: &dyn Metric,
        step: usize,
        _verbose: bool,
    ) -> anyhow::Result<ProgressiveReport> {
        let tree = match model {
            ModelSpec::HoeffdingTree(t) => t,
            other => bail!("iter evaluation expects a tree spec, got {}", other.family()),
        };
        if tree.grace_period == FAIL_GRACE {
            bail!("synthetic resource exhaustion in tree learner");
        }

        let mut regressor = LastValueRegressor::default();
        let mut metric = metric.clone_box();
        let mut report = ProgressiveReport::default();
        let mut seen = 0;
        for observation in data.records() {
            let features = streamtune::FeatureMap::new();
            let prediction = regressor.predict_one(&features);
            metric.update(observation.target, prediction);
            regressor.learn_one(&features, observation.target);
            seen += 1;
            if seen % step == 0 {
                report.push(seen, metric.get());
            }
        }
        if seen % step != 0 {
            report.push(seen, metric.get());
        }
        Ok(report)
    }
}

/// Evaluator that replays a fixed snapshot value sequence for every row,
/// regardless of the model spec.
pub struct FixedSequenceEvaluator {
    /// Snapshot values replayed per row
    pub values: Vec<f64>,
}

impl ProgressiveEvaluator for FixedSequenceEvaluator {
    fn evaluate_horizon(
        &self,
        _data: &dyn RecordSource,
        _model: &ModelSpec,
        _metric: &dyn Metric,
        _horizon: usize,
        _grace_period: Option<usize>,
    ) -> anyhow::Result<Vec<MetricSnapshot>> {
        Ok(self
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| MetricSnapshot::new(i + 1, v))
            .collect())
    }

    fn evaluate_iter(
        &self,
        _data: &dyn RecordSource,
        _model: &ModelSpec,
        _metric: &dyn Metric,
        _step: usize,
        _verbose: bool,
    ) -> anyhow::Result<ProgressiveReport> {
        let mut report = ProgressiveReport::default();
        for (i, &v) in self.values.iter().enumerate() {
            report.push(i + 1, v);
        }
        Ok(report)
    }
}
