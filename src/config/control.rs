//! Control configuration for objective-function evaluation.
//!
//! The control configuration holds the cross-row constants of an
//! optimization run: dataset handle, evaluation horizon, grace period,
//! metric prototype, verbosity, and the tree-family sample-count divisor.
//! It is created once per run, merged with caller-supplied overrides at
//! every objective call, and read-only while rows are processed.

use std::fmt;
use std::sync::Arc;

use crate::core::constants::{DEFAULT_EVAL_STEP, DEFAULT_SEED};
use crate::core::error::{Result, TuneError};
use crate::core::traits::{Metric, RecordSource};
use crate::core::types::VerbosityLevel;
use crate::eval::Mae;

/// Cross-row constants of one optimization run.
#[derive(Clone)]
pub struct EvalControl {
    /// Random seed carried through to evaluators that sample.
    pub seed: u64,
    /// Logging verbosity during batch evaluation.
    pub verbosity: VerbosityLevel,
    /// Handle to the streaming dataset.
    pub data: Option<Arc<dyn RecordSource>>,
    /// Forecast horizon for horizon-based evaluation.
    pub horizon: Option<usize>,
    /// Initial span of observations excluded from metric accumulation.
    /// Defaults to the horizon when unset.
    pub grace_period: Option<usize>,
    /// Checkpoint step size for iter-progressive evaluation.
    pub step: usize,
    /// Sample-count divisor applied to the tree-family score.
    pub n_samples: Option<usize>,
    /// Metric prototype; each row evaluation clones a fresh instance.
    pub metric: Box<dyn Metric>,
    /// Evaluate rows in parallel. Output order still matches input order.
    pub parallel: bool,
}

impl Default for EvalControl {
    fn default() -> Self {
        EvalControl {
            seed: DEFAULT_SEED,
            verbosity: VerbosityLevel::Silent,
            data: None,
            horizon: None,
            grace_period: None,
            step: DEFAULT_EVAL_STEP,
            n_samples: None,
            metric: Box::new(Mae::new()),
            parallel: false,
        }
    }
}

impl fmt::Debug for EvalControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalControl")
            .field("seed", &self.seed)
            .field("verbosity", &self.verbosity)
            .field("data", &self.data.as_ref().map(|d| d.len_hint()))
            .field("horizon", &self.horizon)
            .field("grace_period", &self.grace_period)
            .field("step", &self.step)
            .field("n_samples", &self.n_samples)
            .field("metric", &self.metric.name())
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl EvalControl {
    /// Merge caller-supplied overrides into this control configuration.
    /// Set override fields take precedence; unset fields leave the current
    /// values untouched.
    pub fn apply(&mut self, overrides: &ControlOverrides) {
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(verbosity) = overrides.verbosity {
            self.verbosity = verbosity;
        }
        if let Some(ref data) = overrides.data {
            self.data = Some(Arc::clone(data));
        }
        if let Some(horizon) = overrides.horizon {
            self.horizon = Some(horizon);
        }
        if let Some(grace_period) = overrides.grace_period {
            self.grace_period = Some(grace_period);
        }
        if let Some(step) = overrides.step {
            self.step = step;
        }
        if let Some(n_samples) = overrides.n_samples {
            self.n_samples = Some(n_samples);
        }
        if let Some(ref metric) = overrides.metric {
            self.metric = metric.clone();
        }
        if let Some(parallel) = overrides.parallel {
            self.parallel = parallel;
        }
    }

    /// The dataset handle, or a control error when none was supplied.
    pub fn data(&self) -> Result<&Arc<dyn RecordSource>> {
        self.data
            .as_ref()
            .ok_or_else(|| TuneError::control("no dataset handle configured"))
    }

    /// The forecast horizon, or a control error when none was supplied.
    pub fn horizon(&self) -> Result<usize> {
        self.horizon
            .ok_or_else(|| TuneError::control("no evaluation horizon configured"))
    }

    /// The sample-count divisor, or a control error when none was supplied.
    pub fn n_samples(&self) -> Result<usize> {
        match self.n_samples {
            Some(0) => Err(TuneError::invalid_parameter(
                "n_samples",
                "0",
                "sample-count divisor must be positive",
            )),
            Some(n) => Ok(n),
            None => Err(TuneError::control("no sample count configured")),
        }
    }

    /// The grace period, defaulting to the horizon when unset.
    pub fn effective_grace_period(&self) -> Option<usize> {
        self.grace_period.or(self.horizon)
    }
}

/// Caller-supplied per-call overrides of the control configuration.
///
/// All fields are optional; only set fields are merged.
#[derive(Clone, Default)]
pub struct ControlOverrides {
    /// Override the random seed.
    pub seed: Option<u64>,
    /// Override the verbosity level.
    pub verbosity: Option<VerbosityLevel>,
    /// Override the dataset handle.
    pub data: Option<Arc<dyn RecordSource>>,
    /// Override the forecast horizon.
    pub horizon: Option<usize>,
    /// Override the grace period.
    pub grace_period: Option<usize>,
    /// Override the iter-progressive checkpoint step.
    pub step: Option<usize>,
    /// Override the sample-count divisor.
    pub n_samples: Option<usize>,
    /// Override the metric prototype.
    pub metric: Option<Box<dyn Metric>>,
    /// Override parallel row evaluation.
    pub parallel: Option<bool>,
}

impl fmt::Debug for ControlOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlOverrides")
            .field("seed", &self.seed)
            .field("verbosity", &self.verbosity)
            .field("data", &self.data.is_some())
            .field("horizon", &self.horizon)
            .field("grace_period", &self.grace_period)
            .field("step", &self.step)
            .field("n_samples", &self.n_samples)
            .field("metric", &self.metric.as_ref().map(|m| m.name()))
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl ControlOverrides {
    /// Empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dataset handle.
    pub fn with_data(mut self, data: Arc<dyn RecordSource>) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the forecast horizon.
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Set the grace period.
    pub fn with_grace_period(mut self, grace_period: usize) -> Self {
        self.grace_period = Some(grace_period);
        self
    }

    /// Set the sample-count divisor.
    pub fn with_n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = Some(n_samples);
        self
    }

    /// Set the metric prototype.
    pub fn with_metric(mut self, metric: Box<dyn Metric>) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Set the verbosity level.
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = Some(verbosity);
        self
    }

    /// Set parallel row evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}
