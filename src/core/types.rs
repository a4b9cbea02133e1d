//! Core data types for streamtune.
//!
//! This module defines the fundamental value types exchanged between the
//! objective-function engine and its external collaborators: streaming
//! observations, metric snapshot sequences, and the verbosity enumeration.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::error::{Result, TuneError};

/// Verbosity level for logging during batch evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// No progress output
    Silent,
    /// Per-batch progress output
    Progress,
    /// Per-row decoded hyperparameter output
    Detailed,
}

impl Default for VerbosityLevel {
    fn default() -> Self {
        VerbosityLevel::Silent
    }
}

impl fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbosityLevel::Silent => write!(f, "silent"),
            VerbosityLevel::Progress => write!(f, "progress"),
            VerbosityLevel::Detailed => write!(f, "detailed"),
        }
    }
}

/// A single field value in a streaming record.
///
/// Numeric fields are routed through scaling by the tree-family
/// preprocessing template; text fields are routed through hashing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Continuous or integer-valued field
    Numeric(f64),
    /// Categorical/text field
    Text(String),
}

/// One timestamped record of a streaming dataset.
///
/// The timestamp feeds the calendar feature extractors; the remaining
/// fields and the target are consumed by the external learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation timestamp
    pub timestamp: NaiveDateTime,
    /// Named input fields
    pub fields: BTreeMap<String, FieldValue>,
    /// Observed target value
    pub target: f64,
}

impl Observation {
    /// Create an observation with a timestamp and target but no extra fields.
    pub fn new(timestamp: NaiveDateTime, target: f64) -> Self {
        Observation {
            timestamp,
            fields: BTreeMap::new(),
            target,
        }
    }

    /// Add a named numeric field.
    pub fn with_numeric<S: Into<String>>(mut self, name: S, value: f64) -> Self {
        self.fields.insert(name.into(), FieldValue::Numeric(value));
        self
    }

    /// Add a named text field.
    pub fn with_text<S: Into<String>, V: Into<String>>(mut self, name: S, value: V) -> Self {
        self.fields.insert(name.into(), FieldValue::Text(value.into()));
        self
    }
}

/// One per-step metric reading produced by horizon-based progressive
/// evaluation of a forecasting model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    /// Forecast step (1-based offset within the horizon)
    pub step: usize,
    /// Metric value at this step
    pub value: f64,
}

impl MetricSnapshot {
    /// Create a new metric snapshot.
    pub fn new(step: usize, value: f64) -> Self {
        MetricSnapshot { step, value }
    }
}

/// One checkpoint of an iter-progressive evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Number of observations processed so far
    pub seen: usize,
    /// Metric value at this checkpoint
    pub value: f64,
}

/// Raw per-step result of an iter-progressive evaluation run, reduced to a
/// scalar by [`ProgressiveReport::score`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveReport {
    /// Metric checkpoints in processing order
    pub checkpoints: Vec<Checkpoint>,
}

impl ProgressiveReport {
    /// Create a report from raw checkpoints.
    pub fn new(checkpoints: Vec<Checkpoint>) -> Self {
        ProgressiveReport { checkpoints }
    }

    /// Record one checkpoint.
    pub fn push(&mut self, seen: usize, value: f64) {
        self.checkpoints.push(Checkpoint { seen, value });
    }

    /// Reduce the report to a scalar: the arithmetic mean of the checkpoint
    /// metric values. Fails on an empty report, since a run that produced
    /// no checkpoints has no defined score.
    pub fn score(&self) -> Result<f64> {
        if self.checkpoints.is_empty() {
            return Err(TuneError::evaluation(
                "progressive report contains no checkpoints",
            ));
        }
        let sum: f64 = self.checkpoints.iter().map(|c| c.value).sum();
        Ok(sum / self.checkpoints.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1961, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_observation_builder() {
        let obs = Observation::new(ts(), 42.0)
            .with_numeric("passengers", 112.0)
            .with_text("airport", "JFK");
        assert_eq!(obs.fields.len(), 2);
        assert_eq!(
            obs.fields.get("passengers"),
            Some(&FieldValue::Numeric(112.0))
        );
        assert_eq!(
            obs.fields.get("airport"),
            Some(&FieldValue::Text("JFK".to_string()))
        );
    }

    #[test]
    fn test_report_score_is_mean() {
        let mut report = ProgressiveReport::default();
        report.push(10_000, 1.0);
        report.push(20_000, 2.0);
        report.push(30_000, 3.0);
        assert_relative_eq!(report.score().unwrap(), 2.0);
    }

    #[test]
    fn test_empty_report_has_no_score() {
        let report = ProgressiveReport::default();
        assert!(report.score().is_err());
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(VerbosityLevel::Silent < VerbosityLevel::Progress);
        assert!(VerbosityLevel::Progress < VerbosityLevel::Detailed);
    }
}
