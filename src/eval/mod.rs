//! Progressive evaluation support: reduction routines and the default
//! metric.
//!
//! The evaluation procedures themselves are external collaborators behind
//! [`crate::core::traits::ProgressiveEvaluator`]; this module reduces their
//! outputs to scalars. The horizon-based families reduce a metric snapshot
//! sequence by arithmetic mean; the tree family reduces its progressive
//! report via [`crate::core::types::ProgressiveReport::score`] and applies
//! the sample-count normalization in the objective driver.

pub mod metric;

pub use metric::Mae;

use crate::core::error::{Result, TuneError};
use crate::core::types::MetricSnapshot;

/// Reduce a metric snapshot sequence to its arithmetic mean.
///
/// Fails on an empty sequence: an evaluation that produced no snapshots has
/// no defined objective value.
pub fn mean_of_snapshots(snapshots: &[MetricSnapshot]) -> Result<f64> {
    if snapshots.is_empty() {
        return Err(TuneError::evaluation(
            "metric snapshot sequence is empty",
        ));
    }
    let sum: f64 = snapshots.iter().map(|s| s.value).sum();
    Ok(sum / snapshots.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_of_known_sequence() {
        let snapshots = vec![
            MetricSnapshot::new(1, 1.0),
            MetricSnapshot::new(2, 2.0),
            MetricSnapshot::new(3, 3.0),
        ];
        assert_relative_eq!(mean_of_snapshots(&snapshots).unwrap(), 2.0);
    }

    #[test]
    fn test_single_snapshot() {
        let snapshots = vec![MetricSnapshot::new(1, 4.5)];
        assert_relative_eq!(mean_of_snapshots(&snapshots).unwrap(), 4.5);
    }

    #[test]
    fn test_empty_sequence_is_an_evaluation_error() {
        let err = mean_of_snapshots(&[]).unwrap_err();
        assert!(err.is_recoverable());
    }
}
