//! Default evaluation metric.
//!
//! Metric implementations are external collaborators; the crate ships only
//! the streaming mean absolute error used as the default metric prototype
//! of a fresh control configuration.

use crate::core::traits::Metric;

/// Streaming mean absolute error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mae {
    total: f64,
    count: usize,
}

impl Mae {
    /// Create a fresh MAE accumulator.
    pub fn new() -> Self {
        Mae::default()
    }
}

impl Metric for Mae {
    fn update(&mut self, y_true: f64, y_pred: f64) {
        self.total += (y_true - y_pred).abs();
        self.count += 1;
    }

    fn get(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }

    fn name(&self) -> &'static str {
        "mae"
    }

    fn clone_box(&self) -> Box<dyn Metric> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mae_accumulation() {
        let mut mae = Mae::new();
        assert_relative_eq!(mae.get(), 0.0);
        mae.update(10.0, 8.0);
        mae.update(5.0, 9.0);
        assert_relative_eq!(mae.get(), 3.0);
    }

    #[test]
    fn test_clone_box_detaches_state() {
        let mut mae = Mae::new();
        mae.update(1.0, 0.0);
        let mut fresh = mae.clone_box();
        fresh.update(0.0, 0.0);
        // the clone carries the prototype's state forward independently
        assert_relative_eq!(mae.get(), 1.0);
        assert_relative_eq!(fresh.get(), 0.5);
    }
}
