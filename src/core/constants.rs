//! System constants and configuration defaults for streamtune.
//!
//! This module defines the fixed contract surfaces shared across the crate:
//! per-family hyperparameter schema widths, evaluation defaults, and the
//! parameters of the fixed preprocessing templates.

/// Number of hyperparameter columns in the seasonal autoregressive (SNARIMAX) schema.
pub const SNARIMAX_DIM: usize = 12;

/// Number of hyperparameter columns in the Holt-Winters schema.
pub const HOLT_WINTERS_DIM: usize = 5;

/// Number of hyperparameter columns in the Hoeffding tree regressor schema.
pub const HOEFFDING_TREE_DIM: usize = 11;

/// Default step size between checkpoints of the iter-progressive evaluation.
pub const DEFAULT_EVAL_STEP: usize = 10_000;

/// Fixed output width of the categorical/text feature hasher in the
/// Hoeffding tree preprocessing template.
pub const HASHER_WIDTH: usize = 1000;

/// Fixed seed of the categorical/text feature hasher.
/// Kept constant so hashed feature spaces are comparable across rows.
pub const HASHER_SEED: u64 = 1;

/// Default random seed for a tuner instance.
pub const DEFAULT_SEED: u64 = 126;

/// Library version string.
pub const STREAMTUNE_VERSION: &str = env!("CARGO_PKG_VERSION");
