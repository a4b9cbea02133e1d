//! Categorical hyperparameter selectors.
//!
//! An external optimizer hands this crate raw numeric hyperparameter rows;
//! conceptually categorical entries arrive as small integer codes. Each
//! selector here is a closed enum with a total `from_code` decode over its
//! documented domain. The code ordering is a contract surface: reordering
//! variants changes behavior for every prior caller, so the mappings below
//! are part of the external interface.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{Result, TuneError};

/// Split-observer strategy used by the Hoeffding tree to monitor numeric
/// feature statistics and propose splits.
///
/// Code contract: `0` → EBST, `1` → truncated EBST, `2` → quantile observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitterStrategy {
    /// Extended binary search tree observer
    Ebst,
    /// Truncated extended binary search tree observer
    Tebst,
    /// Quantile-based observer
    QuantileObserver,
}

impl SplitterStrategy {
    /// Decode an integer code into a splitter strategy.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(SplitterStrategy::Ebst),
            1 => Ok(SplitterStrategy::Tebst),
            2 => Ok(SplitterStrategy::QuantileObserver),
            _ => Err(TuneError::UnknownCode {
                selector: "splitter",
                code,
                domain: "0..=2",
            }),
        }
    }

    /// Inverse of [`SplitterStrategy::from_code`].
    pub fn code(&self) -> i64 {
        match self {
            SplitterStrategy::Ebst => 0,
            SplitterStrategy::Tebst => 1,
            SplitterStrategy::QuantileObserver => 2,
        }
    }
}

impl Default for SplitterStrategy {
    fn default() -> Self {
        SplitterStrategy::Tebst
    }
}

impl fmt::Display for SplitterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitterStrategy::Ebst => write!(f, "ebst"),
            SplitterStrategy::Tebst => write!(f, "tebst"),
            SplitterStrategy::QuantileObserver => write!(f, "quantile-observer"),
        }
    }
}

/// Prediction mechanism used at the leaves of the Hoeffding tree.
///
/// Code contract: `0` → target mean, `1` → adaptive choice between mean and
/// leaf model, `2` → leaf model. Note this ordering intentionally places
/// `Adaptive` between the two mechanisms it arbitrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafPrediction {
    /// Predict the target mean of the leaf
    Mean,
    /// Choose dynamically between mean and model per leaf
    Adaptive,
    /// Predict with the configured leaf model
    Model,
}

impl LeafPrediction {
    /// Decode an integer code into a leaf-prediction mode.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(LeafPrediction::Mean),
            1 => Ok(LeafPrediction::Adaptive),
            2 => Ok(LeafPrediction::Model),
            _ => Err(TuneError::UnknownCode {
                selector: "leaf_prediction",
                code,
                domain: "0..=2",
            }),
        }
    }

    /// Inverse of [`LeafPrediction::from_code`].
    pub fn code(&self) -> i64 {
        match self {
            LeafPrediction::Mean => 0,
            LeafPrediction::Adaptive => 1,
            LeafPrediction::Model => 2,
        }
    }
}

impl Default for LeafPrediction {
    fn default() -> Self {
        LeafPrediction::Adaptive
    }
}

impl fmt::Display for LeafPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafPrediction::Mean => write!(f, "mean"),
            LeafPrediction::Adaptive => write!(f, "adaptive"),
            LeafPrediction::Model => write!(f, "model"),
        }
    }
}

/// Regression model used at the leaves when [`LeafPrediction`] involves a
/// model.
///
/// Code contract: `0` → linear regression, `1` → passive-aggressive
/// regressor, `2` → perceptron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafModel {
    /// Online linear regression
    LinearRegression,
    /// Passive-aggressive regressor
    PassiveAggressive,
    /// Perceptron regressor
    Perceptron,
}

impl LeafModel {
    /// Decode an integer code into a leaf-model type.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(LeafModel::LinearRegression),
            1 => Ok(LeafModel::PassiveAggressive),
            2 => Ok(LeafModel::Perceptron),
            _ => Err(TuneError::UnknownCode {
                selector: "leaf_model",
                code,
                domain: "0..=2",
            }),
        }
    }

    /// Inverse of [`LeafModel::from_code`].
    pub fn code(&self) -> i64 {
        match self {
            LeafModel::LinearRegression => 0,
            LeafModel::PassiveAggressive => 1,
            LeafModel::Perceptron => 2,
        }
    }
}

impl Default for LeafModel {
    fn default() -> Self {
        LeafModel::LinearRegression
    }
}

impl fmt::Display for LeafModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafModel::LinearRegression => write!(f, "linear-regression"),
            LeafModel::PassiveAggressive => write!(f, "passive-aggressive"),
            LeafModel::Perceptron => write!(f, "perceptron"),
        }
    }
}

/// Maximum depth of the Hoeffding tree, bounded or unbounded.
///
/// Code contract: `0` → 10, `1` → 20, `2` → 50, `3` → 100, `4` → unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxDepth {
    /// Grow the tree up to the given depth
    Bounded(usize),
    /// Grow the tree indefinitely
    Unbounded,
}

impl MaxDepth {
    const DEPTHS: [usize; 4] = [10, 20, 50, 100];

    /// Decode an integer code into a depth limit.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0..=3 => Ok(MaxDepth::Bounded(Self::DEPTHS[code as usize])),
            4 => Ok(MaxDepth::Unbounded),
            _ => Err(TuneError::UnknownCode {
                selector: "max_depth",
                code,
                domain: "0..=4",
            }),
        }
    }

    /// Inverse of [`MaxDepth::from_code`] for values `from_code` can
    /// produce. Bounded depths off the documented ladder map to the
    /// unbounded code.
    pub fn code(&self) -> i64 {
        match self {
            MaxDepth::Bounded(d) => Self::DEPTHS
                .iter()
                .position(|x| x == d)
                .map(|i| i as i64)
                .unwrap_or(4),
            MaxDepth::Unbounded => 4,
        }
    }

    /// The depth limit as an option, `None` meaning unbounded.
    pub fn limit(&self) -> Option<usize> {
        match self {
            MaxDepth::Bounded(d) => Some(*d),
            MaxDepth::Unbounded => None,
        }
    }
}

impl Default for MaxDepth {
    fn default() -> Self {
        MaxDepth::Unbounded
    }
}

impl fmt::Display for MaxDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxDepth::Bounded(d) => write!(f, "{}", d),
            MaxDepth::Unbounded => write!(f, "unbounded"),
        }
    }
}
