//! Model configuration builders for the supported families.
//!
//! A model builder turns one validated hyperparameter row into the
//! structured configuration of a complete streaming model: a feature
//! extraction stage, a preprocessing stage, and a learner stage, assembled
//! on the fixed structural template of its family. Configurations are built
//! fresh per row and never shared across rows.

pub mod schema;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::config::selectors::{LeafModel, LeafPrediction, MaxDepth, SplitterStrategy};
use crate::core::constants::{HASHER_SEED, HASHER_WIDTH};
use crate::core::error::Result;
use crate::features::{FeatureFlags, FeaturePipeline};
use schema::{Schema, HOEFFDING_TREE_SCHEMA, HOLT_WINTERS_SCHEMA, SNARIMAX_SCHEMA};

/// Inner learner of the SNARIMAX template: a standard scaler piped into an
/// online linear regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledRegressor {
    /// SGD learning rate of the linear regression
    pub learning_rate: f64,
    /// Learning rate of the intercept term
    pub intercept_lr: f64,
}

/// Configuration of the seasonal autoregressive family.
///
/// Template: calendar feature pipeline → SNARIMAX learner wrapping a
/// scaler + linear-regression inner model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnarimaxSpec {
    /// Autoregressive order
    pub p: usize,
    /// Differencing order
    pub d: usize,
    /// Moving-average order
    pub q: usize,
    /// Season length
    pub m: usize,
    /// Seasonal autoregressive order
    pub sp: usize,
    /// Seasonal differencing order
    pub sd: usize,
    /// Seasonal moving-average order
    pub sq: usize,
    /// Inner regression learner
    pub regressor: ScaledRegressor,
    /// Calendar feature pipeline
    pub features: FeaturePipeline,
}

impl SnarimaxSpec {
    /// Schema of this family.
    pub fn schema() -> Schema {
        SNARIMAX_SCHEMA
    }

    /// Decode one hyperparameter row into a model configuration.
    ///
    /// Integer-valued hyperparameters are truncated from the raw floats;
    /// the three trailing columns are nonzero-tested feature flags.
    pub fn from_row(row: ArrayView1<'_, f64>) -> Result<Self> {
        Self::schema().validate_width(row.len())?;
        Ok(SnarimaxSpec {
            p: row[0] as usize,
            d: row[1] as usize,
            q: row[2] as usize,
            m: row[3] as usize,
            sp: row[4] as usize,
            sd: row[5] as usize,
            sq: row[6] as usize,
            regressor: ScaledRegressor {
                learning_rate: row[7],
                intercept_lr: row[8],
            },
            features: FeaturePipeline::from_flags(FeatureFlags {
                hour: row[9] as i64 != 0,
                weekday: row[10] as i64 != 0,
                month: row[11] as i64 != 0,
            }),
        })
    }
}

/// Configuration of the Holt-Winters exponential-smoothing family.
///
/// Template: a single learner, no feature pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoltWintersSpec {
    /// Level smoothing factor
    pub alpha: f64,
    /// Trend smoothing factor
    pub beta: f64,
    /// Seasonal smoothing factor
    pub gamma: f64,
    /// Number of periods in a season
    pub seasonality: usize,
    /// Multiplicative (vs additive) formulation
    pub multiplicative: bool,
}

impl HoltWintersSpec {
    /// Schema of this family.
    pub fn schema() -> Schema {
        HOLT_WINTERS_SCHEMA
    }

    /// Decode one hyperparameter row into a model configuration.
    pub fn from_row(row: ArrayView1<'_, f64>) -> Result<Self> {
        Self::schema().validate_width(row.len())?;
        Ok(HoltWintersSpec {
            alpha: row[0],
            beta: row[1],
            gamma: row[2],
            seasonality: row[3] as usize,
            multiplicative: row[4] as i64 != 0,
        })
    }
}

/// Fixed preprocessing template of the Hoeffding tree family: numeric
/// fields are routed through standard scaling, text fields through a
/// fixed-width hashing transform, and the two branches are unioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularPreprocessing {
    /// Output width of the text feature hasher
    pub hash_width: usize,
    /// Seed of the text feature hasher
    pub hash_seed: u64,
}

impl Default for TabularPreprocessing {
    fn default() -> Self {
        TabularPreprocessing {
            hash_width: HASHER_WIDTH,
            hash_seed: HASHER_SEED,
        }
    }
}

/// Configuration of the Hoeffding tree regressor family.
///
/// Template: scaling/hashing preprocessing branches → tree learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoeffdingTreeSpec {
    /// Observations a leaf observes between split attempts
    pub grace_period: usize,
    /// Depth limit
    pub max_depth: MaxDepth,
    /// Significance level for the Hoeffding bound
    pub delta: f64,
    /// Tie-breaking threshold
    pub tau: f64,
    /// Leaf prediction mechanism
    pub leaf_prediction: LeafPrediction,
    /// Leaf regression model
    pub leaf_model: LeafModel,
    /// Exponential decay applied to monitored leaf-model errors
    pub model_selector_decay: f64,
    /// Split-observer strategy
    pub splitter: SplitterStrategy,
    /// Minimum samples per split branch
    pub min_samples_split: usize,
    /// Allow only binary splits
    pub binary_split: bool,
    /// Maximum tree size in megabytes
    pub max_size_mb: f64,
    /// Input preprocessing template
    pub preprocessing: TabularPreprocessing,
}

impl HoeffdingTreeSpec {
    /// Schema of this family.
    pub fn schema() -> Schema {
        HOEFFDING_TREE_SCHEMA
    }

    /// Decode one hyperparameter row into a model configuration.
    ///
    /// Selector columns are truncated to integer codes and decoded through
    /// their selectors; an out-of-domain code fails the build (no silent
    /// default).
    pub fn from_row(row: ArrayView1<'_, f64>) -> Result<Self> {
        Self::schema().validate_width(row.len())?;
        Ok(HoeffdingTreeSpec {
            grace_period: row[0] as usize,
            max_depth: MaxDepth::from_code(row[1] as i64)?,
            delta: row[2],
            tau: row[3],
            leaf_prediction: LeafPrediction::from_code(row[4] as i64)?,
            leaf_model: LeafModel::from_code(row[5] as i64)?,
            model_selector_decay: row[6],
            splitter: SplitterStrategy::from_code(row[7] as i64)?,
            min_samples_split: row[8] as usize,
            binary_split: row[9] as i64 != 0,
            max_size_mb: row[10],
            preprocessing: TabularPreprocessing::default(),
        })
    }
}

/// A fully decoded model configuration of any supported family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelSpec {
    /// Seasonal autoregressive family
    Snarimax(SnarimaxSpec),
    /// Exponential-smoothing family
    HoltWinters(HoltWintersSpec),
    /// Streaming regression-tree family
    HoeffdingTree(HoeffdingTreeSpec),
}

impl ModelSpec {
    /// Family name of this configuration.
    pub fn family(&self) -> &'static str {
        match self {
            ModelSpec::Snarimax(_) => SNARIMAX_SCHEMA.family,
            ModelSpec::HoltWinters(_) => HOLT_WINTERS_SCHEMA.family,
            ModelSpec::HoeffdingTree(_) => HOEFFDING_TREE_SCHEMA.family,
        }
    }

    /// Serialize this configuration to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
