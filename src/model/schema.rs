//! Hyperparameter schemas for the supported model families.
//!
//! A schema is the named, ordered list of columns a family expects in each
//! hyperparameter row, together with the decode rule applied to each column.
//! Column order and count are contract surfaces: a row or matrix with the
//! wrong width is a caller defect and aborts the objective call before any
//! row is evaluated.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TuneError};

/// Decode rule applied to one hyperparameter column.
///
/// Numeric columns are explicitly cast at decode time (integer truncation or
/// float identity); this cast is part of the contract because the outer
/// optimizer may supply continuous-relaxed values for conceptually discrete
/// hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Truncating cast to integer
    Int,
    /// Identity cast to float
    Float,
    /// Truncating cast to integer, then nonzero test
    Bool,
    /// Truncating cast to integer, then selector lookup
    Selector(&'static str),
}

/// One named schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Hyperparameter name
    pub name: &'static str,
    /// Decode rule
    pub kind: ColumnKind,
}

const fn col(name: &'static str, kind: ColumnKind) -> Column {
    Column { name, kind }
}

/// Ordered column schema of one model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Model family name
    pub family: &'static str,
    /// Columns in row order
    pub columns: &'static [Column],
}

impl Schema {
    /// Required column count.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Validate an actual column count against this schema.
    pub fn validate_width(&self, actual: usize) -> Result<()> {
        if actual != self.width() {
            return Err(TuneError::SchemaMismatch {
                family: self.family,
                expected: self.width(),
                actual,
            });
        }
        Ok(())
    }
}

/// Schema of the seasonal autoregressive (SNARIMAX) family.
pub const SNARIMAX_SCHEMA: Schema = Schema {
    family: "snarimax",
    columns: &[
        col("p", ColumnKind::Int),
        col("d", ColumnKind::Int),
        col("q", ColumnKind::Int),
        col("m", ColumnKind::Int),
        col("sp", ColumnKind::Int),
        col("sd", ColumnKind::Int),
        col("sq", ColumnKind::Int),
        col("lr", ColumnKind::Float),
        col("intercept_lr", ColumnKind::Float),
        col("hour", ColumnKind::Bool),
        col("weekday", ColumnKind::Bool),
        col("month", ColumnKind::Bool),
    ],
};

/// Schema of the Holt-Winters exponential-smoothing family.
pub const HOLT_WINTERS_SCHEMA: Schema = Schema {
    family: "holt_winters",
    columns: &[
        col("alpha", ColumnKind::Float),
        col("beta", ColumnKind::Float),
        col("gamma", ColumnKind::Float),
        col("seasonality", ColumnKind::Int),
        col("multiplicative", ColumnKind::Bool),
    ],
};

/// Schema of the Hoeffding tree regressor family.
pub const HOEFFDING_TREE_SCHEMA: Schema = Schema {
    family: "hoeffding_tree",
    columns: &[
        col("grace_period", ColumnKind::Int),
        col("max_depth", ColumnKind::Selector("max_depth")),
        col("delta", ColumnKind::Float),
        col("tau", ColumnKind::Float),
        col("leaf_prediction", ColumnKind::Selector("leaf_prediction")),
        col("leaf_model", ColumnKind::Selector("leaf_model")),
        col("model_selector_decay", ColumnKind::Float),
        col("splitter", ColumnKind::Selector("splitter")),
        col("min_samples_split", ColumnKind::Int),
        col("binary_split", ColumnKind::Bool),
        col("max_size", ColumnKind::Float),
    ],
};
