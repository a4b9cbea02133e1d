//! Calendar feature extraction for timestamped records.
//!
//! Feature extractors are named pure functions from a timestamp to a keyed
//! feature mapping. The pipeline always carries the ordinal-date base
//! extractor; the hour, weekday, and month distance encodings are unioned in
//! by flag. Extractors run independently and their outputs are merged by
//! key; the key sets are pairwise disjoint by construction, and `BTreeMap`
//! keeps key iteration order deterministic for downstream learners.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Feature map produced by extractors: ordered keys, float values.
pub type FeatureMap = BTreeMap<String, f64>;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Ordinal date of the timestamp: days since the Common Era.
pub fn ordinal_date(ts: &NaiveDateTime) -> FeatureMap {
    let mut out = FeatureMap::new();
    out.insert("ordinal_date".to_string(), ts.date().num_days_from_ce() as f64);
    out
}

/// Gaussian distance encoding of the hour of day: one key per hour,
/// `exp(-(h - k)^2)` for k in 0..24. Keys are zero-padded so their
/// lexicographic order matches the hour order.
pub fn hour_distances(ts: &NaiveDateTime) -> FeatureMap {
    let h = ts.hour() as i64;
    (0..24)
        .map(|k| {
            let d = (h - k) as f64;
            (format!("hour_{:02}", k), (-d * d).exp())
        })
        .collect()
}

/// Gaussian distance encoding of the weekday: one key per English day name,
/// `exp(-(w - k)^2)` for k in 0..7 with Monday = 0.
pub fn weekday_distances(ts: &NaiveDateTime) -> FeatureMap {
    let w = ts.weekday().num_days_from_monday() as i64;
    WEEKDAY_NAMES
        .iter()
        .enumerate()
        .map(|(k, name)| {
            let d = (w - k as i64) as f64;
            (name.to_string(), (-d * d).exp())
        })
        .collect()
}

/// Gaussian distance encoding of the month: one key per English month name,
/// `exp(-(m - k)^2)` for k in 1..=12.
pub fn month_distances(ts: &NaiveDateTime) -> FeatureMap {
    let m = ts.month() as i64;
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let d = (m - (i as i64 + 1)) as f64;
            (name.to_string(), (-d * d).exp())
        })
        .collect()
}

/// The calendar feature extractors available to the pipeline, as a closed
/// set of tagged variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarFeature {
    /// Days since the Common Era
    OrdinalDate,
    /// Hour-of-day distance encoding
    HourDistances,
    /// Weekday distance encoding
    WeekdayDistances,
    /// Month distance encoding
    MonthDistances,
}

impl CalendarFeature {
    /// Run the extractor on one timestamp.
    pub fn apply(&self, ts: &NaiveDateTime) -> FeatureMap {
        match self {
            CalendarFeature::OrdinalDate => ordinal_date(ts),
            CalendarFeature::HourDistances => hour_distances(ts),
            CalendarFeature::WeekdayDistances => weekday_distances(ts),
            CalendarFeature::MonthDistances => month_distances(ts),
        }
    }

    /// Extractor name for logging and serialized specs.
    pub fn name(&self) -> &'static str {
        match self {
            CalendarFeature::OrdinalDate => "ordinal_date",
            CalendarFeature::HourDistances => "hour_distances",
            CalendarFeature::WeekdayDistances => "weekday_distances",
            CalendarFeature::MonthDistances => "month_distances",
        }
    }
}

/// Boolean activation flags for the optional extractors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Include the hour-of-day encoding
    pub hour: bool,
    /// Include the weekday encoding
    pub weekday: bool,
    /// Include the month encoding
    pub month: bool,
}

/// A deterministic union of calendar feature extractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePipeline {
    extractors: Vec<CalendarFeature>,
}

impl FeaturePipeline {
    /// Build a pipeline from activation flags. The ordinal-date base
    /// extractor is always included; flagged extractors are appended in the
    /// fixed order hour, weekday, month.
    pub fn from_flags(flags: FeatureFlags) -> Self {
        let candidates = [
            (true, CalendarFeature::OrdinalDate),
            (flags.hour, CalendarFeature::HourDistances),
            (flags.weekday, CalendarFeature::WeekdayDistances),
            (flags.month, CalendarFeature::MonthDistances),
        ];
        FeaturePipeline {
            extractors: candidates
                .into_iter()
                .filter_map(|(active, feature)| active.then_some(feature))
                .collect(),
        }
    }

    /// The extractors in composition order.
    pub fn extractors(&self) -> &[CalendarFeature] {
        &self.extractors
    }

    /// Run every extractor on one timestamp and merge the outputs by key.
    pub fn transform(&self, ts: &NaiveDateTime) -> FeatureMap {
        let mut out = FeatureMap::new();
        for extractor in &self.extractors {
            for (key, value) in extractor.apply(ts) {
                let previous = out.insert(key, value);
                debug_assert!(previous.is_none(), "extractor output keys must be disjoint");
            }
        }
        out
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        FeaturePipeline::from_flags(FeatureFlags::default())
    }
}
