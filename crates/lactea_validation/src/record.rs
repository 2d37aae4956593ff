//! Per-day validation records
//!
//! A [`DailyValidationRecord`] is immutable. Correcting a value means building
//! a new record from a new [`DayInput`].

use crate::classifier::{AccuracyClassifier, Verdict};
use crate::error::{Result, ValidationError, VolumeField};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Error percent assigned when real demand is zero but the forecast is not
pub const ZERO_REAL_ERROR_PERCENT: f64 = 100.0;

/// One day's typed input: index, date, simulated and real volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayInput {
    /// 1-based simulation day
    pub day: u32,
    /// Calendar date (informational)
    pub date: NaiveDate,
    pub simulated: f64,
    pub real: f64,
}

impl DayInput {
    pub fn new(day: u32, date: NaiveDate, simulated: f64, real: f64) -> Self {
        Self {
            day,
            date,
            simulated,
            real,
        }
    }
}

/// A validated simulation day with its derived error fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyValidationRecord {
    day: u32,
    date: NaiveDate,
    simulated_value: f64,
    real_value: f64,
    absolute_difference: f64,
    signed_difference: f64,
    error_percent: f64,
    verdict: Verdict,
}

impl DailyValidationRecord {
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn simulated_value(&self) -> f64 {
        self.simulated_value
    }

    pub fn real_value(&self) -> f64 {
        self.real_value
    }

    /// `|simulated - real|`
    pub fn absolute_difference(&self) -> f64 {
        self.absolute_difference
    }

    /// `simulated - real`
    pub fn signed_difference(&self) -> f64 {
        self.signed_difference
    }

    pub fn error_percent(&self) -> f64 {
        self.error_percent
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// The input this record was built from, for rebuilding with a correction
    pub fn input(&self) -> DayInput {
        DayInput::new(self.day, self.date, self.simulated_value, self.real_value)
    }
}

/// Error percent of a (simulated, real) pair.
///
/// Zero real demand is 0% when the forecast is also zero and
/// [`ZERO_REAL_ERROR_PERCENT`] otherwise.
pub fn error_percent(simulated: f64, real: f64) -> f64 {
    let absolute = (simulated - real).abs();
    if real == 0.0 {
        if absolute == 0.0 {
            0.0
        } else {
            ZERO_REAL_ERROR_PERCENT
        }
    } else {
        percent_of(absolute, real)
    }
}

/// `part / whole` as a percentage, without overflowing on the `* 100` step
/// when both operands are near `f64::MAX`.
///
/// Still infinite when the true ratio is beyond `f64` range.
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    let percent = part * 100.0 / whole;
    if percent.is_finite() {
        percent
    } else {
        part / whole * 100.0
    }
}

/// A day that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayFailure {
    pub day: u32,
    #[serde(serialize_with = "serialize_error")]
    pub error: ValidationError,
}

fn serialize_error<S: serde::Serializer>(
    error: &ValidationError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&error.to_string())
}

/// Records and per-day failures from a batch build
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildOutcome {
    pub records: Vec<DailyValidationRecord>,
    pub failures: Vec<DayFailure>,
}

impl BuildOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failed_days(&self) -> Vec<u32> {
        self.failures.iter().map(|f| f.day).collect()
    }
}

/// Builds [`DailyValidationRecord`]s, delegating verdicts to a classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBuilder {
    classifier: AccuracyClassifier,
}

impl RecordBuilder {
    pub fn new(classifier: AccuracyClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &AccuracyClassifier {
        &self.classifier
    }

    /// Build one record.
    ///
    /// Negative or non-finite volumes are an upstream integrity bug: they are
    /// logged and returned as [`ValidationError::InvalidVolume`], never clamped.
    pub fn build(&self, input: DayInput) -> Result<DailyValidationRecord> {
        if input.day == 0 {
            return Err(ValidationError::InvalidDay(input.day));
        }
        check_volume(input.day, VolumeField::Simulated, input.simulated)?;
        check_volume(input.day, VolumeField::Real, input.real)?;

        let signed_difference = input.simulated - input.real;
        let error_percent = error_percent(input.simulated, input.real);
        let verdict = self.classifier.classify(error_percent)?;

        Ok(DailyValidationRecord {
            day: input.day,
            date: input.date,
            simulated_value: input.simulated,
            real_value: input.real,
            absolute_difference: signed_difference.abs(),
            signed_difference,
            error_percent,
            verdict,
        })
    }

    /// Build every day, collecting failures instead of stopping at the first.
    ///
    /// A repeated day index is reported as [`ValidationError::DuplicateDay`];
    /// the first occurrence wins.
    pub fn build_all<I>(&self, inputs: I) -> BuildOutcome
    where
        I: IntoIterator<Item = DayInput>,
    {
        let mut outcome = BuildOutcome::default();
        let mut seen = HashSet::new();

        for input in inputs {
            if !seen.insert(input.day) {
                outcome.failures.push(DayFailure {
                    day: input.day,
                    error: ValidationError::DuplicateDay(input.day),
                });
                continue;
            }
            match self.build(input) {
                Ok(record) => outcome.records.push(record),
                Err(error) => outcome.failures.push(DayFailure {
                    day: input.day,
                    error,
                }),
            }
        }

        debug!(
            built = outcome.records.len(),
            failed = outcome.failures.len(),
            "Built validation records"
        );
        outcome
    }
}

fn check_volume(day: u32, field: VolumeField, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    warn!(day, %field, value, "Rejected invalid volume");
    Err(ValidationError::InvalidVolume { day, field, value })
}
