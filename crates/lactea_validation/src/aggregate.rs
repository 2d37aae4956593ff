//! Verdict distribution and volume totals over a record set

use crate::classifier::{AccuracyClassifier, Verdict};
use crate::error::Result;
use crate::record::{
    error_percent, percent_of, BuildOutcome, DailyValidationRecord, DayFailure, DayInput,
    RecordBuilder, ZERO_REAL_ERROR_PERCENT,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregate over a sequence of [`DailyValidationRecord`]s.
///
/// Always rebuilt from records with [`aggregate`]; never patched field by field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_days: usize,
    pub precise_count: usize,
    pub acceptable_count: usize,
    pub inaccurate_count: usize,
    pub total_simulated: f64,
    pub total_real: f64,
    pub total_absolute_difference: f64,
    /// Volume-weighted error: total absolute difference over total real demand
    pub overall_error_percent: f64,
    /// Simple mean of per-day error percentages
    pub mean_daily_error_percent: f64,
}

impl ValidationSummary {
    /// Count for one verdict
    pub fn count(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::Precise => self.precise_count,
            Verdict::Acceptable => self.acceptable_count,
            Verdict::Inaccurate => self.inaccurate_count,
        }
    }

    /// Counts in [`Verdict::ALL`] order
    pub fn verdict_distribution(&self) -> [usize; 3] {
        [self.precise_count, self.acceptable_count, self.inaccurate_count]
    }

    /// Share of days that were Precise or Acceptable (0.0 - 1.0)
    pub fn accuracy_ratio(&self) -> f64 {
        if self.total_days == 0 {
            return 0.0;
        }
        (self.precise_count + self.acceptable_count) as f64 / self.total_days as f64
    }

    /// `total_simulated - total_real`
    pub fn signed_difference(&self) -> f64 {
        self.total_simulated - self.total_real
    }

    /// Verdict of the overall error under the given classifier
    pub fn overall_verdict(&self, classifier: &AccuracyClassifier) -> Result<Verdict> {
        classifier.classify(self.overall_error_percent)
    }

    pub fn is_empty(&self) -> bool {
        self.total_days == 0
    }
}

/// Fold records into a [`ValidationSummary`].
///
/// The overall error uses the same zero-demand policy as a single day: 0% when
/// nothing was forecast against nothing, 100% when anything was forecast
/// against zero total demand. The overall error is always finite, even when
/// the volume totals themselves overflow.
pub fn aggregate(records: &[DailyValidationRecord]) -> ValidationSummary {
    let mut summary = ValidationSummary::default();
    let mut error_percent_sum = 0.0;

    for record in records {
        summary.total_days += 1;
        match record.verdict() {
            Verdict::Precise => summary.precise_count += 1,
            Verdict::Acceptable => summary.acceptable_count += 1,
            Verdict::Inaccurate => summary.inaccurate_count += 1,
        }
        summary.total_simulated += record.simulated_value();
        summary.total_real += record.real_value();
        summary.total_absolute_difference += record.absolute_difference();
        error_percent_sum += record.error_percent();
    }

    summary.overall_error_percent = overall_error_percent(
        records,
        summary.total_absolute_difference,
        summary.total_real,
    );
    if summary.total_days > 0 {
        summary.mean_daily_error_percent = error_percent_sum / summary.total_days as f64;
    }

    summary
}

fn weighted_percent(total_absolute: f64, total_real: f64) -> f64 {
    if total_real > 0.0 {
        percent_of(total_absolute, total_real)
    } else {
        error_percent(total_absolute, 0.0)
    }
}

fn overall_error_percent(
    records: &[DailyValidationRecord],
    total_absolute: f64,
    total_real: f64,
) -> f64 {
    if total_absolute.is_finite() && total_real.is_finite() {
        let direct = weighted_percent(total_absolute, total_real);
        if direct.is_finite() {
            return direct;
        }
    }

    // Totals or ratio out of range: sum again relative to the largest volume, which
    // keeps every term at most 1.
    let scale = records
        .iter()
        .map(|r| r.real_value().max(r.absolute_difference()))
        .fold(0.0, f64::max);
    let (absolute, real) = records.iter().fold((0.0, 0.0), |(absolute, real), r| {
        (absolute + r.absolute_difference() / scale, real + r.real_value() / scale)
    });
    let scaled = weighted_percent(absolute, real);
    if scaled.is_finite() {
        scaled
    } else {
        // Real demand is negligible next to the error.
        ZERO_REAL_ERROR_PERCENT
    }
}

/// A complete validation pass: records, per-day failures and the summary of
/// the days that succeeded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRun {
    pub records: Vec<DailyValidationRecord>,
    pub failures: Vec<DayFailure>,
    pub summary: ValidationSummary,
}

impl ValidationRun {
    /// Build every day and aggregate the ones that built.
    ///
    /// One bad day never fails the run; it shows up in `failures`.
    pub fn execute<I>(builder: &RecordBuilder, inputs: I) -> Self
    where
        I: IntoIterator<Item = DayInput>,
    {
        let BuildOutcome { records, failures } = builder.build_all(inputs);
        let summary = aggregate(&records);
        debug!(
            days = summary.total_days,
            failures = failures.len(),
            overall_error_percent = summary.overall_error_percent,
            "Validation run complete"
        );
        Self {
            records,
            failures,
            summary,
        }
    }

    /// Same records, narrowed to the ones the predicate keeps, re-aggregated
    pub fn narrowed<F>(&self, keep: F) -> Self
    where
        F: Fn(&DailyValidationRecord) -> bool,
    {
        let records: Vec<_> = self.records.iter().filter(|r| keep(*r)).cloned().collect();
        let summary = aggregate(&records);
        Self {
            records,
            failures: self.failures.clone(),
            summary,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
