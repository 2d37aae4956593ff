//! Tabular projection of records and summaries for external sinks
//!
//! Rows come out as plain data. CSV quoting, PDF layout and chart drawing are
//! the caller's business.

use crate::aggregate::ValidationSummary;
use crate::classifier::{AccuracyClassifier, Verdict};
use crate::error::Result;
use crate::record::DailyValidationRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used in the day column of the totals row
pub const TOTALS_LABEL: &str = "Total";

/// Largest supported number of decimal places
pub const MAX_PRECISION: usize = 6;

/// Volume unit of simulated and real demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    #[default]
    Liters,
    Kilograms,
}

impl VolumeUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::Liters => "L",
            VolumeUnit::Kilograms => "kg",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Labels and display settings shared by every row of one export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportContext {
    pub product: String,
    pub business: String,
    pub unit: VolumeUnit,
    /// Decimal places for volumes and percentages
    pub precision: usize,
}

impl ExportContext {
    pub fn new(product: impl Into<String>, business: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            business: business.into(),
            unit: VolumeUnit::default(),
            precision: 2,
        }
    }

    pub fn with_unit(mut self, unit: VolumeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Decimal places, clamped to [`MAX_PRECISION`]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        self
    }
}

/// One export row. `day` and `date` are `None` on the totals row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub day: Option<u32>,
    pub date: Option<NaiveDate>,
    pub product: String,
    pub business: String,
    pub simulated: f64,
    pub real: f64,
    pub signed_difference: f64,
    pub error_percent: f64,
    pub verdict: Verdict,
}

impl ExportRow {
    pub fn is_totals(&self) -> bool {
        self.day.is_none()
    }

    /// Render the nine fields, in header order, with `precision` decimals
    pub fn fields(&self, precision: usize) -> [String; 9] {
        let precision = precision.min(MAX_PRECISION);
        [
            self.day
                .map(|d| d.to_string())
                .unwrap_or_else(|| TOTALS_LABEL.to_string()),
            self.date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.product.clone(),
            self.business.clone(),
            format!("{:.*}", precision, self.simulated),
            format!("{:.*}", precision, self.real),
            format!("{:.*}", precision, self.signed_difference),
            format!("{:.*}", precision, self.error_percent),
            self.verdict.label().to_string(),
        ]
    }
}

/// Chart data: one label and error per day plus the verdict distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFeed {
    /// `"Día {n}"` per day
    pub labels: Vec<String>,
    pub error_percents: Vec<f64>,
    /// Counts in Precise, Acceptable, Inaccurate order
    pub verdict_counts: [usize; 3],
}

/// Flattens records and summaries into rows for CSV/table/chart sinks
#[derive(Debug, Clone)]
pub struct ExportProjection {
    context: ExportContext,
    classifier: AccuracyClassifier,
}

impl ExportProjection {
    pub fn new(context: ExportContext, classifier: AccuracyClassifier) -> Self {
        Self {
            context,
            classifier,
        }
    }

    pub fn context(&self) -> &ExportContext {
        &self.context
    }

    /// Column headers in row order, with the configured unit
    pub fn csv_header(&self) -> [String; 9] {
        let unit = self.context.unit.symbol();
        [
            "Día".to_string(),
            "Fecha".to_string(),
            "Producto".to_string(),
            "Empresa".to_string(),
            format!("Demanda Simulada ({})", unit),
            format!("Demanda Real ({})", unit),
            format!("Diferencia ({})", unit),
            "Error %".to_string(),
            "Veredicto".to_string(),
        ]
    }

    /// One row per record, in record order
    pub fn project(&self, records: &[DailyValidationRecord]) -> Vec<ExportRow> {
        records.iter().map(|r| self.project_record(r)).collect()
    }

    pub fn project_record(&self, record: &DailyValidationRecord) -> ExportRow {
        let precision = self.context.precision;
        ExportRow {
            day: Some(record.day()),
            date: Some(record.date()),
            product: self.context.product.clone(),
            business: self.context.business.clone(),
            simulated: round_to(record.simulated_value(), precision),
            real: round_to(record.real_value(), precision),
            signed_difference: round_to(record.signed_difference(), precision),
            error_percent: round_to(record.error_percent(), precision),
            verdict: record.verdict(),
        }
    }

    /// Totals row; its verdict is the classification of the overall error
    pub fn project_summary_row(&self, summary: &ValidationSummary) -> Result<ExportRow> {
        let precision = self.context.precision;
        Ok(ExportRow {
            day: None,
            date: None,
            product: self.context.product.clone(),
            business: self.context.business.clone(),
            simulated: round_to(summary.total_simulated, precision),
            real: round_to(summary.total_real, precision),
            signed_difference: round_to(summary.signed_difference(), precision),
            error_percent: round_to(summary.overall_error_percent, precision),
            verdict: summary.overall_verdict(&self.classifier)?,
        })
    }

    /// Rendered day rows followed by the rendered totals row
    pub fn render_rows(
        &self,
        records: &[DailyValidationRecord],
        summary: &ValidationSummary,
    ) -> Result<Vec<[String; 9]>> {
        let precision = self.context.precision;
        let mut rows: Vec<_> = self
            .project(records)
            .iter()
            .map(|row| row.fields(precision))
            .collect();
        rows.push(self.project_summary_row(summary)?.fields(precision));
        Ok(rows)
    }

    pub fn chart_feed(&self, records: &[DailyValidationRecord]) -> ChartFeed {
        let mut verdict_counts = [0usize; 3];
        let mut labels = Vec::with_capacity(records.len());
        let mut error_percents = Vec::with_capacity(records.len());

        for record in records {
            labels.push(format!("Día {}", record.day()));
            error_percents.push(round_to(record.error_percent(), self.context.precision));
            verdict_counts[record.verdict().index()] += 1;
        }

        ChartFeed {
            labels,
            error_percents,
            verdict_counts,
        }
    }
}

/// Round to `precision` decimals (at most [`MAX_PRECISION`]); negative zero
/// comes back as zero
pub fn round_to(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // Too large to carry any fractional digits.
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
