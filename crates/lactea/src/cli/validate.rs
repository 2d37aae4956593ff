//! `lactea validate` - day-by-day accuracy of a simulated series
//!
//! Failed days and rejected rows are listed but never stop the run; the
//! summary covers the days that built.

use crate::cli::input::{read_days, RejectedRow};
use crate::cli::output::{add_verdict_row, build_table, format_ratio, print_key_values};
use anyhow::{bail, Context, Result};
use lactea_validation::{
    DailyValidationRecord, DayFailure, EngineConfig, ExportProjection, ExportRow, RecordFilter,
    ValidationRun, ValidationSummary, Verdict,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug)]
pub struct ValidateArgs {
    pub input: PathBuf,
    pub product: String,
    pub business: String,
    pub from_day: Option<u32>,
    pub to_day: Option<u32>,
    pub verdicts: Vec<Verdict>,
    pub output: Option<PathBuf>,
    pub json: bool,
}

#[derive(Serialize)]
struct ValidateReport<'a> {
    rows: Vec<ExportRow>,
    totals: ExportRow,
    summary: &'a ValidationSummary,
    accuracy_ratio: f64,
    failures: &'a [DayFailure],
    rejected_rows: &'a [RejectedRow],
}

pub fn run(args: ValidateArgs, config: &EngineConfig) -> Result<()> {
    let rows = read_days(&args.input)?;
    let row_count = rows.total();
    let rejected = rows.rejected;
    let run = ValidationRun::execute(&config.record_builder(), rows.days);

    for failure in &run.failures {
        warn!(day = failure.day, error = %failure.error, "Day skipped");
    }
    if row_count > 0 && run.records.is_empty() {
        bail!(
            "None of the {} day(s) in {} could be validated",
            row_count,
            args.input.display()
        );
    }

    let filter = build_filter(&args);
    let view = if filter.is_empty() {
        run
    } else {
        run.narrowed(|r| filter.matches(r))
    };
    info!(
        days = view.summary.total_days,
        failures = view.failures.len(),
        "Validated {}",
        args.input.display()
    );

    let projection = config.export_projection(args.product.as_str(), args.business.as_str());

    if let Some(path) = &args.output {
        write_export(path, &projection, &view.records, &view.summary)?;
    }

    if args.json {
        let report = ValidateReport {
            rows: projection.project(&view.records),
            totals: projection.project_summary_row(&view.summary)?,
            summary: &view.summary,
            accuracy_ratio: view.summary.accuracy_ratio(),
            failures: &view.failures,
            rejected_rows: &rejected,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&projection, &view.records, &view.summary)?;
    if let Some(path) = &args.output {
        println!("\nExport written to {}", path.display());
    }
    if view.has_failures() {
        eprintln!("\n{} day(s) skipped:", view.failures.len());
        for failure in &view.failures {
            eprintln!("  Día {}: {}", failure.day, failure.error);
        }
    }
    if !rejected.is_empty() {
        eprintln!("\n{} row(s) rejected:", rejected.len());
        for row in &rejected {
            match row.line {
                Some(line) => eprintln!("  line {}: {}", line, row.reason),
                None => eprintln!("  {}", row.reason),
            }
        }
    }
    Ok(())
}

fn build_filter(args: &ValidateArgs) -> RecordFilter {
    args.verdicts.iter().fold(
        RecordFilter::new().days(args.from_day, args.to_day),
        |filter, verdict| filter.verdict(*verdict),
    )
}

/// Write header, one row per day and the totals row
pub fn write_export(
    path: &Path,
    projection: &ExportProjection,
    records: &[DailyValidationRecord],
    summary: &ValidationSummary,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(projection.csv_header())?;
    for row in projection.render_rows(records, summary)? {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn print_report(
    projection: &ExportProjection,
    records: &[DailyValidationRecord],
    summary: &ValidationSummary,
) -> Result<()> {
    let precision = projection.context().precision;
    let mut table = build_table(&projection.csv_header());
    for row in projection.project(records) {
        add_verdict_row(&mut table, &row.fields(precision), row.verdict);
    }
    let totals = projection.project_summary_row(summary)?;
    add_verdict_row(&mut table, &totals.fields(precision), totals.verdict);
    println!("{}", table);

    let unit = projection.context().unit;
    println!();
    print_key_values(&[
        ("Días", summary.total_days.to_string()),
        (Verdict::Precise.label(), summary.precise_count.to_string()),
        (Verdict::Acceptable.label(), summary.acceptable_count.to_string()),
        (Verdict::Inaccurate.label(), summary.inaccurate_count.to_string()),
        (
            "Error global",
            format!("{:.*}%", precision, summary.overall_error_percent),
        ),
        (
            "Error medio diario",
            format!("{:.*}%", precision, summary.mean_daily_error_percent),
        ),
        ("Precisión", format_ratio(summary.accuracy_ratio())),
        (
            "Demanda simulada",
            format!("{:.*} {}", precision, summary.total_simulated, unit),
        ),
        (
            "Demanda real",
            format!("{:.*} {}", precision, summary.total_real, unit),
        ),
    ]);
    Ok(())
}
