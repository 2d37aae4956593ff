//! Day input loading
//!
//! Input files are CSV with a `day,date,simulated,real` header. A missing
//! column or a ragged row stops the load. A row whose values do not parse
//! (a negative day index, a malformed date) is rejected on its own and the
//! rest of the file still loads. Value checks (negative volumes, duplicate
//! days) belong to the engine and surface as per-day failures.

use crate::cli::error::HelpfulError;
use anyhow::{Context, Result};
use lactea_validation::DayInput;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const REQUIRED_COLUMNS: [&str; 4] = ["day", "date", "simulated", "real"];

/// A data row that could not be read as a day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub line: Option<u64>,
    pub reason: String,
}

/// Days read from an input file, plus the rows that were rejected
#[derive(Debug, Default)]
pub struct DayRows {
    pub days: Vec<DayInput>,
    pub rejected: Vec<RejectedRow>,
}

impl DayRows {
    /// Number of data rows in the file
    pub fn total(&self) -> usize {
        self.days.len() + self.rejected.len()
    }
}

/// Read all day inputs from a CSV file
pub fn read_days(path: &Path) -> Result<DayRows> {
    if !path.exists() {
        return Err(HelpfulError::file_not_found(path).into());
    }
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let rows = parse_days(file, path)?;
    info!(
        path = %path.display(),
        days = rows.days.len(),
        rejected = rows.rejected.len(),
        "Loaded day inputs"
    );
    Ok(rows)
}

/// Parse day inputs from any reader; `path` is only used in error messages
pub fn parse_days<R: Read>(reader: R, path: &Path) -> Result<DayRows> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| parse_error(path, &e))?
        .clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(HelpfulError::csv_parse_error(
            path,
            Some(1),
            &format!("missing column '{}'", missing),
        )
        .into());
    }

    let mut rows = DayRows::default();
    for row in csv_reader.deserialize::<DayInput>() {
        match row {
            Ok(day) => rows.days.push(day),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Deserialize { .. }) => {
                let line = e.position().map(|p| p.line());
                warn!(line = ?line, error = %e, "Row rejected");
                rows.rejected.push(RejectedRow {
                    line,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(parse_error(path, &e).into()),
        }
    }
    Ok(rows)
}

fn parse_error(path: &Path, error: &csv::Error) -> HelpfulError {
    let line = error.position().map(|p| p.line());
    HelpfulError::csv_parse_error(path, line, &error.to_string())
}
