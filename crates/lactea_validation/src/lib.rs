//! Simulation Validation Engine - forecast accuracy for dairy demand
//!
//! # Philosophy: Pure Functions Over Owned Data
//!
//! The engine compares a day-indexed series of *simulated* demand against the
//! *real* demand observed for the same days. Every entry point is a
//! synchronous function over its inputs and returns new, independently owned
//! values. Nothing here reads files, talks to the network, or renders output;
//! hosts feed it typed inputs and hand its rows to their own writers.
//!
//! # Pipeline
//!
//! 1. Build one [`DailyValidationRecord`] per day ([`RecordBuilder`])
//! 2. Classify each day's error into a [`Verdict`] ([`AccuracyClassifier`])
//! 3. Optionally narrow the record set ([`RecordFilter`])
//! 4. Fold records into a [`ValidationSummary`] ([`aggregate`])
//! 5. Flatten records and summary into rows ([`ExportProjection`])
//!
//! Descriptive statistics over re-entered historical samples live apart from
//! the pipeline in [`StatisticsCalculator`].
//!
//! # Failure Semantics
//!
//! - Per-day failures (bad volumes, duplicate days) never abort a run; they
//!   are reported next to the summary of the days that succeeded
//! - Sample failures are all-or-nothing: the minimum size is evaluated over
//!   the whole sample

pub mod aggregate;
pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod record;
pub mod stats;

pub use aggregate::{aggregate, ValidationRun, ValidationSummary};
pub use classifier::{AccuracyClassifier, AccuracyPolicy, Verdict};
pub use config::{ConfigError, EngineConfig, ExportPolicy, StatisticsPolicy};
pub use error::{Result, ValidationError, ValidationErrorKind, VolumeField};
pub use export::{
    ChartFeed, ExportContext, ExportProjection, ExportRow, VolumeUnit, MAX_PRECISION,
};
pub use filter::RecordFilter;
pub use record::{BuildOutcome, DailyValidationRecord, DayFailure, DayInput, RecordBuilder};
pub use stats::{Sample, StatisticsCalculator, VariableStatistics};
