//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use lactea_validation::ValidationError;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    pub fn file_not_found(path: &Path) -> Self {
        Self::new(format!("File not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                "TRY: Check for typos in the path".to_string(),
            ])
    }

    pub fn csv_parse_error(path: &Path, line: Option<u64>, details: &str) -> Self {
        let location = line.map(|l| format!(" at line {}", l)).unwrap_or_default();
        Self::new(format!("CSV parse error{}: {}", location, details))
            .with_context(format!("Failed to read day inputs from {}", path.display()))
            .with_suggestions([
                "TRY: The header must be: day,date,simulated,real".to_string(),
                "TRY: Dates use ISO-8601 (YYYY-MM-DD); volumes are plain numbers".to_string(),
            ])
    }

    pub fn invalid_config(path: &Path, details: &str) -> Self {
        Self::new(format!("Invalid configuration: {}", details))
            .with_context(format!("While loading {}", path.display()))
            .with_suggestions([
                "TRY: Regenerate defaults: lactea config init <path> --force".to_string(),
                "TRY: Thresholds must satisfy 0 < precise_below < acceptable_below".to_string(),
            ])
    }

    /// Sample rejection from `describe`, pointing at the offending token
    pub fn sample_rejected(error: &ValidationError, source: &str) -> Self {
        match error {
            ValidationError::NonNumericEntry { position, token } => {
                Self::new(format!("Non-numeric value '{}'", token))
                    .with_context(highlight_token(source, *position))
                    .with_suggestion("TRY: Fix or remove the highlighted value and run again")
            }
            ValidationError::InsufficientData { found, required } => {
                Self::new(format!("Only {} valid values; at least {} are required", found, required))
                    .with_context("Statistics are only computed over complete samples")
                    .with_suggestion(format!("TRY: Enter {} more value(s)", required - found))
            }
            other => Self::new(other.to_string()),
        }
    }
}

/// Re-render the comma-separated input with the token at `position` bracketed
fn highlight_token(source: &str, position: usize) -> String {
    source
        .split(',')
        .enumerate()
        .map(|(idx, tok)| {
            if idx == position {
                format!(">>{}<<", tok.trim())
            } else {
                tok.trim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Render a command error: helpful errors as-is, anything else with its cause chain
pub fn render(err: &anyhow::Error) -> String {
    match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => helpful.to_string(),
        None => format!("ERROR: {:#}", err),
    }
}
