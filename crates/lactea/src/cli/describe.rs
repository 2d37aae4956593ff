//! `lactea describe` - statistics over a re-entered historical sample

use crate::cli::error::HelpfulError;
use crate::cli::output::print_key_values;
use anyhow::{Context, Result};
use lactea_validation::{EngineConfig, VariableStatistics};
use std::path::PathBuf;

#[derive(Debug)]
pub struct DescribeArgs {
    pub values: Option<String>,
    pub file: Option<PathBuf>,
    pub json: bool,
}

pub fn run(args: DescribeArgs, config: &EngineConfig) -> Result<()> {
    let source = match (&args.values, &args.file) {
        (Some(values), _) => values.clone(),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            join_lines(&content)
        }
        (None, None) => {
            return Err(HelpfulError::new("No values given")
                .with_suggestions([
                    "TRY: lactea describe \"410, 398.5, 422\"",
                    "TRY: lactea describe --file historico.txt",
                ])
                .into())
        }
    };

    let stats = describe(&source, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_key_values(&[
            ("Cantidad", stats.count.to_string()),
            ("Media", format!("{:.2}", stats.mean)),
            ("Mediana", format!("{:.2}", stats.median)),
            ("Mínimo", format!("{:.2}", stats.min)),
            ("Máximo", format!("{:.2}", stats.max)),
        ]);
    }
    Ok(())
}

/// Describe a comma-separated sample, turning rejections into helpful errors
pub fn describe(source: &str, config: &EngineConfig) -> Result<VariableStatistics> {
    config
        .statistics_calculator()
        .describe_csv(source)
        .map_err(|err| HelpfulError::sample_rejected(&err, source).into())
}

/// Treat newlines like commas so one-value-per-line files work
fn join_lines(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
