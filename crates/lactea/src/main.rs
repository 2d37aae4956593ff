//! Lactea command-line host
//!
//! Reads day-indexed simulated/real demand from CSV, runs the validation
//! engine, and renders tables, CSV exports and chart feeds. The engine itself
//! never touches files; everything with bytes in it lives here.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lactea_logging::{init_logging, logs_dir, LogConfig};
use lactea_validation::Verdict;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "lactea", version, about = "Validate simulated dairy demand against real demand")]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Engine configuration file (TOML). Defaults to $LACTEA_HOME/config.toml if present
    #[arg(long, global = true, env = "LACTEA_CONFIG")]
    config: Option<PathBuf>,

    /// Also write a daily rolling log under $LACTEA_HOME/logs
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare simulated and real demand day by day
    Validate {
        /// CSV with columns: day,date,simulated,real
        input: PathBuf,

        /// Product label for exported rows
        #[arg(long)]
        product: String,

        /// Business label for exported rows
        #[arg(long)]
        business: String,

        /// First day to include (inclusive)
        #[arg(long)]
        from_day: Option<u32>,

        /// Last day to include (inclusive)
        #[arg(long)]
        to_day: Option<u32>,

        /// Only include days with this verdict (precise, acceptable, inaccurate). Repeatable
        #[arg(long = "verdict")]
        verdicts: Vec<Verdict>,

        /// Write the export (header, one row per day, totals row) to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Descriptive statistics for a comma-separated historical sample
    Describe {
        /// Comma-separated values, e.g. "410.5, 398, 422"
        values: Option<String>,

        /// Read the values from a file instead (commas or newlines between values)
        #[arg(short, long, conflicts_with = "values")]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Emit chart data (day labels, error percents, verdict distribution) as JSON
    Chart {
        /// CSV with columns: day,date,simulated,real
        input: PathBuf,

        /// First day to include (inclusive)
        #[arg(long)]
        from_day: Option<u32>,

        /// Last day to include (inclusive)
        #[arg(long)]
        to_day: Option<u32>,
    },

    /// Manage the engine configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write the default configuration to a TOML file
    Init {
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::new("lactea").verbose(cli.verbose);
    if cli.log_file {
        log_config = log_config.with_log_dir(logs_dir());
    }
    let _log_guard = match init_logging(log_config) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", cli::error::render(&err));
            ExitCode::from(1)
        }
    }
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { path, force },
        } => cli::settings::init(&path, force),
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            let config = cli::settings::resolve(cli.config.as_deref())?;
            cli::settings::show(&config)
        }
        Commands::Validate {
            input,
            product,
            business,
            from_day,
            to_day,
            verdicts,
            output,
            json,
        } => {
            let config = cli::settings::resolve(cli.config.as_deref())?;
            cli::validate::run(
                cli::validate::ValidateArgs {
                    input,
                    product,
                    business,
                    from_day,
                    to_day,
                    verdicts,
                    output,
                    json,
                },
                &config,
            )
        }
        Commands::Describe { values, file, json } => {
            let config = cli::settings::resolve(cli.config.as_deref())?;
            cli::describe::run(cli::describe::DescribeArgs { values, file, json }, &config)
        }
        Commands::Chart {
            input,
            from_day,
            to_day,
        } => {
            let config = cli::settings::resolve(cli.config.as_deref())?;
            cli::chart::run(
                cli::chart::ChartArgs {
                    input,
                    from_day,
                    to_day,
                },
                &config,
            )
        }
    }
}
