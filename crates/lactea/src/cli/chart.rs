//! `lactea chart` - chart feed for the error and verdict-distribution charts

use crate::cli::input::read_days;
use anyhow::Result;
use lactea_validation::{ChartFeed, DayInput, EngineConfig, RecordFilter, ValidationRun};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug)]
pub struct ChartArgs {
    pub input: PathBuf,
    pub from_day: Option<u32>,
    pub to_day: Option<u32>,
}

pub fn run(args: ChartArgs, config: &EngineConfig) -> Result<()> {
    let rows = read_days(&args.input)?;
    let feed = chart_feed(rows.days, args.from_day, args.to_day, config);
    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}

fn chart_feed(
    inputs: Vec<DayInput>,
    from_day: Option<u32>,
    to_day: Option<u32>,
    config: &EngineConfig,
) -> ChartFeed {
    let run = ValidationRun::execute(&config.record_builder(), inputs);
    for failure in &run.failures {
        warn!(day = failure.day, error = %failure.error, "Day left out of chart");
    }
    let records = RecordFilter::new().days(from_day, to_day).apply(&run.records);
    // Labels are not part of the chart feed.
    config.export_projection("", "").chart_feed(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_chart_feed_skips_bad_days_and_filters() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let inputs = vec![
            DayInput::new(1, date, 95.0, 100.0),
            DayInput::new(2, date, -1.0, 100.0),
            DayInput::new(3, date, 115.0, 100.0),
            DayInput::new(4, date, 5.0, 0.0),
        ];
        let feed = chart_feed(inputs, Some(1), Some(3), &EngineConfig::default());

        assert_eq!(feed.labels, vec!["Día 1", "Día 3"]);
        assert_eq!(feed.error_percents, vec![5.0, 15.0]);
        assert_eq!(feed.verdict_counts, [1, 1, 0]);

        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["verdict_counts"], serde_json::json!([1, 1, 0]));
    }
}
