//! Narrowing a record set before re-aggregation

use crate::classifier::Verdict;
use crate::record::DailyValidationRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Record filter. Unset bounds match everything; all set conditions must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub from_day: Option<u32>,
    pub to_day: Option<u32>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    /// Empty means any verdict
    #[serde(default)]
    pub verdicts: Vec<Verdict>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive day range
    pub fn days(mut self, from: Option<u32>, to: Option<u32>) -> Self {
        self.from_day = from;
        self.to_day = to;
        self
    }

    /// Inclusive date range
    pub fn dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from_date = from;
        self.to_date = to;
        self
    }

    pub fn verdict(mut self, verdict: Verdict) -> Self {
        if !self.verdicts.contains(&verdict) {
            self.verdicts.push(verdict);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, record: &DailyValidationRecord) -> bool {
        let day = record.day();
        let date = record.date();

        self.from_day.map_or(true, |from| day >= from)
            && self.to_day.map_or(true, |to| day <= to)
            && self.from_date.map_or(true, |from| date >= from)
            && self.to_date.map_or(true, |to| date <= to)
            && (self.verdicts.is_empty() || self.verdicts.contains(&record.verdict()))
    }

    /// Owned copies of the matching records, in input order
    pub fn apply(&self, records: &[DailyValidationRecord]) -> Vec<DailyValidationRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::record::{DayInput, RecordBuilder};

    fn sample_records() -> Vec<DailyValidationRecord> {
        let builder = RecordBuilder::default();
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        [(95.0, 100.0), (112.0, 100.0), (150.0, 100.0), (101.0, 100.0)]
            .iter()
            .enumerate()
            .map(|(i, (s, r))| {
                let date = start + chrono::Days::new(i as u64);
                builder
                    .build(DayInput::new(i as u32 + 1, date, *s, *r))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let records = sample_records();
        let filter = RecordFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&records), records);
    }

    #[test]
    fn test_day_range() {
        let records = sample_records();
        let kept = RecordFilter::new().days(Some(2), Some(3)).apply(&records);
        let days: Vec<_> = kept.iter().map(|r| r.day()).collect();
        assert_eq!(days, vec![2, 3]);
    }

    #[test]
    fn test_date_range_and_verdict() {
        let records = sample_records();
        let filter = RecordFilter::new()
            .dates(NaiveDate::from_ymd_opt(2024, 5, 2), None)
            .verdict(Verdict::Precise);
        let kept = filter.apply(&records);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].day(), 4);
    }

    #[test]
    fn test_filtered_summary_counts_match_subset() {
        let records = sample_records();
        let kept = RecordFilter::new()
            .verdict(Verdict::Acceptable)
            .verdict(Verdict::Inaccurate)
            .apply(&records);
        let summary = aggregate(&kept);

        assert_eq!(summary.total_days, kept.len());
        assert_eq!(
            summary.precise_count + summary.acceptable_count + summary.inaccurate_count,
            kept.len()
        );
        assert_eq!(summary.precise_count, 0);
    }
}
