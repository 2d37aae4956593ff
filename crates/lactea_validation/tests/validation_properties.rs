//! Property tests for statistics, classification and aggregation invariants.

use chrono::NaiveDate;
use lactea_validation::{
    aggregate, AccuracyClassifier, DailyValidationRecord, DayInput, RecordBuilder, RecordFilter,
    Sample, StatisticsCalculator, Verdict,
};
use proptest::prelude::*;

fn build_records(pairs: &[(f64, f64)]) -> Vec<DailyValidationRecord> {
    let builder = RecordBuilder::default();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    pairs
        .iter()
        .enumerate()
        .map(|(i, (simulated, real))| {
            let date = start + chrono::Days::new(i as u64);
            builder
                .build(DayInput::new(i as u32 + 1, date, *simulated, *real))
                .unwrap()
        })
        .collect()
}

fn volume() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        9 => 0.0f64..10_000.0,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_mean_between_min_and_max(values in prop::collection::vec(-1e6f64..1e6, 30..200)) {
        let sample = Sample::from_values(values).unwrap();
        let stats = StatisticsCalculator::default().describe(&sample).unwrap();

        // Summation rounding may land one ulp outside when values are near-equal.
        let slack = 1e-9 * stats.max.abs().max(stats.min.abs()).max(1.0);
        prop_assert!(stats.min - slack <= stats.mean && stats.mean <= stats.max + slack);
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
    }

    #[test]
    fn test_statistics_order_independent(
        values in prop::collection::vec(-1e6f64..1e6, 30..120),
        seed in any::<u64>(),
    ) {
        let mut shuffled = values.clone();
        // Deterministic Fisher-Yates driven by the generated seed
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }

        let calc = StatisticsCalculator::default();
        let a = calc.describe(&Sample::from_values(values).unwrap()).unwrap();
        let b = calc.describe(&Sample::from_values(shuffled).unwrap()).unwrap();

        prop_assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        prop_assert_eq!(a.median.to_bits(), b.median.to_bits());
        prop_assert_eq!(a.min.to_bits(), b.min.to_bits());
        prop_assert_eq!(a.max.to_bits(), b.max.to_bits());
    }

    #[test]
    fn test_classify_total_on_valid_input(error in 0.0f64..1e9) {
        let verdict = AccuracyClassifier::default().classify(error).unwrap();
        let expected = if error < 10.0 {
            Verdict::Precise
        } else if error < 20.0 {
            Verdict::Acceptable
        } else {
            Verdict::Inaccurate
        };
        prop_assert_eq!(verdict, expected);
    }

    #[test]
    fn test_classify_rejects_negative(error in -1e9f64..-1e-12) {
        prop_assert!(AccuracyClassifier::default().classify(error).is_err());
    }

    #[test]
    fn test_record_fields_consistent(simulated in volume(), real in volume()) {
        let record = build_records(&[(simulated, real)]).remove(0);

        prop_assert!(record.absolute_difference() >= 0.0);
        prop_assert!(record.error_percent() >= 0.0);
        prop_assert_eq!(record.signed_difference(), simulated - real);
        prop_assert_eq!(record.absolute_difference(), record.signed_difference().abs());
        prop_assert_eq!(
            AccuracyClassifier::default().classify(record.error_percent()).unwrap(),
            record.verdict()
        );
    }

    #[test]
    fn test_counts_sum_to_total(pairs in prop::collection::vec((volume(), volume()), 0..60)) {
        let records = build_records(&pairs);
        let summary = aggregate(&records);

        prop_assert_eq!(summary.total_days, records.len());
        prop_assert_eq!(
            summary.precise_count + summary.acceptable_count + summary.inaccurate_count,
            summary.total_days
        );
        prop_assert!(summary.overall_error_percent >= 0.0);
        prop_assert!(summary.accuracy_ratio() >= 0.0 && summary.accuracy_ratio() <= 1.0);
    }

    #[test]
    fn test_filter_composes_with_aggregate(
        pairs in prop::collection::vec((volume(), volume()), 0..60),
        from in 1u32..30,
        span in 0u32..30,
        keep_precise in any::<bool>(),
    ) {
        let records = build_records(&pairs);
        let mut filter = RecordFilter::new().days(Some(from), Some(from + span));
        if keep_precise {
            filter = filter.verdict(Verdict::Precise);
        }
        let subset = filter.apply(&records);
        let summary = aggregate(&subset);

        prop_assert_eq!(summary.total_days, subset.len());
        prop_assert_eq!(summary.verdict_distribution().iter().sum::<usize>(), subset.len());
        prop_assert!(subset.iter().all(|r| filter.matches(r)));
    }

    #[test]
    fn test_aggregate_idempotent(pairs in prop::collection::vec((volume(), volume()), 0..40)) {
        let records = build_records(&pairs);
        let first = aggregate(&records);
        let second = aggregate(&records);

        prop_assert_eq!(first.overall_error_percent.to_bits(), second.overall_error_percent.to_bits());
        prop_assert_eq!(first.total_simulated.to_bits(), second.total_simulated.to_bits());
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_empty_aggregate_is_all_zero() {
    let summary = aggregate(&[]);
    assert_eq!(summary.total_days, 0);
    assert_eq!(summary.precise_count, 0);
    assert_eq!(summary.acceptable_count, 0);
    assert_eq!(summary.inaccurate_count, 0);
    assert_eq!(summary.overall_error_percent, 0.0);
}
