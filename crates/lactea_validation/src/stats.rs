//! Descriptive statistics over re-entered historical samples
//!
//! A [`Sample`] is built from user-entered tokens. Every token must parse as a
//! finite number; a bad token rejects the whole sample instead of being
//! skipped. The minimum sample size is enforced by [`StatisticsCalculator`].

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Default minimum number of values for a sample to be described
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 30;

/// An ordered sequence of finite values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Parse already-split tokens.
    ///
    /// Tokens are trimmed; empty tokens are dropped before anything is counted.
    /// `position` in a [`ValidationError::NonNumericEntry`] is the 0-based index
    /// of the token in the input slice.
    pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut values = Vec::with_capacity(tokens.len());
        for (position, raw) in tokens.iter().enumerate() {
            let token = raw.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            match token.parse::<f64>() {
                Ok(value) if value.is_finite() => values.push(value),
                _ => {
                    return Err(ValidationError::NonNumericEntry {
                        position,
                        token: token.to_string(),
                    })
                }
            }
        }
        Ok(Self { values })
    }

    /// Parse a comma-separated line such as `"12.5, 13,14"`.
    pub fn parse_csv(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split(',').collect();
        Self::parse_tokens(&tokens)
    }

    /// Wrap numeric values, rejecting NaN and infinities.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if let Some((position, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NonNumericEntry {
                position,
                token: value.to_string(),
            });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Descriptive statistics bundle for one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableStatistics {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl VariableStatistics {
    /// Format as a multi-line report
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}:\n  Count: {}\n  Mean: {:.2}\n  Median: {:.2}\n  Min: {:.2}\n  Max: {:.2}\n",
            label, self.count, self.mean, self.median, self.min, self.max
        )
    }
}

/// Computes [`VariableStatistics`] for samples that meet the size threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsCalculator {
    min_sample_size: usize,
}

impl Default for StatisticsCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SAMPLE_SIZE)
    }
}

impl StatisticsCalculator {
    pub fn new(min_sample_size: usize) -> Self {
        Self {
            min_sample_size: min_sample_size.max(1),
        }
    }

    pub fn min_sample_size(&self) -> usize {
        self.min_sample_size
    }

    /// Describe a sample.
    ///
    /// Fails with [`ValidationError::InsufficientData`] below the configured
    /// minimum. The result does not depend on the order of the input values.
    pub fn describe(&self, sample: &Sample) -> Result<VariableStatistics> {
        let count = sample.len();
        if count < self.min_sample_size {
            return Err(ValidationError::InsufficientData {
                found: count,
                required: self.min_sample_size,
            });
        }

        let mut sorted = sample.values().to_vec();
        sorted.sort_by(f64::total_cmp);

        // Summing the sorted copy keeps the result bit-identical across
        // permutations of the input.
        let sum: f64 = sorted.iter().sum();
        let mean = sum / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        Ok(VariableStatistics {
            count,
            sum,
            mean,
            median,
            min: sorted[0],
            max: sorted[count - 1],
        })
    }

    /// Parse and describe a comma-separated line in one step
    pub fn describe_csv(&self, line: &str) -> Result<VariableStatistics> {
        self.describe(&Sample::parse_csv(line)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(n: usize) -> Vec<f64> {
        (1..=n).map(|v| v as f64).collect()
    }

    #[test]
    fn test_describe_odd_count() {
        let calc = StatisticsCalculator::new(3);
        let sample = Sample::from_values(vec![5.0, 1.0, 3.0]).unwrap();
        let stats = calc.describe(&sample).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.sum, 9.0);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_describe_even_count_averages_middle() {
        let calc = StatisticsCalculator::new(4);
        let sample = Sample::from_values(vec![4.0, 1.0, 10.0, 2.0]).unwrap();
        let stats = calc.describe(&sample).unwrap();

        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
    }

    #[test]
    fn test_sort_is_numeric_not_lexicographic() {
        // Lexicographic order would put "100" before "9".
        let calc = StatisticsCalculator::new(3);
        let sample = Sample::parse_csv("9,100,20").unwrap();
        let stats = calc.describe(&sample).unwrap();

        assert_eq!(stats.median, 20.0);
        assert_eq!(stats.min, 9.0);
        assert_eq!(stats.max, 100.0);
    }

    #[test]
    fn test_default_threshold_is_thirty() {
        let calc = StatisticsCalculator::default();
        assert_eq!(calc.min_sample_size(), 30);

        let sample = Sample::from_values(sequence(29)).unwrap();
        assert_eq!(
            calc.describe(&sample),
            Err(ValidationError::InsufficientData {
                found: 29,
                required: 30
            })
        );

        let sample = Sample::from_values(sequence(30)).unwrap();
        let stats = calc.describe(&sample).unwrap();
        assert_eq!(stats.mean, 15.5);
        assert_eq!(stats.median, 15.5);
    }

    #[test]
    fn test_empty_tokens_are_filtered_before_count() {
        let sample = Sample::parse_csv("1, ,2,,  3 ,").unwrap();
        assert_eq!(sample.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_non_numeric_token_is_rejected() {
        let err = Sample::parse_csv("1,2,abc,4").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonNumericEntry {
                position: 2,
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_non_finite_tokens_are_rejected() {
        assert!(matches!(
            Sample::parse_csv("1,inf,3"),
            Err(ValidationError::NonNumericEntry { position: 1, .. })
        ));
        assert!(matches!(
            Sample::parse_csv("NaN"),
            Err(ValidationError::NonNumericEntry { position: 0, .. })
        ));
        assert!(Sample::from_values(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_describe_csv() {
        let line = sequence(30)
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let stats = StatisticsCalculator::default().describe_csv(&line).unwrap();
        assert_eq!(stats.count, 30);
        assert_eq!(stats.sum, 465.0);
    }
}
