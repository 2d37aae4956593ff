//! Accuracy tiers for per-day forecast error
//!
//! The thresholds live in one [`AccuracyPolicy`] so table badges, chart
//! colouring and exports all agree on where a tier starts.

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tri-state accuracy label for a day's forecast error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Error below the precise threshold
    Precise,
    /// Error between the precise and acceptable thresholds
    Acceptable,
    /// Error at or above the acceptable threshold
    Inaccurate,
}

impl Verdict {
    /// All verdicts in chart/distribution order
    pub const ALL: [Verdict; 3] = [Verdict::Precise, Verdict::Acceptable, Verdict::Inaccurate];

    /// Display label in the dashboard's locale
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Precise => "Precisa",
            Verdict::Acceptable => "Aceptable",
            Verdict::Inaccurate => "Inexacta",
        }
    }

    /// Stable ASCII key
    pub fn key(&self) -> &'static str {
        match self {
            Verdict::Precise => "precise",
            Verdict::Acceptable => "acceptable",
            Verdict::Inaccurate => "inaccurate",
        }
    }

    /// Position in [`Verdict::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Verdict::Precise => 0,
            Verdict::Acceptable => 1,
            Verdict::Inaccurate => 2,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Verdict::ALL
            .into_iter()
            .find(|v| v.key() == needle || v.label().to_lowercase() == needle)
            .ok_or_else(|| format!("Unknown verdict: '{}'", s))
    }
}

/// Tier thresholds, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyPolicy {
    /// Errors strictly below this are Precise
    #[serde(default = "default_precise_below")]
    pub precise_below: f64,
    /// Errors strictly below this (and not Precise) are Acceptable
    #[serde(default = "default_acceptable_below")]
    pub acceptable_below: f64,
}

fn default_precise_below() -> f64 {
    10.0
}

fn default_acceptable_below() -> f64 {
    20.0
}

impl Default for AccuracyPolicy {
    fn default() -> Self {
        Self {
            precise_below: default_precise_below(),
            acceptable_below: default_acceptable_below(),
        }
    }
}

impl AccuracyPolicy {
    /// Check that thresholds are finite, positive and increasing
    pub fn check(&self) -> std::result::Result<(), String> {
        if !self.precise_below.is_finite() || !self.acceptable_below.is_finite() {
            return Err("accuracy thresholds must be finite".to_string());
        }
        if self.precise_below <= 0.0 {
            return Err(format!(
                "precise_below must be positive, got {}",
                self.precise_below
            ));
        }
        if self.acceptable_below <= self.precise_below {
            return Err(format!(
                "acceptable_below ({}) must be greater than precise_below ({})",
                self.acceptable_below, self.precise_below
            ));
        }
        Ok(())
    }
}

/// Maps an error percentage to a [`Verdict`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccuracyClassifier {
    policy: AccuracyPolicy,
}

impl AccuracyClassifier {
    pub fn new(policy: AccuracyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AccuracyPolicy {
        &self.policy
    }

    /// Classify an error percentage.
    ///
    /// A value sitting exactly on a threshold belongs to the more severe tier.
    /// Negative and non-finite values are caller bugs and fail with
    /// [`ValidationError::InvalidErrorValue`].
    pub fn classify(&self, error_percent: f64) -> Result<Verdict> {
        if !error_percent.is_finite() || error_percent < 0.0 {
            return Err(ValidationError::InvalidErrorValue(error_percent));
        }

        let verdict = if error_percent < self.policy.precise_below {
            Verdict::Precise
        } else if error_percent < self.policy.acceptable_below {
            Verdict::Acceptable
        } else {
            Verdict::Inaccurate
        };
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let classifier = AccuracyClassifier::default();

        assert_eq!(classifier.classify(0.0), Ok(Verdict::Precise));
        assert_eq!(classifier.classify(9.999), Ok(Verdict::Precise));
        assert_eq!(classifier.classify(10.0), Ok(Verdict::Acceptable));
        assert_eq!(classifier.classify(19.999), Ok(Verdict::Acceptable));
        assert_eq!(classifier.classify(20.0), Ok(Verdict::Inaccurate));
        assert_eq!(classifier.classify(350.0), Ok(Verdict::Inaccurate));
        assert_eq!(classifier.classify(f64::MAX), Ok(Verdict::Inaccurate));
    }

    #[test]
    fn test_classify_rejects_invalid() {
        let classifier = AccuracyClassifier::default();

        assert_eq!(
            classifier.classify(-0.5),
            Err(ValidationError::InvalidErrorValue(-0.5))
        );
        assert!(matches!(
            classifier.classify(f64::NAN),
            Err(ValidationError::InvalidErrorValue(v)) if v.is_nan()
        ));
        assert_eq!(
            classifier.classify(f64::INFINITY),
            Err(ValidationError::InvalidErrorValue(f64::INFINITY))
        );
    }

    #[test]
    fn test_custom_policy() {
        let classifier = AccuracyClassifier::new(AccuracyPolicy {
            precise_below: 5.0,
            acceptable_below: 15.0,
        });

        assert_eq!(classifier.classify(5.0), Ok(Verdict::Acceptable));
        assert_eq!(classifier.classify(14.9), Ok(Verdict::Acceptable));
        assert_eq!(classifier.classify(15.0), Ok(Verdict::Inaccurate));
    }

    #[test]
    fn test_policy_check() {
        assert!(AccuracyPolicy::default().check().is_ok());
        assert!(AccuracyPolicy {
            precise_below: 20.0,
            acceptable_below: 10.0
        }
        .check()
        .is_err());
        assert!(AccuracyPolicy {
            precise_below: 0.0,
            acceptable_below: 10.0
        }
        .check()
        .is_err());
        assert!(AccuracyPolicy {
            precise_below: 10.0,
            acceptable_below: f64::INFINITY
        }
        .check()
        .is_err());
    }

    #[test]
    fn test_verdict_labels_and_parsing() {
        let labels: Vec<_> = Verdict::ALL.iter().map(|v| v.label()).collect();
        assert_eq!(labels, vec!["Precisa", "Aceptable", "Inexacta"]);

        assert_eq!("precise".parse::<Verdict>(), Ok(Verdict::Precise));
        assert_eq!("INEXACTA".parse::<Verdict>(), Ok(Verdict::Inaccurate));
        assert_eq!(" Aceptable ".parse::<Verdict>(), Ok(Verdict::Acceptable));
        assert!("regular".parse::<Verdict>().is_err());

        for (idx, verdict) in Verdict::ALL.iter().enumerate() {
            assert_eq!(verdict.index(), idx);
        }
    }
}
