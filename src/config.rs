//! Mining parameters, their defaults and validation

use crate::error::MiningError;
use crate::lift::{check_lift, LiftMode};
use crate::rules::{check_confidence, AntecedentSize};
use crate::support::CounterKind;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_MIN_SUPPORT: i64 = 10_000;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_MIN_LIFT: f64 = 0.5;

/// Parameters of a mining run.
///
/// Can be read from a TOML file; every field is optional there.
///
/// ```toml
/// min_support = 3
/// min_confidence = 0.6
/// min_lift = 1.2
/// lift_mode = "corrected"
/// min_antecedent = 1
/// counter = "scan"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiningConfig {
    /// Minimum number of transactions an itemset must appear in
    pub min_support: i64,
    /// Minimum confidence of a kept rule, in `[0, 1]`
    pub min_confidence: f64,
    /// Threshold of the lift pass; `None` skips the pass
    pub min_lift: Option<f64>,
    pub lift_mode: LiftMode,
    /// Smallest antecedent when splitting itemsets; `None` keeps only
    /// single-item consequents
    pub min_antecedent: Option<usize>,
    pub counter: CounterKind,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            min_lift: None,
            lift_mode: LiftMode::default(),
            min_antecedent: None,
            counter: CounterKind::default(),
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: i64, min_confidence: f64) -> Self {
        Self {
            min_support,
            min_confidence,
            ..Self::default()
        }
    }

    pub fn with_min_lift(mut self, min_lift: f64, mode: LiftMode) -> Self {
        self.min_lift = Some(min_lift);
        self.lift_mode = mode;
        self
    }

    pub fn with_min_antecedent(mut self, size: usize) -> Self {
        self.min_antecedent = Some(size);
        self
    }

    pub fn with_counter(mut self, counter: CounterKind) -> Self {
        self.counter = counter;
        self
    }

    pub fn antecedent(&self) -> AntecedentSize {
        self.min_antecedent
            .map_or(AntecedentSize::SingleConsequent, AntecedentSize::AtLeast)
    }

    /// Reject out-of-range thresholds before any data is scanned.
    ///
    /// # Errors
    /// The first [`MiningError`] found, checking support, confidence, then lift.
    pub fn validate(&self) -> Result<(), MiningError> {
        if self.min_support < 0 {
            return Err(MiningError::NegativeSupport(self.min_support));
        }
        check_confidence(self.min_confidence)?;
        if let Some(min_lift) = self.min_lift {
            check_lift(min_lift)?;
        }
        Ok(())
    }

    /// Read a configuration file, falling back to defaults for missing keys
    pub fn from_toml_file(path: &Path) -> crate::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}
