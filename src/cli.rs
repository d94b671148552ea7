//! Command-line interface definitions and argument parsing

use crate::config::MiningConfig;
use crate::lift::LiftMode;
use crate::report::OutputFormat;
use crate::support::CounterKind;
use clap::Parser;
use std::path::PathBuf;

/// Association rule mining over market-basket transactions using Apriori
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the transaction file (one basket of integer item ids per line)
    #[arg(short, long, default_value = "retail.dat")]
    pub input: String,

    /// TOML file with mining parameters; flags given here override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum number of transactions an itemset must appear in
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub min_support: Option<i64>,

    /// Minimum rule confidence, between 0 and 1
    #[arg(short = 'c', long)]
    pub min_confidence: Option<f64>,

    /// Enable the lift pass with this threshold (0.5 when given without a value)
    #[arg(long, num_args = 0..=1, default_missing_value = "0.5")]
    pub min_lift: Option<f64>,

    /// Lift formula used by the lift pass
    #[arg(long, value_enum)]
    pub lift_mode: Option<LiftMode>,

    /// Smallest antecedent size; by default only single-item consequents are produced
    #[arg(long)]
    pub min_antecedent: Option<usize>,

    /// Support counting strategy
    #[arg(long, value_enum)]
    pub counter: Option<CounterKind>,

    /// Output format for the discovered rules
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only print the best N rules
    #[arg(long)]
    pub top: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the mining configuration: the config file (or defaults) with
    /// command-line flags applied on top
    pub fn mining_config(&self) -> crate::Result<MiningConfig> {
        let mut config = match &self.config {
            Some(path) => MiningConfig::from_toml_file(path)?,
            None => MiningConfig::default(),
        };

        if let Some(min_support) = self.min_support {
            config.min_support = min_support;
        }
        if let Some(min_confidence) = self.min_confidence {
            config.min_confidence = min_confidence;
        }
        if let Some(min_lift) = self.min_lift {
            config.min_lift = Some(min_lift);
        }
        if let Some(lift_mode) = self.lift_mode {
            config.lift_mode = lift_mode;
        }
        if let Some(min_antecedent) = self.min_antecedent {
            config.min_antecedent = Some(min_antecedent);
        }
        if let Some(counter) = self.counter {
            config.counter = counter;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "basketforge",
            "-i",
            "baskets.dat",
            "-s",
            "3",
            "-c",
            "0.7",
            "--min-lift",
            "--counter",
            "scan",
        ]);
        assert_eq!(args.input, "baskets.dat");

        let config = args.mining_config().unwrap();
        assert_eq!(config.min_support, 3);
        assert_eq!(config.min_confidence, 0.7);
        assert_eq!(config.min_lift, Some(crate::config::DEFAULT_MIN_LIFT));
        assert_eq!(config.counter, CounterKind::Scan);
        assert_eq!(config.lift_mode, LiftMode::Corrected);
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::parse_from(["basketforge"]);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.mining_config().unwrap(), MiningConfig::default());
    }

    #[test]
    fn test_config_file_then_flags() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "min_support = 4\nmin_confidence = 0.9").unwrap();
        let path = file.path().to_str().unwrap();

        let args = Args::parse_from(["basketforge", "--config", path, "-c", "0.6"]);
        let config = args.mining_config().unwrap();
        assert_eq!(config.min_support, 4);
        assert_eq!(config.min_confidence, 0.6);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let args = Args::parse_from(["basketforge", "-s", "-2"]);
        assert!(args.mining_config().is_err());

        let args = Args::parse_from(["basketforge", "-c", "1.5"]);
        assert!(args.mining_config().is_err());
    }
}
