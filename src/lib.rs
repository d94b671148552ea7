//! BasketForge: frequent itemset mining and association rules with Apriori
//!
//! Transactions are loaded into an immutable [`TransactionStore`], searched
//! level by level for frequent itemsets, split into rules scored by support
//! and confidence, and optionally filtered by lift.

pub mod apriori;
pub mod candidates;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod itemset;
pub mod lift;
pub mod logging;
pub mod mining;
pub mod report;
pub mod rules;
pub mod store;
pub mod support;

// Re-export public items for easier access
pub use apriori::{apriori, Apriori, FrequentItemsets};
pub use candidates::generate_candidates;
pub use cli::Args;
pub use config::MiningConfig;
pub use data::{load_transactions, parse_transactions};
pub use error::MiningError;
pub use itemset::{Item, Itemset};
pub use lift::{filter_by_lift, LiftMode};
pub use mining::{mine, mine_with_timings, MiningOutcome, StageTimings};
pub use rules::{generate_rules, AntecedentSize, Rule};
pub use store::TransactionStore;
pub use support::{support, CounterKind, IndexedCounter, ScanCounter, SupportCounter};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
