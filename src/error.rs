//! Configuration errors raised before any mining work starts

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum MiningError {
    #[error("minimum support must be non-negative, got {0}")]
    NegativeSupport(i64),
    #[error("minimum confidence must lie in [0, 1], got {0}")]
    ConfidenceOutOfRange(f64),
    #[error("minimum lift must be a finite non-negative number, got {0}")]
    InvalidLift(f64),
    #[error("antecedent size {size} is outside [0, {itemset_len}) for an itemset of {itemset_len} items")]
    AntecedentSizeOutOfRange { size: usize, itemset_len: usize },
}
