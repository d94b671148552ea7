//! Loading transaction files into a [`TransactionStore`]

use crate::itemset::Itemset;
use crate::store::TransactionStore;
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Load a basket file where each line holds one transaction of
/// whitespace-separated integer item ids
///
/// # Arguments
/// * `file_path` - Path to the transaction file
///
/// # Returns
/// * `TransactionStore` with per-item occurrence counts
pub fn load_transactions(file_path: &str) -> crate::Result<TransactionStore<u32>> {
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open transaction file: {file_path}"))?;
    let store = parse_transactions(BufReader::new(file))
        .with_context(|| format!("Failed to parse transaction file: {file_path}"))?;

    tracing::debug!(
        path = file_path,
        transactions = store.len(),
        items = store.distinct_items(),
        "loaded transactions"
    );
    Ok(store)
}

/// Parse transactions from any buffered reader.
///
/// Repeated ids on one line collapse into a single item. Blank lines and
/// tokens that are not unsigned integers are rejected with their line number.
pub fn parse_transactions<R: BufRead>(reader: R) -> crate::Result<TransactionStore<u32>> {
    let mut transactions = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;

        if line.trim().is_empty() {
            anyhow::bail!("Line {line_no} is blank; every line must hold a transaction");
        }

        let transaction = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u32>()
                    .map_err(|_| anyhow::anyhow!("Invalid item id '{token}' on line {line_no}"))
            })
            .collect::<crate::Result<Itemset<u32>>>()?;

        transactions.push(transaction);
    }

    Ok(TransactionStore::new(transactions))
}
