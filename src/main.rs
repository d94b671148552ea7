//! BasketForge: association rule mining CLI
//!
//! This is the main entrypoint that orchestrates transaction loading,
//! frequent itemset search, rule derivation and reporting.

use anyhow::Result;
use basketforge::{load_transactions, logging, mine_with_timings, report, Args};
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    logging::init(args.verbose)?;

    let config = args.mining_config()?;
    tracing::debug!(?config, "effective configuration");

    let start_time = Instant::now();
    if args.verbose {
        eprintln!("BasketForge - Association rules with Apriori");
        eprintln!("=============================================\n");
    }

    // Step 1: Load transactions
    eprint!("Loading transactions from {}...", args.input);
    let load_start = Instant::now();
    let store = load_transactions(&args.input)?;
    eprintln!(" done in {:.2}s", load_start.elapsed().as_secs_f64());
    if args.verbose {
        eprintln!(
            "  {} transactions, {} distinct items",
            store.len(),
            store.distinct_items()
        );
    }

    // Step 2: Mine
    let outcome = mine_with_timings(&store, &config)?;
    let timings = outcome.timings;
    eprintln!(
        "Apriori found {} frequent itemsets in {:.2}s",
        outcome.frequent.len(),
        (timings.index + timings.apriori).as_secs_f64()
    );
    if args.verbose {
        eprintln!("  {}", report::level_summary(&outcome.frequent));
    }
    eprintln!(
        "Generated {} rules in {:.2}s",
        outcome.rules.len(),
        timings.rules.as_secs_f64()
    );
    if let Some(min_lift) = config.min_lift {
        eprintln!(
            "Lift pass (min_lift={min_lift}, {:?}) finished in {:.2}s",
            config.lift_mode,
            timings.lift.as_secs_f64()
        );
    }

    // Step 3: Report
    let mut stdout = std::io::stdout().lock();
    report::write_rules(&mut stdout, &outcome.rules, args.format, args.top)?;

    eprintln!(
        "\nTotal processing time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
