//! Implied volatility surface summary
//!
//! Fetches an options chain, prints per-expiration ATM/call/put IV means
//! and the put-call skew, and optionally opens an IV scatter chart.

use clap::Parser;

use vol_scan::prelude::*;
use vol_scan::{plot, report};

#[derive(Parser)]
#[command(name = "iv_surface", about = "Analyze the IV surface for a symbol")]
struct Args {
    /// Stock symbol (e.g., SPY, AAPL)
    symbol: String,

    /// Data provider
    #[arg(long, value_enum, default_value_t = Provider::Cboe)]
    provider: Provider,

    /// Skip visualization
    #[arg(long)]
    no_plot: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    analyze(&args.symbol, args.provider, !args.no_plot);
}

fn analyze(symbol: &str, provider: Provider, plot_surface: bool) {
    println!("\nFetching options chain for {}...", symbol);
    let chains = match fetch_chains(symbol, provider) {
        Ok(rows) => rows,
        Err(e) => {
            println!("Error fetching options chain: {}", e);
            return;
        }
    };

    if chains.is_empty() {
        println!("No options data for {}", symbol);
        return;
    }

    let Some(price) = resolve_underlying(&chains) else {
        println!("Cannot determine underlying price from data");
        return;
    };

    let valid = with_valid_iv(&by_dte(&chains, 7, 180));
    if valid.is_empty() {
        println!("No valid IV data found");
        return;
    }

    println!("\nUnderlying: ${:.2}", price);
    println!("\n{}", report::banner("IV SUMMARY BY EXPIRATION", 70));
    println!(
        "{:<12} {:>6} {:>10} {:>10} {:>10}",
        "Expiration", "DTE", "ATM IV", "Call IV", "Put IV"
    );
    println!("{}", report::rule('-', 70));

    let summaries = summarize_by_expiration(&valid, price, 8);
    for s in &summaries {
        println!(
            "{:<12} {:>6} {:>9.1}% {:>9.1}% {:>9.1}%",
            s.expiration.to_string(),
            s.dte,
            s.atm_iv,
            s.call_iv,
            s.put_iv
        );
    }

    println!("\n{}", report::banner("IV SKEW (Put IV - Call IV)", 70));
    for s in &summaries {
        let skew = s.skew();
        println!(
            "{:<12} Skew: {:+.1}% {}",
            s.expiration.to_string(),
            skew,
            classify_skew(skew).arrow_label()
        );
    }

    if plot_surface {
        plot::iv_surface_chart(&valid, price, symbol);
    }
}
