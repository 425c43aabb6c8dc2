//! ATM Greeks slice
//!
//! Fetches an options chain, keeps the nearest expiration with informative
//! deltas, and prints the ATM calls and puts with their Greeks. Optional
//! Greeks-vs-strike chart.

use clap::Parser;

use vol_scan::prelude::*;
use vol_scan::{plot, report};

#[derive(Parser)]
#[command(name = "options_greeks", about = "Analyze options Greeks for a symbol")]
struct Args {
    /// Stock symbol (e.g., SPY, AAPL)
    symbol: String,

    /// Data provider
    #[arg(long, value_enum, default_value_t = Provider::Cboe)]
    provider: Provider,

    /// Minimum DTE
    #[arg(long, default_value_t = 7)]
    min_dte: i64,

    /// Maximum DTE
    #[arg(long, default_value_t = 60)]
    max_dte: i64,

    /// ATM range as a decimal (0.05 = +/-5%)
    #[arg(long, default_value_t = 0.05)]
    range: f64,

    /// Show Greeks visualization
    #[arg(long)]
    plot: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    analyze(
        &args.symbol,
        args.provider,
        args.min_dte,
        args.max_dte,
        args.range,
        args.plot,
    );
}

fn analyze(
    symbol: &str,
    provider: Provider,
    min_dte: i64,
    max_dte: i64,
    pct_range: f64,
    visualize: bool,
) {
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
    println!("Underlying Price: ${:.2}", price);

    let valid = with_informative_delta(&by_dte(&chains, min_dte, max_dte));
    if valid.is_empty() {
        println!("No valid options found with Greeks data");
        return;
    }

    let expirations = sorted_expirations(&valid);
    let Some(&expiry) = expirations.first() else {
        println!("No expirations found after filtering");
        return;
    };
    let selected: Vec<QuoteRow> = valid
        .iter()
        .filter(|r| r.expiration == expiry)
        .cloned()
        .collect();

    println!(
        "Expiration: {} (DTE: {})",
        expiry,
        selected.first().map(|r| r.dte).unwrap_or(0)
    );
    println!("Total contracts: {}", selected.len());

    let lower = price * (1.0 - pct_range);
    let upper = price * (1.0 + pct_range);

    let calls = by_strike_band(&by_option_type(&selected, OptionType::Call), lower, upper);
    let puts = by_strike_band(&by_option_type(&selected, OptionType::Put), lower, upper);

    print_slice(&format!("ATM CALLS (\u{b1}{:.0}%)", pct_range * 100.0), &calls);
    print_slice(&format!("ATM PUTS (\u{b1}{:.0}%)", pct_range * 100.0), &puts);

    if visualize {
        plot::greeks_chart(&selected, price, expiry);
    }
}

/// Print one side's ATM table. Missing Greeks degrade to 0.
fn print_slice(title: &str, rows: &[QuoteRow]) {
    println!("\n{}", report::banner(title, 60));
    if rows.is_empty() {
        println!("No ATM options found");
        return;
    }

    println!(
        "{:>10} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "strike", "delta", "gamma", "theta", "vega", "iv", "bid", "ask"
    );
    for r in rows {
        println!(
            "{:>10.2} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.2} {:>8.2}",
            r.strike,
            r.delta.unwrap_or(0.0),
            r.gamma.unwrap_or(0.0),
            r.theta.unwrap_or(0.0),
            r.vega.unwrap_or(0.0),
            r.implied_volatility.unwrap_or(0.0),
            r.bid.unwrap_or(0.0),
            r.ask.unwrap_or(0.0)
        );
    }
}
