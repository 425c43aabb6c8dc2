//! Crypto perpetual contracts snapshot
//!
//! Prints funding, open interest, and volume for a set of Deribit
//! perpetuals, or lists every available perpetual with `--list`.

use clap::Parser;

use vol_scan::prelude::*;
use vol_scan::report;

#[derive(Parser)]
#[command(name = "perps", about = "Analyze crypto perpetuals")]
struct Args {
    /// Symbols to analyze
    #[arg(default_values_t = vec!["BTC".to_string(), "ETH".to_string(), "SOL".to_string()])]
    symbols: Vec<String>,

    /// List all perpetual instruments
    #[arg(long)]
    list: bool,

    /// Show all raw data
    #[arg(long)]
    all: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.list {
        list_instruments();
    } else {
        analyze(&args.symbols, args.all);
    }
}

fn analyze(symbols: &[String], show_all: bool) {
    let client = DeribitClient::new();
    let rows = match client.perp_info(symbols) {
        Ok(rows) => rows,
        Err(e) => {
            println!("Error fetching data for {}: {}", symbols.join(","), e);
            return;
        }
    };

    if rows.is_empty() {
        println!("No data for {}", symbols.join(","));
        return;
    }

    println!("\n{}\n", report::banner("CRYPTO PERPETUAL ANALYSIS", 60));

    for row in &rows {
        let funding = row.current_funding.unwrap_or(0.0);
        let funding_8h = row.funding_8h.unwrap_or(0.0);

        println!("Symbol: {}", row.symbol);
        println!(
            "  Last Price:    ${}",
            report::fmt_thousands(row.last_price.unwrap_or(0.0), 2)
        );
        println!(
            "  Mark Price:    ${}",
            report::fmt_thousands(row.mark_price.unwrap_or(0.0), 2)
        );
        println!(
            "  Funding Rate:  {:.4}% (8h: {:.4}%)",
            funding * 100.0,
            funding_8h * 100.0
        );
        println!(
            "  Open Interest: ${}",
            report::fmt_thousands(row.open_interest.unwrap_or(0.0), 0)
        );
        println!(
            "  24h Volume:    ${}",
            report::fmt_thousands(row.volume_usd.unwrap_or(0.0), 0)
        );
        println!("  24h Change:    {:.2}%", row.change_percent.unwrap_or(0.0));
        println!();
    }

    if show_all {
        println!("\nRaw Data:");
        println!(
            "{:<18} {:>14} {:>14} {:>10} {:>16} {:>16} {:>8}",
            "symbol", "last_price", "mark_price", "funding%", "open_interest", "volume_usd", "chg%"
        );
        for row in &rows {
            println!(
                "{:<18} {:>14} {:>14} {:>10.4} {:>16} {:>16} {:>8.2}",
                row.symbol,
                report::fmt_thousands(row.last_price.unwrap_or(0.0), 2),
                report::fmt_thousands(row.mark_price.unwrap_or(0.0), 2),
                row.current_funding.unwrap_or(0.0) * 100.0,
                report::fmt_thousands(row.open_interest.unwrap_or(0.0), 0),
                report::fmt_thousands(row.volume_usd.unwrap_or(0.0), 0),
                row.change_percent.unwrap_or(0.0)
            );
        }
    }
}

fn list_instruments() {
    let client = DeribitClient::new();
    let perps = match client.perp_instruments() {
        Ok(rows) => rows,
        Err(e) => {
            println!("Error fetching instruments: {}", e);
            return;
        }
    };

    println!("\nAvailable Perpetual Contracts:");
    println!("{:<18} {:>14} {:>16}", "symbol", "last_price", "open_interest");
    for row in &perps {
        println!(
            "{:<18} {:>14} {:>16}",
            row.symbol,
            report::fmt_thousands(row.last_price.unwrap_or(0.0), 2),
            report::fmt_thousands(row.open_interest.unwrap_or(0.0), 0)
        );
    }
}
