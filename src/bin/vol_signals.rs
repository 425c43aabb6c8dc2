//! Volatility trading signals
//!
//! Term structure, fly, skew, and ATM straddle economics from one chain
//! fetch, plus a variance-risk-premium mode (`--vrp`) that compares the
//! 30-day ATM IV against trailing realized volatility.

use clap::Parser;

use vol_scan::analytics::VRP_DTE_BUCKET;
use vol_scan::prelude::*;
use vol_scan::report;

#[derive(Parser)]
#[command(name = "vol_signals", about = "Volatility trading signals")]
struct Args {
    /// Symbol (e.g., BTC, SPY)
    symbol: String,

    /// Data provider
    #[arg(long, value_enum, default_value_t = Provider::Deribit)]
    provider: Provider,

    /// Calculate VRP instead of the signal scan
    #[arg(long)]
    vrp: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.vrp {
        calculate_vrp(&args.symbol);
    } else {
        analyze(&args.symbol, args.provider);
    }
}

fn analyze(symbol: &str, provider: Provider) {
    println!(
        "\n{}",
        report::banner(&format!("VOLATILITY SIGNALS: {}", symbol), 60)
    );

    let chains = match fetch_chains(symbol, provider) {
        Ok(rows) => rows,
        Err(e) => {
            println!("Error fetching data: {}", e);
            return;
        }
    };

    if chains.is_empty() {
        println!("No options data available");
        return;
    }

    let Some(price) = resolve_underlying(&chains) else {
        println!("Cannot determine underlying price");
        return;
    };

    let valid = with_valid_iv(&by_dte(&chains, 1, i64::MAX));
    if valid.is_empty() {
        println!("No valid options data");
        return;
    }

    let dtes = sorted_dtes(&valid);

    println!("\nUnderlying: ${}", report::fmt_thousands(price, 2));
    println!("Expirations (DTE): {:?}", &dtes[..dtes.len().min(8)]);

    // 1. Term Structure
    println!("\n{}", report::section("TERM STRUCTURE", 60));

    let mut term: Vec<(i64, f64)> = Vec::new();
    for &dte in dtes.iter().take(6) {
        let slice = by_dte(&valid, dte, dte);
        let atm_iv = atm_iv_pct(&slice, price);
        if atm_iv > 0.0 {
            term.push((dte, atm_iv));
            println!("  DTE {:>3}: ATM IV = {:.1}%", dte, atm_iv);
        }
    }

    let mut ts_spread = 0.0;
    if term.len() >= 2 {
        let (_, near_iv) = term[0];
        let (_, far_iv) = term[term.len() - 1];
        let (spread, shape) = classify_term(near_iv, far_iv);
        ts_spread = spread;

        println!("\n  Structure: {} (spread: {:+.1}%)", shape, spread);
        if shape == TermShape::Contango {
            println!("  Signal: Calendar spread opportunity (+Theta, +Gamma)");
        }
    }

    // 2. Fly (vol-of-vol proxy)
    println!("\n{}", report::section("FLY ANALYSIS (Vol-of-Vol)", 60));

    for &dte in dtes.iter().take(3) {
        let slice = by_dte(&valid, dte, dte);
        let atm_iv = atm_iv_pct(&by_option_type(&slice, OptionType::Call), price);
        let (call_wing, put_wing) = wing_ivs_pct(&slice, price);

        if atm_iv > 0.0 && call_wing > 0.0 && put_wing > 0.0 {
            let fly_val = fly(call_wing, put_wing, atm_iv);
            println!(
                "  DTE {:>3}: Fly = {:+.2}% (ATM={:.1}%, Wings avg={:.1}%)",
                dte,
                fly_val,
                atm_iv,
                (call_wing + put_wing) / 2.0
            );
        }
    }

    // 3. Skew
    println!("\n{}", report::section("SKEW ANALYSIS", 60));

    for &dte in dtes.iter().take(3) {
        let slice = by_dte(&valid, dte, dte);
        let (call_wing, put_wing) = wing_ivs_pct(&slice, price);

        if call_wing > 0.0 && put_wing > 0.0 {
            let skew = put_wing - call_wing;
            println!(
                "  DTE {:>3}: Skew = {:+.2}% ({})",
                dte,
                skew,
                classify_skew(skew)
            );
        }
    }

    // 4. Straddle premium
    println!("\n{}", report::section("ATM STRADDLE ANALYSIS", 60));

    for &dte in dtes.iter().take(3) {
        let slice = by_dte(&valid, dte, dte);
        let atm_call = nearest_to_spot(&slice, OptionType::Call, price);
        let atm_put = nearest_to_spot(&slice, OptionType::Put, price);

        if let (Some(call), Some(put)) = (atm_call, atm_put) {
            if let (Some(call_mid), Some(put_mid)) = (call.mid(), put.mid()) {
                let s = straddle(call_mid, put_mid, price, dte);
                let total_theta = call.theta.unwrap_or(0.0) + put.theta.unwrap_or(0.0);

                println!(
                    "  DTE {:>3}: Straddle = ${:.2} ({:.2}% move needed)",
                    dte, s.cost, s.pct_move
                );
                println!(
                    "           Theta = ${:.2}/day | BE Daily Move = {:.3}%",
                    total_theta, s.daily_breakeven
                );
            }
        }
    }

    // 5. Summary
    println!("\n{}", report::banner("TRADING SIGNALS SUMMARY", 60));

    let mut signals: Vec<&str> = Vec::new();
    if term.len() >= 2 {
        if ts_spread > 2.0 {
            signals.push("[+] Strong Contango: Sell calendar spreads");
        } else if ts_spread < -2.0 {
            signals.push("[+] Backwardation: Vol compression expected");
        }
    }

    if signals.is_empty() {
        println!("\nNo strong signals detected");
    } else {
        println!("\n{}", signals.join("\n"));
    }
    println!();
}

/// The quote of one type whose strike sits closest to spot.
fn nearest_to_spot(rows: &[QuoteRow], option_type: OptionType, spot: f64) -> Option<QuoteRow> {
    by_option_type(rows, option_type).into_iter().min_by(|a, b| {
        (a.strike - spot)
            .abs()
            .partial_cmp(&(b.strike - spot).abs())
            .unwrap()
    })
}

fn calculate_vrp(symbol: &str) {
    println!(
        "\n{}",
        report::banner(&format!("VRP ANALYSIS: {}", symbol), 60)
    );

    let chains = match fetch_chains(symbol, Provider::Deribit) {
        Ok(rows) => rows,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };

    if chains.is_empty() {
        println!("No options data");
        return;
    }

    let Some(price) = resolve_underlying(&chains) else {
        println!("Cannot determine underlying price");
        return;
    };

    let month_options = by_dte(&chains, VRP_DTE_BUCKET.0, VRP_DTE_BUCKET.1);
    let iv_30d = atm_iv_pct(&month_options, price);
    if iv_30d == 0.0 {
        println!("No ATM options for 30-day expiry");
        return;
    }
    println!("\n30-Day IV: {:.1}%", iv_30d);

    let closes = match fetch_daily_closes(symbol) {
        Ok(closes) => closes,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };

    let Some(rv_30d) = realized_vol(&closes, 30) else {
        println!("Insufficient historical data for RV");
        return;
    };
    println!("30-Day RV: {:.1}%", rv_30d);

    let vrp = iv_30d - rv_30d;
    println!("\nVRP (IV - RV): {:+.1}%", vrp);

    match classify_vrp(vrp) {
        VrpSignal::High => println!("Signal: HIGH VRP - Favorable for vol selling"),
        VrpSignal::Negative => println!("Signal: NEGATIVE VRP - Pause vol selling strategies"),
        VrpSignal::Neutral => println!("Signal: NEUTRAL VRP"),
    }
}
