//! debt-waterfall - command-line entry point
//!
//! Reads debts from JSON, runs the waterfall engine and prints the result.

mod args;
mod money;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;

use args::{Args, Commands};
use debt_waterfall_core_rs::interest::amortize;
use debt_waterfall_core_rs::{
    allocate_payment_with, classify_phase_with, validate_portfolio, Debt, WaterfallConfig,
};
use money::{format_cents, parse_dollars};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    match args.command {
        Commands::Phase { debts, config } => {
            let debts = load_debts(&debts)?;
            let config = load_config(config.as_deref())?;
            print_phase(&debts, &config);
        }
        Commands::Allocate {
            debts,
            extra,
            config,
            json,
        } => {
            let debts = load_debts(&debts)?;
            let config = load_config(config.as_deref())?;
            let extra = parse_dollars(&extra).context("Invalid --extra amount")?;
            run_allocate(&debts, extra, &config, json)?;
        }
        Commands::Amortize {
            balance,
            rate,
            payment,
            months,
        } => {
            let balance = parse_dollars(&balance).context("Invalid --balance amount")?;
            let payment = parse_dollars(&payment).context("Invalid --payment amount")?;
            if !rate.is_finite() || rate < 0.0 {
                anyhow::bail!("--rate must be a non-negative percentage, got {}", rate);
            }
            print_schedule(balance, rate, payment, months);
        }
    }

    Ok(())
}

/// Load and validate a JSON array of debts
fn load_debts(path: &Path) -> Result<Vec<Debt>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read debts file {}", path.display()))?;
    let debts: Vec<Debt> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse debts file {}", path.display()))?;
    validate_portfolio(&debts)?;

    log::info!("loaded {} debt(s) from {}", debts.len(), path.display());
    Ok(debts)
}

fn load_config(path: Option<&Path>) -> Result<WaterfallConfig> {
    let Some(path) = path else {
        return Ok(WaterfallConfig::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = WaterfallConfig::from_json_str(&raw)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    log::info!("using {}-rung ladder from {}", config.ladder().len(), path.display());
    Ok(config)
}

fn print_phase(debts: &[Debt], config: &WaterfallConfig) {
    let phase = classify_phase_with(debts, config);

    println!("{}", phase);
    if let Some(progress) = phase.progress() {
        println!("Progress: {:.1}%", progress);
    }
    if let Some(threshold) = phase.threshold_percent() {
        println!("Target utilization: {}%", threshold);
    }

    for debt in debts.iter().filter(|d| d.is_revolving()) {
        println!(
            "  {:<24} {:>14} / {:>14}  {:>6.1}%",
            debt.name(),
            format_cents(debt.balance()),
            format_cents(debt.revolving_limit().unwrap_or(0)),
            debt.utilization()
        );
    }
}

fn run_allocate(debts: &[Debt], extra: i64, config: &WaterfallConfig, json: bool) -> Result<()> {
    let result = allocate_payment_with(debts, extra, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.phase());
    for allocation in result.iter() {
        println!("  {:<24} {:>14}", allocation.name, format_cents(allocation.amount));
    }
    println!("  {:<24} {:>14}", "Total", format_cents(result.total_allocated()));
    if result.unallocated() > 0 {
        println!("  {:<24} {:>14}", "Unallocated", format_cents(result.unallocated()));
    }

    Ok(())
}

fn print_schedule(balance: i64, rate: f64, payment: i64, months: u32) {
    let schedule = amortize(balance, rate, payment, months);

    println!(
        "{:>5} {:>14} {:>12} {:>12} {:>14}",
        "Month", "Balance", "Interest", "Principal", "New Balance"
    );
    for row in &schedule.rows {
        println!(
            "{:>5} {:>14} {:>12} {:>12} {:>14}",
            row.month,
            format_cents(row.starting_balance),
            format_cents(row.interest),
            format_cents(row.principal),
            format_cents(row.ending_balance)
        );
    }

    println!("Total interest:  {}", format_cents(schedule.total_interest));
    println!("Total principal: {}", format_cents(schedule.total_principal));
    if schedule.paid_off {
        println!("Paid off in {} month(s)", schedule.months());
    } else {
        println!(
            "Balance after {} month(s): {}",
            schedule.months(),
            format_cents(schedule.final_balance)
        );
    }
}
