//! Demo: run a batch of customers through a station and print the result.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use gas_station::builders::build_station;
use gas_station::config::StationConfig;
use gas_station::core::{AppResult, FuelType};
use gas_station::runtime::{Customer, serve_all, station_report};
use gas_station::util::init_tracing;

/// Simulate concurrent customers at a gas station.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON station config. Defaults to `GAS_STATION_CONFIG`, then the built-in station.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of customers to serve.
    #[arg(short = 'n', long, default_value_t = 30)]
    customers: u64,
    /// Worker threads serving customers. Defaults to one per CPU.
    #[arg(short, long)]
    workers: Option<usize>,
    /// Liters each customer asks for.
    #[arg(short, long, default_value_t = 100.0)]
    liters: f64,
    /// Amount added to the current price to form each customer's ceiling.
    /// Negative values make every customer cancel for price.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    price_margin: f64,
}

fn main() -> AppResult<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => StationConfig::from_json_file(path)?,
        None => StationConfig::from_env()?,
    };
    let station = build_station(&cfg).context("building station")?;

    let customers = (0..cli.customers)
        .map(|id| {
            let fuel_type = FuelType::ALL[usize::try_from(id).unwrap_or(0) % FuelType::ALL.len()];
            let price = station.get_price(fuel_type).unwrap_or(0.0);
            Customer::new(id, fuel_type, cli.liters, price + cli.price_margin)
        })
        .collect::<Vec<_>>();

    let workers = cli.workers.unwrap_or_else(num_cpus::get).max(1);
    let receipts = serve_all(&station, customers, workers)?;
    let fulfilled = receipts.iter().filter(|r| r.result.is_ok()).count();
    tracing::info!("{} of {} customers fulfilled", fulfilled, receipts.len());

    println!("{}", serde_json::to_string_pretty(&station_report(&station))?);
    Ok(())
}
