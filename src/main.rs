//! order-fixtures
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌────────────┐    ┌──────────┐
//! │  Config  │───▶│ Domains  │───▶│ Generator  │───▶│  Output  │
//! │  (YAML)  │    │ (tables) │    │ (+invalid) │    │  (JSON)  │
//! └──────────┘    └──────────┘    └────────────┘    └──────────┘
//! ```
//!
//! 100% valid orders:
//!   order-fixtures -n 50 --min-items 1 --max-items 10 --invalid-rate 0.0 -o mock.json
//!
//! 80% valid orders:
//!   order-fixtures -n 50 --min-items 1 --max-items 10 --invalid-rate 0.2 -o mock.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use validator::Validate;

use order_fixtures::config::AppConfig;
use order_fixtures::fixture_io::{DEFAULT_OUTPUT, write_orders};
use order_fixtures::{Domains, GenerateParams, OrderGenerator};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "order-fixtures")]
#[command(about = "Generate mock orders JSON (valid + invalid)", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    /// Number of orders to generate
    #[arg(short = 'n', long, default_value_t = 100)]
    num_orders: usize,

    /// Minimum items per order
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    min_items: i64,

    /// Maximum items per order
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    max_items: i64,

    /// Fraction of orders to make invalid (0.0-1.0)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    invalid_rate: f64,

    /// Output file name
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Seed for reproducible output (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// YAML file with lookup tables (overrides config `domains_file`)
    #[arg(long)]
    domains: Option<PathBuf>,

    /// Config profile: loads config/<env>.yaml
    #[arg(short, long, default_value = "dev")]
    env: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Reject bad arguments before touching anything else
    let params = GenerateParams::new(cli.num_orders, cli.min_items, cli.max_items, cli.invalid_rate)
        .context("Invalid arguments")?;

    let app_config = AppConfig::load(&cli.env)?;
    let _log_guard = order_fixtures::logging::init_logging(&app_config);

    let domains = match cli.domains.as_ref().or(app_config.domains_file.as_ref()) {
        Some(path) => {
            tracing::info!(target: "CONFIG", "Loading lookup tables from {}", path.display());
            Domains::from_yaml_file(path)
                .with_context(|| format!("Invalid lookup tables in {}", path.display()))?
        }
        None => Domains::default(),
    };
    let generator = OrderGenerator::new(domains).context("Invalid lookup tables")?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(
        count = params.count,
        min_items = params.min_items,
        max_items = params.max_items,
        invalid_rate = params.invalid_rate,
        seed = ?cli.seed,
        "Generating orders"
    );

    let batch = generator.generate(&mut rng, &params)?;

    let schema_failures = batch
        .orders
        .iter()
        .filter(|o| o.validate().is_err())
        .count();
    tracing::info!(
        invalidated = batch.invalid_count(),
        schema_failures,
        "Generation finished"
    );

    write_orders(&cli.output, &batch.orders)
        .with_context(|| format!("Failed to write fixtures to {}", cli.output.display()))?;

    println!(
        "Generated {} orders ({:.0}% invalid) into {}",
        params.count,
        params.invalid_rate * 100.0,
        cli.output.display()
    );

    Ok(())
}
