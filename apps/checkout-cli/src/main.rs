//! # Checkout CLI
//!
//! Prices one checkout request read from a file or stdin.
//!
//! ```text
//! $ echo '{"user_id":"u1","items":[{"price":100,"qty":2}],"coupon":"SAVE10"}' | checkout
//! {"order_id":"u1-1-X","user_id":"u1","currency":"USD","subtotal":200,"discount":20,"tax":37,"total":217,"items_count":1}
//! ```
//!
//! ## Exit Codes
//! - `0`: priced, `OrderResult` on stdout
//! - `2`: request rejected, `ApiError` on stdout
//! - `1`: could not read input or configuration

mod config;
mod error;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use checkout_core::Checkout;

use crate::config::CliConfig;
use crate::error::ApiError;

/// Price a checkout request.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON request file; reads stdin when omitted
    file: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load().context("Failed to load configuration")?;
    debug!(
        tax_rate_bps = config.tax_rate_bps,
        default_currency = %config.default_currency,
        "Configuration loaded"
    );

    let input = read_input(cli.file.as_ref())?;
    let checkout = Checkout::new(config.pricing());

    match checkout.process_json(&input) {
        Ok(order) => {
            info!(
                order_id = %order.order_id,
                total = %order.total,
                items_count = order.items_count,
                "Checkout priced"
            );
            print_json(&order, cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let api = ApiError::from(err);
            warn!(code = ?api.code, status = api.status, "Checkout rejected: {}", api.message);
            print_json(&api, cli.pretty)?;
            Ok(ExitCode::from(2))
        }
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
