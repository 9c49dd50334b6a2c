//! Batch napkin screening of deal listings
//!
//! Reads a CSV of listings and writes one verdict row per listing.
//! Flip rows need `price`, `renovation` and `finalPrice`; multi rows need
//! `price`, `apartments` and `revenue`.
//!
//! Thresholds accept environment overrides:
//!   NAPKIN_OVERHEAD_RATIO, NAPKIN_MIN_PROFIT,
//!   NAPKIN_FINANCING_RATE, NAPKIN_MIN_CASHFLOW_PER_DOOR

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use realty_calc::flip::{flip_napkin, FlipNapkinConfig, FlipNapkinInput};
use realty_calc::multi::{multi_napkin, MultiNapkinConfig, MultiNapkinInput};

#[derive(Parser, Debug)]
#[command(name = "screen_deals")]
#[command(about = "Run the napkin screens over a CSV of listings")]
struct Args {
    /// Listings CSV
    input: PathBuf,

    /// Verdict CSV (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum DealKind {
    Flip,
    Multi,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Listing {
    id: String,
    kind: DealKind,
    price: f64,
    #[serde(default)]
    renovation: f64,
    #[serde(default)]
    final_price: f64,
    #[serde(default)]
    apartments: u32,
    #[serde(default)]
    revenue: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Verdict {
    id: String,
    kind: DealKind,
    /// Flip profit or multi cashflow per door
    metric: f64,
    /// Max offer (flip) or max purchase price (multi)
    max_price: f64,
    is_good_deal: bool,
    error: String,
}

fn env_or(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn load_configs() -> (FlipNapkinConfig, MultiNapkinConfig) {
    let flip_defaults = FlipNapkinConfig::default();
    let flip = FlipNapkinConfig {
        overhead_ratio: env_or("NAPKIN_OVERHEAD_RATIO", flip_defaults.overhead_ratio),
        min_profit: env_or("NAPKIN_MIN_PROFIT", flip_defaults.min_profit),
    };

    let multi_defaults = MultiNapkinConfig::default();
    let multi = MultiNapkinConfig {
        monthly_financing_rate: env_or(
            "NAPKIN_FINANCING_RATE",
            multi_defaults.monthly_financing_rate,
        ),
        min_cashflow_per_door: env_or(
            "NAPKIN_MIN_CASHFLOW_PER_DOOR",
            multi_defaults.min_cashflow_per_door,
        ),
        ..multi_defaults
    };

    (flip, multi)
}

fn screen(
    listing: &Listing,
    flip_config: &FlipNapkinConfig,
    multi_config: &MultiNapkinConfig,
) -> Verdict {
    let outcome = match listing.kind {
        DealKind::Flip => {
            let input = FlipNapkinInput {
                initial_price: listing.price,
                renovation_price: listing.renovation,
                final_price: listing.final_price,
            };
            flip_napkin(&input, flip_config).map(|r| (r.profit, r.max_offer_price, r.is_good_deal))
        }
        DealKind::Multi => {
            let input = MultiNapkinInput {
                price: listing.price,
                apartments: listing.apartments,
                revenue: listing.revenue,
            };
            multi_napkin(&input, multi_config)
                .map(|r| (r.cashflow_per_door, r.max_purchase_price, r.is_good_deal))
        }
    };

    match outcome {
        Ok((metric, max_price, is_good_deal)) => Verdict {
            id: listing.id.clone(),
            kind: listing.kind,
            metric,
            max_price,
            is_good_deal,
            error: String::new(),
        },
        Err(e) => {
            warn!("Listing {} rejected: {e}", listing.id);
            Verdict {
                id: listing.id.clone(),
                kind: listing.kind,
                metric: 0.0,
                max_price: 0.0,
                is_good_deal: false,
                error: e.to_string(),
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();
    let (flip_config, multi_config) = load_configs();

    let mut reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("Unable to open {}", args.input.display()))?;
    let listings: Vec<Listing> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Invalid listing row in {}", args.input.display()))?;
    info!("Loaded {} listings in {:?}", listings.len(), start.elapsed());

    let verdicts: Vec<Verdict> = listings
        .par_iter()
        .map(|listing| screen(listing, &flip_config, &multi_config))
        .collect();

    let good = verdicts.iter().filter(|v| v.is_good_deal).count();

    match &args.output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
            for verdict in &verdicts {
                writer.serialize(verdict)?;
            }
            writer.flush()?;
        }
        None => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for verdict in &verdicts {
                writer.serialize(verdict)?;
            }
            writer.flush()?;
        }
    }

    info!(
        "Screened {} listings ({} good deals) in {:?}",
        verdicts.len(),
        good,
        start.elapsed()
    );

    Ok(())
}
