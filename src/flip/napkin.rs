//! FIP10 quick screen for flips
//!
//! Overhead is a flat share of the final sale price; whatever is left after
//! the purchase, the renovation and the overhead is the profit.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, Result};

/// Thresholds for the flip quick screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlipNapkinConfig {
    /// Overhead as a fraction of the final price (0.10 = 10%)
    pub overhead_ratio: f64,

    /// Minimum profit for a deal to pass
    pub min_profit: f64,
}

impl Default for FlipNapkinConfig {
    fn default() -> Self {
        Self {
            overhead_ratio: 0.10,
            min_profit: 25_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlipNapkinInput {
    pub initial_price: f64,
    pub renovation_price: f64,
    pub final_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipNapkinResult {
    pub overhead: f64,
    pub profit: f64,
    pub is_good_deal: bool,
    /// Highest purchase price that still clears the profit threshold
    pub max_offer_price: f64,
}

impl FlipNapkinInput {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("initialPrice", self.initial_price)?;
        ensure_non_negative("renovationPrice", self.renovation_price)?;
        ensure_non_negative("finalPrice", self.final_price)?;
        Ok(())
    }
}

/// Run the FIP10 screen
pub fn flip_napkin(input: &FlipNapkinInput, config: &FlipNapkinConfig) -> Result<FlipNapkinResult> {
    input.validate()?;

    let overhead = input.final_price * config.overhead_ratio;
    let profit = input.final_price - input.initial_price - input.renovation_price - overhead;

    Ok(FlipNapkinResult {
        overhead,
        profit,
        is_good_deal: profit >= config.min_profit,
        max_offer_price: flip_max_offer_price(input.final_price, input.renovation_price, config),
    })
}

/// Purchase price at which FIP10 profit lands exactly on the threshold
///
/// Returns zero when no purchase price can reach the threshold.
pub fn flip_max_offer_price(
    final_price: f64,
    renovation_price: f64,
    config: &FlipNapkinConfig,
) -> f64 {
    let overhead = final_price * config.overhead_ratio;
    (final_price - renovation_price - overhead - config.min_profit).max(0.0)
}
