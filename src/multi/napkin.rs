//! Quick screen for multi-unit rentals
//!
//! Expenses are a fixed share of revenue that grows with unit count, and
//! financing is estimated as a flat monthly percentage of the price.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, CalcError, Result};

/// Thresholds and heuristics for the rental quick screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiNapkinConfig {
    /// (max units, expense ratio) steps, checked in order
    pub expense_ratio_steps: Vec<(u32, f64)>,

    /// Ratio used above the last step
    pub expense_ratio_default: f64,

    /// Monthly financing cost as a fraction of price (0.005 = 0.5%)
    pub monthly_financing_rate: f64,

    /// Minimum monthly cashflow per door for a deal to pass
    pub min_cashflow_per_door: f64,
}

impl Default for MultiNapkinConfig {
    fn default() -> Self {
        Self {
            expense_ratio_steps: vec![(2, 0.30), (4, 0.35), (6, 0.45)],
            expense_ratio_default: 0.50,
            monthly_financing_rate: 0.005,
            min_cashflow_per_door: 75.0,
        }
    }
}

impl MultiNapkinConfig {
    pub fn expense_ratio(&self, units: u32) -> f64 {
        self.expense_ratio_steps
            .iter()
            .find(|(max_units, _)| units <= *max_units)
            .map(|(_, ratio)| *ratio)
            .unwrap_or(self.expense_ratio_default)
    }

    fn annual_financing(&self, price: f64) -> f64 {
        price * self.monthly_financing_rate * 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiNapkinInput {
    pub price: f64,
    pub apartments: u32,
    /// Annual gross revenue
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiNapkinResult {
    pub expense_ratio: f64,
    pub expenses: f64,
    pub net_operating_income: f64,
    pub financing: f64,
    pub cashflow: f64,
    pub cashflow_per_door: f64,
    pub is_good_deal: bool,
    /// Highest price at which cashflow per door still meets the threshold
    pub max_purchase_price: f64,
}

impl MultiNapkinInput {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("price", self.price)?;
        ensure_non_negative("revenue", self.revenue)?;
        if self.apartments == 0 {
            return Err(CalcError::invalid("apartments", "must be at least 1"));
        }
        Ok(())
    }
}

/// Run the rental quick screen
pub fn multi_napkin(
    input: &MultiNapkinInput,
    config: &MultiNapkinConfig,
) -> Result<MultiNapkinResult> {
    input.validate()?;

    let expense_ratio = config.expense_ratio(input.apartments);
    let expenses = input.revenue * expense_ratio;
    let net_operating_income = input.revenue - expenses;
    let financing = config.annual_financing(input.price);
    let cashflow = net_operating_income - financing;
    let cashflow_per_door = cashflow / input.apartments as f64 / 12.0;

    Ok(MultiNapkinResult {
        expense_ratio,
        expenses,
        net_operating_income,
        financing,
        cashflow,
        cashflow_per_door,
        is_good_deal: cashflow_per_door >= config.min_cashflow_per_door,
        max_purchase_price: multi_max_purchase_price(input.revenue, input.apartments, config),
    })
}

/// Price at which cashflow per door lands exactly on the threshold
///
/// Returns zero when revenue cannot reach the threshold at any price.
pub fn multi_max_purchase_price(revenue: f64, apartments: u32, config: &MultiNapkinConfig) -> f64 {
    let net_operating_income = revenue - revenue * config.expense_ratio(apartments);
    let required_cashflow = config.min_cashflow_per_door * apartments as f64 * 12.0;
    let annual_rate = config.monthly_financing_rate * 12.0;
    if annual_rate <= 0.0 {
        return 0.0;
    }
    ((net_operating_income - required_cashflow) / annual_rate).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_expense_ratio_steps() {
        let config = MultiNapkinConfig::default();
        let ratios: Vec<f64> =
            [1, 2, 3, 4, 5, 6, 7, 24].iter().map(|&u| config.expense_ratio(u)).collect();
        assert_eq!(ratios, vec![0.30, 0.30, 0.35, 0.35, 0.45, 0.45, 0.50, 0.50]);
    }

    #[test]
    fn test_threshold_boundary_is_good_deal() {
        // 120k revenue on six doors at 1.01M leaves exactly 75 per door
        let input = MultiNapkinInput { price: 1_010_000.0, apartments: 6, revenue: 120_000.0 };
        let result = multi_napkin(&input, &MultiNapkinConfig::default()).unwrap();
        assert_eq!(result.cashflow_per_door, 75.0);
        assert!(result.is_good_deal);

        let pricier = MultiNapkinInput { price: 1_010_100.0, ..input };
        assert!(!multi_napkin(&pricier, &MultiNapkinConfig::default()).unwrap().is_good_deal);
    }

    #[test]
    fn test_financing_heuristic() {
        let input = MultiNapkinInput { price: 400_000.0, apartments: 4, revenue: 48_000.0 };
        let result = multi_napkin(&input, &MultiNapkinConfig::default()).unwrap();
        assert_relative_eq!(result.financing, 24_000.0, epsilon = 1e-9);
        assert_relative_eq!(result.expenses, 16_800.0, epsilon = 1e-9);
        assert_relative_eq!(result.cashflow, 7_200.0, epsilon = 1e-9);
        assert_relative_eq!(result.cashflow_per_door, 150.0, epsilon = 1e-9);
    }

    #[test]
    fn test_max_purchase_price_inverts_screen() {
        let config = MultiNapkinConfig::default();
        let max = multi_max_purchase_price(120_000.0, 6, &config);
        assert_relative_eq!(max, 1_010_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_apartments_rejected() {
        let input = MultiNapkinInput { price: 100_000.0, apartments: 0, revenue: 10_000.0 };
        assert!(multi_napkin(&input, &MultiNapkinConfig::default()).is_err());
    }
}
