//! Flip profitability: category totals and financing interest into ROI metrics

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::model::FlipScenario;
use crate::costs::{CostCategory, PeriodicCategory};
use crate::error::Result;
use crate::financing::FinancingSummary;

/// Aggregated category totals for one scenario
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub acquisition: f64,
    pub renovation: f64,
    /// Holding costs over the whole holding period
    pub holding: f64,
    /// Maintenance over the whole holding period
    pub maintenance: f64,
    pub selling: f64,
    pub revenue: f64,
}

/// Non-borrowed cash put into the project
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashInvested {
    /// Down payment on the property
    pub property: f64,
    /// Personal funds spent on renovation
    pub renovation: f64,
}

impl CashInvested {
    pub fn total(&self) -> f64 {
        self.property + self.renovation
    }
}

/// Derived profitability metrics; percentages are expressed as 12.5 for 12.5%
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityResult {
    pub acquisition_cost: f64,
    pub renovation_cost: f64,
    pub total_investment: f64,
    pub total_revenue: f64,
    pub gross_profit: f64,
    pub holding_costs: f64,
    pub selling_costs: f64,
    pub financing_costs: f64,
    pub net_profit: f64,
    pub roi: f64,
    pub annualized_roi: f64,
    pub cash_on_cash: f64,
    pub total_cash_invested: f64,
}

/// Everything computed for one flip scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipAnalysis {
    pub holding_period_months: u32,
    pub totals: CategoryTotals,
    pub property_financing: FinancingSummary,
    pub renovation_financing: FinancingSummary,
    pub profitability: ProfitabilityResult,
}

/// Compound a holding-period ROI to a one-year figure
///
/// A loss of 100% or more has no real fractional power; it annualizes to a
/// total loss of -100%.
pub fn annualized_roi(roi: f64, holding_period_months: u32) -> f64 {
    let years = holding_period_months as f64 / 12.0;
    if years <= 0.0 {
        return roi;
    }
    let growth = 1.0 + roi / 100.0;
    if growth <= 0.0 {
        warn!("ROI of {roi:.2}% is a total loss; annualized ROI clamped to -100%");
        return -100.0;
    }
    (growth.powf(1.0 / years) - 1.0) * 100.0
}

fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Combine already-aggregated totals and financing interest into metrics
pub fn calculate_profitability(
    totals: &CategoryTotals,
    property_financing: &FinancingSummary,
    renovation_financing: &FinancingSummary,
    cash: CashInvested,
    holding_period_months: u32,
) -> ProfitabilityResult {
    let total_investment = totals.acquisition + totals.renovation;
    let total_cash_invested = cash.total();
    let gross_profit = totals.revenue - totals.acquisition - totals.renovation;
    let holding_costs = totals.holding + totals.maintenance;
    let financing_costs =
        property_financing.total_interest_paid + renovation_financing.total_interest_paid;
    let net_profit = gross_profit - holding_costs - totals.selling - financing_costs;

    let roi = percent_of(net_profit, total_cash_invested);
    // Same base and numerator as ROI
    let cash_on_cash = percent_of(net_profit, total_cash_invested);

    ProfitabilityResult {
        acquisition_cost: totals.acquisition,
        renovation_cost: totals.renovation,
        total_investment,
        total_revenue: totals.revenue,
        gross_profit,
        holding_costs,
        selling_costs: totals.selling,
        financing_costs,
        net_profit,
        roi,
        annualized_roi: annualized_roi(roi, holding_period_months),
        cash_on_cash,
        total_cash_invested,
    }
}

impl FlipScenario {
    pub fn validate(&self) -> Result<()> {
        self.acquisition.validate()?;
        self.renovation.validate()?;
        self.holding.validate()?;
        self.maintenance.validate()?;
        self.selling.validate()?;
        self.revenues.validate()?;
        self.property_financing.validate()?;
        self.renovation_financing.validate()?;
        Ok(())
    }

    /// Category totals for the current inputs
    pub fn totals(&self) -> CategoryTotals {
        CategoryTotals {
            acquisition: self.acquisition.total(),
            renovation: self.renovation.total(),
            holding: self.holding.period_total(self.holding_period_months),
            maintenance: self.maintenance.period_total(self.holding_period_months),
            selling: self.selling.total(),
            revenue: self.revenues.total(),
        }
    }

    /// Run aggregation, amortization and profitability without storing anything
    pub fn analyze(&self) -> Result<FlipAnalysis> {
        self.validate()?;

        let months = self.holding_period_months;
        let totals = self.totals();
        let property_financing = self.property_financing.amortize(months);
        let renovation_financing = self.renovation_financing.amortize(months);
        let cash = CashInvested {
            property: self.property_financing.down_payment,
            renovation: self.renovation_financing.personal_funds,
        };

        let profitability = calculate_profitability(
            &totals,
            &property_financing,
            &renovation_financing,
            cash,
            months,
        );

        debug!(
            "Flip '{}': net profit {:.2}, ROI {:.2}%, annualized {:.2}%",
            self.general_info.property_address,
            profitability.net_profit,
            profitability.roi,
            profitability.annualized_roi,
        );

        Ok(FlipAnalysis {
            holding_period_months: months,
            totals,
            property_financing,
            renovation_financing,
            profitability,
        })
    }

    /// Recompute and store the profitability block, replacing any previous one
    ///
    /// The stored block is cleared when the inputs are rejected.
    pub fn calculate_all(&mut self) -> Result<FlipAnalysis> {
        self.profitability_analysis = None;
        let analysis = self.analyze()?;
        self.profitability_analysis = Some(analysis.profitability.clone());
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financing::LoanTerms;
    use crate::flip::model::{AcquisitionCosts, FlipRevenues, RenovationCosts, SellingCosts};
    use approx::assert_relative_eq;

    fn cash_deal() -> FlipScenario {
        FlipScenario {
            acquisition: AcquisitionCosts { purchase_price: 200_000.0, ..Default::default() },
            renovation: RenovationCosts {
                kitchen: 30_000.0,
                flooring: 10_000.0,
                ..Default::default()
            },
            selling: SellingCosts { broker_commission: 10_000.0, ..Default::default() },
            revenues: FlipRevenues { expected_sale_price: 300_000.0, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_cash_invested_zeroes_roi() {
        for sale in [100_000.0, 300_000.0] {
            let mut scenario = cash_deal();
            scenario.revenues.expected_sale_price = sale;
            let result = scenario.analyze().unwrap().profitability;
            assert_eq!(result.total_cash_invested, 0.0);
            assert_eq!(result.roi, 0.0);
            assert_eq!(result.cash_on_cash, 0.0);
            assert_ne!(result.net_profit, 0.0);
        }
    }

    #[test]
    fn test_net_profit_breakdown() {
        let mut scenario = cash_deal();
        scenario.property_financing.down_payment = 200_000.0;
        scenario.renovation_financing.personal_funds = 40_000.0;

        let result = scenario.analyze().unwrap().profitability;
        assert_relative_eq!(result.total_investment, 240_000.0);
        assert_relative_eq!(result.gross_profit, 60_000.0);
        assert_relative_eq!(result.net_profit, 50_000.0);
        assert_relative_eq!(result.roi, 50_000.0 / 240_000.0 * 100.0, epsilon = 1e-9);
        assert_eq!(result.roi, result.cash_on_cash);
    }

    #[test]
    fn test_financing_interest_reduces_profit() {
        let mut scenario = cash_deal();
        scenario.property_financing.down_payment = 40_000.0;
        scenario.property_financing.first_mortgage =
            LoanTerms::from_years(160_000.0, 6.0, 25).unwrap();
        scenario.renovation_financing.personal_funds = 40_000.0;

        let analysis = scenario.analyze().unwrap();
        let expected_interest = LoanTerms::from_years(160_000.0, 6.0, 25).unwrap().interest_over(6);
        assert_relative_eq!(
            analysis.profitability.financing_costs,
            expected_interest,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            analysis.profitability.net_profit,
            50_000.0 - expected_interest,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_annualized_roi_six_months() {
        // 21% over half a year compounds to 46.41% a year
        assert_relative_eq!(annualized_roi(21.0, 6), 46.41, epsilon = 1e-9);
    }

    #[test]
    fn test_annualized_roi_zero_months_passes_through() {
        assert_eq!(annualized_roi(12.5, 0), 12.5);
    }

    #[test]
    fn test_annualized_roi_total_loss_clamped() {
        assert_eq!(annualized_roi(-100.0, 6), -100.0);
        assert_eq!(annualized_roi(-150.0, 18), -100.0);
        assert!(annualized_roi(-50.0, 6) > -100.0);
    }

    #[test]
    fn test_calculate_all_replaces_block() {
        let mut scenario = cash_deal();
        scenario.property_financing.down_payment = 100_000.0;
        scenario.calculate_all().unwrap();
        let first = scenario.profitability_analysis.clone().unwrap();

        scenario.revenues.expected_sale_price = 320_000.0;
        scenario.calculate_all().unwrap();
        let second = scenario.profitability_analysis.clone().unwrap();

        assert_relative_eq!(second.net_profit - first.net_profit, 20_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejected_inputs_clear_stored_block() {
        let mut scenario = cash_deal();
        scenario.property_financing.down_payment = 100_000.0;
        scenario.calculate_all().unwrap();
        assert!(scenario.profitability_analysis.is_some());

        scenario.selling.staging = f64::NAN;
        assert!(scenario.calculate_all().is_err());
        assert!(scenario.profitability_analysis.is_none());
    }

    #[test]
    fn test_negative_input_rejected() {
        let mut scenario = cash_deal();
        scenario.renovation.painting = -500.0;
        assert!(scenario.calculate_all().is_err());
        assert!(scenario.profitability_analysis.is_none());
    }
}
