//! Side-by-side comparison of the three flip scenarios

use log::info;
use serde::{Deserialize, Serialize};

use super::engine::FlipAnalysis;
use super::model::{FlipScenario, FlipScenarioUpdate};
use crate::error::Result;
use crate::scenario::{best_scenario, Scenario, ScenarioId, ScenarioStore, Triple};

impl Scenario for FlipScenario {
    type Update = FlipScenarioUpdate;
    type Analysis = FlipAnalysis;

    fn apply_update(&mut self, update: FlipScenarioUpdate) {
        FlipScenario::apply_update(self, update);
    }

    fn calculate_all(&mut self) -> Result<FlipAnalysis> {
        FlipScenario::calculate_all(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComparison {
    pub acquisition: Triple<f64>,
    pub renovation: Triple<f64>,
    pub holding: Triple<f64>,
    pub selling: Triple<f64>,
    pub total_investment: Triple<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueComparison {
    pub total_revenue: Triple<f64>,
    pub gross_profit: Triple<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingComparison {
    pub total_borrowed: Triple<f64>,
    pub monthly_payments: Triple<f64>,
    pub financing_costs: Triple<f64>,
    pub total_cash_invested: Triple<f64>,
}

/// Comparison of every scenario plus the one with the best annualized ROI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipComparison {
    pub net_profit: Triple<f64>,
    pub roi: Triple<f64>,
    pub annualized_roi: Triple<f64>,
    pub cash_on_cash: Triple<f64>,
    pub total_investment: Triple<f64>,
    pub holding_period_months: Triple<u32>,
    pub costs: CostComparison,
    pub revenues: RevenueComparison,
    pub financing: FinancingComparison,
    pub best_scenario: ScenarioId,
}

impl FlipComparison {
    pub fn from_analyses(analyses: &Triple<FlipAnalysis>) -> Self {
        let p = |f: fn(&FlipAnalysis) -> f64| analyses.map(f);
        let annualized_roi = p(|a| a.profitability.annualized_roi);
        let best = best_scenario(&annualized_roi);

        Self {
            net_profit: p(|a| a.profitability.net_profit),
            roi: p(|a| a.profitability.roi),
            annualized_roi,
            cash_on_cash: p(|a| a.profitability.cash_on_cash),
            total_investment: p(|a| a.profitability.total_investment),
            holding_period_months: analyses.map(|a| a.holding_period_months),
            costs: CostComparison {
                acquisition: p(|a| a.profitability.acquisition_cost),
                renovation: p(|a| a.profitability.renovation_cost),
                holding: p(|a| a.profitability.holding_costs),
                selling: p(|a| a.profitability.selling_costs),
                total_investment: p(|a| a.profitability.total_investment),
            },
            revenues: RevenueComparison {
                total_revenue: p(|a| a.profitability.total_revenue),
                gross_profit: p(|a| a.profitability.gross_profit),
            },
            financing: FinancingComparison {
                total_borrowed: p(|a| {
                    a.property_financing.total_borrowed + a.renovation_financing.total_borrowed
                }),
                monthly_payments: p(|a| {
                    a.property_financing.total_monthly_payment
                        + a.renovation_financing.total_monthly_payment
                }),
                financing_costs: p(|a| a.profitability.financing_costs),
                total_cash_invested: p(|a| a.profitability.total_cash_invested),
            },
            best_scenario: best,
        }
    }
}

impl ScenarioStore<FlipScenario> {
    /// Recalculate all three slots and compare them
    pub fn compare(&mut self) -> Result<FlipComparison> {
        let analyses = self.calculate_each()?;
        let comparison = FlipComparison::from_analyses(&analyses);
        info!(
            "Best flip scenario: {} ({:.2}% annualized)",
            comparison.best_scenario,
            comparison.annualized_roi.get(comparison.best_scenario),
        );
        Ok(comparison)
    }
}

/// Compare three standalone flip scenarios
pub fn compare_scenarios(
    scenario1: FlipScenario,
    scenario2: FlipScenario,
    scenario3: FlipScenario,
) -> Result<FlipComparison> {
    ScenarioStore::from_scenarios(scenario1, scenario2, scenario3).compare()
}
