//! Side-by-side comparison of the three rental scenarios

use log::info;
use serde::{Deserialize, Serialize};

use super::engine::RentalAnalysis;
use super::model::{MultiScenario, MultiScenarioUpdate};
use crate::error::Result;
use crate::scenario::{best_scenario, Scenario, ScenarioId, ScenarioStore, Triple};

impl Scenario for MultiScenario {
    type Update = MultiScenarioUpdate;
    type Analysis = RentalAnalysis;

    fn apply_update(&mut self, update: MultiScenarioUpdate) {
        MultiScenario::apply_update(self, update);
    }

    fn calculate_all(&mut self) -> Result<RentalAnalysis> {
        MultiScenario::calculate_all(self)
    }
}

/// Comparison of every rental scenario plus the one with the best cash-on-cash return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiComparison {
    pub effective_gross_revenue: Triple<f64>,
    pub net_operating_income: Triple<f64>,
    pub annual_debt_service: Triple<f64>,
    pub annual_cashflow: Triple<f64>,
    pub cashflow_per_unit: Triple<f64>,
    pub cap_rate: Triple<f64>,
    pub dscr: Triple<f64>,
    pub cash_on_cash: Triple<f64>,
    pub total_cash_invested: Triple<f64>,
    pub best_scenario: ScenarioId,
}

impl MultiComparison {
    pub fn from_analyses(analyses: &Triple<RentalAnalysis>) -> Self {
        let cash_on_cash = analyses.map(|a| a.cash_on_cash);
        let best = best_scenario(&cash_on_cash);

        Self {
            effective_gross_revenue: analyses.map(|a| a.effective_gross_revenue),
            net_operating_income: analyses.map(|a| a.net_operating_income),
            annual_debt_service: analyses.map(|a| a.annual_debt_service),
            annual_cashflow: analyses.map(|a| a.annual_cashflow),
            cashflow_per_unit: analyses.map(|a| a.monthly_cashflow_per_unit),
            cap_rate: analyses.map(|a| a.cap_rate),
            dscr: analyses.map(|a| a.dscr),
            cash_on_cash,
            total_cash_invested: analyses.map(|a| a.total_cash_invested),
            best_scenario: best,
        }
    }
}

impl ScenarioStore<MultiScenario> {
    /// Recalculate all three slots and compare them
    pub fn compare(&mut self) -> Result<MultiComparison> {
        let analyses = self.calculate_each()?;
        let comparison = MultiComparison::from_analyses(&analyses);
        info!(
            "Best rental scenario: {} ({:.2}% cash on cash)",
            comparison.best_scenario,
            comparison.cash_on_cash.get(comparison.best_scenario),
        );
        Ok(comparison)
    }
}

/// Compare three standalone rental scenarios
pub fn compare_rentals(
    scenario1: MultiScenario,
    scenario2: MultiScenario,
    scenario3: MultiScenario,
) -> Result<MultiComparison> {
    ScenarioStore::from_scenarios(scenario1, scenario2, scenario3).compare()
}
