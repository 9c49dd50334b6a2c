//! Sensitivity sweeps over a base rental scenario
//!
//! Every point re-runs the full rental analysis on a perturbed copy of the
//! base scenario. Points are independent of each other; only the named
//! combined-stress point moves several inputs at once.

use std::io::Write;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::engine::RentalAnalysis;
use super::model::MultiScenario;
use crate::error::{CalcError, Result};

/// Which input a sensitivity point moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SensitivityDimension {
    Base,
    InterestRate,
    Vacancy,
    ExpenseRatio,
    Rent,
    CombinedStress,
}

/// Perturbation applied to a copy of the base scenario
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Adjustment {
    /// Added to every active loan's annual rate, in percentage points
    pub rate_delta_points: f64,
    /// Replaces the vacancy rate when set
    pub vacancy_rate_percent: Option<f64>,
    /// Added to operating expenses as points of effective gross revenue
    pub expense_ratio_delta_points: f64,
    /// Percent change in residential rent
    pub rent_change_percent: f64,
}

impl Adjustment {
    fn apply(&self, base: &MultiScenario) -> MultiScenario {
        let mut scenario = base.clone();
        scenario.rental_analysis = None;

        if self.rate_delta_points != 0.0 {
            for loan in scenario.financing.sources_mut() {
                if loan.is_active() {
                    loan.annual_rate_percent =
                        (loan.annual_rate_percent + self.rate_delta_points).max(0.0);
                }
            }
        }
        if let Some(vacancy) = self.vacancy_rate_percent {
            scenario.vacancy_rate_percent = vacancy;
        }
        if self.rent_change_percent != 0.0 {
            let factor = 1.0 + self.rent_change_percent / 100.0;
            scenario.revenues.residential_rent =
                (scenario.revenues.residential_rent * factor).max(0.0);
        }
        scenario
    }
}

/// Sweep definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensitivityConfig {
    pub interest_rate_deltas: Vec<f64>,
    pub vacancy_rates: Vec<f64>,
    pub expense_ratio_deltas: Vec<f64>,
    pub rent_changes_percent: Vec<f64>,
    pub combined_stress: Option<Adjustment>,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            interest_rate_deltas: vec![-1.0, -0.5, 0.5, 1.0, 2.0],
            vacancy_rates: vec![0.0, 3.0, 5.0, 10.0, 15.0],
            expense_ratio_deltas: vec![-5.0, 5.0, 10.0],
            rent_changes_percent: vec![-10.0, -5.0, 5.0, 10.0],
            combined_stress: Some(Adjustment {
                rate_delta_points: 2.0,
                vacancy_rate_percent: Some(10.0),
                expense_ratio_delta_points: 5.0,
                rent_change_percent: -10.0,
            }),
        }
    }
}

impl SensitivityConfig {
    fn validate(&self) -> Result<()> {
        for &v in &self.vacancy_rates {
            if !(0.0..=100.0).contains(&v) {
                return Err(CalcError::invalid(
                    "vacancyRates",
                    format!("{v} is outside 0..=100"),
                ));
            }
        }
        if let Some(v) = self.combined_stress.and_then(|s| s.vacancy_rate_percent) {
            if !(0.0..=100.0).contains(&v) {
                return Err(CalcError::invalid(
                    "combinedStress.vacancyRatePercent",
                    format!("{v} is outside 0..=100"),
                ));
            }
        }
        Ok(())
    }

    /// Every point of the sweep in report order
    fn points(&self) -> Vec<(String, SensitivityDimension, Adjustment)> {
        let mut points = Vec::new();
        for &d in &self.interest_rate_deltas {
            points.push((
                format!("Interest rate {d:+.2} pts"),
                SensitivityDimension::InterestRate,
                Adjustment { rate_delta_points: d, ..Default::default() },
            ));
        }
        for &v in &self.vacancy_rates {
            points.push((
                format!("Vacancy {v:.1}%"),
                SensitivityDimension::Vacancy,
                Adjustment { vacancy_rate_percent: Some(v), ..Default::default() },
            ));
        }
        for &d in &self.expense_ratio_deltas {
            points.push((
                format!("Expense ratio {d:+.1} pts"),
                SensitivityDimension::ExpenseRatio,
                Adjustment { expense_ratio_delta_points: d, ..Default::default() },
            ));
        }
        for &p in &self.rent_changes_percent {
            points.push((
                format!("Rent {p:+.1}%"),
                SensitivityDimension::Rent,
                Adjustment { rent_change_percent: p, ..Default::default() },
            ));
        }
        if let Some(stress) = self.combined_stress {
            points.push((
                "Combined stress".to_string(),
                SensitivityDimension::CombinedStress,
                stress,
            ));
        }
        points
    }
}

/// Outcome of one perturbation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityPoint {
    pub label: String,
    pub dimension: SensitivityDimension,
    pub adjustment: Adjustment,
    pub annual_cashflow: f64,
    pub cashflow_per_unit: f64,
    pub cap_rate: f64,
    pub dscr: f64,
    /// Annual cashflow minus the base case
    pub cashflow_change: f64,
}

impl SensitivityPoint {
    fn from_analysis(
        label: String,
        dimension: SensitivityDimension,
        adjustment: Adjustment,
        analysis: &RentalAnalysis,
        base_cashflow: f64,
    ) -> Self {
        Self {
            label,
            dimension,
            adjustment,
            annual_cashflow: analysis.annual_cashflow,
            cashflow_per_unit: analysis.monthly_cashflow_per_unit,
            cap_rate: analysis.cap_rate,
            dscr: analysis.dscr,
            cashflow_change: analysis.annual_cashflow - base_cashflow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityReport {
    pub base: SensitivityPoint,
    pub points: Vec<SensitivityPoint>,
}

impl SensitivityReport {
    /// Write the base case and every point as CSV rows
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "Label",
            "Dimension",
            "AnnualCashflow",
            "CashflowPerUnit",
            "CapRate",
            "DSCR",
            "CashflowChange",
        ])?;
        for point in std::iter::once(&self.base).chain(&self.points) {
            csv_writer.write_record([
                point.label.clone(),
                format!("{:?}", point.dimension),
                format!("{:.2}", point.annual_cashflow),
                format!("{:.2}", point.cashflow_per_unit),
                format!("{:.4}", point.cap_rate),
                format!("{:.4}", point.dscr),
                format!("{:.2}", point.cashflow_change),
            ])?;
        }
        csv_writer
            .flush()
            .map_err(|e| CalcError::Csv(e.to_string()))?;
        Ok(())
    }
}

/// Run every perturbation in `config` against `scenario`
pub fn run_sensitivity(
    scenario: &MultiScenario,
    config: &SensitivityConfig,
) -> Result<SensitivityReport> {
    scenario.validate()?;
    config.validate()?;

    let base_analysis = scenario.rental_analysis_with(0.0);
    let base_cashflow = base_analysis.annual_cashflow;
    let base = SensitivityPoint::from_analysis(
        "Base case".to_string(),
        SensitivityDimension::Base,
        Adjustment::default(),
        &base_analysis,
        base_cashflow,
    );

    let points: Vec<SensitivityPoint> = config
        .points()
        .into_par_iter()
        .map(|(label, dimension, adjustment)| {
            let perturbed = adjustment.apply(scenario);
            let analysis = perturbed.rental_analysis_with(adjustment.expense_ratio_delta_points);
            SensitivityPoint::from_analysis(label, dimension, adjustment, &analysis, base_cashflow)
        })
        .collect();

    info!("Sensitivity sweep: {} points around base cashflow {:.2}", points.len(), base_cashflow);

    Ok(SensitivityReport { base, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financing::LoanTerms;
    use crate::multi::model::{OperatingExpenses, PropertyInfo, RentalRevenues};
    use approx::assert_relative_eq;

    fn sixplex() -> MultiScenario {
        let mut scenario = MultiScenario {
            property: PropertyInfo {
                number_of_units: 6,
                purchase_price: 900_000.0,
                ..Default::default()
            },
            revenues: RentalRevenues {
                residential_rent: 8_400.0,
                parking: 300.0,
                ..Default::default()
            },
            vacancy_rate_percent: 3.0,
            expenses: OperatingExpenses {
                property_taxes: 9_000.0,
                school_taxes: 900.0,
                insurance: 4_200.0,
                maintenance: 5_400.0,
                ..Default::default()
            },
            management_rate_percent: 4.0,
            ..Default::default()
        };
        scenario.financing.down_payment = 180_000.0;
        scenario.financing.first_mortgage = LoanTerms::from_years(720_000.0, 5.0, 30).unwrap();
        scenario
    }

    #[test]
    fn test_point_count_matches_config() {
        let config = SensitivityConfig::default();
        let report = run_sensitivity(&sixplex(), &config).unwrap();
        assert_eq!(report.points.len(), 5 + 5 + 3 + 4 + 1);
        assert_eq!(report.points.last().unwrap().dimension, SensitivityDimension::CombinedStress);
        assert_eq!(report.base.cashflow_change, 0.0);
    }

    #[test]
    fn test_rate_increase_lowers_cashflow_per_unit() {
        let config = SensitivityConfig {
            interest_rate_deltas: vec![-2.0, -1.0, 0.0, 0.5, 1.0, 2.0, 4.0],
            vacancy_rates: vec![],
            expense_ratio_deltas: vec![],
            rent_changes_percent: vec![],
            combined_stress: None,
        };
        let report = run_sensitivity(&sixplex(), &config).unwrap();
        for pair in report.points.windows(2) {
            assert!(
                pair[1].cashflow_per_unit < pair[0].cashflow_per_unit,
                "{} -> {}",
                pair[0].label,
                pair[1].label
            );
            assert!(pair[1].dscr < pair[0].dscr);
        }
    }

    #[test]
    fn test_points_are_not_cumulative() {
        let report = run_sensitivity(&sixplex(), &SensitivityConfig::default()).unwrap();
        let vacancy_3 = report
            .points
            .iter()
            .find(|p| {
                p.dimension == SensitivityDimension::Vacancy
                    && p.adjustment.vacancy_rate_percent == Some(3.0)
            })
            .unwrap();
        // Base vacancy is 3%, so this point reproduces the base case exactly
        assert_relative_eq!(vacancy_3.annual_cashflow, report.base.annual_cashflow, epsilon = 1e-9);
    }

    #[test]
    fn test_rent_and_expense_shifts() {
        let scenario = sixplex();
        let base = scenario.analyze().unwrap();
        let report = run_sensitivity(&scenario, &SensitivityConfig::default()).unwrap();

        let rent_up = report.points.iter().find(|p| p.label == "Rent +10.0%").unwrap();
        // 10% more residential rent, less vacancy and management on it
        let extra = 8_400.0 * 12.0 * 0.10 * 0.97 * 0.96;
        assert_relative_eq!(rent_up.cashflow_change, extra, epsilon = 1e-6);

        let expense_up =
            report.points.iter().find(|p| p.label == "Expense ratio +5.0 pts").unwrap();
        assert_relative_eq!(
            expense_up.cashflow_change,
            -base.effective_gross_revenue * 0.05,
            epsilon = 1e-6
        );
        // Cap rate ignores financing
        let rate_up = report.points.iter().find(|p| p.label == "Interest rate +1.00 pts").unwrap();
        assert_relative_eq!(rate_up.cap_rate, base.cap_rate, epsilon = 1e-12);
    }

    #[test]
    fn test_combined_stress_is_worst() {
        let report = run_sensitivity(&sixplex(), &SensitivityConfig::default()).unwrap();
        let stress = report.points.last().unwrap();
        for point in &report.points[..report.points.len() - 1] {
            assert!(stress.annual_cashflow < point.annual_cashflow, "{}", point.label);
        }
    }

    #[test]
    fn test_invalid_vacancy_level_rejected() {
        let config = SensitivityConfig { vacancy_rates: vec![150.0], ..Default::default() };
        assert!(run_sensitivity(&sixplex(), &config).is_err());
    }

    #[test]
    fn test_csv_export() {
        let report = run_sensitivity(&sixplex(), &SensitivityConfig::default()).unwrap();
        let mut buffer = Vec::new();
        report.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 1 + report.points.len());
        assert!(lines[0].starts_with("Label,Dimension"));
        assert!(lines[1].starts_with("Base case,Base"));
    }
}
