//! Rental income analysis: NOI, debt service, cashflow, cap rate and DSCR

use log::debug;
use serde::{Deserialize, Serialize};

use super::model::MultiScenario;
use crate::costs::CostCategory;
use crate::error::{ensure_non_negative, CalcError, Result};
use crate::financing::FinancingSummary;

/// First-year operating results for a rental property
///
/// Amounts are annual unless named per month; percentages are 5.0 for 5%.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalAnalysis {
    pub gross_revenue: f64,
    pub vacancy_loss: f64,
    pub effective_gross_revenue: f64,
    pub management_fees: f64,
    pub operating_expenses: f64,
    pub net_operating_income: f64,
    pub annual_debt_service: f64,
    pub first_year_interest: f64,
    pub first_year_principal: f64,
    pub annual_cashflow: f64,
    pub monthly_cashflow_per_unit: f64,
    pub cap_rate: f64,
    pub dscr: f64,
    pub cash_on_cash: f64,
    pub expense_ratio: f64,
    pub gross_rent_multiplier: f64,
    pub total_cash_invested: f64,
    pub financing: FinancingSummary,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

impl MultiScenario {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("property.purchasePrice", self.property.purchase_price)?;
        self.revenues.validate()?;
        self.expenses.validate()?;
        self.closing_costs.validate()?;
        self.financing.validate()?;
        ensure_non_negative("managementRatePercent", self.management_rate_percent)?;
        ensure_non_negative("vacancyRatePercent", self.vacancy_rate_percent)?;
        if self.vacancy_rate_percent > 100.0 {
            return Err(CalcError::invalid("vacancyRatePercent", "must not exceed 100"));
        }
        Ok(())
    }

    /// Run the rental analysis without storing anything
    pub fn analyze(&self) -> Result<RentalAnalysis> {
        self.validate()?;
        Ok(self.rental_analysis_with(0.0))
    }

    /// Recompute and store the analysis block, replacing any previous one
    ///
    /// The stored block is cleared when the inputs are rejected.
    pub fn calculate_all(&mut self) -> Result<RentalAnalysis> {
        self.rental_analysis = None;
        let analysis = self.analyze()?;
        self.rental_analysis = Some(analysis.clone());
        Ok(analysis)
    }

    /// Analysis with operating expenses shifted by a number of percentage
    /// points of effective gross revenue; inputs must already be validated
    pub(crate) fn rental_analysis_with(&self, expense_ratio_shift_points: f64) -> RentalAnalysis {
        let gross_revenue = self.revenues.total() * 12.0;
        let vacancy_loss = gross_revenue * self.vacancy_rate_percent / 100.0;
        let effective_gross_revenue = gross_revenue - vacancy_loss;

        let management_fees = effective_gross_revenue * self.management_rate_percent / 100.0;
        let operating_expenses = (self.expenses.total()
            + management_fees
            + effective_gross_revenue * expense_ratio_shift_points / 100.0)
            .max(0.0);
        let net_operating_income = effective_gross_revenue - operating_expenses;

        let financing = self.financing.amortize(12);
        let annual_debt_service = financing.total_payments_made;
        let annual_cashflow = net_operating_income - annual_debt_service;

        let units = self.property.number_of_units as f64;
        let price = self.property.purchase_price;
        let total_cash_invested = self.financing.down_payment + self.closing_costs.total();

        let analysis = RentalAnalysis {
            gross_revenue,
            vacancy_loss,
            effective_gross_revenue,
            management_fees,
            operating_expenses,
            net_operating_income,
            annual_debt_service,
            first_year_interest: financing.total_interest_paid,
            first_year_principal: financing.principal_repaid(),
            annual_cashflow,
            monthly_cashflow_per_unit: ratio(annual_cashflow, units) / 12.0,
            cap_rate: ratio(net_operating_income, price) * 100.0,
            dscr: ratio(net_operating_income, annual_debt_service),
            cash_on_cash: ratio(annual_cashflow, total_cash_invested) * 100.0,
            expense_ratio: ratio(operating_expenses, effective_gross_revenue) * 100.0,
            gross_rent_multiplier: ratio(price, gross_revenue),
            total_cash_invested,
            financing,
        };

        debug!(
            "Rental '{}': NOI {:.2}, cashflow {:.2}, cap rate {:.2}%, DSCR {:.2}",
            self.property.property_address,
            analysis.net_operating_income,
            analysis.annual_cashflow,
            analysis.cap_rate,
            analysis.dscr,
        );

        analysis
    }
}
