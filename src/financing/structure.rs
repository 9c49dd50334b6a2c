//! Named financing sources and their amortized view over a holding period

use serde::{Deserialize, Serialize};

use super::amortization::{amortization_schedule, total_interest_paid, LoanPayment, LoanTerms};
use crate::error::{ensure_non_negative, Result};

/// Financing used to buy the property
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyFinancing {
    /// Cash put down at purchase
    pub down_payment: f64,
    pub first_mortgage: LoanTerms,
    pub second_mortgage: LoanTerms,
    pub private_loan: LoanTerms,
    pub vendor_take_back: LoanTerms,
    pub credit_line: LoanTerms,
}

impl PropertyFinancing {
    pub fn sources(&self) -> [(&'static str, &LoanTerms); 5] {
        [
            ("firstMortgage", &self.first_mortgage),
            ("secondMortgage", &self.second_mortgage),
            ("privateLoan", &self.private_loan),
            ("vendorTakeBack", &self.vendor_take_back),
            ("creditLine", &self.credit_line),
        ]
    }

    pub fn sources_mut(&mut self) -> [&mut LoanTerms; 5] {
        [
            &mut self.first_mortgage,
            &mut self.second_mortgage,
            &mut self.private_loan,
            &mut self.vendor_take_back,
            &mut self.credit_line,
        ]
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("propertyFinancing.downPayment", self.down_payment)?;
        for (name, terms) in self.sources() {
            terms.validate(&format!("propertyFinancing.{name}"))?;
        }
        Ok(())
    }

    pub fn amortize(&self, holding_period_months: u32) -> FinancingSummary {
        FinancingSummary::from_sources(&self.sources(), holding_period_months)
    }
}

/// Financing used to pay for renovation work
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenovationFinancing {
    /// Cash from the investor's own pocket
    pub personal_funds: f64,
    pub credit_line: LoanTerms,
    pub private_loan: LoanTerms,
}

impl RenovationFinancing {
    pub fn sources(&self) -> [(&'static str, &LoanTerms); 2] {
        [("creditLine", &self.credit_line), ("privateLoan", &self.private_loan)]
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("renovationFinancing.personalFunds", self.personal_funds)?;
        for (name, terms) in self.sources() {
            terms.validate(&format!("renovationFinancing.{name}"))?;
        }
        Ok(())
    }

    pub fn amortize(&self, holding_period_months: u32) -> FinancingSummary {
        FinancingSummary::from_sources(&self.sources(), holding_period_months)
    }
}

/// A financing source with its payment and the interest accrued while held
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizedSource {
    pub name: String,
    pub terms: LoanTerms,
    pub monthly_payment: f64,
    /// Payments actually made over the period; stops at payoff
    pub payments_made: f64,
    pub total_interest_paid: f64,
}

/// Payments and interest for every active source in a financing structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingSummary {
    pub sources: Vec<AmortizedSource>,
    pub total_borrowed: f64,
    pub total_monthly_payment: f64,
    pub total_payments_made: f64,
    pub total_interest_paid: f64,
}

impl FinancingSummary {
    /// Payment and interest are derived together from the same terms and months
    pub fn from_sources(sources: &[(&str, &LoanTerms)], months: u32) -> Self {
        let amortized: Vec<AmortizedSource> = sources
            .iter()
            .filter(|(_, terms)| terms.is_active())
            .map(|(name, terms)| {
                let monthly_payment = terms.monthly_payment();
                let interest =
                    total_interest_paid(&[LoanPayment::from_terms(terms, monthly_payment)], months);
                let payments_made = amortization_schedule(terms, months)
                    .iter()
                    .map(|row| row.payment)
                    .sum();
                AmortizedSource {
                    name: (*name).to_string(),
                    terms: **terms,
                    monthly_payment,
                    payments_made,
                    total_interest_paid: interest,
                }
            })
            .collect();

        Self {
            total_borrowed: amortized.iter().map(|s| s.terms.principal).sum(),
            total_monthly_payment: amortized.iter().map(|s| s.monthly_payment).sum(),
            total_payments_made: amortized.iter().map(|s| s.payments_made).sum(),
            total_interest_paid: amortized.iter().map(|s| s.total_interest_paid).sum(),
            sources: amortized,
        }
    }

    /// Principal repaid over the period
    pub fn principal_repaid(&self) -> f64 {
        self.total_payments_made - self.total_interest_paid
    }
}
