//! Fixed-payment loan amortization
//!
//! Monthly payment uses the standard annuity formula:
//! payment = P × r(1+r)^n / [(1+r)^n − 1], with r = annual% / 100 / 12.
//!
//! Interest accrued over a holding period is simulated month by month. The
//! payment handed in need not be the loan's own amortizing payment.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, CalcError, Result};

/// Terms of a single financing source
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanTerms {
    /// Amount financed
    pub principal: f64,

    /// Annual nominal rate in percent (5.5 = 5.5%)
    pub annual_rate_percent: f64,

    /// Amortization term in months
    pub term_months: u32,
}

impl LoanTerms {
    /// Build validated terms; a principal with no term is rejected
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_months,
        };
        terms.validate("loan")?;
        Ok(terms)
    }

    /// Build validated terms from a term expressed in years
    pub fn from_years(principal: f64, annual_rate_percent: f64, term_years: u32) -> Result<Self> {
        let term_months = term_years
            .checked_mul(12)
            .ok_or_else(|| {
                CalcError::invalid("termYears", format!("{term_years} years is too long"))
            })?;
        Self::new(principal, annual_rate_percent, term_months)
    }

    /// No-loan placeholder
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.principal > 0.0
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Check the invariants; `name` prefixes the offending field in the error
    pub fn validate(&self, name: &str) -> Result<()> {
        ensure_non_negative(&format!("{name}.principal"), self.principal)?;
        ensure_non_negative(&format!("{name}.annualRatePercent"), self.annual_rate_percent)?;
        if self.principal > 0.0 && self.term_months == 0 {
            return Err(CalcError::invalid(
                format!("{name}.termMonths"),
                "must be greater than 0 when a principal is financed",
            ));
        }
        Ok(())
    }

    /// Level payment that fully amortizes the loan over its own term
    pub fn monthly_payment(&self) -> f64 {
        payment_for_months(self.principal, self.annual_rate_percent, self.term_months)
    }

    /// Interest accrued over `months` when paying this loan's own level payment
    pub fn interest_over(&self, months: u32) -> f64 {
        total_interest_paid(
            &[LoanPayment::from_terms(self, self.monthly_payment())],
            months,
        )
    }
}

/// Monthly payment for a loan with a term in years
///
/// Zero principal or term means no loan and no payment. A zero rate pays the
/// principal down straight-line.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: f64) -> f64 {
    if principal == 0.0 || term_years <= 0.0 {
        return 0.0;
    }
    let n = term_years * 12.0;
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return principal / n;
    }
    let factor = (1.0 + monthly_rate).powf(n);
    principal * (monthly_rate * factor) / (factor - 1.0)
}

/// Monthly payment for a loan with a term in whole months
pub fn payment_for_months(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    monthly_payment(principal, annual_rate_percent, term_months as f64 / 12.0)
}

/// A loan paired with the payment actually being made on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanPayment {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub monthly_payment: f64,
}

impl LoanPayment {
    pub fn from_terms(terms: &LoanTerms, monthly_payment: f64) -> Self {
        Self {
            principal: terms.principal,
            annual_rate_percent: terms.annual_rate_percent,
            monthly_payment,
        }
    }
}

/// Total interest accrued across `loans` over `months` payment periods
///
/// Each loan is simulated independently. A payment smaller than the accrued
/// interest grows the balance; the loop stops once the balance is paid off.
pub fn total_interest_paid(loans: &[LoanPayment], months: u32) -> f64 {
    loans
        .iter()
        .filter(|loan| {
            loan.principal != 0.0 && loan.annual_rate_percent != 0.0 && loan.monthly_payment != 0.0
        })
        .map(|loan| {
            let monthly_rate = loan.annual_rate_percent / 100.0 / 12.0;
            let mut remaining = loan.principal;
            let mut interest_total = 0.0;

            for _ in 0..months {
                if remaining <= 0.0 {
                    break;
                }
                let interest = remaining * monthly_rate;
                let principal_paid = (loan.monthly_payment - interest).min(remaining);
                interest_total += interest;
                remaining -= principal_paid;
            }

            interest_total
        })
        .sum()
}

/// One row of an amortization table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub month: u32,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Month-by-month table for `months` periods at the loan's own payment
pub fn amortization_schedule(terms: &LoanTerms, months: u32) -> Vec<ScheduleRow> {
    let payment = terms.monthly_payment();
    let monthly_rate = terms.monthly_rate();
    let mut balance = terms.principal;
    let mut rows = Vec::with_capacity(months.min(terms.term_months) as usize);

    for month in 1..=months {
        if balance <= 0.0 {
            break;
        }
        let interest = balance * monthly_rate;
        let principal = (payment - interest).min(balance);
        let closing = balance - principal;
        rows.push(ScheduleRow {
            month,
            opening_balance: balance,
            payment: interest + principal,
            interest,
            principal,
            closing_balance: closing,
        });
        balance = closing;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_principal_has_no_payment() {
        for rate in [0.0, 3.5, 12.0] {
            for years in [1.0, 10.0, 30.0] {
                assert_eq!(monthly_payment(0.0, rate, years), 0.0);
            }
        }
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        for principal in [1_000.0, 250_000.0] {
            for years in [1.0, 5.0, 25.0] {
                let payment = monthly_payment(principal, 0.0, years);
                assert_relative_eq!(payment, principal / (years * 12.0), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_standard_mortgage_payment() {
        // 200k over 30 years at 6% is the textbook 1199.10
        let payment = monthly_payment(200_000.0, 6.0, 30.0);
        assert_relative_eq!(payment, 1199.10, epsilon = 0.01);
    }

    #[test]
    fn test_months_and_years_agree() {
        let by_years = monthly_payment(150_000.0, 4.25, 20.0);
        let by_months = payment_for_months(150_000.0, 4.25, 240);
        assert_relative_eq!(by_years, by_months, epsilon = 1e-9);
    }

    #[test]
    fn test_full_term_interest_matches_closed_form() {
        let terms = LoanTerms::from_years(300_000.0, 5.25, 25).unwrap();
        let payment = terms.monthly_payment();
        let simulated = terms.interest_over(terms.term_months);
        let closed_form = payment * terms.term_months as f64 - terms.principal;
        assert_relative_eq!(simulated, closed_form, max_relative = 1e-9);
    }

    #[test]
    fn test_interest_skips_inactive_loans() {
        let loans = [
            LoanPayment { principal: 0.0, annual_rate_percent: 5.0, monthly_payment: 100.0 },
            LoanPayment { principal: 10_000.0, annual_rate_percent: 0.0, monthly_payment: 100.0 },
            LoanPayment { principal: 10_000.0, annual_rate_percent: 5.0, monthly_payment: 0.0 },
        ];
        assert_eq!(total_interest_paid(&loans, 12), 0.0);
    }

    #[test]
    fn test_interest_sums_across_loans() {
        let a = LoanTerms::from_years(100_000.0, 5.0, 25).unwrap();
        let b = LoanTerms::from_years(40_000.0, 8.0, 10).unwrap();
        let combined = total_interest_paid(
            &[
                LoanPayment::from_terms(&a, a.monthly_payment()),
                LoanPayment::from_terms(&b, b.monthly_payment()),
            ],
            6,
        );
        assert_relative_eq!(combined, a.interest_over(6) + b.interest_over(6), epsilon = 1e-9);
    }

    #[test]
    fn test_interest_only_payment_keeps_balance() {
        // Paying exactly the interest every month leaves principal untouched
        let loan =
            LoanPayment { principal: 12_000.0, annual_rate_percent: 12.0, monthly_payment: 120.0 };
        assert_relative_eq!(total_interest_paid(&[loan], 6), 720.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overpayment_stops_when_paid_off() {
        // 1000 at 12% with a 600 payment is gone in two months
        let loan =
            LoanPayment { principal: 1_000.0, annual_rate_percent: 12.0, monthly_payment: 600.0 };
        let interest = total_interest_paid(&[loan], 24);
        assert_relative_eq!(interest, 10.0 + 0.01 * 410.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_principal_rejected() {
        assert!(LoanTerms::new(-1.0, 5.0, 12).is_err());
        assert!(LoanTerms::new(1000.0, -0.5, 12).is_err());
        assert!(LoanTerms::new(1000.0, 5.0, 0).is_err());
        assert!(LoanTerms::new(0.0, 0.0, 0).is_ok());
    }

    #[test]
    fn test_term_years_overflow_rejected() {
        let err = LoanTerms::from_years(1_000.0, 5.0, 400_000_000).unwrap_err();
        assert!(err.to_string().contains("termYears"), "{err}");
        assert_eq!(LoanTerms::from_years(1_000.0, 5.0, 30).unwrap().term_months, 360);
    }

    #[test]
    fn test_schedule_longer_than_term_stops_at_payoff() {
        let terms = LoanTerms::new(5_000.0, 8.0, 12).unwrap();
        let schedule = amortization_schedule(&terms, u32::MAX);
        assert!(schedule.len() >= 12 && schedule.len() <= 13);
        assert_relative_eq!(schedule.last().unwrap().closing_balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_schedule_pays_off_loan() {
        let terms = LoanTerms::new(10_000.0, 6.0, 24).unwrap();
        let schedule = amortization_schedule(&terms, 24);
        assert_eq!(schedule.len(), 24);
        assert_relative_eq!(schedule.last().unwrap().closing_balance, 0.0, epsilon = 1e-6);
        let interest: f64 = schedule.iter().map(|r| r.interest).sum();
        assert_relative_eq!(interest, terms.interest_over(24), epsilon = 1e-9);
    }
}
