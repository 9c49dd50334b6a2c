//! Realty Calc - Profitability engine for real-estate investment scenarios
//!
//! This library provides:
//! - Flip (rehab-and-resell) profitability with three-way scenario comparison
//! - Multi-unit rental analysis: NOI, cap rate, DSCR, cash-on-cash
//! - Loan amortization across several financing sources
//! - Napkin screens for quick go/no-go decisions
//! - Sensitivity sweeps over rates, vacancy, expenses and rent

pub mod error;
pub mod costs;
pub mod financing;
pub mod scenario;
pub mod flip;
pub mod multi;

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use financing::{
    amortization_schedule, monthly_payment, total_interest_paid, LoanPayment, LoanTerms,
};
pub use scenario::{best_scenario, Scenario, ScenarioId, ScenarioStore, Triple};
pub use flip::{FlipComparison, FlipScenario, FlipScenarioUpdate};
pub use multi::{MultiComparison, MultiScenario, MultiScenarioUpdate};
