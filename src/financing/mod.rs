//! Loan amortization and financing structures shared by every calculator

mod amortization;
mod structure;

pub use amortization::{
    amortization_schedule, monthly_payment, payment_for_months, total_interest_paid, LoanPayment,
    LoanTerms, ScheduleRow,
};
pub use structure::{AmortizedSource, FinancingSummary, PropertyFinancing, RenovationFinancing};
