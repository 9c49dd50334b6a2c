//! Rehab-and-resell (flip) calculator

mod model;
mod engine;
mod compare;
pub mod napkin;
pub mod sample;

pub use model::{
    AcquisitionCosts, FlipRevenues, FlipScenario, FlipScenarioUpdate, GeneralInfo, HoldingCosts,
    MaintenanceCosts, RenovationCosts, SellingCosts,
};
pub use engine::{
    annualized_roi, calculate_profitability, CashInvested, CategoryTotals, FlipAnalysis,
    ProfitabilityResult,
};
pub use compare::{
    compare_scenarios, CostComparison, FinancingComparison, FlipComparison, RevenueComparison,
};
pub use napkin::{
    flip_max_offer_price, flip_napkin, FlipNapkinConfig, FlipNapkinInput, FlipNapkinResult,
};
