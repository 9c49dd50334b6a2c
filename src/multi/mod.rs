//! Multi-unit rental calculator

mod model;
mod engine;
mod compare;
pub mod napkin;
pub mod sensitivity;

pub use model::{
    ClosingCosts, MultiScenario, MultiScenarioUpdate, OperatingExpenses, PropertyInfo,
    RentalRevenues,
};
pub use engine::RentalAnalysis;
pub use compare::{compare_rentals, MultiComparison};
pub use napkin::{
    multi_max_purchase_price, multi_napkin, MultiNapkinConfig, MultiNapkinInput,
    MultiNapkinResult,
};
pub use sensitivity::{
    run_sensitivity, Adjustment, SensitivityConfig, SensitivityDimension, SensitivityPoint,
    SensitivityReport,
};
