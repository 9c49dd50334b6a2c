//! Sample flip used for demos and as a regression reference
//!
//! A 300k purchase with 125k of renovation, listed at 450k after six months,
//! financed three different ways.

use chrono::NaiveDate;

use super::model::{
    AcquisitionCosts, FlipRevenues, FlipScenario, GeneralInfo, HoldingCosts, MaintenanceCosts,
    RenovationCosts, SellingCosts,
};
use crate::financing::{LoanTerms, PropertyFinancing, RenovationFinancing};

fn loan(principal: f64, annual_rate_percent: f64, term_months: u32) -> LoanTerms {
    LoanTerms { principal, annual_rate_percent, term_months }
}

/// Inputs shared by every sample scenario
pub fn sample_base() -> FlipScenario {
    FlipScenario {
        general_info: GeneralInfo {
            property_address: "1420 Maple Street".into(),
            city: "Sherbrooke".into(),
            property_type: "Single family".into(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            notes: String::new(),
        },
        holding_period_months: 6,
        acquisition: AcquisitionCosts { purchase_price: 300_000.0, ..Default::default() },
        renovation: RenovationCosts {
            kitchen: 35_000.0,
            bathrooms: 25_000.0,
            flooring: 15_000.0,
            painting: 8_000.0,
            roofing: 12_000.0,
            windows_doors: 10_000.0,
            electrical: 7_000.0,
            plumbing: 6_000.0,
            contingency: 7_000.0,
            ..Default::default()
        },
        holding: HoldingCosts {
            property_taxes: 3_600.0,
            school_taxes: 400.0,
            insurance: 1_800.0,
            electricity: 150.0,
            heating: 100.0,
            ..Default::default()
        },
        maintenance: MaintenanceCosts {
            repairs: 100.0,
            snow_removal: 75.0,
            lawn_care: 50.0,
            ..Default::default()
        },
        selling: SellingCosts {
            broker_commission: 13_500.0,
            notary_fees: 1_500.0,
            staging: 1_000.0,
            ..Default::default()
        },
        revenues: FlipRevenues { expected_sale_price: 450_000.0, ..Default::default() },
        ..Default::default()
    }
}

/// Conventional mortgage, renovation on a credit line
pub fn sample_scenario_1() -> FlipScenario {
    FlipScenario {
        property_financing: PropertyFinancing {
            down_payment: 60_000.0,
            first_mortgage: loan(240_000.0, 5.5, 300),
            ..Default::default()
        },
        renovation_financing: RenovationFinancing {
            personal_funds: 50_000.0,
            credit_line: loan(75_000.0, 7.0, 120),
            ..Default::default()
        },
        ..sample_base()
    }
}

/// High leverage: vendor take-back and a private renovation loan
pub fn sample_scenario_2() -> FlipScenario {
    FlipScenario {
        property_financing: PropertyFinancing {
            down_payment: 30_000.0,
            first_mortgage: loan(240_000.0, 5.5, 300),
            vendor_take_back: loan(30_000.0, 4.0, 60),
            ..Default::default()
        },
        renovation_financing: RenovationFinancing {
            personal_funds: 25_000.0,
            private_loan: loan(100_000.0, 12.0, 36),
            ..Default::default()
        },
        ..sample_base()
    }
}

/// All cash, longer hold, higher finish and sale price
pub fn sample_scenario_3() -> FlipScenario {
    FlipScenario {
        holding_period_months: 9,
        property_financing: PropertyFinancing { down_payment: 300_000.0, ..Default::default() },
        renovation_financing: RenovationFinancing {
            personal_funds: 125_000.0,
            ..Default::default()
        },
        revenues: FlipRevenues { expected_sale_price: 475_000.0, ..Default::default() },
        ..sample_base()
    }
}

pub fn sample_scenarios() -> [FlipScenario; 3] {
    [sample_scenario_1(), sample_scenario_2(), sample_scenario_3()]
}
