//! Input records for a multi-unit rental scenario

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::RentalAnalysis;
use crate::costs::CostCategory;
use crate::financing::PropertyFinancing;

/// The building being bought
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyInfo {
    pub property_address: String,
    pub city: String,
    pub number_of_units: u32,
    pub purchase_price: f64,
    pub purchase_date: Option<NaiveDate>,
}

/// Monthly income from the building
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RentalRevenues {
    /// Rent across all units
    pub residential_rent: f64,
    pub parking: f64,
    pub laundry: f64,
    pub storage: f64,
    pub other: f64,
}

impl CostCategory for RentalRevenues {
    const NAME: &'static str = "revenues";

    fn items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("residentialRent", self.residential_rent),
            ("parking", self.parking),
            ("laundry", self.laundry),
            ("storage", self.storage),
            ("other", self.other),
        ]
    }
}

/// Annual operating expenses, excluding management fees and debt service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingExpenses {
    pub property_taxes: f64,
    pub school_taxes: f64,
    pub insurance: f64,
    pub electricity: f64,
    pub heating: f64,
    pub maintenance: f64,
    pub snow_removal: f64,
    pub janitorial: f64,
    pub reserves: f64,
    pub other: f64,
}

impl CostCategory for OperatingExpenses {
    const NAME: &'static str = "expenses";

    fn items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("propertyTaxes", self.property_taxes),
            ("schoolTaxes", self.school_taxes),
            ("insurance", self.insurance),
            ("electricity", self.electricity),
            ("heating", self.heating),
            ("maintenance", self.maintenance),
            ("snowRemoval", self.snow_removal),
            ("janitorial", self.janitorial),
            ("reserves", self.reserves),
            ("other", self.other),
        ]
    }
}

/// One-time costs at closing, paid in cash
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClosingCosts {
    pub transfer_tax: f64,
    pub notary_fees: f64,
    pub inspection: f64,
    pub appraisal: f64,
    pub other: f64,
}

impl CostCategory for ClosingCosts {
    const NAME: &'static str = "closingCosts";

    fn items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("transferTax", self.transfer_tax),
            ("notaryFees", self.notary_fees),
            ("inspection", self.inspection),
            ("appraisal", self.appraisal),
            ("other", self.other),
        ]
    }
}

/// A complete rental scenario snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiScenario {
    pub property: PropertyInfo,
    pub revenues: RentalRevenues,
    pub vacancy_rate_percent: f64,
    pub expenses: OperatingExpenses,
    /// Property management fee as a percent of effective gross revenue
    pub management_rate_percent: f64,
    pub closing_costs: ClosingCosts,
    pub financing: PropertyFinancing,

    /// Result of the last calculation; cleared by any update
    #[serde(skip_deserializing)]
    pub rental_analysis: Option<RentalAnalysis>,
}

/// Partial update of a rental scenario; present sections replace stored ones
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiScenarioUpdate {
    pub property: Option<PropertyInfo>,
    pub revenues: Option<RentalRevenues>,
    pub vacancy_rate_percent: Option<f64>,
    pub expenses: Option<OperatingExpenses>,
    pub management_rate_percent: Option<f64>,
    pub closing_costs: Option<ClosingCosts>,
    pub financing: Option<PropertyFinancing>,
}

impl MultiScenario {
    pub fn apply_update(&mut self, update: MultiScenarioUpdate) {
        if let Some(v) = update.property {
            self.property = v;
        }
        if let Some(v) = update.revenues {
            self.revenues = v;
        }
        if let Some(v) = update.vacancy_rate_percent {
            self.vacancy_rate_percent = v;
        }
        if let Some(v) = update.expenses {
            self.expenses = v;
        }
        if let Some(v) = update.management_rate_percent {
            self.management_rate_percent = v;
        }
        if let Some(v) = update.closing_costs {
            self.closing_costs = v;
        }
        if let Some(v) = update.financing {
            self.financing = v;
        }
        self.rental_analysis = None;
    }
}
