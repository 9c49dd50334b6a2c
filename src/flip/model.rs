//! Input records for a rehab-and-resell (flip) scenario

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::ProfitabilityResult;
use crate::costs::{CostCategory, PeriodicCategory, DEFAULT_HOLDING_PERIOD_MONTHS};
use crate::financing::{PropertyFinancing, RenovationFinancing};

fn default_holding_period() -> u32 {
    DEFAULT_HOLDING_PERIOD_MONTHS
}

/// Descriptive information about the property
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralInfo {
    pub property_address: String,
    pub city: String,
    pub property_type: String,
    pub purchase_date: Option<NaiveDate>,
    pub notes: String,
}

/// One-time costs paid to take ownership
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AcquisitionCosts {
    pub purchase_price: f64,
    pub transfer_tax: f64,
    pub notary_fees: f64,
    pub inspection: f64,
    pub appraisal: f64,
    pub other: f64,
}

impl CostCategory for AcquisitionCosts {
    const NAME: &'static str = "acquisition";

    fn items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("purchasePrice", self.purchase_price),
            ("transferTax", self.transfer_tax),
            ("notaryFees", self.notary_fees),
            ("inspection", self.inspection),
            ("appraisal", self.appraisal),
            ("other", self.other),
        ]
    }
}

/// Renovation budget by trade
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenovationCosts {
    pub kitchen: f64,
    pub bathrooms: f64,
    pub flooring: f64,
    pub painting: f64,
    pub roofing: f64,
    pub windows_doors: f64,
    pub electrical: f64,
    pub plumbing: f64,
    pub hvac: f64,
    pub exterior: f64,
    pub permits: f64,
    pub contingency: f64,
    pub other: f64,
}

impl CostCategory for RenovationCosts {
    const NAME: &'static str = "renovation";

    fn items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("kitchen", self.kitchen),
            ("bathrooms", self.bathrooms),
            ("flooring", self.flooring),
            ("painting", self.painting),
            ("roofing", self.roofing),
            ("windowsDoors", self.windows_doors),
            ("electrical", self.electrical),
            ("plumbing", self.plumbing),
            ("hvac", self.hvac),
            ("exterior", self.exterior),
            ("permits", self.permits),
            ("contingency", self.contingency),
            ("other", self.other),
        ]
    }
}

/// Carrying costs while the property is held
///
/// Taxes and insurance are annual amounts; utilities are monthly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoldingCosts {
    pub property_taxes: f64,
    pub school_taxes: f64,
    pub insurance: f64,
    pub electricity: f64,
    pub heating: f64,
    pub water: f64,
    pub other_monthly: f64,
}

impl CostCategory for HoldingCosts {
    const NAME: &'static str = "holding";

    fn items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("propertyTaxes", self.property_taxes),
            ("schoolTaxes", self.school_taxes),
            ("insurance", self.insurance),
            ("electricity", self.electricity),
            ("heating", self.heating),
            ("water", self.water),
            ("otherMonthly", self.other_monthly),
        ]
    }
}

impl PeriodicCategory for HoldingCosts {
    fn annual_items(&self) -> Vec<f64> {
        vec![self.property_taxes, self.school_taxes, self.insurance]
    }

    fn monthly_items(&self) -> Vec<f64> {
        vec![self.electricity, self.heating, self.water, self.other_monthly]
    }
}

/// Monthly upkeep while the property is held
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceCosts {
    pub repairs: f64,
    pub snow_removal: f64,
    pub lawn_care: f64,
    pub cleaning: f64,
    pub security: f64,
}

impl CostCategory for MaintenanceCosts {
    const NAME: &'static str = "maintenance";

    fn items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("repairs", self.repairs),
            ("snowRemoval", self.snow_removal),
            ("lawnCare", self.lawn_care),
            ("cleaning", self.cleaning),
            ("security", self.security),
        ]
    }
}

impl PeriodicCategory for MaintenanceCosts {
    fn annual_items(&self) -> Vec<f64> {
        Vec::new()
    }

    fn monthly_items(&self) -> Vec<f64> {
        self.items().into_iter().map(|(_, v)| v).collect()
    }
}

/// Costs paid on resale
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellingCosts {
    pub broker_commission: f64,
    pub notary_fees: f64,
    pub staging: f64,
    pub marketing: f64,
    pub legal: f64,
    pub other: f64,
}

impl CostCategory for SellingCosts {
    const NAME: &'static str = "selling";

    fn items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("brokerCommission", self.broker_commission),
            ("notaryFees", self.notary_fees),
            ("staging", self.staging),
            ("marketing", self.marketing),
            ("legal", self.legal),
            ("other", self.other),
        ]
    }
}

/// Money coming back from the project
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlipRevenues {
    pub expected_sale_price: f64,
    /// Rent collected during the holding period, if any
    pub rental_income: f64,
    pub other: f64,
}

impl CostCategory for FlipRevenues {
    const NAME: &'static str = "revenues";

    fn items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("expectedSalePrice", self.expected_sale_price),
            ("rentalIncome", self.rental_income),
            ("other", self.other),
        ]
    }
}

/// A complete flip scenario snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlipScenario {
    pub general_info: GeneralInfo,
    #[serde(default = "default_holding_period")]
    pub holding_period_months: u32,
    pub acquisition: AcquisitionCosts,
    pub renovation: RenovationCosts,
    pub holding: HoldingCosts,
    pub maintenance: MaintenanceCosts,
    pub selling: SellingCosts,
    pub revenues: FlipRevenues,
    pub property_financing: PropertyFinancing,
    pub renovation_financing: RenovationFinancing,

    /// Result of the last calculation; cleared by any update
    #[serde(skip_deserializing)]
    pub profitability_analysis: Option<ProfitabilityResult>,
}

impl Default for FlipScenario {
    fn default() -> Self {
        Self {
            general_info: GeneralInfo::default(),
            holding_period_months: DEFAULT_HOLDING_PERIOD_MONTHS,
            acquisition: AcquisitionCosts::default(),
            renovation: RenovationCosts::default(),
            holding: HoldingCosts::default(),
            maintenance: MaintenanceCosts::default(),
            selling: SellingCosts::default(),
            revenues: FlipRevenues::default(),
            property_financing: PropertyFinancing::default(),
            renovation_financing: RenovationFinancing::default(),
            profitability_analysis: None,
        }
    }
}

/// Partial update of a flip scenario
///
/// Each present section replaces the stored section wholesale; fields left
/// out of a provided section take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlipScenarioUpdate {
    pub general_info: Option<GeneralInfo>,
    pub holding_period_months: Option<u32>,
    pub acquisition: Option<AcquisitionCosts>,
    pub renovation: Option<RenovationCosts>,
    pub holding: Option<HoldingCosts>,
    pub maintenance: Option<MaintenanceCosts>,
    pub selling: Option<SellingCosts>,
    pub revenues: Option<FlipRevenues>,
    pub property_financing: Option<PropertyFinancing>,
    pub renovation_financing: Option<RenovationFinancing>,
}

impl FlipScenario {
    pub fn apply_update(&mut self, update: FlipScenarioUpdate) {
        let FlipScenarioUpdate {
            general_info,
            holding_period_months,
            acquisition,
            renovation,
            holding,
            maintenance,
            selling,
            revenues,
            property_financing,
            renovation_financing,
        } = update;

        if let Some(v) = general_info {
            self.general_info = v;
        }
        if let Some(v) = holding_period_months {
            self.holding_period_months = v;
        }
        if let Some(v) = acquisition {
            self.acquisition = v;
        }
        if let Some(v) = renovation {
            self.renovation = v;
        }
        if let Some(v) = holding {
            self.holding = v;
        }
        if let Some(v) = maintenance {
            self.maintenance = v;
        }
        if let Some(v) = selling {
            self.selling = v;
        }
        if let Some(v) = revenues {
            self.revenues = v;
        }
        if let Some(v) = property_financing {
            self.property_financing = v;
        }
        if let Some(v) = renovation_financing {
            self.renovation_financing = v;
        }

        self.profitability_analysis = None;
    }
}
