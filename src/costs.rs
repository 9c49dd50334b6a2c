//! Line-item aggregation for cost and revenue categories
//!
//! Every category is a struct of fixed named items. Totals are never stored;
//! they are recomputed from the items each time they are asked for.

use crate::error::{ensure_non_negative, Result};

/// Holding period used when a scenario does not specify one
pub const DEFAULT_HOLDING_PERIOD_MONTHS: u32 = 6;

/// Flat sum of present item values; absent items count as zero
pub fn aggregate_category<I>(items: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    items.into_iter().map(|v| v.unwrap_or(0.0)).sum()
}

/// A category of named monetary line items
pub trait CostCategory {
    /// Category name used in validation messages
    const NAME: &'static str;

    /// Every line item with its field name
    fn items(&self) -> Vec<(&'static str, f64)>;

    fn total(&self) -> f64 {
        aggregate_category(self.items().into_iter().map(|(_, v)| Some(v)))
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in self.items() {
            ensure_non_negative(&format!("{}.{}", Self::NAME, name), value)?;
        }
        Ok(())
    }
}

/// A category mixing annual and monthly items, carried over a holding period
pub trait PeriodicCategory: CostCategory {
    /// Items quoted per year (taxes, insurance)
    fn annual_items(&self) -> Vec<f64>;

    /// Items quoted per month (utilities, upkeep)
    fn monthly_items(&self) -> Vec<f64>;

    fn monthly_total(&self) -> f64 {
        let annual: f64 = self.annual_items().iter().sum();
        let monthly: f64 = self.monthly_items().iter().sum();
        annual / 12.0 + monthly
    }

    fn period_total(&self, holding_period_months: u32) -> f64 {
        self.monthly_total() * holding_period_months as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Carrying {
        taxes: f64,
        insurance: f64,
        utilities: f64,
    }

    impl CostCategory for Carrying {
        const NAME: &'static str = "carrying";

        fn items(&self) -> Vec<(&'static str, f64)> {
            vec![
                ("taxes", self.taxes),
                ("insurance", self.insurance),
                ("utilities", self.utilities),
            ]
        }
    }

    impl PeriodicCategory for Carrying {
        fn annual_items(&self) -> Vec<f64> {
            vec![self.taxes, self.insurance]
        }

        fn monthly_items(&self) -> Vec<f64> {
            vec![self.utilities]
        }
    }

    #[test]
    fn test_aggregate_sums_present_items() {
        assert_eq!(aggregate_category([Some(10.0), Some(0.0), Some(5.0)]), 15.0);
    }

    #[test]
    fn test_absent_items_do_not_change_total() {
        let base = aggregate_category([Some(10.0), Some(0.0), Some(5.0)]);
        let with_absent = aggregate_category([Some(10.0), Some(0.0), Some(5.0), None]);
        assert_eq!(base, with_absent);
    }

    #[test]
    fn test_periodic_conversion() {
        let c = Carrying { taxes: 3_600.0, insurance: 1_200.0, utilities: 150.0 };
        assert_relative_eq!(c.monthly_total(), 550.0, epsilon = 1e-9);
        assert_relative_eq!(c.period_total(DEFAULT_HOLDING_PERIOD_MONTHS), 3_300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_item_rejected() {
        let c = Carrying { taxes: -1.0, insurance: 0.0, utilities: 0.0 };
        let err = c.validate().unwrap_err().to_string();
        assert!(err.contains("carrying.taxes"), "{err}");
    }
}
