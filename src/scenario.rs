//! Three-slot scenario store with a current-slot cursor
//!
//! A calculator holds exactly three independent scenarios. Updates go to the
//! currently selected slot; comparisons run every slot.
//!
//! # Example
//! ```ignore
//! let mut store = ScenarioStore::<FlipScenario>::new();
//! store.select_index(2)?;
//! store.update_current(FlipScenarioUpdate {
//!     holding_period_months: Some(9),
//!     ..Default::default()
//! });
//! let comparison = store.compare()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// Scenario slot selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ScenarioId {
    #[default]
    One,
    Two,
    Three,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 3] = [ScenarioId::One, ScenarioId::Two, ScenarioId::Three];

    /// Zero-based slot index
    pub fn index(self) -> usize {
        match self {
            ScenarioId::One => 0,
            ScenarioId::Two => 1,
            ScenarioId::Three => 2,
        }
    }

    /// One-based scenario number as shown to users
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl TryFrom<u8> for ScenarioId {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(ScenarioId::One),
            2 => Ok(ScenarioId::Two),
            3 => Ok(ScenarioId::Three),
            other => Err(CalcError::InvalidScenario(other)),
        }
    }
}

impl From<ScenarioId> for u8 {
    fn from(id: ScenarioId) -> u8 {
        id.number()
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scenario {}", self.number())
    }
}

/// One value per scenario slot, keyed the way the comparison JSON expects
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Triple<T> {
    pub scenario1: T,
    pub scenario2: T,
    pub scenario3: T,
}

impl<T> Triple<T> {
    pub fn from_array([scenario1, scenario2, scenario3]: [T; 3]) -> Self {
        Self { scenario1, scenario2, scenario3 }
    }

    pub fn get(&self, id: ScenarioId) -> &T {
        match id {
            ScenarioId::One => &self.scenario1,
            ScenarioId::Two => &self.scenario2,
            ScenarioId::Three => &self.scenario3,
        }
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Triple<U> {
        Triple {
            scenario1: f(&self.scenario1),
            scenario2: f(&self.scenario2),
            scenario3: f(&self.scenario3),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScenarioId, &T)> {
        ScenarioId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

/// First slot holding the maximum value; later equal values never win
pub fn best_scenario(values: &Triple<f64>) -> ScenarioId {
    let mut best = ScenarioId::One;
    for (id, value) in values.iter().skip(1) {
        if *value > *values.get(best) {
            best = id;
        }
    }
    best
}

/// A scenario record that can be partially updated and calculated
pub trait Scenario: Clone + Default {
    /// Section-level partial update
    type Update;
    /// Full output of one calculation
    type Analysis;

    fn apply_update(&mut self, update: Self::Update);

    /// Recompute every derived value and store the result block
    fn calculate_all(&mut self) -> Result<Self::Analysis>;
}

/// Three independent scenario slots plus the currently selected one
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioStore<S> {
    slots: [S; 3],
    current: ScenarioId,
}

impl<S: Scenario> ScenarioStore<S> {
    /// Every slot starts from the default template
    pub fn new() -> Self {
        Self::with_template(&S::default())
    }

    /// Every slot starts as its own copy of `template`
    pub fn with_template(template: &S) -> Self {
        Self {
            slots: [template.clone(), template.clone(), template.clone()],
            current: ScenarioId::One,
        }
    }

    pub fn from_scenarios(scenario1: S, scenario2: S, scenario3: S) -> Self {
        Self {
            slots: [scenario1, scenario2, scenario3],
            current: ScenarioId::One,
        }
    }

    pub fn current(&self) -> ScenarioId {
        self.current
    }

    pub fn select(&mut self, id: ScenarioId) -> &mut Self {
        self.current = id;
        self
    }

    /// Select by user-facing number; anything outside 1..=3 is rejected
    pub fn select_index(&mut self, number: u8) -> Result<&mut Self> {
        let id = ScenarioId::try_from(number)?;
        Ok(self.select(id))
    }

    pub fn get(&self, id: ScenarioId) -> &S {
        &self.slots[id.index()]
    }

    pub fn get_mut(&mut self, id: ScenarioId) -> &mut S {
        &mut self.slots[id.index()]
    }

    pub fn current_scenario(&self) -> &S {
        self.get(self.current)
    }

    pub fn current_scenario_mut(&mut self) -> &mut S {
        let id = self.current;
        self.get_mut(id)
    }

    /// Apply a section update to the selected slot only
    pub fn update_current(&mut self, update: S::Update) -> &mut Self {
        self.current_scenario_mut().apply_update(update);
        self
    }

    /// Apply a section update to a specific slot
    pub fn update(&mut self, id: ScenarioId, update: S::Update) -> &mut Self {
        self.get_mut(id).apply_update(update);
        self
    }

    /// Calculate the selected slot
    pub fn calculate_current(&mut self) -> Result<S::Analysis> {
        self.current_scenario_mut().calculate_all()
    }

    /// Calculate every slot, in slot order
    ///
    /// Every slot is recalculated even when an earlier one is rejected, so no
    /// slot keeps a result from older inputs. The first error is returned.
    pub fn calculate_each(&mut self) -> Result<Triple<S::Analysis>> {
        let [a, b, c] = &mut self.slots;
        let (first, second, third) = (a.calculate_all(), b.calculate_all(), c.calculate_all());
        Ok(Triple {
            scenario1: first?,
            scenario2: second?,
            scenario3: third?,
        })
    }
}

impl<S: Scenario> Default for ScenarioStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flip::{AcquisitionCosts, FlipRevenues, FlipScenario, FlipScenarioUpdate};

    #[test]
    fn test_select_out_of_range_rejected() {
        let mut store = ScenarioStore::<FlipScenario>::new();
        for bad in [0, 4, 255] {
            let err = store.select_index(bad).unwrap_err();
            assert!(matches!(err, CalcError::InvalidScenario(n) if n == bad));
        }
        assert_eq!(store.current(), ScenarioId::One);
    }

    #[test]
    fn test_update_targets_selected_slot() {
        let mut store = ScenarioStore::<FlipScenario>::new();
        store.select_index(3).unwrap().update_current(FlipScenarioUpdate {
            holding_period_months: Some(12),
            ..Default::default()
        });
        assert_eq!(store.get(ScenarioId::Three).holding_period_months, 12);
        assert_eq!(store.get(ScenarioId::One).holding_period_months, 6);
        assert_eq!(store.get(ScenarioId::Two).holding_period_months, 6);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut template = FlipScenario::default();
        template.acquisition.purchase_price = 300_000.0;

        let mut store = ScenarioStore::with_template(&template);
        let before = serde_json::to_string(store.get(ScenarioId::One)).unwrap();

        store.select(ScenarioId::Two).update_current(FlipScenarioUpdate {
            acquisition: Some(AcquisitionCosts { purchase_price: 275_000.0, ..Default::default() }),
            ..Default::default()
        });
        store.get_mut(ScenarioId::Three).acquisition.notary_fees = 1_800.0;

        let after = serde_json::to_string(store.get(ScenarioId::One)).unwrap();
        assert_eq!(before, after);
        assert_eq!(store.get(ScenarioId::Two).acquisition.purchase_price, 275_000.0);
        assert_eq!(template.acquisition.notary_fees, 0.0);
    }

    #[test]
    fn test_update_by_id_and_calculate_current() {
        let mut template = FlipScenario::default();
        template.property_financing.down_payment = 100_000.0;
        template.acquisition.purchase_price = 100_000.0;
        let mut store = ScenarioStore::with_template(&template);

        store.update(
            ScenarioId::Two,
            FlipScenarioUpdate {
                revenues: Some(FlipRevenues {
                    expected_sale_price: 130_000.0,
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        assert_eq!(store.current(), ScenarioId::One);

        let analysis = store.select(ScenarioId::Two).calculate_current().unwrap();
        let profit = analysis.profitability.net_profit;
        assert_eq!(profit, 30_000.0);
        assert!(store.get(ScenarioId::Two).profitability_analysis.is_some());
        assert!(store.get(ScenarioId::One).profitability_analysis.is_none());
    }

    #[test]
    fn test_calculate_each_leaves_no_stale_slot() {
        let mut template = FlipScenario::default();
        template.property_financing.down_payment = 100_000.0;
        let mut store = ScenarioStore::with_template(&template);
        store.calculate_each().unwrap();

        store.get_mut(ScenarioId::One).revenues.expected_sale_price = 50_000.0;
        store.get_mut(ScenarioId::Two).renovation.kitchen = -1.0;
        store.get_mut(ScenarioId::Three).revenues.expected_sale_price = 80_000.0;
        assert!(store.calculate_each().is_err());

        let block = |id| store.get(id).profitability_analysis.as_ref().map(|p| p.net_profit);
        assert_eq!(block(ScenarioId::One), Some(50_000.0));
        assert_eq!(block(ScenarioId::Two), None);
        assert_eq!(block(ScenarioId::Three), Some(80_000.0));
    }

    #[test]
    fn test_best_scenario_first_max_wins() {
        let values = Triple::from_array([5.0, 10.0, 10.0]);
        for _ in 0..10 {
            assert_eq!(best_scenario(&values), ScenarioId::Two);
        }
        assert_eq!(best_scenario(&Triple::from_array([7.0, 7.0, 7.0])), ScenarioId::One);
        assert_eq!(best_scenario(&Triple::from_array([-3.0, -1.0, -2.0])), ScenarioId::Two);
    }

    #[test]
    fn test_scenario_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ScenarioId::Three).unwrap(), "3");
        let parsed: ScenarioId = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, ScenarioId::Two);
        assert!(serde_json::from_str::<ScenarioId>("4").is_err());
    }
}
