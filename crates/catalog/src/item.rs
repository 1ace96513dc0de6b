use serde::{Deserialize, Serialize};

use superstore_core::{Entity, ItemCode, SubcategoryId};

/// Cost, demand and usage inputs of the replenishment model.
///
/// All figures are per quarter (costs, demand) or per day (usage, lead time).
/// Nothing is validated: negative or zero inputs flow straight into the
/// formulas below.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplenishmentParams {
    /// D: fixed ordering cost per quarter.
    pub fixed_cost_per_quarter: f64,
    /// H: carrying cost per unit per quarter.
    pub carrying_cost_per_unit_per_quarter: f64,
    /// K: demand in units per quarter.
    pub demand_units_per_quarter: f64,
    pub max_daily_usage: f64,
    pub avg_daily_usage: f64,
    pub max_lead_time_days: f64,
    pub avg_lead_time_days: f64,
}

impl ReplenishmentParams {
    /// Economic Order Quantity, `sqrt(2DK / H)`.
    ///
    /// Returns 0 when the carrying cost is zero. Callers must read that 0 as
    /// "no EOQ", not as an optimum.
    pub fn economic_order_quantity(&self) -> f64 {
        if self.carrying_cost_per_unit_per_quarter == 0.0 {
            return 0.0;
        }
        ((2.0 * self.fixed_cost_per_quarter * self.demand_units_per_quarter)
            / self.carrying_cost_per_unit_per_quarter)
            .sqrt()
    }

    /// Worst-case lead-time demand minus average lead-time demand.
    ///
    /// Not clamped: averages above the "max" inputs yield a negative buffer.
    pub fn safety_stock(&self) -> f64 {
        (self.max_daily_usage * self.max_lead_time_days)
            - (self.avg_daily_usage * self.avg_lead_time_days)
    }

    /// Average lead-time demand plus safety stock.
    pub fn reorder_point(&self) -> f64 {
        (self.avg_lead_time_days * self.avg_daily_usage) + self.safety_stock()
    }
}

/// A single stock-keeping unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    code: ItemCode,
    name: String,
    description: String,
    subcategory_id: SubcategoryId,
    params: ReplenishmentParams,
    inventory_level: i64,
}

impl Item {
    /// New item with empty description, zeroed parameters and no stock.
    pub fn new(code: ItemCode, name: impl Into<String>, subcategory_id: SubcategoryId) -> Self {
        Self {
            code,
            name: name.into(),
            description: String::new(),
            subcategory_id,
            params: ReplenishmentParams::default(),
            inventory_level: 0,
        }
    }

    pub fn with_params(mut self, params: ReplenishmentParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_inventory_level(mut self, level: i64) -> Self {
        self.inventory_level = level;
        self
    }

    pub fn code(&self) -> &ItemCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn subcategory_id(&self) -> &SubcategoryId {
        &self.subcategory_id
    }

    pub fn set_subcategory_id(&mut self, subcategory_id: SubcategoryId) {
        self.subcategory_id = subcategory_id;
    }

    pub fn params(&self) -> &ReplenishmentParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ReplenishmentParams {
        &mut self.params
    }

    pub fn set_params(&mut self, params: ReplenishmentParams) {
        self.params = params;
    }

    pub fn inventory_level(&self) -> i64 {
        self.inventory_level
    }

    pub fn set_inventory_level(&mut self, level: i64) {
        self.inventory_level = level;
    }

    /// Unconditional increment. Wraps on overflow, so a later
    /// `remove_inventory` of the same amount still restores the level.
    pub fn add_inventory(&mut self, units: i64) {
        self.inventory_level = self.inventory_level.wrapping_add(units);
    }

    /// Unconditional decrement; the level may go negative here. Wraps on
    /// overflow like `add_inventory`.
    pub fn remove_inventory(&mut self, units: i64) {
        self.inventory_level = self.inventory_level.wrapping_sub(units);
    }

    pub fn economic_order_quantity(&self) -> f64 {
        self.params.economic_order_quantity()
    }

    pub fn safety_stock(&self) -> f64 {
        self.params.safety_stock()
    }

    pub fn reorder_point(&self) -> f64 {
        self.params.reorder_point()
    }

    /// True when stock is at or below the reorder point (inclusive).
    pub fn needs_reordering(&self) -> bool {
        (self.inventory_level as f64) <= self.reorder_point()
    }
}

impl Entity for Item {
    type Id = ItemCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}
