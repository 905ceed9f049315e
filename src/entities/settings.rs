//! Workshop pricing settings
//!
//! Settings are passed explicitly to every costing call - never read from
//! ambient state - so a hypothetical repricing is just another call with a
//! different snapshot.

use serde::{Deserialize, Serialize};

/// Pricing parameters shared by every costing computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Current metal price per gram
    pub metal_unit_price: f64,

    /// Casting loss as a percentage of metal weight
    #[serde(default)]
    pub loss_percentage: f64,

    /// Plating rate per gram for gold/platinum finishes
    #[serde(default = "default_plating_rate")]
    pub plating_rate: f64,
}

fn default_plating_rate() -> f64 {
    0.25
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            metal_unit_price: 1.10,
            loss_percentage: 10.0,
            plating_rate: default_plating_rate(),
        }
    }
}

impl Settings {
    /// Metal cost of the given weight, loss included
    pub fn metal_cost(&self, weight_g: f64) -> f64 {
        weight_g * self.metal_unit_price * (1.0 + self.loss_percentage / 100.0)
    }
}
