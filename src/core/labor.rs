//! Weight-tiered labor cost model
//!
//! Shared pure formulas for technician, casting, and plating labor. The
//! tier table is ordered data so the breakpoints stay reviewable in one
//! place. Manual-override channels bypass these formulas entirely (see
//! [`crate::entities::product::LaborCharge::resolve`]).

/// Technician rate tiers: (weight ceiling in grams, rate per gram)
///
/// Evaluated in order; the first tier whose ceiling covers the weight wins.
pub const TECHNICIAN_TIERS: [(f64, f64); 3] = [(2.2, 1.30), (4.2, 0.90), (8.2, 0.70)];

/// Technician rate per gram above the last tier ceiling
pub const TECHNICIAN_RATE_HEAVY: f64 = 0.50;

/// Technician rate per gram for sub-component products (flat, untiered)
pub const TECHNICIAN_RATE_COMPONENT: f64 = 0.50;

/// Casting rate per gram
pub const CASTING_RATE: f64 = 0.15;

/// Technician cost for a top-level piece at the given weight
///
/// Light pieces carry proportionally more bench time per gram, hence the
/// descending tier rates.
pub fn technician_cost(weight_g: f64) -> f64 {
    for (ceiling, rate) in TECHNICIAN_TIERS {
        if weight_g <= ceiling {
            return weight_g * rate;
        }
    }
    weight_g * TECHNICIAN_RATE_HEAVY
}

/// Technician cost for a sub-component product
///
/// Components are finished as part of their parent, so only the flat
/// handling rate applies.
pub fn component_technician_cost(weight_g: f64) -> f64 {
    weight_g * TECHNICIAN_RATE_COMPONENT
}

/// Casting cost at the given total weight
pub fn casting_cost(weight_g: f64) -> f64 {
    weight_g * CASTING_RATE
}

/// Plating cost at the given weight and per-gram rate
///
/// Applies to gold/platinum finishes only; two-tone plating is priced off
/// the independent manual rate against the secondary weight channel.
pub fn plating_cost(weight_g: f64, rate: f64) -> f64 {
    weight_g * rate
}
