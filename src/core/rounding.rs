//! Canonical monetary rounding and display formatting
//!
//! Every rounded figure leaving the core passes through [`round_display`].
//! Intermediate accumulation stays in raw f64 so rounding error never
//! compounds across recipe levels; only the boundary value is rounded.

/// Guard against accumulated float error bumping a value a whole tenth up
/// (e.g. 6.9000000000000004 must still round to 6.90, not 7.00).
const EPSILON: f64 = 1e-6;

/// Round a monetary amount up to the nearest 0.10
///
/// Workshop convention: cost figures are always quoted in tenths, rounded
/// in the house's favor. Negative inputs clamp to zero.
pub fn round_display(amount: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }
    (amount * 10.0 - EPSILON).ceil() / 10.0
}

/// Format a monetary amount for display with two decimals
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}
