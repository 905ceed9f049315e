//! Supplier value analyzer
//!
//! Audits whether a purchased (non-manufactured) product is fairly priced
//! against a theoretical in-house make cost, and back-solves the implied
//! metal price to catch margin hidden in the "metal" line of a supplier's
//! invoice rather than the labor line.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::costing::{materials_cost, Catalog};
use crate::core::labor;
use crate::core::rounding::round_display;
use crate::entities::product::RecipeItem;
use crate::entities::settings::Settings;

/// Verdict bands for purchase price vs theoretical make cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueVerdict {
    /// At or below 95% of the make cost
    Excellent,
    /// Up to 130%
    Fair,
    /// Up to 180%
    Expensive,
    /// Beyond 180%
    Overpriced,
}

impl std::fmt::Display for ValueVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueVerdict::Excellent => write!(f, "excellent"),
            ValueVerdict::Fair => write!(f, "fair"),
            ValueVerdict::Expensive => write!(f, "expensive"),
            ValueVerdict::Overpriced => write!(f, "overpriced"),
        }
    }
}

/// How the supplier's reported figure compares to the in-house benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyVerdict {
    Cheaper,
    Similar,
    MoreExpensive,
}

impl std::fmt::Display for EfficiencyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EfficiencyVerdict::Cheaper => write!(f, "cheaper"),
            EfficiencyVerdict::Similar => write!(f, "similar"),
            EfficiencyVerdict::MoreExpensive => write!(f, "more expensive"),
        }
    }
}

/// Labor figures the supplier itself reports on its pricing
///
/// Reference only; never added to the purchase cost.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportedLabor {
    /// Reported making labor (technician + casting)
    pub labor: f64,

    /// Reported plating charge
    pub plating: f64,
}

impl ReportedLabor {
    /// Whether the supplier reported any labor at all
    pub fn is_zero(&self) -> bool {
        self.labor == 0.0 && self.plating == 0.0
    }
}

/// Derived fair-price comparison for a purchased product
///
/// Computed on demand, never persisted. Monetary fields are canonically
/// rounded; verdicts and flags are decided on the raw figures first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierAnalysis {
    /// The price paid to the supplier
    pub purchase_price: f64,

    /// Metal + materials cost only, labor excluded
    pub intrinsic_value: f64,

    /// Intrinsic value plus benchmarked in-house labor
    pub theoretical_make_cost: f64,

    /// purchase price / theoretical make cost
    pub price_ratio: f64,

    /// Verdict band for the ratio
    pub verdict: ValueVerdict,

    /// Reported making labor vs benchmark, when labor was reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_efficiency: Option<EfficiencyVerdict>,

    /// Reported plating charge vs benchmark, when labor was reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plating_efficiency: Option<EfficiencyVerdict>,

    /// Implied per-gram metal price after subtracting materials and
    /// reported labor from the purchase price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_silver_price: Option<f64>,

    /// The implied metal price exceeds the current market price by more
    /// than 15% - the supplier is hiding margin in the metal line.
    pub hidden_markup: bool,
}

/// Reported making labor within this band of the benchmark reads as similar
const LABOR_CHEAPER_BELOW: f64 = -0.5;
const LABOR_EXPENSIVE_ABOVE: f64 = 1.0;
const PLATING_CHEAPER_BELOW: f64 = -0.2;
const PLATING_EXPENSIVE_ABOVE: f64 = 0.5;

/// Implied metal price tolerance before the hidden-markup flag fires
const HIDDEN_MARKUP_TOLERANCE: f64 = 1.15;

fn verdict_for_ratio(ratio: f64) -> ValueVerdict {
    if ratio <= 0.95 {
        ValueVerdict::Excellent
    } else if ratio <= 1.30 {
        ValueVerdict::Fair
    } else if ratio <= 1.80 {
        ValueVerdict::Expensive
    } else {
        ValueVerdict::Overpriced
    }
}

fn efficiency(diff: f64, cheaper_below: f64, expensive_above: f64) -> EfficiencyVerdict {
    if diff < cheaper_below {
        EfficiencyVerdict::Cheaper
    } else if diff > expensive_above {
        EfficiencyVerdict::MoreExpensive
    } else {
        EfficiencyVerdict::Similar
    }
}

/// Compare a purchased item's price against a theoretical in-house cost
///
/// `recipe` is priced with the resolver's material rules (components at
/// raw totals); benchmark labor evaluates the casting, technician, and
/// plating formulas at `weight`.
pub fn analyze_supplier_value(
    weight: f64,
    purchase_price: f64,
    recipe: &[RecipeItem],
    settings: &Settings,
    catalog: &Catalog,
    reported: &ReportedLabor,
) -> SupplierAnalysis {
    let mut lines = Vec::new();
    let mut issues = Vec::new();
    let materials = materials_cost(
        recipe,
        None,
        settings,
        catalog,
        0,
        &HashSet::new(),
        &mut lines,
        &mut issues,
    );

    let intrinsic = settings.metal_cost(weight) + materials;
    let benchmark_work = labor::casting_cost(weight) + labor::technician_cost(weight);
    let benchmark_plating = labor::plating_cost(weight, settings.plating_rate);
    let theoretical = intrinsic + benchmark_work + benchmark_plating;

    let ratio = if theoretical > 0.0 {
        purchase_price / theoretical
    } else {
        0.0
    };
    let verdict = if theoretical > 0.0 {
        verdict_for_ratio(ratio)
    } else {
        ValueVerdict::Overpriced
    };

    let mut analysis = SupplierAnalysis {
        purchase_price,
        intrinsic_value: round_display(intrinsic),
        theoretical_make_cost: round_display(theoretical),
        price_ratio: ratio,
        verdict,
        labor_efficiency: None,
        plating_efficiency: None,
        effective_silver_price: None,
        hidden_markup: false,
    };

    if reported.is_zero() {
        return analysis;
    }

    analysis.labor_efficiency = Some(efficiency(
        reported.labor - benchmark_work,
        LABOR_CHEAPER_BELOW,
        LABOR_EXPENSIVE_ABOVE,
    ));
    analysis.plating_efficiency = Some(efficiency(
        reported.plating - benchmark_plating,
        PLATING_CHEAPER_BELOW,
        PLATING_EXPENSIVE_ABOVE,
    ));

    if weight > 0.0 {
        let implied =
            (purchase_price - materials - reported.labor - reported.plating) / weight;
        analysis.hidden_markup =
            implied > settings.metal_unit_price * HIDDEN_MARKUP_TOLERANCE;
        analysis.effective_silver_price = Some(round_display(implied));
    }

    analysis
}
