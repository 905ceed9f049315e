//! Variant cost estimator
//!
//! Re-prices one specific variant of a master product: raw recipe lines
//! pick up the variant's stone-code price overrides, and labor follows
//! the decoded finish (two-tone runs two finishing passes, gold/platinum
//! adds the plating pass).

use std::collections::HashSet;

use tracing::debug;

use crate::core::costing::{materials_cost, Catalog, CostBreakdown, CostResult};
use crate::core::labor;
use crate::core::sku::{decompose_suffix, SuffixParts};
use crate::entities::product::{PlatingCategory, Product, ProductionStrategy};
use crate::entities::settings::Settings;

/// Estimate the manufacturing cost of one variant of a master product
///
/// The suffix is decomposed against the master's gender scope; a suffix
/// the decomposer cannot classify estimates as the plain master (default
/// finish, no stone context). Purchased masters short-circuit to their
/// stored purchase price - the weight-scaled surcharges are already
/// reflected in that price and must not be double-counted against
/// materials.
pub fn estimate_variant_cost(
    master: &Product,
    variant_suffix: &str,
    settings: &Settings,
    catalog: &Catalog,
) -> CostResult {
    let parts = match decompose_suffix(variant_suffix, master.gender) {
        Ok(parts) => parts,
        Err(err) => {
            debug!(sku = %master.sku, %err, "estimating unrecognized suffix as plain master");
            SuffixParts::plain()
        }
    };

    if master.strategy == ProductionStrategy::Purchased {
        let price = master.purchase_price.unwrap_or(0.0);
        let breakdown = CostBreakdown {
            purchase_price: Some(price),
            ..CostBreakdown::default()
        };
        return CostResult::from_raw(price, breakdown);
    }

    let primary = master.weight_g;
    let secondary = master.secondary_weight_g;
    let total = master.total_weight();

    let mut path = HashSet::new();
    path.insert(master.sku.clone());

    let mut lines = Vec::new();
    let mut issues = Vec::new();
    let materials = materials_cost(
        &master.recipe,
        parts.stone.as_deref(),
        settings,
        catalog,
        0,
        &path,
        &mut lines,
        &mut issues,
    );

    let metal = settings.metal_cost(total);

    // Two-tone variants get two distinct finishing passes, one per weight
    // channel; every other finish runs the tier table on the total.
    let technician_default = if parts.plating() == PlatingCategory::TwoTone {
        labor::technician_cost(primary) + labor::technician_cost(secondary)
    } else {
        labor::technician_cost(total)
    };
    let technician = master.labor.technician.resolve(technician_default);

    let plating = match parts.plating() {
        cat if cat.uses_plating_rate() => master
            .labor
            .plating
            .resolve(labor::plating_cost(total, settings.plating_rate)),
        PlatingCategory::TwoTone => master.labor.plating_secondary.amount * secondary,
        _ => 0.0,
    };

    let casting = master.labor.casting.resolve(labor::casting_cost(total));
    let stone_setting = master.labor.stone_setting.resolve(0.0);
    let subcontract = master.labor.subcontract.resolve(0.0);

    let breakdown = CostBreakdown {
        metal,
        materials,
        casting,
        stone_setting,
        technician,
        plating,
        subcontract,
        lines,
        issues,
        ..CostBreakdown::default()
    };

    let raw_total = metal + materials + breakdown.labor_total();
    CostResult::from_raw(raw_total, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::material::Material;
    use crate::entities::product::{Gender, LaborCharge, RecipeItem};

    fn settings() -> Settings {
        Settings {
            metal_unit_price: 2.0,
            loss_percentage: 0.0,
            plating_rate: 0.25,
        }
    }

    fn stone_band() -> (Vec<Material>, Product) {
        let mut mat = Material::new("MAT-001", "Cabochon 8mm", 3.0);
        mat.stone_overrides.insert("LA".to_string(), 5.0);

        let mut master = Product::new("RN1042", "Band ring", 2.0);
        master.gender = Some(Gender::Men);
        master.recipe.push(RecipeItem::Raw {
            material_id: "MAT-001".to_string(),
            quantity: 1.0,
        });
        (vec![mat], master)
    }

    #[test]
    fn test_stone_override_applies_to_matching_variant() {
        let (materials, master) = stone_band();
        let catalog = Catalog::new(&materials, &[]);

        let result = estimate_variant_cost(&master, "XLA", &settings(), &catalog);
        assert!((result.breakdown.materials - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_other_variants_keep_base_price() {
        let (materials, master) = stone_band();
        let catalog = Catalog::new(&materials, &[]);

        let result = estimate_variant_cost(&master, "XON", &settings(), &catalog);
        assert!((result.breakdown.materials - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_gold_finish_gets_plating_pass() {
        let (materials, master) = stone_band();
        let catalog = Catalog::new(&materials, &[]);

        let plain = estimate_variant_cost(&master, "ON", &settings(), &catalog);
        assert_eq!(plain.breakdown.plating, 0.0);

        let gold = estimate_variant_cost(&master, "XON", &settings(), &catalog);
        assert!((gold.breakdown.plating - 0.50).abs() < 1e-9);
    }

    #[test]
    fn test_rose_finish_gets_no_plating_pass() {
        let (materials, master) = stone_band();
        let catalog = Catalog::new(&materials, &[]);

        let rose = estimate_variant_cost(&master, "PLA", &settings(), &catalog);
        assert_eq!(rose.breakdown.plating, 0.0);
    }

    #[test]
    fn test_two_tone_runs_two_technician_passes() {
        let mut master = Product::new("RN2010", "Two-tone band", 2.0);
        master.secondary_weight_g = 1.0;
        master.labor.plating_secondary = LaborCharge::manual(0.8);
        let catalog = Catalog::new(&[], &[]);

        let result = estimate_variant_cost(&master, "D", &settings(), &catalog);

        // Each channel prices in its own tier: 2.0 x 1.30 + 1.0 x 1.30
        assert!((result.breakdown.technician - 3.90).abs() < 1e-9);
        // Two-tone plating: manual rate x secondary weight
        assert!((result.breakdown.plating - 0.80).abs() < 1e-9);
    }

    #[test]
    fn test_single_tone_uses_total_weight_tier() {
        let mut master = Product::new("RN2011", "Heavy band", 2.0);
        master.secondary_weight_g = 1.0;
        let catalog = Catalog::new(&[], &[]);

        let result = estimate_variant_cost(&master, "X", &settings(), &catalog);

        // 3.0g total lands in the second tier
        assert!((result.breakdown.technician - 2.70).abs() < 1e-9);
    }

    #[test]
    fn test_unrecognized_suffix_estimates_plain_master() {
        let (materials, master) = stone_band();
        let catalog = Catalog::new(&materials, &[]);

        let fallback = estimate_variant_cost(&master, "QQQ", &settings(), &catalog);
        let plain = estimate_variant_cost(&master, "", &settings(), &catalog);

        assert_eq!(fallback.raw_total, plain.raw_total);
        assert_eq!(fallback.breakdown.plating, 0.0);
    }

    #[test]
    fn test_purchased_master_short_circuits() {
        let mut master = Product::new_purchased("CH3001", "Curb chain", 12.0, 48.5);
        master.recipe.push(RecipeItem::Raw {
            material_id: "MAT-001".to_string(),
            quantity: 4.0,
        });
        let materials = vec![Material::new("MAT-001", "Clasp", 2.0)];
        let catalog = Catalog::new(&materials, &[]);

        let result = estimate_variant_cost(&master, "X", &settings(), &catalog);

        // Purchase price only - the recipe must not be double-counted
        assert!((result.raw_total - 48.5).abs() < 1e-9);
        assert_eq!(result.breakdown.materials, 0.0);
    }

    #[test]
    fn test_manual_plating_override() {
        let (materials, mut master) = stone_band();
        master.labor.plating = LaborCharge::manual(1.5);
        let catalog = Catalog::new(&materials, &[]);

        let result = estimate_variant_cost(&master, "XON", &settings(), &catalog);
        assert_eq!(result.breakdown.plating, 1.5);
    }
}
