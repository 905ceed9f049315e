//! Supplier value analyzer tests - verdicts and forensics

use filigree::core::costing::{resolve_cost, Catalog};
use filigree::core::supplier::{
    analyze_supplier_value, EfficiencyVerdict, ReportedLabor, ValueVerdict,
};
use filigree::entities::material::Material;
use filigree::entities::product::{LaborCharge, Product, RecipeItem};
use filigree::entities::settings::Settings;

// ============================================================================
// Verdict bands
// ============================================================================

#[test]
fn test_expensive_purchase_verdict() {
    // 8.0g at 2.50/g metal, empty recipe: intrinsic value 20.
    // Benchmark labor: casting 1.20 + technician 5.60 + plating 3.20 = 10.
    // Theoretical make cost 30; price 50 -> ratio 166% -> expensive.
    let settings = Settings {
        metal_unit_price: 2.5,
        loss_percentage: 0.0,
        plating_rate: 0.4,
    };
    let catalog = Catalog::new(&[], &[]);

    let analysis = analyze_supplier_value(
        8.0,
        50.0,
        &[],
        &settings,
        &catalog,
        &ReportedLabor::default(),
    );

    assert_eq!(analysis.intrinsic_value, 20.0);
    assert_eq!(analysis.theoretical_make_cost, 30.0);
    assert!((analysis.price_ratio - 50.0 / 30.0).abs() < 1e-9);
    assert_eq!(analysis.verdict, ValueVerdict::Expensive);
}

#[test]
fn test_bargain_purchase_verdict() {
    let settings = Settings {
        metal_unit_price: 2.5,
        loss_percentage: 0.0,
        plating_rate: 0.4,
    };
    let catalog = Catalog::new(&[], &[]);

    let analysis = analyze_supplier_value(
        8.0,
        25.0,
        &[],
        &settings,
        &catalog,
        &ReportedLabor::default(),
    );

    assert_eq!(analysis.verdict, ValueVerdict::Excellent);
}

#[test]
fn test_materials_feed_intrinsic_value() {
    let settings = Settings {
        metal_unit_price: 2.0,
        loss_percentage: 0.0,
        plating_rate: 0.25,
    };
    let materials = vec![Material::new("MAT-001", "Clasp", 1.5)];
    let catalog = Catalog::new(&materials, &[]);
    let recipe = vec![RecipeItem::Raw {
        material_id: "MAT-001".to_string(),
        quantity: 2.0,
    }];

    let analysis = analyze_supplier_value(
        5.0,
        20.0,
        &recipe,
        &settings,
        &catalog,
        &ReportedLabor::default(),
    );

    // metal 10.0 + clasps 3.0
    assert_eq!(analysis.intrinsic_value, 13.0);
}

// ============================================================================
// Reported-labor forensics
// ============================================================================

#[test]
fn test_reported_labor_comparison() {
    // 10g: benchmark work = casting 1.50 + technician 5.00 = 6.50
    let settings = Settings {
        metal_unit_price: 2.0,
        loss_percentage: 0.0,
        plating_rate: 0.25,
    };
    let catalog = Catalog::new(&[], &[]);

    let analysis = analyze_supplier_value(
        10.0,
        40.0,
        &[],
        &settings,
        &catalog,
        &ReportedLabor {
            labor: 4.0,
            plating: 2.5,
        },
    );

    assert_eq!(analysis.labor_efficiency, Some(EfficiencyVerdict::Cheaper));
    // benchmark plating 2.50, reported 2.50 -> similar
    assert_eq!(analysis.plating_efficiency, Some(EfficiencyVerdict::Similar));
}

#[test]
fn test_hidden_markup_in_metal_line() {
    // Price 46.5, materials 0, reported labor 6.5: implied metal 4.00/g
    // against a 2.00 market price - the margin hides in the metal line.
    let settings = Settings {
        metal_unit_price: 2.0,
        loss_percentage: 0.0,
        plating_rate: 0.25,
    };
    let catalog = Catalog::new(&[], &[]);

    let analysis = analyze_supplier_value(
        10.0,
        46.5,
        &[],
        &settings,
        &catalog,
        &ReportedLabor {
            labor: 6.5,
            plating: 0.0,
        },
    );

    assert!(analysis.hidden_markup);
    assert_eq!(analysis.effective_silver_price, Some(4.0));
}

// ============================================================================
// Attachment to purchased-product resolution
// ============================================================================

#[test]
fn test_analysis_attached_on_purchased_resolution() {
    let settings = Settings {
        metal_unit_price: 2.0,
        loss_percentage: 0.0,
        plating_rate: 0.25,
    };
    let mut chain = Product::new_purchased("CH3001", "Curb chain 50cm", 10.0, 60.0);
    chain.labor.technician = LaborCharge::manual(5.0);
    chain.labor.casting = LaborCharge::manual(1.0);
    let catalog = Catalog::new(&[], &[]);

    let result = resolve_cost(&chain, &settings, &catalog);

    assert!((result.raw_total - 60.0).abs() < 1e-9);
    let analysis = result.breakdown.supplier_analysis.expect("analysis attached");
    assert_eq!(analysis.purchase_price, 60.0);
    // Manual channels are the supplier's self-reported labor reference
    assert_eq!(analysis.labor_efficiency, Some(EfficiencyVerdict::Similar));
}
