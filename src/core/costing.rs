//! Recursive recipe cost resolver
//!
//! Rolls a product's bill of materials up into metal + materials + labor,
//! walking nested component products with cycle and depth guards. The
//! resolver is a pure function over catalog snapshots: no caching, no
//! side effects, and every malformed input degrades to a usable partial
//! result tagged with the issue instead of aborting the pass.
//!
//! Recursive accumulation always uses the raw (unrounded) totals;
//! only the boundary figure is rounded, so rounding error never compounds
//! across recipe levels.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::labor;
use crate::core::rounding::round_display;
use crate::core::supplier::{analyze_supplier_value, ReportedLabor, SupplierAnalysis};
use crate::entities::material::Material;
use crate::entities::product::{Product, ProductionStrategy, RecipeItem};
use crate::entities::settings::Settings;

/// Recursion safety valve for the recipe graph
pub const MAX_DEPTH: usize = 10;

/// A recoverable condition hit during cost resolution
///
/// Every variant recovers locally as a zero-cost branch; the rest of the
/// pass continues.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostIssue {
    /// The recipe graph references a product already on the current
    /// resolution path.
    #[error("recipe cycle detected at {sku}")]
    CircularDependency {
        /// SKU closing the cycle
        sku: String,
    },

    /// The walk went past [`MAX_DEPTH`] levels of nesting.
    #[error("recipe nesting exceeds {MAX_DEPTH} levels at {sku}")]
    DepthExceeded {
        /// SKU at which the guard fired
        sku: String,
    },

    /// A raw recipe line points at a material id absent from the snapshot.
    #[error("recipe references unknown material {material_id}")]
    MissingMaterial {
        /// The dangling material id
        material_id: String,
    },

    /// A component recipe line points at a SKU absent from the snapshot.
    #[error("recipe references unknown product {sku}")]
    MissingComponent {
        /// The dangling SKU
        sku: String,
    },
}

/// One priced recipe line in a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostLine {
    /// Material id or component SKU
    pub reference: String,

    /// Display name from the snapshot
    pub name: String,

    /// Units consumed
    pub quantity: f64,

    /// Raw per-unit cost
    pub unit_cost: f64,

    /// Raw line cost
    pub line_cost: f64,
}

/// Structured cost breakdown of one resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Metal cost, casting loss included
    pub metal: f64,

    /// Materials cost across all recipe lines (raw)
    pub materials: f64,

    /// Casting labor
    pub casting: f64,

    /// Stone-setting labor
    pub stone_setting: f64,

    /// Technician labor
    pub technician: f64,

    /// Plating labor (variant estimation only; zero at master level)
    pub plating: f64,

    /// Subcontracted labor
    pub subcontract: f64,

    /// Stored purchase price, for purchased products
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,

    /// Per-line detail
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<CostLine>,

    /// Conditions recovered during resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<CostIssue>,

    /// Fair-price forensics, attached for purchased products
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_analysis: Option<SupplierAnalysis>,
}

impl CostBreakdown {
    /// Total labor across all channels
    pub fn labor_total(&self) -> f64 {
        self.casting + self.stone_setting + self.technician + self.plating + self.subcontract
    }

    /// Whether any guard or missing-reference condition fired
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    fn zero_with(issue: CostIssue) -> Self {
        Self {
            issues: vec![issue],
            ..Self::default()
        }
    }
}

/// Outcome of a cost resolution
///
/// `rounded_total` is the boundary display figure; `raw_total` is what
/// parent recipes accumulate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostResult {
    /// Canonically rounded total for display
    pub rounded_total: f64,

    /// Unrounded total for recursive accumulation
    pub raw_total: f64,

    /// Structured breakdown
    pub breakdown: CostBreakdown,
}

impl CostResult {
    pub(crate) fn from_raw(raw_total: f64, breakdown: CostBreakdown) -> Self {
        Self {
            rounded_total: round_display(raw_total),
            raw_total,
            breakdown,
        }
    }

    fn zero_with(issue: CostIssue) -> Self {
        Self::from_raw(0.0, CostBreakdown::zero_with(issue))
    }
}

/// Borrowed lookup indexes over a catalog snapshot
///
/// Built once per pass, the way a bulk repricing job iterates the catalog
/// under one settings snapshot.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    materials: HashMap<&'a str, &'a Material>,
    products: HashMap<&'a str, &'a Product>,
}

impl<'a> Catalog<'a> {
    /// Build lookup indexes from catalog slices
    pub fn new(materials: &'a [Material], products: &'a [Product]) -> Self {
        Self {
            materials: materials.iter().map(|m| (m.id.as_str(), m)).collect(),
            products: products.iter().map(|p| (p.sku.as_str(), p)).collect(),
        }
    }

    /// Look up a material by id
    pub fn material(&self, id: &str) -> Option<&'a Material> {
        self.materials.get(id).copied()
    }

    /// Look up a product by SKU
    pub fn product(&self, sku: &str) -> Option<&'a Product> {
        self.products.get(sku).copied()
    }
}

/// Resolve the full manufacturing cost of a product
///
/// Manufactured products roll up metal + materials + labor across the
/// recipe graph; purchased products cost their stored purchase price with
/// a supplier analysis attached for display. Identical inputs always
/// yield identical results.
pub fn resolve_cost(product: &Product, settings: &Settings, catalog: &Catalog) -> CostResult {
    resolve_inner(product, settings, catalog, 0, &HashSet::new())
}

fn resolve_inner(
    product: &Product,
    settings: &Settings,
    catalog: &Catalog,
    depth: usize,
    visited: &HashSet<String>,
) -> CostResult {
    if visited.contains(&product.sku) {
        warn!(sku = %product.sku, "recipe cycle detected, pricing branch at zero");
        return CostResult::zero_with(CostIssue::CircularDependency {
            sku: product.sku.clone(),
        });
    }
    if depth > MAX_DEPTH {
        warn!(sku = %product.sku, depth, "recipe nesting exceeds guard, pricing branch at zero");
        return CostResult::zero_with(CostIssue::DepthExceeded {
            sku: product.sku.clone(),
        });
    }

    match product.strategy {
        ProductionStrategy::Purchased => resolve_purchased(product, settings, catalog),
        ProductionStrategy::Manufactured => {
            resolve_manufactured(product, settings, catalog, depth, visited)
        }
    }
}

/// Purchased products cost their stored price; internally-modeled labor
/// is not added on top. The manual labor channels serve only as the
/// supplier's self-reported reference for the attached analysis.
fn resolve_purchased(product: &Product, settings: &Settings, catalog: &Catalog) -> CostResult {
    let price = product.purchase_price.unwrap_or(0.0);

    let mut breakdown = CostBreakdown {
        purchase_price: Some(price),
        ..CostBreakdown::default()
    };

    if product.purchase_price.is_some() {
        let reported = ReportedLabor {
            labor: manual_amount(product.labor.technician) + manual_amount(product.labor.casting),
            plating: manual_amount(product.labor.plating),
        };
        breakdown.supplier_analysis = Some(analyze_supplier_value(
            product.total_weight(),
            price,
            &product.recipe,
            settings,
            catalog,
            &reported,
        ));
    } else {
        debug!(sku = %product.sku, "purchased product has no stored price, costing at zero");
    }

    CostResult::from_raw(price, breakdown)
}

fn manual_amount(charge: crate::entities::product::LaborCharge) -> f64 {
    if charge.manual {
        charge.amount
    } else {
        0.0
    }
}

fn resolve_manufactured(
    product: &Product,
    settings: &Settings,
    catalog: &Catalog,
    depth: usize,
    visited: &HashSet<String>,
) -> CostResult {
    let weight = product.total_weight();

    // Per-branch copy: sibling branches must never observe each other's
    // markers, only true ancestors count as a cycle.
    let mut path = visited.clone();
    path.insert(product.sku.clone());

    let mut lines = Vec::new();
    let mut issues = Vec::new();
    let materials = materials_cost(
        &product.recipe,
        None,
        settings,
        catalog,
        depth,
        &path,
        &mut lines,
        &mut issues,
    );

    let metal = settings.metal_cost(weight);

    let is_component = depth > 0;
    let technician = product.labor.technician.resolve(if is_component {
        labor::component_technician_cost(weight)
    } else {
        labor::technician_cost(weight)
    });
    let casting = product.labor.casting.resolve(if is_component {
        0.0
    } else {
        labor::casting_cost(weight)
    });
    let stone_setting = product.labor.stone_setting.resolve(0.0);
    let subcontract = product.labor.subcontract.resolve(0.0);

    let breakdown = CostBreakdown {
        metal,
        materials,
        casting,
        stone_setting,
        technician,
        subcontract,
        lines,
        issues,
        ..CostBreakdown::default()
    };

    let raw_total = metal + materials + breakdown.labor_total();
    CostResult::from_raw(raw_total, breakdown)
}

/// Price all recipe lines, recursing into component products
///
/// Raw lines use the material's effective unit cost for the optional
/// stone-code context; component lines accumulate the child's raw total.
/// Dangling references price at zero and tag an issue.
#[allow(clippy::too_many_arguments)]
pub(crate) fn materials_cost(
    recipe: &[RecipeItem],
    stone_code: Option<&str>,
    settings: &Settings,
    catalog: &Catalog,
    depth: usize,
    visited: &HashSet<String>,
    lines: &mut Vec<CostLine>,
    issues: &mut Vec<CostIssue>,
) -> f64 {
    let mut total = 0.0;

    for item in recipe {
        match item {
            RecipeItem::Raw {
                material_id,
                quantity,
            } => match catalog.material(material_id) {
                Some(material) => {
                    let unit_cost = material.effective_unit_cost(stone_code);
                    let line_cost = unit_cost * quantity;
                    total += line_cost;
                    lines.push(CostLine {
                        reference: material.id.clone(),
                        name: material.name.clone(),
                        quantity: *quantity,
                        unit_cost,
                        line_cost,
                    });
                }
                None => {
                    debug!(material_id = %material_id, "recipe line references unknown material");
                    issues.push(CostIssue::MissingMaterial {
                        material_id: material_id.clone(),
                    });
                }
            },
            RecipeItem::Component {
                product_sku,
                quantity,
            } => match catalog.product(product_sku) {
                Some(component) => {
                    let child = resolve_inner(component, settings, catalog, depth + 1, visited);
                    let line_cost = child.raw_total * quantity;
                    total += line_cost;
                    lines.push(CostLine {
                        reference: component.sku.clone(),
                        name: component.name.clone(),
                        quantity: *quantity,
                        unit_cost: child.raw_total,
                        line_cost,
                    });
                    issues.extend(child.breakdown.issues);
                }
                None => {
                    debug!(sku = %product_sku, "recipe line references unknown product");
                    issues.push(CostIssue::MissingComponent {
                        sku: product_sku.clone(),
                    });
                }
            },
        }
    }

    total
}
