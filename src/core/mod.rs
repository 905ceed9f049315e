//! Core module - the costing and code-analysis components

pub mod codes;
pub mod costing;
pub mod labor;
pub mod rounding;
pub mod sku;
pub mod supplier;
pub mod variant;

pub use codes::{FinishCode, StoneCode, BRIDGE_MARKER, FINISH_CODES, MEN_STONES, WOMEN_STONES};
pub use costing::{
    resolve_cost, Catalog, CostBreakdown, CostIssue, CostLine, CostResult, MAX_DEPTH,
};
pub use rounding::{format_money, round_display};
pub use sku::{analyze_sku, decompose_suffix, SkuAnalysis, SuffixError, SuffixParts};
pub use supplier::{
    analyze_supplier_value, EfficiencyVerdict, ReportedLabor, SupplierAnalysis, ValueVerdict,
};
pub use variant::estimate_variant_cost;
