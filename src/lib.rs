//! Filigree: jewelry manufacturing costing core
//!
//! Computes authoritative manufacturing costs for jewelry products built
//! from raw materials, sub-assemblies, and labor steps, decodes compact
//! alphanumeric product codes into finish/stone/structural attributes,
//! and audits whether purchased goods are fairly priced against in-house
//! manufacture.
//!
//! Everything here is a synchronous pure function over immutable catalog
//! snapshots: no storage, no I/O, no caching. Callers re-invoke on any
//! input change; concurrent invocations need no locking.

pub mod core;
pub mod entities;

pub use crate::core::costing::{resolve_cost, Catalog, CostResult};
pub use crate::core::sku::{analyze_sku, decompose_suffix};
pub use crate::core::supplier::analyze_supplier_value;
pub use crate::core::variant::estimate_variant_cost;
pub use crate::entities::{Material, Product, Settings};
