//! Material entity type - Raw inputs consumed by product recipes

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit of measure for a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum UnitOfMeasure {
    #[default]
    Piece,
    Gram,
    Strand,
    Pair,
    Meter,
}

impl std::fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitOfMeasure::Piece => write!(f, "piece"),
            UnitOfMeasure::Gram => write!(f, "gram"),
            UnitOfMeasure::Strand => write!(f, "strand"),
            UnitOfMeasure::Pair => write!(f, "pair"),
            UnitOfMeasure::Meter => write!(f, "meter"),
        }
    }
}

impl std::str::FromStr for UnitOfMeasure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "piece" => Ok(UnitOfMeasure::Piece),
            "gram" => Ok(UnitOfMeasure::Gram),
            "strand" => Ok(UnitOfMeasure::Strand),
            "pair" => Ok(UnitOfMeasure::Pair),
            "meter" => Ok(UnitOfMeasure::Meter),
            _ => Err(format!(
                "Invalid unit of measure: {}. Use piece, gram, strand, pair, or meter",
                s
            )),
        }
    }
}

/// Strand packaging for stones bought by the strand
///
/// Stones sold strung on a strand are priced per strand; the effective
/// per-stone cost is the strand price divided by the stone count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrandPackaging {
    /// Price of one full strand
    pub strand_price: f64,

    /// Number of usable stones per strand
    pub stones_per_strand: u32,
}

/// A Material entity - raw input consumed by recipes
///
/// Materials are authored by the catalog-management surface; this crate
/// only reads snapshots of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier
    pub id: String,

    /// Material name
    pub name: String,

    /// Base cost per unit
    #[serde(default)]
    pub unit_cost: f64,

    /// Unit of measure
    #[serde(default)]
    pub unit: UnitOfMeasure,

    /// Per-stone-code unit price overrides (stone code -> unit price)
    ///
    /// Applied when a variant's stone code matches; see
    /// [`Material::effective_unit_cost`].
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub stone_overrides: HashMap<String, f64>,

    /// Strand packaging, for materials bought by the strand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strand: Option<StrandPackaging>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this material)
    pub author: String,
}

impl Material {
    /// Create a new material with the given parameters
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_cost: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_cost,
            unit: UnitOfMeasure::default(),
            stone_overrides: HashMap::new(),
            strand: None,
            created: Utc::now(),
            author: String::new(),
        }
    }

    /// Base per-unit cost before any stone-code override
    ///
    /// Strand-packaged materials derive it from the strand price; a zero
    /// stone count falls back to `unit_cost`.
    pub fn base_unit_cost(&self) -> f64 {
        match &self.strand {
            Some(s) if s.stones_per_strand > 0 => s.strand_price / s.stones_per_strand as f64,
            _ => self.unit_cost,
        }
    }

    /// Effective per-unit cost for an optional stone-code context
    ///
    /// The override for the stone code wins if present, otherwise the base
    /// cost applies.
    pub fn effective_unit_cost(&self, stone_code: Option<&str>) -> f64 {
        if let Some(code) = stone_code {
            if let Some(price) = self.stone_overrides.get(code) {
                return *price;
            }
        }
        self.base_unit_cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_creation() {
        let mat = Material::new("MAT-001", "Silver wire 0.8mm", 1.25);

        assert_eq!(mat.id, "MAT-001");
        assert_eq!(mat.name, "Silver wire 0.8mm");
        assert_eq!(mat.unit_cost, 1.25);
        assert_eq!(mat.unit, UnitOfMeasure::Piece);
        assert!(mat.stone_overrides.is_empty());
    }

    #[test]
    fn test_effective_cost_without_override() {
        let mat = Material::new("MAT-002", "Zircon 3mm", 0.40);
        assert_eq!(mat.effective_unit_cost(None), 0.40);
        assert_eq!(mat.effective_unit_cost(Some("ON")), 0.40);
    }

    #[test]
    fn test_effective_cost_with_override() {
        let mut mat = Material::new("MAT-003", "Cabochon 8mm", 3.0);
        mat.stone_overrides.insert("LA".to_string(), 5.0);

        assert_eq!(mat.effective_unit_cost(Some("LA")), 5.0);
        assert_eq!(mat.effective_unit_cost(Some("ON")), 3.0);
        assert_eq!(mat.effective_unit_cost(None), 3.0);
    }

    #[test]
    fn test_strand_packaging_unit_cost() {
        let mut mat = Material::new("MAT-004", "Pearl strand 6mm", 0.0);
        mat.unit = UnitOfMeasure::Strand;
        mat.strand = Some(StrandPackaging {
            strand_price: 24.0,
            stones_per_strand: 60,
        });

        assert!((mat.base_unit_cost() - 0.40).abs() < 1e-9);
        assert!((mat.effective_unit_cost(None) - 0.40).abs() < 1e-9);
    }

    #[test]
    fn test_strand_with_zero_count_falls_back() {
        let mut mat = Material::new("MAT-005", "Bad strand", 2.0);
        mat.strand = Some(StrandPackaging {
            strand_price: 24.0,
            stones_per_strand: 0,
        });

        assert_eq!(mat.base_unit_cost(), 2.0);
    }

    #[test]
    fn test_override_beats_strand_price() {
        let mut mat = Material::new("MAT-006", "Mixed strand", 0.0);
        mat.strand = Some(StrandPackaging {
            strand_price: 30.0,
            stones_per_strand: 50,
        });
        mat.stone_overrides.insert("PE".to_string(), 1.10);

        assert!((mat.effective_unit_cost(Some("PE")) - 1.10).abs() < 1e-9);
        assert!((mat.effective_unit_cost(Some("CO")) - 0.60).abs() < 1e-9);
    }

    #[test]
    fn test_material_roundtrip() {
        let mut mat = Material::new("MAT-007", "Turquoise 4mm", 0.80);
        mat.unit = UnitOfMeasure::Gram;
        mat.stone_overrides.insert("TUR".to_string(), 0.95);

        let yaml = serde_yml::to_string(&mat).unwrap();
        let parsed: Material = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(mat.id, parsed.id);
        assert_eq!(mat.unit, parsed.unit);
        assert_eq!(parsed.stone_overrides.get("TUR"), Some(&0.95));
    }

    #[test]
    fn test_unit_serialization() {
        let mut mat = Material::new("MAT-008", "Chain", 0.15);
        mat.unit = UnitOfMeasure::Meter;

        let yaml = serde_yml::to_string(&mat).unwrap();
        assert!(yaml.contains("unit: meter"));
    }
}
