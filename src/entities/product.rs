//! Product entity type - Catalog items (manufactured or purchased)
//!
//! A product is identified by its master SKU and carries the recipe,
//! labor profile, and variants this crate prices. Products are authored
//! by the catalog-management surface; this crate only reads snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Make or buy decision for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ProductionStrategy {
    /// Cast and finished in-house; cost is rolled up from the recipe
    #[default]
    Manufactured,
    /// Bought finished from a supplier; cost is the purchase price
    Purchased,
}

impl std::fmt::Display for ProductionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductionStrategy::Manufactured => write!(f, "manufactured"),
            ProductionStrategy::Purchased => write!(f, "purchased"),
        }
    }
}

impl std::str::FromStr for ProductionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manufactured" => Ok(ProductionStrategy::Manufactured),
            "purchased" => Ok(ProductionStrategy::Purchased),
            _ => Err(format!(
                "Invalid production strategy: {}. Use 'manufactured' or 'purchased'",
                s
            )),
        }
    }
}

/// Plating / surface treatment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum PlatingCategory {
    /// Plain silver, no plating pass
    #[default]
    Silver,
    Gold,
    Platinum,
    RoseGold,
    /// Gold over silver, two finishing passes
    TwoTone,
    Oxidized,
}

impl std::fmt::Display for PlatingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatingCategory::Silver => write!(f, "silver"),
            PlatingCategory::Gold => write!(f, "gold"),
            PlatingCategory::Platinum => write!(f, "platinum"),
            PlatingCategory::RoseGold => write!(f, "rose_gold"),
            PlatingCategory::TwoTone => write!(f, "two_tone"),
            PlatingCategory::Oxidized => write!(f, "oxidized"),
        }
    }
}

impl PlatingCategory {
    /// Whether this category gets the formula-priced plating pass
    ///
    /// Gold and platinum finishes are plated at the per-gram rate from
    /// settings; two-tone is priced off its own manual channel instead,
    /// and the remaining treatments carry no plating labor.
    pub fn uses_plating_rate(&self) -> bool {
        matches!(self, PlatingCategory::Gold | PlatingCategory::Platinum)
    }
}

/// Gender scope of a product line
///
/// Selects which stone-code dictionary applies when decoding variant
/// suffixes; the two dictionaries partially overlap with conflicting
/// meanings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Men => write!(f, "men"),
            Gender::Women => write!(f, "women"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "men" => Ok(Gender::Men),
            "women" => Ok(Gender::Women),
            _ => Err(format!("Invalid gender scope: {}. Use 'men' or 'women'", s)),
        }
    }
}

/// One line of a product recipe
///
/// The recipe forms a directed graph over products; acyclicity is
/// enforced at cost-resolution time, never assumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecipeItem {
    /// A raw material line
    Raw {
        /// Material ID (MAT-...)
        material_id: String,
        /// Units consumed per piece built
        quantity: f64,
    },
    /// A nested sub-product line
    Component {
        /// Master SKU of the sub-product
        product_sku: String,
        /// Units consumed per piece built
        quantity: f64,
    },
}

/// One labor channel: an amount plus a manual-override flag
///
/// With `manual` set the amount is charged verbatim and the formula
/// default for the channel is suppressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LaborCharge {
    /// Charge amount (or manual rate, for the two-tone plating channel)
    #[serde(default)]
    pub amount: f64,

    /// Manual override flag
    #[serde(default)]
    pub manual: bool,
}

impl LaborCharge {
    /// Manual charge of the given amount
    pub fn manual(amount: f64) -> Self {
        Self {
            amount,
            manual: true,
        }
    }

    /// Resolve the channel against its formula default
    pub fn resolve(&self, formula_default: f64) -> f64 {
        if self.manual {
            self.amount
        } else {
            formula_default
        }
    }
}

/// Labor profile of a product - six independent channels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaborProfile {
    /// Casting the blank (formula: total weight x casting rate)
    #[serde(default)]
    pub casting: LaborCharge,

    /// Stone setting (no formula default)
    #[serde(default)]
    pub stone_setting: LaborCharge,

    /// Technician / bench work (formula: weight-tiered)
    #[serde(default)]
    pub technician: LaborCharge,

    /// Plating pass for gold/platinum finishes (formula: weight x plating rate)
    #[serde(default)]
    pub plating: LaborCharge,

    /// Two-tone plating rate, keyed to the secondary weight channel
    #[serde(default)]
    pub plating_secondary: LaborCharge,

    /// Subcontracted work (no formula default)
    #[serde(default)]
    pub subcontract: LaborCharge,
}

/// A variant of a product, identified by its suffix
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Variant {
    /// Variant suffix (finish + stone code + optional bridge marker)
    pub suffix: String,

    /// Sell price override for this variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<f64>,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Variant {
    /// Margin of the sell price over an estimated cost, if a price is set
    pub fn margin_against(&self, cost: f64) -> Option<f64> {
        self.sell_price.map(|p| p - cost)
    }
}

/// A Product entity - one catalog item, master SKU plus variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Master SKU
    pub sku: String,

    /// Product name
    pub name: String,

    /// Primary weight in grams
    #[serde(default)]
    pub weight_g: f64,

    /// Secondary weight in grams (two-tone items)
    #[serde(default)]
    pub secondary_weight_g: f64,

    /// Plating category of the master
    #[serde(default)]
    pub plating: PlatingCategory,

    /// Make or buy
    #[serde(default)]
    pub strategy: ProductionStrategy,

    /// Purchase price, for purchased products
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,

    /// Gender scope, selects the stone dictionary for suffix decoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    /// Bill of materials
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipe: Vec<RecipeItem>,

    /// Labor channels
    #[serde(default)]
    pub labor: LaborProfile,

    /// Known variants of this master
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this product)
    pub author: String,
}

impl Product {
    /// Create a new manufactured product with the given parameters
    pub fn new(sku: impl Into<String>, name: impl Into<String>, weight_g: f64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            weight_g,
            secondary_weight_g: 0.0,
            plating: PlatingCategory::default(),
            strategy: ProductionStrategy::Manufactured,
            purchase_price: None,
            gender: None,
            recipe: Vec::new(),
            labor: LaborProfile::default(),
            variants: Vec::new(),
            created: Utc::now(),
            author: String::new(),
        }
    }

    /// Create a new purchased product with the given purchase price
    pub fn new_purchased(
        sku: impl Into<String>,
        name: impl Into<String>,
        weight_g: f64,
        purchase_price: f64,
    ) -> Self {
        let mut p = Self::new(sku, name, weight_g);
        p.strategy = ProductionStrategy::Purchased;
        p.purchase_price = Some(purchase_price);
        p
    }

    /// Total weight across both channels
    pub fn total_weight(&self) -> f64 {
        self.weight_g + self.secondary_weight_g
    }

    /// Find a variant by its suffix
    pub fn variant(&self, suffix: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.suffix == suffix)
    }
}
