//! Entity type definitions

pub mod material;
pub mod product;
pub mod settings;

pub use material::{Material, StrandPackaging, UnitOfMeasure};
pub use product::{
    Gender, LaborCharge, LaborProfile, PlatingCategory, Product, ProductionStrategy, RecipeItem,
    Variant,
};
pub use settings::Settings;
