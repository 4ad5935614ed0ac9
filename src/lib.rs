//! Subnautica base-building calculator
//!
//! Resolves building pieces, materials and vehicles into the raw materials
//! needed to craft them.

pub mod calculator;
pub mod catalog;
pub mod data;
pub mod db;
pub mod error;
pub mod models;

pub use calculator::{PlanSummary, direct, expand, flatten, plan, resolve};
pub use catalog::Catalog;
pub use error::{CatalogError, ResolveError};
pub use models::{
    BillOfMaterials, Item, ItemCategory, ItemId, Mode, Recipe, RecipeNode, RecipeTree, Resolution,
};
