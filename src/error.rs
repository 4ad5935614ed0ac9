//! Error types for catalog construction and recipe resolution

use thiserror::Error;

use crate::models::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("{0} is a raw material and has no recipe")]
    NoRecipe(ItemId),

    #[error("invalid quantity {0}: must be a positive integer")]
    InvalidQuantity(i64),

    #[error("cyclic recipe: {}", format_path(.path))]
    CyclicRecipe { path: Vec<ItemId> },

    #[error("quantity overflow while resolving {0}")]
    QuantityOverflow(ItemId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate item id: {0}")]
    DuplicateItem(ItemId),

    #[error("{0} is craftable but has no recipe")]
    MissingRecipe(ItemId),

    #[error("{0} is a raw material but has a recipe")]
    RawMaterialWithRecipe(ItemId),

    #[error("recipe given for unregistered item {0}")]
    UnknownRecipeTarget(ItemId),

    #[error("recipe {recipe} references unregistered item {component}")]
    UnregisteredItem { recipe: ItemId, component: ItemId },

    #[error("recipe {recipe} requires zero of {component}")]
    ZeroQuantity { recipe: ItemId, component: ItemId },
}

fn format_path(path: &[ItemId]) -> String {
    path.iter()
        .map(ItemId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
