//! Item catalog and recipe table
//!
//! A [`Catalog`] is validated once on construction and is read-only after
//! that. Every lookup takes `&self`, so one catalog can be shared between
//! threads without locking.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use tracing::debug;

use crate::data;
use crate::error::{CatalogError, ResolveError};
use crate::models::{Item, ItemId, Recipe, Section};

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
    recipes: BTreeMap<ItemId, Recipe>,
}

impl Catalog {
    /// Build a catalog, checking that:
    /// - item ids are unique
    /// - every craftable item has a recipe and no raw material has one
    /// - every recipe key and component is registered, with a non-zero count
    ///
    /// Recipe cycles are not checked here; the resolver reports them.
    pub fn new(items: Vec<Item>, recipes: BTreeMap<ItemId, Recipe>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateItem(item.id.clone()));
            }
        }

        for (target, recipe) in &recipes {
            let Some(&i) = index.get(target) else {
                return Err(CatalogError::UnknownRecipeTarget(target.clone()));
            };
            if items[i].is_raw() {
                return Err(CatalogError::RawMaterialWithRecipe(target.clone()));
            }
            for (component, &quantity) in recipe {
                if !index.contains_key(component) {
                    return Err(CatalogError::UnregisteredItem {
                        recipe: target.clone(),
                        component: component.clone(),
                    });
                }
                if quantity == 0 {
                    return Err(CatalogError::ZeroQuantity {
                        recipe: target.clone(),
                        component: component.clone(),
                    });
                }
            }
        }

        if let Some(item) = items
            .iter()
            .find(|item| !item.is_raw() && !recipes.contains_key(&item.id))
        {
            return Err(CatalogError::MissingRecipe(item.id.clone()));
        }

        debug!(items = items.len(), recipes = recipes.len(), "catalog built");
        Ok(Self {
            items,
            index,
            recipes,
        })
    }

    pub fn item(&self, id: &str) -> Result<&Item, ResolveError> {
        self.index
            .get(id)
            .map(|&i| &self.items[i])
            .ok_or_else(|| ResolveError::UnknownItem(ItemId::from(id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Direct recipe for an item.
    ///
    /// Raw materials fail with [`ResolveError::NoRecipe`] rather than
    /// returning an empty recipe.
    pub fn lookup_recipe(&self, id: &str) -> Result<&Recipe, ResolveError> {
        let item = self.item(id)?;
        if item.is_raw() {
            return Err(ResolveError::NoRecipe(item.id.clone()));
        }
        self.recipes
            .get(id)
            .ok_or_else(|| ResolveError::UnknownItem(item.id.clone()))
    }

    /// Look an item up by id or by display name, ignoring case and
    /// treating spaces, dashes and underscores alike
    pub fn find(&self, query: &str) -> Result<&Item, ResolveError> {
        if let Ok(item) = self.item(query) {
            return Ok(item);
        }
        let wanted = normalize(query);
        self.items
            .iter()
            .find(|item| normalize(&item.name) == wanted || normalize(item.id.as_str()) == wanted)
            .ok_or_else(|| ResolveError::UnknownItem(ItemId::from(query)))
    }

    /// Items in definition order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn section(&self, section: Section) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |item| item.section == Some(section))
    }

    pub fn recipes(&self) -> &BTreeMap<ItemId, Recipe> {
        &self.recipes
    }

    /// Items whose direct recipe lists `id` as a component
    pub fn used_in(&self, id: &str) -> Vec<&ItemId> {
        self.recipes
            .iter()
            .filter(|(_, recipe)| recipe.contains_key(id))
            .map(|(target, _)| target)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

static BUILTIN: OnceLock<Result<Catalog, CatalogError>> = OnceLock::new();

/// The embedded game catalog, built on first use
pub fn builtin() -> Result<&'static Catalog, CatalogError> {
    BUILTIN
        .get_or_init(|| Catalog::new(data::items(), data::recipes()))
        .as_ref()
        .map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemCategory;

    fn tiny() -> (Vec<Item>, BTreeMap<ItemId, Recipe>) {
        let items = vec![
            Item::new("quartz", "Quartz", ItemCategory::RawMaterial),
            Item::new("glass", "Glass", ItemCategory::ConstructedMaterial),
        ];
        let mut recipes = BTreeMap::new();
        recipes.insert(ItemId::from("glass"), Recipe::from([(ItemId::from("quartz"), 2)]));
        (items, recipes)
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin().unwrap();
        assert!(catalog.len() > 70);
        assert!(catalog.contains("moonpool"));
    }

    #[test]
    fn lookup_recipe_returns_direct_recipe() {
        let catalog = builtin().unwrap();
        let recipe = catalog.lookup_recipe("plasteel_ingot").unwrap();
        assert_eq!(recipe.get("titanium_ingot"), Some(&1));
        assert_eq!(recipe.get("lithium"), Some(&2));
        assert_eq!(recipe.len(), 2);
    }

    #[test]
    fn lookup_recipe_errors() {
        let catalog = builtin().unwrap();
        assert_eq!(
            catalog.lookup_recipe("titanium"),
            Err(ResolveError::NoRecipe("titanium".into()))
        );
        assert_eq!(
            catalog.lookup_recipe("cyclops"),
            Err(ResolveError::UnknownItem("cyclops".into()))
        );
    }

    #[test]
    fn find_matches_display_names() {
        let catalog = builtin().unwrap();
        assert_eq!(catalog.find("Moonpool").unwrap().id.as_str(), "moonpool");
        assert_eq!(catalog.find("I-compartment").unwrap().id.as_str(), "i_compartment");
        assert_eq!(catalog.find("medkit fabricator").unwrap().id.as_str(), "med_kit_fabricator");
        assert!(catalog.find("Cyclops").is_err());
    }

    #[test]
    fn sections_match_ui_groups() {
        let catalog = builtin().unwrap();
        assert_eq!(catalog.section(Section::BasePieces).count(), 16);
        assert_eq!(catalog.section(Section::PowerSources).count(), 5);
        assert_eq!(catalog.section(Section::InteriorPieces).count(), 4);
        assert_eq!(catalog.section(Section::InteriorModules).count(), 12);
        assert_eq!(catalog.section(Section::ExteriorPieces).count(), 4);
    }

    #[test]
    fn used_in_lists_consumers() {
        let catalog = builtin().unwrap();
        let users = catalog.used_in("aerogel");
        let users: Vec<&str> = users.iter().map(|id| id.as_str()).collect();
        assert_eq!(users, ["prawn_suit", "thermal_plant", "water_filtration_pump"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let (mut items, recipes) = tiny();
        items.push(Item::new("quartz", "Quartz again", ItemCategory::RawMaterial));
        assert_eq!(
            Catalog::new(items, recipes).unwrap_err(),
            CatalogError::DuplicateItem("quartz".into())
        );
    }

    #[test]
    fn rejects_missing_recipe() {
        let (mut items, recipes) = tiny();
        items.push(Item::new("window", "Window", ItemCategory::BasePiece {
            structural_integrity: -1.0,
        }));
        assert_eq!(
            Catalog::new(items, recipes).unwrap_err(),
            CatalogError::MissingRecipe("window".into())
        );
    }

    #[test]
    fn rejects_recipe_on_raw_material() {
        let (items, mut recipes) = tiny();
        recipes.insert("quartz".into(), Recipe::from([(ItemId::from("glass"), 1)]));
        assert_eq!(
            Catalog::new(items, recipes).unwrap_err(),
            CatalogError::RawMaterialWithRecipe("quartz".into())
        );
    }

    #[test]
    fn rejects_unregistered_component() {
        let (items, mut recipes) = tiny();
        recipes.insert("glass".into(), Recipe::from([(ItemId::from("sand"), 3)]));
        assert_eq!(
            Catalog::new(items, recipes).unwrap_err(),
            CatalogError::UnregisteredItem {
                recipe: "glass".into(),
                component: "sand".into(),
            }
        );
    }

    #[test]
    fn rejects_recipe_for_unregistered_item() {
        let (items, mut recipes) = tiny();
        recipes.insert("cyclops".into(), Recipe::from([(ItemId::from("glass"), 4)]));
        let err = Catalog::new(items, recipes).unwrap_err();
        assert_eq!(err, CatalogError::UnknownRecipeTarget("cyclops".into()));
        assert_eq!(err.to_string(), "recipe given for unregistered item cyclops");
    }

    #[test]
    fn rejects_zero_quantity() {
        let (items, mut recipes) = tiny();
        recipes.insert("glass".into(), Recipe::from([(ItemId::from("quartz"), 0)]));
        assert_eq!(
            Catalog::new(items, recipes).unwrap_err(),
            CatalogError::ZeroQuantity {
                recipe: "glass".into(),
                component: "quartz".into(),
            }
        );
    }
}
