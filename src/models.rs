//! Data models for catalog items, recipes and resolution results

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Recipe component count for one unit of the crafted item
pub type Quantity = u32;

/// Summed quantity in expanded and flattened results
pub type Total = u64;

/// Stable catalog key, e.g. `titanium_ingot`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of thing an item is, with the per-kind attributes as payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemCategory {
    RawMaterial,
    ConstructedMaterial,
    BasePiece { structural_integrity: f64 },
    PowerPiece { power_output: u32 },
    BuildingPiece,
    Vehicle,
}

impl ItemCategory {
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::RawMaterial)
    }

    /// Short tag used for storage and listings
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RawMaterial => "raw_material",
            Self::ConstructedMaterial => "constructed_material",
            Self::BasePiece { .. } => "base_piece",
            Self::PowerPiece { .. } => "power_piece",
            Self::BuildingPiece => "building_piece",
            Self::Vehicle => "vehicle",
        }
    }

    /// Rebuild a category from its tag and the optional payload columns.
    /// Missing payloads default to zero.
    pub fn from_kind(
        kind: &str,
        structural_integrity: Option<f64>,
        power_output: Option<u32>,
    ) -> Option<Self> {
        Some(match kind {
            "raw_material" => Self::RawMaterial,
            "constructed_material" => Self::ConstructedMaterial,
            "base_piece" => Self::BasePiece {
                structural_integrity: structural_integrity.unwrap_or(0.0),
            },
            "power_piece" => Self::PowerPiece {
                power_output: power_output.unwrap_or(0),
            },
            "building_piece" => Self::BuildingPiece,
            "vehicle" => Self::Vehicle,
            _ => return None,
        })
    }

    pub fn structural_integrity(&self) -> Option<f64> {
        match self {
            Self::BasePiece {
                structural_integrity,
            } => Some(*structural_integrity),
            _ => None,
        }
    }

    pub fn power_output(&self) -> Option<u32> {
        match self {
            Self::PowerPiece { power_output } => Some(*power_output),
            _ => None,
        }
    }
}

/// UI grouping of placeable items
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    BasePieces,
    PowerSources,
    InteriorPieces,
    InteriorModules,
    ExteriorPieces,
}

impl Section {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::BasePieces => "Base Pieces",
            Self::PowerSources => "Power Sources",
            Self::InteriorPieces => "Interior Pieces",
            Self::InteriorModules => "Interior Modules",
            Self::ExteriorPieces => "Exterior Pieces",
        }
    }

    pub fn all() -> &'static [Section] {
        &[
            Self::BasePieces,
            Self::PowerSources,
            Self::InteriorPieces,
            Self::InteriorModules,
            Self::ExteriorPieces,
        ]
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::BasePieces => "base_pieces",
            Self::PowerSources => "power_sources",
            Self::InteriorPieces => "interior_pieces",
            Self::InteriorModules => "interior_modules",
            Self::ExteriorPieces => "exterior_pieces",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub section: Option<Section>,
}

impl Item {
    pub fn new(id: &str, name: &str, category: ItemCategory) -> Self {
        Self {
            id: ItemId::from(id),
            name: name.to_string(),
            category,
            section: None,
        }
    }

    pub fn in_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    pub fn is_raw(&self) -> bool {
        self.category.is_raw()
    }
}

/// One-level recipe: component -> quantity for one unit of the target
pub type Recipe = BTreeMap<ItemId, Quantity>;

/// Flattened totals: item -> summed quantity across all branches
pub type BillOfMaterials = BTreeMap<ItemId, Total>;

/// Fully expanded recipe, keyed by component
pub type RecipeTree = BTreeMap<ItemId, RecipeNode>;

/// A component inside an expanded recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeNode {
    /// Raw material at the bottom of the tree
    Leaf(Total),
    /// Crafted component, already scaled by `quantity`
    Branch {
        quantity: Total,
        components: RecipeTree,
    },
}

impl RecipeNode {
    pub fn quantity(&self) -> Total {
        match self {
            Self::Leaf(quantity) | Self::Branch { quantity, .. } => *quantity,
        }
    }
}

/// How far `calculator::resolve` expands a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Direct,
    Expanded,
    #[default]
    Flattened,
}

/// Result of a resolution, shaped by the requested mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "result", rename_all = "snake_case")]
pub enum Resolution {
    Direct(BillOfMaterials),
    Expanded(RecipeTree),
    Flattened(BillOfMaterials),
}

impl Resolution {
    pub fn empty(mode: Mode) -> Self {
        match mode {
            Mode::Direct => Self::Direct(BillOfMaterials::new()),
            Mode::Expanded => Self::Expanded(RecipeTree::new()),
            Mode::Flattened => Self::Flattened(BillOfMaterials::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Direct(map) | Self::Flattened(map) => map.is_empty(),
            Self::Expanded(tree) => tree.is_empty(),
        }
    }
}
