//! Recipe resolution: direct recipes, expanded recipe trees and flattened
//! bills of materials

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ResolveError;
use crate::models::{BillOfMaterials, ItemId, Mode, RecipeNode, RecipeTree, Resolution, Total};

/// Resolve `quantity` units of `item` in the given mode.
///
/// Raw materials resolve to an empty result in every mode. Every quantity in
/// the result scales linearly with `quantity`, which must be at least 1.
pub fn resolve(
    catalog: &Catalog,
    item: &str,
    mode: Mode,
    quantity: i64,
) -> Result<Resolution, ResolveError> {
    Ok(match mode {
        Mode::Direct => Resolution::Direct(direct(catalog, item, quantity)?),
        Mode::Expanded => Resolution::Expanded(expand(catalog, item, quantity)?),
        Mode::Flattened => Resolution::Flattened(flatten(catalog, item, quantity)?),
    })
}

/// One-level recipe for `quantity` units
pub fn direct(
    catalog: &Catalog,
    item: &str,
    quantity: i64,
) -> Result<BillOfMaterials, ResolveError> {
    match prepare(catalog, item, Mode::Direct, quantity)? {
        Some((id, times)) => direct_scaled(catalog, id, times),
        None => Ok(BillOfMaterials::new()),
    }
}

/// Recipe tree expanded down to raw materials for `quantity` units
pub fn expand(catalog: &Catalog, item: &str, quantity: i64) -> Result<RecipeTree, ResolveError> {
    match prepare(catalog, item, Mode::Expanded, quantity)? {
        Some((id, times)) => expand_scaled(catalog, id, times),
        None => Ok(RecipeTree::new()),
    }
}

/// Summed raw materials for `quantity` units
pub fn flatten(
    catalog: &Catalog,
    item: &str,
    quantity: i64,
) -> Result<BillOfMaterials, ResolveError> {
    match prepare(catalog, item, Mode::Flattened, quantity)? {
        Some((id, times)) => flatten_tree(&expand_scaled(catalog, id, times)?),
        None => Ok(BillOfMaterials::new()),
    }
}

/// Validate the request; `None` means the item is raw and resolves empty
fn prepare<'a>(
    catalog: &'a Catalog,
    item: &str,
    mode: Mode,
    quantity: i64,
) -> Result<Option<(&'a ItemId, Total)>, ResolveError> {
    let times = multiplier(quantity)?;
    let target = catalog.item(item)?;
    debug!(item = %target.id, ?mode, quantity, "resolving");
    Ok((!target.is_raw()).then_some((&target.id, times)))
}

fn multiplier(quantity: i64) -> Result<Total, ResolveError> {
    if quantity < 1 {
        return Err(ResolveError::InvalidQuantity(quantity));
    }
    Ok(quantity as Total)
}

fn scale(per_unit: Total, times: Total, component: &ItemId) -> Result<Total, ResolveError> {
    per_unit
        .checked_mul(times)
        .ok_or_else(|| ResolveError::QuantityOverflow(component.clone()))
}

fn direct_scaled(
    catalog: &Catalog,
    item: &ItemId,
    times: Total,
) -> Result<BillOfMaterials, ResolveError> {
    catalog
        .lookup_recipe(item.as_str())?
        .iter()
        .map(|(component, &per_unit)| {
            Ok((component.clone(), scale(Total::from(per_unit), times, component)?))
        })
        .collect()
}

fn expand_scaled(
    catalog: &Catalog,
    item: &ItemId,
    times: Total,
) -> Result<RecipeTree, ResolveError> {
    let mut path = Vec::new();
    expand_recursive(catalog, item, times, &mut path)
}

fn expand_recursive(
    catalog: &Catalog,
    item: &ItemId,
    times: Total,
    path: &mut Vec<ItemId>,
) -> Result<RecipeTree, ResolveError> {
    if let Some(start) = path.iter().position(|seen| seen == item) {
        let mut cycle = path[start..].to_vec();
        cycle.push(item.clone());
        return Err(ResolveError::CyclicRecipe { path: cycle });
    }

    let recipe = catalog.lookup_recipe(item.as_str())?;
    path.push(item.clone());

    let mut tree = RecipeTree::new();
    for (component, &per_unit) in recipe {
        let quantity = scale(Total::from(per_unit), times, component)?;
        let node = if catalog.item(component.as_str())?.is_raw() {
            RecipeNode::Leaf(quantity)
        } else {
            RecipeNode::Branch {
                quantity,
                components: expand_recursive(catalog, component, quantity, path)?,
            }
        };
        tree.insert(component.clone(), node);
    }

    path.pop();
    Ok(tree)
}

/// Sum every leaf of an expanded tree per item
pub fn flatten_tree(tree: &RecipeTree) -> Result<BillOfMaterials, ResolveError> {
    let mut bill = BillOfMaterials::new();
    collect_leaves(tree, &mut bill)?;
    Ok(bill)
}

fn collect_leaves(tree: &RecipeTree, bill: &mut BillOfMaterials) -> Result<(), ResolveError> {
    for (id, node) in tree {
        match node {
            RecipeNode::Leaf(quantity) => add(bill, id, *quantity)?,
            RecipeNode::Branch { components, .. } => collect_leaves(components, bill)?,
        }
    }
    Ok(())
}

fn add(bill: &mut BillOfMaterials, id: &ItemId, quantity: Total) -> Result<(), ResolveError> {
    let total = bill.entry(id.clone()).or_default();
    *total = total
        .checked_add(quantity)
        .ok_or_else(|| ResolveError::QuantityOverflow(id.clone()))?;
    Ok(())
}

fn display_name<'a>(catalog: &'a Catalog, id: &'a ItemId) -> &'a str {
    catalog
        .item(id.as_str())
        .map(|item| item.name.as_str())
        .unwrap_or(id.as_str())
}

/// Format an expanded recipe tree as an indented list
pub fn format_recipe_tree(catalog: &Catalog, tree: &RecipeTree, indent: usize) -> String {
    let mut output = String::new();
    let prefix = "  ".repeat(indent);

    for (id, node) in tree {
        match node {
            RecipeNode::Leaf(quantity) => {
                output.push_str(&format!(
                    "{}{}x {}\n",
                    prefix,
                    quantity,
                    display_name(catalog, id)
                ));
            }
            RecipeNode::Branch {
                quantity,
                components,
            } => {
                output.push_str(&format!(
                    "{}{}x {} (crafted)\n",
                    prefix,
                    quantity,
                    display_name(catalog, id)
                ));
                output.push_str(&format_recipe_tree(catalog, components, indent + 1));
            }
        }
    }

    output
}

/// Format a bill of materials, one material per line
pub fn format_bill(catalog: &Catalog, bill: &BillOfMaterials) -> String {
    let mut lines: Vec<_> = bill
        .iter()
        .map(|(id, quantity)| (display_name(catalog, id), *quantity))
        .collect();
    lines.sort_by(|a, b| a.0.cmp(b.0));

    let mut output = String::new();
    for (name, quantity) in lines {
        output.push_str(&format!("  {:>5}x {}\n", quantity, name));
    }
    output
}

/// Aggregate of several selected items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub selections: Vec<(String, Total)>,
    pub materials: Vec<(String, Total)>,
    pub bill: BillOfMaterials,
    pub structural_integrity: f64,
    pub power_output: Total,
}

/// Combine the flattened bills of every selection.
///
/// Selections of the same item are merged. Structural integrity and power
/// output are plain sums of each piece's attribute times its count.
pub fn plan(catalog: &Catalog, selections: &[(ItemId, i64)]) -> Result<PlanSummary, ResolveError> {
    let mut counts: BTreeMap<ItemId, Total> = BTreeMap::new();
    for (id, quantity) in selections {
        let times = multiplier(*quantity)?;
        let item = catalog.item(id.as_str())?;
        let count = counts.entry(item.id.clone()).or_default();
        *count = count
            .checked_add(times)
            .ok_or_else(|| ResolveError::QuantityOverflow(item.id.clone()))?;
    }

    let mut bill = BillOfMaterials::new();
    let mut structural_integrity = 0.0;
    let mut power_output: Total = 0;

    for (id, &count) in &counts {
        let item = catalog.item(id.as_str())?;
        if !item.is_raw() {
            let tree = expand_scaled(catalog, id, count)?;
            collect_leaves(&tree, &mut bill)?;
        }
        if let Some(si) = item.category.structural_integrity() {
            structural_integrity += si * count as f64;
        }
        if let Some(watts) = item.category.power_output() {
            power_output = Total::from(watts)
                .checked_mul(count)
                .and_then(|watts| power_output.checked_add(watts))
                .ok_or_else(|| ResolveError::QuantityOverflow(item.id.clone()))?;
        }
    }
    debug!(selections = counts.len(), materials = bill.len(), "plan built");

    let mut selection_list: Vec<_> = counts
        .iter()
        .map(|(id, count)| (display_name(catalog, id).to_string(), *count))
        .collect();
    selection_list.sort_by(|a, b| a.0.cmp(&b.0));

    let mut material_list: Vec<_> = bill
        .iter()
        .map(|(id, quantity)| (display_name(catalog, id).to_string(), *quantity))
        .collect();
    material_list.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(PlanSummary {
        selections: selection_list,
        materials: material_list,
        bill,
        structural_integrity,
        power_output,
    })
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Base Plan ===")?;
        writeln!(f)?;

        writeln!(f, "Selected:")?;
        for (name, count) in &self.selections {
            writeln!(f, "  {:>5}x {}", count, name)?;
        }
        writeln!(f)?;

        writeln!(f, "Materials required:")?;
        for (name, quantity) in &self.materials {
            writeln!(f, "  {:>5}x {}", quantity, name)?;
        }
        writeln!(f)?;

        writeln!(f, "Structural integrity: {:+.2}", self.structural_integrity)?;
        writeln!(f, "Power output:         {}", self.power_output)?;

        Ok(())
    }
}
