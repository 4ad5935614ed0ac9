//! End-to-end properties of recipe resolution against the built-in catalog.

use std::collections::BTreeMap;
use std::thread;

use proptest::prelude::*;

use subnautica_calculator::{
    BillOfMaterials, Catalog, ItemId, Mode, RecipeNode, RecipeTree, Resolution, ResolveError,
    catalog, direct, expand, flatten, resolve,
};

// ── Helpers ────────────────────────────────────────────────────────────

fn builtin() -> &'static Catalog {
    catalog::builtin().expect("built-in catalog is valid")
}

fn craftable_ids() -> Vec<String> {
    builtin()
        .items()
        .iter()
        .filter(|item| !item.is_raw())
        .map(|item| item.id.to_string())
        .collect()
}

/// Every (item, quantity) leaf in a tree, in visit order
fn leaves(tree: &RecipeTree) -> Vec<(ItemId, u64)> {
    let mut out = Vec::new();
    for (id, node) in tree {
        match node {
            RecipeNode::Leaf(quantity) => out.push((id.clone(), *quantity)),
            RecipeNode::Branch { components, .. } => out.extend(leaves(components)),
        }
    }
    out
}

// ── Reference scenarios ────────────────────────────────────────────────────

#[test]
fn moonpool_bill_of_materials() {
    let bill = flatten(builtin(), "moonpool", 1).unwrap();
    let expected: BillOfMaterials = BTreeMap::from([
        (ItemId::from("titanium"), 20),
        (ItemId::from("creepvine_seed_cluster"), 1),
        (ItemId::from("lead"), 2),
    ]);
    assert_eq!(bill, expected);
}

#[test]
fn unknown_item_fails() {
    assert_eq!(
        resolve(builtin(), "not_an_item", Mode::Direct, 1),
        Err(ResolveError::UnknownItem("not_an_item".into()))
    );
}

#[test]
fn zero_and_negative_quantities_fail() {
    for quantity in [0, -1] {
        assert_eq!(
            resolve(builtin(), "moonpool", Mode::Flattened, quantity),
            Err(ResolveError::InvalidQuantity(quantity))
        );
    }
}

#[test]
fn raw_material_is_terminal() {
    assert_eq!(
        resolve(builtin(), "titanium", Mode::Expanded, 1).unwrap(),
        Resolution::Expanded(RecipeTree::new())
    );
    assert_eq!(
        resolve(builtin(), "titanium", Mode::Flattened, 1).unwrap(),
        Resolution::Flattened(BillOfMaterials::new())
    );
}

// ── Properties over the whole catalog ──────────────────────────────────

#[test]
fn direct_is_idempotent() {
    for id in craftable_ids() {
        assert_eq!(direct(builtin(), &id, 1), direct(builtin(), &id, 1), "{id}");
    }
}

#[test]
fn direct_matches_catalog_recipe() {
    let catalog = builtin();
    for id in craftable_ids() {
        let recipe = catalog.lookup_recipe(&id).unwrap();
        let resolved = direct(catalog, &id, 1).unwrap();
        assert_eq!(resolved.len(), recipe.len(), "{id}");
        for (component, &quantity) in recipe {
            assert_eq!(resolved[component], u64::from(quantity), "{id}/{component}");
        }
    }
}

#[test]
fn expanded_leaves_are_raw() {
    let catalog = builtin();
    for id in craftable_ids() {
        let tree = expand(catalog, &id, 1).unwrap();
        assert!(!tree.is_empty(), "{id}");
        for (leaf, _) in leaves(&tree) {
            assert!(catalog.item(leaf.as_str()).unwrap().is_raw(), "{id}: {leaf} is not raw");
        }
    }
}

#[test]
fn flattening_conserves_leaf_totals() {
    let catalog = builtin();
    for id in craftable_ids() {
        let tree = expand(catalog, &id, 1).unwrap();
        let mut summed: BillOfMaterials = BTreeMap::new();
        for (leaf, quantity) in leaves(&tree) {
            *summed.entry(leaf).or_default() += quantity;
        }
        assert_eq!(flatten(catalog, &id, 1).unwrap(), summed, "{id}");
    }
}

#[test]
fn concurrent_resolution_agrees() {
    let catalog = builtin();
    let expected: Vec<_> = craftable_ids()
        .iter()
        .map(|id| flatten(catalog, id, 3).unwrap())
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    craftable_ids()
                        .iter()
                        .map(|id| flatten(catalog, id, 3).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

proptest! {
    #[test]
    fn flattening_is_linear(index in 0usize..64, quantity in 1i64..10_000) {
        let ids = craftable_ids();
        let id = &ids[index % ids.len()];

        let single = flatten(builtin(), id, 1).unwrap();
        let scaled = flatten(builtin(), id, quantity).unwrap();

        prop_assert_eq!(scaled.len(), single.len());
        for (material, total) in &single {
            prop_assert_eq!(scaled[material], total * quantity as u64);
        }
    }

    #[test]
    fn expanded_roots_scale_linearly(index in 0usize..64, quantity in 1i64..1_000) {
        let ids = craftable_ids();
        let id = &ids[index % ids.len()];

        let single = expand(builtin(), id, 1).unwrap();
        let scaled = expand(builtin(), id, quantity).unwrap();

        for (component, node) in &single {
            prop_assert_eq!(scaled[component].quantity(), node.quantity() * quantity as u64);
        }
    }
}
