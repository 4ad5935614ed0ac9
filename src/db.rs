//! SQLite store for catalog data

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use tracing::info;

use crate::catalog::Catalog;
use crate::models::{Item, ItemCategory, ItemId, Quantity, Recipe, Section};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Catalog items; payload columns are only set for their category
        CREATE TABLE IF NOT EXISTS items (
            position INTEGER NOT NULL,
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            section TEXT,
            structural_integrity REAL,
            power_output INTEGER
        );

        -- Direct recipe of each craftable item
        CREATE TABLE IF NOT EXISTS recipe_components (
            item_id TEXT NOT NULL,
            component_id TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            PRIMARY KEY (item_id, component_id)
        );

        CREATE INDEX IF NOT EXISTS idx_recipe_components_component
            ON recipe_components(component_id);
        "#,
    )?;
    Ok(())
}

/// Insert or replace an item
pub fn upsert_item(conn: &Connection, position: usize, item: &Item) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO items
             (position, id, name, category, section, structural_integrity, power_output)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        (
            position as i64,
            item.id.as_str(),
            &item.name,
            item.category.kind(),
            item.section.map(Section::key),
            item.category.structural_integrity(),
            item.category.power_output(),
        ),
    )?;
    Ok(())
}

/// Insert or replace one recipe component
pub fn upsert_component(
    conn: &Connection,
    item_id: &ItemId,
    component_id: &ItemId,
    quantity: Quantity,
) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO recipe_components (item_id, component_id, quantity)
         VALUES (?1, ?2, ?3)",
        (item_id.as_str(), component_id.as_str(), quantity),
    )?;
    Ok(())
}

/// Clear all catalog data
pub fn clear_catalog(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM recipe_components;
        DELETE FROM items;
        "#,
    )?;
    Ok(())
}

/// Replace the stored catalog with `catalog`, in one transaction
pub fn store_catalog(conn: &mut Connection, catalog: &Catalog) -> Result<()> {
    let tx = conn.transaction()?;
    clear_catalog(&tx)?;

    for (position, item) in catalog.items().iter().enumerate() {
        upsert_item(&tx, position, item)?;
    }
    for (item_id, recipe) in catalog.recipes() {
        for (component_id, &quantity) in recipe {
            upsert_component(&tx, item_id, component_id, quantity)?;
        }
    }

    tx.commit()?;
    info!(items = catalog.len(), "catalog stored");
    Ok(())
}

/// List all stored items in catalog order
pub fn list_items(conn: &Connection) -> Result<Vec<Item>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category, section, structural_integrity, power_output
         FROM items ORDER BY position",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<f64>>(4)?,
            row.get::<_, Option<u32>>(5)?,
        ))
    })?;

    let mut results = Vec::new();
    for row in rows {
        let (id, name, kind, section, structural_integrity, power_output) = row?;
        let category = ItemCategory::from_kind(&kind, structural_integrity, power_output)
            .ok_or_else(|| anyhow!("item {} has unknown category '{}'", id, kind))?;
        let section = match section {
            Some(key) => Some(
                Section::from_key(&key)
                    .ok_or_else(|| anyhow!("item {} has unknown section '{}'", id, key))?,
            ),
            None => None,
        };
        results.push(Item {
            id: ItemId::from(id),
            name,
            category,
            section,
        });
    }
    Ok(results)
}

/// Load every stored recipe, keyed by crafted item
pub fn list_recipes(conn: &Connection) -> Result<BTreeMap<ItemId, Recipe>> {
    let mut stmt = conn.prepare(
        "SELECT item_id, component_id, quantity
         FROM recipe_components",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Quantity>(2)?,
        ))
    })?;

    let mut recipes: BTreeMap<ItemId, Recipe> = BTreeMap::new();
    for row in rows {
        let (item_id, component_id, quantity) = row?;
        recipes
            .entry(ItemId::from(item_id))
            .or_default()
            .insert(ItemId::from(component_id), quantity);
    }
    Ok(recipes)
}

/// Rebuild a validated catalog from the store
pub fn load_catalog(conn: &Connection) -> Result<Catalog> {
    let items = list_items(conn)?;
    let recipes = list_recipes(conn)?;
    let catalog = Catalog::new(items, recipes).context("stored catalog is invalid")?;
    info!(items = catalog.len(), "catalog loaded from database");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calculator, catalog};

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn catalog_roundtrips_through_store() {
        let mut conn = memory_db();
        let builtin = catalog::builtin().unwrap();
        store_catalog(&mut conn, builtin).unwrap();

        let loaded = load_catalog(&conn).unwrap();
        assert_eq!(loaded.items(), builtin.items());
        assert_eq!(loaded.recipes(), builtin.recipes());
        assert_eq!(
            calculator::flatten(&loaded, "prawn_suit", 2).unwrap(),
            calculator::flatten(builtin, "prawn_suit", 2).unwrap()
        );
    }

    #[test]
    fn storing_twice_replaces_data() {
        let mut conn = memory_db();
        let builtin = catalog::builtin().unwrap();
        store_catalog(&mut conn, builtin).unwrap();
        store_catalog(&mut conn, builtin).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count as usize, builtin.len());
    }

    #[test]
    fn empty_store_loads_empty_catalog() {
        let conn = memory_db();
        let loaded = load_catalog(&conn).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn invalid_store_is_rejected() {
        let conn = memory_db();
        let glass = Item::new("glass", "Glass", ItemCategory::ConstructedMaterial);
        upsert_item(&conn, 0, &glass).unwrap();
        upsert_component(&conn, &"glass".into(), &"quartz".into(), 2).unwrap();

        let err = load_catalog(&conn).unwrap_err();
        assert!(err.to_string().contains("stored catalog is invalid"));
    }

    #[test]
    fn unknown_category_is_reported() {
        let conn = memory_db();
        conn.execute(
            "INSERT INTO items (position, id, name, category)
             VALUES (0, 'cyclops', 'Cyclops', 'submarine')",
            [],
        )
        .unwrap();
        let err = list_items(&conn).unwrap_err();
        assert!(err.to_string().contains("unknown category 'submarine'"));
    }
}
