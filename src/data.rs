//! Embedded Subnautica item and recipe data

use std::collections::BTreeMap;

use crate::models::{Item, ItemCategory, ItemId, Quantity, Recipe, Section};

use ItemCategory::{BuildingPiece, ConstructedMaterial, RawMaterial, Vehicle};

fn base(id: &str, name: &str, structural_integrity: f64) -> Item {
    Item::new(id, name, ItemCategory::BasePiece { structural_integrity })
        .in_section(Section::BasePieces)
}

fn power(id: &str, name: &str, power_output: u32) -> Item {
    Item::new(id, name, ItemCategory::PowerPiece { power_output }).in_section(Section::PowerSources)
}

/// All catalog items, grouped as the game's build menu groups them
pub fn items() -> Vec<Item> {
    vec![
        // Limestone
        Item::new("titanium", "Titanium", RawMaterial),
        Item::new("copper", "Copper Ore", RawMaterial),
        // Sandstone
        Item::new("gold", "Gold", RawMaterial),
        Item::new("silver", "Silver Ore", RawMaterial),
        Item::new("lead", "Lead", RawMaterial),
        // Shale
        Item::new("lithium", "Lithium", RawMaterial),
        Item::new("diamond", "Diamond", RawMaterial),
        Item::new("uranium", "Uraninite Crystal", RawMaterial),
        // Other minerals and organics
        Item::new("magnetite", "Magnetite", RawMaterial),
        Item::new("ruby", "Ruby", RawMaterial),
        Item::new("nickel", "Nickel Ore", RawMaterial),
        Item::new("sulphur", "Crystalline Sulfur", RawMaterial),
        Item::new("kyanite", "Kyanite", RawMaterial),
        Item::new("quartz", "Quartz", RawMaterial),
        Item::new("salt", "Salt Deposit", RawMaterial),
        Item::new("gel_sack", "Gel Sack", RawMaterial),
        Item::new("creepvine_sample", "Creepvine Sample", RawMaterial),
        Item::new("creepvine_seed_cluster", "Creepvine Seed Cluster", RawMaterial),
        Item::new("table_coral_sample", "Table Coral Sample", RawMaterial),
        Item::new("stalker_tooth", "Stalker Tooth", RawMaterial),
        Item::new("acid_mushroom", "Acid Mushroom", RawMaterial),
        // Constructed materials
        Item::new("aerogel", "Aerogel", ConstructedMaterial),
        Item::new("fiber_mesh", "Fiber Mesh", ConstructedMaterial),
        Item::new("glass", "Glass", ConstructedMaterial),
        Item::new("enamaled_glass", "Enameled Glass", ConstructedMaterial),
        Item::new("lubricant", "Lubricant", ConstructedMaterial),
        Item::new("plasteel_ingot", "Plasteel Ingot", ConstructedMaterial),
        Item::new("titanium_ingot", "Titanium Ingot", ConstructedMaterial),
        Item::new("silicone_rubber", "Silicone Rubber", ConstructedMaterial),
        // Electronics
        Item::new("computer_chip", "Computer Chip", ConstructedMaterial),
        Item::new("copper_wire", "Copper Wire", ConstructedMaterial),
        Item::new("wiring_kit", "Wiring Kit", ConstructedMaterial),
        Item::new("advanced_wiring_kit", "Advanced Wiring Kit", ConstructedMaterial),
        Item::new("battery", "Battery", ConstructedMaterial),
        Item::new("power_cell", "Power Cell", ConstructedMaterial),
        // Base pieces
        base("foundation", "Foundation", 2.0),
        base("multipurpose_room", "Multipurpose Room", -1.25),
        base("i_compartment", "I-compartment", -1.0),
        base("l_compartment", "L-compartment", -1.0),
        base("t_compartment", "T-compartment", -1.0),
        base("x_compartment", "X-compartment", -1.0),
        base("glass_i_compartment", "Glass I-compartment", -2.0),
        base("glass_l_compartment", "Glass L-compartment", -2.0),
        base("vertical_connector", "Vertical Connector", -0.5),
        base("scanner_room", "Scanner Room", -1.0),
        base("moonpool", "Moonpool", -5.0),
        base("observatory", "Observatory", -3.0),
        base("window", "Window", -1.0),
        base("bulkhead", "Bulkhead", 3.0),
        base("reinforcement", "Reinforcement", 7.0),
        base("hatch", "Hatch", -1.0),
        // Power
        power("bioreactor", "Bioreactor", 500),
        power("nuclear_reactor", "Nuclear Reactor", 2500),
        power("solar_panel", "Solar Panel", 75),
        power("thermal_plant", "Thermal Plant", 250),
        power("power_transmitter", "Power Transmitter", 0),
        // Exterior
        Item::new("floodlight", "Floodlight", BuildingPiece).in_section(Section::ExteriorPieces),
        Item::new("spotlight", "Spotlight", BuildingPiece).in_section(Section::ExteriorPieces),
        Item::new("exterior_growbed", "Exterior Growbed", BuildingPiece)
            .in_section(Section::ExteriorPieces),
        Item::new("base_air_pump", "Base Air Pump", BuildingPiece)
            .in_section(Section::ExteriorPieces),
        // Interior pieces
        Item::new("alien_containment", "Alien Containment", BuildingPiece)
            .in_section(Section::InteriorPieces),
        Item::new("ladder", "Ladder", BuildingPiece).in_section(Section::InteriorPieces),
        Item::new("vehicle_upgrade_console", "Vehicle Upgrade Console", BuildingPiece)
            .in_section(Section::InteriorPieces),
        Item::new("water_filtration_pump", "Water Filtration Pump", BuildingPiece)
            .in_section(Section::InteriorPieces),
        // Interior modules
        Item::new("fabricator", "Fabricator", BuildingPiece).in_section(Section::InteriorModules),
        Item::new("radio", "Radio", BuildingPiece).in_section(Section::InteriorModules),
        Item::new("med_kit_fabricator", "Medkit Fabricator", BuildingPiece)
            .in_section(Section::InteriorModules),
        Item::new("wall_locker", "Wall Locker", BuildingPiece).in_section(Section::InteriorModules),
        Item::new("locker", "Locker", BuildingPiece).in_section(Section::InteriorModules),
        Item::new("battery_charger", "Battery Charger", BuildingPiece)
            .in_section(Section::InteriorModules),
        Item::new("power_cell_charger", "Power Cell Charger", BuildingPiece)
            .in_section(Section::InteriorModules),
        Item::new("aquarium", "Aquarium", BuildingPiece).in_section(Section::InteriorModules),
        Item::new("modification_station", "Modification Station", BuildingPiece)
            .in_section(Section::InteriorModules),
        Item::new("plant_pot", "Plant Pot", BuildingPiece).in_section(Section::InteriorModules),
        Item::new("indoor_growbed", "Interior Growbed", BuildingPiece)
            .in_section(Section::InteriorModules),
        Item::new("plant_shelf", "Plant Shelf", BuildingPiece).in_section(Section::InteriorModules),
        // Vehicles
        Item::new("seamoth", "Seamoth", Vehicle),
        Item::new("prawn_suit", "Prawn Suit", Vehicle),
    ]
}

/// Direct recipe for every craftable item
pub fn recipes() -> BTreeMap<ItemId, Recipe> {
    let table: &[(&str, &[(&str, Quantity)])] = &[
        // Constructed materials
        ("aerogel", &[("ruby", 1), ("gel_sack", 1)]),
        ("fiber_mesh", &[("creepvine_sample", 2)]),
        ("glass", &[("quartz", 2)]),
        ("enamaled_glass", &[("glass", 1), ("stalker_tooth", 1)]),
        ("lubricant", &[("creepvine_seed_cluster", 1)]),
        ("plasteel_ingot", &[("titanium_ingot", 1), ("lithium", 2)]),
        ("titanium_ingot", &[("titanium", 10)]),
        ("silicone_rubber", &[("creepvine_seed_cluster", 1)]),
        // Electronics
        ("computer_chip", &[("table_coral_sample", 2), ("gold", 1), ("copper_wire", 1)]),
        ("copper_wire", &[("copper", 2)]),
        ("wiring_kit", &[("silver", 2)]),
        ("advanced_wiring_kit", &[("wiring_kit", 1), ("gold", 2), ("computer_chip", 1)]),
        ("battery", &[("acid_mushroom", 2), ("copper", 1)]),
        ("power_cell", &[("battery", 2), ("silicone_rubber", 1)]),
        // Base pieces
        ("foundation", &[("lead", 2), ("titanium", 2)]),
        ("i_compartment", &[("titanium", 2)]),
        ("l_compartment", &[("titanium", 2)]),
        ("t_compartment", &[("titanium", 3)]),
        ("x_compartment", &[("titanium", 3)]),
        ("glass_i_compartment", &[("glass", 2)]),
        ("glass_l_compartment", &[("glass", 2)]),
        ("vertical_connector", &[("titanium", 2)]),
        ("multipurpose_room", &[("titanium", 6)]),
        ("scanner_room", &[("titanium", 5), ("copper", 2), ("gold", 1), ("table_coral_sample", 1)]),
        ("moonpool", &[("titanium_ingot", 2), ("lubricant", 1), ("lead", 2)]),
        ("observatory", &[("enamaled_glass", 2), ("titanium", 1)]),
        ("hatch", &[("titanium", 2), ("quartz", 1)]),
        ("window", &[("glass", 1)]),
        ("bulkhead", &[("titanium", 3)]),
        ("reinforcement", &[("titanium", 3), ("lithium", 1)]),
        // Power
        ("bioreactor", &[("titanium", 3), ("wiring_kit", 1), ("lubricant", 1)]),
        ("nuclear_reactor", &[("plasteel_ingot", 1), ("advanced_wiring_kit", 1), ("lead", 3)]),
        ("solar_panel", &[("quartz", 2), ("titanium", 2), ("copper", 1)]),
        ("thermal_plant", &[("titanium", 5), ("magnetite", 2), ("aerogel", 1)]),
        ("power_transmitter", &[("gold", 1), ("titanium", 1)]),
        // Exterior
        ("floodlight", &[("glass", 1), ("titanium", 1)]),
        ("spotlight", &[("glass", 1), ("titanium", 2)]),
        ("exterior_growbed", &[("titanium", 2)]),
        ("base_air_pump", &[("titanium", 2)]),
        // Interior pieces
        ("ladder", &[("titanium", 2)]),
        ("water_filtration_pump", &[("titanium", 3), ("copper_wire", 1), ("aerogel", 1)]),
        ("vehicle_upgrade_console", &[("titanium", 3), ("computer_chip", 1), ("copper_wire", 1)]),
        ("alien_containment", &[("glass", 5), ("titanium", 2)]),
        // Interior modules
        ("fabricator", &[("titanium", 1), ("gold", 1), ("table_coral_sample", 1)]),
        ("radio", &[("titanium", 1), ("copper", 1)]),
        (
            "med_kit_fabricator",
            &[("computer_chip", 1), ("fiber_mesh", 1), ("silver", 1), ("titanium", 1)],
        ),
        ("wall_locker", &[("titanium", 2)]),
        ("locker", &[("quartz", 1), ("titanium", 2)]),
        ("battery_charger", &[("wiring_kit", 1), ("copper_wire", 1), ("titanium", 1)]),
        ("power_cell_charger", &[("advanced_wiring_kit", 1), ("ruby", 2), ("titanium", 2)]),
        ("aquarium", &[("glass", 2), ("titanium", 1)]),
        (
            "modification_station",
            &[("computer_chip", 1), ("titanium", 1), ("diamond", 1), ("lead", 1)],
        ),
        ("plant_pot", &[("titanium", 2)]),
        ("indoor_growbed", &[("titanium", 4)]),
        ("plant_shelf", &[("titanium", 1)]),
        // Vehicles
        (
            "seamoth",
            &[
                ("titanium_ingot", 1),
                ("power_cell", 1),
                ("glass", 2),
                ("lubricant", 1),
                ("lead", 1),
            ],
        ),
        (
            "prawn_suit",
            &[
                ("plasteel_ingot", 2),
                ("aerogel", 2),
                ("enamaled_glass", 1),
                ("diamond", 2),
                ("lead", 2),
            ],
        ),
    ];

    table
        .iter()
        .map(|(target, components)| {
            let recipe = components
                .iter()
                .map(|&(component, quantity)| (ItemId::from(component), quantity))
                .collect();
            (ItemId::from(*target), recipe)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_recipe_per_craftable_item() {
        let items = items();
        let recipes = recipes();
        let craftable = items.iter().filter(|i| !i.is_raw()).count();
        assert_eq!(recipes.len(), craftable);
    }

    #[test]
    fn raw_materials_without_consumers() {
        let recipes = recipes();
        let unused: Vec<_> = items()
            .into_iter()
            .filter(|i| i.is_raw())
            .filter(|i| !recipes.values().any(|r| r.contains_key(&i.id)))
            .map(|i| i.id.to_string())
            .collect();
        assert_eq!(unused, ["uranium", "nickel", "sulphur", "kyanite", "salt"]);
    }
}
