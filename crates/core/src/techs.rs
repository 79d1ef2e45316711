//! The tech catalog: every hull and component a design may reference.
//!
//! [`TechStore::standard`] is the built-in catalog. Servers may load a
//! replacement from JSON with [`TechStore::from_json`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cost::Cost;
use crate::error::CoreError;
use crate::minefield::MineFieldType;
use crate::tech::{
    ComponentSlotType, Engine, HullSlot, HullSlotType, TechCategory, TechHull, TechHullComponent,
    TechLevel, UNLIMITED_SPACE_DOCK,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStore {
    hulls: Vec<TechHull>,
    hull_components: Vec<TechHullComponent>,
    #[serde(skip)]
    hulls_by_name: HashMap<String, usize>,
    #[serde(skip)]
    components_by_name: HashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TechStoreFile {
    hulls: Vec<TechHull>,
    hull_components: Vec<TechHullComponent>,
}

impl TechStore {
    /// Build a store, rejecting duplicate names.
    pub fn new(
        hulls: Vec<TechHull>,
        hull_components: Vec<TechHullComponent>,
    ) -> Result<Self, CoreError> {
        let store = Self::indexed(hulls, hull_components);
        if store.hulls_by_name.len() != store.hulls.len() {
            return Err(CoreError::Validation("duplicate hull names in catalog".into()));
        }
        if store.components_by_name.len() != store.hull_components.len() {
            return Err(CoreError::Validation(
                "duplicate hull component names in catalog".into(),
            ));
        }
        Ok(store)
    }

    fn indexed(hulls: Vec<TechHull>, hull_components: Vec<TechHullComponent>) -> Self {
        let hulls_by_name = hulls
            .iter()
            .enumerate()
            .map(|(i, h)| (h.name.clone(), i))
            .collect();
        let components_by_name = hull_components
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            hulls,
            hull_components,
            hulls_by_name,
            components_by_name,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let file: TechStoreFile = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("invalid tech catalog: {e}")))?;
        Self::new(file.hulls, file.hull_components)
    }

    pub fn hull(&self, name: &str) -> Option<&TechHull> {
        self.hulls_by_name.get(name).map(|&i| &self.hulls[i])
    }

    pub fn hull_component(&self, name: &str) -> Option<&TechHullComponent> {
        self.components_by_name
            .get(name)
            .map(|&i| &self.hull_components[i])
    }

    pub fn hulls(&self) -> &[TechHull] {
        &self.hulls
    }

    pub fn hull_components(&self) -> &[TechHullComponent] {
        &self.hull_components
    }

    /// The built-in catalog.
    pub fn standard() -> Self {
        let mut hulls = standard_hulls();
        hulls.extend(standard_starbases());
        Self::indexed(hulls, standard_components())
    }
}

/* --------------------------------------------------------------------------
   Built-in catalog
   -------------------------------------------------------------------------- */

const fn req(
    energy: i32,
    weapons: i32,
    propulsion: i32,
    construction: i32,
    electronics: i32,
    biotechnology: i32,
) -> TechLevel {
    TechLevel::new(energy, weapons, propulsion, construction, electronics, biotechnology)
}

const fn slot(slot_type: HullSlotType, capacity: i32) -> HullSlot {
    HullSlot::new(slot_type, capacity, false)
}

const fn required(slot_type: HullSlotType, capacity: i32) -> HullSlot {
    HullSlot::new(slot_type, capacity, true)
}

fn hull(
    name: &str,
    requirements: TechLevel,
    cost: Cost,
    mass: i32,
    armor: i32,
    slots: Vec<HullSlot>,
) -> TechHull {
    TechHull {
        name: name.to_string(),
        category: TechCategory::ShipHull,
        requirements,
        cost,
        mass,
        armor,
        fuel_capacity: 0,
        fuel_generation: 0,
        cargo_capacity: 0,
        initiative: 0,
        repair_bonus: 0.0,
        mine_laying_factor: 1.0,
        immune_to_own_detonation: false,
        starbase: false,
        space_dock: 0,
        max_population: 0,
        range_bonus: 0,
        orbital_construction_hull: false,
        slots,
    }
}

fn starbase_hull(
    name: &str,
    requirements: TechLevel,
    cost: Cost,
    armor: i32,
    slots: Vec<HullSlot>,
) -> TechHull {
    TechHull {
        category: TechCategory::StarbaseHull,
        starbase: true,
        ..hull(name, requirements, cost, 0, armor, slots)
    }
}

fn standard_hulls() -> Vec<TechHull> {
    use HullSlotType as T;

    vec![
        TechHull {
            fuel_capacity: 130,
            cargo_capacity: 70,
            ..hull(
                "Small Freighter",
                req(0, 0, 0, 0, 0, 0),
                Cost::new(12, 0, 17, 20),
                25,
                25,
                vec![required(T::Engine, 1), slot(T::ShieldArmor, 1), slot(T::ScannerElectricalMechanical, 1)],
            )
        },
        TechHull {
            fuel_capacity: 50,
            initiative: 1,
            ..hull(
                "Scout",
                req(0, 0, 0, 0, 0, 0),
                Cost::new(4, 2, 4, 10),
                8,
                20,
                vec![required(T::Engine, 1), slot(T::Scanner, 1), slot(T::General, 1)],
            )
        },
        TechHull {
            fuel_capacity: 200,
            cargo_capacity: 25,
            ..hull(
                "Colony Ship",
                req(0, 0, 0, 0, 0, 0),
                Cost::new(9, 0, 13, 18),
                20,
                20,
                vec![required(T::Engine, 1), slot(T::Mechanical, 1)],
            )
        },
        TechHull {
            fuel_capacity: 120,
            ..hull(
                "Mini Bomber",
                req(0, 0, 0, 1, 0, 0),
                Cost::new(20, 5, 10, 35),
                28,
                50,
                vec![required(T::Engine, 1), slot(T::Bomb, 2)],
            )
        },
        TechHull {
            fuel_capacity: 210,
            ..hull(
                "Mini-Miner",
                req(0, 0, 0, 2, 0, 0),
                Cost::new(25, 0, 6, 50),
                80,
                130,
                vec![
                    required(T::Engine, 1),
                    slot(T::ArmorScannerElectricalMechanical, 1),
                    slot(T::Mining, 1),
                    slot(T::Mining, 1),
                ],
            )
        },
        TechHull {
            fuel_capacity: 280,
            initiative: 3,
            ..hull(
                "Destroyer",
                req(0, 0, 0, 3, 0, 0),
                Cost::new(15, 3, 5, 35),
                30,
                200,
                vec![
                    required(T::Engine, 1),
                    slot(T::Weapon, 1),
                    slot(T::Weapon, 1),
                    slot(T::General, 1),
                    slot(T::Armor, 2),
                    slot(T::Mechanical, 1),
                    slot(T::Electrical, 1),
                ],
            )
        },
        TechHull {
            fuel_capacity: 125,
            initiative: 4,
            ..hull(
                "Frigate",
                req(0, 0, 0, 6, 0, 0),
                Cost::new(4, 2, 4, 12),
                8,
                45,
                vec![
                    required(T::Engine, 1),
                    slot(T::General, 3),
                    slot(T::ScannerElectricalMechanical, 2),
                    slot(T::ShieldArmor, 2),
                ],
            )
        },
        TechHull {
            fuel_capacity: 600,
            initiative: 5,
            ..hull(
                "Cruiser",
                req(0, 0, 0, 9, 0, 0),
                Cost::new(40, 5, 8, 85),
                90,
                700,
                vec![
                    required(T::Engine, 2),
                    slot(T::General, 1),
                    slot(T::General, 1),
                    slot(T::Weapon, 2),
                    slot(T::Weapon, 2),
                    slot(T::ShieldArmor, 2),
                ],
            )
        },
        TechHull {
            fuel_capacity: 400,
            mine_laying_factor: 2.0,
            immune_to_own_detonation: true,
            ..hull(
                "Mini Mine Layer",
                req(0, 0, 0, 10, 0, 0),
                Cost::new(8, 2, 5, 20),
                10,
                60,
                vec![
                    required(T::Engine, 1),
                    slot(T::MineLayer, 2),
                    slot(T::MineLayer, 2),
                    slot(T::ScannerElectricalMechanical, 1),
                ],
            )
        },
    ]
}

fn standard_starbases() -> Vec<TechHull> {
    use HullSlotType as T;

    vec![
        TechHull {
            initiative: 10,
            ..starbase_hull(
                "Orbital Fort",
                req(0, 0, 0, 0, 0, 0),
                Cost::new(24, 0, 34, 80),
                100,
                vec![
                    slot(T::OrbitalElectrical, 1),
                    slot(T::Weapon, 12),
                    slot(T::ShieldArmor, 12),
                    slot(T::Weapon, 12),
                    slot(T::ShieldArmor, 12),
                ],
            )
        },
        TechHull {
            initiative: 14,
            space_dock: UNLIMITED_SPACE_DOCK,
            max_population: 1_000_000,
            repair_bonus: 0.15,
            ..starbase_hull(
                "Space Station",
                req(0, 0, 0, 0, 0, 0),
                Cost::new(120, 80, 250, 600),
                500,
                vec![
                    slot(T::OrbitalElectrical, 1),
                    slot(T::Weapon, 16),
                    slot(T::Shield, 16),
                    slot(T::ShieldArmor, 16),
                    slot(T::Weapon, 16),
                    slot(T::Electrical, 3),
                    slot(T::OrbitalElectrical, 1),
                ],
            )
        },
    ]
}

fn component(
    name: &str,
    category: TechCategory,
    slot_type: ComponentSlotType,
    requirements: TechLevel,
    cost: Cost,
    mass: i32,
) -> TechHullComponent {
    TechHullComponent::new(name, category, slot_type, requirements, cost, mass)
}

fn engine(
    name: &str,
    requirements: TechLevel,
    cost: Cost,
    mass: i32,
    ideal_speed: i32,
    free_speed: i32,
    fuel_usage: [i32; 11],
) -> TechHullComponent {
    TechHullComponent {
        engine: Some(Engine {
            ideal_speed,
            free_speed,
            max_safe_speed: 9,
            fuel_usage: fuel_usage.to_vec(),
        }),
        ..component(
            name,
            TechCategory::Engine,
            ComponentSlotType::Engine,
            requirements,
            cost,
            mass,
        )
    }
}

fn beam(
    name: &str,
    requirements: TechLevel,
    cost: Cost,
    mass: i32,
    power: i32,
    range: i32,
    initiative: i32,
) -> TechHullComponent {
    TechHullComponent {
        power,
        range,
        initiative,
        ..component(
            name,
            TechCategory::BeamWeapon,
            ComponentSlotType::Weapon,
            requirements,
            cost,
            mass,
        )
    }
}

fn torpedo(
    name: &str,
    requirements: TechLevel,
    cost: Cost,
    mass: i32,
    power: i32,
    accuracy: i32,
) -> TechHullComponent {
    TechHullComponent {
        power,
        range: 4,
        initiative: 0,
        accuracy,
        ..component(
            name,
            TechCategory::Torpedo,
            ComponentSlotType::Weapon,
            requirements,
            cost,
            mass,
        )
    }
}

fn mine_layer(
    name: &str,
    requirements: TechLevel,
    cost: Cost,
    mass: i32,
    mine_field_type: MineFieldType,
    rate: i32,
) -> TechHullComponent {
    TechHullComponent {
        mine_field_type: Some(mine_field_type),
        mine_laying_rate: rate,
        ..component(
            name,
            TechCategory::MineLayer,
            ComponentSlotType::MineLayer,
            requirements,
            cost,
            mass,
        )
    }
}

fn standard_components() -> Vec<TechHullComponent> {
    use ComponentSlotType as S;
    use TechCategory as C;

    vec![
        // engines
        engine(
            "Settler's Delight",
            req(0, 0, 0, 0, 0, 0),
            Cost::new(1, 0, 1, 2),
            2,
            6,
            6,
            [0, 0, 0, 0, 0, 0, 0, 150, 275, 480, 576],
        ),
        engine(
            "Quick Jump 5",
            req(0, 0, 0, 0, 0, 0),
            Cost::new(3, 0, 1, 3),
            4,
            5,
            1,
            [0, 0, 25, 100, 100, 100, 180, 500, 800, 900, 1080],
        ),
        engine(
            "Fuel Mizer",
            req(0, 0, 2, 0, 0, 0),
            Cost::new(8, 0, 0, 11),
            6,
            6,
            4,
            [0, 0, 0, 0, 0, 35, 120, 175, 235, 360, 420],
        ),
        engine(
            "Long Hump 6",
            req(0, 0, 3, 0, 0, 0),
            Cost::new(5, 0, 1, 6),
            9,
            6,
            1,
            [0, 0, 20, 60, 100, 100, 105, 450, 750, 900, 1080],
        ),
        engine(
            "Daddy Long Legs 7",
            req(0, 0, 5, 0, 0, 0),
            Cost::new(11, 0, 3, 12),
            13,
            7,
            1,
            [0, 0, 20, 60, 70, 100, 100, 110, 600, 750, 900],
        ),
        engine(
            "Alpha Drive 8",
            req(0, 0, 7, 0, 0, 0),
            Cost::new(16, 0, 3, 28),
            17,
            8,
            1,
            [0, 0, 15, 50, 60, 70, 100, 100, 115, 700, 840],
        ),
        engine(
            "Radiating Hydro-Ram Scoop",
            req(2, 0, 6, 0, 0, 0),
            Cost::new(3, 2, 9, 8),
            10,
            6,
            6,
            [0, 0, 0, 0, 0, 0, 0, 165, 375, 600, 720],
        ),
        // armor
        TechHullComponent {
            armor: 50,
            ..component("Tritanium", C::Armor, S::Armor, req(0, 0, 0, 0, 0, 0), Cost::new(5, 0, 0, 10), 60)
        },
        TechHullComponent {
            armor: 75,
            ..component("Crobmnium", C::Armor, S::Armor, req(0, 0, 0, 3, 0, 0), Cost::new(6, 0, 0, 13), 56)
        },
        TechHullComponent {
            armor: 100,
            ..component("Carbonic Armor", C::Armor, S::Armor, req(0, 0, 0, 0, 0, 4), Cost::new(0, 0, 5, 15), 25)
        },
        // shields
        TechHullComponent {
            shield: 25,
            ..component("Mole-skin Shield", C::Shield, S::Shield, req(0, 0, 0, 0, 0, 0), Cost::new(1, 0, 1, 4), 1)
        },
        TechHullComponent {
            shield: 40,
            ..component("Cow-hide Shield", C::Shield, S::Shield, req(3, 0, 0, 0, 0, 0), Cost::new(2, 0, 2, 5), 1)
        },
        // scanners
        TechHullComponent {
            scan_range: 50,
            ..component("Rhino Scanner", C::Scanner, S::Scanner, req(0, 0, 0, 0, 1, 0), Cost::new(3, 0, 2, 3), 5)
        },
        TechHullComponent {
            scan_range: 100,
            ..component("Mole Scanner", C::Scanner, S::Scanner, req(0, 0, 0, 0, 4, 0), Cost::new(2, 0, 2, 9), 2)
        },
        TechHullComponent {
            scan_range: 150,
            ..component("Possum Scanner", C::Scanner, S::Scanner, req(0, 0, 0, 0, 5, 0), Cost::new(3, 0, 3, 18), 3)
        },
        TechHullComponent {
            scan_range: 160,
            scan_range_pen: 45,
            cloak_units: 20,
            ..component("Chameleon Scanner", C::Scanner, S::Scanner, req(3, 0, 0, 0, 6, 0), Cost::new(4, 6, 4, 25), 6)
        },
        TechHullComponent {
            scan_range: 220,
            scan_range_pen: 120,
            can_steal_fleet_cargo: true,
            can_steal_planet_cargo: true,
            ..component("Robber Baron Scanner", C::Scanner, S::Scanner, req(10, 0, 0, 0, 15, 10), Cost::new(10, 10, 10, 90), 20)
        },
        // beams
        beam("Laser", req(0, 0, 0, 0, 0, 0), Cost::new(0, 6, 0, 5), 1, 10, 1, 9),
        beam("X-Ray Laser", req(0, 3, 0, 0, 0, 0), Cost::new(0, 6, 0, 6), 1, 16, 1, 9),
        TechHullComponent {
            gatling: true,
            ..beam("Mini Gun", req(0, 5, 0, 0, 0, 0), Cost::new(0, 6, 0, 6), 3, 13, 2, 12)
        },
        beam("Yakimora Light Phaser", req(0, 6, 0, 0, 0, 0), Cost::new(0, 8, 0, 7), 1, 26, 1, 9),
        TechHullComponent {
            gatling: true,
            ..beam("Gatling Gun", req(0, 11, 0, 0, 0, 0), Cost::new(0, 20, 0, 13), 3, 31, 2, 12)
        },
        // torpedoes
        torpedo("Alpha Torpedo", req(0, 0, 0, 0, 0, 0), Cost::new(9, 3, 3, 5), 25, 5, 35),
        torpedo("Beta Torpedo", req(0, 5, 1, 0, 0, 0), Cost::new(18, 6, 4, 6), 25, 12, 45),
        // bombs
        TechHullComponent {
            kill_rate: 0.6,
            min_kill_rate: 300,
            structure_destroy_rate: 0.2,
            ..component("Lady Finger Bomb", C::Bomb, S::Bomb, req(0, 2, 0, 0, 0, 0), Cost::new(1, 20, 0, 5), 40)
        },
        TechHullComponent {
            kill_rate: 0.9,
            min_kill_rate: 300,
            structure_destroy_rate: 0.4,
            ..component("Black Cat Bomb", C::Bomb, S::Bomb, req(0, 5, 0, 0, 0, 0), Cost::new(1, 22, 0, 7), 45)
        },
        TechHullComponent {
            kill_rate: 1.3,
            smart: true,
            ..component("Smart Bomb", C::Bomb, S::Bomb, req(0, 5, 0, 0, 0, 7), Cost::new(1, 22, 0, 27), 50)
        },
        TechHullComponent {
            unterraform_rate: 1,
            ..component("Retro Bomb", C::Bomb, S::Bomb, req(0, 10, 0, 0, 0, 12), Cost::new(15, 15, 10, 50), 45)
        },
        // mine layers
        mine_layer("Mine Dispenser 40", req(0, 0, 0, 0, 0, 0), Cost::new(2, 10, 8, 45), 25, MineFieldType::Standard, 40),
        mine_layer("Mine Dispenser 50", req(2, 0, 0, 0, 0, 4), Cost::new(2, 12, 10, 55), 30, MineFieldType::Standard, 50),
        mine_layer("Heavy Dispenser 50", req(5, 0, 0, 0, 0, 3), Cost::new(2, 20, 5, 50), 10, MineFieldType::Heavy, 50),
        mine_layer("Speed Trap 20", req(0, 0, 2, 0, 0, 2), Cost::new(29, 0, 12, 58), 100, MineFieldType::SpeedBump, 20),
        // mining robots
        TechHullComponent {
            mining_rate: 4,
            ..component("Robo-Mini-Miner", C::MineRobot, S::Mining, req(0, 0, 0, 2, 1, 0), Cost::new(29, 0, 7, 96), 240)
        },
        TechHullComponent {
            mining_rate: 12,
            ..component("Robo-Miner", C::MineRobot, S::Mining, req(0, 0, 0, 4, 2, 0), Cost::new(30, 0, 7, 100), 240)
        },
        // electrical
        TechHullComponent {
            cloak_units: 300,
            ..component("Transport Cloaking", C::Electrical, S::Electrical, req(0, 0, 0, 0, 0, 0), Cost::new(2, 0, 2, 3), 1)
        },
        TechHullComponent {
            cloak_units: 70,
            ..component("Stealth Cloak", C::Electrical, S::Electrical, req(2, 0, 0, 0, 5, 0), Cost::new(2, 0, 2, 5), 2)
        },
        TechHullComponent {
            initiative_bonus: 1,
            torpedo_bonus: 0.2,
            ..component("Battle Computer", C::Electrical, S::Electrical, req(0, 0, 0, 0, 0, 0), Cost::new(0, 0, 13, 5), 1)
        },
        TechHullComponent {
            initiative_bonus: 2,
            torpedo_bonus: 0.3,
            ..component("Battle Super Computer", C::Electrical, S::Electrical, req(5, 0, 0, 0, 11, 0), Cost::new(0, 0, 25, 14), 1)
        },
        TechHullComponent {
            beam_bonus: 0.1,
            ..component("Energy Capacitor", C::Electrical, S::Electrical, req(7, 0, 0, 0, 4, 0), Cost::new(0, 0, 8, 5), 1)
        },
        TechHullComponent {
            beam_bonus: 0.2,
            ..component("Flux Capacitor", C::Electrical, S::Electrical, req(14, 0, 0, 0, 8, 0), Cost::new(0, 0, 8, 5), 1)
        },
        TechHullComponent {
            torpedo_jamming: 0.1,
            ..component("Jammer 10", C::Electrical, S::Electrical, req(2, 0, 0, 0, 6, 0), Cost::new(0, 0, 2, 6), 1)
        },
        TechHullComponent {
            torpedo_jamming: 0.2,
            ..component("Jammer 20", C::Electrical, S::Electrical, req(4, 0, 0, 0, 10, 0), Cost::new(1, 0, 5, 20), 1)
        },
        TechHullComponent {
            beam_defense: 0.1,
            ..component("Deflector", C::Electrical, S::Electrical, req(6, 0, 0, 0, 6, 0), Cost::new(0, 0, 10, 15), 1)
        },
        TechHullComponent {
            reduce_cloaking: true,
            ..component("Tachyon Detector", C::Electrical, S::Electrical, req(8, 0, 0, 0, 14, 0), Cost::new(1, 5, 0, 70), 1)
        },
        // mechanical
        TechHullComponent {
            fuel_bonus: 250,
            ..component("Fuel Tank", C::Mechanical, S::Mechanical, req(0, 0, 0, 0, 0, 0), Cost::new(6, 0, 0, 4), 3)
        },
        TechHullComponent {
            cargo_bonus: 50,
            ..component("Cargo Pod", C::Mechanical, S::Mechanical, req(0, 0, 0, 3, 0, 0), Cost::new(5, 0, 2, 10), 5)
        },
        TechHullComponent {
            movement_bonus: 1,
            ..component("Maneuvering Jet", C::Mechanical, S::Mechanical, req(2, 0, 3, 0, 0, 0), Cost::new(5, 0, 5, 10), 5)
        },
        TechHullComponent {
            movement_bonus: 2,
            ..component("Overthruster", C::Mechanical, S::Mechanical, req(5, 0, 12, 0, 0, 0), Cost::new(10, 0, 8, 20), 5)
        },
        TechHullComponent {
            colonization_module: true,
            ..component("Colonization Module", C::Mechanical, S::Mechanical, req(0, 0, 0, 0, 0, 0), Cost::new(12, 10, 10, 10), 32)
        },
        TechHullComponent {
            orbital_construction_module: true,
            ..component("Orbital Construction Module", C::Mechanical, S::Mechanical, req(0, 0, 0, 0, 0, 0), Cost::new(18, 13, 13, 18), 50)
        },
        TechHullComponent {
            can_jump: true,
            ..component("Jump Gate", C::Mechanical, S::Mechanical, req(16, 0, 20, 20, 16, 0), Cost::new(0, 0, 38, 30), 10)
        },
        // orbital
        TechHullComponent {
            safe_hull_mass: 100,
            safe_range: 250,
            ..component("Stargate 100-250", C::Orbital, S::Orbital, req(0, 0, 5, 5, 0, 0), Cost::new(50, 20, 20, 200), 0)
        },
        TechHullComponent {
            safe_hull_mass: 300,
            safe_range: 500,
            ..component("Stargate 300-500", C::Orbital, S::Orbital, req(0, 0, 9, 13, 0, 0), Cost::new(50, 20, 20, 256), 0)
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn standard_catalog_resolves_names() {
        let techs = TechStore::standard();
        assert!(techs.hull("Scout").is_some());
        assert!(techs.hull("Space Station").is_some_and(|h| h.starbase));
        assert!(techs.hull_component("Long Hump 6").is_some_and(|c| c.engine.is_some()));
        assert!(techs.hull_component("Warp Drive 11").is_none());
    }

    #[test]
    fn every_ship_hull_requires_an_engine() {
        let techs = TechStore::standard();
        for hull in techs.hulls().iter().filter(|h| !h.starbase) {
            assert!(
                hull.slots.iter().any(|s| s.required && s.slot_type == HullSlotType::Engine),
                "{} has no required engine slot",
                hull.name
            );
        }
    }

    #[test]
    fn from_json_defaults_missing_effects() {
        let json = r#"{
            "hulls": [{
                "name": "Tiny",
                "category": "ShipHull",
                "cost": {"resources": 5},
                "mass": 10,
                "slots": [{"type": "Engine", "capacity": 1, "required": true}]
            }],
            "hullComponents": [{
                "name": "Tiny Engine",
                "category": "Engine",
                "slotType": "Engine",
                "cost": {"ironium": 1},
                "mass": 2,
                "engine": {"idealSpeed": 5, "freeSpeed": 1, "maxSafeSpeed": 9, "fuelUsage": [0, 0, 10]}
            }]
        }"#;
        let techs = TechStore::from_json(json).unwrap();
        let hull = techs.hull("Tiny").unwrap();
        assert_eq!(hull.mine_laying_factor, 1.0);
        assert_eq!(hull.slot(1).map(|s| s.capacity), Some(1));
        assert_eq!(techs.hull_component("Tiny Engine").unwrap().armor, 0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let a = component("Thing", TechCategory::Armor, ComponentSlotType::Armor, TechLevel::default(), Cost::default(), 1);
        let b = a.clone();
        assert_matches!(TechStore::new(vec![], vec![a, b]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn serializes_catalog_without_indexes() {
        let value = serde_json::to_value(TechStore::standard()).unwrap();
        assert!(value["hulls"].as_array().is_some_and(|h| !h.is_empty()));
        assert!(value["hullComponents"].as_array().is_some_and(|c| !c.is_empty()));
        assert!(value.get("hullsByName").is_none());
    }
}
