//! Ship design records and their derived spec.
//!
//! A [`ShipDesign`] is what a player authors: a hull plus components in
//! slots. A [`ShipDesignSpec`] is never authored; it is a cache of
//! [`crate::design_spec::compute_ship_design_spec`] and is regenerated
//! whenever slots, hull, or tech levels change.
//!
//! These types are the JSON contract with the browser client and are
//! exported to TypeScript through `ts-rs`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cost::Cost;
use crate::minefield::MineFieldType;
use crate::tech::{Engine, TechCategory, TechHullComponent, TechLevel};
use crate::types::{DbId, Timestamp};

/// What a design is meant for. Used by the client to group designs and by
/// AI players to pick designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ShipDesignPurpose {
    Scout,
    ArmedScout,
    Colonizer,
    ColonistFreighter,
    Freighter,
    FuelFreighter,
    MultiPurposeFreighter,
    Fighter,
    CapitalShip,
    Bomber,
    SmartBomber,
    StructureBomber,
    MineLayer,
    SpeedMineLayer,
    Miner,
    Terraformer,
    Starbase,
    FuelDepot,
    StarterColony,
}

/// One component placed in one hull slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShipDesignSlot {
    pub hull_component: String,
    /// 1-based index into the hull's slots.
    pub hull_slot_index: i32,
    pub quantity: i32,
}

impl ShipDesignSlot {
    pub fn new(hull_component: &str, hull_slot_index: i32, quantity: i32) -> Self {
        Self {
            hull_component: hull_component.to_string(),
            hull_slot_index,
            quantity,
        }
    }
}

/// A bombing summary for one slot of bombs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Bomb {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub kill_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub min_kill_rate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub structure_destroy_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub unterraform_rate: Option<i32>,
}

impl Bomb {
    /// Summarize `quantity` bombs of a bomb component. Rates the component
    /// does not have are left out.
    pub fn from_component(component: &TechHullComponent, quantity: i32) -> Self {
        Self {
            quantity: Some(quantity),
            kill_rate: (component.kill_rate > 0.0).then_some(component.kill_rate),
            min_kill_rate: (component.min_kill_rate > 0).then_some(component.min_kill_rate),
            structure_destroy_rate: (component.structure_destroy_rate > 0.0)
                .then_some(component.structure_destroy_rate),
            unterraform_rate: (component.unterraform_rate > 0)
                .then_some(component.unterraform_rate),
        }
    }
}

/// Derived performance of a design. Every capability field is absent when
/// the design lacks the capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ShipDesignSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub armor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub beam_bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub beam_defense: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub bomber: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub bombs: Option<Vec<Bomb>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub can_jump: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub can_lay_mines: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub can_steal_fleet_cargo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub can_steal_planet_cargo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cargo_capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cloak_percent: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cloak_percent_full_cargo: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cloak_units: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub colonizer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cost: Option<Cost>,
    pub engine: Engine,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub estimated_range: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub estimated_range_full: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub fuel_capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub fuel_generation: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub has_weapons: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub hull_type: Option<TechCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub immune_to_own_detonation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub initiative: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub mass: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub max_hull_mass: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub max_population: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub max_range: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub mine_laying_rate_by_mine_type: Option<HashMap<MineFieldType, i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub mine_sweep: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub mining_rate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub movement: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub movement_bonus: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub movement_full: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub num_built: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub num_engines: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub num_instances: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub orbital_construction_module: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub power_rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub reduce_cloaking: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub repair_bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub retro_bombs: Option<Vec<Bomb>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub safe_hull_mass: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub safe_range: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub scanner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub scan_range: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub scan_range_pen: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub shields: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub smart_bombs: Option<Vec<Bomb>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub space_dock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub starbase: Option<bool>,
    pub tech_level: TechLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub terraform_rate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub torpedo_bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub torpedo_jamming: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub weapon_slots: Option<Vec<ShipDesignSlot>>,
}

impl ShipDesignSpec {
    pub fn mass(&self) -> i32 {
        self.mass.unwrap_or(0)
    }

    pub fn armor(&self) -> i32 {
        self.armor.unwrap_or(0)
    }

    pub fn num_engines(&self) -> i32 {
        self.num_engines.unwrap_or(0)
    }

    pub fn cost(&self) -> Cost {
        self.cost.unwrap_or_default()
    }

    pub fn is_starbase(&self) -> bool {
        self.starbase.unwrap_or(false)
    }

    pub fn is_immune_to_own_detonation(&self) -> bool {
        self.immune_to_own_detonation.unwrap_or(false)
    }
}

/// A player's blueprint for a ship or starbase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShipDesign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<f64>")]
    pub id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub uuid: Option<Uuid>,
    #[ts(type = "number")]
    pub game_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub num: Option<i32>,
    pub player_num: i32,
    pub original_player_num: i32,
    pub name: String,
    pub version: i32,
    pub hull: String,
    pub hull_set_number: i32,
    #[serde(default)]
    pub cannot_delete: bool,
    #[serde(default)]
    pub mystery_trader: bool,
    pub slots: Vec<ShipDesignSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub purpose: Option<ShipDesignPurpose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub report_age: Option<i32>,
    #[serde(default)]
    pub spec: ShipDesignSpec,
}

impl ShipDesign {
    /// A fresh, unsaved design with no slots filled.
    pub fn new(game_id: DbId, player_num: i32, name: &str, hull: &str) -> Self {
        Self {
            id: None,
            uuid: None,
            game_id,
            created_at: None,
            updated_at: None,
            num: None,
            player_num,
            original_player_num: player_num,
            name: name.to_string(),
            version: 0,
            hull: hull.to_string(),
            hull_set_number: 0,
            cannot_delete: false,
            mystery_trader: false,
            slots: Vec::new(),
            purpose: None,
            report_age: None,
            spec: ShipDesignSpec::default(),
        }
    }

    pub fn with_slots(mut self, slots: Vec<ShipDesignSlot>) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_purpose(mut self, purpose: ShipDesignPurpose) -> Self {
        self.purpose = Some(purpose);
        self
    }

    /// True if `other` describes a different ship: another hull or other
    /// components. Renames and purpose changes do not count.
    pub fn layout_differs(&self, other: &ShipDesign) -> bool {
        self.hull != other.hull || self.slots != other.slots
    }
}
