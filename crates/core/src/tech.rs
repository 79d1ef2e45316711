//! Tech levels, engines, hulls, and hull components.
//!
//! These are the inputs the spec engine aggregates. A hull defines the slots
//! a design can fill; components fill them and carry the effects.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cost::Cost;
use crate::minefield::MineFieldType;

/* --------------------------------------------------------------------------
   Tech levels
   -------------------------------------------------------------------------- */

/// The six research fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechField {
    Energy,
    Weapons,
    Propulsion,
    Construction,
    Electronics,
    Biotechnology,
}

impl TechField {
    pub const ALL: [TechField; 6] = [
        TechField::Energy,
        TechField::Weapons,
        TechField::Propulsion,
        TechField::Construction,
        TechField::Electronics,
        TechField::Biotechnology,
    ];
}

/// A level in each research field. Used both for what a player has
/// researched and for what a tech requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct TechLevel {
    pub energy: i32,
    pub weapons: i32,
    pub propulsion: i32,
    pub construction: i32,
    pub electronics: i32,
    pub biotechnology: i32,
}

impl TechLevel {
    pub const fn new(
        energy: i32,
        weapons: i32,
        propulsion: i32,
        construction: i32,
        electronics: i32,
        biotechnology: i32,
    ) -> Self {
        Self {
            energy,
            weapons,
            propulsion,
            construction,
            electronics,
            biotechnology,
        }
    }

    pub fn get(&self, field: TechField) -> i32 {
        match field {
            TechField::Energy => self.energy,
            TechField::Weapons => self.weapons,
            TechField::Propulsion => self.propulsion,
            TechField::Construction => self.construction,
            TechField::Electronics => self.electronics,
            TechField::Biotechnology => self.biotechnology,
        }
    }

    /// Field-wise maximum of two levels.
    pub fn max(&self, other: &TechLevel) -> TechLevel {
        TechLevel {
            energy: self.energy.max(other.energy),
            weapons: self.weapons.max(other.weapons),
            propulsion: self.propulsion.max(other.propulsion),
            construction: self.construction.max(other.construction),
            electronics: self.electronics.max(other.electronics),
            biotechnology: self.biotechnology.max(other.biotechnology),
        }
    }

    /// Total number of levels we are above `requirement`, summed over every
    /// field. Fields where we are below the requirement count as zero.
    pub fn levels_above(&self, requirement: &TechLevel) -> i32 {
        TechField::ALL
            .iter()
            .map(|&f| (self.get(f) - requirement.get(f)).max(0))
            .sum()
    }

    /// True if every field is at least the requirement.
    pub fn has_required_levels(&self, requirement: &TechLevel) -> bool {
        TechField::ALL
            .iter()
            .all(|&f| self.get(f) >= requirement.get(f))
    }
}

/* --------------------------------------------------------------------------
   Engines
   -------------------------------------------------------------------------- */

/// Highest warp factor an engine table covers.
pub const MAX_WARP: usize = 10;

/// Engine characteristics. `fuel_usage[w]` is the fuel usage number at warp
/// `w` (100 = one mg moves 200kT one light-year).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Engine {
    pub ideal_speed: i32,
    pub free_speed: i32,
    pub max_safe_speed: i32,
    pub fuel_usage: Vec<i32>,
}

impl Engine {
    pub fn fuel_usage_at(&self, warp: i32) -> i32 {
        if warp < 0 {
            return 0;
        }
        self.fuel_usage.get(warp as usize).copied().unwrap_or(0)
    }

    /// Ram scoops travel for free above warp 1.
    pub fn is_ram_scoop(&self) -> bool {
        self.free_speed > 1
    }
}

/* --------------------------------------------------------------------------
   Categories and slots
   -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TechCategory {
    Armor,
    BeamWeapon,
    Bomb,
    Electrical,
    Engine,
    Mechanical,
    MineLayer,
    MineRobot,
    Orbital,
    Scanner,
    Shield,
    ShipHull,
    StarbaseHull,
    Terraforming,
    Torpedo,
}

/// The kind of slot a component occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentSlotType {
    Engine,
    Armor,
    Shield,
    Scanner,
    Electrical,
    Mechanical,
    Weapon,
    Bomb,
    Mining,
    MineLayer,
    Orbital,
}

/// The kind(s) of component a hull slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HullSlotType {
    Engine,
    Armor,
    Shield,
    ShieldArmor,
    Scanner,
    Electrical,
    Mechanical,
    Weapon,
    WeaponShield,
    Bomb,
    Mining,
    MineLayer,
    Orbital,
    OrbitalElectrical,
    ScannerElectricalMechanical,
    ArmorScannerElectricalMechanical,
    MineElectricalMechanical,
    ShieldElectricalMechanical,
    General,
    SpaceDock,
}

impl HullSlotType {
    /// Component slot types this hull slot will take.
    pub fn allowed(self) -> &'static [ComponentSlotType] {
        use ComponentSlotType as C;
        match self {
            HullSlotType::Engine => &[C::Engine],
            HullSlotType::Armor => &[C::Armor],
            HullSlotType::Shield => &[C::Shield],
            HullSlotType::ShieldArmor => &[C::Shield, C::Armor],
            HullSlotType::Scanner => &[C::Scanner],
            HullSlotType::Electrical => &[C::Electrical],
            HullSlotType::Mechanical => &[C::Mechanical],
            HullSlotType::Weapon => &[C::Weapon],
            HullSlotType::WeaponShield => &[C::Weapon, C::Shield],
            HullSlotType::Bomb => &[C::Bomb],
            HullSlotType::Mining => &[C::Mining],
            HullSlotType::MineLayer => &[C::MineLayer],
            HullSlotType::Orbital => &[C::Orbital],
            HullSlotType::OrbitalElectrical => &[C::Orbital, C::Electrical],
            HullSlotType::ScannerElectricalMechanical => {
                &[C::Scanner, C::Electrical, C::Mechanical]
            }
            HullSlotType::ArmorScannerElectricalMechanical => {
                &[C::Armor, C::Scanner, C::Electrical, C::Mechanical]
            }
            HullSlotType::MineElectricalMechanical => {
                &[C::MineLayer, C::Electrical, C::Mechanical]
            }
            HullSlotType::ShieldElectricalMechanical => {
                &[C::Shield, C::Electrical, C::Mechanical]
            }
            HullSlotType::General => &[
                C::Armor,
                C::Shield,
                C::Scanner,
                C::Electrical,
                C::Mechanical,
                C::Weapon,
                C::Bomb,
                C::Mining,
                C::MineLayer,
            ],
            HullSlotType::SpaceDock => &[],
        }
    }

    pub fn accepts(self, component: ComponentSlotType) -> bool {
        self.allowed().contains(&component)
    }
}

/// One slot on a hull.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HullSlot {
    #[serde(rename = "type")]
    pub slot_type: HullSlotType,
    pub capacity: i32,
    #[serde(default)]
    pub required: bool,
}

impl HullSlot {
    pub const fn new(slot_type: HullSlotType, capacity: i32, required: bool) -> Self {
        Self {
            slot_type,
            capacity,
            required,
        }
    }
}

/* --------------------------------------------------------------------------
   Hulls
   -------------------------------------------------------------------------- */

/// Space dock value for starbases that can build any size of ship.
pub const UNLIMITED_SPACE_DOCK: i32 = -1;

fn default_factor() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechHull {
    pub name: String,
    pub category: TechCategory,
    #[serde(default)]
    pub requirements: TechLevel,
    pub cost: Cost,
    pub mass: i32,
    #[serde(default)]
    pub armor: i32,
    #[serde(default)]
    pub fuel_capacity: i32,
    #[serde(default)]
    pub fuel_generation: i32,
    #[serde(default)]
    pub cargo_capacity: i32,
    #[serde(default)]
    pub initiative: i32,
    #[serde(default)]
    pub repair_bonus: f64,
    #[serde(default = "default_factor")]
    pub mine_laying_factor: f64,
    #[serde(default)]
    pub immune_to_own_detonation: bool,
    #[serde(default)]
    pub starbase: bool,
    #[serde(default)]
    pub space_dock: i32,
    #[serde(default)]
    pub max_population: i32,
    #[serde(default)]
    pub range_bonus: i32,
    #[serde(default)]
    pub orbital_construction_hull: bool,
    pub slots: Vec<HullSlot>,
}

impl TechHull {
    /// Look up a slot by its 1-based index.
    pub fn slot(&self, index: i32) -> Option<&HullSlot> {
        if index < 1 {
            return None;
        }
        self.slots.get(index as usize - 1)
    }
}

/* --------------------------------------------------------------------------
   Components
   -------------------------------------------------------------------------- */

/// A component that fits into a hull slot. Every effect field defaults to
/// "no effect" so catalogs only list what a component actually does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechHullComponent {
    pub name: String,
    pub category: TechCategory,
    pub slot_type: ComponentSlotType,
    #[serde(default)]
    pub requirements: TechLevel,
    pub cost: Cost,
    #[serde(default)]
    pub mass: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,

    #[serde(default)]
    pub armor: i32,
    #[serde(default)]
    pub shield: i32,
    #[serde(default)]
    pub cloak_units: i32,
    #[serde(default)]
    pub scan_range: i32,
    #[serde(default)]
    pub scan_range_pen: i32,
    #[serde(default)]
    pub reduce_cloaking: bool,

    #[serde(default)]
    pub initiative_bonus: i32,
    #[serde(default)]
    pub power: i32,
    #[serde(default)]
    pub range: i32,
    #[serde(default)]
    pub initiative: i32,
    #[serde(default)]
    pub accuracy: i32,
    #[serde(default)]
    pub gatling: bool,
    #[serde(default)]
    pub beam_bonus: f64,
    #[serde(default)]
    pub torpedo_bonus: f64,
    #[serde(default)]
    pub beam_defense: f64,
    #[serde(default)]
    pub torpedo_jamming: f64,

    #[serde(default)]
    pub movement_bonus: i32,
    #[serde(default)]
    pub repair_bonus: f64,
    #[serde(default)]
    pub fuel_bonus: i32,
    #[serde(default)]
    pub fuel_generation: i32,
    #[serde(default)]
    pub cargo_bonus: i32,

    #[serde(default)]
    pub colonization_module: bool,
    #[serde(default)]
    pub orbital_construction_module: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mine_field_type: Option<MineFieldType>,
    #[serde(default)]
    pub mine_laying_rate: i32,
    #[serde(default)]
    pub mining_rate: i32,
    #[serde(default)]
    pub terraform_rate: i32,

    #[serde(default)]
    pub kill_rate: f64,
    #[serde(default)]
    pub min_kill_rate: i32,
    #[serde(default)]
    pub structure_destroy_rate: f64,
    #[serde(default)]
    pub unterraform_rate: i32,
    #[serde(default)]
    pub smart: bool,

    #[serde(default)]
    pub can_steal_fleet_cargo: bool,
    #[serde(default)]
    pub can_steal_planet_cargo: bool,

    #[serde(default)]
    pub safe_hull_mass: i32,
    #[serde(default)]
    pub safe_range: i32,
    #[serde(default)]
    pub can_jump: bool,
}

impl TechHullComponent {
    /// A bare component with no effects, for catalogs to build on.
    pub fn new(
        name: &str,
        category: TechCategory,
        slot_type: ComponentSlotType,
        requirements: TechLevel,
        cost: Cost,
        mass: i32,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            slot_type,
            requirements,
            cost,
            mass,
            engine: None,
            armor: 0,
            shield: 0,
            cloak_units: 0,
            scan_range: 0,
            scan_range_pen: 0,
            reduce_cloaking: false,
            initiative_bonus: 0,
            power: 0,
            range: 0,
            initiative: 0,
            accuracy: 0,
            gatling: false,
            beam_bonus: 0.0,
            torpedo_bonus: 0.0,
            beam_defense: 0.0,
            torpedo_jamming: 0.0,
            movement_bonus: 0,
            repair_bonus: 0.0,
            fuel_bonus: 0,
            fuel_generation: 0,
            cargo_bonus: 0,
            colonization_module: false,
            orbital_construction_module: false,
            mine_field_type: None,
            mine_laying_rate: 0,
            mining_rate: 0,
            terraform_rate: 0,
            kill_rate: 0.0,
            min_kill_rate: 0,
            structure_destroy_rate: 0.0,
            unterraform_rate: 0,
            smart: false,
            can_steal_fleet_cargo: false,
            can_steal_planet_cargo: false,
            safe_hull_mass: 0,
            safe_range: 0,
            can_jump: false,
        }
    }

    pub fn is_beam(&self) -> bool {
        self.category == TechCategory::BeamWeapon && self.power > 0
    }

    pub fn is_torpedo(&self) -> bool {
        self.category == TechCategory::Torpedo && self.power > 0
    }

    pub fn is_weapon(&self) -> bool {
        self.is_beam() || self.is_torpedo()
    }

    pub fn is_bomb(&self) -> bool {
        self.category == TechCategory::Bomb
    }
}

/* --------------------------------------------------------------------------
   Player cost
   -------------------------------------------------------------------------- */

/// How much cheaper techs get as a player out-researches them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniaturizationSpec {
    /// Cost reduction per level above the requirement.
    pub per_level: f64,
    /// Largest total reduction.
    pub max: f64,
}

impl Default for MiniaturizationSpec {
    fn default() -> Self {
        Self {
            per_level: 0.04,
            max: 0.75,
        }
    }
}

/// The cost of a tech for a player at `player_levels`.
pub fn player_cost(
    base: Cost,
    requirements: &TechLevel,
    player_levels: &TechLevel,
    miniaturization: &MiniaturizationSpec,
) -> Cost {
    let levels_above = player_levels.levels_above(requirements);
    let reduction = (miniaturization.per_level * levels_above as f64).min(miniaturization.max);
    base.multiply_f64(1.0 - reduction)
}
