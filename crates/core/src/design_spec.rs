//! The spec engine: aggregates a design's hull and components into a
//! [`ShipDesignSpec`] for a given player.

use std::collections::HashMap;

use crate::cloak::cloak_percent_for_units;
use crate::cost::Cost;
use crate::design_validation::validate_slot_layout;
use crate::error::CoreError;
use crate::fuel::estimated_range;
use crate::minefield::MineFieldType;
use crate::player::Player;
use crate::rules::Rules;
use crate::ship_design::{Bomb, ShipDesign, ShipDesignSlot, ShipDesignSpec};
use crate::tech::{player_cost, Engine, TechHull, TechLevel};
use crate::techs::TechStore;

/// Battle movement never drops below this.
pub const MIN_MOVEMENT: i32 = 2;
/// Battle movement never exceeds this.
pub const MAX_MOVEMENT: i32 = 10;

/// Running totals while walking the slots. Zero means absent until
/// [`SpecTotals::finish`] turns the totals into a spec.
#[derive(Default)]
struct SpecTotals {
    cost: Cost,
    mass: i32,
    armor: i32,
    shields: i32,
    cargo_capacity: i32,
    fuel_capacity: i32,
    fuel_generation: i32,
    initiative: i32,
    movement_bonus: i32,
    mining_rate: i32,
    terraform_rate: i32,
    cloak_units: i32,
    repair_bonus: f64,
    tech_level: TechLevel,

    engine: Engine,
    num_engines: i32,

    colonizer: bool,
    orbital_construction_module: bool,
    can_steal_fleet_cargo: bool,
    can_steal_planet_cargo: bool,
    can_jump: bool,

    // compounding products, all start at 1
    beam_bonus_factor: f64,
    torpedo_inaccuracy_factor: f64,
    beam_defense_factor: f64,
    torpedo_jamming_factor: f64,

    mine_laying_rates: HashMap<MineFieldType, i32>,
    bombs: Vec<Bomb>,
    smart_bombs: Vec<Bomb>,
    retro_bombs: Vec<Bomb>,

    weapon_slots: Vec<ShipDesignSlot>,
    beam_power: i32,
    // (power * quantity, accuracy percent) per torpedo slot
    torpedoes: Vec<(i32, i32)>,
    mine_sweep: i32,

    scan_range_sum: f64,
    scan_range_pen_sum: f64,
    tachyon_detectors: i32,

    safe_hull_mass: i32,
    safe_range: i32,
}

/// Compute the spec of `design` for `player`.
///
/// Fails with [`CoreError::UnknownTech`] when the hull or a component is
/// not in the catalog, and [`CoreError::Validation`] when the slots do not
/// fit the hull (see [`validate_slot_layout`]). Build counters are carried
/// over from the design's current spec.
pub fn compute_ship_design_spec(
    rules: &Rules,
    techs: &TechStore,
    player: &Player,
    design: &ShipDesign,
) -> Result<ShipDesignSpec, CoreError> {
    let hull = techs
        .hull(&design.hull)
        .ok_or_else(|| CoreError::UnknownTech(design.hull.clone()))?;
    validate_slot_layout(hull, &design.slots)?;
    let race = &player.race_spec;
    let levels = &player.tech_levels;

    let mut t = SpecTotals {
        cost: player_cost(hull.cost, &hull.requirements, levels, &race.miniaturization),
        mass: hull.mass,
        armor: hull.armor,
        cargo_capacity: hull.cargo_capacity,
        fuel_capacity: hull.fuel_capacity,
        fuel_generation: hull.fuel_generation,
        initiative: hull.initiative,
        repair_bonus: hull.repair_bonus,
        orbital_construction_module: hull.orbital_construction_hull,
        tech_level: hull.requirements,
        beam_bonus_factor: 1.0,
        torpedo_inaccuracy_factor: 1.0,
        beam_defense_factor: 1.0,
        torpedo_jamming_factor: 1.0,
        ..Default::default()
    };

    for slot in &design.slots {
        let component = techs
            .hull_component(&slot.hull_component)
            .ok_or_else(|| CoreError::UnknownTech(slot.hull_component.clone()))?;
        let q = slot.quantity;
        let qf = q as f64;

        t.tech_level = t.tech_level.max(&component.requirements);
        t.cost = t.cost
            + player_cost(component.cost, &component.requirements, levels, &race.miniaturization)
                .multiply_int(q);
        t.mass += component.mass * q;

        if let Some(engine) = &component.engine {
            t.engine = engine.clone();
            t.num_engines += q;
        }

        t.armor += component.armor * q;
        t.shields += component.shield * q;
        t.cargo_capacity += component.cargo_bonus * q;
        t.fuel_capacity += component.fuel_bonus * q;
        t.fuel_generation += component.fuel_generation * q;
        t.movement_bonus += component.movement_bonus * q;
        t.mining_rate += component.mining_rate * q;
        t.terraform_rate += component.terraform_rate * q;
        t.cloak_units += component.cloak_units * q;
        t.repair_bonus += component.repair_bonus * qf;
        t.initiative += component.initiative_bonus * q;

        t.colonizer |= component.colonization_module;
        t.orbital_construction_module |= component.orbital_construction_module;
        t.can_steal_fleet_cargo |= component.can_steal_fleet_cargo;
        t.can_steal_planet_cargo |= component.can_steal_planet_cargo;
        t.can_jump |= component.can_jump;

        if component.beam_bonus > 0.0 {
            t.beam_bonus_factor *= (1.0 + component.beam_bonus).powi(q);
        }
        if component.torpedo_bonus > 0.0 {
            t.torpedo_inaccuracy_factor *= (1.0 - component.torpedo_bonus).powi(q);
        }
        if component.beam_defense > 0.0 {
            t.beam_defense_factor *= (1.0 - component.beam_defense).powi(q);
        }
        if component.torpedo_jamming > 0.0 {
            t.torpedo_jamming_factor *= (1.0 - component.torpedo_jamming).powi(q);
        }

        if let Some(mine_field_type) = component.mine_field_type {
            if component.mine_laying_rate > 0 {
                let rate = (component.mine_laying_rate as f64 * qf * hull.mine_laying_factor)
                    .round() as i32;
                *t.mine_laying_rates.entry(mine_field_type).or_default() += rate;
            }
        }

        if component.is_bomb() {
            let bomb = Bomb::from_component(component, q);
            if component.unterraform_rate > 0 {
                t.retro_bombs.push(bomb);
            } else if component.smart {
                t.smart_bombs.push(bomb);
            } else {
                t.bombs.push(bomb);
            }
        }

        if component.is_weapon() {
            t.weapon_slots.push(slot.clone());
            if component.is_beam() {
                t.beam_power += component.power * q;
                let reach = component.range + hull.range_bonus;
                let gatling = if component.gatling { 4 } else { 1 };
                t.mine_sweep += component.power * q * reach * reach * gatling;
            } else {
                t.torpedoes.push((component.power * q, component.accuracy));
            }
        }

        if component.scan_range > 0 {
            t.scan_range_sum += qf * (component.scan_range as f64).powi(4);
        }
        if component.scan_range_pen > 0 {
            t.scan_range_pen_sum += qf * (component.scan_range_pen as f64).powi(4);
        }
        if component.reduce_cloaking {
            t.tachyon_detectors += q;
        }

        t.safe_hull_mass = t.safe_hull_mass.max(component.safe_hull_mass);
        t.safe_range = t.safe_range.max(component.safe_range);
    }

    t.cloak_units += race.built_in_cloak_units;

    Ok(t.finish(rules, player, design, hull))
}

impl SpecTotals {
    fn finish(
        self,
        rules: &Rules,
        player: &Player,
        design: &ShipDesign,
        hull: &TechHull,
    ) -> ShipDesignSpec {
        let race = &player.race_spec;
        let has_engines = self.num_engines > 0 && !hull.starbase;

        let power_rating = self.power_rating();

        let reduce_cloaking = (self.tachyon_detectors > 0).then(|| {
            let r = rules.tachyon_cloak_reduction as f64 / 100.0;
            1.0 - (1.0 - r).powf((self.tachyon_detectors as f64).sqrt())
        });

        let cloak_percent = cloak_percent_for_units(self.cloak_units);
        let cloak_percent_full_cargo = if self.cargo_capacity > 0 && self.mass > 0 {
            let scaled = (self.cloak_units as f64 * self.mass as f64
                / (self.mass + self.cargo_capacity) as f64)
                .round() as i32;
            cloak_percent_for_units(scaled)
        } else {
            cloak_percent
        };

        let movement = |mass: i32| {
            battle_movement(
                self.engine.ideal_speed,
                self.movement_bonus,
                mass,
                self.num_engines,
                rules.battle_movement_mass_per_engine,
            )
        };
        let range = |mass: i32| {
            estimated_range(
                mass,
                self.fuel_capacity,
                self.engine.ideal_speed,
                race.fuel_efficiency,
                &self.engine,
            )
        };
        let full_mass = self.mass + self.cargo_capacity;

        let scan_range = fourth_root(self.scan_range_sum);
        let scan_range_pen = fourth_root(self.scan_range_pen_sum);

        let mine_laying_rates = non_empty_map(self.mine_laying_rates);
        let bomber = !self.bombs.is_empty()
            || !self.smart_bombs.is_empty()
            || !self.retro_bombs.is_empty();

        ShipDesignSpec {
            armor: Some(self.armor),
            beam_bonus: positive_f64(self.beam_bonus_factor - 1.0),
            beam_defense: positive_f64(1.0 - self.beam_defense_factor),
            bomber: flag(bomber),
            bombs: non_empty(self.bombs),
            can_jump: flag(self.can_jump),
            can_lay_mines: flag(mine_laying_rates.is_some()),
            can_steal_fleet_cargo: flag(self.can_steal_fleet_cargo),
            can_steal_planet_cargo: flag(self.can_steal_planet_cargo),
            cargo_capacity: positive(self.cargo_capacity),
            cloak_percent: positive(cloak_percent),
            cloak_percent_full_cargo: positive(cloak_percent_full_cargo),
            cloak_units: positive(self.cloak_units),
            colonizer: flag(self.colonizer),
            cost: Some(self.cost),
            engine: self.engine.clone(),
            estimated_range: (has_engines && self.fuel_capacity > 0).then(|| range(self.mass)),
            estimated_range_full: (has_engines && self.fuel_capacity > 0 && self.cargo_capacity > 0)
                .then(|| range(full_mass)),
            fuel_capacity: positive(self.fuel_capacity),
            fuel_generation: positive(self.fuel_generation),
            has_weapons: flag(!self.weapon_slots.is_empty()),
            hull_type: Some(hull.category),
            immune_to_own_detonation: flag(hull.immune_to_own_detonation),
            initiative: positive(self.initiative),
            mass: Some(self.mass),
            max_hull_mass: positive(self.safe_hull_mass * rules.stargate_max_hull_mass_factor),
            max_population: positive(hull.max_population),
            max_range: positive(self.safe_range * rules.stargate_max_range_factor),
            mine_laying_rate_by_mine_type: mine_laying_rates,
            mine_sweep: positive(self.mine_sweep),
            mining_rate: positive(self.mining_rate),
            movement: has_engines.then(|| movement(self.mass)),
            movement_bonus: positive(self.movement_bonus),
            movement_full: (has_engines && self.cargo_capacity > 0).then(|| movement(full_mass)),
            num_built: design.spec.num_built,
            num_engines: positive(self.num_engines),
            num_instances: design.spec.num_instances,
            orbital_construction_module: flag(self.orbital_construction_module),
            power_rating: positive(power_rating),
            reduce_cloaking,
            repair_bonus: positive_f64(self.repair_bonus),
            retro_bombs: non_empty(self.retro_bombs),
            safe_hull_mass: positive(self.safe_hull_mass),
            safe_range: positive(self.safe_range),
            scanner: flag(scan_range > 0 || scan_range_pen > 0),
            scan_range: positive(scan_range),
            scan_range_pen: positive(scan_range_pen),
            shields: positive(self.shields),
            smart_bombs: non_empty(self.smart_bombs),
            space_dock: (hull.space_dock != 0).then_some(hull.space_dock),
            starbase: flag(hull.starbase),
            tech_level: self.tech_level,
            terraform_rate: positive(self.terraform_rate),
            torpedo_bonus: positive_f64(1.0 - self.torpedo_inaccuracy_factor),
            torpedo_jamming: positive_f64(1.0 - self.torpedo_jamming_factor),
            weapon_slots: non_empty(self.weapon_slots),
        }
    }

    /// Beam power boosted by capacitors plus torpedo power weighted by the
    /// chance to hit once battle computers are fitted.
    fn power_rating(&self) -> i32 {
        let beams = self.beam_power as f64 * self.beam_bonus_factor;
        let torpedoes: f64 = self
            .torpedoes
            .iter()
            .map(|&(power, accuracy)| {
                let miss = 1.0 - accuracy as f64 / 100.0;
                power as f64 * (1.0 - miss * self.torpedo_inaccuracy_factor)
            })
            .sum();
        (beams + torpedoes).round() as i32
    }
}

/// Battle movement in quarter squares per round.
pub fn battle_movement(
    ideal_speed: i32,
    movement_bonus: i32,
    mass: i32,
    num_engines: i32,
    mass_per_engine: i32,
) -> i32 {
    if num_engines <= 0 || mass_per_engine <= 0 {
        return MIN_MOVEMENT;
    }
    let movement = ideal_speed - 2 - mass / mass_per_engine / num_engines + movement_bonus;
    movement.clamp(MIN_MOVEMENT, MAX_MOVEMENT)
}

fn fourth_root(sum: f64) -> i32 {
    if sum <= 0.0 {
        0
    } else {
        sum.powf(0.25).round() as i32
    }
}

fn positive(v: i32) -> Option<i32> {
    (v > 0).then_some(v)
}

fn positive_f64(v: f64) -> Option<f64> {
    (v > 1e-9).then_some(v)
}

fn flag(b: bool) -> Option<bool> {
    b.then_some(true)
}

fn non_empty<T>(v: Vec<T>) -> Option<Vec<T>> {
    (!v.is_empty()).then_some(v)
}

fn non_empty_map<K, V>(m: HashMap<K, V>) -> Option<HashMap<K, V>> {
    (!m.is_empty()).then_some(m)
}
