//! Mine fields: decay, sweeping, and damage to fleets that run into them.
//!
//! Damage follows the classic rules: a small fleet takes a flat hit scaled
//! by its first design's engines, a large fleet takes damage per engine.
//! Ram scoop engines attract more damage.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::fleet::Fleet;
use crate::player::{Player, RaceSpec};
use crate::rules::Rules;
use crate::ship_design::ShipDesignSpec;
use crate::types::{Vector, UNOWNED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MineFieldType {
    Standard,
    Heavy,
    SpeedBump,
}

impl MineFieldType {
    /// Only standard fields can be ordered to detonate.
    pub fn can_detonate(self) -> bool {
        self == MineFieldType::Standard
    }
}

impl fmt::Display for MineFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MineFieldType::Standard => f.write_str("Standard"),
            MineFieldType::Heavy => f.write_str("Heavy"),
            MineFieldType::SpeedBump => f.write_str("Speed Bump"),
        }
    }
}

/// Per-type tuning for mine fields. The `_rs` values apply to fleets with a
/// ram scoop engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineFieldStats {
    #[serde(rename = "minDamagePerFleetRS")]
    pub min_damage_per_fleet_rs: i32,
    #[serde(rename = "damagePerEngineRS")]
    pub damage_per_engine_rs: i32,
    pub max_speed: i32,
    pub chance_of_hit: f64,
    pub min_damage_per_fleet: i32,
    pub damage_per_engine: i32,
    pub sweep_factor: f64,
    pub min_decay: i32,
    pub can_detonate: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineFieldSpec {
    pub radius: f64,
    /// Mines lost per year, or `None` when we can't know (unowned fields).
    pub decay_rate: Option<i32>,
    pub can_detonate: bool,
}

/// Outcome of a fleet striking a mine field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineFieldDamage {
    pub damage: i32,
    pub ships_destroyed: i32,
    pub fleet_destroyed: bool,
}

/// Where a fleet's move stopped because it struck a mine field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MineFieldCollision {
    /// Index into the mine field slice that was checked.
    pub index: usize,
    pub distance_travelled: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineField {
    pub num: i32,
    pub player_num: i32,
    pub name: String,
    pub position: Vector,
    pub mine_field_type: MineFieldType,
    pub num_mines: i32,
    #[serde(default)]
    pub detonate: bool,
    #[serde(default)]
    pub spec: MineFieldSpec,
}

impl MineField {
    pub fn new(
        player: &Player,
        mine_field_type: MineFieldType,
        num_mines: i32,
        num: i32,
        position: Vector,
    ) -> Self {
        Self {
            num,
            player_num: player.num,
            name: format!("{} {} Mine Field #{}", player.name, mine_field_type, num),
            position,
            mine_field_type,
            num_mines,
            detonate: false,
            spec: MineFieldSpec::default(),
        }
    }

    /// A field covers a circle whose area is its mine count.
    pub fn radius(&self) -> f64 {
        (self.num_mines.max(0) as f64).sqrt()
    }

    pub fn owned(&self) -> bool {
        self.player_num != UNOWNED
    }

    pub fn owned_by(&self, player_num: i32) -> bool {
        self.player_num == player_num
    }

    pub fn compute_spec(&self, rules: &Rules, race: &RaceSpec, num_planets: i32) -> MineFieldSpec {
        MineFieldSpec {
            radius: self.radius(),
            decay_rate: self.decay_rate(rules, race, num_planets),
            can_detonate: self.mine_field_type.can_detonate(),
        }
    }

    /// Mines this field loses this year. Planets inside the field and
    /// detonation orders speed decay; each type has a floor and the race a
    /// ceiling on the rate.
    pub fn decay_rate(&self, rules: &Rules, race: &RaceSpec, num_planets: i32) -> Option<i32> {
        if !self.owned() {
            return None;
        }

        let mut rate = race.mine_field_base_decay_rate
            + race.mine_field_planet_decay_rate * num_planets as f64;
        if self.detonate {
            rate += race.mine_field_detonate_decay_rate;
        }
        rate *= race.mine_field_min_decay_factor;
        rate = rate.min(race.mine_field_max_decay_rate);

        let min_decay = rules.mine_field_stats(self.mine_field_type).min_decay;
        Some(min_decay.max((self.num_mines as f64 * rate + 0.5) as i32))
    }

    /// Shrink the field after a fleet strikes it.
    pub fn reduce_on_impact(&mut self) {
        let n = self.num_mines;
        self.num_mines = if n <= 10 {
            0
        } else if n <= 200 {
            n - 10
        } else if n <= 1000 {
            (n as f64 * 0.95) as i32
        } else if n <= 5000 {
            n - 50
        } else {
            (n as f64 * 0.95) as i32
        };
    }

    /// Sweep mines with a fleet at `fleet_position`. A fleet can only clear
    /// the part of the field between itself and the edge, so the mines
    /// within its distance from the center stay. Returns the number swept.
    pub fn sweep(&mut self, rules: &Rules, fleet_position: Vector, mine_sweep: i32) -> i32 {
        let dist_from_center = fleet_position.distance(self.position);
        let unreachable = (dist_from_center * dist_from_center).ceil() as i32;
        let sweepable = self.num_mines - unreachable;

        let sweep_factor = rules.mine_field_stats(self.mine_field_type).sweep_factor;
        let swept_by_fleet = (mine_sweep as f64 * sweep_factor) as i32;

        let old = self.num_mines;
        self.num_mines = (self.num_mines - sweepable.min(swept_by_fleet)).max(0);
        old - self.num_mines
    }

    /// Damage a fleet that struck this field. `specs` holds the spec of
    /// every design in the fleet, keyed by design number. Destroyed tokens
    /// are removed from the fleet.
    pub fn damage_fleet(
        &self,
        fleet: &mut Fleet,
        specs: &HashMap<i32, ShipDesignSpec>,
        stats: &MineFieldStats,
    ) -> MineFieldDamage {
        let spec_of = |design_num: i32| specs.get(&design_num);

        let has_ram_scoop = fleet
            .tokens
            .iter()
            .filter_map(|t| spec_of(t.design_num))
            .any(|s| s.engine.is_ram_scoop());

        let (min_damage, damage_per_engine) = if has_ram_scoop {
            (stats.min_damage_per_fleet_rs, stats.damage_per_engine_rs)
        } else {
            (stats.min_damage_per_fleet, stats.damage_per_engine)
        };

        let total_ships = fleet.total_ships();
        let mut total_damage = 0;
        let mut ships_destroyed = 0;

        if min_damage > 0 {
            let mut first_design_engines = 0;
            for token in fleet.tokens.iter_mut() {
                let Some(spec) = spec_of(token.design_num) else {
                    continue;
                };
                if self.detonate
                    && spec.is_immune_to_own_detonation()
                    && self.owned_by(fleet.player_num)
                {
                    continue;
                }

                let num_engines = spec.num_engines();
                let token_damage = if total_ships <= 5 {
                    if first_design_engines == 0 {
                        first_design_engines = num_engines;
                        first_design_engines * min_damage
                    } else if num_engines > first_design_engines {
                        damage_per_engine * (num_engines - first_design_engines) * token.quantity
                    } else {
                        continue;
                    }
                } else {
                    damage_per_engine * num_engines * token.quantity
                };

                total_damage += token_damage;
                ships_destroyed += token.apply_mine_damage(spec.armor(), token_damage);
            }
        }

        fleet.tokens.retain(|t| t.quantity > 0);

        MineFieldDamage {
            damage: total_damage,
            ships_destroyed,
            fleet_destroyed: total_ships <= ships_destroyed,
        }
    }

    /// Pull the field towards a mine layer at `position`. The more mines
    /// laid relative to the field's size, the further it moves.
    pub fn move_towards_mine_layer(&mut self, position: Vector, mines_laid: i32) {
        if self.num_mines <= 0 || position == self.position {
            return;
        }
        let total_dist = position.distance(self.position);
        let factor = (mines_laid as f64 / self.num_mines as f64).min(1.0);
        let heading = (position - self.position).normalize();
        self.position = (self.position + heading * (total_dist * factor)).round();
    }
}

/// Check whether a fleet moving `distance` light-years toward `dest` at
/// `warp` strikes a mine field. Fleets never strike their own fields or an
/// ally's, and fields only threaten fleets faster than their safe speed.
///
/// Each light-year inside a field is one roll against the field's hit
/// chance, scaled by how far over the safe speed the fleet is going.
pub fn check_for_mine_field_collision(
    rules: &Rules,
    players: &[Player],
    fleet: &Fleet,
    dest: Vector,
    warp: i32,
    distance: f64,
    mine_fields: &[MineField],
    rng: &mut impl Rng,
) -> Option<MineFieldCollision> {
    let player = |num: i32| players.iter().find(|p| p.num == num);
    let safe_warp_bonus = player(fleet.player_num)
        .map(|p| p.race_spec.mine_field_safe_warp_bonus)
        .unwrap_or(0);

    if distance <= 0.0 || dest == fleet.position {
        return None;
    }

    let from = fleet.position;
    let to = from + (dest - from).normalize() * distance;

    for (index, mine_field) in mine_fields.iter().enumerate() {
        if mine_field.owned_by(fleet.player_num) {
            continue;
        }
        if player(mine_field.player_num).is_some_and(|p| p.is_friend(fleet.player_num)) {
            continue;
        }

        let stats = rules.mine_field_stats(mine_field.mine_field_type);
        let safe_speed = stats.max_speed + safe_warp_bonus;
        if warp <= safe_speed {
            continue;
        }

        let radius = mine_field.radius();
        let Some(entry) = segment_intersects_circle(from, to, mine_field.position, radius) else {
            continue;
        };

        let light_years_in_field = radius.min(((1.0 - entry) * distance).ceil()) as i32;
        let light_years_before_field = entry * distance;
        let chance_to_hit = stats.chance_of_hit * (warp - safe_speed) as f64;

        for check in 0..light_years_in_field {
            if chance_to_hit >= rng.random::<f64>() {
                return Some(MineFieldCollision {
                    index,
                    distance_travelled: light_years_before_field + check as f64,
                });
            }
        }
    }

    None
}

/// Where a segment first enters a circle, as a fraction of the segment
/// from `from` to `to`. A segment that starts inside the circle enters at
/// zero.
pub fn segment_intersects_circle(from: Vector, to: Vector, center: Vector, radius: f64) -> Option<f64> {
    let d = to - from;
    let f = from - center;

    let c = f.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let a = d.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * f.dot(d);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::ShipToken;
    use crate::tech::{Engine, TechLevel};
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn player(num: i32) -> Player {
        Player::new(num, &format!("Player {num}"), TechLevel::default())
    }

    fn field(owner: i32, mines: i32, at: Vector) -> MineField {
        MineField::new(&player(owner), MineFieldType::Standard, mines, 1, at)
    }

    fn engine_spec(num_engines: i32, armor: i32, free_speed: i32) -> ShipDesignSpec {
        ShipDesignSpec {
            armor: Some(armor),
            num_engines: Some(num_engines),
            engine: Engine {
                ideal_speed: 6,
                free_speed,
                max_safe_speed: 9,
                fuel_usage: vec![],
            },
            ..Default::default()
        }
    }

    fn fleet_of(player_num: i32, tokens: Vec<ShipToken>) -> Fleet {
        let mut fleet = Fleet::new(1, player_num, 1, "Scout #1", Vector::ZERO);
        fleet.tokens = tokens;
        fleet
    }

    #[test]
    fn name_uses_display_type() {
        let mf = MineField::new(&player(2), MineFieldType::SpeedBump, 100, 4, Vector::ZERO);
        assert_eq!(mf.name, "Player 2 Speed Bump Mine Field #4");
        assert_eq!(mf.radius(), 10.0);
    }

    #[test]
    fn decay_has_a_floor_and_a_ceiling() {
        let rules = Rules::default();
        let race = RaceSpec::default();

        let small = field(1, 100, Vector::ZERO);
        assert_eq!(small.decay_rate(&rules, &race, 0), Some(10));

        let big = field(1, 10_000, Vector::ZERO);
        assert_eq!(big.decay_rate(&rules, &race, 0), Some(200));
        assert_eq!(big.decay_rate(&rules, &race, 1), Some(600));
        assert_eq!(big.decay_rate(&rules, &race, 20), Some(5000));

        let unowned = field(UNOWNED, 10_000, Vector::ZERO);
        assert_eq!(unowned.decay_rate(&rules, &race, 0), None);
    }

    #[test]
    fn reduce_on_impact_table() {
        let cases = [(5, 0), (150, 140), (1000, 950), (3000, 2950), (10_000, 9500)];
        for (before, after) in cases {
            let mut mf = field(1, before, Vector::ZERO);
            mf.reduce_on_impact();
            assert_eq!(mf.num_mines, after, "starting from {before}");
        }
    }

    #[test]
    fn sweep_leaves_mines_behind_the_fleet() {
        let rules = Rules::default();

        let mut mf = field(1, 400, Vector::ZERO);
        assert_eq!(mf.sweep(&rules, Vector::ZERO, 100), 100);
        assert_eq!(mf.num_mines, 300);

        // 10ly out, 100 mines are out of reach
        let mut mf = field(1, 400, Vector::ZERO);
        assert_eq!(mf.sweep(&rules, Vector::new(10.0, 0.0), 10_000), 300);
        assert_eq!(mf.num_mines, 100);
    }

    #[test]
    fn speed_bumps_resist_sweeping() {
        let rules = Rules::default();
        let mut mf = MineField::new(&player(1), MineFieldType::SpeedBump, 400, 1, Vector::ZERO);
        assert_eq!(mf.sweep(&rules, Vector::ZERO, 300), 100);
    }

    #[test]
    fn small_fleet_takes_flat_damage() {
        let rules = Rules::default();
        let stats = rules.mine_field_stats(MineFieldType::Standard);
        let mf = field(2, 1000, Vector::ZERO);

        let specs = HashMap::from([(1, engine_spec(1, 1000, 1))]);
        let mut fleet = fleet_of(1, vec![ShipToken::new(1, 2)]);

        let damage = mf.damage_fleet(&mut fleet, &specs, &stats);
        assert_eq!(damage.damage, 500);
        assert_eq!(damage.ships_destroyed, 0);
        assert!(!damage.fleet_destroyed);
        assert_eq!(fleet.tokens[0].quantity_damaged, 2);
    }

    #[test]
    fn ram_scoops_take_more_damage_and_can_die() {
        let rules = Rules::default();
        let stats = rules.mine_field_stats(MineFieldType::Standard);
        let mf = field(2, 1000, Vector::ZERO);

        let specs = HashMap::from([(1, engine_spec(1, 100, 6))]);
        let mut fleet = fleet_of(1, vec![ShipToken::new(1, 3)]);

        let damage = mf.damage_fleet(&mut fleet, &specs, &stats);
        assert_eq!(damage.damage, 600);
        assert_eq!(damage.ships_destroyed, 3);
        assert!(damage.fleet_destroyed);
        assert!(fleet.tokens.is_empty());
    }

    #[test]
    fn large_fleet_takes_damage_per_engine() {
        let rules = Rules::default();
        let stats = rules.mine_field_stats(MineFieldType::Standard);
        let mf = field(2, 1000, Vector::ZERO);

        let specs = HashMap::from([(1, engine_spec(2, 10_000, 1))]);
        let mut fleet = fleet_of(1, vec![ShipToken::new(1, 6)]);

        let damage = mf.damage_fleet(&mut fleet, &specs, &stats);
        assert_eq!(damage.damage, 100 * 2 * 6);
    }

    #[test]
    fn speed_bumps_do_no_damage() {
        let rules = Rules::default();
        let stats = rules.mine_field_stats(MineFieldType::SpeedBump);
        let mf = MineField::new(&player(2), MineFieldType::SpeedBump, 1000, 1, Vector::ZERO);

        let specs = HashMap::from([(1, engine_spec(1, 100, 1))]);
        let mut fleet = fleet_of(1, vec![ShipToken::new(1, 1)]);
        assert_eq!(mf.damage_fleet(&mut fleet, &specs, &stats), MineFieldDamage::default());
    }

    #[test]
    fn segment_intersection() {
        let c = Vector::new(10.0, 0.0);
        let t = segment_intersects_circle(Vector::ZERO, Vector::new(20.0, 0.0), c, 5.0);
        assert_matches!(t, Some(t) if (t - 0.25).abs() < 1e-9);

        assert_eq!(
            segment_intersects_circle(Vector::new(0.0, 10.0), Vector::new(20.0, 10.0), c, 5.0),
            None
        );
        assert_eq!(
            segment_intersects_circle(Vector::ZERO, Vector::new(2.0, 0.0), c, 5.0),
            None
        );
        assert_eq!(segment_intersects_circle(c, Vector::ZERO, c, 5.0), Some(0.0));
    }

    #[test]
    fn collision_skips_own_allied_and_slow_fleets() {
        let rules = Rules::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut ally = player(2);
        ally.friends.push(1);
        let players = vec![player(1), ally, player(3)];

        let fleet = fleet_of(1, vec![ShipToken::new(1, 1)]);
        let dest = Vector::new(100.0, 0.0);

        let own = vec![field(1, 2500, Vector::new(50.0, 0.0))];
        let allied = vec![field(2, 2500, Vector::new(50.0, 0.0))];
        let enemy = vec![field(3, 2500, Vector::new(50.0, 0.0))];

        let check = |fields: &[MineField], warp: i32, rng: &mut StdRng| {
            check_for_mine_field_collision(&rules, &players, &fleet, dest, warp, 100.0, fields, rng)
        };

        assert_eq!(check(&own, 10, &mut rng), None);
        assert_eq!(check(&allied, 10, &mut rng), None);
        assert_eq!(check(&enemy, 4, &mut rng), None);
    }

    #[test]
    fn fast_fleet_through_enemy_field_stops_inside_it() {
        let mut rules = Rules::default();
        rules
            .mine_field_stats_by_type
            .get_mut(&MineFieldType::Standard)
            .unwrap()
            .chance_of_hit = 1.0;
        let mut rng = StdRng::seed_from_u64(1);
        let players = vec![player(1), player(3)];
        let fleet = fleet_of(1, vec![ShipToken::new(1, 1)]);
        let fields = vec![field(3, 100, Vector::new(50.0, 0.0))];

        let hit = check_for_mine_field_collision(
            &rules,
            &players,
            &fleet,
            Vector::new(100.0, 0.0),
            9,
            100.0,
            &fields,
            &mut rng,
        );
        assert_matches!(hit, Some(MineFieldCollision { index: 0, distance_travelled }) if (distance_travelled - 40.0).abs() < 1e-9);
    }

    #[test]
    fn move_towards_layer_is_proportional() {
        let mut mf = field(1, 100, Vector::ZERO);
        mf.move_towards_mine_layer(Vector::new(10.0, 0.0), 50);
        assert_eq!(mf.position, Vector::new(5.0, 0.0));

        let mut mf = field(1, 100, Vector::ZERO);
        mf.move_towards_mine_layer(Vector::new(10.0, 0.0), 500);
        assert_eq!(mf.position, Vector::new(10.0, 0.0));
    }
}
