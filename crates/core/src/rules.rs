//! Game-wide constants that tune the spec engine and mine fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::minefield::{MineFieldStats, MineFieldType};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    pub mine_field_stats_by_type: HashMap<MineFieldType, MineFieldStats>,
    /// Percent of cloaking a single tachyon detector removes.
    pub tachyon_cloak_reduction: i32,
    /// Stargates can push this many times their safe hull mass.
    pub stargate_max_hull_mass_factor: i32,
    /// Stargates can push this many times their safe range.
    pub stargate_max_range_factor: i32,
    /// Mass, in kT, that costs one point of battle movement per engine.
    pub battle_movement_mass_per_engine: i32,
}

impl Default for Rules {
    fn default() -> Self {
        let mine_field_stats_by_type = HashMap::from([
            (
                MineFieldType::Standard,
                MineFieldStats {
                    min_damage_per_fleet_rs: 600,
                    damage_per_engine_rs: 125,
                    max_speed: 4,
                    chance_of_hit: 0.003,
                    min_damage_per_fleet: 500,
                    damage_per_engine: 100,
                    sweep_factor: 1.0,
                    min_decay: 10,
                    can_detonate: true,
                },
            ),
            (
                MineFieldType::Heavy,
                MineFieldStats {
                    min_damage_per_fleet_rs: 2500,
                    damage_per_engine_rs: 600,
                    max_speed: 6,
                    chance_of_hit: 0.01,
                    min_damage_per_fleet: 2000,
                    damage_per_engine: 500,
                    sweep_factor: 1.0,
                    min_decay: 10,
                    can_detonate: false,
                },
            ),
            (
                MineFieldType::SpeedBump,
                MineFieldStats {
                    min_damage_per_fleet_rs: 0,
                    damage_per_engine_rs: 0,
                    max_speed: 5,
                    chance_of_hit: 0.035,
                    min_damage_per_fleet: 0,
                    damage_per_engine: 0,
                    sweep_factor: 1.0 / 3.0,
                    min_decay: 2,
                    can_detonate: false,
                },
            ),
        ]);

        Self {
            mine_field_stats_by_type,
            tachyon_cloak_reduction: 5,
            stargate_max_hull_mass_factor: 5,
            stargate_max_range_factor: 5,
            battle_movement_mass_per_engine: 70,
        }
    }
}

impl Rules {
    /// Stats for a mine field type. Types missing from a custom rule set
    /// fall back to harmless defaults.
    pub fn mine_field_stats(&self, mine_field_type: MineFieldType) -> MineFieldStats {
        self.mine_field_stats_by_type
            .get(&mine_field_type)
            .copied()
            .unwrap_or_default()
    }
}
