//! The parts of a player the design engine needs: research levels and the
//! racial traits that modify ship stats.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cost::Cost;
use crate::cost_calculator::QueueItemType;
use crate::tech::{MiniaturizationSpec, TechLevel};

/// Racial modifiers, computed once from the race's traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RaceSpec {
    /// Cloak units every ship gets for free.
    pub built_in_cloak_units: i32,
    /// Multiplier on engine fuel usage (0.85 with improved fuel efficiency).
    pub fuel_efficiency: f64,
    pub miniaturization: MiniaturizationSpec,
    /// Base cost of non-design production items.
    pub costs: HashMap<QueueItemType, Cost>,

    pub mine_field_base_decay_rate: f64,
    pub mine_field_planet_decay_rate: f64,
    pub mine_field_detonate_decay_rate: f64,
    pub mine_field_min_decay_factor: f64,
    pub mine_field_max_decay_rate: f64,
    pub mine_field_safe_warp_bonus: i32,
}

impl Default for RaceSpec {
    fn default() -> Self {
        Self {
            built_in_cloak_units: 0,
            fuel_efficiency: 1.0,
            miniaturization: MiniaturizationSpec::default(),
            costs: HashMap::from([
                (QueueItemType::Mine, Cost::new(0, 0, 0, 5)),
                (QueueItemType::Factory, Cost::new(0, 0, 4, 10)),
                (QueueItemType::Defenses, Cost::new(5, 5, 5, 15)),
                (QueueItemType::MineralAlchemy, Cost::new(0, 0, 0, 100)),
                (QueueItemType::TerraformEnvironment, Cost::new(0, 0, 0, 100)),
            ]),
            mine_field_base_decay_rate: 0.02,
            mine_field_planet_decay_rate: 0.04,
            mine_field_detonate_decay_rate: 0.25,
            mine_field_min_decay_factor: 1.0,
            mine_field_max_decay_rate: 0.5,
            mine_field_safe_warp_bonus: 0,
        }
    }
}

/// A player in a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub num: i32,
    pub name: String,
    pub tech_levels: TechLevel,
    #[serde(default)]
    pub race_spec: RaceSpec,
    /// Player numbers this player is allied with.
    #[serde(default)]
    pub friends: Vec<i32>,
}

impl Player {
    pub fn new(num: i32, name: &str, tech_levels: TechLevel) -> Self {
        Self {
            num,
            name: name.to_string(),
            tech_levels,
            race_spec: RaceSpec::default(),
            friends: Vec::new(),
        }
    }

    pub fn is_friend(&self, player_num: i32) -> bool {
        player_num == self.num || self.friends.contains(&player_num)
    }
}
