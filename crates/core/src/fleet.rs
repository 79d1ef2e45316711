//! Fleets as far as ship designs are concerned: stacks of built ships that
//! reference a design by number.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Vector};

/// A stack of identical ships in a fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipToken {
    pub design_num: i32,
    pub quantity: i32,
    /// Damage carried by each damaged ship.
    #[serde(default)]
    pub damage: f64,
    #[serde(default)]
    pub quantity_damaged: i32,
}

impl ShipToken {
    pub fn new(design_num: i32, quantity: i32) -> Self {
        Self {
            design_num,
            quantity,
            damage: 0.0,
            quantity_damaged: 0,
        }
    }

    /// Apply mine damage to the whole stack. Existing damage is pooled with
    /// the new damage, whole ships are destroyed from the pool, and what is
    /// left is spread over the survivors. Returns ships destroyed.
    pub fn apply_mine_damage(&mut self, armor: i32, damage: i32) -> i32 {
        if self.quantity <= 0 || damage <= 0 {
            return 0;
        }
        if armor <= 0 {
            let destroyed = self.quantity;
            self.quantity = 0;
            self.damage = 0.0;
            self.quantity_damaged = 0;
            return destroyed;
        }

        let pool = self.damage * self.quantity_damaged as f64 + damage as f64;
        let destroyed = ((pool / armor as f64).floor() as i32).min(self.quantity);
        self.quantity -= destroyed;

        let remaining = pool - destroyed as f64 * armor as f64;
        if self.quantity == 0 || remaining <= 0.0 {
            self.damage = 0.0;
            self.quantity_damaged = 0;
        } else {
            self.quantity_damaged = self.quantity;
            self.damage = remaining / self.quantity as f64;
        }
        destroyed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fleet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub game_id: DbId,
    pub player_num: i32,
    pub num: i32,
    pub name: String,
    pub position: Vector,
    pub tokens: Vec<ShipToken>,
}

impl Fleet {
    pub fn new(game_id: DbId, player_num: i32, num: i32, name: &str, position: Vector) -> Self {
        Self {
            id: None,
            game_id,
            player_num,
            num,
            name: name.to_string(),
            position,
            tokens: Vec::new(),
        }
    }

    pub fn total_ships(&self) -> i32 {
        self.tokens.iter().map(|t| t.quantity).sum()
    }

    pub fn has_design(&self, design_num: i32) -> bool {
        self.tokens.iter().any(|t| t.design_num == design_num)
    }
}

/// Strip every token of `design_num` from `fleets`. Returns the fleets that
/// still have ships and must be saved, and the fleets left empty that must
/// be deleted. Fleets without the design are in neither list.
pub fn remove_design_from_fleets(fleets: Vec<Fleet>, design_num: i32) -> (Vec<Fleet>, Vec<Fleet>) {
    let mut to_update = Vec::new();
    let mut to_delete = Vec::new();

    for mut fleet in fleets.into_iter().filter(|f| f.has_design(design_num)) {
        fleet.tokens.retain(|t| t.design_num != design_num);
        if fleet.tokens.is_empty() {
            to_delete.push(fleet);
        } else {
            to_update.push(fleet);
        }
    }

    (to_update, to_delete)
}
