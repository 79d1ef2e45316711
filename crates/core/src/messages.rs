//! Turn messages players receive about mine field events.

use serde::{Deserialize, Serialize};

use crate::fleet::Fleet;
use crate::minefield::{MineField, MineFieldDamage};
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMessageType {
    MineFieldHit,
    MinesLaid,
    MinesSwept,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMessageTargetType {
    Fleet,
    MineField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMessageTarget {
    #[serde(rename = "targetType")]
    pub target_type: PlayerMessageTargetType,
    #[serde(rename = "targetNum")]
    pub num: i32,
    #[serde(rename = "targetPlayerNum")]
    pub player_num: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMessage {
    #[serde(rename = "type")]
    pub message_type: PlayerMessageType,
    pub text: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub target: Option<PlayerMessageTarget>,
}

impl PlayerMessage {
    fn about_fleet(message_type: PlayerMessageType, text: String, fleet: &Fleet) -> Self {
        Self {
            message_type,
            text,
            target: Some(PlayerMessageTarget {
                target_type: PlayerMessageTargetType::Fleet,
                num: fleet.num,
                player_num: fleet.player_num,
            }),
        }
    }
}

fn at(mine_field: &MineField) -> String {
    format!("({:.0}, {:.0})", mine_field.position.x, mine_field.position.y)
}

/// Tell `recipient` that `fleet` struck `mine_field`. The recipient owns
/// either the fleet or the field, and the wording differs accordingly.
pub fn fleet_hit_mine_field(
    recipient: &Player,
    fleet: &Fleet,
    fleet_owner: &Player,
    mine_field: &MineField,
    damage: &MineFieldDamage,
) -> PlayerMessage {
    let kind = mine_field.mine_field_type;
    let pos = at(mine_field);

    let text = if fleet.player_num == recipient.num {
        if damage.fleet_destroyed {
            format!("{} has been annihilated in a {kind} mine field at {pos}.", fleet.name)
        } else if damage.damage == 0 {
            format!("{} has been stopped in a {kind} mine field at {pos}.", fleet.name)
        } else if damage.ships_destroyed > 0 {
            format!(
                "{} has been stopped in a {kind} mine field at {pos}. Your fleet has taken {} damage points and {} ships were destroyed.",
                fleet.name, damage.damage, damage.ships_destroyed
            )
        } else {
            format!(
                "{} has been stopped in a {kind} mine field at {pos}. Your fleet has taken {} damage points but none of your ships were destroyed.",
                fleet.name, damage.damage
            )
        }
    } else if damage.fleet_destroyed {
        format!(
            "{} {} has been annihilated in your {kind} mine field at {pos}.",
            fleet_owner.name, fleet.name
        )
    } else if damage.damage == 0 {
        format!(
            "{} {} has been stopped in your {kind} mine field at {pos}.",
            fleet_owner.name, fleet.name
        )
    } else if damage.ships_destroyed > 0 {
        format!(
            "{} {} has been stopped in your {kind} mine field at {pos}. Your mines have inflicted {} damage points and destroyed {} ships.",
            fleet_owner.name, fleet.name, damage.damage, damage.ships_destroyed
        )
    } else {
        format!(
            "{} {} has been stopped in your {kind} mine field at {pos}. Your mines have inflicted {} damage points but you didn't manage to destroy any ships.",
            fleet_owner.name, fleet.name, damage.damage
        )
    };

    PlayerMessage::about_fleet(PlayerMessageType::MineFieldHit, text, fleet)
}

pub fn fleet_mines_laid(fleet: &Fleet, mine_field: &MineField, mines_laid: i32) -> PlayerMessage {
    let text = if mine_field.num_mines == mines_laid {
        format!("{} has dispersed {mines_laid} mines.", fleet.name)
    } else {
        format!("{} has increased a mine field by {mines_laid} mines.", fleet.name)
    };
    PlayerMessage::about_fleet(PlayerMessageType::MinesLaid, text, fleet)
}

pub fn fleet_mines_laid_failed(fleet: &Fleet) -> PlayerMessage {
    let text = format!(
        "{} has attempted to lay mines. The order has been cancelled because the fleet has no mine layers.",
        fleet.name
    );
    PlayerMessage::about_fleet(PlayerMessageType::Invalid, text, fleet)
}

/// Tell `recipient` about a sweep. Fields swept down to almost nothing are
/// about to disappear, so those messages point at the fleet instead.
pub fn fleet_mine_field_swept(
    recipient: &Player,
    fleet: &Fleet,
    mine_field: &MineField,
    mines_swept: i32,
) -> PlayerMessage {
    let own_fleet = fleet.player_num == recipient.num;
    let text = if own_fleet {
        format!("{} has swept {mines_swept} mines from a mine field at {}.", fleet.name, at(mine_field))
    } else {
        format!("Someone has swept {mines_swept} mines from your mine field at {}.", at(mine_field))
    };

    let target = if mine_field.num_mines <= 10 {
        own_fleet.then_some(PlayerMessageTarget {
            target_type: PlayerMessageTargetType::Fleet,
            num: fleet.num,
            player_num: fleet.player_num,
        })
    } else {
        Some(PlayerMessageTarget {
            target_type: PlayerMessageTargetType::MineField,
            num: mine_field.num,
            player_num: mine_field.player_num,
        })
    };

    PlayerMessage {
        message_type: PlayerMessageType::MinesSwept,
        text,
        target,
    }
}
