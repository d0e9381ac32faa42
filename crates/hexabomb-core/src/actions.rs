//! Actions a bot can send for its characters.
//!
//! Every turn the bot answers with at most one action per character it
//! controls. On the wire an action is a flat object carrying the character
//! `id` and a `movement` tag, e.g. `{"id": 3, "movement": "move", "direction": "x+"}`.

use crate::hex::{Coord, Direction};
use crate::state::CharacterId;
use serde::{Deserialize, Serialize};

/// What a character does this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "movement", rename_all = "snake_case")]
pub enum ActionKind {
    /// Walk one cell
    Move { direction: Direction },
    /// Drop a bomb on the character's current cell
    Bomb { bomb_delay: i32, bomb_range: i32 },
    /// Revive a dead character on the given cell
    Revive { revive_q: i32, revive_r: i32 },
}

/// An action bound to one character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub id: CharacterId,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl Action {
    pub fn movement(id: CharacterId, direction: Direction) -> Self {
        Self { id, kind: ActionKind::Move { direction } }
    }

    pub fn bomb(id: CharacterId, delay: i32, range: i32) -> Self {
        Self {
            id,
            kind: ActionKind::Bomb { bomb_delay: delay, bomb_range: range },
        }
    }

    pub fn revive(id: CharacterId, at: Coord) -> Self {
        Self {
            id,
            kind: ActionKind::Revive { revive_q: at.q, revive_r: at.r },
        }
    }
}
