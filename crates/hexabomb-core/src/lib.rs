//! Hexabomb - game model and decision making for a hexabomb bot
//!
//! This crate provides everything a bot needs between receiving a turn and
//! answering it:
//! - Axial hex coordinates and the six movement directions
//! - The per-turn world snapshot (cells, characters, bombs, scores)
//! - The actions a bot can send back
//! - Pluggable action policies, with a random reference policy
//!
//! # Modules
//!
//! - [`hex`]: Coordinates and directions
//! - [`state`]: Game state snapshot and its JSON decoding
//! - [`actions`]: Outgoing per-character actions
//! - [`bot`]: Action policies and the `Bot` wrapper

pub mod actions;
pub mod bot;
pub mod hex;
pub mod state;

// Re-export commonly used types
pub use actions::{Action, ActionKind};
pub use bot::{ActionPolicy, Bot, RandomPolicy};
pub use hex::{Coord, Direction};
pub use state::{
    player_color, Bomb, Cell, Character, CharacterId, Color, GameState, StateError, NEUTRAL,
};
