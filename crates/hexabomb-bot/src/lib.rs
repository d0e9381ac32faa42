//! hexabomb bot - plays a hexabomb match through a netorcai server.
//!
//! The [`controller::TurnController`] logs in, waits for the match to start,
//! then answers every turn with the actions chosen by a
//! [`hexabomb_core::ActionPolicy`]. Moving bytes is left to a
//! [`client::ProtocolClient`] implementation.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod protocol;

pub use client::{JsonLinesClient, ProtocolClient};
pub use config::{BotConfig, ConfigError};
pub use controller::{ControllerState, MatchInfo, MatchSummary, TurnController};
pub use error::BotError;
pub use protocol::{ClientMessage, GameStateEnvelope, Role, ServerMessage};
