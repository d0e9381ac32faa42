//! netorcai protocol messages exchanged with the game server.
//!
//! Every message is a JSON object tagged by `message_type`. Game states are
//! kept as raw JSON here; the controller decodes them with
//! [`GameState::from_json`](hexabomb_core::GameState::from_json) so that a
//! broken state is reported as such, not as a protocol error.

use crate::error::BotError;
use hexabomb_core::Action;
use serde::{Deserialize, Serialize};

/// Version of the netorcai metaprotocol this bot speaks
pub const METAPROTOCOL_VERSION: &str = "2.0.0";

/// Role requested at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Player,
    Visualization,
}

/// Messages sent from the bot to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// First message of a session
    Login {
        nickname: String,
        role: Role,
        metaprotocol_version: String,
    },

    /// Our actions for one turn
    TurnAck {
        turn_number: i64,
        actions: Vec<Action>,
    },
}

impl ClientMessage {
    pub fn login(nickname: impl Into<String>, role: Role) -> Self {
        ClientMessage::Login {
            nickname: nickname.into(),
            role,
            metaprotocol_version: METAPROTOCOL_VERSION.to_string(),
        }
    }
}

/// Game state envelope. netorcai wraps the game-specific state so that
/// visualizations and players can receive different views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateEnvelope {
    pub all_clients: serde_json::Value,
}

/// Messages sent from the server to the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    /// Login accepted
    LoginAck {
        #[serde(default)]
        metaprotocol_version: Option<String>,
    },

    /// The match begins
    GameStarts {
        player_id: i32,
        nb_turns_max: i64,
        initial_game_state: GameStateEnvelope,
        #[serde(default)]
        nb_players: Option<u32>,
        #[serde(default)]
        milliseconds_before_first_turn: Option<f64>,
        #[serde(default)]
        milliseconds_between_turns: Option<f64>,
    },

    /// A new turn with the current state of the world
    Turn {
        turn_number: i64,
        game_state: GameStateEnvelope,
    },

    /// The match is over
    GameEnds {
        #[serde(default)]
        winner_player_id: Option<i32>,
        #[serde(default)]
        game_state: Option<GameStateEnvelope>,
    },

    /// We have been removed from the session
    Kick { kick_reason: String },
}

impl ServerMessage {
    /// Decode one message from its JSON text.
    ///
    /// Text that is not JSON at all is a [`BotError::Codec`]. Valid JSON that
    /// is not a message we know (unknown `message_type`, missing or mistyped
    /// field) is a [`BotError::ProtocolViolation`].
    pub fn from_json_str(text: &str) -> Result<Self, BotError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        ServerMessage::deserialize(&value).map_err(|e| {
            let found = match value.get("message_type").and_then(|t| t.as_str()) {
                Some(message_type) => format!("{message_type} ({e})"),
                None => format!("untagged message ({e})"),
            };
            BotError::unexpected("a well-formed server message", found)
        })
    }

    /// Wire name of this message, for error reports
    pub fn message_type(&self) -> &'static str {
        match self {
            ServerMessage::LoginAck { .. } => "LOGIN_ACK",
            ServerMessage::GameStarts { .. } => "GAME_STARTS",
            ServerMessage::Turn { .. } => "TURN",
            ServerMessage::GameEnds { .. } => "GAME_ENDS",
            ServerMessage::Kick { .. } => "KICK",
        }
    }
}
