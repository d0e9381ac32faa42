//! Turn controller: drives one match from login to the last turn.
//!
//! The controller is strictly sequential. It waits for a message, answers it,
//! and only then asks for the next one, so the actions of turn `n` are sent
//! before turn `n + 1` is read. It never times out on its own: the server owns
//! the turn deadlines and kicks bots that miss them.

use crate::client::ProtocolClient;
use crate::error::BotError;
use crate::protocol::{ClientMessage, Role, ServerMessage};
use hexabomb_core::{player_color, ActionPolicy, Bot, Color, GameState, RandomPolicy};
use tracing::{debug, info, trace, warn};

/// Where the controller stands in the match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Disconnected,
    Connected,
    LoggedIn,
    AwaitingStart,
    /// Waiting for, then answering, turn `n` of the loop
    InTurn(i64),
    /// Actions of turn `n` sent
    AwaitingAck(i64),
    /// Terminal; no further message is sent or read
    MatchEnded,
}

/// What the server told us when the match started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchInfo {
    pub player_id: i32,
    pub color: Color,
    pub nb_turns_max: i64,
}

/// Outcome of a match that ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub info: MatchInfo,
    /// Number of turns we answered
    pub turns_played: u32,
    /// `turn_number` of the last turn we answered
    pub last_turn_number: Option<i64>,
    /// The server sent `GAME_ENDS` before the turn loop ran out
    pub ended_by_server: bool,
}

/// Plays one match over a [`ProtocolClient`].
pub struct TurnController<C, P = RandomPolicy> {
    client: C,
    nickname: String,
    bot: Bot<P>,
    state: ControllerState,
    history: Vec<ControllerState>,
}

impl<C: ProtocolClient, P: ActionPolicy> TurnController<C, P> {
    /// The bot's color is assigned once the server tells us our player id.
    pub fn new(client: C, nickname: impl Into<String>, bot: Bot<P>) -> Self {
        Self {
            client,
            nickname: nickname.into(),
            bot,
            state: ControllerState::Disconnected,
            history: vec![ControllerState::Disconnected],
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Every state entered so far, oldest first
    pub fn history(&self) -> &[ControllerState] {
        &self.history
    }

    pub fn into_client(self) -> C {
        self.client
    }

    /// Play the whole match.
    ///
    /// Any error stops the match at once: nothing more is sent, and the
    /// controller ends in [`ControllerState::MatchEnded`] either way.
    pub fn run(&mut self) -> Result<MatchSummary, BotError> {
        let result = self.play();
        // The error itself is reported by the caller
        if result.is_err() {
            warn!(state = ?self.state, "match aborted");
        }
        self.enter(ControllerState::MatchEnded);
        result
    }

    fn play(&mut self) -> Result<MatchSummary, BotError> {
        info!("connecting to netorcai");
        self.client.connect()?;
        self.enter(ControllerState::Connected);

        self.login()?;
        let info = self.await_start()?;

        let mut summary = MatchSummary {
            info,
            turns_played: 0,
            last_turn_number: None,
            ended_by_server: false,
        };

        // Turns 1..nb_turns_max, the last one is never read
        for turn in 1..info.nb_turns_max {
            self.enter(ControllerState::InTurn(turn));
            debug!(turn, "waiting for TURN");

            let (turn_number, game_state) = match self.client.recv()? {
                ServerMessage::Turn { turn_number, game_state } => (turn_number, game_state),
                ServerMessage::GameEnds { winner_player_id, .. } => {
                    info!(?winner_player_id, turn, "server ended the game");
                    summary.ended_by_server = true;
                    break;
                }
                other => return Err(reject("TURN", other)),
            };

            let state = GameState::from_json(&game_state.all_clients)?;
            let actions = self.bot.choose_actions(&state);
            debug!(turn_number, ?actions, "sending actions");

            self.client.send(&ClientMessage::TurnAck { turn_number, actions })?;
            self.enter(ControllerState::AwaitingAck(turn));

            summary.turns_played += 1;
            summary.last_turn_number = Some(turn_number);
        }

        info!(
            turns_played = summary.turns_played,
            ended_by_server = summary.ended_by_server,
            "match over"
        );
        Ok(summary)
    }

    fn enter(&mut self, state: ControllerState) {
        trace!(from = ?self.state, to = ?state, "state change");
        self.state = state;
        self.history.push(state);
    }

    fn login(&mut self) -> Result<(), BotError> {
        info!(nickname = %self.nickname, "logging in as a player");
        self.client
            .send(&ClientMessage::login(self.nickname.as_str(), Role::Player))?;

        match self.client.recv()? {
            ServerMessage::LoginAck { .. } => {
                self.enter(ControllerState::LoggedIn);
                Ok(())
            }
            other => Err(reject("LOGIN_ACK", other)),
        }
    }

    fn await_start(&mut self) -> Result<MatchInfo, BotError> {
        self.enter(ControllerState::AwaitingStart);
        info!("waiting for GAME_STARTS");

        let (player_id, nb_turns_max, initial_game_state) = match self.client.recv()? {
            ServerMessage::GameStarts {
                player_id,
                nb_turns_max,
                initial_game_state,
                ..
            } => (player_id, nb_turns_max, initial_game_state),
            other => return Err(reject("GAME_STARTS", other)),
        };

        // Only checked here; the turn loop gets a fresh state every turn
        let initial = GameState::from_json(&initial_game_state.all_clients)?;
        let color = player_color(player_id);
        self.bot.color = color;

        info!(
            player_id,
            color,
            nb_turns_max,
            cells = initial.cells.len(),
            characters = initial.characters_of(color).count(),
            "game starts"
        );

        Ok(MatchInfo {
            player_id,
            color,
            nb_turns_max,
        })
    }
}

/// Error for a message that has no business arriving now
fn reject(expected: &'static str, message: ServerMessage) -> BotError {
    match message {
        ServerMessage::Kick { kick_reason } => BotError::Kicked(kick_reason),
        other => BotError::unexpected(expected, other.message_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Answers `recv` from a fixed queue and counts sends
    struct Canned {
        inbox: VecDeque<ServerMessage>,
        sent: usize,
    }

    impl ProtocolClient for Canned {
        fn connect(&mut self) -> Result<(), BotError> {
            Ok(())
        }

        fn send(&mut self, _message: &ClientMessage) -> Result<(), BotError> {
            self.sent += 1;
            Ok(())
        }

        fn recv(&mut self) -> Result<ServerMessage, BotError> {
            self.inbox.pop_front().ok_or(BotError::Disconnected)
        }
    }

    #[test]
    fn test_starts_disconnected() {
        let client = Canned { inbox: VecDeque::new(), sent: 0 };
        let controller = TurnController::new(client, "t", Bot::with_seed(0, 1));
        assert_eq!(controller.state(), ControllerState::Disconnected);
    }

    #[test]
    fn test_kick_during_login() {
        let client = Canned {
            inbox: VecDeque::from([ServerMessage::Kick { kick_reason: "bad nickname".into() }]),
            sent: 0,
        };
        let mut controller = TurnController::new(client, "t", Bot::with_seed(0, 1));

        match controller.run() {
            Err(BotError::Kicked(reason)) => assert_eq!(reason, "bad nickname"),
            other => panic!("expected kick, got {other:?}"),
        }
        // LOGIN_ACK never came, so LoggedIn is never entered
        assert_eq!(
            controller.history(),
            [
                ControllerState::Disconnected,
                ControllerState::Connected,
                ControllerState::MatchEnded,
            ]
        );
        assert_eq!(controller.into_client().sent, 1);
    }

    #[test]
    fn test_wrong_message_before_start() {
        let client = Canned {
            inbox: VecDeque::from([
                ServerMessage::LoginAck { metaprotocol_version: None },
                ServerMessage::LoginAck { metaprotocol_version: None },
            ]),
            sent: 0,
        };
        let mut controller = TurnController::new(client, "t", Bot::with_seed(0, 1));

        match controller.run() {
            Err(BotError::ProtocolViolation { expected, found }) => {
                assert_eq!(expected, "GAME_STARTS");
                assert_eq!(found, "LOGIN_ACK");
            }
            other => panic!("expected protocol violation, got {other:?}"),
        }
    }
}
