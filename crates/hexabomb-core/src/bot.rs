//! Action selection for a hexabomb bot.
//!
//! A policy maps one game state to the actions of the characters we control.
//! Policies keep no memory between turns; the random source is handed in by
//! the caller so that a seeded generator replays the same match.

use crate::actions::Action;
use crate::hex::{Coord, Direction};
use crate::state::{Color, GameState};
use rand::prelude::*;

/// Delay of the bombs dropped by [`RandomPolicy`]
pub const BOMB_DELAY: i32 = 3;

/// Range of the bombs dropped by [`RandomPolicy`]
pub const BOMB_RANGE: i32 = 3;

/// Cell targeted by revive actions of [`RandomPolicy`]
pub const REVIVE_TARGET: Coord = Coord::new(0, 0);

/// Decides what our characters do this turn.
///
/// Implementations must return at most one action per character of
/// `own_color`, and never an action for another color's character.
pub trait ActionPolicy {
    fn decide(&self, state: &GameState, own_color: Color, rng: &mut dyn RngCore) -> Vec<Action>;
}

/// Picks one of the eight possible actions uniformly for every own character,
/// dead or alive.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Number of distinct actions the policy draws from
    pub const CHOICES: usize = 8;
}

impl ActionPolicy for RandomPolicy {
    fn decide(&self, state: &GameState, own_color: Color, rng: &mut dyn RngCore) -> Vec<Action> {
        state
            .characters_of(own_color)
            .map(|character| {
                let id = character.id;
                match rng.gen_range(0..Self::CHOICES) {
                    n @ 0..=5 => Action::movement(id, Direction::ALL[n]),
                    6 => Action::bomb(id, BOMB_DELAY, BOMB_RANGE),
                    _ => Action::revive(id, REVIVE_TARGET),
                }
            })
            .collect()
    }
}

/// A bot player: its color, a policy and the random source fed to it
pub struct Bot<P = RandomPolicy> {
    pub color: Color,
    pub policy: P,
    rng: StdRng,
}

impl Bot<RandomPolicy> {
    pub fn new(color: Color) -> Self {
        Self::with_policy(color, RandomPolicy, StdRng::from_entropy())
    }

    pub fn with_seed(color: Color, seed: u64) -> Self {
        Self::with_policy(color, RandomPolicy, StdRng::seed_from_u64(seed))
    }
}

impl<P: ActionPolicy> Bot<P> {
    pub fn with_policy(color: Color, policy: P, rng: StdRng) -> Self {
        Self { color, policy, rng }
    }

    /// Choose this turn's actions
    pub fn choose_actions(&mut self, state: &GameState) -> Vec<Action> {
        self.policy.decide(state, self.color, &mut self.rng)
    }
}

impl<P> std::fmt::Debug for Bot<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot").field("color", &self.color).finish_non_exhaustive()
    }
}
