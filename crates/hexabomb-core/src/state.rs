//! Per-turn world snapshot.
//!
//! The server sends the whole board every turn. This module decodes that JSON
//! object into a [`GameState`]: cells keyed by coordinate, characters and
//! bombs in server order, and the per-color score tables.

use crate::hex::Coord;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Player color. `0` is reserved for neutral cells; player `n` plays color `n + 1`.
pub type Color = i32;

/// Character identifier, unique within one snapshot
pub type CharacterId = i32;

/// Color of unpainted cells
pub const NEUTRAL: Color = 0;

/// Color played by the netorcai player `player_id`
pub const fn player_color(player_id: i32) -> Color {
    player_id + 1
}

/// Errors raised while decoding a game state
#[derive(Debug, Error)]
pub enum StateError {
    #[error("malformed game state: {0}")]
    Decode(#[from] serde_json::Error),

    /// Keys must be written the way the server prints integers: no sign,
    /// padding or leading zeros, so that two keys never name the same color
    #[error("malformed game state: player color key {0:?} is not a canonical integer")]
    InvalidColorKey(String),
}

/// A board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub coord: Coord,
    /// Owning color, or 0 when nobody painted it yet
    pub color: Color,
}

/// A character on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Character {
    pub id: CharacterId,
    pub coord: Coord,
    pub color: Color,
    pub is_alive: bool,
    /// Turns left before a dead character can be revived.
    /// The server sends -1 for living characters.
    pub revive_delay: i32,
}

/// A bomb waiting to explode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bomb {
    /// Center of the explosion
    pub coord: Coord,
    /// Color painted on exploded cells
    pub color: Color,
    /// How many cells the blast reaches in each direction
    pub range: i32,
    /// Turns until explosion
    pub delay: i32,
}

impl Bomb {
    /// Whether `coord` lies within this bomb's blast radius
    pub fn reaches(&self, coord: &Coord) -> bool {
        self.range >= 0 && self.coord.distance_to(coord) <= self.range as u64
    }
}

/// Everything the server told us about one turn
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    pub cells: HashMap<Coord, Cell>,
    /// Characters in the order the server listed them
    pub characters: Vec<Character>,
    pub bombs: Vec<Bomb>,
    pub score: BTreeMap<Color, i32>,
    pub cell_count: BTreeMap<Color, i32>,
}

// Wire layout of a game state. Kept private: integer keys and domain names
// are only exposed once lowered into `GameState`.

#[derive(Debug, Deserialize)]
struct WireCell {
    q: i32,
    r: i32,
    color: Color,
}

#[derive(Debug, Deserialize)]
struct WireCharacter {
    id: CharacterId,
    q: i32,
    r: i32,
    color: Color,
    alive: bool,
    revive_delay: i32,
}

#[derive(Debug, Deserialize)]
struct WireBomb {
    q: i32,
    r: i32,
    color: Color,
    range: i32,
    delay: i32,
}

#[derive(Debug, Deserialize)]
struct WireGameState {
    cells: Vec<WireCell>,
    characters: Vec<WireCharacter>,
    bombs: Vec<WireBomb>,
    score: HashMap<String, i32>,
    cell_count: HashMap<String, i32>,
}

impl GameState {
    /// Decode a game state object as found in `GAME_STARTS` and `TURN` messages.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, StateError> {
        let wire = WireGameState::deserialize(value)?;
        Self::from_wire(wire)
    }

    /// Decode a game state from its JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, StateError> {
        let wire: WireGameState = serde_json::from_str(text)?;
        Self::from_wire(wire)
    }

    fn from_wire(wire: WireGameState) -> Result<Self, StateError> {
        let mut cells = HashMap::with_capacity(wire.cells.len());
        for c in wire.cells {
            let coord = Coord::new(c.q, c.r);
            // A repeated coordinate replaces the earlier cell
            cells.insert(coord, Cell { coord, color: c.color });
        }

        let characters = wire
            .characters
            .into_iter()
            .map(|c| Character {
                id: c.id,
                coord: Coord::new(c.q, c.r),
                color: c.color,
                is_alive: c.alive,
                revive_delay: c.revive_delay,
            })
            .collect();

        let bombs = wire
            .bombs
            .into_iter()
            .map(|b| Bomb {
                coord: Coord::new(b.q, b.r),
                color: b.color,
                range: b.range,
                delay: b.delay,
            })
            .collect();

        Ok(Self {
            cells,
            characters,
            bombs,
            score: color_table(wire.score)?,
            cell_count: color_table(wire.cell_count)?,
        })
    }

    /// Characters controlled by `color`, in server order
    pub fn characters_of(&self, color: Color) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(move |c| c.color == color)
    }

    pub fn cell_at(&self, coord: &Coord) -> Option<&Cell> {
        self.cells.get(coord)
    }

    /// Bombs whose blast would reach `coord`
    pub fn bombs_reaching<'a>(&'a self, coord: &'a Coord) -> impl Iterator<Item = &'a Bomb> + 'a {
        self.bombs.iter().filter(move |b| b.reaches(coord))
    }

    /// Score of `color`, 0 if the server did not list it
    pub fn score_of(&self, color: Color) -> i32 {
        self.score.get(&color).copied().unwrap_or(0)
    }

    /// Number of cells painted with `color`, 0 if the server did not list it
    pub fn cell_count_of(&self, color: Color) -> i32 {
        self.cell_count.get(&color).copied().unwrap_or(0)
    }
}

impl std::str::FromStr for GameState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

/// Turn a `{"1": 12, "2": 7}` table into integer-keyed form
fn color_table(raw: HashMap<String, i32>) -> Result<BTreeMap<Color, i32>, StateError> {
    raw.into_iter()
        .map(|(key, value)| match key.parse::<Color>() {
            Ok(color) if color.to_string() == key => Ok((color, value)),
            _ => Err(StateError::InvalidColorKey(key)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "cells": [
                {"q": 0, "r": 0, "color": 1},
                {"q": 1, "r": 0, "color": 0},
                {"q": 0, "r": 1, "color": 2}
            ],
            "characters": [
                {"id": 0, "q": 0, "r": 0, "color": 1, "alive": true, "revive_delay": -1},
                {"id": 1, "q": 0, "r": 1, "color": 2, "alive": false, "revive_delay": 2}
            ],
            "bombs": [
                {"q": 1, "r": 0, "color": 1, "range": 2, "delay": 3}
            ],
            "score": {"1": 10, "2": 4},
            "cell_count": {"1": 1, "2": 1}
        })
    }

    #[test]
    fn test_parse_full_state() {
        let state = GameState::from_json(&sample()).unwrap();

        assert_eq!(state.cells.len(), 3);
        assert_eq!(state.cell_at(&Coord::new(0, 1)).map(|c| c.color), Some(2));

        assert_eq!(
            state.characters[1],
            Character {
                id: 1,
                coord: Coord::new(0, 1),
                color: 2,
                is_alive: false,
                revive_delay: 2,
            }
        );
        assert_eq!(
            state.bombs,
            vec![Bomb { coord: Coord::new(1, 0), color: 1, range: 2, delay: 3 }]
        );
        assert_eq!(state.score, BTreeMap::from([(1, 10), (2, 4)]));
        assert_eq!(state.cell_count_of(2), 1);
        assert_eq!(state.score_of(3), 0);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = GameState::from_json(&sample()).unwrap();
        let second = GameState::from_json(&sample()).unwrap();
        assert_eq!(first, second);

        let text = sample().to_string();
        let third: GameState = text.parse().unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_duplicate_cell_last_write_wins() {
        let mut value = sample();
        value["cells"] = json!([
            {"q": 4, "r": -2, "color": 1},
            {"q": 4, "r": -2, "color": 3}
        ]);

        let state = GameState::from_json(&value).unwrap();
        assert_eq!(state.cells.len(), 1);
        assert_eq!(state.cell_at(&Coord::new(4, -2)).unwrap().color, 3);
    }

    #[test]
    fn test_missing_score_is_malformed() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("score");

        let err = GameState::from_json(&value).unwrap_err();
        assert!(matches!(err, StateError::Decode(_)));
        assert!(err.to_string().contains("score"), "{err}");
    }

    #[test]
    fn test_wrong_primitive_type_is_malformed() {
        let mut value = sample();
        value["characters"][0]["alive"] = json!("yes");
        assert!(matches!(
            GameState::from_json(&value),
            Err(StateError::Decode(_))
        ));
    }

    #[test]
    fn test_non_integer_color_key() {
        let mut value = sample();
        value["cell_count"] = json!({"red": 3});
        match GameState::from_json(&value) {
            Err(StateError::InvalidColorKey(key)) => assert_eq!(key, "red"),
            other => panic!("expected InvalidColorKey, got {other:?}"),
        }
    }

    #[test]
    fn test_player_color_skips_neutral() {
        assert_eq!(player_color(0), 1);
        assert_eq!(player_color(3), 4);
        assert_ne!(player_color(0), NEUTRAL);
    }

    #[test]
    fn test_color_keys_must_be_canonical() {
        for key in ["01", " 1", "+1", "1 ", "-0"] {
            let mut value = sample();
            value["score"] = json!({ key: 5 });
            match GameState::from_json(&value) {
                Err(StateError::InvalidColorKey(found)) => assert_eq!(found, key),
                other => panic!("{key:?} should be rejected, got {other:?}"),
            }
        }

        let mut value = sample();
        value["score"] = json!({"-1": 2, "0": 3, "12": 4});
        let state = GameState::from_json(&value).unwrap();
        assert_eq!(state.score, BTreeMap::from([(-1, 2), (0, 3), (12, 4)]));
    }

    #[test]
    fn test_aliased_color_keys_never_parse() {
        let mut value = sample();
        value["score"] = json!({"1": 5, "01": 7, " 1": 9, "+1": 11});

        for _ in 0..50 {
            assert!(matches!(
                GameState::from_json(&value),
                Err(StateError::InvalidColorKey(_))
            ));
        }
    }

    #[test]
    fn test_characters_of() {
        let state = GameState::from_json(&sample()).unwrap();
        let ids: Vec<_> = state.characters_of(1).map(|c| c.id).collect();
        assert_eq!(ids, vec![0]);
        assert_eq!(state.characters_of(7).count(), 0);
    }

    #[test]
    fn test_bombs_reaching() {
        let state = GameState::from_json(&sample()).unwrap();
        let origin = Coord::new(0, 0);
        let far = Coord::new(5, 0);
        assert_eq!(state.bombs_reaching(&origin).count(), 1);
        assert_eq!(state.bombs_reaching(&far).count(), 0);
    }

    #[test]
    fn test_bomb_reach_far_from_board() {
        let bomb = Bomb { coord: Coord::new(i32::MAX, i32::MIN), color: 1, range: 3, delay: 1 };
        assert!(!bomb.reaches(&Coord::new(i32::MIN, i32::MAX)));
        assert!(bomb.reaches(&Coord::new(i32::MAX - 3, i32::MIN + 3)));
    }
}
