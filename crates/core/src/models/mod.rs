//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Number of seats at the table. Only 3, 4 and 5 player games have
/// difficulty values printed on the mission cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerCount(u8);

impl PlayerCount {
    /// Smallest supported table.
    pub const MIN: u8 = 3;
    /// Largest supported table.
    pub const MAX: u8 = 5;

    /// Raw player count.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Position of this player count inside a [`Difficulty`] triple.
    pub fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }
}

impl TryFrom<u8> for PlayerCount {
    type Error = GeneratorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GeneratorError::InvalidPlayerCount(value))
        }
    }
}

impl From<PlayerCount> for u8 {
    fn from(value: PlayerCount) -> Self {
        value.0
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per player-count difficulty values as printed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDifficulty", into = "RawDifficulty")]
pub struct Difficulty([i32; 3]);

impl Difficulty {
    /// Build from values for 3, 4 and 5 players.
    pub const fn new(values: [i32; 3]) -> Self {
        Self(values)
    }

    /// Same value regardless of table size.
    pub const fn flat(value: i32) -> Self {
        Self([value; 3])
    }

    /// Difficulty for the given table size.
    pub fn for_players(&self, players: PlayerCount) -> i32 {
        self.0[players.index()]
    }

    /// All three values.
    pub fn values(&self) -> [i32; 3] {
        self.0
    }
}

#[derive(Serialize, Deserialize)]
struct RawDifficulty {
    #[serde(rename = "3_players")]
    three: i32,
    #[serde(rename = "4_players")]
    four: i32,
    #[serde(rename = "5_players")]
    five: i32,
}

impl From<RawDifficulty> for Difficulty {
    fn from(raw: RawDifficulty) -> Self {
        Self([raw.three, raw.four, raw.five])
    }
}

impl From<Difficulty> for RawDifficulty {
    fn from(value: Difficulty) -> Self {
        let [three, four, five] = value.0;
        Self { three, four, five }
    }
}

/// A mission card from one of the mission sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    /// Card number. Not unique across sets.
    pub id: u32,
    /// Difficulty contribution per player count.
    pub difficulty: Difficulty,
    /// Card text.
    pub description: String,
}

/// Optional rule card drawn alongside the missions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    /// Short identifier (e.g. `radio-silence`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Symbol printed on the card.
    pub symbol: String,
    /// Flavour text.
    pub description: String,
    /// Amount of the difficulty budget this modifier consumes.
    pub difficulty_modifier: Difficulty,
    /// Additional rule the crew has to follow.
    pub rules_text: String,
}

impl Modifier {
    /// Returns a user-facing label combining symbol and name.
    pub fn display_name(&self) -> String {
        if self.symbol.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.symbol, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_count_bounds() {
        assert!(PlayerCount::try_from(2u8).is_err());
        assert!(PlayerCount::try_from(6u8).is_err());
        assert_eq!(PlayerCount::try_from(3u8).map(PlayerCount::index).ok(), Some(0));
        assert_eq!(PlayerCount::try_from(5u8).map(PlayerCount::index).ok(), Some(2));
    }

    #[test]
    fn difficulty_indexes_by_player_count() {
        let difficulty = Difficulty::new([2, 3, 4]);
        for (players, expected) in [(3u8, 2), (4, 3), (5, 4)] {
            let players = PlayerCount::try_from(players).expect("valid player count");
            assert_eq!(difficulty.for_players(players), expected);
        }
    }

    #[test]
    fn parses_keyed_difficulty() {
        let mission: Mission = serde_json::from_str(
            r#"{"id": 7, "difficulty": {"3_players": 1, "4_players": 2, "5_players": 3}, "description": "Win a trick with a 1"}"#,
        )
        .expect("valid mission json");
        assert_eq!(mission.id, 7);
        assert_eq!(mission.difficulty.values(), [1, 2, 3]);
    }
}
