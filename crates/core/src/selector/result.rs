use serde::{Deserialize, Serialize};

use crate::models::Mission;

/// Largest shortfall still reported as a close match.
pub const CLOSE_MATCH_MARGIN: i32 = 2;

/// A mission picked by the selector, with the difficulty it counted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenMission {
    pub id: u32,
    pub difficulty: i32,
    pub description: String,
}

impl ChosenMission {
    pub(crate) fn from_mission(mission: &Mission, difficulty: i32) -> Self {
        Self {
            id: mission.id,
            difficulty,
            description: mission.description.clone(),
        }
    }
}

/// How well a selection hit its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    /// Attempts consumed before this selection was returned.
    pub attempts: u32,
    pub exact_match: bool,
    /// Target minus achieved total. Never negative.
    pub distance: i32,
    pub close_match: bool,
}

impl MatchInfo {
    pub(crate) fn exact(attempts: u32) -> Self {
        Self {
            attempts,
            exact_match: true,
            distance: 0,
            close_match: false,
        }
    }

    pub(crate) fn short_by(attempts: u32, distance: i32) -> Self {
        Self {
            attempts,
            exact_match: false,
            distance,
            close_match: distance <= CLOSE_MATCH_MARGIN,
        }
    }
}

/// Bookkeeping kept by the deck-draw strategy for the returned attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStats {
    /// Cards turned over before the attempt stopped.
    pub cards_drawn: usize,
    /// Drawn cards that would have overshot the target.
    pub skipped: usize,
}

/// Coarse classification used when reporting a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    Exact,
    Close,
    BestAvailable,
    NoMatch,
}

/// Output of a single selector invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub chosen: Vec<ChosenMission>,
    /// `None` when no attempt accepted anything with positive difficulty.
    pub match_info: Option<MatchInfo>,
    pub draw_stats: Option<DrawStats>,
}

impl SelectionResult {
    /// Result carrying no missions and no match.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sum of the chosen difficulties.
    pub fn total(&self) -> i32 {
        self.chosen.iter().map(|mission| mission.difficulty).sum()
    }

    pub fn quality(&self) -> MatchQuality {
        match self.match_info {
            Some(info) if info.exact_match => MatchQuality::Exact,
            Some(info) if info.close_match => MatchQuality::Close,
            Some(_) => MatchQuality::BestAvailable,
            None => MatchQuality::NoMatch,
        }
    }

    /// Whether there is anything worth presenting.
    pub fn is_match(&self) -> bool {
        self.match_info.is_some() && !self.chosen.is_empty()
    }
}
