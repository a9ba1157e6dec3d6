use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{Mission, PlayerCount};

use super::result::{ChosenMission, DrawStats, MatchInfo, SelectionResult, CLOSE_MATCH_MARGIN};

/// How missions are drawn from the shuffled catalog.
///
/// Both variants share the acceptance rule and the retry loop; they differ
/// in their default attempt budget and whether draw statistics are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Turn cards over one at a time like drawing from a shuffled deck.
    #[default]
    DeckDraw,
    /// Plain greedy pass over a shuffled list.
    LegacyGreedy,
}

impl SelectionStrategy {
    /// Attempt budget used when the caller does not pick one.
    pub fn default_attempts(self) -> u32 {
        match self {
            Self::DeckDraw => 100,
            Self::LegacyGreedy => 50,
        }
    }

    fn tracks_draws(self) -> bool {
        matches!(self, Self::DeckDraw)
    }

    /// Stable name used in configuration and output.
    pub fn label(self) -> &'static str {
        match self {
            Self::DeckDraw => "deck-draw",
            Self::LegacyGreedy => "legacy",
        }
    }
}

/// Randomised restart search for a mission subset summing to a target.
///
/// Every attempt shuffles the catalog and makes a single greedy pass,
/// accepting each mission that keeps the running total at or below the
/// target. The first exact hit wins. An attempt ending within
/// [`CLOSE_MATCH_MARGIN`] of the target also stops the search early.
/// Otherwise the closest attempt (first one wins ties) is returned once the
/// attempt budget runs out.
#[derive(Debug, Clone, Copy)]
pub struct TargetSumSelector {
    strategy: SelectionStrategy,
    max_attempts: u32,
}

struct Draw {
    chosen: Vec<ChosenMission>,
    total: i32,
    stats: DrawStats,
}

impl TargetSumSelector {
    /// Selector using the strategy's default attempt budget.
    pub fn new(strategy: SelectionStrategy) -> Self {
        Self {
            strategy,
            max_attempts: strategy.default_attempts(),
        }
    }

    /// Override the attempt budget. Values below one are raised to one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run the search over `missions` for the given table size.
    pub fn select<R: Rng + ?Sized>(
        &self,
        missions: &[Mission],
        players: PlayerCount,
        target: i32,
        rng: &mut R,
    ) -> SelectionResult {
        if target <= 0 {
            debug!(target, "non-positive target, nothing to select");
            return SelectionResult::empty();
        }

        let mut deck: Vec<&Mission> = missions.iter().collect();
        let mut best: Option<(Draw, i32)> = None;

        for attempt in 1..=self.max_attempts {
            deck.shuffle(rng);
            let draw = draw_pass(&deck, players, target);
            debug!(
                attempt,
                total = draw.total,
                target,
                picked = draw.chosen.len(),
                "attempt finished"
            );

            if draw.total == target {
                info!(attempt, target, strategy = self.strategy.label(), "exact match");
                return self.finish(draw, MatchInfo::exact(attempt));
            }
            if draw.total <= 0 {
                continue;
            }

            let distance = target - draw.total;
            if distance <= CLOSE_MATCH_MARGIN {
                info!(attempt, distance, strategy = self.strategy.label(), "close match");
                return self.finish(draw, MatchInfo::short_by(attempt, distance));
            }
            if best.as_ref().map_or(true, |(_, best_distance)| distance < *best_distance) {
                best = Some((draw, distance));
            }
        }

        match best {
            Some((draw, distance)) => {
                info!(
                    attempts = self.max_attempts,
                    distance,
                    strategy = self.strategy.label(),
                    "returning best available selection"
                );
                self.finish(draw, MatchInfo::short_by(self.max_attempts, distance))
            }
            None => {
                info!(
                    attempts = self.max_attempts,
                    target,
                    "no selection with positive difficulty found"
                );
                SelectionResult::empty()
            }
        }
    }

    fn finish(&self, draw: Draw, info: MatchInfo) -> SelectionResult {
        SelectionResult {
            chosen: draw.chosen,
            match_info: Some(info),
            draw_stats: self.strategy.tracks_draws().then_some(draw.stats),
        }
    }
}

fn draw_pass(deck: &[&Mission], players: PlayerCount, target: i32) -> Draw {
    let mut chosen = Vec::new();
    let mut total: i32 = 0;
    let mut stats = DrawStats::default();

    for mission in deck {
        stats.cards_drawn += 1;
        let difficulty = mission.difficulty.for_players(players);
        let next = match total.checked_add(difficulty) {
            Some(next) if next <= target => next,
            _ => {
                stats.skipped += 1;
                continue;
            }
        };

        chosen.push(ChosenMission::from_mission(mission, difficulty));
        total = next;
        if total == target {
            break;
        }
    }

    Draw {
        chosen,
        total,
        stats,
    }
}
