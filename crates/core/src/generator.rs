#![allow(missing_docs)]

//! Ties modifier sampling and mission selection together for one game.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::GeneratorError,
    models::{Mission, Modifier, PlayerCount},
    sampler::{modifier_total, sample_modifiers, MAX_MODIFIERS},
    selector::{SelectionResult, SelectionStrategy, TargetSumSelector},
};

/// Parameters for a single generated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub players: PlayerCount,
    /// Total difficulty the game should add up to, modifiers included.
    pub target: i32,
    pub strategy: SelectionStrategy,
    /// Number of modifier cards to draw, at most [`MAX_MODIFIERS`].
    pub modifier_count: usize,
    /// Attempt budget; the strategy default applies when unset.
    pub max_attempts: Option<u32>,
}

impl GenerationRequest {
    /// Request with the default strategy, no modifiers and default budget.
    pub fn new(players: PlayerCount, target: i32) -> Self {
        Self {
            players,
            target,
            strategy: SelectionStrategy::default(),
            modifier_count: 0,
            max_attempts: None,
        }
    }

    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_modifiers(mut self, count: usize) -> Self {
        self.modifier_count = count;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Everything produced for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub players: PlayerCount,
    pub strategy: SelectionStrategy,
    pub requested_target: i32,
    /// Difficulty left for missions after modifiers.
    pub mission_target: i32,
    pub modifiers: Vec<Modifier>,
    pub selection: SelectionResult,
}

impl Generation {
    /// Combined difficulty of the drawn modifiers.
    pub fn modifier_total(&self) -> i32 {
        self.requested_target - self.mission_target
    }
}

/// Generates games from a fixed mission catalog and modifier pool.
pub struct MissionGenerator<'a> {
    missions: &'a [Mission],
    modifiers: &'a [Modifier],
}

impl<'a> MissionGenerator<'a> {
    pub fn new(missions: &'a [Mission], modifiers: &'a [Modifier]) -> Self {
        Self {
            missions,
            modifiers,
        }
    }

    /// Draw modifiers, reduce the target by their difficulty and select
    /// missions for what remains.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<Generation, GeneratorError> {
        if request.modifier_count > MAX_MODIFIERS {
            return Err(GeneratorError::TooManyModifiers {
                requested: request.modifier_count,
                max: MAX_MODIFIERS,
            });
        }
        if request.modifier_count > 0 && self.modifiers.is_empty() {
            warn!(
                "{} modifiers requested but none are available",
                request.modifier_count
            );
        }

        let modifiers = sample_modifiers(self.modifiers, request.modifier_count, rng);
        let modifier_total = modifier_total(&modifiers, request.players);
        let mission_target = match request.target.checked_sub(modifier_total) {
            Some(remaining) if remaining > 0 => remaining,
            _ => {
                return Err(GeneratorError::NonPositiveTarget {
                    target: request.target,
                    modifier_total,
                })
            }
        };

        let mut selector = TargetSumSelector::new(request.strategy);
        if let Some(max_attempts) = request.max_attempts {
            selector = selector.with_max_attempts(max_attempts);
        }
        info!(
            players = request.players.get(),
            target = request.target,
            mission_target,
            missions = self.missions.len(),
            strategy = request.strategy.label(),
            "selecting missions"
        );
        let selection = selector.select(self.missions, request.players, mission_target, rng);

        Ok(Generation {
            players: request.players,
            strategy: request.strategy,
            requested_target: request.target,
            mission_target,
            modifiers,
            selection,
        })
    }
}

/// Random source for a run: reproducible with a seed, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}
