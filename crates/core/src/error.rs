#![allow(missing_docs)]

//! Domain errors surfaced to the user.

use thiserror::Error;

/// Failures the generator reports back to whoever invoked it.
///
/// File access and parse problems are carried as [`anyhow::Error`] with
/// context instead; these variants are the cases a user can fix by changing
/// the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("unsupported player count {0}, expected 3, 4 or 5")]
    InvalidPlayerCount(u8),

    #[error("unknown mission set '{name}' (available: {available})")]
    UnknownMissionSet { name: String, available: String },

    #[error("mission file {0} does not exist")]
    MissingMissionFile(String),

    #[error("no mission sets found in {0}")]
    NoMissionSets(String),

    #[error("at most {max} modifiers can be drawn, {requested} requested")]
    TooManyModifiers { requested: usize, max: usize },

    #[error(
        "target difficulty {target} minus modifier difficulty {modifier_total} leaves nothing for missions; \
         raise the difficulty or draw fewer modifiers"
    )]
    NonPositiveTarget { target: i32, modifier_total: i32 },
}
