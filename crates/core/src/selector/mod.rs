#![allow(missing_docs)]

//! Randomised target-sum mission selection.

mod result;
pub mod target_sum;

pub use result::{
    ChosenMission, DrawStats, MatchInfo, MatchQuality, SelectionResult, CLOSE_MATCH_MARGIN,
};
pub use target_sum::{SelectionStrategy, TargetSumSelector};
