#![warn(clippy::all, missing_docs)]

//! Core logic for the crewgen mission generator.
//!
//! This crate hosts the card models, configuration handling, mission set
//! loading, modifier sampling and the randomised target-sum selector used
//! by the command line frontend.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod sampler;
pub mod selector;

pub use catalog::{MissionCatalog, MissionSet, MissionSetDiscovery};
pub use self::config::AppConfig;
pub use error::GeneratorError;
pub use generator::{Generation, GenerationRequest, MissionGenerator};
pub use models::{Difficulty, Mission, Modifier, PlayerCount};
pub use selector::{MatchQuality, SelectionResult, SelectionStrategy, TargetSumSelector};
