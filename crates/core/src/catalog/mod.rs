//! Mission and modifier loading.

/// Mission set discovery and JSON loaders.
pub mod loader;

pub use loader::{
    load_modifiers, MissionCatalog, MissionSet, MissionSetDiscovery, ALL_MISSION_SETS,
};
