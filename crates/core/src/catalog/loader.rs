use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    error::GeneratorError,
    models::{Mission, Modifier},
};

/// Mission set name that selects every discovered set.
pub const ALL_MISSION_SETS: &str = "all";

#[derive(Deserialize)]
struct MissionFile {
    missions: Vec<Mission>,
}

#[derive(Deserialize)]
struct ModifierFile {
    modifiers: Vec<Modifier>,
}

/// A mission file found in the missions directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionSet {
    /// File stem, used to select the set (e.g. `classic`).
    pub name: String,
    /// Location of the JSON file.
    pub path: PathBuf,
}

/// Finds mission sets beneath a directory.
pub struct MissionSetDiscovery;

impl MissionSetDiscovery {
    /// Enumerate `*.json` files directly inside `root`, sorted by name.
    /// A missing directory yields an empty list.
    pub fn discover(root: impl AsRef<Path>) -> Result<Vec<MissionSet>> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut sets = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry =
                entry.with_context(|| format!("failed to read mission directory {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some("json")
            {
                debug!("ignoring {}", path.display());
                continue;
            }

            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!("Skipping {} – file name is not valid UTF-8", path.display());
                continue;
            };
            sets.push(MissionSet {
                name: name.to_string(),
                path: path.to_path_buf(),
            });
        }

        Ok(sets)
    }

    /// Resolve a set name against `root`. [`ALL_MISSION_SETS`] returns every
    /// set; other names match case-insensitively. A name ending in `.json`
    /// is taken as a path to a mission file instead.
    pub fn resolve(root: impl AsRef<Path>, name: &str) -> Result<Vec<MissionSet>> {
        let name = name.trim();
        if name.to_lowercase().ends_with(".json") {
            return Self::from_file(name).map(|set| vec![set]);
        }

        let root = root.as_ref();
        let sets = Self::discover(root)?;
        if sets.is_empty() {
            return Err(GeneratorError::NoMissionSets(root.display().to_string()).into());
        }

        let needle = name.to_lowercase();
        if needle == ALL_MISSION_SETS {
            return Ok(sets);
        }

        match sets.iter().find(|set| set.name.to_lowercase() == needle) {
            Some(set) => Ok(vec![set.clone()]),
            None => Err(GeneratorError::UnknownMissionSet {
                name: name.to_string(),
                available: sets
                    .iter()
                    .map(|set| set.name.as_str())
                    .chain([ALL_MISSION_SETS])
                    .collect::<Vec<_>>()
                    .join(", "),
            }
            .into()),
        }
    }
}

impl MissionSetDiscovery {
    fn from_file(path: &str) -> Result<MissionSet> {
        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(GeneratorError::MissingMissionFile(path.display().to_string()).into());
        }
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("missions")
            .to_string();
        Ok(MissionSet { name, path })
    }
}

/// Missions loaded for one run, in source order.
#[derive(Debug, Clone, Default)]
pub struct MissionCatalog {
    sets: Vec<String>,
    missions: Vec<Mission>,
}

impl MissionCatalog {
    /// Build a catalog from missions already in memory.
    pub fn from_missions(missions: Vec<Mission>) -> Self {
        Self {
            sets: Vec::new(),
            missions,
        }
    }

    /// Load and concatenate the given mission sets. Duplicate ids across
    /// sets are kept as separate cards.
    pub fn load(sets: &[MissionSet]) -> Result<Self> {
        let mut catalog = Self::default();
        for set in sets {
            let missions = read_missions(&set.path)?;
            info!("loaded {} missions from set {}", missions.len(), set.name);
            catalog.sets.push(set.name.clone());
            catalog.missions.extend(missions);
        }
        Ok(catalog)
    }

    /// Names of the sets that make up this catalog.
    pub fn sets(&self) -> &[String] {
        &self.sets
    }

    /// All missions in load order.
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    /// Number of missions.
    pub fn len(&self) -> usize {
        self.missions.len()
    }

    /// Whether no missions were loaded.
    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}

fn read_missions(path: &Path) -> Result<Vec<Mission>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read mission set {}", path.display()))?;
    let file: MissionFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse mission set {}", path.display()))?;
    Ok(file.missions)
}

/// Load modifier cards, returning `None` if the file does not exist.
pub fn load_modifiers(path: impl AsRef<Path>) -> Result<Option<Vec<Modifier>>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read modifiers {}", path.display()))?;
    let file: ModifierFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse modifiers {}", path.display()))?;
    info!("loaded {} modifiers from {}", file.modifiers.len(), path.display());
    Ok(Some(file.modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CLASSIC: &str = r#"{
  "missions": [
    { "id": 1, "difficulty": { "3_players": 1, "4_players": 1, "5_players": 2 }, "description": "Win a trick with a 1" },
    { "id": 2, "difficulty": { "3_players": 2, "4_players": 3, "5_players": 3 }, "description": "Win the pink 3" }
  ]
}"#;

    const DEEP: &str = r#"{
  "missions": [
    { "id": 2, "difficulty": { "3_players": 4, "4_players": 4, "5_players": 5 }, "description": "Never win a trick with a 9" }
  ]
}"#;

    #[test]
    fn discovers_json_sets_sorted() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        fs::write(root.join("deep-sea.json"), DEEP)?;
        fs::write(root.join("classic.json"), CLASSIC)?;
        fs::write(root.join("notes.txt"), "not a mission set")?;
        fs::create_dir_all(root.join("drafts"))?;

        let sets = MissionSetDiscovery::discover(root)?;
        let names: Vec<_> = sets.iter().map(|set| set.name.as_str()).collect();
        assert_eq!(names, vec!["classic", "deep-sea"]);
        Ok(())
    }

    #[test]
    fn all_concatenates_without_deduplication() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        fs::write(root.join("classic.json"), CLASSIC)?;
        fs::write(root.join("deep-sea.json"), DEEP)?;

        let sets = MissionSetDiscovery::resolve(root, "all")?;
        let catalog = MissionCatalog::load(&sets)?;
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.sets(), ["classic", "deep-sea"]);
        let ids: Vec<_> = catalog.missions().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 2]);
        assert_eq!(catalog.missions()[2].difficulty.values(), [4, 4, 5]);
        Ok(())
    }

    #[test]
    fn resolves_single_set_case_insensitively() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        fs::write(root.join("classic.json"), CLASSIC)?;
        fs::write(root.join("deep-sea.json"), DEEP)?;

        let sets = MissionSetDiscovery::resolve(root, "Classic")?;
        assert_eq!(sets.len(), 1);
        assert_eq!(MissionCatalog::load(&sets)?.len(), 2);
        Ok(())
    }

    #[test]
    fn json_path_bypasses_missions_directory() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("custom.json");
        fs::write(&path, DEEP)?;

        let sets = MissionSetDiscovery::resolve(
            temp.path().join("no-such-dir"),
            &path.display().to_string(),
        )?;
        assert_eq!(
            sets,
            vec![MissionSet {
                name: "custom".to_string(),
                path: path.clone(),
            }]
        );
        assert_eq!(MissionCatalog::load(&sets)?.len(), 1);

        let missing = temp.path().join("absent.json");
        let err = MissionSetDiscovery::resolve(temp.path(), &missing.display().to_string())
            .expect_err("missing file should fail");
        assert_eq!(
            err.downcast_ref::<GeneratorError>(),
            Some(&GeneratorError::MissingMissionFile(
                missing.display().to_string()
            ))
        );
        Ok(())
    }

    #[test]
    fn unknown_set_lists_available_names() -> Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("classic.json"), CLASSIC)?;

        let err = MissionSetDiscovery::resolve(temp.path(), "space")
            .expect_err("unknown set should fail");
        assert_eq!(
            err.downcast_ref::<GeneratorError>(),
            Some(&GeneratorError::UnknownMissionSet {
                name: "space".to_string(),
                available: "classic, all".to_string(),
            })
        );
        Ok(())
    }

    #[test]
    fn empty_directory_is_an_error_on_resolve() -> Result<()> {
        let temp = tempdir()?;
        let err = MissionSetDiscovery::resolve(temp.path(), "classic")
            .expect_err("no sets should fail");
        assert!(matches!(
            err.downcast_ref::<GeneratorError>(),
            Some(GeneratorError::NoMissionSets(_))
        ));
        Ok(())
    }

    #[test]
    fn malformed_set_reports_path() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("broken.json");
        fs::write(&path, r#"{ "missions": [ { "id": "x" } ] }"#)?;

        let sets = MissionSetDiscovery::discover(temp.path())?;
        let err = MissionCatalog::load(&sets).expect_err("malformed set should fail");
        assert!(err.to_string().contains("broken.json"));
        Ok(())
    }

    #[test]
    fn bundled_data_parses() -> Result<()> {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let sets = MissionSetDiscovery::resolve(data.join("missions"), ALL_MISSION_SETS)?;
        let catalog = MissionCatalog::load(&sets)?;
        assert!(!catalog.is_empty());
        let modifiers = load_modifiers(data.join("modifiers.json"))?.expect("bundled modifiers");
        assert!(modifiers.len() >= 3);
        Ok(())
    }

    #[test]
    fn missing_modifier_file_is_not_an_error() -> Result<()> {
        let temp = tempdir()?;
        assert!(load_modifiers(temp.path().join("modifiers.json"))?.is_none());
        Ok(())
    }

    #[test]
    fn loads_modifiers() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("modifiers.json");
        fs::write(
            &path,
            r#"{
  "modifiers": [
    {
      "id": "radio-silence",
      "name": "Radio Silence",
      "symbol": "📵",
      "description": "The radio is down.",
      "difficulty_modifier": { "3_players": 1, "4_players": 2, "5_players": 2 },
      "rules_text": "No communication tokens may be used."
    }
  ]
}"#,
        )?;

        let modifiers = load_modifiers(&path)?.expect("modifiers present");
        assert_eq!(modifiers.len(), 1);
        assert_eq!(modifiers[0].difficulty_modifier.values(), [1, 2, 2]);
        assert_eq!(modifiers[0].display_name(), "📵 Radio Silence");
        Ok(())
    }
}
