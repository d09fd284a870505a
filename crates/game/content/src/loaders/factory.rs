//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, CreatureTemplate, SkillDefinition};

use crate::loaders::{ConfigLoader, CreatureLoader, LoadResult, SkillLoader};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── creatures.ron
/// └── skills.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the sample content shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load combat tuning from `combat.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no combat.toml, using default tuning");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load creature catalog from `creatures.ron`.
    pub fn load_creatures(&self, config: &CombatConfig) -> LoadResult<Vec<CreatureTemplate>> {
        let path = self.data_dir.join("creatures.ron");
        CreatureLoader::load(&path, config)
    }

    /// Load skill catalog from `skills.ron`.
    pub fn load_skills(&self, config: &CombatConfig) -> LoadResult<Vec<SkillDefinition>> {
        let path = self.data_dir.join("skills.ron");
        SkillLoader::load(&path, config)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();
        let config = factory.load_config().unwrap();
        let creatures = factory.load_creatures(&config).unwrap();
        let skills = factory.load_skills(&config).unwrap();

        assert!(creatures.iter().any(|c| c.id == "goblin_scout"));
        assert!(creatures.iter().any(|c| !c.hostile));
        assert!(skills.iter().any(|s| s.id == "fireball"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert!(factory.load_creatures(&CombatConfig::default()).is_err());
    }
}
