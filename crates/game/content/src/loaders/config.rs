//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.min_hit_chance > config.max_hit_chance
            || config.min_accuracy > config.max_accuracy
            || config.min_evasion > config.max_evasion
            || config.min_crit_chance > config.max_crit_chance
        {
            anyhow::bail!("Combat config has a lower bound above its upper bound");
        }
        if config.experience_per_level == 0 {
            anyhow::bail!("experience_per_level must be positive");
        }

        Ok(config)
    }
}
