//! Runtime wrappers around static combat content.
//!
//! These implementations expose the `combat-core` oracle traits and bundle
//! them into an [`OracleManager`]. The data is immutable at runtime; character
//! state lives in repositories and battle state in the session registry.
mod creatures;
mod skills;

use std::sync::Arc;

use combat_content::{ContentFactory, LoadResult};
use combat_core::{CombatConfig, CreatureOracle, SkillOracle};

pub use creatures::CreatureOracleImpl;
pub use skills::SkillOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) creatures: Arc<dyn CreatureOracle>,
    pub(crate) skills: Arc<dyn SkillOracle>,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(creatures: Arc<dyn CreatureOracle>, skills: Arc<dyn SkillOracle>) -> Self {
        Self { creatures, skills }
    }

    /// Loads creature and skill catalogs through a content factory.
    pub fn from_content(factory: &ContentFactory, config: &CombatConfig) -> LoadResult<Self> {
        let creatures: CreatureOracleImpl = factory.load_creatures(config)?.into_iter().collect();
        let skills: SkillOracleImpl = factory.load_skills(config)?.into_iter().collect();

        tracing::info!(
            creatures = creatures.len(),
            data_dir = %factory.data_dir().display(),
            "combat content loaded"
        );
        Ok(Self::new(Arc::new(creatures), Arc::new(skills)))
    }

    pub fn creatures(&self) -> &dyn CreatureOracle {
        self.creatures.as_ref()
    }

    pub fn skills(&self) -> &dyn SkillOracle {
        self.skills.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_content_is_reachable_through_the_manager() {
        let factory = ContentFactory::bundled();
        let config = factory.load_config().unwrap();
        let oracles = OracleManager::from_content(&factory, &config).unwrap();

        let goblin = oracles.creatures().template("goblin_scout").unwrap();
        assert!(goblin.hostile);
        assert!(oracles.skills().skill("fireball").is_some());
        assert!(oracles.creatures().template("dragon_god").is_none());
    }

    #[test]
    fn custom_data_directory_loads_without_tuning_file() {
        let bundled = ContentFactory::bundled();
        let dir = tempfile::tempdir().unwrap();
        for file in ["creatures.ron", "skills.ron"] {
            std::fs::copy(bundled.data_dir().join(file), dir.path().join(file)).unwrap();
        }

        let factory = ContentFactory::new(dir.path());
        let config = factory.load_config().unwrap();
        assert_eq!(config, CombatConfig::default());

        let oracles = OracleManager::from_content(&factory, &config).unwrap();
        assert!(oracles.creatures().all_ids().contains(&"dire_wolf".to_string()));
    }
}
