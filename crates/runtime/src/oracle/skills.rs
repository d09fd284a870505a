//! Skill oracle implementing [`combat_core::SkillOracle`].

use std::collections::HashMap;

use combat_core::{SkillDefinition, SkillOracle};

/// Oracle providing skill definitions.
pub struct SkillOracleImpl {
    skills: HashMap<String, SkillDefinition>,
}

impl SkillOracleImpl {
    pub fn new() -> Self {
        Self {
            skills: HashMap::new(),
        }
    }

    pub fn add(&mut self, skill: SkillDefinition) {
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }
}

impl Default for SkillOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<SkillDefinition> for SkillOracleImpl {
    fn from_iter<I: IntoIterator<Item = SkillDefinition>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for skill in iter {
            oracle.add(skill);
        }
        oracle
    }
}

impl SkillOracle for SkillOracleImpl {
    fn skill(&self, id: &str) -> Option<SkillDefinition> {
        self.skills.get(id).cloned()
    }

    fn all_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.skills.keys().cloned().collect();
        ids.sort();
        ids
    }
}
