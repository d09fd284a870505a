//! Creature oracle implementing [`combat_core::CreatureOracle`].

use std::collections::HashMap;

use combat_core::{CreatureOracle, CreatureTemplate};

/// Oracle providing creature templates.
pub struct CreatureOracleImpl {
    templates: HashMap<String, CreatureTemplate>,
}

impl CreatureOracleImpl {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Add a template, keyed by its id. Replaces any previous entry.
    pub fn add(&mut self, template: CreatureTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Check if a creature exists.
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for CreatureOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<CreatureTemplate> for CreatureOracleImpl {
    fn from_iter<I: IntoIterator<Item = CreatureTemplate>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for template in iter {
            oracle.add(template);
        }
        oracle
    }
}

impl CreatureOracle for CreatureOracleImpl {
    fn template(&self, id: &str) -> Option<CreatureTemplate> {
        self.templates.get(id).cloned()
    }

    fn all_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.templates.keys().cloned().collect();
        ids.sort();
        ids
    }
}
