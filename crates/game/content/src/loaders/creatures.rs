//! Creature template loader.

use std::path::Path;

use combat_core::{CombatConfig, CreatureTemplate};

use crate::loaders::{LoadResult, ensure_probability, ensure_unique, read_file};

/// Loader for creature catalogs from RON files.
pub struct CreatureLoader;

impl CreatureLoader {
    /// Load creature catalog from a RON file.
    ///
    /// RON format: `Vec<CreatureTemplate>`
    pub fn load(path: &Path, config: &CombatConfig) -> LoadResult<Vec<CreatureTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content, config)
    }

    pub fn parse(content: &str, config: &CombatConfig) -> LoadResult<Vec<CreatureTemplate>> {
        let templates: Vec<CreatureTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse creature catalog RON: {}", e))?;

        ensure_unique("creature", templates.iter().map(|t| t.id.as_str()))?;
        for template in &templates {
            validate(template, config)
                .map_err(|e| anyhow::anyhow!("Invalid creature '{}': {}", template.id, e))?;
        }

        tracing::debug!(count = templates.len(), "loaded creature templates");
        Ok(templates)
    }
}

fn validate(template: &CreatureTemplate, config: &CombatConfig) -> LoadResult<()> {
    if template.stats.max_hp == 0 {
        anyhow::bail!("max_hp must be positive");
    }
    if template.gold_min > template.gold_max {
        anyhow::bail!(
            "gold range {}..={} is empty",
            template.gold_min,
            template.gold_max
        );
    }
    for entry in &template.loot {
        ensure_probability(&format!("loot '{}'", entry.item_id), entry.chance)?;
        if entry.min_quantity > entry.max_quantity {
            anyhow::bail!("loot '{}' has an empty quantity range", entry.item_id);
        }
    }
    for skill in &template.skills {
        ensure_probability(&format!("skill '{}'", skill.name), skill.chance)?;
        skill
            .effect
            .validate(config.max_area_depth)
            .map_err(|e| anyhow::anyhow!("skill '{}': {}", skill.name, e))?;
    }
    Ok(())
}
