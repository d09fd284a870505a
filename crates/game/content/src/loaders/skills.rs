//! Player skill catalog loader.

use std::path::Path;

use combat_core::{CombatConfig, SkillDefinition};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill catalog from a RON file.
    ///
    /// RON format: `Vec<SkillDefinition>`
    pub fn load(path: &Path, config: &CombatConfig) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content, config)
    }

    pub fn parse(content: &str, config: &CombatConfig) -> LoadResult<Vec<SkillDefinition>> {
        let skills: Vec<SkillDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        ensure_unique("skill", skills.iter().map(|s| s.id.as_str()))?;
        for skill in &skills {
            skill
                .effect
                .validate(config.max_area_depth)
                .map_err(|e| anyhow::anyhow!("Invalid skill '{}': {}", skill.id, e))?;
        }

        tracing::debug!(count = skills.len(), "loaded skill definitions");
        Ok(skills)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use combat_core::{EffectTarget, SkillEffect};

    use super::*;

    #[test]
    fn loads_skills_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                (
                    id: "war_cry",
                    name: "War Cry",
                    cost: 10,
                    effect: One((effect: Buff(stat: "strength", magnitude: 0.25, duration: 3))),
                ),
            ]"#
        )
        .unwrap();

        let skills = SkillLoader::load(file.path(), &CombatConfig::default()).unwrap();
        assert_eq!(skills[0].cost, 10);
        assert_eq!(
            skills[0].effect.entries()[0].effect,
            SkillEffect::Buff {
                stat: "strength".into(),
                magnitude: 0.25,
                duration: 3,
                target: EffectTarget::Caster,
            }
        );
    }

    #[test]
    fn rejects_unknown_stat() {
        let content = r#"[
            (
                id: "hex",
                name: "Hex",
                effect: One((effect: Debuff(stat: "luck", magnitude: 0.2, duration: 2))),
            ),
        ]"#;
        let err = SkillLoader::parse(content, &CombatConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unknown stat 'luck'"));
    }
}
