//! Player skill definitions and oracle interface.

use crate::skill::EffectPayload;

/// Static definition of a player skill.
///
/// Whether a particular character knows the skill is decided by the external
/// skill registry, not here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    /// Resource spent before any effect resolves.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    pub effect: EffectPayload,
}

impl SkillDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost: u32,
        effect: impl Into<EffectPayload>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            effect: effect.into(),
        }
    }
}

/// Oracle providing skill definitions by id.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: &str) -> Option<SkillDefinition>;

    fn all_ids(&self) -> Vec<String> {
        Vec::new()
    }
}
