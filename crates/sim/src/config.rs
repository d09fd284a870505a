//! Simulator configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// What to fight and how to report it.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Content directory; the bundled sample content when unset.
    pub data_dir: Option<PathBuf>,
    pub creature: String,
    pub max_rounds: u32,
    /// Print events as JSON lines instead of prose.
    pub json_events: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            creature: "goblin_scout".to_string(),
            max_rounds: 50,
            json_events: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content directory (default: bundled content)
    /// - `SIM_CREATURE` - Creature template to fight (default: goblin_scout)
    /// - `SIM_MAX_ROUNDS` - Rounds before the hero flees (default: 50)
    /// - `SIM_JSON_EVENTS` - Print events as JSON (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("COMBAT_DATA_DIR").ok().map(PathBuf::from);
        if let Ok(creature) = env::var("SIM_CREATURE") {
            config.creature = creature;
        }
        if let Some(rounds) = read_env::<u32>("SIM_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }
        if let Some(json) = read_env::<bool>("SIM_JSON_EVENTS") {
            config.json_events = json;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
