//! Content loaders for reading combat data from files.
//!
//! Each loader parses one file format into combat-core types and rejects
//! content the rules could not use (bad probabilities, unknown stats,
//! duplicate ids) at load time instead of at resolution time.

pub mod config;
pub mod creatures;
pub mod factory;
pub mod skills;

pub use config::ConfigLoader;
pub use creatures::CreatureLoader;
pub use factory::ContentFactory;
pub use skills::SkillLoader;

use std::collections::HashSet;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Fails on the first id that appears twice.
pub(crate) fn ensure_unique<'a>(
    kind: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("Duplicate {} id '{}'", kind, id);
        }
    }
    Ok(())
}

pub(crate) fn ensure_probability(what: &str, value: f64) -> LoadResult<()> {
    if !(0.0..=1.0).contains(&value) {
        anyhow::bail!("{} has chance {} outside [0, 1]", what, value);
    }
    Ok(())
}
