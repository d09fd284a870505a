//! Store-backed [`PlayerLink`] used while a round plays.

use combat_core::{CharacterId, PlayerLink, PlayerRefresh, Vitals};

use crate::repository::{CharacterRepository, LoadoutRepository, RepositoryError};

/// Reads authoritative player values and writes vitals back.
pub(super) struct StoreLink<'a> {
    pub(super) character: CharacterId,
    pub(super) characters: &'a dyn CharacterRepository,
    pub(super) loadouts: &'a dyn LoadoutRepository,
}

impl PlayerLink for StoreLink<'_> {
    type Error = RepositoryError;

    fn refresh(&mut self) -> Result<PlayerRefresh, RepositoryError> {
        let record = self
            .characters
            .load(self.character)?
            .ok_or(RepositoryError::CharacterNotFound(self.character))?;
        let stats = self.loadouts.base_stats(self.character)?;
        Ok(PlayerRefresh {
            level: record.level,
            vitals: record.vitals,
            stats,
        })
    }

    fn persist(&mut self, vitals: Vitals) -> Result<(), RepositoryError> {
        tracing::trace!(
            character = %self.character,
            hp = vitals.hp,
            resource = vitals.resource,
            "persisting vitals"
        );
        self.characters.save_vitals(self.character, vitals)
    }
}
