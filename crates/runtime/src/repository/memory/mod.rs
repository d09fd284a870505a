//! In-memory repository implementation for tests and local runs.

mod store;

pub use store::{CharacterSeed, InMemoryStore};
