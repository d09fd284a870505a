//! Runtime orchestration for turn-based battles.
//!
//! This crate wires together content oracles, character repositories and a
//! single combat worker into a cohesive runtime API. Consumers build a
//! [`Runtime`] and drive battles through a cloneable [`CombatHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the handle and error types clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`registry`] owns live sessions on behalf of the worker
//! - [`oracle`] and [`repository`] provide data adapters
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod registry;
pub mod repository;
pub mod rng;
pub mod runtime;

mod workers;

pub use api::{CombatHandle, Result, RuntimeError};
pub use events::{CombatEvent, Event, EventBus, PublishError, RewardEvent, Topic};
pub use oracle::{CreatureOracleImpl, OracleManager, SkillOracleImpl};
pub use registry::{SessionEntry, SessionInfo, SessionRegistry};
pub use repository::{
    CharacterRecord, CharacterRepository, CharacterSeed, CombatStores, InMemoryStore, Inventory,
    InventoryRepository, LoadoutRepository, RepositoryError, SkillBookRepository,
};
pub use rng::SystemRng;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::ActionRequest;
