//! High-level runtime orchestrator.
//!
//! The runtime owns the combat worker, wires up the command channel and event
//! bus, and exposes a builder-based API for clients to drive battles.

use std::env;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use combat_core::{CombatConfig, RngOracle};

use crate::api::{CombatHandle, Result, RuntimeError};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{CombatStores, InMemoryStore};
use crate::rng::SystemRng;
use crate::workers::{Command, CombatWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Fixed seed for reproducible battles; entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            rng_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_RNG_SEED` - Seed for the battle RNG (default: entropy)
    /// - `COMBAT_COMMAND_BUFFER` - Command channel capacity (default: 32)
    /// - `COMBAT_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("COMBAT_RNG_SEED") {
            config.rng_seed = Some(seed);
        }
        if let Some(size) = read_env::<usize>("COMBAT_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }
        if let Some(size) = read_env::<usize>("COMBAT_EVENT_BUFFER") {
            config.event_buffer_size = size.max(1);
        }

        config
    }

    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates combat sessions
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`CombatHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: CombatHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> CombatHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The worker stops once every outstanding handle clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    stores: Option<CombatStores>,
    rng: Option<Box<dyn RngOracle>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            stores: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set character stores. Defaults to an empty in-memory store.
    pub fn stores(mut self, stores: CombatStores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Replace the random source, e.g. with a scripted one in tests.
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self
            .oracles
            .ok_or(RuntimeError::MissingOracles)?;
        let stores = self
            .stores
            .unwrap_or_else(|| CombatStores::in_memory(Arc::new(InMemoryStore::new())));
        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(SystemRng::new(self.config.rng_seed)));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = CombatHandle::new(command_tx, event_bus.clone());

        let worker = CombatWorker::new(
            oracles,
            stores,
            self.config.combat,
            rng,
            command_rx,
            event_bus,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
