//! High-level runtime orchestrator.
//!
//! The runtime owns the background worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the simulation.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::warn;

use voidgate_content::LevelLoader;
use voidgate_core::{GameConfig, GameState};

use crate::error::{Result, RuntimeError};
use crate::event::GameEvent;
use crate::handle::RuntimeHandle;
use crate::scene::SceneDirector;
use crate::worker::SimulationWorker;

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Drive ticks from an internal interval. Disable to step manually
    /// through [`RuntimeHandle::step`].
    pub autostep: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            autostep: true,
        }
    }
}

/// Main runtime that orchestrates the game simulation.
///
/// Design: Runtime owns the worker and coordinates its lifecycle.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to game events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.handle.subscribe_events()
    }

    /// Shutdown the runtime gracefully.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    level: Option<PathBuf>,
    scene: Option<Arc<dyn SceneDirector>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            level: None,
            scene: None,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state directly.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Load initial game state from a RON level file.
    pub fn level(mut self, path: impl Into<PathBuf>) -> Self {
        self.level = Some(path.into());
        self
    }

    /// Inject the scene controller doors report to. Optional: without one,
    /// scene commands are logged and dropped.
    pub fn scene_director(mut self, director: Arc<dyn SceneDirector>) -> Self {
        self.scene = Some(director);
        self
    }

    /// Assemble the runtime and spawn its worker.
    pub fn build(self) -> Result<Runtime> {
        let state = match (self.state, self.level) {
            (Some(state), _) => state,
            (None, Some(path)) => {
                let level = LevelLoader::load(&path)
                    .map_err(|e| RuntimeError::LevelLoad(e.to_string()))?;
                for warning in &level.warnings {
                    warn!(%warning, "level loaded with warning");
                }
                level.state
            }
            (None, None) => GameState::default(),
        };

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let (event_tx, _) = broadcast::channel(self.config.event_buffer_size);

        let worker = SimulationWorker::new(
            state,
            self.config.game_config.clone(),
            self.scene,
            self.config.autostep,
            command_rx,
            event_tx.clone(),
        );
        let worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_tx),
            worker_handle,
        })
    }
}
