//! Simulation worker that owns the authoritative [`GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives them through
//! [`voidgate_core::GameEngine`], and publishes [`GameEvent`] notifications.
//! With autostep enabled it also ticks the simulation on a fixed interval;
//! otherwise ticks arrive as explicit `Step` commands (deterministic tests,
//! paused hosts).

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};

use voidgate_core::{
    EntityId, GameConfig, GameEngine, GameState, JumpInput, SceneCommand, SimEvent, Tick,
};

use crate::event::GameEvent;
use crate::scene::SceneDirector;

/// Commands that can be sent to the simulation worker.
pub enum Command {
    /// One edge-triggered interact press.
    Interact { reply: oneshot::Sender<()> },
    /// Horizontal movement axis for subsequent ticks.
    SetMoveAxis { axis: f32 },
    /// Edge-triggered jump press/release.
    Jump { input: JumpInput },
    /// Physics trigger-volume callback.
    TriggerEnter {
        volume: EntityId,
        mover: EntityId,
        reply: oneshot::Sender<()>,
    },
    /// Explicit portal use, bypassing the interact query.
    UsePortal {
        endpoint: EntityId,
        mover: EntityId,
        reply: oneshot::Sender<()>,
    },
    /// Destroys a portal endpoint, abandoning in-flight teleports safely.
    RemovePortalEndpoint {
        endpoint: EntityId,
        reply: oneshot::Sender<()>,
    },
    /// Advance the simulation by exactly one tick.
    Step { reply: oneshot::Sender<Tick> },
    /// Query the current game state (read-only snapshot).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    state: GameState,
    config: GameConfig,
    scene: Option<Arc<dyn SceneDirector>>,
    autostep: bool,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        config: GameConfig,
        scene: Option<Arc<dyn SceneDirector>>,
        autostep: bool,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            state,
            config,
            scene,
            autostep,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.config.tick);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = ticker.tick(), if self.autostep => {
                    self.with_engine(|engine, dt| engine.step(dt));
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Interact { reply } => {
                self.with_engine(|engine, _| engine.interact());
                let _ = reply.send(());
            }
            Command::SetMoveAxis { axis } => {
                self.with_engine(|engine, _| engine.set_move_axis(axis));
            }
            Command::Jump { input } => {
                self.with_engine(|engine, _| engine.jump(input));
            }
            Command::TriggerEnter {
                volume,
                mover,
                reply,
            } => {
                self.with_engine(|engine, _| engine.trigger_enter(volume, mover));
                let _ = reply.send(());
            }
            Command::UsePortal {
                endpoint,
                mover,
                reply,
            } => {
                self.with_engine(|engine, _| engine.try_use_portal(endpoint, mover));
                let _ = reply.send(());
            }
            Command::RemovePortalEndpoint { endpoint, reply } => {
                self.with_engine(|engine, _| engine.remove_portal_endpoint(endpoint));
                let _ = reply.send(());
            }
            Command::Step { reply } => {
                self.with_engine(|engine, dt| engine.step(dt));
                let _ = reply.send(self.state.time.tick);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
        }
    }

    /// Runs one engine call, then publishes whatever it observed.
    fn with_engine(&mut self, f: impl FnOnce(&mut GameEngine<'_>, core::time::Duration)) {
        let dt = self.config.tick;
        let mut engine = GameEngine::new(&mut self.state, &self.config);
        f(&mut engine, dt);
        let events = engine.take_events();

        let tick = self.state.time.tick;
        for event in events {
            self.publish(tick, event);
        }
    }

    fn publish(&self, tick: Tick, event: SimEvent) {
        match &event {
            SimEvent::Scene(command) => self.run_scene_command(command),
            SimEvent::PortalUnavailable { endpoint } => {
                debug!(%endpoint, "teleport unavailable (cooldown)");
            }
            SimEvent::PortalUnlinked { endpoint } => {
                warn!(%endpoint, "portal has no linked endpoint");
            }
            SimEvent::InteractionMissed => {
                debug!("interact: nothing hit (cast & probe empty)");
            }
            _ => {}
        }

        // No subscribers is normal, not an error.
        let _ = self.event_tx.send(GameEvent { tick, event });
    }

    fn run_scene_command(&self, command: &SceneCommand) {
        match &self.scene {
            Some(director) => match command {
                SceneCommand::Load(name) => director.load_scene(name),
                SceneCommand::End => director.end_game(),
            },
            None => warn!(?command, "scene director missing, dropping scene command"),
        }
    }
}
