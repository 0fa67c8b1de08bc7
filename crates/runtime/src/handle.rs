use tokio::sync::{broadcast, mpsc, oneshot};

use voidgate_core::{EntityId, GameState, JumpInput, Tick};

use crate::error::{Result, RuntimeError};
use crate::event::GameEvent;
use crate::worker::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// One edge-triggered interact press.
    pub async fn interact(&self) -> Result<()> {
        self.request(|reply| Command::Interact { reply }).await
    }

    /// Updates the horizontal movement axis.
    pub async fn set_move_axis(&self, axis: f32) -> Result<()> {
        self.send(Command::SetMoveAxis { axis }).await
    }

    /// Edge-triggered jump input.
    pub async fn jump(&self, input: JumpInput) -> Result<()> {
        self.send(Command::Jump { input }).await
    }

    /// Reports a mover entering a trigger volume.
    pub async fn trigger_enter(&self, volume: EntityId, mover: EntityId) -> Result<()> {
        self.request(|reply| Command::TriggerEnter {
            volume,
            mover,
            reply,
        })
        .await
    }

    /// Explicitly attempts a teleport on the given endpoint.
    pub async fn use_portal(&self, endpoint: EntityId, mover: EntityId) -> Result<()> {
        self.request(|reply| Command::UsePortal {
            endpoint,
            mover,
            reply,
        })
        .await
    }

    /// Destroys a portal endpoint.
    pub async fn remove_portal_endpoint(&self, endpoint: EntityId) -> Result<()> {
        self.request(|reply| Command::RemovePortalEndpoint { endpoint, reply })
            .await
    }

    /// Advances the simulation by one tick, returning the new tick count.
    /// Intended for hosts that drive time themselves (autostep disabled).
    pub async fn step(&self) -> Result<Tick> {
        self.request(|reply| Command::Step { reply }).await
    }

    /// Queries a snapshot of the current game state.
    pub async fn state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to game events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.event_tx.subscribe()
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::ChannelClosed)
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(make(reply_tx)).await?;
        reply_rx.await.map_err(|_| RuntimeError::ReplyDropped)
    }
}
