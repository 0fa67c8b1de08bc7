//! Observations emitted by the engine for front-ends to react to.
//!
//! Every benign "failure" in the simulation (nothing in reach, locked door,
//! portal on cooldown, missing link) surfaces here as passive feedback
//! rather than as an error. Consumers decide what becomes a sound, a
//! particle burst, or a log line.

use glam::Vec2;

use crate::interact::Capability;
use crate::spatial::QueryStage;
use crate::state::EntityId;

/// Scene-level request produced by door passage logic. Executed by whatever
/// scene controller the host injects; an absent controller is a logged
/// no-op, never a crash.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SceneCommand {
    Load(String),
    End,
}

/// Events emitted by the engine during simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    /// An interact attempt resolved a candidate to a capability dispatch.
    InteractionResolved {
        stage: QueryStage,
        target: EntityId,
        capability: Capability,
    },
    /// An interact attempt found nothing in either query stage.
    InteractionMissed,

    /// A closed door was interacted with: locked feedback, nothing else.
    DoorLocked { door: EntityId },
    /// A door transitioned from closed to open.
    DoorOpened { door: EntityId },
    /// An open door's passage was activated.
    Scene(SceneCommand),

    /// A terminal activated for the first time.
    TerminalActivated { terminal: EntityId },

    /// Enter feedback at the source endpoint; the teleport is now in flight.
    PortalEntered { endpoint: EntityId, mover: EntityId },
    /// Exit feedback at the destination endpoint after relocation.
    PortalExited {
        endpoint: EntityId,
        mover: EntityId,
        destination: Vec2,
    },
    /// Teleport rejected: the endpoint is mid-transit or cooling down.
    PortalUnavailable { endpoint: EntityId },
    /// Teleport rejected: no linked endpoint configured or it is gone.
    PortalUnlinked { endpoint: EntityId },
    /// Cooldown elapsed; both endpoints are available again. Exposed for
    /// telemetry and tests; gameplay observes only the availability flags.
    PortalRecovered { source: EntityId, dest: EntityId },
}
