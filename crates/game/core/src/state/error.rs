//! Scene-setup validation errors.
//!
//! These are the only hard errors in the core: a malformed level must fail
//! at build time, never mid-simulation. Gameplay-time conditions (nothing in
//! reach, portal on cooldown, missing link) are benign events, not errors.

use crate::state::EntityId;

/// Errors raised while assembling a [`crate::state::GameState`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    /// Entity id 0 is reserved for the player.
    #[error("entity id {0} is reserved")]
    ReservedId(EntityId),

    /// The same id was registered twice in one registry.
    #[error("duplicate {registry} id {id}")]
    DuplicateId {
        registry: &'static str,
        id: EntityId,
    },

    /// A prop names a parent that does not exist.
    #[error("prop {prop} has unknown parent {parent}")]
    UnknownParent { prop: EntityId, parent: EntityId },

    /// A terminal is wired to a door that does not exist.
    #[error("terminal {terminal} opens unknown door {door}")]
    UnknownDoor {
        terminal: EntityId,
        door: EntityId,
    },

    /// A bounded registry overflowed its compile-time capacity.
    #[error("too many {0} in scene")]
    CapacityExceeded(&'static str),
}
