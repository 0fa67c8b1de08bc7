use arrayvec::ArrayVec;

use super::EntityId;
use crate::config::GameConfig;

/// Where an open door leads when the player passes through it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Passage {
    /// Load the named scene.
    LoadScene(String),
    /// No scene wired: this is a finish door.
    EndGame,
}

/// A door that must be opened by some prior trigger before it acts.
///
/// Interacting with a closed door is a documented no-op with feedback, not
/// an error. Interacting with (or walking through) an open door activates
/// its passage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorState {
    pub id: EntityId,
    pub open: bool,
    pub passage: Passage,
}

impl DoorState {
    pub fn new(id: EntityId, target_scene: Option<String>) -> Self {
        let passage = match target_scene {
            Some(name) => Passage::LoadScene(name),
            None => Passage::EndGame,
        };
        Self {
            id,
            open: false,
            passage,
        }
    }

    /// Opens the door. Returns false if it was already open.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        true
    }

    /// Closes the door again. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        true
    }
}

/// A terminal that opens its wired doors on first activation.
///
/// Activation is idempotent-safe: calling it on an already-handled terminal
/// is a no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalState {
    pub id: EntityId,
    pub activated: bool,
    /// Doors opened when this terminal first activates.
    pub opens: ArrayVec<EntityId, { GameConfig::MAX_TERMINAL_LINKS }>,
}

impl TerminalState {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            activated: false,
            opens: ArrayVec::new(),
        }
    }

    #[must_use]
    pub fn opening(mut self, door: EntityId) -> Self {
        let _ = self.opens.try_push(door);
        self
    }
}
