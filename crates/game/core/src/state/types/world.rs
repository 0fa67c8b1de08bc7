use bounded_vector::BoundedVec;

use super::{DoorState, EntityId, TerminalState};
use crate::config::GameConfig;
use crate::interact::CapabilityIndex;
use crate::portal::PortalSet;

/// Interactive-object state layered on top of the physical bodies: doors,
/// terminals, portal endpoints, and the capability tags that make them
/// reachable from the interact command.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub doors: BoundedVec<DoorState, 0, { GameConfig::MAX_DOORS }>,
    pub terminals: BoundedVec<TerminalState, 0, { GameConfig::MAX_TERMINALS }>,
    pub portals: PortalSet,
    pub capabilities: CapabilityIndex,
}

impl WorldState {
    pub fn door(&self, id: EntityId) -> Option<&DoorState> {
        self.doors.iter().find(|door| door.id == id)
    }

    pub fn door_mut(&mut self, id: EntityId) -> Option<&mut DoorState> {
        self.doors.iter_mut().find(|door| door.id == id)
    }

    pub fn terminal(&self, id: EntityId) -> Option<&TerminalState> {
        self.terminals.iter().find(|terminal| terminal.id == id)
    }

    pub fn terminal_mut(&mut self, id: EntityId) -> Option<&mut TerminalState> {
        self.terminals.iter_mut().find(|terminal| terminal.id == id)
    }
}
