//! Canonical simulation state and its setup-time builder.

mod error;
mod types;

pub use bounded_vector::BoundedVec;
pub use error::SetupError;
pub use types::{
    DoorState, EntitiesState, EntityId, Facing, LayerMask, Passage, PlayerState, PropState,
    TerminalState, Tick, WorldState,
};

use glam::Vec2;

use crate::interact::Capability;
use crate::portal::{PortalEndpoint, PortalTransits};
use crate::sched::{Scheduler, SimClock};

/// Complete simulation state. All mutation flows through
/// [`crate::engine::GameEngine`].
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub time: SimClock,
    pub entities: EntitiesState,
    pub world: WorldState,
    /// Central timer queue for deferred work (teleport phases, cooldowns).
    pub timers: Scheduler,
    /// Teleport sequences currently in flight.
    pub transits: PortalTransits,
}

impl GameState {
    pub fn builder() -> GameStateBuilder {
        GameStateBuilder::default()
    }
}

/// Assembles a validated [`GameState`] from scene definitions.
///
/// Capability tags are derived from the registries themselves: registering a
/// door tags its entity with the Door capability, and so on, which keeps the
/// capability index consistent with the object state by construction.
/// Portal links are deliberately NOT validated for symmetry here: a
/// one-sided link is a permitted (if suspicious) configuration, surfaced as
/// a warning by the content loader instead.
#[derive(Debug, Default)]
pub struct GameStateBuilder {
    player_spawn: Vec2,
    props: Vec<PropState>,
    doors: Vec<DoorState>,
    terminals: Vec<TerminalState>,
    endpoints: Vec<PortalEndpoint>,
}

impl GameStateBuilder {
    #[must_use]
    pub fn player_at(mut self, position: Vec2) -> Self {
        self.player_spawn = position;
        self
    }

    #[must_use]
    pub fn prop(mut self, prop: PropState) -> Self {
        self.props.push(prop);
        self
    }

    #[must_use]
    pub fn door(mut self, door: DoorState) -> Self {
        self.doors.push(door);
        self
    }

    #[must_use]
    pub fn terminal(mut self, terminal: TerminalState) -> Self {
        self.terminals.push(terminal);
        self
    }

    #[must_use]
    pub fn portal(mut self, endpoint: PortalEndpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn build(self) -> Result<GameState, SetupError> {
        check_ids("prop", self.props.iter().map(|p| p.id))?;
        check_ids("door", self.doors.iter().map(|d| d.id))?;
        check_ids("terminal", self.terminals.iter().map(|t| t.id))?;
        check_ids("portal endpoint", self.endpoints.iter().map(|e| e.id))?;

        for prop in &self.props {
            if let Some(parent) = prop.parent
                && !self.props.iter().any(|p| p.id == parent)
            {
                return Err(SetupError::UnknownParent {
                    prop: prop.id,
                    parent,
                });
            }
        }
        for terminal in &self.terminals {
            for door in &terminal.opens {
                if !self.doors.iter().any(|d| d.id == *door) {
                    return Err(SetupError::UnknownDoor {
                        terminal: terminal.id,
                        door: *door,
                    });
                }
            }
        }

        let mut state = GameState {
            time: SimClock::default(),
            entities: EntitiesState::new(PlayerState::new(self.player_spawn), Default::default()),
            world: WorldState::default(),
            timers: Scheduler::new(),
            transits: PortalTransits::default(),
        };

        for prop in self.props {
            state
                .entities
                .props
                .push(prop)
                .map_err(|_| SetupError::CapacityExceeded("props"))?;
        }
        for door in self.doors {
            state.world.capabilities.grant(door.id, Capability::Door);
            state
                .world
                .doors
                .push(door)
                .map_err(|_| SetupError::CapacityExceeded("doors"))?;
        }
        for terminal in self.terminals {
            state
                .world
                .capabilities
                .grant(terminal.id, Capability::Terminal);
            state
                .world
                .terminals
                .push(terminal)
                .map_err(|_| SetupError::CapacityExceeded("terminals"))?;
        }
        for endpoint in self.endpoints {
            state
                .world
                .capabilities
                .grant(endpoint.id, Capability::Portal);
            state
                .world
                .portals
                .endpoints
                .push(endpoint)
                .map_err(|_| SetupError::CapacityExceeded("portal endpoints"))?;
        }

        Ok(state)
    }
}

fn check_ids(
    registry: &'static str,
    ids: impl Iterator<Item = EntityId>,
) -> Result<(), SetupError> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if id.is_player() {
            return Err(SetupError::ReservedId(id));
        }
        if !seen.insert(id) {
            return Err(SetupError::DuplicateId { registry, id });
        }
    }
    Ok(())
}
