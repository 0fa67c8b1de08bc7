mod common;
mod entities;
mod objects;
mod world;

pub use common::{EntityId, Facing, LayerMask, Tick};
pub use entities::{EntitiesState, PlayerState, PropState};
pub use objects::{DoorState, Passage, TerminalState};
pub use world::WorldState;
