//! Deterministic simulation logic for the voidgate platformer.
//!
//! `voidgate-core` defines the canonical rules (interaction targeting,
//! the linked-portal state machine, player motion, world state) and exposes
//! pure APIs that can be reused by both the runtime and offline tools.
//! All state mutation flows through [`engine::GameEngine`], and supporting
//! crates depend on the types re-exported here.
pub mod config;
pub mod engine;
pub mod event;
pub mod interact;
pub mod portal;
pub mod sched;
pub mod spatial;
pub mod state;

pub use config::{GameConfig, InteractConfig, MotionConfig};
pub use engine::{GameEngine, JumpInput};
pub use event::{SceneCommand, SimEvent};
pub use interact::{Capability, CapabilityIndex, CapabilitySet, Dispatch, resolve_capability};
pub use portal::{PortalEndpoint, PortalSet, PortalTransits, SequencePhase, TeleportSequence};
pub use sched::{Due, Scheduler, SimClock, TaskId};
pub use spatial::{Collider, QueryHit, QueryStage, interact_query};
pub use state::{
    DoorState, EntitiesState, EntityId, Facing, GameState, LayerMask, Passage, PlayerState,
    PropState, SetupError, TerminalState, Tick, WorldState,
};
