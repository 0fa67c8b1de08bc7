//! Events emitted during simulation for front-ends to observe.
//!
//! Consumers subscribe to [`GameEvent`] to react to state changes without
//! blocking the worker loop.

use voidgate_core::{SimEvent, Tick};

/// A core simulation event stamped with the tick it was observed on.
#[derive(Debug, Clone)]
pub struct GameEvent {
    pub tick: Tick,
    pub event: SimEvent,
}
