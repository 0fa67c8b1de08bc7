//! The authoritative reducer for [`GameState`].
//!
//! Every entry point, whether input-driven (interact, movement, jumping),
//! a physics callback (trigger volumes), or the per-tick step, mutates
//! state only through [`GameEngine`]. The engine is constructed per call site around a
//! mutable borrow of the state, and accumulates [`SimEvent`]s for the host
//! to drain afterwards.

mod interact;
mod motion;
mod portal;

use core::time::Duration;

use crate::config::GameConfig;
use crate::event::SimEvent;
use crate::state::{EntityId, GameState};

/// Edge-triggered jump input phases.
///
/// A press at full power, a release while still rising to cut the jump
/// short. Both consume one of the player's remaining jumps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpInput {
    Pressed,
    Released,
}

/// Game engine that manages interaction, portals, and player motion.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
    events: Vec<SimEvent>,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine over the given state.
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self {
            state,
            config,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Stores the horizontal movement axis for the next physics step.
    pub fn set_move_axis(&mut self, axis: f32) {
        self.state.entities.player.move_axis = axis.clamp(-1.0, 1.0);
    }

    /// Advances the simulation by one tick: motion integration first, then
    /// the clock and any deferred tasks that became due. Running tasks last
    /// means a relocation lands as the final mutation of its tick, with no
    /// stale momentum applied on top.
    pub fn step(&mut self, dt: Duration) {
        self.integrate_motion(dt);
        self.state.time.advance(dt);
        let due = self.state.timers.drain_due(self.state.time);
        for task in due {
            self.run_due_task(task);
        }
    }

    /// Physics trigger-volume callback: a mover entered `volume`.
    ///
    /// Drives both automatic portal activation and open-door pass-through.
    /// Anything else is ignored.
    pub fn trigger_enter(&mut self, volume: EntityId, mover: EntityId) {
        if mover.is_player()
            && let Some(door) = self.state.world.door(volume)
            && door.open
        {
            self.pass_through(volume);
        }

        if mover.is_player()
            && let Some(endpoint) = self.state.world.portals.endpoint(volume)
            && endpoint.auto_triggers()
        {
            self.begin_teleport(volume, mover);
        }
    }

    /// Consumes the events accumulated since construction.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        core::mem::take(&mut self.events)
    }

    pub(crate) fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}
