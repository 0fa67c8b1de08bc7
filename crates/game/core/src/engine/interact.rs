//! One interaction attempt: spatial query, target resolution, dispatch.

use super::GameEngine;
use crate::event::SimEvent;
use crate::interact::{Capability, Dispatch, resolve_capability};
use crate::spatial::interact_query;
use crate::state::{EntityId, Passage};

impl GameEngine<'_> {
    /// Resolves one edge-triggered interact command.
    ///
    /// Candidates come from the two-stage spatial query; only the winning
    /// stage's candidates are considered. Every candidate is visited in
    /// order (an earlier successful dispatch does not short-circuit the
    /// rest), but each candidate dispatches at most one capability.
    /// Finding nothing at all is a valid outcome, never an error.
    pub fn interact(&mut self) {
        let origin = self.state.entities.player.position;
        let dir = self.state.entities.player.facing.direction();

        let (stage, hits) = interact_query(
            &self.state.entities,
            origin,
            dir,
            self.config.interact.distance,
            self.config.interact.mask,
        );
        if hits.is_empty() {
            self.push(SimEvent::InteractionMissed);
            return;
        }

        for hit in hits {
            let resolved = resolve_capability(
                &self.state.world.capabilities,
                &self.state.entities,
                hit.body,
            );
            if let Some(dispatch) = resolved {
                self.push(SimEvent::InteractionResolved {
                    stage,
                    target: dispatch.target,
                    capability: dispatch.capability,
                });
                self.apply_dispatch(dispatch);
            }
        }
    }

    fn apply_dispatch(&mut self, dispatch: Dispatch) {
        match dispatch.capability {
            Capability::Terminal => self.try_activate_terminal(dispatch.target),
            Capability::Door => self.try_open_door(dispatch.target),
            Capability::Portal => {
                self.try_use_portal(dispatch.target, self.state.entities.player.id)
            }
        }
    }

    /// First activation flips the terminal and opens its wired doors; any
    /// later activation is a no-op.
    pub fn try_activate_terminal(&mut self, terminal: EntityId) {
        let Some(state) = self.state.world.terminal_mut(terminal) else {
            return;
        };
        if state.activated {
            return;
        }
        state.activated = true;
        let doors = state.opens.clone();

        self.push(SimEvent::TerminalActivated { terminal });
        for door in doors {
            self.open_door(door);
        }
    }

    /// Interaction wrapper for doors: a closed door reports itself locked;
    /// an open door activates its passage.
    pub fn try_open_door(&mut self, door: EntityId) {
        let Some(state) = self.state.world.door(door) else {
            return;
        };
        if !state.open {
            self.push(SimEvent::DoorLocked { door });
            return;
        }
        self.pass_through(door);
    }

    /// Opens a door from an external trigger (terminal, scripted event).
    pub fn open_door(&mut self, door: EntityId) {
        if let Some(state) = self.state.world.door_mut(door)
            && state.open()
        {
            self.push(SimEvent::DoorOpened { door });
        }
    }

    pub(super) fn pass_through(&mut self, door: EntityId) {
        let Some(state) = self.state.world.door(door) else {
            return;
        };
        let command = match &state.passage {
            Passage::LoadScene(name) => crate::event::SceneCommand::Load(name.clone()),
            Passage::EndGame => crate::event::SceneCommand::End,
        };
        self.push(SimEvent::Scene(command));
    }
}
