//! Teleport sequence driving: trigger checks, the pair lock, and the two
//! deferred phases.

use super::GameEngine;
use crate::event::SimEvent;
use crate::interact::Capability;
use crate::portal::{SequencePhase, TeleportSequence};
use crate::sched::TaskId;
use crate::state::EntityId;

impl GameEngine<'_> {
    /// Explicit teleport entry point (interact dispatch or host call).
    /// Always attempts the teleport regardless of the endpoint's
    /// auto-activation flags.
    pub fn try_use_portal(&mut self, endpoint: EntityId, mover: EntityId) {
        self.begin_teleport(endpoint, mover);
    }

    /// Starts a teleport if the pair is idle and linked.
    ///
    /// The availability check and the lock acquisition happen back to back
    /// with no suspension point in between: by the time anything is
    /// scheduled, both endpoints already read unavailable, so a re-entrant
    /// trigger on either side of the pair sees a closed window.
    pub(super) fn begin_teleport(&mut self, source: EntityId, mover: EntityId) {
        let Some(src) = self.state.world.portals.endpoint(source) else {
            return;
        };
        if !src.available {
            self.push(SimEvent::PortalUnavailable { endpoint: source });
            return;
        }
        let linked = src.linked;
        let dest = match linked {
            Some(dest) if self.state.world.portals.endpoint(dest).is_some() => dest,
            _ => {
                // Unlinked, or the linked endpoint no longer exists.
                self.push(SimEvent::PortalUnlinked { endpoint: source });
                return;
            }
        };

        self.state.world.portals.set_available(source, false);
        self.state.world.portals.set_available(dest, false);
        self.push(SimEvent::PortalEntered {
            endpoint: source,
            mover,
        });

        // One-tick deferral lets enter feedback begin before the mover is
        // relocated. The lock is already held.
        let task = self.state.timers.after_ticks(self.state.time, 1);
        self.state.transits.insert(
            task,
            TeleportSequence {
                source,
                dest,
                mover,
                phase: SequencePhase::Relocate,
            },
        );
    }

    /// Destroys a portal endpoint, abandoning any in-flight sequence that
    /// touches it. The surviving counterpart is unlocked so destruction can
    /// never leave the pair stuck unavailable.
    pub fn remove_portal_endpoint(&mut self, endpoint: EntityId) {
        if !self.state.world.portals.remove(endpoint) {
            return;
        }
        self.state
            .world
            .capabilities
            .revoke(endpoint, Capability::Portal);

        for (task, sequence) in self.state.transits.cancel_for(endpoint) {
            self.state.timers.cancel(task);
            let survivor = sequence.counterpart(endpoint);
            self.state.world.portals.set_available(survivor, true);
        }
    }

    pub(super) fn run_due_task(&mut self, task: TaskId) {
        let Some(sequence) = self.state.transits.take(task) else {
            return;
        };
        match sequence.phase {
            SequencePhase::Relocate => self.relocate_phase(sequence),
            SequencePhase::Unlock => self.unlock_phase(sequence),
        }
    }

    fn relocate_phase(&mut self, sequence: TeleportSequence) {
        let Some(dest) = self.state.world.portals.endpoint(sequence.dest) else {
            // Destination vanished between lock and relocation; abandon and
            // free the source so nothing stays locked.
            self.state.world.portals.set_available(sequence.source, true);
            return;
        };
        let destination = dest.position + dest.exit_offset;
        let fallback_cooldown = dest.cooldown;

        if self.relocate_mover(sequence.mover, destination) {
            self.push(SimEvent::PortalExited {
                endpoint: sequence.dest,
                mover: sequence.mover,
                destination,
            });
        }

        // The source endpoint's cooldown governs the lockout, as configured
        // on the side that initiated the teleport.
        let cooldown = self
            .state
            .world
            .portals
            .endpoint(sequence.source)
            .map(|ep| ep.cooldown)
            .unwrap_or(fallback_cooldown);

        let task = self.state.timers.after(self.state.time, cooldown);
        self.state.transits.insert(
            task,
            TeleportSequence {
                phase: SequencePhase::Unlock,
                ..sequence
            },
        );
    }

    fn unlock_phase(&mut self, sequence: TeleportSequence) {
        self.state.world.portals.set_available(sequence.source, true);
        self.state.world.portals.set_available(sequence.dest, true);
        self.push(SimEvent::PortalRecovered {
            source: sequence.source,
            dest: sequence.dest,
        });
    }

    /// Moves the mover's physics body directly, zeroing velocity, rather
    /// than letting the next integration step carry stale momentum.
    /// Returns false if the mover no longer exists.
    fn relocate_mover(&mut self, mover: EntityId, destination: glam::Vec2) -> bool {
        if mover.is_player() {
            self.state.entities.player.relocate(destination);
            return true;
        }
        if let Some(prop) = self.state.entities.prop_mut(mover) {
            prop.position = destination;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use glam::Vec2;

    use super::super::GameEngine;
    use crate::config::GameConfig;
    use crate::event::SimEvent;
    use crate::portal::PortalEndpoint;
    use crate::state::{EntityId, GameState};

    const DT: Duration = Duration::from_millis(50);

    fn linked_pair() -> GameState {
        GameState::builder()
            .player_at(Vec2::ZERO)
            .portal(PortalEndpoint::new(EntityId(1), Vec2::ZERO).linked_to(EntityId(2)))
            .portal(PortalEndpoint::new(EntityId(2), Vec2::new(10.0, 0.0)).linked_to(EntityId(1)))
            .build()
            .unwrap()
    }

    fn available(state: &GameState, id: u32) -> bool {
        state.world.portals.endpoint(EntityId(id)).unwrap().available
    }

    /// Triggering endpoint A locks both sides in the same tick, before the
    /// one-tick suspension elapses.
    #[test]
    fn trigger_locks_both_endpoints_immediately() {
        let mut state = linked_pair();
        let config = GameConfig::default();

        let mut engine = GameEngine::new(&mut state, &config);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);
        let events = engine.take_events();

        assert!(!available(&state, 1));
        assert!(!available(&state, 2));
        assert!(events.contains(&SimEvent::PortalEntered {
            endpoint: EntityId(1),
            mover: EntityId::PLAYER,
        }));
        // Mover has not gone anywhere yet.
        assert_eq!(state.entities.player.position, Vec2::ZERO);
    }

    /// Full timeline: lock at t=0, relocation one tick later, recovery
    /// exactly one cooldown after relocation.
    #[test]
    fn teleport_timeline_matches_cooldown() {
        let mut state = linked_pair();
        let config = GameConfig::default();

        let mut engine = GameEngine::new(&mut state, &config);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);

        // One tick: relocation to the linked endpoint plus its exit offset.
        engine.step(DT);
        let events = engine.take_events();
        assert_eq!(state.entities.player.position, Vec2::new(10.0, 0.6));
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::PortalExited {
                endpoint: EntityId(2),
                ..
            }
        )));
        assert!(!available(&state, 1));
        assert!(!available(&state, 2));

        // Default cooldown is 250ms; at 50ms per tick, four more steps stay
        // locked and the fifth recovers.
        let mut engine = GameEngine::new(&mut state, &config);
        for _ in 0..4 {
            engine.step(DT);
            assert!(!available(engine.state(), 1));
            assert!(!available(engine.state(), 2));
        }
        engine.step(DT);
        let events = engine.take_events();

        assert!(available(&state, 1));
        assert!(available(&state, 2));
        assert!(events.contains(&SimEvent::PortalRecovered {
            source: EntityId(1),
            dest: EntityId(2),
        }));
    }

    /// A second trigger inside the unavailable window is a no-op: no second
    /// relocation, no feedback re-run, and the recovery schedule unchanged.
    #[test]
    fn reentry_is_rejected_without_restarting_cooldown() {
        let mut state = linked_pair();
        let config = GameConfig::default();

        let mut engine = GameEngine::new(&mut state, &config);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);
        engine.step(DT);
        engine.take_events();

        // Re-trigger two ticks into the cooldown window, on both sides.
        engine.step(DT);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);
        engine.try_use_portal(EntityId(2), EntityId::PLAYER);
        let events = engine.take_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, SimEvent::PortalUnavailable { .. }))
                .count(),
            2
        );
        assert!(!events.iter().any(|e| matches!(e, SimEvent::PortalEntered { .. })));

        // Move the player off the arrival point to observe any relocation.
        state.entities.player.position = Vec2::new(3.0, 3.0);

        // Recovery still happens on the original schedule: 250ms after the
        // relocation tick, i.e. four more steps from here.
        let mut engine = GameEngine::new(&mut state, &config);
        for _ in 0..4 {
            assert!(!available(engine.state(), 1));
            engine.step(DT);
        }
        assert!(available(&state, 1));
        assert!(available(&state, 2));
        // The rejected triggers relocated nothing: the player is still on
        // the x position we parked them at, not back at an exit point.
        assert_eq!(state.entities.player.position.x, 3.0);
    }

    /// An unlinked endpoint mutates nothing.
    #[test]
    fn unlinked_endpoint_is_a_safe_no_op() {
        let mut state = GameState::builder()
            .portal(PortalEndpoint::new(EntityId(1), Vec2::ZERO))
            .build()
            .unwrap();
        let config = GameConfig::default();

        let mut engine = GameEngine::new(&mut state, &config);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);
        let events = engine.take_events();

        assert_eq!(
            events,
            vec![SimEvent::PortalUnlinked {
                endpoint: EntityId(1)
            }]
        );
        assert!(available(&state, 1));
        assert!(state.transits.is_empty());
        assert_eq!(state.entities.player.position, Vec2::ZERO);
    }

    /// A link pointing at a destroyed endpoint behaves like no link at all.
    #[test]
    fn dangling_link_is_a_safe_no_op() {
        let mut state = GameState::builder()
            .portal(PortalEndpoint::new(EntityId(1), Vec2::ZERO).linked_to(EntityId(9)))
            .build()
            .unwrap();
        let config = GameConfig::default();

        let mut engine = GameEngine::new(&mut state, &config);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);
        let events = engine.take_events();

        assert_eq!(
            events,
            vec![SimEvent::PortalUnlinked {
                endpoint: EntityId(1)
            }]
        );
        assert!(available(&state, 1));
    }

    /// Destroying the destination mid-flight abandons the sequence and
    /// unlocks the source: destruction never leaves the pair deadlocked.
    #[test]
    fn destroying_destination_mid_sequence_unlocks_source() {
        let mut state = linked_pair();
        let config = GameConfig::default();

        let mut engine = GameEngine::new(&mut state, &config);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);
        engine.remove_portal_endpoint(EntityId(2));

        assert!(available(&state, 1));
        assert!(state.transits.is_empty());
        assert_eq!(state.timers.pending_len(), 0);

        // Stepping on produces no relocation and no stray events.
        let mut engine = GameEngine::new(&mut state, &config);
        engine.step(DT);
        engine.step(DT);
        assert!(engine.take_events().is_empty());
        assert_eq!(state.entities.player.position.x, 0.0);
    }

    /// Destroying the source during the cooldown window still frees the
    /// destination.
    #[test]
    fn destroying_source_during_cooldown_unlocks_destination() {
        let mut state = linked_pair();
        let config = GameConfig::default();

        let mut engine = GameEngine::new(&mut state, &config);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);
        engine.step(DT); // relocation done, cooldown pending
        engine.remove_portal_endpoint(EntityId(1));

        assert!(available(&state, 2));
        assert!(state.transits.is_empty());
    }

    /// Two independent pairs teleport concurrently without interfering.
    #[test]
    fn independent_pairs_interleave() {
        let mut state = GameState::builder()
            .portal(PortalEndpoint::new(EntityId(1), Vec2::ZERO).linked_to(EntityId(2)))
            .portal(PortalEndpoint::new(EntityId(2), Vec2::new(10.0, 0.0)).linked_to(EntityId(1)))
            .portal(PortalEndpoint::new(EntityId(3), Vec2::new(20.0, 0.0)).linked_to(EntityId(4)))
            .portal(PortalEndpoint::new(EntityId(4), Vec2::new(30.0, 0.0)).linked_to(EntityId(3)))
            .prop(crate::state::PropState::new(
                EntityId(7),
                Vec2::new(20.0, 0.0),
                crate::spatial::Collider::circle(0.2),
                crate::state::LayerMask::DEFAULT,
            ))
            .build()
            .unwrap();
        let config = GameConfig::default();

        let mut engine = GameEngine::new(&mut state, &config);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);
        engine.try_use_portal(EntityId(3), EntityId(7));
        engine.step(DT);
        engine.take_events();

        assert_eq!(state.entities.player.position, Vec2::new(10.0, 0.6));
        assert_eq!(
            state.entities.prop(EntityId(7)).unwrap().position,
            Vec2::new(30.0, 0.6)
        );
        for id in [1, 2, 3, 4] {
            assert!(!available(&state, id));
        }

        let mut engine = GameEngine::new(&mut state, &config);
        for _ in 0..5 {
            engine.step(DT);
        }
        for id in [1, 2, 3, 4] {
            assert!(available(&state, id));
        }
    }

    /// A mover that disappeared before relocation is skipped, but the
    /// cooldown still runs and the pair still recovers.
    #[test]
    fn missing_mover_skips_relocation_but_recovers() {
        let mut state = linked_pair();
        let config = GameConfig::default();

        let mut engine = GameEngine::new(&mut state, &config);
        // Mover id that exists nowhere in the scene.
        engine.try_use_portal(EntityId(1), EntityId(42));
        engine.step(DT);
        let events = engine.take_events();
        assert!(!events.iter().any(|e| matches!(e, SimEvent::PortalExited { .. })));

        let mut engine = GameEngine::new(&mut state, &config);
        for _ in 0..5 {
            engine.step(DT);
        }
        assert!(available(&state, 1));
        assert!(available(&state, 2));
    }

    /// Auto activation only fires when configured for it; the explicit path
    /// ignores the flags entirely.
    #[test]
    fn auto_trigger_respects_flags() {
        let mut state = GameState::builder()
            .portal(PortalEndpoint::new(EntityId(1), Vec2::ZERO).linked_to(EntityId(2)))
            .portal(
                PortalEndpoint::new(EntityId(2), Vec2::new(10.0, 0.0))
                    .linked_to(EntityId(1))
                    .auto_activating(),
            )
            .build()
            .unwrap();
        let config = GameConfig::default();

        // Endpoint 1 requires explicit interact: walking in does nothing.
        let mut engine = GameEngine::new(&mut state, &config);
        engine.trigger_enter(EntityId(1), EntityId::PLAYER);
        assert!(engine.take_events().is_empty());
        assert!(available(&state, 1));

        // Explicit use works on the same endpoint.
        let mut engine = GameEngine::new(&mut state, &config);
        engine.try_use_portal(EntityId(1), EntityId::PLAYER);
        assert!(!available(&state, 1));

        // Recover, then walk into the auto endpoint.
        let mut engine = GameEngine::new(&mut state, &config);
        for _ in 0..6 {
            engine.step(DT);
        }
        assert!(available(&state, 2));
        let mut engine = GameEngine::new(&mut state, &config);
        engine.trigger_enter(EntityId(2), EntityId::PLAYER);
        assert!(!available(&state, 2));
    }
}
