//! Tick-driven timer queue for time-deferred sequences.
//!
//! The simulation never blocks: anything that must happen "later" is an
//! explicit task scheduled here, due either at a future tick (frame-deferred
//! work) or at a future wall-clock instant (cooldowns). Tasks are
//! cancellable by id, which is how endpoint destruction abandons an
//! in-flight teleport without leaving state locked.

use core::time::Duration;
use std::collections::BTreeMap;

use crate::state::Tick;

/// Simulation clock: tick counter plus accumulated wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub tick: Tick,
    pub elapsed: Duration,
}

impl SimClock {
    pub fn advance(&mut self, dt: Duration) {
        self.tick = self.tick + 1;
        self.elapsed += dt;
    }
}

/// Handle to a pending task, usable for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskId(pub u64);

/// When a scheduled task becomes due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Due {
    /// Due once the clock reaches the given tick.
    AtTick(Tick),
    /// Due once elapsed wall-clock time reaches the given instant.
    At(Duration),
}

impl Due {
    fn is_due(&self, clock: SimClock) -> bool {
        match *self {
            Due::AtTick(tick) => clock.tick >= tick,
            Due::At(instant) => clock.elapsed >= instant,
        }
    }
}

/// Central timer queue. Pending tasks are keyed by creation order, so
/// same-tick tasks drain deterministically.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scheduler {
    next_id: u64,
    pending: BTreeMap<TaskId, Due>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a task due `ticks` ticks from now.
    pub fn after_ticks(&mut self, clock: SimClock, ticks: u64) -> TaskId {
        self.schedule(Due::AtTick(clock.tick + ticks))
    }

    /// Schedules a task due after a wall-clock delay from now.
    pub fn after(&mut self, clock: SimClock, delay: Duration) -> TaskId {
        self.schedule(Due::At(clock.elapsed + delay))
    }

    fn schedule(&mut self, due: Due) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, due);
        id
    }

    /// Cancels a pending task. Returns false if it was not pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns every task due at the given clock.
    pub fn drain_due(&mut self, clock: SimClock) -> Vec<TaskId> {
        let due: Vec<TaskId> = self
            .pending
            .iter()
            .filter(|(_, when)| when.is_due(clock))
            .map(|(id, _)| *id)
            .collect();
        for id in &due {
            self.pending.remove(id);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_task_fires_on_the_next_tick_only() {
        let mut clock = SimClock::default();
        let mut sched = Scheduler::new();
        let id = sched.after_ticks(clock, 1);

        assert!(sched.drain_due(clock).is_empty());
        clock.advance(Duration::from_millis(50));
        assert_eq!(sched.drain_due(clock), vec![id]);
        assert!(sched.drain_due(clock).is_empty());
    }

    #[test]
    fn wall_clock_task_fires_once_elapsed_reaches_due_time() {
        let mut clock = SimClock::default();
        let mut sched = Scheduler::new();
        let id = sched.after(clock, Duration::from_millis(250));

        for _ in 0..4 {
            clock.advance(Duration::from_millis(50));
            assert!(sched.drain_due(clock).is_empty());
        }
        clock.advance(Duration::from_millis(50));
        assert_eq!(sched.drain_due(clock), vec![id]);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut clock = SimClock::default();
        let mut sched = Scheduler::new();
        let id = sched.after_ticks(clock, 1);
        assert!(sched.cancel(id));
        assert!(!sched.cancel(id));

        clock.advance(Duration::from_millis(50));
        assert!(sched.drain_due(clock).is_empty());
    }

    #[test]
    fn same_tick_tasks_drain_in_creation_order() {
        let mut clock = SimClock::default();
        let mut sched = Scheduler::new();
        let a = sched.after_ticks(clock, 1);
        let b = sched.after_ticks(clock, 1);

        clock.advance(Duration::from_millis(50));
        assert_eq!(sched.drain_due(clock), vec![a, b]);
    }
}
