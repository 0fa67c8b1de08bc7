use std::collections::BTreeMap;

use crate::sched::TaskId;
use crate::state::EntityId;

/// Phase an in-flight teleport is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequencePhase {
    /// One tick after the trigger: move the mover, fire exit feedback.
    Relocate,
    /// Cooldown elapsed: both endpoints become available again.
    Unlock,
}

/// Explicit task state for one teleport in flight.
///
/// Both endpoints are already locked by the time a sequence exists; the
/// sequence only carries what the deferred phases need. Destroying either
/// endpoint cancels the pending phase via the scheduler and unlocks the
/// survivor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeleportSequence {
    pub source: EntityId,
    pub dest: EntityId,
    pub mover: EntityId,
    pub phase: SequencePhase,
}

impl TeleportSequence {
    pub fn touches(&self, endpoint: EntityId) -> bool {
        self.source == endpoint || self.dest == endpoint
    }

    /// The endpoint of the pair that is not the given one.
    pub fn counterpart(&self, endpoint: EntityId) -> EntityId {
        if self.source == endpoint {
            self.dest
        } else {
            self.source
        }
    }
}

/// In-flight teleport sequences keyed by their pending scheduler task.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortalTransits {
    entries: BTreeMap<TaskId, TeleportSequence>,
}

impl PortalTransits {
    pub fn insert(&mut self, task: TaskId, sequence: TeleportSequence) {
        self.entries.insert(task, sequence);
    }

    pub fn take(&mut self, task: TaskId) -> Option<TeleportSequence> {
        self.entries.remove(&task)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any in-flight sequence involves the given endpoint.
    pub fn involves(&self, endpoint: EntityId) -> bool {
        self.entries.values().any(|seq| seq.touches(endpoint))
    }

    /// Removes every sequence touching the given endpoint, returning the
    /// cancelled tasks and their sequences.
    pub fn cancel_for(&mut self, endpoint: EntityId) -> Vec<(TaskId, TeleportSequence)> {
        let cancelled: Vec<TaskId> = self
            .entries
            .iter()
            .filter(|(_, seq)| seq.touches(endpoint))
            .map(|(task, _)| *task)
            .collect();
        cancelled
            .into_iter()
            .filter_map(|task| self.entries.remove(&task).map(|seq| (task, seq)))
            .collect()
    }
}
