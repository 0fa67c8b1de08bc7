use core::time::Duration;

use bounded_vector::BoundedVec;
use glam::Vec2;

use crate::config::GameConfig;
use crate::state::EntityId;

/// One side of a linked teleportation pair.
///
/// Configuration is fixed after scene setup; only `available` changes at
/// runtime, and only through the teleport sequence. `available == false`
/// covers the whole in-flight window: from lock acquisition until the
/// cooldown elapses on both endpoints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortalEndpoint {
    pub id: EntityId,
    /// The other side of the pair. Unlinked endpoints reject teleports.
    pub linked: Option<EntityId>,
    pub position: Vec2,
    /// Offset applied to a mover arriving at this endpoint.
    pub exit_offset: Vec2,
    /// Per-teleport lockout after the mover is relocated.
    pub cooldown: Duration,
    /// Declared but enforced nowhere in the teleport logic; kept as
    /// configuration until product decides which trigger path it gates.
    pub one_way: bool,
    /// Whether a tagged mover entering the trigger volume starts a teleport.
    pub auto_activate: bool,
    /// Whether this endpoint only responds to an explicit interact.
    pub require_interact: bool,
    pub available: bool,
}

impl PortalEndpoint {
    pub const DEFAULT_EXIT_OFFSET: Vec2 = Vec2::new(0.0, 0.6);
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(250);

    pub fn new(id: EntityId, position: Vec2) -> Self {
        Self {
            id,
            linked: None,
            position,
            exit_offset: Self::DEFAULT_EXIT_OFFSET,
            cooldown: Self::DEFAULT_COOLDOWN,
            one_way: false,
            auto_activate: false,
            require_interact: true,
            available: true,
        }
    }

    #[must_use]
    pub fn linked_to(mut self, other: EntityId) -> Self {
        self.linked = Some(other);
        self
    }

    #[must_use]
    pub fn with_exit_offset(mut self, offset: Vec2) -> Self {
        self.exit_offset = offset;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn auto_activating(mut self) -> Self {
        self.auto_activate = true;
        self.require_interact = false;
        self
    }

    /// True if a tagged mover entering the trigger volume should start a
    /// teleport. The explicit interact path ignores both flags.
    pub fn auto_triggers(&self) -> bool {
        self.auto_activate && !self.require_interact
    }
}

/// All portal endpoints in the scene.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortalSet {
    pub endpoints: BoundedVec<PortalEndpoint, 0, { GameConfig::MAX_PORTAL_ENDPOINTS }>,
}

impl PortalSet {
    pub fn endpoint(&self, id: EntityId) -> Option<&PortalEndpoint> {
        self.endpoints.iter().find(|ep| ep.id == id)
    }

    pub fn endpoint_mut(&mut self, id: EntityId) -> Option<&mut PortalEndpoint> {
        self.endpoints.iter_mut().find(|ep| ep.id == id)
    }

    /// Removes an endpoint. Returns false if it was not present.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.endpoints.iter().position(|ep| ep.id == id) {
            Some(index) => {
                let _ = self.endpoints.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn set_available(&mut self, id: EntityId, available: bool) -> bool {
        match self.endpoint_mut(id) {
            Some(ep) => {
                ep.available = available;
                true
            }
            None => false,
        }
    }

    /// Links that are not reciprocated: `(endpoint, linked)` pairs where the
    /// linked endpoint is missing or points elsewhere. The lock mechanics
    /// still work on whichever pair the triggering side references, but a
    /// malformed configuration is worth surfacing at load time.
    pub fn asymmetric_links(&self) -> Vec<(EntityId, EntityId)> {
        let mut report = Vec::new();
        for ep in self.endpoints.iter() {
            let Some(linked) = ep.linked else { continue };
            let reciprocal = self
                .endpoint(linked)
                .is_some_and(|other| other.linked == Some(ep.id));
            if !reciprocal {
                report.push((ep.id, linked));
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u32, b: u32) -> PortalSet {
        let mut set = PortalSet::default();
        set.endpoints
            .push(PortalEndpoint::new(EntityId(a), Vec2::ZERO).linked_to(EntityId(b)))
            .unwrap();
        set.endpoints
            .push(PortalEndpoint::new(EntityId(b), Vec2::new(10.0, 0.0)).linked_to(EntityId(a)))
            .unwrap();
        set
    }

    #[test]
    fn symmetric_pair_reports_clean() {
        assert!(pair(1, 2).asymmetric_links().is_empty());
    }

    #[test]
    fn dangling_and_one_sided_links_are_reported() {
        let mut set = pair(1, 2);
        // 3 -> 1, but 1 links back to 2.
        set.endpoints
            .push(PortalEndpoint::new(EntityId(3), Vec2::new(5.0, 0.0)).linked_to(EntityId(1)))
            .unwrap();
        // 4 -> 9, which does not exist.
        set.endpoints
            .push(PortalEndpoint::new(EntityId(4), Vec2::new(6.0, 0.0)).linked_to(EntityId(9)))
            .unwrap();

        let report = set.asymmetric_links();
        assert_eq!(
            report,
            vec![(EntityId(3), EntityId(1)), (EntityId(4), EntityId(9))]
        );
    }

    #[test]
    fn auto_trigger_requires_both_flags() {
        let mut ep = PortalEndpoint::new(EntityId(1), Vec2::ZERO);
        assert!(!ep.auto_triggers());
        ep.auto_activate = true;
        ep.require_interact = true;
        assert!(!ep.auto_triggers());
        ep.require_interact = false;
        assert!(ep.auto_triggers());
    }
}
