//! The closed set of interactive capabilities a world object may expose.

use std::collections::BTreeMap;

use crate::state::EntityId;

/// A named interactive behavior. Declaration order is dispatch priority:
/// when an object exposes several capabilities, the first listed here wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    Terminal,
    Door,
    Portal,
}

impl Capability {
    pub const fn mask(self) -> CapabilitySet {
        match self {
            Capability::Terminal => CapabilitySet::TERMINAL,
            Capability::Door => CapabilitySet::DOOR,
            Capability::Portal => CapabilitySet::PORTAL,
        }
    }
}

bitflags::bitflags! {
    /// The capabilities attached to a single world object.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CapabilitySet: u8 {
        const TERMINAL = 1 << 0;
        const DOOR = 1 << 1;
        const PORTAL = 1 << 2;
    }
}

/// Maps object identity to the capabilities it exposes.
///
/// Target resolution consults this index instead of inspecting object types:
/// the capability an object answers to is whatever the scene setup tagged it
/// with, evaluated in [`Capability`] priority order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityIndex {
    entries: BTreeMap<EntityId, CapabilitySet>,
}

impl CapabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags an object with an additional capability.
    pub fn grant(&mut self, object: EntityId, capability: Capability) {
        self.entries
            .entry(object)
            .or_default()
            .insert(capability.mask());
    }

    /// Removes a capability tag. Empty entries are dropped.
    pub fn revoke(&mut self, object: EntityId, capability: Capability) {
        if let Some(set) = self.entries.get_mut(&object) {
            set.remove(capability.mask());
            if set.is_empty() {
                self.entries.remove(&object);
            }
        }
    }

    /// The capability set attached directly to an object.
    pub fn of(&self, object: EntityId) -> CapabilitySet {
        self.entries.get(&object).copied().unwrap_or_default()
    }

    pub fn exposes(&self, object: EntityId, capability: Capability) -> bool {
        self.of(object).contains(capability.mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn priority_order_matches_declaration() {
        let order: Vec<Capability> = Capability::iter().collect();
        assert_eq!(
            order,
            vec![Capability::Terminal, Capability::Door, Capability::Portal]
        );
    }

    #[test]
    fn grant_and_revoke_round_trip() {
        let mut index = CapabilityIndex::new();
        let object = EntityId(3);

        index.grant(object, Capability::Door);
        index.grant(object, Capability::Portal);
        assert!(index.exposes(object, Capability::Door));
        assert!(index.exposes(object, Capability::Portal));
        assert!(!index.exposes(object, Capability::Terminal));

        index.revoke(object, Capability::Door);
        assert!(!index.exposes(object, Capability::Door));
        index.revoke(object, Capability::Portal);
        assert!(index.of(object).is_empty());
    }
}
