//! Target resolution: from a candidate body to a dispatchable capability.

use strum::IntoEnumIterator;

use super::{Capability, CapabilityIndex};
use crate::config::GameConfig;
use crate::state::{EntitiesState, EntityId};

/// A resolved interaction: which object handles it, and as what.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dispatch {
    pub target: EntityId,
    pub capability: Capability,
}

/// Resolves a candidate body to at most one capability dispatch.
///
/// Capabilities are tried in fixed priority order; for each, the body is
/// checked first, then its ancestors in the ownership hierarchy, nearest
/// first. The first match wins for the whole candidate. `None` means the
/// candidate exposes nothing known and is simply skipped; the next
/// candidate in the query result still gets its chance.
pub fn resolve_capability(
    capabilities: &CapabilityIndex,
    entities: &EntitiesState,
    body: EntityId,
) -> Option<Dispatch> {
    for capability in Capability::iter() {
        let mut node = Some(body);
        let mut depth = 0;
        while let Some(current) = node {
            if capabilities.exposes(current, capability) {
                return Some(Dispatch {
                    target: current,
                    capability,
                });
            }
            depth += 1;
            if depth >= GameConfig::MAX_PARENT_DEPTH {
                break;
            }
            node = entities.prop(current).and_then(|prop| prop.parent);
        }
    }
    None
}
