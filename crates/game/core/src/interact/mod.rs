//! Capability tagging and target resolution for the interact command.
//!
//! World objects are interactable when the [`CapabilityIndex`] tags them (or
//! an ancestor in their ownership hierarchy) with one of the closed set of
//! capabilities. Resolution walks outward from the queried body and
//! evaluates capabilities in fixed priority order, with no dynamic type
//! inspection anywhere.
mod capability;
mod resolver;

pub use capability::{Capability, CapabilityIndex, CapabilitySet};
pub use resolver::{Dispatch, resolve_capability};
