use bounded_vector::BoundedVec;
use glam::Vec2;

use super::{EntityId, Facing, LayerMask};
use crate::config::GameConfig;
use crate::spatial::Collider;

/// Aggregate state for every physical body in the scene.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: PlayerState,
    pub props: BoundedVec<PropState, 0, { GameConfig::MAX_PROPS }>,
}

impl EntitiesState {
    pub fn new(
        player: PlayerState,
        props: BoundedVec<PropState, 0, { GameConfig::MAX_PROPS }>,
    ) -> Self {
        Self { player, props }
    }

    /// Returns a reference to a prop by ID.
    pub fn prop(&self, id: EntityId) -> Option<&PropState> {
        self.props.iter().find(|prop| prop.id == id)
    }

    /// Returns a mutable reference to a prop by ID.
    pub fn prop_mut(&mut self, id: EntityId) -> Option<&mut PropState> {
        self.props.iter_mut().find(|prop| prop.id == id)
    }

    /// Removes a prop by ID. Returns false if it was not present.
    pub fn remove_prop(&mut self, id: EntityId) -> bool {
        match self.props.iter().position(|prop| prop.id == id) {
            Some(index) => {
                let _ = self.props.remove(index);
                true
            }
            None => false,
        }
    }
}

/// The player character's physical state.
///
/// Facing is only ever updated from horizontal input that clears the
/// dead-zone, so noise around zero cannot flicker it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    /// Last horizontal axis value received from input.
    pub move_axis: f32,
    pub grounded: bool,
    pub jumps_remaining: u8,
}

impl PlayerState {
    pub fn new(position: Vec2) -> Self {
        Self {
            id: EntityId::PLAYER,
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            move_axis: 0.0,
            grounded: false,
            jumps_remaining: 0,
        }
    }

    /// Relocates the body directly, zeroing velocity so the physics step
    /// does not carry momentum across the jump in position.
    pub fn relocate(&mut self, destination: Vec2) {
        self.position = destination;
        self.velocity = Vec2::ZERO;
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

/// A static physical body: collider, layers, and an optional owner in the
/// scene hierarchy. Capability lookups walk the `parent` chain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropState {
    pub id: EntityId,
    pub parent: Option<EntityId>,
    pub position: Vec2,
    pub collider: Collider,
    pub layers: LayerMask,
}

impl PropState {
    pub fn new(id: EntityId, position: Vec2, collider: Collider, layers: LayerMask) -> Self {
        Self {
            id,
            parent: None,
            position,
            collider,
            layers,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }
}
