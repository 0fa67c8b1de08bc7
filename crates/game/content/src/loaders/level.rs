//! Scene layout loader.
//!
//! Loads props, doors, terminals, and portal endpoints from a RON file and
//! assembles a validated [`GameState`]. Structural problems (duplicate ids,
//! dangling references) fail the load; suspicious portal configurations
//! (one-sided links, inert `one_way` flags) are surfaced as warnings for
//! the host to log.

use core::time::Duration;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use voidgate_core::spatial::Collider;
use voidgate_core::state::{DoorState, EntityId, GameState, LayerMask, PropState, TerminalState};
use voidgate_core::{PortalEndpoint, PortalSet};

use crate::loaders::{LoadResult, read_file};

/// Scene data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelRon {
    player_spawn: (f32, f32),
    #[serde(default)]
    props: Vec<PropRon>,
    #[serde(default)]
    doors: Vec<DoorRon>,
    #[serde(default)]
    terminals: Vec<TerminalRon>,
    #[serde(default)]
    portals: Vec<PortalRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PropRon {
    id: u32,
    pos: (f32, f32),
    collider: ColliderRon,
    #[serde(default)]
    layers: Vec<LayerRon>,
    #[serde(default)]
    parent: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum ColliderRon {
    Aabb { half: (f32, f32) },
    Circle { radius: f32 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum LayerRon {
    Default,
    Ground,
    Interactable,
    Trigger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DoorRon {
    id: u32,
    #[serde(default)]
    target_scene: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TerminalRon {
    id: u32,
    #[serde(default)]
    opens: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PortalRon {
    id: u32,
    pos: (f32, f32),
    #[serde(default)]
    linked: Option<u32>,
    #[serde(default = "default_exit_offset")]
    exit_offset: (f32, f32),
    #[serde(default = "default_cooldown_secs")]
    cooldown_secs: f32,
    #[serde(default)]
    one_way: bool,
    #[serde(default)]
    auto_activate: bool,
    #[serde(default = "default_true")]
    require_interact: bool,
}

fn default_exit_offset() -> (f32, f32) {
    (
        PortalEndpoint::DEFAULT_EXIT_OFFSET.x,
        PortalEndpoint::DEFAULT_EXIT_OFFSET.y,
    )
}

fn default_cooldown_secs() -> f32 {
    PortalEndpoint::DEFAULT_COOLDOWN.as_secs_f32()
}

fn default_true() -> bool {
    true
}

/// Non-fatal findings surfaced by a level load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelWarning {
    /// An endpoint links to one that is missing or does not link back.
    AsymmetricPortalLink { endpoint: EntityId, linked: EntityId },
    /// `one_way` is declared on the endpoint but enforced nowhere in the
    /// teleport logic.
    OneWayDeclared { endpoint: EntityId },
}

impl fmt::Display for LevelWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelWarning::AsymmetricPortalLink { endpoint, linked } => write!(
                f,
                "portal {endpoint} links to {linked}, which does not link back"
            ),
            LevelWarning::OneWayDeclared { endpoint } => write!(
                f,
                "portal {endpoint} declares one_way, which no trigger path enforces"
            ),
        }
    }
}

/// A loaded scene: the assembled state plus anything worth logging.
#[derive(Debug)]
pub struct LoadedLevel {
    pub state: GameState,
    pub warnings: Vec<LevelWarning>,
}

/// Loader for scene layouts from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a scene from a RON file.
    pub fn load(path: &Path) -> LoadResult<LoadedLevel> {
        let content = read_file(path)?;
        Self::load_str(&content)
    }

    /// Load a scene from RON text.
    pub fn load_str(content: &str) -> LoadResult<LoadedLevel> {
        let data: LevelRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;

        let mut builder = GameState::builder()
            .player_at(glam::Vec2::new(data.player_spawn.0, data.player_spawn.1));

        for prop in &data.props {
            let mut state = PropState::new(
                EntityId(prop.id),
                glam::Vec2::new(prop.pos.0, prop.pos.1),
                prop.collider.into(),
                layer_mask(&prop.layers),
            );
            if let Some(parent) = prop.parent {
                state = state.with_parent(EntityId(parent));
            }
            builder = builder.prop(state);
        }
        for door in &data.doors {
            builder = builder.door(DoorState::new(EntityId(door.id), door.target_scene.clone()));
        }
        for terminal in &data.terminals {
            let mut state = TerminalState::new(EntityId(terminal.id));
            for door in &terminal.opens {
                state = state.opening(EntityId(*door));
            }
            builder = builder.terminal(state);
        }
        for portal in &data.portals {
            builder = builder.portal(endpoint_from(portal));
        }

        let state = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid level: {}", e))?;
        let warnings = collect_warnings(&state.world.portals);

        Ok(LoadedLevel { state, warnings })
    }
}

fn endpoint_from(portal: &PortalRon) -> PortalEndpoint {
    let mut endpoint = PortalEndpoint::new(
        EntityId(portal.id),
        glam::Vec2::new(portal.pos.0, portal.pos.1),
    )
    .with_exit_offset(glam::Vec2::new(portal.exit_offset.0, portal.exit_offset.1))
    .with_cooldown(Duration::from_secs_f32(portal.cooldown_secs.max(0.0)));

    if let Some(linked) = portal.linked {
        endpoint = endpoint.linked_to(EntityId(linked));
    }
    endpoint.one_way = portal.one_way;
    endpoint.auto_activate = portal.auto_activate;
    endpoint.require_interact = portal.require_interact;
    endpoint
}

fn layer_mask(layers: &[LayerRon]) -> LayerMask {
    if layers.is_empty() {
        return LayerMask::default();
    }
    let mut mask = LayerMask::empty();
    for layer in layers {
        mask |= match layer {
            LayerRon::Default => LayerMask::DEFAULT,
            LayerRon::Ground => LayerMask::GROUND,
            LayerRon::Interactable => LayerMask::INTERACTABLE,
            LayerRon::Trigger => LayerMask::TRIGGER,
        };
    }
    mask
}

fn collect_warnings(portals: &PortalSet) -> Vec<LevelWarning> {
    let mut warnings = Vec::new();
    for (endpoint, linked) in portals.asymmetric_links() {
        warnings.push(LevelWarning::AsymmetricPortalLink { endpoint, linked });
    }
    for endpoint in portals.endpoints.iter() {
        if endpoint.one_way {
            warnings.push(LevelWarning::OneWayDeclared {
                endpoint: endpoint.id,
            });
        }
    }
    warnings
}

impl From<ColliderRon> for Collider {
    fn from(collider: ColliderRon) -> Self {
        match collider {
            ColliderRon::Aabb { half } => Collider::aabb(half.0, half.1),
            ColliderRon::Circle { radius } => Collider::circle(radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LEVEL: &str = r#"
        LevelRon(
            player_spawn: (0.0, 0.0),
            props: [
                PropRon(
                    id: 10,
                    pos: (1.0, 0.0),
                    collider: Aabb(half: (0.3, 0.3)),
                    layers: [Interactable],
                ),
                PropRon(
                    id: 11,
                    pos: (0.0, -0.55),
                    collider: Aabb(half: (5.0, 0.05)),
                    layers: [Ground],
                ),
            ],
            doors: [
                DoorRon(id: 10, target_scene: Some("LevelB")),
            ],
            portals: [
                PortalRon(id: 20, pos: (0.0, 2.0), linked: Some(21)),
                PortalRon(id: 21, pos: (10.0, 2.0), linked: Some(20), one_way: true),
            ],
        )
    "#;

    #[test]
    fn loads_a_complete_scene() {
        let level = LevelLoader::load_str(LEVEL).unwrap();
        let state = &level.state;

        assert_eq!(state.entities.props.len(), 2);
        assert!(state.world.door(EntityId(10)).is_some());
        assert!(state.world.portals.endpoint(EntityId(20)).is_some());
        assert_eq!(
            state.world.portals.endpoint(EntityId(21)).unwrap().linked,
            Some(EntityId(20))
        );
        // The symmetric pair is clean; only the inert one_way is flagged.
        assert_eq!(
            level.warnings,
            vec![LevelWarning::OneWayDeclared {
                endpoint: EntityId(21)
            }]
        );
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LEVEL.as_bytes()).unwrap();

        let level = LevelLoader::load(file.path()).unwrap();
        assert_eq!(level.state.entities.props.len(), 2);
    }

    #[test]
    fn asymmetric_link_warns_but_loads() {
        let level = LevelLoader::load_str(
            r#"
            LevelRon(
                player_spawn: (0.0, 0.0),
                portals: [
                    PortalRon(id: 20, pos: (0.0, 0.0), linked: Some(99)),
                ],
            )
            "#,
        )
        .unwrap();

        assert_eq!(
            level.warnings,
            vec![LevelWarning::AsymmetricPortalLink {
                endpoint: EntityId(20),
                linked: EntityId(99)
            }]
        );
    }

    #[test]
    fn duplicate_ids_fail_the_load() {
        let result = LevelLoader::load_str(
            r#"
            LevelRon(
                player_spawn: (0.0, 0.0),
                doors: [
                    DoorRon(id: 1),
                    DoorRon(id: 1),
                ],
            )
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn portal_defaults_match_runtime_defaults() {
        let level = LevelLoader::load_str(
            r#"
            LevelRon(
                player_spawn: (0.0, 0.0),
                portals: [
                    PortalRon(id: 20, pos: (0.0, 0.0)),
                ],
            )
            "#,
        )
        .unwrap();

        let endpoint = level.state.world.portals.endpoint(EntityId(20)).unwrap();
        assert_eq!(endpoint.exit_offset, PortalEndpoint::DEFAULT_EXIT_OFFSET);
        assert_eq!(endpoint.cooldown, PortalEndpoint::DEFAULT_COOLDOWN);
        assert!(endpoint.require_interact);
        assert!(!endpoint.auto_activate);
    }
}
