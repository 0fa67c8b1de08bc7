use core::time::Duration;

use crate::state::LayerMask;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub interact: InteractConfig,
    pub motion: MotionConfig,
    /// Duration of one simulation tick.
    pub tick: Duration,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_PROPS: usize = 256;
    pub const MAX_DOORS: usize = 32;
    pub const MAX_TERMINALS: usize = 32;
    pub const MAX_PORTAL_ENDPOINTS: usize = 32;
    /// Maximum candidates retained by one spatial query stage.
    pub const MAX_QUERY_HITS: usize = 16;
    /// Maximum doors a single terminal can be wired to.
    pub const MAX_TERMINAL_LINKS: usize = 4;
    /// Cap on the ownership-chain walk during capability resolution.
    /// Breaks malformed parent cycles instead of looping forever.
    pub const MAX_PARENT_DEPTH: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

    pub fn new() -> Self {
        Self {
            interact: InteractConfig::default(),
            motion: MotionConfig::default(),
            tick: Self::DEFAULT_TICK,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Tuning for the contextual interact command.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractConfig {
    /// Reach of the directional cast, in world units.
    pub distance: f32,
    /// Layers considered by both query stages.
    pub mask: LayerMask,
}

impl InteractConfig {
    pub const DEFAULT_DISTANCE: f32 = 1.2;
    /// Radius of the stage-two area probe.
    pub const FALLBACK_PROBE_RADIUS: f32 = 0.4;
    /// The probe sits at this fraction of the cast distance along the ray.
    pub const FALLBACK_PROBE_BIAS: f32 = 0.5;
    /// Horizontal input below this magnitude does not flip facing.
    pub const FACING_DEAD_ZONE: f32 = 0.01;
}

impl Default for InteractConfig {
    fn default() -> Self {
        Self {
            distance: Self::DEFAULT_DISTANCE,
            mask: LayerMask::all(),
        }
    }
}

/// Tuning for player movement and jumping.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionConfig {
    pub move_speed: f32,
    pub jump_power: f32,
    pub max_jumps: u8,
    /// Baseline gravity scale applied while rising or grounded.
    pub base_gravity: f32,
    /// Extra gravity multiplier while falling.
    pub fall_gravity_mult: f32,
    /// Downward speed clamp, in world units per second.
    pub max_fall_speed: f32,
    /// Half-extents of the ground probe box under the player's feet.
    pub ground_probe_half: glam::Vec2,
    /// Offset from the player's position to the ground probe center.
    pub ground_probe_offset: glam::Vec2,
}

impl MotionConfig {
    /// World gravity acceleration before scaling, in units per second squared.
    pub const GRAVITY: f32 = 9.81;
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_power: 10.0,
            max_jumps: 2,
            base_gravity: 2.0,
            fall_gravity_mult: 2.0,
            max_fall_speed: 18.0,
            ground_probe_half: glam::Vec2::new(0.245, 0.015),
            ground_probe_offset: glam::Vec2::new(0.0, -0.5),
        }
    }
}
