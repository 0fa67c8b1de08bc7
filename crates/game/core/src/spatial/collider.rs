//! Collider shapes and the intersection tests behind spatial queries.

use glam::Vec2;

/// Convex collision shape attached to a prop, centered on its position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Collider {
    /// Axis-aligned box described by its half-extents.
    Aabb { half: Vec2 },
    /// Circle described by its radius.
    Circle { radius: f32 },
}

impl Collider {
    pub fn aabb(half_x: f32, half_y: f32) -> Self {
        Collider::Aabb {
            half: Vec2::new(half_x, half_y),
        }
    }

    pub fn circle(radius: f32) -> Self {
        Collider::Circle { radius }
    }

    /// Distance along a unit-direction ray at which it enters this collider,
    /// or `None` if the segment `[0, max_dist]` misses it entirely.
    ///
    /// A ray starting inside the collider hits at distance zero.
    pub fn ray_hit(&self, center: Vec2, origin: Vec2, dir: Vec2, max_dist: f32) -> Option<f32> {
        let t = match *self {
            Collider::Circle { radius } => ray_circle(center, radius, origin, dir)?,
            Collider::Aabb { half } => ray_aabb(center, half, origin, dir)?,
        };
        (t <= max_dist).then_some(t)
    }

    /// True if a probe circle overlaps this collider.
    pub fn overlaps_circle(&self, center: Vec2, probe_center: Vec2, probe_radius: f32) -> bool {
        match *self {
            Collider::Circle { radius } => {
                let combined = radius + probe_radius;
                center.distance_squared(probe_center) <= combined * combined
            }
            Collider::Aabb { half } => {
                let closest = probe_center.clamp(center - half, center + half);
                closest.distance_squared(probe_center) <= probe_radius * probe_radius
            }
        }
    }

    /// True if a probe box overlaps this collider.
    pub fn overlaps_aabb(&self, center: Vec2, box_center: Vec2, box_half: Vec2) -> bool {
        match *self {
            Collider::Aabb { half } => {
                let delta = (center - box_center).abs();
                let reach = half + box_half;
                delta.x <= reach.x && delta.y <= reach.y
            }
            Collider::Circle { radius } => {
                let closest = center.clamp(box_center - box_half, box_center + box_half);
                closest.distance_squared(center) <= radius * radius
            }
        }
    }
}

fn ray_circle(center: Vec2, radius: f32, origin: Vec2, dir: Vec2) -> Option<f32> {
    let m = origin - center;
    let c = m.length_squared() - radius * radius;
    if c <= 0.0 {
        // Origin inside the circle.
        return Some(0.0);
    }
    let b = m.dot(dir);
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

fn ray_aabb(center: Vec2, half: Vec2, origin: Vec2, dir: Vec2) -> Option<f32> {
    const EPS: f32 = 1e-6;
    let min = center - half;
    let max = center + half;

    let mut t_enter: f32 = 0.0;
    let mut t_exit = f32::INFINITY;

    for axis in 0..2 {
        let (o, d, lo, hi) = match axis {
            0 => (origin.x, dir.x, min.x, max.x),
            _ => (origin.y, dir.y, min.y, max.y),
        };
        if d.abs() < EPS {
            // Ray parallel to this slab: must already be within it.
            if o < lo || o > hi {
                return None;
            }
        } else {
            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some(t_enter.max(0.0))
}
