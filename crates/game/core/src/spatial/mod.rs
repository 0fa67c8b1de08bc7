//! Spatial queries over the scene's physical bodies.
//!
//! The interact command resolves its target through [`interact_query`], a
//! two-stage lookup: a directional cast first, then a fixed-radius area
//! probe only when the cast finds nothing. Ground detection reuses the same
//! collider overlap tests.
mod collider;
mod query;

pub use collider::Collider;
pub use query::{QueryHit, QueryHits, QueryStage, cast_all, interact_query, probe_all};
