//! Two-stage spatial lookup behind the interact command.

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::config::{GameConfig, InteractConfig};
use crate::state::{EntitiesState, EntityId, LayerMask};

/// Bounded, distance-ordered candidate list produced by one query stage.
pub type QueryHits = ArrayVec<QueryHit, { GameConfig::MAX_QUERY_HITS }>;

/// One candidate body returned by a spatial query.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryHit {
    pub body: EntityId,
    /// Distance along the cast ray, or from the probe center in the
    /// fallback stage.
    pub distance: f32,
}

/// Which of the two ordered query attempts produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryStage {
    DirectionalCast,
    AreaFallback,
}

/// Casts from `origin` along `dir` for `max_dist`, collecting every body
/// intersected (not just the nearest) whose layers intersect `mask`.
pub fn cast_all(
    entities: &EntitiesState,
    origin: Vec2,
    dir: Vec2,
    max_dist: f32,
    mask: LayerMask,
) -> QueryHits {
    let mut hits = QueryHits::new();
    for prop in entities.props.iter() {
        if !prop.layers.intersects(mask) {
            continue;
        }
        if let Some(distance) = prop.collider.ray_hit(prop.position, origin, dir, max_dist) {
            push_hit(
                &mut hits,
                QueryHit {
                    body: prop.id,
                    distance,
                },
            );
        }
    }
    sort_hits(&mut hits);
    hits
}

/// Collects every body overlapping a probe circle, ordered by distance from
/// its center.
pub fn probe_all(
    entities: &EntitiesState,
    center: Vec2,
    radius: f32,
    mask: LayerMask,
) -> QueryHits {
    let mut hits = QueryHits::new();
    for prop in entities.props.iter() {
        if !prop.layers.intersects(mask) {
            continue;
        }
        if prop.collider.overlaps_circle(prop.position, center, radius) {
            push_hit(
                &mut hits,
                QueryHit {
                    body: prop.id,
                    distance: prop.position.distance(center),
                },
            );
        }
    }
    sort_hits(&mut hits);
    hits
}

/// The full two-stage interact lookup: a directional cast, then an area
/// fallback probe if the cast found nothing.
///
/// The fallback exists because a pure cast can miss thin or off-axis
/// colliders (e.g. trigger volumes not exactly on the cast line); it trades
/// precision for reachability. An empty result from both stages is a valid
/// outcome, never an error.
pub fn interact_query(
    entities: &EntitiesState,
    origin: Vec2,
    dir: Vec2,
    max_dist: f32,
    mask: LayerMask,
) -> (QueryStage, QueryHits) {
    let hits = cast_all(entities, origin, dir, max_dist, mask);
    if !hits.is_empty() {
        return (QueryStage::DirectionalCast, hits);
    }

    let center = origin + dir * (max_dist * InteractConfig::FALLBACK_PROBE_BIAS);
    let hits = probe_all(
        entities,
        center,
        InteractConfig::FALLBACK_PROBE_RADIUS,
        mask,
    );
    (QueryStage::AreaFallback, hits)
}

/// Inserts a hit, evicting the farthest one once the bound is reached.
fn push_hit(hits: &mut QueryHits, hit: QueryHit) {
    if hits.try_push(hit).is_ok() {
        return;
    }
    if let Some((index, worst)) = hits
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
        .map(|(i, h)| (i, h.distance))
        && hit.distance < worst
    {
        hits[index] = hit;
    }
}

/// Deterministic within-stage order: distance first, entity id as tie-break.
fn sort_hits(hits: &mut QueryHits) {
    hits.sort_unstable_by(|a, b| a.distance.total_cmp(&b.distance).then(a.body.cmp(&b.body)));
}
