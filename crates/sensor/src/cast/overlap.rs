//! Static overlap-circle queries.
//!
//! The overlap shape has no direction: the first-hit strategies find the
//! nearest overlapping body and resolve it through a corrective raycast
//! toward its closest point, padding the ray by a fixed epsilon to account
//! for penetration. No overlapping body means no corrective cast at all.

use crate::backend::{BodyId, CapabilityIndex, CollisionBackend, LayerMask, RayHit, resolve_target};
use crate::math::Vec2;
use crate::query::SensorHit;

/// Padding added to the corrective ray so a body already penetrating the
/// sensor origin is still struck.
pub(crate) const PENETRATION_EPSILON: f32 = 0.1;

/// Untyped corrective probe: nearest overlapping body, then a raycast
/// toward its closest point. The ray may legitimately strike a different,
/// nearer body along the way.
pub(crate) fn probe<W>(world: &W, center: Vec2, radius: f32, mask: LayerMask) -> Option<RayHit>
where
    W: CollisionBackend,
{
    let body = world.overlap_circle(center, radius, mask)?;
    let delta = world.closest_point(body, center) - center;
    world.raycast(
        center,
        delta.normalized(),
        delta.length() + PENETRATION_EPSILON,
        mask,
    )
}

/// Typed first-hit: corrective probe, then target resolution on the struck
/// body. Also serves the all-and-return-first strategy, which falls back to
/// this single-probe form for the overlap shape.
pub(crate) fn first<W, T>(
    world: &W,
    center: Vec2,
    radius: f32,
    mask: LayerMask,
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let hit = probe(world, center, radius, mask)?;
    let target = resolve_target(world, hit.body)?;
    if pred(&target) {
        Some(SensorHit { target, hit })
    } else {
        None
    }
}

/// All overlapping bodies, resolved and deduplicated in backend order.
pub(crate) fn all<W, T>(
    world: &W,
    center: Vec2,
    radius: f32,
    mask: LayerMask,
    bodies: &mut [BodyId],
    out: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let count = world.overlap_circle_all(center, radius, mask, bodies);
    for body in &bodies[..count] {
        let Some(target) = resolve_target(world, *body) else {
            continue;
        };
        if out.contains(&target) {
            continue;
        }
        if !pred(&target) {
            continue;
        }
        out.push(target);
    }
}
