//! Burst casts: N rays fanned across an angular spread from one origin.
//!
//! Each ray's origin is optionally displaced outward along its own
//! direction (`distance_offset`) before casting, so a fan can start on a
//! circle around the sensor rather than at its center.

use crate::backend::{CapabilityIndex, CollisionBackend, LayerMask, RayHit, resolve_target};
use crate::math::Vec2;
use crate::query::SensorHit;

use super::ray;

/// Directions for a burst of `ray_count` rays fanned across `spread_deg`
/// centered on `look`'s direction, the whole fan rotated by `offset_deg`.
///
/// For `ray_count <= 1` the single direction is `look`'s angle plus the
/// offset. Otherwise direction `i` sits at
/// `look_angle - spread/2 + i * spread/(ray_count - 1) + offset`, so the
/// first and last rays land exactly on the fan's edges.
pub fn burst_directions(look: Vec2, ray_count: u32, spread_deg: f32, offset_deg: f32) -> Vec<Vec2> {
    let look_angle = look.angle();
    let offset = offset_deg.to_radians();

    if ray_count <= 1 {
        return vec![Vec2::from_angle(look_angle + offset)];
    }

    let increment = spread_deg / (ray_count - 1) as f32;
    (0..ray_count)
        .map(|i| {
            let local_deg = -spread_deg / 2.0 + i as f32 * increment;
            Vec2::from_angle(look_angle + local_deg.to_radians() + offset)
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn first<W, T>(
    world: &W,
    from: Vec2,
    look: Vec2,
    distance: f32,
    mask: LayerMask,
    ray_count: u32,
    spread_deg: f32,
    offset_deg: f32,
    distance_offset: f32,
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    // Targets tested by an earlier ray are not re-tested by later ones.
    let mut seen: Vec<T> = Vec::new();

    for dir in burst_directions(look, ray_count, spread_deg, offset_deg) {
        let origin = from + dir * distance_offset;
        let Some(hit) = world.raycast(origin, dir, distance, mask) else {
            continue;
        };
        let Some(target) = resolve_target(world, hit.body) else {
            continue;
        };
        if seen.contains(&target) {
            continue;
        }
        seen.push(target.clone());
        if pred(&target) {
            return Some(SensorHit { target, hit });
        }
    }
    None
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn all_first<W, T>(
    world: &W,
    from: Vec2,
    look: Vec2,
    distance: f32,
    mask: LayerMask,
    ray_count: u32,
    spread_deg: f32,
    offset_deg: f32,
    distance_offset: f32,
    buf: &mut [RayHit],
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let mut seen: Vec<T> = Vec::new();

    for dir in burst_directions(look, ray_count, spread_deg, offset_deg) {
        let origin = from + dir * distance_offset;
        if let Some(found) =
            ray::all_first(world, origin, dir, distance, mask, buf, &mut seen, pred)
        {
            return Some(found);
        }
    }
    None
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn all<W, T>(
    world: &W,
    from: Vec2,
    look: Vec2,
    distance: f32,
    mask: LayerMask,
    ray_count: u32,
    spread_deg: f32,
    offset_deg: f32,
    distance_offset: f32,
    buf: &mut [RayHit],
    out: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    // `out` doubles as the cross-sub-cast dedup list: a target found by an
    // earlier ray is not duplicated by a later one.
    for dir in burst_directions(look, ray_count, spread_deg, offset_deg) {
        let origin = from + dir * distance_offset;
        ray::all(world, origin, dir, distance, mask, buf, out, pred);
    }
}
