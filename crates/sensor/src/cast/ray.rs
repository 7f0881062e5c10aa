//! Single-ray casts.

use crate::backend::{CapabilityIndex, CollisionBackend, LayerMask, RayHit, resolve_target};
use crate::math::Vec2;
use crate::query::SensorHit;

use super::{collect_unique, scan_first};

/// Simple: first raw hit only. A first hit that fails to resolve or fails
/// the predicate is a miss for the whole query.
pub(crate) fn first<W, T>(
    world: &W,
    from: Vec2,
    dir: Vec2,
    distance: f32,
    mask: LayerMask,
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let hit = world.raycast(from, dir, distance, mask)?;
    let target = resolve_target(world, hit.body)?;
    if pred(&target) {
        Some(SensorHit { target, hit })
    } else {
        None
    }
}

pub(crate) fn all_first<W, T>(
    world: &W,
    from: Vec2,
    dir: Vec2,
    distance: f32,
    mask: LayerMask,
    buf: &mut [RayHit],
    seen: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let count = world.raycast_all(from, dir, distance, mask, buf);
    scan_first(world, &buf[..count], seen, pred)
}

pub(crate) fn all<W, T>(
    world: &W,
    from: Vec2,
    dir: Vec2,
    distance: f32,
    mask: LayerMask,
    buf: &mut [RayHit],
    out: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let count = world.raycast_all(from, dir, distance, mask, buf);
    collect_unique(world, &buf[..count], out, pred);
}
