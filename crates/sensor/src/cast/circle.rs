//! Swept-circle casts.

use crate::backend::{CapabilityIndex, CollisionBackend, LayerMask, RayHit, resolve_target};
use crate::math::Vec2;
use crate::query::SensorHit;

use super::{collect_unique, scan_first};

pub(crate) fn first<W, T>(
    world: &W,
    from: Vec2,
    dir: Vec2,
    radius: f32,
    distance: f32,
    mask: LayerMask,
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let hit = world.circle_cast(from, dir, radius, distance, mask)?;
    let target = resolve_target(world, hit.body)?;
    if pred(&target) {
        Some(SensorHit { target, hit })
    } else {
        None
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn all_first<W, T>(
    world: &W,
    from: Vec2,
    dir: Vec2,
    radius: f32,
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
    let count = world.circle_cast_all(from, dir, radius, distance, mask, buf);
    scan_first(world, &buf[..count], seen, pred)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn all<W, T>(
    world: &W,
    from: Vec2,
    dir: Vec2,
    radius: f32,
    distance: f32,
    mask: LayerMask,
    buf: &mut [RayHit],
    out: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let count = world.circle_cast_all(from, dir, radius, distance, mask, buf);
    collect_unique(world, &buf[..count], out, pred);
}
