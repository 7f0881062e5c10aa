//! Segment casts toward an explicit world point.

use crate::backend::{CapabilityIndex, CollisionBackend, LayerMask, RayHit, resolve_target};
use crate::math::Vec2;
use crate::query::SensorHit;

use super::{collect_unique, scan_first};

pub(crate) fn first<W, T>(
    world: &W,
    from: Vec2,
    to: Vec2,
    mask: LayerMask,
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let hit = world.linecast(from, to, mask)?;
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
    to: Vec2,
    mask: LayerMask,
    buf: &mut [RayHit],
    seen: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let count = world.linecast_all(from, to, mask, buf);
    scan_first(world, &buf[..count], seen, pred)
}

pub(crate) fn all<W, T>(
    world: &W,
    from: Vec2,
    to: Vec2,
    mask: LayerMask,
    buf: &mut [RayHit],
    out: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let count = world.linecast_all(from, to, mask, buf);
    collect_unique(world, &buf[..count], out, pred);
}
