//! Ladder casts: one ray repeated at successively offset origins.
//!
//! Models a staircase of parallel casts: iteration `i` fires from
//! `from + step_dir * step_size * i`, all along the same direction. The
//! step direction comes from a compass-style heading (0° steps +y).

use crate::backend::{CapabilityIndex, CollisionBackend, LayerMask, RayHit, resolve_target};
use crate::math::Vec2;
use crate::query::SensorHit;

use super::ray;

#[allow(clippy::too_many_arguments)]
pub(crate) fn first<W, T>(
    world: &W,
    from: Vec2,
    dir: Vec2,
    distance: f32,
    mask: LayerMask,
    step_count: u32,
    step_size: f32,
    step_angle_deg: f32,
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let step = Vec2::from_heading_deg(step_angle_deg) * step_size;
    let mut seen: Vec<T> = Vec::new();
    let mut pos = from;

    for _ in 0..step_count {
        if let Some(hit) = world.raycast(pos, dir, distance, mask)
            && let Some(target) = resolve_target(world, hit.body)
            && !seen.contains(&target)
        {
            seen.push(target.clone());
            if pred(&target) {
                return Some(SensorHit { target, hit });
            }
        }
        pos += step;
    }
    None
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn all_first<W, T>(
    world: &W,
    from: Vec2,
    dir: Vec2,
    distance: f32,
    mask: LayerMask,
    step_count: u32,
    step_size: f32,
    step_angle_deg: f32,
    buf: &mut [RayHit],
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let step = Vec2::from_heading_deg(step_angle_deg) * step_size;
    let mut seen: Vec<T> = Vec::new();
    let mut pos = from;

    for _ in 0..step_count {
        if let Some(found) = ray::all_first(world, pos, dir, distance, mask, buf, &mut seen, pred)
        {
            return Some(found);
        }
        pos += step;
    }
    None
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn all<W, T>(
    world: &W,
    from: Vec2,
    dir: Vec2,
    distance: f32,
    mask: LayerMask,
    step_count: u32,
    step_size: f32,
    step_angle_deg: f32,
    buf: &mut [RayHit],
    out: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    let step = Vec2::from_heading_deg(step_angle_deg) * step_size;
    let mut pos = from;

    // `out` carries dedup across steps: a target hit by step 2 that was
    // already found by step 1 is not duplicated.
    for _ in 0..step_count {
        ray::all(world, pos, dir, distance, mask, buf, out, pred);
        pos += step;
    }
}
