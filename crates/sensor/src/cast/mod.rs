//! Per-shape query construction: small pure functions over the collision
//! backend, one module per cast shape.
//!
//! Every shape offers the three selection strategies:
//! - `first` — Simple: one underlying physics query, first raw hit only;
//! - `all_first` — scan all raw hits in cast order, dedup by target
//!   identity, return the first match, never building a result list;
//! - `all` — accumulate every unique matching target in first-seen order
//!   into a caller-owned list.
//!
//! Multi-cast shapes (burst, ladder) share the dedup list across sub-casts
//! for the `all*` strategies and short-circuit the outer loop on the first
//! qualifying hit for `first`/`all_first`.

pub mod boxcast;
pub mod burst;
pub mod circle;
pub mod ladder;
pub mod line;
pub mod overlap;
pub mod ray;

use crate::backend::{CapabilityIndex, CollisionBackend, RayHit, resolve_target};
use crate::query::SensorHit;

/// Scans raw hits in cast order and returns the first target that resolves
/// and satisfies the predicate.
///
/// `seen` records every target already tested, matched or rejected, so it is
/// never re-tested; callers spanning several sub-casts pass the same list
/// through all of them.
pub(crate) fn scan_first<W, T>(
    world: &W,
    hits: &[RayHit],
    seen: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) -> Option<SensorHit<T>>
where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    for hit in hits {
        let Some(target) = resolve_target(world, hit.body) else {
            continue;
        };
        if seen.contains(&target) {
            continue;
        }
        seen.push(target.clone());
        if pred(&target) {
            return Some(SensorHit { target, hit: *hit });
        }
    }
    None
}

/// Appends every unique target that resolves and satisfies the predicate,
/// preserving first-seen order across calls. Rejected targets are not
/// recorded and may be re-tested if hit again.
pub(crate) fn collect_unique<W, T>(
    world: &W,
    hits: &[RayHit],
    out: &mut Vec<T>,
    pred: &mut dyn FnMut(&T) -> bool,
) where
    W: CollisionBackend + CapabilityIndex<T>,
    T: PartialEq + Clone,
{
    for hit in hits {
        let Some(target) = resolve_target(world, hit.body) else {
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
