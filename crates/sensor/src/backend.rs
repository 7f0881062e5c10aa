//! Collision backend traits: the narrow interfaces a spatial index must
//! implement for the query engine to drive it.
//!
//! The engine depends only on: hit → body, body → structural parent, body →
//! capability lookup, and hit → distance along the cast. It never assumes a
//! specific scene-graph representation.

use crate::math::Vec2;

/// Opaque handle for a collision body owned by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyId(pub u32);

/// Record of a single cast hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayHit {
    /// The body the cast struck.
    pub body: BodyId,
    /// World-space contact point.
    pub point: Vec2,
    /// Surface normal at the contact point.
    pub normal: Vec2,
    /// Distance along the cast at which the hit occurred.
    pub distance: f32,
}

bitflags::bitflags! {
    /// Collision layer filter forwarded opaquely to the backend.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        const ALL = u32::MAX;
    }
}

impl LayerMask {
    /// Mask selecting the single layer `index` (0..32).
    pub fn layer(index: u32) -> Self {
        Self::from_bits_retain(1 << index)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Spatial/collision index the query engine casts against.
///
/// # Contract
///
/// - `*_all` primitives fill the caller-provided buffer in **cast order**
///   (the order the collision system returns hits, not sorted by the engine)
///   and return the number of hits written. More raw hits than the buffer
///   holds is silent truncation, not an error; sizing the buffer is the
///   caller's responsibility.
/// - First-hit primitives return the nearest hit along the cast, or `None`.
/// - Degenerate geometry (zero distance, zero radius) is forwarded without
///   validation and may simply produce no hits.
/// - [`parent`](CollisionBackend::parent) exposes the structural ancestor
///   chain used for capability resolution; chains must be finite.
pub trait CollisionBackend {
    /// Single ray: origin, direction, max distance.
    fn raycast(&self, from: Vec2, dir: Vec2, distance: f32, mask: LayerMask) -> Option<RayHit>;

    fn raycast_all(
        &self,
        from: Vec2,
        dir: Vec2,
        distance: f32,
        mask: LayerMask,
        out: &mut [RayHit],
    ) -> usize;

    /// Single segment from `from` to an explicit target point.
    fn linecast(&self, from: Vec2, to: Vec2, mask: LayerMask) -> Option<RayHit>;

    fn linecast_all(&self, from: Vec2, to: Vec2, mask: LayerMask, out: &mut [RayHit]) -> usize;

    /// Swept circle.
    fn circle_cast(
        &self,
        from: Vec2,
        dir: Vec2,
        radius: f32,
        distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    #[allow(clippy::too_many_arguments)]
    fn circle_cast_all(
        &self,
        from: Vec2,
        dir: Vec2,
        radius: f32,
        distance: f32,
        mask: LayerMask,
        out: &mut [RayHit],
    ) -> usize;

    /// Swept oriented box; `angle_deg` rotates the box around its center.
    fn box_cast(
        &self,
        from: Vec2,
        dir: Vec2,
        size: Vec2,
        angle_deg: f32,
        distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    #[allow(clippy::too_many_arguments)]
    fn box_cast_all(
        &self,
        from: Vec2,
        dir: Vec2,
        size: Vec2,
        angle_deg: f32,
        distance: f32,
        mask: LayerMask,
        out: &mut [RayHit],
    ) -> usize;

    /// Nearest body overlapping the circle, if any.
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Option<BodyId>;

    fn overlap_circle_all(
        &self,
        center: Vec2,
        radius: f32,
        mask: LayerMask,
        out: &mut [BodyId],
    ) -> usize;

    /// Closest point on `body`'s surface to `from` (used by the overlap
    /// shape's corrective raycast).
    fn closest_point(&self, body: BodyId, from: Vec2) -> Vec2;

    /// Structural parent of `body`, or `None` at the chain root.
    fn parent(&self, body: BodyId) -> Option<BodyId>;
}

/// Capability lookup on exactly one body.
///
/// The engine walks the parent chain itself: the hit body is consulted
/// first, then each ancestor in order, and the first `Some` wins
/// (so a limb hitbox resolves to the actor that owns it).
pub trait CapabilityIndex<T> {
    fn capability(&self, body: BodyId) -> Option<T>;
}

/// Resolves the capability `T` for `body`, walking the ancestor chain.
///
/// A body that yields no `T` anywhere in its chain is simply not a target;
/// callers skip it rather than treating the query as failed.
pub fn resolve_target<W, T>(world: &W, body: BodyId) -> Option<T>
where
    W: CollisionBackend + CapabilityIndex<T>,
{
    let mut cursor = Some(body);
    while let Some(current) = cursor {
        if let Some(target) = world.capability(current) {
            return Some(target);
        }
        cursor = world.parent(current);
    }
    None
}
