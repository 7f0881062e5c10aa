//! Scripted collision backend for unit tests: records every cast and
//! replays a per-call hit script, so geometry construction and scan order
//! can be asserted without real collision math.

use std::cell::RefCell;

use crate::backend::{BodyId, CapabilityIndex, CollisionBackend, LayerMask, RayHit};
use crate::math::Vec2;

#[derive(Default)]
pub(crate) struct ScriptedWorld {
    /// Origin and direction of every ray-like cast, in call order.
    pub rays: RefCell<Vec<(Vec2, Vec2)>>,
    /// Hits returned for call `i`, in cast order; exhausted calls miss.
    pub ray_script: Vec<Vec<RayHit>>,
    pub capabilities: Vec<(BodyId, u32)>,
    pub parents: Vec<(BodyId, BodyId)>,
    /// Nearest overlapping body and its closest point, if any.
    pub overlap: Option<(BodyId, Vec2)>,
    pub overlap_all: Vec<BodyId>,
}

impl ScriptedWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ray_script(mut self, script: Vec<Vec<RayHit>>) -> Self {
        self.ray_script = script;
        self
    }

    pub fn with_capability(mut self, body: u32, target: u32) -> Self {
        self.capabilities.push((BodyId(body), target));
        self
    }

    pub fn with_parent(mut self, child: u32, parent: u32) -> Self {
        self.parents.push((BodyId(child), BodyId(parent)));
        self
    }

    pub fn with_overlap(mut self, body: u32, closest: Vec2) -> Self {
        self.overlap = Some((BodyId(body), closest));
        self
    }

    pub fn hit(body: u32, distance: f32) -> RayHit {
        RayHit {
            body: BodyId(body),
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            distance,
        }
    }

    fn record(&self, from: Vec2, dir: Vec2) -> &[RayHit] {
        let mut rays = self.rays.borrow_mut();
        rays.push((from, dir));
        let call = rays.len() - 1;
        self.ray_script.get(call).map_or(&[], Vec::as_slice)
    }
}

impl CollisionBackend for ScriptedWorld {
    fn raycast(&self, from: Vec2, dir: Vec2, _distance: f32, _mask: LayerMask) -> Option<RayHit> {
        self.record(from, dir).first().copied()
    }

    fn raycast_all(
        &self,
        from: Vec2,
        dir: Vec2,
        _distance: f32,
        _mask: LayerMask,
        out: &mut [RayHit],
    ) -> usize {
        let hits = self.record(from, dir);
        let count = hits.len().min(out.len());
        out[..count].copy_from_slice(&hits[..count]);
        count
    }

    fn linecast(&self, from: Vec2, to: Vec2, mask: LayerMask) -> Option<RayHit> {
        self.raycast(from, (to - from).normalized(), from.distance(to), mask)
    }

    fn linecast_all(&self, from: Vec2, to: Vec2, mask: LayerMask, out: &mut [RayHit]) -> usize {
        self.raycast_all(from, (to - from).normalized(), from.distance(to), mask, out)
    }

    fn circle_cast(
        &self,
        from: Vec2,
        dir: Vec2,
        _radius: f32,
        distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.raycast(from, dir, distance, mask)
    }

    fn circle_cast_all(
        &self,
        from: Vec2,
        dir: Vec2,
        _radius: f32,
        distance: f32,
        mask: LayerMask,
        out: &mut [RayHit],
    ) -> usize {
        self.raycast_all(from, dir, distance, mask, out)
    }

    fn box_cast(
        &self,
        from: Vec2,
        dir: Vec2,
        _size: Vec2,
        _angle_deg: f32,
        distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.raycast(from, dir, distance, mask)
    }

    fn box_cast_all(
        &self,
        from: Vec2,
        dir: Vec2,
        _size: Vec2,
        _angle_deg: f32,
        distance: f32,
        mask: LayerMask,
        out: &mut [RayHit],
    ) -> usize {
        self.raycast_all(from, dir, distance, mask, out)
    }

    fn overlap_circle(&self, _center: Vec2, _radius: f32, _mask: LayerMask) -> Option<BodyId> {
        self.overlap.map(|(body, _)| body)
    }

    fn overlap_circle_all(
        &self,
        _center: Vec2,
        _radius: f32,
        _mask: LayerMask,
        out: &mut [BodyId],
    ) -> usize {
        let count = self.overlap_all.len().min(out.len());
        out[..count].copy_from_slice(&self.overlap_all[..count]);
        count
    }

    fn closest_point(&self, body: BodyId, from: Vec2) -> Vec2 {
        match self.overlap {
            Some((overlapped, closest)) if overlapped == body => closest,
            _ => from,
        }
    }

    fn parent(&self, body: BodyId) -> Option<BodyId> {
        self.parents
            .iter()
            .find(|(child, _)| *child == body)
            .map(|(_, parent)| *parent)
    }
}

impl CapabilityIndex<u32> for ScriptedWorld {
    fn capability(&self, body: BodyId) -> Option<u32> {
        self.capabilities
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, target)| *target)
    }
}
