//! The sensor types: typed target seeking and untyped obstruction probing.

use std::marker::PhantomData;

use crate::backend::{BodyId, CapabilityIndex, CollisionBackend, RayHit};
use crate::cast;
use crate::math::Vec2;
use crate::params::{Frame, SensorParameters, Shape};

/// A resolved query result: the target plus the raw hit that reached it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorHit<T> {
    pub target: T,
    pub hit: RayHit,
}

/// Scratch capacity used when none is given: up to this many raw hits are
/// considered per underlying cast.
pub const DEFAULT_SCRATCH_CAPACITY: usize = 8;

const EMPTY_HIT: RayHit = RayHit {
    body: BodyId(0),
    point: Vec2::ZERO,
    normal: Vec2::ZERO,
    distance: 0.0,
};

/// Casts against a collision backend to find targets of capability type `T`.
///
/// A sensor owns its parameters and its scratch buffers; buffers are reused
/// across calls, so a given sensor must not be shared between threads and a
/// query's raw hits never outlive the call. Raw hits beyond the scratch
/// capacity are silently truncated by the backend primitive; size the
/// capacity to the expected maximum hit count.
pub struct Sensor<T> {
    params: SensorParameters,
    hits: Box<[RayHit]>,
    bodies: Box<[BodyId]>,
    _target: PhantomData<fn() -> T>,
}

impl<T: PartialEq + Clone> Sensor<T> {
    pub fn new(params: SensorParameters) -> Self {
        Self::with_capacity(params, DEFAULT_SCRATCH_CAPACITY)
    }

    /// Creates a sensor whose scratch buffers hold up to `capacity` raw
    /// hits per underlying cast.
    pub fn with_capacity(params: SensorParameters, capacity: usize) -> Self {
        Self {
            params,
            hits: vec![EMPTY_HIT; capacity].into_boxed_slice(),
            bodies: vec![BodyId(0); capacity].into_boxed_slice(),
            _target: PhantomData,
        }
    }

    pub fn params(&self) -> &SensorParameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SensorParameters {
        &mut self.params
    }

    /// Replaces the whole parameter set (e.g. from a loaded profile).
    pub fn set_params(&mut self, params: SensorParameters) {
        self.params = params;
    }

    /// Simple strategy: one underlying physics query, first raw hit only.
    pub fn seek_first<W>(&self, world: &W, frame: Frame) -> Option<SensorHit<T>>
    where
        W: CollisionBackend + CapabilityIndex<T>,
    {
        self.seek_first_where(world, frame, |_| true)
    }

    /// Simple strategy with a predicate. If the first raw hit resolves to a
    /// target that fails the predicate, the whole query misses; further raw
    /// hits are never scanned in this mode. (Burst and ladder continue to
    /// later sub-casts until the first qualifying hit.)
    pub fn seek_first_where<W, F>(&self, world: &W, frame: Frame, mut pred: F) -> Option<SensorHit<T>>
    where
        W: CollisionBackend + CapabilityIndex<T>,
        F: FnMut(&T) -> bool,
    {
        let p = self.params;
        let from = p.cast_position(frame);
        tracing::trace!(shape = %p.shape.mode(), "seek_first");

        match p.shape {
            Shape::Ray => cast::ray::first(world, from, frame.facing, p.distance, p.mask, &mut pred),
            Shape::Line { target } => cast::line::first(world, from, target, p.mask, &mut pred),
            Shape::Circle { radius } => {
                cast::circle::first(world, from, frame.facing, radius, p.distance, p.mask, &mut pred)
            }
            Shape::Box { size, angle_deg } => cast::boxcast::first(
                world,
                from,
                frame.facing,
                size,
                angle_deg,
                p.distance,
                p.mask,
                &mut pred,
            ),
            Shape::Overlap { radius } => {
                cast::overlap::first(world, from, radius, p.mask, &mut pred)
            }
            Shape::Burst {
                ray_count,
                spread_deg,
                offset_deg,
                distance_offset,
            } => cast::burst::first(
                world,
                from,
                frame.facing,
                p.distance,
                p.mask,
                ray_count,
                spread_deg,
                offset_deg,
                distance_offset,
                &mut pred,
            ),
            Shape::Ladder {
                step_count,
                step_size,
                step_angle_deg,
            } => cast::ladder::first(
                world,
                from,
                frame.facing,
                p.distance,
                p.mask,
                step_count,
                step_size,
                step_angle_deg,
                &mut pred,
            ),
        }
    }

    /// AllAndReturnFirst strategy: scans every raw hit in cast order,
    /// dedups by target identity, returns the first match. Exits early and
    /// never allocates the full result list.
    pub fn seek_all_first<W>(&mut self, world: &W, frame: Frame) -> Option<SensorHit<T>>
    where
        W: CollisionBackend + CapabilityIndex<T>,
    {
        self.seek_all_first_where(world, frame, |_| true)
    }

    pub fn seek_all_first_where<W, F>(
        &mut self,
        world: &W,
        frame: Frame,
        mut pred: F,
    ) -> Option<SensorHit<T>>
    where
        W: CollisionBackend + CapabilityIndex<T>,
        F: FnMut(&T) -> bool,
    {
        let p = self.params;
        let from = p.cast_position(frame);
        let buf = &mut self.hits;
        tracing::trace!(shape = %p.shape.mode(), "seek_all_first");

        let mut seen: Vec<T> = Vec::new();
        match p.shape {
            Shape::Ray => cast::ray::all_first(
                world,
                from,
                frame.facing,
                p.distance,
                p.mask,
                buf,
                &mut seen,
                &mut pred,
            ),
            Shape::Line { target } => {
                cast::line::all_first(world, from, target, p.mask, buf, &mut seen, &mut pred)
            }
            Shape::Circle { radius } => cast::circle::all_first(
                world,
                from,
                frame.facing,
                radius,
                p.distance,
                p.mask,
                buf,
                &mut seen,
                &mut pred,
            ),
            Shape::Box { size, angle_deg } => cast::boxcast::all_first(
                world,
                from,
                frame.facing,
                size,
                angle_deg,
                p.distance,
                p.mask,
                buf,
                &mut seen,
                &mut pred,
            ),
            // Overlap has no cast order to scan; it keeps the single-probe
            // form in this mode.
            Shape::Overlap { radius } => {
                cast::overlap::first(world, from, radius, p.mask, &mut pred)
            }
            Shape::Burst {
                ray_count,
                spread_deg,
                offset_deg,
                distance_offset,
            } => cast::burst::all_first(
                world,
                from,
                frame.facing,
                p.distance,
                p.mask,
                ray_count,
                spread_deg,
                offset_deg,
                distance_offset,
                buf,
                &mut pred,
            ),
            Shape::Ladder {
                step_count,
                step_size,
                step_angle_deg,
            } => cast::ladder::all_first(
                world,
                from,
                frame.facing,
                p.distance,
                p.mask,
                step_count,
                step_size,
                step_angle_deg,
                buf,
                &mut pred,
            ),
        }
    }

    /// All strategy: every unique matching target, in first-seen cast order
    /// (no distance sorting). An empty result is the normal negative
    /// outcome, not an error.
    pub fn seek_all<W>(&mut self, world: &W, frame: Frame) -> Vec<T>
    where
        W: CollisionBackend + CapabilityIndex<T>,
    {
        self.seek_all_where(world, frame, |_| true)
    }

    pub fn seek_all_where<W, F>(&mut self, world: &W, frame: Frame, mut pred: F) -> Vec<T>
    where
        W: CollisionBackend + CapabilityIndex<T>,
        F: FnMut(&T) -> bool,
    {
        let p = self.params;
        let from = p.cast_position(frame);
        tracing::trace!(shape = %p.shape.mode(), "seek_all");

        let mut out = Vec::new();
        match p.shape {
            Shape::Ray => cast::ray::all(
                world,
                from,
                frame.facing,
                p.distance,
                p.mask,
                &mut self.hits,
                &mut out,
                &mut pred,
            ),
            Shape::Line { target } => cast::line::all(
                world,
                from,
                target,
                p.mask,
                &mut self.hits,
                &mut out,
                &mut pred,
            ),
            Shape::Circle { radius } => cast::circle::all(
                world,
                from,
                frame.facing,
                radius,
                p.distance,
                p.mask,
                &mut self.hits,
                &mut out,
                &mut pred,
            ),
            Shape::Box { size, angle_deg } => cast::boxcast::all(
                world,
                from,
                frame.facing,
                size,
                angle_deg,
                p.distance,
                p.mask,
                &mut self.hits,
                &mut out,
                &mut pred,
            ),
            Shape::Overlap { radius } => cast::overlap::all(
                world,
                from,
                radius,
                p.mask,
                &mut self.bodies,
                &mut out,
                &mut pred,
            ),
            Shape::Burst {
                ray_count,
                spread_deg,
                offset_deg,
                distance_offset,
            } => cast::burst::all(
                world,
                from,
                frame.facing,
                p.distance,
                p.mask,
                ray_count,
                spread_deg,
                offset_deg,
                distance_offset,
                &mut self.hits,
                &mut out,
                &mut pred,
            ),
            Shape::Ladder {
                step_count,
                step_size,
                step_angle_deg,
            } => cast::ladder::all(
                world,
                from,
                frame.facing,
                p.distance,
                p.mask,
                step_count,
                step_size,
                step_angle_deg,
                &mut self.hits,
                &mut out,
                &mut pred,
            ),
        }
        out
    }
}

/// Casts against a collision backend to find obstruction points, with no
/// target resolution — wall and line-of-sight probing. Supports the Simple
/// strategy only.
pub struct ObstructionSensor {
    params: SensorParameters,
}

impl ObstructionSensor {
    pub fn new(params: SensorParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SensorParameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SensorParameters {
        &mut self.params
    }

    pub fn set_params(&mut self, params: SensorParameters) {
        self.params = params;
    }

    /// First ray/sub-cast that hits anything, or `None`.
    pub fn seek_first<W>(&self, world: &W, frame: Frame) -> Option<RayHit>
    where
        W: CollisionBackend,
    {
        let p = self.params;
        let from = p.cast_position(frame);
        tracing::trace!(shape = %p.shape.mode(), "obstruction seek_first");

        match p.shape {
            Shape::Ray => world.raycast(from, frame.facing, p.distance, p.mask),
            Shape::Line { target } => world.linecast(from, target, p.mask),
            Shape::Circle { radius } => {
                world.circle_cast(from, frame.facing, radius, p.distance, p.mask)
            }
            Shape::Box { size, angle_deg } => {
                world.box_cast(from, frame.facing, size, angle_deg, p.distance, p.mask)
            }
            Shape::Overlap { radius } => cast::overlap::probe(world, from, radius, p.mask),
            Shape::Burst {
                ray_count,
                spread_deg,
                offset_deg,
                distance_offset,
            } => cast::burst::burst_directions(frame.facing, ray_count, spread_deg, offset_deg)
                .into_iter()
                .find_map(|dir| {
                    world.raycast(from + dir * distance_offset, dir, p.distance, p.mask)
                }),
            Shape::Ladder {
                step_count,
                step_size,
                step_angle_deg,
            } => {
                let step = Vec2::from_heading_deg(step_angle_deg) * step_size;
                let mut pos = from;
                for _ in 0..step_count {
                    if let Some(hit) = world.raycast(pos, frame.facing, p.distance, p.mask) {
                        return Some(hit);
                    }
                    pos += step;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LayerMask;
    use crate::testing::ScriptedWorld;

    fn frame() -> Frame {
        Frame::new(Vec2::ZERO, Vec2::new(1.0, 0.0))
    }

    fn ray_params() -> SensorParameters {
        SensorParameters::default()
    }

    #[test]
    fn simple_miss_on_zero_hits() {
        let world = ScriptedWorld::new();
        let sensor: Sensor<u32> = Sensor::new(ray_params());

        assert!(sensor.seek_first(&world, frame()).is_none());
    }

    #[test]
    fn simple_resolves_through_ancestor_chain() {
        // Body 3 is a hitbox; its grandparent 1 carries the capability.
        let world = ScriptedWorld::new()
            .with_ray_script(vec![vec![ScriptedWorld::hit(3, 1.5)]])
            .with_parent(3, 2)
            .with_parent(2, 1)
            .with_capability(1, 10);
        let sensor: Sensor<u32> = Sensor::new(ray_params());

        let found = sensor.seek_first(&world, frame()).unwrap();
        assert_eq!(found.target, 10);
        assert_eq!(found.hit.body.0, 3);
    }

    #[test]
    fn simple_with_predicate_does_not_scan_past_first_raw_hit() {
        // Two raw hits; the predicate rejects the first target.
        let world = ScriptedWorld::new()
            .with_ray_script(vec![vec![
                ScriptedWorld::hit(1, 1.0),
                ScriptedWorld::hit(2, 2.0),
            ]])
            .with_capability(1, 10)
            .with_capability(2, 20);
        let sensor: Sensor<u32> = Sensor::new(ray_params());

        // Simple raycast only sees the nearest raw hit.
        assert!(
            sensor
                .seek_first_where(&world, frame(), |t| *t != 10)
                .is_none()
        );
    }

    #[test]
    fn all_first_scans_past_rejected_targets() {
        let world = ScriptedWorld::new()
            .with_ray_script(vec![vec![
                ScriptedWorld::hit(1, 1.0),
                ScriptedWorld::hit(2, 2.0),
            ]])
            .with_capability(1, 10)
            .with_capability(2, 20);
        let mut sensor: Sensor<u32> = Sensor::new(ray_params());

        let found = sensor
            .seek_all_first_where(&world, frame(), |t| *t != 10)
            .unwrap();
        assert_eq!(found.target, 20);
    }

    #[test]
    fn all_preserves_first_seen_order_without_duplicates() {
        // Bodies 1 and 3 resolve to the same target through a parent link.
        let world = ScriptedWorld::new()
            .with_ray_script(vec![vec![
                ScriptedWorld::hit(1, 1.0),
                ScriptedWorld::hit(2, 2.0),
                ScriptedWorld::hit(3, 3.0),
            ]])
            .with_capability(1, 10)
            .with_capability(2, 20)
            .with_parent(3, 1);
        let mut sensor: Sensor<u32> = Sensor::new(ray_params());

        assert_eq!(sensor.seek_all(&world, frame()), vec![10, 20]);
    }

    #[test]
    fn unresolvable_hits_are_skipped_not_failures() {
        let world = ScriptedWorld::new()
            .with_ray_script(vec![vec![
                ScriptedWorld::hit(9, 0.5),
                ScriptedWorld::hit(2, 2.0),
            ]])
            .with_capability(2, 20);
        let mut sensor: Sensor<u32> = Sensor::new(ray_params());

        let found = sensor.seek_all_first(&world, frame()).unwrap();
        assert_eq!(found.target, 20);
    }

    #[test]
    fn scratch_capacity_truncates_raw_hits() {
        let world = ScriptedWorld::new()
            .with_ray_script(vec![vec![
                ScriptedWorld::hit(1, 1.0),
                ScriptedWorld::hit(2, 2.0),
                ScriptedWorld::hit(3, 3.0),
            ]])
            .with_capability(1, 10)
            .with_capability(2, 20)
            .with_capability(3, 30);
        let mut sensor: Sensor<u32> = Sensor::with_capacity(ray_params(), 2);

        // The third raw hit falls beyond the scratch buffer and is dropped.
        assert_eq!(sensor.seek_all(&world, frame()), vec![10, 20]);
    }

    #[test]
    fn overlap_without_body_never_casts() {
        let world = ScriptedWorld::new();
        let sensor: Sensor<u32> = Sensor::new(SensorParameters {
            shape: Shape::Overlap { radius: 0.5 },
            ..Default::default()
        });

        assert!(sensor.seek_first(&world, frame()).is_none());
        assert!(world.rays.borrow().is_empty());
    }

    #[test]
    fn overlap_resolves_via_corrective_raycast() {
        let world = ScriptedWorld::new()
            .with_overlap(4, Vec2::new(2.0, 0.0))
            .with_ray_script(vec![vec![ScriptedWorld::hit(4, 2.0)]])
            .with_capability(4, 40);
        let sensor: Sensor<u32> = Sensor::new(SensorParameters {
            shape: Shape::Overlap { radius: 3.0 },
            ..Default::default()
        });

        let found = sensor.seek_first(&world, frame()).unwrap();
        assert_eq!(found.target, 40);

        // Corrective ray: toward the closest point, padded by the epsilon.
        let rays = world.rays.borrow();
        assert_eq!(rays.len(), 1);
        let (origin, dir) = rays[0];
        assert_eq!(origin, Vec2::ZERO);
        assert!((dir.x - 1.0).abs() < 1e-6 && dir.y.abs() < 1e-6);
    }

    #[test]
    fn cast_offset_is_applied_in_the_facing_frame() {
        let world = ScriptedWorld::new();
        let sensor: Sensor<u32> = Sensor::new(SensorParameters {
            cast_offset: Vec2::new(1.0, 0.0),
            ..Default::default()
        });

        // Facing +y with a local +x offset casts from one unit up.
        let _ = sensor.seek_first(&world, Frame::new(Vec2::ZERO, Vec2::new(0.0, 1.0)));

        let rays = world.rays.borrow();
        assert_eq!(rays[0].0, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn obstruction_sensor_returns_raw_hit() {
        let world = ScriptedWorld::new().with_ray_script(vec![vec![ScriptedWorld::hit(5, 0.7)]]);
        let sensor = ObstructionSensor::new(ray_params());

        let hit = sensor.seek_first(&world, frame()).unwrap();
        assert_eq!(hit.body.0, 5);
        assert_eq!(hit.distance, 0.7);
    }

    #[test]
    fn obstruction_burst_short_circuits_on_first_hit() {
        let world = ScriptedWorld::new().with_ray_script(vec![
            vec![],
            vec![ScriptedWorld::hit(6, 1.2)],
            vec![ScriptedWorld::hit(7, 0.4)],
        ]);
        let sensor = ObstructionSensor::new(SensorParameters {
            shape: Shape::Burst {
                ray_count: 5,
                spread_deg: 90.0,
                offset_deg: 0.0,
                distance_offset: 0.0,
            },
            ..Default::default()
        });

        let hit = sensor.seek_first(&world, frame()).unwrap();
        assert_eq!(hit.body.0, 6);
        // Remaining rays in the fan never fired.
        assert_eq!(world.rays.borrow().len(), 2);
    }

    #[test]
    fn mask_is_forwarded_with_layer_helper() {
        let mask = LayerMask::layer(3);
        assert_eq!(mask.bits(), 0b1000);
    }
}
