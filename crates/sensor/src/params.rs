//! Per-query configuration: shape geometry, shared cast parameters and the
//! sensor's placement frame.

use crate::backend::LayerMask;
use crate::math::Vec2;

/// Geometric form of a cast. Each variant carries only its own parameters;
/// `distance` and placement are shared and live in [`SensorParameters`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Single ray along the sensor's facing.
    Ray,
    /// Single segment from the cast position to an explicit world point.
    Line { target: Vec2 },
    /// Circle swept along the facing.
    Circle { radius: f32 },
    /// Oriented box swept along the facing; `angle_deg` rotates the box.
    Box { size: Vec2, angle_deg: f32 },
    /// Static overlap circle; resolves hits via a corrective raycast toward
    /// the nearest overlapping body's closest point.
    Overlap { radius: f32 },
    /// `ray_count` rays fanned across `spread_deg` centered on the facing,
    /// each origin displaced outward by `distance_offset` along its own
    /// direction. `offset_deg` rotates the whole fan.
    Burst {
        ray_count: u32,
        spread_deg: f32,
        offset_deg: f32,
        distance_offset: f32,
    },
    /// One ray repeated `step_count` times, each iteration's origin
    /// displaced by the heading `step_angle_deg` times `step_size`.
    Ladder {
        step_count: u32,
        step_size: f32,
        step_angle_deg: f32,
    },
}

impl Shape {
    pub fn mode(&self) -> SeekMode {
        match self {
            Shape::Ray => SeekMode::Ray,
            Shape::Line { .. } => SeekMode::Line,
            Shape::Circle { .. } => SeekMode::Circle,
            Shape::Box { .. } => SeekMode::Box,
            Shape::Overlap { .. } => SeekMode::Overlap,
            Shape::Burst { .. } => SeekMode::Burst,
            Shape::Ladder { .. } => SeekMode::Ladder,
        }
    }
}

/// Plain discriminant over the cast shapes, for display and configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SeekMode {
    Ray,
    Line,
    Circle,
    Box,
    Overlap,
    Burst,
    Ladder,
}

/// Immutable-per-query sensor configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorParameters {
    pub shape: Shape,
    /// Max cast distance shared by all swept shapes and sub-casts.
    pub distance: f32,
    /// Offset from the frame origin to the cast position, expressed in the
    /// sensor's local frame (x along facing, y along its perpendicular).
    pub cast_offset: Vec2,
    /// Collision layers the backend should consider.
    pub mask: LayerMask,
}

impl Default for SensorParameters {
    fn default() -> Self {
        Self {
            shape: Shape::Ray,
            distance: 3.0,
            cast_offset: Vec2::ZERO,
            mask: LayerMask::ALL,
        }
    }
}

impl SensorParameters {
    /// World-space cast position: the frame origin plus the local offset
    /// rotated into the frame.
    pub fn cast_position(&self, frame: Frame) -> Vec2 {
        frame.origin + frame.rotate(self.cast_offset)
    }
}

/// Placement of a sensor for one query: world origin and facing direction
/// (unit vector; the local +x axis).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub origin: Vec2,
    pub facing: Vec2,
}

impl Frame {
    pub const fn new(origin: Vec2, facing: Vec2) -> Self {
        Self { origin, facing }
    }

    /// Rotates a local-frame vector into world space.
    pub fn rotate(&self, local: Vec2) -> Vec2 {
        self.facing * local.x + self.facing.perp() * local.y
    }
}
