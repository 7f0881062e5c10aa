//! Shape-cast perception queries with typed target resolution.
//!
//! A [`Sensor`] searches a spatial/collision index for entities convertible
//! to a target capability type `T`, under three selection strategies, with
//! optional predicate filtering:
//!
//! - **Simple** ([`Sensor::seek_first`]): one underlying physics query,
//!   first raw hit only — the cheapest mode.
//! - **AllAndReturnFirst** ([`Sensor::seek_all_first`]): scans all raw hits
//!   in cast order with identity dedup and returns the first match, exiting
//!   early without building a result list.
//! - **All** ([`Sensor::seek_all`]): accumulates every unique matching
//!   target in first-seen order.
//!
//! Seven cast shapes are supported ([`Shape`]): ray, line, swept circle,
//! swept box, overlap circle, burst of fanned rays, and a ladder of
//! origin-stepped rays.
//!
//! The engine is backend-agnostic: concrete collision worlds implement
//! [`CollisionBackend`] (non-allocating query primitives plus the structural
//! parent chain) and [`CapabilityIndex`] (per-body capability lookup). A raw
//! hit resolves to `T` by walking the hit body's ancestor chain, so a
//! hitbox body resolves to the actor that owns it.
//!
//! Queries are synchronous and single-threaded; scratch buffers are reused
//! across calls on a given sensor and overflow is silent truncation by the
//! backend primitive, never an error. Absence of a match is the normal
//! negative outcome, also never an error.

pub mod backend;
pub mod cast;
pub mod math;
pub mod params;
pub mod query;

#[cfg(test)]
pub(crate) mod testing;

// Re-export core types for ergonomic API
pub use backend::{BodyId, CapabilityIndex, CollisionBackend, LayerMask, RayHit};
pub use cast::burst::burst_directions;
pub use math::Vec2;
pub use params::{Frame, SeekMode, SensorParameters, Shape};
pub use query::{ObstructionSensor, Sensor, SensorHit};
