//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec3` inputs, making them straightforward to unit-test.

use std::f32::consts::FRAC_PI_3;

use bevy::prelude::{Vec2, Vec3};

/// Computes the face normal of a triangle defined by three vertices.
///
/// Uses the cross product of edges `(v1 - v0)` and `(v2 - v0)`.
/// Returns `Vec3::ZERO` if the triangle is degenerate (collinear points).
pub fn compute_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    edge1.cross(edge2).normalize_or_zero()
}

/// Linearly interpolates the `y` of segment `a → b` at `x`.
///
/// Evaluates `a.y + t * (b.y - a.y)` with `t = (x - a.x) / (b.x - a.x)`.
/// A vertical segment (`a.x == b.x`) acts as a step and returns `a.y`.
pub fn lerp_segment(a: Vec2, b: Vec2, x: f32) -> f32 {
    let span = b.x - a.x;
    if span == 0.0 {
        return a.y;
    }
    let t = (x - a.x) / span;
    a.y + t * (b.y - a.y)
}

/// Corner offsets of a flat-topped hexagon in the XZ plane.
///
/// Corner `i` sits at angle `60° · i` from +X toward +Z, at distance `size`.
pub fn hex_corner_offsets(size: f32) -> [Vec3; 6] {
    std::array::from_fn(|i| {
        let angle = FRAC_PI_3 * i as f32;
        Vec3::new(size * angle.cos(), 0.0, size * angle.sin())
    })
}
