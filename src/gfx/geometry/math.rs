//! # Geometry Math Helpers
//!
//! Small stateless helpers shared by every generator: spherical sampling,
//! flat face normals and triangle assembly.

use cgmath::{InnerSpace, Vector3, Zero};

use super::Color;
use crate::gfx::scene::vertex::Vertex3D;

/// Converts spherical coordinates to Cartesian (Y-up)
///
/// `phi` is the polar angle measured from +Y in `[0, π]`, `theta` the azimuth
/// in `[0, 2π)` measured from +X towards +Z.
pub fn spherical_to_cartesian(r: f32, phi: f32, theta: f32) -> Vector3<f32> {
    let sin_phi = phi.sin();
    Vector3::new(
        r * sin_phi * theta.cos(),
        r * phi.cos(),
        r * sin_phi * theta.sin(),
    )
}

/// Normalizes `v`, or returns the zero vector when `v` has no length
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let length = v.magnitude();
    if length > 0.0 {
        v / length
    } else {
        Vector3::zero()
    }
}

/// Flat normal of the triangle `v0, v1, v2` (counter-clockwise front face)
///
/// Colinear or coincident corners yield the zero vector.
pub fn face_normal(v0: Vector3<f32>, v1: Vector3<f32>, v2: Vector3<f32>) -> Vector3<f32> {
    normalize_or_zero((v1 - v0).cross(v2 - v0))
}

/// Emits one flat-shaded triangle with a uniform color
pub fn build_triangle(
    v0: Vector3<f32>,
    v1: Vector3<f32>,
    v2: Vector3<f32>,
    color: Color,
) -> [Vertex3D; 3] {
    let normal = face_normal(v0, v1, v2).into();
    [
        Vertex3D::new(v0.into(), normal, color),
        Vertex3D::new(v1.into(), normal, color),
        Vertex3D::new(v2.into(), normal, color),
    ]
}
