//! # Primitive Shape Generation
//!
//! Lateral-surface samplers for cylinders and cones, disk caps and UV spheres.
//! Every primitive emits a non-indexed triangle list with outward-facing,
//! counter-clockwise winding as the sampling angle increases from +X towards +Z.

use cgmath::Vector3;
use log::warn;
use std::f32::consts::PI;

use super::math::{build_triangle, spherical_to_cartesian};
use super::{Color, MeshData};
use crate::gfx::scene::vertex::Vertex3D;

/// Fewest angular segments that still close a curved surface
pub const MIN_SEGMENTS: u32 = 3;

/// Which side of a disk is its front face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
}

fn clamp_segments(generator: &str, segments: u32) -> u32 {
    if segments < MIN_SEGMENTS {
        warn!("{generator}: {segments} segments is degenerate, clamping to {MIN_SEGMENTS}");
        MIN_SEGMENTS
    } else {
        segments
    }
}

/// Angle of step `i` around the Y axis
///
/// Step `segments` wraps to exactly the angle of step 0 so the last segment
/// closes the surface without a seam.
pub fn segment_angle(i: u32, segments: u32) -> f32 {
    2.0 * PI * (i % segments) as f32 / segments as f32
}

fn ring_point(radius: f32, angle: f32, y: f32) -> Vector3<f32> {
    Vector3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Generate the open side of a cylinder standing on `y = 0`
///
/// # Arguments
/// * `radius` - Tube radius
/// * `height` - Top rim height
/// * `segments` - Angular subdivisions (clamped to at least 3)
/// * `color` - Uniform vertex color
///
/// Emits two flat-shaded triangles per segment; no caps.
pub fn generate_cylinder(radius: f32, height: f32, segments: u32, color: Color) -> MeshData {
    let segs = clamp_segments("generate_cylinder", segments);
    let mut data = MeshData::with_capacity(segs as usize * 6);

    for i in 0..segs {
        let theta = segment_angle(i, segs);
        let next_theta = segment_angle(i + 1, segs);

        let bottom = ring_point(radius, theta, 0.0);
        let bottom_next = ring_point(radius, next_theta, 0.0);
        let top = ring_point(radius, theta, height);
        let top_next = ring_point(radius, next_theta, height);

        data.push_triangle(build_triangle(bottom, top, top_next, color));
        data.push_triangle(build_triangle(bottom, top_next, bottom_next, color));
    }

    data
}

/// Generate the lateral surface of a cone
///
/// The base ring sits at `y_offset` and the apex at `(0, y_offset + height, 0)`.
/// One triangle per segment.
pub fn generate_cone(
    radius: f32,
    height: f32,
    segments: u32,
    y_offset: f32,
    color: Color,
) -> MeshData {
    let segs = clamp_segments("generate_cone", segments);
    let mut data = MeshData::with_capacity(segs as usize * 3);
    let apex = Vector3::new(0.0, y_offset + height, 0.0);

    for i in 0..segs {
        let base = ring_point(radius, segment_angle(i, segs), y_offset);
        let base_next = ring_point(radius, segment_angle(i + 1, segs), y_offset);

        data.push_triangle(build_triangle(base, apex, base_next, color));
    }

    data
}

/// Generate a flat disk (triangle fan) centered on the Y axis at height `y`
pub fn generate_disk(radius: f32, y: f32, segments: u32, facing: Facing, color: Color) -> MeshData {
    let segs = clamp_segments("generate_disk", segments);
    let mut data = MeshData::with_capacity(segs as usize * 3);
    let center = Vector3::new(0.0, y, 0.0);

    for i in 0..segs {
        let rim = ring_point(radius, segment_angle(i, segs), y);
        let rim_next = ring_point(radius, segment_angle(i + 1, segs), y);

        let triangle = match facing {
            Facing::Up => build_triangle(center, rim_next, rim, color),
            Facing::Down => build_triangle(center, rim, rim_next, color),
        };
        data.push_triangle(triangle);
    }

    data
}

/// Generate a UV sphere with smooth radial normals
///
/// # Arguments
/// * `center` - Sphere center
/// * `radius` - Sphere radius
/// * `rings` - Latitude bands from pole to pole (min 2)
/// * `segments` - Longitude steps (min 3)
///
/// Emits `rings × segments × 6` vertices. Cells touching a pole contain one
/// zero-area triangle; their vertices still carry the radial normal.
pub fn generate_sphere(
    center: Vector3<f32>,
    radius: f32,
    rings: u32,
    segments: u32,
    color: Color,
) -> MeshData {
    let segs = clamp_segments("generate_sphere", segments);
    let rings = rings.max(2);
    let mut data = MeshData::with_capacity((rings * segs) as usize * 6);

    let vertex = |phi: f32, theta: f32| {
        let direction = spherical_to_cartesian(1.0, phi, theta);
        Vertex3D::new((center + direction * radius).into(), direction.into(), color)
    };

    for ring in 0..rings {
        let phi = PI * ring as f32 / rings as f32;
        let next_phi = PI * (ring + 1) as f32 / rings as f32;

        for seg in 0..segs {
            let theta = segment_angle(seg, segs);
            let next_theta = segment_angle(seg + 1, segs);

            let p00 = vertex(phi, theta);
            let p01 = vertex(phi, next_theta);
            let p10 = vertex(next_phi, theta);
            let p11 = vertex(next_phi, next_theta);

            data.push_triangle([p00, p01, p11]);
            data.push_triangle([p00, p11, p10]);
        }
    }

    data
}
