//! Procedural colored meshes for the vehicle parts.
//!
//! Both primitives are unit-sized; the vehicle's per-part scale matrices
//! size them at draw time. The pipeline is unlit, so per-face shade factors
//! stand in for lighting.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::TAU;

/// Vertex format shared by every mesh in the scene.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// CPU-side mesh ready for buffer upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Axis-aligned cube spanning [-1, 1] on every axis.
///
/// Four vertices per face so each face can carry its own shade of the base
/// color. 24 vertices, 36 indices.
pub fn cube(color: [f32; 3]) -> MeshData {
    let mut mesh = MeshData::default();

    // Corners wound CCW viewed from outside, paired with a shade factor
    let faces: [([[f32; 3]; 4], f32); 6] = [
        // +y
        (
            [
                [-1.0, 1.0, -1.0],
                [-1.0, 1.0, 1.0],
                [1.0, 1.0, 1.0],
                [1.0, 1.0, -1.0],
            ],
            1.0,
        ),
        // -y
        (
            [
                [-1.0, -1.0, -1.0],
                [1.0, -1.0, -1.0],
                [1.0, -1.0, 1.0],
                [-1.0, -1.0, 1.0],
            ],
            0.5,
        ),
        // +z
        (
            [
                [-1.0, -1.0, 1.0],
                [1.0, -1.0, 1.0],
                [1.0, 1.0, 1.0],
                [-1.0, 1.0, 1.0],
            ],
            0.85,
        ),
        // -z
        (
            [
                [1.0, -1.0, -1.0],
                [-1.0, -1.0, -1.0],
                [-1.0, 1.0, -1.0],
                [1.0, 1.0, -1.0],
            ],
            0.7,
        ),
        // +x
        (
            [
                [1.0, -1.0, 1.0],
                [1.0, -1.0, -1.0],
                [1.0, 1.0, -1.0],
                [1.0, 1.0, 1.0],
            ],
            0.75,
        ),
        // -x
        (
            [
                [-1.0, -1.0, -1.0],
                [-1.0, -1.0, 1.0],
                [-1.0, 1.0, 1.0],
                [-1.0, 1.0, -1.0],
            ],
            0.75,
        ),
    ];

    for (corners, shade) in faces {
        add_quad(&mut mesh, &corners, shade_color(color, shade));
    }

    mesh
}

/// Cylinder along the x axis: radius 1 in y/z, spanning x in [-1, 1].
///
/// Side quads use the base color; both end caps are darkened. `segments`
/// is clamped to at least 3.
pub fn cylinder(color: [f32; 3], segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();
    let cap_color = shade_color(color, 0.8);

    // Barrel: one quad per segment between the two end rings
    for i in 0..segments {
        let theta0 = i as f32 / segments as f32 * TAU;
        let theta1 = (i + 1) as f32 / segments as f32 * TAU;
        let (y0, z0) = (theta0.cos(), theta0.sin());
        let (y1, z1) = (theta1.cos(), theta1.sin());
        add_quad(
            &mut mesh,
            &[
                [-1.0, y0, z0],
                [-1.0, y1, z1],
                [1.0, y1, z1],
                [1.0, y0, z0],
            ],
            color,
        );
    }

    // End caps: triangle fan around each end center. The -x cap winds the
    // other way so both face outward.
    for (x, flip) in [(1.0, false), (-1.0, true)] {
        let base = mesh.vertices.len() as u32;
        mesh.vertices.push(Vertex {
            position: [x, 0.0, 0.0],
            color: cap_color,
        });
        for i in 0..segments {
            let theta = i as f32 / segments as f32 * TAU;
            mesh.vertices.push(Vertex {
                position: [x, theta.cos(), theta.sin()],
                color: cap_color,
            });
        }
        for i in 0..segments {
            let current = base + 1 + i;
            let next = base + 1 + (i + 1) % segments;
            if flip {
                mesh.indices.extend_from_slice(&[base, next, current]);
            } else {
                mesh.indices.extend_from_slice(&[base, current, next]);
            }
        }
    }

    mesh
}

fn shade_color(color: [f32; 3], shade: f32) -> [f32; 3] {
    [color[0] * shade, color[1] * shade, color[2] * shade]
}

fn add_quad(mesh: &mut MeshData, corners: &[[f32; 3]; 4], color: [f32; 3]) {
    let base = mesh.vertices.len() as u32;
    for corner in corners {
        mesh.vertices.push(Vertex {
            position: *corner,
            color,
        });
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let mesh = cube([1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_cube_spans_unit_box() {
        let mesh = cube([0.5, 0.5, 0.5]);
        for vertex in &mesh.vertices {
            for c in vertex.position {
                assert!(c == 1.0 || c == -1.0);
            }
        }
    }

    #[test]
    fn test_cube_shades_stay_within_base_color() {
        let base = [0.8, 0.4, 0.2];
        let mesh = cube(base);
        for vertex in &mesh.vertices {
            for c in 0..3 {
                assert!(vertex.color[c] <= base[c] + 1e-6);
                assert!(vertex.color[c] >= 0.0);
            }
        }
    }

    #[test]
    fn test_cylinder_counts() {
        let segments = 24;
        let mesh = cylinder([0.3, 0.3, 0.3], segments);
        // 4 verts per side quad, plus two fans of (center + ring)
        assert_eq!(mesh.vertices.len() as u32, 4 * segments + 2 * (segments + 1));
        // 6 indices per side quad, 3 per cap triangle
        assert_eq!(mesh.indices.len() as u32, 6 * segments + 2 * 3 * segments);
    }

    #[test]
    fn test_cylinder_ring_radius() {
        let mesh = cylinder([0.3, 0.3, 0.3], 16);
        // Side quad vertices all sit on the unit circle in the y/z plane
        for vertex in &mesh.vertices[..(4 * 16)] {
            let [_, y, z] = vertex.position;
            assert!((y * y + z * z - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cylinder_clamps_segment_count() {
        let mesh = cylinder([0.3, 0.3, 0.3], 0);
        assert_eq!(mesh.vertices.len() as u32, 4 * 3 + 2 * 4);
    }
}
