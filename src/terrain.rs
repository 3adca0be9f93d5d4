//! Terrain heightfield: wave-sum elevation and the colored grid mesh.
//!
//! The same formula produces both the baked mesh heights and the runtime
//! ground queries under the wheels, so the visual surface and the contact
//! math can never drift apart.

use glam::Vec2;

use crate::geometry::{MeshData, Vertex};
use crate::params::{TerrainParams, WaveParams};

/// Sum of the traveling-wave terms at (x, z).
///
/// Defined for every horizontal position, on or off the grid, so wheel
/// queries outside the mesh are still valid. Pure and allocation-free.
pub fn wave_height(waves: &[WaveParams], x: f32, z: f32) -> f32 {
    let position = Vec2::new(x, z);
    waves
        .iter()
        .map(|wave| wave.amplitude_m * (wave.omega * wave.direction.dot(position)).sin())
        .sum()
}

/// Immutable terrain built once at startup.
pub struct Terrain {
    /// Colored grid mesh, ready for upload.
    pub mesh: MeshData,
    waves: Vec<WaveParams>,
}

impl Terrain {
    /// Build the grid, bake elevations, then color each vertex by its
    /// normalized height between the base color and a lightened crest
    /// color.
    pub fn new(params: &TerrainParams) -> Self {
        Self {
            mesh: build_grid_mesh(params),
            waves: params.waves.clone(),
        }
    }

    /// Ground height at any horizontal position, ignoring y.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        wave_height(&self.waves, x, z)
    }
}

fn build_grid_mesh(params: &TerrainParams) -> MeshData {
    let n = params.grid_size;
    let spacing = params.grid_spacing_m;
    let half_extent = params.half_extent_m();

    let mut vertices = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
    let mut min_height = f32::MAX;
    let mut max_height = f32::MIN;

    for z in 0..=n {
        for x in 0..=n {
            let x_pos = x as f32 * spacing - half_extent;
            let z_pos = z as f32 * spacing - half_extent;
            let height = wave_height(&params.waves, x_pos, z_pos);
            min_height = min_height.min(height);
            max_height = max_height.max(height);
            vertices.push(Vertex {
                position: [x_pos, height, z_pos],
                color: [0.0; 3],
            });
        }
    }

    // Second pass: color by elevation normalized over the whole grid
    let low = params.base_color;
    let high = [
        (low[0] + 0.3).min(1.0),
        (low[1] + 0.3).min(1.0),
        (low[2] + 0.3).min(1.0),
    ];
    let height_range = max_height - min_height;
    for vertex in &mut vertices {
        // A flat grid (empty wave set) has zero range; pin it to the low
        // color instead of dividing by zero
        let t = if height_range > f32::EPSILON {
            ((vertex.position[1] - min_height) / height_range).clamp(0.0, 1.0)
        } else {
            0.0
        };
        for c in 0..3 {
            vertex.color[c] = low[c] * (1.0 - t) + high[c] * t;
        }
    }

    // Two CCW triangles per quad, viewed from above
    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    for z in 0..n {
        for x in 0..n {
            let top_left = z * (n + 1) + x;
            let top_right = top_left + 1;
            let bottom_left = top_left + (n + 1);
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }

    MeshData { vertices, indices }
}
