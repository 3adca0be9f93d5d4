//! Terrain heightfield configuration.

use glam::Vec2;

/// One traveling plane wave contributing to the terrain surface.
///
/// The surface height at (x, z) is the sum over all waves of
/// `amplitude_m * sin(omega * dot(direction, (x, z)))`.
#[derive(Debug, Clone, Copy)]
pub struct WaveParams {
    /// Unit direction of travel in the horizontal (x, z) plane
    pub direction: Vec2,

    /// Peak height contribution (meters)
    pub amplitude_m: f32,

    /// Angular spatial frequency (radians per meter)
    /// Higher values pack the crests closer together
    pub omega: f32,
}

/// Static terrain configuration.
///
/// The wave set is fixed for the whole session; nothing here changes after
/// the heightfield is built.
#[derive(Debug, Clone)]
pub struct TerrainParams {
    /// Grid resolution (quads per side)
    pub grid_size: u32,

    /// Distance between neighboring grid vertices (meters)
    pub grid_spacing_m: f32,

    /// Valley color, linear RGB; crests fade toward a lightened version
    pub base_color: [f32; 3],

    /// Wave set summed into the surface height
    pub waves: Vec<WaveParams>,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            grid_size: 200,      // 200 m x 200 m of driving room at 1 m spacing
            grid_spacing_m: 1.0, // one quad per meter
            base_color: [0.15, 0.35, 0.15],
            waves: vec![
                // Long primary swell with three shorter cross swells.
                // Slopes stay gentle enough for the wheels to read as
                // rolling over hills rather than clipping through them.
                WaveParams {
                    direction: Vec2::new(1.0, 0.0),
                    amplitude_m: 0.6,
                    omega: 0.35,
                },
                WaveParams {
                    direction: Vec2::new(0.6, 0.8),
                    amplitude_m: 0.4,
                    omega: 0.5,
                },
                WaveParams {
                    direction: Vec2::new(-0.8, 0.6),
                    amplitude_m: 0.25,
                    omega: 0.9,
                },
                WaveParams {
                    direction: Vec2::new(0.707_106_77, -0.707_106_77),
                    amplitude_m: 0.15,
                    omega: 1.6,
                },
            ],
        }
    }
}

impl TerrainParams {
    /// Half the side length of the grid (meters); the grid is centered on
    /// the origin.
    pub fn half_extent_m(&self) -> f32 {
        self.grid_size as f32 * self.grid_spacing_m / 2.0
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size == 0 {
            return Err("terrain grid_size must be at least 1".to_string());
        }
        if self.grid_spacing_m <= 0.0 {
            return Err(format!(
                "terrain grid_spacing_m must be positive, got {}",
                self.grid_spacing_m
            ));
        }
        for (i, wave) in self.waves.iter().enumerate() {
            if (wave.direction.length() - 1.0).abs() > 1e-3 {
                return Err(format!(
                    "wave {} direction {:?} is not a unit vector",
                    i, wave.direction
                ));
            }
            if !wave.amplitude_m.is_finite() || !wave.omega.is_finite() {
                return Err(format!("wave {} has non-finite parameters", i));
            }
        }
        Ok(())
    }
}
