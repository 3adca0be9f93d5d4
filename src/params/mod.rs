//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (meters, seconds, degrees, etc.)
//! - Documented ranges and meanings
//! - Validation that rejects degenerate configurations at startup

mod camera;
mod render;
mod terrain;
mod vehicle;

// Re-export all types
pub use camera::CameraParams;
pub use render::RenderParams;
pub use terrain::{TerrainParams, WaveParams};
pub use vehicle::VehicleParams;

/// Top-level parameter set for one session.
#[derive(Debug, Clone, Default)]
pub struct SimParams {
    pub terrain: TerrainParams,
    pub vehicle: VehicleParams,
    pub camera: CameraParams,
    pub render: RenderParams,
}

impl SimParams {
    /// Rejects configurations that would push NaN or Inf into the transform
    /// chain. Runs once before the scene is built.
    pub fn validate(&self) -> Result<(), String> {
        self.terrain.validate()?;
        self.vehicle.validate()?;
        self.camera.validate()?;
        self.render.validate()?;
        Ok(())
    }
}
