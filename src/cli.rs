//! Command-line argument parsing.

use clap::Parser;

use crate::params::SimParams;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Swellrover")]
#[command(about = "Drive a truck across rolling procedural terrain", long_about = None)]
pub struct Args {
    /// Terrain grid size (cells per side)
    #[arg(long, value_name = "CELLS")]
    pub grid_size: Option<u32>,

    /// Terrain grid spacing (meters between vertices)
    #[arg(long, value_name = "METERS")]
    pub grid_spacing: Option<f32>,

    /// Vehicle speed (meters per second)
    #[arg(long, value_name = "M_PER_S")]
    pub speed: Option<f32>,
}

impl Args {
    /// Overlay any provided flags onto the default parameters.
    pub fn apply(&self, params: &mut SimParams) {
        if let Some(grid_size) = self.grid_size {
            params.terrain.grid_size = grid_size;
        }
        if let Some(grid_spacing) = self.grid_spacing {
            params.terrain.grid_spacing_m = grid_spacing;
        }
        if let Some(speed) = self.speed {
            params.vehicle.speed_m_per_s = speed;
        }
    }
}
