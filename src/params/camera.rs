//! Orbit camera configuration.

use glam::Vec3;

/// Orbit camera setup and input response.
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Eye position at startup (meters)
    /// Converted to orbit angles around `target_m` when the camera is created
    pub start_position_m: Vec3,

    /// Orbit center (meters)
    pub target_m: Vec3,

    /// Vertical field of view (degrees)
    pub fov_deg: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,

    /// Orbit rotation per pixel of drag (radians)
    pub orbit_sensitivity: f32,

    /// Fraction of the current distance zoomed per scroll notch
    pub zoom_speed_multiplier: f32,

    /// Closest the eye may orbit to the target (meters)
    pub min_distance_m: f32,

    /// Farthest the eye may orbit from the target (meters)
    /// Kept inside the far plane
    pub max_distance_m: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            start_position_m: Vec3::new(12.0, 4.0, -12.0), // above and behind the spawn
            target_m: Vec3::ZERO,
            fov_deg: 45.0,
            near_plane_m: 0.01,
            far_plane_m: 500.0,
            orbit_sensitivity: 0.005,
            zoom_speed_multiplier: 0.05,
            min_distance_m: 2.0,
            max_distance_m: 400.0,
        }
    }
}

impl CameraParams {
    pub fn validate(&self) -> Result<(), String> {
        if (self.start_position_m - self.target_m).length() < 1e-3 {
            return Err("camera start position coincides with its target".to_string());
        }
        if self.fov_deg <= 0.0 || self.fov_deg >= 180.0 {
            return Err(format!("fov_deg must be in (0, 180), got {}", self.fov_deg));
        }
        if self.near_plane_m <= 0.0 || self.far_plane_m <= self.near_plane_m {
            return Err(format!(
                "clipping planes must satisfy 0 < near < far, got {} / {}",
                self.near_plane_m, self.far_plane_m
            ));
        }
        if self.min_distance_m <= 0.0 || self.max_distance_m <= self.min_distance_m {
            return Err(format!(
                "orbit distance range must satisfy 0 < min < max, got {} / {}",
                self.min_distance_m, self.max_distance_m
            ));
        }
        Ok(())
    }
}
