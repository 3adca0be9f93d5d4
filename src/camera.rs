//! Orbit camera: spherical state around a target, driven by pointer drag
//! and scroll deltas.

use glam::{Mat4, Vec2, Vec3};

use crate::params::CameraParams;

/// Elevation clamp (radians), just shy of straight up/down so the view
/// vector never becomes parallel with the up vector.
const MAX_ELEVATION_RAD: f32 = 1.55;

/// Orbit camera state.
///
/// The eye position is derived from distance plus two angles around the
/// target: azimuth around the y axis, elevation above the horizontal
/// plane.
pub struct OrbitCamera {
    distance: f32,
    azimuth: f32,
    elevation: f32,
    target: Vec3,
    width: u32,
    height: u32,
    params: CameraParams,
}

impl OrbitCamera {
    /// Create the camera at the configured start pose, converting the
    /// start position into spherical coordinates around the target.
    pub fn new(params: &CameraParams, width: u32, height: u32) -> Self {
        let offset = params.start_position_m - params.target_m;
        let distance = offset.length();
        Self {
            distance,
            azimuth: offset.x.atan2(offset.z),
            elevation: (offset.y / distance).asin(),
            target: params.target_m,
            width,
            height,
            params: params.clone(),
        }
    }

    /// Apply one orbit input event.
    ///
    /// # Arguments
    /// * `pointer_delta` - Drag movement in pixels; rotates azimuth/elevation
    /// * `scroll_delta` - Wheel notches; positive zooms in
    pub fn update_orbit(&mut self, pointer_delta: Vec2, scroll_delta: f32) {
        self.azimuth += pointer_delta.x * self.params.orbit_sensitivity;
        self.elevation = (self.elevation + pointer_delta.y * self.params.orbit_sensitivity)
            .clamp(-MAX_ELEVATION_RAD, MAX_ELEVATION_RAD);

        // Zoom scales with the current distance so a notch feels the same
        // up close and far out
        let zoom = scroll_delta * self.params.zoom_speed_multiplier * self.distance;
        self.distance =
            (self.distance - zoom).clamp(self.params.min_distance_m, self.params.max_distance_m);
    }

    /// Keep the aspect ratio in sync with the window. Zero-sized updates
    /// (minimized window) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    /// World-space eye position from the spherical state.
    pub fn position(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.elevation.cos() * self.azimuth.sin(),
                self.distance * self.elevation.sin(),
                self.distance * self.elevation.cos() * self.azimuth.cos(),
            )
    }

    pub fn view_matrix(&self) -> Mat4 {
        // Y stays up; the orbit never rolls
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let aspect = self.width as f32 / self.height as f32;
        Mat4::perspective_rh(
            self.params.fov_deg.to_radians(),
            aspect,
            self.params.near_plane_m,
            self.params.far_plane_m,
        )
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
