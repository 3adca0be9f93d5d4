//! Window and renderer configuration.

/// Rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderParams {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Clear color, linear RGB
    pub sky_color: [f32; 3],

    /// Truck body color, linear RGB
    pub body_color: [f32; 3],

    /// Cabin color, linear RGB
    pub cabin_color: [f32; 3],

    /// Wheel color, linear RGB
    pub wheel_color: [f32; 3],

    /// Ring resolution of the wheel cylinders
    pub wheel_segments: u32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            sky_color: [135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0], // daylight sky
            body_color: [0.72, 0.2, 0.12],                            // weathered red
            cabin_color: [0.55, 0.75, 0.85],                          // glass blue
            wheel_color: [0.18, 0.18, 0.2],
            wheel_segments: 24, // round enough at wheel size
        }
    }
}

impl RenderParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(format!(
                "window dimensions must be nonzero, got {}x{}",
                self.window_width, self.window_height
            ));
        }
        Ok(())
    }
}
