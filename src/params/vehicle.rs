//! Vehicle drive geometry and motion configuration.

/// Drive geometry for the seven-part pickup assembly.
///
/// The wheel radii do double duty: they scale the wheel cylinders at draw
/// time and they set the target height of each wheel center above the
/// ground, so the rendered wheels and the ground-contact math can never
/// disagree.
#[derive(Debug, Clone)]
pub struct VehicleParams {
    /// Travel speed while a throttle key is held (meters/second)
    pub speed_m_per_s: f32,

    /// Rolling radius of the steerable front wheels (meters)
    pub front_wheel_radius_m: f32,

    /// Rolling radius of the rear wheels (meters)
    /// Larger than the front pair; the bed sits on them
    pub rear_wheel_radius_m: f32,

    /// Half the width of every wheel cylinder (meters)
    pub wheel_half_width_m: f32,

    /// Distance between the front and rear axles (meters)
    pub wheel_base_m: f32,

    /// Lateral distance between the left and right wheel tracks (meters)
    pub track_width_m: f32,

    /// Fixed steering lock applied while a steer key is held (degrees)
    pub max_steering_angle_deg: f32,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            speed_m_per_s: 4.0, // brisk pace that still reads well up close
            front_wheel_radius_m: 0.35,
            rear_wheel_radius_m: 0.5,
            wheel_half_width_m: 0.1,
            wheel_base_m: 2.0,
            track_width_m: 1.0,
            max_steering_angle_deg: 25.0,
        }
    }
}

impl VehicleParams {
    pub fn max_steering_angle_rad(&self) -> f32 {
        self.max_steering_angle_deg.to_radians()
    }

    /// Rejects geometry the turning formula cannot handle: a steering angle
    /// with tan ~ 0 has no turning circle at all, and an inner radius of
    /// zero means the inner wheel track pivots in place (infinite yaw rate).
    pub fn validate(&self) -> Result<(), String> {
        if self.speed_m_per_s <= 0.0 {
            return Err(format!(
                "speed_m_per_s must be positive, got {}",
                self.speed_m_per_s
            ));
        }
        if self.front_wheel_radius_m <= 0.0 || self.rear_wheel_radius_m <= 0.0 {
            return Err(format!(
                "wheel radii must be positive, got front {} / rear {}",
                self.front_wheel_radius_m, self.rear_wheel_radius_m
            ));
        }
        if self.wheel_half_width_m <= 0.0 {
            return Err(format!(
                "wheel_half_width_m must be positive, got {}",
                self.wheel_half_width_m
            ));
        }
        if self.wheel_base_m <= 0.0 || self.track_width_m <= 0.0 {
            return Err(format!(
                "wheel_base_m and track_width_m must be positive, got {} / {}",
                self.wheel_base_m, self.track_width_m
            ));
        }
        let tan_steering = self.max_steering_angle_rad().tan();
        if !tan_steering.is_finite() || tan_steering.abs() < 1e-6 {
            return Err(format!(
                "max_steering_angle_deg {} has no usable turning circle",
                self.max_steering_angle_deg
            ));
        }
        let inner_radius_m = self.wheel_base_m / tan_steering - self.track_width_m;
        if inner_radius_m.abs() < 1e-4 {
            return Err(format!(
                "degenerate turning geometry: inner turning radius is {} m",
                inner_radius_m
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(VehicleParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_steering_angle() {
        let mut params = VehicleParams::default();
        params.max_steering_angle_deg = 0.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_inner_radius() {
        // wheel_base / tan(45 deg) == track_width puts the inner wheels at
        // the center of the turning circle
        let mut params = VehicleParams::default();
        params.max_steering_angle_deg = 45.0;
        params.wheel_base_m = 2.0;
        params.track_width_m = 2.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_radius() {
        let mut params = VehicleParams::default();
        params.front_wheel_radius_m = -0.35;
        assert!(params.validate().is_err());
    }
}
