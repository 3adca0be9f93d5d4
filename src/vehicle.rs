//! Vehicle transform model: a rigid seven-part truck assembly driven by
//! throttle and steering over the terrain heightfield.
//!
//! Every part carries three matrices with distinct roles. `scale` is fixed
//! at spawn and sizes the unit mesh. `local` layers spin and steering on
//! top of the part's base orientation. `translation` starts as a pure
//! translation and accumulates the assembly's pivot rotations, so its
//! fourth column always holds the part's world position. The renderer
//! reads `translation * local * scale`.

use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::input::DriveInput;
use crate::params::VehicleParams;
use crate::terrain::Terrain;
use crate::transform;

/// Spawn forward axis. Drive displacement is
/// `forward_direction() * distance * throttle`, and forward throttle is
/// negative, so the truck leads with its nose at +z.
const FORWARD_AXIS: Vec3 = Vec3::new(0.0, 0.0, -1.0);

pub const PART_COUNT: usize = 7;

/// Identifies one rigid part of the assembly.
///
/// Left is +x when standing behind the truck and looking over its nose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartId {
    Body,
    Cabin,
    FrontLeftWheel,
    FrontRightWheel,
    RearLeftWheel,
    RearRightWheel,
    SpareWheel,
}

impl PartId {
    pub const ALL: [PartId; PART_COUNT] = [
        PartId::Body,
        PartId::Cabin,
        PartId::FrontLeftWheel,
        PartId::FrontRightWheel,
        PartId::RearLeftWheel,
        PartId::RearRightWheel,
        PartId::SpareWheel,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One rigid part of the assembly.
#[derive(Debug, Clone)]
pub struct Part {
    pub scale: Mat4,
    pub translation: Mat4,
    pub local: Mat4,
}

impl Part {
    fn new(scale: Vec3, offset: Vec3) -> Self {
        Self {
            scale: Mat4::from_scale(scale),
            translation: Mat4::from_translation(offset),
            local: Mat4::IDENTITY,
        }
    }

    /// Model matrix handed to the renderer. Scale is local-most,
    /// translation world-most.
    pub fn model_matrix(&self) -> Mat4 {
        self.translation * self.local * self.scale
    }
}

/// The full truck assembly plus its accumulated drive state.
pub struct Vehicle {
    parts: [Part; PART_COUNT],
    /// Accumulated yaw of the whole assembly; basis for the forward
    /// direction and for every future pivot rotation.
    orientation: Mat4,
    /// Running front-wheel roll angle (radians). Never reset; steering is
    /// layered on top of it each tick.
    front_spin: f32,
    params: VehicleParams,
}

impl Vehicle {
    /// Build the assembly at the spawn pose.
    ///
    /// Validates the drive geometry first so no degenerate value (zero
    /// turning circle, zero wheel radius) can ever reach the transform
    /// chain.
    pub fn new(params: &VehicleParams) -> Result<Self, String> {
        params.validate()?;
        Ok(Self {
            parts: spawn_parts(params),
            orientation: Mat4::IDENTITY,
            front_spin: 0.0,
            params: params.clone(),
        })
    }

    pub fn parts(&self) -> &[Part; PART_COUNT] {
        &self.parts
    }

    /// Per-part model matrices in `PartId::ALL` order.
    pub fn model_matrices(&self) -> [Mat4; PART_COUNT] {
        std::array::from_fn(|i| self.parts[i].model_matrix())
    }

    /// World-space heading: the spawn forward axis taken through the
    /// accumulated orientation as a direction (w = 0).
    pub fn forward_direction(&self) -> Vec3 {
        transform::transform_direction(&self.orientation, FORWARD_AXIS)
    }

    /// Left-apply `delta` to every part's translation. Forward motion and
    /// the ground correction both go through here.
    pub fn translate_assembly(&mut self, delta: Mat4) {
        for part in &mut self.parts {
            part.translation = delta * part.translation;
        }
    }

    /// Snap the assembly toward the terrain. Each road wheel wants its
    /// center at ground height plus its rolling radius; the four deltas
    /// are averaged and applied as one vertical correction to every part,
    /// so the chassis rides the surface without tilting.
    pub fn ground_follow(&mut self, terrain: &Terrain) {
        let wheels = [
            (PartId::FrontLeftWheel, self.params.front_wheel_radius_m),
            (PartId::FrontRightWheel, self.params.front_wheel_radius_m),
            (PartId::RearLeftWheel, self.params.rear_wheel_radius_m),
            (PartId::RearRightWheel, self.params.rear_wheel_radius_m),
        ];

        let mut total_delta = 0.0;
        for (id, radius) in wheels {
            let center = transform::translation_of(&self.parts[id.index()].translation);
            total_delta += (terrain.height_at(center.x, center.z) + radius) - center.y;
        }

        let correction = total_delta * 0.25;
        self.translate_assembly(Mat4::from_translation(Vec3::new(0.0, correction, 0.0)));
    }

    /// Rotate every part about the body's current world position, and fold
    /// the rotation into the assembly orientation.
    pub fn rotate_about_pivot(&mut self, rotation: Mat4) {
        let pivot = transform::translation_of(&self.parts[PartId::Body.index()].translation);
        let full_rotation = transform::rotate_around(pivot, rotation);
        for part in &mut self.parts {
            part.translation = full_rotation * part.translation;
        }
        self.orientation = rotation * self.orientation;
    }

    /// Roll the wheels for `distance` meters of travel.
    ///
    /// Rear wheels spin incrementally onto their existing local transform.
    /// Front wheels are rebuilt from scratch each tick: accumulated roll
    /// from `front_spin` plus the instantaneous steering offset. Steering
    /// therefore snaps rather than easing, and releasing the steer key
    /// straightens the wheels on the next moving tick without disturbing
    /// their roll.
    pub fn spin_wheels(&mut self, distance: f32, throttle: f32, steer: f32) {
        let rear_roll =
            Mat4::from_rotation_x(distance / self.params.rear_wheel_radius_m * -throttle);
        for id in [PartId::RearLeftWheel, PartId::RearRightWheel] {
            let part = &mut self.parts[id.index()];
            part.local = part.local * rear_roll;
        }

        self.front_spin += distance / self.params.front_wheel_radius_m * -throttle;
        let steer_offset = self.params.max_steering_angle_rad() * steer;
        let front_local =
            Mat4::from_rotation_y(-steer_offset) * Mat4::from_rotation_x(self.front_spin);
        for id in [PartId::FrontLeftWheel, PartId::FrontRightWheel] {
            self.parts[id.index()].local = front_local;
        }
    }

    /// Advance one simulation tick.
    ///
    /// The stage order is load-bearing: ground-follow reads the
    /// post-translation wheel positions, and the yaw rotation pivots on
    /// the post-correction body position. With no throttle the tick is a
    /// complete no-op; steering alone cannot turn a truck that is not
    /// rolling.
    pub fn update(&mut self, dt: f32, drive: DriveInput, terrain: &Terrain) {
        if drive.throttle == 0.0 {
            return;
        }

        let distance = self.params.speed_m_per_s * dt;
        let displacement = self.forward_direction() * (distance * drive.throttle);
        self.translate_assembly(Mat4::from_translation(displacement));
        self.ground_follow(terrain);
        self.spin_wheels(distance, drive.throttle, drive.steer);

        if drive.steer != 0.0 {
            let deg_per_meter = turn_angle_per_meter(
                self.params.wheel_base_m,
                self.params.max_steering_angle_rad(),
                self.params.track_width_m,
            );
            let turn = drive.steer * (deg_per_meter * distance).to_radians() * drive.throttle;
            self.rotate_about_pivot(Mat4::from_rotation_y(turn));
        }
    }
}

/// Yaw rate for a fixed steering angle, in degrees per meter traveled.
///
/// The turning radius follows from the wheelbase and steering angle; the
/// inner wheel track runs a circle tighter by the track width, and one lap
/// of that inner circle is 360 degrees. Degenerate inputs (tan of the
/// steering angle near zero, inner radius near zero) are rejected by
/// `VehicleParams::validate` before a `Vehicle` exists, so this stays a
/// plain function.
pub fn turn_angle_per_meter(wheel_base_m: f32, steering_angle_rad: f32, track_width_m: f32) -> f32 {
    let turning_radius_m = wheel_base_m / steering_angle_rad.tan();
    let inner_radius_m = turning_radius_m - track_width_m;
    360.0 / (2.0 * PI * inner_radius_m)
}

/// The spawn layout. Wheel cylinder scale comes from the configured radii,
/// so the rendered wheels and the ground-contact targets always agree.
fn spawn_parts(params: &VehicleParams) -> [Part; PART_COUNT] {
    let front = Vec3::new(
        params.wheel_half_width_m,
        params.front_wheel_radius_m,
        params.front_wheel_radius_m,
    );
    let rear = Vec3::new(
        params.wheel_half_width_m,
        params.rear_wheel_radius_m,
        params.rear_wheel_radius_m,
    );

    // The spare lies against the tailgate, rotated to face backward
    let mut spare = Part::new(front, Vec3::new(0.0, 1.3, -2.1));
    spare.local = Mat4::from_rotation_y(FRAC_PI_2);

    [
        Part::new(Vec3::new(1.0, 0.5, 2.0), Vec3::new(0.0, 1.0, 0.0)),
        Part::new(Vec3::new(1.0, 0.5, 0.5), Vec3::new(0.0, 2.0, 0.5)),
        Part::new(front, Vec3::new(1.1, 0.425, 1.3)),
        Part::new(front, Vec3::new(-1.1, 0.425, 1.3)),
        Part::new(rear, Vec3::new(1.1, 0.5, -1.1)),
        Part::new(rear, Vec3::new(-1.1, 0.5, -1.1)),
        spare,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TerrainParams;

    const DT: f32 = 0.1;
    const DRIVE_FORWARD: DriveInput = DriveInput {
        throttle: -1.0,
        steer: 0.0,
    };
    const DRIVE_FORWARD_LEFT: DriveInput = DriveInput {
        throttle: -1.0,
        steer: -1.0,
    };

    fn flat_terrain() -> Terrain {
        let mut params = TerrainParams::default();
        params.grid_size = 4;
        params.waves.clear();
        Terrain::new(&params)
    }

    fn wavy_terrain() -> Terrain {
        let mut params = TerrainParams::default();
        params.grid_size = 4;
        Terrain::new(&params)
    }

    fn spawn() -> Vehicle {
        Vehicle::new(&VehicleParams::default()).unwrap()
    }

    fn positions(vehicle: &Vehicle) -> [Vec3; PART_COUNT] {
        std::array::from_fn(|i| transform::translation_of(&vehicle.parts[i].translation))
    }

    #[test]
    fn test_spawn_layout() {
        let vehicle = spawn();
        let positions = positions(&vehicle);
        assert_eq!(positions[PartId::Body.index()], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(
            positions[PartId::FrontLeftWheel.index()],
            Vec3::new(1.1, 0.425, 1.3)
        );
        assert_eq!(
            positions[PartId::RearRightWheel.index()],
            Vec3::new(-1.1, 0.5, -1.1)
        );
        assert_eq!(vehicle.forward_direction(), FORWARD_AXIS);
        assert_eq!(vehicle.front_spin, 0.0);
    }

    #[test]
    fn test_turn_angle_per_meter_reference_geometry() {
        // 2.0 m wheelbase at 25 degrees with a 1.0 m track:
        // turning radius ~ 4.29 m, inner radius ~ 3.29 m, ~17.4 deg/m
        let result = turn_angle_per_meter(2.0, 25.0_f32.to_radians(), 1.0);
        assert!((result - 17.42).abs() < 0.1, "got {}", result);
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        let mut params = VehicleParams::default();
        params.max_steering_angle_deg = 45.0;
        params.track_width_m = params.wheel_base_m;
        assert!(Vehicle::new(&params).is_err());
    }

    #[test]
    fn test_model_matrix_composition_order() {
        let part = Part::new(Vec3::new(2.0, 1.0, 1.0), Vec3::new(5.0, 0.0, 0.0));
        let corner = part.model_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        // Scale first, then translate
        assert!((corner - Vec3::new(7.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_translate_assembly_moves_every_part() {
        let mut vehicle = spawn();
        let before = positions(&vehicle);
        vehicle.translate_assembly(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        let after = positions(&vehicle);
        for i in 0..PART_COUNT {
            assert!((after[i] - before[i] - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        }
    }

    #[test]
    fn test_rigid_distances_survive_a_drive() {
        let mut vehicle = spawn();
        let terrain = wavy_terrain();
        let start = positions(&vehicle);

        for _ in 0..60 {
            vehicle.update(DT, DRIVE_FORWARD_LEFT, &terrain);
        }

        let end = positions(&vehicle);
        for i in 0..PART_COUNT {
            for j in (i + 1)..PART_COUNT {
                let before = start[i].distance(start[j]);
                let after = end[i].distance(end[j]);
                assert!(
                    (before - after).abs() < 1e-3,
                    "parts {} and {} drifted: {} vs {}",
                    i,
                    j,
                    before,
                    after
                );
            }
        }
    }

    #[test]
    fn test_pivot_rotation_identity() {
        let mut vehicle = spawn();
        let before = positions(&vehicle);
        vehicle.rotate_about_pivot(Mat4::from_rotation_y(0.7));
        vehicle.rotate_about_pivot(Mat4::from_rotation_y(-0.7));
        let after = positions(&vehicle);
        for i in 0..PART_COUNT {
            assert!((after[i] - before[i]).length() < 1e-4);
        }
        assert!(vehicle.orientation.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_pivot_stays_fixed() {
        let mut vehicle = spawn();
        let body_before = positions(&vehicle)[PartId::Body.index()];
        vehicle.rotate_about_pivot(Mat4::from_rotation_y(1.2));
        let body_after = positions(&vehicle)[PartId::Body.index()];
        assert!((body_after - body_before).length() < 1e-5);
    }

    #[test]
    fn test_idle_tick_is_a_noop() {
        let mut vehicle = spawn();
        let terrain = wavy_terrain();
        let before = vehicle.model_matrices();

        // Steering without throttle must not move, spin, or rotate anything
        let steer_only = DriveInput {
            throttle: 0.0,
            steer: -1.0,
        };
        vehicle.update(DT, steer_only, &terrain);

        assert_eq!(vehicle.model_matrices(), before);
        assert_eq!(vehicle.front_spin, 0.0);
    }

    #[test]
    fn test_forward_drive_leads_with_the_nose() {
        let mut vehicle = spawn();
        let terrain = flat_terrain();
        for _ in 0..10 {
            vehicle.update(DT, DRIVE_FORWARD, &terrain);
        }
        let body = positions(&vehicle)[PartId::Body.index()];
        assert!((body.z - 4.0).abs() < 1e-4, "moved {} m", body.z);
        assert!(body.x.abs() < 1e-5);
    }

    #[test]
    fn test_reverse_drive_backs_up() {
        let mut vehicle = spawn();
        let terrain = flat_terrain();
        let reverse = DriveInput {
            throttle: 1.0,
            steer: 0.0,
        };
        vehicle.update(DT, reverse, &terrain);
        assert!(positions(&vehicle)[PartId::Body.index()].z < 0.0);
    }

    #[test]
    fn test_steering_left_curves_left() {
        let mut vehicle = spawn();
        let terrain = flat_terrain();
        // Short drive; at ~7 degrees of yaw per tick a long one would wrap
        // the heading past 180 degrees
        for _ in 0..5 {
            vehicle.update(DT, DRIVE_FORWARD_LEFT, &terrain);
        }
        // Facing +z, left is +x; the travel direction must have tilted that way
        let motion = vehicle.forward_direction() * DRIVE_FORWARD_LEFT.throttle;
        assert!(motion.x > 0.01, "heading never curved: {:?}", motion);
        assert!(motion.z > 0.0);
        let body = positions(&vehicle)[PartId::Body.index()];
        assert!(body.x > 0.0, "drifted to {:?}", body);
    }

    #[test]
    fn test_wheel_contact_error_averages_to_zero() {
        let mut vehicle = spawn();
        let terrain = wavy_terrain();
        vehicle.update(DT, DRIVE_FORWARD, &terrain);

        let wheels = [
            (PartId::FrontLeftWheel, 0.35),
            (PartId::FrontRightWheel, 0.35),
            (PartId::RearLeftWheel, 0.5),
            (PartId::RearRightWheel, 0.5),
        ];
        let total: f32 = wheels
            .iter()
            .map(|(id, radius)| {
                let center = transform::translation_of(&vehicle.parts[id.index()].translation);
                (terrain.height_at(center.x, center.z) + radius) - center.y
            })
            .sum();
        assert!(total.abs() < 1e-4, "residual contact error {}", total);
    }

    #[test]
    fn test_ground_follow_applies_uniform_correction() {
        let mut vehicle = spawn();
        let terrain = flat_terrain();
        let before = positions(&vehicle);
        vehicle.ground_follow(&terrain);
        let after = positions(&vehicle);

        // At spawn the rear wheels already touch flat ground and the front
        // pair floats 0.075 m high, so the averaged correction is -0.0375
        let delta = after[0] - before[0];
        assert!((delta.y + 0.0375).abs() < 1e-6, "delta {:?}", delta);
        for i in 1..PART_COUNT {
            assert!(((after[i] - before[i]) - delta).length() < 1e-6);
        }
    }

    #[test]
    fn test_rear_wheels_accumulate_spin() {
        let mut vehicle = spawn();
        let terrain = flat_terrain();
        for _ in 0..3 {
            vehicle.update(DT, DRIVE_FORWARD, &terrain);
        }
        // Three ticks of 0.4 m on 0.5 m wheels, forward throttle flips the sign
        let expected = Mat4::from_rotation_x(3.0 * 0.4 / 0.5);
        let rear = &vehicle.parts[PartId::RearLeftWheel.index()];
        assert!(rear.local.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_front_steering_snaps_without_losing_roll() {
        let mut vehicle = spawn();
        let terrain = flat_terrain();

        for _ in 0..3 {
            vehicle.update(DT, DRIVE_FORWARD_LEFT, &terrain);
        }
        let spin_while_steering = vehicle.front_spin;
        assert!(spin_while_steering > 0.0);

        // Steering released: the very next moving tick rebuilds the front
        // locals as pure roll, with the accumulator still growing
        vehicle.update(DT, DRIVE_FORWARD, &terrain);
        assert!(vehicle.front_spin > spin_while_steering);
        let expected = Mat4::from_rotation_x(vehicle.front_spin);
        for id in [PartId::FrontLeftWheel, PartId::FrontRightWheel] {
            assert!(vehicle.parts[id.index()].local.abs_diff_eq(expected, 1e-5));
        }
    }

    #[test]
    fn test_front_wheels_show_steering_while_held() {
        let mut vehicle = spawn();
        let terrain = flat_terrain();
        vehicle.update(DT, DRIVE_FORWARD_LEFT, &terrain);

        let steer_offset = VehicleParams::default().max_steering_angle_rad() * -1.0;
        let expected =
            Mat4::from_rotation_y(-steer_offset) * Mat4::from_rotation_x(vehicle.front_spin);
        let front = &vehicle.parts[PartId::FrontLeftWheel.index()];
        assert!(front.local.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_front_spin_tracks_rolling_distance() {
        let mut vehicle = spawn();
        let terrain = flat_terrain();
        for _ in 0..5 {
            vehicle.update(DT, DRIVE_FORWARD, &terrain);
        }
        // 5 ticks x 0.4 m over a 0.35 m radius
        let expected = 5.0 * 0.4 / 0.35;
        assert!((vehicle.front_spin - expected).abs() < 1e-4);
    }

    #[test]
    fn test_spare_wheel_mounted_sideways() {
        let vehicle = spawn();
        let spare = &vehicle.parts[PartId::SpareWheel.index()];
        assert!(spare
            .local
            .abs_diff_eq(Mat4::from_rotation_y(FRAC_PI_2), 1e-6));
    }
}
