//! Affine transform helpers shared by the vehicle and camera math.
//!
//! Matrices are glam `Mat4` throughout. Every transform composed here is
//! affine (bottom row (0, 0, 0, 1)), and composition is left-multiplication:
//! `a * b` applies `b` first, then `a`.

use glam::{Mat4, Vec3};

/// Extract the world-space position from an affine transform.
///
/// glam matrices are column-major, so the translation lives in the fourth
/// column. Works on accumulated transforms too, not just pure translations.
pub fn translation_of(transform: &Mat4) -> Vec3 {
    transform.w_axis.truncate()
}

/// Build a rotation about an arbitrary pivot point:
/// `translate(pivot) * rotation * translate(-pivot)`.
///
/// Left-multiplying a part's translation by the result rotates that part
/// around `pivot` instead of the origin.
pub fn rotate_around(pivot: Vec3, rotation: Mat4) -> Mat4 {
    Mat4::from_translation(pivot) * rotation * Mat4::from_translation(-pivot)
}

/// Transform a direction vector (homogeneous w = 0).
///
/// Translation has no effect on directions, only the rotational part of
/// `transform` applies.
pub fn transform_direction(transform: &Mat4, direction: Vec3) -> Vec3 {
    (*transform * direction.extend(0.0)).truncate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_translation_of_pure_translation() {
        let transform = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(translation_of(&transform), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_translation_of_composed_transform() {
        // Rotation folded in after the translation must not disturb the
        // extracted position
        let transform =
            Mat4::from_translation(Vec3::new(5.0, 0.0, -2.0)) * Mat4::from_rotation_y(0.7);
        let position = translation_of(&transform);
        assert!((position - Vec3::new(5.0, 0.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn test_rotate_around_keeps_pivot_fixed() {
        let pivot = Vec3::new(3.0, 1.0, -4.0);
        let rotation = rotate_around(pivot, Mat4::from_rotation_y(1.3));
        let moved = rotation.transform_point3(pivot);
        assert!((moved - pivot).length() < 1e-5);
    }

    #[test]
    fn test_rotate_around_half_turn() {
        // A half turn about (1, 0, 0) sends (2, 0, 0) to the origin
        let rotation = rotate_around(Vec3::new(1.0, 0.0, 0.0), Mat4::from_rotation_y(PI));
        let moved = rotation.transform_point3(Vec3::new(2.0, 0.0, 0.0));
        assert!(moved.length() < 1e-5);
    }

    #[test]
    fn test_rotate_around_identity_rotation() {
        let rotation = rotate_around(Vec3::new(9.0, -3.0, 2.0), Mat4::IDENTITY);
        assert!(rotation.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_direction_ignores_translation() {
        let transform = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let direction = transform_direction(&transform, Vec3::new(0.0, 0.0, -1.0));
        assert!((direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_direction_rotates() {
        let transform = Mat4::from_rotation_y(FRAC_PI_2);
        let direction = transform_direction(&transform, Vec3::new(0.0, 0.0, -1.0));
        assert!((direction - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }
}
