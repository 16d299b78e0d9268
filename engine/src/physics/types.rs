//! Physics type re-exports from glam
//!
//! This module provides the core mathematical types used throughout
//! the physics system, re-exported from the glam library, plus the
//! single conversion boundary between physics space and render space.
//!
//! # Precision
//!
//! - Physics state (position, velocity, acceleration) is `f64` ([`DVec2`])
//! - Render state is `f32` ([`Vec3`])
//!
//! The physics plane is the render world's ground plane: physics `x` maps to
//! render `x`, physics `y` maps to render `z`, and render `y` is the height.

pub use glam::{DVec2, Vec3};

/// Converts a physics-plane position into a render-space position.
///
/// # Arguments
///
/// * `position` - Physics position (meters, f64)
/// * `height` - Render-space height above the physics plane
pub fn to_render_space(position: DVec2, height: f32) -> Vec3 {
    Vec3::new(position.x as f32, height, position.y as f32)
}

/// Projects a render-space position onto the physics plane (drops the height).
pub fn from_render_space(position: Vec3) -> DVec2 {
    DVec2::new(position.x as f64, position.z as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_space_maps_y_to_z() {
        let v = to_render_space(DVec2::new(1.5, -2.0), 0.25);
        assert_eq!(v, Vec3::new(1.5, 0.25, -2.0));
    }

    #[test]
    fn test_from_render_space_drops_height() {
        let p = from_render_space(Vec3::new(3.0, 100.0, 4.0));
        assert_eq!(p, DVec2::new(3.0, 4.0));
    }
}
