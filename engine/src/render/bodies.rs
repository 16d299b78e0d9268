//! Body render extract - RenderBody and RenderBatch structs for GPU upload
//!
//! This is the one place physics state crosses into the renderer. Physics
//! runs in f64 on a 2D plane; the renderer consumes f32 positions in 3D with
//! the physics plane mapped onto the render x/z ground plane.
//!
//! The structs are GPU-compatible with careful alignment to match a WGSL
//! storage buffer layout.

use crate::physics::body::BodyId;
use crate::physics::body_set::BodySet;
use crate::physics::collider::ColliderShape;
use crate::physics::types::to_render_space;

/// Maximum number of bodies in one [`RenderBatch`].
pub const MAX_RENDER_BODIES: usize = 64;

/// Shape type constants matching shader definitions
pub mod shape_type {
    pub const CIRCLE: u32 = 0;
    pub const BOX: u32 = 1;
}

/// Render flag bits
pub mod render_flags {
    /// Body is kinematic
    pub const KINEMATIC: u32 = 1 << 0;
    /// Body is attached to a parent
    pub const ATTACHED: u32 = 1 << 1;
}

/// Rendered body - must match WGSL RenderBody struct
/// WGSL Layout:
///   offset 0:  position (vec3<f32>) = 12 bytes
///   offset 12: shape_type (u32)     = 4 bytes
///   offset 16: extents (vec2<f32>)  = 8 bytes (radius in x for circles)
///   offset 24: speed (f32)          = 4 bytes
///   offset 28: flags (u32)          = 4 bytes
///   Total: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderBody {
    /// Render-space collider center (x, height, z)
    pub position: [f32; 3],
    /// Shape type, see [`shape_type`]
    pub shape_type: u32,
    /// Circle: (radius, radius). Box: half extents.
    pub extents: [f32; 2],
    /// Speed of the body's chain, for motion effects
    pub speed: f32,
    /// See [`render_flags`]
    pub flags: u32,
}

static_assertions::assert_eq_size!(RenderBody, [u8; 32]);

impl Default for RenderBody {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            shape_type: shape_type::CIRCLE,
            extents: [0.5, 0.5],
            speed: 0.0,
            flags: 0,
        }
    }
}

impl RenderBody {
    /// Extracts the render record of one body.
    ///
    /// # Arguments
    ///
    /// * `bodies` - The body set
    /// * `id` - Body to extract
    /// * `height` - Render-space height of the physics plane
    pub fn extract(bodies: &BodySet, id: BodyId, height: f32) -> Self {
        let body = &bodies[id];
        let (shape_type, extents) = match body.collider.shape {
            ColliderShape::Circle { radius } => (shape_type::CIRCLE, [radius as f32; 2]),
            ColliderShape::Box { half_extents } => (
                shape_type::BOX,
                [half_extents.x as f32, half_extents.y as f32],
            ),
        };

        let mut flags = 0;
        if body.kinematic {
            flags |= render_flags::KINEMATIC;
        }
        if body.parent().is_some() {
            flags |= render_flags::ATTACHED;
        }

        Self {
            position: to_render_space(bodies.collider_world_position(id), height).to_array(),
            shape_type,
            extents,
            speed: bodies.speed(id) as f32,
            flags,
        }
    }
}

/// Batch header + bodies array - must match WGSL RenderBatch struct
/// Contains a count and up to 64 render bodies.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderBatch {
    /// Number of valid bodies in the batch
    pub count: u32,
    /// Padding for 16-byte alignment
    pub _pad0: u32,
    pub _pad1: u32,
    pub _pad2: u32,
    /// Array of bodies (max 64)
    pub bodies: [RenderBody; MAX_RENDER_BODIES],
}

static_assertions::assert_eq_size!(RenderBatch, [u8; 16 + 32 * MAX_RENDER_BODIES]);

impl Default for RenderBatch {
    fn default() -> Self {
        Self {
            count: 0,
            _pad0: 0,
            _pad1: 0,
            _pad2: 0,
            bodies: [RenderBody::default(); MAX_RENDER_BODIES],
        }
    }
}

impl RenderBatch {
    /// Fills a batch from `ids`. Bodies past [`MAX_RENDER_BODIES`] are dropped.
    pub fn extract(bodies: &BodySet, ids: &[BodyId], height: f32) -> Self {
        let mut batch = Self::default();
        for (slot, &id) in batch.bodies.iter_mut().zip(ids) {
            *slot = RenderBody::extract(bodies, id, height);
        }
        batch.count = ids.len().min(MAX_RENDER_BODIES) as u32;
        batch
    }

    /// Raw bytes for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::Body;
    use crate::physics::collider::Collider;
    use glam::DVec2;

    #[test]
    fn test_render_body_size_exact_32_bytes() {
        assert_eq!(std::mem::size_of::<RenderBody>(), 32);
    }

    #[test]
    fn test_extract_maps_plane_to_xz() {
        let mut bodies = BodySet::new();
        let id = bodies
            .insert(
                Body::new("ball", DVec2::new(2.0, -3.0), 1.0)
                    .with_collider(Collider::circle(0.25))
                    .with_velocity(DVec2::new(3.0, 4.0)),
            )
            .unwrap();

        let rb = RenderBody::extract(&bodies, id, 1.0);
        assert_eq!(rb.position, [2.0, 1.0, -3.0]);
        assert_eq!(rb.shape_type, shape_type::CIRCLE);
        assert_eq!(rb.extents, [0.25, 0.25]);
        assert_eq!(rb.speed, 5.0);
        assert_eq!(rb.flags, 0);
    }

    #[test]
    fn test_extract_flags() {
        let mut bodies = BodySet::new();
        let base = bodies.insert(Body::new("base", DVec2::ZERO, 1.0).kinematic()).unwrap();
        let arm = bodies
            .insert(Body::new("arm", DVec2::X, 1.0).with_collider(Collider::aabb(DVec2::new(1.0, 2.0))))
            .unwrap();
        bodies.attach(arm, base).unwrap();

        assert_eq!(RenderBody::extract(&bodies, base, 0.0).flags, render_flags::KINEMATIC);
        let rb = RenderBody::extract(&bodies, arm, 0.0);
        assert_eq!(rb.flags, render_flags::ATTACHED);
        assert_eq!(rb.shape_type, shape_type::BOX);
        assert_eq!(rb.extents, [1.0, 2.0]);
    }

    #[test]
    fn test_batch_count_and_bytes() {
        let mut bodies = BodySet::new();
        let ids: Vec<BodyId> = (0..3)
            .map(|i| bodies.insert(Body::new("b", DVec2::new(i as f64, 0.0), 1.0)).unwrap())
            .collect();

        let batch = RenderBatch::extract(&bodies, &ids, 0.0);
        assert_eq!(batch.count, 3);
        assert_eq!(batch.bodies[2].position, [2.0, 0.0, 0.0]);
        assert_eq!(batch.as_bytes().len(), 16 + 32 * MAX_RENDER_BODIES);
    }
}
