use glam::Mat4;

use super::{GeometryId, MaterialId};

/// Draws one uploaded geometry with one uploaded material.
///
/// The primitive topology follows the geometry (points or lines); the material
/// must be of the matching kind or the renderer skips the command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCmd {
    pub geometry: GeometryId,
    pub material: MaterialId,
    /// Object-to-world transform.
    pub model: Mat4,
}

impl DrawCmd {
    #[inline]
    pub fn new(geometry: GeometryId, material: MaterialId, model: Mat4) -> Self {
        Self { geometry, material, model }
    }
}
