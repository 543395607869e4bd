use anyhow::Result;
use glam::Mat4;

use crate::coords::SurfaceSize;
use crate::paint::Color;
use crate::scene::{DrawList, Geometry, GeometryId, Material, MaterialId};

/// Per-frame camera and clear state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameParams {
    pub view: Mat4,
    pub projection: Mat4,
    pub clear: Color,
}

/// Outcome of one `RenderSurface::render` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    Presented,
    /// Nothing was presented this frame (transient surface state).
    Skipped,
    /// The surface cannot render anymore.
    Fatal,
}

/// A rendering surface attached to an anchor, plus the GPU resources it owns.
///
/// Every id handed out by `create_*` must be released with the matching
/// `dispose_*` before `dispose`. `dispose` releases the surface itself; after
/// it, rendering is a no-op.
pub trait RenderSurface {
    /// Configured drawable size in physical pixels.
    fn size(&self) -> SurfaceSize;

    /// Reconfigures the drawable size. Zero-area sizes are ignored.
    fn resize(&mut self, size: SurfaceSize);

    fn create_geometry(&mut self, geometry: &Geometry) -> Result<GeometryId>;

    fn create_material(&mut self, material: &Material) -> Result<MaterialId>;

    /// Clears, draws `draws` in paint order and presents.
    fn render(&mut self, frame: &FrameParams, draws: &mut DrawList) -> FrameStatus;

    fn dispose_geometry(&mut self, id: GeometryId);

    fn dispose_material(&mut self, id: MaterialId);

    fn dispose(&mut self);
}
