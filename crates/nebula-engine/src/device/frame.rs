/// An acquired swapchain image plus the encoder that records into it.
///
/// Drop or submit it before acquiring the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What the context did about a failed acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost/outdated: the swapchain was rebuilt at the current size.
    Reconfigured,
    /// Timeout or an unclassified error; try again next frame.
    SkipFrame,
    /// Out of memory. Nothing more can be presented.
    Fatal,
}

impl SurfaceErrorAction {
    #[inline]
    pub fn is_fatal(self) -> bool {
        self == SurfaceErrorAction::Fatal
    }
}
