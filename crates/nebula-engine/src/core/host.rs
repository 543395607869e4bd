use anyhow::Result;

use crate::coords::{SurfaceSize, Viewport};
use crate::input::ListenerKind;
use crate::render::RenderSurface;

/// Token for one requested frame callback.
///
/// Handles are never reused by a host, so a stale handle can be told apart
/// from the current one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Token for one registered event listener.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Platform services for a component anchored to one window.
///
/// All calls happen on the event-loop thread; events and frame callbacks are
/// delivered between callbacks, never during one.
pub trait Host {
    type Surface: RenderSurface;

    /// Current anchor size in logical pixels.
    fn anchor_size(&self) -> Viewport;

    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f32;

    /// Creates the anchor's rendering surface at `size`.
    ///
    /// An anchor holds at most one surface; attaching a second one before
    /// `detach_surface` is an error.
    fn attach_surface(&mut self, size: SurfaceSize) -> Result<Self::Surface>;

    /// Marks the anchor as having no surface. The caller disposes the surface.
    fn detach_surface(&mut self);

    /// Requests one frame callback and returns its handle.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a pending frame callback. Unknown or fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Subscribes to events of `kind`.
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    /// Unsubscribes a listener. Unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);
}
