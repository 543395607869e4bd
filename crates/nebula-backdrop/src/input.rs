//! Pointer and resize listeners.

use nebula_engine::coords::Viewport;
use nebula_engine::core::{Host, ListenerId};
use nebula_engine::input::{ListenerKind, PointerMoveEvent};

/// Pointer position normalized to `[-1, 1]`, y pointing up. Defaults to the center.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

/// Sole writer of `PointerState`.
///
/// Holds the host listener ids between `attach` and `detach`; both are
/// idempotent so each listener is registered and removed exactly once.
#[derive(Debug, Default)]
pub struct InputReactor {
    pointer: PointerState,
    listeners: Option<[ListenerId; 2]>,
}

impl InputReactor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.listeners.is_some()
    }

    pub fn attach<H: Host>(&mut self, host: &mut H) {
        if self.listeners.is_some() {
            return;
        }

        let pointer = host.add_listener(ListenerKind::PointerMove);
        let resize = host.add_listener(ListenerKind::Resize);
        self.listeners = Some([pointer, resize]);
        log::debug!("input listeners attached");
    }

    pub fn detach<H: Host>(&mut self, host: &mut H) {
        let Some(ids) = self.listeners.take() else {
            return;
        };

        for id in ids {
            host.remove_listener(id);
        }
        log::debug!("input listeners detached");
    }

    /// Maps a pointer position in anchor pixels onto `[-1, 1]²`.
    ///
    /// Positions outside the anchor (a drag leaving the window) are clamped to
    /// its edge. A degenerate viewport leaves the state untouched.
    pub fn on_pointer_move(&mut self, event: PointerMoveEvent, viewport: Viewport) {
        if !viewport.is_valid() || !(event.x.is_finite() && event.y.is_finite()) {
            return;
        }

        self.pointer = PointerState {
            x: ((event.x / viewport.width) * 2.0 - 1.0).clamp(-1.0, 1.0),
            y: (-(event.y / viewport.height) * 2.0 + 1.0).clamp(-1.0, 1.0),
        };
    }
}
