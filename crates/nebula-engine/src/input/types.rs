/// Pointer moved event, in logical pixels relative to the anchor's top-left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Event categories a listener can subscribe to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ListenerKind {
    PointerMove,
    Resize,
}

/// Platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerMoveEvent),

    /// The anchor changed size or scale factor; re-measure through the host.
    Resized,
}

impl InputEvent {
    /// Listener category this event is delivered to.
    #[inline]
    pub fn kind(&self) -> ListenerKind {
        match self {
            InputEvent::PointerMoved(_) => ListenerKind::PointerMove,
            InputEvent::Resized => ListenerKind::Resize,
        }
    }
}
