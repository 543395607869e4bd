//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into `InputEvent`s
//! and for delivering them only to registered listeners.

mod types;

pub use types::{InputEvent, ListenerKind, PointerMoveEvent};
