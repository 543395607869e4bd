//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and exposes the window to the mounted
//! component as a `core::Host`.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, WindowHost};
