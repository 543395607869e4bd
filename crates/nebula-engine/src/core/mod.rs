//! Core engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and the
//! component mounted on it:
//! - `Host`: what the platform offers an anchored component (metrics, one
//!   surface, frame scheduling, event listeners)
//! - `App`: the lifecycle callbacks the runtime drives

mod app;
mod host;

pub use app::{App, AppControl};
pub use host::{FrameHandle, Host, ListenerId};
