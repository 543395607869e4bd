//! Animated backdrop: a procedural particle cloud and a small ensemble of
//! rotating wireframe shapes, mounted on a `nebula_engine::core::Host`.
//!
//! `Backdrop` owns every acquired resource and the frame loop state;
//! `BackdropApp` adapts it to the engine runtime.

pub mod app;
pub mod camera;
pub mod config;
pub mod input;
pub mod lifecycle;
pub mod particles;
pub mod scheduler;
pub mod shapes;

#[cfg(test)]
mod fake;

pub use app::BackdropApp;
pub use config::{BackdropConfig, FloatMotion};
pub use lifecycle::{Backdrop, TickOutcome};
