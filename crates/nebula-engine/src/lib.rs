//! Nebula engine.
//!
//! Platform and GPU layer under the backdrop: a winit window exposed as a
//! `core::Host`, a wgpu `render::RenderSurface`, frame timing, and a small
//! retained scene vocabulary (geometries, materials, draw lists).

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
