//! GPU rendering subsystem.
//!
//! `RenderSurface` is the renderer contract the backdrop talks to; `GpuSurface`
//! is its wgpu implementation. Resources (geometries, materials) are uploaded
//! once and referenced by id from the per-frame `DrawList`.
//!
//! Convention:
//! - world space is right-handed, +Y up, camera looking down -Z
//! - vertex shaders apply `projection * view * model`

mod common;
mod ctx;
mod gpu_surface;
mod mesh;
mod surface;

pub use ctx::{RenderCtx, RenderTarget};
pub use gpu_surface::GpuSurface;
pub use surface::{FrameParams, FrameStatus, RenderSurface};
