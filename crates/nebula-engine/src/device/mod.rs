//! wgpu device and swapchain for one window.
//!
//! `Gpu` owns the device/queue and the configured surface; it hands out one
//! `GpuFrame` at a time and classifies acquisition failures.

mod context;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use frame::{GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
