//! Size types shared between the host, the renderer and the backdrop.
//!
//! - `Viewport`: logical pixels (DPI independent), what the host reports.
//! - `SurfaceSize`: physical pixels, what the swapchain is configured with.
//!
//! World-space math (positions, rotations, matrices) uses `glam`.

mod viewport;

pub use viewport::{SurfaceSize, Viewport};
