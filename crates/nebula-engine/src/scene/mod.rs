//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - CPU-side geometry and material descriptions, uploaded once per surface
//! - renderer-agnostic draw commands referencing uploaded resources
//! - deterministic ordering (z-index + insertion order)
//! - procedural wireframe generators under `scene::shapes`

mod cmd;
mod geometry;
mod handle;
mod key;
mod list;
mod material;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use geometry::{Geometry, LineMesh, PointCloud};
pub use handle::{GeometryId, MaterialId};
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use material::{Blending, Material, PointsMaterial, WireframeMaterial};
pub use z_index::ZIndex;
