//! Procedural wireframe generators.
//!
//! Each generator returns a `LineMesh` centered on the origin.

mod cuboid;
mod polyhedron;
mod torus;

pub use cuboid::cuboid;
pub use polyhedron::{icosahedron, octahedron, tetrahedron};
pub use torus::torus;
