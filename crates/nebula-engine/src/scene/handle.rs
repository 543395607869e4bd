/// Surface-issued handle to an uploaded geometry.
///
/// Only meaningful for the surface that created it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GeometryId(pub u32);

/// Surface-issued handle to an uploaded material.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct MaterialId(pub u32);
