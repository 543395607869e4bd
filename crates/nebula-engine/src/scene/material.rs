use crate::paint::Color;

/// How a material's fragments combine with what is already on the surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Blending {
    /// Premultiplied "over".
    Normal,
    /// Color is added to the destination; overlapping points brighten.
    Additive,
}

/// Material for `Geometry::Points`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointsMaterial {
    /// Point edge length in view-space units (shrinks with distance).
    pub size: f32,
    pub opacity: f32,
    /// Use per-vertex colors instead of `color`.
    pub vertex_colors: bool,
    pub color: Color,
    pub blending: Blending,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            size: 1.0,
            opacity: 1.0,
            vertex_colors: false,
            color: Color::WHITE,
            blending: Blending::Normal,
        }
    }
}

/// Material for `Geometry::Lines`: flat colored edges.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WireframeMaterial {
    pub color: Color,
    pub opacity: f32,
}

/// CPU-side material handed to a surface for upload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Material {
    Points(PointsMaterial),
    Wireframe(WireframeMaterial),
}

impl Material {
    #[inline]
    pub fn blending(&self) -> Blending {
        match self {
            Material::Points(m) => m.blending,
            Material::Wireframe(_) => Blending::Normal,
        }
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        match self {
            Material::Points(m) => m.opacity,
            Material::Wireframe(m) => m.opacity,
        }
    }
}
