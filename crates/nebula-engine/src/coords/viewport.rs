/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height, or `None` for a degenerate viewport.
    #[inline]
    pub fn aspect(self) -> Option<f32> {
        self.is_valid().then(|| self.width / self.height)
    }

    /// Physical size at `pixel_ratio`, or `None` when the result has no area.
    pub fn to_physical(self, pixel_ratio: f32) -> Option<SurfaceSize> {
        if !self.is_valid() || !(pixel_ratio > 0.0) {
            return None;
        }

        let size = SurfaceSize::new(
            (self.width * pixel_ratio).round() as u32,
            (self.height * pixel_ratio).round() as u32,
        );
        (!size.is_empty()).then_some(size)
    }
}

/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_valid_viewport() {
        assert_eq!(Viewport::new(800.0, 400.0).aspect(), Some(2.0));
    }

    #[test]
    fn aspect_of_zero_viewport_is_none() {
        assert_eq!(Viewport::new(0.0, 600.0).aspect(), None);
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), None);
    }

    #[test]
    fn to_physical_scales_by_ratio() {
        let size = Viewport::new(800.0, 600.0).to_physical(1.5).unwrap();
        assert_eq!(size, SurfaceSize::new(1200, 900));
    }

    #[test]
    fn to_physical_rejects_zero_area() {
        assert!(Viewport::new(0.0, 0.0).to_physical(2.0).is_none());
        assert!(Viewport::new(800.0, 600.0).to_physical(0.0).is_none());
        assert!(Viewport::new(800.0, 600.0).to_physical(f32::NAN).is_none());
    }
}
