use nebula_engine::paint::Color;

/// Vertical float of the wireframe shapes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FloatMotion {
    /// `y = base.y + amplitude * sin(t * 0.001 + i)`, recomputed every tick.
    #[default]
    Bounded,
    /// `y += sin(t * 0.001 + i) * 0.003` per tick; accumulates with frame rate.
    Drift,
}

/// Backdrop configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropConfig {
    pub particle_count: usize,
    /// Edge of the cube particles are scattered in, centered on the origin.
    pub spread: f32,

    pub point_size: f32,
    pub point_opacity: f32,

    /// Upper bound applied to the host's device pixel ratio.
    pub max_pixel_ratio: f32,

    pub float_motion: FloatMotion,
    pub draw_shapes: bool,

    pub clear_color: Color,

    /// Fixed seed for particle sampling; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            particle_count: 800,
            spread: 20.0,
            point_size: 0.02,
            point_opacity: 0.8,
            max_pixel_ratio: 2.0,
            float_motion: FloatMotion::Bounded,
            draw_shapes: true,
            clear_color: Color::transparent(),
            seed: None,
        }
    }
}

impl BackdropConfig {
    /// Clamps a host-reported pixel ratio into `(0, max_pixel_ratio]`.
    ///
    /// Non-finite or non-positive ratios fall back to 1.
    pub fn effective_pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        dpr.min(self.max_pixel_ratio.max(f32::MIN_POSITIVE))
    }
}
