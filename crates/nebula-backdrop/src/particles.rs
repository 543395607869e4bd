//! Fixed-size procedural point cloud.

use std::f32::consts::TAU;

use glam::{EulerRot, Mat4, Vec3};
use nebula_engine::paint::Color;
use nebula_engine::scene::PointCloud;
use rand::Rng;

/// Per-tick increments of the field rotation, in radians.
pub const ROTATION_STEP_X: f32 = 0.001;
pub const ROTATION_STEP_Y: f32 = 0.002;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Linear RGB.
    pub color: [f32; 3],
}

/// Particles never move individually; the whole field rotates.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    rx: f32,
    ry: f32,
}

impl ParticleField {
    /// Scatters `count` particles uniformly in a cube of edge `spread`.
    ///
    /// Colors are drawn in HSL (hue in [0.6, 0.8), saturation and lightness in
    /// [0.5, 1.0)) and stored as linear RGB.
    pub fn construct<R: Rng + ?Sized>(count: usize, spread: f32, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(count);

        for _ in 0..count {
            let position = Vec3::new(
                (rng.random::<f32>() - 0.5) * spread,
                (rng.random::<f32>() - 0.5) * spread,
                (rng.random::<f32>() - 0.5) * spread,
            );

            let h = 0.6 + rng.random::<f32>() * 0.2;
            let s = 0.5 + rng.random::<f32>() * 0.5;
            let l = 0.5 + rng.random::<f32>() * 0.5;

            particles.push(Particle {
                position,
                color: Color::from_hsl(h, s, l).rgb(),
            });
        }

        Self { particles, rx: 0.0, ry: 0.0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current `(rx, ry)`, both in `[0, 2π)`.
    #[inline]
    pub fn rotation(&self) -> (f32, f32) {
        (self.rx, self.ry)
    }

    pub fn advance(&mut self) {
        self.rx = (self.rx + ROTATION_STEP_X).rem_euclid(TAU);
        self.ry = (self.ry + ROTATION_STEP_Y).rem_euclid(TAU);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rx, self.ry, 0.0)
    }

    pub fn to_point_cloud(&self) -> PointCloud {
        let mut cloud = PointCloud::with_capacity(self.particles.len());
        for p in &self.particles {
            cloud.push(p.position.to_array(), p.color);
        }
        cloud
    }
}
