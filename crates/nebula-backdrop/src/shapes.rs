//! Five wireframe primitives rotating at index-scaled speeds.

use glam::{EulerRot, Mat4, Vec3};
use nebula_engine::paint::Color;
use nebula_engine::scene::shapes::{cuboid, icosahedron, octahedron, tetrahedron, torus};
use nebula_engine::scene::{LineMesh, WireframeMaterial};

use crate::config::FloatMotion;

/// Per-tick rotation increments for index 0; shape `i` moves `i + 1` times as fast.
const SPIN_X: f32 = 0.01;
const SPIN_Y: f32 = 0.005;
const SPIN_Z: f32 = 0.003;

/// Per-tick drift factor of `FloatMotion::Drift`.
const DRIFT_STEP: f32 = 0.003;
/// Peak offset of `FloatMotion::Bounded`; the drift's steady amplitude at 60 ticks/s.
const BOUNDED_AMPLITUDE: f32 = DRIFT_STEP * 60.0;
/// Angular frequency of the float, per elapsed millisecond.
const FLOAT_FREQUENCY: f64 = 0.001;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShapeKind {
    Torus,
    Icosahedron,
    Octahedron,
    Tetrahedron,
    Box,
}

impl ShapeKind {
    pub fn geometry(self) -> LineMesh {
        match self {
            ShapeKind::Torus => torus(1.0, 0.3, 16, 100),
            ShapeKind::Icosahedron => icosahedron(1.0),
            ShapeKind::Octahedron => octahedron(1.2),
            ShapeKind::Tetrahedron => tetrahedron(1.0),
            ShapeKind::Box => cuboid(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: Color,
    pub opacity: f32,
    pub base: Vec3,
    pub position: Vec3,
    /// Cumulative Euler angles (XYZ order), never wrapped.
    pub rotation: Vec3,
    pub index: usize,
}

impl Shape {
    fn new(index: usize, kind: ShapeKind, hex: u32, opacity: f32, base: Vec3) -> Self {
        Self {
            kind,
            color: Color::from_hex(hex),
            opacity,
            base,
            position: base,
            rotation: Vec3::ZERO,
            index,
        }
    }

    /// Speed multiplier, `index + 1`.
    #[inline]
    pub fn speed(&self) -> f32 {
        (self.index + 1) as f32
    }

    pub fn material(&self) -> WireframeMaterial {
        WireframeMaterial {
            color: self.color,
            opacity: self.opacity,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

#[derive(Debug, Clone)]
pub struct ShapeEnsemble {
    shapes: Vec<Shape>,
    motion: FloatMotion,
}

impl ShapeEnsemble {
    pub fn construct(motion: FloatMotion) -> Self {
        let shapes = vec![
            Shape::new(0, ShapeKind::Torus, 0x3a86ff, 0.3, Vec3::new(-3.0, 2.0, -5.0)),
            Shape::new(1, ShapeKind::Icosahedron, 0x667eea, 0.4, Vec3::new(3.0, -2.0, -3.0)),
            Shape::new(2, ShapeKind::Octahedron, 0x764ba2, 0.35, Vec3::new(0.0, 3.0, -4.0)),
            Shape::new(3, ShapeKind::Tetrahedron, 0x5a67d8, 0.4, Vec3::new(-2.0, -3.0, -6.0)),
            Shape::new(4, ShapeKind::Box, 0x4c51bf, 0.3, Vec3::new(4.0, 0.0, -7.0)),
        ];

        Self { shapes, motion }
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Advances every shape by one tick at `elapsed_ms` since the loop started.
    pub fn advance(&mut self, elapsed_ms: f64) {
        for shape in &mut self.shapes {
            let k = shape.speed();
            shape.rotation += Vec3::new(SPIN_X * k, SPIN_Y * k, SPIN_Z * k);

            let wave = (elapsed_ms * FLOAT_FREQUENCY + shape.index as f64).sin() as f32;
            match self.motion {
                FloatMotion::Bounded => shape.position.y = shape.base.y + BOUNDED_AMPLITUDE * wave,
                FloatMotion::Drift => shape.position.y += wave * DRIFT_STEP,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_matches_table() {
        let e = ShapeEnsemble::construct(FloatMotion::Bounded);
        let kinds: Vec<ShapeKind> = e.shapes().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ShapeKind::Torus,
                ShapeKind::Icosahedron,
                ShapeKind::Octahedron,
                ShapeKind::Tetrahedron,
                ShapeKind::Box,
            ]
        );

        let box_shape = &e.shapes()[4];
        assert_eq!(box_shape.base, Vec3::new(4.0, 0.0, -7.0));
        assert_eq!(box_shape.opacity, 0.3);
        assert_eq!(box_shape.color, Color::from_hex(0x4c51bf));
        assert!(e.shapes().iter().all(|s| s.rotation == Vec3::ZERO && s.position == s.base));
    }

    #[test]
    fn rotation_scales_with_index() {
        let mut e = ShapeEnsemble::construct(FloatMotion::Bounded);
        let n = 50;
        for t in 0..n {
            e.advance(t as f64 * 16.0);
        }

        for (i, s) in e.shapes().iter().enumerate() {
            let k = (i + 1) as f32;
            assert!((s.rotation.x - 0.01 * k * n as f32).abs() < 1e-4, "shape {i}");
            assert!((s.rotation.y - 0.005 * k * n as f32).abs() < 1e-4);
            assert!((s.rotation.z - 0.003 * k * n as f32).abs() < 1e-4);
        }
    }

    #[test]
    fn rotation_never_decreases() {
        let mut e = ShapeEnsemble::construct(FloatMotion::Drift);
        let mut prev: Vec<Vec3> = e.shapes().iter().map(|s| s.rotation).collect();

        for t in 0..1000 {
            e.advance(t as f64 * 16.0);
            for (s, p) in e.shapes().iter().zip(&prev) {
                assert!(s.rotation.x > p.x && s.rotation.y > p.y && s.rotation.z > p.z);
            }
            prev = e.shapes().iter().map(|s| s.rotation).collect();
        }
    }

    #[test]
    fn bounded_float_stays_near_base() {
        let mut e = ShapeEnsemble::construct(FloatMotion::Bounded);
        for t in 0..10_000 {
            e.advance(t as f64 * 16.7);
        }

        for s in e.shapes() {
            assert!((s.position.y - s.base.y).abs() <= BOUNDED_AMPLITUDE + 1e-5);
            assert_eq!(s.position.x, s.base.x);
            assert_eq!(s.position.z, s.base.z);
        }
    }

    #[test]
    fn bounded_float_is_a_function_of_time() {
        let mut e = ShapeEnsemble::construct(FloatMotion::Bounded);
        e.advance(1000.0);
        let expected = 2.0 + BOUNDED_AMPLITUDE * (1.0f64).sin() as f32;
        assert!((e.shapes()[0].position.y - expected).abs() < 1e-5);
    }

    #[test]
    fn drift_accumulates() {
        let mut e = ShapeEnsemble::construct(FloatMotion::Drift);
        e.advance(0.0);
        e.advance(0.0);
        // Index 1 at t = 0: two steps of sin(1) * 0.003.
        let expected = -2.0 + 2.0 * (1.0f32).sin() * DRIFT_STEP;
        assert!((e.shapes()[1].position.y - expected).abs() < 1e-6);
    }

    #[test]
    fn geometries_are_nonempty_edge_lists() {
        for kind in [
            ShapeKind::Torus,
            ShapeKind::Icosahedron,
            ShapeKind::Octahedron,
            ShapeKind::Tetrahedron,
            ShapeKind::Box,
        ] {
            let mesh = kind.geometry();
            assert!(mesh.edge_count() > 0, "{kind:?}");
            assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
        }
    }
}
