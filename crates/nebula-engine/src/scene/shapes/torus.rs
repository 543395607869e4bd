use std::f32::consts::TAU;

use crate::scene::LineMesh;

/// Torus in the XY plane.
///
/// `radius` is the distance from the center to the tube center; `tube` is the
/// tube radius. `radial_segments` subdivide the tube cross-section and
/// `tubular_segments` the ring. Segment counts below 3 are raised to 3.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> LineMesh {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);

    let mut positions = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            positions.push([ring * u.cos(), ring * u.sin(), tube * v.sin()]);
        }
    }

    let stride = tubular + 1;
    let mut triangles = Vec::with_capacity((radial * tubular * 6) as usize);
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            triangles.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    LineMesh::from_triangles(positions, &triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_vertex_and_edge_counts() {
        let mesh = torus(1.0, 0.3, 16, 100);
        assert_eq!(mesh.vertex_count(), 17 * 101);
        // rows * tubular + columns * radial + one diagonal per quad
        assert_eq!(mesh.edge_count(), 17 * 100 + 101 * 16 + 16 * 100);
    }

    #[test]
    fn vertices_lie_on_the_tube() {
        let mesh = torus(1.0, 0.3, 8, 12);
        for [x, y, z] in mesh.positions {
            let ring = (x * x + y * y).sqrt() - 1.0;
            let dist = (ring * ring + z * z).sqrt();
            assert!((dist - 0.3).abs() < 1e-4, "vertex off tube: {dist}");
        }
    }
}
