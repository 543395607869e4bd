use crate::scene::LineMesh;

const TETRA_VERTICES: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];
const TETRA_FACES: [u32; 12] = [2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1];

const OCTA_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];
const OCTA_FACES: [u32; 24] = [
    0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, 1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
];

// Golden ratio.
const T: f32 = 1.618_034;

const ICOSA_VERTICES: [[f32; 3]; 12] = [
    [-1.0, T, 0.0],
    [1.0, T, 0.0],
    [-1.0, -T, 0.0],
    [1.0, -T, 0.0],
    [0.0, -1.0, T],
    [0.0, 1.0, T],
    [0.0, -1.0, -T],
    [0.0, 1.0, -T],
    [T, 0.0, -1.0],
    [T, 0.0, 1.0],
    [-T, 0.0, -1.0],
    [-T, 0.0, 1.0],
];
const ICOSA_FACES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1,
    8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

/// Regular tetrahedron with vertices on a sphere of `radius`.
pub fn tetrahedron(radius: f32) -> LineMesh {
    polyhedron(&TETRA_VERTICES, &TETRA_FACES, radius)
}

/// Regular octahedron with vertices on a sphere of `radius`.
pub fn octahedron(radius: f32) -> LineMesh {
    polyhedron(&OCTA_VERTICES, &OCTA_FACES, radius)
}

/// Regular icosahedron with vertices on a sphere of `radius`.
pub fn icosahedron(radius: f32) -> LineMesh {
    polyhedron(&ICOSA_VERTICES, &ICOSA_FACES, radius)
}

fn polyhedron(vertices: &[[f32; 3]], faces: &[u32], radius: f32) -> LineMesh {
    let positions = vertices
        .iter()
        .map(|&[x, y, z]| {
            let scale = radius / (x * x + y * y + z * z).sqrt();
            [x * scale, y * scale, z * scale]
        })
        .collect();

    LineMesh::from_triangles(positions, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_on_sphere(mesh: &LineMesh, radius: f32) {
        for [x, y, z] in &mesh.positions {
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - radius).abs() < 1e-5, "vertex at {r}, expected {radius}");
        }
    }

    #[test]
    fn tetrahedron_has_six_edges() {
        let mesh = tetrahedron(1.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 6);
        assert_on_sphere(&mesh, 1.0);
    }

    #[test]
    fn octahedron_has_twelve_edges() {
        let mesh = octahedron(1.2);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.edge_count(), 12);
        assert_on_sphere(&mesh, 1.2);
    }

    #[test]
    fn icosahedron_has_thirty_edges() {
        let mesh = icosahedron(1.0);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.edge_count(), 30);
        assert_on_sphere(&mesh, 1.0);
    }
}
