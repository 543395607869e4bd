use crate::scene::LineMesh;

/// Axis-aligned box centered on the origin.
///
/// Faces are split into two triangles each, so the wireframe shows one
/// diagonal per face in addition to the twelve box edges.
pub fn cuboid(width: f32, height: f32, depth: f32) -> LineMesh {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = vec![
        [-x, -y, -z],
        [x, -y, -z],
        [x, y, -z],
        [-x, y, -z],
        [-x, -y, z],
        [x, -y, z],
        [x, y, z],
        [-x, y, z],
    ];

    #[rustfmt::skip]
    let triangles = [
        4, 5, 6, 4, 6, 7, // +z
        1, 0, 3, 1, 3, 2, // -z
        5, 1, 2, 5, 2, 6, // +x
        0, 4, 7, 0, 7, 3, // -x
        7, 6, 2, 7, 2, 3, // +y
        0, 1, 5, 0, 5, 4, // -y
    ];

    LineMesh::from_triangles(positions, &triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_edges_plus_face_diagonals() {
        let mesh = cuboid(1.0, 1.0, 1.0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.edge_count(), 12 + 6);
    }

    #[test]
    fn extents_follow_dimensions() {
        let mesh = cuboid(2.0, 4.0, 6.0);
        let max = mesh
            .positions
            .iter()
            .fold([0.0f32; 3], |acc, p| [acc[0].max(p[0]), acc[1].max(p[1]), acc[2].max(p[2])]);
        assert_eq!(max, [1.0, 2.0, 3.0]);
    }
}
