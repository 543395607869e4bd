use std::collections::HashSet;

/// Independently positioned, per-vertex colored points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<[f32; 3]>,
    /// Linear RGB, one entry per position.
    pub colors: Vec<[f32; 3]>,
}

impl PointCloud {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, position: [f32; 3], color: [f32; 3]) {
        self.positions.push(position);
        self.colors.push(color);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Indexed line list (pairs of indices into `positions`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl LineMesh {
    /// Builds the wireframe of an indexed triangle list.
    ///
    /// Every triangle contributes its three edges; an edge shared by two
    /// triangles is emitted once.
    pub fn from_triangles(positions: Vec<[f32; 3]>, triangles: &[u32]) -> Self {
        debug_assert!(triangles.len() % 3 == 0, "triangle index count must be a multiple of 3");

        let mut seen = HashSet::with_capacity(triangles.len());
        let mut indices = Vec::with_capacity(triangles.len() * 2);

        for tri in triangles.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let edge = (a.min(b), a.max(b));
                if seen.insert(edge) {
                    indices.extend_from_slice(&[edge.0, edge.1]);
                }
            }
        }

        Self { positions, indices }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.indices.len() / 2
    }
}

/// CPU-side geometry handed to a surface for upload.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Points(PointCloud),
    Lines(LineMesh),
}

impl Geometry {
    /// Number of vertices the geometry uploads.
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Points(cloud) => cloud.len(),
            Geometry::Lines(mesh) => mesh.vertex_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_edges_are_emitted_once() {
        // Two triangles forming a quad share the diagonal.
        let quad = LineMesh::from_triangles(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            &[0, 1, 2, 0, 2, 3],
        );
        assert_eq!(quad.edge_count(), 5);
    }

    #[test]
    fn edge_direction_is_normalized() {
        let mesh = LineMesh::from_triangles(vec![[0.0; 3]; 3], &[2, 1, 0]);
        for pair in mesh.indices.chunks_exact(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn point_cloud_keeps_positions_and_colors_aligned() {
        let mut cloud = PointCloud::with_capacity(2);
        cloud.push([1.0, 2.0, 3.0], [0.1, 0.2, 0.3]);
        cloud.push([4.0, 5.0, 6.0], [0.4, 0.5, 0.6]);
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.colors.len(), cloud.positions.len());
        assert_eq!(Geometry::Points(cloud).vertex_count(), 2);
    }
}
