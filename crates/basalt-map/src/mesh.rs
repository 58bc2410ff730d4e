use crate::Triangle;

use basalt_core::glam::Vec3A;

/// Renderable triangle soup for one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Replaces the mesh with `triangles`, giving every triangle its own 3 vertices. Normals are left empty.
    pub fn set_triangles(&mut self, triangles: &[Triangle]) {
        self.clear();
        self.positions.reserve(3 * triangles.len());
        self.indices.reserve(3 * triangles.len());
        for t in triangles {
            let base = self.positions.len() as u32;
            self.positions.extend_from_slice(&t.vertices());
            self.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }
    }

    /// Recomputes per-vertex normals by accumulating the (area weighted) normals of the faces using each vertex.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3A::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3A::from(self.positions[i as usize]));
            let face = (b - a).cross(c - a);
            for &i in tri {
                normals[i as usize] += face;
            }
        }
        self.normals = normals.into_iter().map(|n| n.normalize_or_zero().to_array()).collect();
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
