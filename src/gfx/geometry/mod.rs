//! # Procedural Geometry
//!
//! Triangle geometry for the built-in scene content (ground plane, cube) and
//! the line geometry drawn by scene helpers.
//!
//! ```rust
//! use glimpse::gfx::geometry::{generate_box, generate_plane};
//!
//! let cube = generate_box(1.0, 1.0, 1.0);
//! let ground = generate_plane(20.0, 20.0, 1, 1);
//! assert_eq!(cube.triangle_count(), 12);
//! assert_eq!(ground.triangle_count(), 2);
//! ```

pub mod lines;
pub mod primitives;

pub use lines::*;
pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Triangle geometry ready for GPU upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z), one per vertex
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Builds geometry from flat position/normal arrays as produced by OBJ
    /// decoders. Normals are computed when absent or mismatched.
    pub fn from_flat(positions: &[f32], normals: &[f32], indices: Vec<u32>) -> Self {
        let vertices: Vec<[f32; 3]> = positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();

        let mut data = Self {
            vertices,
            normals: Vec::new(),
            indices,
        };

        if !normals.is_empty() && normals.len() == positions.len() {
            data.normals = normals
                .chunks_exact(3)
                .map(|n| [n[0], n[1], n[2]])
                .collect();
        } else {
            data.compute_vertex_normals();
        }
        data
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Replaces normals with area-weighted averages of adjacent face normals.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![[0.0f32; 3]; self.vertices.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            if i0 >= self.vertices.len() || i1 >= self.vertices.len() || i2 >= self.vertices.len()
            {
                continue;
            }
            let (v0, v1, v2) = (self.vertices[i0], self.vertices[i1], self.vertices[i2]);
            let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
            let face = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            for idx in [i0, i1, i2] {
                for k in 0..3 {
                    normals[idx][k] += face[k];
                }
            }
        }

        for n in normals.iter_mut() {
            let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            if length > 0.0 {
                n.iter_mut().for_each(|c| *c /= length);
            } else {
                *n = [0.0, 1.0, 0.0];
            }
        }

        self.normals = normals;
    }

    /// Interleaves positions and normals into the mesh vertex format.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
