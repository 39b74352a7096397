//! Flattening a mesh into render-ready buffers.
//!
//! The renderer only ever sees two flat arrays: interleaved
//! `[x, y, z, nx, ny, nz]` vertex records in vertex-index order, and a
//! triangle index list. Quads are split along the `v0`-`v2` diagonal into
//! `(v0, v1, v2)` and `(v2, v3, v0)`, which assumes planar convex quads.

use bytemuck::{Pod, Zeroable};

use super::index::{MeshIndex, VertexId};
use super::polymesh::PolyMesh;
use crate::error::{MeshError, Result};

/// One interleaved vertex record as laid out in [`RenderBuffers::vertices`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderVertex {
    /// Position.
    pub position: [f32; 3],
    /// Averaged vertex normal.
    pub normal: [f32; 3],
}

/// Flat vertex and index arrays for GPU upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBuffers {
    /// `STRIDE` floats per vertex: position then normal.
    pub vertices: Vec<f32>,
    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

impl RenderBuffers {
    /// Floats per vertex record.
    pub const STRIDE: usize = 6;

    /// Number of vertex records.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::STRIDE
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The vertex array viewed as typed records.
    pub fn records(&self) -> &[RenderVertex] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the vertex array.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the index array.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Flatten a mesh into vertex records and triangle indices.
///
/// Fails with [`MeshError::UnsupportedFaceArity`] for faces that are neither
/// triangles nor quads, and with [`MeshError::IndexOverflow`] if a vertex
/// index does not fit in `u32`.
pub fn flatten<I: MeshIndex>(mesh: &PolyMesh<I>) -> Result<RenderBuffers> {
    let mut vertices = Vec::with_capacity(mesh.num_vertices() * RenderBuffers::STRIDE);
    for (_, v) in mesh.vertices() {
        vertices.extend_from_slice(&[
            v.position.x as f32,
            v.position.y as f32,
            v.position.z as f32,
            v.normal.x as f32,
            v.normal.y as f32,
            v.normal.z as f32,
        ]);
    }

    let mut indices = Vec::with_capacity(mesh.num_faces() * 6);
    for (f, face) in mesh.faces() {
        let ids = face.vertices();
        match ids.len() {
            3 => {
                for &v in ids {
                    indices.push(render_index(v)?);
                }
            }
            4 => {
                let [a, b, c, d] = [ids[0], ids[1], ids[2], ids[3]].map(render_index);
                let (a, b, c, d) = (a?, b?, c?, d?);
                indices.extend_from_slice(&[a, b, c, c, d, a]);
            }
            arity => {
                return Err(MeshError::UnsupportedFaceArity {
                    face: f.index(),
                    arity,
                })
            }
        }
    }

    Ok(RenderBuffers { vertices, indices })
}

fn render_index<I: MeshIndex>(v: VertexId<I>) -> Result<u32> {
    u32::try_from(v.index()).map_err(|_| MeshError::IndexOverflow { index: v.index() })
}

impl<I: MeshIndex> PolyMesh<I> {
    /// Buffers cached by the last [`update_render_buffers`](Self::update_render_buffers),
    /// or `None` if the mesh changed since.
    pub fn render_buffers(&self) -> Option<&RenderBuffers> {
        self.render.as_ref()
    }

    /// Flatten the mesh and cache the result.
    pub fn update_render_buffers(&mut self) -> Result<&RenderBuffers> {
        let buffers = flatten(self)?;
        Ok(&*self.render.insert(buffers))
    }
}
