//! Face and vertex normals.
//!
//! A face normal is the normalized cross product of the face's first two
//! edge vectors, so it follows the winding of the vertex cycle. A vertex
//! normal is the normalized mean of its incident face normals.
//!
//! Zero-length results (collinear corners, an isolated vertex, normals that
//! cancel out) are handled according to [`DegeneratePolicy`].

use nalgebra::Vector3;
use rayon::prelude::*;

use super::geometry::{face_normal, try_normalize};
use super::index::{FaceId, MeshIndex, VertexId};
use super::polymesh::{Face, PolyMesh, Vertex};
use crate::error::{MeshError, Result};

/// What to do when a normal cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fail with [`MeshError::DegenerateGeometry`].
    #[default]
    Abort,
    /// Store a zero normal, log a warning and keep going.
    Skip,
}

/// Options for normal computation.
#[derive(Debug, Clone)]
pub struct NormalOptions {
    /// Handling of zero-length normals.
    pub degenerate: DegeneratePolicy,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for NormalOptions {
    fn default() -> Self {
        Self {
            degenerate: DegeneratePolicy::Abort,
            parallel: true,
        }
    }
}

impl NormalOptions {
    /// Set the degenerate-geometry policy.
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// How many elements were given a zero normal under [`DegeneratePolicy::Skip`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalReport {
    /// Faces whose normal could not be computed.
    pub skipped_faces: usize,
    /// Vertices whose normal could not be computed.
    pub skipped_vertices: usize,
}

impl NormalReport {
    /// True when every normal was computed.
    pub fn is_clean(&self) -> bool {
        self.skipped_faces == 0 && self.skipped_vertices == 0
    }
}

impl<I: MeshIndex> PolyMesh<I> {
    /// Recompute all face normals, then all vertex normals.
    ///
    /// Invalidates cached render buffers. With [`DegeneratePolicy::Abort`] the
    /// first degenerate element fails the call; normals already written stay
    /// written, but topology is never touched.
    pub fn compute_normals(&mut self, options: &NormalOptions) -> Result<NormalReport> {
        self.render = None;
        let mut report = NormalReport::default();

        let face_normals: Vec<Option<Vector3<f64>>> = if options.parallel {
            self.faces.par_iter().map(|f| self.raw_face_normal(f)).collect()
        } else {
            self.faces.iter().map(|f| self.raw_face_normal(f)).collect()
        };

        for (i, normal) in face_normals.into_iter().enumerate() {
            self.faces[i].normal = match normal {
                Some(n) => n,
                None => {
                    let id = FaceId::<I>::new(i);
                    skip_or_abort(options.degenerate, id, "zero-length face normal")?;
                    report.skipped_faces += 1;
                    Vector3::zeros()
                }
            };
        }

        let vertex_normals: Vec<Option<Vector3<f64>>> = if options.parallel {
            self.vertices
                .par_iter()
                .map(|v| self.raw_vertex_normal(v))
                .collect()
        } else {
            self.vertices.iter().map(|v| self.raw_vertex_normal(v)).collect()
        };

        for (i, normal) in vertex_normals.into_iter().enumerate() {
            self.vertices[i].normal = match normal {
                Some(n) => n,
                None => {
                    let id = VertexId::<I>::new(i);
                    let reason = if self.vertices[i].faces.is_empty() {
                        "vertex has no incident faces"
                    } else {
                        "incident face normals cancel out"
                    };
                    skip_or_abort(options.degenerate, id, reason)?;
                    report.skipped_vertices += 1;
                    Vector3::zeros()
                }
            };
        }

        Ok(report)
    }

    fn raw_face_normal(&self, face: &Face<I>) -> Option<Vector3<f64>> {
        let p0 = self.position(face.vertices[0]);
        let p1 = self.position(face.vertices[1]);
        let p2 = self.position(face.vertices[2]);
        face_normal(p0, p1, p2)
    }

    fn raw_vertex_normal(&self, vertex: &Vertex<I>) -> Option<Vector3<f64>> {
        if vertex.faces.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = vertex
            .faces
            .iter()
            .map(|&f| self.face(f).normal)
            .sum();
        try_normalize(&(sum / vertex.faces.len() as f64))
    }
}

fn skip_or_abort<T: std::fmt::Debug>(
    policy: DegeneratePolicy,
    element: T,
    reason: &'static str,
) -> Result<()> {
    match policy {
        DegeneratePolicy::Abort => Err(MeshError::degenerate(element, reason)),
        DegeneratePolicy::Skip => {
            log::warn!("skipping {:?}: {}", element, reason);
            Ok(())
        }
    }
}
