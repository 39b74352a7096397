//! Error types for crumb.
//!
//! Every fallible operation in the crate returns [`MeshError`]. Subdivision
//! is all-or-nothing: the first error aborts the pass and the input mesh is
//! left as it was.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references a vertex index outside the mesh.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// Index the face would have received.
        face: usize,
        /// The out-of-range vertex index.
        vertex: usize,
    },

    /// A face has fewer than three vertices or repeats a vertex.
    #[error("face {face} is degenerate: {reason}")]
    DegenerateFace {
        /// Index the face would have received.
        face: usize,
        /// What is wrong with the face.
        reason: &'static str,
    },

    /// Two consecutive face vertices are not joined by an edge.
    #[error("no edge between vertices {v0} and {v1}")]
    MissingEdge {
        /// First vertex.
        v0: usize,
        /// Second vertex.
        v1: usize,
    },

    /// A face has a vertex count with no subdivision or triangulation rule.
    #[error("face {face} has unsupported arity {arity} (expected 3 or 4)")]
    UnsupportedFaceArity {
        /// The face index.
        face: usize,
        /// Number of vertices in the face.
        arity: usize,
    },

    /// A normal could not be computed (zero-length vector or no incident faces).
    #[error("degenerate geometry at {element}: {reason}")]
    DegenerateGeometry {
        /// The offending element, e.g. `F(3)` or `V(7)`.
        element: String,
        /// Description of the problem.
        reason: &'static str,
    },

    /// A vertex index does not fit in the 32-bit render index buffer.
    #[error("vertex index {index} does not fit in a u32 index buffer")]
    IndexOverflow {
        /// The vertex index.
        index: usize,
    },

    /// A mesh would hold more elements than its index type can address.
    #[error("{count} {element} exceed the {index_type} index limit of {max}")]
    CapacityExceeded {
        /// Kind of element (`vertices`, `edges` or `faces`).
        element: &'static str,
        /// Number of elements required.
        count: usize,
        /// Largest count the index type allows.
        max: usize,
        /// Name of the index type.
        index_type: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a degenerate geometry error for the element with the given debug name.
    pub fn degenerate<T: std::fmt::Debug>(element: T, reason: &'static str) -> Self {
        MeshError::DegenerateGeometry {
            element: format!("{:?}", element),
            reason,
        }
    }

    /// Whether this error describes broken connectivity rather than bad numbers.
    pub fn is_topology_error(&self) -> bool {
        matches!(
            self,
            MeshError::MissingEdge { .. }
                | MeshError::UnsupportedFaceArity { .. }
                | MeshError::InvalidVertexIndex { .. }
                | MeshError::DegenerateFace { .. }
        )
    }
}
