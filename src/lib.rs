//! # Crumb
//!
//! Catmull-Clark subdivision for small polygon meshes.
//!
//! Crumb builds a polygon mesh with explicit vertex/edge/face adjacency,
//! refines it with Catmull-Clark subdivision, and flattens the result into
//! interleaved vertex and triangle index buffers ready for a GPU.
//!
//! ## Features
//!
//! - **Adjacency mesh**: vertices, edges and faces in flat arrays with typed indices
//! - **Flexible indexing**: 16-bit, 32-bit and 64-bit indices
//! - **Catmull-Clark**: triangle and quad input, memoized refined points, all-or-nothing passes
//! - **Normals**: face and averaged vertex normals, optionally computed in parallel
//! - **Render buffers**: `[x, y, z, nx, ny, nz]` records and triangle indices
//! - **Base shapes**: cube, square donut and tetrahedron
//!
//! ## Quick Start
//!
//! ```
//! use crumb::prelude::*;
//!
//! let mut mesh: PolyMesh = build_base_mesh(BaseShape::Cube).unwrap();
//! assert_eq!(mesh.num_faces(), 6);
//!
//! catmull_clark_subdivide(&mut mesh, &SubdivideOptions::new(1)).unwrap();
//! assert_eq!(mesh.num_vertices(), 26);
//! assert_eq!(mesh.num_faces(), 24);
//!
//! let buffers = mesh.render_buffers().unwrap();
//! assert_eq!(buffers.vertices.len(), 26 * RenderBuffers::STRIDE);
//! assert_eq!(buffers.triangle_count(), 48);
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use crumb::prelude::*;
//! use nalgebra::Point3;
//!
//! let mut mesh: PolyMesh = PolyMesh::new(3);
//! mesh.add_vertex(Point3::new(0.0, 0.0, 0.0)).unwrap();
//! mesh.add_vertex(Point3::new(1.0, 0.0, 0.0)).unwrap();
//! mesh.add_vertex(Point3::new(0.0, 1.0, 0.0)).unwrap();
//! let f = mesh.add_face(&[0, 1, 2]).unwrap();
//!
//! mesh.compute_normals(&NormalOptions::default()).unwrap();
//! assert_eq!(mesh.face(f).normal.z, 1.0);
//!
//! // A lone triangle is all hole edges.
//! for e in mesh.edge_ids() {
//!     assert!(mesh.is_hole_edge(e));
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use crumb::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::subdivide::{
        catmull_clark_subdivide, catmull_clark_subdivide_with_progress, subdivide,
        SubdivideOptions,
    };
    pub use crate::algo::Progress;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_base_mesh, BaseShape, DegeneratePolicy, Edge, EdgeId, Face, FaceId, MeshIndex,
        NormalOptions, PolyMesh, RenderBuffers, Vertex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
