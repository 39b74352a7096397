//! Core mesh data structures.
//!
//! The primary type is [`PolyMesh`], a polygon mesh in which every vertex,
//! edge and face keeps explicit adjacency lists. Elements are stored in
//! per-mesh arrays and identified by typed indices ([`VertexId`],
//! [`EdgeId`], [`FaceId`]), generic over the integer type ([`MeshIndex`]).
//!
//! # Construction
//!
//! Meshes are built incrementally: add vertices, then add faces as ordered
//! lists of vertex indices. Edges are created on demand and shared between
//! the faces that walk the same vertex pair.
//!
//! ```
//! use crumb::mesh::PolyMesh;
//! use nalgebra::Point3;
//!
//! let mut mesh: PolyMesh = PolyMesh::new(4);
//! mesh.add_vertex(Point3::new(0.0, 0.0, 0.0)).unwrap();
//! mesh.add_vertex(Point3::new(1.0, 0.0, 0.0)).unwrap();
//! mesh.add_vertex(Point3::new(1.0, 1.0, 0.0)).unwrap();
//! mesh.add_vertex(Point3::new(0.0, 1.0, 0.0)).unwrap();
//! mesh.add_face(&[0, 1, 2, 3]).unwrap();
//!
//! assert_eq!(mesh.num_edges(), 4);
//! ```
//!
//! # Rendering
//!
//! [`PolyMesh::compute_normals`] fills face and vertex normals and
//! [`flatten`] turns the mesh into [`RenderBuffers`] for GPU upload.

mod buffers;
pub mod geometry;
mod index;
mod normals;
mod polymesh;
pub mod shapes;

pub use buffers::{flatten, RenderBuffers, RenderVertex};
pub use index::{EdgeId, FaceId, MeshIndex, VertexId};
pub use normals::{DegeneratePolicy, NormalOptions, NormalReport};
pub use polymesh::{Edge, Face, PolyMesh, Vertex};
pub use shapes::{build_base_mesh, BaseShape};
