//! Polygon mesh with explicit vertex/edge/face adjacency.
//!
//! Unlike a half-edge structure, every element keeps plain adjacency lists:
//!
//! - each **vertex** lists its incident edges and faces
//! - each **edge** stores its two endpoints and the faces that share it
//! - each **face** stores its vertex cycle (which fixes the winding) and the
//!   matching edge cycle
//!
//! All three live in append-only arrays owned by [`PolyMesh`] and refer to
//! one another through typed indices, so a vertex's index is always its
//! position in the vertex array. Faces of any arity ≥ 3 can be stored;
//! triangles and quads are the ones the rest of the crate knows how to
//! subdivide and render.
//!
//! # Boundary ("hole") elements
//!
//! An edge with exactly one incident face lies on a hole in the surface. A
//! vertex whose face count differs from its edge count sits on such a hole;
//! on a closed manifold both counts are always equal.

use nalgebra::{Point3, Vector3};

use super::buffers::RenderBuffers;
use super::geometry::{centroid, midpoint};
use super::index::{EdgeId, FaceId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// A vertex of a [`PolyMesh`].
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Averaged normal; zero until [`PolyMesh::compute_normals`] runs.
    pub normal: Vector3<f64>,

    pub(crate) edges: Vec<EdgeId<I>>,
    pub(crate) faces: Vec<FaceId<I>>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create an unconnected vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Edges incident to this vertex, in creation order.
    #[inline]
    pub fn edges(&self) -> &[EdgeId<I>] {
        &self.edges
    }

    /// Faces incident to this vertex, in creation order.
    #[inline]
    pub fn faces(&self) -> &[FaceId<I>] {
        &self.faces
    }
}

/// An undirected edge between two distinct vertices.
#[derive(Debug, Clone)]
pub struct Edge<I: MeshIndex = u32> {
    pub(crate) vertices: [VertexId<I>; 2],
    pub(crate) faces: Vec<FaceId<I>>,
}

impl<I: MeshIndex> Edge<I> {
    /// The two endpoints, in the order the edge was first walked.
    #[inline]
    pub fn vertices(&self) -> [VertexId<I>; 2] {
        self.vertices
    }

    /// Faces sharing this edge.
    #[inline]
    pub fn faces(&self) -> &[FaceId<I>] {
        &self.faces
    }

    /// Whether `v` is one of the endpoints.
    #[inline]
    pub fn touches(&self, v: VertexId<I>) -> bool {
        self.vertices[0] == v || self.vertices[1] == v
    }

    /// The endpoint opposite `v`, if `v` is an endpoint at all.
    pub fn opposite(&self, v: VertexId<I>) -> Option<VertexId<I>> {
        if self.vertices[0] == v {
            Some(self.vertices[1])
        } else if self.vertices[1] == v {
            Some(self.vertices[0])
        } else {
            None
        }
    }
}

/// A face: an ordered cycle of vertices and the edges between them.
#[derive(Debug, Clone)]
pub struct Face<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<VertexId<I>>,
    pub(crate) edges: Vec<EdgeId<I>>,

    /// Unit normal; zero until [`PolyMesh::compute_normals`] runs.
    pub normal: Vector3<f64>,
}

impl<I: MeshIndex> Face<I> {
    /// Vertices in winding order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId<I>] {
        &self.vertices
    }

    /// Edges in winding order; `edges()[i]` joins `vertices()[i]` and `vertices()[i + 1]`.
    #[inline]
    pub fn edges(&self) -> &[EdgeId<I>] {
        &self.edges
    }

    /// Number of corners.
    #[inline]
    pub fn arity(&self) -> usize {
        self.vertices.len()
    }
}

/// A polygon mesh that exclusively owns its vertices, edges and faces.
#[derive(Debug, Clone)]
pub struct PolyMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) edges: Vec<Edge<I>>,
    pub(crate) faces: Vec<Face<I>>,

    /// The face arity this mesh was built for.
    pub(crate) vertices_per_face: usize,

    /// Flattened buffers from the last `update_render_buffers` call.
    pub(crate) render: Option<RenderBuffers>,
}

impl<I: MeshIndex> Default for PolyMesh<I> {
    fn default() -> Self {
        Self::new(4)
    }
}

impl<I: MeshIndex> PolyMesh<I> {
    /// Create an empty mesh meant to hold faces with `vertices_per_face` corners.
    pub fn new(vertices_per_face: usize) -> Self {
        Self::with_capacity(vertices_per_face, 0, 0)
    }

    /// Create an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertices_per_face: usize, num_vertices: usize, num_faces: usize) -> Self {
        // Closed quad mesh: E = 2F; closed triangle mesh: E = 3F/2.
        let num_edges = num_faces * vertices_per_face.max(3) / 2 + 1;

        Self {
            vertices: Vec::with_capacity(num_vertices),
            edges: Vec::with_capacity(num_edges),
            faces: Vec::with_capacity(num_faces),
            vertices_per_face,
            render: None,
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// The face arity this mesh was built for (3 or 4).
    #[inline]
    pub fn vertices_per_face(&self) -> usize {
        self.vertices_per_face
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Move a vertex. Invalidates cached render buffers.
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertices[v.index()].position = pos;
        self.render = None;
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<I>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all edges with their IDs.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId<I>, &Edge<I>)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId::new(i), e))
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    // ==================== Construction ====================

    /// Fail if `count` elements of one kind do not fit in the index type `I`.
    pub fn check_capacity(element: &'static str, count: usize) -> Result<()> {
        if count > I::MAX_ELEMENTS {
            return Err(MeshError::CapacityExceeded {
                element,
                count,
                max: I::MAX_ELEMENTS,
                index_type: I::NAME,
            });
        }
        Ok(())
    }

    /// Append a vertex with a zero normal and no connectivity.
    ///
    /// The returned ID equals the previous vertex count and never changes.
    /// Fails with [`MeshError::CapacityExceeded`] once the index type is full.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> Result<VertexId<I>> {
        Self::check_capacity("vertices", self.vertices.len() + 1)?;
        Ok(self.push_vertex(position))
    }

    /// Append a vertex without the capacity check. The caller has already
    /// checked the final vertex count.
    pub(crate) fn push_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        self.render = None;
        id
    }

    /// Find the edge joining `v1` and `v2`, in either direction.
    pub fn find_edge(&self, v1: VertexId<I>, v2: VertexId<I>) -> Option<EdgeId<I>> {
        self.vertex(v1)
            .edges
            .iter()
            .copied()
            .find(|&e| self.edge(e).touches(v2))
    }

    /// Return the edge joining `v1` and `v2`, creating and registering it if absent.
    fn connect_edge(&mut self, v1: VertexId<I>, v2: VertexId<I>) -> EdgeId<I> {
        if let Some(e) = self.find_edge(v1, v2) {
            return e;
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge {
            vertices: [v1, v2],
            faces: Vec::new(),
        });
        self.vertices[v1.index()].edges.push(id);
        self.vertices[v2.index()].edges.push(id);
        id
    }

    /// Add a face from an ordered list of vertex indices.
    ///
    /// Consecutive vertices (wrapping around) are joined by edges, reusing an
    /// existing edge when two faces share a vertex pair. The face is
    /// registered on each of its vertices and edges.
    ///
    /// The input is validated before anything is modified, so on error the
    /// mesh is unchanged.
    pub fn add_face(&mut self, indices: &[usize]) -> Result<FaceId<I>> {
        let face_index = self.faces.len();

        if indices.len() < 3 {
            return Err(MeshError::DegenerateFace {
                face: face_index,
                reason: "fewer than three vertices",
            });
        }
        for (i, &vi) in indices.iter().enumerate() {
            if vi >= self.vertices.len() {
                return Err(MeshError::InvalidVertexIndex {
                    face: face_index,
                    vertex: vi,
                });
            }
            if indices[..i].contains(&vi) {
                return Err(MeshError::DegenerateFace {
                    face: face_index,
                    reason: "repeated vertex",
                });
            }
        }

        let n = indices.len();
        Self::check_capacity("faces", face_index + 1)?;
        let new_edges = (0..n)
            .filter(|&i| {
                let v1 = VertexId::new(indices[i]);
                let v2 = VertexId::new(indices[(i + 1) % n]);
                self.find_edge(v1, v2).is_none()
            })
            .count();
        Self::check_capacity("edges", self.edges.len() + new_edges)?;

        let face_id = FaceId::new(face_index);
        let mut vertices = Vec::with_capacity(n);
        let mut edges = Vec::with_capacity(n);

        for i in 0..n {
            let v1 = VertexId::new(indices[i]);
            let v2 = VertexId::new(indices[(i + 1) % n]);

            self.vertices[v1.index()].faces.push(face_id);
            let e = self.connect_edge(v1, v2);
            self.edges[e.index()].faces.push(face_id);

            vertices.push(v1);
            edges.push(e);
        }

        self.faces.push(Face {
            vertices,
            edges,
            normal: Vector3::zeros(),
        });
        self.render = None;
        Ok(face_id)
    }

    // ==================== Topology Queries ====================

    /// An edge with exactly one incident face lies on a hole.
    #[inline]
    pub fn is_hole_edge(&self, e: EdgeId<I>) -> bool {
        self.edge(e).faces.len() == 1
    }

    /// A vertex whose face count differs from its edge count lies on a hole.
    #[inline]
    pub fn is_hole_vertex(&self, v: VertexId<I>) -> bool {
        let vertex = self.vertex(v);
        vertex.faces.len() != vertex.edges.len()
    }

    /// Number of faces incident to a vertex.
    #[inline]
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex(v).faces.len()
    }

    /// Whether every edge is shared by exactly two faces.
    pub fn is_closed(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(|e| e.faces.len() == 2)
    }

    /// Whether every edge is shared by one or two faces.
    pub fn is_manifold(&self) -> bool {
        self.edges.iter().all(|e| matches!(e.faces.len(), 1 | 2))
    }

    /// `V - E + F`.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edges.len() as i64 + self.faces.len() as i64
    }

    // ==================== Geometry ====================

    /// Midpoint of an edge.
    pub fn edge_midpoint(&self, e: EdgeId<I>) -> Point3<f64> {
        let [a, b] = self.edge(e).vertices;
        midpoint(self.position(a), self.position(b))
    }

    /// Unweighted average of a face's corner positions.
    pub fn face_centroid(&self, f: FaceId<I>) -> Point3<f64> {
        // Faces always have at least three corners.
        centroid(self.face(f).vertices.iter().map(|&v| self.position(v)))
            .unwrap_or_else(Point3::origin)
    }

    /// Axis-aligned bounding box, or `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?.position;
        let mut min = first;
        let mut max = first;

        for v in &self.vertices[1..] {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }

        Some((min, max))
    }

    /// Whether every face has `n` corners.
    pub fn is_uniform(&self, n: usize) -> bool {
        self.faces.iter().all(|f| f.vertices.len() == n)
    }
}
