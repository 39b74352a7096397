//! Catmull-Clark subdivision for triangle and quad meshes.

use nalgebra::{Point3, Vector3};

use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{EdgeId, FaceId, MeshIndex, NormalOptions, PolyMesh, VertexId};

use super::SubdivideOptions;

/// Face point: the unweighted centroid of the face's corners.
pub fn face_point_position<I: MeshIndex>(mesh: &PolyMesh<I>, f: FaceId<I>) -> Point3<f64> {
    mesh.face_centroid(f)
}

/// Edge point: average of the two endpoints and the face points of every
/// face sharing the edge, i.e. divided by `faces + 2`.
///
/// A hole edge therefore averages three points instead of four.
pub fn edge_point_position<I: MeshIndex>(mesh: &PolyMesh<I>, e: EdgeId<I>) -> Point3<f64> {
    let edge = mesh.edge(e);
    let face_points = edge
        .faces()
        .iter()
        .map(|&f| face_point_position(mesh, f));
    average_edge_point(mesh, e, face_points)
}

/// Vertex point: the new location of an original vertex.
///
/// - Interior vertex of valence `n`: `(Q + 2R + (n - 3)S) / n`, where `Q` is
///   the average of the incident face points, `R` the average of the
///   incident edge midpoints and `S` the original position.
/// - Hole vertex: average of the midpoints of its incident hole edges
///   together with its own position. This is a plain average, not the
///   weighted `3/4, 1/8, 1/8` boundary mask.
///
/// Fails for a vertex with no incident faces.
pub fn vertex_point_position<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    v: VertexId<I>,
) -> Result<Point3<f64>> {
    let face_points = mesh
        .vertex(v)
        .faces()
        .iter()
        .map(|&f| face_point_position(mesh, f));
    average_vertex_point(mesh, v, face_points)
}

fn average_edge_point<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    e: EdgeId<I>,
    face_points: impl Iterator<Item = Point3<f64>>,
) -> Point3<f64> {
    let [a, b] = mesh.edge(e).vertices();
    let mut sum = mesh.position(a).coords + mesh.position(b).coords;
    let mut count = 2usize;
    for p in face_points {
        sum += p.coords;
        count += 1;
    }
    Point3::from(sum / count as f64)
}

fn average_vertex_point<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    v: VertexId<I>,
    face_points: impl Iterator<Item = Point3<f64>>,
) -> Result<Point3<f64>> {
    let vertex = mesh.vertex(v);
    let s = vertex.position.coords;

    if mesh.is_hole_vertex(v) {
        let mut sum = s;
        let mut count = 1usize;
        for &e in vertex.edges() {
            if mesh.is_hole_edge(e) {
                sum += mesh.edge_midpoint(e).coords;
                count += 1;
            }
        }
        return Ok(Point3::from(sum / count as f64));
    }

    let n = vertex.faces().len();
    if n == 0 {
        return Err(MeshError::degenerate(v, "vertex has no incident faces"));
    }
    let n_f = n as f64;

    let q: Vector3<f64> = face_points.map(|p| p.coords).sum::<Vector3<f64>>() / n_f;
    let r: Vector3<f64> = vertex
        .edges()
        .iter()
        .map(|&e| mesh.edge_midpoint(e).coords)
        .sum::<Vector3<f64>>()
        / n_f;

    Ok(Point3::from((q + r * 2.0 + s * (n_f - 3.0)) / n_f))
}

/// One Catmull-Clark pass in progress.
///
/// Holds the source mesh, the refined mesh being built, and for every source
/// vertex, edge and face the ID of the point already created for it in the
/// refined mesh. Each point is created on first request and returned as-is
/// afterwards, so neighbouring sub-faces share the same refined vertex.
#[derive(Debug)]
pub struct Refinement<'a, I: MeshIndex = u32> {
    source: &'a PolyMesh<I>,
    target: PolyMesh<I>,
    face_points: Vec<Option<VertexId<I>>>,
    edge_points: Vec<Option<VertexId<I>>>,
    vertex_points: Vec<Option<VertexId<I>>>,
}

impl<'a, I: MeshIndex> Refinement<'a, I> {
    /// Start a pass over `source`.
    ///
    /// Fails with [`MeshError::CapacityExceeded`] if the refined mesh would
    /// not fit in the index type `I`.
    pub fn new(source: &'a PolyMesh<I>) -> Result<Self> {
        // Every source vertex, edge and face yields one refined vertex; every
        // edge splits in two and every corner adds one quad and one inner edge.
        let num_vertices = source.num_vertices() + source.num_edges() + source.num_faces();
        let num_faces: usize = source.faces().map(|(_, f)| f.arity()).sum();
        let num_edges = 2 * source.num_edges() + num_faces;

        PolyMesh::<I>::check_capacity("vertices", num_vertices)?;
        PolyMesh::<I>::check_capacity("edges", num_edges)?;
        PolyMesh::<I>::check_capacity("faces", num_faces)?;

        Ok(Self {
            source,
            target: PolyMesh::with_capacity(4, num_vertices, num_faces),
            face_points: vec![None; source.num_faces()],
            edge_points: vec![None; source.num_edges()],
            vertex_points: vec![None; source.num_vertices()],
        })
    }

    /// The mesh being refined.
    pub fn source(&self) -> &'a PolyMesh<I> {
        self.source
    }

    /// The refined mesh built so far.
    pub fn target(&self) -> &PolyMesh<I> {
        &self.target
    }

    /// Refined vertex for the face point of `f`.
    pub fn face_point(&mut self, f: FaceId<I>) -> VertexId<I> {
        if let Some(id) = self.face_points[f.index()] {
            return id;
        }
        let id = self.target.push_vertex(face_point_position(self.source, f));
        self.face_points[f.index()] = Some(id);
        id
    }

    /// Refined vertex for the edge point of `e`.
    pub fn edge_point(&mut self, e: EdgeId<I>) -> VertexId<I> {
        if let Some(id) = self.edge_points[e.index()] {
            return id;
        }
        let source = self.source;
        let face_ids: Vec<VertexId<I>> = source
            .edge(e)
            .faces()
            .iter()
            .map(|&f| self.face_point(f))
            .collect();
        let position = average_edge_point(
            source,
            e,
            face_ids.iter().map(|&id| *self.target.position(id)),
        );

        let id = self.target.push_vertex(position);
        self.edge_points[e.index()] = Some(id);
        id
    }

    /// Refined vertex for the vertex point of `v`.
    pub fn vertex_point(&mut self, v: VertexId<I>) -> Result<VertexId<I>> {
        if let Some(id) = self.vertex_points[v.index()] {
            return Ok(id);
        }
        let source = self.source;
        let face_ids: Vec<VertexId<I>> = source
            .vertex(v)
            .faces()
            .iter()
            .map(|&f| self.face_point(f))
            .collect();
        let position = average_vertex_point(
            source,
            v,
            face_ids.iter().map(|&id| *self.target.position(id)),
        )?;

        let id = self.target.push_vertex(position);
        self.vertex_points[v.index()] = Some(id);
        Ok(id)
    }

    /// Split one source face into one refined quad per corner.
    ///
    /// Corner `i` becomes `(vertex point, edge point towards i + 1, face
    /// point, edge point from i - 1)`, which keeps the source winding.
    pub fn refine_face(&mut self, f: FaceId<I>) -> Result<()> {
        let source = self.source;
        let corners = source.face(f).vertices();
        let n = corners.len();
        if n != 3 && n != 4 {
            return Err(MeshError::UnsupportedFaceArity {
                face: f.index(),
                arity: n,
            });
        }

        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            let a = corners[i];
            let b = corners[(i + 1) % n];
            let e = source.find_edge(a, b).ok_or(MeshError::MissingEdge {
                v0: a.index(),
                v1: b.index(),
            })?;
            edges.push(e);
        }

        let mut vertex_points = Vec::with_capacity(n);
        for &v in corners {
            vertex_points.push(self.vertex_point(v)?);
        }
        let edge_points: Vec<VertexId<I>> = edges.iter().map(|&e| self.edge_point(e)).collect();
        let face_point = self.face_point(f);

        for i in 0..n {
            let quad = [
                vertex_points[i].index(),
                edge_points[i].index(),
                face_point.index(),
                edge_points[(i + n - 1) % n].index(),
            ];
            self.target.add_face(&quad)?;
        }

        log::trace!(
            "{:?}: corners {:?} -> vertex points {:?}, edge points {:?}, face point {:?} at {:?}",
            f,
            corners,
            vertex_points,
            edge_points,
            face_point,
            self.target.position(face_point)
        );

        Ok(())
    }

    /// Finish the pass and take the refined mesh (normals not yet computed).
    pub fn finish(self) -> PolyMesh<I> {
        self.target
    }
}

/// Run one Catmull-Clark pass and return the refined mesh.
///
/// `mesh` is never modified. The result has normals computed per `normals`
/// and render buffers cached. Every face must be a triangle or a quad; the
/// first error aborts the pass and no partial mesh is returned.
pub fn subdivide<I: MeshIndex>(mesh: &PolyMesh<I>, normals: &NormalOptions) -> Result<PolyMesh<I>> {
    if mesh.num_faces() == 0 {
        return Err(MeshError::EmptyMesh);
    }

    let non_manifold = mesh.edges().filter(|(_, e)| e.faces().len() > 2).count();
    if non_manifold > 0 {
        log::warn!(
            "{} edges have more than two faces; refining them with the generic edge rule",
            non_manifold
        );
    }

    let mut refinement = Refinement::new(mesh)?;
    for f in mesh.face_ids() {
        refinement.refine_face(f)?;
    }
    let mut refined = refinement.finish();

    let report = refined.compute_normals(normals)?;
    if !report.is_clean() {
        log::warn!(
            "refined mesh has {} faces and {} vertices with zero normals",
            report.skipped_faces,
            report.skipped_vertices
        );
    }
    refined.update_render_buffers()?;

    log::info!(
        "Catmull-Clark: {} vertices, {} faces -> {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces(),
        refined.num_vertices(),
        refined.num_faces()
    );

    Ok(refined)
}

/// Performs Catmull-Clark subdivision on a triangle or quad mesh.
///
/// Runs `options.iterations` passes. `mesh` is replaced only if every pass
/// succeeds; on error it is left exactly as it was.
///
/// # Arguments
///
/// * `mesh` - The mesh to subdivide (replaced by the refined mesh)
/// * `options` - Subdivision parameters
pub fn catmull_clark_subdivide<I: MeshIndex>(
    mesh: &mut PolyMesh<I>,
    options: &SubdivideOptions,
) -> Result<()> {
    catmull_clark_subdivide_with_progress(mesh, options, &Progress::none())
}

/// Catmull-Clark subdivision with progress reporting (one step per pass).
pub fn catmull_clark_subdivide_with_progress<I: MeshIndex>(
    mesh: &mut PolyMesh<I>,
    options: &SubdivideOptions,
    progress: &Progress,
) -> Result<()> {
    if options.iterations == 0 {
        return Ok(());
    }

    let mut current: Option<PolyMesh<I>> = None;
    for iter in 0..options.iterations {
        progress.report(iter, options.iterations, "Catmull-Clark subdivision");
        let input = current.as_ref().unwrap_or(&*mesh);
        current = Some(subdivide(input, &options.normals)?);
    }
    progress.report(options.iterations, options.iterations, "Catmull-Clark subdivision");

    if let Some(refined) = current {
        *mesh = refined;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::shapes::{cube, donut, tetrahedron};
    use crate::mesh::{build_base_mesh, BaseShape};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const EPS: f64 = 1e-12;

    fn create_single_quad() -> PolyMesh {
        let mut mesh = PolyMesh::new(4);
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0)).unwrap();
        mesh.add_vertex(Point3::new(2.0, 0.0, 0.0)).unwrap();
        mesh.add_vertex(Point3::new(2.0, 2.0, 0.0)).unwrap();
        mesh.add_vertex(Point3::new(0.0, 2.0, 0.0)).unwrap();
        mesh.add_face(&[0, 1, 2, 3]).unwrap();
        mesh
    }

    fn options() -> NormalOptions {
        NormalOptions::default()
    }

    #[test]
    fn test_cube_counts() {
        let mesh: PolyMesh = build_base_mesh(BaseShape::Cube).unwrap();
        let refined = subdivide(&mesh, &options()).unwrap();

        // 8 vertex points + 12 edge points + 6 face points
        assert_eq!(refined.num_vertices(), 26);
        assert_eq!(refined.num_faces(), 24);
        assert_eq!(refined.num_edges(), 48);
        assert_eq!(refined.vertices_per_face(), 4);
        assert!(refined.is_uniform(4));
    }

    #[test]
    fn test_cube_twice() {
        let mut mesh: PolyMesh = build_base_mesh(BaseShape::Cube).unwrap();
        catmull_clark_subdivide(&mut mesh, &SubdivideOptions::new(2)).unwrap();

        assert_eq!(mesh.num_faces(), 96);
        assert_eq!(mesh.num_vertices(), 26 + 48 + 24);
        assert!(mesh.is_closed());
    }

    #[test]
    fn test_closed_meshes_stay_closed() {
        for shape in BaseShape::ALL {
            let mut mesh: PolyMesh = build_base_mesh(shape).unwrap();
            let euler = mesh.euler_characteristic();
            for _ in 0..2 {
                mesh = subdivide(&mesh, &options()).unwrap();
                assert!(mesh.is_closed(), "{} lost closure", shape);
                assert_eq!(mesh.euler_characteristic(), euler, "{}", shape);
            }
        }
    }

    #[test]
    fn test_face_and_vertex_count_laws() {
        let mesh: PolyMesh = donut().unwrap();
        let refined = subdivide(&mesh, &options()).unwrap();

        let expected_faces: usize = mesh.faces().map(|(_, f)| f.arity()).sum();
        assert_eq!(refined.num_faces(), expected_faces);
        assert_eq!(
            refined.num_vertices(),
            mesh.num_vertices() + mesh.num_edges() + mesh.num_faces()
        );
    }

    #[test]
    fn test_triangles_split_into_three_quads() {
        let mesh: PolyMesh = tetrahedron().unwrap();
        let refined = subdivide(&mesh, &options()).unwrap();

        assert_eq!(refined.num_faces(), 12);
        assert_eq!(refined.num_vertices(), 4 + 6 + 4);
        assert!(refined.is_uniform(4));
        assert!(refined.is_closed());
    }

    #[test]
    fn test_face_points_are_centroids() {
        let mesh: PolyMesh = cube().unwrap();
        let mut refinement = Refinement::new(&mesh).unwrap();

        for f in mesh.face_ids() {
            let id = refinement.face_point(f);
            let p = refinement.target().position(id);
            assert!((p - mesh.face_centroid(f)).norm() < EPS);
        }

        // The +Y face.
        let id = refinement.face_point(FaceId::new(3));
        assert!((refinement.target().position(id) - Point3::new(0.0, 1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_centroid_of_square() {
        let mesh = create_single_quad();
        let p = face_point_position(&mesh, FaceId::new(0));
        assert!((p - Point3::new(1.0, 1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_points_are_memoized() {
        let mesh: PolyMesh = cube().unwrap();
        let mut refinement = Refinement::new(&mesh).unwrap();

        let f1 = refinement.face_point(FaceId::new(0));
        let f2 = refinement.face_point(FaceId::new(0));
        assert_eq!(f1, f2);

        let e = mesh.find_edge(VertexId::new(0), VertexId::new(1)).unwrap();
        let e1 = refinement.edge_point(e);
        let e2 = refinement.edge_point(e);
        assert_eq!(e1, e2);

        let v1 = refinement.vertex_point(VertexId::new(7)).unwrap();
        let v2 = refinement.vertex_point(VertexId::new(7)).unwrap();
        assert_eq!(v1, v2);

        let before = refinement.target().num_vertices();
        refinement.face_point(FaceId::new(0));
        refinement.edge_point(e);
        refinement.vertex_point(VertexId::new(7)).unwrap();
        assert_eq!(refinement.target().num_vertices(), before);
    }

    #[test]
    fn test_adjacent_subfaces_share_edge_point() {
        let mesh: PolyMesh = cube().unwrap();
        let mut refinement = Refinement::new(&mesh).unwrap();
        refinement.refine_face(FaceId::new(0)).unwrap();
        refinement.refine_face(FaceId::new(1)).unwrap();

        // Faces 0 and 1 share edge 0-4; its point must be one vertex used by both.
        let e = mesh.find_edge(VertexId::new(0), VertexId::new(4)).unwrap();
        let shared = refinement.edge_point(e);
        let users = refinement
            .target()
            .faces()
            .filter(|(_, f)| f.vertices().contains(&shared))
            .count();
        assert_eq!(users, 4);
    }

    #[test]
    fn test_cube_edge_point() {
        let mesh: PolyMesh = cube().unwrap();
        // Edge (-1,-1,-1)-(-1,-1,1) between the -Y and -X faces.
        let e = mesh.find_edge(VertexId::new(0), VertexId::new(1)).unwrap();
        let p = edge_point_position(&mesh, e);
        assert!((p - Point3::new(-0.75, -0.75, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_valence_three_vertex_rule() {
        let mesh: PolyMesh = cube().unwrap();
        let v = VertexId::new(7);
        assert_eq!(mesh.valence(v), 3);
        assert!(!mesh.is_hole_vertex(v));

        let face_avg: Vector3<f64> = mesh
            .vertex(v)
            .faces()
            .iter()
            .map(|&f| mesh.face_centroid(f).coords)
            .sum::<Vector3<f64>>()
            / 3.0;
        let edge_avg: Vector3<f64> = mesh
            .vertex(v)
            .edges()
            .iter()
            .map(|&e| mesh.edge_midpoint(e).coords)
            .sum::<Vector3<f64>>()
            / 3.0;

        // n = 3: the original position drops out.
        let expected = face_avg / 3.0 + edge_avg * 2.0 / 3.0;
        let p = vertex_point_position(&mesh, v).unwrap();
        assert!((p.coords - expected).norm() < EPS);
        assert!((p - Point3::new(5.0 / 9.0, 5.0 / 9.0, 5.0 / 9.0)).norm() < EPS);
    }

    #[test]
    fn test_interior_vertex_valence_four() {
        // A 3x3 grid of unit quads; vertex 5 is the interior one at (1, 1).
        let mut mesh: PolyMesh = PolyMesh::new(4);
        for y in 0..4 {
            for x in 0..4 {
                mesh.add_vertex(Point3::new(x as f64, y as f64, 0.0)).unwrap();
            }
        }
        for y in 0..3 {
            for x in 0..3 {
                let v = y * 4 + x;
                mesh.add_face(&[v, v + 1, v + 5, v + 4]).unwrap();
            }
        }

        let v = VertexId::new(5);
        assert_eq!(mesh.valence(v), 4);
        assert!(!mesh.is_hole_vertex(v));

        // Flat regular grid: the vertex point is the vertex itself.
        let p = vertex_point_position(&mesh, v).unwrap();
        assert!((p - Point3::new(1.0, 1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_hole_vertex_rule() {
        let mesh = create_single_quad();
        for v in mesh.vertex_ids() {
            assert!(mesh.is_hole_vertex(v));
        }

        // (self + two hole-edge midpoints) / 3. The weighted boundary mask
        // would give (0.25, 0.25, 0) here instead.
        let p = vertex_point_position(&mesh, VertexId::new(0)).unwrap();
        assert!((p - Point3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_hole_edge_point() {
        let mesh = create_single_quad();
        let e = mesh.find_edge(VertexId::new(0), VertexId::new(1)).unwrap();
        assert!(mesh.is_hole_edge(e));

        // (face point + both endpoints) / 3
        let p = edge_point_position(&mesh, e);
        assert!((p - Point3::new(1.0, 1.0 / 3.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_single_quad_subdivision() {
        let mesh = create_single_quad();
        let refined = subdivide(&mesh, &options()).unwrap();

        assert_eq!(refined.num_faces(), 4);
        assert_eq!(refined.num_vertices(), 9);
        assert_eq!(refined.num_edges(), 12);
        assert!(refined.is_manifold());
        assert!(!refined.is_closed());
    }

    #[test]
    fn test_refined_mesh_has_buffers() {
        let mesh: PolyMesh = build_base_mesh(BaseShape::Donut).unwrap();
        let refined = subdivide(&mesh, &options()).unwrap();

        let buffers = refined.render_buffers().unwrap();
        assert_eq!(buffers.vertex_count(), 64);
        assert_eq!(buffers.triangle_count(), 128);
        for r in buffers.records() {
            let len: f32 = r.normal.iter().map(|c| c * c).sum::<f32>().sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_unsupported_arity_leaves_mesh_untouched() {
        let mut mesh: PolyMesh = cube().unwrap();
        for i in 0..5 {
            let a = i as f64 * std::f64::consts::TAU / 5.0;
            mesh.add_vertex(Point3::new(a.cos() + 5.0, a.sin(), 0.0)).unwrap();
        }
        mesh.add_face(&[8, 9, 10, 11, 12]).unwrap();
        let faces_before = mesh.num_faces();

        let result = catmull_clark_subdivide(&mut mesh, &SubdivideOptions::new(2));
        assert!(matches!(
            result,
            Err(MeshError::UnsupportedFaceArity { face: 6, arity: 5 })
        ));
        assert_eq!(mesh.num_faces(), faces_before);
        assert_eq!(mesh.num_vertices(), 13);
    }

    #[test]
    fn test_missing_edge_is_reported() {
        let mut mesh = create_single_quad();
        // Break the 0-1 edge lookup from vertex 0's side.
        mesh.vertices[0].edges.retain(|&e| !mesh.edges[e.index()].touches(VertexId::new(1)));

        let err = subdivide(&mesh, &options()).unwrap_err();
        assert!(matches!(err, MeshError::MissingEdge { v0: 0, v1: 1 }));
        assert!(err.is_topology_error());
    }

    #[test]
    fn test_isolated_vertex_is_dropped() {
        let mut mesh: PolyMesh = cube().unwrap();
        mesh.add_vertex(Point3::new(9.0, 9.0, 9.0)).unwrap();

        let refined = subdivide(&mesh, &options()).unwrap();
        assert_eq!(refined.num_vertices(), 26);

        let err = vertex_point_position(&mesh, VertexId::new(8)).unwrap_err();
        assert!(matches!(err, MeshError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = PolyMesh::<u32>::new(4);
        assert!(matches!(
            subdivide(&mesh, &options()),
            Err(MeshError::EmptyMesh)
        ));
    }

    #[test]
    fn test_small_index_overflow_is_rejected() {
        // Donut passes give 16 * 4^k vertices; the sixth needs 65536, one
        // more than u16 can address.
        let mut mesh: PolyMesh<u16> = build_base_mesh(BaseShape::Donut).unwrap();
        let result = catmull_clark_subdivide(&mut mesh, &SubdivideOptions::new(6));

        assert!(matches!(
            result,
            Err(MeshError::CapacityExceeded {
                element: "vertices",
                count: 65536,
                max: 65535,
                index_type: "u16",
            })
        ));
        assert_eq!(mesh.num_faces(), 16);
        assert!(mesh.is_closed());

        // Five passes still fit and stay closed.
        catmull_clark_subdivide(&mut mesh, &SubdivideOptions::new(5)).unwrap();
        assert_eq!(mesh.num_vertices(), 16 * 1024);
        assert!(mesh.is_closed());
        assert!(Refinement::new(&mesh).is_err());
    }

    #[test]
    fn test_tiny_cube_subdivides() {
        let mut mesh: PolyMesh = cube().unwrap();
        for v in mesh.vertex_ids().collect::<Vec<_>>() {
            let p = *mesh.position(v);
            mesh.set_position(v, Point3::from(p.coords * 1e-6));
        }

        let refined = subdivide(&mesh, &options()).unwrap();
        assert_eq!(refined.num_faces(), 24);
        for (_, face) in refined.faces() {
            assert!((face.normal.norm() - 1.0).abs() < 1e-9);
        }
        for (_, v) in refined.vertices() {
            assert!((v.normal.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_iterations() {
        let mut mesh: PolyMesh = cube().unwrap();
        catmull_clark_subdivide(&mut mesh, &SubdivideOptions::new(0)).unwrap();
        assert_eq!(mesh.num_faces(), 6);
        assert_eq!(mesh.num_vertices(), 8);
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let mut a: PolyMesh = cube().unwrap();
        let mut b = a.clone();
        catmull_clark_subdivide(&mut a, &SubdivideOptions::new(2)).unwrap();
        catmull_clark_subdivide(&mut b, &SubdivideOptions::new(2).sequential()).unwrap();

        assert_eq!(a.render_buffers(), b.render_buffers());
    }

    #[test]
    fn test_progress_reports_each_pass() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let progress = Progress::new(move |_, _, _| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let mut mesh: PolyMesh = cube().unwrap();
        catmull_clark_subdivide_with_progress(&mut mesh, &SubdivideOptions::new(3), &progress)
            .unwrap();

        // One report per pass plus the final one.
        assert_eq!(calls.load(Ordering::Relaxed), 4);
        assert_eq!(mesh.num_faces(), 6 * 64);
    }

    #[test]
    fn test_closed_mesh_shrinks_toward_center() {
        let mut mesh: PolyMesh = cube().unwrap();
        catmull_clark_subdivide(&mut mesh, &SubdivideOptions::new(2)).unwrap();

        for (_, v) in mesh.vertices() {
            let p = v.position;
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0 && p.z.abs() <= 1.0);
        }
        let (min, max) = mesh.bounding_box().unwrap();
        assert!(max.x < 1.0 && min.x > -1.0);
    }
}
