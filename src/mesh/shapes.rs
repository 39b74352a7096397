//! Built-in base meshes.
//!
//! These seed the subdivision pipeline with known closed surfaces. All of
//! them are wound so that face normals point outward.

use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;

use super::index::MeshIndex;
use super::normals::NormalOptions;
use super::polymesh::PolyMesh;
use crate::error::{MeshError, Result};

/// The built-in shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseShape {
    /// Axis-aligned cube with corners at `(±1, ±1, ±1)`; 6 quads.
    Cube,
    /// Square torus; 16 quads around a square hole.
    Donut,
    /// Regular tetrahedron inscribed in the cube; 4 triangles.
    Tetrahedron,
}

impl BaseShape {
    /// All shapes, in declaration order.
    pub const ALL: [BaseShape; 3] = [BaseShape::Cube, BaseShape::Donut, BaseShape::Tetrahedron];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            BaseShape::Cube => "cube",
            BaseShape::Donut => "donut",
            BaseShape::Tetrahedron => "tetrahedron",
        }
    }
}

impl fmt::Display for BaseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BaseShape {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        BaseShape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MeshError::invalid_param("shape", s, "expected cube, donut or tetrahedron"))
    }
}

/// Build a shape with normals computed and render buffers cached.
pub fn build_base_mesh<I: MeshIndex>(shape: BaseShape) -> Result<PolyMesh<I>> {
    let mut mesh = match shape {
        BaseShape::Cube => cube()?,
        BaseShape::Donut => donut()?,
        BaseShape::Tetrahedron => tetrahedron()?,
    };
    mesh.compute_normals(&NormalOptions::default())?;
    mesh.update_render_buffers()?;
    Ok(mesh)
}

fn from_lists<I: MeshIndex>(
    vertices_per_face: usize,
    positions: &[[f64; 3]],
    faces: &[&[usize]],
) -> Result<PolyMesh<I>> {
    let mut mesh = PolyMesh::with_capacity(vertices_per_face, positions.len(), faces.len());
    for &[x, y, z] in positions {
        mesh.add_vertex(Point3::new(x, y, z))?;
    }
    for face in faces {
        mesh.add_face(face)?;
    }
    Ok(mesh)
}

/// Cube topology only (no normals yet).
///
/// Vertex `i` sits at `(x, y, z)` with `x` from bit 2, `y` from bit 1 and
/// `z` from bit 0 of `i` (0 -> -1, 1 -> +1).
pub fn cube<I: MeshIndex>() -> Result<PolyMesh<I>> {
    let mut positions = Vec::with_capacity(8);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                positions.push([x, y, z]);
            }
        }
    }

    from_lists(
        4,
        &positions,
        &[
            &[0, 2, 6, 4], // -Z
            &[0, 4, 5, 1], // -Y
            &[0, 1, 3, 2], // -X
            &[2, 3, 7, 6], // +Y
            &[6, 7, 5, 4], // +X
            &[1, 5, 7, 3], // +Z
        ],
    )
}

/// Square torus topology only (no normals yet).
///
/// Four rings of four vertices: outer top, outer bottom, inner top, inner
/// bottom. Each of the four segments between consecutive corners carries a
/// top, bottom, outer and inner quad.
pub fn donut<I: MeshIndex>() -> Result<PolyMesh<I>> {
    const OUTER: f64 = 1.5;
    const INNER: f64 = 0.75;
    const HALF_HEIGHT: f64 = 0.5;
    // Corners walked so that top faces wind counter-clockwise seen from +Y.
    const CORNERS: [[f64; 2]; 4] = [[-1.0, -1.0], [-1.0, 1.0], [1.0, 1.0], [1.0, -1.0]];

    let mut positions = Vec::with_capacity(16);
    for (radius, y) in [
        (OUTER, HALF_HEIGHT),
        (OUTER, -HALF_HEIGHT),
        (INNER, HALF_HEIGHT),
        (INNER, -HALF_HEIGHT),
    ] {
        for [cx, cz] in CORNERS {
            positions.push([cx * radius, y, cz * radius]);
        }
    }

    let outer_top = |i: usize| i % 4;
    let outer_bottom = |i: usize| 4 + i % 4;
    let inner_top = |i: usize| 8 + i % 4;
    let inner_bottom = |i: usize| 12 + i % 4;

    let mut faces: Vec<[usize; 4]> = Vec::with_capacity(16);
    for i in 0..4 {
        let j = i + 1;
        faces.push([outer_top(i), outer_top(j), inner_top(j), inner_top(i)]);
        faces.push([outer_bottom(i), inner_bottom(i), inner_bottom(j), outer_bottom(j)]);
        faces.push([outer_top(i), outer_bottom(i), outer_bottom(j), outer_top(j)]);
        faces.push([inner_top(i), inner_top(j), inner_bottom(j), inner_bottom(i)]);
    }

    let face_refs: Vec<&[usize]> = faces.iter().map(|f| f.as_slice()).collect();
    from_lists(4, &positions, &face_refs)
}

/// Tetrahedron topology only (no normals yet).
pub fn tetrahedron<I: MeshIndex>() -> Result<PolyMesh<I>> {
    from_lists(
        3,
        &[
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ],
        &[&[0, 1, 2], &[0, 3, 1], &[0, 2, 3], &[1, 3, 2]],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::index::FaceId;

    #[test]
    fn test_cube_is_closed() {
        let mesh: PolyMesh = cube().unwrap();
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_edges(), 12);
        assert_eq!(mesh.num_faces(), 6);
        assert!(mesh.is_closed());
        assert_eq!(mesh.euler_characteristic(), 2);

        for v in mesh.vertex_ids() {
            assert!(!mesh.is_hole_vertex(v));
            assert_eq!(mesh.valence(v), 3);
        }
    }

    #[test]
    fn test_cube_plus_y_face() {
        let mesh: PolyMesh = cube().unwrap();
        let c = mesh.face_centroid(FaceId::new(3));
        assert!((c - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_donut_is_closed_torus() {
        let mesh: PolyMesh = donut().unwrap();
        assert_eq!(mesh.num_vertices(), 16);
        assert_eq!(mesh.num_edges(), 32);
        assert_eq!(mesh.num_faces(), 16);
        assert!(mesh.is_closed());
        assert_eq!(mesh.euler_characteristic(), 0);
    }

    #[test]
    fn test_donut_normals_point_away_from_tube() {
        let mut mesh: PolyMesh = donut().unwrap();
        mesh.compute_normals(&NormalOptions::default()).unwrap();

        // The tube's square cross-section is centred on the ring midway
        // between the inner and outer walls.
        for (f, face) in mesh.faces() {
            let c = mesh.face_centroid(f);
            let radial = nalgebra::Vector3::new(c.x, 0.0, c.z);
            let axis = if c.x.abs() > c.z.abs() {
                nalgebra::Vector3::new(c.x.signum(), 0.0, 0.0)
            } else {
                nalgebra::Vector3::new(0.0, 0.0, c.z.signum())
            };
            let tube_center = axis * 1.125 + (radial - axis * radial.dot(&axis));
            let outward = c.coords - tube_center;
            assert!(face.normal.dot(&outward) > 0.0, "{:?}", f);
        }
    }

    #[test]
    fn test_tetrahedron_is_closed() {
        let mesh: PolyMesh = tetrahedron().unwrap();
        assert_eq!(mesh.num_edges(), 6);
        assert!(mesh.is_closed());
        assert!(mesh.is_uniform(3));
        assert_eq!(mesh.euler_characteristic(), 2);
    }

    #[test]
    fn test_build_base_mesh_caches_buffers() {
        for shape in BaseShape::ALL {
            let mesh: PolyMesh = build_base_mesh(shape).unwrap();
            let buffers = mesh.render_buffers().unwrap();
            assert_eq!(buffers.vertex_count(), mesh.num_vertices());
        }
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("Donut".parse::<BaseShape>().unwrap(), BaseShape::Donut);
        assert!("sphere".parse::<BaseShape>().is_err());
    }
}
