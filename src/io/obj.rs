//! Wavefront OBJ export.
//!
//! Writes positions (`v`), vertex normals (`vn`) and polygon faces using the
//! `f v//vn` form. Indices are 1-based and each vertex shares its index with
//! its normal.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{MeshIndex, PolyMesh};

/// Write a mesh in OBJ format to any writer.
pub fn write<I: MeshIndex, W: Write>(mesh: &PolyMesh<I>, mut writer: W) -> Result<()> {
    writeln!(writer, "# Generated by crumb")?;
    writeln!(
        writer,
        "# {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    )?;

    for (_, v) in mesh.vertices() {
        let p = v.position;
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for (_, v) in mesh.vertices() {
        let n = v.normal;
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    for (_, face) in mesh.faces() {
        write!(writer, "f")?;
        for &v in face.vertices() {
            let i = v.index() + 1;
            write!(writer, " {}//{}", i, i)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save a mesh to an OBJ file.
///
/// # Example
///
/// ```no_run
/// use crumb::io::obj;
/// use crumb::mesh::{build_base_mesh, BaseShape, PolyMesh};
///
/// let mesh: PolyMesh = build_base_mesh(BaseShape::Cube).unwrap();
/// obj::save(&mesh, "cube.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &PolyMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let save_error = |err: std::io::Error| MeshError::SaveError {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let file = File::create(path).map_err(save_error)?;
    write(mesh, BufWriter::new(file)).map_err(|e| match e {
        MeshError::Io(err) => save_error(err),
        other => other,
    })
}
