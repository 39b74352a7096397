//! Mesh subdivision.
//!
//! # Catmull-Clark Subdivision
//!
//! Catmull-Clark subdivision (Catmull & Clark, 1978) refines a polygon mesh
//! into an all-quad mesh. Each pass:
//!
//! 1. Creates a face point at each face centroid
//! 2. Creates an edge point averaging the edge's endpoints and the face
//!    points of the faces sharing it
//! 3. Moves each original vertex to its vertex point
//! 4. Splits every face into one quad per corner: a triangle yields 3
//!    quads, a quad yields 4
//!
//! A pass builds a brand-new mesh and never modifies its input. Any
//! topology or geometry error aborts the whole pass.
//!
//! # Example
//!
//! ```
//! use crumb::prelude::*;
//! use crumb::algo::subdivide::{catmull_clark_subdivide, SubdivideOptions};
//!
//! let mut mesh: PolyMesh = build_base_mesh(BaseShape::Cube).unwrap();
//! catmull_clark_subdivide(&mut mesh, &SubdivideOptions::new(2)).unwrap();
//!
//! assert_eq!(mesh.num_faces(), 96);
//! let buffers = mesh.render_buffers().unwrap();
//! assert_eq!(buffers.triangle_count(), 192);
//! ```
//!
//! # References
//!
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod catmull_clark;

pub use catmull_clark::{
    catmull_clark_subdivide, catmull_clark_subdivide_with_progress, edge_point_position,
    face_point_position, subdivide, vertex_point_position, Refinement,
};

use crate::mesh::{DegeneratePolicy, NormalOptions};

/// Options for subdivision.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Number of subdivision passes.
    pub iterations: usize,

    /// Normal computation for each refined mesh.
    pub normals: NormalOptions,
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SubdivideOptions {
    /// Create options with the specified number of passes.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            normals: NormalOptions::default(),
        }
    }

    /// Set how zero-length normals on the refined mesh are handled.
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.normals.degenerate = policy;
        self
    }

    /// Set whether normal computation runs in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.normals.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.normals.parallel = false;
        self
    }
}
