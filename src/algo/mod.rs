//! Mesh processing algorithms.
//!
//! - **Subdivision**: Catmull-Clark refinement of triangle and quad meshes
//! - **Progress**: callback-based reporting for multi-pass runs

mod progress;
pub mod subdivide;

pub use progress::Progress;
