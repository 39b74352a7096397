//! Index types for mesh elements.
//!
//! Vertices, edges and faces live in dense arrays owned by a
//! [`PolyMesh`](super::PolyMesh) and refer to each other through these
//! typed indices instead of references. The underlying integer type is
//! generic so small meshes can use `u16` and very large ones `u64`.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Integer types usable as the storage of a mesh index.
pub trait MeshIndex: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Sentinel marking an element that is not part of any mesh.
    const INVALID: Self;

    /// Most elements of one kind a mesh can hold; valid indices are
    /// `0..MAX_ELEMENTS`.
    const MAX_ELEMENTS: usize;

    /// Type name used in error messages.
    const NAME: &'static str;

    /// Convert from usize to this index type.
    ///
    /// Callers keep `v` below [`MAX_ELEMENTS`](Self::MAX_ELEMENTS); mesh
    /// construction enforces this.
    ///
    /// # Panics
    /// Panics in debug builds if the value does not fit.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;
}

macro_rules! impl_mesh_index {
    ($($t:ty),*) => {$(
        impl MeshIndex for $t {
            const INVALID: Self = <$t>::MAX;
            const MAX_ELEMENTS: usize = if (<$t>::MAX as u128) < (usize::MAX as u128) {
                <$t>::MAX as usize
            } else {
                usize::MAX
            };
            const NAME: &'static str = stringify!($t);

            #[inline]
            fn from_usize(v: usize) -> Self {
                debug_assert!(
                    (v as u128) < <$t>::MAX as u128,
                    "index {} too large for {}",
                    v,
                    stringify!($t)
                );
                v as $t
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    )*};
}

impl_mesh_index!(u16, u32, u64);

/// Index of a vertex within its mesh.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// Index of an (undirected) edge within its mesh.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId<I: MeshIndex = u32>(I);

/// Index of a face within its mesh.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

macro_rules! impl_id {
    ($name:ident, $tag:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Wrap a raw array position.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// The "not inserted" sentinel.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Position in the owning mesh's array.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Whether this id refers to an inserted element.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != I::INVALID
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($tag, "({})"), self.index())
                } else {
                    f.write_str(concat!($tag, "(INVALID)"))
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_id!(VertexId, "V");
impl_id!(EdgeId, "E");
impl_id!(FaceId, "F");
