//! Index types for mesh elements.
//!
//! This module provides type-safe handles for half-edges, vertices, edges,
//! faces and holes. Every handle wraps the same fixed-width signed [`Index`];
//! the value [`INVALID_INDEX`] is reserved as the null sentinel.
//!
//! Handles are plain values. Constructing one never checks it against a mesh,
//! and the mesh accessors that take handles never validate them either:
//! passing an invalid handle to an accessor is a caller bug.

use std::fmt::{self, Debug};

/// The internal index type used by all mesh storage.
pub type Index = i32;

/// Sentinel value for a missing element.
pub const INVALID_INDEX: Index = -1;

/// Largest element count addressable with [`Index`].
pub const MAX_ELEMENTS: usize = Index::MAX as usize;

/// A type-safe half-edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId(Index);

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(Index);

/// A type-safe edge index (for full edges, not half-edges).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId(Index);

/// A type-safe face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId(Index);

/// A type-safe hole (boundary loop) index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HoleId(Index);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= MAX_ELEMENTS, "index {} too large", index);
                Self(index as Index)
            }

            /// Wrap a raw stored value without checking it.
            #[inline]
            pub const fn from_raw(raw: Index) -> Self {
                Self(raw)
            }

            /// Create an invalid/null index.
            #[inline]
            pub const fn invalid() -> Self {
                Self(INVALID_INDEX)
            }

            /// Get the index as `usize`.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw stored value.
            #[inline]
            pub const fn raw(self) -> Index {
                self.0
            }

            /// Check if this is a valid (non-null) index.
            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 >= 0
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.0)
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }

        impl From<$name> for Index {
            fn from(id: $name) -> Index {
                id.0
            }
        }
    };
}

impl_index_type!(HalfEdgeId, "HE");
impl_index_type!(VertexId, "V");
impl_index_type!(EdgeId, "E");
impl_index_type!(FaceId, "F");
impl_index_type!(HoleId, "H");

impl HalfEdgeId {
    /// The oppositely directed half-edge of the same edge.
    ///
    /// Twins are stored next to each other with the lower index even.
    #[inline]
    pub const fn twin(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// The edge this half-edge belongs to.
    #[inline]
    pub const fn edge(self) -> EdgeId {
        EdgeId(self.0 >> 1)
    }
}

impl EdgeId {
    /// The first (even) half-edge of this edge.
    #[inline]
    pub const fn halfedge(self) -> HalfEdgeId {
        HalfEdgeId(self.0 << 1)
    }
}
