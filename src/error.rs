//! Error types for halfmesh.
//!
//! Mesh construction reports the first topological invariant it finds broken
//! as a [`MeshError`]. Each error maps onto a small closed set of
//! [`ErrorKind`] codes with fixed messages, so callers that only care about
//! the failure category can match on the code.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building a half-edge mesh.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face has fewer than three vertices, or contains both directions of
    /// the same edge.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// The face index in the input list.
        face: usize,
    },

    /// A face repeats the same vertex in adjacent slots.
    #[error("face {face} has a degenerate edge at vertex {vertex}")]
    DegenerateEdge {
        /// The face index in the input list.
        face: usize,
        /// The repeated vertex.
        vertex: usize,
    },

    /// The same directed edge appears twice, so the edge would need more than
    /// two incident faces.
    #[error("edge ({v0}, {v1}) has more than two incident faces")]
    NonManifoldEdge {
        /// Origin vertex of the duplicated directed edge.
        v0: usize,
        /// Destination vertex of the duplicated directed edge.
        v1: usize,
    },

    /// A boundary loop has fewer than three half-edges.
    #[error("boundary loop starting at half-edge {halfedge} has only {length} half-edges")]
    DegenerateHole {
        /// First half-edge of the loop.
        halfedge: usize,
        /// Number of half-edges in the loop.
        length: usize,
    },

    /// At least one vertex has more than one fan of incident half-edges.
    #[error("mesh has non-manifold vertices ({visited} of {expected} half-edges reachable by vertex circulation)")]
    NonManifoldVertex {
        /// Half-edges visited by circulating every vertex.
        visited: usize,
        /// Total number of half-edges.
        expected: usize,
    },

    /// A face references a vertex index that is negative or too large for the
    /// internal index width.
    #[error("face {face} references invalid vertex index {value}")]
    InvalidVertexIndex {
        /// The face index in the input list.
        face: usize,
        /// The offending value, widened for display.
        value: i128,
    },

    /// Slice end offsets are decreasing or do not cover the value array.
    #[error("slice end offset {end} is out of order or does not match value count {len}")]
    InvalidSliceBounds {
        /// The offending end offset.
        end: usize,
        /// Number of flat values.
        len: usize,
    },

    /// The mesh needs more elements than the internal index width can address.
    #[error("mesh needs {count} {element}, more than the index width allows")]
    IndexOverflow {
        /// Which element kind overflowed.
        element: &'static str,
        /// The requested count.
        count: usize,
    },
}

/// Numeric error codes, one per failure category.
///
/// [`ErrorKind::None`] is zero and denotes success; it is never produced by a
/// [`MeshError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// No error.
    None = 0,
    /// See [`MeshError::DegenerateFace`].
    DegenerateFace = 1,
    /// See [`MeshError::DegenerateEdge`].
    DegenerateEdge = 2,
    /// See [`MeshError::NonManifoldEdge`].
    NonManifoldEdge = 3,
    /// See [`MeshError::DegenerateHole`].
    DegenerateHole = 4,
    /// See [`MeshError::NonManifoldVertex`].
    NonManifoldVertex = 5,
    /// See [`MeshError::InvalidVertexIndex`].
    InvalidVertexIndex = 6,
    /// See [`MeshError::IndexOverflow`].
    IndexOverflow = 7,
    /// See [`MeshError::InvalidSliceBounds`].
    InvalidSliceBounds = 8,
}

impl ErrorKind {
    /// All codes, in numeric order.
    pub const ALL: [ErrorKind; 9] = [
        ErrorKind::None,
        ErrorKind::DegenerateFace,
        ErrorKind::DegenerateEdge,
        ErrorKind::NonManifoldEdge,
        ErrorKind::DegenerateHole,
        ErrorKind::NonManifoldVertex,
        ErrorKind::InvalidVertexIndex,
        ErrorKind::IndexOverflow,
        ErrorKind::InvalidSliceBounds,
    ];

    /// The fixed human-readable message for this code.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::None => "no error",
            ErrorKind::DegenerateFace => "a face has fewer than three vertices or overlaps itself",
            ErrorKind::DegenerateEdge => "a face repeats the same vertex in adjacent slots",
            ErrorKind::NonManifoldEdge => "an edge has more than two incident faces",
            ErrorKind::DegenerateHole => "a boundary loop has fewer than three half-edges",
            ErrorKind::NonManifoldVertex => "a vertex has more than one fan of incident faces",
            ErrorKind::InvalidVertexIndex => "a face references an invalid vertex index",
            ErrorKind::IndexOverflow => "the mesh is too large for the index width",
            ErrorKind::InvalidSliceBounds => "slice offsets do not describe the value array",
        }
    }

    /// The numeric value of this code.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a code by its numeric value.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl MeshError {
    /// The failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MeshError::DegenerateFace { .. } => ErrorKind::DegenerateFace,
            MeshError::DegenerateEdge { .. } => ErrorKind::DegenerateEdge,
            MeshError::NonManifoldEdge { .. } => ErrorKind::NonManifoldEdge,
            MeshError::DegenerateHole { .. } => ErrorKind::DegenerateHole,
            MeshError::NonManifoldVertex { .. } => ErrorKind::NonManifoldVertex,
            MeshError::InvalidVertexIndex { .. } => ErrorKind::InvalidVertexIndex,
            MeshError::IndexOverflow { .. } => ErrorKind::IndexOverflow,
            MeshError::InvalidSliceBounds { .. } => ErrorKind::InvalidSliceBounds,
        }
    }
}
