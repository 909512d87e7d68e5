//! # Halfmesh
//!
//! Array-backed half-edge mesh topology for polygonal surfaces.
//!
//! Halfmesh builds a complete half-edge structure from a plain face-vertex
//! list, validating as it goes that the input describes an oriented 2-manifold
//! (possibly with boundary). Geometry is out of scope: the mesh stores
//! connectivity only, and callers keep vertex positions wherever they like,
//! indexed by [`VertexId`](mesh::VertexId).
//!
//! ## Features
//!
//! - **Flat storage**: every table is a contiguous array of 32-bit indices
//! - **Consecutive twins**: the twin of half-edge `i` is `i ^ 1`
//! - **Polygon input**: faces of any size, indices of any primitive integer type
//! - **Validation**: non-manifold and degenerate input is rejected with a
//!   typed [`MeshError`](error::MeshError)
//! - **Optional tables**: `previous` links and boundary loops (holes)
//! - **Allocation contexts**: storage is accounted to an explicit
//!   [`Arena`](arena::Arena)
//!
//! ## Building Meshes
//!
//! ```
//! use halfmesh::prelude::*;
//!
//! let faces = SlicedArray::from_slices(&[
//!     [0u32, 2, 1], // bottom
//!     [0, 1, 3],    // front
//!     [1, 2, 3],    // right
//!     [2, 0, 3],    // left
//! ]);
//!
//! let mesh = build_mesh(&faces, &BuildOptions::full()).unwrap();
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_edges(), 6);
//! assert_eq!(mesh.num_faces(), 4);
//! assert!(mesh.is_closed());
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use halfmesh::prelude::*;
//!
//! # let faces = SlicedArray::from_slices(&[[0u32, 1, 2]]);
//! # let mesh = build_mesh(&faces, &BuildOptions::default()).unwrap();
//! // Iterate over neighbors of a vertex
//! let v = VertexId::new(0);
//! for neighbor in mesh.vertex_neighbors(v) {
//!     println!("Neighbor: {:?}", neighbor);
//! }
//!
//! // Walk the half-edges of a face
//! let f = FaceId::new(0);
//! for he in mesh.face_circulator(f) {
//!     println!("{:?} -> {:?}", mesh.vertex(he), mesh.dest(he));
//! }
//! ```
//!
//! ## Handling Invalid Input
//!
//! ```
//! use halfmesh::prelude::*;
//!
//! // Two triangles touching at a single vertex
//! let faces = SlicedArray::from_slices(&[[0u32, 1, 2], [0, 3, 4]]);
//! let err = build_mesh(&faces, &BuildOptions::default()).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NonManifoldVertex);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod error;
pub mod mesh;
pub mod progress;
pub mod sliced;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use halfmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arena::Arena;
    pub use crate::error::{ErrorKind, MeshError, Result};
    pub use crate::mesh::{
        build_from_quads, build_from_triangles, build_mesh, build_mesh_in, build_mesh_with_progress,
        to_sliced_array, BuildOptions, EdgeId, FaceCirculator, FaceId, HalfEdgeId, HalfEdgeMesh,
        HoleCirculator, HoleId, Index, VertexCirculator, VertexId,
    };
    pub use crate::progress::Progress;
    pub use crate::sliced::SlicedArray;
}
