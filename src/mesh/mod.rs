//! Core mesh data structures.
//!
//! This module provides the half-edge mesh representation, its construction
//! from face-vertex lists, and circulators over its topology.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], which represents a polygonal surface
//! using an array-backed half-edge (doubly-connected edge list) structure.
//! Adjacency queries are O(1) and circulation is O(degree).
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers over [`Index`]:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`EdgeId`] - Identifies a full edge (a pair of twin half-edges)
//! - [`FaceId`] - Identifies a face
//! - [`HoleId`] - Identifies a boundary loop
//!
//! # Construction
//!
//! Meshes are built from a [`SlicedArray`](crate::sliced::SlicedArray) of
//! faces, each a list of vertex indices of any primitive integer type:
//!
//! ```
//! use halfmesh::mesh::{build_mesh, BuildOptions, FaceId};
//! use halfmesh::sliced::SlicedArray;
//!
//! let faces = SlicedArray::from_slices(&[[0u16, 1, 2, 3]]);
//! let mesh = build_mesh(&faces, &BuildOptions::default()).unwrap();
//!
//! assert_eq!(mesh.face_degree(FaceId::new(0)), 4);
//! ```

mod builder;
mod circulator;
mod halfedge;
mod index;

pub use builder::{
    build_from_quads, build_from_triangles, build_mesh, build_mesh_in, build_mesh_with_progress,
    to_sliced_array, BuildOptions,
};
pub use circulator::{FaceCirculator, HoleCirculator, VertexCirculator};
pub use halfedge::HalfEdgeMesh;
pub use index::{EdgeId, FaceId, HalfEdgeId, HoleId, Index, VertexId, INVALID_INDEX, MAX_ELEMENTS};
