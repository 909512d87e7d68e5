//! Half-edge mesh data structure.
//!
//! This module provides an array-backed half-edge (doubly-connected edge
//! list) representation for polygonal meshes. All connectivity is stored as
//! flat [`Index`] tables, so the structure has no internal references and is
//! cheap to copy or move.
//!
//! # Structure
//!
//! - Each edge is split into two **half-edges** stored at indices `2e` and
//!   `2e + 1`; the twin of half-edge `i` is `i ^ 1`
//! - Each half-edge knows its **next** half-edge, **origin vertex**, and either
//!   its **face** (interior) or its **hole** (boundary)
//! - Each vertex, face and hole stores one representative half-edge
//! - **Previous** links and **holes** are optional and only present when the
//!   mesh was built with them
//!
//! # Boundary Handling
//!
//! Boundary half-edges have an invalid face ID. Their twins are interior
//! half-edges. A vertex on the boundary always stores a boundary half-edge as
//! its representative, so boundary tests on vertices are O(1).

use crate::arena::{Arena, IndexBuffer};

use super::circulator::{FaceCirculator, HoleCirculator, VertexCirculator};
use super::index::{EdgeId, FaceId, HalfEdgeId, HoleId, Index, VertexId};

/// A half-edge mesh for polygonal surfaces.
///
/// Meshes are created empty and populated by the builder (see
/// [`HalfEdgeMesh::build`]). After a successful build the topology is
/// read-only.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh {
    pub(crate) halfedge_next: IndexBuffer,
    pub(crate) halfedge_previous: IndexBuffer,
    pub(crate) halfedge_vertex: IndexBuffer,
    pub(crate) halfedge_face: IndexBuffer,
    pub(crate) halfedge_hole: IndexBuffer,
    pub(crate) vertex_halfedge: IndexBuffer,
    pub(crate) face_halfedge: IndexBuffer,
    pub(crate) hole_halfedge: IndexBuffer,
    arena: Arena,
}

impl Default for HalfEdgeMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl HalfEdgeMesh {
    /// Create a new empty mesh in a fresh arena.
    pub fn new() -> Self {
        Self::new_in(&Arena::default())
    }

    /// Create a new empty mesh whose storage lives in `arena`.
    pub fn new_in(arena: &Arena) -> Self {
        Self {
            halfedge_next: IndexBuffer::new_in(arena),
            halfedge_previous: IndexBuffer::new_in(arena),
            halfedge_vertex: IndexBuffer::new_in(arena),
            halfedge_face: IndexBuffer::new_in(arena),
            halfedge_hole: IndexBuffer::new_in(arena),
            vertex_halfedge: IndexBuffer::new_in(arena),
            face_halfedge: IndexBuffer::new_in(arena),
            hole_halfedge: IndexBuffer::new_in(arena),
            arena: arena.clone(),
        }
    }

    /// Copy this mesh into another arena.
    ///
    /// [`Clone`] copies into the source mesh's own arena instead.
    pub fn clone_in(&self, arena: &Arena) -> Self {
        Self {
            halfedge_next: self.halfedge_next.clone_in(arena),
            halfedge_previous: self.halfedge_previous.clone_in(arena),
            halfedge_vertex: self.halfedge_vertex.clone_in(arena),
            halfedge_face: self.halfedge_face.clone_in(arena),
            halfedge_hole: self.halfedge_hole.clone_in(arena),
            vertex_halfedge: self.vertex_halfedge.clone_in(arena),
            face_halfedge: self.face_halfedge.clone_in(arena),
            hole_halfedge: self.hole_halfedge.clone_in(arena),
            arena: arena.clone(),
        }
    }

    /// The arena holding this mesh's storage.
    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Remove all elements, keeping the arena.
    pub fn clear(&mut self) {
        self.halfedge_next.clear();
        self.halfedge_previous.clear();
        self.halfedge_vertex.clear();
        self.halfedge_face.clear();
        self.halfedge_hole.clear();
        self.vertex_halfedge.clear();
        self.face_halfedge.clear();
        self.hole_halfedge.clear();
    }

    // ==================== Counts ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertex_halfedge.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedge_next.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_halfedges() / 2
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.face_halfedge.len()
    }

    /// Get the number of holes (zero unless built with hole discovery).
    #[inline]
    pub fn num_holes(&self) -> usize {
        self.hole_halfedge.len()
    }

    /// Whether previous links were built.
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.halfedge_previous.len() == self.num_halfedges()
    }

    /// Whether hole discovery was run.
    #[inline]
    pub fn has_holes(&self) -> bool {
        self.halfedge_hole.len() == self.num_halfedges()
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId) -> HalfEdgeId {
        he.twin()
    }

    /// Get the next half-edge around the face or hole.
    #[inline]
    pub fn next(&self, he: HalfEdgeId) -> HalfEdgeId {
        HalfEdgeId::from_raw(self.halfedge_next[he.index()])
    }

    /// Get the previous half-edge around the face or hole.
    ///
    /// Only available when the mesh was built with previous links.
    #[inline]
    pub fn previous(&self, he: HalfEdgeId) -> HalfEdgeId {
        HalfEdgeId::from_raw(self.halfedge_previous[he.index()])
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn vertex(&self, he: HalfEdgeId) -> VertexId {
        VertexId::from_raw(self.halfedge_vertex[he.index()])
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId) -> VertexId {
        self.vertex(he.twin())
    }

    /// Get the face of a half-edge (invalid on the boundary).
    #[inline]
    pub fn face(&self, he: HalfEdgeId) -> FaceId {
        FaceId::from_raw(self.halfedge_face[he.index()])
    }

    /// Get the hole of a half-edge (invalid for interior half-edges).
    ///
    /// Only available when the mesh was built with hole discovery.
    #[inline]
    pub fn hole(&self, he: HalfEdgeId) -> HoleId {
        HoleId::from_raw(self.halfedge_hole[he.index()])
    }

    /// Get the edge of a half-edge.
    #[inline]
    pub fn edge(&self, he: HalfEdgeId) -> EdgeId {
        he.edge()
    }

    /// Get the representative outgoing half-edge of a vertex.
    #[inline]
    pub fn vertex_halfedge(&self, v: VertexId) -> HalfEdgeId {
        HalfEdgeId::from_raw(self.vertex_halfedge[v.index()])
    }

    /// Get the representative half-edge of a face.
    #[inline]
    pub fn face_halfedge(&self, f: FaceId) -> HalfEdgeId {
        HalfEdgeId::from_raw(self.face_halfedge[f.index()])
    }

    /// Get the representative half-edge of a hole.
    #[inline]
    pub fn hole_halfedge(&self, h: HoleId) -> HalfEdgeId {
        HalfEdgeId::from_raw(self.hole_halfedge[h.index()])
    }

    /// Get the first half-edge of an edge.
    #[inline]
    pub fn edge_halfedge(&self, e: EdgeId) -> HalfEdgeId {
        e.halfedge()
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId) -> bool {
        !self.face(he).is_valid()
    }

    /// Check if a vertex is on the boundary.
    ///
    /// Isolated vertices (referenced by no face) count as boundary.
    #[inline]
    pub fn is_boundary_vertex(&self, v: VertexId) -> bool {
        let he = self.vertex_halfedge(v);
        !he.is_valid() || self.is_boundary_halfedge(he)
    }

    /// Check if an edge is on the boundary.
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId) -> bool {
        let he = e.halfedge();
        self.is_boundary_halfedge(he) || self.is_boundary_halfedge(he.twin())
    }

    /// Whether the mesh has no boundary half-edges.
    pub fn is_closed(&self) -> bool {
        self.halfedge_face.iter().all(|&f| f >= 0)
    }

    /// Compute the number of outgoing half-edges of a vertex.
    pub fn vertex_degree(&self, v: VertexId) -> usize {
        self.vertex_circulator(v).count()
    }

    /// Compute the number of half-edges bounding a face.
    pub fn face_degree(&self, f: FaceId) -> usize {
        self.face_circulator(f).count()
    }

    /// Compute the number of half-edges in a boundary loop.
    pub fn hole_degree(&self, h: HoleId) -> usize {
        self.hole_circulator(h).count()
    }

    /// Find the half-edge going from `v0` to `v1`.
    ///
    /// Returns an invalid ID if the vertices are not adjacent.
    pub fn find_halfedge(&self, v0: VertexId, v1: VertexId) -> HalfEdgeId {
        self.vertex_circulator(v0)
            .find(|&he| self.dest(he) == v1)
            .unwrap_or_default()
    }

    /// Find the half-edge of `f0` whose twin lies in `f1`.
    ///
    /// Returns an invalid ID if the faces do not share an edge.
    pub fn find_face_halfedge(&self, f0: FaceId, f1: FaceId) -> HalfEdgeId {
        self.face_circulator(f0)
            .find(|&he| self.face(he.twin()) == f1)
            .unwrap_or_default()
    }

    // ==================== Circulation ====================

    /// Circulate the outgoing half-edges of a vertex, starting at its
    /// representative.
    #[inline]
    pub fn vertex_circulator(&self, v: VertexId) -> VertexCirculator<'_> {
        VertexCirculator::new(&self.halfedge_next, self.vertex_halfedge(v))
    }

    /// Circulate the outgoing half-edges around the origin of `he`, starting
    /// at `he`.
    #[inline]
    pub fn vertex_circulator_from(&self, he: HalfEdgeId) -> VertexCirculator<'_> {
        VertexCirculator::new(&self.halfedge_next, he)
    }

    /// Circulate the half-edges of a face, starting at its representative.
    #[inline]
    pub fn face_circulator(&self, f: FaceId) -> FaceCirculator<'_> {
        FaceCirculator::new(&self.halfedge_next, self.face_halfedge(f))
    }

    /// Circulate the half-edges of a hole, starting at its representative.
    #[inline]
    pub fn hole_circulator(&self, h: HoleId) -> HoleCirculator<'_> {
        HoleCirculator::new(&self.halfedge_next, self.hole_halfedge(h))
    }

    /// Circulate the loop (face or hole) containing `he`, starting at `he`.
    #[inline]
    pub fn loop_circulator_from(&self, he: HalfEdgeId) -> FaceCirculator<'_> {
        FaceCirculator::new(&self.halfedge_next, he)
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.num_vertices()).map(VertexId::new)
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        (0..self.num_halfedges()).map(HalfEdgeId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.num_edges()).map(EdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.num_faces()).map(FaceId::new)
    }

    /// Iterate over all hole IDs.
    pub fn hole_ids(&self) -> impl Iterator<Item = HoleId> + '_ {
        (0..self.num_holes()).map(HoleId::new)
    }

    /// Iterate over vertices adjacent to a vertex.
    pub fn vertex_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex_circulator(v).map(|he| self.dest(he))
    }

    /// Iterate over faces adjacent to a vertex.
    pub fn vertex_faces(&self, v: VertexId) -> impl Iterator<Item = FaceId> + '_ {
        self.vertex_circulator(v)
            .map(|he| self.face(he))
            .filter(|f| f.is_valid())
    }

    /// Iterate over vertices of a face.
    pub fn face_vertices(&self, f: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        self.face_circulator(f).map(|he| self.vertex(he))
    }

    /// Iterate over faces sharing an edge with a face.
    pub fn face_neighbors(&self, f: FaceId) -> impl Iterator<Item = FaceId> + '_ {
        self.face_circulator(f)
            .map(|he| self.face(he.twin()))
            .filter(|f| f.is_valid())
    }

    // ==================== Raw Storage ====================

    /// The `next` table, indexed by half-edge.
    #[inline]
    pub fn halfedge_next(&self) -> &[Index] {
        &self.halfedge_next
    }

    /// The `previous` table (empty unless built with previous links).
    #[inline]
    pub fn halfedge_previous(&self) -> &[Index] {
        &self.halfedge_previous
    }

    /// The origin vertex table, indexed by half-edge.
    #[inline]
    pub fn halfedge_vertex(&self) -> &[Index] {
        &self.halfedge_vertex
    }

    /// The face table, indexed by half-edge.
    #[inline]
    pub fn halfedge_face(&self) -> &[Index] {
        &self.halfedge_face
    }

    /// The hole table (empty unless built with hole discovery).
    #[inline]
    pub fn halfedge_hole(&self) -> &[Index] {
        &self.halfedge_hole
    }

    /// Representative half-edge table, indexed by vertex.
    #[inline]
    pub fn vertex_halfedges(&self) -> &[Index] {
        &self.vertex_halfedge
    }

    /// Representative half-edge table, indexed by face.
    #[inline]
    pub fn face_halfedges(&self) -> &[Index] {
        &self.face_halfedge
    }

    /// Representative half-edge table, indexed by hole.
    #[inline]
    pub fn hole_halfedges(&self) -> &[Index] {
        &self.hole_halfedge
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    ///
    /// This re-verifies every structural invariant and is O(V + H). A mesh
    /// returned by a successful build always passes.
    pub fn is_valid(&self) -> bool {
        let n = self.num_halfedges();
        if n % 2 != 0 {
            return false;
        }
        let in_range = |i: Index, len: usize| i >= 0 && (i as usize) < len;

        for he in self.halfedge_ids() {
            let next = self.next(he);
            if !in_range(next.raw(), n) {
                return false;
            }
            // Origin of next must be the destination of he
            if self.vertex(next) != self.dest(he) {
                return false;
            }
            if !in_range(self.vertex(he).raw(), self.num_vertices()) {
                return false;
            }
            let face = self.face(he);
            if self.face(next) != face {
                return false;
            }
            if face.is_valid() && !in_range(face.raw(), self.num_faces()) {
                return false;
            }
            // At least one half of every edge belongs to a face
            if !face.is_valid() && self.is_boundary_halfedge(he.twin()) {
                return false;
            }
            if !self.halfedge_hole.is_empty() {
                let hole = self.hole(he);
                if face.is_valid() == hole.is_valid() || self.hole(next) != hole {
                    return false;
                }
            }
            if !self.halfedge_previous.is_empty() && self.previous(next) != he {
                return false;
            }
        }

        for v in self.vertex_ids() {
            let he = self.vertex_halfedge(v);
            if !he.is_valid() {
                continue;
            }
            if self.vertex(he) != v {
                return false;
            }
            if !self.is_boundary_halfedge(he)
                && self
                    .vertex_circulator(v)
                    .take(n)
                    .any(|h| self.is_boundary_halfedge(h))
            {
                return false;
            }
        }

        for f in self.face_ids() {
            let he = self.face_halfedge(f);
            if !in_range(he.raw(), n) || self.face(he) != f {
                return false;
            }
        }

        for h in self.hole_ids() {
            let he = self.hole_halfedge(h);
            if !in_range(he.raw(), n) || self.hole(he) != h {
                return false;
            }
            if self.hole_circulator(h).take(n + 1).count() < 3 {
                return false;
            }
        }

        // Bounded so a corrupt next table cannot loop forever
        let fan_total: usize = self
            .vertex_ids()
            .map(|v| self.vertex_circulator(v).take(n + 1).count())
            .sum();
        fan_total == n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_edges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert_eq!(mesh.num_holes(), 0);
        assert!(mesh.is_valid());
        assert!(mesh.is_closed());
    }

    #[test]
    fn test_new_in_uses_arena() {
        let arena = Arena::new("mesh");
        let mesh = HalfEdgeMesh::new_in(&arena);
        assert!(mesh.arena().same_arena(&arena));
        assert!(mesh.halfedge_next.arena().same_arena(&arena));
    }
}
