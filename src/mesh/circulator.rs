//! Cursors over the half-edges around a vertex or along a face or hole.
//!
//! Circulators only read the `next` table of a mesh, so they can be started
//! from any half-edge, not just an element's representative. A circulator
//! started on an invalid half-edge is immediately exhausted.
//!
//! Both circulators also implement [`Iterator`], yielding the current
//! half-edge before advancing.

use super::index::{HalfEdgeId, Index};

/// Walks the outgoing half-edges of a vertex in rotational order.
///
/// From half-edge `he` leaving vertex `v`, the next outgoing half-edge is
/// `next(twin(he))`.
#[derive(Debug, Clone)]
pub struct VertexCirculator<'a> {
    next: &'a [Index],
    start: HalfEdgeId,
    current: HalfEdgeId,
    valid: bool,
}

impl<'a> VertexCirculator<'a> {
    /// Start circulating at `start` using the given `next` table.
    #[inline]
    pub fn new(next: &'a [Index], start: HalfEdgeId) -> Self {
        Self {
            next,
            start,
            current: start,
            valid: start.is_valid(),
        }
    }

    /// The half-edge under the cursor.
    #[inline]
    pub fn current(&self) -> HalfEdgeId {
        self.current
    }

    /// The half-edge circulation started from.
    #[inline]
    pub fn start(&self) -> HalfEdgeId {
        self.start
    }

    /// False once circulation has wrapped back to the start.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Move to the next outgoing half-edge around the vertex.
    #[inline]
    pub fn advance(&mut self) {
        self.current = HalfEdgeId::from_raw(self.next[self.current.twin().index()]);
        if self.current == self.start {
            self.valid = false;
        }
    }
}

impl Iterator for VertexCirculator<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.valid {
            return None;
        }
        let result = self.current;
        self.advance();
        Some(result)
    }
}

/// Walks the half-edges bounding a face (or hole) by following `next`.
#[derive(Debug, Clone)]
pub struct FaceCirculator<'a> {
    next: &'a [Index],
    start: HalfEdgeId,
    current: HalfEdgeId,
    valid: bool,
}

/// Boundary loops are circulated exactly like faces.
pub type HoleCirculator<'a> = FaceCirculator<'a>;

impl<'a> FaceCirculator<'a> {
    /// Start circulating at `start` using the given `next` table.
    #[inline]
    pub fn new(next: &'a [Index], start: HalfEdgeId) -> Self {
        Self {
            next,
            start,
            current: start,
            valid: start.is_valid(),
        }
    }

    /// The half-edge under the cursor.
    #[inline]
    pub fn current(&self) -> HalfEdgeId {
        self.current
    }

    /// The half-edge circulation started from.
    #[inline]
    pub fn start(&self) -> HalfEdgeId {
        self.start
    }

    /// False once circulation has wrapped back to the start.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Move to the next half-edge of the loop.
    #[inline]
    pub fn advance(&mut self) {
        self.current = HalfEdgeId::from_raw(self.next[self.current.index()]);
        if self.current == self.start {
            self.valid = false;
        }
    }
}

impl Iterator for FaceCirculator<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.valid {
            return None;
        }
        let result = self.current;
        self.advance();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A single triangle: interior half-edges 0, 2, 4 (0->1, 1->2, 2->0) and
    // boundary twins 1, 3, 5 (1->0, 2->1, 0->2).
    const TRIANGLE_NEXT: [Index; 6] = [2, 5, 4, 1, 0, 3];

    #[test]
    fn test_face_circulator() {
        let mut c = FaceCirculator::new(&TRIANGLE_NEXT, HalfEdgeId::new(0));
        assert!(c.is_valid());
        assert_eq!(c.current(), HalfEdgeId::new(0));
        c.advance();
        assert_eq!(c.current(), HalfEdgeId::new(2));
        c.advance();
        assert_eq!(c.current(), HalfEdgeId::new(4));
        assert!(c.is_valid());
        c.advance();
        assert!(!c.is_valid());
        assert_eq!(c.current(), c.start());
    }

    #[test]
    fn test_hole_circulator() {
        let loop_: Vec<HalfEdgeId> = HoleCirculator::new(&TRIANGLE_NEXT, HalfEdgeId::new(1)).collect();
        assert_eq!(
            loop_,
            vec![HalfEdgeId::new(1), HalfEdgeId::new(5), HalfEdgeId::new(3)]
        );
    }

    #[test]
    fn test_vertex_circulator() {
        // Vertex 0 has outgoing half-edges 0 (0->1) and 5 (0->2).
        let fan: Vec<HalfEdgeId> = VertexCirculator::new(&TRIANGLE_NEXT, HalfEdgeId::new(5)).collect();
        assert_eq!(fan, vec![HalfEdgeId::new(5), HalfEdgeId::new(0)]);

        let fan: Vec<HalfEdgeId> = VertexCirculator::new(&TRIANGLE_NEXT, HalfEdgeId::new(0)).collect();
        assert_eq!(fan, vec![HalfEdgeId::new(0), HalfEdgeId::new(5)]);
    }

    #[test]
    fn test_invalid_start() {
        let mut c = VertexCirculator::new(&TRIANGLE_NEXT, HalfEdgeId::invalid());
        assert!(!c.is_valid());
        assert_eq!(c.next(), None);
        assert_eq!(FaceCirculator::new(&TRIANGLE_NEXT, HalfEdgeId::invalid()).count(), 0);
    }
}
