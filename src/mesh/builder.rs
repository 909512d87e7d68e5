//! Mesh construction from face-vertex lists.
//!
//! The builder infers a complete half-edge topology from a [`SlicedArray`] of
//! faces, each given as a list of vertex indices in winding order. The input
//! integer type is a free parameter; the mesh always stores [`Index`] values.
//!
//! # Passes
//!
//! Construction runs a fixed sequence of passes, each relying on the previous
//! ones having succeeded:
//!
//! 1. **Half-edge discovery**: number every directed edge through a transient
//!    incidence map, keeping twins at consecutive indices.
//! 2. **Face linkage**: assign origin vertex, face and `next` to every
//!    interior half-edge.
//! 3. **Boundary linkage**: give every boundary half-edge its origin and splice
//!    it into its boundary loop; pick vertex representatives, preferring
//!    boundary half-edges.
//! 4. **Previous links** (optional): invert `next`.
//! 5. **Hole discovery** (optional): label every boundary loop.
//! 6. **Manifold check**: verify that circulating every vertex accounts for
//!    every half-edge exactly once.
//!
//! The first violation aborts construction with a [`MeshError`]. On failure
//! the target mesh is left empty.
//!
//! # Example
//!
//! ```
//! use halfmesh::prelude::*;
//!
//! // Two triangles sharing the edge 0-1
//! let faces = SlicedArray::from_slices(&[[0u32, 1, 2], [1, 0, 3]]);
//! let mesh = build_mesh(&faces, &BuildOptions::default().with_holes(true)).unwrap();
//!
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_edges(), 5);
//! assert_eq!(mesh.num_holes(), 1);
//! ```

use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicI32, Ordering};

use num_traits::PrimInt;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::circulator::VertexCirculator;
use super::halfedge::HalfEdgeMesh;
use super::index::{HalfEdgeId, Index, INVALID_INDEX, MAX_ELEMENTS};
use crate::arena::Arena;
use crate::error::{MeshError, Result};
use crate::progress::Progress;
use crate::sliced::SlicedArray;

const NUM_PASSES: usize = 6;

/// Options for mesh construction.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Whether to build `previous` links.
    pub include_previous: bool,

    /// Whether to discover and label boundary loops as holes.
    pub include_holes: bool,

    /// Whether to use parallel execution for the passes that allow it
    /// (default: true).
    pub parallel: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            include_previous: false,
            include_holes: false,
            parallel: true,
        }
    }
}

impl BuildOptions {
    /// Create options that build everything optional.
    pub fn full() -> Self {
        Self::default().with_previous(true).with_holes(true)
    }

    /// Set whether to build `previous` links.
    pub fn with_previous(mut self, include_previous: bool) -> Self {
        self.include_previous = include_previous;
        self
    }

    /// Set whether to discover holes.
    pub fn with_holes(mut self, include_holes: bool) -> Self {
        self.include_holes = include_holes;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Build a new half-edge mesh from a face list.
///
/// # Arguments
/// * `faces` - One slice of vertex indices per face, in winding order
/// * `options` - Which optional tables to build
///
/// # Returns
/// A half-edge mesh, or the first invariant violation found in the input.
///
/// # Example
/// ```
/// use halfmesh::prelude::*;
///
/// let faces = SlicedArray::from_slices(&[[0i64, 1, 2]]);
/// let mesh = build_mesh(&faces, &BuildOptions::default()).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.num_halfedges(), 6);
/// ```
pub fn build_mesh<T: PrimInt>(faces: &SlicedArray<T>, options: &BuildOptions) -> Result<HalfEdgeMesh> {
    build_mesh_in(faces, options, &Arena::default())
}

/// Build a new half-edge mesh whose storage lives in `arena`.
pub fn build_mesh_in<T: PrimInt>(
    faces: &SlicedArray<T>,
    options: &BuildOptions,
    arena: &Arena,
) -> Result<HalfEdgeMesh> {
    let mut mesh = HalfEdgeMesh::new_in(arena);
    mesh.build(faces, options)?;
    Ok(mesh)
}

/// Build a new half-edge mesh with progress reporting.
///
/// See [`build_mesh`] for details.
pub fn build_mesh_with_progress<T: PrimInt>(
    faces: &SlicedArray<T>,
    options: &BuildOptions,
    progress: &Progress,
) -> Result<HalfEdgeMesh> {
    let mut mesh = HalfEdgeMesh::new();
    mesh.build_internal(faces, options, Some(progress))?;
    Ok(mesh)
}

/// Build a half-edge mesh from triangles.
pub fn build_from_triangles<T: PrimInt>(faces: &[[T; 3]], options: &BuildOptions) -> Result<HalfEdgeMesh> {
    build_mesh(&SlicedArray::from_slices(faces), options)
}

/// Build a half-edge mesh from quads.
pub fn build_from_quads<T: PrimInt>(faces: &[[T; 4]], options: &BuildOptions) -> Result<HalfEdgeMesh> {
    build_mesh(&SlicedArray::from_slices(faces), options)
}

/// Convert a half-edge mesh back to a face-vertex representation.
///
/// Each face starts at its representative half-edge, which is the first
/// corner of the face as originally supplied.
pub fn to_sliced_array(mesh: &HalfEdgeMesh) -> SlicedArray<Index> {
    let mut faces = SlicedArray::with_capacity(mesh.num_faces(), mesh.num_halfedges());
    let mut corners = Vec::new();
    for f in mesh.face_ids() {
        corners.clear();
        corners.extend(mesh.face_vertices(f).map(|v| v.raw()));
        faces.push_slice(&corners);
    }
    faces
}

impl HalfEdgeMesh {
    /// Replace this mesh's topology with one built from `faces`.
    ///
    /// Storage stays in this mesh's arena. On error the mesh is left empty.
    pub fn build<T: PrimInt>(&mut self, faces: &SlicedArray<T>, options: &BuildOptions) -> Result<()> {
        self.build_internal(faces, options, None)
    }

    /// Replace this mesh's topology, reporting progress per pass.
    pub fn build_with_progress<T: PrimInt>(
        &mut self,
        faces: &SlicedArray<T>,
        options: &BuildOptions,
        progress: &Progress,
    ) -> Result<()> {
        self.build_internal(faces, options, Some(progress))
    }

    fn build_internal<T: PrimInt>(
        &mut self,
        faces: &SlicedArray<T>,
        options: &BuildOptions,
        progress: Option<&Progress>,
    ) -> Result<()> {
        match build_topology(faces, options, progress) {
            Ok(topology) => {
                topology.install(self);
                log::debug!(
                    "built half-edge mesh: {} vertices, {} edges, {} faces, {} holes",
                    self.num_vertices(),
                    self.num_edges(),
                    self.num_faces(),
                    self.num_holes()
                );
                Ok(())
            }
            Err(err) => {
                self.clear();
                log::debug!("mesh construction failed: {err}");
                Err(err)
            }
        }
    }
}

/// Topology tables produced by a successful build.
struct Topology {
    next: Vec<Index>,
    previous: Vec<Index>,
    vertex: Vec<Index>,
    face: Vec<Index>,
    hole: Vec<Index>,
    vertex_halfedge: Vec<Index>,
    face_halfedge: Vec<Index>,
    hole_halfedge: Vec<Index>,
}

impl Topology {
    fn install(self, mesh: &mut HalfEdgeMesh) {
        mesh.halfedge_next.assign(self.next);
        mesh.halfedge_previous.assign(self.previous);
        mesh.halfedge_vertex.assign(self.vertex);
        mesh.halfedge_face.assign(self.face);
        mesh.halfedge_hole.assign(self.hole);
        mesh.vertex_halfedge.assign(self.vertex_halfedge);
        mesh.face_halfedge.assign(self.face_halfedge);
        mesh.hole_halfedge.assign(self.hole_halfedge);
    }
}

fn build_topology<T: PrimInt>(
    faces: &SlicedArray<T>,
    options: &BuildOptions,
    progress: Option<&Progress>,
) -> Result<Topology> {
    let report = |step: usize, message: &str| {
        log::trace!("pass {}/{}: {}", step + 1, NUM_PASSES, message);
        if let Some(p) = progress {
            p.report(step, NUM_PASSES, message);
        }
    };

    report(0, "discovering half-edges");
    let discovery = discover_halfedges(faces)?;

    report(1, "linking faces");
    let mut links = link_faces(faces.ends(), &discovery, options.parallel)?;

    report(2, "linking boundary loops");
    let vertex_halfedge = link_boundary(&mut links, discovery.num_vertices)?;

    let previous = if options.include_previous {
        report(3, "linking previous half-edges");
        link_previous(&links.next, options.parallel)
    } else {
        Vec::new()
    };

    let (hole, hole_halfedge) = if options.include_holes {
        report(4, "discovering holes");
        discover_holes(&links.next, &links.face)?
    } else {
        (Vec::new(), Vec::new())
    };

    report(5, "checking vertex manifoldness");
    check_manifold_vertices(&links.next, &vertex_halfedge)?;

    Ok(Topology {
        next: links.next,
        previous,
        vertex: links.vertex,
        face: links.face,
        hole,
        vertex_halfedge,
        face_halfedge: links.face_halfedge,
        hole_halfedge,
    })
}

/// Output of the half-edge discovery pass.
struct Discovery {
    /// Vertex index of every corner, by flat input position.
    corners: Vec<Index>,
    /// Half-edge leaving every corner, by flat input position.
    corner_halfedge: Vec<Index>,
    num_halfedges: usize,
    num_vertices: usize,
}

fn to_vertex_index<T: PrimInt>(value: T, face: usize) -> Result<Index> {
    match value.to_i32() {
        Some(v) if v >= 0 => Ok(v),
        _ => Err(MeshError::InvalidVertexIndex {
            face,
            value: value.to_i128().unwrap_or(i128::MAX),
        }),
    }
}

/// Pass 1: number every directed edge.
///
/// The first direction of an edge to be seen takes the next even index and
/// reserves the following odd index for its twin.
fn discover_halfedges<T: PrimInt>(faces: &SlicedArray<T>) -> Result<Discovery> {
    if faces.len() > MAX_ELEMENTS {
        return Err(MeshError::IndexOverflow {
            element: "faces",
            count: faces.len(),
        });
    }

    let values = faces.values();
    let mut corners: Vec<Index> = Vec::with_capacity(values.len());
    let mut corner_halfedge = vec![INVALID_INDEX; values.len()];
    let mut incidence: FxHashMap<(Index, Index), Index> =
        FxHashMap::with_capacity_and_hasher(values.len(), Default::default());
    let mut num_halfedges = 0usize;
    let mut num_vertices = 0usize;

    for fi in 0..faces.len() {
        let range = faces.range(fi);
        if range.len() < 3 {
            return Err(MeshError::DegenerateFace { face: fi });
        }

        for &value in &values[range.clone()] {
            let v = to_vertex_index(value, fi)?;
            num_vertices = num_vertices.max(v as usize + 1);
            corners.push(v);
        }

        for pos in range.clone() {
            let next_pos = if pos + 1 == range.end { range.start } else { pos + 1 };
            let (v0, v1) = (corners[pos], corners[next_pos]);
            if v0 == v1 {
                return Err(MeshError::DegenerateEdge {
                    face: fi,
                    vertex: v0 as usize,
                });
            }

            let twin = incidence.get(&(v1, v0)).copied();
            let slot = match incidence.entry((v0, v1)) {
                Entry::Occupied(_) => {
                    return Err(MeshError::NonManifoldEdge {
                        v0: v0 as usize,
                        v1: v1 as usize,
                    })
                }
                Entry::Vacant(slot) => slot,
            };

            let he = match twin {
                Some(twin) => twin ^ 1,
                None => {
                    if num_halfedges + 2 > MAX_ELEMENTS {
                        return Err(MeshError::IndexOverflow {
                            element: "half-edges",
                            count: num_halfedges + 2,
                        });
                    }
                    let he = num_halfedges as Index;
                    num_halfedges += 2;
                    he
                }
            };
            slot.insert(he);
            corner_halfedge[pos] = he;
        }
    }

    Ok(Discovery {
        corners,
        corner_halfedge,
        num_halfedges,
        num_vertices,
    })
}

/// Per-half-edge tables filled by the linkage passes.
struct Links {
    next: Vec<Index>,
    vertex: Vec<Index>,
    face: Vec<Index>,
    face_halfedge: Vec<Index>,
}

/// Pass 2: link every interior half-edge into its face.
///
/// Each half-edge is written exactly once, so the pass runs per half-edge in
/// parallel when requested.
fn link_faces(ends: &[usize], discovery: &Discovery, parallel: bool) -> Result<Links> {
    let num_halfedges = discovery.num_halfedges;

    let mut halfedge_corner = vec![INVALID_INDEX; num_halfedges];
    for (pos, &he) in discovery.corner_halfedge.iter().enumerate() {
        halfedge_corner[he as usize] = pos as Index;
    }

    let mut next = vec![INVALID_INDEX; num_halfedges];
    let mut vertex = vec![INVALID_INDEX; num_halfedges];
    let mut face = vec![INVALID_INDEX; num_halfedges];

    let link = |((he_next, he_vertex), he_face): ((&mut Index, &mut Index), &mut Index), corner: Index| {
        if corner < 0 {
            return; // boundary, linked in pass 3
        }
        let pos = corner as usize;
        let fi = ends.partition_point(|&end| end <= pos);
        let start = if fi == 0 { 0 } else { ends[fi - 1] };
        let next_pos = if pos + 1 == ends[fi] { start } else { pos + 1 };
        *he_next = discovery.corner_halfedge[next_pos];
        *he_vertex = discovery.corners[pos];
        *he_face = fi as Index;
    };

    if parallel {
        next.par_iter_mut()
            .zip(vertex.par_iter_mut())
            .zip(face.par_iter_mut())
            .zip(halfedge_corner.par_iter())
            .for_each(|(slots, &corner)| link(slots, corner));
    } else {
        next.iter_mut()
            .zip(vertex.iter_mut())
            .zip(face.iter_mut())
            .zip(halfedge_corner.iter())
            .for_each(|(slots, &corner)| link(slots, corner));
    }

    // A face containing both directions of an edge overlaps itself
    if let Some(fi) = (0..num_halfedges)
        .step_by(2)
        .filter(|&he| face[he] >= 0 && face[he] == face[he + 1])
        .map(|he| face[he])
        .min()
    {
        return Err(MeshError::DegenerateFace { face: fi as usize });
    }

    let face_halfedge = (0..ends.len())
        .map(|fi| {
            let start = if fi == 0 { 0 } else { ends[fi - 1] };
            discovery.corner_halfedge[start]
        })
        .collect();

    Ok(Links {
        next,
        vertex,
        face,
        face_halfedge,
    })
}

/// Pass 3: splice boundary half-edges into loops and pick vertex
/// representatives.
///
/// A boundary half-edge `b` from `u` to `w` is preceded in its loop by the
/// boundary half-edge arriving at `u`. That one is found by rotating around
/// `u` through interior faces, starting from the face of `twin(b)`.
fn link_boundary(links: &mut Links, num_vertices: usize) -> Result<Vec<Index>> {
    let num_halfedges = links.next.len();
    let Links {
        next, vertex, face, ..
    } = links;
    let mut vertex_halfedge = vec![INVALID_INDEX; num_vertices];

    for b in 0..num_halfedges {
        if face[b] >= 0 {
            continue;
        }
        // The twin of a boundary half-edge is always interior
        let out = next[b ^ 1] as usize;
        let origin = vertex[out];
        vertex[b] = origin;
        if vertex_halfedge[origin as usize] < 0 {
            vertex_halfedge[origin as usize] = b as Index;
        }

        let mut out = out;
        let mut steps = 0;
        while face[out ^ 1] >= 0 {
            out = next[out ^ 1] as usize;
            steps += 1;
            if steps > num_halfedges {
                return Err(MeshError::NonManifoldVertex {
                    visited: steps,
                    expected: num_halfedges,
                });
            }
        }
        next[out ^ 1] = b as Index;
    }

    // Interior representatives only where no boundary half-edge was found
    for he in 0..num_halfedges {
        let v = vertex[he] as usize;
        if face[he] >= 0 && vertex_halfedge[v] < 0 {
            vertex_halfedge[v] = he as Index;
        }
    }

    Ok(vertex_halfedge)
}

/// Pass 4: invert `next`.
fn link_previous(next: &[Index], parallel: bool) -> Vec<Index> {
    if parallel {
        // Every target slot is written exactly once
        let previous: Vec<AtomicI32> = (0..next.len()).map(|_| AtomicI32::new(INVALID_INDEX)).collect();
        next.par_iter()
            .enumerate()
            .for_each(|(he, &n)| previous[n as usize].store(he as Index, Ordering::Relaxed));
        previous.into_iter().map(AtomicI32::into_inner).collect()
    } else {
        let mut previous = vec![INVALID_INDEX; next.len()];
        for (he, &n) in next.iter().enumerate() {
            previous[n as usize] = he as Index;
        }
        previous
    }
}

/// Pass 5: label every boundary loop with a hole ID.
fn discover_holes(next: &[Index], face: &[Index]) -> Result<(Vec<Index>, Vec<Index>)> {
    let mut hole = vec![INVALID_INDEX; next.len()];
    let mut hole_halfedge = Vec::new();

    for start in 0..next.len() {
        if face[start] >= 0 || hole[start] >= 0 {
            continue;
        }
        let id = hole_halfedge.len() as Index;
        let mut he = start;
        let mut length = 0;
        loop {
            hole[he] = id;
            length += 1;
            he = next[he] as usize;
            if he == start {
                break;
            }
            if hole[he] >= 0 {
                // Loop closes somewhere other than its start
                return Err(MeshError::DegenerateHole { halfedge: start, length });
            }
        }
        if length < 3 {
            return Err(MeshError::DegenerateHole { halfedge: start, length });
        }
        hole_halfedge.push(start as Index);
    }

    Ok((hole, hole_halfedge))
}

/// Pass 6: every half-edge must lie in the fan of its origin's representative.
fn check_manifold_vertices(next: &[Index], vertex_halfedge: &[Index]) -> Result<()> {
    let num_halfedges = next.len();
    let visited: usize = vertex_halfedge
        .iter()
        .map(|&he| {
            VertexCirculator::new(next, HalfEdgeId::from_raw(he))
                .take(num_halfedges + 1)
                .count()
        })
        .sum();

    if visited != num_halfedges {
        return Err(MeshError::NonManifoldVertex {
            visited,
            expected: num_halfedges,
        });
    }
    Ok(())
}
