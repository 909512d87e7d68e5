//! Property-based tests for half-edge mesh construction.
//!
//! Random grids, tori and face subsets are built and checked against the
//! structural invariants of the half-edge representation.
//!
//! ## Test Properties
//!
//! 1. **Twin Involution**: `twin(twin(h)) == h` and twins swap endpoints
//! 2. **Face Fidelity**: every face circulates back to its input corners
//! 3. **Vertex Partition**: vertex circulations cover every half-edge once
//! 4. **Euler Characteristic**: V - E + F matches the surface topology
//! 5. **All-or-Nothing**: input either builds a valid mesh or fails cleanly

use halfmesh::prelude::*;
use proptest::prelude::*;

// =============================================================================
// MESH GENERATORS
// =============================================================================

/// Quads (optionally split into triangles) over an `nx` by `ny` grid.
fn grid_faces(nx: usize, ny: usize, triangulate: bool) -> Vec<Vec<u32>> {
    let stride = nx + 1;
    let mut faces = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            let v00 = (j * stride + i) as u32;
            let v10 = v00 + 1;
            let v01 = v00 + stride as u32;
            let v11 = v01 + 1;
            if triangulate {
                faces.push(vec![v00, v10, v11]);
                faces.push(vec![v00, v11, v01]);
            } else {
                faces.push(vec![v00, v10, v11, v01]);
            }
        }
    }
    faces
}

/// Quads over an `n` by `m` grid wrapped in both directions.
fn torus_faces(n: usize, m: usize) -> Vec<Vec<u32>> {
    let v = |i: usize, j: usize| ((j % m) * n + (i % n)) as u32;
    let mut faces = Vec::new();
    for j in 0..m {
        for i in 0..n {
            faces.push(vec![v(i, j), v(i + 1, j), v(i + 1, j + 1), v(i, j + 1)]);
        }
    }
    faces
}

/// Relabel vertices and rotate every face's starting corner.
fn shuffle(faces: &[Vec<u32>], labels: &[u32], rotation: usize) -> SlicedArray<u32> {
    faces
        .iter()
        .enumerate()
        .map(|(fi, face)| {
            let mut face: Vec<u32> = face.iter().map(|&v| labels[v as usize % labels.len()]).collect();
            let len = face.len();
            face.rotate_left((rotation + fi) % len);
            face
        })
        .collect()
}

fn grid_strategy() -> impl Strategy<Value = (usize, usize, bool)> {
    (1usize..8, 1usize..8, any::<bool>())
}

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

fn check_invariants(mesh: &HalfEdgeMesh, faces: &SlicedArray<u32>) -> std::result::Result<(), TestCaseError> {
    prop_assert!(mesh.is_valid());
    prop_assert_eq!(mesh.num_halfedges() % 2, 0);

    for he in mesh.halfedge_ids() {
        let twin = mesh.twin(he);
        prop_assert_ne!(twin, he);
        prop_assert_eq!(mesh.twin(twin), he);
        prop_assert_eq!(mesh.vertex(twin), mesh.dest(he));
        prop_assert!(mesh.face(he).is_valid() || mesh.face(twin).is_valid());
    }

    prop_assert_eq!(mesh.num_faces(), faces.len());
    for (f, input) in mesh.face_ids().zip(faces.iter()) {
        prop_assert_eq!(mesh.face_degree(f), input.len());
        let corners: Vec<u32> = mesh.face_vertices(f).map(|v| v.index() as u32).collect();
        prop_assert_eq!(corners.as_slice(), input);
    }

    let total: usize = mesh.vertex_ids().map(|v| mesh.vertex_degree(v)).sum();
    prop_assert_eq!(total, mesh.num_halfedges());

    if mesh.has_previous() {
        for he in mesh.halfedge_ids() {
            prop_assert_eq!(mesh.previous(mesh.next(he)), he);
        }
    }
    Ok(())
}

// =============================================================================
// PROPERTY-BASED TESTS
// =============================================================================

proptest! {
    /// Property: open grids are disks with a single boundary loop
    #[test]
    fn prop_grid_is_disk(
        (nx, ny, triangulate) in grid_strategy(),
        rotation in 0usize..4,
        parallel in any::<bool>(),
    ) {
        let labels: Vec<u32> = (0..((nx + 1) * (ny + 1)) as u32).rev().collect();
        let faces = shuffle(&grid_faces(nx, ny, triangulate), &labels, rotation);
        let options = BuildOptions::full().with_parallel(parallel);
        let mesh = build_mesh(&faces, &options).unwrap();

        check_invariants(&mesh, &faces)?;

        let chi = mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64;
        prop_assert_eq!(chi, 1);
        prop_assert_eq!(mesh.num_holes(), 1);
        prop_assert_eq!(mesh.hole_degree(HoleId::new(0)), 2 * (nx + ny));
    }

    /// Property: wrapped grids are closed tori
    #[test]
    fn prop_torus_is_closed(n in 3usize..8, m in 3usize..8, rotation in 0usize..4) {
        let labels: Vec<u32> = (0..(n * m) as u32).rev().collect();
        let faces = shuffle(&torus_faces(n, m), &labels, rotation);
        let mesh = build_mesh(&faces, &BuildOptions::full()).unwrap();

        check_invariants(&mesh, &faces)?;

        prop_assert!(mesh.is_closed());
        prop_assert_eq!(mesh.num_holes(), 0);
        let chi = mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64;
        prop_assert_eq!(chi, 0);
        for v in mesh.vertex_ids() {
            prop_assert_eq!(mesh.vertex_degree(v), 4);
        }
    }

    /// Property: every start half-edge of a fan yields the same fan
    #[test]
    fn prop_circulation_independent_of_start((nx, ny, triangulate) in grid_strategy()) {
        let faces: SlicedArray<u32> = grid_faces(nx, ny, triangulate).into_iter().collect();
        let mesh = build_mesh(&faces, &BuildOptions::default()).unwrap();

        for v in mesh.vertex_ids() {
            let mut expected: Vec<HalfEdgeId> = mesh.vertex_circulator(v).collect();
            expected.sort_unstable();
            for &start in &expected {
                let mut fan: Vec<HalfEdgeId> = mesh.vertex_circulator_from(start).collect();
                fan.sort_unstable();
                prop_assert_eq!(&fan, &expected);
            }
        }
    }

    /// Property: random face subsets either build a valid mesh or are
    /// rejected as non-manifold at a vertex, leaving the mesh empty
    #[test]
    fn prop_face_subsets_all_or_nothing(
        (nx, ny, triangulate) in grid_strategy(),
        keep in prop::collection::vec(any::<bool>(), 128),
    ) {
        let faces: SlicedArray<u32> = grid_faces(nx, ny, triangulate)
            .into_iter()
            .zip(keep.iter().cycle())
            .filter(|(_, k)| **k)
            .map(|(face, _)| face)
            .collect();

        let mut mesh = HalfEdgeMesh::new();
        match mesh.build(&faces, &BuildOptions::full()) {
            Ok(()) => check_invariants(&mesh, &faces)?,
            Err(err) => {
                prop_assert_eq!(err.kind(), ErrorKind::NonManifoldVertex);
                prop_assert_eq!(mesh.num_halfedges(), 0);
                prop_assert_eq!(mesh.num_faces(), 0);
            }
        }
    }

    /// Property: round-tripping through the face-vertex form is lossless
    #[test]
    fn prop_face_vertex_roundtrip((nx, ny, triangulate) in grid_strategy(), rotation in 0usize..4) {
        let labels: Vec<u32> = (0..((nx + 1) * (ny + 1)) as u32).collect();
        let faces = shuffle(&grid_faces(nx, ny, triangulate), &labels, rotation);
        let mesh = build_mesh(&faces, &BuildOptions::default()).unwrap();

        let out = to_sliced_array(&mesh);
        let rebuilt = build_mesh(&out, &BuildOptions::default()).unwrap();
        prop_assert_eq!(rebuilt.halfedge_next(), mesh.halfedge_next());
        prop_assert_eq!(rebuilt.halfedge_vertex(), mesh.halfedge_vertex());
    }

    /// Property: flipping one face's winding breaks orientability
    #[test]
    fn prop_flipped_face_rejected(n in 2usize..6, flip in 0usize..36) {
        let mut faces = grid_faces(n, n, false);
        let flip = flip % faces.len();
        faces[flip].reverse();
        let faces: SlicedArray<u32> = faces.into_iter().collect();

        let err = build_mesh(&faces, &BuildOptions::default()).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::NonManifoldEdge);
    }
}
