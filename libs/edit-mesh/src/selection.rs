//! # Selection Walking
//!
//! Turns a face selection into its border and walks edge sets into ordered
//! vertex chains.

use crate::error::{EditMeshError, EditMeshResult};
use crate::mesh::{EdgeId, FaceId, Mesh, VertexId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Ordered chain of vertices produced by [`vertex_sequences`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexSequence {
    /// Vertices in walk order; a cyclic chain does not repeat its start
    pub verts: Vec<VertexId>,
    /// True if the last vertex connects back to the first
    pub cyclic: bool,
}

impl VertexSequence {
    /// Number of vertices in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// Returns true if the chain has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }
}

/// Edges used by exactly one face of `faces`, in id order.
///
/// # Example
///
/// ```rust
/// use edit_mesh::{boundary_edges, Mesh};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(DVec3::ZERO);
/// let b = mesh.add_vertex(DVec3::X);
/// let c = mesh.add_vertex(DVec3::Y);
/// let f = mesh.add_face(&[a, b, c]).unwrap();
/// assert_eq!(boundary_edges(&mesh, &[f]).unwrap().len(), 3);
/// ```
pub fn boundary_edges(mesh: &Mesh, faces: &[FaceId]) -> EditMeshResult<Vec<EdgeId>> {
    let unique: BTreeSet<FaceId> = faces.iter().copied().collect();
    let mut uses: BTreeMap<EdgeId, usize> = BTreeMap::new();
    for f in unique {
        for e in mesh.face_edges(f)? {
            *uses.entry(e).or_default() += 1;
        }
    }
    Ok(uses
        .into_iter()
        .filter_map(|(e, count)| (count == 1).then_some(e))
        .collect())
}

/// Walks an edge set into ordered vertex chains.
///
/// Open chains start at their lowest-id end vertex. Cyclic chains start at
/// the first endpoint of their lowest-id edge and continue along that edge.
/// Chains are returned in the order of their lowest edge id. A vertex shared
/// by more than two of the edges makes the set ambiguous and is an error.
pub fn vertex_sequences(mesh: &Mesh, edges: &[EdgeId]) -> EditMeshResult<Vec<VertexSequence>> {
    let edges: BTreeSet<EdgeId> = edges.iter().copied().collect();
    let mut adjacency: HashMap<VertexId, Vec<EdgeId>> = HashMap::new();
    for &e in &edges {
        for v in mesh.edge(e)?.verts {
            let linked = adjacency.entry(v).or_default();
            linked.push(e);
            if linked.len() > 2 {
                return Err(EditMeshError::BranchingSequence(v));
            }
        }
    }

    let mut used: BTreeSet<EdgeId> = BTreeSet::new();
    let mut sequences = Vec::new();
    for &seed in &edges {
        if used.contains(&seed) {
            continue;
        }

        // collect the component to find an open end
        let mut component = BTreeSet::new();
        let mut stack = vec![seed];
        while let Some(e) = stack.pop() {
            if !component.insert(e) {
                continue;
            }
            for v in mesh.edge(e)?.verts {
                stack.extend(adjacency[&v].iter().filter(|n| !component.contains(*n)));
            }
        }
        let ends: BTreeSet<VertexId> = component
            .iter()
            .flat_map(|e| mesh.edges()[e.index()].verts)
            .filter(|v| adjacency[v].len() == 1)
            .collect();

        let (start, first_edge) = match ends.first() {
            Some(&end) => (end, adjacency[&end][0]),
            None => (mesh.edges()[seed.index()].verts[0], seed),
        };

        let mut verts = vec![start];
        let mut current = start;
        let mut edge = first_edge;
        loop {
            used.insert(edge);
            let next = mesh.edges()[edge.index()]
                .other_vert(current)
                .ok_or(EditMeshError::InvalidEdge(edge))?;
            let Some(&following) = adjacency[&next].iter().find(|e| !used.contains(*e)) else {
                if next != start {
                    verts.push(next);
                }
                break;
            };
            verts.push(next);
            current = next;
            edge = following;
        }

        sequences.push(VertexSequence {
            cyclic: ends.is_empty(),
            verts,
        });
    }
    Ok(sequences)
}
