//! # Straighten
//!
//! Projects vertices onto the line between two end vertices.

use crate::error::{AlignError, AlignResult};
use crate::object::closest_point_on_line;
use edit_mesh::{vertex_sequences, EditMeshError, EdgeId, Mesh, VertexId};
use glam::DVec3;
use std::collections::BTreeSet;

/// Moves every vertex of `verts` except `start` and `end` onto the line
/// through them.
pub fn straighten(mesh: &mut Mesh, verts: &[VertexId], start: VertexId, end: VertexId) -> AlignResult<()> {
    if start == end {
        return Err(AlignError::invalid_selection("start and end must differ"));
    }
    let a = mesh.position(start)?;
    let b = mesh.position(end)?;

    let updates = verts
        .iter()
        .filter(|&&v| v != start && v != end)
        .map(|&v| -> AlignResult<(VertexId, DVec3)> {
            Ok((v, closest_point_on_line(mesh.position(v)?, a, b).0))
        })
        .collect::<AlignResult<Vec<_>>>()?;
    mesh.set_positions(&updates)?;
    mesh.normal_update();
    Ok(())
}

/// The two vertices of `verts` farthest apart.
///
/// Pairs are compared in selection order; the first of equally distant
/// pairs wins.
pub fn farthest_pair(mesh: &Mesh, verts: &[VertexId]) -> AlignResult<(VertexId, VertexId)> {
    let positions = mesh.positions(verts)?;
    let mut best: Option<(f64, (VertexId, VertexId))> = None;
    for i in 0..verts.len() {
        for j in i + 1..verts.len() {
            if verts[i] == verts[j] {
                continue;
            }
            let distance = positions[i].distance_squared(positions[j]);
            if best.map_or(true, |(d, _)| distance > d) {
                best = Some((distance, (verts[i], verts[j])));
            }
        }
    }
    best.map(|(_, pair)| pair)
        .ok_or_else(|| AlignError::invalid_selection("need at least two distinct vertices"))
}

/// Straightens a vertex selection.
///
/// Open edge chains of three or more selected vertices are straightened
/// between their ends, each on its own. Without such chains the whole
/// selection is straightened between `ends` (for example the first and
/// last picked vertex) or, failing that, its two farthest vertices.
///
/// Returns the number of lines the vertices were moved onto.
pub fn straighten_selection(
    mesh: &mut Mesh,
    verts: &[VertexId],
    ends: Option<(VertexId, VertexId)>,
) -> AlignResult<usize> {
    let selected: BTreeSet<VertexId> = verts.iter().copied().collect();
    if selected.len() < 3 {
        return Err(AlignError::invalid_selection("straighten needs more than two vertices"));
    }

    let edges: Vec<EdgeId> = mesh
        .edge_ids()
        .filter(|&e| {
            let [a, b] = mesh.edges()[e.index()].verts;
            selected.contains(&a) && selected.contains(&b)
        })
        .collect();
    let chains: Vec<Vec<VertexId>> = match vertex_sequences(mesh, &edges) {
        Ok(sequences) => sequences
            .into_iter()
            .filter(|s| !s.cyclic && s.len() > 2)
            .map(|s| s.verts)
            .collect(),
        Err(EditMeshError::BranchingSequence(v)) => {
            log::debug!("selected edges branch at {v:?}, straightening the whole selection");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    if !chains.is_empty() {
        for chain in &chains {
            let (start, end) = (chain[0], chain[chain.len() - 1]);
            straighten(mesh, chain, start, end)?;
        }
        return Ok(chains.len());
    }

    let (start, end) = match ends {
        Some(pair) if pair.0 != pair.1 => pair,
        _ => farthest_pair(mesh, verts)?,
    };
    straighten(mesh, verts, start, end)?;
    Ok(1)
}
