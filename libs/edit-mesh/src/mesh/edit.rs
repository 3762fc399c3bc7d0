//! # Mesh Edits
//!
//! Structural and positional edits: subset transforms, welding, face
//! deletion and winding repair.
//!
//! Edits that remove elements compact storage. They return remap tables so
//! callers can follow the ids they were holding.

use super::{edge_key, Edge, EdgeId, FaceId, Mesh, VertexId};
use crate::error::{EditMeshError, EditMeshResult};
use glam::{DMat3, DMat4, DVec3};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Outcome of [`Mesh::merge_by_distance`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// Number of vertices welded away
    pub merged: usize,
    /// New id of every pre-merge vertex
    pub vertex_map: Vec<VertexId>,
    /// New id of every pre-merge face, `None` if it collapsed
    pub face_map: Vec<Option<FaceId>>,
}

impl MergeReport {
    fn identity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            merged: 0,
            vertex_map: (0..vertex_count as u32).map(VertexId).collect(),
            face_map: (0..face_count as u32).map(|f| Some(FaceId(f))).collect(),
        }
    }
}

impl Mesh {
    // =========================================================================
    // SUBSET TRANSFORMS
    // =========================================================================

    /// Transforms a subset of vertices by a 4x4 matrix.
    pub fn transform_vertices(&mut self, verts: &[VertexId], matrix: &DMat4) -> EditMeshResult<()> {
        self.check_vertices(verts)?;
        for v in unique(verts) {
            let vertex = &mut self.vertices[v.index()];
            vertex.position = matrix.transform_point3(vertex.position);
        }
        self.update_face_normals();
        Ok(())
    }

    /// Translates a subset of vertices.
    pub fn translate(&mut self, verts: &[VertexId], offset: DVec3) -> EditMeshResult<()> {
        self.transform_vertices(verts, &DMat4::from_translation(offset))
    }

    /// Scales a subset of vertices about the origin.
    pub fn scale(&mut self, verts: &[VertexId], factors: DVec3) -> EditMeshResult<()> {
        self.transform_vertices(verts, &DMat4::from_scale(factors))
    }

    /// Rotates a subset of vertices about `center`.
    pub fn rotate(&mut self, verts: &[VertexId], center: DVec3, rotation: &DMat3) -> EditMeshResult<()> {
        let matrix = DMat4::from_translation(center)
            * DMat4::from_mat3(*rotation)
            * DMat4::from_translation(-center);
        self.transform_vertices(verts, &matrix)
    }

    /// Moves several vertices at once.
    pub fn set_positions(&mut self, updates: &[(VertexId, DVec3)]) -> EditMeshResult<()> {
        for &(v, _) in updates {
            self.vertex(v)?;
        }
        for &(v, position) in updates {
            self.vertices[v.index()].position = position;
        }
        self.update_face_normals();
        Ok(())
    }

    // =========================================================================
    // WELDING
    // =========================================================================

    /// Welds vertices of `verts` that lie within `distance` of each other.
    ///
    /// The lowest id of every cluster survives. Faces are rewritten, faces
    /// left with fewer than three corners are removed, and edges that
    /// collapse or coincide are dropped or fused (a fused edge stays sharp if
    /// either source was sharp).
    ///
    /// # Example
    ///
    /// ```rust
    /// use edit_mesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let mut mesh = Mesh::new();
    /// let a = mesh.add_vertex(DVec3::ZERO);
    /// let b = mesh.add_vertex(DVec3::new(0.0, 0.0, 1e-7));
    /// let report = mesh.merge_by_distance(&[a, b], 1e-5).unwrap();
    /// assert_eq!(report.merged, 1);
    /// assert_eq!(mesh.vertex_count(), 1);
    /// ```
    pub fn merge_by_distance(&mut self, verts: &[VertexId], distance: f64) -> EditMeshResult<MergeReport> {
        if !(distance > 0.0) || !distance.is_finite() {
            return Err(EditMeshError::InvalidDistance(distance));
        }
        self.check_vertices(verts)?;

        let candidates: BTreeSet<VertexId> = verts.iter().copied().collect();
        let mut target: Vec<VertexId> = self.vertex_ids().collect();
        let mut grid: HashMap<[i64; 3], Vec<VertexId>> = HashMap::new();
        let cell_of = |p: DVec3| -> [i64; 3] {
            let c = (p / distance).floor();
            [c.x as i64, c.y as i64, c.z as i64]
        };

        let mut merged = 0;
        for &v in &candidates {
            let position = self.vertices[v.index()].position;
            let cell = cell_of(position);
            let mut keeper: Option<VertexId> = None;
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let key = [cell[0] + dx, cell[1] + dy, cell[2] + dz];
                        let Some(bucket) = grid.get(&key) else { continue };
                        for &k in bucket {
                            let close = self.vertices[k.index()].position.distance(position) <= distance;
                            if close && keeper.map_or(true, |best| k < best) {
                                keeper = Some(k);
                            }
                        }
                    }
                }
            }
            match keeper {
                Some(k) => {
                    target[v.index()] = k;
                    merged += 1;
                }
                None => grid.entry(cell).or_default().push(v),
            }
        }

        if merged == 0 {
            return Ok(MergeReport::identity(self.vertices.len(), self.faces.len()));
        }

        // compact vertices, keepers first get their new slots
        let mut vertex_map = vec![VertexId(u32::MAX); self.vertices.len()];
        let mut vertices = Vec::with_capacity(self.vertices.len() - merged);
        for (i, vertex) in self.vertices.iter().enumerate() {
            if target[i].index() == i {
                vertex_map[i] = VertexId(vertices.len() as u32);
                vertices.push(vertex.clone());
            }
        }
        for i in 0..self.vertices.len() {
            let keeper = target[i].index();
            if keeper != i {
                vertex_map[i] = vertex_map[keeper];
                if self.vertices[i].select {
                    vertices[vertex_map[keeper].index()].select = true;
                }
            }
        }
        self.vertices = vertices;

        // faces
        let mut face_map = Vec::with_capacity(self.faces.len());
        let mut faces = Vec::with_capacity(self.faces.len());
        for mut face in std::mem::take(&mut self.faces) {
            let mut loop_verts: Vec<VertexId> = Vec::with_capacity(face.verts.len());
            for v in &face.verts {
                let mapped = vertex_map[v.index()];
                if loop_verts.last() != Some(&mapped) {
                    loop_verts.push(mapped);
                }
            }
            while loop_verts.len() > 1 && loop_verts.first() == loop_verts.last() {
                loop_verts.pop();
            }
            let distinct: HashSet<VertexId> = loop_verts.iter().copied().collect();
            if loop_verts.len() < 3 || distinct.len() != loop_verts.len() {
                face_map.push(None);
                continue;
            }
            face.verts = loop_verts;
            face_map.push(Some(FaceId(faces.len() as u32)));
            faces.push(face);
        }
        self.faces = faces;
        self.active_face = self.active_face.and_then(|f| face_map[f.index()]);

        // edges
        let mut fused: HashMap<(VertexId, VertexId), usize> = HashMap::new();
        let mut edges: Vec<Edge> = Vec::with_capacity(self.edges.len());
        for edge in std::mem::take(&mut self.edges) {
            let a = vertex_map[edge.verts[0].index()];
            let b = vertex_map[edge.verts[1].index()];
            if a == b {
                continue;
            }
            match fused.get(&edge_key(a, b)) {
                Some(&slot) => {
                    let existing = &mut edges[slot];
                    existing.smooth &= edge.smooth;
                    existing.select |= edge.select;
                }
                None => {
                    fused.insert(edge_key(a, b), edges.len());
                    edges.push(Edge {
                        verts: [a, b],
                        ..edge
                    });
                }
            }
        }
        self.edges = edges;
        self.rebuild_adjacency();
        self.update_face_normals();

        log::debug!(
            "merge_by_distance: welded {} of {} vertices at {}",
            merged,
            candidates.len(),
            distance
        );

        Ok(MergeReport {
            merged,
            vertex_map,
            face_map,
        })
    }

    // =========================================================================
    // DELETION
    // =========================================================================

    /// Deletes faces together with the edges only they used.
    ///
    /// Vertices are never removed. Returns the new id of every pre-delete
    /// face (`None` for deleted ones).
    pub fn delete_faces(&mut self, faces: &[FaceId]) -> EditMeshResult<Vec<Option<FaceId>>> {
        for &f in faces {
            self.face(f)?;
        }
        let doomed: HashSet<FaceId> = faces.iter().copied().collect();

        let mut candidate_edges: HashSet<(VertexId, VertexId)> = HashSet::new();
        let mut face_map = Vec::with_capacity(self.faces.len());
        let mut kept = Vec::with_capacity(self.faces.len() - doomed.len());
        for (i, face) in std::mem::take(&mut self.faces).into_iter().enumerate() {
            if doomed.contains(&FaceId(i as u32)) {
                candidate_edges.extend(face.edge_pairs().map(|(a, b)| edge_key(a, b)));
                face_map.push(None);
            } else {
                face_map.push(Some(FaceId(kept.len() as u32)));
                kept.push(face);
            }
        }
        self.faces = kept;

        let still_used: HashSet<(VertexId, VertexId)> = self
            .faces
            .iter()
            .flat_map(|f| f.edge_pairs().map(|(a, b)| edge_key(a, b)))
            .collect();
        self.edges.retain(|e| {
            let key = edge_key(e.verts[0], e.verts[1]);
            !candidate_edges.contains(&key) || still_used.contains(&key)
        });
        self.rebuild_adjacency();
        self.active_face = self.active_face.and_then(|f| face_map[f.index()]);

        Ok(face_map)
    }

    // =========================================================================
    // WINDING
    // =========================================================================

    /// Reverses the winding of a face.
    pub fn flip_face(&mut self, face: FaceId) -> EditMeshResult<()> {
        self.face(face)?;
        let face = &mut self.faces[face.index()];
        face.verts.reverse();
        face.normal = -face.normal;
        Ok(())
    }

    /// Makes the winding of `faces` consistent and points it outward.
    ///
    /// Winding is propagated across shared edges within each connected
    /// group of the given faces. A group is then flipped as a whole when its
    /// area-weighted normals point towards the group's centroid.
    pub fn recalc_face_normals(&mut self, faces: &[FaceId]) -> EditMeshResult<()> {
        for &f in faces {
            self.face(f)?;
        }
        let members: BTreeSet<FaceId> = faces.iter().copied().collect();

        let mut by_edge: HashMap<(VertexId, VertexId), Vec<FaceId>> = HashMap::new();
        for &f in &members {
            for (a, b) in self.faces[f.index()].edge_pairs() {
                by_edge.entry(edge_key(a, b)).or_default().push(f);
            }
        }

        let mut visited: HashSet<FaceId> = HashSet::new();
        for &seed in &members {
            if !visited.insert(seed) {
                continue;
            }
            let mut group = vec![seed];
            let mut queue = VecDeque::from([seed]);
            while let Some(current) = queue.pop_front() {
                let pairs: Vec<(VertexId, VertexId)> =
                    self.faces[current.index()].edge_pairs().collect();
                for (a, b) in pairs {
                    for &neighbor in &by_edge[&edge_key(a, b)] {
                        if visited.contains(&neighbor) {
                            continue;
                        }
                        visited.insert(neighbor);
                        // consistent neighbours walk the shared edge backwards
                        if self.faces[neighbor.index()].has_directed_edge(a, b) {
                            self.flip_face(neighbor)?;
                        }
                        group.push(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }

            let centers: Vec<DVec3> = group
                .iter()
                .map(|&f| self.face_center(f))
                .collect::<EditMeshResult<_>>()?;
            let centroid = centers.iter().sum::<DVec3>() / centers.len() as f64;
            let outwardness: f64 = group
                .iter()
                .zip(&centers)
                .map(|(&f, &c)| (c - centroid).dot(self.newell_normal(&self.faces[f.index()].verts)))
                .sum();
            if outwardness < 0.0 {
                for &f in &group {
                    self.flip_face(f)?;
                }
            }
        }
        Ok(())
    }

    fn check_vertices(&self, verts: &[VertexId]) -> EditMeshResult<()> {
        verts.iter().try_for_each(|&v| self.vertex(v).map(|_| ()))
    }
}

fn unique(verts: &[VertexId]) -> BTreeSet<VertexId> {
    verts.iter().copied().collect()
}
