//! # Mesh Data Structure
//!
//! Index-based polygon mesh with vertices, edges and faces.
//!
//! Edges are unordered vertex pairs kept unique through a lookup table.
//! Faces are ordered vertex loops with a cached Newell normal. All
//! positions are `f64`.
//!
//! Per-vertex edge and face lists are kept next to the lookup table, so
//! adjacency queries never scan the whole mesh.

mod edit;


pub use edit::MergeReport;

use crate::error::{EditMeshError, EditMeshResult};
use glam::DVec3;
use std::collections::HashMap;

/// Unique identifier for vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// Unique identifier for edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

/// Unique identifier for faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub u32);

impl VertexId {
    /// Storage index of this vertex.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    /// Storage index of this edge.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceId {
    /// Storage index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Vertex data structure
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Position in object space
    pub position: DVec3,
    /// Unit normal in object space
    pub normal: DVec3,
    /// Selection state
    pub select: bool,
}

impl Vertex {
    /// Creates an unselected vertex whose normal points away from the origin.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            normal: loose_normal(position),
            select: false,
        }
    }
}

/// Edge data structure
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Endpoints in creation order
    pub verts: [VertexId; 2],
    /// Smooth shading across this edge
    pub smooth: bool,
    /// Selection state
    pub select: bool,
}

impl Edge {
    /// Returns the endpoint opposite to `vertex`, if `vertex` is an endpoint.
    pub fn other_vert(&self, vertex: VertexId) -> Option<VertexId> {
        if self.verts[0] == vertex {
            Some(self.verts[1])
        } else if self.verts[1] == vertex {
            Some(self.verts[0])
        } else {
            None
        }
    }

    /// Returns true if `vertex` is one of the endpoints.
    #[inline]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.verts[0] == vertex || self.verts[1] == vertex
    }
}

/// Face data structure
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    verts: Vec<VertexId>,
    normal: DVec3,
    /// Smooth shading of the face
    pub smooth: bool,
    /// Selection state
    pub select: bool,
}

impl Face {
    /// Vertex loop of the face.
    #[inline]
    pub fn verts(&self) -> &[VertexId] {
        &self.verts
    }

    /// Cached unit normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Number of corners.
    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// Always false; faces hold at least three vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Consecutive vertex pairs of the loop, starting at the first corner.
    pub fn edge_pairs(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        let n = self.verts.len();
        (0..n).map(move |i| (self.verts[i], self.verts[(i + 1) % n]))
    }

    /// Returns true if `a` is directly followed by `b` in the loop.
    pub fn has_directed_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.edge_pairs().any(|(u, v)| u == a && v == b)
    }
}

/// Editable polygon mesh.
///
/// # Example
///
/// ```rust
/// use edit_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let v = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
/// assert_eq!(mesh.vertex(v).unwrap().position, DVec3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    edge_lookup: HashMap<(VertexId, VertexId), EdgeId>,
    vertex_edges: Vec<Vec<EdgeId>>,
    vertex_faces: Vec<Vec<FaceId>>,
    active_face: Option<FaceId>,
    auto_smooth: bool,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // =========================================================================
    // ELEMENT ACCESS
    // =========================================================================

    /// Returns the vertex with the given id.
    pub fn vertex(&self, id: VertexId) -> EditMeshResult<&Vertex> {
        self.vertices
            .get(id.index())
            .ok_or(EditMeshError::InvalidVertex(id))
    }

    /// Returns the edge with the given id.
    pub fn edge(&self, id: EdgeId) -> EditMeshResult<&Edge> {
        self.edges.get(id.index()).ok_or(EditMeshError::InvalidEdge(id))
    }

    /// Returns the face with the given id.
    pub fn face(&self, id: FaceId) -> EditMeshResult<&Face> {
        self.faces.get(id.index()).ok_or(EditMeshError::InvalidFace(id))
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, id: VertexId) -> EditMeshResult<DVec3> {
        self.vertex(id).map(|v| v.position)
    }

    /// All vertices in id order.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges in id order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All faces in id order.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Iterates vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len() as u32).map(VertexId)
    }

    /// Iterates edge ids.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len() as u32).map(EdgeId)
    }

    /// Iterates face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> {
        (0..self.faces.len() as u32).map(FaceId)
    }

    /// Positions of several vertices, in the given order.
    pub fn positions(&self, ids: &[VertexId]) -> EditMeshResult<Vec<DVec3>> {
        ids.iter().map(|&id| self.position(id)).collect()
    }

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Adds a vertex and returns its id.
    pub fn add_vertex(&mut self, position: DVec3) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex::new(position));
        self.vertex_edges.push(Vec::new());
        self.vertex_faces.push(Vec::new());
        id
    }

    /// Adds a vertex with an explicit normal (normalized on insertion).
    pub fn add_vertex_with_normal(&mut self, position: DVec3, normal: DVec3) -> VertexId {
        let id = self.add_vertex(position);
        self.vertices[id.index()].normal = normal.try_normalize().unwrap_or(DVec3::Z);
        id
    }

    /// Adds an edge, or returns the existing edge between the two vertices.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> EditMeshResult<EdgeId> {
        self.vertex(a)?;
        self.vertex(b)?;
        if a == b {
            return Err(EditMeshError::DegenerateEdge(a));
        }
        Ok(self.ensure_edge(a, b))
    }

    /// Adds a face from a vertex loop and creates its missing edges.
    ///
    /// The loop needs at least three distinct, existing vertices.
    pub fn add_face(&mut self, verts: &[VertexId]) -> EditMeshResult<FaceId> {
        if verts.len() < 3 {
            return Err(EditMeshError::degenerate_face(format!(
                "face needs at least 3 vertices, got {}",
                verts.len()
            )));
        }
        for &v in verts {
            self.vertex(v)?;
        }
        for (i, v) in verts.iter().enumerate() {
            if verts[i + 1..].contains(v) {
                return Err(EditMeshError::degenerate_face(format!(
                    "vertex {v:?} appears twice in the loop"
                )));
            }
        }

        let id = FaceId(self.faces.len() as u32);
        let mut face = Face {
            verts: verts.to_vec(),
            normal: DVec3::ZERO,
            smooth: false,
            select: false,
        };
        face.normal = self.newell_normal(&face.verts).normalize_or_zero();
        for (a, b) in face.edge_pairs() {
            self.ensure_edge(a, b);
        }
        for v in &face.verts {
            self.vertex_faces[v.index()].push(id);
        }
        self.faces.push(face);
        Ok(id)
    }

    fn ensure_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let key = edge_key(a, b);
        if let Some(&id) = self.edge_lookup.get(&key) {
            return id;
        }
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            verts: [a, b],
            smooth: true,
            select: false,
        });
        self.edge_lookup.insert(key, id);
        self.vertex_edges[a.index()].push(id);
        self.vertex_edges[b.index()].push(id);
        id
    }

    /// Rebuilds the edge lookup and the per-vertex lists after vertices,
    /// edges or faces were replaced wholesale.
    pub(crate) fn rebuild_adjacency(&mut self) {
        let count = self.vertices.len();
        self.edge_lookup = HashMap::with_capacity(self.edges.len());
        self.vertex_edges = vec![Vec::new(); count];
        self.vertex_faces = vec![Vec::new(); count];
        for (i, e) in self.edges.iter().enumerate() {
            let id = EdgeId(i as u32);
            self.edge_lookup.insert(edge_key(e.verts[0], e.verts[1]), id);
            for v in e.verts {
                self.vertex_edges[v.index()].push(id);
            }
        }
        for (i, f) in self.faces.iter().enumerate() {
            for v in &f.verts {
                self.vertex_faces[v.index()].push(FaceId(i as u32));
            }
        }
    }

    // =========================================================================
    // TOPOLOGY QUERIES
    // =========================================================================

    /// Finds the edge connecting two vertices.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_lookup.get(&edge_key(a, b)).copied()
    }

    /// Edges that have `vertex` as an endpoint, in id order.
    pub fn vertex_edges(&self, vertex: VertexId) -> EditMeshResult<Vec<EdgeId>> {
        self.vertex(vertex)?;
        Ok(self.vertex_edges[vertex.index()].clone())
    }

    /// Faces that use `vertex`, in id order.
    pub fn vertex_faces(&self, vertex: VertexId) -> EditMeshResult<Vec<FaceId>> {
        self.vertex(vertex)?;
        Ok(self.vertex_faces[vertex.index()].clone())
    }

    /// Faces bordering `edge`, in id order.
    pub fn edge_faces(&self, edge: EdgeId) -> EditMeshResult<Vec<FaceId>> {
        let [a, b] = self.edge(edge)?.verts;
        Ok(self.vertex_faces[a.index()]
            .iter()
            .copied()
            .filter(|&f| {
                let face = &self.faces[f.index()];
                face.has_directed_edge(a, b) || face.has_directed_edge(b, a)
            })
            .collect())
    }

    /// Edges of a face in loop order.
    pub fn face_edges(&self, id: FaceId) -> EditMeshResult<Vec<EdgeId>> {
        self.face(id)?
            .edge_pairs()
            .map(|(a, b)| self.find_edge(a, b).ok_or(EditMeshError::InvalidFace(id)))
            .collect()
    }

    /// Vector from the first to the second endpoint of an edge.
    pub fn edge_vector(&self, edge: EdgeId) -> EditMeshResult<DVec3> {
        let [a, b] = self.edge(edge)?.verts;
        Ok(self.vertices[b.index()].position - self.vertices[a.index()].position)
    }

    /// Length of an edge.
    pub fn edge_length(&self, edge: EdgeId) -> EditMeshResult<f64> {
        self.edge_vector(edge).map(|v| v.length())
    }

    /// Arithmetic mean of a face's corners.
    pub fn face_center(&self, face: FaceId) -> EditMeshResult<DVec3> {
        let face = self.face(face)?;
        let sum: DVec3 = face
            .verts
            .iter()
            .map(|v| self.vertices[v.index()].position)
            .sum();
        Ok(sum / face.verts.len() as f64)
    }

    /// Unit tangent of a face derived from its edges.
    ///
    /// Quads use the longer pair of opposite edges (summed so both point the
    /// same way); every other face uses its longest edge. The result lies in
    /// the face plane.
    pub fn face_tangent(&self, face: FaceId) -> EditMeshResult<DVec3> {
        let face = self.face(face)?;
        let p: Vec<DVec3> = face
            .verts
            .iter()
            .map(|v| self.vertices[v.index()].position)
            .collect();
        let n = p.len();

        let tangent = if n == 4 {
            let first = (p[1] - p[0], p[2] - p[3]);
            let second = (p[2] - p[1], p[3] - p[0]);
            let first_len = first.0.length() + first.1.length();
            let second_len = second.0.length() + second.1.length();
            if first_len >= second_len {
                first.0 + first.1
            } else {
                second.0 + second.1
            }
        } else {
            let mut longest = DVec3::ZERO;
            for i in 0..n {
                let edge = p[(i + 1) % n] - p[i];
                if edge.length_squared() > longest.length_squared() {
                    longest = edge;
                }
            }
            longest
        };

        let normal = face.normal;
        Ok((tangent - normal * tangent.dot(normal)).normalize_or_zero())
    }

    // =========================================================================
    // FLAGS
    // =========================================================================

    /// Sets the selection state of a vertex.
    pub fn select_vertex(&mut self, vertex: VertexId, select: bool) -> EditMeshResult<()> {
        self.vertex(vertex)?;
        self.vertices[vertex.index()].select = select;
        Ok(())
    }

    /// Sets the selection state of an edge and its endpoints.
    pub fn select_edge(&mut self, edge: EdgeId, select: bool) -> EditMeshResult<()> {
        let [a, b] = self.edge(edge)?.verts;
        self.edges[edge.index()].select = select;
        self.vertices[a.index()].select = select;
        self.vertices[b.index()].select = select;
        Ok(())
    }

    /// Sets the selection state of a face, its edges and its vertices.
    pub fn select_face(&mut self, face: FaceId, select: bool) -> EditMeshResult<()> {
        let edges = self.face_edges(face)?;
        let face = &mut self.faces[face.index()];
        face.select = select;
        for v in &face.verts {
            self.vertices[v.index()].select = select;
        }
        for e in edges {
            self.edges[e.index()].select = select;
        }
        Ok(())
    }

    /// Clears every selection flag.
    pub fn deselect_all(&mut self) {
        self.vertices.iter_mut().for_each(|v| v.select = false);
        self.edges.iter_mut().for_each(|e| e.select = false);
        self.faces.iter_mut().for_each(|f| f.select = false);
    }

    /// Selected vertices in id order.
    pub fn selected_vertices(&self) -> Vec<VertexId> {
        self.vertex_ids()
            .filter(|v| self.vertices[v.index()].select)
            .collect()
    }

    /// Selected edges in id order.
    pub fn selected_edges(&self) -> Vec<EdgeId> {
        self.edge_ids()
            .filter(|e| self.edges[e.index()].select)
            .collect()
    }

    /// Selected faces in id order.
    pub fn selected_faces(&self) -> Vec<FaceId> {
        self.face_ids()
            .filter(|f| self.faces[f.index()].select)
            .collect()
    }

    /// The active face, if any.
    #[inline]
    pub fn active_face(&self) -> Option<FaceId> {
        self.active_face
    }

    /// Sets or clears the active face.
    pub fn set_active_face(&mut self, face: Option<FaceId>) -> EditMeshResult<()> {
        if let Some(f) = face {
            self.face(f)?;
        }
        self.active_face = face;
        Ok(())
    }

    /// Whether sharp edges split smooth shading.
    #[inline]
    pub fn auto_smooth(&self) -> bool {
        self.auto_smooth
    }

    /// Enables or disables auto smooth.
    pub fn set_auto_smooth(&mut self, enabled: bool) {
        self.auto_smooth = enabled;
    }

    /// Marks a face as smooth or faceted.
    pub fn set_face_smooth(&mut self, face: FaceId, smooth: bool) -> EditMeshResult<()> {
        self.face(face)?;
        self.faces[face.index()].smooth = smooth;
        Ok(())
    }

    /// Marks an edge as smooth or sharp.
    pub fn set_edge_smooth(&mut self, edge: EdgeId, smooth: bool) -> EditMeshResult<()> {
        self.edge(edge)?;
        self.edges[edge.index()].smooth = smooth;
        Ok(())
    }

    /// Overrides the normal of a vertex (normalized on assignment).
    pub fn set_vertex_normal(&mut self, vertex: VertexId, normal: DVec3) -> EditMeshResult<()> {
        self.vertex(vertex)?;
        self.vertices[vertex.index()].normal = normal.try_normalize().unwrap_or(DVec3::Z);
        Ok(())
    }

    // =========================================================================
    // NORMALS & BOUNDS
    // =========================================================================

    /// Recomputes face normals and vertex normals.
    ///
    /// Vertex normals average the unit normals of linked faces. Vertices
    /// without faces keep their current normal.
    pub fn normal_update(&mut self) {
        self.update_face_normals();

        let mut sums = vec![DVec3::ZERO; self.vertices.len()];
        for face in &self.faces {
            for v in &face.verts {
                sums[v.index()] += face.normal;
            }
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            if let Some(normal) = sum.try_normalize() {
                vertex.normal = normal;
            }
        }
    }

    pub(crate) fn update_face_normals(&mut self) {
        let normals: Vec<DVec3> = self
            .faces
            .iter()
            .map(|f| self.newell_normal(&f.verts).normalize_or_zero())
            .collect();
        for (face, normal) in self.faces.iter_mut().zip(normals) {
            face.normal = normal;
        }
    }

    /// Newell normal of a vertex loop; its length is twice the polygon area.
    pub(crate) fn newell_normal(&self, verts: &[VertexId]) -> DVec3 {
        let n = verts.len();
        let mut normal = DVec3::ZERO;
        for i in 0..n {
            let a = self.vertices[verts[i].index()].position;
            let b = self.vertices[verts[(i + 1) % n].index()].position;
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        normal
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices[1..].iter().fold((first, first), |(min, max), v| {
            (min.min(v.position), max.max(v.position))
        }))
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face and edge indices are valid
    /// - No face repeats a vertex
    /// - Every face edge is registered
    pub fn validate(&self) -> bool {
        let count = self.vertices.len();
        let edges_ok = self.edges.iter().all(|e| {
            e.verts[0] != e.verts[1] && e.verts.iter().all(|v| v.index() < count)
        });
        let faces_ok = self.faces.iter().all(|f| {
            f.verts.len() >= 3
                && f.verts.iter().all(|v| v.index() < count)
                && f.verts
                    .iter()
                    .enumerate()
                    .all(|(i, v)| !f.verts[i + 1..].contains(v))
                && f.edge_pairs().all(|(a, b)| self.find_edge(a, b).is_some())
        });
        edges_ok
            && faces_ok
            && self.edge_lookup.len() == self.edges.len()
            && self.vertex_edges.len() == count
            && self.vertex_faces.len() == count
    }
}

#[inline]
pub(crate) fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn loose_normal(position: DVec3) -> DVec3 {
    position.try_normalize().unwrap_or(DVec3::Z)
}
