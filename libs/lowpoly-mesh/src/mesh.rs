//! # Mesh Data Structure
//!
//! Core mesh representation with vertices, triangles, normals and
//! material slots.
//!
//! Material slots are described by [`SubMesh`] ranges over the triangle
//! list. A mesh without explicit ranges renders every triangle with slot 0.

use crate::transform::Transform;
use config::constants::DEGENERATE_AREA_EPSILON;
use glam::{DMat4, DVec3};

/// A contiguous run of triangles rendered with one material slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMesh {
    /// Index into the owner's material list
    pub material_index: usize,
    /// First triangle of the run
    pub triangle_start: usize,
    /// Number of triangles in the run
    pub triangle_count: usize,
}

impl SubMesh {
    /// Creates a new triangle range.
    pub fn new(material_index: usize, triangle_start: usize, triangle_count: usize) -> Self {
        Self {
            material_index,
            triangle_start,
            triangle_count,
        }
    }

    /// One past the last triangle of the run.
    #[inline]
    pub fn triangle_end(&self) -> usize {
        self.triangle_start + self.triangle_count
    }
}

/// A triangle mesh with vertices and indices.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens when handing buffers to a renderer.
///
/// # Example
///
/// ```rust
/// use lowpoly_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Optional vertex normals
    normals: Option<Vec<DVec3>>,
    /// Material slot ranges; empty means one slot covering everything
    submeshes: Vec<SubMesh>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            normals: None,
            submeshes: Vec::new(),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Mutable access to vertex positions.
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [DVec3] {
        &mut self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Sets vertex normals.
    pub fn set_normals(&mut self, normals: Vec<DVec3>) {
        self.normals = Some(normals);
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    // =========================================================================
    // MATERIAL SLOTS
    // =========================================================================

    /// Replaces the material slot ranges.
    pub fn set_submeshes(&mut self, submeshes: Vec<SubMesh>) {
        self.submeshes = submeshes;
    }

    /// Appends a material slot range.
    pub fn add_submesh(&mut self, submesh: SubMesh) {
        self.submeshes.push(submesh);
    }

    /// Material slot ranges covering the triangle list.
    ///
    /// A mesh without explicit ranges reports a single slot-0 range over all
    /// triangles.
    pub fn submeshes(&self) -> Vec<SubMesh> {
        if self.submeshes.is_empty() {
            vec![SubMesh::new(0, 0, self.triangles.len())]
        } else {
            self.submeshes.clone()
        }
    }

    /// Number of distinct material slots referenced by the ranges.
    pub fn material_slot_count(&self) -> usize {
        self.submeshes()
            .iter()
            .map(|s| s.material_index + 1)
            .max()
            .unwrap_or(1)
    }

    /// Sum of triangles assigned to the given material slot.
    pub fn triangles_in_slot(&self, material_index: usize) -> usize {
        self.submeshes()
            .iter()
            .filter(|s| s.material_index == material_index)
            .map(|s| s.triangle_count)
            .sum()
    }

    // =========================================================================
    // NORMALS AND BOUNDS
    // =========================================================================

    /// Computes and sets smooth vertex normals from the triangle topology.
    ///
    /// Face normals are area weighted. Vertices not referenced by any
    /// non-degenerate triangle keep a zero normal.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for tri in &self.triangles {
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];

            let normal = (v1 - v0).cross(v2 - v0);

            normals[tri[0] as usize] += normal;
            normals[tri[1] as usize] += normal;
            normals[tri[2] as usize] += normal;
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = Some(normals);
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Half the size of the bounding box on each axis.
    pub fn extend_size(&self) -> DVec3 {
        let (min, max) = self.bounding_box();
        (max - min) * 0.5
    }

    /// Centre of the bounding box.
    pub fn bounding_center(&self) -> DVec3 {
        let (min, max) = self.bounding_box();
        (min + max) * 0.5
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    /// Transforms all vertices by a 4x4 matrix.
    ///
    /// Normals go through the inverse transpose. A mirroring matrix
    /// (negative determinant) also reverses the winding of every triangle so
    /// faces keep pointing outwards.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }

        if let Some(normals) = &mut self.normals {
            let normal_matrix = matrix.inverse().transpose();
            for n in normals {
                *n = normal_matrix.transform_vector3(*n).normalize_or_zero();
            }
        }

        if matrix.determinant() < 0.0 {
            self.reverse_winding();
        }
    }

    /// Bakes a position/rotation/scaling triple into the vertex data.
    pub fn bake(&mut self, transform: &Transform) {
        if transform.is_identity() {
            return;
        }
        self.transform(&transform.matrix());
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    // =========================================================================
    // TOPOLOGY
    // =========================================================================

    /// Merges another mesh into this one, keeping its material slots.
    pub fn merge(&mut self, other: &Mesh) {
        let identity: Vec<usize> = (0..other.material_slot_count()).collect();
        self.append(other, &identity);
    }

    /// Appends another mesh, mapping its material slot `i` to `slot_map[i]`.
    ///
    /// Slots missing from `slot_map` keep their own index.
    pub fn append(&mut self, other: &Mesh, slot_map: &[usize]) {
        let vertex_offset = self.vertices.len() as u32;
        let triangle_offset = self.triangles.len();

        let mut ranges = self.submeshes();
        if self.triangles.is_empty() {
            ranges.clear();
        }

        let had_normals = self.normals.is_some() || self.vertices.is_empty();
        self.vertices.extend_from_slice(&other.vertices);

        for tri in &other.triangles {
            self.triangles.push([
                tri[0] + vertex_offset,
                tri[1] + vertex_offset,
                tri[2] + vertex_offset,
            ]);
        }

        for range in other.submeshes() {
            if range.triangle_count == 0 {
                continue;
            }
            let slot = slot_map
                .get(range.material_index)
                .copied()
                .unwrap_or(range.material_index);
            ranges.push(SubMesh::new(
                slot,
                range.triangle_start + triangle_offset,
                range.triangle_count,
            ));
        }
        self.submeshes = ranges;

        self.normals = match (had_normals, self.normals.take(), &other.normals) {
            (true, Some(mut own), Some(theirs)) => {
                own.extend_from_slice(theirs);
                Some(own)
            }
            (true, None, Some(theirs)) => Some(theirs.clone()),
            _ => None,
        };
    }

    /// Reverses the winding order of every triangle.
    pub fn reverse_winding(&mut self) {
        for tri in &mut self.triangles {
            tri.swap(1, 2);
        }
    }

    /// Turns the mesh inside out: reverses winding and negates normals.
    pub fn flip_faces(&mut self) {
        self.reverse_winding();
        if let Some(normals) = &mut self.normals {
            for n in normals {
                *n = -*n;
            }
        }
    }

    /// Converts to flat shading.
    ///
    /// Every triangle gets its own three vertices and the face normal, so the
    /// vertex count becomes three times the triangle count. Triangle order
    /// and material ranges are preserved.
    pub fn to_flat_shaded(&mut self) {
        let mut vertices = Vec::with_capacity(self.triangles.len() * 3);
        let mut normals = Vec::with_capacity(self.triangles.len() * 3);
        let mut triangles = Vec::with_capacity(self.triangles.len());

        for tri in &self.triangles {
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

            let base = vertices.len() as u32;
            vertices.extend_from_slice(&[v0, v1, v2]);
            normals.extend_from_slice(&[normal, normal, normal]);
            triangles.push([base, base + 1, base + 2]);
        }

        self.vertices = vertices;
        self.triangles = triangles;
        self.normals = Some(normals);
    }

    /// Appends a back-facing copy of every triangle.
    ///
    /// The copy duplicates the vertices, reverses winding and negates normals.
    /// Each material range gains a twin range over the copied triangles.
    pub fn double_sided(&mut self) {
        let vertex_offset = self.vertices.len() as u32;
        let triangle_offset = self.triangles.len();
        let ranges = self.submeshes();

        self.vertices.extend_from_within(..);

        let back: Vec<[u32; 3]> = self
            .triangles
            .iter()
            .map(|t| [t[0] + vertex_offset, t[2] + vertex_offset, t[1] + vertex_offset])
            .collect();
        self.triangles.extend(back);

        if let Some(normals) = &mut self.normals {
            let back: Vec<DVec3> = normals.iter().map(|n| -*n).collect();
            normals.extend(back);
        }

        if !self.submeshes.is_empty() {
            let twins: Vec<SubMesh> = ranges
                .iter()
                .map(|r| {
                    SubMesh::new(
                        r.material_index,
                        r.triangle_start + triangle_offset,
                        r.triangle_count,
                    )
                })
                .collect();
            self.submeshes.extend(twins);
        }
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats a vertex index
    /// - Normals, when present, match the vertex count
    /// - Material ranges stay inside the triangle list
    ///
    /// Zero-area triangles are allowed; swept parts taper to points. Use
    /// [`Mesh::degenerate_triangle_count`] to inspect them.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for tri in &self.triangles {
            if tri[0] >= vertex_count || tri[1] >= vertex_count || tri[2] >= vertex_count {
                return false;
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }
        }

        if let Some(normals) = &self.normals {
            if normals.len() != self.vertices.len() {
                return false;
            }
        }

        self.submeshes
            .iter()
            .all(|s| s.triangle_end() <= self.triangles.len())
    }

    /// Number of triangles with (near) zero area.
    pub fn degenerate_triangle_count(&self) -> usize {
        self.triangles
            .iter()
            .filter(|tri| {
                let v0 = self.vertices[tri[0] as usize];
                let v1 = self.vertices[tri[1] as usize];
                let v2 = self.vertices[tri[2] as usize];
                (v1 - v0).cross(v2 - v0).length() < DEGENERATE_AREA_EPSILON
            })
            .count()
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        let mut result = Vec::with_capacity(self.triangles.len() * 3);
        for tri in &self.triangles {
            result.extend_from_slice(tri);
        }
        result
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_ref().map(|normals| {
            let mut result = Vec::with_capacity(normals.len() * 3);
            for n in normals {
                result.push(n.x as f32);
                result.push(n.y as f32);
                result.push(n.z as f32);
            }
            result
        })
    }
}
