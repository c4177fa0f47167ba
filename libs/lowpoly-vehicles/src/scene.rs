//! # Scene
//!
//! The host-side objects builders create: materials, solids and the node
//! tree returned by the composers.
//!
//! A [`Solid`] is one part under construction. It owns its mesh, one
//! material per slot of the mesh, and a pending [`Transform`] that is baked
//! into the vertex data on demand. A [`Node`] is what a builder hands back
//! to the host.

use crate::color::Color3;
use glam::DVec3;
use lowpoly_mesh::{Mesh, Transform};
use std::rc::Rc;

// =============================================================================
// MATERIALS
// =============================================================================

/// A standard material: diffuse, emissive and specular color plus alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Color3,
    pub emissive: Color3,
    pub specular: Color3,
    pub alpha: f64,
    /// Set once the material is not expected to change after the build
    pub frozen: bool,
}

impl Material {
    /// White diffuse, black emissive, white specular, opaque.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse: Color3::WHITE,
            emissive: Color3::BLACK,
            specular: Color3::WHITE,
            alpha: 1.0,
            frozen: false,
        }
    }

    pub fn with_diffuse(mut self, diffuse: Color3) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_emissive(mut self, emissive: Color3) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_specular(mut self, specular: Color3) -> Self {
        self.specular = specular;
        self
    }

    /// Marks the material immutable.
    pub fn freeze(mut self) -> Self {
        self.frozen = true;
        self
    }
}

/// Shared handle to a material. Parts that share a handle share the
/// material.
pub type MaterialRef = Rc<Material>;

/// Registry of everything a build creates.
#[derive(Debug, Default)]
pub struct Scene {
    materials: Vec<MaterialRef>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a material and returns its shared handle.
    pub fn add_material(&mut self, material: Material) -> MaterialRef {
        let handle = Rc::new(material);
        self.materials.push(Rc::clone(&handle));
        handle
    }

    /// Registers a fresh default material.
    pub fn default_material(&mut self, name: &str) -> MaterialRef {
        self.add_material(Material::new(name))
    }

    pub fn materials(&self) -> &[MaterialRef] {
        &self.materials
    }
}

// =============================================================================
// SOLIDS
// =============================================================================

/// A part: mesh, material per slot and a pending transform.
#[derive(Debug, Clone)]
pub struct Solid {
    pub name: String,
    pub mesh: Mesh,
    /// Material for each slot referenced by the mesh
    pub materials: Vec<MaterialRef>,
    /// Not yet applied to the vertices
    pub transform: Transform,
}

impl Solid {
    /// Single-material solid.
    pub fn new(name: impl Into<String>, mesh: Mesh, material: MaterialRef) -> Self {
        Self::with_materials(name, mesh, vec![material])
    }

    /// Multi-material solid; slot `i` of the mesh uses `materials[i]`.
    pub fn with_materials(name: impl Into<String>, mesh: Mesh, materials: Vec<MaterialRef>) -> Self {
        Self {
            name: name.into(),
            mesh,
            materials,
            transform: Transform::IDENTITY,
        }
    }

    /// Bakes the pending transform into the vertices and resets it.
    pub fn bake(&mut self) {
        self.mesh.bake(&self.transform);
        self.transform = Transform::IDENTITY;
    }

    /// Baked copy mirrored across the plane through the origin whose normal
    /// is `axis`.
    ///
    /// Exactly one coordinate is negated and every face keeps pointing
    /// outwards.
    pub fn mirrored(&self, name: impl Into<String>, axis: MirrorAxis) -> Solid {
        let mut copy = self.clone();
        copy.name = name.into();
        copy.bake();
        copy.mesh.bake(&Transform::from_scaling(axis.scaling()));
        copy
    }

    /// Vertices with the pending transform applied.
    pub fn world_vertices(&self) -> Vec<DVec3> {
        let matrix = self.transform.matrix();
        self.mesh
            .vertices()
            .iter()
            .map(|v| matrix.transform_point3(*v))
            .collect()
    }

    /// World-space bounding box of the vertices.
    pub fn world_bounds(&self) -> (DVec3, DVec3) {
        let vertices = self.world_vertices();
        let Some(first) = vertices.first().copied() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        vertices
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)))
    }
}

/// Axis whose coordinate a mirror negates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAxis {
    X,
    Y,
    Z,
}

impl MirrorAxis {
    fn scaling(self) -> DVec3 {
        match self {
            MirrorAxis::X => DVec3::new(-1.0, 1.0, 1.0),
            MirrorAxis::Y => DVec3::new(1.0, -1.0, 1.0),
            MirrorAxis::Z => DVec3::new(1.0, 1.0, -1.0),
        }
    }
}

// =============================================================================
// NODES
// =============================================================================

/// A node of the tree handed back to the host.
///
/// A leaf carries a mesh and its materials; an assembly root carries only
/// children.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: String,
    pub mesh: Option<Mesh>,
    pub materials: Vec<MaterialRef>,
    /// Local transform relative to the parent
    pub transform: Transform,
    pub children: Vec<Node>,
}

impl Node {
    /// Empty assembly root.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// Names of this node and every descendant, depth first.
    pub fn names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        for child in &self.children {
            names.extend(child.names());
        }
        names
    }

    /// Finds a descendant (or this node) by name.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Triangles in this node and every descendant.
    pub fn total_triangle_count(&self) -> usize {
        let own = self.mesh.as_ref().map_or(0, Mesh::triangle_count);
        own + self
            .children
            .iter()
            .map(Node::total_triangle_count)
            .sum::<usize>()
    }
}

impl From<Solid> for Node {
    /// Leaf node keeping the solid's pending transform as its local transform.
    fn from(solid: Solid) -> Self {
        Self {
            name: solid.name,
            mesh: Some(solid.mesh),
            materials: solid.materials,
            transform: solid.transform,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle_solid(scene: &mut Scene) -> Solid {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(0.0, 0.0, 1.0));
        mesh.add_vertex(DVec3::new(1.0, 0.0, 1.0));
        mesh.add_vertex(DVec3::new(0.0, 1.0, 1.0));
        mesh.add_triangle(0, 1, 2);
        let material = scene.default_material("mat");
        Solid::new("tri", mesh, material)
    }

    #[test]
    fn test_scene_registers_materials() {
        let mut scene = Scene::new();
        let a = scene.default_material("a");
        let b = scene.add_material(Material::new("b").with_diffuse(Color3::BLACK).freeze());
        assert_eq!(scene.materials().len(), 2);
        assert!(Rc::ptr_eq(&scene.materials()[0], &a));
        assert!(b.frozen);
    }

    #[test]
    fn test_bake_resets_transform() {
        let mut scene = Scene::new();
        let mut solid = triangle_solid(&mut scene);
        solid.transform.position = DVec3::new(0.0, 2.0, 0.0);
        solid.bake();
        assert_eq!(solid.transform, Transform::IDENTITY);
        assert_relative_eq!(solid.mesh.vertex(0).y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mirrored_negates_one_axis_and_reverses_winding() {
        let mut scene = Scene::new();
        let solid = triangle_solid(&mut scene);
        let mirror = solid.mirrored("mirror", MirrorAxis::Z);
        for (a, b) in solid.mesh.vertices().iter().zip(mirror.mesh.vertices()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
            assert_eq!(a.z, -b.z);
        }
        assert_eq!(mirror.mesh.triangle(0), [0, 2, 1]);
        assert_eq!(mirror.name, "mirror");
    }

    #[test]
    fn test_world_bounds_apply_pending_transform() {
        let mut scene = Scene::new();
        let mut solid = triangle_solid(&mut scene);
        solid.transform.position.x = 10.0;
        let (min, max) = solid.world_bounds();
        assert_relative_eq!(min.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(max.x, 11.0, epsilon = 1e-12);
        // mesh itself untouched
        assert_eq!(solid.mesh.vertex(1).x, 1.0);
    }

    #[test]
    fn test_node_tree_helpers() {
        let mut scene = Scene::new();
        let mut root = Node::group("root");
        root.add_child(triangle_solid(&mut scene).into());
        let mut inner = Node::group("inner");
        inner.add_child(Node::group("leaf"));
        root.add_child(inner);

        assert_eq!(root.descendant_count(), 3);
        assert_eq!(root.names(), vec!["root", "tri", "inner", "leaf"]);
        assert!(root.find("leaf").is_some());
        assert!(root.find("missing").is_none());
        assert_eq!(root.total_triangle_count(), 1);
    }
}
