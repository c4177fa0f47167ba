//! # Consolidation
//!
//! Merges the parts of an assembly into one solid while keeping the parts
//! whose tag the caller excluded as standalone children.
//!
//! ## Result shapes
//!
//! - Nothing excluded: the merged solid itself, named after the assembly.
//! - Some parts excluded: an assembly root holding a `merged` solid and the
//!   excluded parts.
//! - Everything excluded: an assembly root holding every part.
//!
//! Merged parts have their transforms baked into world-space vertices.
//! Standalone parts keep their transform as the node's local transform.

use crate::scene::{MaterialRef, Node, Solid};
use log::debug;
use lowpoly_mesh::Mesh;
use std::fmt::Debug;
use std::rc::Rc;

/// Name of the merged solid under an assembly root.
pub const MERGED_NODE_NAME: &str = "merged";

/// A solid of an assembly. Untagged parts are always merged.
#[derive(Debug, Clone)]
pub struct Part<T> {
    pub tag: Option<T>,
    pub solid: Solid,
}

impl<T> Part<T> {
    /// A part that cannot be excluded from the merge.
    pub fn fixed(solid: Solid) -> Self {
        Self { tag: None, solid }
    }

    pub fn tagged(tag: T, solid: Solid) -> Self {
        Self {
            tag: Some(tag),
            solid,
        }
    }
}

/// Merges every part whose tag is not in `excluded`.
///
/// # Example
///
/// ```rust
/// use lowpoly_vehicles::builders::car_light::{create_car_light, PartialCarLightOptions};
/// use lowpoly_vehicles::{consolidate, Part, Scene};
///
/// let mut scene = Scene::new();
/// let a = create_car_light("a", &mut scene, PartialCarLightOptions::default()).unwrap();
/// let b = create_car_light("b", &mut scene, PartialCarLightOptions::default()).unwrap();
/// let total = a.mesh.triangle_count() + b.mesh.triangle_count();
///
/// let node = consolidate("lights", vec![Part::tagged(1, a), Part::tagged(2, b)], &[]);
/// assert_eq!(node.name, "lights");
/// assert_eq!(node.total_triangle_count(), total);
/// ```
pub fn consolidate<T>(name: &str, parts: Vec<Part<T>>, excluded: &[T]) -> Node
where
    T: PartialEq + Debug,
{
    let part_count = parts.len();
    let (to_merge, standalone): (Vec<_>, Vec<_>) = parts
        .into_iter()
        .partition(|part| part.tag.as_ref().map_or(true, |tag| !excluded.contains(tag)));

    debug!(
        "consolidating '{}': {} of {} parts merged, standalone {:?}",
        name,
        to_merge.len(),
        part_count,
        standalone.iter().map(|p| &p.solid.name).collect::<Vec<_>>()
    );

    if to_merge.is_empty() {
        let mut root = Node::group(name);
        for part in standalone {
            root.add_child(part.solid.into());
        }
        return root;
    }

    let merged = merge_solids(to_merge.into_iter().map(|p| p.solid));

    if standalone.is_empty() {
        return Node {
            name: name.to_string(),
            ..merged.into()
        };
    }

    let mut root = Node::group(name);
    root.add_child(Node {
        name: MERGED_NODE_NAME.to_string(),
        ..merged.into()
    });
    for part in standalone {
        root.add_child(part.solid.into());
    }
    root
}

/// Bakes and appends solids into one, sharing material slots between parts
/// that use the same material handle.
pub fn merge_solids(solids: impl IntoIterator<Item = Solid>) -> Solid {
    let mut mesh = Mesh::new();
    let mut materials: Vec<MaterialRef> = Vec::new();

    for mut solid in solids {
        solid.bake();
        let slot_map: Vec<usize> = solid
            .materials
            .iter()
            .map(|material| slot_of(&mut materials, material))
            .collect();
        mesh.append(&solid.mesh, &slot_map);
    }

    Solid::with_materials(MERGED_NODE_NAME, mesh, materials)
}

fn slot_of(materials: &mut Vec<MaterialRef>, material: &MaterialRef) -> usize {
    match materials.iter().position(|m| Rc::ptr_eq(m, material)) {
        Some(slot) => slot,
        None => {
            materials.push(Rc::clone(material));
            materials.len() - 1
        }
    }
}
