//! Node hierarchy conversion
//!
//! The only recursive converter. The dynamic side nests each node's
//! children as a sub-struct-array; the typed side is a flat arena indexed
//! by position, parents before children. Both directions walk depth-first
//! and return the number of nodes converted (the node itself plus all
//! descendants) as a diagnostic figure; no caller depends on it for
//! correctness.

use glam::Mat4;
use scene_common::schema::NODE_FIELDS;
use scene_common::{Node, NodeTree};

use crate::value::{StructArray, Value};

/// Build a node tree from a dynamic root-node struct. Returns the tree and
/// the converted-node count; a missing or malformed root yields a default
/// single-node tree and a count of zero.
pub fn tree_from_value(value: &Value) -> (NodeTree, usize) {
    let mut tree = NodeTree { nodes: Vec::new() };
    let count = match value.as_struct() {
        Some(array) if !array.is_empty() => build_node(array, 0, None, &mut tree),
        _ => 0,
    };
    if tree.nodes.is_empty() {
        return (NodeTree::default(), 0);
    }
    (tree, count)
}

fn build_node(
    array: &StructArray,
    element: usize,
    parent: Option<usize>,
    tree: &mut NodeTree,
) -> usize {
    let index = tree.nodes.len();
    tree.nodes.push(Node {
        name: array.get_text(element, "name", ""),
        transform: array
            .get_mat4(element, "transformation")
            .first()
            .copied()
            .unwrap_or(Mat4::IDENTITY),
        mesh_indices: array.get_indices(element, "meshIndices"),
        parent,
        children: Vec::new(),
    });
    if let Some(parent_index) = parent {
        tree.nodes[parent_index].children.push(index);
    }

    let mut converted = 1;
    if let Some(children) = array.get_struct(element, "children") {
        for child in 0..children.len() {
            converted += build_node(children, child, Some(index), tree);
        }
    }
    converted
}

/// Convert a node tree back to the nested dynamic form. Returns the value
/// and the converted-node count. Out-of-range or revisited child indices
/// are skipped so a malformed tree cannot recurse forever.
pub fn tree_to_value(tree: &NodeTree) -> (Value, usize) {
    if tree.is_empty() {
        return (Value::empty(), 0);
    }
    let mut visited = vec![false; tree.len()];
    let mut root = StructArray::with_schema(1, NODE_FIELDS);
    let count = write_node(tree, 0, &mut root, 0, &mut visited);
    (Value::Struct(root), count)
}

fn write_node(
    tree: &NodeTree,
    index: usize,
    array: &mut StructArray,
    slot: usize,
    visited: &mut [bool],
) -> usize {
    visited[index] = true;
    let node = &tree.nodes[index];
    array.set_text(slot, "name", &node.name);
    array.set_indices(slot, "meshIndices", &node.mesh_indices);
    array.set_mat4(slot, "transformation", &[node.transform]);

    let children: Vec<usize> = node
        .children
        .iter()
        .copied()
        .filter(|&child| {
            let ok = child < tree.len() && !visited[child];
            if !ok {
                tracing::warn!("skipping invalid child index {} of node {}", child, index);
            }
            ok
        })
        .collect();

    // a childless node keeps its empty children field from the schema
    let mut converted = 1;
    if !children.is_empty() {
        let mut child_array = StructArray::with_schema(children.len(), NODE_FIELDS);
        for (child_slot, child) in children.into_iter().enumerate() {
            converted += write_node(tree, child, &mut child_array, child_slot, visited);
        }
        array.set_struct(slot, "children", child_array);
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> NodeTree {
        // root -> (a -> (c), b)
        let mut tree = NodeTree::with_root(Node {
            name: "root".to_string(),
            mesh_indices: vec![0],
            ..Node::default()
        });
        let a = tree.push_child(0, Node {
            name: "a".to_string(),
            transform: Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0)),
            ..Node::default()
        });
        tree.push_child(a, Node {
            name: "c".to_string(),
            mesh_indices: vec![1, 2],
            ..Node::default()
        });
        tree.push_child(0, Node {
            name: "b".to_string(),
            ..Node::default()
        });
        tree
    }

    #[test]
    fn test_tree_round_trip_preserves_shape() {
        let tree = sample_tree();
        let (value, count_out) = tree_to_value(&tree);
        assert_eq!(count_out, 4);

        let (back, count_in) = tree_from_value(&value);
        assert_eq!(count_in, 4);
        assert_eq!(back.len(), tree.len());
        for (node, original) in back.nodes.iter().zip(tree.nodes.iter()) {
            assert_eq!(node.name, original.name);
            assert_eq!(node.transform, original.transform);
            assert_eq!(node.mesh_indices, original.mesh_indices);
            assert_eq!(node.children.len(), original.children.len());
        }
    }

    #[test]
    fn test_parents_link_to_structural_parent() {
        let (value, _) = tree_to_value(&sample_tree());
        let (back, _) = tree_from_value(&value);
        assert_eq!(back.nodes[0].parent, None);
        for index in 1..back.len() {
            let parent = back.nodes[index].parent.expect("non-root node has a parent");
            assert!(back.nodes[parent].children.contains(&index));
        }
    }

    #[test]
    fn test_childless_root_has_empty_children_field() {
        let tree = NodeTree::default();
        let (value, count) = tree_to_value(&tree);
        assert_eq!(count, 1);
        let array = value.as_struct().unwrap();
        assert!(array.has_field("children"));
        assert!(array.get(0, "children").unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_degrades_to_default_tree() {
        let (tree, count) = tree_from_value(&Value::empty());
        assert_eq!(count, 0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_cyclic_tree_does_not_hang() {
        let mut tree = sample_tree();
        // corrupt: make node 2 claim the root as a child
        tree.nodes[2].children.push(0);
        let (_, count) = tree_to_value(&tree);
        assert_eq!(count, 4);
    }
}
