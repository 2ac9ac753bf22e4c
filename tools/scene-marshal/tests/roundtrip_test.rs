//! Library-level round-trip tests
//!
//! Builds scene values by hand the way a host-side caller would, pushes
//! them through both converter directions, and checks that counts, shapes,
//! and field schemas survive.

use glam::{Mat4, Vec3};
use scene_common::schema::SCENE_FIELDS;
use scene_common::{Camera, Node, NodeTree};
use scene_marshal::convert::{scene_from_value, scene_to_value, tree_from_value, tree_to_value};
use scene_marshal::value::{StructArray, Value};

/// A scene value with one 4-vertex, 2-face mesh, one default camera, and a
/// root node instancing mesh 0.
fn sample_scene_value() -> Value {
    let mut faces = StructArray::new(2);
    faces.set_indices(0, "indices", &[0, 1, 2]);
    faces.set_indices(1, "indices", &[1, 2, 3]);

    let mut meshes = StructArray::new(1);
    meshes.set_text(0, "name", "quad");
    meshes.set_xyz(
        0,
        "vertices",
        &[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
    );
    meshes.set_struct(0, "faces", faces);

    // a blank camera element: every field takes its default on conversion
    let cameras = StructArray::new(1);

    let mut root = StructArray::new(1);
    root.set_text(0, "name", "root");
    root.set_indices(0, "meshIndices", &[0]);

    let mut scene = StructArray::new(1);
    scene.set_struct(0, "cameras", cameras);
    scene.set_struct(0, "meshes", meshes);
    scene.set_struct(0, "rootNode", root);
    Value::Struct(scene)
}

#[test]
fn test_end_to_end_scene_round_trip() {
    let scene = scene_from_value(&sample_scene_value());

    assert_eq!(scene.cameras.len(), 1);
    assert_eq!(scene.cameras[0], Camera::default());
    assert!(scene.lights.is_empty());
    assert!(scene.materials.is_empty());
    assert_eq!(scene.meshes.len(), 1);
    assert_eq!(scene.meshes[0].positions.len(), 4);
    assert_eq!(scene.meshes[0].faces.len(), 2);
    assert_eq!(scene.root.root().mesh_indices, vec![0]);

    let value = scene_to_value(&scene);
    let array = value.as_struct().expect("scene value is a struct");
    for field in SCENE_FIELDS {
        assert!(array.has_field(field), "missing scene field {field}");
    }

    // back once more: counts must be unchanged
    let back = scene_from_value(&value);
    assert_eq!(back.meshes[0].positions.len(), 4);
    assert_eq!(back.meshes[0].faces.len(), 2);
    assert_eq!(back.root.root().mesh_indices, vec![0]);

    // the redundant face counts are emitted equal to each index list
    let meshes = array.get_struct(0, "meshes").unwrap();
    let faces = meshes.get_struct(0, "faces").unwrap();
    assert_eq!(faces.get_scalar(0, "nIndices", 0.0), 3.0);
    assert_eq!(faces.get_scalar(1, "nIndices", 0.0), 3.0);
}

#[test]
fn test_empty_scene_value_round_trip() {
    let scene = scene_from_value(&Value::Struct(StructArray::new(1)));
    assert!(scene.meshes.is_empty());

    let value = scene_to_value(&scene);
    let array = value.as_struct().unwrap();
    for field in SCENE_FIELDS {
        assert!(array.has_field(field));
    }
    let cameras = array.get_struct(0, "cameras").unwrap();
    assert!(cameras.is_empty());
    assert!(cameras.has_field("name"));
}

fn branching_tree(depth: usize, arity: usize) -> NodeTree {
    let mut tree = NodeTree::with_root(Node {
        name: "root".to_string(),
        ..Node::default()
    });
    let mut frontier = vec![0usize];
    for level in 1..=depth {
        let mut next = Vec::new();
        for &parent in &frontier {
            for child in 0..arity {
                let index = tree.push_child(
                    parent,
                    Node {
                        name: format!("n{level}_{child}"),
                        transform: Mat4::from_translation(Vec3::new(
                            level as f32,
                            child as f32,
                            0.0,
                        )),
                        mesh_indices: vec![child as u32],
                        ..Node::default()
                    },
                );
                next.push(index);
            }
        }
        frontier = next;
    }
    tree
}

#[test]
fn test_node_tree_shape_survives_round_trip() {
    let tree = branching_tree(3, 2);
    let expected_len = 1 + 2 + 4 + 8;
    assert_eq!(tree.len(), expected_len);

    let (value, out_count) = tree_to_value(&tree);
    assert_eq!(out_count, expected_len);

    let (back, in_count) = tree_from_value(&value);
    assert_eq!(in_count, expected_len);
    assert_eq!(back.len(), expected_len);

    // depth-first construction order makes the arenas comparable directly
    for (node, original) in back.nodes.iter().zip(tree.nodes.iter()) {
        assert_eq!(node.name, original.name);
        assert_eq!(node.transform, original.transform);
        assert_eq!(node.mesh_indices, original.mesh_indices);
        assert_eq!(node.children.len(), original.children.len());
    }

    // every non-root node's parent is its immediate structural parent
    for (index, node) in back.nodes.iter().enumerate().skip(1) {
        let parent = node.parent.expect("non-root node has a parent");
        assert!(back.nodes[parent].children.contains(&index));
    }
    assert_eq!(back.nodes[0].parent, None);
}
