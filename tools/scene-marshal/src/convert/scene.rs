//! Top-level scene conversion
//!
//! The orchestrator: converts each entity category in a fixed order
//! (cameras, lights, materials, meshes, embedded textures, root node).
//! A category that is missing or malformed converts to empty without
//! disturbing its siblings, and the dynamic output always carries all six
//! top-level fields.

use scene_common::schema::SCENE_FIELDS;
use scene_common::Scene;

use super::{
    cameras_from_value, cameras_to_value, lights_from_value, lights_to_value,
    materials_from_value, materials_to_value, meshes_from_value, meshes_to_value, tree_from_value,
    tree_to_value, textures_from_value, textures_to_value,
};
use crate::value::{StructArray, Value};

pub fn scene_from_value(value: &Value) -> Scene {
    let Some(array) = value.as_struct() else {
        tracing::warn!("scene value is not a struct; producing an empty scene");
        return Scene::default();
    };

    let scene = Scene {
        cameras: array
            .get(0, "cameras")
            .map(cameras_from_value)
            .unwrap_or_default(),
        lights: array
            .get(0, "lights")
            .map(lights_from_value)
            .unwrap_or_default(),
        materials: array
            .get(0, "materials")
            .map(materials_from_value)
            .unwrap_or_default(),
        meshes: array
            .get(0, "meshes")
            .map(meshes_from_value)
            .unwrap_or_default(),
        textures: array
            .get(0, "embeddedTextures")
            .map(textures_from_value)
            .unwrap_or_default(),
        root: array
            .get(0, "rootNode")
            .map(|root| {
                let (tree, converted) = tree_from_value(root);
                tracing::debug!("converted {} nodes", converted);
                tree
            })
            .unwrap_or_default(),
    };
    tracing::debug!(
        "scene from value: {} cameras, {} lights, {} materials, {} meshes, {} textures, {} nodes",
        scene.cameras.len(),
        scene.lights.len(),
        scene.materials.len(),
        scene.meshes.len(),
        scene.textures.len(),
        scene.root.len()
    );
    scene
}

pub fn scene_to_value(scene: &Scene) -> Value {
    let mut array = StructArray::with_schema(1, SCENE_FIELDS);
    array.set(0, "cameras", cameras_to_value(&scene.cameras));
    array.set(0, "lights", lights_to_value(&scene.lights));
    array.set(0, "materials", materials_to_value(&scene.materials));
    array.set(0, "meshes", meshes_to_value(&scene.meshes));
    array.set(0, "embeddedTextures", textures_to_value(&scene.textures));
    let (root, converted) = tree_to_value(&scene.root);
    tracing::debug!("converted {} nodes", converted);
    array.set(0, "rootNode", root);
    Value::Struct(array)
}
