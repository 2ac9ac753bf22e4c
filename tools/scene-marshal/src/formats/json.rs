//! JSON scene files
//!
//! The lossless on-disk form: the serialized scene graph itself.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use scene_common::Scene;

use super::FormatResult;

pub fn read_scene(path: &Path) -> FormatResult<Scene> {
    let file = File::open(path)?;
    let scene = serde_json::from_reader(BufReader::new(file))?;
    Ok(scene)
}

pub fn write_scene(scene: &Scene, path: &Path) -> FormatResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, scene)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use scene_common::{Face, Mesh};

    #[test]
    fn test_json_scene_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("scene.json");

        let mut scene = Scene::default();
        scene.meshes.push(Mesh {
            name: "tri".to_string(),
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            faces: vec![Face {
                indices: vec![0, 1, 2],
            }],
            ..Mesh::default()
        });
        scene.root.nodes[0].mesh_indices.push(0);

        write_scene(&scene, &path).expect("Failed to write scene");
        let back = read_scene(&path).expect("Failed to read scene");
        assert_eq!(back.meshes.len(), 1);
        assert_eq!(back.meshes[0].positions, scene.meshes[0].positions);
        assert_eq!(back.root.nodes[0].mesh_indices, vec![0]);
    }
}
