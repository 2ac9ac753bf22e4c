//! Integration tests for the scene-marshal binary
//!
//! Drives the compiled CLI end to end: generate fixtures in a temp dir,
//! run commands, verify the emitted files and status output.

use std::path::Path;
use std::process::Command;

use scene_marshal::value::{read_value_file, Value};
use tempfile::tempdir;

fn run(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_scene-marshal"))
        .args(args)
        .output()
        .expect("Failed to run scene-marshal");
    assert!(
        output.status.success(),
        "scene-marshal {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

fn write_quad_obj(path: &Path) {
    let contents = concat!(
        "# unit square, one quad face\n",
        "v 0 0 0\n",
        "v 1 0 0\n",
        "v 1 1 0\n",
        "v 0 1 0\n",
        "f 1 2 3 4\n",
    );
    std::fs::write(path, contents).expect("Failed to write OBJ fixture");
}

#[test]
fn test_constant_command_emits_schema() {
    let stdout = run(&["constant", "camera"]);
    let value: Value = serde_json::from_str(&stdout).expect("constant output is a value");
    let array = value.as_struct().expect("camera constant is a struct");
    assert_eq!(array.len(), 1);
    assert!(array.has_field("aspectRatio"));
    assert!(array.has_field("clipPlaneNear"));
}

#[test]
fn test_unknown_constant_emits_empty_value() {
    let stdout = run(&["constant", "gizmo"]);
    let value: Value = serde_json::from_str(&stdout).expect("output is a value");
    assert!(value.is_empty());
}

#[test]
fn test_import_applies_triangulate_step() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("quad.obj");
    let value_path = dir.path().join("quad.value.json");
    write_quad_obj(&obj_path);

    run(&[
        "import",
        obj_path.to_str().unwrap(),
        "-o",
        value_path.to_str().unwrap(),
        "--steps",
        "triangulate",
    ]);

    let value = read_value_file(&value_path).expect("Failed to read value file");
    let scene = scene_marshal::scene_from_value(&value);
    assert_eq!(scene.meshes.len(), 1);
    assert_eq!(scene.meshes[0].positions.len(), 4);
    // the quad face was fan-split on import
    assert_eq!(scene.meshes[0].faces.len(), 2);
    assert!(scene.meshes[0].faces.iter().all(|f| f.indices.len() == 3));
}

#[test]
fn test_import_export_round_trip_through_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("quad.obj");
    let value_path = dir.path().join("quad.value.json");
    let scene_path = dir.path().join("quad.scene.json");
    write_quad_obj(&obj_path);

    run(&[
        "import",
        obj_path.to_str().unwrap(),
        "-o",
        value_path.to_str().unwrap(),
    ]);

    let stdout = run(&[
        "export",
        value_path.to_str().unwrap(),
        "json",
        scene_path.to_str().unwrap(),
    ]);
    assert_eq!(stdout.trim(), "0", "export reports success");
    assert!(scene_path.exists(), "exported scene file exists");

    // re-import the exported scene and compare counts
    let value_path2 = dir.path().join("quad2.value.json");
    run(&[
        "import",
        scene_path.to_str().unwrap(),
        "-o",
        value_path2.to_str().unwrap(),
    ]);
    let value = read_value_file(&value_path2).expect("Failed to read value file");
    let scene = scene_marshal::scene_from_value(&value);
    assert_eq!(scene.meshes.len(), 1);
    assert_eq!(scene.meshes[0].positions.len(), 4);
    assert_eq!(scene.meshes[0].faces.len(), 1);
    assert_eq!(scene.root.root().mesh_indices, vec![0]);
}

#[test]
fn test_export_unknown_format_reports_failure_status() {
    let dir = tempdir().expect("Failed to create temp dir");
    let value_path = dir.path().join("scene.value.json");
    let out_path = dir.path().join("scene.glb");

    // a minimal scene value: an empty struct is enough to convert
    std::fs::write(
        &value_path,
        serde_json::to_string(&Value::Struct(scene_marshal::StructArray::new(1))).unwrap(),
    )
    .unwrap();

    let stdout = run(&[
        "export",
        value_path.to_str().unwrap(),
        "glb",
        out_path.to_str().unwrap(),
    ]);
    assert_eq!(stdout.trim(), "-1", "unknown format reports failure");
    assert!(!out_path.exists());
}

#[test]
fn test_roundtrip_command_xyz() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("xyz.value.json");

    let value = Value::Double {
        dims: vec![3, 2],
        data: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    };
    std::fs::write(&input, serde_json::to_string(&value).unwrap()).unwrap();

    let stdout = run(&["roundtrip", "xyz", input.to_str().unwrap()]);
    let back: Value = serde_json::from_str(&stdout).expect("output is a value");
    assert_eq!(back, value);
}

#[test]
fn test_build_command_runs_manifest_jobs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("quad.obj");
    write_quad_obj(&obj_path);

    let manifest_path = dir.path().join("jobs.toml");
    let manifest = format!(
        "[[jobs]]\ninput = {:?}\noutput = \"quad.json\"\nsteps = [\"triangulate\"]\n",
        obj_path
    );
    std::fs::write(&manifest_path, manifest).unwrap();

    run(&[
        "build",
        manifest_path.to_str().unwrap(),
        "-o",
        dir.path().to_str().unwrap(),
    ]);

    let built = dir.path().join("quad.json");
    assert!(built.exists(), "manifest job output exists");
    let scene = scene_marshal::import_scene(&built).expect("Failed to read built scene");
    assert_eq!(scene.meshes[0].faces.len(), 2);
}

#[test]
fn test_import_with_steps_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("quad.obj");
    let steps_path = dir.path().join("steps.value.json");
    let value_path = dir.path().join("quad.value.json");
    write_quad_obj(&obj_path);

    // a flags struct with only triangulate set
    let steps = scene_marshal::postprocess::steps_to_value(scene_common::STEP_TRIANGULATE);
    std::fs::write(&steps_path, serde_json::to_string(&steps).unwrap()).unwrap();

    run(&[
        "import",
        obj_path.to_str().unwrap(),
        "-o",
        value_path.to_str().unwrap(),
        "--steps-file",
        steps_path.to_str().unwrap(),
    ]);

    let value = read_value_file(&value_path).expect("Failed to read value file");
    let scene = scene_marshal::scene_from_value(&value);
    assert_eq!(scene.meshes[0].faces.len(), 2);
}
