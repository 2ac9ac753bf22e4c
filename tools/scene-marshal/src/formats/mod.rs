//! Scene file formats
//!
//! Two formats are built in: `json` (the full scene graph, lossless) and
//! `obj` (meshes only, lossy). Import dispatches on the file extension;
//! export takes an explicit format id from the declared table.

mod json;
mod obj;

use std::path::{Path, PathBuf};

use scene_common::Scene;
use thiserror::Error;

/// One entry of the export-format table.
pub struct ExportFormat {
    pub id: &'static str,
    pub extension: &'static str,
    pub description: &'static str,
}

/// Formats accepted by export, in display order.
pub const EXPORT_FORMATS: [ExportFormat; 2] = [
    ExportFormat {
        id: "json",
        extension: "json",
        description: "Full scene graph as JSON",
    },
    ExportFormat {
        id: "obj",
        extension: "obj",
        description: "Wavefront OBJ (meshes only, lossy)",
    },
];

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown export format: {0:?}")]
    UnknownFormat(String),
    #[error("unsupported scene file extension: {0:?} (use .json or .obj)")]
    UnsupportedExtension(PathBuf),
    #[error("no vertices found in OBJ file")]
    EmptyMesh,
}

pub type FormatResult<T> = Result<T, FormatError>;

/// Look up a declared export format by id.
pub fn find_format(id: &str) -> Option<&'static ExportFormat> {
    EXPORT_FORMATS.iter().find(|format| format.id == id)
}

/// Read a scene file, dispatching on the extension.
pub fn import_scene(path: &Path) -> FormatResult<Scene> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let scene = match ext.as_str() {
        "json" => json::read_scene(path)?,
        "obj" => obj::read_scene(path)?,
        _ => return Err(FormatError::UnsupportedExtension(path.to_path_buf())),
    };

    tracing::info!(
        "Loaded scene from {:?}: {} cameras, {} lights, {} materials, {} meshes, {} textures, {} nodes",
        path,
        scene.cameras.len(),
        scene.lights.len(),
        scene.materials.len(),
        scene.meshes.len(),
        scene.textures.len(),
        scene.root.len()
    );
    Ok(scene)
}

/// Write a scene file in the named format.
pub fn export_scene(scene: &Scene, format_id: &str, path: &Path) -> FormatResult<()> {
    let format = find_format(format_id)
        .ok_or_else(|| FormatError::UnknownFormat(format_id.to_string()))?;
    match format.id {
        "json" => json::write_scene(scene, path)?,
        "obj" => obj::write_scene(scene, path)?,
        _ => unreachable!("format table entry without a writer"),
    }
    tracing::info!("Exported {} scene to {:?}", format.id, path);
    Ok(())
}
