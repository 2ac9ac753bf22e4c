//! OBJ scene files
//!
//! Mesh-only, lossy interchange. Faces keep their source arity; splitting
//! polygons is the triangulate postprocess step's job, not the parser's.
//! OBJ keeps separate index spaces per attribute, so vertices are expanded
//! per face corner on the way in.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use glam::Vec3;
use scene_common::flags::primitive_bits_for_arity;
use scene_common::{Face, Material, MaterialProperty, Mesh, Node, NodeTree, PropertyData, Scene};

use super::{FormatError, FormatResult};

pub fn read_scene(path: &Path) -> FormatResult<Scene> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut positions: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<[f32; 2]> = Vec::new();
    let mut normals_raw: Vec<Vec3> = Vec::new();

    // Final vertex data (expanded from faces)
    let mut final_positions: Vec<Vec3> = Vec::new();
    let mut final_uvs: Vec<Vec3> = Vec::new();
    let mut final_normals: Vec<Vec3> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();
    let mut primitive_types = 0u32;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "v" if parts.len() >= 4 => {
                let x: f32 = parts[1].parse().unwrap_or(0.0);
                let y: f32 = parts[2].parse().unwrap_or(0.0);
                let z: f32 = parts[3].parse().unwrap_or(0.0);
                positions.push(Vec3::new(x, y, z));
            }
            "vt" if parts.len() >= 3 => {
                let u: f32 = parts[1].parse().unwrap_or(0.0);
                let v: f32 = parts[2].parse().unwrap_or(0.0);
                tex_coords.push([u, v]);
            }
            "vn" if parts.len() >= 4 => {
                let x: f32 = parts[1].parse().unwrap_or(0.0);
                let y: f32 = parts[2].parse().unwrap_or(0.0);
                let z: f32 = parts[3].parse().unwrap_or(0.0);
                normals_raw.push(Vec3::new(x, y, z));
            }
            "f" if parts.len() >= 4 => {
                let face_verts: Vec<(usize, Option<usize>, Option<usize>)> = parts[1..]
                    .iter()
                    .filter_map(|v| parse_obj_vertex(v))
                    .collect();

                if face_verts.len() < 3 {
                    continue;
                }

                let mut indices = Vec::with_capacity(face_verts.len());
                for (vi, vti, vni) in face_verts {
                    indices.push(final_positions.len() as u32);
                    final_positions.push(positions.get(vi).copied().unwrap_or(Vec3::ZERO));

                    if let Some(ti) = vti {
                        let uv = tex_coords.get(ti).copied().unwrap_or([0.0, 0.0]);
                        final_uvs.push(Vec3::new(uv[0], uv[1], 0.0));
                    }
                    if let Some(ni) = vni {
                        final_normals.push(normals_raw.get(ni).copied().unwrap_or(Vec3::Y));
                    }
                }
                primitive_types |= primitive_bits_for_arity(indices.len());
                faces.push(Face { indices });
            }
            _ => {}
        }
    }

    if final_positions.is_empty() {
        return Err(FormatError::EmptyMesh);
    }

    // Channels survive only when every face corner carried them
    let has_uvs = !final_uvs.is_empty() && final_uvs.len() == final_positions.len();
    let has_normals = !final_normals.is_empty() && final_normals.len() == final_positions.len();

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_string();

    let mut mesh = Mesh {
        name: name.clone(),
        material_index: 0,
        primitive_types,
        positions: final_positions,
        faces,
        ..Mesh::default()
    };
    if has_normals {
        mesh.normals = Some(final_normals);
    }
    if has_uvs {
        mesh.tex_coords[0] = Some(final_uvs);
    }

    Ok(Scene {
        meshes: vec![mesh],
        materials: vec![Material {
            properties: vec![MaterialProperty {
                key: "?mat.name".to_string(),
                data: PropertyData::Text("default".to_string()),
                ..MaterialProperty::default()
            }],
        }],
        root: NodeTree::with_root(Node {
            name,
            mesh_indices: vec![0],
            ..Node::default()
        }),
        ..Scene::default()
    })
}

/// Parse OBJ vertex reference: "v", "v/vt", "v/vt/vn", or "v//vn"
fn parse_obj_vertex(s: &str) -> Option<(usize, Option<usize>, Option<usize>)> {
    let parts: Vec<&str> = s.split('/').collect();

    let vi = parts.first()?.parse::<usize>().ok()?.checked_sub(1)?; // OBJ indices are 1-based

    let vti = parts
        .get(1)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<usize>().ok())
        .and_then(|i| i.checked_sub(1));

    let vni = parts
        .get(2)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<usize>().ok())
        .and_then(|i| i.checked_sub(1));

    Some((vi, vti, vni))
}

pub fn write_scene(scene: &Scene, path: &Path) -> FormatResult<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    let mut offset = 1usize; // OBJ indices are 1-based
    for mesh in &scene.meshes {
        let has_uvs = mesh.tex_coords[0].is_some();
        let has_normals = mesh.normals.is_some();

        if !mesh.name.is_empty() {
            writeln!(w, "o {}", mesh.name)?;
        }
        for p in &mesh.positions {
            writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
        }
        if let Some(uvs) = &mesh.tex_coords[0] {
            for uv in uvs {
                writeln!(w, "vt {} {}", uv.x, uv.y)?;
            }
        }
        if let Some(normals) = &mesh.normals {
            for n in normals {
                writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
            }
        }
        for face in &mesh.faces {
            write!(w, "f")?;
            for &index in &face.indices {
                let i = index as usize + offset;
                match (has_uvs, has_normals) {
                    (false, false) => write!(w, " {i}")?,
                    (true, false) => write!(w, " {i}/{i}")?,
                    (false, true) => write!(w, " {i}//{i}")?,
                    (true, true) => write!(w, " {i}/{i}/{i}")?,
                }
            }
            writeln!(w)?;
        }
        offset += mesh.positions.len();
    }

    Ok(())
}
