//! Mesh and face conversion
//!
//! A mesh carries one required position channel and a set of optional
//! parallel channels. A channel survives conversion only when its length
//! matches the vertex count exactly; anything else is dropped with a
//! trace note rather than producing a ragged mesh.

use glam::Vec3;
use scene_common::flags::PRIMITIVE_TABLE;
use scene_common::schema::{
    color_channel_field, tex_coord_channel_field, FACE_FIELDS, MESH_FIELDS,
};
use scene_common::{Face, Mesh, MAX_COLOR_CHANNELS, MAX_TEXCOORD_CHANNELS};

use crate::value::{StructArray, Value};

pub fn meshes_from_value(value: &Value) -> Vec<Mesh> {
    let Some(array) = value.as_struct() else {
        return Vec::new();
    };
    (0..array.len()).map(|i| mesh_from_element(array, i)).collect()
}

fn mesh_from_element(array: &StructArray, i: usize) -> Mesh {
    let positions = array.get_xyz(i, "vertices");
    let vertex_count = positions.len();

    let channel = |label: &str, data: Vec<Vec3>| -> Option<Vec<Vec3>> {
        keep_channel(label, data, vertex_count)
    };

    Mesh {
        name: array.get_text(i, "name", ""),
        material_index: array.get_scalar(i, "materialIndex", 0.0) as u32,
        primitive_types: array
            .get_struct(i, "primitiveTypes")
            .map(primitive_struct_to_bits)
            .unwrap_or(0),
        faces: array
            .get_struct(i, "faces")
            .map(faces_from_struct)
            .unwrap_or_default(),
        normals: channel("normals", array.get_xyz(i, "normals")),
        tangents: channel("tangents", array.get_xyz(i, "tangents")),
        bitangents: channel("bitangents", array.get_xyz(i, "bitangents")),
        colors: std::array::from_fn(|c| {
            keep_channel(
                &color_channel_field(c),
                array.get_rgba(i, &color_channel_field(c)),
                vertex_count,
            )
        }),
        tex_coords: std::array::from_fn(|c| {
            keep_channel(
                &tex_coord_channel_field(c),
                array.get_xyz(i, &tex_coord_channel_field(c)),
                vertex_count,
            )
        }),
        positions,
    }
}

/// Keep an optional per-vertex channel only when it is present and exactly
/// parallel to the position channel.
fn keep_channel<T>(label: &str, data: Vec<T>, vertex_count: usize) -> Option<Vec<T>> {
    if data.is_empty() {
        return None;
    }
    if data.len() != vertex_count {
        tracing::debug!(
            "dropping {} channel with {} entries for {} vertices",
            label,
            data.len(),
            vertex_count
        );
        return None;
    }
    Some(data)
}

pub fn meshes_to_value(meshes: &[Mesh]) -> Value {
    let mut array = StructArray::with_schema(meshes.len(), MESH_FIELDS);
    for (i, mesh) in meshes.iter().enumerate() {
        array.set_text(i, "name", &mesh.name);
        array.set_scalar(i, "materialIndex", mesh.material_index as f64);
        array.set_struct(i, "primitiveTypes", primitive_bits_to_struct(mesh.primitive_types));
        array.set_xyz(i, "vertices", &mesh.positions);
        array.set_struct(i, "faces", faces_to_struct(&mesh.faces));
        for c in 0..MAX_COLOR_CHANNELS {
            array.set_rgba(
                i,
                &color_channel_field(c),
                mesh.colors[c].as_deref().unwrap_or(&[]),
            );
        }
        array.set_xyz(i, "normals", mesh.normals.as_deref().unwrap_or(&[]));
        array.set_xyz(i, "tangents", mesh.tangents.as_deref().unwrap_or(&[]));
        array.set_xyz(i, "bitangents", mesh.bitangents.as_deref().unwrap_or(&[]));
        for c in 0..MAX_TEXCOORD_CHANNELS {
            array.set_xyz(
                i,
                &tex_coord_channel_field(c),
                mesh.tex_coords[c].as_deref().unwrap_or(&[]),
            );
        }
    }
    Value::Struct(array)
}

/// Convert a face struct array. The redundant `nIndices` field is ignored
/// on the way in; the index list alone is authoritative.
pub fn faces_from_struct(array: &StructArray) -> Vec<Face> {
    (0..array.len())
        .map(|i| Face {
            indices: array.get_indices(i, "indices"),
        })
        .collect()
}

/// Convert faces to a struct array, emitting `nIndices` equal to each
/// index list's length.
pub fn faces_to_struct(faces: &[Face]) -> StructArray {
    let mut array = StructArray::with_schema(faces.len(), FACE_FIELDS);
    for (i, face) in faces.iter().enumerate() {
        array.set_scalar(i, "nIndices", face.indices.len() as f64);
        array.set_indices(i, "indices", &face.indices);
    }
    array
}

/// Decode the primitive-kind struct-of-logicals to a bitmask.
pub fn primitive_struct_to_bits(array: &StructArray) -> u32 {
    let mut bits = 0;
    for (name, bit) in PRIMITIVE_TABLE {
        if array.get_logical(0, name, false) {
            bits |= bit;
        }
    }
    bits
}

/// Encode a primitive-kind bitmask as a struct of logicals, one field per
/// declared bit.
pub fn primitive_bits_to_struct(bits: u32) -> StructArray {
    let mut array = StructArray::new(1);
    for (name, bit) in PRIMITIVE_TABLE {
        array.set_logical(0, name, bits & bit != 0);
    }
    array
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use scene_common::{PRIMITIVE_LINE, PRIMITIVE_TRIANGLE};

    fn quad_mesh() -> Mesh {
        Mesh {
            name: "quad".to_string(),
            primitive_types: PRIMITIVE_TRIANGLE,
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![
                Face { indices: vec![0, 1, 2] },
                Face { indices: vec![1, 2, 3] },
            ],
            normals: Some(vec![Vec3::Z; 4]),
            ..Mesh::default()
        }
    }

    #[test]
    fn test_mesh_round_trip() {
        let meshes = vec![quad_mesh()];
        let back = meshes_from_value(&meshes_to_value(&meshes));
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].name, "quad");
        assert_eq!(back[0].positions, meshes[0].positions);
        assert_eq!(back[0].faces, meshes[0].faces);
        assert_eq!(back[0].normals, meshes[0].normals);
        assert_eq!(back[0].primitive_types, PRIMITIVE_TRIANGLE);
        assert!(back[0].colors.iter().all(Option::is_none));
    }

    #[test]
    fn test_color_channels_round_trip() {
        let mut mesh = quad_mesh();
        mesh.colors[0] = Some(vec![Vec4::ONE; 4]);
        mesh.colors[3] = Some(vec![Vec4::new(1.0, 0.0, 0.0, 1.0); 4]);
        let back = meshes_from_value(&meshes_to_value(&[mesh]));
        assert!(back[0].colors[0].is_some());
        assert!(back[0].colors[1].is_none());
        assert!(back[0].colors[3].is_some());
    }

    #[test]
    fn test_mismatched_channel_dropped() {
        let mut array = StructArray::new(1);
        array.set_xyz(0, "vertices", &[Vec3::ZERO, Vec3::X]);
        array.set_xyz(0, "normals", &[Vec3::Z]);
        let meshes = meshes_from_value(&Value::Struct(array));
        assert_eq!(meshes[0].positions.len(), 2);
        assert!(meshes[0].normals.is_none());
    }

    #[test]
    fn test_faces_recompute_count() {
        let mut array = StructArray::new(1);
        // lying nIndices is ignored; the index list wins
        array.set_scalar(0, "nIndices", 12.0);
        array.set_indices(0, "indices", &[0, 1, 2]);
        let faces = faces_from_struct(&array);
        assert_eq!(faces[0].indices, vec![0, 1, 2]);

        let out = faces_to_struct(&faces);
        assert_eq!(out.get_scalar(0, "nIndices", 0.0), 3.0);
    }

    #[test]
    fn test_primitive_bits_round_trip() {
        let bits = PRIMITIVE_TRIANGLE | PRIMITIVE_LINE;
        let array = primitive_bits_to_struct(bits);
        assert!(array.get_logical(0, "triangle", false));
        assert!(array.get_logical(0, "line", false));
        assert!(!array.get_logical(0, "point", false));
        assert_eq!(primitive_struct_to_bits(&array), bits);
    }

    #[test]
    fn test_empty_meshes_keep_schema() {
        let value = meshes_to_value(&[]);
        let array = value.as_struct().unwrap();
        assert!(array.is_empty());
        assert!(array.has_field("textureCoordinates7"));
    }
}
