//! Postprocess step flags
//!
//! Steps cross the boundary as a struct of independent logicals and travel
//! internally as a bitmask. Two steps are applied in-process (triangulate,
//! genNormals); every other declared step is accepted, kept in the mask,
//! and logged as unapplied.

use glam::Vec3;
use scene_common::flags::{step_bit, STEP_TABLE};
use scene_common::{
    primitive_bits_for_arity, Face, Mesh, Scene, STEP_GEN_NORMALS, STEP_TRIANGULATE,
};

use crate::value::{StructArray, Value};

/// Decode a step struct-of-logicals to a bitmask. Anything that is not a
/// struct decodes to no steps.
pub fn steps_from_value(value: &Value) -> u32 {
    let Some(array) = value.as_struct() else {
        return 0;
    };
    let mut bits = 0;
    for (name, bit) in STEP_TABLE {
        if array.get_logical(0, name, false) {
            bits |= bit;
        }
    }
    bits
}

/// Encode a step bitmask as a struct of logicals, one field per declared
/// step.
pub fn steps_to_value(bits: u32) -> Value {
    let mut array = StructArray::new(1);
    for (name, bit) in STEP_TABLE {
        array.set_logical(0, name, bits & bit != 0);
    }
    Value::Struct(array)
}

/// Resolve CLI step names to a bitmask. Unknown names are reported and
/// skipped rather than failing the command.
pub fn step_bits_from_names(names: &[String]) -> u32 {
    let mut bits = 0;
    for name in names {
        match step_bit(name) {
            Some(bit) => bits |= bit,
            None => tracing::warn!("unknown postprocess step {:?}, ignoring", name),
        }
    }
    bits
}

/// Apply the requested steps to a scene.
pub fn apply(scene: &mut Scene, bits: u32) {
    if bits == 0 {
        return;
    }
    for (name, bit) in STEP_TABLE {
        if bits & bit != 0 && bit != STEP_TRIANGULATE && bit != STEP_GEN_NORMALS {
            tracing::debug!("postprocess step {} accepted but not applied", name);
        }
    }
    if bits & STEP_TRIANGULATE != 0 {
        for mesh in &mut scene.meshes {
            triangulate(mesh);
        }
    }
    if bits & STEP_GEN_NORMALS != 0 {
        for mesh in &mut scene.meshes {
            gen_normals(mesh);
        }
    }
}

/// Fan-split every face with more than three corners. Points and lines
/// pass through untouched.
fn triangulate(mesh: &mut Mesh) {
    if mesh.faces.iter().all(|face| face.indices.len() <= 3) {
        return;
    }
    let mut faces = Vec::with_capacity(mesh.faces.len());
    for face in mesh.faces.drain(..) {
        if face.indices.len() <= 3 {
            faces.push(face);
            continue;
        }
        for i in 1..face.indices.len() - 1 {
            faces.push(Face {
                indices: vec![face.indices[0], face.indices[i], face.indices[i + 1]],
            });
        }
    }
    mesh.faces = faces;

    mesh.primitive_types = mesh.faces.iter().fold(0, |bits, face| {
        bits | primitive_bits_for_arity(face.indices.len())
    });
}

/// Compute per-vertex normals from face geometry when the mesh has none.
/// Face normals are accumulated unnormalized, so larger faces weigh more.
fn gen_normals(mesh: &mut Mesh) {
    if mesh.normals.is_some() || mesh.positions.is_empty() {
        return;
    }
    let mut normals = vec![Vec3::ZERO; mesh.positions.len()];
    for face in &mesh.faces {
        if face.indices.len() < 3 {
            continue;
        }
        let a = face.indices[0] as usize;
        let b = face.indices[1] as usize;
        let c = face.indices[2] as usize;
        if a >= normals.len() || b >= normals.len() || c >= normals.len() {
            continue;
        }
        let normal = (mesh.positions[b] - mesh.positions[a])
            .cross(mesh.positions[c] - mesh.positions[a]);
        for &index in &face.indices {
            if let Some(n) = normals.get_mut(index as usize) {
                *n += normal;
            }
        }
    }
    for n in &mut normals {
        *n = n.normalize_or_zero();
    }
    mesh.normals = Some(normals);
}
