//! Primitive and indexed codecs
//!
//! One `decode_*` / `encode_*` pair per primitive kind. Decoding validates
//! the declared element class and degrades to an empty result on any
//! mismatch; it never errors. Encoding an empty slice produces a value
//! whose declared shape keeps the fixed dimensions (3, 4, 4x4) with a zero
//! element count, so "no data" stays distinguishable from a generic empty.
//!
//! Unit counts are floor(total / stride); a length that is not a multiple
//! of the stride truncates, surfaced at debug level.

use glam::{Mat4, Vec3, Vec4};
use scene_common::Texel;

use crate::value::Value;

/// Elements per xyz or rgb unit.
const STRIDE_VEC3: usize = 3;
/// Elements per rgba or texel unit.
const STRIDE_VEC4: usize = 4;
/// Elements per 4x4 matrix unit.
const STRIDE_MAT4: usize = 16;

fn unit_count(len: usize, stride: usize, what: &str) -> usize {
    if len % stride != 0 {
        tracing::debug!(
            "{} data has {} elements, not a multiple of {}; truncating",
            what,
            len,
            stride
        );
    }
    len / stride
}

fn double_data(value: &Value) -> Option<&[f64]> {
    match value {
        Value::Double { data, .. } => Some(data),
        _ => None,
    }
}

// ============================================================================
// Fixed-size vectors and matrices
// ============================================================================

/// Decode a 3xN double array to xyz vectors.
pub fn decode_xyz(value: &Value) -> Vec<Vec3> {
    decode_vec3(value, "xyz")
}

/// Decode a 3xN double array to rgb colors.
pub fn decode_rgb(value: &Value) -> Vec<Vec3> {
    decode_vec3(value, "rgb")
}

fn decode_vec3(value: &Value, what: &str) -> Vec<Vec3> {
    let Some(data) = double_data(value) else {
        return Vec::new();
    };
    let count = unit_count(data.len(), STRIDE_VEC3, what);
    (0..count)
        .map(|i| {
            Vec3::new(
                data[STRIDE_VEC3 * i] as f32,
                data[STRIDE_VEC3 * i + 1] as f32,
                data[STRIDE_VEC3 * i + 2] as f32,
            )
        })
        .collect()
}

/// Encode xyz vectors as a 3xN double array.
pub fn encode_xyz(vectors: &[Vec3]) -> Value {
    encode_vec3(vectors)
}

/// Encode rgb colors as a 3xN double array.
pub fn encode_rgb(colors: &[Vec3]) -> Value {
    encode_vec3(colors)
}

fn encode_vec3(vectors: &[Vec3]) -> Value {
    let mut data = Vec::with_capacity(vectors.len() * STRIDE_VEC3);
    for v in vectors {
        data.extend([v.x as f64, v.y as f64, v.z as f64]);
    }
    Value::Double {
        dims: vec![STRIDE_VEC3, vectors.len()],
        data,
    }
}

/// Decode a 4xN double array to rgba colors.
pub fn decode_rgba(value: &Value) -> Vec<Vec4> {
    let Some(data) = double_data(value) else {
        return Vec::new();
    };
    let count = unit_count(data.len(), STRIDE_VEC4, "rgba");
    (0..count)
        .map(|i| {
            Vec4::new(
                data[STRIDE_VEC4 * i] as f32,
                data[STRIDE_VEC4 * i + 1] as f32,
                data[STRIDE_VEC4 * i + 2] as f32,
                data[STRIDE_VEC4 * i + 3] as f32,
            )
        })
        .collect()
}

/// Encode rgba colors as a 4xN double array.
pub fn encode_rgba(colors: &[Vec4]) -> Value {
    let mut data = Vec::with_capacity(colors.len() * STRIDE_VEC4);
    for c in colors {
        data.extend([c.x as f64, c.y as f64, c.z as f64, c.w as f64]);
    }
    Value::Double {
        dims: vec![STRIDE_VEC4, colors.len()],
        data,
    }
}

/// Decode a 4x4xN double array to matrices. Elements cross the boundary in
/// row-major order.
pub fn decode_mat4(value: &Value) -> Vec<Mat4> {
    let Some(data) = double_data(value) else {
        return Vec::new();
    };
    let count = unit_count(data.len(), STRIDE_MAT4, "4x4");
    (0..count)
        .map(|i| {
            let mut elements = [0.0f32; STRIDE_MAT4];
            for (j, e) in elements.iter_mut().enumerate() {
                *e = data[STRIDE_MAT4 * i + j] as f32;
            }
            // from_cols_array reads column-major; the boundary order is
            // row-major, so transpose after loading.
            Mat4::from_cols_array(&elements).transpose()
        })
        .collect()
}

/// Encode matrices as a 4x4xN double array, row-major element order.
pub fn encode_mat4(matrices: &[Mat4]) -> Value {
    let mut data = Vec::with_capacity(matrices.len() * STRIDE_MAT4);
    for m in matrices {
        data.extend(m.transpose().to_cols_array().map(|e| e as f64));
    }
    Value::Double {
        dims: vec![4, 4, matrices.len()],
        data,
    }
}

// ============================================================================
// Text
// ============================================================================

/// Decode a text value. Non-text yields `None`, which accessors above turn
/// into their caller's default.
pub fn decode_text(value: &Value) -> Option<String> {
    value.as_text().map(str::to_string)
}

/// Encode text. An empty string stays a text value, not a generic empty.
pub fn encode_text(text: &str) -> Value {
    Value::text(text)
}

// ============================================================================
// Flat element arrays
// ============================================================================

/// Decode a double array to f32 elements, any shape.
pub fn decode_floats(value: &Value) -> Vec<f32> {
    match value {
        Value::Double { data, .. } => data.iter().map(|v| *v as f32).collect(),
        _ => Vec::new(),
    }
}

/// Encode f32 elements as a 1xN double array.
pub fn encode_floats(floats: &[f32]) -> Value {
    Value::Double {
        dims: vec![1, floats.len()],
        data: floats.iter().map(|v| *v as f64).collect(),
    }
}

/// Decode a signed 32-bit array. The declared class must match.
pub fn decode_ints(value: &Value) -> Vec<i32> {
    match value {
        Value::Int32 { data, .. } => data.clone(),
        _ => Vec::new(),
    }
}

/// Encode i32 elements as a 1xN signed 32-bit array.
pub fn encode_ints(ints: &[i32]) -> Value {
    Value::Int32 {
        dims: vec![1, ints.len()],
        data: ints.to_vec(),
    }
}

/// Decode an unsigned 32-bit index array. The declared class must match.
pub fn decode_indices(value: &Value) -> Vec<u32> {
    match value {
        Value::Uint32 { data, .. } => data.clone(),
        _ => Vec::new(),
    }
}

/// Encode u32 indices as a 1xN unsigned 32-bit array.
pub fn encode_indices(indices: &[u32]) -> Value {
    Value::Uint32 {
        dims: vec![1, indices.len()],
        data: indices.to_vec(),
    }
}

/// Decode an opaque byte buffer. The declared class must be unsigned 8-bit.
pub fn decode_bytes(value: &Value) -> Vec<u8> {
    match value {
        Value::Uint8 { data, .. } => data.clone(),
        _ => Vec::new(),
    }
}

/// Encode bytes as a 1xN unsigned 8-bit array.
pub fn encode_bytes(bytes: &[u8]) -> Value {
    Value::Uint8 {
        dims: vec![1, bytes.len()],
        data: bytes.to_vec(),
    }
}

// ============================================================================
// Texels
// ============================================================================

/// Decode a 4xWxH unsigned 8-bit array to rgba texels.
pub fn decode_texels(value: &Value) -> Vec<Texel> {
    let Value::Uint8 { data, .. } = value else {
        return Vec::new();
    };
    let count = unit_count(data.len(), STRIDE_VEC4, "texel");
    (0..count)
        .map(|i| Texel {
            r: data[STRIDE_VEC4 * i],
            g: data[STRIDE_VEC4 * i + 1],
            b: data[STRIDE_VEC4 * i + 2],
            a: data[STRIDE_VEC4 * i + 3],
        })
        .collect()
}

/// Encode rgba texels as a 4xWxH unsigned 8-bit array.
pub fn encode_texels(texels: &[Texel], width: u32, height: u32) -> Value {
    if texels.is_empty() || width == 0 || height == 0 {
        return Value::Uint8 {
            dims: vec![4, 0],
            data: Vec::new(),
        };
    }
    let mut data = Vec::with_capacity(texels.len() * STRIDE_VEC4);
    for t in texels {
        data.extend([t.r, t.g, t.b, t.a]);
    }
    Value::Uint8 {
        dims: vec![4, width as usize, height as usize],
        data,
    }
}
