//! Embedded texture conversion
//!
//! A texture is either still-compressed file bytes tagged with a format
//! hint, or a decoded texel grid. On the dynamic side the two cases share
//! one schema: compressed textures carry raw bytes in `image` and a
//! non-empty `format`; decoded textures carry a 4xWxH texel array and an
//! empty `format`.

use scene_common::schema::TEXTURE_FIELDS;
use scene_common::Texture;

use crate::codec;
use crate::value::{StructArray, Value};

pub fn textures_from_value(value: &Value) -> Vec<Texture> {
    let Some(array) = value.as_struct() else {
        return Vec::new();
    };
    (0..array.len())
        .map(|i| {
            let format_hint = array.get_text(i, "format", "");
            if format_hint.is_empty() {
                let image = array.get(i, "image");
                let texels = image.map(codec::decode_texels).unwrap_or_default();
                let (width, height) = grid_shape(image, texels.len());
                Texture::Decoded {
                    width,
                    height,
                    texels,
                }
            } else {
                Texture::Compressed {
                    format_hint,
                    bytes: array.get_bytes(i, "image"),
                }
            }
        })
        .collect()
}

/// Width and height of a decoded texel grid, taken from the declared
/// 4xWxH shape when consistent, otherwise flattened to a single row.
fn grid_shape(image: Option<&Value>, texel_count: usize) -> (u32, u32) {
    if let Some(dims) = image.and_then(Value::dims) {
        if dims.len() == 3 && dims[0] == 4 && dims[1] * dims[2] == texel_count {
            return (dims[1] as u32, dims[2] as u32);
        }
    }
    (texel_count as u32, 1)
}

pub fn textures_to_value(textures: &[Texture]) -> Value {
    let mut array = StructArray::with_schema(textures.len(), TEXTURE_FIELDS);
    for (i, texture) in textures.iter().enumerate() {
        match texture {
            Texture::Compressed { format_hint, bytes } => {
                array.set_bytes(i, "image", bytes);
                array.set_text(i, "format", format_hint);
            }
            Texture::Decoded {
                width,
                height,
                texels,
            } => {
                array.set(i, "image", codec::encode_texels(texels, *width, *height));
                array.set_text(i, "format", "");
            }
        }
    }
    Value::Struct(array)
}
