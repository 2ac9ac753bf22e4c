//! Named constant lookup
//!
//! Exposes the declared schemas and vocabularies as template values:
//! blank structs for the entity schemas, name lists for the closed
//! vocabularies, and all-false flag structs for the bitmask vocabularies.
//! Callers use these as starting points for building scene values by hand.

use scene_common::schema::{
    CAMERA_FIELDS, FACE_FIELDS, LIGHT_FIELDS, MATERIAL_FIELDS, MATERIAL_PROPERTY_FIELDS,
    MESH_FIELDS, NODE_FIELDS, SCENE_FIELDS, TEXTURE_FIELDS,
};
use scene_common::vocab::{
    LIGHT_KIND_NAMES, NICE_KEY_NAMES, PROPERTY_KIND_NAMES, TEXTURE_CHANNEL_NAMES,
};

use crate::convert::primitive_bits_to_struct;
use crate::formats::EXPORT_FORMATS;
use crate::postprocess::steps_to_value;
use crate::value::{StructArray, Value};

/// Names accepted by [`lookup`], in display order.
pub const CONSTANT_NAMES: [&str; 16] = [
    "scene",
    "camera",
    "light",
    "material",
    "materialProperty",
    "mesh",
    "face",
    "node",
    "texture",
    "meshPrimitive",
    "lightType",
    "materialPropertyType",
    "textureType",
    "materialPropertyKey",
    "postprocessStep",
    "exportFormat",
];

/// Template value for a named constant, or `None` if unrecognised.
pub fn lookup(name: &str) -> Option<Value> {
    let value = match name {
        "scene" => blank(SCENE_FIELDS),
        "camera" => blank(CAMERA_FIELDS),
        "light" => blank(LIGHT_FIELDS),
        "material" => blank(MATERIAL_FIELDS),
        "materialProperty" => blank(MATERIAL_PROPERTY_FIELDS),
        "mesh" => blank(MESH_FIELDS),
        "face" => blank(FACE_FIELDS),
        "node" => blank(NODE_FIELDS),
        "texture" => blank(TEXTURE_FIELDS),
        "meshPrimitive" => Value::Struct(primitive_bits_to_struct(0)),
        "lightType" => string_list(&LIGHT_KIND_NAMES),
        "materialPropertyType" => string_list(&PROPERTY_KIND_NAMES),
        "textureType" => string_list(&TEXTURE_CHANNEL_NAMES),
        "materialPropertyKey" => string_list(&NICE_KEY_NAMES),
        "postprocessStep" => steps_to_value(0),
        "exportFormat" => export_format_table(),
        _ => return None,
    };
    Some(value)
}

fn blank(schema: &[&str]) -> Value {
    Value::Struct(StructArray::blank(schema))
}

fn string_list(names: &[&str]) -> Value {
    Value::List(names.iter().map(|name| Value::text(*name)).collect())
}

fn export_format_table() -> Value {
    let mut array = StructArray::new(EXPORT_FORMATS.len());
    for (i, format) in EXPORT_FORMATS.iter().enumerate() {
        array.set_text(i, "id", format.id);
        array.set_text(i, "extension", format.extension);
        array.set_text(i, "description", format.description);
    }
    Value::Struct(array)
}
