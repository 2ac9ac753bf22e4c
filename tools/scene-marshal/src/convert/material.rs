//! Material and material-property conversion
//!
//! Properties travel as a sparse, string-keyed, dynamically-typed bag. The
//! human-readable key vocabulary is used on the dynamic side and the
//! library-internal key string on the typed side; any key outside the
//! closed table collapses to the `unknown_key` sentinel in both
//! directions.

use scene_common::schema::{MATERIAL_FIELDS, MATERIAL_PROPERTY_FIELDS};
use scene_common::{
    nice_key, property_kind_from_name, property_kind_name, texture_channel_from_name,
    texture_channel_name, wire_key, Material, MaterialProperty,
};

use crate::value::{StructArray, Value};

pub fn materials_from_value(value: &Value) -> Vec<Material> {
    let Some(array) = value.as_struct() else {
        return Vec::new();
    };
    (0..array.len())
        .map(|i| Material {
            properties: array
                .get_struct(i, "properties")
                .map(properties_from_struct)
                .unwrap_or_default(),
        })
        .collect()
}

pub fn materials_to_value(materials: &[Material]) -> Value {
    let mut array = StructArray::with_schema(materials.len(), MATERIAL_FIELDS);
    for (i, material) in materials.iter().enumerate() {
        array.set_struct(i, "properties", properties_to_struct(&material.properties));
    }
    Value::Struct(array)
}

pub fn properties_from_struct(array: &StructArray) -> Vec<MaterialProperty> {
    (0..array.len())
        .map(|i| {
            let kind = property_kind_from_name(&array.get_text(i, "dataType", "buffer"));
            MaterialProperty {
                key: wire_key(&array.get_text(i, "key", "")).to_string(),
                data: array.get_property_data(i, "data", kind),
                semantic: texture_channel_from_name(&array.get_text(i, "textureSemantic", "none")),
                texture_index: array.get_scalar(i, "textureIndex", 0.0) as u32,
            }
        })
        .collect()
}

pub fn properties_to_struct(properties: &[MaterialProperty]) -> StructArray {
    let mut array = StructArray::with_schema(properties.len(), MATERIAL_PROPERTY_FIELDS);
    for (i, property) in properties.iter().enumerate() {
        array.set_text(i, "key", nice_key(&property.key));
        array.set_text(i, "dataType", property_kind_name(property.data.kind()));
        array.set_property_data(i, "data", &property.data);
        array.set_text(i, "textureSemantic", texture_channel_name(property.semantic));
        array.set_scalar(i, "textureIndex", property.texture_index as f64);
    }
    array
}
