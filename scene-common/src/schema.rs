//! Field-name constants for the dynamic struct schemas
//!
//! Every struct crossing the boundary carries a fixed, ordered field set.
//! Converters populate each field in this order regardless of whether data
//! was present, so a converted struct always has the full declared schema.

pub const SCENE_FIELDS: &[&str] = &[
    "cameras",
    "lights",
    "materials",
    "meshes",
    "embeddedTextures",
    "rootNode",
];

pub const CAMERA_FIELDS: &[&str] = &[
    "name",
    "position",
    "lookAtDirection",
    "upDirection",
    "aspectRatio",
    "horizontalFov",
    "clipPlaneFar",
    "clipPlaneNear",
];

pub const LIGHT_FIELDS: &[&str] = &[
    "name",
    "position",
    "type",
    "lookAtDirection",
    "innerConeAngle",
    "outerConeAngle",
    "constantAttenuation",
    "linearAttenuation",
    "quadraticAttenuation",
    "ambientColor",
    "diffuseColor",
    "specularColor",
];

pub const MATERIAL_FIELDS: &[&str] = &["properties"];

pub const MATERIAL_PROPERTY_FIELDS: &[&str] =
    &["key", "dataType", "data", "textureSemantic", "textureIndex"];

pub const MESH_FIELDS: &[&str] = &[
    "name",
    "materialIndex",
    "primitiveTypes",
    "vertices",
    "faces",
    "colors0",
    "colors1",
    "colors2",
    "colors3",
    "colors4",
    "colors5",
    "colors6",
    "colors7",
    "normals",
    "tangents",
    "bitangents",
    "textureCoordinates0",
    "textureCoordinates1",
    "textureCoordinates2",
    "textureCoordinates3",
    "textureCoordinates4",
    "textureCoordinates5",
    "textureCoordinates6",
    "textureCoordinates7",
];

pub const FACE_FIELDS: &[&str] = &["nIndices", "indices"];

pub const NODE_FIELDS: &[&str] = &["name", "meshIndices", "transformation", "children"];

pub const TEXTURE_FIELDS: &[&str] = &["image", "format"];

/// Field name of the `n`th color channel (`colors0` .. `colors7`).
pub fn color_channel_field(n: usize) -> String {
    format!("colors{n}")
}

/// Field name of the `n`th texture-coordinate channel
/// (`textureCoordinates0` .. `textureCoordinates7`).
pub fn tex_coord_channel_field(n: usize) -> String {
    format!("textureCoordinates{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_fields_are_declared() {
        for n in 0..crate::scene::MAX_COLOR_CHANNELS {
            let name = color_channel_field(n);
            assert!(MESH_FIELDS.contains(&name.as_str()));
        }
        for n in 0..crate::scene::MAX_TEXCOORD_CHANNELS {
            let name = tex_coord_channel_field(n);
            assert!(MESH_FIELDS.contains(&name.as_str()));
        }
    }
}
