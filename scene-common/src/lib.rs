//! Shared types and tables for the scene-marshal tools
//!
//! This crate provides the pieces shared between the marshalling library,
//! the CLI, and the integration tests:
//!
//! - [`scene`] - The typed scene-graph model (cameras, lights, materials,
//!   meshes, textures, node tree)
//! - [`vocab`] - Closed name/code vocabularies and the material key table
//! - [`flags`] - Primitive-type and postprocess-step bitmasks
//! - [`schema`] - Field-name constants for the dynamic struct schemas

pub mod flags;
pub mod schema;
pub mod scene;
pub mod vocab;

// Re-export the model types
pub use scene::{
    Camera, Face, Light, LightKind, Material, MaterialProperty, Mesh, Node, NodeTree,
    PropertyData, PropertyKind, Scene, Texel, Texture, TextureChannel, MAX_COLOR_CHANNELS,
    MAX_TEXCOORD_CHANNELS,
};

// Re-export commonly used vocabulary items
pub use vocab::{
    light_kind_from_name, light_kind_name, nice_key, property_kind_from_name, property_kind_name,
    texture_channel_from_name, texture_channel_name, wire_key, UNKNOWN_CODE, UNKNOWN_KEY,
};

// Re-export commonly used flag items
pub use flags::{
    primitive_bits_for_arity, PRIMITIVE_LINE, PRIMITIVE_POINT, PRIMITIVE_POLYGON,
    PRIMITIVE_TRIANGLE, STEP_GEN_NORMALS, STEP_TRIANGULATE,
};
