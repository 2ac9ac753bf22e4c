//! Entity converters
//!
//! One module per entity kind, each exposing a `*_from_value` /
//! `*_to_value` pair built on the field accessors. All converters share
//! the same failure posture: malformed dynamic input degrades to an empty
//! or default result, empty typed input produces a schema-complete empty
//! struct array, and no entity's failure blocks its siblings.

mod camera;
mod light;
mod material;
mod mesh;
mod node;
mod scene;
mod texture;

pub use camera::{cameras_from_value, cameras_to_value};
pub use light::{lights_from_value, lights_to_value};
pub use material::{
    materials_from_value, materials_to_value, properties_from_struct, properties_to_struct,
};
pub use mesh::{
    faces_from_struct, faces_to_struct, meshes_from_value, meshes_to_value,
    primitive_bits_to_struct, primitive_struct_to_bits,
};
pub use node::{tree_from_value, tree_to_value};
pub use scene::{scene_from_value, scene_to_value};
pub use texture::{textures_from_value, textures_to_value};
