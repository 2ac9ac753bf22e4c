//! Closed name/code vocabularies
//!
//! Every vocabulary is a pair of parallel, same-order tables with two
//! linear-scan lookups. The tables are small (<30 entries) so a scan beats
//! carrying a map. Policy on misses is uniform: an unknown native code maps
//! to the sentinel [`UNKNOWN_CODE`] display string, an unknown input name
//! maps to the vocabulary's most conservative code.

use crate::scene::{LightKind, PropertyKind, TextureChannel};

/// Display sentinel for a native code outside the declared table.
pub const UNKNOWN_CODE: &str = "unknown_code";
/// Sentinel for a material-property key outside the declared table.
pub const UNKNOWN_KEY: &str = "unknown_key";

/// Find the position of an exact string match in a declared table.
fn name_index(declared: &[&str], name: &str) -> Option<usize> {
    declared.iter().position(|entry| *entry == name)
}

// ============================================================================
// Light kind
// ============================================================================

pub const LIGHT_KIND_NAMES: [&str; 4] = ["undefined", "directional", "point", "spot"];

const LIGHT_KINDS: [LightKind; 4] = [
    LightKind::Undefined,
    LightKind::Directional,
    LightKind::Point,
    LightKind::Spot,
];

pub fn light_kind_name(kind: LightKind) -> &'static str {
    match LIGHT_KINDS.iter().position(|entry| *entry == kind) {
        Some(index) => LIGHT_KIND_NAMES[index],
        None => UNKNOWN_CODE,
    }
}

/// Unknown names fall back to the undefined kind.
pub fn light_kind_from_name(name: &str) -> LightKind {
    match name_index(&LIGHT_KIND_NAMES, name) {
        Some(index) => LIGHT_KINDS[index],
        None => LightKind::Undefined,
    }
}

// ============================================================================
// Material property kind
// ============================================================================

pub const PROPERTY_KIND_NAMES: [&str; 4] = ["float", "string", "integer", "buffer"];

const PROPERTY_KINDS: [PropertyKind; 4] = [
    PropertyKind::Float,
    PropertyKind::String,
    PropertyKind::Integer,
    PropertyKind::Buffer,
];

pub fn property_kind_name(kind: PropertyKind) -> &'static str {
    match PROPERTY_KINDS.iter().position(|entry| *entry == kind) {
        Some(index) => PROPERTY_KIND_NAMES[index],
        None => UNKNOWN_CODE,
    }
}

/// Unknown names fall back to the opaque buffer kind.
pub fn property_kind_from_name(name: &str) -> PropertyKind {
    match name_index(&PROPERTY_KIND_NAMES, name) {
        Some(index) => PROPERTY_KINDS[index],
        None => PropertyKind::Buffer,
    }
}

// ============================================================================
// Texture channel
// ============================================================================

pub const TEXTURE_CHANNEL_NAMES: [&str; 13] = [
    "none",
    "diffuse",
    "specular",
    "ambient",
    "emissive",
    "height",
    "normals",
    "shininess",
    "opacity",
    "displacement",
    "light_map",
    "reflection",
    "unknown",
];

const TEXTURE_CHANNELS: [TextureChannel; 13] = [
    TextureChannel::None,
    TextureChannel::Diffuse,
    TextureChannel::Specular,
    TextureChannel::Ambient,
    TextureChannel::Emissive,
    TextureChannel::Height,
    TextureChannel::Normals,
    TextureChannel::Shininess,
    TextureChannel::Opacity,
    TextureChannel::Displacement,
    TextureChannel::LightMap,
    TextureChannel::Reflection,
    TextureChannel::Unknown,
];

pub fn texture_channel_name(channel: TextureChannel) -> &'static str {
    match TEXTURE_CHANNELS.iter().position(|entry| *entry == channel) {
        Some(index) => TEXTURE_CHANNEL_NAMES[index],
        None => UNKNOWN_CODE,
    }
}

/// Unknown names fall back to the unknown channel.
pub fn texture_channel_from_name(name: &str) -> TextureChannel {
    match name_index(&TEXTURE_CHANNEL_NAMES, name) {
        Some(index) => TEXTURE_CHANNELS[index],
        None => TextureChannel::Unknown,
    }
}

// ============================================================================
// Material property keys
// ============================================================================

/// Human-readable material-property key vocabulary, in table order.
pub const NICE_KEY_NAMES: [&str; 28] = [
    "name",
    "two_sided",
    "shading_model",
    "enable_wireframe",
    "blend_func",
    "opacity",
    "bump_scaling",
    "shininess",
    "reflectivity",
    "shininess_strength",
    "refract_i",
    "diffuse",
    "ambient",
    "specular",
    "emissive",
    "transparent",
    "reflective",
    "global_background_image",
    "texture",
    "uvw_source",
    "texture_op",
    "mapping",
    "texture_blend",
    "mapping_u",
    "mapping_v",
    "texture_map_axis",
    "uv_transform",
    "texture_flags",
];

/// Library-internal key strings, parallel to [`NICE_KEY_NAMES`].
pub const WIRE_KEY_NAMES: [&str; 28] = [
    "?mat.name",
    "$mat.twosided",
    "$mat.shadingm",
    "$mat.wireframe",
    "$mat.blend",
    "$mat.opacity",
    "$mat.bumpscaling",
    "$mat.shininess",
    "$mat.reflectivity",
    "$mat.shinpercent",
    "$mat.refracti",
    "$clr.diffuse",
    "$clr.ambient",
    "$clr.specular",
    "$clr.emissive",
    "$clr.transparent",
    "$clr.reflective",
    "?bg.global",
    "$tex.file",
    "$tex.uvwsrc",
    "$tex.op",
    "$tex.mapping",
    "$tex.blend",
    "$tex.mapmodeu",
    "$tex.mapmodev",
    "$tex.mapaxis",
    "$tex.uvtrafo",
    "$tex.flags",
];

/// Translate a library-internal key to its human-readable form. Keys
/// outside the table collapse to [`UNKNOWN_KEY`].
pub fn nice_key(key: &str) -> &'static str {
    match name_index(&WIRE_KEY_NAMES, key) {
        Some(index) => NICE_KEY_NAMES[index],
        None => UNKNOWN_KEY,
    }
}

/// Translate a human-readable key to the library-internal form. Keys
/// outside the table collapse to [`UNKNOWN_KEY`].
pub fn wire_key(key: &str) -> &'static str {
    match name_index(&NICE_KEY_NAMES, key) {
        Some(index) => WIRE_KEY_NAMES[index],
        None => UNKNOWN_KEY,
    }
}
