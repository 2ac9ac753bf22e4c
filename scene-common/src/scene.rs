//! Typed scene-graph model
//!
//! Owned, fully-typed representation of a 3D scene: flat entity sequences
//! (cameras, lights, materials, meshes, embedded textures) plus one node
//! tree. Nodes live in a flat arena and reference each other by index, so
//! the hierarchy carries no pointers and serializes directly.
//!
//! All types are plain data with `serde` derives; the scene JSON format is
//! the serialized form of [`Scene`].

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Number of per-vertex color channels a mesh can carry.
pub const MAX_COLOR_CHANNELS: usize = 8;
/// Number of per-vertex texture-coordinate channels a mesh can carry.
pub const MAX_TEXCOORD_CHANNELS: usize = 8;

/// Root container for one 3D scene.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scene {
    pub cameras: Vec<Camera>,
    pub lights: Vec<Light>,
    pub materials: Vec<Material>,
    pub meshes: Vec<Mesh>,
    pub textures: Vec<Texture>,
    pub root: NodeTree,
}

impl Scene {
    /// Check cross-reference invariants and report violations as
    /// human-readable strings. Violations are advisory; conversion and
    /// export never refuse a scene over them.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.root.nodes.is_empty() {
            issues.push("node tree has no root node".to_string());
        }

        for (n, node) in self.root.nodes.iter().enumerate() {
            for &mesh_index in &node.mesh_indices {
                if mesh_index as usize >= self.meshes.len() {
                    issues.push(format!(
                        "node {} (\"{}\") references mesh {} but the scene has {} meshes",
                        n,
                        node.name,
                        mesh_index,
                        self.meshes.len()
                    ));
                }
            }
            for &child in &node.children {
                if child >= self.root.nodes.len() {
                    issues.push(format!("node {} has out-of-range child index {}", n, child));
                } else if self.root.nodes[child].parent != Some(n) {
                    issues.push(format!(
                        "node {} lists child {} whose parent link is {:?}",
                        n, child, self.root.nodes[child].parent
                    ));
                }
            }
        }

        for (m, mesh) in self.meshes.iter().enumerate() {
            if !self.materials.is_empty() && mesh.material_index as usize >= self.materials.len() {
                issues.push(format!(
                    "mesh {} (\"{}\") references material {} but the scene has {} materials",
                    m,
                    mesh.name,
                    mesh.material_index,
                    self.materials.len()
                ));
            }
            let vertex_count = mesh.positions.len();
            for (f, face) in mesh.faces.iter().enumerate() {
                for &index in &face.indices {
                    if index as usize >= vertex_count {
                        issues.push(format!(
                            "mesh {} face {} references vertex {} of {}",
                            m, f, index, vertex_count
                        ));
                    }
                }
            }
            for (label, channel) in [
                ("normals", &mesh.normals),
                ("tangents", &mesh.tangents),
                ("bitangents", &mesh.bitangents),
            ] {
                if let Some(data) = channel {
                    if data.len() != vertex_count {
                        issues.push(format!(
                            "mesh {} {} channel has {} entries for {} vertices",
                            m,
                            label,
                            data.len(),
                            vertex_count
                        ));
                    }
                }
            }
            for (c, channel) in mesh.colors.iter().enumerate() {
                if let Some(data) = channel {
                    if data.len() != vertex_count {
                        issues.push(format!(
                            "mesh {} color channel {} has {} entries for {} vertices",
                            m,
                            c,
                            data.len(),
                            vertex_count
                        ));
                    }
                }
            }
            for (c, channel) in mesh.tex_coords.iter().enumerate() {
                if let Some(data) = channel {
                    if data.len() != vertex_count {
                        issues.push(format!(
                            "mesh {} texture-coordinate channel {} has {} entries for {} vertices",
                            m,
                            c,
                            data.len(),
                            vertex_count
                        ));
                    }
                }
            }
        }

        for (t, texture) in self.textures.iter().enumerate() {
            if let Texture::Decoded {
                width,
                height,
                texels,
            } = texture
            {
                if texels.len() != (*width as usize) * (*height as usize) {
                    issues.push(format!(
                        "texture {} declares {}x{} but carries {} texels",
                        t,
                        width,
                        height,
                        texels.len()
                    ));
                }
            }
        }

        issues
    }
}

/// A perspective camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub aspect_ratio: f32,
    pub horizontal_fov: f32,
    pub clip_near: f32,
    pub clip_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec3::ZERO,
            look_at: Vec3::Z,
            up: Vec3::Y,
            aspect_ratio: 0.0,
            horizontal_fov: FRAC_PI_4,
            clip_near: 0.1,
            clip_far: 1000.0,
        }
    }
}

/// Light source kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum LightKind {
    #[default]
    Undefined = 0,
    Directional = 1,
    Point = 2,
    Spot = 3,
}

/// A light source. Colors are intensities and are not clamped to [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub position: Vec3,
    pub direction: Vec3,
    pub inner_cone_angle: f32,
    pub outer_cone_angle: f32,
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
    pub ambient_color: Vec3,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: LightKind::Undefined,
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            inner_cone_angle: TAU,
            outer_cone_angle: TAU,
            constant_attenuation: 0.0,
            linear_attenuation: 1.0,
            quadratic_attenuation: 0.0,
            ambient_color: Vec3::ZERO,
            diffuse_color: Vec3::ZERO,
            specular_color: Vec3::ZERO,
        }
    }
}

/// A material: an ordered, sparse, string-keyed property bag. A property's
/// meaning is carried entirely by its key, never by its position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub properties: Vec<MaterialProperty>,
}

/// Declared payload kind of a material property.
///
/// Discriminants match the import library's type-info codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum PropertyKind {
    Float = 1,
    String = 3,
    Integer = 4,
    #[default]
    Buffer = 5,
}

/// Typed payload of a material property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyData {
    Floats(Vec<f32>),
    Text(String),
    Ints(Vec<i32>),
    Bytes(Vec<u8>),
}

impl PropertyData {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyData::Floats(_) => PropertyKind::Float,
            PropertyData::Text(_) => PropertyKind::String,
            PropertyData::Ints(_) => PropertyKind::Integer,
            PropertyData::Bytes(_) => PropertyKind::Buffer,
        }
    }
}

impl Default for PropertyData {
    fn default() -> Self {
        PropertyData::Bytes(Vec::new())
    }
}

/// One entry of a material's property bag.
///
/// `key` is the library-internal key string (`?mat.name`, `$clr.diffuse`,
/// ...); the human-readable vocabulary lives in [`crate::vocab`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperty {
    pub key: String,
    pub data: PropertyData,
    pub semantic: TextureChannel,
    pub texture_index: u32,
}

/// Texture channel a material property targets.
///
/// Discriminants match the import library's texture-type codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum TextureChannel {
    #[default]
    None = 0,
    Diffuse = 1,
    Specular = 2,
    Ambient = 3,
    Emissive = 4,
    Height = 5,
    Normals = 6,
    Shininess = 7,
    Opacity = 8,
    Displacement = 9,
    LightMap = 10,
    Reflection = 11,
    Unknown = 12,
}

/// One face: an ordered list of vertex indices into the owning mesh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<u32>,
}

/// A mesh: one vertex-position channel plus optional parallel attribute
/// channels. Every present channel has exactly `positions.len()` entries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub material_index: u32,
    /// Bitmask over [`crate::flags`] primitive bits; a mesh may mix kinds.
    pub primitive_types: u32,
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub normals: Option<Vec<Vec3>>,
    pub tangents: Option<Vec<Vec3>>,
    pub bitangents: Option<Vec<Vec3>>,
    pub colors: [Option<Vec<Vec4>>; MAX_COLOR_CHANNELS],
    pub tex_coords: [Option<Vec<Vec3>>; MAX_TEXCOORD_CHANNELS],
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            name: String::new(),
            material_index: 0,
            primitive_types: 0,
            positions: Vec::new(),
            faces: Vec::new(),
            normals: None,
            tangents: None,
            bitangents: None,
            colors: std::array::from_fn(|_| None),
            tex_coords: std::array::from_fn(|_| None),
        }
    }
}

/// An embedded texture: either still-compressed file bytes with a format
/// hint, or a decoded texel grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Texture {
    Compressed { format_hint: String, bytes: Vec<u8> },
    Decoded { width: u32, height: u32, texels: Vec<Texel> },
}

/// One RGBA texel of a decoded embedded texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// One node of the hierarchy. Parent/child links are arena indices.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Transform relative to the parent, row-major element order on the
    /// dynamic side of the boundary.
    pub transform: Mat4,
    /// Meshes this node instances, as indices into `Scene::meshes`.
    pub mesh_indices: Vec<u32>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// The node hierarchy as a flat arena. Index 0 is the root; parents always
/// precede their children, so a forward scan visits the tree top-down.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeTree {
    pub nodes: Vec<Node>,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }
}

impl NodeTree {
    pub fn with_root(root: Node) -> Self {
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `node` as the last child of `parent`, fixing up both links.
    /// Returns the new node's index.
    pub fn push_child(&mut self, parent: usize, mut node: Node) -> usize {
        let index = self.nodes.len();
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent].children.push(index);
        index
    }

    /// Number of nodes in the subtree rooted at `index`, including the
    /// node itself.
    pub fn subtree_len(&self, index: usize) -> usize {
        let mut count = 1;
        for &child in &self.nodes[index].children {
            count += self.subtree_len(child);
        }
        count
    }
}
