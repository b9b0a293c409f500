//! Scene presentation pipeline: dependent-resource URL rewriting, one-time
//! material normalization and bounding-box fitting for a loaded scene graph.
//!
//! Actual decoding of model files is an external collaborator's job; this
//! module receives an already-parsed [`SceneGraph`] (the web shell fetches
//! and deserializes it) and prepares it for display. The asset URL map is an
//! explicit injected value, never ambient global state.

use fnv::FnvHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{GRASS_ALPHA_CUTOFF, MAX_ANISOTROPY, SCENE_TARGET_SIZE};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene graph has no nodes")]
    EmptyGraph,
    #[error("no served URL for asset dependency `{0}`")]
    MissingDependency(String),
}

/// Closed enumeration of the texture-slot kinds this pipeline understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextureSlot {
    BaseColor,
    AmbientOcclusion,
    Emissive,
    Metalness,
    Roughness,
    Normal,
    Specular,
}

/// Which triangle sides are rasterized for a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CullSide {
    Front,
    Back,
    Double,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextureRef {
    pub slot: TextureSlot,
    pub source: String,
    #[serde(default)]
    pub srgb: bool,
    #[serde(default = "default_true")]
    pub generate_mipmaps: bool,
    #[serde(default)]
    pub clamp_wrap: bool,
    #[serde(default)]
    pub anisotropy: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub name: String,
    #[serde(default = "MaterialDesc::default_cull")]
    pub cull: CullSide,
    #[serde(default)]
    pub alpha_cutoff: Option<f32>,
    pub base_color: [f32; 4],
    #[serde(default)]
    pub textures: Vec<TextureRef>,
}

impl MaterialDesc {
    fn default_cull() -> CullSide {
        CullSide::Back
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeDesc {
    pub name: String,
    pub translation: Vec3,
    #[serde(default = "NodeDesc::default_scale")]
    pub scale: Vec3,
    #[serde(default)]
    pub material: Option<usize>,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

impl NodeDesc {
    fn default_scale() -> Vec3 {
        Vec3::ONE
    }
}

/// Parsed scene description as delivered by the asset collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneGraph {
    pub name: String,
    pub nodes: Vec<NodeDesc>,
    #[serde(default)]
    pub materials: Vec<MaterialDesc>,
    /// Relative paths of dependent resources (buffers, images) the asset
    /// references; rewritten to served URLs during preparation.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Maps an asset's logical resource paths to the URLs they are actually
/// served from. Build tooling relocates and fingerprints assets, so this
/// indirection is resolved once at startup and injected here.
#[derive(Clone, Debug, Default)]
pub struct AssetManifest {
    entries: FnvHashMap<String, String>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, logical: impl Into<String>, served: impl Into<String>) {
        self.entries.insert(logical.into(), served.into());
    }

    pub fn resolve(&self, relative: &str) -> Option<&str> {
        self.entries.get(relative).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssetManifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for (k, v) in iter {
            manifest.insert(k, v);
        }
        manifest
    }
}

/// Transform applied to one rendered instance of a shared asset template.
#[derive(Clone, Copy, Debug)]
pub struct SceneInstance {
    pub offset: Vec3,
    pub scale_mul: f32,
    /// Brightness multiplier; the parallax duplicate is dimmed for depth.
    pub tint: f32,
}

/// A prepared asset: rewritten, material-normalized and fitted to the
/// target bounding size. The ready flag flips true exactly once, when
/// `prepare` completes.
#[derive(Clone, Debug)]
pub struct SceneAsset {
    pub graph: SceneGraph,
    pub center_offset: Vec3,
    pub normalization_scale: f32,
    ready: bool,
}

impl SceneAsset {
    /// Runs the one-time presentation pipeline over a freshly loaded graph.
    pub fn prepare(mut graph: SceneGraph, manifest: &AssetManifest) -> Result<Self, SceneError> {
        if graph.nodes.is_empty() {
            return Err(SceneError::EmptyGraph);
        }
        rewrite_references(&mut graph, manifest)?;
        for material in &mut graph.materials {
            normalize_material(material);
        }

        let (center, extent) = bounds(&graph.nodes);
        let max_extent = extent.max_element();
        let normalization_scale = if max_extent <= f32::EPSILON {
            1.0
        } else {
            SCENE_TARGET_SIZE / max_extent
        };
        log::info!(
            "[scene] {} ready: nodes={} scale={:.3} center=({:.2},{:.2},{:.2})",
            graph.name,
            graph.nodes.len(),
            normalization_scale,
            center.x,
            center.y,
            center.z
        );
        Ok(Self {
            graph,
            center_offset: -center,
            normalization_scale,
            ready: true,
        })
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.ready
    }

    /// World position of a node after centering and fit-scaling, under the
    /// given instance transform.
    pub fn node_world_position(&self, node: &NodeDesc, instance: &SceneInstance) -> Vec3 {
        (node.translation + self.center_offset) * self.normalization_scale * instance.scale_mul
            + instance.offset
    }

    /// An identity instance of the template.
    pub fn instance(&self) -> SceneInstance {
        SceneInstance {
            offset: Vec3::ZERO,
            scale_mul: 1.0,
            tint: 1.0,
        }
    }

    /// Foreground instance plus a pushed-back, enlarged, dimmed duplicate
    /// used as a parallax backdrop.
    pub fn parallax_pair(&self) -> [SceneInstance; 2] {
        [
            self.instance(),
            SceneInstance {
                offset: Vec3::new(0.0, -0.04, -1.6),
                scale_mul: 1.35,
                tint: 0.55,
            },
        ]
    }
}

fn rewrite_references(graph: &mut SceneGraph, manifest: &AssetManifest) -> Result<(), SceneError> {
    for dep in &mut graph.dependencies {
        *dep = manifest
            .resolve(dep)
            .ok_or_else(|| SceneError::MissingDependency(dep.clone()))?
            .to_string();
    }
    for material in &mut graph.materials {
        for texture in &mut material.textures {
            texture.source = manifest
                .resolve(&texture.source)
                .ok_or_else(|| SceneError::MissingDependency(texture.source.clone()))?
                .to_string();
        }
    }
    Ok(())
}

/// Grass-like foliage is authored as single-sided alpha planes; rendered
/// as-is it disappears from behind and bleeds at the alpha edges.
fn is_grass_like(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ["grass", "foliage", "leaf", "leaves"]
        .iter()
        .any(|needle| lower.contains(needle))
}

fn normalize_material(material: &mut MaterialDesc) {
    if is_grass_like(&material.name) {
        material.cull = CullSide::Double;
        material.alpha_cutoff = Some(GRASS_ALPHA_CUTOFF);
        for texture in &mut material.textures {
            // mipmaps plus repeat wrapping bleed alpha at cutout edges
            texture.generate_mipmaps = false;
            texture.clamp_wrap = true;
        }
    } else {
        material.cull = CullSide::Back;
    }
    for texture in &mut material.textures {
        texture.srgb = texture.slot == TextureSlot::BaseColor;
        texture.anisotropy = if texture.anisotropy == 0 {
            MAX_ANISOTROPY
        } else {
            texture.anisotropy.min(MAX_ANISOTROPY)
        };
    }
}

fn bounds(nodes: &[NodeDesc]) -> (Vec3, Vec3) {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for node in nodes {
        min = min.min(node.translation + node.bounds_min * node.scale);
        max = max.max(node.translation + node.bounds_max * node.scale);
    }
    ((min + max) * 0.5, max - min)
}
