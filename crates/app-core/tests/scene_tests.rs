// Host-side tests for the scene presentation pipeline: URL rewriting,
// material normalization and bounding-box fitting.

use app_core::constants::{MAX_ANISOTROPY, SCENE_TARGET_SIZE};
use app_core::scene::{
    AssetManifest, CullSide, MaterialDesc, NodeDesc, SceneAsset, SceneError, SceneGraph,
    TextureRef, TextureSlot,
};
use glam::Vec3;

fn texture(slot: TextureSlot, source: &str, anisotropy: u8) -> TextureRef {
    TextureRef {
        slot,
        source: source.to_string(),
        srgb: false,
        generate_mipmaps: true,
        clamp_wrap: false,
        anisotropy,
    }
}

fn make_graph() -> SceneGraph {
    SceneGraph {
        name: "island".to_string(),
        nodes: vec![
            NodeDesc {
                name: "rock".to_string(),
                translation: Vec3::ZERO,
                scale: Vec3::ONE,
                material: Some(0),
                bounds_min: Vec3::splat(-1.0),
                bounds_max: Vec3::splat(1.0),
            },
            NodeDesc {
                name: "outcrop".to_string(),
                translation: Vec3::new(2.0, 0.0, 0.0),
                scale: Vec3::ONE,
                material: Some(1),
                bounds_min: Vec3::splat(-0.5),
                bounds_max: Vec3::splat(0.5),
            },
        ],
        materials: vec![
            MaterialDesc {
                name: "RockSlab".to_string(),
                cull: CullSide::Front,
                alpha_cutoff: None,
                base_color: [0.5, 0.5, 0.5, 1.0],
                textures: vec![
                    texture(TextureSlot::BaseColor, "tex/rock_albedo.png", 16),
                    texture(TextureSlot::Roughness, "tex/rock_rough.png", 0),
                ],
            },
            MaterialDesc {
                name: "GrassTuft".to_string(),
                cull: CullSide::Back,
                alpha_cutoff: None,
                base_color: [0.3, 0.7, 0.3, 1.0],
                textures: vec![texture(TextureSlot::BaseColor, "tex/grass.png", 0)],
            },
        ],
        dependencies: vec!["island.bin".to_string()],
    }
}

fn make_manifest() -> AssetManifest {
    [
        ("island.bin", "/assets/island-4f2a.bin"),
        ("tex/rock_albedo.png", "/assets/rock_albedo-91cc.png"),
        ("tex/rock_rough.png", "/assets/rock_rough-d01b.png"),
        ("tex/grass.png", "/assets/grass-77e3.png"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn prepare_rewrites_dependencies_and_texture_sources() {
    let asset = SceneAsset::prepare(make_graph(), &make_manifest()).unwrap();
    assert_eq!(asset.graph.dependencies[0], "/assets/island-4f2a.bin");
    assert_eq!(
        asset.graph.materials[0].textures[0].source,
        "/assets/rock_albedo-91cc.png"
    );
    assert_eq!(
        asset.graph.materials[1].textures[0].source,
        "/assets/grass-77e3.png"
    );
}

#[test]
fn missing_manifest_entry_is_an_error() {
    let mut graph = make_graph();
    graph.dependencies.push("mystery.bin".to_string());
    let err = SceneAsset::prepare(graph, &make_manifest()).unwrap_err();
    assert!(matches!(err, SceneError::MissingDependency(ref p) if p == "mystery.bin"));
}

#[test]
fn empty_graph_is_an_error() {
    let graph = SceneGraph {
        name: "void".to_string(),
        nodes: vec![],
        materials: vec![],
        dependencies: vec![],
    };
    assert!(matches!(
        SceneAsset::prepare(graph, &make_manifest()),
        Err(SceneError::EmptyGraph)
    ));
}

#[test]
fn grass_like_materials_become_double_sided_cutouts() {
    let asset = SceneAsset::prepare(make_graph(), &make_manifest()).unwrap();
    let grass = &asset.graph.materials[1];
    assert_eq!(grass.cull, CullSide::Double);
    assert!(grass.alpha_cutoff.is_some());
    for tex in &grass.textures {
        assert!(!tex.generate_mipmaps, "mipmaps bleed cutout alpha");
        assert!(tex.clamp_wrap);
    }

    let rock = &asset.graph.materials[0];
    assert_eq!(rock.cull, CullSide::Back, "culling side forced consistent");
    assert_eq!(rock.alpha_cutoff, None);
}

#[test]
fn base_color_textures_decode_srgb_and_anisotropy_is_capped() {
    let asset = SceneAsset::prepare(make_graph(), &make_manifest()).unwrap();
    let rock = &asset.graph.materials[0];
    assert!(rock.textures[0].srgb, "base color decodes sRGB");
    assert!(!rock.textures[1].srgb, "roughness stays linear");
    assert_eq!(rock.textures[0].anisotropy, MAX_ANISOTROPY, "16 capped to max");
    assert_eq!(rock.textures[1].anisotropy, MAX_ANISOTROPY, "unset defaults to max");
}

#[test]
fn bounding_box_fit_derives_center_and_scale_once() {
    let asset = SceneAsset::prepare(make_graph(), &make_manifest()).unwrap();
    // overall bounds: (-1,-1,-1)..(2.5,1,1) -> extent 3.5, center x 0.75
    assert!((asset.normalization_scale - SCENE_TARGET_SIZE / 3.5).abs() < 1e-6);
    assert!((asset.center_offset - Vec3::new(-0.75, 0.0, 0.0)).length() < 1e-6);
    assert!(asset.ready());
}

#[test]
fn zero_extent_bounds_fall_back_to_unit_scale() {
    let graph = SceneGraph {
        name: "point".to_string(),
        nodes: vec![NodeDesc {
            name: "dot".to_string(),
            translation: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::ONE,
            material: None,
            bounds_min: Vec3::ZERO,
            bounds_max: Vec3::ZERO,
        }],
        materials: vec![],
        dependencies: vec![],
    };
    let asset = SceneAsset::prepare(graph, &AssetManifest::new()).unwrap();
    assert_eq!(asset.normalization_scale, 1.0);
}

#[test]
fn node_world_position_applies_center_scale_and_instance_transform() {
    let asset = SceneAsset::prepare(make_graph(), &make_manifest()).unwrap();
    let mut instance = asset.instance();
    instance.offset = Vec3::new(0.0, 0.0, -1.0);
    instance.scale_mul = 2.0;

    let node = &asset.graph.nodes[1];
    let expected = (node.translation + asset.center_offset) * asset.normalization_scale * 2.0
        + Vec3::new(0.0, 0.0, -1.0);
    assert!((asset.node_world_position(node, &instance) - expected).length() < 1e-6);
}

#[test]
fn parallax_pair_is_foreground_plus_dimmed_backdrop() {
    let asset = SceneAsset::prepare(make_graph(), &make_manifest()).unwrap();
    let [front, back] = asset.parallax_pair();
    assert_eq!(front.scale_mul, 1.0);
    assert_eq!(front.tint, 1.0);
    assert!(back.offset.z < 0.0, "backdrop pushed away from the camera");
    assert!(back.scale_mul > 1.0);
    assert!(back.tint < 1.0);
}

#[test]
fn scene_graph_deserializes_from_collaborator_json() {
    let json = r#"{
        "name": "hero-model",
        "nodes": [{
            "name": "body",
            "translation": [0.0, 0.5, 0.0],
            "material": 0,
            "bounds_min": [-0.4, -0.5, -0.3],
            "bounds_max": [0.4, 0.5, 0.3]
        }],
        "materials": [{
            "name": "Paint",
            "base_color": [0.8, 0.2, 0.2, 1.0],
            "textures": [{ "slot": "base-color", "source": "tex/paint.png" }]
        }],
        "dependencies": ["hero.bin"]
    }"#;
    let graph: SceneGraph = serde_json::from_str(json).expect("graph should parse");
    assert_eq!(graph.nodes[0].scale, Vec3::ONE, "scale defaults to one");
    assert_eq!(graph.materials[0].cull, CullSide::Back, "cull defaults to back");
    assert_eq!(graph.materials[0].textures[0].slot, TextureSlot::BaseColor);
    assert!(graph.materials[0].textures[0].generate_mipmaps);
}

#[test]
fn marker_instances_cover_every_node_per_placement() {
    let asset = SceneAsset::prepare(make_graph(), &make_manifest()).unwrap();
    let placements = asset.parallax_pair();
    let markers = app_core::gpu::marker_instances(&asset, &placements);
    assert_eq!(markers.len(), asset.graph.nodes.len() * 2);

    // backdrop copies are dimmed
    let front_color = markers[0].color;
    let back_color = markers[asset.graph.nodes.len()].color;
    assert!(back_color[0] < front_color[0]);
}
