//! GPU-shared data layouts used by both shells' renderers.

use glam::Vec4;

use crate::scene::{SceneAsset, SceneInstance};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    pub pos: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
    pub glow: f32,
}

/// Builds marker instances for every node of a prepared asset under each
/// placement, with the parallax duplicate dimmed via its tint.
pub fn marker_instances(asset: &SceneAsset, placements: &[SceneInstance]) -> Vec<MarkerInstance> {
    let mut out = Vec::with_capacity(asset.graph.nodes.len() * placements.len());
    for placement in placements {
        for node in &asset.graph.nodes {
            let color = node
                .material
                .and_then(|i| asset.graph.materials.get(i))
                .map(|m| Vec4::from_array(m.base_color))
                .unwrap_or(Vec4::new(0.6, 0.65, 0.75, 1.0));
            let extent = (node.bounds_max - node.bounds_min) * node.scale;
            let marker_scale =
                (extent.max_element() * asset.normalization_scale * placement.scale_mul).max(0.05);
            out.push(MarkerInstance {
                pos: asset.node_world_position(node, placement).to_array(),
                scale: marker_scale,
                color: [
                    color.x * placement.tint,
                    color.y * placement.tint,
                    color.z * placement.tint,
                    color.w,
                ],
                glow: 0.0,
            });
        }
    }
    out
}
