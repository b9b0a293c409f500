//! Asset-loading collaborator: fetches scene-graph JSON and runs the
//! presentation pipeline. Served URLs for an asset's dependent resources are
//! resolved through a manifest built once at startup.

use app_core::{AssetManifest, SceneAsset, SceneGraph};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Logical-path -> served-URL map for everything the two scene assets
/// reference. Build tooling fingerprints the files; this table is the single
/// place that knows about it.
pub fn build_manifest() -> AssetManifest {
    [
        ("hero.bin", "/assets/hero-2c91.bin"),
        ("tex/paint.png", "/assets/paint-5b10.png"),
        ("tex/visor.png", "/assets/visor-a644.png"),
        ("island.bin", "/assets/island-4f2a.bin"),
        ("tex/rock_albedo.png", "/assets/rock_albedo-91cc.png"),
        ("tex/rock_rough.png", "/assets/rock_rough-d01b.png"),
        ("tex/grass.png", "/assets/grass-77e3.png"),
        ("tex/sand.png", "/assets/sand-08fe.png"),
    ]
    .into_iter()
    .collect()
}

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {e:?}"))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: status {}", resp.status());
    }
    let text_promise: js_sys::Promise = resp.text().map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("fetch {url}: body is not text"))
}

/// Load one scene graph and prepare it for presentation. Failure propagates
/// to the caller's fallback state; nothing here retries.
pub async fn load_scene_asset(url: &str, manifest: &AssetManifest) -> anyhow::Result<SceneAsset> {
    let body = fetch_text(url).await?;
    let graph: SceneGraph = serde_json::from_str(&body)?;
    let asset = SceneAsset::prepare(graph, manifest)?;
    Ok(asset)
}
