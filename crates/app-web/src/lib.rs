#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use app_core::{HeroView, MenuStyle, ProjectsConfig, ProjectsView, SceneAsset};
use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let hero_canvas = dom::canvas_by_id(&document, "hero-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #hero-canvas"))?;
    let projects_canvas = dom::canvas_by_id(&document, "projects-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #projects-canvas"))?;
    dom::sync_canvas_backing_size(&hero_canvas);
    dom::sync_canvas_backing_size(&projects_canvas);

    let device = events::detect_device_class(&window);
    log::info!("[init] device class {:?}", device);

    let start = Instant::now();
    let hero = Rc::new(RefCell::new(HeroView::new(
        device,
        hero_canvas.width() as f32,
        hero_canvas.height() as f32,
        0.0,
    )));
    let config = ProjectsConfig::for_device(device);
    let projects = Rc::new(RefCell::new(ProjectsView::new(device, config, 0.0)));

    // both observed menu presentations are supported; the page styles off
    // this class
    if let Some(menu) = document.get_element_by_id("project-menu") {
        menu.set_class_name(match config.menu_style {
            MenuStyle::Sidebar => "menu-sidebar",
            MenuStyle::Carousel => "menu-carousel",
        });
    }

    // Asset pipelines run decoupled from the frame loop; the loop renders
    // nothing for a scene until its slot fills.
    let manifest = assets::build_manifest();
    let hero_asset: Rc<RefCell<Option<SceneAsset>>> = Rc::new(RefCell::new(None));
    let projects_asset: Rc<RefCell<Option<SceneAsset>>> = Rc::new(RefCell::new(None));
    for (url, slot) in [
        ("/assets/scenes/hero.json", hero_asset.clone()),
        ("/assets/scenes/island.json", projects_asset.clone()),
    ] {
        let manifest = manifest.clone();
        spawn_local(async move {
            match assets::load_scene_asset(url, &manifest).await {
                Ok(asset) => *slot.borrow_mut() = Some(asset),
                // failure falls through to the surrounding UI's fallback;
                // the motion engine never sees it
                Err(e) => log::error!("asset load error for {url}: {e:?}"),
            }
        });
    }

    events::wire_input_handlers(events::InputWiring {
        hero: hero.clone(),
        projects: projects.clone(),
        hero_canvas: hero_canvas.clone(),
        projects_canvas: projects_canvas.clone(),
        start,
    });

    let hero_gpu = frame::init_gpu(&hero_canvas).await;
    let projects_gpu = frame::init_gpu(&projects_canvas).await;
    let audio_ctx = web::AudioContext::new().ok();

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        hero,
        projects.clone(),
        hero_canvas,
        projects_canvas,
        hero_gpu,
        projects_gpu,
        hero_asset,
        projects_asset,
        audio_ctx,
        start,
    )));
    let handle = frame::start_loop(frame_ctx);

    // page teardown: stop the loop and drop any in-flight camera move so
    // nothing acts on stale state
    {
        let projects = projects.clone();
        let closure = Closure::wrap(Box::new(move || {
            handle.cancel();
            projects.borrow_mut().cancel();
        }) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    Ok(())
}
