use std::cell::{Cell, RefCell};
use std::rc::Rc;

use app_core::{Camera, HeroView, Pose, ProjectsView, SceneAsset, SceneInstance};
use glam::{Mat3, Vec3};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::{audio, dom, overlay, render};

/// Fixed hero camera; only the model moves in that view.
const HERO_CAMERA: Pose = Pose::new(
    Vec3::new(0.0, 0.45, 2.2),
    Vec3::new(0.0, 0.3, 0.0),
    40.0,
);

pub struct FrameContext<'a> {
    pub hero: Rc<RefCell<HeroView>>,
    pub projects: Rc<RefCell<ProjectsView>>,

    pub hero_canvas: web::HtmlCanvasElement,
    pub projects_canvas: web::HtmlCanvasElement,
    pub hero_gpu: Option<render::GpuState<'a>>,
    pub projects_gpu: Option<render::GpuState<'a>>,

    pub hero_asset: Rc<RefCell<Option<SceneAsset>>>,
    pub projects_asset: Rc<RefCell<Option<SceneAsset>>>,

    pub audio_ctx: Option<web::AudioContext>,

    pub start: Instant,
    pub last_instant: Instant,
    hero_revealed: bool,
    projects_revealed: bool,
    egg_was_visible: bool,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        hero: Rc<RefCell<HeroView>>,
        projects: Rc<RefCell<ProjectsView>>,
        hero_canvas: web::HtmlCanvasElement,
        projects_canvas: web::HtmlCanvasElement,
        hero_gpu: Option<render::GpuState<'a>>,
        projects_gpu: Option<render::GpuState<'a>>,
        hero_asset: Rc<RefCell<Option<SceneAsset>>>,
        projects_asset: Rc<RefCell<Option<SceneAsset>>>,
        audio_ctx: Option<web::AudioContext>,
        start: Instant,
    ) -> Self {
        Self {
            hero,
            projects,
            hero_canvas,
            projects_canvas,
            hero_gpu,
            projects_gpu,
            hero_asset,
            projects_asset,
            audio_ctx,
            start,
            last_instant: Instant::now(),
            hero_revealed: false,
            projects_revealed: false,
            egg_was_visible: false,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let now_sec = self.start.elapsed().as_secs_f64();

        self.frame_hero(dt, now_sec);
        self.frame_projects(dt, now_sec);
    }

    fn frame_hero(&mut self, dt: instant::Duration, now_sec: f64) {
        let hero_frame = self.hero.borrow_mut().tick(dt, now_sec);

        // easter egg edge transitions drive the overlay and the chime
        if hero_frame.egg_visible && !self.egg_was_visible {
            if let Some(doc) = dom::window_document() {
                overlay::show_egg(&doc);
            }
            if let Some(ctx) = &self.audio_ctx {
                audio::play_egg_chime(ctx);
            }
        } else if !hero_frame.egg_visible && self.egg_was_visible {
            if let Some(doc) = dom::window_document() {
                overlay::hide_egg(&doc);
            }
        }
        self.egg_was_visible = hero_frame.egg_visible;

        let asset_ref = self.hero_asset.borrow();
        let Some(asset) = asset_ref.as_ref() else {
            return; // tolerate the asset being unavailable until ready
        };
        if !self.hero_revealed {
            self.hero_revealed = true;
            if let Some(doc) = dom::window_document() {
                dom::reveal_element(&doc, "hero-canvas");
            }
        }

        let placement = SceneInstance {
            offset: hero_frame.orientation.offset,
            scale_mul: hero_frame.orientation.scale,
            tint: 1.0,
        };
        let mut markers = app_core::marker_instances(asset, &[placement]);
        let rot = Mat3::from_rotation_y(hero_frame.orientation.rotation.y)
            * Mat3::from_rotation_x(hero_frame.orientation.rotation.x);
        let pop = (hero_frame.orientation.scale - 1.0).max(0.0);
        for marker in &mut markers {
            let p = rot * Vec3::from_array(marker.pos);
            marker.pos = p.to_array();
            marker.glow = pop * 4.0;
        }
        drop(asset_ref);

        if let Some(gpu) = &mut self.hero_gpu {
            gpu.resize_if_needed(self.hero_canvas.width(), self.hero_canvas.height());
            let camera = Camera::from_pose(&HERO_CAMERA, gpu.aspect());
            if let Err(e) = gpu.render(&camera, &markers) {
                log::error!("hero render error: {:?}", e);
            }
        }
    }

    fn frame_projects(&mut self, dt: instant::Duration, now_sec: f64) {
        let pose = self.projects.borrow_mut().tick(dt, now_sec);

        let asset_ref = self.projects_asset.borrow();
        let Some(asset) = asset_ref.as_ref() else {
            return;
        };
        if !self.projects_revealed {
            self.projects_revealed = true;
            if let Some(doc) = dom::window_document() {
                dom::reveal_element(&doc, "projects-canvas");
            }
        }

        let placements = asset.parallax_pair();
        let markers = app_core::marker_instances(asset, &placements);
        drop(asset_ref);

        if let Some(gpu) = &mut self.projects_gpu {
            gpu.resize_if_needed(self.projects_canvas.width(), self.projects_canvas.height());
            let camera = Camera::from_pose(&pose, gpu.aspect());
            if let Err(e) = gpu.render(&camera, &markers) {
                log::error!("projects render error: {:?}", e);
            }
        }
    }
}

/// Handle to a running requestAnimationFrame loop. Dropping it does not stop
/// the loop; call [`FrameHandle::cancel`] on unmount so no callback acts on
/// stale state.
pub struct FrameHandle {
    raf_id: Rc<Cell<Option<i32>>>,
    _closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameHandle {
    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> FrameHandle {
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let raf_id_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if raf_id_tick.get().is_none() {
            return; // canceled between schedule and dispatch
        }
        frame_ctx.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Ok(id) = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            ) {
                raf_id_tick.set(Some(id));
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Ok(id) =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            raf_id.set(Some(id));
        }
    }
    FrameHandle {
        raf_id,
        _closure: tick,
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for the surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}
