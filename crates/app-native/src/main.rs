//! Desktop preview shell: drives the hero view with real mouse input so the
//! choreography can be tuned without a browser round trip.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use app_core::{
    AssetManifest, Camera, DeviceClass, HeroView, MarkerInstance, Pose, SceneAsset, SceneGraph,
    SceneInstance, Uniforms,
};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glam::{Mat3, Vec3};

const HERO_CAMERA: Pose = Pose::new(
    Vec3::new(0.0, 0.45, 2.2),
    Vec3::new(0.0, 0.3, 0.0),
    40.0,
);

const MAX_INSTANCES: usize = 256;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    last_frame: Instant,
    start: Instant,
    hero: HeroView,
    asset: Option<SceneAsset>,
    chime: Option<Arc<Mutex<ChimeState>>>,
}

impl<'w> GpuState<'w> {
    async fn new(
        window: &'w winit::window::Window,
        hero: HeroView,
        asset: Option<SceneAsset>,
        chime: Option<Arc<Mutex<ChimeState>>>,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(app_core::SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<MarkerInstance>() * MAX_INSTANCES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: quad positions
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MarkerInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 32,
                        shader_location: 4,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            bind_group,
            width: size.width,
            height: size.height,
            last_frame: Instant::now(),
            start: Instant::now(),
            hero,
            asset,
            chime,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.hero
            .pointer
            .set_viewport(new_size.width as f32, new_size.height as f32);
    }

    fn click(&mut self) {
        let now_sec = self.start.elapsed().as_secs_f64();
        if self.hero.click(now_sec) {
            if let Some(chime) = &self.chime {
                trigger_chime(chime);
            }
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        let now_sec = self.start.elapsed().as_secs_f64();

        let hero_frame = self.hero.tick(dt, now_sec);

        let mut instances: Vec<MarkerInstance> = Vec::new();
        if let Some(asset) = &self.asset {
            let placement = SceneInstance {
                offset: hero_frame.orientation.offset,
                scale_mul: hero_frame.orientation.scale,
                tint: 1.0,
            };
            instances = app_core::marker_instances(asset, &[placement]);
            let rot = Mat3::from_rotation_y(hero_frame.orientation.rotation.y)
                * Mat3::from_rotation_x(hero_frame.orientation.rotation.x);
            let pop = (hero_frame.orientation.scale - 1.0).max(0.0);
            for marker in &mut instances {
                let p = rot * Vec3::from_array(marker.pos);
                marker.pos = p.to_array();
                marker.glow = pop * 4.0;
            }
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let camera = Camera::from_pose(&HERO_CAMERA, aspect);
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: camera.view_proj().to_cols_array_2d(),
            }),
        );
        let count = instances.len().min(MAX_INSTANCES);
        if count > 0 {
            self.queue
                .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&instances[..count]));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.04,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..(count as u32));
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn local_manifest() -> AssetManifest {
    [
        ("hero.bin", "assets/hero.bin"),
        ("tex/paint.png", "assets/paint.png"),
        ("tex/visor.png", "assets/visor.png"),
    ]
    .into_iter()
    .collect()
}

fn load_hero_asset() -> Option<SceneAsset> {
    let body = match std::fs::read_to_string("assets/scenes/hero.json") {
        Ok(b) => b,
        Err(e) => {
            log::warn!("no hero scene on disk ({e}); rendering empty stage");
            return None;
        }
    };
    let graph: SceneGraph = match serde_json::from_str(&body) {
        Ok(g) => g,
        Err(e) => {
            log::error!("hero scene parse error: {e}");
            return None;
        }
    };
    match SceneAsset::prepare(graph, &local_manifest()) {
        Ok(asset) => Some(asset),
        Err(e) => {
            log::error!("hero scene prepare error: {e}");
            None
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let asset = load_hero_asset();
    let chime = start_chime_engine();
    let (chime_state, _audio_stream) = match chime {
        Some((state, stream)) => (Some(state), Some(stream)),
        None => (None, None),
    };

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("folio-1 hero preview")
        .build(&event_loop)
        .expect("window");

    let size = window.inner_size();
    let hero = HeroView::new(
        DeviceClass::Desktop,
        size.width as f32,
        size.height as f32,
        0.0,
    );

    let mut state =
        pollster::block_on(GpuState::new(&window, hero, asset, chime_state)).expect("gpu");
    let mut cursor_down_at: Option<(f32, f32)> = None;
    let mut cursor_moved = false;
    let mut cursor = (0.0_f32, 0.0_f32);

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => state.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => {
                cursor = (position.x as f32, position.y as f32);
                state.hero.pointer.pointer_move(cursor.0, cursor.1);
                if let Some((dx, dy)) = cursor_down_at {
                    if ((cursor.0 - dx).powi(2) + (cursor.1 - dy).powi(2)).sqrt() > 4.0 {
                        cursor_moved = true;
                    }
                }
            }
            Event::WindowEvent {
                event:
                    WindowEvent::MouseInput {
                        state: button_state,
                        button: MouseButton::Left,
                        ..
                    },
                ..
            } => match button_state {
                ElementState::Pressed => {
                    state.hero.pointer.pointer_down(cursor.0, cursor.1);
                    cursor_down_at = Some(cursor);
                    cursor_moved = false;
                }
                ElementState::Released => {
                    state.hero.pointer.pointer_up();
                    if cursor_down_at.take().is_some() && !cursor_moved {
                        state.click();
                    }
                }
            },
            Event::AboutToWait => match state.render() {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            },
            _ => {}
        })
        .unwrap();
}

// ---------------- Native audio (cpal) ----------------

#[derive(Clone)]
struct ChimeVoice {
    amplitude: f32,
    phase: f32,     // radians
    phase_inc: f32, // radians per sample
    total_samples: u32,
    samples_emitted: u32,
    attack_samples: u32,
    release_samples: u32,
}

struct ChimeState {
    sample_rate: f32,
    voices: Vec<ChimeVoice>,
}

/// Queue the two-tone easter-egg chime on the output stream.
fn trigger_chime(state: &Arc<Mutex<ChimeState>>) {
    let mut guard = state.lock().unwrap();
    let sr = guard.sample_rate;
    let total = (0.45 * sr) as u32;
    for (freq, amp) in [(523.25_f32, 0.22_f32), (784.0, 0.12)] {
        guard.voices.push(ChimeVoice {
            amplitude: amp,
            phase: 0.0,
            phase_inc: 2.0 * std::f32::consts::PI * freq / sr,
            total_samples: total.max(1),
            samples_emitted: 0,
            attack_samples: (0.03 * sr) as u32,
            release_samples: (0.12 * sr) as u32,
        });
    }
}

fn start_chime_engine() -> Option<(Arc<Mutex<ChimeState>>, cpal::Stream)> {
    let host = cpal::default_host();
    let device = host.default_output_device()?;
    let config = device.default_output_config().ok()?;
    if config.sample_format() != cpal::SampleFormat::F32 {
        log::warn!("chime disabled: output format {:?}", config.sample_format());
        return None;
    }
    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let state = Arc::new(Mutex::new(ChimeState {
        sample_rate,
        voices: Vec::new(),
    }));

    let state_cb = Arc::clone(&state);
    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let mut guard = state_cb.lock().unwrap();
                for frame in data.chunks_mut(channels) {
                    let mut sample = 0.0_f32;
                    for voice in guard.voices.iter_mut() {
                        let t = voice.samples_emitted;
                        let env_in = if voice.attack_samples > 0 {
                            (t as f32 / voice.attack_samples as f32).min(1.0)
                        } else {
                            1.0
                        };
                        let remaining = voice.total_samples.saturating_sub(t);
                        let env_out = if voice.release_samples > 0 {
                            (remaining as f32 / voice.release_samples as f32).min(1.0)
                        } else {
                            1.0
                        };
                        sample += voice.amplitude * env_in * env_out * voice.phase.sin();
                        voice.phase += voice.phase_inc;
                        voice.samples_emitted += 1;
                    }
                    guard
                        .voices
                        .retain(|v| v.samples_emitted < v.total_samples);
                    for out in frame.iter_mut() {
                        *out = sample;
                    }
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .ok()?;
    stream.play().ok()?;
    Some((state, stream))
}
