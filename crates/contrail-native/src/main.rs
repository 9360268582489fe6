//! Desktop preview of the showcase. The mouse wheel stands in for page
//! scroll against a fixed virtual range; arrow keys jump whole sections.
//! Hand control is web-only, so the preview always runs scroll-driven.

use std::time::Instant;
use winit::event::{ElementState, Event, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use contrail_core::{
    keyframes, target_pose, BeaconClip, ControlMode, GestureState, Keyframe, MeshAsset,
    MotionBlender, RenderTransform, ScrollState, SECTION_COUNT,
};

const PRIMARY_MESH_PATH: &str = "assets/aircraft.mesh.json";
const FALLBACK_MESH_PATH: &str = "assets/aircraft-lowpoly.mesh.json";

/// Stand-in for the page's scrollable range, in virtual pixels.
const VIRTUAL_RANGE_PX: f32 = 6000.0;
const WHEEL_LINE_PX: f32 = 120.0;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    pos: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    tint: [f32; 4],
    beacon: [f32; 4],
}

const AIRFRAME_TINT: [f32; 4] = [0.78, 0.80, 0.85, 1.0];
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

struct MeshBuffers {
    vertex_vb: wgpu::Buffer,
    index_ib: wgpu::Buffer,
    index_count: u32,
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    mesh: Option<MeshBuffers>,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(
        window: &'w winit::window::Window,
        mesh: Option<&MeshAsset>,
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

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("aircraft"),
            source: wgpu::ShaderSource::Wgsl(contrail_core::AIRCRAFT_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
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
        let depth_view = create_depth_view(&device, config.width, config.height);
        let mesh = mesh.map(|m| build_mesh(&device, m));

        Ok(Self {
            window,
            surface,
            device,
            queue,
            pipeline,
            uniform_buffer,
            bind_group,
            depth_view,
            mesh,
            width: config.width,
            height: config.height,
            config,
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
        self.depth_view = create_depth_view(&self.device, self.width, self.height);
    }

    fn render(
        &mut self,
        transform: &RenderTransform,
        beacon: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let aspect = self.width as f32 / self.height.max(1) as f32;
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: transform.view_proj(aspect).to_cols_array_2d(),
                model: transform.model_matrix().to_cols_array_2d(),
                tint: AIRFRAME_TINT,
                beacon: [beacon, 0.0, 0.0, 0.0],
            }),
        );

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
                            r: 0.04,
                            g: 0.06,
                            b: 0.10,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(mesh) = &self.mesh {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_vb.slice(..));
                rpass.set_index_buffer(mesh.index_ib.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn build_mesh(device: &wgpu::Device, mesh: &MeshAsset) -> MeshBuffers {
    use wgpu::util::DeviceExt;
    let vertices: Vec<Vertex> = mesh
        .positions
        .iter()
        .zip(&mesh.normals)
        .map(|(&pos, &normal)| Vertex { pos, normal })
        .collect();
    let vertex_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_vb"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_ib"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    MeshBuffers {
        vertex_vb,
        index_ib,
        index_count: mesh.indices.len() as u32,
    }
}

/// Same fallback chain as the web loader, over the filesystem.
fn load_mesh() -> Option<MeshAsset> {
    for path in [PRIMARY_MESH_PATH, FALLBACK_MESH_PATH] {
        let body = match std::fs::read_to_string(path) {
            Ok(b) => b,
            Err(e) => {
                log::error!("[assets] read {path}: {e}");
                continue;
            }
        };
        match MeshAsset::from_json(path, &body) {
            Ok(mesh) => {
                log::info!("[assets] loaded {path} ({} triangles)", mesh.triangle_count());
                return Some(mesh);
            }
            Err(e) => log::error!("[assets] {e}"),
        }
    }
    log::warn!("[assets] no model available; rendering scene without it");
    None
}

fn section_offset(section: usize) -> f32 {
    VIRTUAL_RANGE_PX * section as f32 / (SECTION_COUNT - 1) as f32
}

struct Preview {
    scroll_offset: f32,
    keyframes: [Keyframe; SECTION_COUNT],
    blender: MotionBlender,
    transform: RenderTransform,
    gesture: GestureState,
    beacon: Option<BeaconClip>,
    clip_time: f32,
    start: Instant,
    last: Instant,
}

impl Preview {
    fn scroll_state(&self) -> ScrollState {
        ScrollState::from_offset(self.scroll_offset, VIRTUAL_RANGE_PX)
    }

    fn step(&mut self) -> (RenderTransform, f32) {
        let now = Instant::now();
        let dt_sec = (now - self.last).as_secs_f32();
        self.last = now;
        let time_s = (now - self.start).as_secs_f32();
        self.clip_time += dt_sec;

        let scroll = self.scroll_state();
        let target = target_pose(&scroll, &self.keyframes);
        self.blender.step(
            &mut self.transform,
            ControlMode::ScrollDriven,
            &target,
            &self.gesture,
            time_s,
        );
        let beacon = self
            .beacon
            .map(|b| b.intensity(self.clip_time))
            .unwrap_or(0.0);
        (self.transform, beacon)
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    log::info!("[preview] hand control is web-only; running scroll-driven");

    let mesh = load_mesh();
    let beacon = mesh.as_ref().and_then(|m| m.beacon);

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Contrail (native preview)")
        .build(&event_loop)
        .expect("window");

    let mut gpu = pollster::block_on(GpuState::new(&window, mesh.as_ref())).expect("gpu");
    let now = Instant::now();
    let mut preview = Preview {
        scroll_offset: 0.0,
        keyframes: keyframes(),
        blender: MotionBlender,
        transform: RenderTransform::default(),
        gesture: GestureState::default(),
        beacon,
        clip_time: 0.0,
        start: now,
        last: now,
    };

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => gpu.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::MouseWheel { delta, .. },
                ..
            } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                preview.scroll_offset =
                    (preview.scroll_offset - dy).clamp(0.0, VIRTUAL_RANGE_PX);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } if event.state == ElementState::Pressed => {
                let section = preview.scroll_state().section;
                match event.logical_key {
                    Key::Named(NamedKey::ArrowRight) => {
                        preview.scroll_offset =
                            section_offset((section + 1).min(SECTION_COUNT - 1));
                    }
                    Key::Named(NamedKey::ArrowLeft) => {
                        preview.scroll_offset = section_offset(section.saturating_sub(1));
                    }
                    Key::Named(NamedKey::Escape) => elwt.exit(),
                    _ => {}
                }
            }
            Event::AboutToWait => {
                let (transform, beacon) = preview.step();
                match gpu.render(&transform, beacon) {
                    Ok(_) => gpu.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .unwrap();
}
