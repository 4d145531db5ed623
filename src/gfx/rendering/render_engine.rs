use std::{iter, sync::Arc};

use thiserror::Error;
use wgpu::{DepthStencilState, RenderPipeline, TextureFormat};

use crate::gfx::{
    geometry::{generate_cube, generate_ground, generate_hexagonal_prism},
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
        texture_data,
        texture_resource::TextureResource,
    },
    scene::{MeshKind, Scene, Vertex3D},
};

use super::mesh::{DrawMesh, GpuMesh};

/// Errors raised while bringing up the GPU surface and device.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to acquire graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,

    lit_pipeline: RenderPipeline,
    lit_tex_pipeline: RenderPipeline,

    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_layout: wgpu::BindGroupLayout,

    ground_mesh: GpuMesh,
    hexagon_mesh: GpuMesh,
    cube_mesh: GpuMesh,
    ground_texture: wgpu::BindGroup,
    crate_texture: wgpu::BindGroup,
}

impl RenderEngine {
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        ground_extent: f32,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("rendering on {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: surface_capabilities.present_modes[0],
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        // Global uniforms shared by both pipelines
        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
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

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Lit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("lit.wgsl").into()),
        });
        let lit_tex_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Lit Textured Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("lit_tex.wgsl").into()),
        });

        let lit_pipeline = build_pipeline(
            &device,
            "Lit Pipeline",
            &lit_shader,
            &[global_bindings.layout(), &object_layout],
            format,
            depth_texture.texture.format(),
        );
        let lit_tex_pipeline = build_pipeline(
            &device,
            "Lit Textured Pipeline",
            &lit_tex_shader,
            &[global_bindings.layout(), &object_layout, &texture_layout],
            format,
            depth_texture.texture.format(),
        );

        // Static scene geometry, uploaded once
        let ground_mesh = GpuMesh::new(&device, &generate_ground(ground_extent, 16, 8.0), "Ground");
        let hexagon_mesh = GpuMesh::new(&device, &generate_hexagonal_prism(1.0, 1.0), "Hexagon");
        let cube_mesh = GpuMesh::new(&device, &generate_cube(), "Cube");

        let ground_pixels = texture_data::checkerboard(256, 16);
        let ground_texture_resource =
            TextureResource::create_from_rgba_data(&device, &queue, &ground_pixels, 256, 256, "Ground Texture");
        let crate_pixels = texture_data::crate_pattern(256);
        let crate_texture_resource =
            TextureResource::create_from_rgba_data(&device, &queue, &crate_pixels, 256, 256, "Crate Texture");

        let ground_texture =
            texture_bind_group(&device, &texture_layout, &ground_texture_resource, "Ground");
        let crate_texture =
            texture_bind_group(&device, &texture_layout, &crate_texture_resource, "Crate");

        Ok(RenderEngine {
            device: device.into(),
            config,
            format,
            surface,
            queue: queue.into(),
            depth_texture,
            lit_pipeline,
            lit_tex_pipeline,
            global_ubo,
            global_bindings,
            object_layout,
            ground_mesh,
            hexagon_mesh,
            cube_mesh,
            ground_texture,
            crate_texture,
        })
    }

    /// Uploads this frame's global and per-object uniforms.
    pub fn update(&mut self, scene: &mut Scene) {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            scene.camera.eye,
            &scene.lighting,
        );
        scene.flush_gpu(&self.queue);
    }

    pub fn render_frame(&self, scene: &Scene) {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(err) => {
                log::error!("failed to acquire frame: {err}");
                return;
            }
        };

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    format: Some(self.format),
                    ..Default::default()
                });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.2,
                            g: 0.2,
                            b: 0.2,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for object in scene.objects.iter() {
                let Some(gpu) = object.gpu_resources.as_ref() else {
                    continue;
                };

                match object.kind {
                    MeshKind::Hexagon => {
                        render_pass.set_pipeline(&self.lit_pipeline);
                    }
                    MeshKind::Ground => {
                        render_pass.set_pipeline(&self.lit_tex_pipeline);
                        render_pass.set_bind_group(2, &self.ground_texture, &[]);
                    }
                    MeshKind::Cube => {
                        render_pass.set_pipeline(&self.lit_tex_pipeline);
                        render_pass.set_bind_group(2, &self.crate_texture, &[]);
                    }
                }
                render_pass.set_bind_group(1, &gpu.bind_group, &[]);
                render_pass.draw_mesh(self.mesh_for(object.kind));
            }
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn object_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.object_layout
    }

    fn mesh_for(&self, kind: MeshKind) -> &GpuMesh {
        match kind {
            MeshKind::Ground => &self.ground_mesh,
            MeshKind::Hexagon => &self.hexagon_mesh,
            MeshKind::Cube => &self.cube_mesh,
        }
    }
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &TextureResource,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{} Texture Bind Group", label)),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
    })
}

fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    format: TextureFormat,
    depth_format: TextureFormat,
) -> RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex3D::desc()],
            compilation_options: Default::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
            unclipped_depth: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        multiview: None,
        cache: None,
    })
}
