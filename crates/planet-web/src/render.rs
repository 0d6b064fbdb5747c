//! WebGPU renderer: instanced circular point sprites for the particle
//! clouds, a line list for the glyph wireframe, a glow billboard, and one
//! textured quad per floating quote.

use web_sys as web;
use wgpu::util::DeviceExt;

use crate::sprites::SpriteTexture;

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
static GLOW_WGSL: &str = include_str!("../shaders/glow.wgsl");
static SPRITE_WGSL: &str = include_str!("../shaders/sprite.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub time: f32,
    pub spin_factor: f32,
    pub cursor_proximity: f32,
    pub glow_radius: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub pos: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub pos: [f32; 3],
    pub scale: [f32; 2],
    pub opacity: f32,
    pub _pad: [f32; 2],
}

/// Which wireframe edge list is active this frame.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ActiveEdges {
    Compact,
    Expanded,
}

/// Static scene dimensions and assets, fixed at initialization.
pub struct RenderSetup<'s> {
    pub star_count: usize,
    pub planet_count: usize,
    pub text_count: usize,
    pub compact_edges: &'s [u32],
    pub expanded_edges: &'s [u32],
    pub sprites: &'s [SpriteTexture],
}

/// Per-frame buffer contents assembled by the frame step.
pub struct FrameData<'f> {
    pub uniforms: Uniforms,
    pub stars: &'f [PointInstance],
    pub planet: &'f [PointInstance],
    pub text: &'f [PointInstance],
    pub lines: &'f [LineVertex],
    pub edges: ActiveEdges,
    pub sprites: &'f [SpriteInstance],
}

struct PipelineDesc<'p> {
    label: &'p str,
    shader: &'p wgpu::ShaderModule,
    layout: &'p wgpu::PipelineLayout,
    vs: &'p str,
    fs: &'p str,
    buffers: &'p [wgpu::VertexBufferLayout<'p>],
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
}

fn make_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    desc: PipelineDesc,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some(desc.vs),
            buffers: desc.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some(desc.fs),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(desc.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,

    points_pipeline: wgpu::RenderPipeline,
    lines_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    sprite_pipeline: wgpu::RenderPipeline,

    quad_vb: wgpu::Buffer,
    star_vb: wgpu::Buffer,
    planet_vb: wgpu::Buffer,
    text_vb: wgpu::Buffer,
    line_vb: wgpu::Buffer,
    compact_ib: wgpu::Buffer,
    compact_index_count: u32,
    expanded_ib: wgpu::Buffer,
    expanded_index_count: u32,
    sprite_vb: wgpu::Buffer,
    sprite_bind_groups: Vec<wgpu::BindGroup>,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        setup: RenderSetup<'_>,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Quad vertex buffer (two triangles)
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_buffer = |label: &str, count: usize| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: (std::mem::size_of::<PointInstance>() * count.max(1)) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let star_vb = instance_buffer("star_vb", setup.star_count);
        let planet_vb = instance_buffer("planet_vb", setup.planet_count);
        let text_vb = instance_buffer("text_vb", setup.text_count);

        let line_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("line_vb"),
            size: (std::mem::size_of::<LineVertex>() * setup.text_count.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let compact_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("compact_ib"),
            contents: bytemuck::cast_slice(setup.compact_edges),
            usage: wgpu::BufferUsages::INDEX,
        });
        let expanded_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("expanded_ib"),
            contents: bytemuck::cast_slice(setup.expanded_edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        let sprite_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sprite_vb"),
            size: (std::mem::size_of::<SpriteInstance>() * setup.sprites.len().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // One texture + bind group per quote billboard
        let sprite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let mut sprite_bind_groups = Vec::with_capacity(setup.sprites.len());
        for (i, s) in setup.sprites.iter().enumerate() {
            let tex = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("sprite_tex"),
                size: wgpu::Extent3d {
                    width: s.width.max(1),
                    height: s.height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &tex,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &s.rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * s.width.max(1)),
                    rows_per_image: Some(s.height.max(1)),
                },
                wgpu::Extent3d {
                    width: s.width.max(1),
                    height: s.height.max(1),
                    depth_or_array_layers: 1,
                },
            );
            let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
            sprite_bind_groups.push(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("sprite_bg_{i}")),
                layout: &sprite_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&linear_sampler),
                    },
                ],
            }));
        }

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let glow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glow_shader"),
            source: wgpu::ShaderSource::Wgsl(GLOW_WGSL.into()),
        });
        let sprite_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprite_shader"),
            source: wgpu::ShaderSource::Wgsl(SPRITE_WGSL.into()),
        });

        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let sprite_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pl"),
            bind_group_layouts: &[&scene_bgl, &sprite_bgl],
            push_constant_ranges: &[],
        });

        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        };
        let point_instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
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
            ],
        };
        let line_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
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
        };
        let sprite_instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 12,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 20,
                    shader_location: 3,
                },
            ],
        };

        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let points_pipeline = make_pipeline(
            &device,
            format,
            PipelineDesc {
                label: "points_pipeline",
                shader: &scene_shader,
                layout: &scene_pl,
                vs: "vs_points",
                fs: "fs_points",
                buffers: &[quad_layout.clone(), point_instance_layout],
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: wgpu::BlendState::ALPHA_BLENDING,
            },
        );
        let lines_pipeline = make_pipeline(
            &device,
            format,
            PipelineDesc {
                label: "lines_pipeline",
                shader: &scene_shader,
                layout: &scene_pl,
                vs: "vs_lines",
                fs: "fs_lines",
                buffers: &[line_layout],
                topology: wgpu::PrimitiveTopology::LineList,
                blend: wgpu::BlendState::ALPHA_BLENDING,
            },
        );
        let glow_pipeline = make_pipeline(
            &device,
            format,
            PipelineDesc {
                label: "glow_pipeline",
                shader: &glow_shader,
                layout: &scene_pl,
                vs: "vs_glow",
                fs: "fs_glow",
                buffers: &[quad_layout.clone()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: additive,
            },
        );
        let sprite_pipeline = make_pipeline(
            &device,
            format,
            PipelineDesc {
                label: "sprite_pipeline",
                shader: &sprite_shader,
                layout: &sprite_pl,
                vs: "vs_sprite",
                fs: "fs_sprite",
                buffers: &[quad_layout, sprite_instance_layout],
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: additive,
            },
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            scene_bind_group,
            points_pipeline,
            lines_pipeline,
            glow_pipeline,
            sprite_pipeline,
            quad_vb,
            star_vb,
            planet_vb,
            text_vb,
            line_vb,
            compact_ib,
            compact_index_count: setup.compact_edges.len() as u32,
            expanded_ib,
            expanded_index_count: setup.expanded_edges.len() as u32,
            sprite_vb,
            sprite_bind_groups,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn render(&mut self, frame: &FrameData) -> Result<(), wgpu::SurfaceError> {
        let surface_tex = self.surface.get_current_texture()?;
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&frame.uniforms));
        self.queue
            .write_buffer(&self.star_vb, 0, bytemuck::cast_slice(frame.stars));
        self.queue
            .write_buffer(&self.planet_vb, 0, bytemuck::cast_slice(frame.planet));
        self.queue
            .write_buffer(&self.text_vb, 0, bytemuck::cast_slice(frame.text));
        self.queue
            .write_buffer(&self.line_vb, 0, bytemuck::cast_slice(frame.lines));
        self.queue
            .write_buffer(&self.sprite_vb, 0, bytemuck::cast_slice(frame.sprites));

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        // Background to foreground: stars, quotes, glow, planet, glyph
        rpass.set_pipeline(&self.points_pipeline);
        rpass.set_bind_group(0, &self.scene_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, self.star_vb.slice(..));
        rpass.draw(0..6, 0..frame.stars.len() as u32);

        if !frame.sprites.is_empty() {
            rpass.set_pipeline(&self.sprite_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.sprite_vb.slice(..));
            for (i, bg) in self.sprite_bind_groups.iter().enumerate() {
                rpass.set_bind_group(1, bg, &[]);
                let i = i as u32;
                rpass.draw(0..6, i..i + 1);
            }
        }

        rpass.set_pipeline(&self.glow_pipeline);
        rpass.set_bind_group(0, &self.scene_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.draw(0..6, 0..1);

        rpass.set_pipeline(&self.points_pipeline);
        rpass.set_bind_group(0, &self.scene_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, self.planet_vb.slice(..));
        rpass.draw(0..6, 0..frame.planet.len() as u32);

        rpass.set_vertex_buffer(1, self.text_vb.slice(..));
        rpass.draw(0..6, 0..frame.text.len() as u32);

        let (ib, index_count) = match frame.edges {
            ActiveEdges::Compact => (&self.compact_ib, self.compact_index_count),
            ActiveEdges::Expanded => (&self.expanded_ib, self.expanded_index_count),
        };
        if index_count > 0 {
            rpass.set_pipeline(&self.lines_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.line_vb.slice(..));
            rpass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..index_count, 0, 0..1);
        }

        drop(rpass);
        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}
