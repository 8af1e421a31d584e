use std::borrow::Cow;

use bytemuck::{bytes_of, cast_slice};
use image::{RgbaImage, imageops};
use lib_app::AppContext;
use lib_gpu::{
    AddressMode, BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout,
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingResource, BindingType, BlendState,
    Buffer, BufferBindingType, BufferDescriptor, BufferUsages, COPY_BUFFER_ALIGNMENT, Color,
    ColorTargetState, ColorWrites, CommandEncoderDescriptor, Device, Extent3d, FilterMode,
    FragmentState, FrontFace, LoadOp, MultisampleState, Operations, Origin3d,
    PipelineCompilationOptions, PipelineLayoutDescriptor, PolygonMode, PrimitiveState,
    PrimitiveTopology, Queue, RenderPassColorAttachment, RenderPassDescriptor, RenderPipeline,
    RenderPipelineDescriptor, Sampler, SamplerBindingType, SamplerDescriptor, ShaderStages,
    StoreOp, TexelCopyBufferLayout, TexelCopyTextureInfo, Texture, TextureAspect,
    TextureDescriptor, TextureDimension, TextureFormat, TextureSampleType, TextureUsages,
    TextureView, TextureViewDescriptor, TextureViewDimension, VertexState, include_wgsl,
};
use log::warn;

use crate::{DrawCall, GpuBackend, TextureHandle, ViewUniform, vertex::VERTEX_BUFFER_LAYOUT};

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub surface_format: TextureFormat,
}

/// [`GpuBackend`] drawing into a frame target with wgpu.
///
/// Draws are only accepted between [`begin_frame`](Self::begin_frame) and
/// [`end_frame`](Self::end_frame). The first draw of a frame clears the
/// target.
#[derive(Debug)]
pub struct WgpuBackend {
    device: Device,
    queue: Queue,
    vertex_buf: Buffer,
    view_uniform_buf: Buffer,
    view_bind_group: BindGroup,
    texture_bind_group_layout: BindGroupLayout,
    sampler: Sampler,
    pipeline: RenderPipeline,
    textures: Vec<GpuTexture>,
    frame: Option<Frame>,
}

#[derive(Debug)]
struct GpuTexture {
    _texture: Texture,
    bind_group: BindGroup,
}

#[derive(Debug)]
struct Frame {
    output: TextureView,
    clear_color: Color,
    has_rendered: bool,
}

impl WgpuBackend {
    pub fn new(max_vertex_bytes: usize, ctx: RenderContext<'_>) -> Self {
        let vertex_buf = ctx.device.create_buffer(&BufferDescriptor {
            label: Some("lib_renderer vertex buffer"),
            size: (max_vertex_bytes as u64).next_multiple_of(COPY_BUFFER_ALIGNMENT),
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let view_uniform_buf = ctx.device.create_buffer(&BufferDescriptor {
            label: Some("lib_renderer view uniform buffer"),
            size: size_of::<ViewUniform>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = ctx.device.create_sampler(&SamplerDescriptor {
            label: Some("lib_renderer sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            anisotropy_clamp: 1,
            border_color: None,
            compare: None,
            lod_max_clamp: 32.0,
            lod_min_clamp: 0.0,
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Nearest,
            mipmap_filter: FilterMode::Nearest,
        });

        let view_bind_group_layout =
            ctx.device
                .create_bind_group_layout(&BindGroupLayoutDescriptor {
                    label: Some("lib_renderer view bind group layout"),
                    entries: &[BindGroupLayoutEntry {
                        binding: 0,
                        ty: BindingType::Buffer {
                            ty: BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                        visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
                    }],
                });

        let texture_bind_group_layout =
            ctx.device
                .create_bind_group_layout(&BindGroupLayoutDescriptor {
                    label: Some("lib_renderer texture bind group layout"),
                    entries: &[
                        BindGroupLayoutEntry {
                            binding: 0,
                            ty: BindingType::Texture {
                                sample_type: TextureSampleType::Float { filterable: false },
                                view_dimension: TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                            visibility: ShaderStages::FRAGMENT,
                        },
                        BindGroupLayoutEntry {
                            binding: 1,
                            ty: BindingType::Sampler(SamplerBindingType::NonFiltering),
                            count: None,
                            visibility: ShaderStages::FRAGMENT,
                        },
                    ],
                });

        let view_bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("lib_renderer view bind group"),
            layout: &view_bind_group_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: view_uniform_buf.as_entire_binding(),
            }],
        });

        let shader = ctx
            .device
            .create_shader_module(include_wgsl!("shader.wgsl"));

        let pipeline = ctx
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some("lib_renderer pipeline"),
                cache: None,
                depth_stencil: None,
                layout: Some(
                    &ctx.device
                        .create_pipeline_layout(&PipelineLayoutDescriptor {
                            label: Some("lib_renderer pipeline layout"),
                            bind_group_layouts: &[
                                &view_bind_group_layout,
                                &texture_bind_group_layout,
                            ],
                            push_constant_ranges: &[],
                        }),
                ),
                multiview: None,
                primitive: PrimitiveState {
                    front_face: FrontFace::Ccw,
                    conservative: false,
                    cull_mode: None,
                    polygon_mode: PolygonMode::Fill,
                    strip_index_format: None,
                    topology: PrimitiveTopology::TriangleList,
                    unclipped_depth: false,
                },
                vertex: VertexState {
                    module: &shader,
                    entry_point: None,
                    compilation_options: PipelineCompilationOptions::default(),
                    buffers: &[VERTEX_BUFFER_LAYOUT],
                },
                fragment: Some(FragmentState {
                    module: &shader,
                    targets: &[Some(ColorTargetState {
                        blend: Some(BlendState::ALPHA_BLENDING),
                        format: ctx.surface_format,
                        write_mask: ColorWrites::all(),
                    })],
                    entry_point: None,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                multisample: MultisampleState::default(),
            });

        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            vertex_buf,
            view_uniform_buf,
            view_bind_group,
            texture_bind_group_layout,
            sampler,
            pipeline,
            textures: Vec::new(),
            frame: None,
        }
    }

    /// Directs subsequent draws at `output`.
    pub fn begin_frame(&mut self, output: &TextureView, clear_color: Color) {
        if self.frame.is_some() {
            warn!("frame started before the previous one ended");
            self.end_frame();
        }

        self.frame = Some(Frame {
            output: output.clone(),
            clear_color,
            has_rendered: false,
        });
    }

    /// Ends the frame, clearing the target if nothing was drawn into it.
    pub fn end_frame(&mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };

        if frame.has_rendered {
            return;
        }

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor::default());

        encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("lib_renderer clear pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &frame.output,
                depth_slice: None,
                ops: Operations {
                    load: LoadOp::Clear(frame.clear_color),
                    store: StoreOp::Store,
                },
                resolve_target: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        self.queue.submit([encoder.finish()]);
    }
}

impl GpuBackend for WgpuBackend {
    fn create_texture(&mut self, image: &RgbaImage) -> TextureHandle {
        let mip_level_count = mip_level_count(image.width(), image.height());

        let texture = self.device.create_texture(&TextureDescriptor {
            label: Some("lib_renderer texture"),
            size: Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let mut level_image = Cow::Borrowed(image);
        for mip_level in 0..mip_level_count {
            if mip_level > 0 {
                let width = (image.width() >> mip_level).max(1);
                let height = (image.height() >> mip_level).max(1);

                level_image = Cow::Owned(imageops::resize(
                    &*level_image,
                    width,
                    height,
                    imageops::FilterType::Triangle,
                ));
            }

            self.queue.write_texture(
                TexelCopyTextureInfo {
                    texture: &texture,
                    aspect: TextureAspect::All,
                    mip_level,
                    origin: Origin3d::ZERO,
                },
                level_image.as_raw(),
                TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(level_image.width() * 4),
                    rows_per_image: Some(level_image.height()),
                },
                Extent3d {
                    width: level_image.width(),
                    height: level_image.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        let bind_group = self.device.create_bind_group(&BindGroupDescriptor {
            label: Some("lib_renderer texture bind group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: BindingResource::TextureView(
                        &texture.create_view(&TextureViewDescriptor::default()),
                    ),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.textures.push(GpuTexture {
            _texture: texture,
            bind_group,
        });

        TextureHandle(self.textures.len() as u32)
    }

    fn draw(&mut self, call: DrawCall<'_>) {
        let Some(frame) = &mut self.frame else {
            warn!(
                "dropping {} vertices drawn outside of a frame",
                call.vertices.len()
            );
            return;
        };

        let texture_index = (call.texture.0 as usize).wrapping_sub(1);
        assert!(
            texture_index < self.textures.len(),
            "{:?} was not created by this backend",
            call.texture
        );

        let vertex_bytes: &[u8] = cast_slice(call.vertices);
        assert!(
            vertex_bytes.len() as u64 <= self.vertex_buf.size(),
            "{} vertex bytes exceed the {} byte vertex buffer",
            vertex_bytes.len(),
            self.vertex_buf.size()
        );

        self.queue.write_buffer(&self.vertex_buf, 0, vertex_bytes);
        self.queue
            .write_buffer(&self.view_uniform_buf, 0, bytes_of(&call.view));

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor::default());

        let load = if frame.has_rendered {
            LoadOp::Load
        } else {
            LoadOp::Clear(frame.clear_color)
        };

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("lib_renderer render pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &frame.output,
                depth_slice: None,
                ops: Operations {
                    load,
                    store: StoreOp::Store,
                },
                resolve_target: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.view_bind_group, &[]);
        pass.set_bind_group(1, &self.textures[texture_index].bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buf.slice(..vertex_bytes.len() as u64));

        pass.draw(0..call.vertices.len() as u32, 0..1);

        drop(pass);

        self.queue.submit([encoder.finish()]);
        frame.has_rendered = true;
    }
}

impl<'a> From<AppContext<'a>> for RenderContext<'a> {
    fn from(value: AppContext<'a>) -> Self {
        Self {
            device: value.device,
            queue: value.queue,
            surface_format: value.surface_format,
        }
    }
}

/// Levels in a full mip chain down to 1x1.
fn mip_level_count(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}
