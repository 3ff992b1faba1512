//! Render pipelines that execute a [`FramePlan`].

use wgpu::util::DeviceExt;

use velodigit_core::TextureId;

use crate::buffers::{CameraTexture, DEPTH_FORMAT, OverlayVertex, RenderTarget};
use crate::error::GpuError;
use crate::plan::{FramePlan, PipelineKey};

// Straight GL `SRC_ALPHA, ONE_MINUS_SRC_ALPHA` on both colour and alpha.
const GL_ALPHA_BLEND: wgpu::BlendComponent = wgpu::BlendComponent {
    src_factor: wgpu::BlendFactor::SrcAlpha,
    dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
    operation: wgpu::BlendOperation::Add,
};

/// Owns the `overlay.wgsl` pipelines, one per [`PipelineKey`].
pub struct OverlayRenderer {
    pipelines: [wgpu::RenderPipeline; 4],
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_bind_group: wgpu::BindGroup,
    // Keeps the white texture alive for its bind group.
    _white: CameraTexture,
}

impl OverlayRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("velodigit_overlay_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/overlay.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("velodigit_overlay_layout"),
            entries: &[
                // binding 0: source texture
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
                // binding 1: sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("velodigit_overlay_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipelines = PipelineKey::ALL.map(|key| {
            create_pipeline(device, &pipeline_layout, &shader, color_format, key)
        });
        debug_assert!(
            PipelineKey::ALL
                .iter()
                .enumerate()
                .all(|(i, k)| k.index() == i)
        );

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("velodigit_camera_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white = CameraTexture::white(device, queue);
        let white_bind_group =
            create_texture_bind_group(device, &bind_group_layout, &sampler, &white, "white");

        Self {
            pipelines,
            bind_group_layout,
            sampler,
            white_bind_group,
            _white: white,
        }
    }

    /// Bind group sampling `texture`; create once per camera texture.
    pub fn texture_bind_group(
        &self,
        device: &wgpu::Device,
        texture: &CameraTexture,
    ) -> wgpu::BindGroup {
        create_texture_bind_group(
            device,
            &self.bind_group_layout,
            &self.sampler,
            texture,
            "camera",
        )
    }

    /// Record every pass of `plan` into `encoder`.
    ///
    /// `camera` pairs the only texture id draws may reference with its bind
    /// group. The caller is responsible for submitting the encoder.
    pub fn encode(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        plan: &FramePlan,
        target: &RenderTarget,
        camera: (TextureId, &wgpu::BindGroup),
    ) -> Result<(), GpuError> {
        if let Some(run) = plan
            .passes
            .iter()
            .flat_map(|p| &p.runs)
            .find(|r| r.texture.is_some_and(|t| t != camera.0))
        {
            return Err(GpuError::UnknownTexture(run.texture.unwrap_or(camera.0)));
        }

        let vertex_buffer = (!plan.vertices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("velodigit_frame_vertices"),
                contents: bytemuck::cast_slice(&plan.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        for pass_plan in &plan.passes {
            let (color_load, depth_load) = match pass_plan.clear {
                Some((color, depth)) => (
                    wgpu::LoadOp::Clear(wgpu::Color {
                        r: color.r as f64,
                        g: color.g as f64,
                        b: color.b as f64,
                        a: color.a as f64,
                    }),
                    wgpu::LoadOp::Clear(depth),
                ),
                None => (wgpu::LoadOp::Load, wgpu::LoadOp::Load),
            };

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("velodigit_frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.color_view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: color_load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &target.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: depth_load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let Some(vertex_buffer) = vertex_buffer.as_ref() else {
                continue;
            };
            pass.set_vertex_buffer(0, vertex_buffer.slice(..));
            for run in &pass_plan.runs {
                pass.set_pipeline(&self.pipelines[run.key.index()]);
                let bind_group = match run.texture {
                    Some(_) => camera.1,
                    None => &self.white_bind_group,
                };
                pass.set_bind_group(0, bind_group, &[]);
                pass.draw(run.vertices.clone(), 0..1);
            }
        }
        Ok(())
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    key: PipelineKey,
) -> wgpu::RenderPipeline {
    let (depth_write_enabled, depth_compare) = if key.depth_test {
        (true, wgpu::CompareFunction::Less)
    } else {
        (false, wgpu::CompareFunction::Always)
    };
    let blend = key.blend.then_some(wgpu::BlendState {
        color: GL_ALPHA_BLEND,
        alpha: GL_ALPHA_BLEND,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("velodigit_overlay_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[OverlayVertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    texture: &CameraTexture,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("velodigit_{label}_bind_group")),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
