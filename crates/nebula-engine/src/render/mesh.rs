use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::scene::{Blending, DrawList, Geometry, GeometryId, Material, MaterialId};

use super::common::{
    align_up, blend_state, min_binding_size, DrawUniform, FrameUniform, LineVertex,
    MaterialUniform, PointInstance, QuadVertex, QUAD_INDICES, QUAD_VERTICES,
};
use super::{FrameParams, RenderCtx, RenderTarget};

/// Primitive family of an uploaded geometry or material.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(super) enum Topology {
    Points,
    Lines,
}

/// Uploaded geometry buffers.
pub(super) enum GpuGeometry {
    Points {
        instances: wgpu::Buffer,
        count: u32,
    },
    Lines {
        vertices: wgpu::Buffer,
        indices: wgpu::Buffer,
        index_count: u32,
    },
}

impl GpuGeometry {
    fn topology(&self) -> Topology {
        match self {
            GpuGeometry::Points { .. } => Topology::Points,
            GpuGeometry::Lines { .. } => Topology::Lines,
        }
    }

    /// Releases the GPU buffers now rather than when the last reference drops.
    pub(super) fn destroy(self) {
        match self {
            GpuGeometry::Points { instances, .. } => instances.destroy(),
            GpuGeometry::Lines { vertices, indices, .. } => {
                vertices.destroy();
                indices.destroy();
            }
        }
    }
}

/// Uploaded material uniform + bind group.
pub(super) struct GpuMaterial {
    topology: Topology,
    blending: Blending,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuMaterial {
    pub(super) fn destroy(self) {
        drop(self.bind_group);
        self.ubo.destroy();
    }
}

/// Renders `DrawList`s of uploaded point clouds and line meshes.
///
/// Bind groups:
/// - 0: camera (`FrameUniform`), one per renderer
/// - 1: model matrix (`DrawUniform`), one slot per draw via dynamic offset
/// - 2: material (`MaterialUniform`), one per uploaded material
///
/// Pipelines are created on first use per (topology, blending) pair.
pub(super) struct MeshRenderer {
    surface_format: wgpu::TextureFormat,

    points_shader: wgpu::ShaderModule,
    lines_shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<(Topology, Blending), wgpu::RenderPipeline>,

    draw_bgl: wgpu::BindGroupLayout,
    material_bgl: wgpu::BindGroupLayout,

    frame_ubo: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    draw_ubo: Option<wgpu::Buffer>,
    draw_bind_group: Option<wgpu::BindGroup>,
    draw_capacity: usize,
    draw_stride: u64,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    staging: Vec<u8>,
    batch: Vec<(GeometryId, MaterialId)>,
    warned_mismatch: bool,
}

impl MeshRenderer {
    pub(super) fn new(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;

        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("nebula points shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/points.wgsl").into()),
        });
        let lines_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("nebula lines shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lines.wgsl").into()),
        });

        let frame_bgl = uniform_layout::<FrameUniform>(device, "nebula frame bgl", false);
        let draw_bgl = uniform_layout::<DrawUniform>(device, "nebula draw bgl", true);
        let material_bgl = uniform_layout::<MaterialUniform>(device, "nebula material bgl", false);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("nebula mesh pipeline layout"),
            bind_group_layouts: &[&frame_bgl, &draw_bgl, &material_bgl],
            immediate_size: 0,
        });

        let frame_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("nebula frame ubo"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("nebula frame bind group"),
            layout: &frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("nebula point quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("nebula point quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let draw_stride = align_up(std::mem::size_of::<DrawUniform>() as u64, alignment);

        Self {
            surface_format: ctx.surface_format,
            points_shader,
            lines_shader,
            pipeline_layout,
            pipelines: HashMap::new(),
            draw_bgl,
            material_bgl,
            frame_ubo,
            frame_bind_group,
            draw_ubo: None,
            draw_bind_group: None,
            draw_capacity: 0,
            draw_stride,
            quad_vbo,
            quad_ibo,
            staging: Vec::new(),
            batch: Vec::new(),
            warned_mismatch: false,
        }
    }

    pub(super) fn upload_geometry(&self, ctx: &RenderCtx<'_>, geometry: &Geometry) -> GpuGeometry {
        match geometry {
            Geometry::Points(cloud) => {
                let instances: Vec<PointInstance> = cloud
                    .positions
                    .iter()
                    .zip(&cloud.colors)
                    .map(|(&position, &color)| PointInstance { position, color })
                    .collect();

                GpuGeometry::Points {
                    instances: ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("nebula point instances"),
                        contents: bytemuck::cast_slice(&instances),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                    count: instances.len() as u32,
                }
            }
            Geometry::Lines(mesh) => {
                let vertices: Vec<LineVertex> = mesh
                    .positions
                    .iter()
                    .map(|&position| LineVertex { position })
                    .collect();

                GpuGeometry::Lines {
                    vertices: ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("nebula line vertices"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                    indices: ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("nebula line indices"),
                        contents: bytemuck::cast_slice(&mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    }),
                    index_count: mesh.indices.len() as u32,
                }
            }
        }
    }

    pub(super) fn upload_material(&self, ctx: &RenderCtx<'_>, material: &Material) -> GpuMaterial {
        let (topology, uniform) = match material {
            Material::Points(m) => (
                Topology::Points,
                MaterialUniform {
                    color: [m.color.r, m.color.g, m.color.b, m.opacity.clamp(0.0, 1.0)],
                    params: [m.size.max(0.0), if m.vertex_colors { 1.0 } else { 0.0 }, 0.0, 0.0],
                },
            ),
            Material::Wireframe(m) => (
                Topology::Lines,
                MaterialUniform {
                    color: [m.color.r, m.color.g, m.color.b, m.opacity.clamp(0.0, 1.0)],
                    params: [0.0; 4],
                },
            ),
        };

        let ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("nebula material ubo"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("nebula material bind group"),
            layout: &self.material_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        GpuMaterial {
            topology,
            blending: material.blending(),
            ubo,
            bind_group,
        }
    }

    pub(super) fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &FrameParams,
        draws: &mut DrawList,
        geometries: &HashMap<GeometryId, GpuGeometry>,
        materials: &HashMap<MaterialId, GpuMaterial>,
    ) {
        debug_assert_eq!(ctx.surface_format, self.surface_format);

        ctx.queue.write_buffer(
            &self.frame_ubo,
            0,
            bytemuck::bytes_of(&FrameUniform {
                view: frame.view.to_cols_array_2d(),
                projection: frame.projection.to_cols_array_2d(),
            }),
        );

        // Resolve draws and pack their model matrices into dynamic-offset slots.
        self.batch.clear();
        self.staging.clear();
        for item in draws.iter_in_paint_order() {
            let cmd = item.cmd;
            let (Some(geometry), Some(material)) =
                (geometries.get(&cmd.geometry), materials.get(&cmd.material))
            else {
                continue;
            };

            if geometry.topology() != material.topology {
                if !self.warned_mismatch {
                    log::warn!(
                        "skipping draw: {:?} geometry with {:?} material",
                        geometry.topology(),
                        material.topology
                    );
                    self.warned_mismatch = true;
                }
                continue;
            }

            let slot_start = self.staging.len();
            self.staging.extend_from_slice(bytemuck::bytes_of(&DrawUniform {
                model: cmd.model.to_cols_array_2d(),
            }));
            self.staging.resize(slot_start + self.draw_stride as usize, 0);

            self.batch.push((cmd.geometry, cmd.material));
        }

        self.ensure_draw_capacity(ctx, self.batch.len());
        if let Some(draw_ubo) = self.draw_ubo.as_ref() {
            if !self.staging.is_empty() {
                ctx.queue.write_buffer(draw_ubo, 0, &self.staging);
            }
        }

        let batch = std::mem::take(&mut self.batch);
        for (_, material_id) in &batch {
            if let Some(material) = materials.get(material_id) {
                self.ensure_pipeline(ctx, material.topology, material.blending);
            }
        }
        self.batch = batch;

        let clear = frame.clear.premultiplied();
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("nebula mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear[0] as f64,
                        g: clear[1] as f64,
                        b: clear[2] as f64,
                        a: clear[3] as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(draw_bind_group) = self.draw_bind_group.as_ref() else { return };
        rpass.set_bind_group(0, &self.frame_bind_group, &[]);

        for (slot, &(geometry_id, material_id)) in self.batch.iter().enumerate() {
            let (Some(geometry), Some(material)) =
                (geometries.get(&geometry_id), materials.get(&material_id))
            else {
                continue;
            };
            let Some(pipeline) = self.pipelines.get(&(material.topology, material.blending)) else {
                continue;
            };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(1, draw_bind_group, &[(slot as u64 * self.draw_stride) as u32]);
            rpass.set_bind_group(2, &material.bind_group, &[]);

            match geometry {
                GpuGeometry::Points { instances, count } => {
                    rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
                    rpass.set_vertex_buffer(1, instances.slice(..));
                    rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
                    rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..*count);
                }
                GpuGeometry::Lines {
                    vertices,
                    indices,
                    index_count,
                } => {
                    rpass.set_vertex_buffer(0, vertices.slice(..));
                    rpass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..*index_count, 0, 0..1);
                }
            }
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, topology: Topology, blending: Blending) {
        if self.pipelines.contains_key(&(topology, blending)) {
            return;
        }

        let point_buffers = [QuadVertex::layout(), PointInstance::layout()];
        let line_buffers = [LineVertex::layout()];

        let (label, shader, buffers, primitive_topology) = match topology {
            Topology::Points => (
                "nebula points pipeline",
                &self.points_shader,
                &point_buffers[..],
                wgpu::PrimitiveTopology::TriangleList,
            ),
            Topology::Lines => (
                "nebula lines pipeline",
                &self.lines_shader,
                &line_buffers[..],
                wgpu::PrimitiveTopology::LineList,
            ),
        };

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(blend_state(blending)),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: primitive_topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("created {label} ({blending:?})");
        self.pipelines.insert((topology, blending), pipeline);
    }

    fn ensure_draw_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.draw_capacity && self.draw_ubo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(16);
        let draw_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("nebula draw ubo"),
            size: new_cap as u64 * self.draw_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let draw_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("nebula draw bind group"),
            layout: &self.draw_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_ubo,
                    offset: 0,
                    size: Some(min_binding_size::<DrawUniform>()),
                }),
            }],
        });

        if let Some(old) = self.draw_ubo.replace(draw_ubo) {
            old.destroy();
        }
        self.draw_bind_group = Some(draw_bind_group);
        self.draw_capacity = new_cap;
    }
}

fn uniform_layout<T>(device: &wgpu::Device, label: &str, dynamic: bool) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: dynamic,
                min_binding_size: Some(min_binding_size::<T>()),
            },
            count: None,
        }],
    })
}
