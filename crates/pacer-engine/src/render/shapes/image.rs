use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::assets::DecodedImage;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::image::TextureId;
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    create_quad_pipeline, viewport_layout_entry, InstanceBuffer, QuadMesh, QuadPipelineDesc,
    ViewportBuffer, QUAD_INDEX_COUNT,
};

/// Renderer for `DrawCmd::Image`.
///
/// Textures are uploaded once through [`ImageRenderer::register`] and stay
/// resident until [`ImageRenderer::release`]. Draws reference them by
/// [`TextureId`]; commands naming an unknown id are skipped.
///
/// Consecutive image commands that share a texture are drawn with a single
/// instanced call.
pub struct ImageRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    viewport: Option<ViewportBuffer>,
    sampler: Option<wgpu::Sampler>,

    textures: HashMap<TextureId, TextureEntry>,
    next_id: u32,

    quad: Option<QuadMesh>,
    instances: InstanceBuffer<ImageInstance>,

    warned_unknown: bool,
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            viewport: None,
            sampler: None,
            textures: HashMap::new(),
            next_id: 0,
            quad: None,
            instances: InstanceBuffer::new("pacer image instance vbo", 16),
            warned_unknown: false,
        }
    }
}

struct TextureEntry {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    // Rebuilt lazily; dropped whenever the pipeline (and its layout) changes.
    bind_group: Option<wgpu::BindGroup>,
}

impl ImageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `image` to the GPU and returns a handle for `DrawList::push_image`.
    pub fn register(&mut self, ctx: &RenderCtx<'_>, image: &DecodedImage) -> TextureId {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pacer image texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.stride()),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let id = TextureId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.textures.insert(
            id,
            TextureEntry {
                texture,
                view,
                bind_group: None,
            },
        );

        log::debug!("registered texture {} ({}x{})", id.0, image.width, image.height);
        id
    }

    /// Frees the GPU texture behind `id`. Returns false if `id` was not registered.
    pub fn release(&mut self, id: TextureId) -> bool {
        match self.textures.remove(&id) {
            Some(entry) => {
                entry.texture.destroy();
                log::debug!("released texture {}", id.0);
                true
            }
            None => false,
        }
    }

    /// Frees every registered texture.
    pub fn release_all(&mut self) {
        for (_, entry) in self.textures.drain() {
            entry.texture.destroy();
        }
    }

    #[inline]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let mut ids: Vec<TextureId> = Vec::new();
        let mut instances: Vec<ImageInstance> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Image(cmd) = &item.cmd else { continue };

            if !self.textures.contains_key(&cmd.texture) {
                if !self.warned_unknown {
                    log::warn!("image draw references unknown texture {}", cmd.texture.0);
                    self.warned_unknown = true;
                }
                continue;
            }

            let min = cmd.rect.min();
            let max = cmd.rect.max();
            ids.push(cmd.texture);
            instances.push(ImageInstance {
                dst_min: [min.x, min.y],
                dst_max: [max.x, max.y],
                tint: cmd.tint.to_array(),
            });
        }

        if instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_shared_bindings(ctx);
        self.ensure_texture_bind_groups(ctx);

        let quad = self.quad.get_or_insert_with(|| QuadMesh::new(ctx.device, "pacer image"));
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(viewport) = self.viewport.as_ref() else { return };

        viewport.write(ctx);
        let instance_vbo = self.instances.upload(ctx, &instances);

        let mut rpass = target.begin_load_pass("pacer image pass");
        rpass.set_pipeline(pipeline);
        quad.bind(&mut rpass);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        for (id, range) in texture_runs(&ids) {
            let Some(bind_group) = self.textures.get(&id).and_then(|e| e.bind_group.as_ref())
            else {
                continue;
            };
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, range);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pacer image bgl"),
            entries: &[
                viewport_layout_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = create_quad_pipeline(
            ctx,
            QuadPipelineDesc {
                label: "pacer image pipeline",
                shader: include_str!("shaders/image.wgsl"),
                bind_group_layout: &bgl,
                instance_layout: ImageInstance::layout(),
            },
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        for entry in self.textures.values_mut() {
            entry.bind_group = None;
        }
    }

    fn ensure_shared_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport.is_none() {
            self.viewport = Some(ViewportBuffer::new(ctx.device, "pacer image viewport ubo"));
        }
        if self.sampler.is_none() {
            // Repeat addressing; magnify smoothly, minify without blur.
            self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("pacer image sampler"),
                address_mode_u: wgpu::AddressMode::Repeat,
                address_mode_v: wgpu::AddressMode::Repeat,
                address_mode_w: wgpu::AddressMode::Repeat,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Nearest,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            }));
        }
    }

    fn ensure_texture_bind_groups(&mut self, ctx: &RenderCtx<'_>) {
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(viewport) = self.viewport.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        for entry in self.textures.values_mut().filter(|e| e.bind_group.is_none()) {
            entry.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("pacer image bind group"),
                layout: bgl,
                entries: &[
                    wgpu::BindGroupEntry { binding: 0, resource: viewport.binding() },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&entry.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            }));
        }
    }
}

/// Splits a paint-ordered texture sequence into runs of equal ids.
fn texture_runs(ids: &[TextureId]) -> Vec<(TextureId, Range<u32>)> {
    let mut runs = Vec::new();
    let mut i = 0usize;
    while i < ids.len() {
        let id = ids[i];
        let mut j = i + 1;
        while j < ids.len() && ids[j] == id {
            j += 1;
        }
        runs.push((id, i as u32..j as u32));
        i = j;
    }
    runs
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (32 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  tint     [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ImageInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    tint: [f32; 4],
}

impl ImageInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x4  // tint
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
