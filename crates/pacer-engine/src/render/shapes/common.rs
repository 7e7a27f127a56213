//! Shared GPU plumbing for the instanced-quad renderers.
//!
//! Every shape is drawn as one unit quad (`0..1` on both axes) instanced per
//! draw command. The vertex stage expands the quad using per-instance data and
//! converts logical pixels to NDC through the viewport uniform at binding 0.

use std::marker::PhantomData;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::paint::Paint;
use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    /// Uniform contents for `viewport`; zero-sized viewports are clamped to 1px.
    pub(super) fn from_viewport(viewport: Viewport) -> Self {
        Self {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

/// `ViewportUniform` is 16 bytes, so the fallback branch is unreachable.
fn viewport_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
        .unwrap_or(std::num::NonZeroU64::MIN)
}

/// Layout entry for the viewport uniform (vertex stage).
pub(super) fn viewport_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(viewport_ubo_min_binding_size()),
        },
        count: None,
    }
}

/// Uniform buffer holding the current viewport size.
pub(super) struct ViewportBuffer {
    buffer: wgpu::Buffer,
}

impl ViewportBuffer {
    pub(super) fn new(device: &wgpu::Device, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer }
    }

    pub(super) fn write(&self, ctx: &RenderCtx<'_>) {
        let uniform = ViewportUniform::from_viewport(ctx.viewport);
        ctx.queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    pub(super) fn binding(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

// ── unit quad ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Index count of one quad instance.
pub(super) const QUAD_INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;

/// Static vertex + index buffers for the unit quad (vertex slot 0).
pub(super) struct QuadMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
}

impl QuadMesh {
    pub(super) fn new(device: &wgpu::Device, label: &str) -> Self {
        let vbo_label = format!("{label} quad vbo");
        let ibo_label = format!("{label} quad ibo");
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(vbo_label.as_str()),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(ibo_label.as_str()),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }

    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
    }
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Growable per-instance vertex buffer (vertex slot 1).
///
/// Capacity grows to the next power of two and never shrinks.
pub(super) struct InstanceBuffer<T> {
    label: &'static str,
    min_capacity: usize,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub(super) const fn new(label: &'static str, min_capacity: usize) -> Self {
        Self {
            label,
            min_capacity,
            buffer: None,
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Copies `instances` to the GPU, reallocating when they do not fit.
    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>, instances: &[T]) -> &wgpu::Buffer {
        let required = grown_capacity(self.capacity, instances.len(), self.min_capacity);
        let buffer = match self.buffer.take() {
            Some(buffer) if required == self.capacity => buffer,
            _ => {
                self.capacity = required;
                ctx.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(self.label),
                    size: (required * std::mem::size_of::<T>()) as u64,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            }
        };
        ctx.queue.write_buffer(&buffer, 0, bytemuck::cast_slice(instances));
        self.buffer.insert(buffer)
    }
}

/// Capacity needed to hold `required` instances given the current `capacity`.
fn grown_capacity(capacity: usize, required: usize, min_capacity: usize) -> usize {
    if required <= capacity && capacity > 0 {
        capacity
    } else {
        required.next_power_of_two().max(min_capacity)
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Inputs for an instanced unit-quad pipeline with `vs_main` / `fs_main` entry points.
pub(super) struct QuadPipelineDesc<'a> {
    pub label: &'a str,
    pub shader: &'a str,
    pub bind_group_layout: &'a wgpu::BindGroupLayout,
    pub instance_layout: wgpu::VertexBufferLayout<'static>,
}

pub(super) fn create_quad_pipeline(
    ctx: &RenderCtx<'_>,
    desc: QuadPipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(desc.label),
        source: wgpu::ShaderSource::Wgsl(desc.shader.into()),
    });

    let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[desc.bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), desc.instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

// ── paint resolution ──────────────────────────────────────────────────────

/// Converts a `Paint` to `(color0, color1, grad_p0, grad_p1)` for gradient-capable shaders.
///
/// Solid fills produce identical colors and a degenerate (zero-length) gradient
/// axis, so the shader falls back to `color0` as a uniform fill.
///
/// Linear gradients are clamped to 2 stops (first and last); more stops are
/// unsupported and emit a one-time debug message.
pub(super) fn resolve_paint(
    paint: &Paint,
    warned_multi_stop: &mut bool,
) -> ([f32; 4], [f32; 4], [f32; 2], [f32; 2]) {
    match paint {
        Paint::Solid(c) => {
            let col = c.to_array();
            (col, col, [0.0, 0.0], [0.0, 0.0])
        }
        Paint::LinearGradient(g) => {
            // Fewer than two stops: solid fill with the first stop, if any.
            if g.stops.len() < 2 {
                let col = g.stops.first().map_or([0.0f32; 4], |s| s.color.to_array());
                return (col, col, [0.0, 0.0], [0.0, 0.0]);
            }
            if g.stops.len() > 2 && !*warned_multi_stop {
                log::debug!("only 2-stop gradients supported; using first and last stop");
                *warned_multi_stop = true;
            }
            let c0 = g.stops[0].color;
            let c1 = g.stops[g.stops.len() - 1].color;
            (
                c0.to_array(),
                c1.to_array(),
                [g.start.x, g.start.y],
                [g.end.x, g.end.y],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, ColorStop, LinearGradient};

    #[test]
    fn solid_paint_has_degenerate_axis() {
        let mut warned = false;
        let (c0, c1, p0, p1) = resolve_paint(&Paint::solid(Color::white()), &mut warned);
        assert_eq!(c0, c1);
        assert_eq!(p0, p1);
        assert!(!warned);
    }

    #[test]
    fn multi_stop_gradient_uses_outer_stops() {
        let g = LinearGradient::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(8.0, 0.0),
            vec![
                ColorStop::new(0.0, Color::white()),
                ColorStop::new(0.5, Color::transparent()),
                ColorStop::new(1.0, Color::black()),
            ],
        );
        let mut warned = false;
        let (c0, c1, p0, p1) = resolve_paint(&Paint::LinearGradient(g), &mut warned);
        assert_eq!(c0, Color::white().to_array());
        assert_eq!(c1, Color::black().to_array());
        assert_eq!(p0, [0.0, 0.0]);
        assert_eq!(p1, [8.0, 0.0]);
        assert!(warned);
    }

    #[test]
    fn viewport_uniform_never_zero() {
        let u = ViewportUniform::from_viewport(Viewport::new(0.0, 300.0));
        assert_eq!(u.viewport, [1.0, 300.0]);
        assert_eq!(viewport_ubo_min_binding_size().get(), 16);
    }

    // ── instance capacity ─────────────────────────────────────────────────

    #[test]
    fn capacity_starts_at_minimum() {
        assert_eq!(grown_capacity(0, 1, 64), 64);
        assert_eq!(grown_capacity(0, 0, 16), 16);
    }

    #[test]
    fn capacity_is_kept_while_it_fits() {
        assert_eq!(grown_capacity(64, 64, 64), 64);
        assert_eq!(grown_capacity(128, 3, 64), 128);
    }

    #[test]
    fn capacity_grows_to_power_of_two() {
        assert_eq!(grown_capacity(64, 65, 64), 128);
        assert_eq!(grown_capacity(16, 300, 16), 512);
    }
}
