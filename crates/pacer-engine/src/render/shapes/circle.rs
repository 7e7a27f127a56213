use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::circle::CircleCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    create_quad_pipeline, resolve_paint, viewport_layout_entry, InstanceBuffer, QuadMesh,
    QuadPipelineDesc, ViewportBuffer, QUAD_INDEX_COUNT,
};

/// Renderer for `DrawCmd::Circle`.
///
/// Supported paints:
/// - `Paint::Solid`
/// - `Paint::LinearGradient` (2-stop; uses first and last stop for gradients with more stops)
///
/// All circles of a frame go out in one instanced draw, in paint order.
pub struct CircleRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bindings: Option<(ViewportBuffer, wgpu::BindGroup)>,
    quad: Option<QuadMesh>,
    instances: InstanceBuffer<CircleInstance>,
    scratch: Vec<CircleInstance>,
    warned_multi_stop: bool,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bindings: None,
            quad: None,
            instances: InstanceBuffer::new("pacer circle instance vbo", 64),
            scratch: Vec::new(),
            warned_multi_stop: false,
        }
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.scratch.clear();
        for item in draw_list.iter_in_paint_order() {
            if let DrawCmd::Circle(cmd) = &item.cmd {
                if let Some(inst) = CircleInstance::from_cmd(cmd, &mut self.warned_multi_stop) {
                    self.scratch.push(inst);
                }
            }
        }
        if self.scratch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        let quad = self.quad.get_or_insert_with(|| QuadMesh::new(ctx.device, "pacer circle"));
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some((viewport, bind_group)) = self.bindings.as_ref() else { return };

        viewport.write(ctx);
        let instance_vbo = self.instances.upload(ctx, &self.scratch);

        let mut rpass = target.begin_load_pass("pacer circle pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        quad.bind(&mut rpass);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..self.scratch.len() as u32);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pacer circle bgl"),
            entries: &[viewport_layout_entry(0)],
        });

        let viewport = ViewportBuffer::new(ctx.device, "pacer circle viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pacer circle bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: viewport.binding() }],
        });

        let pipeline = create_quad_pipeline(
            ctx,
            QuadPipelineDesc {
                label: "pacer circle pipeline",
                shader: include_str!("shaders/circle.wgsl"),
                bind_group_layout: &bgl,
                instance_layout: CircleInstance::layout(),
            },
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bindings = Some((viewport, bind_group));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (60 bytes):
///
///  offset  0  center   [f32; 2]   loc 1
///  offset  8  radius   f32        loc 2
///  offset 12  color0   [f32; 4]   loc 3
///  offset 28  color1   [f32; 4]   loc 4
///  offset 44  grad_p0  [f32; 2]   loc 5
///  offset 52  grad_p1  [f32; 2]   loc 6
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius: f32,
    color0: [f32; 4],
    color1: [f32; 4],
    grad_p0: [f32; 2],
    grad_p1: [f32; 2],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32,   // radius
        3 => Float32x4, // color0
        4 => Float32x4, // color1
        5 => Float32x2, // grad_p0
        6 => Float32x2  // grad_p1
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Packs a command; non-finite geometry yields `None`.
    fn from_cmd(cmd: &CircleCmd, warned_multi_stop: &mut bool) -> Option<Self> {
        if !cmd.center.is_finite() || !cmd.radius.is_finite() || cmd.radius <= 0.0 {
            return None;
        }

        let (color0, color1, grad_p0, grad_p1) = resolve_paint(&cmd.paint, warned_multi_stop);
        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius: cmd.radius,
            color0,
            color1,
            grad_p0,
            grad_p1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, Paint};

    fn cmd(radius: f32) -> CircleCmd {
        CircleCmd {
            center: Vec2::new(10.0, 20.0),
            radius,
            paint: Paint::solid(Color::white()),
        }
    }

    #[test]
    fn instance_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 60);
        assert_eq!(CircleInstance::layout().attributes.len(), 6);
    }

    #[test]
    fn solid_paint_fills_both_gradient_ends() {
        let inst = CircleInstance::from_cmd(&cmd(4.0), &mut false);
        let inst = inst.map(|i| (i.radius, i.color0 == i.color1));
        assert_eq!(inst, Some((4.0, true)));
    }

    #[test]
    fn non_finite_circle_is_skipped() {
        assert!(CircleInstance::from_cmd(&cmd(f32::INFINITY), &mut false).is_none());
        let mut bad = cmd(3.0);
        bad.center = Vec2::new(f32::NAN, 0.0);
        assert!(CircleInstance::from_cmd(&bad, &mut false).is_none());
    }
}
