use pacer_engine::assets::DecodedImage;
use pacer_engine::core::{App, AppControl, FrameCtx};
use pacer_engine::device::Gpu;
use pacer_engine::paint::Color;
use pacer_engine::render::shapes::circle::CircleRenderer;
use pacer_engine::render::shapes::image::ImageRenderer;
use pacer_engine::render::RenderCtx;
use pacer_engine::scene::shapes::image::TextureId;
use pacer_engine::scene::DrawList;

use crate::config::DemoConfig;
use crate::draw::build_scene;
use crate::palette::ColorCycle;
use crate::world::World;

const CLEAR: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);

/// The demo: updates the world from input each frame, then draws it.
pub struct DemoApp {
    draw_sprite: bool,
    world: World,
    colors: ColorCycle,

    /// Decoded pixels waiting for the first frame to be uploaded.
    pending_sprite: Option<DecodedImage>,
    sprite: Option<TextureId>,

    images: ImageRenderer,
    circles: CircleRenderer,
    draw_list: DrawList,
}

impl DemoApp {
    pub fn new(config: &DemoConfig, sprite: DecodedImage) -> Self {
        Self {
            draw_sprite: config.draw_sprite,
            world: World::new(&config.tuning),
            colors: ColorCycle::new(),
            pending_sprite: Some(sprite),
            sprite: None,
            images: ImageRenderer::new(),
            circles: CircleRenderer::new(),
            draw_list: DrawList::new(),
        }
    }

    fn upload_sprite(&mut self, ctx: &FrameCtx<'_, '_>) {
        let Some(image) = self.pending_sprite.take() else { return };

        let rctx = RenderCtx::new(
            ctx.gpu.device(),
            ctx.gpu.queue(),
            ctx.gpu.surface_format(),
            ctx.window.viewport(),
        );
        self.sprite = Some(self.images.register(&rctx, &image));
    }
}

impl App for DemoApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.upload_sprite(ctx);

        self.world.update(ctx.input, ctx.time.dt);
        self.colors.poll(ctx.time.now_ms);

        let sprite = if self.draw_sprite { self.sprite } else { None };
        build_scene(
            &mut self.draw_list,
            &self.world,
            ctx.window.viewport(),
            &self.colors,
            sprite,
        );

        let (images, circles, list) = (&mut self.images, &mut self.circles, &mut self.draw_list);
        ctx.render(CLEAR, |rctx, target| {
            images.render(rctx, target, list);
            circles.render(rctx, target, list);
        })
    }

    fn on_exit(&mut self, _gpu: &Gpu<'_>) {
        if let Some(id) = self.sprite.take() {
            self.images.release(id);
        }
        let leftover = self.images.texture_count();
        if leftover > 0 {
            log::warn!("releasing {leftover} textures still registered at exit");
        }
        self.images.release_all();
        log::debug!("sprite texture released");
    }
}
