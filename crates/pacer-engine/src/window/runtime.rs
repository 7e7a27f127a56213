use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_key_event;
use crate::input::{InputState, KeyEvent, KeyMap};
use crate::time::{Clock, FpsReporter, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Base window title; the FPS readout is appended to it.
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Minimum gap between FPS title updates.
    pub fps_report_interval_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "pacer".to_string(),
            initial_size: LogicalSize::new(500.0, 500.0),
            fps_report_interval_ms: 2000,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// What a single key event did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum KeyOutcome {
    Exit,
    Applied,
    Ignored,
}

/// Resolves `ev` through `keymap` and applies any button transition to `input`.
fn dispatch_key(keymap: &KeyMap, input: &mut InputState, ev: &KeyEvent) -> KeyOutcome {
    if keymap.is_exit(ev) {
        return KeyOutcome::Exit;
    }
    match keymap.button_event(ev) {
        Some(button) => {
            input.apply(button);
            KeyOutcome::Applied
        }
        None => KeyOutcome::Ignored,
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    clock: Clock,
    fps_report: FpsReporter,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    keymap: KeyMap,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            keymap: KeyMap::new(),
            app,
            window: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::new(),
            clock: Clock::new(),
            fps_report: FpsReporter::with_interval(self.config.fps_report_interval_ms),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        log::debug!("window {:?} created", entry.with_window(|w| w.id()));
        self.window = Some(entry);
        Ok(())
    }

    /// Runs `App::on_exit` (once), drops the window and GPU, and stops the loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exit_requested {
            self.exit_requested = true;

            let (app, window) = (&mut self.app, &self.window);
            if let Some(entry) = window {
                entry.with_gpu(|gpu| app.on_exit(gpu));
            }
            self.window = None;
            log::info!("shutting down");
        }
        event_loop.exit();
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, ev: KeyEvent) {
        let keymap = self.keymap;
        let Some(entry) = self.window.as_mut() else { return };

        let outcome = entry.with_input_state_mut(|input| dispatch_key(&keymap, input, &ev));
        if outcome == KeyOutcome::Exit {
            self.shutdown(event_loop);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let mut app_control = AppControl::Continue;

        let (app, title) = (&mut self.app, &self.config.title);
        let Some(entry) = self.window.as_mut() else { return };

        entry.with_mut(|fields| {
            let ft: FrameTime = fields.clock.tick();
            let fps = fields.clock.fps();

            {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    time: ft,
                };

                app_control = app.on_frame(&mut ctx);
            }

            if let Some(fps) = fields.fps_report.poll(ft.now_ms, fps) {
                fields.window.set_title(&FpsReporter::title(title, fps));
                log::info!("FPS: {fps:.2}");
            }
        });

        if app_control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.fatal = Some(e);
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the game loop never idles.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(ev) = translate_key_event(event) {
                    self.on_key(event_loop, ev);
                }
            }

            WindowEvent::Focused(false) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_input_state_mut(|input| input.release_all());
                }
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }
}
