//! Player application implementing winit ApplicationHandler
//!
//! Runs one engine step per redraw: poll the pointer gesture source, latch
//! the latest sample, advance the engine, upload and draw the snapshot.

use crate::indicator::GestureIndicator;
use anyhow::Context;
use glimmer_core::GlimmerConfig;
use glimmer_engine::ParticleEngine;
use glimmer_gesture::{GestureSource, PointerSource};
use glimmer_render::{Camera, ParticleRenderer, RenderContext, RendererConfig};
use glimmer_runtime::{EventBus, FrameClock, GestureLatch};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

/// Open the player window and run until it is closed
pub fn run(config: &GlimmerConfig, fullscreen: bool) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(config, fullscreen)?;
    event_loop.run_app(&mut app)?;

    match app.take_failure() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub struct PlayerApp {
    // Simulation
    pub engine: ParticleEngine,
    pub clock: FrameClock,
    pointer: PointerSource,
    latch: GestureLatch,
    events: EventBus,
    indicator: GestureIndicator,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    renderer: Option<ParticleRenderer>,
    camera: Camera,

    // Window options
    pub fullscreen: bool,
    failure: Option<anyhow::Error>,
}

impl PlayerApp {
    pub fn new(config: &GlimmerConfig, fullscreen: bool) -> anyhow::Result<Self> {
        let engine = ParticleEngine::new(config).context("Failed to start particle engine")?;
        Ok(Self {
            engine,
            clock: FrameClock::new(),
            pointer: PointerSource::new(config.gesture.clone()),
            latch: GestureLatch::new(config.gesture.stale_after_ms),
            events: EventBus::new(),
            indicator: GestureIndicator::new(),
            window: None,
            render_context: None,
            renderer: None,
            camera: Camera::new(),
            fullscreen,
            failure: None,
        })
    }

    /// The error that stopped the event loop, if any
    pub fn take_failure(&mut self) -> Option<anyhow::Error> {
        self.failure.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.indicator.title())
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if self.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to initialize rendering")?;

        let size = render_context.size;
        self.camera.set_viewport(size.width, size.height);

        let renderer =
            ParticleRenderer::new(&render_context, self.engine.len(), RendererConfig::default());

        log::info!(
            "player ready: {}x{} surface, {} particles",
            size.width,
            size.height,
            self.engine.len()
        );

        self.render_context = Some(render_context);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn frame(&mut self) {
        let (Some(context), Some(renderer)) = (&mut self.render_context, &mut self.renderer) else {
            return;
        };

        let now = self.clock.tick();
        let poll = self.pointer.poll(now);
        self.latch.update(poll, now);
        let sample = self.latch.current(now);

        let snapshot = self.engine.step(now, sample.as_ref(), &mut self.events);
        let model = snapshot.cloud.to_matrix();
        renderer.upload(context, &snapshot);

        if let Err(e) = renderer.render(context, &self.camera, model) {
            log::error!("render error: {e}");
        }

        if self.indicator.apply(self.events.drain_latest_active()) {
            if let Some(window) = &self.window {
                window.set_title(self.indicator.title());
            }
        }
    }

    fn pointer_moved(&mut self, x: f64, y: f64) {
        let Some(context) = &self.render_context else {
            return;
        };
        let size = context.size;
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.pointer
            .set_pointer((x / size.width as f64) as f32, (y / size.height as f64) as f32);
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                log::error!("{e:#}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                    self.camera.set_viewport(new_size.width, new_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                    PhysicalKey::Code(KeyCode::F11) => self.toggle_fullscreen(),
                    _ => {}
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer.clear_pointer();
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.pointer.set_pressed(state == ElementState::Pressed);
            }

            WindowEvent::RedrawRequested => {
                self.frame();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
