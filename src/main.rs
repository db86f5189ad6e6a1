//! Native preview window: renders the page background with the mouse standing
//! in for the pointer and the wheel for page scroll.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    event::*,
    event_loop::EventLoop,
    window::Window,
};

use plasma_site::{
    logging, SiteConfig, SiteError,
    controller::{FrameContext, InputEvent, InputState},
    model::Viewport,
    view::{shader::BACKGROUND_WGSL, Background, GpuContext, RenderState},
};

/// Pixels of scroll per wheel line
const LINE_HEIGHT: f32 = 40.0;
/// Height of the pretend page, in viewports
const PAGE_VIEWPORTS: f32 = 4.0;
/// The swapchain has to match the window, so no pixel ratio cap here
const NATIVE_RATIO_CAP: f64 = f64::INFINITY;

struct App {
    window: Arc<Window>,
    gpu: GpuContext,
    render_state: RenderState,
    frame_ctx: FrameContext,
    input_state: InputState,
    started: Instant,
}

impl App {
    async fn new(window: Arc<Window>, config: &SiteConfig) -> Result<Self, SiteError> {
        let viewport = viewport_of(&window);
        let gpu = GpuContext::new_native(window.clone(), viewport.width, viewport.height).await?;

        let background = Background::build(gpu.device.as_ref(), gpu.format, BACKGROUND_WGSL, config).await;
        let render_state = RenderState {
            format: gpu.format,
            alpha_mode: gpu.config.alpha_mode,
            width: gpu.config.width,
            height: gpu.config.height,
            background,
            clear_color: wgpu::Color::BLACK,
        };

        Ok(Self {
            window,
            gpu,
            render_state,
            frame_ctx: FrameContext::new(config, viewport, 0.0, 0.0),
            input_state: InputState::new(&viewport, NATIVE_RATIO_CAP),
            started: Instant::now(),
        })
    }

    fn max_scroll(&self) -> f32 {
        self.frame_ctx.viewport.css_height * (PAGE_VIEWPORTS - 1.0)
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        let scale = self.window.scale_factor();
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.input_state.process_event(&InputEvent::PointerMove {
                    client_x: (position.x / scale) as f32,
                    client_y: (position.y / scale) as f32,
                });
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(p) => -(p.y / scale) as f32,
                };
                let offset = self.input_state.scroll_target + dy;
                let max = self.max_scroll();
                self.input_state.process_event(&InputEvent::Scroll { offset, max });
                true
            }
            WindowEvent::Resized(size) => {
                self.input_state.process_event(&InputEvent::Resize {
                    css_width: size.width as f64 / scale,
                    css_height: size.height as f64 / scale,
                    pixel_ratio: scale,
                });
                true
            }
            _ => false,
        }
    }

    fn redraw(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let output = self.frame_ctx.update(now_ms, &mut self.input_state);
        self.render_state.draw_frame(
            self.gpu.device.as_ref(),
            self.gpu.queue.as_ref(),
            &self.gpu.surface,
            &output,
        );
    }
}

fn viewport_of(window: &Window) -> Viewport {
    let size = window.inner_size();
    let scale = window.scale_factor();
    Viewport::from_css(size.width as f64 / scale, size.height as f64 / scale, scale, NATIVE_RATIO_CAP)
}

fn load_config() -> SiteConfig {
    match std::env::var("SITE_CONFIG") {
        Ok(path) => SiteConfig::load(&path).unwrap_or_else(|e| {
            tracing::warn!("ignoring {path}: {e}");
            SiteConfig::default()
        }),
        Err(_) => SiteConfig::default(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let config = load_config();

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title("plasma-site preview")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let mut app = pollster::block_on(App::new(window.clone(), &config))?;
    if app.render_state.background.is_static() {
        tracing::warn!("running with the static fallback background");
    }

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::RedrawRequested => app.redraw(),
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    })?;
    Ok(())
}
