use glam::Vec2;

use crate::config::SiteConfig;
use crate::controller::input::InputState;
use crate::controller::scroll::{camera_depth, ScrollSmoother};
use crate::model::{Camera, Viewport};

/// Uniform block shared with `background.wgsl`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BackgroundUniform {
    pub view_proj: [[f32; 4]; 4],
    pub color_a: [f32; 4],
    pub color_b: [f32; 4],
    pub resolution: [f32; 2],
    pub pointer: [f32; 2],
    pub time: f32,
    pub _pad0: f32,
    pub _pad1: f32,
    pub _pad2: f32,
}

/// Everything the renderer and the DOM need for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub uniform: BackgroundUniform,
    /// `translateY` for the content container, in CSS pixels
    pub content_offset: f32,
    /// Set when this frame applied a resize the surface must follow
    pub resized: Option<Viewport>,
}

/// Per-frame state threaded through [`FrameContext::update`]
pub struct FrameContext {
    pub camera: Camera,
    pub viewport: Viewport,
    pub scroll: ScrollSmoother,
    pub pointer: Vec2,
    pub start_ms: f64,
    pub last_ms: f64,
    colors: ([f32; 4], [f32; 4]),
    base_depth: f32,
    depth_per_viewport: f32,
}

impl FrameContext {
    pub fn new(config: &SiteConfig, viewport: Viewport, now_ms: f64, initial_scroll: f32) -> Self {
        let mut camera = Camera::new(
            viewport.width,
            viewport.height,
            config.camera_fov_y_deg,
            config.camera_base_depth,
        );
        let scroll = ScrollSmoother::new(
            initial_scroll as f64,
            config.scroll_damping as f64,
            config.scroll_snap_epsilon as f64,
        );
        camera.set_depth(camera_depth(
            scroll.smoothed,
            viewport.css_height,
            config.camera_base_depth,
            config.camera_depth_per_viewport,
        ));
        let [ar, ag, ab] = config.color_a;
        let [br, bg, bb] = config.color_b;
        Self {
            camera,
            viewport,
            scroll,
            pointer: Vec2::new(0.5, 0.5),
            start_ms: now_ms,
            last_ms: now_ms,
            colors: ([ar, ag, ab, 1.0], [br, bg, bb, 1.0]),
            base_depth: config.camera_base_depth,
            depth_per_viewport: config.camera_depth_per_viewport,
        }
    }

    /// Seconds since start; a clock sample older than the last one does not rewind
    pub fn elapsed(&self) -> f32 {
        ((self.last_ms - self.start_ms) / 1000.0) as f32
    }

    /// Advance one frame: apply pending input, smooth scroll, move the camera
    pub fn update(&mut self, now_ms: f64, input: &mut InputState) -> FrameOutput {
        if now_ms.is_finite() && now_ms > self.last_ms {
            self.last_ms = now_ms;
        }

        let resized = input.take_resize();
        if let Some(viewport) = resized {
            self.viewport = viewport;
            self.camera.set_aspect(viewport.width, viewport.height);
        }

        self.pointer = input.pointer;
        let smoothed = self.scroll.step(input.scroll_target as f64);
        self.camera.set_depth(camera_depth(
            smoothed,
            self.viewport.css_height,
            self.base_depth,
            self.depth_per_viewport,
        ));

        FrameOutput {
            uniform: self.uniform(),
            content_offset: -(smoothed as f32),
            resized,
        }
    }

    pub fn uniform(&self) -> BackgroundUniform {
        BackgroundUniform {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            color_a: self.colors.0,
            color_b: self.colors.1,
            resolution: self.viewport.resolution(),
            pointer: self.pointer.to_array(),
            time: self.elapsed(),
            _pad0: 0.0,
            _pad1: 0.0,
            _pad2: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::InputEvent;

    fn setup() -> (FrameContext, InputState) {
        let config = SiteConfig::default();
        let viewport = Viewport::from_css(800.0, 600.0, 1.0, config.max_pixel_ratio);
        let ctx = FrameContext::new(&config, viewport, 1000.0, 0.0);
        let input = InputState::new(&viewport, config.max_pixel_ratio);
        (ctx, input)
    }

    #[test]
    fn test_uniform_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<BackgroundUniform>(), 128);
        assert_eq!(std::mem::size_of::<BackgroundUniform>() % 16, 0);
    }

    #[test]
    fn test_time_is_monotonic() {
        let (mut ctx, mut input) = setup();
        assert_eq!(ctx.update(2500.0, &mut input).uniform.time, 1.5);
        assert_eq!(ctx.update(2000.0, &mut input).uniform.time, 1.5);
        assert_eq!(ctx.update(f64::NAN, &mut input).uniform.time, 1.5);
        assert_eq!(ctx.update(3000.0, &mut input).uniform.time, 2.0);
    }

    #[test]
    fn test_resize_updates_aspect_and_resolution_together() {
        let (mut ctx, mut input) = setup();
        input.process_event(&InputEvent::Resize { css_width: 1920.0, css_height: 1080.0, pixel_ratio: 1.0 });
        let out = ctx.update(1016.0, &mut input);
        assert_eq!(out.uniform.resolution, [1920.0, 1080.0]);
        assert_eq!(out.resized.map(|v| (v.width, v.height)), Some((1920, 1080)));
        let res = out.uniform.resolution;
        assert!((ctx.camera.aspect - res[0] / res[1]).abs() < 1e-6);

        let out = ctx.update(1032.0, &mut input);
        assert!(out.resized.is_none());
    }

    #[test]
    fn test_scroll_moves_camera_back_and_content_up() {
        let (mut ctx, mut input) = setup();
        input.process_event(&InputEvent::Scroll { offset: 600.0, max: 2400.0 });
        let out = ctx.update(1016.0, &mut input);
        assert!((out.content_offset + 60.0).abs() < 1e-3);
        assert!((ctx.camera.depth() - 6.0).abs() < 1e-4);

        for i in 0..400 {
            ctx.update(1032.0 + i as f64 * 16.0, &mut input);
        }
        assert_eq!(ctx.scroll.smoothed, 600.0);
        assert!((ctx.camera.depth() - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_pointer_is_copied_into_uniform() {
        let (mut ctx, mut input) = setup();
        input.process_event(&InputEvent::PointerMove { client_x: 800.0, client_y: 600.0 });
        let out = ctx.update(1016.0, &mut input);
        assert_eq!(out.uniform.pointer, [1.0, 0.0]);
    }
}
