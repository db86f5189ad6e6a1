/// Platform-agnostic input handling
use glam::Vec2;

use crate::model::Viewport;

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer position in CSS pixels, top-left origin
    PointerMove { client_x: f32, client_y: f32 },
    /// Raw page scroll offset and the largest offset the page allows
    Scroll { offset: f32, max: f32 },
    Resize { css_width: f64, css_height: f64, pixel_ratio: f64 },
}

/// Input recorded by event callbacks, drained once per frame
pub struct InputState {
    /// Normalized pointer, bottom-left origin, always in [0,1]²
    pub pointer: Vec2,
    pub scroll_target: f32,
    pub pending_resize: Option<Viewport>,
    css_size: (f32, f32),
    max_pixel_ratio: f64,
}

impl InputState {
    pub fn new(viewport: &Viewport, max_pixel_ratio: f64) -> Self {
        Self {
            pointer: Vec2::new(0.5, 0.5),
            scroll_target: 0.0,
            pending_resize: None,
            css_size: css_size_of(viewport),
            max_pixel_ratio,
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { client_x, client_y } => {
                if !(client_x.is_finite() && client_y.is_finite()) {
                    return;
                }
                let (w, h) = self.css_size;
                let x = client_x / w;
                let y = 1.0 - client_y / h;
                self.pointer = Vec2::new(x, y).clamp(Vec2::ZERO, Vec2::ONE);
            }
            InputEvent::Scroll { offset, max } => {
                if !offset.is_finite() {
                    return;
                }
                let max = if max.is_finite() { max.max(0.0) } else { f32::MAX };
                self.scroll_target = offset.clamp(0.0, max);
            }
            InputEvent::Resize { css_width, css_height, pixel_ratio } => {
                let viewport =
                    Viewport::from_css(css_width, css_height, pixel_ratio, self.max_pixel_ratio);
                self.css_size = css_size_of(&viewport);
                self.pending_resize = Some(viewport);
            }
        }
    }

    pub fn take_resize(&mut self) -> Option<Viewport> {
        self.pending_resize.take()
    }
}

fn css_size_of(viewport: &Viewport) -> (f32, f32) {
    let ratio = viewport.pixel_ratio as f32;
    ((viewport.width as f32 / ratio).max(1.0), viewport.css_height.max(1.0))
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use web_sys::{MouseEvent, Window};

    pub fn pointer_event_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::PointerMove {
            client_x: e.client_x() as f32,
            client_y: e.client_y() as f32,
        }
    }

    pub fn scroll_to_input(window: &Window) -> Option<InputEvent> {
        let offset = window.scroll_y().ok()?;
        let inner_height = window.inner_height().ok()?.as_f64()?;
        let scroll_height = window
            .document()
            .and_then(|d| d.document_element())
            .map(|el| el.scroll_height() as f64)
            .unwrap_or(inner_height);
        Some(InputEvent::Scroll {
            offset: offset as f32,
            max: (scroll_height - inner_height).max(0.0) as f32,
        })
    }

    pub fn resize_to_input(window: &Window) -> Option<InputEvent> {
        Some(InputEvent::Resize {
            css_width: window.inner_width().ok()?.as_f64()?,
            css_height: window.inner_height().ok()?.as_f64()?,
            pixel_ratio: window.device_pixel_ratio(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> InputState {
        InputState::new(&Viewport::from_css(800.0, 600.0, 1.0, 2.0), 2.0)
    }

    #[test]
    fn test_pointer_normalized_with_flipped_y() {
        let mut input = state();
        input.process_event(&InputEvent::PointerMove { client_x: 200.0, client_y: 150.0 });
        assert!((input.pointer - Vec2::new(0.25, 0.75)).length() < 1e-6);
    }

    #[test]
    fn test_pointer_clamped_and_non_finite_ignored() {
        let mut input = state();
        input.process_event(&InputEvent::PointerMove { client_x: -50.0, client_y: 900.0 });
        assert_eq!(input.pointer, Vec2::new(0.0, 0.0));
        input.process_event(&InputEvent::PointerMove { client_x: f32::NAN, client_y: 10.0 });
        assert_eq!(input.pointer, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_pointer_uses_css_size_at_high_dpi() {
        let mut input = InputState::new(&Viewport::from_css(800.0, 600.0, 2.0, 2.0), 2.0);
        input.process_event(&InputEvent::PointerMove { client_x: 400.0, client_y: 300.0 });
        assert!((input.pointer - Vec2::new(0.5, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_scroll_target_clamped() {
        let mut input = state();
        input.process_event(&InputEvent::Scroll { offset: 5000.0, max: 1200.0 });
        assert_eq!(input.scroll_target, 1200.0);
        input.process_event(&InputEvent::Scroll { offset: -20.0, max: 1200.0 });
        assert_eq!(input.scroll_target, 0.0);
        input.process_event(&InputEvent::Scroll { offset: f32::INFINITY, max: 1200.0 });
        assert_eq!(input.scroll_target, 0.0);
    }

    #[test]
    fn test_resize_is_pending_until_taken() {
        let mut input = state();
        input.process_event(&InputEvent::Resize { css_width: 1024.0, css_height: 768.0, pixel_ratio: 1.0 });
        let vp = input.take_resize().unwrap();
        assert_eq!((vp.width, vp.height), (1024, 768));
        assert!(input.take_resize().is_none());

        input.process_event(&InputEvent::PointerMove { client_x: 1024.0, client_y: 0.0 });
        assert_eq!(input.pointer, Vec2::new(1.0, 1.0));
    }
}
