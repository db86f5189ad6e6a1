/// Drawable size in physical pixels plus the CSS height used for scroll math
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Layout height in CSS pixels (`innerHeight`)
    pub css_height: f32,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Build from CSS size and device pixel ratio, capping the ratio at `max_ratio`
    pub fn from_css(css_width: f64, css_height: f64, device_ratio: f64, max_ratio: f64) -> Self {
        let ratio = if device_ratio.is_finite() && device_ratio > 0.0 {
            device_ratio.min(max_ratio)
        } else {
            1.0
        };
        let css_w = if css_width.is_finite() { css_width.max(1.0) } else { 1.0 };
        let css_h = if css_height.is_finite() { css_height.max(1.0) } else { 1.0 };
        Self {
            width: ((css_w * ratio).round() as u32).max(1),
            height: ((css_h * ratio).round() as u32).max(1),
            css_height: css_h as f32,
            pixel_ratio: ratio,
        }
    }

    pub fn resolution(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}
