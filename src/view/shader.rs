//! CPU mirror of `shaders/background.wgsl`.
//!
//! The GPU evaluates the same expression per fragment; keeping a host copy lets
//! the effect be sampled in tests without a device.

use glam::{Vec2, Vec3};

pub const BACKGROUND_WGSL: &str = include_str!("shaders/background.wgsl");

/// Mix factor for a fragment, `frag` in pixels with a bottom-left origin.
/// Unclamped: the sum of four sine terms spans roughly [-1.1, 2.1].
pub fn plasma(frag: Vec2, resolution: Vec2, time: f32, pointer: Vec2) -> f32 {
    let uv = (frag * 2.0 - resolution) / resolution.x.min(resolution.y);
    let dist = uv.length();

    let mut p = (dist * 20.0 - time * 2.0).sin() * 0.5 + 0.5;
    p += (uv.x * 10.0 + time).sin() * 0.3;
    p += (uv.y * 10.0 + time * 1.5).sin() * 0.3;

    let mouse_uv = (pointer * 2.0 - Vec2::ONE) * Vec2::new(resolution.x / resolution.y, 1.0);
    p += ((uv - mouse_uv).length() * 30.0 - time * 3.0).sin() * 0.5;
    p
}

/// Raw shader output before the display pipeline clamps it
pub fn shade(frag: Vec2, resolution: Vec2, time: f32, pointer: Vec2, color_a: Vec3, color_b: Vec3) -> Vec3 {
    color_a.lerp(color_b, plasma(frag, resolution, time, pointer))
}

/// What actually reaches the screen
pub fn display_color(raw: Vec3) -> Vec3 {
    raw.clamp(Vec3::ZERO, Vec3::ONE)
}
