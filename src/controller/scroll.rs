/// Exponential smoothing of the page scroll offset
#[derive(Debug, Clone)]
pub struct ScrollSmoother {
    pub smoothed: f64,
    pub damping: f64,
    pub snap_epsilon: f64,
}

impl ScrollSmoother {
    pub fn new(initial: f64, damping: f64, snap_epsilon: f64) -> Self {
        Self {
            smoothed: initial,
            damping,
            snap_epsilon,
        }
    }

    /// Advance one frame toward `target`, returns the new smoothed value
    pub fn step(&mut self, target: f64) -> f64 {
        let before = self.smoothed;
        self.smoothed += (target - self.smoothed) * self.damping;
        // steps below half an ulp would stall short of the target
        if self.smoothed == before || (target - self.smoothed).abs() < self.snap_epsilon {
            self.smoothed = target;
        }
        self.smoothed
    }

    pub fn is_settled(&self, target: f64) -> bool {
        self.smoothed == target
    }
}

/// Upper bound on frames before a smoother with damping `k` lands exactly on a
/// target `distance` away: the gap shrinks by `(1 - k)` per frame until it
/// drops under `epsilon`.
pub fn frames_to_settle(distance: f64, k: f64, epsilon: f64) -> u32 {
    let distance = distance.abs();
    if distance < epsilon {
        return 0;
    }
    let frames = ((epsilon / distance).ln() / (1.0 - k).ln()).ceil();
    frames.max(1.0) as u32 + 1
}

/// Camera depth for a smoothed scroll offset
pub fn camera_depth(smoothed: f64, viewport_height: f32, base: f32, per_viewport: f32) -> f32 {
    base + (smoothed / viewport_height.max(1.0) as f64) as f32 * per_viewport
}
