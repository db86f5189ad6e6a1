use glam::{Mat4, Vec3};

/// Perspective camera looking down -Z at the background plane
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32, fov_y_deg: f32, depth: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, depth),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: fov_y_deg.to_radians(),
            aspect: aspect_ratio(width, height),
            z_near: 0.1,
            z_far: 1000.0,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) { self.aspect = aspect_ratio(width, height); }

    /// Move the eye along Z, keeping the camera pointed straight down the axis
    pub fn set_depth(&mut self, z: f32) {
        self.eye.z = z;
        self.target = Vec3::new(self.eye.x, self.eye.y, z - 1.0);
    }

    pub fn depth(&self) -> f32 { self.eye.z }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        proj * view
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
