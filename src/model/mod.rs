// MODEL: camera, viewport and static page content
pub mod camera;
pub mod content;
pub mod viewport;

pub use camera::Camera;
pub use content::{Feature, Leader, FEATURES, LEADERS, LOGO_URL};
pub use viewport::Viewport;
