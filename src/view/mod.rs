// VIEW: GPU background, DOM capability and page rendering
pub mod render;
pub mod gpu_init;
pub mod shader;
pub mod dom;
pub mod content;
pub mod loading_screen;

pub use render::{Background, BackgroundResources, RenderState};
pub use gpu_init::GpuContext;
pub use dom::{Dom, DomElement};
pub use loading_screen::LoadingScreen;
