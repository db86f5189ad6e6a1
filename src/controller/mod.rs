// CONTROLLER: input, scroll smoothing, loading gate and the per-frame update
pub mod input;
pub mod scroll;
pub mod loading;
pub mod frame_loop;

pub use input::{InputEvent, InputState};
pub use scroll::ScrollSmoother;
pub use loading::{AssetProgress, GateState, LoadingGate, LoadingStrategy, SimulatedProgress};
pub use frame_loop::{BackgroundUniform, FrameContext, FrameOutput};
