pub mod frame;
pub mod renderer;

pub use frame::Frame;
pub use renderer::render_frame;
