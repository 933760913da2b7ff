pub mod renderer;
pub mod resources;

pub use renderer::*;
pub use resources::*;
