pub mod frame;
pub mod playback;
pub mod viewport;

pub use frame::*;
pub use playback::*;
pub use viewport::*;
