pub mod handles;
pub mod math;
pub mod timeline;

// Foundation crate: small, well-tested primitives only.
pub use handles::*;
pub use timeline::*;
