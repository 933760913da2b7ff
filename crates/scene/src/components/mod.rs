pub mod anchor;
pub mod drawable;
pub mod group;
pub mod transform;
pub mod visibility;

pub use anchor::*;
pub use drawable::*;
pub use group::*;
pub use transform::*;
pub use visibility::*;
