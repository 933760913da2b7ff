/// Marks an entity as attached to the rotating globe surface.
///
/// The renderer applies the shared globe yaw/pitch to every anchored entity,
/// so overlays stay locked to the surface. This is an explicit relationship
/// rather than an incidental shared parent transform.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct GlobeAnchor;
