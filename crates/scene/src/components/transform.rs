use foundation::math::Vec3;

/// Globe-local placement of an entity.
///
/// Positions are expressed in the unrotated globe frame; the renderer applies
/// the shared yaw/pitch for anchored entities at draw time. Markers and rings
/// carry a surface point, arc entities stay at the identity and keep their
/// geometry in polyline storage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self { position }
    }
}
