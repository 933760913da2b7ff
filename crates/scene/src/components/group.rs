/// Overlay group membership.
///
/// The overlay builder clears and recreates whole groups at a time; the tag
/// is what makes that cheap and exact.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverlayGroup {
    ConflictMarkers,
    ConflictArcs,
    LiberationStruggles,
}
