/// Index into the world's polyline storage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PolylineId(pub u32);

/// Renderable shape attached to an entity. Colors are RGBA in [0, 1];
/// opacity is carried in the alpha channel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Drawable {
    /// Billboard glow sprite. `phase` offsets the shared pulse clock so
    /// markers pulse out of step with one another.
    Marker {
        color: [f32; 4],
        base_scale: f64,
        phase: f64,
        pick_radius: f64,
    },
    /// Curved connector sampled into world-space points.
    Polyline { points: PolylineId, color: [f32; 4] },
    /// Flat ring billboard oriented to face the globe center.
    Ring { color: [f32; 4], radius: f64 },
}

impl Drawable {
    pub fn marker(color: [f32; 4], base_scale: f64, phase: f64) -> Self {
        Self::Marker {
            color,
            base_scale,
            phase,
            // Generous hit area relative to the visual size.
            pick_radius: base_scale * 1.5,
        }
    }

    pub fn polyline(points: PolylineId, color: [f32; 4]) -> Self {
        Self::Polyline { points, color }
    }

    pub fn ring(color: [f32; 4], radius: f64) -> Self {
        Self::Ring { color, radius }
    }
}

#[cfg(test)]
mod tests {
    use super::Drawable;

    #[test]
    fn marker_pick_radius_tracks_scale() {
        let Drawable::Marker { pick_radius, .. } = Drawable::marker([1.0; 4], 0.04, 0.0) else {
            panic!("expected marker");
        };
        assert!((pick_radius - 0.06).abs() < 1e-12);
    }
}
