/// Billboard glow visuals for markers.
///
/// A sprite is a small radial-gradient alpha raster, tinted per entity at
/// draw time. The pulse is a pure function of the shared clock plus a
/// per-marker phase offset; phase comes from the marker's position in the
/// current overlay build and is not preserved across rebuilds.

/// Pulse angular speed (radians per second of engine clock).
pub const PULSE_SPEED: f64 = 2.0;

/// Pulse amplitude relative to the base scale.
pub const PULSE_AMPLITUDE: f64 = 0.25;

/// Phase step between consecutive markers in a build pass.
pub const PHASE_STEP: f64 = 0.35;

/// Per-frame scale multiplier for a marker.
pub fn pulse_scale(t_s: f64, phase: f64) -> f64 {
    1.0 + PULSE_AMPLITUDE * (t_s * PULSE_SPEED + phase).sin()
}

/// Phase offset for the `index`-th marker placed by the current rebuild.
pub fn phase_for_index(index: usize) -> f64 {
    index as f64 * PHASE_STEP
}

/// Square radial-gradient alpha raster.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowSprite {
    size: u32,
    alpha: Vec<u8>,
}

impl GlowSprite {
    /// Alpha peaks at the center and falls off quadratically to the edge.
    pub fn new(size: u32) -> Self {
        let size = size.max(1);
        let half = (size as f64 - 1.0) / 2.0;
        let radius = half.max(0.5);

        let mut alpha = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f64 - half;
                let dy = y as f64 - half;
                let d = (dx * dx + dy * dy).sqrt() / radius;
                let falloff = (1.0 - d).clamp(0.0, 1.0);
                alpha.push((falloff * falloff * 255.0).round() as u8);
            }
        }
        Self { size, alpha }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.alpha[(y * self.size + x) as usize]
    }
}
