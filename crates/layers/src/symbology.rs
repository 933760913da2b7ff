/// Visual constants and color handling for the globe overlays.

/// RGBA color, components in [0, 1].
pub type Rgba = [f32; 4];

/// Fallback tint when a catalog color string fails to parse.
pub const FALLBACK_COLOR: Rgba = [0.8, 0.8, 0.8, 1.0];

/// Base marker scale as a fraction of the unit globe radius.
pub const MARKER_SCALE: f64 = 0.035;

/// Liberation-struggle ring radius, unit-globe fraction.
pub const RING_RADIUS: f64 = 0.05;

/// Cross-coalition connector tint.
pub const CONFRONTATION_COLOR: Rgba = [0.9, 0.25, 0.2, 1.0];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcStyle {
    /// Midpoint lift as a multiple of chord length.
    pub height_factor: f64,
    pub opacity: f32,
}

/// Within-coalition links: hug the surface, read as "alliance".
pub const ALLIANCE_ARC: ArcStyle = ArcStyle {
    height_factor: 0.15,
    opacity: 0.6,
};

/// Cross-coalition links: lifted higher, fainter, read as "confrontation".
pub const CONFRONTATION_ARC: ArcStyle = ArcStyle {
    height_factor: 0.3,
    opacity: 0.4,
};

/// Parses a `#rrggbb` or `#rgb` hex color. `None` on anything else.
pub fn parse_hex(s: &str) -> Option<Rgba> {
    let hex = s.trim().strip_prefix('#')?;
    let (r, g, b) = match hex.len() {
        6 => (
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        ),
        3 => {
            let d = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            (d(0)?, d(1)?, d(2)?)
        }
        _ => return None,
    };
    Some([
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        1.0,
    ])
}

/// Catalog colors are host-authored strings; fall back rather than fail.
pub fn parse_hex_or_fallback(s: &str) -> Rgba {
    parse_hex(s).unwrap_or(FALLBACK_COLOR)
}

pub fn with_opacity(color: Rgba, opacity: f32) -> Rgba {
    [color[0], color[1], color[2], opacity]
}
