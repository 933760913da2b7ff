use foundation::math::Vec3;

pub const DEFAULT_ARC_SEGMENTS: usize = 64;

/// Builds a curved connector between two points on the unit globe.
///
/// Endpoints are re-normalized to unit radius; the quadratic Bezier control
/// point is the chord midpoint pushed outward to `1 + height_factor * chord`.
/// The result always has exactly `segments + 1` points. Degenerate inputs
/// (`a == b`, or a zero vector) yield a valid zero-length polyline rather
/// than NaN geometry.
pub fn build_arc(a: Vec3, b: Vec3, height_factor: f64, segments: usize) -> Vec<Vec3> {
    let a = a.normalized();
    let b = b.normalized();

    let chord = (b - a).length();
    let mid = a.lerp(b, 0.5).normalized();
    // Antipodal or coincident-degenerate midpoints have no outward direction;
    // fall back to one endpoint so the curve stays finite.
    let control_dir = if mid == Vec3::ZERO { a } else { mid };
    let control = control_dir.scale(1.0 + height_factor * chord);

    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let u = 1.0 - t;
        let p = a.scale(u * u) + control.scale(2.0 * u * t) + b.scale(t * t);
        points.push(p);
    }
    points
}
