use super::Vec3;

/// Projects geographic coordinates onto a sphere of the given radius.
///
/// Convention: latitude in degrees, north positive, valid in [-90, 90];
/// longitude in degrees, east positive, valid in [-180, 180]. The result
/// always has magnitude `radius`, and both poles collapse to a single point
/// regardless of longitude.
pub fn project(lat_deg: f64, lng_deg: f64, radius: f64) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lng_deg + 180.0).to_radians();

    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Applies the shared globe orientation: yaw about the Y axis, then pitch
/// about the X axis. Every surface-anchored point goes through this so
/// overlays stay locked to the rotating globe.
pub fn rotate_yaw_pitch(v: Vec3, yaw: f64, pitch: f64) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let yawed = Vec3::new(v.x * cy + v.z * sy, v.y, -v.x * sy + v.z * cy);

    let (sp, cp) = pitch.sin_cos();
    Vec3::new(
        yawed.x,
        yawed.y * cp - yawed.z * sp,
        yawed.y * sp + yawed.z * cp,
    )
}

#[cfg(test)]
mod tests {
    use super::{project, rotate_yaw_pitch};
    use crate::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn projection_preserves_radius() {
        for &(lat, lng) in &[
            (0.0, 0.0),
            (51.5, -0.1),
            (-33.9, 151.2),
            (89.9, 12.0),
            (-90.0, -180.0),
        ] {
            let p = project(lat, lng, 2.5);
            assert_close(p.length(), 2.5, 1e-12);
        }
    }

    #[test]
    fn equator_prime_meridian_maps_to_positive_x() {
        let p = project(0.0, 0.0, 1.0);
        assert_close(p.x, 1.0, 1e-12);
        assert_close(p.y, 0.0, 1e-12);
        assert_close(p.z, 0.0, 1e-12);
    }

    #[test]
    fn poles_collapse_regardless_of_longitude() {
        let a = project(90.0, 10.0, 1.0);
        let b = project(90.0, -120.0, 1.0);
        assert_close((a - b).length(), 0.0, 1e-12);
        assert_close(a.y, 1.0, 1e-12);
    }

    #[test]
    fn rotation_preserves_length() {
        let p = project(40.0, -74.0, 1.0);
        let r = rotate_yaw_pitch(p, 1.3, -0.4);
        assert_close(r.length(), 1.0, 1e-12);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let v = Vec3::new(0.3, -0.2, 0.9);
        let r = rotate_yaw_pitch(v, 0.0, 0.0);
        assert_close((r - v).length(), 0.0, 1e-15);
    }
}
