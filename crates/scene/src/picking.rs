use foundation::math::Vec3;

use crate::World;
use crate::components::Drawable;
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Deterministic ray picking against marker hit spheres.
///
/// The ray is expected in globe-local space (the caller inverse-rotates the
/// camera ray by the current yaw/pitch), so marker transforms can be tested
/// directly.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - Equal distances break ties toward the lower `EntityId::index()`.
/// - Only `Drawable::Marker` entities participate; arcs and rings have no
///   interaction semantics.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalized();
    if dir == Vec3::ZERO {
        return None;
    }

    let mut best: Option<(f64, EntityId)> = None;
    for (entity, transform, drawable) in world.drawables() {
        let Drawable::Marker { pick_radius, .. } = drawable else {
            continue;
        };

        let Some(t) = ray_sphere_hit_t(ray.origin, dir, transform.position, pick_radius) else {
            continue;
        };
        if t > opts.max_distance {
            continue;
        }

        best = match best {
            None => Some((t, entity)),
            Some((bt, be)) => {
                let ord = t.total_cmp(&bt).then_with(|| entity.index().cmp(&be.index()));
                if ord.is_lt() { Some((t, entity)) } else { Some((bt, be)) }
            }
        };
    }

    let (t, entity) = best?;
    Some(PickHit {
        entity,
        distance: t,
        point: ray.origin + dir.scale(t),
    })
}

fn ray_sphere_hit_t(origin: Vec3, dir: Vec3, center: Vec3, radius: f64) -> Option<f64> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }

    let sqrt_disc = disc.sqrt();
    let t0 = -b - sqrt_disc;
    if t0 >= 0.0 {
        return Some(t0);
    }
    let t1 = -b + sqrt_disc;
    if t1 >= 0.0 {
        // Ray starts inside the sphere.
        return Some(t1);
    }
    None
}
