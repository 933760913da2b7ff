use foundation::math::{Vec3, rotate_yaw_pitch};
use layers::sprites::pulse_scale;
use scene::components::Drawable;
use scene::picking::Ray;
use scene::world::World;

/// Camera looking at the globe center from `(0, 0, distance)`.
///
/// The globe rotates under a fixed camera: yaw/pitch are applied to every
/// anchored entity, not to the eye. `distance` is the zoom value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub yaw: f64,
    pub pitch: f64,
    pub distance: f64,
    pub fov_y_rad: f64,
}

impl Camera {
    pub fn new(yaw: f64, pitch: f64, distance: f64) -> Self {
        Self {
            yaw,
            pitch,
            distance,
            fov_y_rad: 45f64.to_radians(),
        }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    /// Ray through the pixel center, in world space. `None` for a zero-area
    /// surface.
    pub fn screen_ray(&self, x_px: f64, y_px: f64, width: f64, height: f64) -> Option<Ray> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let half_tan = (self.fov_y_rad * 0.5).tan();
        let aspect = width / height;
        let ndc_x = (2.0 * x_px / width - 1.0) * half_tan * aspect;
        let ndc_y = (1.0 - 2.0 * y_px / height) * half_tan;
        let dir = Vec3::new(ndc_x, ndc_y, -1.0).normalized();
        Some(Ray::new(self.eye(), dir))
    }

    /// The same ray expressed in globe-local space, so picking can test
    /// unrotated marker transforms directly.
    pub fn globe_local_ray(&self, ray: Ray) -> Ray {
        Ray::new(
            self.unrotate(ray.origin),
            self.unrotate(ray.dir).normalized(),
        )
    }

    fn unrotate(&self, v: Vec3) -> Vec3 {
        // Inverse of the shared globe orientation: undo pitch, then yaw.
        let unpitched = rotate_yaw_pitch(v, 0.0, -self.pitch);
        rotate_yaw_pitch(unpitched, -self.yaw, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Globe mesh plus atmosphere shell, under the shared orientation. The
    /// basemap texture is bound by handle.
    DrawGlobe {
        yaw: f64,
        pitch: f64,
        basemap: crate::resources::TextureHandle,
    },
    DrawMarker {
        position: Vec3,
        scale: f64,
        color: [f32; 4],
    },
    DrawPolyline {
        points: Vec<Vec3>,
        color: [f32; 4],
    },
    DrawRing {
        position: Vec3,
        /// Faces the globe center.
        normal: Vec3,
        radius: f64,
        color: [f32; 4],
    },
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderFrame {
    pub commands: Vec<RenderCommand>,
}

pub struct Renderer;

impl Renderer {
    /// Collects one frame of draw commands.
    ///
    /// The shared yaw/pitch is applied identically to the globe and every
    /// anchored overlay entity; marker scales are recomputed each call from
    /// the shared clock.
    pub fn collect(
        world: &World,
        camera: Camera,
        basemap: crate::resources::TextureHandle,
        clock_s: f64,
    ) -> RenderFrame {
        let mut frame = RenderFrame::default();
        frame.commands.push(RenderCommand::DrawGlobe {
            yaw: camera.yaw,
            pitch: camera.pitch,
            basemap,
        });

        for (entity, transform, drawable) in world.drawables() {
            let orient = |v: Vec3| {
                if world.is_anchored(entity) {
                    rotate_yaw_pitch(v, camera.yaw, camera.pitch)
                } else {
                    v
                }
            };

            match drawable {
                Drawable::Marker {
                    color,
                    base_scale,
                    phase,
                    ..
                } => {
                    frame.commands.push(RenderCommand::DrawMarker {
                        position: orient(transform.position),
                        scale: base_scale * pulse_scale(clock_s, phase),
                        color,
                    });
                }
                Drawable::Polyline { points, color } => {
                    let Some(polyline) = world.polyline(points) else {
                        continue;
                    };
                    frame.commands.push(RenderCommand::DrawPolyline {
                        points: polyline.points.iter().map(|p| orient(*p)).collect(),
                        color,
                    });
                }
                Drawable::Ring {
                    color,
                    radius,
                } => {
                    let position = orient(transform.position);
                    frame.commands.push(RenderCommand::DrawRing {
                        position,
                        normal: position.normalized(),
                        radius,
                        color,
                    });
                }
            }
        }

        frame
    }
}
