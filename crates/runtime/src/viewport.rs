use std::f64::consts::FRAC_PI_2;

/// Auto-rotation yaw increment per tick (radians).
const AUTO_ROTATE_STEP: f64 = 0.001;

/// Drag sensitivity (radians per pixel).
const DRAG_SENSITIVITY: f64 = 0.005;

/// Zoom sensitivity per wheel delta unit.
const ZOOM_SENSITIVITY: f64 = 0.001;

/// Cooldown before auto-rotation resumes after a drag ends (ms).
const AUTO_ROTATE_RESUME_MS: f64 = 3000.0;

pub const MIN_ZOOM: f64 = 1.5;
pub const MAX_ZOOM: f64 = 5.0;

/// Pitch never crosses a pole.
const MAX_PITCH: f64 = FRAC_PI_2;

/// Owns every piece of mutable viewport state: orientation, zoom, drag
/// tracking, and the auto-rotation cooldown. One instance is injected per
/// engine; nothing here is global.
///
/// States: `Idle` and `Dragging`, tracked by `dragging`; auto-rotation is an
/// independent flag suspended on pointer-down and re-armed on a delay after
/// release. A new drag supersedes a pending resume rather than stacking.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    yaw: f64,
    pitch: f64,
    zoom: f64,
    dragging: bool,
    auto_rotate: bool,
    last_pointer: Option<(f64, f64)>,
    clock_ms: f64,
    resume_at_ms: Option<f64>,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            zoom: 2.5,
            dragging: false,
            auto_rotate: true,
            last_pointer: None,
            clock_ms: 0.0,
            resume_at_ms: None,
        }
    }
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Mouse-down or first touch: enter `Dragging`, suspend auto-rotation.
    pub fn on_pointer_down(&mut self, x_px: f64, y_px: f64) {
        self.dragging = true;
        self.auto_rotate = false;
        self.resume_at_ms = None;
        self.last_pointer = Some((x_px, y_px));
        tracing::trace!(x_px, y_px, "drag start");
    }

    /// Pointer movement while dragging rotates the globe; pitch is clamped
    /// so the camera never flips over a pole.
    pub fn on_pointer_move(&mut self, x_px: f64, y_px: f64) {
        if !self.dragging {
            return;
        }
        if let Some((lx, ly)) = self.last_pointer {
            let dx = x_px - lx;
            let dy = y_px - ly;
            self.yaw += dx * DRAG_SENSITIVITY;
            self.pitch = (self.pitch + dy * DRAG_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
        }
        self.last_pointer = Some((x_px, y_px));
    }

    /// Mouse-up, pointer-leave, or touch-end: back to `Idle`, with
    /// auto-rotation re-armed after a cooldown.
    pub fn on_pointer_up(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.last_pointer = None;
        self.resume_at_ms = Some(self.clock_ms + AUTO_ROTATE_RESUME_MS);
        tracing::trace!("drag end");
    }

    /// Wheel or pinch delta; independent of drag state.
    pub fn on_wheel(&mut self, delta_y: f64) {
        self.zoom = (self.zoom + delta_y * ZOOM_SENSITIVITY).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Per-frame update: advances the controller clock, re-arms
    /// auto-rotation once the cooldown passes, and applies the idle yaw
    /// step.
    pub fn tick(&mut self, dt_ms: f64) {
        self.clock_ms += dt_ms.max(0.0);

        if let Some(at) = self.resume_at_ms
            && self.clock_ms >= at
        {
            self.auto_rotate = true;
            self.resume_at_ms = None;
        }

        if self.auto_rotate && !self.dragging {
            self.yaw += AUTO_ROTATE_STEP;
        }
    }
}
