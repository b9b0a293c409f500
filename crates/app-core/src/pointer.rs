use glam::Vec2;

use crate::constants::DRAG_SENSITIVITY;

/// Converts raw pointer events into drag state, a normalized viewport
/// position and pending spin impulses.
///
/// Host shells forward pointer-down/move/up events here; the orientation
/// controller drains the accumulated impulse once per frame. Note the
/// intentional axis swap when converting drag deltas: a horizontal drag
/// yaws the model (y angle) and a vertical drag pitches it (x angle).
#[derive(Clone, Debug)]
pub struct PointerTracker {
    viewport: Vec2,
    dragging: bool,
    last_px: Option<Vec2>,
    normalized: Vec2,
    pending_impulse: Vec2,
}

impl PointerTracker {
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            viewport: Vec2::new(viewport_w.max(1.0), viewport_h.max(1.0)),
            dragging: false,
            last_px: None,
            normalized: Vec2::ZERO,
            pending_impulse: Vec2::ZERO,
        }
    }

    pub fn set_viewport(&mut self, w: f32, h: f32) {
        self.viewport = Vec2::new(w.max(1.0), h.max(1.0));
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_px = Some(Vec2::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let px = Vec2::new(x, y);
        self.normalized = Vec2::new(
            (px.x / self.viewport.x) * 2.0 - 1.0,
            (px.y / self.viewport.y) * 2.0 - 1.0,
        )
        .clamp(Vec2::splat(-1.0), Vec2::splat(1.0));

        if self.dragging {
            if let Some(last) = self.last_px {
                let delta = px - last;
                // axis swap: horizontal drag -> yaw, vertical drag -> pitch
                self.pending_impulse.x += delta.y * DRAG_SENSITIVITY;
                self.pending_impulse.y += delta.x * DRAG_SENSITIVITY;
            }
            self.last_px = Some(px);
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.last_px = None;
    }

    /// Pointer-cancel behaves like pointer-up.
    pub fn cancel(&mut self) {
        self.pointer_up();
    }

    /// Auto-spin suppression: ends any drag and discards queued impulses.
    pub fn suppress(&mut self) {
        self.pointer_up();
        self.pending_impulse = Vec2::ZERO;
    }

    #[inline]
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Absolute pointer position normalized to [-1, 1] per axis.
    #[inline]
    pub fn normalized(&self) -> Vec2 {
        self.normalized
    }

    /// Drains the impulse accumulated since the last frame.
    #[inline]
    pub fn take_impulse(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending_impulse)
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
