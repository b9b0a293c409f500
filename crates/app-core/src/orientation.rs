//! Per-object orientation choreography: pointer-follow tilt or idle
//! auto-spin, drag-driven spin inertia with friction, inactivity reset and
//! the click-driven bounce pop.
//!
//! All mutation happens inside `tick`, which a host shell calls once per
//! frame with the elapsed delta and a monotonic clock in seconds. Nothing
//! here schedules work of its own.

use std::time::Duration;

use glam::{Vec2, Vec3};

use crate::constants::{
    AUTO_SPIN_RELAX, AUTO_SPIN_SPEED, BOUNCE_DAMPING, BOUNCE_IMPULSE, BOUNCE_LIFT,
    BOUNCE_SCALE_BOOST, BOUNCE_STIFFNESS, MAX_FRAME_DT_SEC, PARALLAX_RANGE, POSITION_SMOOTHING,
    ROTATION_SMOOTHING, SPIN_EPSILON, SPIN_FRICTION, SPIN_IDLE_RESET_SEC, SPIN_RESET_DECAY,
    TILT_RANGE_X, TILT_RANGE_Y,
};
use crate::ease::{integrate_spring, smoothing_factor, SpringState};
use crate::pointer::PointerTracker;

/// Rotational state blended into the object's transform each frame.
///
/// `base` and `target_pos` follow continuous input (pointer position or the
/// auto-spin clock); `offset` accumulates `velocity`, and both decay toward
/// zero by a per-unit-time friction factor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpinState {
    pub base: Vec2,
    pub offset: Vec2,
    pub velocity: Vec2,
    pub target_pos: Vec2,
}

/// Transform snapshot produced by one `tick`.
#[derive(Clone, Copy, Debug)]
pub struct OrientationFrame {
    /// Euler x/y rotation in radians.
    pub rotation: Vec2,
    /// Positional offset (parallax drift plus bounce lift).
    pub offset: Vec3,
    /// Uniform scale; never below the base scale (one-sided pop).
    pub scale: f32,
}

pub struct ModelOrientation {
    spin: SpinState,
    bounce: SpringState,
    auto_spin: bool,
    base_scale: f32,
    rotation: Vec2,
    position: Vec2,
    last_active_sec: f64,
    resetting: bool,
    last_bounce_trigger: Option<u32>,
}

impl ModelOrientation {
    pub fn new(base_scale: f32, now_sec: f64) -> Self {
        Self {
            spin: SpinState::default(),
            bounce: SpringState::default(),
            auto_spin: false,
            base_scale,
            rotation: Vec2::ZERO,
            position: Vec2::ZERO,
            last_active_sec: now_sec,
            resetting: false,
            last_bounce_trigger: None,
        }
    }

    /// Auto-spin and manual drag are mutually exclusive; enabling this makes
    /// `tick` ignore (and actively suppress) pointer input.
    pub fn set_auto_spin(&mut self, enabled: bool) {
        self.auto_spin = enabled;
    }

    #[inline]
    pub fn auto_spin(&self) -> bool {
        self.auto_spin
    }

    #[inline]
    pub fn spin(&self) -> &SpinState {
        &self.spin
    }

    #[inline]
    pub fn bounce(&self) -> &SpringState {
        &self.bounce
    }

    #[inline]
    pub fn is_resetting(&self) -> bool {
        self.resetting
    }

    /// Resume after a backgrounded tab: transient physical state is zeroed
    /// rather than repaired, and the activity clock is re-stamped so no
    /// catch-up animation fires.
    pub fn resume(&mut self, now_sec: f64) {
        self.spin.offset = Vec2::ZERO;
        self.spin.velocity = Vec2::ZERO;
        self.bounce.reset();
        self.last_active_sec = now_sec;
        self.resetting = false;
    }

    /// Advances one frame. Effects apply in a fixed order: input tracking,
    /// spin accumulation and friction, activity detection, reset decay,
    /// smoothed blend, bounce integration.
    pub fn tick(
        &mut self,
        dt: Duration,
        now_sec: f64,
        pointer: &mut PointerTracker,
        bounce_trigger: u32,
    ) -> OrientationFrame {
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);
        let frames = dt_sec * 60.0;

        if self.auto_spin {
            pointer.suppress();
            self.spin.velocity = Vec2::ZERO;
            self.spin.base.y += AUTO_SPIN_SPEED * dt_sec;
            let relax = smoothing_factor(AUTO_SPIN_RELAX, dt_sec);
            self.spin.base.x += -self.spin.base.x * relax;
            self.spin.target_pos += -self.spin.target_pos * relax;
        } else {
            let p = pointer.normalized();
            self.spin.base.x = p.y * TILT_RANGE_X;
            self.spin.base.y = p.x * TILT_RANGE_Y;
            self.spin.target_pos = p * PARALLAX_RANGE;
            self.spin.velocity += pointer.take_impulse();
        }

        self.spin.offset += self.spin.velocity * frames;
        self.spin.velocity *= SPIN_FRICTION.powf(frames);

        let active = pointer.dragging() || self.spin.velocity.length() > SPIN_EPSILON;
        if active {
            self.resetting = false;
            self.last_active_sec = now_sec;
        } else if now_sec - self.last_active_sec > SPIN_IDLE_RESET_SEC {
            self.resetting = true;
        }

        if self.resetting {
            let k = smoothing_factor(SPIN_RESET_DECAY, dt_sec);
            self.spin.offset += -self.spin.offset * k;
            if self.spin.offset.x.abs() < SPIN_EPSILON && self.spin.offset.y.abs() < SPIN_EPSILON {
                self.spin.offset = Vec2::ZERO;
                self.resetting = false;
            }
        }

        let desired = self.spin.base + self.spin.offset;
        self.rotation += (desired - self.rotation) * smoothing_factor(ROTATION_SMOOTHING, dt_sec);
        self.position +=
            (self.spin.target_pos - self.position) * smoothing_factor(POSITION_SMOOTHING, dt_sec);

        // Impulse on trigger increment; the first observation after
        // construction only records the counter so no phantom pop fires.
        match self.last_bounce_trigger {
            None => self.last_bounce_trigger = Some(bounce_trigger),
            Some(prev) if prev != bounce_trigger => {
                self.bounce.velocity += BOUNCE_IMPULSE;
                self.last_bounce_trigger = Some(bounce_trigger);
            }
            Some(_) => {}
        }
        integrate_spring(&mut self.bounce, BOUNCE_STIFFNESS, BOUNCE_DAMPING, dt_sec);

        let pop = self.bounce.displacement.max(0.0);
        OrientationFrame {
            rotation: self.rotation,
            offset: Vec3::new(self.position.x, self.position.y + pop * BOUNCE_LIFT, 0.0),
            scale: self.base_scale * (1.0 + pop * BOUNCE_SCALE_BOOST),
        }
    }
}
