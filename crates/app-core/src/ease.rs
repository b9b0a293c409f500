//! Pure interpolation and integration helpers.
//!
//! Everything here is stateless or operates on a caller-owned state value,
//! so the animated controllers built on top stay unit-testable without a
//! real clock.

/// Cubic ease-in-out over a normalized parameter.
///
/// Input outside \[0, 1\] is clamped; `ease_in_out_cubic(0.5)` is exactly 0.5.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Frame-rate independent blend factor for exponential approach to a target.
///
/// `decay` is the per-frame survival fraction at a 60 Hz reference rate;
/// raising it to `dt * 60` keeps the real-world convergence rate constant
/// whatever the actual frame rate is. Result is in \[0, 1).
#[inline]
pub fn smoothing_factor(decay: f32, dt_sec: f32) -> f32 {
    1.0 - decay.powf(dt_sec * 60.0)
}

/// One-dimensional damped oscillator state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState {
    pub displacement: f32,
    pub velocity: f32,
}

impl SpringState {
    #[inline]
    pub fn reset(&mut self) {
        self.displacement = 0.0;
        self.velocity = 0.0;
    }

    #[inline]
    pub fn at_rest(&self, epsilon: f32) -> bool {
        self.displacement.abs() < epsilon && self.velocity.abs() < epsilon
    }
}

/// Semi-implicit Euler step of `a = -stiffness*x - damping*v`.
///
/// Velocity is advanced before displacement; this keeps the integration
/// stable at the clamped frame deltas used by the controllers.
#[inline]
pub fn integrate_spring(state: &mut SpringState, stiffness: f32, damping: f32, dt_sec: f32) {
    let accel = -stiffness * state.displacement - damping * state.velocity;
    state.velocity += accel * dt_sec;
    state.displacement += state.velocity * dt_sec;
}
