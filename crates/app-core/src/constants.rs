/// Choreography and interaction tuning constants.
///
/// These constants express intended behavior (time constants, clamp
/// limits) and keep magic numbers out of the code, improving readability.
// Frame delta clamp; a backgrounded tab can report arbitrarily large deltas
pub const MAX_FRAME_DT_SEC: f32 = 0.05;

// Pointer drag -> spin impulse scaling (radians per pixel of drag delta)
pub const DRAG_SENSITIVITY: f32 = 0.002;

// Per-unit-time decay bases, applied as base^(dt*60) so behavior is
// frame-rate independent
pub const SPIN_FRICTION: f32 = 0.935;
pub const SPIN_RESET_DECAY: f32 = 0.88;
pub const SPIN_EPSILON: f32 = 1e-4;

// Idle time before the spin offset is walked back to zero
pub const SPIN_IDLE_RESET_SEC: f64 = 1.0;

// Pointer-follow tilt ranges (radians) and parallax offset range
pub const TILT_RANGE_X: f32 = 0.22;
pub const TILT_RANGE_Y: f32 = 0.35;
pub const PARALLAX_RANGE: f32 = 0.08;

// Smoothing decay bases for blending actual transforms toward targets
pub const ROTATION_SMOOTHING: f32 = 0.92;
pub const POSITION_SMOOTHING: f32 = 0.94;
pub const AUTO_SPIN_RELAX: f32 = 0.95;

// Idle auto-spin angular speed (radians per second)
pub const AUTO_SPIN_SPEED: f32 = 0.5;

// Bounce spring (one-sided scale pop)
pub const BOUNCE_STIFFNESS: f32 = 40.0;
pub const BOUNCE_DAMPING: f32 = 6.0;
pub const BOUNCE_IMPULSE: f32 = 1.4;
pub const BOUNCE_SCALE_BOOST: f32 = 0.18;
pub const BOUNCE_LIFT: f32 = 0.05;

// Hero easter egg timing
pub const TRIPLE_CLICK_WINDOW_SEC: f64 = 0.8;
pub const EGG_OVERLAY_SEC: f64 = 1.5;

// Camera choreography
pub const INTRO_DURATION_SEC: f32 = 1.6;
pub const TWEEN_DURATION_SEC: f32 = 1.2;
pub const PRESET_FOV_DEG: f32 = 50.0;

// Projects inactivity return-to-default; the two observed variants
pub const IDLE_RETURN_DESKTOP_SEC: f64 = 15.0;
pub const IDLE_RETURN_COMPACT_SEC: f64 = 6.0;

// Scene normalization
pub const SCENE_TARGET_SIZE: f32 = 2.0;
pub const MAX_ANISOTROPY: u8 = 8;
pub const GRASS_ALPHA_CUTOFF: f32 = 0.5;

// Free-orbit (debug) controls
pub const ORBIT_DAMPING: f32 = 0.9;
pub const ORBIT_SENSITIVITY: f32 = 0.005;
pub const ORBIT_ZOOM_SPEED: f32 = 0.1;
pub const ORBIT_PAN_SPEED: f32 = 0.002;
pub const ORBIT_MIN_DISTANCE: f32 = 0.3;
pub const ORBIT_MAX_DISTANCE: f32 = 12.0;
pub const ORBIT_MAX_PITCH: f32 = 1.45;

// Camera projection clip planes shared by both shells
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
