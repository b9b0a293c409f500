//! Camera pose choreography: the intro fly-in, one-shot tweened moves to
//! preset poses, and an optional free-orbit mode for debugging.
//!
//! Transitions are explicit state machines advanced by `tick`, never
//! self-scheduling callbacks, so they can be driven by tests as easily as by
//! a render loop. Only one writer of the camera pose exists at a time: the
//! orbit controls are consulted only while no move is running.

use std::time::Duration;

use glam::{Mat4, Vec3};

use crate::constants::{
    CAMERA_ZFAR, CAMERA_ZNEAR, MAX_FRAME_DT_SEC, ORBIT_DAMPING, ORBIT_MAX_DISTANCE,
    ORBIT_MAX_PITCH, ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED, ORBIT_SENSITIVITY, ORBIT_ZOOM_SPEED,
};
use crate::ease::ease_in_out_cubic;

/// A camera's full framing state at an instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_deg: f32,
}

impl Pose {
    pub const fn new(position: Vec3, target: Vec3, fov_deg: f32) -> Self {
        Self {
            position,
            target,
            fov_deg,
        }
    }

    /// Linear blend of position, look-at target and field of view.
    pub fn lerp(from: &Pose, to: &Pose, k: f32) -> Pose {
        Pose {
            position: from.position.lerp(to.position, k),
            target: from.target.lerp(to.target, k),
            fov_deg: from.fov_deg + (to.fov_deg - from.fov_deg) * k,
        }
    }
}

/// Right-handed perspective camera derived from a pose.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn from_pose(pose: &Pose, aspect: f32) -> Self {
        Self {
            eye: pose.position,
            target: pose.target,
            up: Vec3::Y,
            aspect,
            fovy_radians: pose.fov_deg.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// One-shot request for a tweened camera transition.
///
/// `trigger` is monotonically increasing for the lifetime of a view; a
/// transition re-runs exactly when the counter changes, even if the
/// destination is numerically identical to the previous one.
#[derive(Clone, Copy, Debug)]
pub struct PendingMove {
    pub pose: Pose,
    pub trigger: u32,
}

#[derive(Clone, Copy, Debug)]
enum MoveState {
    Idle,
    Running {
        start_sec: f64,
        duration_sec: f32,
        from: Pose,
        to: Pose,
    },
    Done,
}

/// Drag-to-rotate/zoom controls with damped inertia, normally disabled.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
    yaw_vel: f32,
    pitch_vel: f32,
    zoom_vel: f32,
}

impl OrbitControls {
    /// Derive orbit angles from an existing pose so enabling the controls
    /// does not jump the camera.
    pub fn from_pose(pose: &Pose) -> Self {
        let offset = pose.position - pose.target;
        let distance = offset.length().max(ORBIT_MIN_DISTANCE);
        Self {
            target: pose.target,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            yaw_vel: 0.0,
            pitch_vel: 0.0,
            zoom_vel: 0.0,
        }
    }

    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.yaw_vel -= dx * ORBIT_SENSITIVITY;
        self.pitch_vel -= dy * ORBIT_SENSITIVITY;
    }

    pub fn apply_zoom(&mut self, delta: f32) {
        self.zoom_vel += delta * ORBIT_ZOOM_SPEED;
    }

    /// Shifts the orbit target in the view plane.
    pub fn apply_pan(&mut self, dx: f32, dy: f32) {
        let right = Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
        self.target += right * (-dx * ORBIT_PAN_SPEED * self.distance)
            + Vec3::Y * (dy * ORBIT_PAN_SPEED * self.distance);
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    fn tick(&mut self, dt_sec: f32, fov_deg: f32) -> Pose {
        self.yaw += self.yaw_vel;
        self.pitch = (self.pitch + self.pitch_vel).clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH);
        self.distance =
            (self.distance * (1.0 + self.zoom_vel)).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);

        let decay = ORBIT_DAMPING.powf(dt_sec * 60.0);
        self.yaw_vel *= decay;
        self.pitch_vel *= decay;
        self.zoom_vel *= decay;

        let position = self.target
            + Vec3::new(
                self.distance * self.pitch.cos() * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos() * self.yaw.cos(),
            );
        Pose {
            position,
            target: self.target,
            fov_deg,
        }
    }
}

/// Owns the camera pose and sequences every way it can move.
pub struct CameraRig {
    pose: Pose,
    state: MoveState,
    last_trigger: Option<u32>,
    orbit: Option<OrbitControls>,
}

impl CameraRig {
    pub fn new(initial: Pose) -> Self {
        Self {
            pose: initial,
            state: MoveState::Idle,
            last_trigger: None,
            orbit: None,
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        matches!(self.state, MoveState::Running { .. })
    }

    /// Mount-time fly-in: snap to `from`, then ease toward `to`.
    pub fn begin_intro(&mut self, from: Pose, to: Pose, duration_sec: f32, now_sec: f64) {
        self.pose = from;
        self.state = MoveState::Running {
            start_sec: now_sec,
            duration_sec,
            from,
            to,
        };
    }

    /// Arms a tweened move unless the pending trigger was already consumed.
    ///
    /// The interpolation start captures the current position and an
    /// estimated current look-at point, projected along the present forward
    /// direction at the distance to the destination target, so the gaze
    /// swings smoothly even when the previous move was interrupted.
    pub fn request_move(&mut self, pending: &PendingMove, duration_sec: f32, now_sec: f64) {
        if self.last_trigger == Some(pending.trigger) {
            return;
        }
        self.last_trigger = Some(pending.trigger);
        let from = self.capture_start(&pending.pose);
        self.state = MoveState::Running {
            start_sec: now_sec,
            duration_sec,
            from,
            to: pending.pose,
        };
    }

    fn capture_start(&self, dest: &Pose) -> Pose {
        let forward = (self.pose.target - self.pose.position).normalize_or_zero();
        let target = if forward == Vec3::ZERO {
            self.pose.target
        } else {
            let dist = (dest.target - self.pose.position).length();
            self.pose.position + forward * dist
        };
        Pose {
            position: self.pose.position,
            target,
            fov_deg: self.pose.fov_deg,
        }
    }

    /// Drops any in-flight transition; the pose stays wherever it reached.
    pub fn cancel(&mut self) {
        self.state = MoveState::Idle;
    }

    /// Attach free-orbit controls seeded from the current pose.
    pub fn attach_orbit(&mut self) -> &mut OrbitControls {
        let controls = OrbitControls::from_pose(&self.pose);
        self.orbit.insert(controls)
    }

    /// Detaches and returns the orbit controls, if any were attached.
    pub fn detach_orbit(&mut self) -> Option<OrbitControls> {
        self.orbit.take()
    }

    #[inline]
    pub fn orbit_mut(&mut self) -> Option<&mut OrbitControls> {
        self.orbit.as_mut()
    }

    /// Advances one frame and returns the pose for this instant.
    pub fn tick(&mut self, dt: Duration, now_sec: f64) -> Pose {
        match self.state {
            MoveState::Running {
                start_sec,
                duration_sec,
                from,
                to,
            } => {
                let t = if duration_sec > 0.0 {
                    (((now_sec - start_sec) as f32) / duration_sec).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                self.pose = Pose::lerp(&from, &to, ease_in_out_cubic(t));
                if t >= 1.0 {
                    self.pose = to;
                    self.state = MoveState::Done;
                }
            }
            MoveState::Idle | MoveState::Done => {
                // orbit only writes the pose while no move is in flight
                if let Some(orbit) = self.orbit.as_mut() {
                    let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);
                    self.pose = orbit.tick(dt_sec, self.pose.fov_deg);
                }
            }
        }
        self.pose
    }
}
