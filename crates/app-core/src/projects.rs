//! Projects view orchestration: the intro fly-in, per-item preset moves and
//! the inactivity-driven return to the resting pose.

use std::time::Duration;

use crate::camera::{CameraRig, PendingMove, Pose};
use crate::constants::{
    IDLE_RETURN_COMPACT_SEC, IDLE_RETURN_DESKTOP_SEC, INTRO_DURATION_SEC, TWEEN_DURATION_SEC,
};
use crate::presets::{self, DeviceClass};

/// Mobile menu presentation; both observed variants are supported, chosen
/// by configuration rather than hardcoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuStyle {
    Sidebar,
    Carousel,
}

#[derive(Clone, Copy, Debug)]
pub struct ProjectsConfig {
    /// Seconds without a selection before the camera returns home.
    pub idle_return_sec: f64,
    pub menu_style: MenuStyle,
}

impl ProjectsConfig {
    pub fn for_device(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Desktop => Self {
                idle_return_sec: IDLE_RETURN_DESKTOP_SEC,
                menu_style: MenuStyle::Sidebar,
            },
            DeviceClass::Mobile => Self {
                idle_return_sec: IDLE_RETURN_COMPACT_SEC,
                menu_style: MenuStyle::Carousel,
            },
        }
    }
}

pub struct ProjectsView {
    rig: CameraRig,
    device: DeviceClass,
    config: ProjectsConfig,
    pending: PendingMove,
    idle_armed_at: Option<f64>,
    selected: Option<usize>,
}

impl ProjectsView {
    /// Construction starts the intro fly-in immediately.
    pub fn new(device: DeviceClass, config: ProjectsConfig, now_sec: f64) -> Self {
        let (from, to) = presets::intro_moves(device);
        let mut rig = CameraRig::new(from);
        rig.begin_intro(from, to, INTRO_DURATION_SEC, now_sec);
        Self {
            rig,
            device,
            config,
            pending: PendingMove {
                pose: to,
                trigger: 0,
            },
            idle_armed_at: None,
            selected: None,
        }
    }

    #[inline]
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    #[inline]
    pub fn config(&self) -> &ProjectsConfig {
        &self.config
    }

    #[inline]
    pub fn pending(&self) -> &PendingMove {
        &self.pending
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.rig.pose()
    }

    #[inline]
    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// Flies the camera to a menu item's preset pose and arms the
    /// inactivity timer. Re-selecting the same item restarts the move (the
    /// trigger counter increments even for an identical destination).
    pub fn select(&mut self, index: usize, now_sec: f64) -> bool {
        let Some(pose) = presets::preset(self.device, index) else {
            return false;
        };
        self.pending = PendingMove {
            pose,
            trigger: self.pending.trigger + 1,
        };
        self.rig.request_move(&self.pending, TWEEN_DURATION_SEC, now_sec);
        self.selected = Some(index);
        self.idle_armed_at = Some(now_sec);
        log::info!("[projects] select {}", index);
        true
    }

    /// Swaps the preset/default tables; any armed timer keeps running and
    /// will return to the new class's home pose.
    pub fn set_device(&mut self, device: DeviceClass) {
        self.device = device;
    }

    /// Advances one frame. Fires at most one return-home move per armed
    /// timer, then disarms it.
    pub fn tick(&mut self, dt: Duration, now_sec: f64) -> Pose {
        if let Some(armed_at) = self.idle_armed_at {
            if now_sec - armed_at >= self.config.idle_return_sec {
                self.idle_armed_at = None;
                self.selected = None;
                self.pending = PendingMove {
                    pose: presets::home_pose(self.device),
                    trigger: self.pending.trigger + 1,
                };
                self.rig.request_move(&self.pending, TWEEN_DURATION_SEC, now_sec);
                log::info!("[projects] idle return home");
            }
        }
        self.rig.tick(dt, now_sec)
    }

    /// Resume after a backgrounded tab: re-stamp the armed timer so the
    /// return-home move does not fire the instant the tab is foregrounded.
    pub fn resume(&mut self, now_sec: f64) {
        if self.idle_armed_at.is_some() {
            self.idle_armed_at = Some(now_sec);
        }
    }

    /// Unmount: drop any in-flight transition.
    pub fn cancel(&mut self) {
        self.rig.cancel();
    }
}
