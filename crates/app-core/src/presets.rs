//! Static camera pose tables for the projects fly-through.
//!
//! This is configuration, not computed data: one destination pose per menu
//! item per device class, plus the intro fly-in endpoints. Field of view is
//! constant across the tables.

use glam::Vec3;

use crate::camera::Pose;
use crate::constants::PRESET_FOV_DEG;

/// Presentation variant selected from viewport size / pointer coarseness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

pub const PRESET_COUNT: usize = 8;

const fn pose(px: f32, py: f32, pz: f32, tx: f32, ty: f32, tz: f32) -> Pose {
    Pose::new(
        Vec3::new(px, py, pz),
        Vec3::new(tx, ty, tz),
        PRESET_FOV_DEG,
    )
}

/// Where the intro fly-in starts, shared by both device classes.
pub const INTRO_START: Pose = pose(-2.9, 1.01, 3.5, -0.1, 0.25, -0.4);

/// Default resting pose after the intro, desktop framing.
pub const DESKTOP_HOME: Pose = pose(-0.90, 0.35, 1.01, -0.1, 0.25, -0.4);

/// Default resting pose after the intro, mobile framing (pulled back so the
/// whole diorama fits a portrait viewport).
pub const MOBILE_HOME: Pose = pose(-1.18, 0.52, 1.43, -0.05, 0.28, -0.45);

static DESKTOP_PRESETS: [Pose; PRESET_COUNT] = [
    pose(-0.21, 0.12, 0.51, -0.35, 0.10, -0.22),
    pose(0.34, 0.18, 0.62, 0.12, 0.14, -0.18),
    pose(-0.58, 0.27, 0.44, -0.72, 0.20, -0.31),
    pose(0.11, 0.42, 0.38, 0.02, 0.30, -0.40),
    pose(-0.87, 0.15, 0.69, -0.64, 0.11, -0.08),
    pose(0.52, 0.09, 0.47, 0.38, 0.07, -0.26),
    pose(-0.33, 0.56, 0.58, -0.28, 0.38, -0.35),
    pose(0.04, 0.21, 0.83, -0.06, 0.18, -0.12),
];

static MOBILE_PRESETS: [Pose; PRESET_COUNT] = [
    pose(-0.27, 0.16, 0.74, -0.35, 0.10, -0.22),
    pose(0.41, 0.23, 0.88, 0.12, 0.14, -0.18),
    pose(-0.69, 0.33, 0.66, -0.72, 0.20, -0.31),
    pose(0.15, 0.51, 0.59, 0.02, 0.30, -0.40),
    pose(-1.02, 0.20, 0.95, -0.64, 0.11, -0.08),
    pose(0.63, 0.13, 0.70, 0.38, 0.07, -0.26),
    pose(-0.42, 0.67, 0.81, -0.28, 0.38, -0.35),
    pose(0.08, 0.27, 1.09, -0.06, 0.18, -0.12),
];

/// Destination pose for a menu item, or `None` past the table.
pub fn preset(device: DeviceClass, index: usize) -> Option<Pose> {
    let table = match device {
        DeviceClass::Desktop => &DESKTOP_PRESETS,
        DeviceClass::Mobile => &MOBILE_PRESETS,
    };
    table.get(index).copied()
}

pub fn home_pose(device: DeviceClass) -> Pose {
    match device {
        DeviceClass::Desktop => DESKTOP_HOME,
        DeviceClass::Mobile => MOBILE_HOME,
    }
}

/// Intro fly-in endpoints for a device class.
pub fn intro_moves(device: DeviceClass) -> (Pose, Pose) {
    (INTRO_START, home_pose(device))
}
