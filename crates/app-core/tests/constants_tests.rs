// Host-side tests for tuning constants and their mathematical relationships.

use app_core::constants::*;
use app_core::presets::{self, DeviceClass, PRESET_COUNT};

#[test]
#[allow(clippy::assertions_on_constants)]
fn decay_bases_are_strict_fractions() {
    assert!(SPIN_FRICTION > 0.0 && SPIN_FRICTION < 1.0);
    assert!(SPIN_RESET_DECAY > 0.0 && SPIN_RESET_DECAY < 1.0);
    assert!(ROTATION_SMOOTHING > 0.0 && ROTATION_SMOOTHING < 1.0);
    assert!(POSITION_SMOOTHING > 0.0 && POSITION_SMOOTHING < 1.0);
    assert!(AUTO_SPIN_RELAX > 0.0 && AUTO_SPIN_RELAX < 1.0);
    assert!(ORBIT_DAMPING > 0.0 && ORBIT_DAMPING < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_are_positive_and_ordered() {
    assert!(MAX_FRAME_DT_SEC > 0.0);
    assert!(SPIN_IDLE_RESET_SEC > 0.0);
    assert!(TRIPLE_CLICK_WINDOW_SEC > 0.0);
    assert!(EGG_OVERLAY_SEC > TRIPLE_CLICK_WINDOW_SEC);
    assert!(INTRO_DURATION_SEC > 0.0);
    assert!(TWEEN_DURATION_SEC > 0.0);

    // the desktop variant lingers longer than the compact one
    assert!(IDLE_RETURN_DESKTOP_SEC > IDLE_RETURN_COMPACT_SEC);
    assert!(IDLE_RETURN_COMPACT_SEC > TWEEN_DURATION_SEC as f64);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn spring_and_scale_parameters_are_physical() {
    assert!(BOUNCE_STIFFNESS > 0.0);
    assert!(BOUNCE_DAMPING > 0.0);
    assert!(BOUNCE_IMPULSE > 0.0);
    assert!(BOUNCE_SCALE_BOOST > 0.0);
    assert!(BOUNCE_LIFT > 0.0);
    assert!(SCENE_TARGET_SIZE > 0.0);
    assert!(MAX_ANISOTROPY >= 1);
    assert!(GRASS_ALPHA_CUTOFF > 0.0 && GRASS_ALPHA_CUTOFF < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn orbit_limits_are_consistent() {
    assert!(ORBIT_MIN_DISTANCE > 0.0);
    assert!(ORBIT_MAX_DISTANCE > ORBIT_MIN_DISTANCE);
    assert!(ORBIT_MAX_PITCH > 0.0 && ORBIT_MAX_PITCH < std::f32::consts::FRAC_PI_2);
    assert!(CAMERA_ZFAR > CAMERA_ZNEAR);
    assert!(CAMERA_ZNEAR > 0.0);
}

#[test]
fn preset_tables_are_complete_with_constant_fov() {
    for device in [DeviceClass::Desktop, DeviceClass::Mobile] {
        for index in 0..PRESET_COUNT {
            let pose = presets::preset(device, index)
                .unwrap_or_else(|| panic!("missing preset {index} for {device:?}"));
            assert_eq!(pose.fov_deg, PRESET_FOV_DEG);
        }
        assert!(presets::preset(device, PRESET_COUNT).is_none());
        assert_eq!(presets::home_pose(device).fov_deg, PRESET_FOV_DEG);
    }
}

#[test]
fn device_classes_use_distinct_preset_tables() {
    for index in 0..PRESET_COUNT {
        let desktop = presets::preset(DeviceClass::Desktop, index).unwrap();
        let mobile = presets::preset(DeviceClass::Mobile, index).unwrap();
        assert_ne!(
            desktop.position, mobile.position,
            "preset {index} should differ per device class"
        );
    }
    assert_ne!(
        presets::home_pose(DeviceClass::Desktop).position,
        presets::home_pose(DeviceClass::Mobile).position
    );
}
