// Host-side tests for the projects view: intro fly-in, preset selection and
// the inactivity return-to-home move.

use std::time::Duration;

use app_core::camera::Pose;
use app_core::presets::{self, DeviceClass, PRESET_COUNT};
use app_core::projects::{MenuStyle, ProjectsConfig, ProjectsView};
use glam::Vec3;

const FRAME: Duration = Duration::from_millis(16);

fn make_desktop() -> ProjectsView {
    ProjectsView::new(
        DeviceClass::Desktop,
        ProjectsConfig::for_device(DeviceClass::Desktop),
        0.0,
    )
}

fn assert_pose_close(a: Pose, b: Pose, what: &str) {
    assert!(
        (a.position - b.position).length() < 1e-5,
        "{what}: {:?} vs {:?}",
        a.position,
        b.position
    );
}

#[test]
fn intro_runs_from_fixed_start_to_the_device_home() {
    let mut view = make_desktop();
    let at_start = view.tick(FRAME, 0.0);
    assert_eq!(at_start.position, presets::INTRO_START.position);

    let at_end = view.tick(FRAME, 1.6);
    assert_pose_close(at_end, presets::DESKTOP_HOME, "intro end");
}

#[test]
fn selecting_item_zero_targets_the_documented_preset() {
    let mut view = make_desktop();
    view.tick(FRAME, 1.6);

    assert!(view.select(0, 2.0));
    let pending = view.pending();
    assert!(
        (pending.pose.position - Vec3::new(-0.21, 0.12, 0.51)).length() < 1e-6,
        "unexpected preset-0 destination {:?}",
        pending.pose.position
    );
    assert_eq!(pending.trigger, 1);
}

#[test]
fn reselecting_the_same_item_bumps_the_trigger_again() {
    let mut view = make_desktop();
    view.tick(FRAME, 1.6);

    view.select(3, 2.0);
    assert_eq!(view.pending().trigger, 1);
    view.select(3, 2.5);
    assert_eq!(view.pending().trigger, 2);
    assert_eq!(view.selected(), Some(3));
}

#[test]
fn out_of_range_selection_is_rejected() {
    let mut view = make_desktop();
    assert!(!view.select(PRESET_COUNT, 2.0));
    assert_eq!(view.pending().trigger, 0);
    assert_eq!(view.selected(), None);
}

#[test]
fn idle_timeout_issues_exactly_one_return_home_move() {
    let mut view = make_desktop();
    view.tick(FRAME, 1.6);
    view.select(2, 2.0);
    assert_eq!(view.pending().trigger, 1);

    // just before the 15s window: nothing fires
    view.tick(FRAME, 16.99);
    assert_eq!(view.pending().trigger, 1);

    // at the window: one return-home move
    view.tick(FRAME, 17.0);
    assert_eq!(view.pending().trigger, 2);
    assert_pose_close(
        view.pending().pose,
        presets::DESKTOP_HOME,
        "return-home destination",
    );
    assert_eq!(view.selected(), None);

    // and never a second one
    view.tick(FRAME, 40.0);
    view.tick(FRAME, 120.0);
    assert_eq!(view.pending().trigger, 2);
}

#[test]
fn compact_variant_uses_the_shorter_idle_window() {
    let config = ProjectsConfig::for_device(DeviceClass::Mobile);
    assert_eq!(config.menu_style, MenuStyle::Carousel);

    let mut view = ProjectsView::new(DeviceClass::Mobile, config, 0.0);
    view.tick(FRAME, 1.6);
    view.select(1, 2.0);

    view.tick(FRAME, 7.9);
    assert_eq!(view.pending().trigger, 1);
    view.tick(FRAME, 8.0);
    assert_eq!(view.pending().trigger, 2);
    assert_pose_close(view.pending().pose, presets::MOBILE_HOME, "mobile home");
}

#[test]
fn device_switch_returns_to_the_new_class_home() {
    let mut view = make_desktop();
    view.tick(FRAME, 1.6);
    view.select(0, 2.0);

    view.set_device(DeviceClass::Mobile);
    view.tick(FRAME, 17.0);
    assert_pose_close(view.pending().pose, presets::MOBILE_HOME, "post-switch home");
}

#[test]
fn resume_restamps_the_armed_idle_timer() {
    let mut view = make_desktop();
    view.tick(FRAME, 1.6);
    view.select(0, 2.0);

    // tab hidden from 3s to 30s; on resume the timer restarts instead of
    // firing immediately
    view.resume(30.0);
    view.tick(FRAME, 30.1);
    assert_eq!(view.pending().trigger, 1);
    view.tick(FRAME, 45.1);
    assert_eq!(view.pending().trigger, 2);
}

#[test]
fn each_selection_restarts_the_idle_window() {
    let mut view = make_desktop();
    view.tick(FRAME, 1.6);
    view.select(0, 2.0);
    view.tick(FRAME, 10.0);
    view.select(1, 12.0);

    // 15s after the *second* selection, not the first
    view.tick(FRAME, 17.5);
    assert_eq!(view.pending().trigger, 2);
    view.tick(FRAME, 27.0);
    assert_eq!(view.pending().trigger, 3);
}
