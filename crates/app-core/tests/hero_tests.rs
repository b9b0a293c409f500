// Host-side tests for the hero view: click-driven bounces and the
// triple-click easter egg.

use std::time::Duration;

use app_core::hero::HeroView;
use app_core::presets::DeviceClass;

const FRAME: Duration = Duration::from_millis(16);

fn make_hero() -> HeroView {
    HeroView::new(DeviceClass::Desktop, 1280.0, 720.0, 0.0)
}

#[test]
fn triple_click_within_window_fires_exactly_once() {
    let mut hero = make_hero();
    assert!(!hero.click(0.0));
    assert!(!hero.click(0.3));
    assert!(hero.click(0.6), "third click inside 800ms should fire the egg");

    // buffer cleared: a 4th click inside the original window is just click #1
    // again, and the overlay is still visible anyway
    assert!(!hero.click(0.7));
    assert!(!hero.click(0.8));
    assert!(!hero.click(0.9));
}

#[test]
fn spaced_clicks_never_fire() {
    let mut hero = make_hero();
    assert!(!hero.click(0.0));
    assert!(!hero.click(1.0));
    assert!(!hero.click(2.0));
    assert!(!hero.click(3.0));
}

#[test]
fn egg_can_fire_again_after_the_overlay_expires() {
    let mut hero = make_hero();
    hero.click(0.0);
    hero.click(0.2);
    assert!(hero.click(0.4));

    // overlay visible until 1.9; a fresh burst after that fires again
    assert!(!hero.click(1.0));
    assert!(!hero.click(3.0));
    assert!(!hero.click(3.2));
    assert!(hero.click(3.4));
}

#[test]
fn overlay_visibility_follows_the_timed_window() {
    let mut hero = make_hero();
    hero.tick(FRAME, 0.016);
    hero.click(0.1);
    hero.click(0.3);
    assert!(hero.click(0.5));

    assert!(hero.tick(FRAME, 1.0).egg_visible);
    assert!(hero.tick(FRAME, 1.9).egg_visible);
    assert!(!hero.tick(FRAME, 2.1).egg_visible);
}

#[test]
fn every_click_arms_a_bounce_pop() {
    let mut hero = make_hero();
    hero.tick(FRAME, 0.016); // mount: records the trigger baseline
    assert_eq!(hero.bounce_trigger(), 0);

    hero.click(0.1);
    assert_eq!(hero.bounce_trigger(), 1);

    let mut popped = false;
    let mut now = 0.116;
    for _ in 0..30 {
        let frame = hero.tick(FRAME, now);
        popped |= frame.orientation.scale > 1.0;
        now += FRAME.as_secs_f64();
    }
    assert!(popped, "click should produce a visible scale pop");
}

#[test]
fn device_class_selects_the_rotation_driver() {
    let mut hero = make_hero();
    assert!(!hero.orientation().auto_spin());

    hero.set_device(DeviceClass::Mobile);
    assert!(hero.orientation().auto_spin());

    hero.set_device(DeviceClass::Desktop);
    assert!(!hero.orientation().auto_spin());
}

#[test]
fn resume_quells_spin_and_bounce() {
    let mut hero = make_hero();
    hero.tick(FRAME, 0.016);
    hero.pointer.pointer_down(100.0, 100.0);
    hero.pointer.pointer_move(180.0, 150.0);
    hero.pointer.pointer_up();
    hero.click(0.1);
    hero.tick(FRAME, 0.116);

    hero.resume(60.0);
    let frame = hero.tick(FRAME, 60.016);
    assert!(
        (frame.orientation.scale - 1.0).abs() < 1e-3,
        "no catch-up pop after resume"
    );
}

#[test]
fn egg_visibility_check_in_overlay_window_with_clicks() {
    // 4th click within 800ms of the 3rd does not re-arm while visible
    let mut hero = make_hero();
    hero.click(0.0);
    hero.click(0.2);
    assert!(hero.click(0.4)); // visible until 1.9
    assert!(!hero.click(1.0));
    assert!(!hero.click(1.2));
    assert!(!hero.click(1.4));
    assert!(!hero.click(1.6));
}
