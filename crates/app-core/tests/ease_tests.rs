// Host-side tests for the pure easing and integration helpers.

use app_core::ease::{ease_in_out_cubic, integrate_spring, smoothing_factor, SpringState};
use app_core::constants::{BOUNCE_DAMPING, BOUNCE_IMPULSE, BOUNCE_STIFFNESS};

#[test]
fn ease_hits_endpoints_and_midpoint_exactly() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn ease_clamps_out_of_range_input() {
    assert_eq!(ease_in_out_cubic(-2.0), 0.0);
    assert_eq!(ease_in_out_cubic(3.0), 1.0);
}

#[test]
fn ease_is_monotonic() {
    let mut prev = ease_in_out_cubic(0.0);
    for i in 1..=100 {
        let t = i as f32 / 100.0;
        let v = ease_in_out_cubic(t);
        assert!(v >= prev, "ease decreased at t={t}");
        prev = v;
    }
}

#[test]
fn smoothing_factor_is_bounded_and_nondecreasing_in_dt() {
    for decay in [0.5_f32, 0.88, 0.935, 0.99] {
        let mut prev = smoothing_factor(decay, 0.0);
        assert_eq!(prev, 0.0, "zero dt must produce a zero blend factor");
        for dt in [0.004_f32, 0.016, 0.033, 0.1, 0.5, 2.0] {
            let f = smoothing_factor(decay, dt);
            assert!(
                (0.0..1.0).contains(&f),
                "factor {f} out of [0,1) for decay={decay} dt={dt}"
            );
            assert!(f >= prev, "factor not nondecreasing at decay={decay} dt={dt}");
            prev = f;
        }
    }
}

#[test]
fn smoothing_factor_converges_at_the_same_rate_regardless_of_frame_rate() {
    // one second of blending at 30 Hz and at 120 Hz should land in the same
    // place when applied multiplicatively
    let decay = 0.92_f32;
    let mut survived_30 = 1.0_f32;
    for _ in 0..30 {
        survived_30 *= 1.0 - smoothing_factor(decay, 1.0 / 30.0);
    }
    let mut survived_120 = 1.0_f32;
    for _ in 0..120 {
        survived_120 *= 1.0 - smoothing_factor(decay, 1.0 / 120.0);
    }
    assert!(
        (survived_30 - survived_120).abs() < 1e-3,
        "30Hz {survived_30} vs 120Hz {survived_120}"
    );
}

#[test]
fn spring_impulse_rings_then_settles_within_three_seconds() {
    let mut spring = SpringState::default();
    spring.velocity += BOUNCE_IMPULSE;

    let dt = 1.0 / 120.0;
    let mut peak = 0.0_f32;
    let steps = (3.0 / dt) as usize;
    for _ in 0..steps {
        integrate_spring(&mut spring, BOUNCE_STIFFNESS, BOUNCE_DAMPING, dt);
        peak = peak.max(spring.displacement.abs());
    }
    assert!(peak > 0.05, "impulse should displace the spring, peak={peak}");
    assert!(
        spring.at_rest(5e-3),
        "spring not settled after 3s: d={} v={}",
        spring.displacement,
        spring.velocity
    );
}

#[test]
fn spring_reset_zeroes_state() {
    let mut spring = SpringState {
        displacement: 0.4,
        velocity: -1.2,
    };
    spring.reset();
    assert_eq!(spring, SpringState::default());
}
