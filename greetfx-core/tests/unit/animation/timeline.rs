use super::*;
use crate::animation::ease::Ease;
use crate::expression::eval::FrameEnv;

const EPS: f64 = 1e-9;

fn env() -> FrameEnv {
    FrameEnv::new(1920.0, 1080.0, 300.0, 80.0)
}

fn at(e: &Expr, t: f64) -> f64 {
    e.eval(&env().at(t)).unwrap()
}

fn fade_in_out() -> Animation {
    Animation::new(
        Some(PhaseSpec::new(PhaseKind::Fade, 1.0)),
        2.0,
        Some(PhaseSpec::new(PhaseKind::Fade, 1.0)),
    )
}

#[test]
fn boundaries_are_sequential() {
    let anim = Animation::new(
        Some(PhaseSpec::new(PhaseKind::Fade, 1.5)),
        2.0,
        Some(PhaseSpec::new(PhaseKind::Fade, 0.5)),
    );
    let tl = Timeline::new(3.0, 10.0, Some(&anim));
    assert_eq!(tl.in_end, 4.5);
    assert_eq!(tl.hold_end, 6.5);
    assert_eq!(tl.out_end, 7.0);
    assert_eq!(tl.clamped_end, 7.0);
}

#[test]
fn long_hold_is_clamped_to_declared_end() {
    let anim = Animation::new(
        Some(PhaseSpec::new(PhaseKind::Fade, 1.0)),
        20.0,
        Some(PhaseSpec::new(PhaseKind::Fade, 1.0)),
    );
    let tl = Timeline::new(2.0, 10.0, Some(&anim));
    assert_eq!(tl.hold_end, 23.0);
    assert_eq!(tl.out_end, 24.0);
    assert_eq!(tl.clamped_end, 10.0);
}

#[test]
fn no_animation_uses_declared_window_and_rest() {
    let m = compute_motion(
        1.0,
        3.0,
        None,
        OverlayKind::Text,
        None,
        Some(Expr::num(50.0)),
    );
    assert_eq!(m.enable.to_string(), "between(t,1,3)");
    assert_eq!(m.x.to_string(), "(w-text_w)/2");
    assert_eq!(m.y, Expr::num(50.0));
    assert!(m.alpha.is_none());
}

#[test]
fn enable_is_false_outside_window() {
    let m = compute_motion(
        1.0,
        5.0,
        Some(&fade_in_out()),
        OverlayKind::Text,
        None,
        None,
    );
    for t in [0.0, 0.99, 4.01, 6.0] {
        assert_eq!(at(&m.enable, t), 0.0, "t={t}");
    }
    for t in [1.0, 2.5, 4.0] {
        assert_eq!(at(&m.enable, t), 1.0, "t={t}");
    }
}

#[test]
fn fade_scenario_linear() {
    let m = compute_motion(
        0.0,
        4.0,
        Some(&fade_in_out()),
        OverlayKind::Text,
        None,
        None,
    );
    let alpha = m.alpha.expect("fade requested");
    assert!((at(&alpha, 0.5) - 0.5).abs() < EPS);
    assert_eq!(at(&alpha, 2.0), 1.0);
    assert!((at(&alpha, 3.5) - 0.5).abs() < EPS);
    assert_eq!(at(&alpha, 0.0), 0.0);
    assert_eq!(at(&alpha, 4.0), 0.0);
    assert_eq!(at(&m.enable, 4.0), 1.0);
    assert_eq!(at(&m.enable, 4.1), 0.0);
}

#[test]
fn alpha_stays_in_unit_interval_for_every_easing() {
    for ease in Ease::ALL {
        let anim = Animation::new(
            Some(PhaseSpec::new(PhaseKind::Fade, 1.0).with_easing(ease)),
            1.0,
            Some(PhaseSpec::new(PhaseKind::Fade, 1.5).with_easing(ease)),
        );
        let m = compute_motion(0.5, 10.0, Some(&anim), OverlayKind::Image, None, None);
        let alpha = m.alpha.unwrap();
        for i in 0..=80 {
            let t = f64::from(i) * 0.05;
            let a = at(&alpha, t);
            assert!((0.0..=1.0).contains(&a), "{ease:?} t={t} alpha={a}");
        }
    }
}

#[test]
fn fade_only_on_one_side_keeps_other_side_opaque() {
    let anim = Animation::new(
        Some(PhaseSpec::new(PhaseKind::SlideUp, 1.0)),
        1.0,
        Some(PhaseSpec::new(PhaseKind::Fade, 1.0)),
    );
    let m = compute_motion(0.0, 3.0, Some(&anim), OverlayKind::Text, None, None);
    let alpha = m.alpha.unwrap();
    assert_eq!(at(&alpha, 0.0), 1.0);
    assert_eq!(at(&alpha, 0.5), 1.0);
    assert!((at(&alpha, 2.5) - 0.5).abs() < EPS);
}

#[test]
fn slide_right_scenario() {
    let anim = Animation::new(Some(PhaseSpec::new(PhaseKind::SlideRight, 1.0)), 0.0, None);
    let m = compute_motion(0.0, 1.0, Some(&anim), OverlayKind::Image, None, None);
    let centered_x = (1920.0 - 300.0) / 2.0;
    assert_eq!(at(&m.x, 0.0), -300.0);
    assert!((at(&m.x, 1.0) - centered_x).abs() < EPS);
    assert!(
        (at(&m.x, 0.5) - (-300.0 + 0.5 * (centered_x + 300.0))).abs() < EPS
    );
}

#[test]
fn slide_offsets_per_direction() {
    let cases = [
        (PhaseKind::SlideLeft, 1920.0, -300.0),
        (PhaseKind::SlideRight, -300.0, 1920.0),
    ];
    for (kind, enter_from, exit_to) in cases {
        let anim = Animation::new(
            Some(PhaseSpec::new(kind, 1.0)),
            1.0,
            Some(PhaseSpec::new(kind, 1.0)),
        );
        let m = compute_motion(
            0.0,
            3.0,
            Some(&anim),
            OverlayKind::Text,
            Some(Expr::num(100.0)),
            None,
        );
        assert_eq!(at(&m.x, 0.0), enter_from, "{kind:?}");
        assert_eq!(at(&m.x, 1.5), 100.0, "{kind:?}");
        assert_eq!(at(&m.x, 3.0), exit_to, "{kind:?}");
    }

    let cases = [
        (PhaseKind::SlideUp, 1080.0, -80.0),
        (PhaseKind::SlideDown, -80.0, 1080.0),
    ];
    for (kind, enter_from, exit_to) in cases {
        let anim = Animation::new(
            Some(PhaseSpec::new(kind, 1.0)),
            1.0,
            Some(PhaseSpec::new(kind, 1.0)),
        );
        let m = compute_motion(
            0.0,
            3.0,
            Some(&anim),
            OverlayKind::Text,
            None,
            Some(Expr::num(40.0)),
        );
        assert_eq!(at(&m.y, 0.0), enter_from, "{kind:?}");
        assert_eq!(at(&m.y, 1.5), 40.0, "{kind:?}");
        assert_eq!(at(&m.y, 3.0), exit_to, "{kind:?}");
    }
}

#[test]
fn phase_boundaries_are_continuous_for_every_easing() {
    let rest_y = 700.0;
    for ease in Ease::ALL {
        for kind in [PhaseKind::SlideUp, PhaseKind::SlideDown] {
            let anim = Animation::new(
                Some(PhaseSpec::new(kind, 0.8).with_easing(ease)),
                1.2,
                Some(PhaseSpec::new(kind, 0.6).with_easing(ease)),
            );
            let m = compute_motion(
                2.0,
                10.0,
                Some(&anim),
                OverlayKind::Text,
                None,
                Some(Expr::num(rest_y)),
            );
            let tl = Timeline::new(2.0, 10.0, Some(&anim));
            for boundary in [tl.in_end, tl.hold_end] {
                let before = at(&m.y, boundary - 1e-9);
                let on = at(&m.y, boundary);
                assert!((on - rest_y).abs() < EPS, "{ease:?} {kind:?}");
                assert!(
                    (before - rest_y).abs() < 1e-5,
                    "{ease:?} {kind:?} before={before}"
                );
            }
        }
    }
}

#[test]
fn vertical_slide_never_touches_horizontal_axis() {
    for rest_x in [
        Expr::num(0.0),
        Expr::num(123.5),
        centered(Dims::TEXT, Axis::Horizontal),
    ] {
        let still = compute_motion(
            0.0,
            4.0,
            None,
            OverlayKind::Text,
            Some(rest_x.clone()),
            None,
        );
        let anim = Animation::new(
            Some(PhaseSpec::new(PhaseKind::SlideUp, 1.0)),
            1.0,
            Some(PhaseSpec::new(PhaseKind::SlideDown, 1.0)),
        );
        let moving = compute_motion(
            0.0,
            4.0,
            Some(&anim),
            OverlayKind::Text,
            Some(rest_x.clone()),
            None,
        );
        assert_eq!(moving.x, still.x);
        assert_ne!(moving.y, still.y);
    }
}

#[test]
fn horizontal_slide_never_touches_vertical_axis() {
    let anim = Animation::new(Some(PhaseSpec::new(PhaseKind::SlideLeft, 1.0)), 1.0, None);
    let m = compute_motion(
        0.0,
        2.0,
        Some(&anim),
        OverlayKind::Image,
        None,
        Some(Expr::num(20.0)),
    );
    assert_eq!(m.y, Expr::num(20.0));
    assert!(m.alpha.is_none());
}

#[test]
fn unknown_kind_contributes_nothing() {
    let anim = Animation::new(
        Some(PhaseSpec::new(PhaseKind::parse("wobble"), 1.0)),
        1.0,
        None,
    );
    let m = compute_motion(0.0, 2.0, Some(&anim), OverlayKind::Text, None, None);
    assert_eq!(m.x.to_string(), "(w-text_w)/2");
    assert_eq!(m.y.to_string(), "(h-text_h)/2");
    assert!(m.alpha.is_none());
}

#[test]
fn zero_duration_entry_starts_at_rest() {
    let anim = Animation::new(Some(PhaseSpec::new(PhaseKind::SlideLeft, 0.0)), 2.0, None);
    let m = compute_motion(
        1.0,
        3.0,
        Some(&anim),
        OverlayKind::Text,
        Some(Expr::num(10.0)),
        None,
    );
    assert_eq!(m.x, Expr::num(10.0));
    assert_eq!(progress(1.0, 0.0), Expr::num(1.0));
}

#[test]
fn progress_is_clamped_past_the_phase() {
    let p = progress(2.0, 0.5);
    assert_eq!(at(&p, 0.0), 0.0);
    assert_eq!(at(&p, 2.25), 0.5);
    assert_eq!(at(&p, 99.0), 1.0);
}

#[test]
fn declared_end_clamps_long_exit() {
    let anim = Animation::new(
        Some(PhaseSpec::new(PhaseKind::Fade, 1.0)),
        3.0,
        Some(PhaseSpec::new(PhaseKind::SlideDown, 1.0)),
    );
    let tl = Timeline::new(0.0, 2.0, Some(&anim));
    assert_eq!(tl.out_end, 5.0);
    assert_eq!(tl.clamped_end, 2.0);

    let m = compute_motion(0.0, 2.0, Some(&anim), OverlayKind::Text, None, None);
    assert_eq!(at(&m.enable, 2.0), 1.0);
    assert_eq!(at(&m.enable, 2.5), 0.0);
    assert_eq!(at(&m.enable, 4.5), 0.0);
}

#[test]
fn compilation_is_idempotent() {
    let anim = Animation::new(
        Some(PhaseSpec::new(PhaseKind::SlideRight, 1.0).with_easing(Ease::EaseOut)),
        2.0,
        Some(PhaseSpec::new(PhaseKind::Fade, 1.0)),
    );
    let a = compute_motion(0.5, 5.0, Some(&anim), OverlayKind::Image, None, None);
    let b = compute_motion(0.5, 5.0, Some(&anim), OverlayKind::Image, None, None);
    assert_eq!(a, b);
    assert_eq!(a.x.to_string(), b.x.to_string());
}
