//! Mixing Property Tests
//!
//! Numerical guarantees of the transition engine, sampled frame by
//! frame against a manual clock:
//! - No audible pop under rapid state toggling (snapshot property)
//! - Cross-fade bounds and monotonicity
//! - Exact target snap at completion
//! - Configured fade durations

mod common;

use bgm_core::{EngineConfig, FadeCurve, VolumeSetting};
use common::{Fixture, fixture, fixture_with};

/// Largest volume step a 10ms frame may produce with the default
/// config (linear, 1000ms fade, 0.5 master), with headroom.
const MAX_FRAME_DELTA: f32 = 0.01;

fn settle_ambient(f: &mut Fixture) {
    f.controller.activate();
    f.run_frames(1500.0, 100.0);
}

#[test]
fn test_rapid_toggling_never_pops() {
    let mut f = fixture();
    settle_ambient(&mut f);

    let mut prev_bg = f.background.volume();
    let mut prev_ev = f.event.volume();

    // Flip state every 250ms (no fade ever completes) and verify
    // per-frame continuity across every seam.
    for toggle in 0..8 {
        if toggle % 2 == 0 {
            f.controller.enter_event();
        } else {
            f.controller.enter_ambient();
        }

        for _ in 0..25 {
            f.clock.advance_ms(10.0);
            f.controller.tick();

            let bg = f.background.volume();
            let ev = f.event.volume();
            assert!(
                (bg - prev_bg).abs() <= MAX_FRAME_DELTA,
                "background popped: {} -> {}",
                prev_bg,
                bg
            );
            assert!(
                (ev - prev_ev).abs() <= MAX_FRAME_DELTA,
                "event popped: {} -> {}",
                prev_ev,
                ev
            );
            prev_bg = bg;
            prev_ev = ev;
        }
    }
}

#[test]
fn test_crossfade_bounds_and_monotonicity() {
    let mut f = fixture();
    settle_ambient(&mut f);
    f.controller.enter_event();
    f.run_frames(1000.0, 100.0);
    assert!(f.event.playing());

    // Cross-fade back: event 0.5 -> 0, background 0 -> 0.5
    f.controller.enter_ambient();

    let mut prev_bg = f.background.volume();
    let mut prev_ev = f.event.volume();
    for _ in 0..150 {
        f.clock.advance_ms(10.0);
        f.controller.tick();

        let bg = f.background.volume();
        let ev = f.event.volume();
        assert!(ev >= 0.0);
        assert!(ev <= prev_ev + f32::EPSILON, "out track must not rise");
        assert!(bg + f32::EPSILON >= prev_bg, "in track must not dip");
        assert!(bg <= 0.5 + f32::EPSILON, "in track bounded by target");
        prev_bg = bg;
        prev_ev = ev;
    }

    assert_eq!(f.background.volume(), 0.5);
    assert!(f.event.volume().abs() < f32::EPSILON);
}

#[test]
fn test_completion_snaps_exact_target() {
    // Odd duration + curved interpolation + uneven frames: the final
    // value is still bit-exact, not accumulated residue.
    let mut f = fixture_with(EngineConfig {
        ambient_crossfade_ms: 333,
        fade_curve: FadeCurve::SCurve,
        ..EngineConfig::default()
    });
    f.controller.set_master_volume(VolumeSetting::Level(0.7));
    f.controller.activate();
    f.run_frames(400.0, 7.0);

    assert_eq!(f.background.volume(), 0.7);
    assert_eq!(f.controller.state().transition, None);
}

#[test]
fn test_muted_event_entry_plays_silently() {
    let mut f = fixture();
    settle_ambient(&mut f);

    f.controller.set_muted(true);
    f.controller.enter_event();
    f.run_frames(1000.0, 100.0);

    assert!(f.event.playing());
    assert_eq!(f.event.volume(), 0.0);
}

#[test]
fn test_event_fade_duration_is_configurable() {
    let mut f = fixture_with(EngineConfig {
        event_fade_out_ms: 200,
        ..EngineConfig::default()
    });
    settle_ambient(&mut f);

    f.controller.enter_event();
    f.run_frames(200.0, 50.0);

    // The short profile hands off in 200ms flat
    assert!(f.event.playing());
    assert!(!f.background.playing());
}
