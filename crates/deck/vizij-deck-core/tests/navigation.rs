mod common;

use common::{deck_from_fixture, run_until_idle};
use vizij_deck_core::{Phase, Step};

#[test]
fn enable_shows_first_slide_and_starts_loop() {
    let deck = deck_from_fixture("timeline");
    assert!(deck.surface().enhanced);
    assert_eq!(deck.surface().active, Some(0));
    assert_eq!(deck.surface().indicator.as_deref(), Some("1 / 5"));
    assert!(matches!(deck.phase(), Phase::Animating(_)));
}

#[test]
fn navigation_index_stays_in_range() {
    let mut deck = deck_from_fixture("timeline");
    for target in [-3_i64, 0, 2, 4, 5, 99, i64::MIN] {
        let idx = deck.goto(target).unwrap();
        assert!(idx < deck.count(), "goto({target}) -> {idx}");
    }
    for _ in 0..10 {
        assert!(deck.next().unwrap() < deck.count());
    }
    for _ in 0..10 {
        assert!(deck.prev().unwrap() < deck.count());
    }
}

#[test]
fn prev_at_first_slide_does_not_wrap() {
    let mut deck = deck_from_fixture("timeline");
    deck.goto(0).unwrap();
    assert_eq!(deck.prev().unwrap(), 0);
    assert_eq!(deck.active(), 0);
}

#[test]
fn next_at_last_slide_does_not_wrap() {
    let mut deck = deck_from_fixture("timeline");
    deck.goto(4).unwrap();
    assert_eq!(deck.next().unwrap(), 4);
    assert_eq!(deck.surface().indicator.as_deref(), Some("5 / 5"));
    assert_eq!(deck.coordinator().target_offset(), 4.0 * 900.0);
}

#[test]
fn single_slide_deck_clamps_both_ways() {
    let mut deck = deck_from_fixture("single");
    assert_eq!(deck.next().unwrap(), 0);
    assert_eq!(deck.last().unwrap(), 0);
    assert_eq!(deck.prev().unwrap(), 0);
    assert_eq!(deck.surface().indicator.as_deref(), Some("1 / 1"));
}

#[test]
fn converged_offsets_match_slide_boundary_exactly() {
    let mut deck = deck_from_fixture("timeline");
    run_until_idle(&mut deck);
    deck.goto(3).unwrap();
    run_until_idle(&mut deck);

    let c = deck.coordinator();
    assert_eq!(c.current_offset(), c.target_offset());
    assert_eq!(c.target_offset(), c.active() as f64 * c.viewport_height());
    assert_eq!(deck.surface().track, Some(-2700.0));
    assert_eq!(deck.surface().indicator.as_deref(), Some("4 / 5"));
}

#[test]
fn navigation_while_animating_keeps_single_frame_chain() {
    let mut deck = deck_from_fixture("timeline");
    let before = deck.scheduler().requests;
    deck.next().unwrap();
    deck.next().unwrap();
    deck.last().unwrap();
    assert_eq!(deck.scheduler().requests, before);

    // Each frame schedules at most one successor.
    let requested = deck.scheduler().requests;
    deck.on_frame().unwrap();
    assert_eq!(deck.scheduler().requests, requested + 1);
}

#[test]
fn idle_deck_schedules_on_navigation() {
    let mut deck = deck_from_fixture("timeline");
    run_until_idle(&mut deck);
    assert_eq!(deck.phase(), Phase::Idle);
    deck.next().unwrap();
    assert!(matches!(deck.phase(), Phase::Animating(_)));
}

#[test]
fn stale_frame_on_idle_deck_is_ignored() {
    let mut deck = deck_from_fixture("plain");
    run_until_idle(&mut deck);
    let requests = deck.scheduler().requests;
    assert_eq!(deck.on_frame().unwrap(), Phase::Idle);
    assert_eq!(deck.scheduler().requests, requests);
}

#[test]
fn parallax_layers_follow_current_offset() {
    let mut deck = deck_from_fixture("timeline");
    run_until_idle(&mut deck);
    deck.goto(1).unwrap();
    deck.on_frame().unwrap();

    // 0.28 of the way to 900px.
    let current = deck.coordinator().current_offset();
    assert!((current - 252.0).abs() < 1e-9);
    let p = &deck.surface().parallax;
    let expect0 = (current - 450.0) * 0.12 * 0.6;
    let expect1 = (current - 1200.0) * 0.08 * 0.6;
    let expect2 = (current - 300.0) * -0.05 * 0.6;
    assert!((p[0].unwrap() - expect0).abs() < 1e-9);
    assert!((p[1].unwrap() - expect1).abs() < 1e-9);
    assert!((p[2].unwrap() - expect2).abs() < 1e-9);
    // Unmeasurable layer is left alone.
    assert_eq!(p[3], None);
}

#[test]
fn coordinator_step_reports_recomputed_index() {
    let mut deck = deck_from_fixture("plain");
    run_until_idle(&mut deck);
    let mut c = deck.coordinator().clone();
    c.goto(2);
    let settled = loop {
        if let Step::Settled { index } = c.step() {
            break index;
        }
    };
    assert_eq!(settled, 2);
    assert_eq!(c.current_offset(), 1600.0);
}
