//! Tab strip interaction driven through the window controller.

mod common;

use common::{Harness, harness};
use par_tabs::config::ResizePolicy;
use par_tabs::tab_strip::NotifyState;
use std::time::{Duration, Instant};

fn three_tabs() -> Harness {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Grid);
    h.open("beta", ResizePolicy::Grid);
    h.open("gamma", ResizePolicy::Grid);
    h
}

#[test]
fn test_drag_first_tab_to_last_moves_sessions_with_it() {
    let mut h = three_tabs();
    let alpha = h.controller.session(0).id();

    h.drag_tab(0, 2);

    assert_eq!(h.hosts(), vec!["beta", "gamma", "alpha"]);
    assert_eq!(h.labels(), vec!["2. beta", "3. gamma", "1. alpha"]);
    assert_eq!(h.controller.active_id(), Some(alpha));
    assert_eq!(h.controller.active_index(), Some(2));
    assert_eq!(h.controller.strip().selected(), Some(2));
    for (position, session) in h.controller.sessions().iter().enumerate() {
        assert_eq!(session.index(), position);
    }
    assert!(!h.controller.strip().is_dragging());
    assert!(!h.controller.strip().has_capture());
}

#[test]
fn test_drag_straight_onto_third_tab_moves_first_session_there() {
    let mut h = three_tabs();
    let alpha = h.controller.session(0).id();
    let start = h.tab_centre(0);
    h.controller.on_pointer_down(start, false);
    for _ in 0..3 {
        h.controller.on_pointer_move(start, true);
    }
    assert!(h.controller.strip().is_dragging());

    let target = h.tab_centre(2);
    h.controller.on_pointer_move(target, true);
    h.controller.on_pointer_up(target);

    assert_eq!(h.hosts(), vec!["beta", "gamma", "alpha"]);
    assert_eq!(h.labels(), vec!["2. beta", "3. gamma", "1. alpha"]);
    assert_eq!(h.controller.active_id(), Some(alpha));
    for (position, session) in h.controller.sessions().iter().enumerate() {
        assert_eq!(session.index(), position);
    }
}

#[test]
fn test_drag_last_tab_to_first() {
    let mut h = three_tabs();
    h.drag_tab(2, 0);
    assert_eq!(h.hosts(), vec!["gamma", "alpha", "beta"]);
    assert_eq!(h.controller.active_index(), Some(0));
}

#[test]
fn test_short_drag_only_selects() {
    let mut h = three_tabs();
    let pos = h.tab_centre(0);
    h.controller.on_pointer_down(pos, false);
    h.controller.on_pointer_move(h.tab_centre(1), true);
    h.controller.on_pointer_up(h.tab_centre(1));

    assert_eq!(h.hosts(), vec!["alpha", "beta", "gamma"]);
    assert_eq!(h.controller.active_index(), Some(0));
}

#[test]
fn test_capture_loss_keeps_swaps_already_made() {
    let mut h = three_tabs();
    let start = h.tab_centre(0);
    h.controller.on_pointer_down(start, false);
    for _ in 0..3 {
        h.controller.on_pointer_move(start, true);
    }
    h.controller.on_pointer_move(h.tab_centre(1), true);
    h.controller.on_capture_lost();

    assert!(!h.controller.strip().is_dragging());
    assert_eq!(h.hosts(), vec!["beta", "alpha", "gamma"]);
}

#[test]
fn test_clicking_a_tab_activates_its_session() {
    let mut h = three_tabs();
    assert_eq!(h.controller.active_index(), Some(2));

    h.click_tab(0);
    assert_eq!(h.controller.active_index(), Some(0));
    assert_eq!(h.host.state().title, "alpha - par-tabs");
}

#[test]
fn test_close_button_click_closes_that_tab() {
    let mut h = three_tabs();
    h.click_close(1);

    assert_eq!(h.hosts(), vec!["alpha", "gamma"]);
    assert_eq!(h.dialogs.state().close_prompts.len(), 1);
    assert_eq!(h.factory.log().stops, vec!["beta".to_string()]);
}

#[test]
fn test_close_press_released_elsewhere_does_nothing() {
    let mut h = three_tabs();
    let pressed = h.close_centre(1);
    h.controller.on_pointer_down(pressed, false);
    let elsewhere = h.close_centre(0);
    h.controller.on_pointer_move(elsewhere, true);
    h.controller.on_pointer_up(elsewhere);

    assert_eq!(h.controller.session_count(), 3);
    assert!(h.dialogs.state().close_prompts.is_empty());
}

#[test]
fn test_output_on_background_tab_notifies_then_blinks() {
    let mut h = three_tabs();
    let alpha = h.controller.session(0).id();
    let now = Instant::now();

    h.controller.on_session_output(alpha, now);
    assert_eq!(h.controller.strip().items()[0].notify, NotifyState::Set);
    assert_eq!(h.controller.poll(now), None);

    h.controller.on_session_output(alpha, now);
    assert_eq!(h.controller.strip().items()[0].notify, NotifyState::SetBlink);
    let due = h.controller.poll(now).expect("blink timer running");
    assert!(due > now);

    h.host.state().strip_damage.clear();
    let next = h.controller.poll(due + Duration::from_millis(1));
    assert_eq!(h.controller.strip().items()[0].notify, NotifyState::Blink);
    assert!(next.is_some());
    assert!(!h.host.state().strip_damage.is_empty());
}

#[test]
fn test_output_on_active_tab_is_not_notified() {
    let mut h = three_tabs();
    let gamma = h.controller.session(2).id();
    h.controller.on_session_output(gamma, Instant::now());
    assert_eq!(h.controller.strip().items()[2].notify, NotifyState::Clear);
}

#[test]
fn test_activating_notified_tab_clears_and_stops_timer() {
    let mut h = three_tabs();
    let alpha = h.controller.session(0).id();
    let now = Instant::now();
    h.controller.on_session_output(alpha, now);
    h.controller.on_session_output(alpha, now);
    assert!(h.controller.strip().blink_timer_running());

    h.click_tab(0);
    assert_eq!(h.controller.strip().items()[0].notify, NotifyState::Clear);
    assert!(!h.controller.strip().blink_timer_running());
    assert_eq!(h.controller.poll(now + Duration::from_secs(1)), None);
}

#[test]
fn test_secondary_click_shows_menu_for_that_tab() {
    let mut h = three_tabs();
    let pos = h.tab_centre(0);
    h.controller.on_secondary_down(pos);
    h.controller.on_secondary_up(pos);

    assert_eq!(h.controller.active_index(), Some(0));
    let host = h.host.state();
    assert_eq!(host.context_menus.len(), 1);
    assert_eq!(host.context_menus[0].1, pos);
}

#[test]
fn test_pointer_leave_forgets_hover() {
    let mut h = three_tabs();
    let pos = h.close_centre(1);
    h.controller.on_pointer_move(pos, false);
    assert_eq!(h.controller.strip().hover().tab, Some(1));

    h.controller.on_pointer_leave();
    assert_eq!(h.controller.strip().hover().tab, None);
}
