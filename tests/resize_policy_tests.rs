//! Resize policies exercised end to end through the window controller.

mod common;

use common::{CELL, client_for, harness};
use par_tabs::config::ResizePolicy;
use par_tabs::geometry::{CellSize, Dpi, GridSize, PixelRect};
use par_tabs::resize::{GridRequestOutcome, ResizeEdge, SizeEvent, SizeKind, WindowRequest, ZoomMode};
use winit::dpi::PhysicalSize;

#[test]
fn test_grid_policy_window_wraps_grid_after_open() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Grid);

    let grid = h.active_grid();
    assert_eq!(h.active_cell(), CELL);
    assert_eq!(h.client(), client_for(grid, CELL));
    assert_eq!(grid, GridSize::new(80, 26));
}

#[test]
fn test_grid_policy_resize_refits_grid_and_keeps_font() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Grid);

    h.resize(900, 600);
    assert!(h.settle().is_empty());
    // 900 - scrollbar - border, 600 - strip - border
    assert_eq!(h.active_grid(), GridSize::new(881 / 8, 572 / 16));
    assert_eq!(h.active_cell(), CELL);
}

#[test]
fn test_grid_policy_drag_snaps_to_whole_cells() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Grid);

    h.controller.on_enter_size_move();
    let sized = h
        .controller
        .on_sizing(ResizeEdge::BottomRight, PixelRect::new(0, 0, 900, 600), false);
    assert!(sized.adjusted);
    assert_eq!(sized.grid, GridSize::new(110, 36));
    assert_eq!(sized.rect.size, client_for(sized.grid, CELL));

    h.controller.on_resized(SizeEvent {
        kind: SizeKind::Restored,
        client: sized.rect.size,
        font_modifier: false,
    });
    // Grid changes wait for the end of the drag
    assert_eq!(h.active_grid(), GridSize::new(80, 26));
    h.controller.on_exit_size_move(false);
    assert_eq!(h.active_grid(), GridSize::new(110, 36));
}

#[test]
fn test_font_policy_resize_scales_font_and_keeps_grid() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Font);
    assert_eq!(h.active_grid(), GridSize::new(80, 24));
    assert_eq!(h.active_cell(), CellSize::new(641 / 80, 420 / 24));

    h.resize(900, 600);
    assert!(h.settle().is_empty());
    assert_eq!(h.active_grid(), GridSize::new(80, 24));
    assert_eq!(h.active_cell(), CellSize::new(881 / 80, 572 / 24));
}

#[test]
fn test_font_policy_drag_snaps_to_grid_multiples() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Font);

    h.controller.on_enter_size_move();
    let sized = h
        .controller
        .on_sizing(ResizeEdge::BottomRight, PixelRect::new(0, 0, 900, 600), false);
    assert_eq!(sized.grid, GridSize::new(80, 24));
    assert_eq!(sized.rect.size, client_for(sized.grid, CellSize::new(11, 24)));

    h.controller.on_resized(SizeEvent {
        kind: SizeKind::Restored,
        client: sized.rect.size,
        font_modifier: false,
    });
    h.controller.on_exit_size_move(false);
    assert_eq!(h.active_cell(), CellSize::new(11, 24));
    assert_eq!(h.active_grid(), GridSize::new(80, 24));
}

#[test]
fn test_disabled_policy_snaps_window_back() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Disabled);
    let fixed = client_for(GridSize::new(80, 24), CELL);
    assert_eq!(h.client(), fixed);

    h.resize(900, 600);
    assert_eq!(h.settle(), vec![WindowRequest::Resize(fixed)]);
    assert_eq!(h.client(), fixed);
    assert_eq!(h.active_grid(), GridSize::new(80, 24));
    assert_eq!(h.active_cell(), CELL);

    let style = h.host.state().frame_style.expect("frame style set");
    assert!(!style.resizable);
    assert!(!style.maximize_box);
}

#[test]
fn test_disabled_policy_sizing_is_untouched() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Disabled);
    let proposed = PixelRect::new(0, 0, 901, 599);
    let sized = h
        .controller
        .on_sizing(ResizeEdge::Right, proposed, false);
    assert_eq!(sized.rect, proposed);
    assert!(!sized.adjusted);
}

#[test]
fn test_grid_maximize_then_restore_returns_to_previous_grid() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Grid);
    let before_client = h.client();
    let before_grid = h.active_grid();

    h.maximize();
    assert_eq!(h.zoom(), ZoomMode::Maximized);
    assert_eq!(h.active_cell(), CELL);
    assert_eq!(h.active_grid(), GridSize::new(1903 / 8, 1054 / 16));

    h.restore();
    assert_eq!(h.zoom(), ZoomMode::Normal);
    assert_eq!(h.client(), before_client);
    assert_eq!(h.active_grid(), before_grid);
}

#[test]
fn test_either_maximize_scales_font_and_restore_remembers_it() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Either);
    let grid = h.active_grid();

    h.maximize();
    assert_eq!(h.zoom(), ZoomMode::Maximized);
    assert_eq!(h.active_grid(), grid);
    assert_eq!(
        h.active_cell(),
        CellSize::new(1903 / grid.cols, 1054 / grid.rows)
    );

    h.restore();
    assert_eq!(h.active_cell(), CELL);
    assert_eq!(h.active_grid(), grid);
}

#[test]
fn test_full_screen_round_trip() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Grid);
    let before_client = h.client();
    let before_grid = h.active_grid();

    h.controller.toggle_full_screen();
    let requests = h.settle();
    assert_eq!(requests[0], WindowRequest::Maximize);
    assert_eq!(
        requests[1],
        WindowRequest::MoveResize(PixelRect::new(0, 0, 1920, 1080))
    );
    assert_eq!(h.zoom(), ZoomMode::FullScreen);
    let style = h.host.state().frame_style.expect("frame style set");
    assert!(!style.decorations);
    assert!(!style.scrollbar);
    // No scrollbar in full-screen: the whole width is grid
    assert_eq!(h.active_grid(), GridSize::new(1920 / 8, 1054 / 16));

    h.controller.toggle_full_screen();
    h.settle();
    assert_eq!(h.zoom(), ZoomMode::Normal);
    assert_eq!(h.client(), before_client);
    assert_eq!(h.active_grid(), before_grid);
    let style = h.host.state().frame_style.expect("frame style set");
    assert!(style.decorations);
    assert!(style.scrollbar);
}

#[test]
fn test_full_screen_unavailable_when_disabled() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Disabled);
    h.controller.toggle_full_screen();
    assert!(h.settle().is_empty());
    assert_eq!(h.zoom(), ZoomMode::Normal);
}

#[test]
fn test_activating_disabled_session_leaves_maximized_window() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Grid);
    h.maximize();
    h.open("beta", ResizePolicy::Disabled);

    assert_eq!(h.zoom(), ZoomMode::Normal);
    assert_eq!(h.client(), client_for(GridSize::new(80, 24), CELL));
    assert_eq!(h.active_cell(), CELL);
}

#[test]
fn test_dpi_change_reloads_font_and_resizes_window() {
    let mut h = harness();
    h.open("alpha", ResizePolicy::Grid);
    let grid = h.active_grid();

    h.controller.on_dpi_changed(
        Dpi::uniform(192),
        PixelRect::new(0, 0, 1318, 888),
        PhysicalSize::new(0, 0),
    );
    let requests = h.settle();
    assert!(matches!(requests[0], WindowRequest::MoveResize(_)));

    assert_eq!(h.controller.strip().extra_height(), 52);
    assert_eq!(h.active_cell(), CellSize::new(16, 32));
    assert_eq!(h.active_grid(), grid);
    // Doubled scrollbar, strip and border
    assert_eq!(
        h.client(),
        PhysicalSize::new(grid.cols * 16 + 34 + 2, grid.rows * 32 + 52 + 2)
    );
}

#[test]
fn test_terminal_grid_request_resizes_window() {
    let mut h = harness();
    let id = h.open("alpha", ResizePolicy::Grid);

    let outcome = h
        .controller
        .on_terminal_resize_request(id, GridSize::new(100, 30));
    assert!(matches!(outcome, GridRequestOutcome::Applied(_)));
    let requests = h.settle();
    assert_eq!(
        requests,
        vec![WindowRequest::Resize(client_for(GridSize::new(100, 30), CELL))]
    );
    assert_eq!(h.active_grid(), GridSize::new(100, 30));
}

#[test]
fn test_terminal_grid_request_beyond_monitor_is_rejected() {
    let mut h = harness();
    let id = h.open("alpha", ResizePolicy::Grid);
    let grid = h.active_grid();

    let outcome = h
        .controller
        .on_terminal_resize_request(id, GridSize::new(1000, 30));
    assert_eq!(outcome, GridRequestOutcome::Rejected);
    assert_eq!(h.active_grid(), grid);
    assert!(h.settle().is_empty());
}

#[test]
fn test_background_grid_request_does_not_touch_window() {
    let mut h = harness();
    let alpha = h.open("alpha", ResizePolicy::Grid);
    h.open("beta", ResizePolicy::Grid);
    let client = h.client();

    let outcome = h
        .controller
        .on_terminal_resize_request(alpha, GridSize::new(100, 30));
    assert!(matches!(outcome, GridRequestOutcome::Applied(ref out) if out.requests.is_empty()));
    assert!(h.settle().is_empty());
    assert_eq!(h.client(), client);
    assert_eq!(h.controller.session(0).terminal().grid(), GridSize::new(100, 30));
}

#[test]
fn test_minimize_shows_icon_title() {
    let mut h = harness();
    let id = h.open("alpha", ResizePolicy::Grid);
    h.controller.set_session_titles(
        id,
        par_tabs::session::WindowTitles {
            window: "vim main.rs".to_string(),
            icon: "vim".to_string(),
        },
    );
    assert_eq!(h.host.state().title, "vim main.rs");

    let client = h.client();
    h.controller.on_resized(SizeEvent {
        kind: SizeKind::Minimized,
        client,
        font_modifier: false,
    });
    assert_eq!(h.host.state().title, "vim");
}
