// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Refresh, pointer, scroll, keyboard, and resize handling.

use gatemap_diagram::{Course, CursorHint, Diagram, KEY_PAN_FRACTION, Key, RefreshOutcome};
use gatemap_event_state::rect_select::SelectPhase;
use gatemap_geometry::{Checkpoint, DisplayConfig, Vec3};
use gatemap_view2d::ViewWindow;
use kurbo::{Point, Rect, Size};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn windows_close(a: ViewWindow, b: ViewWindow) -> bool {
    close(a.hmin, b.hmin) && close(a.hmax, b.hmax) && close(a.vmin, b.vmin) && close(a.vmax, b.vmax)
}

fn course_a() -> Vec<Checkpoint> {
    vec![
        Checkpoint::new(0, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)),
        Checkpoint::new(1, Vec3::new(100.0, 0.0, 600.0), Vec3::new(1.0, 0.0, 0.0)),
    ]
}

fn course_b() -> Vec<Checkpoint> {
    vec![Checkpoint::new(
        0,
        Vec3::new(5000.0, 0.0, 5000.0),
        Vec3::new(0.0, 0.0, 1.0),
    )]
}

fn fitted() -> Diagram {
    let config = DisplayConfig::default();
    let mut diagram = Diagram::new(Size::new(800.0, 600.0), config.clone());
    let cps = course_a();
    assert_eq!(
        diagram.refresh(Some(&Course::new("A", &cps)), &config),
        RefreshOutcome::Refit
    );
    diagram
}

fn commit_selection(diagram: &mut Diagram) {
    diagram.on_key(Key::Select);
    diagram.on_pointer_down(Point::new(100.0, 100.0));
    diagram.on_pointer_up(Point::new(200.0, 250.0));
    assert!(diagram.selection().save_region().is_some());
}

#[test]
fn refit_has_surface_aspect_and_contains_data() {
    let diagram = fitted();
    let window = diagram.view().window();
    assert!(close(window.hrange() / window.vrange(), 800.0 / 600.0));
    let extent = diagram.scene().extent();
    assert!(window.hmin < extent.hmin && window.hmax > extent.hmax);
    assert!(window.vmin < extent.vmin && window.vmax > extent.vmax);
}

#[test]
fn same_course_preserves_window_other_course_refits() {
    let mut diagram = fitted();
    diagram.on_scroll(Point::new(10.0, 20.0), 1.0);
    let zoomed = diagram.view().window();

    let config = DisplayConfig {
        hidden_numbers: [0, 1].into_iter().collect(),
        ..DisplayConfig::default()
    };
    let cps = course_a();
    assert_eq!(
        diagram.refresh(Some(&Course::new("A", &cps)), &config),
        RefreshOutcome::Preserved
    );
    assert_eq!(diagram.view().window(), zoomed);
    assert_eq!(diagram.scene().labels().count(), 0);

    let other = course_b();
    assert_eq!(
        diagram.refresh(Some(&Course::new("B", &other)), &config),
        RefreshOutcome::Refit
    );
    assert!(diagram.view().window().contains(Point::new(5000.0, -5000.0)));
    assert_eq!(diagram.course_code(), Some("B"));
}

#[test]
fn new_course_without_visible_data_keeps_window() {
    let mut diagram = fitted();
    let before = diagram.view().window();
    let config = DisplayConfig {
        hidden_checkpoints: [0].into_iter().collect(),
        ..DisplayConfig::default()
    };
    let cps = course_b();
    assert_eq!(
        diagram.refresh(Some(&Course::new("B", &cps)), &config),
        RefreshOutcome::NoData
    );
    assert_eq!(diagram.view().window(), before);
    assert!(diagram.scene().is_empty());

    // Once the course has something to show, it is fitted, then kept.
    assert_eq!(
        diagram.refresh(Some(&Course::new("B", &cps)), &DisplayConfig::default()),
        RefreshOutcome::Refit
    );
    assert!(diagram.view().window().contains(Point::new(5000.0, -5000.0)));
    assert_eq!(
        diagram.refresh(Some(&Course::new("B", &cps)), &DisplayConfig::default()),
        RefreshOutcome::Preserved
    );
}

#[test]
fn dpi_change_keeps_pixel_size() {
    let mut diagram = fitted();
    let config = DisplayConfig {
        dpi: 150.0,
        ..DisplayConfig::default()
    };
    let cps = course_a();
    diagram.refresh(Some(&Course::new("A", &cps)), &config);
    assert_eq!(diagram.view().dpi(), 150.0);
    let size = diagram.view().surface_size();
    assert!(close(size.width, 800.0) && close(size.height, 600.0));
}

#[test]
fn drag_pans_with_the_pointer() {
    let mut diagram = fitted();
    let before = diagram.view().window();
    let per_pixel = diagram.view().data_per_pixel();

    assert!(!diagram.on_pointer_down(Point::new(100.0, 100.0)));
    assert_eq!(diagram.cursor(), CursorHint::Grabbing);
    assert!(diagram.on_pointer_move(Point::new(150.0, 100.0)));
    assert!(diagram.on_pointer_up(Point::new(150.0, 130.0)));
    assert_eq!(diagram.cursor(), CursorHint::Default);

    let after = diagram.view().window();
    assert!(close(after.hmin, before.hmin - 50.0 * per_pixel.x));
    assert!(close(after.vmin, before.vmin - 30.0 * per_pixel.y));
    assert!(close(after.hrange(), before.hrange()));

    // Moves without a press do nothing.
    assert!(!diagram.on_pointer_move(Point::new(400.0, 400.0)));
    assert_eq!(diagram.view().window(), after);
}

#[test]
fn scroll_zooms_about_the_pointer() {
    let mut diagram = fitted();
    let pointer = Point::new(620.0, 80.0);
    let under = diagram.view().pixel_to_data(pointer);
    let before = diagram.view().window();

    assert!(diagram.on_scroll(pointer, 1.0));
    let moved = diagram.view().pixel_to_data(pointer);
    assert!(close(moved.x, under.x) && close(moved.y, under.y));
    assert!(diagram.view().window().hrange() < before.hrange());

    assert!(diagram.on_scroll(pointer, -1.0));
    assert!(windows_close(diagram.view().window(), before));
    assert!(!diagram.on_scroll(pointer, 0.0));
}

#[test]
fn arrow_keys_pan_by_a_tenth() {
    let mut diagram = fitted();
    let before = diagram.view().window();

    assert!(diagram.on_key(Key::Left));
    let after = diagram.view().window();
    assert!(close(after.hmin, before.hmin - KEY_PAN_FRACTION * before.hrange()));

    assert!(diagram.on_key(Key::Right));
    assert!(diagram.on_key(Key::Up));
    let up = diagram.view().window();
    assert!(close(up.vmin, before.vmin + KEY_PAN_FRACTION * before.vrange()));

    assert!(diagram.on_key(Key::Down));
    assert!(windows_close(diagram.view().window(), before));
}

#[test]
fn zoom_keys_anchor_on_center() {
    let mut diagram = fitted();
    let before = diagram.view().window();
    assert!(diagram.on_key(Key::ZoomIn));
    let center = diagram.view().window().center();
    assert!(close(center.x, before.center().x) && close(center.y, before.center().y));
    assert!(diagram.on_key(Key::ZoomOut));
    assert!(windows_close(diagram.view().window(), before));
}

#[test]
fn reset_refits() {
    let mut diagram = fitted();
    let fitted = diagram.view().window();
    diagram.on_scroll(Point::new(0.0, 0.0), 1.0);
    diagram.on_key(Key::Up);
    assert!(diagram.on_key(Key::Reset));
    assert!(windows_close(diagram.view().window(), fitted));
}

#[test]
fn selection_takes_pointer_events_while_active() {
    let mut diagram = fitted();
    let window = diagram.view().window();

    assert!(diagram.on_key(Key::Select));
    assert_eq!(diagram.cursor(), CursorHint::Crosshair);
    assert!(diagram.on_pointer_down(Point::new(100.0, 100.0)));
    assert_eq!(diagram.selection().phase(), SelectPhase::Drawing);
    assert!(diagram.on_pointer_move(Point::new(900.0, -20.0)));
    assert!(diagram.on_pointer_up(Point::new(900.0, -20.0)));

    // Clamped to the surface, and no pan happened.
    assert_eq!(
        diagram.selection().save_region(),
        Some(Rect::new(100.0, 0.0, 800.0, 100.0))
    );
    assert_eq!(diagram.view().window(), window);
    assert_eq!(diagram.cursor(), CursorHint::Default);
}

#[test]
fn press_outside_surface_cancels_armed_tool() {
    let mut diagram = fitted();
    diagram.on_key(Key::Select);
    assert!(diagram.on_pointer_down(Point::new(-5.0, 10.0)));
    assert_eq!(diagram.selection().phase(), SelectPhase::Inactive);
    assert_eq!(diagram.selection().committed(), None);
}

#[test]
fn escape_cancels_then_clears() {
    let mut diagram = fitted();
    diagram.on_key(Key::Select);
    diagram.on_pointer_down(Point::new(10.0, 10.0));
    assert!(diagram.on_key(Key::Escape));
    assert!(!diagram.selection().is_active());

    commit_selection(&mut diagram);
    assert!(diagram.on_key(Key::Escape));
    assert_eq!(diagram.selection().committed(), None);
    assert!(!diagram.on_key(Key::Escape));
}

#[test]
fn resize_refixes_aspect_and_drops_selection() {
    let mut diagram = fitted();
    commit_selection(&mut diagram);
    let center = diagram.view().window().center();

    assert!(diagram.on_resize(Size::new(400.0, 600.0)));
    let window = diagram.view().window();
    assert!(close(window.hrange() / window.vrange(), 400.0 / 600.0));
    assert!(close(window.center().x, center.x) && close(window.center().y, center.y));
    assert_eq!(diagram.selection().committed(), None);

    assert!(!diagram.on_resize(Size::new(0.0, 600.0)));
}

#[test]
fn refresh_drops_selection() {
    let mut diagram = fitted();
    commit_selection(&mut diagram);
    let cps = course_a();
    diagram.refresh(Some(&Course::new("A", &cps)), &DisplayConfig::default());
    assert_eq!(diagram.selection().committed(), None);
}

#[test]
fn pointer_readout_uses_physical_axes() {
    let diagram = fitted();
    let pos = Point::new(400.0, 300.0);
    let data = diagram.view().pixel_to_data(pos);
    let coords = diagram.pointer_coordinates(pos);
    assert_eq!(
        coords.to_string(),
        format!("x = {:.3}, z = {:.3}", data.x, -data.y)
    );
}
