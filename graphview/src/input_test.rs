use super::*;
use crate::consts::{LINE_DELTA_PX, PAGE_DELTA_PX};

// =============================================================
// DeltaMode
// =============================================================

#[test]
fn delta_mode_from_dom_values() {
    assert_eq!(DeltaMode::from_dom(0), DeltaMode::Pixel);
    assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
    assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);
    assert_eq!(DeltaMode::from_dom(9), DeltaMode::Pixel);
}

#[test]
fn wheel_delta_normalized_to_pixels() {
    let mut event =
        WheelEvent { client: Point::new(0.0, 0.0), delta_y: 3.0, mode: DeltaMode::Pixel, region: Region::background() };
    assert!((event.normalized_delta_y(LINE_DELTA_PX, PAGE_DELTA_PX) - 3.0).abs() < f64::EPSILON);
    event.mode = DeltaMode::Line;
    assert!((event.normalized_delta_y(LINE_DELTA_PX, PAGE_DELTA_PX) - 48.0).abs() < f64::EPSILON);
    event.mode = DeltaMode::Page;
    assert!((event.normalized_delta_y(LINE_DELTA_PX, PAGE_DELTA_PX) - 2400.0).abs() < f64::EPSILON);
}

#[test]
fn wheel_delta_uses_given_line_and_page_sizes() {
    let mut event =
        WheelEvent { client: Point::new(0.0, 0.0), delta_y: 2.0, mode: DeltaMode::Line, region: Region::background() };
    assert!((event.normalized_delta_y(20.0, 500.0) - 40.0).abs() < f64::EPSILON);
    event.mode = DeltaMode::Page;
    assert!((event.normalized_delta_y(20.0, 500.0) - 1000.0).abs() < f64::EPSILON);
    event.mode = DeltaMode::Pixel;
    assert!((event.normalized_delta_y(20.0, 500.0) - 2.0).abs() < f64::EPSILON);
}

// =============================================================
// Region
// =============================================================

#[test]
fn region_constructors_set_single_flag() {
    assert_eq!(Region::background(), Region { owns_scroll: false, owns_drag: false, background: true });
    assert_eq!(Region::content(), Region::default());
    assert!(Region::scrollable().owns_scroll);
    assert!(!Region::scrollable().owns_drag);
    assert!(Region::draggable().owns_drag);
    assert!(!Region::draggable().background);
}

// =============================================================
// PointerEvent
// =============================================================

#[test]
fn primary_pointer_event_defaults_to_background() {
    let event = PointerEvent::primary(3, 10.0, 20.0);
    assert_eq!(event.pointer_id, PointerId(3));
    assert_eq!(event.button, Button::Primary);
    assert!(event.region.background);
    assert_eq!(event.client, Point::new(10.0, 20.0));
}

#[test]
fn over_replaces_region_only() {
    let event = PointerEvent::primary(1, 5.0, 6.0).over(Region::draggable());
    assert!(event.region.owns_drag);
    assert_eq!(event.client, Point::new(5.0, 6.0));
    assert_eq!(event.pointer_id, PointerId(1));
}

#[test]
fn action_equality() {
    assert_eq!(Action::CapturePointer(PointerId(1)), Action::CapturePointer(PointerId(1)));
    assert_ne!(Action::CapturePointer(PointerId(1)), Action::ReleasePointer(PointerId(1)));
}
