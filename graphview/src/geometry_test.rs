#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn node(id: &str, x: f64, y: f64, w: f64, h: f64) -> NodeGeometry {
    NodeGeometry { id: NodeId::new(id), rect: Rect::new(x, y, w, h) }
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_extents_and_center() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.max_x(), 40.0);
    assert_eq!(r.max_y(), 60.0);
    assert_eq!(r.center(), Point::new(25.0, 40.0));
}

#[test]
fn rect_union_covers_both() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(-5.0, 5.0, 10.0, 20.0);
    assert_eq!(a.union(&b), Rect::new(-5.0, 0.0, 15.0, 25.0));
}

#[test]
fn rect_lerp_is_component_wise() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 20.0, 30.0, 50.0);
    assert_eq!(a.lerp(&b, 0.5), Rect::new(5.0, 10.0, 20.0, 30.0));
}

#[test]
fn rect_fault_names_offending_field() {
    assert_eq!(Rect::new(0.0, 0.0, 1.0, 1.0).fault(), None);
    assert_eq!(Rect::new(f64::NAN, 0.0, 1.0, 1.0).fault(), Some("x"));
    assert_eq!(Rect::new(0.0, f64::INFINITY, 1.0, 1.0).fault(), Some("y"));
    assert_eq!(Rect::new(0.0, 0.0, 0.0, 5.0).fault(), Some("width"));
    assert_eq!(Rect::new(0.0, 0.0, 5.0, -1.0).fault(), Some("height"));
}

#[test]
fn rect_corners_clockwise() {
    let corners = Rect::new(0.0, 0.0, 2.0, 1.0).corners();
    assert_eq!(corners[0], Point::new(0.0, 0.0));
    assert_eq!(corners[1], Point::new(2.0, 0.0));
    assert_eq!(corners[2], Point::new(2.0, 1.0));
    assert_eq!(corners[3], Point::new(0.0, 1.0));
}

// =============================================================
// Point / polyline
// =============================================================

#[test]
fn point_distance_and_lerp() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(a.distance(b), 5.0);
    assert_eq!(a.lerp(b, 0.5), Point::new(1.5, 2.0));
}

#[test]
fn polyline_length_sums_segments() {
    let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.0)];
    assert_eq!(polyline_length(&pts), 15.0);
    assert_eq!(polyline_length(&pts[..1]), 0.0);
}

#[test]
fn union_bounds_empty_is_none() {
    assert!(union_bounds(std::iter::empty()).is_none());
}

// =============================================================
// Ids
// =============================================================

#[test]
fn ids_display_and_compare() {
    let id = NodeId::new("task-7");
    assert_eq!(id.to_string(), "task-7");
    assert_eq!(id.as_str(), "task-7");
    assert_eq!(id, NodeId::from("task-7"));
}

// =============================================================
// GraphGeometry
// =============================================================

#[test]
fn new_computes_bounds_from_nodes_and_groups() {
    let geo = GraphGeometry::new(
        vec![node("a", 0.0, 0.0, 10.0, 10.0), node("b", 50.0, 50.0, 10.0, 10.0)],
        vec![GroupGeometry { id: GroupId::new("g"), rect: Rect::new(-20.0, -20.0, 5.0, 5.0), label_rect: None }],
        vec![EdgeGeometry { id: EdgeId::new("e"), points: vec![Point::new(500.0, 500.0), Point::new(600.0, 600.0)] }],
        BTreeMap::new(),
    );
    // Edge routes do not widen the bounds.
    assert_eq!(geo.bounds, Some(Rect::new(-20.0, -20.0, 80.0, 80.0)));
}

#[test]
fn empty_geometry_has_no_bounds() {
    let geo = GraphGeometry::default();
    assert!(geo.is_empty());
    assert!(geo.bounds.is_none());
}

#[test]
fn lookups_by_id() {
    let geo = GraphGeometry::new(vec![node("a", 0.0, 0.0, 1.0, 1.0)], vec![], vec![], BTreeMap::new());
    assert!(geo.node(&NodeId::new("a")).is_some());
    assert!(geo.node(&NodeId::new("z")).is_none());
    assert!(geo.group(&GroupId::new("a")).is_none());
    assert!(geo.edge(&EdgeId::new("a")).is_none());
}

#[test]
fn deserialize_recomputes_bounds() {
    let value = json!({
        "nodes": [
            { "id": "n1", "rect": { "x": 0.0, "y": 0.0, "width": 10.0, "height": 10.0 } },
            { "id": "n2", "rect": { "x": 20.0, "y": 0.0, "width": 10.0, "height": 30.0 } }
        ],
        "groups": [
            { "id": "g1", "rect": { "x": -5.0, "y": -5.0, "width": 50.0, "height": 50.0 },
              "label_rect": { "x": -5.0, "y": -5.0, "width": 20.0, "height": 8.0 } }
        ],
        "edges": [
            { "id": "e1", "points": [ { "x": 10.0, "y": 5.0 }, { "x": 20.0, "y": 5.0 } ] }
        ],
        "port_anchors": { "n1:out": { "x": 10.0, "y": 5.0 } },
        "bounds": { "x": 999.0, "y": 999.0, "width": 1.0, "height": 1.0 }
    });
    let geo: GraphGeometry = serde_json::from_value(value).unwrap();
    assert_eq!(geo.nodes.len(), 2);
    assert_eq!(geo.groups[0].label_rect, Some(Rect::new(-5.0, -5.0, 20.0, 8.0)));
    assert_eq!(geo.port_anchors.get(&PortId::new("n1:out")), Some(&Point::new(10.0, 5.0)));
    assert_eq!(geo.bounds, Some(Rect::new(-5.0, -5.0, 50.0, 50.0)));
}

#[test]
fn deserialize_missing_sections_default_empty() {
    let geo: GraphGeometry = serde_json::from_str("{}").unwrap();
    assert!(geo.is_empty());
    assert!(geo.port_anchors.is_empty());
}
