//! Layout snapshot model: points, rects, branded entity ids, and the
//! immutable [`GraphGeometry`] produced once per layout pass.
//!
//! Everything here is in world space. Snapshots arrive from the external
//! layout engine (usually as JSON) and are superseded, never mutated, when the
//! next layout pass completes.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in either world or screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self { x: crate::lerp(self.x, other.x, t), y: crate::lerp(self.y, other.y, t) }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned rectangle in world space, stored as origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// The four corners, clockwise from the origin.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.max_x(), self.y),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.x, self.max_y()),
        ]
    }

    /// Smallest rect containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Self { x, y, width: max_x - x, height: max_y - y }
    }

    /// Component-wise interpolation of origin and size.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: crate::lerp(self.x, other.x, t),
            y: crate::lerp(self.y, other.y, t),
            width: crate::lerp(self.width, other.width, t),
            height: crate::lerp(self.height, other.height, t),
        }
    }

    /// Name of the first field that breaks the rect invariant, if any.
    ///
    /// All fields must be finite and both extents strictly positive.
    #[must_use]
    pub fn fault(&self) -> Option<&'static str> {
        if !self.x.is_finite() {
            Some("x")
        } else if !self.y.is_finite() {
            Some("y")
        } else if !self.width.is_finite() || self.width <= 0.0 {
            Some("width")
        } else if !self.height.is_finite() || self.height <= 0.0 {
            Some("height")
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fault().is_none()
    }
}

/// Union of every rect yielded, or `None` when there are none.
pub fn union_bounds<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
    rects.into_iter().fold(None, |acc, rect| match acc {
        None => Some(*rect),
        Some(bounds) => Some(bounds.union(rect)),
    })
}

/// Total arc length of a polyline.
#[must_use]
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|pair| pair[0].distance(pair[1])).sum()
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

entity_id!(
    /// Identifier of a node (task, lock, channel, connection).
    NodeId
);
entity_id!(
    /// Identifier of a group container.
    GroupId
);
entity_id!(
    /// Identifier of an edge.
    EdgeId
);
entity_id!(
    /// Identifier of a port anchor on a node.
    PortId
);

/// An entry that carries a stable id across snapshots.
pub trait Keyed {
    type Id: Eq + std::hash::Hash + Clone + fmt::Display;

    fn key(&self) -> &Self::Id;
}

/// A laid-out node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    pub id: NodeId,
    pub rect: Rect,
}

/// A laid-out group container with an optional label box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupGeometry {
    pub id: GroupId,
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_rect: Option<Rect>,
}

/// A routed edge as an ordered polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeGeometry {
    pub id: EdgeId,
    pub points: Vec<Point>,
}

impl Keyed for NodeGeometry {
    type Id = NodeId;

    fn key(&self) -> &NodeId {
        &self.id
    }
}

impl Keyed for GroupGeometry {
    type Id = GroupId;

    fn key(&self) -> &GroupId {
        &self.id
    }
}

impl Keyed for EdgeGeometry {
    type Id = EdgeId;

    fn key(&self) -> &EdgeId {
        &self.id
    }
}

/// One complete layout result.
///
/// `bounds` is always the union of node and group rects; constructors and
/// deserialization recompute it so it can never drift from the geometry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "GraphGeometryRepr")]
pub struct GraphGeometry {
    pub nodes: Vec<NodeGeometry>,
    pub groups: Vec<GroupGeometry>,
    pub edges: Vec<EdgeGeometry>,
    pub port_anchors: BTreeMap<PortId, Point>,
    pub bounds: Option<Rect>,
}

impl GraphGeometry {
    #[must_use]
    pub fn new(
        nodes: Vec<NodeGeometry>,
        groups: Vec<GroupGeometry>,
        edges: Vec<EdgeGeometry>,
        port_anchors: BTreeMap<PortId, Point>,
    ) -> Self {
        let bounds = union_bounds(nodes.iter().map(|n| &n.rect).chain(groups.iter().map(|g| &g.rect)));
        Self { nodes, groups, edges, port_anchors, bounds }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.groups.is_empty() && self.edges.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&NodeGeometry> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&GroupGeometry> {
        self.groups.iter().find(|g| &g.id == id)
    }

    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&EdgeGeometry> {
        self.edges.iter().find(|e| &e.id == id)
    }
}

#[derive(Deserialize)]
struct GraphGeometryRepr {
    #[serde(default)]
    nodes: Vec<NodeGeometry>,
    #[serde(default)]
    groups: Vec<GroupGeometry>,
    #[serde(default)]
    edges: Vec<EdgeGeometry>,
    #[serde(default)]
    port_anchors: BTreeMap<PortId, Point>,
}

impl From<GraphGeometryRepr> for GraphGeometry {
    fn from(repr: GraphGeometryRepr) -> Self {
        Self::new(repr.nodes, repr.groups, repr.edges, repr.port_anchors)
    }
}
