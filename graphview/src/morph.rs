//! Snapshot interpolation: blend two layout snapshots into the geometry shown
//! at a given point of a transition.
//!
//! Entities are matched by id. Output order is the destination order, with
//! entities that only exist in the source appended so they never reorder
//! stable content. Matched rects interpolate component-wise at full opacity;
//! entering entities sit at their destination and fade in; leaving entities
//! sit at their source and fade out.
//!
//! Edges whose point count is unchanged interpolate waypoint-by-waypoint,
//! which keeps routed bends on the same logical segment throughout the morph.
//! When the count changes the route itself changed, so both polylines are
//! resampled to equal arc-length spacing first.
//!
//! Malformed rects and non-finite edge waypoints are errors, never clamped:
//! one bad value would poison the bounds and every transform derived from them.

#[cfg(test)]
#[path = "morph_test.rs"]
mod morph_test;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::consts::RESAMPLE_COUNT;
use crate::ease_out_cubic;
use crate::geometry::{
    EdgeGeometry, EdgeId, GraphGeometry, GroupGeometry, GroupId, Keyed, NodeGeometry, NodeId, Point, PortId, Rect,
    polyline_length, union_bounds,
};

/// Which kind of entity a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Node,
    Group,
    GroupLabel,
    Edge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Node => "node",
            Self::Group => "group",
            Self::GroupLabel => "group label",
            Self::Edge => "edge",
        })
    }
}

/// Which snapshot of the pair a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::From => "from",
            Self::To => "to",
        })
    }
}

/// Error returned by [`interpolate`] and the polyline helpers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MorphError {
    /// A rect is non-finite or has a non-positive extent.
    #[error("invalid rect for {entity} {id:?} in {side} snapshot: bad {field}")]
    InvalidRect { entity: EntityKind, id: String, side: Side, field: &'static str },
    /// A polyline waypoint has a non-finite coordinate.
    #[error("invalid point {index} for {entity} {id:?} in {side} snapshot: non-finite coordinate")]
    InvalidPoint { entity: EntityKind, id: String, side: Side, index: usize },
    /// Resampled polylines came back with different point counts.
    #[error("resampled polylines differ in length: {from} vs {to}")]
    ResampleLengthMismatch { from: usize, to: usize },
    /// Arc-length resampling needs at least both endpoints.
    #[error("sample count must be at least 2, got {0}")]
    SampleCountTooSmall(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendedNode {
    pub id: NodeId,
    pub rect: Rect,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendedGroup {
    pub id: GroupId,
    pub rect: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_rect: Option<Rect>,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendedEdge {
    pub id: EdgeId,
    pub points: Vec<Point>,
    pub opacity: f64,
}

/// Geometry shown for one animation step. Recomputed every frame, never stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BlendedGeometry {
    pub nodes: Vec<BlendedNode>,
    pub groups: Vec<BlendedGroup>,
    pub edges: Vec<BlendedEdge>,
    pub port_anchors: BTreeMap<PortId, Point>,
    /// Union of the blended node and group rects.
    pub bounds: Option<Rect>,
}

impl BlendedGeometry {
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&BlendedNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&BlendedGroup> {
        self.groups.iter().find(|g| &g.id == id)
    }

    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&BlendedEdge> {
        self.edges.iter().find(|e| &e.id == id)
    }
}

/// Blend `from` into `to` at raw progress `raw_t` (clamped, then eased).
///
/// # Errors
///
/// Returns [`MorphError::InvalidRect`] naming the first malformed rect,
/// [`MorphError::InvalidPoint`] for a non-finite edge waypoint, or
/// [`MorphError::ResampleLengthMismatch`] when a re-routed edge has fewer than
/// two points on one side.
pub fn interpolate(from: &GraphGeometry, to: &GraphGeometry, raw_t: f64) -> Result<BlendedGeometry, MorphError> {
    interpolate_with_samples(from, to, raw_t, RESAMPLE_COUNT)
}

/// [`interpolate`] with an explicit sample count for re-routed edges.
///
/// # Errors
///
/// As [`interpolate`], plus [`MorphError::SampleCountTooSmall`] when a
/// re-routed edge needs resampling and `samples < 2`.
pub fn interpolate_with_samples(
    from: &GraphGeometry,
    to: &GraphGeometry,
    raw_t: f64,
    samples: usize,
) -> Result<BlendedGeometry, MorphError> {
    let t = ease_out_cubic(raw_t);

    let nodes = pair_entries(&from.nodes, &to.nodes)
        .into_iter()
        .map(|pairing| blend_node(pairing, t))
        .collect::<Result<Vec<_>, _>>()?;

    let groups = pair_entries(&from.groups, &to.groups)
        .into_iter()
        .map(|pairing| blend_group(pairing, t))
        .collect::<Result<Vec<_>, _>>()?;

    let edges = pair_entries(&from.edges, &to.edges)
        .into_iter()
        .map(|pairing| blend_edge(pairing, t, samples))
        .collect::<Result<Vec<_>, _>>()?;

    let port_anchors = blend_anchors(&from.port_anchors, &to.port_anchors, t);
    let bounds = union_bounds(nodes.iter().map(|n| &n.rect).chain(groups.iter().map(|g| &g.rect)));

    Ok(BlendedGeometry { nodes, groups, edges, port_anchors, bounds })
}

/// Interpolate two polylines at eased progress `t`.
///
/// Equal point counts blend pairwise; otherwise both sides are resampled to
/// `samples` points at equal arc-length spacing and then blended.
///
/// # Errors
///
/// [`MorphError::SampleCountTooSmall`] if resampling is needed and
/// `samples < 2`; [`MorphError::ResampleLengthMismatch`] if a degenerate
/// side could not be resampled.
pub fn blend_polyline(from: &[Point], to: &[Point], t: f64, samples: usize) -> Result<Vec<Point>, MorphError> {
    if from.len() == to.len() {
        return Ok(lerp_points(from, to, t));
    }
    let from = resample_polyline(from, samples)?;
    let to = resample_polyline(to, samples)?;
    if from.len() != to.len() {
        return Err(MorphError::ResampleLengthMismatch { from: from.len(), to: to.len() });
    }
    Ok(lerp_points(&from, &to, t))
}

/// Redistribute `samples` points evenly along the polyline's arc length.
///
/// The first and last samples are the polyline's endpoints. Polylines with
/// fewer than two points are returned unchanged.
///
/// # Errors
///
/// [`MorphError::SampleCountTooSmall`] when `samples < 2`.
pub fn resample_polyline(points: &[Point], samples: usize) -> Result<Vec<Point>, MorphError> {
    if samples < 2 {
        return Err(MorphError::SampleCountTooSmall(samples));
    }
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Ok(points.to_vec());
    };
    if points.len() < 2 {
        return Ok(points.to_vec());
    }

    let total = polyline_length(points);
    if total <= 0.0 {
        return Ok(vec![first; samples]);
    }

    let mut cumulative = Vec::with_capacity(points.len());
    let mut running = 0.0;
    cumulative.push(running);
    for pair in points.windows(2) {
        running += pair[0].distance(pair[1]);
        cumulative.push(running);
    }

    let mut out = Vec::with_capacity(samples);
    let mut segment = 0;
    #[allow(clippy::cast_precision_loss)]
    let step = total / (samples - 1) as f64;
    for i in 0..samples {
        if i == samples - 1 {
            out.push(last);
            break;
        }
        #[allow(clippy::cast_precision_loss)]
        let target = step * i as f64;
        while segment < points.len() - 2 && cumulative[segment + 1] < target {
            segment += 1;
        }
        let seg_len = cumulative[segment + 1] - cumulative[segment];
        let local = if seg_len > 0.0 { ((target - cumulative[segment]) / seg_len).clamp(0.0, 1.0) } else { 0.0 };
        out.push(points[segment].lerp(points[segment + 1], local));
    }
    Ok(out)
}

// --- Pairing ---

enum Pairing<'a, T> {
    Both(&'a T, &'a T),
    Entering(&'a T),
    Leaving(&'a T),
}

/// Destination entries in order, then source-only entries in source order.
fn pair_entries<'a, T: Keyed>(from: &'a [T], to: &'a [T]) -> Vec<Pairing<'a, T>> {
    let mut from_index: HashMap<&T::Id, &T> = HashMap::with_capacity(from.len());
    for entry in from {
        from_index.entry(entry.key()).or_insert(entry);
    }
    let to_ids: HashSet<&T::Id> = to.iter().map(Keyed::key).collect();

    let mut pairs = Vec::with_capacity(to.len() + from.len());
    for entry in to {
        match from_index.get(entry.key()).copied() {
            Some(previous) => pairs.push(Pairing::Both(previous, entry)),
            None => pairs.push(Pairing::Entering(entry)),
        }
    }
    for entry in from {
        if !to_ids.contains(entry.key()) {
            pairs.push(Pairing::Leaving(entry));
        }
    }
    pairs
}

// --- Per-entity blending ---

fn blend_node(pairing: Pairing<'_, NodeGeometry>, t: f64) -> Result<BlendedNode, MorphError> {
    let (id, rect, opacity) = match pairing {
        Pairing::Both(a, b) => {
            checked(&a.rect, EntityKind::Node, &a.id, Side::From)?;
            checked(&b.rect, EntityKind::Node, &b.id, Side::To)?;
            (&b.id, a.rect.lerp(&b.rect, t), 1.0)
        }
        Pairing::Entering(b) => (&b.id, checked(&b.rect, EntityKind::Node, &b.id, Side::To)?, t),
        Pairing::Leaving(a) => (&a.id, checked(&a.rect, EntityKind::Node, &a.id, Side::From)?, 1.0 - t),
    };
    Ok(BlendedNode { id: id.clone(), rect, opacity })
}

fn blend_group(pairing: Pairing<'_, GroupGeometry>, t: f64) -> Result<BlendedGroup, MorphError> {
    let blended = match pairing {
        Pairing::Both(a, b) => {
            checked(&a.rect, EntityKind::Group, &a.id, Side::From)?;
            checked(&b.rect, EntityKind::Group, &b.id, Side::To)?;
            let label_rect = match (&a.label_rect, &b.label_rect) {
                (Some(la), Some(lb)) => {
                    checked(la, EntityKind::GroupLabel, &a.id, Side::From)?;
                    checked(lb, EntityKind::GroupLabel, &b.id, Side::To)?;
                    Some(la.lerp(lb, t))
                }
                (Some(la), None) => Some(checked(la, EntityKind::GroupLabel, &a.id, Side::From)?),
                (None, Some(lb)) => Some(checked(lb, EntityKind::GroupLabel, &b.id, Side::To)?),
                (None, None) => None,
            };
            BlendedGroup { id: b.id.clone(), rect: a.rect.lerp(&b.rect, t), label_rect, opacity: 1.0 }
        }
        Pairing::Entering(b) => BlendedGroup {
            id: b.id.clone(),
            rect: checked(&b.rect, EntityKind::Group, &b.id, Side::To)?,
            label_rect: checked_label(b, Side::To)?,
            opacity: t,
        },
        Pairing::Leaving(a) => BlendedGroup {
            id: a.id.clone(),
            rect: checked(&a.rect, EntityKind::Group, &a.id, Side::From)?,
            label_rect: checked_label(a, Side::From)?,
            opacity: 1.0 - t,
        },
    };
    Ok(blended)
}

fn blend_edge(pairing: Pairing<'_, EdgeGeometry>, t: f64, samples: usize) -> Result<BlendedEdge, MorphError> {
    let blended = match pairing {
        Pairing::Both(a, b) => {
            checked_points(a, Side::From)?;
            checked_points(b, Side::To)?;
            BlendedEdge { id: b.id.clone(), points: blend_polyline(&a.points, &b.points, t, samples)?, opacity: 1.0 }
        }
        Pairing::Entering(b) => BlendedEdge { id: b.id.clone(), points: checked_points(b, Side::To)?, opacity: t },
        Pairing::Leaving(a) => BlendedEdge { id: a.id.clone(), points: checked_points(a, Side::From)?, opacity: 1.0 - t },
    };
    Ok(blended)
}

fn blend_anchors(from: &BTreeMap<PortId, Point>, to: &BTreeMap<PortId, Point>, t: f64) -> BTreeMap<PortId, Point> {
    let mut anchors = BTreeMap::new();
    for (id, end) in to {
        let point = from.get(id).map_or(*end, |start| start.lerp(*end, t));
        anchors.insert(id.clone(), point);
    }
    for (id, start) in from {
        anchors.entry(id.clone()).or_insert(*start);
    }
    anchors
}

// --- Helpers ---

fn lerp_points(from: &[Point], to: &[Point], t: f64) -> Vec<Point> {
    from.iter().zip(to).map(|(a, b)| a.lerp(*b, t)).collect()
}

fn checked(rect: &Rect, entity: EntityKind, id: &impl fmt::Display, side: Side) -> Result<Rect, MorphError> {
    match rect.fault() {
        None => Ok(*rect),
        Some(field) => Err(MorphError::InvalidRect { entity, id: id.to_string(), side, field }),
    }
}

fn checked_points(edge: &EdgeGeometry, side: Side) -> Result<Vec<Point>, MorphError> {
    match edge.points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        None => Ok(edge.points.clone()),
        Some(index) => Err(MorphError::InvalidPoint { entity: EntityKind::Edge, id: edge.id.to_string(), side, index }),
    }
}

fn checked_label(group: &GroupGeometry, side: Side) -> Result<Option<Rect>, MorphError> {
    group.label_rect.as_ref().map(|label| checked(label, EntityKind::GroupLabel, &group.id, side)).transpose()
}
