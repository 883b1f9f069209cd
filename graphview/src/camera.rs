#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};
use crate::geometry::{Point, Rect};

/// Size of the rendering surface in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether both extents are finite and strictly positive.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Camera state for the graph view.
///
/// `(x, y)` is the world-space point shown at the viewport center.
/// `zoom` is a uniform scale factor kept within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// The world point at the viewport center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same camera with zoom clamped into `[MIN_ZOOM, MAX_ZOOM]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { zoom: clamp_zoom(self.zoom), ..self }
    }

    /// Linear interpolation of center and zoom.
    #[must_use]
    pub fn lerp(&self, target: &Self, t: f64) -> Self {
        Self {
            x: crate::lerp(self.x, target.x, t),
            y: crate::lerp(self.y, target.y, t),
            zoom: crate::lerp(self.zoom, target.zoom, t),
        }
    }

    /// Convert a world-space point to surface-local screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, viewport: ViewportSize, world: Point) -> Point {
        let center = viewport.center();
        Point {
            x: (world.x - self.x) * self.zoom + center.x,
            y: (world.y - self.y) * self.zoom + center.y,
        }
    }

    /// Convert a surface-local screen point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, viewport: ViewportSize, screen: Point) -> Point {
        let center = viewport.center();
        Point {
            x: (screen.x - center.x) / self.zoom + self.x,
            y: (screen.y - center.y) / self.zoom + self.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Transform applied once at the root of the rendered graph content.
    #[must_use]
    pub fn transform(&self, viewport: ViewportSize) -> ViewTransform {
        let center = viewport.center();
        ViewTransform {
            translate_x: center.x - self.x * self.zoom,
            translate_y: center.y - self.y * self.zoom,
            scale: self.zoom,
        }
    }
}

/// Translate-then-scale composition mapping world space onto the surface.
///
/// Scale applies in the child coordinate space, so the translation already
/// accounts for zoom: `screen = world * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { translate_x: 0.0, translate_y: 0.0, scale: 1.0 }
    }
}

impl ViewTransform {
    #[must_use]
    pub fn apply(&self, world: Point) -> Point {
        Point::new(world.x * self.scale + self.translate_x, world.y * self.scale + self.translate_y)
    }
}

impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({} {}) scale({})", self.translate_x, self.translate_y, self.scale)
    }
}

/// Clamp a zoom factor into `[MIN_ZOOM, MAX_ZOOM]`.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return MIN_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Camera that frames `bounds` inside the viewport with `padding` pixels on
/// every side, centered on the bounds centroid.
///
/// Zoom is the tighter of the two axis ratios, held within
/// `[MIN_ZOOM, min(max_fit_zoom, MAX_ZOOM)]`.
#[must_use]
pub fn fit_bounds(bounds: &Rect, viewport: ViewportSize, padding: f64, max_fit_zoom: f64) -> Camera {
    let available_w = (viewport.width - padding * 2.0).max(1.0);
    let available_h = (viewport.height - padding * 2.0).max(1.0);
    let raw = (available_w / bounds.width).min(available_h / bounds.height);
    let ceiling = max_fit_zoom.min(MAX_ZOOM);
    let zoom = if raw.is_nan() { MIN_ZOOM } else { raw.min(ceiling).max(MIN_ZOOM) };
    let center = bounds.center();
    Camera { x: center.x, y: center.y, zoom }
}
