//! Input model: pointer buttons, wheel deltas, region flags, and the actions
//! handlers hand back to the host.
//!
//! Events carry client-space coordinates as reported by the host. The
//! originating element is reduced to a [`Region`], which only answers the
//! escape-hatch questions the gesture controller asks: does this region own
//! its own scrolling, its own dragging, and is it the empty background.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Identifier the host assigns to an active pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// Unit of a wheel delta, matching the DOM `deltaMode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Map a DOM `deltaMode` integer. Unknown values are treated as pixels.
    #[must_use]
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }

    /// Multiplier that converts a delta in this unit into pixels.
    #[must_use]
    pub fn pixel_scale(self, line_px: f64, page_px: f64) -> f64 {
        match self {
            Self::Pixel => 1.0,
            Self::Line => line_px,
            Self::Page => page_px,
        }
    }
}

/// What the element under an event is known to do with input.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    /// The region scrolls its own content; wheel events belong to it.
    pub owns_scroll: bool,
    /// The region handles its own dragging; pointer-down must not start a pan.
    pub owns_drag: bool,
    /// The element is the explicit empty-background marker.
    pub background: bool,
}

impl Region {
    /// Plain graph background.
    #[must_use]
    pub fn background() -> Self {
        Self { background: true, ..Self::default() }
    }

    /// Graph content such as a node, which still lets the canvas pan.
    #[must_use]
    pub fn content() -> Self {
        Self::default()
    }

    /// A nested scroll container (e.g. a details table inside a node).
    #[must_use]
    pub fn scrollable() -> Self {
        Self { owns_scroll: true, ..Self::default() }
    }

    /// A widget that owns drag gestures (e.g. a slider).
    #[must_use]
    pub fn draggable() -> Self {
        Self { owns_drag: true, ..Self::default() }
    }
}

/// Wheel / trackpad scroll event.
#[derive(Debug, Clone, Copy)]
pub struct WheelEvent {
    /// Cursor position in client coordinates.
    pub client: Point,
    /// Vertical scroll amount in `mode` units (positive = down / zoom out).
    pub delta_y: f64,
    pub mode: DeltaMode,
    pub region: Region,
}

impl WheelEvent {
    /// Vertical delta converted to pixels, given the pixel size of one line
    /// and one page.
    #[must_use]
    pub fn normalized_delta_y(&self, line_px: f64, page_px: f64) -> f64 {
        self.delta_y * self.mode.pixel_scale(line_px, page_px)
    }
}

/// Pointer event payload shared by down/move/up/cancel.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    /// Pointer position in client coordinates.
    pub client: Point,
    pub button: Button,
    /// Element the event originated from. Only consulted on pointer-down.
    pub region: Region,
}

impl PointerEvent {
    /// Primary-button event over the plain background.
    #[must_use]
    pub fn primary(pointer_id: i32, x: f64, y: f64) -> Self {
        Self { pointer_id: PointerId(pointer_id), client: Point::new(x, y), button: Button::Primary, region: Region::background() }
    }

    /// Same event with a different originating region.
    #[must_use]
    pub fn over(self, region: Region) -> Self {
        Self { region, ..self }
    }
}

/// Side effects returned from gesture handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The camera changed; the root transform must be refreshed.
    CameraChanged,
    /// Route subsequent events for this pointer to the surface.
    CapturePointer(PointerId),
    /// Stop routing events for this pointer to the surface.
    ReleasePointer(PointerId),
    /// Schedule one animation frame.
    RequestFrame,
    /// Drop any scheduled animation frame.
    CancelFrame,
    /// A press on the empty background was released without dragging.
    BackgroundClick,
}
