//! Shared numeric constants for the graph view.

// ── Zoom ────────────────────────────────────────────────────────

/// Lowest zoom the camera may reach.
pub const MIN_ZOOM: f64 = 0.1;

/// Highest zoom the camera may reach.
pub const MAX_ZOOM: f64 = 3.0;

/// Padding, in screen pixels, kept around content when fitting the view.
pub const FIT_PADDING_PX: f64 = 40.0;

/// Fit-view never zooms in past this, so tiny graphs are not blown up.
pub const MAX_FIT_ZOOM: f64 = 1.2;

// ── Wheel ───────────────────────────────────────────────────────

/// Exponent scale applied to normalized wheel delta.
pub const WHEEL_SENSITIVITY: f64 = 0.0042;

/// Fraction of wheel response removed as zoom reaches [`MAX_ZOOM`].
pub const WHEEL_MAX_DAMPING: f64 = 0.55;

/// Pixels per line for `DeltaMode::Line` wheel events.
pub const LINE_DELTA_PX: f64 = 16.0;

/// Pixels per page for `DeltaMode::Page` wheel events.
pub const PAGE_DELTA_PX: f64 = 800.0;

// ── Pointer ─────────────────────────────────────────────────────

/// Movement, in screen pixels along either axis, that turns a press into a drag.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

// ── Animation ───────────────────────────────────────────────────

/// Camera moves smaller than this (world units) are not animated.
pub const NEGLIGIBLE_PAN: f64 = 0.01;

/// Zoom changes smaller than this are not animated.
pub const NEGLIGIBLE_ZOOM: f64 = 0.0001;

/// Default duration for programmatic camera moves.
pub const DEFAULT_ANIMATION_MS: f64 = 300.0;

// ── Viewport ────────────────────────────────────────────────────

/// Viewport width assumed before the surface has been measured.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;

/// Viewport height assumed before the surface has been measured.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

// ── Morph ───────────────────────────────────────────────────────

/// Samples per polyline when edge routes change topology between snapshots.
pub const RESAMPLE_COUNT: usize = 24;
