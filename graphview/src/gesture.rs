//! Gesture controller: the single writer of the camera.
//!
//! Wheel ticks zoom around the cursor, primary-button drags pan, and
//! programmatic moves run as an eased animation driven one display frame at a
//! time. Every handler returns the [`Action`]s the host must carry out
//! (pointer capture, frame scheduling, background-click dispatch), so the state
//! machine itself never touches a DOM, a window, or a timer.
//!
//! Any user input cancels a running animation before applying its own effect,
//! and bumps a manual-interaction version that follow-style callers check to
//! avoid fighting the user.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use tracing::{debug, trace};

use crate::camera::{Camera, ViewportSize, clamp_zoom, fit_bounds};
use crate::config::ViewConfig;
use crate::consts::{MAX_ZOOM, MIN_ZOOM};
use crate::ease_out_cubic;
use crate::geometry::{Point, Rect};
use crate::input::{Action, Button, PointerEvent, PointerId, WheelEvent};
use crate::state::{StateCell, SubscriptionId};

/// Where the rendering surface sits in client space, and how big it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    /// Client-space position of the surface's top-left corner.
    pub origin: Point,
    pub size: ViewportSize,
}

impl ViewportGeometry {
    /// Convert a client-space point into the surface's local frame.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.origin.x, client.y - self.origin.y)
    }
}

/// An in-flight programmatic camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSession {
    pub start: Camera,
    pub target: Camera,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl AnimationSession {
    /// Linear progress in `[0, 1]` at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let t = (now_ms - self.start_ms) / self.duration_ms;
        if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) }
    }

    /// Camera shown at `now_ms`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> Camera {
        self.start.lerp(&self.target, ease_out_cubic(self.progress(now_ms)))
    }
}

/// An active primary-button drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSession {
    pub pointer_id: PointerId,
    pub start_client: Point,
    pub start_camera: Camera,
    /// The press landed on the empty background.
    pub on_background: bool,
}

#[derive(Debug)]
pub struct GestureController {
    camera: StateCell<Camera>,
    viewport: Option<ViewportGeometry>,
    animation: Option<AnimationSession>,
    pan: Option<PanSession>,
    drag_occurred: bool,
    manual_version: u64,
    config: ViewConfig,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl GestureController {
    #[must_use]
    pub fn new(config: ViewConfig) -> Self {
        Self {
            camera: StateCell::new(Camera::default()),
            viewport: None,
            animation: None,
            pan: None,
            drag_occurred: false,
            manual_version: 0,
            config,
        }
    }

    // --- Introspection ---

    /// The live camera, read without any batching delay.
    #[must_use]
    pub fn camera(&self) -> Camera {
        *self.camera.get()
    }

    /// Destination of the running animation, if any.
    #[must_use]
    pub fn pending_target(&self) -> Option<Camera> {
        self.animation.map(|session| session.target)
    }

    #[must_use]
    pub fn animation(&self) -> Option<AnimationSession> {
        self.animation
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Incremented on every wheel tick and pan move.
    #[must_use]
    pub fn manual_interaction_version(&self) -> u64 {
        self.manual_version
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    #[must_use]
    pub fn pan_session(&self) -> Option<PanSession> {
        self.pan
    }

    /// Whether the current (or most recent) press moved past the drag threshold.
    #[must_use]
    pub fn drag_occurred(&self) -> bool {
        self.drag_occurred
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Measured viewport size, or the configured default before measurement.
    #[must_use]
    pub fn viewport_size(&self) -> ViewportSize {
        self.viewport.map_or(self.config.default_viewport, |geometry| geometry.size)
    }

    #[must_use]
    pub fn viewport(&self) -> Option<ViewportGeometry> {
        self.viewport
    }

    /// Register a callback run after every camera change.
    pub fn subscribe_camera(&mut self, callback: impl FnMut(&Camera) + 'static) -> SubscriptionId {
        self.camera.subscribe(callback)
    }

    pub fn unsubscribe_camera(&mut self, id: SubscriptionId) -> bool {
        self.camera.unsubscribe(id)
    }

    // --- Viewport ---

    /// Update surface geometry. `None` means the surface is not mounted.
    pub fn set_viewport(&mut self, viewport: Option<ViewportGeometry>) {
        self.viewport = viewport;
    }

    // --- Input events ---

    /// Zoom around the cursor.
    ///
    /// Ignored over regions that scroll their own content, and while the
    /// surface is unmounted.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> Vec<Action> {
        if event.region.owns_scroll {
            return Vec::new();
        }
        let Some(viewport) = self.viewport else {
            return Vec::new();
        };

        let mut actions = self.cancel_animation();
        self.manual_version += 1;

        let camera = self.camera();
        let local = viewport.to_local(event.client);
        let anchor = camera.screen_to_world(viewport.size, local);

        let delta = event.normalized_delta_y(self.config.line_delta_px, self.config.page_delta_px);
        let factor = (-delta * self.config.wheel_sensitivity * self.wheel_damping(camera.zoom)).exp();
        let zoom = clamp_zoom(camera.zoom * factor);

        let center = viewport.size.center();
        let next = Camera { x: anchor.x - (local.x - center.x) / zoom, y: anchor.y - (local.y - center.y) / zoom, zoom };
        trace!(from = camera.zoom, to = zoom, "wheel zoom");
        self.write_camera(next, &mut actions);
        actions
    }

    /// Start a pan session on a primary-button press.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> Vec<Action> {
        if event.button != Button::Primary || event.region.owns_drag {
            return Vec::new();
        }

        let mut actions = self.cancel_animation();
        if let Some(previous) = self.pan.take() {
            actions.push(Action::ReleasePointer(previous.pointer_id));
        }
        actions.push(Action::CapturePointer(event.pointer_id));
        self.pan = Some(PanSession {
            pointer_id: event.pointer_id,
            start_client: event.client,
            start_camera: self.camera(),
            on_background: event.region.background,
        });
        self.drag_occurred = false;
        actions
    }

    /// Translate the camera while a pan session is active.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> Vec<Action> {
        let Some(session) = self.pan else {
            return Vec::new();
        };
        if session.pointer_id != event.pointer_id {
            return Vec::new();
        }

        self.manual_version += 1;
        let mut actions = self.cancel_animation();

        let dx = event.client.x - session.start_client.x;
        let dy = event.client.y - session.start_client.y;
        let threshold = self.config.drag_threshold_px;
        if dx.abs() > threshold || dy.abs() > threshold {
            self.drag_occurred = true;
        }

        // Divide by the zoom at press time, not the live zoom, so the pan
        // offset never feeds back into itself.
        let start = session.start_camera;
        let next = Camera {
            x: start.x - start.screen_dist_to_world(dx),
            y: start.y - start.screen_dist_to_world(dy),
            zoom: self.camera().zoom,
        };
        trace!(dx, dy, "pan");
        self.write_camera(next, &mut actions);
        actions
    }

    /// End the pan session. A clean release on the background without a drag
    /// is reported as a background click.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> Vec<Action> {
        self.end_pan(event.pointer_id, true)
    }

    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId) -> Vec<Action> {
        self.end_pan(pointer_id, false)
    }

    /// The host forcibly took capture away (e.g. the window lost focus).
    pub fn on_lost_capture(&mut self, pointer_id: PointerId) -> Vec<Action> {
        self.end_pan(pointer_id, false)
    }

    // --- Programmatic moves ---

    /// Animate to `target` over `duration_ms`, starting at `now_ms`.
    ///
    /// Replaces any running animation. Imperceptible moves are skipped, and a
    /// non-positive duration jumps straight to the target.
    pub fn animate_to(&mut self, target: Camera, duration_ms: f64, now_ms: f64) -> Vec<Action> {
        let mut actions = self.cancel_animation();
        let target = target.clamped();
        let current = self.camera();

        if self.is_negligible(&current, &target) {
            debug!(?target, "camera move below threshold, skipping animation");
            return actions;
        }
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            self.write_camera(target, &mut actions);
            return actions;
        }

        debug!(?current, ?target, duration_ms, "camera animation started");
        self.animation = Some(AnimationSession { start: current, target, start_ms: now_ms, duration_ms });
        actions.push(Action::RequestFrame);
        actions
    }

    /// Animate the camera center to a world point, keeping the current zoom.
    pub fn pan_to(&mut self, world_x: f64, world_y: f64, duration_ms: f64, now_ms: f64) -> Vec<Action> {
        let zoom = self.camera().zoom;
        self.animate_to(Camera::new(world_x, world_y, zoom), duration_ms, now_ms)
    }

    /// Animate so `rect` is framed the way fit-view would frame it.
    pub fn focus_rect(&mut self, rect: &Rect, duration_ms: f64, now_ms: f64) -> Vec<Action> {
        let target = fit_bounds(rect, self.viewport_size(), self.config.fit_padding, self.config.max_fit_zoom);
        self.animate_to(target, duration_ms, now_ms)
    }

    /// Programmatic follow move, abandoned if the user has interacted since
    /// `issued_at_version` was read from [`Self::manual_interaction_version`].
    pub fn follow(&mut self, target: Camera, duration_ms: f64, now_ms: f64, issued_at_version: u64) -> Vec<Action> {
        if issued_at_version != self.manual_version {
            debug!(issued_at_version, current = self.manual_version, "follow skipped after manual interaction");
            return Vec::new();
        }
        self.animate_to(target, duration_ms, now_ms)
    }

    /// Advance the running animation to `now_ms`.
    pub fn on_frame(&mut self, now_ms: f64) -> Vec<Action> {
        let Some(session) = self.animation else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if session.progress(now_ms) >= 1.0 {
            self.animation = None;
            self.write_camera(session.target, &mut actions);
            debug!(target = ?session.target, "camera animation finished");
        } else {
            self.write_camera(session.sample(now_ms), &mut actions);
            actions.push(Action::RequestFrame);
        }
        actions
    }

    /// Frame `bounds` immediately. A snapshot with no bounds leaves the camera alone.
    pub fn fit_view(&mut self, bounds: Option<&Rect>) -> Vec<Action> {
        let Some(bounds) = bounds else {
            return Vec::new();
        };
        let mut actions = self.cancel_animation();
        let target = fit_bounds(bounds, self.viewport_size(), self.config.fit_padding, self.config.max_fit_zoom);
        debug!(?target, "fit view");
        self.write_camera(target, &mut actions);
        actions
    }

    /// Set the camera immediately, cancelling any animation.
    pub fn set_camera(&mut self, camera: Camera) -> Vec<Action> {
        let mut actions = self.cancel_animation();
        self.write_camera(camera.clamped(), &mut actions);
        actions
    }

    /// Drop the running animation, if any.
    pub fn cancel_animation(&mut self) -> Vec<Action> {
        if self.animation.take().is_some() {
            debug!("camera animation cancelled");
            vec![Action::CancelFrame]
        } else {
            Vec::new()
        }
    }

    // --- Internals ---

    fn end_pan(&mut self, pointer_id: PointerId, clean: bool) -> Vec<Action> {
        let Some(session) = self.pan else {
            return Vec::new();
        };
        if session.pointer_id != pointer_id {
            return Vec::new();
        }
        self.pan = None;

        let mut actions = vec![Action::ReleasePointer(pointer_id)];
        if clean && session.on_background && !self.drag_occurred {
            actions.push(Action::BackgroundClick);
        }
        actions
    }

    /// Wheel response multiplier: 1 at `MIN_ZOOM`, shrinking linearly to
    /// `1 - wheel_max_damping` at `MAX_ZOOM`.
    fn wheel_damping(&self, zoom: f64) -> f64 {
        let progress = ((zoom - MIN_ZOOM) / (MAX_ZOOM - MIN_ZOOM)).clamp(0.0, 1.0);
        1.0 - self.config.wheel_max_damping * progress
    }

    fn is_negligible(&self, a: &Camera, b: &Camera) -> bool {
        (a.x - b.x).abs() < self.config.negligible_pan
            && (a.y - b.y).abs() < self.config.negligible_pan
            && (a.zoom - b.zoom).abs() < self.config.negligible_zoom
    }

    fn write_camera(&mut self, camera: Camera, actions: &mut Vec<Action>) {
        if self.camera.set(camera) {
            actions.push(Action::CameraChanged);
        }
    }
}
