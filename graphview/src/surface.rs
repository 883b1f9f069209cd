//! Viewport surface: owns the host element, observes its size, and carries
//! out the actions the gesture controller returns.
//!
//! The host wires its DOM (or native) events into the `handle_*` methods and
//! its resize observer into [`ViewportSurface::on_resize`]. Everything the
//! surface needs from the host goes through two small traits:
//! [`SurfaceElement`] for geometry and pointer capture, and
//! [`FrameScheduler`] for display-refresh callbacks. A missing element,
//! unsupported capture, or an unmeasured size are normal during mount and
//! unmount, and degrade to no-ops.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::fmt;

use tracing::warn;

use crate::camera::{Camera, ViewTransform, ViewportSize};
use crate::config::ViewConfig;
use crate::geometry::{Point, Rect};
use crate::gesture::{GestureController, ViewportGeometry};
use crate::input::{Action, PointerEvent, PointerId, WheelEvent};
use crate::state::{StateCell, SubscriptionId};

/// The element the graph is rendered into.
pub trait SurfaceElement {
    /// Client-space position of the element's top-left corner, or `None` if
    /// it is not currently laid out.
    fn client_origin(&self) -> Option<Point>;

    /// Route further events for `pointer_id` to this element. Returns `false`
    /// when capture is unsupported or refused.
    fn set_pointer_capture(&mut self, pointer_id: PointerId) -> bool;

    fn release_pointer_capture(&mut self, pointer_id: PointerId);
}

/// Opaque handle for one scheduled display-refresh callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's display-refresh primitive (e.g. `requestAnimationFrame`).
///
/// The host calls [`ViewportSurface::on_frame`] with the returned handle
/// once the frame fires.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for headless hosts and tests: hands out sequential handles and
/// remembers which are still outstanding.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles requested and neither fired nor cancelled.
    #[must_use]
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    #[must_use]
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    /// Take every outstanding handle, as if the display refreshed.
    pub fn drain(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

pub struct ViewportSurface<E, S> {
    element: Option<E>,
    scheduler: S,
    controller: GestureController,
    size: StateCell<ViewportSize>,
    measured: bool,
    transform: ViewTransform,
    frame: Option<FrameHandle>,
    captured: Option<PointerId>,
    on_background_click: Option<Box<dyn FnMut()>>,
}

impl<E, S> fmt::Debug for ViewportSurface<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportSurface")
            .field("mounted", &self.element.is_some())
            .field("controller", &self.controller)
            .field("size", self.size.get())
            .field("measured", &self.measured)
            .field("transform", &self.transform)
            .field("frame", &self.frame)
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}

impl<E: SurfaceElement, S: FrameScheduler> ViewportSurface<E, S> {
    #[must_use]
    pub fn new(scheduler: S, config: ViewConfig) -> Self {
        let size = config.default_viewport;
        let controller = GestureController::new(config);
        let transform = controller.camera().transform(size);
        Self {
            element: None,
            scheduler,
            controller,
            size: StateCell::new(size),
            measured: false,
            transform,
            frame: None,
            captured: None,
            on_background_click: None,
        }
    }

    // --- Lifecycle ---

    /// Attach the rendering element.
    pub fn mount(&mut self, element: E) {
        self.element = Some(element);
        self.sync_viewport();
    }

    /// Detach the element, releasing capture and dropping any scheduled frame.
    pub fn unmount(&mut self) -> Option<E> {
        let actions = self.controller.cancel_animation();
        self.process(actions);
        if let Some(session) = self.controller.pan_session() {
            let actions = self.controller.on_lost_capture(session.pointer_id);
            self.process(actions);
        }
        let element = self.element.take();
        self.sync_viewport();
        element
    }

    /// Resize observation entry point. Degenerate sizes are ignored.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        let size = ViewportSize::new(width, height);
        if !size.is_measured() {
            warn!(width, height, "ignoring degenerate surface size");
            return;
        }
        self.measured = true;
        self.size.set(size);
        self.sync_viewport();
        self.refresh_transform();
    }

    pub fn set_on_background_click(&mut self, callback: impl FnMut() + 'static) {
        self.on_background_click = Some(Box::new(callback));
    }

    pub fn subscribe_size(&mut self, callback: impl FnMut(&ViewportSize) + 'static) -> SubscriptionId {
        self.size.subscribe(callback)
    }

    // --- Queries ---

    /// Latest observed size, or the configured default before first measurement.
    #[must_use]
    pub fn size(&self) -> ViewportSize {
        *self.size.get()
    }

    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Root transform in `translate(tx ty) scale(s)` form.
    #[must_use]
    pub fn transform_string(&self) -> String {
        self.transform.to_string()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.controller.camera()
    }

    #[must_use]
    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    #[must_use]
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Pointer currently captured by the surface, if any.
    #[must_use]
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }

    /// Map client coordinates to world coordinates.
    ///
    /// Before the element is laid out the client frame is taken to coincide
    /// with the surface frame.
    #[must_use]
    pub fn client_to_graph(&self, client_x: f64, client_y: f64) -> Point {
        let origin = self.element.as_ref().and_then(SurfaceElement::client_origin).unwrap_or_default();
        let local = Point::new(client_x - origin.x, client_y - origin.y);
        self.controller.camera().screen_to_world(self.size(), local)
    }

    // --- Input ---

    /// Returns whether the surface took the event, so the host can suppress
    /// native scrolling. A tick at the zoom clamp is still taken.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> bool {
        self.sync_viewport();
        let handled = !event.region.owns_scroll && self.controller.viewport().is_some();
        let actions = self.controller.on_wheel(event);
        self.process(actions);
        handled
    }

    pub fn handle_pointer_down(&mut self, event: &PointerEvent) {
        let actions = self.controller.on_pointer_down(event);
        self.process(actions);
    }

    pub fn handle_pointer_move(&mut self, event: &PointerEvent) {
        let actions = self.controller.on_pointer_move(event);
        self.process(actions);
    }

    pub fn handle_pointer_up(&mut self, event: &PointerEvent) {
        let actions = self.controller.on_pointer_up(event);
        self.process(actions);
    }

    pub fn handle_pointer_cancel(&mut self, pointer_id: PointerId) {
        let actions = self.controller.on_pointer_cancel(pointer_id);
        self.process(actions);
    }

    pub fn handle_lost_capture(&mut self, pointer_id: PointerId) {
        let actions = self.controller.on_lost_capture(pointer_id);
        self.process(actions);
        if self.captured == Some(pointer_id) {
            self.captured = None;
        }
    }

    /// Display-refresh callback. Frames other than the one last requested
    /// are stale and ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) {
        if self.frame != Some(handle) {
            return;
        }
        self.frame = None;
        let actions = self.controller.on_frame(now_ms);
        self.process(actions);
    }

    // --- Programmatic API ---

    pub fn fit_view(&mut self, bounds: Option<&Rect>) {
        let actions = self.controller.fit_view(bounds);
        self.process(actions);
    }

    pub fn animate_to(&mut self, target: Camera, duration_ms: f64, now_ms: f64) {
        let actions = self.controller.animate_to(target, duration_ms, now_ms);
        self.process(actions);
    }

    pub fn pan_to(&mut self, world_x: f64, world_y: f64, duration_ms: f64, now_ms: f64) {
        let actions = self.controller.pan_to(world_x, world_y, duration_ms, now_ms);
        self.process(actions);
    }

    pub fn focus_rect(&mut self, rect: &Rect, duration_ms: f64, now_ms: f64) {
        let actions = self.controller.focus_rect(rect, duration_ms, now_ms);
        self.process(actions);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        let actions = self.controller.set_camera(camera);
        self.process(actions);
    }

    pub fn follow(&mut self, target: Camera, duration_ms: f64, now_ms: f64, issued_at_version: u64) {
        let actions = self.controller.follow(target, duration_ms, now_ms, issued_at_version);
        self.process(actions);
    }

    pub fn subscribe_camera(&mut self, callback: impl FnMut(&Camera) + 'static) -> SubscriptionId {
        self.controller.subscribe_camera(callback)
    }

    // --- Internals ---

    fn sync_viewport(&mut self) {
        let origin = self.element.as_ref().and_then(SurfaceElement::client_origin);
        let geometry = origin.map(|origin| ViewportGeometry { origin, size: self.size() });
        self.controller.set_viewport(geometry);
    }

    fn refresh_transform(&mut self) {
        self.transform = self.controller.camera().transform(self.size());
    }

    fn process(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::CameraChanged => self.refresh_transform(),
                Action::CapturePointer(pointer_id) => {
                    if let Some(element) = self.element.as_mut()
                        && element.set_pointer_capture(pointer_id)
                    {
                        self.captured = Some(pointer_id);
                    }
                }
                Action::ReleasePointer(pointer_id) => {
                    if self.captured == Some(pointer_id) {
                        self.captured = None;
                        if let Some(element) = self.element.as_mut() {
                            element.release_pointer_capture(pointer_id);
                        }
                    }
                }
                Action::RequestFrame => {
                    if self.frame.is_none() {
                        self.frame = Some(self.scheduler.request_frame());
                    }
                }
                Action::CancelFrame => {
                    if let Some(handle) = self.frame.take() {
                        self.scheduler.cancel_frame(handle);
                    }
                }
                Action::BackgroundClick => {
                    if let Some(callback) = self.on_background_click.as_mut() {
                        callback();
                    }
                }
            }
        }
    }
}
