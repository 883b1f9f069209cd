//! Time-driven morph between consecutive layout snapshots.
//!
//! Each layout pass hands over a new snapshot. A [`MorphTransition`] remembers
//! which pair is being blended and when the blend started; the host asks it
//! for a [`BlendedGeometry`] on every display frame.

#[cfg(test)]
#[path = "transition_test.rs"]
mod transition_test;

use std::sync::Arc;

use tracing::debug;

use crate::geometry::GraphGeometry;
use crate::morph::{BlendedGeometry, MorphError, interpolate_with_samples};

#[derive(Debug, Clone)]
pub struct MorphTransition {
    from: Arc<GraphGeometry>,
    to: Arc<GraphGeometry>,
    start_ms: f64,
    duration_ms: f64,
    samples: usize,
}

impl MorphTransition {
    /// Start blending `from` into `to` at `start_ms`.
    ///
    /// `samples` is the arc-length sample count for re-routed edges.
    #[must_use]
    pub fn new(from: Arc<GraphGeometry>, to: Arc<GraphGeometry>, start_ms: f64, duration_ms: f64, samples: usize) -> Self {
        debug!(
            from_nodes = from.nodes.len(),
            to_nodes = to.nodes.len(),
            duration_ms,
            "morph transition started"
        );
        Self { from, to, start_ms, duration_ms, samples }
    }

    /// A transition that is already settled on `snapshot`.
    #[must_use]
    pub fn settled(snapshot: Arc<GraphGeometry>, samples: usize) -> Self {
        Self { from: Arc::clone(&snapshot), to: snapshot, start_ms: 0.0, duration_ms: 0.0, samples }
    }

    #[must_use]
    pub fn from_snapshot(&self) -> &Arc<GraphGeometry> {
        &self.from
    }

    #[must_use]
    pub fn to_snapshot(&self) -> &Arc<GraphGeometry> {
        &self.to
    }

    /// Raw (uneased) progress in `[0, 1]`. Non-positive durations are complete.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms.is_nan() || self.duration_ms <= 0.0 {
            return 1.0;
        }
        let t = (now_ms - self.start_ms) / self.duration_ms;
        if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) }
    }

    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Blended geometry to draw at `now_ms`.
    ///
    /// # Errors
    ///
    /// Propagates [`MorphError`] from interpolation.
    pub fn frame(&self, now_ms: f64) -> Result<BlendedGeometry, MorphError> {
        interpolate_with_samples(&self.from, &self.to, self.progress(now_ms), self.samples)
    }

    /// Supersede the transition with a newly arrived snapshot.
    ///
    /// The next blend starts from the previous destination; snapshots are
    /// immutable, so the partially blended frame is not reused.
    pub fn retarget(&mut self, next: Arc<GraphGeometry>, now_ms: f64) {
        debug!(
            finished = self.is_finished(now_ms),
            next_nodes = next.nodes.len(),
            "morph transition retargeted"
        );
        self.from = std::mem::replace(&mut self.to, next);
        self.start_ms = now_ms;
    }
}
