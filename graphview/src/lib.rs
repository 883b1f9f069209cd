//! Viewport camera and graph-morph engine for the dependency graph view.
//!
//! The graph view renders a live diagram of runtime dependency state (tasks,
//! locks, channels, connections). Layout is computed elsewhere; this crate owns
//! the two pieces with real state: the camera that the user drives with wheel
//! and pointer input, and the interpolation that morphs one layout snapshot
//! into the next while the graph changes shape. Rendering technology is left to
//! the host, which receives a single view transform plus blended geometry.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`camera`] | Camera value, world/screen conversion, fit-bounds solver |
//! | [`gesture`] | Gesture controller: wheel zoom, pan sessions, eased camera animation |
//! | [`surface`] | Viewport surface: resize observation, host element/frame plumbing |
//! | [`input`] | Input event types and the [`input::Action`]s handlers return |
//! | [`state`] | Observable state cell used for camera and viewport size |
//! | [`geometry`] | Layout snapshot types and branded entity ids |
//! | [`morph`] | Snapshot interpolation, including arc-length edge resampling |
//! | [`transition`] | Time-driven morph between consecutive snapshots |
//! | [`config`] | Tunables with env/JSON loading |
//! | [`consts`] | Shared numeric constants (zoom limits, wheel tuning, etc.) |

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

pub mod camera;
pub mod config;
pub mod consts;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod morph;
pub mod state;
pub mod surface;
pub mod transition;

/// Ease-out cubic: `1 - (1 - t)^3`, with `t` clamped to `[0, 1]`.
///
/// Shared by camera animation and snapshot morphing so both settle with the
/// same feel.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Linear interpolation between `a` and `b`.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
