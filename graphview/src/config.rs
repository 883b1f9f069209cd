//! View tunables, parsed from JSON or environment variables.
//!
//! Zoom limits are global constants in [`crate::consts`]; everything that a
//! deployment might reasonably want to tune lives here instead.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::ViewportSize;
use crate::consts::{
    DEFAULT_ANIMATION_MS, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, DRAG_THRESHOLD_PX, FIT_PADDING_PX,
    LINE_DELTA_PX, MAX_FIT_ZOOM, MIN_ZOOM, NEGLIGIBLE_PAN, NEGLIGIBLE_ZOOM, PAGE_DELTA_PX, RESAMPLE_COUNT,
    WHEEL_MAX_DAMPING, WHEEL_SENSITIVITY,
};

/// Prefix for every environment variable read by [`ViewConfig::from_env`].
pub const ENV_PREFIX: &str = "GRAPHVIEW_";

/// Error returned when configuration is malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was set but did not parse.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },
    /// A field holds a value outside its allowed range.
    #[error("{field} out of range: {reason}")]
    OutOfRange { field: &'static str, reason: &'static str },
    /// The JSON document could not be parsed.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Screen-pixel padding around content when fitting.
    pub fit_padding: f64,
    /// Upper zoom bound used by fit-view.
    pub max_fit_zoom: f64,
    pub wheel_sensitivity: f64,
    /// Fraction of wheel response removed at the zoom ceiling, in `[0, 1)`.
    pub wheel_max_damping: f64,
    pub line_delta_px: f64,
    pub page_delta_px: f64,
    pub drag_threshold_px: f64,
    pub negligible_pan: f64,
    pub negligible_zoom: f64,
    /// Samples per polyline for arc-length resampling.
    pub resample_count: usize,
    /// Viewport assumed until the surface reports its size.
    pub default_viewport: ViewportSize,
    pub default_animation_ms: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fit_padding: FIT_PADDING_PX,
            max_fit_zoom: MAX_FIT_ZOOM,
            wheel_sensitivity: WHEEL_SENSITIVITY,
            wheel_max_damping: WHEEL_MAX_DAMPING,
            line_delta_px: LINE_DELTA_PX,
            page_delta_px: PAGE_DELTA_PX,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            negligible_pan: NEGLIGIBLE_PAN,
            negligible_zoom: NEGLIGIBLE_ZOOM,
            resample_count: RESAMPLE_COUNT,
            default_viewport: ViewportSize::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            default_animation_ms: DEFAULT_ANIMATION_MS,
        }
    }
}

impl ViewConfig {
    /// Build config from `GRAPHVIEW_*` environment variables over the defaults.
    ///
    /// Recognized: `GRAPHVIEW_FIT_PADDING`, `GRAPHVIEW_MAX_FIT_ZOOM`,
    /// `GRAPHVIEW_WHEEL_SENSITIVITY`, `GRAPHVIEW_WHEEL_MAX_DAMPING`,
    /// `GRAPHVIEW_DRAG_THRESHOLD_PX`, `GRAPHVIEW_RESAMPLE_COUNT`,
    /// `GRAPHVIEW_ANIMATION_MS`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidEnv`] for a variable that does not parse, or
    /// [`ConfigError::OutOfRange`] if the result fails [`ViewConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Same as [`ViewConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// As [`ViewConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        let read = |name: &str, default: f64| env_parse_f64(&lookup, name, default);

        cfg.fit_padding = read("FIT_PADDING", cfg.fit_padding)?;
        cfg.max_fit_zoom = read("MAX_FIT_ZOOM", cfg.max_fit_zoom)?;
        cfg.wheel_sensitivity = read("WHEEL_SENSITIVITY", cfg.wheel_sensitivity)?;
        cfg.wheel_max_damping = read("WHEEL_MAX_DAMPING", cfg.wheel_max_damping)?;
        cfg.drag_threshold_px = read("DRAG_THRESHOLD_PX", cfg.drag_threshold_px)?;
        cfg.default_animation_ms = read("ANIMATION_MS", cfg.default_animation_ms)?;

        let var = format!("{ENV_PREFIX}RESAMPLE_COUNT");
        if let Some(raw) = lookup(&var) {
            cfg.resample_count =
                raw.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnv { var, value: raw.clone() })?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed input, or
    /// [`ConfigError::OutOfRange`] if a field fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would break camera math or morphing.
    ///
    /// # Errors
    ///
    /// [`ConfigError::OutOfRange`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fit_padding.is_finite() || self.fit_padding < 0.0 {
            return Err(ConfigError::OutOfRange { field: "fit_padding", reason: "must be finite and >= 0" });
        }
        if !self.max_fit_zoom.is_finite() || self.max_fit_zoom < MIN_ZOOM {
            return Err(ConfigError::OutOfRange { field: "max_fit_zoom", reason: "must be finite and >= MIN_ZOOM" });
        }
        if !self.wheel_sensitivity.is_finite() || self.wheel_sensitivity <= 0.0 {
            return Err(ConfigError::OutOfRange { field: "wheel_sensitivity", reason: "must be finite and > 0" });
        }
        if !(0.0..1.0).contains(&self.wheel_max_damping) {
            return Err(ConfigError::OutOfRange { field: "wheel_max_damping", reason: "must be in [0, 1)" });
        }
        if !self.line_delta_px.is_finite() || self.line_delta_px <= 0.0 {
            return Err(ConfigError::OutOfRange { field: "line_delta_px", reason: "must be finite and > 0" });
        }
        if !self.page_delta_px.is_finite() || self.page_delta_px <= 0.0 {
            return Err(ConfigError::OutOfRange { field: "page_delta_px", reason: "must be finite and > 0" });
        }
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px < 0.0 {
            return Err(ConfigError::OutOfRange { field: "drag_threshold_px", reason: "must be finite and >= 0" });
        }
        if !(self.negligible_pan >= 0.0 && self.negligible_zoom >= 0.0) {
            return Err(ConfigError::OutOfRange { field: "negligible_pan", reason: "thresholds must be >= 0" });
        }
        if self.resample_count < 2 {
            return Err(ConfigError::OutOfRange { field: "resample_count", reason: "must be at least 2" });
        }
        if !self.default_viewport.is_measured() {
            return Err(ConfigError::OutOfRange { field: "default_viewport", reason: "extents must be finite and > 0" });
        }
        if !self.default_animation_ms.is_finite() || self.default_animation_ms < 0.0 {
            return Err(ConfigError::OutOfRange { field: "default_animation_ms", reason: "must be finite and >= 0" });
        }
        Ok(())
    }
}

fn env_parse_f64(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: f64) -> Result<f64, ConfigError> {
    let var = format!("{ENV_PREFIX}{name}");
    match lookup(&var) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ConfigError::InvalidEnv { var, value: raw }),
        },
    }
}
