use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_constants() {
    let cfg = ViewConfig::default();
    assert!((cfg.fit_padding - FIT_PADDING_PX).abs() < f64::EPSILON);
    assert!((cfg.max_fit_zoom - MAX_FIT_ZOOM).abs() < f64::EPSILON);
    assert!((cfg.wheel_sensitivity - WHEEL_SENSITIVITY).abs() < f64::EPSILON);
    assert!((cfg.wheel_max_damping - WHEEL_MAX_DAMPING).abs() < f64::EPSILON);
    assert_eq!(cfg.resample_count, RESAMPLE_COUNT);
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_lookup_without_vars_is_default() {
    let cfg = ViewConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ViewConfig::default());
}

#[test]
fn from_lookup_applies_overrides() {
    let cfg = ViewConfig::from_lookup(lookup_from(&[
        ("GRAPHVIEW_FIT_PADDING", "12"),
        ("GRAPHVIEW_MAX_FIT_ZOOM", " 2.0 "),
        ("GRAPHVIEW_RESAMPLE_COUNT", "48"),
        ("GRAPHVIEW_ANIMATION_MS", "150"),
    ]))
    .unwrap();
    assert!((cfg.fit_padding - 12.0).abs() < f64::EPSILON);
    assert!((cfg.max_fit_zoom - 2.0).abs() < f64::EPSILON);
    assert_eq!(cfg.resample_count, 48);
    assert!((cfg.default_animation_ms - 150.0).abs() < f64::EPSILON);
}

#[test]
fn from_lookup_rejects_unparsable_value() {
    let err = ViewConfig::from_lookup(lookup_from(&[("GRAPHVIEW_WHEEL_SENSITIVITY", "fast")])).unwrap_err();
    match err {
        ConfigError::InvalidEnv { var, value } => {
            assert_eq!(var, "GRAPHVIEW_WHEEL_SENSITIVITY");
            assert_eq!(value, "fast");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn from_lookup_rejects_non_finite() {
    assert!(ViewConfig::from_lookup(lookup_from(&[("GRAPHVIEW_FIT_PADDING", "inf")])).is_err());
}

#[test]
fn from_lookup_validates_result() {
    let err = ViewConfig::from_lookup(lookup_from(&[("GRAPHVIEW_RESAMPLE_COUNT", "1")])).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { field: "resample_count", .. }));
}

#[test]
fn validate_rejects_damping_out_of_range() {
    let cfg = ViewConfig { wheel_max_damping: 1.0, ..ViewConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::OutOfRange { field: "wheel_max_damping", .. })));
}

#[test]
fn validate_rejects_max_fit_below_min_zoom() {
    let cfg = ViewConfig { max_fit_zoom: 0.01, ..ViewConfig::default() };
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_unmeasured_default_viewport() {
    let cfg = ViewConfig { default_viewport: ViewportSize::new(0.0, 600.0), ..ViewConfig::default() };
    assert!(cfg.validate().is_err());
}

#[test]
fn from_json_partial_document_fills_defaults() {
    let cfg = ViewConfig::from_json_str(r#"{ "fit_padding": 8, "default_viewport": { "width": 1024, "height": 768 } }"#)
        .unwrap();
    assert!((cfg.fit_padding - 8.0).abs() < f64::EPSILON);
    assert_eq!(cfg.default_viewport, ViewportSize::new(1024.0, 768.0));
    assert_eq!(cfg.resample_count, RESAMPLE_COUNT);
}

#[test]
fn from_json_rejects_malformed() {
    assert!(matches!(ViewConfig::from_json_str("{ nope"), Err(ConfigError::Json(_))));
}

#[test]
fn error_messages_name_field() {
    let err = ConfigError::OutOfRange { field: "fit_padding", reason: "must be finite and >= 0" };
    assert_eq!(err.to_string(), "fit_padding out of range: must be finite and >= 0");
}
