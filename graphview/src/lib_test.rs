#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn ease_out_cubic_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
}

#[test]
fn ease_out_cubic_front_loads_motion() {
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    assert!((ease_out_cubic(0.3) - 0.657).abs() < 1e-12);
    assert!(ease_out_cubic(0.2) > 0.2);
}

#[test]
fn ease_out_cubic_clamps_input() {
    assert_eq!(ease_out_cubic(-2.0), 0.0);
    assert_eq!(ease_out_cubic(5.0), 1.0);
    assert_eq!(ease_out_cubic(f64::NAN), 0.0);
}

#[test]
fn ease_out_cubic_is_monotonic() {
    let mut previous = 0.0;
    for i in 1..=100 {
        let value = ease_out_cubic(f64::from(i) / 100.0);
        assert!(value >= previous);
        previous = value;
    }
}

#[test]
fn lerp_hits_both_ends() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
}
