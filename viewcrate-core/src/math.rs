//! Geometry math used on the live input path
//!
//! Every function here is total: non-finite or out-of-range input yields a
//! well-defined sentinel instead of an error, so a bad sample can never interrupt
//! gesture processing.

use half::f16;
use serde::{Deserialize, Serialize};

use crate::mode::InteractionMode;
use crate::point::{Point3d, Vector3d};

/// Minimum target movement that counts as a pan
pub const DEFAULT_PAN_EPSILON: f64 = 1e-8;

/// Camera distance multiplier applied by a double-click zoom
pub const DEFAULT_ZOOM_FACTOR: f64 = 0.72;

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics on inverted bounds; `max` wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Gate that decides whether a target movement should drag the camera along.
///
/// Only an active user pan with a finite, non-negligible delta translates the camera.
/// Programmatic recentring and pinch gestures that happen to move the target do not.
pub fn should_translate_for_target_delta(
    user_interacting: bool,
    mode: InteractionMode,
    delta_length: f64,
    epsilon: f64,
) -> bool {
    user_interacting
        && mode == InteractionMode::Pan
        && delta_length.is_finite()
        && delta_length > epsilon
}

/// Outcome of [`apply_pan_translation`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanTranslation {
    pub delta: Vector3d,
    pub delta_length: f64,
    pub should_translate: bool,
    pub next_camera: Point3d,
}

/// Move the camera rigidly with the target when the pan gate allows it.
///
/// When the gate is closed `next_camera` is an exact copy of `prev_camera`.
pub fn apply_pan_translation(
    prev_camera: &Point3d,
    prev_target: &Point3d,
    next_target: &Point3d,
    user_interacting: bool,
    mode: InteractionMode,
    epsilon: f64,
) -> PanTranslation {
    let delta = next_target - prev_target;
    let delta_length = delta.norm();
    let should_translate =
        should_translate_for_target_delta(user_interacting, mode, delta_length, epsilon);

    let next_camera = if should_translate {
        prev_camera + delta
    } else {
        *prev_camera
    };

    PanTranslation {
        delta,
        delta_length,
        should_translate,
        next_camera,
    }
}

/// Camera distance after one zoom step, clamped to the controller's distance bounds.
///
/// Non-finite or non-positive distances are returned unchanged. An inverted
/// `min_distance`/`max_distance` pair is repaired by raising the upper bound.
pub fn compute_zoomed_camera_distance(
    current_distance: f64,
    min_distance: f64,
    max_distance: f64,
    zoom_factor: f64,
) -> f64 {
    if !current_distance.is_finite() || current_distance <= 0.0 {
        return current_distance;
    }

    let lower = min_distance.max(0.0);
    let upper = max_distance.max(min_distance);
    clamp(current_distance * zoom_factor, lower, upper)
}

/// Conversion from vertical drag pixels to tilt radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltDragOptions {
    pub radians_per_pixel: f64,
    /// Largest tilt applied for a single move event
    pub max_step: f64,
}

impl Default for TiltDragOptions {
    fn default() -> Self {
        Self {
            radians_per_pixel: 0.005,
            max_step: 0.1,
        }
    }
}

/// Tilt angle in radians produced by a vertical drag of `delta_y` pixels
pub fn compute_tilt_angle_from_drag(delta_y: f64, options: &TiltDragOptions) -> f64 {
    let rate = options.radians_per_pixel;
    if !delta_y.is_finite() || !rate.is_finite() || rate == 0.0 {
        return 0.0;
    }

    let limit = options.max_step.abs();
    clamp(delta_y * rate, -limit, limit)
}

/// Decode one IEEE-754 binary16 value
pub fn decode_float16(bits: u16) -> f64 {
    f16::from_bits(bits).to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp_inverted_bounds() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(3.0, 4.0, 2.0), 2.0);
    }

    #[test]
    fn test_should_translate_gate() {
        assert!(should_translate_for_target_delta(true, InteractionMode::Pan, 0.5, DEFAULT_PAN_EPSILON));
        assert!(!should_translate_for_target_delta(false, InteractionMode::Pan, 0.5, DEFAULT_PAN_EPSILON));
        assert!(!should_translate_for_target_delta(true, InteractionMode::Pinch, 0.5, DEFAULT_PAN_EPSILON));
        assert!(!should_translate_for_target_delta(true, InteractionMode::Pan, 1e-9, DEFAULT_PAN_EPSILON));
        assert!(!should_translate_for_target_delta(true, InteractionMode::Pan, f64::INFINITY, DEFAULT_PAN_EPSILON));
        assert!(!should_translate_for_target_delta(true, InteractionMode::Pan, f64::NAN, DEFAULT_PAN_EPSILON));
    }

    #[test]
    fn test_pan_translation_follows_target() {
        let camera = Point3d::new(0.0, 2.0, 5.0);
        let prev = Point3d::new(0.0, 0.0, 0.0);
        let next = Point3d::new(1.0, 0.0, -2.0);

        let result = apply_pan_translation(&camera, &prev, &next, true, InteractionMode::Pan, DEFAULT_PAN_EPSILON);
        assert!(result.should_translate);
        assert_relative_eq!(result.delta_length, 5.0_f64.sqrt());
        assert_eq!(result.next_camera, Point3d::new(1.0, 2.0, 3.0));
        // camera-to-target offset is preserved
        assert_relative_eq!(result.next_camera - next, camera - prev);
    }

    #[test]
    fn test_pan_translation_idle_keeps_camera() {
        let camera = Point3d::new(0.0, 2.0, 5.0);
        let prev = Point3d::origin();
        let next = Point3d::new(3.0, 0.0, 0.0);

        let result = apply_pan_translation(&camera, &prev, &next, false, InteractionMode::Pan, DEFAULT_PAN_EPSILON);
        assert!(!result.should_translate);
        assert_eq!(result.next_camera, camera);
        assert_eq!(result.delta, Vector3d::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_zoomed_distance() {
        assert_relative_eq!(compute_zoomed_camera_distance(5.0, 0.6, 10.0, DEFAULT_ZOOM_FACTOR), 3.6, epsilon = 1e-12);
        assert_eq!(compute_zoomed_camera_distance(0.61, 0.6, 10.0, DEFAULT_ZOOM_FACTOR), 0.6);
        assert_eq!(compute_zoomed_camera_distance(20.0, 0.6, 10.0, DEFAULT_ZOOM_FACTOR), 10.0);
    }

    #[test]
    fn test_zoomed_distance_sentinels() {
        assert_eq!(compute_zoomed_camera_distance(0.0, 0.6, 10.0, DEFAULT_ZOOM_FACTOR), 0.0);
        assert_eq!(compute_zoomed_camera_distance(-2.0, 0.6, 10.0, DEFAULT_ZOOM_FACTOR), -2.0);
        assert!(compute_zoomed_camera_distance(f64::NAN, 0.6, 10.0, DEFAULT_ZOOM_FACTOR).is_nan());
        assert_eq!(compute_zoomed_camera_distance(f64::INFINITY, 0.6, 10.0, DEFAULT_ZOOM_FACTOR), f64::INFINITY);
    }

    #[test]
    fn test_zoomed_distance_inverted_bounds() {
        // max below min widens to min instead of producing an empty range
        assert_eq!(compute_zoomed_camera_distance(5.0, 4.0, 1.0, DEFAULT_ZOOM_FACTOR), 4.0);
        // negative min floors at zero
        assert_relative_eq!(compute_zoomed_camera_distance(1.0, -3.0, 10.0, 0.5), 0.5);
    }

    #[test]
    fn test_tilt_angle_from_drag() {
        let options = TiltDragOptions { radians_per_pixel: 0.01, ..Default::default() };
        assert_relative_eq!(compute_tilt_angle_from_drag(3.0, &options), 0.03, epsilon = 1e-12);

        let capped = TiltDragOptions { radians_per_pixel: 0.01, max_step: 0.05 };
        assert_eq!(compute_tilt_angle_from_drag(999.0, &capped), 0.05);
        assert_eq!(compute_tilt_angle_from_drag(-999.0, &capped), -0.05);
    }

    #[test]
    fn test_tilt_angle_degenerate_input() {
        let options = TiltDragOptions::default();
        assert_eq!(compute_tilt_angle_from_drag(f64::NAN, &options), 0.0);
        assert_eq!(compute_tilt_angle_from_drag(f64::INFINITY, &options), 0.0);

        let zero_rate = TiltDragOptions { radians_per_pixel: 0.0, ..Default::default() };
        assert_eq!(compute_tilt_angle_from_drag(10.0, &zero_rate), 0.0);

        let nan_rate = TiltDragOptions { radians_per_pixel: f64::NAN, ..Default::default() };
        assert_eq!(compute_tilt_angle_from_drag(10.0, &nan_rate), 0.0);
    }

    #[test]
    fn test_decode_float16() {
        assert_eq!(decode_float16(0x0000), 0.0);
        assert_eq!(decode_float16(0x3C00), 1.0);
        assert_eq!(decode_float16(0xC000), -2.0);
        assert_eq!(decode_float16(0x3555), 0.333251953125);
        assert_eq!(decode_float16(0x7BFF), 65504.0);
        // smallest subnormal: 2^-14 * (1 / 1024)
        assert_eq!(decode_float16(0x0001), 2f64.powi(-24));
        assert_eq!(decode_float16(0x7C00), f64::INFINITY);
        assert_eq!(decode_float16(0xFC00), f64::NEG_INFINITY);
        assert!(decode_float16(0x7E00).is_nan());
        assert!(decode_float16(0x8000).is_sign_negative());
    }
}
