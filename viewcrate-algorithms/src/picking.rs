//! Ray picking against a sampled point set

use serde::Serialize;
use viewcrate_core::{Point3d, Vector3d};

/// Squared distances closer than this are treated as a tie
pub const PICK_TIE_EPSILON: f64 = 1e-12;

const MIN_DIRECTION_LENGTH: f64 = 1e-12;

/// The sample chosen by [`find_closest_to_ray`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RayHit {
    /// Index into the sample slice
    pub index: usize,
    pub position: Point3d,
    /// Squared perpendicular distance from the sample to the ray
    pub distance_sq: f64,
    /// Distance along the normalized ray to the sample's projection
    pub ray_distance: f64,
}

/// Find the sample closest to a ray.
///
/// Samples behind the origin (non-positive projection) or farther than
/// `max_distance_sq` from the ray are excluded. The smallest squared perpendicular
/// distance wins. Every sample within [`PICK_TIE_EPSILON`] of that minimum ties, and
/// among those the sample nearer the origin wins, then the lower index.
///
/// Returns `None` for a degenerate ray or when no sample qualifies.
pub fn find_closest_to_ray(
    samples: &[Point3d],
    ray_origin: &Point3d,
    ray_direction: &Vector3d,
    max_distance_sq: f64,
) -> Option<RayHit> {
    if !ray_origin.coords.iter().all(|c| c.is_finite())
        || !ray_direction.iter().all(|c| c.is_finite())
    {
        return None;
    }

    let length = ray_direction.norm();
    if length <= MIN_DIRECTION_LENGTH {
        return None;
    }
    let direction = ray_direction / length;

    let measure = |index: usize, sample: &Point3d| -> Option<RayHit> {
        let offset = sample - ray_origin;
        let ray_distance = offset.dot(&direction);
        if !(ray_distance > 0.0) {
            return None;
        }

        let projected = ray_origin + direction * ray_distance;
        let distance_sq = (sample - projected).norm_squared();
        if !distance_sq.is_finite() || distance_sq > max_distance_sq {
            return None;
        }

        Some(RayHit {
            index,
            position: *sample,
            distance_sq,
            ray_distance,
        })
    };

    let min_distance_sq = samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| measure(index, sample))
        .fold(f64::INFINITY, |min, hit| min.min(hit.distance_sq));
    if !min_distance_sq.is_finite() {
        return None;
    }

    // ties are relative to the overall minimum
    samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| measure(index, sample))
        .filter(|hit| hit.distance_sq <= min_distance_sq + PICK_TIE_EPSILON)
        .reduce(|best, hit| if hit.ray_distance < best.ray_distance { hit } else { best })
}

/// Pixel distance between a point given in NDC and a pointer position.
///
/// NDC is mapped to pixels as `((ndc + 1) / 2) * extent` with the vertical axis
/// flipped, so `(-1, 1)` is the top-left corner. Any non-finite input yields infinity.
pub fn compute_screen_distance_px(
    ndc_x: f64,
    ndc_y: f64,
    viewport_width: f64,
    viewport_height: f64,
    pointer_x: f64,
    pointer_y: f64,
) -> f64 {
    let inputs = [ndc_x, ndc_y, viewport_width, viewport_height, pointer_x, pointer_y];
    if !inputs.iter().all(|v| v.is_finite()) {
        return f64::INFINITY;
    }

    let screen_x = (ndc_x + 1.0) * 0.5 * viewport_width;
    let screen_y = (1.0 - ndc_y) * 0.5 * viewport_height;
    (screen_x - pointer_x).hypot(screen_y - pointer_y)
}
