//! Half-float point buffer downsampling
//!
//! Point buffers store each point as three packed IEEE-754 binary16 scalars. For
//! picking we only need a bounded, evenly strided subset of them, decoded into the
//! viewer's axis convention (first two axes flipped, third axis kept).

use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};
use viewcrate_core::{decode_float16, Error, Point3d, Result};

/// Scalars stored per point in a packed buffer
pub const COMPONENTS_PER_POINT: usize = 3;

/// Result of downsampling a packed point buffer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledPoints {
    pub samples: Vec<Point3d>,
    /// Distance in points between two retained source points
    pub stride: usize,
    /// Points considered from the source buffer
    pub source_point_count: usize,
    /// Points that survived decoding; equals `samples.len()`
    pub sampled_point_count: usize,
}

/// Decode and downsample a packed half-float point buffer.
///
/// `point_count` limits how many leading points are considered and defaults to every
/// complete point in `buffer`. The stride is chosen so that at most
/// `target_sample_count` points are retained. Points with a non-finite component are
/// dropped, so fewer samples than `ceil(source_point_count / stride)` may be returned.
///
/// Returns `None` when the buffer holds no complete point or nothing survives decoding.
///
/// # Example
/// ```rust
/// use viewcrate_algorithms::sample_half_float_points;
///
/// // one point: (1.0, -2.0, 0.5)
/// let buffer = [0x3C00, 0xC000, 0x3800];
/// let sampled = sample_half_float_points(&buffer, None, 18_000).unwrap();
/// assert_eq!(sampled.samples[0].x, -1.0);
/// assert_eq!(sampled.samples[0].y, 2.0);
/// assert_eq!(sampled.samples[0].z, 0.5);
/// ```
pub fn sample_half_float_points(
    buffer: &[u16],
    point_count: Option<usize>,
    target_sample_count: usize,
) -> Option<SampledPoints> {
    if buffer.len() < COMPONENTS_PER_POINT {
        return None;
    }

    let available = buffer.len() / COMPONENTS_PER_POINT;
    let source_point_count = point_count.map_or(available, |count| count.min(available));
    if source_point_count == 0 {
        return None;
    }

    let stride = source_point_count
        .div_ceil(target_sample_count.max(1))
        .max(1);
    let retained = source_point_count.div_ceil(stride);

    let samples: Vec<Point3d> = (0..retained)
        .into_par_iter()
        .filter_map(|slot| decode_point(buffer, slot * stride))
        .collect();

    debug!(
        "Sampled {} of {} points (stride {}, {} dropped)",
        samples.len(),
        source_point_count,
        stride,
        retained - samples.len()
    );

    if samples.is_empty() {
        return None;
    }

    let sampled_point_count = samples.len();
    Some(SampledPoints {
        samples,
        stride,
        source_point_count,
        sampled_point_count,
    })
}

/// Same as [`sample_half_float_points`] for a little-endian byte buffer.
///
/// A trailing odd byte is ignored.
pub fn sample_half_float_bytes(
    bytes: &[u8],
    point_count: Option<usize>,
    target_sample_count: usize,
) -> Option<SampledPoints> {
    let words: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    sample_half_float_points(&words, point_count, target_sample_count)
}

/// Read a raw little-endian binary16 point buffer from disk and downsample it
pub fn read_half_float_file<P: AsRef<Path>>(path: P, target_sample_count: usize) -> Result<SampledPoints> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let point_bytes = 2 * COMPONENTS_PER_POINT;
    if bytes.len() % point_bytes != 0 {
        return Err(Error::InvalidData(format!(
            "{}: {} bytes is not a whole number of {}-byte points",
            path.display(),
            bytes.len(),
            point_bytes
        )));
    }

    let sampled = sample_half_float_bytes(&bytes, None, target_sample_count)
        .ok_or_else(|| Error::InvalidData(format!("{}: no finite points", path.display())))?;
    info!("Loaded {} points from {}", sampled.source_point_count, path.display());
    Ok(sampled)
}

fn decode_point(buffer: &[u16], point_index: usize) -> Option<Point3d> {
    let base = point_index * COMPONENTS_PER_POINT;
    let x = -decode_float16(buffer[base]);
    let y = -decode_float16(buffer[base + 1]);
    let z = decode_float16(buffer[base + 2]);

    if x.is_finite() && y.is_finite() && z.is_finite() {
        Some(Point3d::new(x, y, z))
    } else {
        None
    }
}
