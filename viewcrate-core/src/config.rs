//! Tunable parameters for the interaction layer and the point sampler

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::{TiltDragOptions, DEFAULT_ZOOM_FACTOR};

/// Output size bound used when downsampling a point buffer for picking
pub const DEFAULT_TARGET_SAMPLE_COUNT: usize = 18_000;

/// Numeric knobs of the gesture state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionTuning {
    /// Distance multiplier for a double-click zoom
    pub zoom_factor: f64,
    pub tilt: TiltDragOptions,
    /// Tilt angles below this magnitude are ignored
    pub tilt_epsilon: f64,
    /// Zoom changes at or below this are treated as already clamped
    pub zoom_epsilon: f64,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            tilt: TiltDragOptions::default(),
            tilt_epsilon: 1e-12,
            zoom_epsilon: 1e-8,
        }
    }
}

impl InteractionTuning {
    pub fn validate(&self) -> Result<()> {
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "zoom_factor must be finite and positive, got {}",
                self.zoom_factor
            )));
        }
        if !self.tilt.radians_per_pixel.is_finite() || !self.tilt.max_step.is_finite() {
            return Err(Error::InvalidConfig(
                "tilt rate and max step must be finite".to_string(),
            ));
        }
        if !(self.tilt_epsilon >= 0.0) || !(self.zoom_epsilon >= 0.0) {
            return Err(Error::InvalidConfig(
                "epsilons must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Downsampling parameters for half-float point buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub target_sample_count: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            target_sample_count: DEFAULT_TARGET_SAMPLE_COUNT,
        }
    }
}
