//! Tilt strategies
//!
//! A tilt changes the camera's polar (elevation) angle around the controller target.
//! Controllers that expose [`NativeTilt`] do it themselves; for everything else the
//! camera offset is rotated in spherical coordinates.

use std::cell::RefCell;
use std::f64::consts::PI;
use tracing::trace;
use viewcrate_core::{clamp, Vector3d};

use crate::controller::{CameraPose, OrbitController};

/// Keeps the polar angle off the poles, where the azimuth is undefined
const POLE_EPSILON: f64 = 1e-6;

/// Spherical coordinates of a Y-up offset vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f64,
    /// Azimuth around +Y, measured from +Z towards +X
    pub theta: f64,
    /// Polar angle from +Y
    pub phi: f64,
}

impl Spherical {
    pub fn from_offset(offset: &Vector3d) -> Self {
        let radius = offset.norm();
        if radius == 0.0 {
            return Self { radius, theta: 0.0, phi: 0.0 };
        }

        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: clamp(offset.y / radius, -1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(&self) -> Vector3d {
        let ring = self.phi.sin() * self.radius;
        Vector3d::new(
            ring * self.theta.sin(),
            self.phi.cos() * self.radius,
            ring * self.theta.cos(),
        )
    }
}

/// Sanitized polar limits: non-finite bounds fall back to `[0, π]`
pub fn resolve_polar_bounds(bounds: (f64, f64)) -> (f64, f64) {
    let min = if bounds.0.is_finite() { bounds.0.max(0.0) } else { 0.0 };
    let max = if bounds.1.is_finite() { bounds.1.min(PI) } else { PI };
    (min, max.max(min))
}

/// Rotate `offset` so its polar angle decreases by `angle`, within `bounds`.
///
/// A positive angle (dragging down) raises the camera towards +Y, matching
/// [`NativeTilt::rotate_up`](crate::NativeTilt::rotate_up).
///
/// Returns `None` for a zero or non-finite offset.
pub fn tilt_offset(offset: &Vector3d, angle: f64, bounds: (f64, f64)) -> Option<Vector3d> {
    let mut spherical = Spherical::from_offset(offset);
    if !spherical.radius.is_finite() || spherical.radius <= 0.0 {
        return None;
    }

    let (min_polar, max_polar) = resolve_polar_bounds(bounds);
    let phi = clamp(spherical.phi - angle, min_polar, max_polar);
    spherical.phi = clamp(phi, POLE_EPSILON, PI - POLE_EPSILON);
    Some(spherical.to_offset())
}

/// A way of applying a tilt to the camera
pub trait TiltStrategy {
    fn name(&self) -> &'static str;

    fn apply(&self, controller: &mut dyn OrbitController, camera: &RefCell<dyn CameraPose>, angle: f64);
}

/// Delegates to the controller's own tilt
pub struct NativeTiltStrategy;

impl TiltStrategy for NativeTiltStrategy {
    fn name(&self) -> &'static str {
        "native"
    }

    fn apply(&self, controller: &mut dyn OrbitController, _camera: &RefCell<dyn CameraPose>, angle: f64) {
        if let Some(tilt) = controller.native_tilt() {
            tilt.rotate_up(angle);
        }
    }
}

/// Rewrites the camera position from the spherical form of its target offset
pub struct SphericalTiltStrategy;

impl TiltStrategy for SphericalTiltStrategy {
    fn name(&self) -> &'static str {
        "spherical"
    }

    fn apply(&self, controller: &mut dyn OrbitController, camera: &RefCell<dyn CameraPose>, angle: f64) {
        let target = controller.target();
        let bounds = controller.polar_angle_bounds();

        let mut camera = camera.borrow_mut();
        let offset = camera.position() - target;
        if let Some(next) = tilt_offset(&offset, angle, bounds) {
            camera.set_position(target + next);
        }
    }
}

/// Pick the native strategy when the controller supports it
pub fn select_tilt_strategy(controller: &mut dyn OrbitController) -> &'static dyn TiltStrategy {
    let strategy: &'static dyn TiltStrategy = if controller.native_tilt().is_some() {
        &NativeTiltStrategy
    } else {
        &SphericalTiltStrategy
    };
    trace!("Tilt strategy: {}", strategy.name());
    strategy
}
