//! Orbit controls bound to a shared [`Camera`]

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use viewcrate_core::{clamp, Point3d};

use crate::camera::Camera;
use crate::controller::{ActionCodes, NativeTilt, OrbitController};
use crate::tilt::tilt_offset;

/// A minimal orbit controller.
///
/// `update()` keeps the camera aimed at the target, applies any pending native tilt,
/// and clamps the camera distance to `[min_distance, max_distance]`.
#[derive(Debug)]
pub struct OrbitControls {
    camera: Rc<RefCell<Camera>>,
    pub target: Point3d,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_polar_angle: f64,
    pub max_polar_angle: f64,
    pub enabled: bool,
    pub left_button_action: u32,
    native_tilt: bool,
    pending_tilt: f64,
}

impl OrbitControls {
    /// Controls around the camera's current target with unbounded distance
    pub fn new(camera: Rc<RefCell<Camera>>) -> Self {
        let target = camera.borrow().target;
        Self {
            camera,
            target,
            min_distance: 0.0,
            max_distance: f64::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            enabled: true,
            left_button_action: ActionCodes::ORBIT_CONTROLS.rotate,
            native_tilt: false,
            pending_tilt: 0.0,
        }
    }

    pub fn with_distance_bounds(mut self, min_distance: f64, max_distance: f64) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self
    }

    /// Expose [`NativeTilt`] so tilts are applied on the next `update()`
    pub fn with_native_tilt(mut self, native_tilt: bool) -> Self {
        self.native_tilt = native_tilt;
        self
    }
}

impl NativeTilt for OrbitControls {
    fn rotate_up(&mut self, angle: f64) {
        self.pending_tilt += angle;
    }
}

impl OrbitController for OrbitControls {
    fn target(&self) -> Point3d {
        self.target
    }

    fn min_distance(&self) -> f64 {
        self.min_distance
    }

    fn max_distance(&self) -> f64 {
        self.max_distance
    }

    fn polar_angle_bounds(&self) -> (f64, f64) {
        (self.min_polar_angle, self.max_polar_angle)
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn left_button_action(&self) -> u32 {
        self.left_button_action
    }

    fn set_left_button_action(&mut self, code: u32) {
        self.left_button_action = code;
    }

    fn update(&mut self) {
        let mut camera = self.camera.borrow_mut();
        let mut offset = camera.position - self.target;

        if self.pending_tilt != 0.0 {
            if let Some(tilted) = tilt_offset(&offset, self.pending_tilt, self.polar_angle_bounds()) {
                offset = tilted;
            }
            self.pending_tilt = 0.0;
        }

        let distance = offset.norm();
        if distance > 0.0 && distance.is_finite() {
            let lower = self.min_distance.max(0.0);
            let upper = self.max_distance.max(self.min_distance);
            offset *= clamp(distance, lower, upper) / distance;
        }

        camera.position = self.target + offset;
        camera.target = self.target;
    }

    fn native_tilt(&mut self) -> Option<&mut dyn NativeTilt> {
        if self.native_tilt {
            Some(self)
        } else {
            None
        }
    }
}
