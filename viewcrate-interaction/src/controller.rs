//! Traits for the camera and controller the interaction layer drives
//!
//! Both collaborators are owned by the host; the state machine only holds shared
//! handles and mutates them in place.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;
use viewcrate_core::Point3d;

use crate::classifier::MouseAction;

/// Controller-specific codes for each native mouse gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCodes {
    pub rotate: u32,
    pub dolly: u32,
    pub pan: u32,
}

impl ActionCodes {
    /// Codes used by [`OrbitControls`](crate::controls::OrbitControls)
    pub const ORBIT_CONTROLS: ActionCodes = ActionCodes {
        rotate: 0,
        dolly: 1,
        pan: 2,
    };

    pub fn code_for(&self, action: MouseAction) -> u32 {
        match action {
            MouseAction::Rotate => self.rotate,
            MouseAction::Dolly => self.dolly,
            MouseAction::Pan => self.pan,
        }
    }
}

/// Anything with a mutable world-space position
pub trait CameraPose {
    fn position(&self) -> Point3d;

    fn set_position(&mut self, position: Point3d);
}

/// Native "tilt by angle" capability some controllers expose
pub trait NativeTilt {
    /// Rotate the camera up around the target by `angle` radians
    fn rotate_up(&mut self, angle: f64);
}

/// Orbit-style camera controller that handles default pan/orbit/dolly motion
pub trait OrbitController {
    fn target(&self) -> Point3d;

    fn min_distance(&self) -> f64;

    fn max_distance(&self) -> f64;

    /// Polar angle limits in radians. Non-finite values mean unbounded.
    fn polar_angle_bounds(&self) -> (f64, f64) {
        (0.0, PI)
    }

    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Code of the gesture currently bound to the left mouse button
    fn left_button_action(&self) -> u32;

    fn set_left_button_action(&mut self, code: u32);

    /// Re-sync the controller with the camera after an external change
    fn update(&mut self);

    /// Optional native tilt; `None` selects the spherical fallback
    fn native_tilt(&mut self) -> Option<&mut dyn NativeTilt> {
        None
    }
}

/// Shared "edit mode" switch owned by the host UI.
///
/// While active every pointer-down, pointer-move and double-click is ignored.
#[derive(Debug, Clone, Default)]
pub struct EditModeFlag(Rc<Cell<bool>>);

impl EditModeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&self, active: bool) {
        self.0.set(active);
    }

    pub fn is_active(&self) -> bool {
        self.0.get()
    }
}
