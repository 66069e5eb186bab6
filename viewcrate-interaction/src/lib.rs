//! Viewport interaction for 3D point cloud viewers
//!
//! This crate lets a single primary pointer surface express pan, orbit, dolly, pinch
//! and tilt without fighting an orbit-style camera controller:
//! - Gesture classification from pointer type, button and modifiers
//! - An event-driven state machine that rebinds and drives the controller
//! - Native and spherical tilt strategies
//! - A perspective camera and orbit controls usable as collaborators

pub mod classifier;
pub mod controller;
pub mod events;
pub mod tilt;
pub mod camera;
pub mod controls;
pub mod state_machine;

pub use classifier::*;
pub use controller::*;
pub use events::*;
pub use tilt::*;
pub use camera::*;
pub use controls::*;
pub use state_machine::*;
