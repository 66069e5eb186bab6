//! Core data structures and math for viewcrate
//!
//! This crate provides the types shared by the interaction and picking crates:
//! - The `InteractionMode` enumeration
//! - Pure geometry helpers for pan, zoom, tilt and half-float decoding
//! - Tuning configuration
//! - The common error type

pub mod point;
pub mod mode;
pub mod math;
pub mod config;
pub mod error;

pub use point::*;
pub use mode::*;
pub use math::*;
pub use config::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4};
