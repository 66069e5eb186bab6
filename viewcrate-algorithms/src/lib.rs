//! # ViewCrate Algorithms
//!
//! Geometry routines that turn a packed point buffer into something a viewport can pick:
//! - Half-float point buffer decoding and bounded downsampling
//! - Nearest sample to a ray, with screen-space distance ranking

pub mod sampling;
pub mod picking;

// Re-export commonly used items
pub use sampling::*;
pub use picking::*;
