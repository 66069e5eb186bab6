//! The closed set of viewport interaction modes

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gesture currently driving the viewport.
///
/// Exactly one mode is current at any time. It is derived from pointer state by the
/// interaction state machine and is never set directly by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionMode {
    #[default]
    None,
    Pan,
    Pinch,
    Orbit,
    Dolly,
    Tilt,
    Other,
}

impl InteractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::None => "NONE",
            InteractionMode::Pan => "PAN",
            InteractionMode::Pinch => "PINCH",
            InteractionMode::Orbit => "ORBIT",
            InteractionMode::Dolly => "DOLLY",
            InteractionMode::Tilt => "TILT",
            InteractionMode::Other => "OTHER",
        }
    }

    /// Whether a gesture is in progress
    pub fn is_active(&self) -> bool {
        *self != InteractionMode::None
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(InteractionMode::default(), InteractionMode::None);
        assert!(!InteractionMode::None.is_active());
        assert!(InteractionMode::Pinch.is_active());
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(InteractionMode::Tilt.to_string(), "TILT");
        assert_eq!(InteractionMode::Other.as_str(), "OTHER");
    }
}
