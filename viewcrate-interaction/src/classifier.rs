//! Gesture classification for pointer input

use serde::{Deserialize, Serialize};
use viewcrate_core::InteractionMode;

/// Button code of the primary (usually left) mouse button
pub const PRIMARY_BUTTON: i16 = 0;
/// Button code of the middle mouse button
pub const MIDDLE_BUTTON: i16 = 1;
/// Button code of the secondary (usually right) mouse button
pub const SECONDARY_BUTTON: i16 = 2;

/// Kind of device that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Mouse,
    Touch,
    Pen,
}

impl PointerType {
    /// Mouse input is tracked by button; everything else is tracked as touch contacts
    pub fn is_desktop(&self) -> bool {
        matches!(self, PointerType::Mouse)
    }
}

/// Native gesture a controller performs for a mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseAction {
    Rotate,
    Dolly,
    Pan,
}

/// Map a pointer-down to the gesture it starts.
///
/// Shift beats alt when both are held on the primary button.
pub fn classify(
    pointer_type: PointerType,
    button: i16,
    alt_key: bool,
    shift_key: bool,
    active_touch_count: usize,
) -> InteractionMode {
    if !pointer_type.is_desktop() {
        return if active_touch_count >= 2 {
            InteractionMode::Pinch
        } else {
            InteractionMode::Pan
        };
    }

    match button {
        PRIMARY_BUTTON if shift_key => InteractionMode::Tilt,
        PRIMARY_BUTTON if alt_key => InteractionMode::Orbit,
        PRIMARY_BUTTON => InteractionMode::Pan,
        MIDDLE_BUTTON => InteractionMode::Dolly,
        SECONDARY_BUTTON => InteractionMode::Orbit,
        _ => InteractionMode::Other,
    }
}

/// What the controller's left-button binding should do for the current modifiers
pub fn resolve_left_mouse_action(alt_key: bool) -> MouseAction {
    if alt_key {
        MouseAction::Rotate
    } else {
        MouseAction::Pan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_buttons() {
        assert_eq!(classify(PointerType::Mouse, 0, false, false, 0), InteractionMode::Pan);
        assert_eq!(classify(PointerType::Mouse, 0, true, false, 0), InteractionMode::Orbit);
        assert_eq!(classify(PointerType::Mouse, 0, false, true, 0), InteractionMode::Tilt);
        assert_eq!(classify(PointerType::Mouse, 1, false, false, 0), InteractionMode::Dolly);
        assert_eq!(classify(PointerType::Mouse, 2, false, false, 0), InteractionMode::Orbit);
        assert_eq!(classify(PointerType::Mouse, 3, false, false, 0), InteractionMode::Other);
        assert_eq!(classify(PointerType::Mouse, -1, false, false, 0), InteractionMode::Other);
    }

    #[test]
    fn test_shift_beats_alt() {
        assert_eq!(classify(PointerType::Mouse, 0, true, true, 0), InteractionMode::Tilt);
        // modifiers only matter on the primary button
        assert_eq!(classify(PointerType::Mouse, 1, true, true, 0), InteractionMode::Dolly);
    }

    #[test]
    fn test_touch_contacts() {
        assert_eq!(classify(PointerType::Touch, 0, false, false, 0), InteractionMode::Pan);
        assert_eq!(classify(PointerType::Touch, 0, false, false, 1), InteractionMode::Pan);
        assert_eq!(classify(PointerType::Touch, 0, false, false, 2), InteractionMode::Pinch);
        assert_eq!(classify(PointerType::Pen, 0, false, true, 3), InteractionMode::Pinch);
        // modifiers are ignored for touch
        assert_eq!(classify(PointerType::Pen, 0, true, true, 1), InteractionMode::Pan);
    }

    #[test]
    fn test_left_mouse_action() {
        assert_eq!(resolve_left_mouse_action(true), MouseAction::Rotate);
        assert_eq!(resolve_left_mouse_action(false), MouseAction::Pan);
    }
}
