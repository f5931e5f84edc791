//=========================================================================
// Input Value Types
//
// Backend-independent keyboard and mouse identifiers carried by
// canonical events.
//
// Responsibilities:
// - Represent physical keys and mouse buttons in a stable, portable way
// - Represent modifier key state (Shift, Ctrl, Alt, Super)
//
// Platform mapping:
// - SDL: scancodes / button indices → see `platform::sdl::translate`
// - Winit: `winit::keyboard::KeyCode` → see `platform::winit::event_mapper`
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button.
///
/// The set is closed: a native button code outside of it cannot be
/// translated and aborts that event's translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Primary,

    /// Secondary button (typically right).
    Secondary,

    /// Middle button (wheel click).
    Middle,

    /// First extra button (typically "back").
    Button4,

    /// Second extra button (typically "forward").
    Button5,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Text is delivered separately through `TextInput` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    SuperLeft,
    SuperRight,

    /// Key the backend reported but the PAL has no name for. The raw
    /// scancode is still delivered with the event.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub logo: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        logo: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_modifiers_are_empty() {
        assert!(Modifiers::default().is_empty());
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn any_pressed_modifier_is_not_empty() {
        let mods = Modifiers { alt: true, ..Modifiers::NONE };
        assert!(!mods.is_empty());
    }
}
