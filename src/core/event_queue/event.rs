//=========================================================================
// Canonical Platform Events
//
// The backend-independent representation of everything a window or
// display backend can report. Backends translate their native events
// into `PlatformEvent` values and raise them on the `EventQueue`.
//
// Event Flow:
// ```text
// Native backend (SDL event, winit WindowEvent, ...)
//         ↓ translate
//    PlatformEvent (this module)
//         ↓ EventQueue::raise
//    Listeners registered for PlatformEventType
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Vec2, Vec2i};
use crate::core::handle::DisplayHandle;
use crate::core::input::{KeyCode, Modifiers, MouseButton};
use crate::core::window::WindowMode;

//=== ClipboardFormat =====================================================

/// Format of the clipboard contents after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipboardFormat {
    /// Clipboard is empty or holds nothing the backend can describe.
    None,
    Text,
}

//=== PlatformEventType ===================================================

/// Event kind, used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlatformEventType {
    Focus,
    WindowMove,
    WindowResize,
    WindowModeChange,
    WindowDpiChange,
    KeyDown,
    KeyUp,
    TextInput,
    MouseEnter,
    MouseMove,
    MouseDown,
    MouseUp,
    Scroll,
    Close,
    FileDrop,
    ClipboardUpdate,
    DisplayConnection,
    PrimaryDisplayChange,
    DisplayChange,
}

impl PlatformEventType {
    /// Every event kind, in declaration order.
    pub const ALL: [PlatformEventType; 19] = [
        Self::Focus,
        Self::WindowMove,
        Self::WindowResize,
        Self::WindowModeChange,
        Self::WindowDpiChange,
        Self::KeyDown,
        Self::KeyUp,
        Self::TextInput,
        Self::MouseEnter,
        Self::MouseMove,
        Self::MouseDown,
        Self::MouseUp,
        Self::Scroll,
        Self::Close,
        Self::FileDrop,
        Self::ClipboardUpdate,
        Self::DisplayConnection,
        Self::PrimaryDisplayChange,
        Self::DisplayChange,
    ];
}

//=== PlatformEvent =======================================================

/// Canonical event payload.
///
/// The originating window travels next to the payload when the event is
/// raised (`None` for window-independent events such as clipboard and
/// display notifications).
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Window gained or lost keyboard focus.
    Focus { gained: bool },

    /// Window moved. Both the outer and the client-area top-left corner
    /// are reported in screen coordinates.
    WindowMove {
        window_position: Vec2i,
        client_position: Vec2i,
    },

    /// Window resized to `new_size` (pixels).
    WindowResize { new_size: Vec2i },

    /// Window was hidden, minimized, maximized or restored.
    WindowModeChange { new_mode: WindowMode },

    /// Window moved to a monitor with a different DPI.
    WindowDpiChange {
        dpi_x: f32,
        dpi_y: f32,
        scale_x: f32,
        scale_y: f32,
    },

    /// Key pressed. `repeat` is set for auto-repeat presses.
    KeyDown {
        key: KeyCode,
        scancode: u32,
        modifiers: Modifiers,
        repeat: bool,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        scancode: u32,
        modifiers: Modifiers,
    },

    /// Committed text (already composed, UTF-8).
    TextInput { text: String },

    /// Cursor entered (`true`) or left (`false`) the window.
    MouseEnter { entered: bool },

    /// Cursor moved, client-area coordinates.
    MouseMove { position: Vec2 },

    MouseDown { button: MouseButton },

    MouseUp { button: MouseButton },

    /// Wheel input. `delta` is the raw wheel movement in ticks;
    /// `distance` is the OS-scaled amount to scroll, in lines (vertical)
    /// and characters (horizontal).
    Scroll { delta: Vec2, distance: Vec2 },

    /// User asked to close the window. The window is still alive.
    Close,

    /// Files dropped onto a window, in the order the backend reported
    /// them. `position` is the global pointer position at the drop.
    FileDrop {
        file_paths: Vec<PathBuf>,
        position: Vec2i,
        dropped_in_window: bool,
    },

    /// Clipboard contents changed.
    ClipboardUpdate { format: ClipboardFormat },

    /// Reconciliation found a monitor connected or disconnected. The
    /// handle of a disconnected monitor no longer resolves.
    DisplayConnection {
        display: DisplayHandle,
        connected: bool,
    },

    /// Reconciliation found a new primary monitor. `display` is `None`
    /// when the primary went away and no other monitor took over.
    PrimaryDisplayChange {
        display: Option<DisplayHandle>,
        previous: Option<DisplayHandle>,
    },

    /// The backend reported a display topology change. Call
    /// `DisplayComponent::refresh` to reconcile.
    DisplayChange,
}

impl PlatformEvent {
    /// Subscription key of this event.
    pub fn kind(&self) -> PlatformEventType {
        match self {
            Self::Focus { .. } => PlatformEventType::Focus,
            Self::WindowMove { .. } => PlatformEventType::WindowMove,
            Self::WindowResize { .. } => PlatformEventType::WindowResize,
            Self::WindowModeChange { .. } => PlatformEventType::WindowModeChange,
            Self::WindowDpiChange { .. } => PlatformEventType::WindowDpiChange,
            Self::KeyDown { .. } => PlatformEventType::KeyDown,
            Self::KeyUp { .. } => PlatformEventType::KeyUp,
            Self::TextInput { .. } => PlatformEventType::TextInput,
            Self::MouseEnter { .. } => PlatformEventType::MouseEnter,
            Self::MouseMove { .. } => PlatformEventType::MouseMove,
            Self::MouseDown { .. } => PlatformEventType::MouseDown,
            Self::MouseUp { .. } => PlatformEventType::MouseUp,
            Self::Scroll { .. } => PlatformEventType::Scroll,
            Self::Close => PlatformEventType::Close,
            Self::FileDrop { .. } => PlatformEventType::FileDrop,
            Self::ClipboardUpdate { .. } => PlatformEventType::ClipboardUpdate,
            Self::DisplayConnection { .. } => PlatformEventType::DisplayConnection,
            Self::PrimaryDisplayChange { .. } => PlatformEventType::PrimaryDisplayChange,
            Self::DisplayChange => PlatformEventType::DisplayChange,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(PlatformEvent::Close.kind(), PlatformEventType::Close);
        assert_eq!(
            PlatformEvent::MouseDown { button: MouseButton::Middle }.kind(),
            PlatformEventType::MouseDown
        );
        assert_eq!(
            PlatformEvent::ClipboardUpdate { format: ClipboardFormat::Text }.kind(),
            PlatformEventType::ClipboardUpdate
        );
    }

    #[test]
    fn all_kinds_are_distinct() {
        let unique: HashSet<_> = PlatformEventType::ALL.iter().collect();
        assert_eq!(unique.len(), PlatformEventType::ALL.len());
    }

    #[test]
    fn file_drop_keeps_path_order() {
        let event = PlatformEvent::FileDrop {
            file_paths: vec!["b.txt".into(), "a.txt".into()],
            position: Vec2i::new(3, 4),
            dropped_in_window: true,
        };

        if let PlatformEvent::FileDrop { file_paths, .. } = &event {
            assert_eq!(file_paths[0], PathBuf::from("b.txt"));
            assert_eq!(file_paths[1], PathBuf::from("a.txt"));
        } else {
            panic!("Expected FileDrop, got {:?}", event);
        }
    }
}
