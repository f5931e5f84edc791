//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_platform::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Errors and geometry
pub use crate::core::error::{PalError, PalResult};
pub use crate::core::geometry::{Box2i, Vec2, Vec2i};

// Handles
pub use crate::core::handle::{ComponentId, CursorHandle, DisplayHandle, IconHandle, WindowHandle};

// Events
pub use crate::core::event_queue::{
    ClipboardFormat, DispatchError, EventQueue, ListenerId, ListenerResult, PlatformEvent, PlatformEventType,
};
pub use crate::core::input::{KeyCode, Modifiers, MouseButton};

// Component traits
pub use crate::core::display::{DisplayComponent, Monitor, VideoMode, DEFAULT_DPI};
pub use crate::core::hints::{GraphicsApiHints, OpenGlHints, OpenGlProfile};
pub use crate::core::window::{
    CursorCaptureMode, HitType, SizeLimits, SystemCursor, WindowCapabilities, WindowComponent, WindowMode,
    WindowStyle,
};

// Backends
pub use crate::platform::sdl::{SdlDisplayComponent, SdlWindowComponent};
pub use crate::platform::win32::Win32DisplayComponent;
#[cfg(not(any(target_arch = "wasm32", target_os = "android", target_os = "ios")))]
pub use crate::platform::winit::WinitWindowComponent;
