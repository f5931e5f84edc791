//=========================================================================
// Window Component
//=========================================================================
//
// Backend-independent window API. One implementation per backend.
//
// Lifecycle (per window):
//   create(hints) → Created ──property ops / pumped events──→ destroy → Destroyed
//
// After `destroy`, only `is_window_destroyed` is valid for that handle;
// everything else fails with `InvalidHandle`.
//
// Capability flags in `WindowCapabilities` must be checked before calling
// optional operations. Calling an unsupported operation fails with
// `UnsupportedOperation`; it never silently does nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use bitflags::bitflags;

//=== Internal Dependencies ===============================================

use super::display::DisplayComponent;
use super::error::{PalError, PalResult};
use super::event_queue::{EventQueue, PlatformEventType};
use super::geometry::{Vec2, Vec2i};
use super::handle::{ComponentId, CursorHandle, DisplayHandle, IconHandle, WindowHandle};
use super::hints::GraphicsApiHints;

//=== WindowMode ==========================================================

/// Presentation state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowMode {
    Hidden,
    Minimized,
    Normal,
    Maximized,
    /// Borderless window covering the whole monitor.
    WindowedFullscreen,
    /// Fullscreen with a video mode switch.
    ExclusiveFullscreen,
}

//=== WindowStyle =========================================================

/// Window border decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowStyle {
    Borderless,
    FixedBorder,
    ResizableBorder,
    /// Small-caption tool window.
    ToolBox,
}

//=== CursorCaptureMode ===================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CursorCaptureMode {
    /// Cursor moves freely.
    #[default]
    Normal,
    /// Cursor is confined to the client area.
    Confined,
    /// Cursor is hidden and locked in place; motion is relative.
    Locked,
}

//=== HitType =============================================================

/// Result of a user hit-test callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitType {
    /// Let the OS decide. Not every backend has a native equivalent.
    Default,
    Normal,
    Draggable,
    ResizeTopLeft,
    ResizeTop,
    ResizeTopRight,
    ResizeRight,
    ResizeBottomRight,
    ResizeBottom,
    ResizeBottomLeft,
    ResizeLeft,
}

/// User hit-test function, called with window-local coordinates.
pub type HitTestCallback = Box<dyn Fn(WindowHandle, Vec2) -> HitType>;

//=== SystemCursor ========================================================

/// Built-in OS cursor shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SystemCursor {
    #[default]
    Arrow,
    TextBeam,
    Wait,
    Crosshair,
    Progress,
    ResizeNwse,
    ResizeNesw,
    ResizeEw,
    ResizeNs,
    ResizeAll,
    NotAllowed,
    Hand,
}

//=== SizeLimits ==========================================================

/// Minimum or maximum client size. `None` leaves that axis unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SizeLimits {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl SizeLimits {
    pub const NONE: Self = Self {
        width: None,
        height: None,
    };

    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    /// Rejects negative dimensions.
    pub fn validate(&self) -> PalResult<()> {
        match (self.width, self.height) {
            (Some(w), _) if w < 0 => Err(PalError::InvalidArgument(format!("negative width limit {}", w))),
            (_, Some(h)) if h < 0 => Err(PalError::InvalidArgument(format!("negative height limit {}", h))),
            _ => Ok(()),
        }
    }
}

//=== EventTypeFlags ======================================================

bitflags! {
    /// Set of event kinds a window backend can produce.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventTypeFlags: u32 {
        const FOCUS                  = 1 << 0;
        const WINDOW_MOVE            = 1 << 1;
        const WINDOW_RESIZE          = 1 << 2;
        const WINDOW_MODE_CHANGE     = 1 << 3;
        const WINDOW_DPI_CHANGE      = 1 << 4;
        const KEY_DOWN               = 1 << 5;
        const KEY_UP                 = 1 << 6;
        const TEXT_INPUT             = 1 << 7;
        const MOUSE_ENTER            = 1 << 8;
        const MOUSE_MOVE             = 1 << 9;
        const MOUSE_DOWN             = 1 << 10;
        const MOUSE_UP               = 1 << 11;
        const SCROLL                 = 1 << 12;
        const CLOSE                  = 1 << 13;
        const FILE_DROP              = 1 << 14;
        const CLIPBOARD_UPDATE       = 1 << 15;
        const DISPLAY_CONNECTION     = 1 << 16;
        const PRIMARY_DISPLAY_CHANGE = 1 << 17;
        const DISPLAY_CHANGE         = 1 << 18;
    }
}

impl From<PlatformEventType> for EventTypeFlags {
    fn from(kind: PlatformEventType) -> Self {
        match kind {
            PlatformEventType::Focus => Self::FOCUS,
            PlatformEventType::WindowMove => Self::WINDOW_MOVE,
            PlatformEventType::WindowResize => Self::WINDOW_RESIZE,
            PlatformEventType::WindowModeChange => Self::WINDOW_MODE_CHANGE,
            PlatformEventType::WindowDpiChange => Self::WINDOW_DPI_CHANGE,
            PlatformEventType::KeyDown => Self::KEY_DOWN,
            PlatformEventType::KeyUp => Self::KEY_UP,
            PlatformEventType::TextInput => Self::TEXT_INPUT,
            PlatformEventType::MouseEnter => Self::MOUSE_ENTER,
            PlatformEventType::MouseMove => Self::MOUSE_MOVE,
            PlatformEventType::MouseDown => Self::MOUSE_DOWN,
            PlatformEventType::MouseUp => Self::MOUSE_UP,
            PlatformEventType::Scroll => Self::SCROLL,
            PlatformEventType::Close => Self::CLOSE,
            PlatformEventType::FileDrop => Self::FILE_DROP,
            PlatformEventType::ClipboardUpdate => Self::CLIPBOARD_UPDATE,
            PlatformEventType::DisplayConnection => Self::DISPLAY_CONNECTION,
            PlatformEventType::PrimaryDisplayChange => Self::PRIMARY_DISPLAY_CHANGE,
            PlatformEventType::DisplayChange => Self::DISPLAY_CHANGE,
        }
    }
}

impl EventTypeFlags {
    pub fn supports(self, kind: PlatformEventType) -> bool {
        self.contains(Self::from(kind))
    }
}

//=== WindowCapabilities ==================================================

/// Static feature flags of a window backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCapabilities {
    pub can_set_icon: bool,
    pub can_get_display: bool,
    pub can_set_cursor: bool,
    pub can_capture_cursor: bool,
    pub can_hit_test: bool,
    pub supported_events: EventTypeFlags,
    pub supported_styles: &'static [WindowStyle],
    pub supported_modes: &'static [WindowMode],
}

impl WindowCapabilities {
    /// Fails with `UnsupportedOperation` unless `flag` is set.
    pub fn require(flag: bool, operation: &'static str) -> PalResult<()> {
        if flag {
            Ok(())
        } else {
            Err(PalError::UnsupportedOperation(operation))
        }
    }

    pub fn supports_style(&self, style: WindowStyle) -> bool {
        self.supported_styles.contains(&style)
    }

    pub fn supports_mode(&self, mode: WindowMode) -> bool {
        self.supported_modes.contains(&mode)
    }

    pub fn require_style(&self, style: WindowStyle) -> PalResult<()> {
        Self::require(self.supports_style(style), "window style")
    }

    pub fn require_mode(&self, mode: WindowMode) -> PalResult<()> {
        Self::require(self.supports_mode(mode), "window mode")
    }
}

//=== WindowComponent =====================================================

/// Window lifecycle, event pump and property access for one backend.
///
/// The trait is object safe; hosts usually hold `Box<dyn WindowComponent>`.
pub trait WindowComponent {
    //--- Identity ---------------------------------------------------------

    /// Backend name, used in logs and errors.
    fn component_name(&self) -> &'static str;

    /// Owner id stamped on every handle this component issues.
    fn id(&self) -> ComponentId;

    fn capabilities(&self) -> &WindowCapabilities;

    //--- Event Pump -------------------------------------------------------

    /// Drains every queued native event, translating each into canonical
    /// events raised on `queue`.
    ///
    /// With `wait` set, blocks until at least one native event arrives.
    ///
    /// # Errors
    ///
    /// A translation failure or a hit-test fault is returned after the
    /// native event that caused it. Listener failures are logged and do
    /// not abort the pump.
    fn process_events(&mut self, queue: &mut EventQueue, wait: bool) -> PalResult<()>;

    //--- Lifecycle --------------------------------------------------------

    /// Creates a window configured for `hints`.
    ///
    /// # Errors
    ///
    /// `UnsupportedConfiguration` if the backend cannot honour the hints.
    fn create(&mut self, hints: &GraphicsApiHints) -> PalResult<WindowHandle>;

    /// Destroys the window. Calling it twice fails with `InvalidHandle`.
    fn destroy(&mut self, window: WindowHandle) -> PalResult<()>;

    /// True once `destroy` has run for `window`.
    fn is_window_destroyed(&self, window: WindowHandle) -> PalResult<bool>;

    //--- Title & Icon -----------------------------------------------------

    fn title(&self, window: WindowHandle) -> PalResult<String>;
    fn set_title(&mut self, window: WindowHandle, title: &str) -> PalResult<()>;

    /// Creates an icon from tightly packed RGBA8 pixels.
    fn create_icon(&mut self, width: u32, height: u32, rgba: &[u8]) -> PalResult<IconHandle>;
    fn destroy_icon(&mut self, icon: IconHandle) -> PalResult<()>;

    /// Current icon; `None` (with a warning) if none was ever set.
    fn icon(&self, window: WindowHandle) -> PalResult<Option<IconHandle>>;
    fn set_icon(&mut self, window: WindowHandle, icon: IconHandle) -> PalResult<()>;

    //--- Cursor -----------------------------------------------------------

    fn create_cursor(&mut self, shape: SystemCursor) -> PalResult<CursorHandle>;
    fn destroy_cursor(&mut self, cursor: CursorHandle) -> PalResult<()>;

    /// Sets the cursor shown over the window; `None` hides it.
    fn set_cursor(&mut self, window: WindowHandle, cursor: Option<CursorHandle>) -> PalResult<()>;

    fn cursor_capture_mode(&self, window: WindowHandle) -> PalResult<CursorCaptureMode>;
    fn set_cursor_capture_mode(&mut self, window: WindowHandle, mode: CursorCaptureMode) -> PalResult<()>;

    //--- Geometry ---------------------------------------------------------

    /// Top-left corner of the outer frame, screen coordinates.
    fn position(&self, window: WindowHandle) -> PalResult<Vec2i>;
    fn set_position(&mut self, window: WindowHandle, position: Vec2i) -> PalResult<()>;

    /// Top-left corner of the client area, screen coordinates.
    fn client_position(&self, window: WindowHandle) -> PalResult<Vec2i>;
    fn set_client_position(&mut self, window: WindowHandle, position: Vec2i) -> PalResult<()>;

    /// Outer frame size, including borders.
    fn size(&self, window: WindowHandle) -> PalResult<Vec2i>;
    fn set_size(&mut self, window: WindowHandle, size: Vec2i) -> PalResult<()>;

    fn client_size(&self, window: WindowHandle) -> PalResult<Vec2i>;
    fn set_client_size(&mut self, window: WindowHandle, size: Vec2i) -> PalResult<()>;

    fn min_client_size(&self, window: WindowHandle) -> PalResult<SizeLimits>;
    fn set_min_client_size(&mut self, window: WindowHandle, limits: SizeLimits) -> PalResult<()>;

    fn max_client_size(&self, window: WindowHandle) -> PalResult<SizeLimits>;
    fn set_max_client_size(&mut self, window: WindowHandle, limits: SizeLimits) -> PalResult<()>;

    fn screen_to_client(&self, window: WindowHandle, point: Vec2i) -> PalResult<Vec2i>;
    fn client_to_screen(&self, window: WindowHandle, point: Vec2i) -> PalResult<Vec2i>;

    /// Monitor the window's client area is centred on, as issued by
    /// `displays`. Falls back to the primary monitor.
    fn display(&self, window: WindowHandle, displays: &dyn DisplayComponent) -> PalResult<DisplayHandle> {
        WindowCapabilities::require(self.capabilities().can_get_display, "display")?;

        let origin = self.client_position(window)?;
        let size = self.client_size(window)?;
        let centre = Vec2i::new(origin.x + size.x / 2, origin.y + size.y / 2);

        match displays.display_at(centre) {
            Some(display) => Ok(display),
            None => displays.primary(),
        }
    }

    //--- Mode & Style -----------------------------------------------------

    fn mode(&self, window: WindowHandle) -> PalResult<WindowMode>;
    fn set_mode(&mut self, window: WindowHandle, mode: WindowMode) -> PalResult<()>;

    fn border_style(&self, window: WindowHandle) -> PalResult<WindowStyle>;
    fn set_border_style(&mut self, window: WindowHandle, style: WindowStyle) -> PalResult<()>;

    fn is_always_on_top(&self, window: WindowHandle) -> PalResult<bool>;
    fn set_always_on_top(&mut self, window: WindowHandle, on_top: bool) -> PalResult<()>;

    //--- Interaction ------------------------------------------------------

    /// Installs (`Some`) or removes (`None`) the hit-test callback.
    fn set_hit_test_callback(&mut self, window: WindowHandle, callback: Option<HitTestCallback>) -> PalResult<()>;

    /// Raises the window and gives it keyboard focus.
    fn focus_window(&mut self, window: WindowHandle) -> PalResult<()>;

    /// Flashes the taskbar entry or bounces the dock icon.
    fn request_attention(&mut self, window: WindowHandle) -> PalResult<()>;
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_limits_reject_negative_dimensions() {
        assert!(SizeLimits::new(10, 10).validate().is_ok());
        assert!(SizeLimits::NONE.validate().is_ok());
        assert!(matches!(
            SizeLimits { width: Some(-1), height: None }.validate(),
            Err(PalError::InvalidArgument(_))
        ));
    }

    #[test]
    fn event_flags_cover_every_kind() {
        let mut all = EventTypeFlags::empty();
        for kind in PlatformEventType::ALL {
            let flag = EventTypeFlags::from(kind);
            assert!(!all.intersects(flag), "{:?} shares a bit", kind);
            all |= flag;
        }
        assert_eq!(all, EventTypeFlags::all());
    }

    #[test]
    fn capabilities_gate_styles_and_modes() {
        let caps = WindowCapabilities {
            can_set_icon: false,
            can_get_display: true,
            can_set_cursor: true,
            can_capture_cursor: false,
            can_hit_test: false,
            supported_events: EventTypeFlags::CLOSE | EventTypeFlags::FOCUS,
            supported_styles: &[WindowStyle::Borderless],
            supported_modes: &[WindowMode::Normal, WindowMode::Hidden],
        };

        assert!(caps.require_style(WindowStyle::Borderless).is_ok());
        assert_eq!(
            caps.require_style(WindowStyle::ToolBox),
            Err(PalError::UnsupportedOperation("window style"))
        );
        assert!(caps.require_mode(WindowMode::Hidden).is_ok());
        assert!(caps.require_mode(WindowMode::ExclusiveFullscreen).is_err());
        assert!(caps.supported_events.supports(PlatformEventType::Close));
        assert!(!caps.supported_events.supports(PlatformEventType::Scroll));
        assert_eq!(
            WindowCapabilities::require(caps.can_set_icon, "set_icon"),
            Err(PalError::UnsupportedOperation("set_icon"))
        );
    }
}
