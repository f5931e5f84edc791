//=========================================================================
// SDL Video Surface
//=========================================================================
//
// The native call surface the SDL components are written against. It
// mirrors the slice of the SDL2 video API the PAL uses: window objects,
// GL attributes, the event queue, the hit-test hook and display queries.
//
// Native callbacks:
//   poll_event / wait_event receive a `&mut dyn SdlHooks`. The driver
//   calls `SdlHooks::hit_test` synchronously, on the pumping thread,
//   whenever the window manager asks for a hit-test while events are
//   being drained. Both take `&self` so hooks may run display queries
//   against the same driver while the queue is being drained.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use bitflags::bitflags;

//=== Native Ids ==========================================================

/// SDL window id. 0 is never a valid window.
pub type SdlWindowId = u32;

/// Native cursor object id.
pub type SdlCursorId = u64;

//=== Window Flags ========================================================

bitflags! {
    /// `SDL_WindowFlags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SdlWindowFlags: u32 {
        const FULLSCREEN         = 0x0000_0001;
        const OPENGL             = 0x0000_0002;
        const SHOWN              = 0x0000_0004;
        const HIDDEN             = 0x0000_0008;
        const BORDERLESS         = 0x0000_0010;
        const RESIZABLE          = 0x0000_0020;
        const MINIMIZED          = 0x0000_0040;
        const MAXIMIZED          = 0x0000_0080;
        const MOUSE_GRABBED      = 0x0000_0100;
        const INPUT_FOCUS        = 0x0000_0200;
        const MOUSE_FOCUS        = 0x0000_0400;
        const FULLSCREEN_DESKTOP = 0x0000_1001;
        const ALWAYS_ON_TOP      = 0x0000_8000;
        const SKIP_TASKBAR       = 0x0001_0000;
        const UTILITY            = 0x0002_0000;
        const VULKAN             = 0x1000_0000;
    }
}

bitflags! {
    /// `SDL_Keymod`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SdlKeymod: u16 {
        const LSHIFT = 0x0001;
        const RSHIFT = 0x0002;
        const LCTRL  = 0x0040;
        const RCTRL  = 0x0080;
        const LALT   = 0x0100;
        const RALT   = 0x0200;
        const LGUI   = 0x0400;
        const RGUI   = 0x0800;
        const NUM    = 0x1000;
        const CAPS   = 0x2000;
    }
}

/// Sentinel for "let the window manager pick".
pub const WINDOWPOS_UNDEFINED: i32 = 0x1FFF_0000;

/// Button codes from `SDL_mouse.h`.
pub const BUTTON_LEFT: u8 = 1;
pub const BUTTON_MIDDLE: u8 = 2;
pub const BUTTON_RIGHT: u8 = 3;
pub const BUTTON_X1: u8 = 4;
pub const BUTTON_X2: u8 = 5;

//=== GL Attributes =======================================================

/// `SDL_GLattr` subset the PAL configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlAttr {
    RedSize,
    GreenSize,
    BlueSize,
    AlphaSize,
    DoubleBuffer,
    DepthSize,
    StencilSize,
    MultisampleBuffers,
    MultisampleSamples,
    FramebufferSrgbCapable,
    ContextMajorVersion,
    ContextMinorVersion,
    ContextFlags,
    ContextProfileMask,
}

pub const GL_CONTEXT_PROFILE_CORE: i32 = 0x0001;
pub const GL_CONTEXT_PROFILE_COMPATIBILITY: i32 = 0x0002;
pub const GL_CONTEXT_DEBUG_FLAG: i32 = 0x0001;
pub const GL_CONTEXT_FORWARD_COMPATIBLE_FLAG: i32 = 0x0002;

//=== Misc Native Types ===================================================

/// `SDL_HitTestResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdlHitTestResult {
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

/// `SDL_SystemCursor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdlSystemCursor {
    Arrow,
    IBeam,
    Wait,
    Crosshair,
    WaitArrow,
    SizeNwse,
    SizeNesw,
    SizeWe,
    SizeNs,
    SizeAll,
    No,
    Hand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdlFullscreen {
    Windowed,
    /// `SDL_WINDOW_FULLSCREEN_DESKTOP`.
    Desktop,
    /// `SDL_WINDOW_FULLSCREEN`, switches the video mode.
    Exclusive,
}

/// Window decoration sizes from `SDL_GetWindowBordersSize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SdlBorders {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SdlRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// `SDL_DisplayMode`. Drivers may leave fields zeroed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SdlDisplayMode {
    pub bits_per_pixel: u32,
    pub w: i32,
    pub h: i32,
    pub refresh_rate: i32,
}

//=== Events ==============================================================

/// `SDL_WindowEventID` with its `data1`/`data2` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdlWindowEvent {
    Shown,
    Hidden,
    Exposed,
    Moved { x: i32, y: i32 },
    Resized { w: i32, h: i32 },
    SizeChanged { w: i32, h: i32 },
    Minimized,
    Maximized,
    Restored,
    Enter,
    Leave,
    FocusGained,
    FocusLost,
    Close,
    TakeFocus,
    HitTest,
    IccProfileChanged,
    DisplayChanged { display_index: i32 },
}

/// `SDL_DisplayEventID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdlDisplayEvent {
    Orientation,
    Connected,
    Disconnected,
}

/// One entry of the native event queue.
#[derive(Debug, Clone, PartialEq)]
pub enum SdlEvent {
    Quit,
    Window {
        window_id: SdlWindowId,
        event: SdlWindowEvent,
    },
    KeyDown {
        window_id: SdlWindowId,
        scancode: u32,
        keymod: SdlKeymod,
        repeat: bool,
    },
    KeyUp {
        window_id: SdlWindowId,
        scancode: u32,
        keymod: SdlKeymod,
    },
    TextInput {
        window_id: SdlWindowId,
        text: String,
    },
    MouseMotion {
        window_id: SdlWindowId,
        x: i32,
        y: i32,
    },
    MouseButtonDown {
        window_id: SdlWindowId,
        button: u8,
    },
    MouseButtonUp {
        window_id: SdlWindowId,
        button: u8,
    },
    MouseWheel {
        window_id: SdlWindowId,
        x: i32,
        y: i32,
        precise_x: f32,
        precise_y: f32,
        flipped: bool,
    },
    ClipboardUpdate,
    /// `window_id` is 0 when the drop did not target a window.
    DropBegin { window_id: SdlWindowId },
    DropFile {
        window_id: SdlWindowId,
        file: PathBuf,
    },
    DropComplete { window_id: SdlWindowId },
    Display {
        display_index: i32,
        event: SdlDisplayEvent,
    },
    /// Any event type the PAL does not model.
    Other(u32),
}

//=== Hooks ===============================================================

/// Callbacks the driver invokes while the event queue is being drained.
pub trait SdlHooks {
    /// `SDL_HitTest` trampoline. `point` is window-local.
    fn hit_test(&mut self, window: SdlWindowId, point: (i32, i32)) -> SdlHitTestResult;
}

//=== SdlVideo ============================================================

/// SDL2 video subsystem calls. Errors carry `SDL_GetError()`.
pub trait SdlVideo {
    //--- Subsystem --------------------------------------------------------

    fn init(&mut self) -> Result<(), String>;
    fn driver_name(&self) -> String;

    //--- Events -----------------------------------------------------------

    /// `SDL_PollEvent`.
    fn poll_event(&self, hooks: &mut dyn SdlHooks) -> Option<SdlEvent>;

    /// `SDL_WaitEvent`.
    fn wait_event(&self, hooks: &mut dyn SdlHooks) -> Result<SdlEvent, String>;

    //--- Windows ----------------------------------------------------------

    fn set_gl_attribute(&mut self, attr: GlAttr, value: i32) -> Result<(), String>;

    fn create_window(
        &mut self,
        title: &str,
        position: (i32, i32),
        size: (i32, i32),
        flags: SdlWindowFlags,
    ) -> Result<SdlWindowId, String>;

    fn destroy_window(&mut self, window: SdlWindowId);

    fn window_flags(&self, window: SdlWindowId) -> SdlWindowFlags;

    fn window_title(&self, window: SdlWindowId) -> String;
    fn set_window_title(&mut self, window: SdlWindowId, title: &str);

    fn set_window_icon(&mut self, window: SdlWindowId, width: u32, height: u32, rgba: &[u8]) -> Result<(), String>;

    /// Client-area origin, screen coordinates.
    fn window_position(&self, window: SdlWindowId) -> (i32, i32);
    fn set_window_position(&mut self, window: SdlWindowId, x: i32, y: i32);

    /// Client-area size.
    fn window_size(&self, window: SdlWindowId) -> (i32, i32);
    fn set_window_size(&mut self, window: SdlWindowId, w: i32, h: i32);

    fn window_borders_size(&self, window: SdlWindowId) -> Result<SdlBorders, String>;

    fn window_minimum_size(&self, window: SdlWindowId) -> (i32, i32);
    fn set_window_minimum_size(&mut self, window: SdlWindowId, w: i32, h: i32);
    fn window_maximum_size(&self, window: SdlWindowId) -> (i32, i32);
    fn set_window_maximum_size(&mut self, window: SdlWindowId, w: i32, h: i32);

    fn show_window(&mut self, window: SdlWindowId);
    fn hide_window(&mut self, window: SdlWindowId);
    fn minimize_window(&mut self, window: SdlWindowId);
    fn maximize_window(&mut self, window: SdlWindowId);
    fn restore_window(&mut self, window: SdlWindowId);
    fn raise_window(&mut self, window: SdlWindowId);
    fn flash_window(&mut self, window: SdlWindowId) -> Result<(), String>;

    fn set_window_fullscreen(&mut self, window: SdlWindowId, mode: SdlFullscreen) -> Result<(), String>;
    fn set_window_bordered(&mut self, window: SdlWindowId, bordered: bool);
    fn set_window_resizable(&mut self, window: SdlWindowId, resizable: bool);
    fn set_window_always_on_top(&mut self, window: SdlWindowId, on_top: bool);
    fn set_window_grab(&mut self, window: SdlWindowId, grabbed: bool);
    fn set_relative_mouse_mode(&mut self, enabled: bool) -> Result<(), String>;

    /// Enables or disables the native hit-test hook for `window`.
    fn set_window_hit_test(&mut self, window: SdlWindowId, enabled: bool) -> Result<(), String>;

    //--- Cursors ----------------------------------------------------------

    fn create_system_cursor(&mut self, shape: SdlSystemCursor) -> Result<SdlCursorId, String>;
    fn free_cursor(&mut self, cursor: SdlCursorId);
    fn set_cursor(&mut self, cursor: SdlCursorId);
    fn show_cursor(&mut self, visible: bool);

    //--- Clipboard & mouse ------------------------------------------------

    fn has_clipboard_text(&self) -> bool;
    fn global_mouse_state(&self) -> (i32, i32);

    //--- Displays ---------------------------------------------------------

    fn num_video_displays(&self) -> Result<i32, String>;
    fn display_name(&self, index: i32) -> Result<String, String>;
    fn display_bounds(&self, index: i32) -> Result<SdlRect, String>;
    fn display_usable_bounds(&self, index: i32) -> Result<SdlRect, String>;
    /// `(ddpi, hdpi, vdpi)`.
    fn display_dpi(&self, index: i32) -> Result<(f32, f32, f32), String>;
    fn current_display_mode(&self, index: i32) -> Result<SdlDisplayMode, String>;
    fn num_display_modes(&self, index: i32) -> Result<i32, String>;
    fn display_mode(&self, index: i32, mode_index: i32) -> Result<SdlDisplayMode, String>;
}
