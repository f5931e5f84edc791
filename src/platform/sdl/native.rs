//=========================================================================
// SDL2 Native Driver
//=========================================================================
//
// `SdlVideo` over libSDL2 through the `sdl2` crate. Built with the
// `sdl2` cargo feature.
//
// Architecture:
// ```text
//  SdlWindowComponent / SdlDisplayComponent
//        │ SdlVideo
//        ▼
//  Sdl2Video
//   ├─ VideoSubsystem      windows, displays, GL attributes, clipboard
//   ├─ RefCell<EventPump>  poll_event / wait_event (&self)
//   └─ ACTIVE_HOOKS        hit-test hooks of the poll in progress
//        ▲
//        │ SDL_HitTest (C callback, same thread, inside SDL_PollEvent)
//  hit_test_trampoline
// ```
//
// Native windows are owned here, keyed by their SDL window id. Calls the
// `sdl2` crate does not wrap without panicking (GL attributes, border
// sizes, always-on-top, flashing, hit-testing, global mouse state) go
// through `sdl2::sys`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::c_void;
use std::os::raw::c_int;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;

use log::{debug, info};
use sdl2::event::{DisplayEvent, Event, WindowEvent};
use sdl2::mouse::{Cursor, MouseButton, MouseWheelDirection, SystemCursor};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::surface::Surface;
use sdl2::sys;
use sdl2::video::{DisplayMode, FullscreenType, Window, WindowPos};
use sdl2::{EventPump, Sdl, VideoSubsystem};

//=== Internal Dependencies ===============================================

use super::video::{
    GlAttr, SdlBorders, SdlCursorId, SdlDisplayEvent, SdlDisplayMode, SdlEvent, SdlFullscreen,
    SdlHitTestResult, SdlHooks, SdlKeymod, SdlRect, SdlSystemCursor, SdlVideo, SdlWindowEvent, SdlWindowFlags,
    SdlWindowId, BUTTON_LEFT, BUTTON_MIDDLE, BUTTON_RIGHT, BUTTON_X1, BUTTON_X2,
};

//=== Active Hooks ========================================================

type HooksPtr = *mut (dyn SdlHooks + 'static);

thread_local! {
    /// Hooks of the `poll_event`/`wait_event` call running on this thread.
    static ACTIVE_HOOKS: Cell<Option<HooksPtr>> = const { Cell::new(None) };
}

/// Publishes `hooks` to the C trampoline for the duration of one poll.
struct HooksGuard {
    previous: Option<HooksPtr>,
}

impl HooksGuard {
    fn install(hooks: &mut dyn SdlHooks) -> Self {
        let borrowed: *mut (dyn SdlHooks + '_) = hooks;
        // SAFETY: only the lifetime bound is erased. The pointer is
        // withdrawn in `Drop`, before `hooks` goes out of scope.
        let erased = unsafe { std::mem::transmute::<*mut (dyn SdlHooks + '_), HooksPtr>(borrowed) };
        let previous = ACTIVE_HOOKS.with(|slot| slot.replace(Some(erased)));
        Self { previous }
    }
}

impl Drop for HooksGuard {
    fn drop(&mut self) {
        ACTIVE_HOOKS.with(|slot| slot.set(self.previous));
    }
}

unsafe extern "C" fn hit_test_trampoline(
    window: *mut sys::SDL_Window,
    area: *const sys::SDL_Point,
    _data: *mut c_void,
) -> sys::SDL_HitTestResult {
    let Some(hooks) = ACTIVE_HOOKS.with(Cell::get) else {
        // SDL only asks while events are pumped; outside a poll there is
        // no callback to consult.
        return sys::SDL_HitTestResult::SDL_HITTEST_NORMAL;
    };

    // SAFETY: SDL passes a live window and point for the duration of the call.
    let (id, point) = unsafe { (sys::SDL_GetWindowID(window), ((*area).x, (*area).y)) };

    // SAFETY: the guard keeps `hooks` alive and exclusive to this poll, and
    // the trampoline runs synchronously on the polling thread.
    let result = catch_unwind(AssertUnwindSafe(|| unsafe { (*hooks).hit_test(id, point) }))
        .unwrap_or(SdlHitTestResult::Normal);

    hit_test_result(result)
}

//=== Conversions =========================================================

fn hit_test_result(result: SdlHitTestResult) -> sys::SDL_HitTestResult {
    use sys::SDL_HitTestResult as Native;
    match result {
        SdlHitTestResult::Normal => Native::SDL_HITTEST_NORMAL,
        SdlHitTestResult::Draggable => Native::SDL_HITTEST_DRAGGABLE,
        SdlHitTestResult::ResizeTopLeft => Native::SDL_HITTEST_RESIZE_TOPLEFT,
        SdlHitTestResult::ResizeTop => Native::SDL_HITTEST_RESIZE_TOP,
        SdlHitTestResult::ResizeTopRight => Native::SDL_HITTEST_RESIZE_TOPRIGHT,
        SdlHitTestResult::ResizeRight => Native::SDL_HITTEST_RESIZE_RIGHT,
        SdlHitTestResult::ResizeBottomRight => Native::SDL_HITTEST_RESIZE_BOTTOMRIGHT,
        SdlHitTestResult::ResizeBottom => Native::SDL_HITTEST_RESIZE_BOTTOM,
        SdlHitTestResult::ResizeBottomLeft => Native::SDL_HITTEST_RESIZE_BOTTOMLEFT,
        SdlHitTestResult::ResizeLeft => Native::SDL_HITTEST_RESIZE_LEFT,
    }
}

fn gl_attr(attr: GlAttr) -> sys::SDL_GLattr {
    use sys::SDL_GLattr as Native;
    match attr {
        GlAttr::RedSize => Native::SDL_GL_RED_SIZE,
        GlAttr::GreenSize => Native::SDL_GL_GREEN_SIZE,
        GlAttr::BlueSize => Native::SDL_GL_BLUE_SIZE,
        GlAttr::AlphaSize => Native::SDL_GL_ALPHA_SIZE,
        GlAttr::DoubleBuffer => Native::SDL_GL_DOUBLEBUFFER,
        GlAttr::DepthSize => Native::SDL_GL_DEPTH_SIZE,
        GlAttr::StencilSize => Native::SDL_GL_STENCIL_SIZE,
        GlAttr::MultisampleBuffers => Native::SDL_GL_MULTISAMPLEBUFFERS,
        GlAttr::MultisampleSamples => Native::SDL_GL_MULTISAMPLESAMPLES,
        GlAttr::FramebufferSrgbCapable => Native::SDL_GL_FRAMEBUFFER_SRGB_CAPABLE,
        GlAttr::ContextMajorVersion => Native::SDL_GL_CONTEXT_MAJOR_VERSION,
        GlAttr::ContextMinorVersion => Native::SDL_GL_CONTEXT_MINOR_VERSION,
        GlAttr::ContextFlags => Native::SDL_GL_CONTEXT_FLAGS,
        GlAttr::ContextProfileMask => Native::SDL_GL_CONTEXT_PROFILE_MASK,
    }
}

fn system_cursor(shape: SdlSystemCursor) -> SystemCursor {
    match shape {
        SdlSystemCursor::Arrow => SystemCursor::Arrow,
        SdlSystemCursor::IBeam => SystemCursor::IBeam,
        SdlSystemCursor::Wait => SystemCursor::Wait,
        SdlSystemCursor::Crosshair => SystemCursor::Crosshair,
        SdlSystemCursor::WaitArrow => SystemCursor::WaitArrow,
        SdlSystemCursor::SizeNwse => SystemCursor::SizeNWSE,
        SdlSystemCursor::SizeNesw => SystemCursor::SizeNESW,
        SdlSystemCursor::SizeWe => SystemCursor::SizeWE,
        SdlSystemCursor::SizeNs => SystemCursor::SizeNS,
        SdlSystemCursor::SizeAll => SystemCursor::SizeAll,
        SdlSystemCursor::No => SystemCursor::No,
        SdlSystemCursor::Hand => SystemCursor::Hand,
    }
}

/// Raw `SDL_BUTTON_*` code; unknown buttons become 0.
fn button_code(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => BUTTON_LEFT,
        MouseButton::Middle => BUTTON_MIDDLE,
        MouseButton::Right => BUTTON_RIGHT,
        MouseButton::X1 => BUTTON_X1,
        MouseButton::X2 => BUTTON_X2,
        MouseButton::Unknown => 0,
    }
}

fn window_event(event: WindowEvent) -> Option<SdlWindowEvent> {
    Some(match event {
        WindowEvent::Shown => SdlWindowEvent::Shown,
        WindowEvent::Hidden => SdlWindowEvent::Hidden,
        WindowEvent::Exposed => SdlWindowEvent::Exposed,
        WindowEvent::Moved(x, y) => SdlWindowEvent::Moved { x, y },
        WindowEvent::Resized(w, h) => SdlWindowEvent::Resized { w, h },
        WindowEvent::SizeChanged(w, h) => SdlWindowEvent::SizeChanged { w, h },
        WindowEvent::Minimized => SdlWindowEvent::Minimized,
        WindowEvent::Maximized => SdlWindowEvent::Maximized,
        WindowEvent::Restored => SdlWindowEvent::Restored,
        WindowEvent::Enter => SdlWindowEvent::Enter,
        WindowEvent::Leave => SdlWindowEvent::Leave,
        WindowEvent::FocusGained => SdlWindowEvent::FocusGained,
        WindowEvent::FocusLost => SdlWindowEvent::FocusLost,
        WindowEvent::Close => SdlWindowEvent::Close,
        WindowEvent::TakeFocus => SdlWindowEvent::TakeFocus,
        WindowEvent::HitTest => SdlWindowEvent::HitTest,
        WindowEvent::ICCProfChanged => SdlWindowEvent::IccProfileChanged,
        WindowEvent::DisplayChanged(display_index) => SdlWindowEvent::DisplayChanged { display_index },
        _ => return None,
    })
}

/// Converts one `sdl2` event into the PAL's native event record.
pub(super) fn convert_event(event: Event) -> SdlEvent {
    match event {
        Event::Quit { .. } => SdlEvent::Quit,
        Event::Window { window_id, win_event, .. } => match window_event(win_event) {
            Some(event) => SdlEvent::Window { window_id, event },
            None => SdlEvent::Other(sys::SDL_EventType::SDL_WINDOWEVENT as u32),
        },
        Event::KeyDown { window_id, scancode, keymod, repeat, .. } => SdlEvent::KeyDown {
            window_id,
            scancode: scancode.map_or(0, |code| code as i32 as u32),
            keymod: SdlKeymod::from_bits_truncate(keymod.bits()),
            repeat,
        },
        Event::KeyUp { window_id, scancode, keymod, .. } => SdlEvent::KeyUp {
            window_id,
            scancode: scancode.map_or(0, |code| code as i32 as u32),
            keymod: SdlKeymod::from_bits_truncate(keymod.bits()),
        },
        Event::TextInput { window_id, text, .. } => SdlEvent::TextInput { window_id, text },
        Event::MouseMotion { window_id, x, y, .. } => SdlEvent::MouseMotion { window_id, x, y },
        Event::MouseButtonDown { window_id, mouse_btn, .. } => SdlEvent::MouseButtonDown {
            window_id,
            button: button_code(mouse_btn),
        },
        Event::MouseButtonUp { window_id, mouse_btn, .. } => SdlEvent::MouseButtonUp {
            window_id,
            button: button_code(mouse_btn),
        },
        Event::MouseWheel { window_id, x, y, precise_x, precise_y, direction, .. } => SdlEvent::MouseWheel {
            window_id,
            x,
            y,
            precise_x,
            precise_y,
            flipped: direction == MouseWheelDirection::Flipped,
        },
        Event::ClipboardUpdate { .. } => SdlEvent::ClipboardUpdate,
        Event::DropBegin { window_id, .. } => SdlEvent::DropBegin { window_id },
        Event::DropFile { window_id, filename, .. } => SdlEvent::DropFile {
            window_id,
            file: PathBuf::from(filename),
        },
        Event::DropComplete { window_id, .. } => SdlEvent::DropComplete { window_id },
        Event::Display { display_index, display_event, .. } => {
            let event = match display_event {
                DisplayEvent::Orientation(_) => SdlDisplayEvent::Orientation,
                DisplayEvent::Connected => SdlDisplayEvent::Connected,
                DisplayEvent::Disconnected => SdlDisplayEvent::Disconnected,
                _ => return SdlEvent::Other(sys::SDL_EventType::SDL_DISPLAYEVENT as u32),
            };
            SdlEvent::Display { display_index, event }
        }
        Event::Unknown { type_, .. } => SdlEvent::Other(type_),
        _ => SdlEvent::Other(0),
    }
}

fn rect(rect: Rect) -> SdlRect {
    SdlRect {
        x: rect.x(),
        y: rect.y(),
        w: i32::try_from(rect.width()).unwrap_or(i32::MAX),
        h: i32::try_from(rect.height()).unwrap_or(i32::MAX),
    }
}

fn display_mode(mode: DisplayMode) -> SdlDisplayMode {
    SdlDisplayMode {
        bits_per_pixel: mode.format.into_masks().map_or(0, |masks| u32::from(masks.bpp)),
        w: mode.w,
        h: mode.h,
        refresh_rate: mode.refresh_rate,
    }
}

fn dimension(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

fn signed((w, h): (u32, u32)) -> (i32, i32) {
    (i32::try_from(w).unwrap_or(i32::MAX), i32::try_from(h).unwrap_or(i32::MAX))
}

fn sdl_bool(value: bool) -> sys::SDL_bool {
    if value {
        sys::SDL_bool::SDL_TRUE
    } else {
        sys::SDL_bool::SDL_FALSE
    }
}

/// Maps an SDL status code to `Err(SDL_GetError())`.
fn check(status: c_int) -> Result<(), String> {
    if status == 0 {
        Ok(())
    } else {
        Err(sdl2::get_error())
    }
}

//=== Sdl2Video ===========================================================

struct Subsystem {
    sdl: Sdl,
    video: VideoSubsystem,
    pump: RefCell<EventPump>,
}

/// libSDL2 video driver.
pub struct Sdl2Video {
    // Native objects are declared first so they drop before the subsystem.
    windows: HashMap<SdlWindowId, Window>,
    cursors: HashMap<SdlCursorId, Cursor>,
    next_cursor: SdlCursorId,
    subsystem: Option<Subsystem>,
}

impl Sdl2Video {
    /// Nothing is loaded until `SdlVideo::init`.
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            cursors: HashMap::new(),
            next_cursor: 1,
            subsystem: None,
        }
    }

    fn subsystem(&self) -> Result<&Subsystem, String> {
        self.subsystem
            .as_ref()
            .ok_or_else(|| "SDL video subsystem is not initialised".to_string())
    }

    fn video(&self) -> Result<&VideoSubsystem, String> {
        self.subsystem().map(|s| &s.video)
    }

    fn window(&self, id: SdlWindowId) -> Option<&Window> {
        let window = self.windows.get(&id);
        if window.is_none() {
            debug!(target: "pal::sdl", "No native window {}", id);
        }
        window
    }

    fn window_mut(&mut self, id: SdlWindowId) -> Option<&mut Window> {
        let window = self.windows.get_mut(&id);
        if window.is_none() {
            debug!(target: "pal::sdl", "No native window {}", id);
        }
        window
    }

    fn require_window(&mut self, id: SdlWindowId) -> Result<&mut Window, String> {
        self.windows
            .get_mut(&id)
            .ok_or_else(|| format!("Invalid window id {}", id))
    }
}

impl Default for Sdl2Video {
    fn default() -> Self {
        Self::new()
    }
}

impl SdlVideo for Sdl2Video {
    //--- Subsystem --------------------------------------------------------

    fn init(&mut self) -> Result<(), String> {
        if self.subsystem.is_some() {
            return Ok(());
        }
        let sdl = sdl2::init()?;
        let video = sdl.video()?;
        let pump = RefCell::new(sdl.event_pump()?);
        info!(target: "pal::sdl", "SDL video driver: {}", video.current_video_driver());
        self.subsystem = Some(Subsystem { sdl, video, pump });
        Ok(())
    }

    fn driver_name(&self) -> String {
        self.video()
            .map(|video| video.current_video_driver().to_string())
            .unwrap_or_default()
    }

    //--- Events -----------------------------------------------------------

    fn poll_event(&self, hooks: &mut dyn SdlHooks) -> Option<SdlEvent> {
        let subsystem = self.subsystem.as_ref()?;
        let _active = HooksGuard::install(hooks);
        let event = subsystem.pump.try_borrow_mut().ok()?.poll_event();
        event.map(convert_event)
    }

    fn wait_event(&self, hooks: &mut dyn SdlHooks) -> Result<SdlEvent, String> {
        let subsystem = self.subsystem()?;
        let _active = HooksGuard::install(hooks);
        let event = subsystem
            .pump
            .try_borrow_mut()
            .map_err(|_| "event pump is already in use".to_string())?
            .wait_event();
        Ok(convert_event(event))
    }

    //--- Windows ----------------------------------------------------------

    fn set_gl_attribute(&mut self, attr: GlAttr, value: i32) -> Result<(), String> {
        self.subsystem()?;
        // SAFETY: plain value setter; the video subsystem is initialised.
        check(unsafe { sys::SDL_GL_SetAttribute(gl_attr(attr), value) })
    }

    fn create_window(
        &mut self,
        title: &str,
        position: (i32, i32),
        size: (i32, i32),
        flags: SdlWindowFlags,
    ) -> Result<SdlWindowId, String> {
        let window = self
            .video()?
            .window(title, dimension(size.0), dimension(size.1))
            .position(position.0, position.1)
            .set_window_flags(flags.bits())
            .build()
            .map_err(|e| e.to_string())?;
        let id = window.id();
        self.windows.insert(id, window);
        Ok(id)
    }

    fn destroy_window(&mut self, window: SdlWindowId) {
        if self.windows.remove(&window).is_none() {
            debug!(target: "pal::sdl", "No native window {} to destroy", window);
        }
    }

    fn window_flags(&self, window: SdlWindowId) -> SdlWindowFlags {
        self.window(window)
            .map_or(SdlWindowFlags::empty(), |w| SdlWindowFlags::from_bits_truncate(w.window_flags()))
    }

    fn window_title(&self, window: SdlWindowId) -> String {
        self.window(window).map(|w| w.title().to_string()).unwrap_or_default()
    }

    fn set_window_title(&mut self, window: SdlWindowId, title: &str) {
        if let Some(w) = self.window_mut(window) {
            if let Err(e) = w.set_title(title) {
                debug!(target: "pal::sdl", "Title rejected: {}", e);
            }
        }
    }

    fn set_window_icon(&mut self, window: SdlWindowId, width: u32, height: u32, rgba: &[u8]) -> Result<(), String> {
        let mut pixels = rgba.to_vec();
        let icon = Surface::from_data(&mut pixels, width, height, width * 4, PixelFormatEnum::RGBA32)?;
        self.require_window(window)?.set_icon(icon);
        Ok(())
    }

    fn window_position(&self, window: SdlWindowId) -> (i32, i32) {
        self.window(window).map_or((0, 0), Window::position)
    }

    fn set_window_position(&mut self, window: SdlWindowId, x: i32, y: i32) {
        if let Some(w) = self.window_mut(window) {
            w.set_position(WindowPos::Positioned(x), WindowPos::Positioned(y));
        }
    }

    fn window_size(&self, window: SdlWindowId) -> (i32, i32) {
        self.window(window).map_or((0, 0), |w| signed(w.size()))
    }

    fn set_window_size(&mut self, window: SdlWindowId, w: i32, h: i32) {
        if let Some(native) = self.window_mut(window) {
            if let Err(e) = native.set_size(dimension(w), dimension(h)) {
                debug!(target: "pal::sdl", "Size rejected: {}", e);
            }
        }
    }

    fn window_borders_size(&self, window: SdlWindowId) -> Result<SdlBorders, String> {
        let native = self.window(window).ok_or_else(|| format!("Invalid window id {}", window))?;
        let mut borders = SdlBorders::default();
        // SAFETY: `native` is a live window; out-parameters are fields of a local.
        check(unsafe {
            sys::SDL_GetWindowBordersSize(
                native.raw(),
                &mut borders.top,
                &mut borders.left,
                &mut borders.bottom,
                &mut borders.right,
            )
        })?;
        Ok(borders)
    }

    fn window_minimum_size(&self, window: SdlWindowId) -> (i32, i32) {
        self.window(window).map_or((0, 0), |w| signed(w.minimum_size()))
    }

    fn set_window_minimum_size(&mut self, window: SdlWindowId, w: i32, h: i32) {
        if let Some(native) = self.window_mut(window) {
            if let Err(e) = native.set_minimum_size(dimension(w), dimension(h)) {
                debug!(target: "pal::sdl", "Minimum size rejected: {}", e);
            }
        }
    }

    fn window_maximum_size(&self, window: SdlWindowId) -> (i32, i32) {
        self.window(window).map_or((0, 0), |w| signed(w.maximum_size()))
    }

    fn set_window_maximum_size(&mut self, window: SdlWindowId, w: i32, h: i32) {
        if let Some(native) = self.window_mut(window) {
            if let Err(e) = native.set_maximum_size(dimension(w), dimension(h)) {
                debug!(target: "pal::sdl", "Maximum size rejected: {}", e);
            }
        }
    }

    fn show_window(&mut self, window: SdlWindowId) {
        if let Some(w) = self.window_mut(window) {
            w.show();
        }
    }

    fn hide_window(&mut self, window: SdlWindowId) {
        if let Some(w) = self.window_mut(window) {
            w.hide();
        }
    }

    fn minimize_window(&mut self, window: SdlWindowId) {
        if let Some(w) = self.window_mut(window) {
            w.minimize();
        }
    }

    fn maximize_window(&mut self, window: SdlWindowId) {
        if let Some(w) = self.window_mut(window) {
            w.maximize();
        }
    }

    fn restore_window(&mut self, window: SdlWindowId) {
        if let Some(w) = self.window_mut(window) {
            w.restore();
        }
    }

    fn raise_window(&mut self, window: SdlWindowId) {
        if let Some(w) = self.window_mut(window) {
            w.raise();
        }
    }

    fn flash_window(&mut self, window: SdlWindowId) -> Result<(), String> {
        let native = self.require_window(window)?;
        // SAFETY: `native` is a live window.
        check(unsafe { sys::SDL_FlashWindow(native.raw(), sys::SDL_FlashOperation::SDL_FLASH_UNTIL_FOCUSED) })
    }

    fn set_window_fullscreen(&mut self, window: SdlWindowId, mode: SdlFullscreen) -> Result<(), String> {
        let fullscreen = match mode {
            SdlFullscreen::Windowed => FullscreenType::Off,
            SdlFullscreen::Desktop => FullscreenType::Desktop,
            SdlFullscreen::Exclusive => FullscreenType::True,
        };
        self.require_window(window)?.set_fullscreen(fullscreen)
    }

    fn set_window_bordered(&mut self, window: SdlWindowId, bordered: bool) {
        if let Some(w) = self.window_mut(window) {
            w.set_bordered(bordered);
        }
    }

    fn set_window_resizable(&mut self, window: SdlWindowId, resizable: bool) {
        if let Some(w) = self.window_mut(window) {
            w.set_resizable(resizable);
        }
    }

    fn set_window_always_on_top(&mut self, window: SdlWindowId, on_top: bool) {
        if let Some(w) = self.window_mut(window) {
            // SAFETY: `w` is a live window.
            unsafe { sys::SDL_SetWindowAlwaysOnTop(w.raw(), sdl_bool(on_top)) };
        }
    }

    fn set_window_grab(&mut self, window: SdlWindowId, grabbed: bool) {
        if let Some(w) = self.window_mut(window) {
            w.set_grab(grabbed);
        }
    }

    fn set_relative_mouse_mode(&mut self, enabled: bool) -> Result<(), String> {
        self.subsystem()?.sdl.mouse().set_relative_mouse_mode(enabled);
        Ok(())
    }

    fn set_window_hit_test(&mut self, window: SdlWindowId, enabled: bool) -> Result<(), String> {
        let native = self.require_window(window)?;
        let callback: sys::SDL_HitTest = if enabled { Some(hit_test_trampoline) } else { None };
        // SAFETY: `native` is a live window; the trampoline reads no callback data.
        check(unsafe { sys::SDL_SetWindowHitTest(native.raw(), callback, std::ptr::null_mut()) })
    }

    //--- Cursors ----------------------------------------------------------

    fn create_system_cursor(&mut self, shape: SdlSystemCursor) -> Result<SdlCursorId, String> {
        let cursor = Cursor::from_system(system_cursor(shape))?;
        let id = self.next_cursor;
        self.next_cursor += 1;
        self.cursors.insert(id, cursor);
        Ok(id)
    }

    fn free_cursor(&mut self, cursor: SdlCursorId) {
        self.cursors.remove(&cursor);
    }

    fn set_cursor(&mut self, cursor: SdlCursorId) {
        match self.cursors.get(&cursor) {
            Some(native) => native.set(),
            None => debug!(target: "pal::sdl", "No native cursor {}", cursor),
        }
    }

    fn show_cursor(&mut self, visible: bool) {
        if let Ok(subsystem) = self.subsystem() {
            subsystem.sdl.mouse().show_cursor(visible);
        }
    }

    //--- Clipboard & mouse ------------------------------------------------

    fn has_clipboard_text(&self) -> bool {
        self.video().is_ok_and(|video| video.clipboard().has_clipboard_text())
    }

    fn global_mouse_state(&self) -> (i32, i32) {
        let (mut x, mut y) = (0, 0);
        // SAFETY: out-parameters are stack locals.
        unsafe { sys::SDL_GetGlobalMouseState(&mut x, &mut y) };
        (x, y)
    }

    //--- Displays ---------------------------------------------------------

    fn num_video_displays(&self) -> Result<i32, String> {
        self.video()?.num_video_displays()
    }

    fn display_name(&self, index: i32) -> Result<String, String> {
        self.video()?.display_name(index)
    }

    fn display_bounds(&self, index: i32) -> Result<SdlRect, String> {
        self.video()?.display_bounds(index).map(rect)
    }

    fn display_usable_bounds(&self, index: i32) -> Result<SdlRect, String> {
        self.video()?.display_usable_bounds(index).map(rect)
    }

    fn display_dpi(&self, index: i32) -> Result<(f32, f32, f32), String> {
        self.video()?.display_dpi(index)
    }

    fn current_display_mode(&self, index: i32) -> Result<SdlDisplayMode, String> {
        self.video()?.current_display_mode(index).map(display_mode)
    }

    fn num_display_modes(&self, index: i32) -> Result<i32, String> {
        self.video()?.num_display_modes(index)
    }

    fn display_mode(&self, index: i32, mode_index: i32) -> Result<SdlDisplayMode, String> {
        self.video()?.display_mode(index, mode_index).map(display_mode)
    }
}

//=========================================================================
// Tests
//=========================================================================
//
// libSDL2 needs a video device, so only the conversions and the hook
// plumbing are exercised here.
//

#[cfg(test)]
mod tests {
    use super::*;

    struct Answer(SdlHitTestResult, Vec<(SdlWindowId, (i32, i32))>);

    impl SdlHooks for Answer {
        fn hit_test(&mut self, window: SdlWindowId, point: (i32, i32)) -> SdlHitTestResult {
            self.1.push((window, point));
            self.0
        }
    }

    #[test]
    fn window_events_convert() {
        let event = convert_event(Event::Window {
            timestamp: 0,
            window_id: 3,
            win_event: WindowEvent::Moved(10, -20),
        });
        assert_eq!(
            event,
            SdlEvent::Window { window_id: 3, event: SdlWindowEvent::Moved { x: 10, y: -20 } }
        );

        let none = convert_event(Event::Window { timestamp: 0, window_id: 3, win_event: WindowEvent::None });
        assert!(matches!(none, SdlEvent::Other(_)));
    }

    #[test]
    fn quit_and_drops_convert() {
        assert_eq!(convert_event(Event::Quit { timestamp: 0 }), SdlEvent::Quit);
        assert_eq!(
            convert_event(Event::DropFile { timestamp: 0, window_id: 1, filename: "a.txt".to_string() }),
            SdlEvent::DropFile { window_id: 1, file: PathBuf::from("a.txt") }
        );
        assert_eq!(convert_event(Event::ClipboardUpdate { timestamp: 0 }), SdlEvent::ClipboardUpdate);
    }

    #[test]
    fn buttons_use_sdl_codes() {
        assert_eq!(button_code(MouseButton::Left), 1);
        assert_eq!(button_code(MouseButton::Middle), 2);
        assert_eq!(button_code(MouseButton::Right), 3);
        assert_eq!(button_code(MouseButton::X2), 5);
        assert_eq!(button_code(MouseButton::Unknown), 0);
    }

    #[test]
    fn hooks_are_published_only_during_a_poll() {
        assert!(ACTIVE_HOOKS.with(Cell::get).is_none());

        let mut hooks = Answer(SdlHitTestResult::Draggable, Vec::new());
        {
            let _active = HooksGuard::install(&mut hooks);
            let active = ACTIVE_HOOKS.with(Cell::get).unwrap();
            // SAFETY: the guard is alive and nothing else touches `hooks`.
            let result = unsafe { (*active).hit_test(7, (1, 2)) };
            assert_eq!(hit_test_result(result), sys::SDL_HitTestResult::SDL_HITTEST_DRAGGABLE);
        }

        assert!(ACTIVE_HOOKS.with(Cell::get).is_none());
        assert_eq!(hooks.1, vec![(7, (1, 2))]);
    }

    #[test]
    fn uninitialised_driver_reports_errors() {
        let video = Sdl2Video::new();
        assert!(video.num_video_displays().is_err());
        assert_eq!(video.driver_name(), "");
        assert_eq!(video.window_flags(1), SdlWindowFlags::empty());
    }
}
