//=========================================================================
// SDL Window Component
//=========================================================================
//
// `WindowComponent` over the SDL2 video API.
//
// Architecture:
// ```text
//  Host ──process_events(queue, wait)──▶ SdlWindowComponent
//                                          │ borrow(video)
//                                          │   poll_event(&mut HitTestBridge)
//                                          │     └─ hit-test trampoline (reentrant)
//                                          │ release video
//                                          ├─ translate(SdlEvent)
//                                          └─ queue.raise(window, event)
// ```
//
// The driver is shared through `Rc<RefCell<_>>` with the display
// component. It is never borrowed while listeners run, so listeners may
// call back into either component. During a poll it is only borrowed
// shared, so hit-test callbacks may query the display component.
//
// Window ids issued by SDL are never reused, so destroyed records stay in
// the table and keep answering `is_window_destroyed`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::hit_test::HitTestBridge;
use super::video::{
    GlAttr, SdlBorders, SdlCursorId, SdlEvent, SdlFullscreen, SdlSystemCursor, SdlVideo,
    SdlWindowFlags, SdlWindowId, GL_CONTEXT_DEBUG_FLAG, GL_CONTEXT_FORWARD_COMPATIBLE_FLAG,
    GL_CONTEXT_PROFILE_COMPATIBILITY, GL_CONTEXT_PROFILE_CORE, WINDOWPOS_UNDEFINED,
};
use crate::core::error::{PalError, PalResult};
use crate::core::event_queue::EventQueue;
use crate::core::geometry::Vec2i;
use crate::core::handle::{
    ComponentId, CursorHandle, CursorKind, HandleTable, IconHandle, IconKind, WindowHandle, WindowKind,
};
use crate::core::hints::{ContextDepthBits, ContextStencilBits, GlVersion, GraphicsApiHints, OpenGlHints, OpenGlProfile};
use crate::core::window::{
    CursorCaptureMode, EventTypeFlags, HitTestCallback, SizeLimits, SystemCursor, WindowCapabilities,
    WindowComponent, WindowMode, WindowStyle,
};
use crate::platform::drop::DropAccumulator;

//=== Constants ===========================================================

pub(super) const COMPONENT: &str = "SdlWindowComponent";

const DEFAULT_CLIENT_SIZE: (i32, i32) = (800, 600);

const SUPPORTED_STYLES: &[WindowStyle] = &[
    WindowStyle::Borderless,
    WindowStyle::FixedBorder,
    WindowStyle::ResizableBorder,
];

const SUPPORTED_MODES: &[WindowMode] = &[
    WindowMode::Hidden,
    WindowMode::Minimized,
    WindowMode::Normal,
    WindowMode::Maximized,
    WindowMode::WindowedFullscreen,
    WindowMode::ExclusiveFullscreen,
];

//=== SdlWindow ===========================================================

/// Per-window record behind a `WindowHandle`.
pub(crate) struct SdlWindow {
    pub(super) id: SdlWindowId,
    pub(super) destroyed: bool,
    pub(super) icon: Option<IconHandle>,
    pub(super) hit_test: Option<HitTestCallback>,
    pub(super) capture: CursorCaptureMode,
}

impl SdlWindow {
    pub(super) fn new(id: SdlWindowId) -> Self {
        Self {
            id,
            destroyed: false,
            icon: None,
            hit_test: None,
            capture: CursorCaptureMode::Normal,
        }
    }
}

struct SdlIcon {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

//=== OpenGL Hint Validation ==============================================

/// Rejects hints SDL cannot turn into GL attributes.
fn validate_gl_hints(hints: &OpenGlHints) -> PalResult<()> {
    let unsupported = |what: String| Err(PalError::UnsupportedConfiguration(what));
    let GlVersion { major, minor } = hints.version;

    let max_minor = match major {
        1 => 5,
        2 => 1,
        3 => 3,
        4 => 6,
        _ => return unsupported(format!("OpenGL {}.{} does not exist", major, minor)),
    };
    if minor > max_minor {
        return unsupported(format!("OpenGL {}.{} does not exist", major, minor));
    }

    if !matches!(hints.depth_bits, ContextDepthBits::Depth24 | ContextDepthBits::Depth32) {
        return unsupported(format!("{} depth bits", hints.depth_bits.bits()));
    }
    if !matches!(hints.stencil_bits, ContextStencilBits::Stencil1 | ContextStencilBits::Stencil8) {
        return unsupported(format!("{} stencil bits", hints.stencil_bits.bits()));
    }
    if ![0, 2, 4, 8, 16].contains(&hints.multisamples) {
        return unsupported(format!("{} multisamples", hints.multisamples));
    }
    if hints.color_bits.channels().iter().any(|bits| *bits > 16) {
        return unsupported(format!("color bits {:?}", hints.color_bits));
    }
    if hints.profile != OpenGlProfile::None && hints.version < GlVersion::new(3, 2) {
        return unsupported(format!("{:?} profile requires OpenGL 3.2", hints.profile));
    }
    if hints.forward_compatible && hints.version < GlVersion::new(3, 0) {
        return unsupported("forward-compatible contexts require OpenGL 3.0".to_string());
    }

    Ok(())
}

fn gl_attributes(hints: &OpenGlHints) -> Vec<(GlAttr, i32)> {
    let mut attributes = vec![
        (GlAttr::ContextMajorVersion, i32::from(hints.version.major)),
        (GlAttr::ContextMinorVersion, i32::from(hints.version.minor)),
        (GlAttr::DoubleBuffer, i32::from(hints.double_buffer)),
        (GlAttr::RedSize, i32::from(hints.color_bits.red)),
        (GlAttr::GreenSize, i32::from(hints.color_bits.green)),
        (GlAttr::BlueSize, i32::from(hints.color_bits.blue)),
        (GlAttr::AlphaSize, i32::from(hints.color_bits.alpha)),
        (GlAttr::DepthSize, i32::from(hints.depth_bits.bits())),
        (GlAttr::StencilSize, i32::from(hints.stencil_bits.bits())),
        (GlAttr::MultisampleBuffers, i32::from(hints.multisamples > 0)),
        (GlAttr::MultisampleSamples, i32::from(hints.multisamples)),
        (GlAttr::FramebufferSrgbCapable, i32::from(hints.srgb_framebuffer)),
    ];

    match hints.profile {
        OpenGlProfile::None => {}
        OpenGlProfile::Core => attributes.push((GlAttr::ContextProfileMask, GL_CONTEXT_PROFILE_CORE)),
        OpenGlProfile::Compatibility => {
            attributes.push((GlAttr::ContextProfileMask, GL_CONTEXT_PROFILE_COMPATIBILITY))
        }
    }

    let mut flags = 0;
    if hints.debug {
        flags |= GL_CONTEXT_DEBUG_FLAG;
    }
    if hints.forward_compatible {
        flags |= GL_CONTEXT_FORWARD_COMPATIBLE_FLAG;
    }
    attributes.push((GlAttr::ContextFlags, flags));

    attributes
}

fn native_cursor(shape: SystemCursor) -> SdlSystemCursor {
    match shape {
        SystemCursor::Arrow => SdlSystemCursor::Arrow,
        SystemCursor::TextBeam => SdlSystemCursor::IBeam,
        SystemCursor::Wait => SdlSystemCursor::Wait,
        SystemCursor::Crosshair => SdlSystemCursor::Crosshair,
        SystemCursor::Progress => SdlSystemCursor::WaitArrow,
        SystemCursor::ResizeNwse => SdlSystemCursor::SizeNwse,
        SystemCursor::ResizeNesw => SdlSystemCursor::SizeNesw,
        SystemCursor::ResizeEw => SdlSystemCursor::SizeWe,
        SystemCursor::ResizeNs => SdlSystemCursor::SizeNs,
        SystemCursor::ResizeAll => SdlSystemCursor::SizeAll,
        SystemCursor::NotAllowed => SdlSystemCursor::No,
        SystemCursor::Hand => SdlSystemCursor::Hand,
    }
}

fn backend(message: String) -> PalError {
    PalError::backend(COMPONENT, message)
}

//=== SdlWindowComponent ==================================================

/// SDL2 window backend.
pub struct SdlWindowComponent<D: SdlVideo> {
    id: ComponentId,
    pub(super) video: Rc<RefCell<D>>,
    windows: HandleTable<WindowKind, SdlWindow>,
    icons: HandleTable<IconKind, SdlIcon>,
    next_icon: u64,
    cursors: HandleTable<CursorKind, SdlCursorId>,
    pub(super) drops: DropAccumulator,
    capabilities: WindowCapabilities,
}

impl<D: SdlVideo> SdlWindowComponent<D> {
    //--- Construction -----------------------------------------------------

    /// Initialises the SDL video subsystem.
    ///
    /// # Errors
    ///
    /// `PalError::Backend` if SDL refuses to initialise.
    pub fn new(video: Rc<RefCell<D>>) -> PalResult<Self> {
        video
            .borrow_mut()
            .init()
            .map_err(|e| backend(format!("SDL error: {}", e)))?;

        let id = ComponentId::allocate();
        info!(
            target: "pal::sdl",
            "{} {} initialised (driver: {})",
            COMPONENT,
            id,
            video.borrow().driver_name()
        );

        let supported_events = EventTypeFlags::all()
            - EventTypeFlags::DISPLAY_CONNECTION
            - EventTypeFlags::PRIMARY_DISPLAY_CHANGE;

        Ok(Self {
            id,
            video,
            windows: HandleTable::new(id),
            icons: HandleTable::new(id),
            next_icon: 1,
            cursors: HandleTable::new(id),
            drops: DropAccumulator::new(),
            capabilities: WindowCapabilities {
                can_set_icon: true,
                can_get_display: true,
                can_set_cursor: true,
                can_capture_cursor: true,
                can_hit_test: true,
                supported_events,
                supported_styles: SUPPORTED_STYLES,
                supported_modes: SUPPORTED_MODES,
            },
        })
    }

    //--- Internal Helpers -------------------------------------------------

    /// Handle of a live window with native id `id`, if any.
    pub(super) fn live_window(&self, id: SdlWindowId) -> Option<WindowHandle> {
        let raw = u64::from(id);
        match self.windows.get_raw(raw) {
            Some(record) if !record.destroyed => self.windows.handle_for(raw),
            _ => {
                debug!(target: "pal::sdl", "Event for unknown or destroyed window {}", id);
                None
            }
        }
    }

    fn window(&self, handle: WindowHandle) -> PalResult<&SdlWindow> {
        let record = self.windows.resolve(&handle)?;
        if record.destroyed {
            return Err(PalError::InvalidHandle(format!("{:?} was destroyed", handle)));
        }
        Ok(record)
    }

    fn window_mut(&mut self, handle: WindowHandle) -> PalResult<&mut SdlWindow> {
        let record = self.windows.resolve_mut(&handle)?;
        if record.destroyed {
            return Err(PalError::InvalidHandle(format!("{:?} was destroyed", handle)));
        }
        Ok(record)
    }

    fn native(&self, handle: WindowHandle) -> PalResult<SdlWindowId> {
        Ok(self.window(handle)?.id)
    }

    /// Decoration sizes; platforms without the query report none.
    pub(super) fn borders(&self, id: SdlWindowId) -> SdlBorders {
        self.video.borrow().window_borders_size(id).unwrap_or_else(|e| {
            debug!(target: "pal::sdl", "No border size for window {}: {}", id, e);
            SdlBorders::default()
        })
    }

    /// Pulls the next native event, running hit-test hooks on the way.
    fn next_native_event(&mut self, block: bool) -> PalResult<(Option<SdlEvent>, Option<PalError>)> {
        let video = self.video.borrow();
        let mut bridge = HitTestBridge::new(&self.windows);

        let event = if block {
            Some(video.wait_event(&mut bridge).map_err(backend)?)
        } else {
            video.poll_event(&mut bridge)
        };

        Ok((event, bridge.take_fault()))
    }

    /// Test helper: the native id behind `handle`.
    #[cfg(test)]
    pub(crate) fn native_id(&self, handle: WindowHandle) -> SdlWindowId {
        self.windows.resolve(&handle).map(|w| w.id).unwrap_or(0)
    }
}

//=========================================================================
// WindowComponent
//=========================================================================

impl<D: SdlVideo> WindowComponent for SdlWindowComponent<D> {
    //--- Identity ---------------------------------------------------------

    fn component_name(&self) -> &'static str {
        COMPONENT
    }

    fn id(&self) -> ComponentId {
        self.id
    }

    fn capabilities(&self) -> &WindowCapabilities {
        &self.capabilities
    }

    //--- Event Pump -------------------------------------------------------

    fn process_events(&mut self, queue: &mut EventQueue, wait: bool) -> PalResult<()> {
        let mut block = wait;

        loop {
            let (event, fault) = self.next_native_event(block)?;
            block = false;

            let Some(event) = event else {
                return fault.map_or(Ok(()), Err);
            };

            if let Some((window, canonical)) = self.translate(event)? {
                if let Err(e) = queue.raise(window, canonical) {
                    error!(target: "pal::sdl", "{}", e);
                }
            }

            if let Some(fault) = fault {
                return Err(fault);
            }
        }
    }

    //--- Lifecycle --------------------------------------------------------

    fn create(&mut self, hints: &GraphicsApiHints) -> PalResult<WindowHandle> {
        let mut flags = SdlWindowFlags::HIDDEN | SdlWindowFlags::RESIZABLE;

        match hints {
            GraphicsApiHints::None => {}
            GraphicsApiHints::Vulkan => {
                return Err(PalError::UnsupportedConfiguration(format!(
                    "{} cannot create {} windows",
                    COMPONENT,
                    hints.api_name()
                )))
            }
            GraphicsApiHints::OpenGl(gl) => {
                validate_gl_hints(gl)?;
                let mut video = self.video.borrow_mut();
                for (attr, value) in gl_attributes(gl) {
                    video.set_gl_attribute(attr, value).map_err(backend)?;
                }
                flags |= SdlWindowFlags::OPENGL;
            }
        }

        let id = self
            .video
            .borrow_mut()
            .create_window("", (WINDOWPOS_UNDEFINED, WINDOWPOS_UNDEFINED), DEFAULT_CLIENT_SIZE, flags)
            .map_err(backend)?;

        info!(target: "pal::sdl", "Created window {} ({})", id, hints.api_name());
        Ok(self.windows.insert(u64::from(id), SdlWindow::new(id)))
    }

    fn destroy(&mut self, window: WindowHandle) -> PalResult<()> {
        let record = self.window_mut(window)?;
        record.destroyed = true;
        record.hit_test = None;
        record.icon = None;
        let id = record.id;

        self.video.borrow_mut().destroy_window(id);
        info!(target: "pal::sdl", "Destroyed window {}", id);
        Ok(())
    }

    fn is_window_destroyed(&self, window: WindowHandle) -> PalResult<bool> {
        Ok(self.windows.resolve(&window)?.destroyed)
    }

    //--- Title & Icon -----------------------------------------------------

    fn title(&self, window: WindowHandle) -> PalResult<String> {
        let id = self.native(window)?;
        Ok(self.video.borrow().window_title(id))
    }

    fn set_title(&mut self, window: WindowHandle, title: &str) -> PalResult<()> {
        let id = self.native(window)?;
        self.video.borrow_mut().set_window_title(id, title);
        Ok(())
    }

    fn create_icon(&mut self, width: u32, height: u32, rgba: &[u8]) -> PalResult<IconHandle> {
        let expected = u64::from(width) * u64::from(height) * 4;
        if width == 0 || height == 0 || rgba.len() as u64 != expected {
            return Err(PalError::InvalidArgument(format!(
                "{}x{} icon needs {} bytes of RGBA, got {}",
                width,
                height,
                expected,
                rgba.len()
            )));
        }

        let raw = self.next_icon;
        self.next_icon += 1;
        Ok(self.icons.insert(
            raw,
            SdlIcon {
                width,
                height,
                rgba: rgba.to_vec(),
            },
        ))
    }

    fn destroy_icon(&mut self, icon: IconHandle) -> PalResult<()> {
        self.icons.remove(&icon)?;
        for record in self.windows.values_mut() {
            if record.icon == Some(icon) {
                record.icon = None;
            }
        }
        Ok(())
    }

    fn icon(&self, window: WindowHandle) -> PalResult<Option<IconHandle>> {
        let icon = self.window(window)?.icon;
        if icon.is_none() {
            warn!(target: "pal::sdl", "{:?} has no icon set", window);
        }
        Ok(icon)
    }

    fn set_icon(&mut self, window: WindowHandle, icon: IconHandle) -> PalResult<()> {
        let id = self.native(window)?;
        let image = self.icons.resolve(&icon)?;
        self.video
            .borrow_mut()
            .set_window_icon(id, image.width, image.height, &image.rgba)
            .map_err(backend)?;

        self.window_mut(window)?.icon = Some(icon);
        Ok(())
    }

    //--- Cursor -----------------------------------------------------------

    fn create_cursor(&mut self, shape: SystemCursor) -> PalResult<CursorHandle> {
        let native = self
            .video
            .borrow_mut()
            .create_system_cursor(native_cursor(shape))
            .map_err(backend)?;
        Ok(self.cursors.insert(native, native))
    }

    fn destroy_cursor(&mut self, cursor: CursorHandle) -> PalResult<()> {
        let native = self.cursors.remove(&cursor)?;
        self.video.borrow_mut().free_cursor(native);
        Ok(())
    }

    fn set_cursor(&mut self, window: WindowHandle, cursor: Option<CursorHandle>) -> PalResult<()> {
        self.window(window)?;
        let native = cursor.map(|c| self.cursors.resolve(&c).copied()).transpose()?;

        let mut video = self.video.borrow_mut();
        match native {
            Some(native) => {
                video.set_cursor(native);
                video.show_cursor(true);
            }
            None => video.show_cursor(false),
        }
        Ok(())
    }

    fn cursor_capture_mode(&self, window: WindowHandle) -> PalResult<CursorCaptureMode> {
        Ok(self.window(window)?.capture)
    }

    fn set_cursor_capture_mode(&mut self, window: WindowHandle, mode: CursorCaptureMode) -> PalResult<()> {
        let id = self.native(window)?;
        {
            let mut video = self.video.borrow_mut();
            let (grab, relative) = match mode {
                CursorCaptureMode::Normal => (false, false),
                CursorCaptureMode::Confined => (true, false),
                CursorCaptureMode::Locked => (true, true),
            };
            video.set_relative_mouse_mode(relative).map_err(backend)?;
            video.set_window_grab(id, grab);
        }
        self.window_mut(window)?.capture = mode;
        Ok(())
    }

    //--- Geometry ---------------------------------------------------------

    fn position(&self, window: WindowHandle) -> PalResult<Vec2i> {
        let id = self.native(window)?;
        let borders = self.borders(id);
        let client = Vec2i::from(self.video.borrow().window_position(id));
        Ok(client - Vec2i::new(borders.left, borders.top))
    }

    fn set_position(&mut self, window: WindowHandle, position: Vec2i) -> PalResult<()> {
        let id = self.native(window)?;
        let borders = self.borders(id);
        let client = position + Vec2i::new(borders.left, borders.top);
        self.video.borrow_mut().set_window_position(id, client.x, client.y);
        Ok(())
    }

    fn client_position(&self, window: WindowHandle) -> PalResult<Vec2i> {
        let id = self.native(window)?;
        Ok(Vec2i::from(self.video.borrow().window_position(id)))
    }

    fn set_client_position(&mut self, window: WindowHandle, position: Vec2i) -> PalResult<()> {
        let id = self.native(window)?;
        self.video.borrow_mut().set_window_position(id, position.x, position.y);
        Ok(())
    }

    fn size(&self, window: WindowHandle) -> PalResult<Vec2i> {
        let id = self.native(window)?;
        let borders = self.borders(id);
        let client = Vec2i::from(self.video.borrow().window_size(id));
        Ok(client + Vec2i::new(borders.left + borders.right, borders.top + borders.bottom))
    }

    fn set_size(&mut self, window: WindowHandle, size: Vec2i) -> PalResult<()> {
        let id = self.native(window)?;
        let borders = self.borders(id);
        let client = size - Vec2i::new(borders.left + borders.right, borders.top + borders.bottom);
        if client.x <= 0 || client.y <= 0 {
            return Err(PalError::InvalidArgument(format!(
                "outer size {:?} leaves no client area",
                size
            )));
        }
        self.video.borrow_mut().set_window_size(id, client.x, client.y);
        Ok(())
    }

    fn client_size(&self, window: WindowHandle) -> PalResult<Vec2i> {
        let id = self.native(window)?;
        Ok(Vec2i::from(self.video.borrow().window_size(id)))
    }

    fn set_client_size(&mut self, window: WindowHandle, size: Vec2i) -> PalResult<()> {
        let id = self.native(window)?;
        if size.x <= 0 || size.y <= 0 {
            return Err(PalError::InvalidArgument(format!("client size {:?} is empty", size)));
        }
        self.video.borrow_mut().set_window_size(id, size.x, size.y);
        Ok(())
    }

    fn min_client_size(&self, window: WindowHandle) -> PalResult<SizeLimits> {
        let id = self.native(window)?;
        let (w, h) = self.video.borrow().window_minimum_size(id);
        Ok(SizeLimits {
            width: (w > 0).then_some(w),
            height: (h > 0).then_some(h),
        })
    }

    fn set_min_client_size(&mut self, window: WindowHandle, limits: SizeLimits) -> PalResult<()> {
        limits.validate()?;
        let id = self.native(window)?;
        self.video.borrow_mut().set_window_minimum_size(
            id,
            limits.width.unwrap_or(0),
            limits.height.unwrap_or(0),
        );
        Ok(())
    }

    fn max_client_size(&self, window: WindowHandle) -> PalResult<SizeLimits> {
        let id = self.native(window)?;
        let (w, h) = self.video.borrow().window_maximum_size(id);
        Ok(SizeLimits {
            width: (w > 0).then_some(w),
            height: (h > 0).then_some(h),
        })
    }

    fn set_max_client_size(&mut self, window: WindowHandle, limits: SizeLimits) -> PalResult<()> {
        limits.validate()?;
        let id = self.native(window)?;
        self.video.borrow_mut().set_window_maximum_size(
            id,
            limits.width.unwrap_or(0),
            limits.height.unwrap_or(0),
        );
        Ok(())
    }

    fn screen_to_client(&self, window: WindowHandle, point: Vec2i) -> PalResult<Vec2i> {
        Ok(point - self.client_position(window)?)
    }

    fn client_to_screen(&self, window: WindowHandle, point: Vec2i) -> PalResult<Vec2i> {
        Ok(point + self.client_position(window)?)
    }

    //--- Mode & Style -----------------------------------------------------

    fn mode(&self, window: WindowHandle) -> PalResult<WindowMode> {
        let id = self.native(window)?;
        let flags = self.video.borrow().window_flags(id);

        Ok(if flags.contains(SdlWindowFlags::HIDDEN) {
            WindowMode::Hidden
        } else if flags.contains(SdlWindowFlags::MINIMIZED) {
            WindowMode::Minimized
        } else if flags.contains(SdlWindowFlags::FULLSCREEN_DESKTOP) {
            WindowMode::WindowedFullscreen
        } else if flags.contains(SdlWindowFlags::FULLSCREEN) {
            WindowMode::ExclusiveFullscreen
        } else if flags.contains(SdlWindowFlags::MAXIMIZED) {
            WindowMode::Maximized
        } else {
            WindowMode::Normal
        })
    }

    fn set_mode(&mut self, window: WindowHandle, mode: WindowMode) -> PalResult<()> {
        self.capabilities.require_mode(mode)?;
        let id = self.native(window)?;
        let mut video = self.video.borrow_mut();

        match mode {
            WindowMode::Hidden => video.hide_window(id),
            WindowMode::Minimized => {
                video.show_window(id);
                video.minimize_window(id);
            }
            WindowMode::Normal => {
                video.show_window(id);
                video.set_window_fullscreen(id, SdlFullscreen::Windowed).map_err(backend)?;
                video.restore_window(id);
            }
            WindowMode::Maximized => {
                video.show_window(id);
                video.set_window_fullscreen(id, SdlFullscreen::Windowed).map_err(backend)?;
                video.maximize_window(id);
            }
            WindowMode::WindowedFullscreen => {
                video.show_window(id);
                video.set_window_fullscreen(id, SdlFullscreen::Desktop).map_err(backend)?;
            }
            WindowMode::ExclusiveFullscreen => {
                video.show_window(id);
                video.set_window_fullscreen(id, SdlFullscreen::Exclusive).map_err(backend)?;
            }
        }
        Ok(())
    }

    fn border_style(&self, window: WindowHandle) -> PalResult<WindowStyle> {
        let id = self.native(window)?;
        let flags = self.video.borrow().window_flags(id);

        Ok(if flags.contains(SdlWindowFlags::BORDERLESS) {
            WindowStyle::Borderless
        } else if flags.contains(SdlWindowFlags::RESIZABLE) {
            WindowStyle::ResizableBorder
        } else {
            WindowStyle::FixedBorder
        })
    }

    fn set_border_style(&mut self, window: WindowHandle, style: WindowStyle) -> PalResult<()> {
        self.capabilities.require_style(style)?;
        let id = self.native(window)?;
        let mut video = self.video.borrow_mut();

        match style {
            WindowStyle::Borderless => video.set_window_bordered(id, false),
            WindowStyle::FixedBorder => {
                video.set_window_bordered(id, true);
                video.set_window_resizable(id, false);
            }
            WindowStyle::ResizableBorder => {
                video.set_window_bordered(id, true);
                video.set_window_resizable(id, true);
            }
            // Filtered by `require_style`.
            WindowStyle::ToolBox => return Err(PalError::UnsupportedOperation("window style")),
        }
        Ok(())
    }

    fn is_always_on_top(&self, window: WindowHandle) -> PalResult<bool> {
        let id = self.native(window)?;
        Ok(self.video.borrow().window_flags(id).contains(SdlWindowFlags::ALWAYS_ON_TOP))
    }

    fn set_always_on_top(&mut self, window: WindowHandle, on_top: bool) -> PalResult<()> {
        let id = self.native(window)?;
        self.video.borrow_mut().set_window_always_on_top(id, on_top);
        Ok(())
    }

    //--- Interaction ------------------------------------------------------

    fn set_hit_test_callback(&mut self, window: WindowHandle, callback: Option<HitTestCallback>) -> PalResult<()> {
        let enabled = callback.is_some();
        let record = self.window_mut(window)?;
        record.hit_test = callback;
        let id = record.id;

        self.video
            .borrow_mut()
            .set_window_hit_test(id, enabled)
            .map_err(backend)
    }

    fn focus_window(&mut self, window: WindowHandle) -> PalResult<()> {
        let id = self.native(window)?;
        self.video.borrow_mut().raise_window(id);
        Ok(())
    }

    fn request_attention(&mut self, window: WindowHandle) -> PalResult<()> {
        let id = self.native(window)?;
        self.video.borrow_mut().flash_window(id).map_err(backend)
    }
}

//=========================================================================
// Tests
//=========================================================================
