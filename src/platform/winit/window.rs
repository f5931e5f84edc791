//=========================================================================
// Winit Window Component
//=========================================================================
//
// `WindowComponent` over a winit 0.30 event loop driven by
// `pump_app_events`.
//
// Architecture:
// ```text
//  Host ──process_events(queue, wait)──▶ WinitWindowComponent
//                                          │ event_loop.pump_app_events(timeout, &mut state)
//                                          │   ├─ window_event → WinitState::translate
//                                          │   │                  └─ batch.push((window, event))
//                                          │   └─ about_to_wait → flush pending file drop
//                                          │ for (window, event) in batch: queue.raise
//                                          └─ Err(first translation error), if any
// ```
//
// Key Design Decisions:
// - **Batch delivery**: winit hands over everything pending in one pump,
//   so the whole batch is translated before listeners run. A failed
//   translation is remembered and returned after the batch.
// - **Sticky modifiers**: `ModifiersChanged` updates a cached state that
//   is stamped onto later key events.
// - **Drop boundary**: winit reports one `DroppedFile` per path and no
//   completion, so `about_to_wait` closes the drop.
// - **Drop position**: winit has no global pointer query, and an OS drag
//   often delivers no `CursorMoved`. The drop is then placed at the
//   target's client origin.
// - **Main thread**: winit requires the event loop on the main thread on
//   macOS; components are `!Send` anyway.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::time::Duration;

use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    error::ExternalError,
    event::{ElementState, Ime, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{
        CursorGrabMode, CursorIcon, Fullscreen, Icon, UserAttentionType, Window, WindowId, WindowLevel,
    },
};

//=== Internal Dependencies ===============================================

use super::event_mapper::{cursor_icon, dpi_change, map_mouse_button, map_physical_key, scroll_vectors};
use crate::core::error::{PalError, PalResult};
use crate::core::event_queue::{EventQueue, PlatformEvent};
use crate::core::geometry::{Vec2, Vec2i};
use crate::core::handle::{
    ComponentId, CursorHandle, CursorKind, HandleTable, IconHandle, IconKind, WindowHandle, WindowKind,
};
use crate::core::hints::GraphicsApiHints;
use crate::core::input::Modifiers;
use crate::core::window::{
    CursorCaptureMode, EventTypeFlags, HitTestCallback, SizeLimits, SystemCursor, WindowCapabilities,
    WindowComponent, WindowMode, WindowStyle,
};
use crate::platform::drop::DropAccumulator;

//=== Constants ===========================================================

pub(super) const COMPONENT: &str = "WinitWindowComponent";

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

/// Largest size winit accepts for an unconstrained axis.
const UNBOUNDED: u32 = i32::MAX as u32;

type Batch = Vec<(Option<WindowHandle>, PlatformEvent)>;

//=== Records =============================================================

/// Per-window record. `window` is `None` once destroyed.
pub(super) struct WinitWindow {
    window: Option<Window>,
    icon: Option<IconHandle>,
    capture: CursorCaptureMode,
    always_on_top: bool,
    min_size: SizeLimits,
    max_size: SizeLimits,
}

impl WinitWindow {
    fn new(window: Window) -> Self {
        Self {
            window: Some(window),
            icon: None,
            capture: CursorCaptureMode::Normal,
            always_on_top: false,
            min_size: SizeLimits::NONE,
            max_size: SizeLimits::NONE,
        }
    }

    fn client_origin(&self) -> Vec2i {
        self.window
            .as_ref()
            .and_then(|w| w.inner_position().ok())
            .map(|p| Vec2i::new(p.x, p.y))
            .unwrap_or(Vec2i::ZERO)
    }
}

struct WinitIcon {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

//=== Error Mapping =======================================================

fn backend(message: impl Into<String>) -> PalError {
    PalError::backend(COMPONENT, message)
}

fn external(error: ExternalError, operation: &'static str) -> PalError {
    match error {
        ExternalError::NotSupported(_) => PalError::UnsupportedOperation(operation),
        other => backend(format!("{}: {}", operation, other)),
    }
}

fn size_limit(limits: SizeLimits, unconstrained: u32) -> Option<PhysicalSize<u32>> {
    if limits.is_unconstrained() {
        return None;
    }
    let axis = |value: Option<i32>| value.map_or(unconstrained, |v| v as u32);
    Some(PhysicalSize::new(axis(limits.width), axis(limits.height)))
}

//=========================================================================
// WinitState
//=========================================================================

/// Everything the `ApplicationHandler` touches during a pump.
pub(super) struct WinitState {
    windows: HandleTable<WindowKind, WinitWindow>,
    batch: Batch,
    first_error: Option<PalError>,
    drops: DropAccumulator,
    drop_target: Option<WindowHandle>,
    modifiers: Modifiers,
    cursor: Option<(WindowHandle, Vec2)>,
}

impl WinitState {
    pub(super) fn new(owner: ComponentId) -> Self {
        Self {
            windows: HandleTable::new(owner),
            batch: Vec::new(),
            first_error: None,
            drops: DropAccumulator::new(),
            drop_target: None,
            modifiers: Modifiers::NONE,
            cursor: None,
        }
    }

    fn live_window(&self, id: WindowId) -> Option<WindowHandle> {
        let raw = u64::from(id);
        match self.windows.get_raw(raw) {
            Some(record) if record.window.is_some() => self.windows.handle_for(raw),
            _ => {
                debug!(target: "pal::winit", "Event for unknown or destroyed window {:?}", id);
                None
            }
        }
    }

    fn emit(&mut self, window: Option<WindowHandle>, event: PlatformEvent) {
        self.batch.push((window, event));
    }

    fn fail(&mut self, error: PalError) {
        warn!(target: "pal::winit", "Translation failed: {}", error);
        self.first_error.get_or_insert(error);
    }

    /// Translates one native window event into zero or more canonical events.
    pub(super) fn translate(&mut self, window: WindowHandle, event: WindowEvent) {
        match event {
            //--- Window state ---
            WindowEvent::Focused(gained) => self.emit(Some(window), PlatformEvent::Focus { gained }),
            WindowEvent::CloseRequested => self.emit(Some(window), PlatformEvent::Close),
            WindowEvent::Resized(size) => {
                let new_size = Vec2i::new(
                    i32::try_from(size.width).unwrap_or(i32::MAX),
                    i32::try_from(size.height).unwrap_or(i32::MAX),
                );
                self.emit(Some(window), PlatformEvent::WindowResize { new_size });
            }
            WindowEvent::Moved(position) => {
                let window_position = Vec2i::new(position.x, position.y);
                let client_position = self
                    .windows
                    .resolve(&window)
                    .ok()
                    .and_then(|record| record.window.as_ref())
                    .and_then(|w| w.inner_position().ok())
                    .map_or(window_position, |p| Vec2i::new(p.x, p.y));
                self.emit(
                    Some(window),
                    PlatformEvent::WindowMove {
                        window_position,
                        client_position,
                    },
                );
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => self.emit(Some(window), dpi_change(scale_factor)),

            //--- Keyboard ---
            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "pal::winit", "Modifiers changed: {:?}", state);
                self.modifiers = Modifiers::from(state.state());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let key = map_physical_key(event.physical_key);
                let modifiers = self.modifiers;
                // winit has no portable scancode; the PAL reports 0.
                let scancode = 0;
                match event.state {
                    ElementState::Pressed => {
                        self.emit(
                            Some(window),
                            PlatformEvent::KeyDown {
                                key,
                                scancode,
                                modifiers,
                                repeat: event.repeat,
                            },
                        );
                        if let Some(text) = event.text {
                            self.emit(Some(window), PlatformEvent::TextInput { text: text.to_string() });
                        }
                    }
                    ElementState::Released => {
                        self.emit(Some(window), PlatformEvent::KeyUp { key, scancode, modifiers });
                    }
                }
            }
            WindowEvent::Ime(Ime::Commit(text)) => self.emit(Some(window), PlatformEvent::TextInput { text }),

            //--- Mouse ---
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = Some((window, position));
                self.emit(Some(window), PlatformEvent::MouseMove { position });
            }
            WindowEvent::CursorEntered { .. } => self.emit(Some(window), PlatformEvent::MouseEnter { entered: true }),
            WindowEvent::CursorLeft { .. } => self.emit(Some(window), PlatformEvent::MouseEnter { entered: false }),
            WindowEvent::MouseInput { state, button, .. } => match map_mouse_button(button) {
                Ok(button) => {
                    let event = match state {
                        ElementState::Pressed => PlatformEvent::MouseDown { button },
                        ElementState::Released => PlatformEvent::MouseUp { button },
                    };
                    self.emit(Some(window), event);
                }
                Err(e) => self.fail(e),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let (delta, distance) = scroll_vectors(delta);
                self.emit(Some(window), PlatformEvent::Scroll { delta, distance });
            }

            //--- Drag and drop ---
            WindowEvent::HoveredFile(path) => trace!(target: "pal::winit", "Hovering {}", path.display()),
            WindowEvent::HoveredFileCancelled => self.drops.cancel(),
            WindowEvent::DroppedFile(path) => self.push_drop(window, path),

            other => trace!(target: "pal::winit", "Ignoring {:?}", other),
        }
    }

    fn push_drop(&mut self, window: WindowHandle, path: PathBuf) {
        self.drops.push(path);
        self.drop_target = Some(window);
    }

    /// Closes an open drop into one `FileDrop` at the global pointer position.
    ///
    /// Without a cursor position for the target window the drop lands on
    /// its client origin.
    pub(super) fn flush_drop(&mut self) {
        if !self.drops.is_open() {
            return;
        }

        let file_paths = self.drops.complete();
        let target = self.drop_target.take();
        let origin = target
            .and_then(|w| self.windows.resolve(&w).ok())
            .map_or(Vec2i::ZERO, WinitWindow::client_origin);
        let local = match (self.cursor, target) {
            (Some((cursor_window, at)), Some(w)) if cursor_window == w => Vec2i::new(at.x as i32, at.y as i32),
            _ => Vec2i::ZERO,
        };

        self.emit(
            target,
            PlatformEvent::FileDrop {
                file_paths,
                position: origin + local,
                dropped_in_window: target.is_some(),
            },
        );
    }

    pub(super) fn take_batch(&mut self) -> (Batch, Option<PalError>) {
        (std::mem::take(&mut self.batch), self.first_error.take())
    }
}

impl ApplicationHandler for WinitState {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        trace!(target: "pal::winit", "Event loop resumed");
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if let Some(window) = self.live_window(window_id) {
            self.translate(window, event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.flush_drop();
    }
}

//=========================================================================
// WinitWindowComponent
//=========================================================================

/// winit window backend.
pub struct WinitWindowComponent {
    id: ComponentId,
    event_loop: EventLoop<()>,
    state: WinitState,
    icons: HandleTable<IconKind, WinitIcon>,
    next_icon: u64,
    cursors: HandleTable<CursorKind, CursorIcon>,
    next_cursor: u64,
    capabilities: WindowCapabilities,
}

impl WinitWindowComponent {
    //--- Construction -----------------------------------------------------

    /// Creates the winit event loop.
    ///
    /// # Errors
    ///
    /// `PalError::Backend` if the event loop cannot be created (no display
    /// server, or a loop already exists in this process).
    pub fn new() -> PalResult<Self> {
        let event_loop = EventLoop::new().map_err(|e| backend(format!("Event loop creation failed: {}", e)))?;
        let id = ComponentId::allocate();
        info!(target: "pal::winit", "{} {} initialised", COMPONENT, id);

        let supported_events = EventTypeFlags::all()
            - EventTypeFlags::WINDOW_MODE_CHANGE
            - EventTypeFlags::CLIPBOARD_UPDATE
            - EventTypeFlags::DISPLAY_CONNECTION
            - EventTypeFlags::PRIMARY_DISPLAY_CHANGE
            - EventTypeFlags::DISPLAY_CHANGE;

        Ok(Self {
            id,
            event_loop,
            state: WinitState::new(id),
            icons: HandleTable::new(id),
            next_icon: 1,
            cursors: HandleTable::new(id),
            next_cursor: 1,
            capabilities: WindowCapabilities {
                can_set_icon: true,
                can_get_display: true,
                can_set_cursor: true,
                can_capture_cursor: true,
                can_hit_test: false,
                supported_events,
                supported_styles: SUPPORTED_STYLES,
                supported_modes: SUPPORTED_MODES,
            },
        })
    }

    //--- Internal Helpers -------------------------------------------------

    fn record(&self, handle: WindowHandle) -> PalResult<&WinitWindow> {
        self.state.windows.resolve(&handle)
    }

    fn record_mut(&mut self, handle: WindowHandle) -> PalResult<&mut WinitWindow> {
        self.state.windows.resolve_mut(&handle)
    }

    fn window(&self, handle: WindowHandle) -> PalResult<&Window> {
        self.record(handle)?
            .window
            .as_ref()
            .ok_or_else(|| PalError::InvalidHandle(format!("{:?} was destroyed", handle)))
    }
}

impl WindowComponent for WinitWindowComponent {
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
        let timeout = if wait { None } else { Some(Duration::ZERO) };

        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(timeout, &mut self.state) {
            info!(target: "pal::winit", "Event loop exited with code {}", code);
        }

        let (batch, first_error) = self.state.take_batch();
        trace!(target: "pal::winit", "Delivering {} event(s)", batch.len());

        for (window, event) in batch {
            if let Err(e) = queue.raise(window, event) {
                error!(target: "pal::winit", "{}", e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    //--- Lifecycle --------------------------------------------------------

    fn create(&mut self, hints: &GraphicsApiHints) -> PalResult<WindowHandle> {
        if let GraphicsApiHints::OpenGl(_) = hints {
            return Err(PalError::UnsupportedConfiguration(format!(
                "{} creates no {} context",
                COMPONENT,
                hints.api_name()
            )));
        }

        let attributes = Window::default_attributes()
            .with_title("")
            .with_visible(false)
            .with_inner_size(LogicalSize::new(800.0, 600.0));

        #[allow(deprecated)]
        let window = self
            .event_loop
            .create_window(attributes)
            .map_err(|e| backend(format!("Window creation failed: {}", e)))?;

        let raw = u64::from(window.id());
        info!(target: "pal::winit", "Created window {} ({})", raw, hints.api_name());
        Ok(self.state.windows.insert(raw, WinitWindow::new(window)))
    }

    fn destroy(&mut self, window: WindowHandle) -> PalResult<()> {
        let record = self.record_mut(window)?;
        match record.window.take() {
            Some(native) => {
                info!(target: "pal::winit", "Destroyed window {:?}", native.id());
                record.icon = None;
                Ok(())
            }
            None => Err(PalError::InvalidHandle(format!("{:?} was already destroyed", window))),
        }
    }

    fn is_window_destroyed(&self, window: WindowHandle) -> PalResult<bool> {
        Ok(self.record(window)?.window.is_none())
    }

    //--- Title & Icon -----------------------------------------------------

    fn title(&self, window: WindowHandle) -> PalResult<String> {
        Ok(self.window(window)?.title())
    }

    fn set_title(&mut self, window: WindowHandle, title: &str) -> PalResult<()> {
        self.window(window)?.set_title(title);
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
            WinitIcon {
                width,
                height,
                rgba: rgba.to_vec(),
            },
        ))
    }

    fn destroy_icon(&mut self, icon: IconHandle) -> PalResult<()> {
        self.icons.remove(&icon)?;
        for record in self.state.windows.values_mut() {
            if record.icon == Some(icon) {
                record.icon = None;
            }
        }
        Ok(())
    }

    fn icon(&self, window: WindowHandle) -> PalResult<Option<IconHandle>> {
        self.window(window)?;
        let icon = self.record(window)?.icon;
        if icon.is_none() {
            warn!(target: "pal::winit", "{:?} has no icon set", window);
        }
        Ok(icon)
    }

    fn set_icon(&mut self, window: WindowHandle, icon: IconHandle) -> PalResult<()> {
        let image = self.icons.resolve(&icon)?;
        let native = Icon::from_rgba(image.rgba.clone(), image.width, image.height)
            .map_err(|e| PalError::InvalidArgument(e.to_string()))?;

        self.window(window)?.set_window_icon(Some(native));
        self.record_mut(window)?.icon = Some(icon);
        Ok(())
    }

    //--- Cursor -----------------------------------------------------------

    fn create_cursor(&mut self, shape: SystemCursor) -> PalResult<CursorHandle> {
        let raw = self.next_cursor;
        self.next_cursor += 1;
        Ok(self.cursors.insert(raw, cursor_icon(shape)))
    }

    fn destroy_cursor(&mut self, cursor: CursorHandle) -> PalResult<()> {
        self.cursors.remove(&cursor).map(|_| ())
    }

    fn set_cursor(&mut self, window: WindowHandle, cursor: Option<CursorHandle>) -> PalResult<()> {
        let native = self.window(window)?;
        match cursor {
            Some(cursor) => {
                native.set_cursor(*self.cursors.resolve(&cursor)?);
                native.set_cursor_visible(true);
            }
            None => native.set_cursor_visible(false),
        }
        Ok(())
    }

    fn cursor_capture_mode(&self, window: WindowHandle) -> PalResult<CursorCaptureMode> {
        self.window(window)?;
        Ok(self.record(window)?.capture)
    }

    fn set_cursor_capture_mode(&mut self, window: WindowHandle, mode: CursorCaptureMode) -> PalResult<()> {
        let grab = match mode {
            CursorCaptureMode::Normal => CursorGrabMode::None,
            CursorCaptureMode::Confined => CursorGrabMode::Confined,
            CursorCaptureMode::Locked => CursorGrabMode::Locked,
        };
        self.window(window)?
            .set_cursor_grab(grab)
            .map_err(|e| external(e, "cursor capture mode"))?;
        self.record_mut(window)?.capture = mode;
        Ok(())
    }

    //--- Geometry ---------------------------------------------------------

    fn position(&self, window: WindowHandle) -> PalResult<Vec2i> {
        let p = self
            .window(window)?
            .outer_position()
            .map_err(|_| PalError::UnsupportedOperation("window position"))?;
        Ok(Vec2i::new(p.x, p.y))
    }

    fn set_position(&mut self, window: WindowHandle, position: Vec2i) -> PalResult<()> {
        self.window(window)?
            .set_outer_position(PhysicalPosition::new(position.x, position.y));
        Ok(())
    }

    fn client_position(&self, window: WindowHandle) -> PalResult<Vec2i> {
        let p = self
            .window(window)?
            .inner_position()
            .map_err(|_| PalError::UnsupportedOperation("client position"))?;
        Ok(Vec2i::new(p.x, p.y))
    }

    fn set_client_position(&mut self, window: WindowHandle, position: Vec2i) -> PalResult<()> {
        let inset = self.client_position(window)? - self.position(window)?;
        self.set_position(window, position - inset)
    }

    fn size(&self, window: WindowHandle) -> PalResult<Vec2i> {
        let s = self.window(window)?.outer_size();
        Ok(Vec2i::new(
            i32::try_from(s.width).unwrap_or(i32::MAX),
            i32::try_from(s.height).unwrap_or(i32::MAX),
        ))
    }

    fn set_size(&mut self, window: WindowHandle, size: Vec2i) -> PalResult<()> {
        let decorations = self.size(window)? - self.client_size(window)?;
        self.set_client_size(window, size - decorations)
    }

    fn client_size(&self, window: WindowHandle) -> PalResult<Vec2i> {
        let s = self.window(window)?.inner_size();
        Ok(Vec2i::new(
            i32::try_from(s.width).unwrap_or(i32::MAX),
            i32::try_from(s.height).unwrap_or(i32::MAX),
        ))
    }

    fn set_client_size(&mut self, window: WindowHandle, size: Vec2i) -> PalResult<()> {
        if size.x <= 0 || size.y <= 0 {
            return Err(PalError::InvalidArgument(format!("client size {:?} is empty", size)));
        }
        // The request may be applied asynchronously; a `WindowResize` follows.
        let _ = self
            .window(window)?
            .request_inner_size(PhysicalSize::new(size.x as u32, size.y as u32));
        Ok(())
    }

    fn min_client_size(&self, window: WindowHandle) -> PalResult<SizeLimits> {
        self.window(window)?;
        Ok(self.record(window)?.min_size)
    }

    fn set_min_client_size(&mut self, window: WindowHandle, limits: SizeLimits) -> PalResult<()> {
        limits.validate()?;
        self.window(window)?.set_min_inner_size(size_limit(limits, 0));
        self.record_mut(window)?.min_size = limits;
        Ok(())
    }

    fn max_client_size(&self, window: WindowHandle) -> PalResult<SizeLimits> {
        self.window(window)?;
        Ok(self.record(window)?.max_size)
    }

    fn set_max_client_size(&mut self, window: WindowHandle, limits: SizeLimits) -> PalResult<()> {
        limits.validate()?;
        self.window(window)?.set_max_inner_size(size_limit(limits, UNBOUNDED));
        self.record_mut(window)?.max_size = limits;
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
        let native = self.window(window)?;

        Ok(if native.is_visible() == Some(false) {
            WindowMode::Hidden
        } else if native.is_minimized() == Some(true) {
            WindowMode::Minimized
        } else {
            match native.fullscreen() {
                Some(Fullscreen::Borderless(_)) => WindowMode::WindowedFullscreen,
                Some(Fullscreen::Exclusive(_)) => WindowMode::ExclusiveFullscreen,
                None if native.is_maximized() => WindowMode::Maximized,
                None => WindowMode::Normal,
            }
        })
    }

    fn set_mode(&mut self, window: WindowHandle, mode: WindowMode) -> PalResult<()> {
        self.capabilities.require_mode(mode)?;
        let native = self.window(window)?;

        match mode {
            WindowMode::Hidden => native.set_visible(false),
            WindowMode::Minimized => {
                native.set_visible(true);
                native.set_minimized(true);
            }
            WindowMode::Normal => {
                native.set_visible(true);
                native.set_fullscreen(None);
                native.set_minimized(false);
                native.set_maximized(false);
            }
            WindowMode::Maximized => {
                native.set_visible(true);
                native.set_fullscreen(None);
                native.set_maximized(true);
            }
            WindowMode::WindowedFullscreen => {
                native.set_visible(true);
                native.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
            WindowMode::ExclusiveFullscreen => {
                let video_mode = native
                    .current_monitor()
                    .and_then(|monitor| monitor.video_modes().next())
                    .ok_or_else(|| backend("no video mode available for exclusive fullscreen"))?;
                native.set_visible(true);
                native.set_fullscreen(Some(Fullscreen::Exclusive(video_mode)));
            }
        }
        Ok(())
    }

    fn border_style(&self, window: WindowHandle) -> PalResult<WindowStyle> {
        let native = self.window(window)?;

        Ok(if !native.is_decorated() {
            WindowStyle::Borderless
        } else if native.is_resizable() {
            WindowStyle::ResizableBorder
        } else {
            WindowStyle::FixedBorder
        })
    }

    fn set_border_style(&mut self, window: WindowHandle, style: WindowStyle) -> PalResult<()> {
        self.capabilities.require_style(style)?;
        let native = self.window(window)?;

        match style {
            WindowStyle::Borderless => native.set_decorations(false),
            WindowStyle::FixedBorder => {
                native.set_decorations(true);
                native.set_resizable(false);
            }
            WindowStyle::ResizableBorder => {
                native.set_decorations(true);
                native.set_resizable(true);
            }
            WindowStyle::ToolBox => return Err(PalError::UnsupportedOperation("window style")),
        }
        Ok(())
    }

    fn is_always_on_top(&self, window: WindowHandle) -> PalResult<bool> {
        self.window(window)?;
        Ok(self.record(window)?.always_on_top)
    }

    fn set_always_on_top(&mut self, window: WindowHandle, on_top: bool) -> PalResult<()> {
        let level = if on_top { WindowLevel::AlwaysOnTop } else { WindowLevel::Normal };
        self.window(window)?.set_window_level(level);
        self.record_mut(window)?.always_on_top = on_top;
        Ok(())
    }

    //--- Interaction ------------------------------------------------------

    fn set_hit_test_callback(&mut self, window: WindowHandle, _callback: Option<HitTestCallback>) -> PalResult<()> {
        self.window(window)?;
        WindowCapabilities::require(self.capabilities.can_hit_test, "set_hit_test_callback")
    }

    fn focus_window(&mut self, window: WindowHandle) -> PalResult<()> {
        self.window(window)?.focus_window();
        Ok(())
    }

    fn request_attention(&mut self, window: WindowHandle) -> PalResult<()> {
        self.window(window)?
            .request_user_attention(Some(UserAttentionType::Informational));
        Ok(())
    }
}

//=========================================================================
// Tests
//=========================================================================
//
// A winit event loop needs a display server and the main thread, so the
// tests drive `WinitState` directly with synthetic window events.
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseButton;
    use winit::event::{DeviceId, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase};

    fn state_with_window() -> (WinitState, WindowHandle) {
        let owner = ComponentId::allocate();
        (WinitState::new(owner), WindowHandle::new(owner, 1))
    }

    fn press(button: WinitMouseButton) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Pressed,
            button,
        }
    }

    fn events(state: &mut WinitState) -> Vec<PlatformEvent> {
        state.take_batch().0.into_iter().map(|(_, e)| e).collect()
    }

    #[test]
    fn window_events_translate_in_order() {
        let (mut state, window) = state_with_window();

        state.translate(window, WindowEvent::Focused(true));
        state.translate(window, WindowEvent::Resized(PhysicalSize::new(640, 480)));
        state.translate(window, WindowEvent::CursorEntered { device_id: DeviceId::dummy() });
        state.translate(window, WindowEvent::CloseRequested);
        state.translate(window, WindowEvent::Occluded(true));

        assert_eq!(
            events(&mut state),
            vec![
                PlatformEvent::Focus { gained: true },
                PlatformEvent::WindowResize { new_size: Vec2i::new(640, 480) },
                PlatformEvent::MouseEnter { entered: true },
                PlatformEvent::Close,
            ]
        );
    }

    #[test]
    fn unknown_button_is_reported_after_the_batch() {
        let (mut state, window) = state_with_window();

        state.translate(window, press(WinitMouseButton::Left));
        state.translate(window, press(WinitMouseButton::Other(9)));
        state.translate(window, press(WinitMouseButton::Back));

        let (batch, error) = state.take_batch();
        let delivered: Vec<_> = batch.into_iter().map(|(_, e)| e).collect();
        assert_eq!(
            delivered,
            vec![
                PlatformEvent::MouseDown { button: MouseButton::Primary },
                PlatformEvent::MouseDown { button: MouseButton::Button4 },
            ]
        );
        assert!(error.is_some_and(|e| e.is_fatal()));
        assert!(state.take_batch().1.is_none());
    }

    #[test]
    fn dropped_files_collapse_at_boundary() {
        let (mut state, window) = state_with_window();

        state.translate(
            window,
            WindowEvent::CursorMoved {
                device_id: DeviceId::dummy(),
                position: PhysicalPosition::new(12.0, 34.0),
            },
        );
        state.translate(window, WindowEvent::HoveredFile("a.txt".into()));
        state.translate(window, WindowEvent::DroppedFile("a.txt".into()));
        state.translate(window, WindowEvent::DroppedFile("b.txt".into()));
        state.flush_drop();
        state.flush_drop();

        let (batch, _) = state.take_batch();
        assert_eq!(batch.len(), 2, "one move, one drop");
        assert_eq!(
            batch[1],
            (
                Some(window),
                PlatformEvent::FileDrop {
                    file_paths: vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")],
                    position: Vec2i::new(12, 34),
                    dropped_in_window: true,
                }
            )
        );
    }

    #[test]
    fn drop_without_cursor_lands_on_client_origin() {
        let (mut state, window) = state_with_window();
        let other = WindowHandle::new(window.owner(), 2);

        state.translate(
            other,
            WindowEvent::CursorMoved {
                device_id: DeviceId::dummy(),
                position: PhysicalPosition::new(300.0, 200.0),
            },
        );
        state.translate(window, WindowEvent::DroppedFile("a.txt".into()));
        state.flush_drop();

        let (batch, _) = state.take_batch();
        assert!(matches!(
            batch.last(),
            Some((Some(w), PlatformEvent::FileDrop { position, .. })) if *w == window && *position == Vec2i::ZERO
        ));
    }

    #[test]
    fn oversized_resize_saturates() {
        let (mut state, window) = state_with_window();

        state.translate(window, WindowEvent::Resized(PhysicalSize::new(u32::MAX, 480)));

        assert_eq!(
            events(&mut state),
            vec![PlatformEvent::WindowResize { new_size: Vec2i::new(i32::MAX, 480) }]
        );
    }

    #[test]
    fn cancelled_hover_raises_nothing() {
        let (mut state, window) = state_with_window();

        state.translate(window, WindowEvent::HoveredFile("a.txt".into()));
        state.translate(window, WindowEvent::HoveredFileCancelled);
        state.flush_drop();

        assert!(events(&mut state).is_empty());
    }

    #[test]
    fn wheel_lines_pass_through() {
        let (mut state, window) = state_with_window();

        state.translate(
            window,
            WindowEvent::MouseWheel {
                device_id: DeviceId::dummy(),
                delta: MouseScrollDelta::LineDelta(0.0, -1.0),
                phase: TouchPhase::Moved,
            },
        );

        assert_eq!(
            events(&mut state),
            vec![PlatformEvent::Scroll {
                delta: Vec2::new(0.0, -1.0),
                distance: Vec2::new(0.0, -1.0),
            }]
        );
    }

    #[test]
    fn move_without_live_window_reports_outer_position() {
        let (mut state, window) = state_with_window();

        state.translate(window, WindowEvent::Moved(PhysicalPosition::new(40, 50)));

        assert_eq!(
            events(&mut state),
            vec![PlatformEvent::WindowMove {
                window_position: Vec2i::new(40, 50),
                client_position: Vec2i::new(40, 50),
            }]
        );
    }

    #[test]
    fn size_limits_map_unconstrained_axes() {
        assert_eq!(size_limit(SizeLimits::NONE, 0), None);
        assert_eq!(
            size_limit(SizeLimits { width: Some(300), height: None }, UNBOUNDED),
            Some(PhysicalSize::new(300, UNBOUNDED))
        );
    }
}
