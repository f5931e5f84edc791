//=========================================================================
// Dummy SDL Video Driver
//=========================================================================
//
// In-process `SdlVideo` implementation modelled on SDL's "dummy" video
// driver. Windows are plain records and nothing is presented, which makes
// it usable for headless hosts and for exercising the SDL components.
//
// Architecture:
// ```text
//  any thread                          pumping thread
//  ┌──────────────────┐               ┌──────────────────────────────┐
//  │ DummyEventSender │──┐            │ DummyVideo                   │
//  └──────────────────┘  │  channel   │  poll_event / wait_event     │
//  ┌──────────────────┐  ├──────────▶ │   ├─ Event   → returned      │
//  │ DummyVideo       │──┘            │   └─ HitTest → SdlHooks      │
//  │  (mutators push  │               │                 (reply)      │
//  │   window events) │               └──────────────────────────────┘
//  └──────────────────┘
// ```
//
// Like a real window manager, mutators such as `hide_window` or
// `set_window_position` queue the matching window event, so they reach
// the PAL on the next pump.
//
// Hit-test queries are armed when they are queued: if the hook was
// enabled at that moment the query is still dispatched to `SdlHooks`
// even if the hook was disabled before the pump drains it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::debug;

//=== Internal Dependencies ===============================================

use super::video::{
    GlAttr, SdlBorders, SdlCursorId, SdlDisplayMode, SdlEvent, SdlFullscreen, SdlHitTestResult,
    SdlHooks, SdlRect, SdlSystemCursor, SdlVideo, SdlWindowEvent, SdlWindowFlags, SdlWindowId,
    WINDOWPOS_UNDEFINED,
};

//=== DummyMessage ========================================================

enum DummyMessage {
    Event(SdlEvent),
    HitTest {
        window: SdlWindowId,
        point: (i32, i32),
        armed: bool,
        reply: Sender<SdlHitTestResult>,
    },
}

//=== DummyEventSender ====================================================

/// Thread-safe handle for `SDL_PushEvent`.
#[derive(Clone)]
pub struct DummyEventSender {
    sender: Sender<DummyMessage>,
}

impl DummyEventSender {
    pub fn push(&self, event: SdlEvent) -> Result<(), String> {
        self.sender
            .send(DummyMessage::Event(event))
            .map_err(|_| "event queue closed".to_string())
    }
}

//=== DummyDisplay ========================================================

/// A simulated monitor.
///
/// # Default Values
///
/// - **Position**: (0, 0)
/// - **Usable area**: full bounds minus a 40px bottom bar
/// - **DPI**: 96 on both axes
/// - **Mode**: current resolution, 60 Hz, 32 bpp (the only listed mode)
#[derive(Debug, Clone, PartialEq)]
pub struct DummyDisplay {
    pub name: String,
    pub bounds: SdlRect,
    pub usable_bounds: SdlRect,
    pub dpi: (f32, f32, f32),
    pub current_mode: SdlDisplayMode,
    pub modes: Vec<SdlDisplayMode>,
}

impl DummyDisplay {
    pub fn new(name: &str, width: i32, height: i32) -> Self {
        let mode = SdlDisplayMode {
            bits_per_pixel: 32,
            w: width,
            h: height,
            refresh_rate: 60,
        };
        Self {
            name: name.to_string(),
            bounds: SdlRect { x: 0, y: 0, w: width, h: height },
            usable_bounds: SdlRect { x: 0, y: 0, w: width, h: height - 40 },
            dpi: (96.0, 96.0, 96.0),
            current_mode: mode,
            modes: vec![mode],
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.bounds.x = x;
        self.bounds.y = y;
        self.usable_bounds.x = x;
        self.usable_bounds.y = y;
        self
    }

    pub fn with_dpi(mut self, horizontal: f32, vertical: f32) -> Self {
        self.dpi = (horizontal.max(vertical), horizontal, vertical);
        self
    }

    pub fn with_refresh_rate(mut self, hz: i32) -> Self {
        self.current_mode.refresh_rate = hz;
        self
    }

    pub fn with_modes(mut self, modes: Vec<SdlDisplayMode>) -> Self {
        self.modes = modes;
        self
    }
}

//=== DummyWindow =========================================================

#[derive(Debug, Clone)]
struct DummyWindow {
    title: String,
    position: (i32, i32),
    size: (i32, i32),
    minimum_size: (i32, i32),
    maximum_size: (i32, i32),
    flags: SdlWindowFlags,
    hit_test: bool,
    icon_size: Option<(u32, u32)>,
}

//=== DummyVideo ==========================================================

/// Software `SdlVideo` driver.
pub struct DummyVideo {
    initialised: bool,
    init_error: Option<String>,

    sender: Sender<DummyMessage>,
    receiver: Receiver<DummyMessage>,

    windows: HashMap<SdlWindowId, DummyWindow>,
    next_window_id: SdlWindowId,
    borders: SdlBorders,
    gl_attributes: HashMap<GlAttr, i32>,

    cursors: HashMap<SdlCursorId, SdlSystemCursor>,
    next_cursor_id: SdlCursorId,
    current_cursor: Option<SdlCursorId>,
    cursor_visible: bool,
    relative_mouse_mode: bool,

    clipboard: Option<String>,
    mouse_position: (i32, i32),
    displays: Vec<DummyDisplay>,
}

impl DummyVideo {
    //--- Construction -----------------------------------------------------

    /// One 1024x768 display, borderless window decorations.
    pub fn new() -> Self {
        Self::with_displays(vec![DummyDisplay::new("Dummy Display", 1024, 768)])
    }

    pub fn with_displays(displays: Vec<DummyDisplay>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            initialised: false,
            init_error: None,
            sender,
            receiver,
            windows: HashMap::new(),
            next_window_id: 1,
            borders: SdlBorders::default(),
            gl_attributes: HashMap::new(),
            cursors: HashMap::new(),
            next_cursor_id: 1,
            current_cursor: None,
            cursor_visible: true,
            relative_mouse_mode: false,
            clipboard: None,
            mouse_position: (0, 0),
            displays,
        }
    }

    /// Decorations reported for every bordered window.
    pub fn with_window_borders(mut self, borders: SdlBorders) -> Self {
        self.borders = borders;
        self
    }

    /// Makes `init` fail with `message`.
    pub fn with_init_error(mut self, message: &str) -> Self {
        self.init_error = Some(message.to_string());
        self
    }

    //--- Host simulation --------------------------------------------------

    pub fn event_sender(&self) -> DummyEventSender {
        DummyEventSender {
            sender: self.sender.clone(),
        }
    }

    pub fn push_event(&self, event: SdlEvent) {
        self.queue(event);
    }

    /// Replaces the clipboard and queues `ClipboardUpdate`.
    pub fn set_clipboard_text(&mut self, text: Option<&str>) {
        self.clipboard = text.map(str::to_string);
        self.queue(SdlEvent::ClipboardUpdate);
    }

    pub fn set_global_mouse_position(&mut self, x: i32, y: i32) {
        self.mouse_position = (x, y);
    }

    /// Replaces the monitor set. Callers queue the matching
    /// `SdlEvent::Display` notifications themselves.
    pub fn set_displays(&mut self, displays: Vec<DummyDisplay>) {
        self.displays = displays;
    }

    /// Simulates the window manager asking for a hit-test at `point`.
    ///
    /// The answer arrives on the returned channel once the query has been
    /// drained by `poll_event`/`wait_event`. Windows without an enabled
    /// hook are answered with `Normal` without consulting the hooks.
    pub fn query_hit_test(&self, window: SdlWindowId, point: (i32, i32)) -> Receiver<SdlHitTestResult> {
        let armed = self.windows.get(&window).is_some_and(|w| w.hit_test);
        let (reply, answer) = bounded(1);
        // Both channel ends are owned by `self`, so the send cannot fail.
        let _ = self.sender.send(DummyMessage::HitTest {
            window,
            point,
            armed,
            reply,
        });
        answer
    }

    //--- Inspection -------------------------------------------------------

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn window_exists(&self, window: SdlWindowId) -> bool {
        self.windows.contains_key(&window)
    }

    pub fn gl_attribute(&self, attr: GlAttr) -> Option<i32> {
        self.gl_attributes.get(&attr).copied()
    }

    pub fn window_icon_size(&self, window: SdlWindowId) -> Option<(u32, u32)> {
        self.windows.get(&window).and_then(|w| w.icon_size)
    }

    pub fn current_cursor(&self) -> Option<SdlSystemCursor> {
        self.current_cursor.and_then(|id| self.cursors.get(&id).copied())
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn relative_mouse_mode(&self) -> bool {
        self.relative_mouse_mode
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue(&self, event: SdlEvent) {
        // Both channel ends are owned by `self`, so the send cannot fail.
        let _ = self.sender.send(DummyMessage::Event(event));
    }

    fn queue_window(&self, window_id: SdlWindowId, event: SdlWindowEvent) {
        self.queue(SdlEvent::Window { window_id, event });
    }

    fn answer_hit_test(
        hooks: &mut dyn SdlHooks,
        window: SdlWindowId,
        point: (i32, i32),
        armed: bool,
        reply: Sender<SdlHitTestResult>,
    ) {
        let result = if armed {
            hooks.hit_test(window, point)
        } else {
            SdlHitTestResult::Normal
        };
        if reply.send(result).is_err() {
            debug!(target: "pal::sdl", "Hit-test answer for window {} discarded", window);
        }
    }

    fn update_flags(&mut self, window: SdlWindowId, set: SdlWindowFlags, clear: SdlWindowFlags) -> bool {
        match self.windows.get_mut(&window) {
            Some(record) => {
                record.flags.remove(clear);
                record.flags.insert(set);
                true
            }
            None => false,
        }
    }

    fn display(&self, index: i32) -> Result<&DummyDisplay, String> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.displays.get(i))
            .ok_or_else(|| {
                format!(
                    "displayIndex must be in the range 0 - {}",
                    self.displays.len() as i32 - 1
                )
            })
    }
}

impl Default for DummyVideo {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// SdlVideo
//=========================================================================

impl SdlVideo for DummyVideo {
    //--- Subsystem --------------------------------------------------------

    fn init(&mut self) -> Result<(), String> {
        if let Some(message) = &self.init_error {
            return Err(message.clone());
        }
        self.initialised = true;
        Ok(())
    }

    fn driver_name(&self) -> String {
        "dummy".to_string()
    }

    //--- Events -----------------------------------------------------------

    fn poll_event(&self, hooks: &mut dyn SdlHooks) -> Option<SdlEvent> {
        while let Ok(message) = self.receiver.try_recv() {
            match message {
                DummyMessage::Event(event) => return Some(event),
                DummyMessage::HitTest { window, point, armed, reply } => {
                    Self::answer_hit_test(hooks, window, point, armed, reply);
                }
            }
        }
        None
    }

    fn wait_event(&self, hooks: &mut dyn SdlHooks) -> Result<SdlEvent, String> {
        loop {
            match self.receiver.recv() {
                Ok(DummyMessage::Event(event)) => return Ok(event),
                Ok(DummyMessage::HitTest { window, point, armed, reply }) => {
                    Self::answer_hit_test(hooks, window, point, armed, reply);
                }
                Err(_) => return Err("event queue closed".to_string()),
            }
        }
    }

    //--- Windows ----------------------------------------------------------

    fn set_gl_attribute(&mut self, attr: GlAttr, value: i32) -> Result<(), String> {
        self.gl_attributes.insert(attr, value);
        Ok(())
    }

    fn create_window(
        &mut self,
        title: &str,
        position: (i32, i32),
        size: (i32, i32),
        flags: SdlWindowFlags,
    ) -> Result<SdlWindowId, String> {
        if size.0 <= 0 || size.1 <= 0 {
            return Err(format!("invalid window size {}x{}", size.0, size.1));
        }

        let id = self.next_window_id;
        self.next_window_id += 1;

        let resolve = |v: i32, border: i32| if v == WINDOWPOS_UNDEFINED { border } else { v };
        let borders = if flags.contains(SdlWindowFlags::BORDERLESS) {
            SdlBorders::default()
        } else {
            self.borders
        };

        let shown = if flags.contains(SdlWindowFlags::HIDDEN) {
            SdlWindowFlags::empty()
        } else {
            SdlWindowFlags::SHOWN
        };

        self.windows.insert(
            id,
            DummyWindow {
                title: title.to_string(),
                position: (resolve(position.0, borders.left), resolve(position.1, borders.top)),
                size,
                minimum_size: (0, 0),
                maximum_size: (0, 0),
                flags: flags | shown,
                hit_test: false,
                icon_size: None,
            },
        );

        Ok(id)
    }

    fn destroy_window(&mut self, window: SdlWindowId) {
        self.windows.remove(&window);
    }

    fn window_flags(&self, window: SdlWindowId) -> SdlWindowFlags {
        self.windows
            .get(&window)
            .map(|w| w.flags)
            .unwrap_or(SdlWindowFlags::empty())
    }

    fn window_title(&self, window: SdlWindowId) -> String {
        self.windows
            .get(&window)
            .map(|w| w.title.clone())
            .unwrap_or_default()
    }

    fn set_window_title(&mut self, window: SdlWindowId, title: &str) {
        if let Some(record) = self.windows.get_mut(&window) {
            record.title = title.to_string();
        }
    }

    fn set_window_icon(&mut self, window: SdlWindowId, width: u32, height: u32, rgba: &[u8]) -> Result<(), String> {
        let record = self
            .windows
            .get_mut(&window)
            .ok_or_else(|| "Invalid window".to_string())?;
        if rgba.len() as u64 != u64::from(width) * u64::from(height) * 4 {
            return Err("icon surface size mismatch".to_string());
        }
        record.icon_size = Some((width, height));
        Ok(())
    }

    fn window_position(&self, window: SdlWindowId) -> (i32, i32) {
        self.windows.get(&window).map(|w| w.position).unwrap_or_default()
    }

    fn set_window_position(&mut self, window: SdlWindowId, x: i32, y: i32) {
        let moved = match self.windows.get_mut(&window) {
            Some(record) if record.position != (x, y) => {
                record.position = (x, y);
                true
            }
            _ => false,
        };
        if moved {
            self.queue_window(window, SdlWindowEvent::Moved { x, y });
        }
    }

    fn window_size(&self, window: SdlWindowId) -> (i32, i32) {
        self.windows.get(&window).map(|w| w.size).unwrap_or_default()
    }

    fn set_window_size(&mut self, window: SdlWindowId, w: i32, h: i32) {
        let resized = match self.windows.get_mut(&window) {
            Some(record) if record.size != (w, h) => {
                record.size = (w, h);
                true
            }
            _ => false,
        };
        if resized {
            self.queue_window(window, SdlWindowEvent::Resized { w, h });
        }
    }

    fn window_borders_size(&self, window: SdlWindowId) -> Result<SdlBorders, String> {
        let record = self
            .windows
            .get(&window)
            .ok_or_else(|| "Invalid window".to_string())?;
        if record.flags.contains(SdlWindowFlags::BORDERLESS) {
            Ok(SdlBorders::default())
        } else {
            Ok(self.borders)
        }
    }

    fn window_minimum_size(&self, window: SdlWindowId) -> (i32, i32) {
        self.windows.get(&window).map(|w| w.minimum_size).unwrap_or_default()
    }

    fn set_window_minimum_size(&mut self, window: SdlWindowId, w: i32, h: i32) {
        if let Some(record) = self.windows.get_mut(&window) {
            record.minimum_size = (w, h);
        }
    }

    fn window_maximum_size(&self, window: SdlWindowId) -> (i32, i32) {
        self.windows.get(&window).map(|w| w.maximum_size).unwrap_or_default()
    }

    fn set_window_maximum_size(&mut self, window: SdlWindowId, w: i32, h: i32) {
        if let Some(record) = self.windows.get_mut(&window) {
            record.maximum_size = (w, h);
        }
    }

    fn show_window(&mut self, window: SdlWindowId) {
        let was_hidden = self.window_flags(window).contains(SdlWindowFlags::HIDDEN);
        if self.update_flags(window, SdlWindowFlags::SHOWN, SdlWindowFlags::HIDDEN) && was_hidden {
            self.queue_window(window, SdlWindowEvent::Shown);
        }
    }

    fn hide_window(&mut self, window: SdlWindowId) {
        let was_hidden = self.window_flags(window).contains(SdlWindowFlags::HIDDEN);
        if self.update_flags(window, SdlWindowFlags::HIDDEN, SdlWindowFlags::SHOWN) && !was_hidden {
            self.queue_window(window, SdlWindowEvent::Hidden);
        }
    }

    fn minimize_window(&mut self, window: SdlWindowId) {
        if self.update_flags(window, SdlWindowFlags::MINIMIZED, SdlWindowFlags::MAXIMIZED) {
            self.queue_window(window, SdlWindowEvent::Minimized);
        }
    }

    fn maximize_window(&mut self, window: SdlWindowId) {
        if self.update_flags(window, SdlWindowFlags::MAXIMIZED, SdlWindowFlags::MINIMIZED) {
            self.queue_window(window, SdlWindowEvent::Maximized);
        }
    }

    fn restore_window(&mut self, window: SdlWindowId) {
        let clear = SdlWindowFlags::MINIMIZED | SdlWindowFlags::MAXIMIZED;
        let was_restored = !self.window_flags(window).intersects(clear);
        if self.update_flags(window, SdlWindowFlags::empty(), clear) && !was_restored {
            self.queue_window(window, SdlWindowEvent::Restored);
        }
    }

    fn raise_window(&mut self, window: SdlWindowId) {
        let focused: Vec<SdlWindowId> = self
            .windows
            .iter()
            .filter(|(id, w)| **id != window && w.flags.contains(SdlWindowFlags::INPUT_FOCUS))
            .map(|(id, _)| *id)
            .collect();

        if !self.windows.contains_key(&window) {
            return;
        }
        for other in focused {
            self.update_flags(other, SdlWindowFlags::empty(), SdlWindowFlags::INPUT_FOCUS);
            self.queue_window(other, SdlWindowEvent::FocusLost);
        }
        if !self.window_flags(window).contains(SdlWindowFlags::INPUT_FOCUS) {
            self.update_flags(window, SdlWindowFlags::INPUT_FOCUS, SdlWindowFlags::empty());
            self.queue_window(window, SdlWindowEvent::FocusGained);
        }
    }

    fn flash_window(&mut self, window: SdlWindowId) -> Result<(), String> {
        if self.windows.contains_key(&window) {
            Ok(())
        } else {
            Err("Invalid window".to_string())
        }
    }

    fn set_window_fullscreen(&mut self, window: SdlWindowId, mode: SdlFullscreen) -> Result<(), String> {
        let set = match mode {
            SdlFullscreen::Windowed => SdlWindowFlags::empty(),
            SdlFullscreen::Desktop => SdlWindowFlags::FULLSCREEN_DESKTOP,
            SdlFullscreen::Exclusive => SdlWindowFlags::FULLSCREEN,
        };
        if self.update_flags(window, set, SdlWindowFlags::FULLSCREEN_DESKTOP) {
            Ok(())
        } else {
            Err("Invalid window".to_string())
        }
    }

    fn set_window_bordered(&mut self, window: SdlWindowId, bordered: bool) {
        if bordered {
            self.update_flags(window, SdlWindowFlags::empty(), SdlWindowFlags::BORDERLESS);
        } else {
            self.update_flags(window, SdlWindowFlags::BORDERLESS, SdlWindowFlags::empty());
        }
    }

    fn set_window_resizable(&mut self, window: SdlWindowId, resizable: bool) {
        if resizable {
            self.update_flags(window, SdlWindowFlags::RESIZABLE, SdlWindowFlags::empty());
        } else {
            self.update_flags(window, SdlWindowFlags::empty(), SdlWindowFlags::RESIZABLE);
        }
    }

    fn set_window_always_on_top(&mut self, window: SdlWindowId, on_top: bool) {
        if on_top {
            self.update_flags(window, SdlWindowFlags::ALWAYS_ON_TOP, SdlWindowFlags::empty());
        } else {
            self.update_flags(window, SdlWindowFlags::empty(), SdlWindowFlags::ALWAYS_ON_TOP);
        }
    }

    fn set_window_grab(&mut self, window: SdlWindowId, grabbed: bool) {
        if grabbed {
            self.update_flags(window, SdlWindowFlags::MOUSE_GRABBED, SdlWindowFlags::empty());
        } else {
            self.update_flags(window, SdlWindowFlags::empty(), SdlWindowFlags::MOUSE_GRABBED);
        }
    }

    fn set_relative_mouse_mode(&mut self, enabled: bool) -> Result<(), String> {
        self.relative_mouse_mode = enabled;
        Ok(())
    }

    fn set_window_hit_test(&mut self, window: SdlWindowId, enabled: bool) -> Result<(), String> {
        let record = self
            .windows
            .get_mut(&window)
            .ok_or_else(|| "Invalid window".to_string())?;
        record.hit_test = enabled;
        Ok(())
    }

    //--- Cursors ----------------------------------------------------------

    fn create_system_cursor(&mut self, shape: SdlSystemCursor) -> Result<SdlCursorId, String> {
        let id = self.next_cursor_id;
        self.next_cursor_id += 1;
        self.cursors.insert(id, shape);
        Ok(id)
    }

    fn free_cursor(&mut self, cursor: SdlCursorId) {
        self.cursors.remove(&cursor);
        if self.current_cursor == Some(cursor) {
            self.current_cursor = None;
        }
    }

    fn set_cursor(&mut self, cursor: SdlCursorId) {
        if self.cursors.contains_key(&cursor) {
            self.current_cursor = Some(cursor);
        }
    }

    fn show_cursor(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    //--- Clipboard & mouse ------------------------------------------------

    fn has_clipboard_text(&self) -> bool {
        self.clipboard.as_deref().is_some_and(|text| !text.is_empty())
    }

    fn global_mouse_state(&self) -> (i32, i32) {
        self.mouse_position
    }

    //--- Displays ---------------------------------------------------------

    fn num_video_displays(&self) -> Result<i32, String> {
        i32::try_from(self.displays.len()).map_err(|e| e.to_string())
    }

    fn display_name(&self, index: i32) -> Result<String, String> {
        Ok(self.display(index)?.name.clone())
    }

    fn display_bounds(&self, index: i32) -> Result<SdlRect, String> {
        Ok(self.display(index)?.bounds)
    }

    fn display_usable_bounds(&self, index: i32) -> Result<SdlRect, String> {
        Ok(self.display(index)?.usable_bounds)
    }

    fn display_dpi(&self, index: i32) -> Result<(f32, f32, f32), String> {
        Ok(self.display(index)?.dpi)
    }

    fn current_display_mode(&self, index: i32) -> Result<SdlDisplayMode, String> {
        Ok(self.display(index)?.current_mode)
    }

    fn num_display_modes(&self, index: i32) -> Result<i32, String> {
        i32::try_from(self.display(index)?.modes.len()).map_err(|e| e.to_string())
    }

    fn display_mode(&self, index: i32, mode_index: i32) -> Result<SdlDisplayMode, String> {
        let display = self.display(index)?;
        usize::try_from(mode_index)
            .ok()
            .and_then(|i| display.modes.get(i).copied())
            .ok_or_else(|| format!("index must be in the range of 0 - {}", display.modes.len() as i32 - 1))
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysDraggable {
        calls: usize,
    }

    impl SdlHooks for AlwaysDraggable {
        fn hit_test(&mut self, _window: SdlWindowId, _point: (i32, i32)) -> SdlHitTestResult {
            self.calls += 1;
            SdlHitTestResult::Draggable
        }
    }

    fn window(video: &mut DummyVideo) -> SdlWindowId {
        video
            .create_window("", (WINDOWPOS_UNDEFINED, WINDOWPOS_UNDEFINED), (640, 480), SdlWindowFlags::HIDDEN)
            .unwrap()
    }

    #[test]
    fn events_drain_in_push_order() {
        let mut video = DummyVideo::new();
        let mut hooks = AlwaysDraggable { calls: 0 };
        video.push_event(SdlEvent::Quit);
        video.push_event(SdlEvent::ClipboardUpdate);

        assert_eq!(video.poll_event(&mut hooks), Some(SdlEvent::Quit));
        assert_eq!(video.poll_event(&mut hooks), Some(SdlEvent::ClipboardUpdate));
        assert_eq!(video.poll_event(&mut hooks), None);
    }

    #[test]
    fn sender_works_across_threads() {
        let mut video = DummyVideo::new();
        let sender = video.event_sender();

        std::thread::spawn(move || sender.push(SdlEvent::Quit).unwrap())
            .join()
            .unwrap();

        let mut hooks = AlwaysDraggable { calls: 0 };
        assert_eq!(video.wait_event(&mut hooks), Ok(SdlEvent::Quit));
    }

    #[test]
    fn mutators_queue_window_events() {
        let mut video = DummyVideo::new();
        let id = window(&mut video);
        let mut hooks = AlwaysDraggable { calls: 0 };

        video.show_window(id);
        video.set_window_position(id, 10, 20);
        video.set_window_position(id, 10, 20);
        video.minimize_window(id);

        let events: Vec<_> = std::iter::from_fn(|| video.poll_event(&mut hooks)).collect();
        assert_eq!(
            events,
            vec![
                SdlEvent::Window { window_id: id, event: SdlWindowEvent::Shown },
                SdlEvent::Window { window_id: id, event: SdlWindowEvent::Moved { x: 10, y: 20 } },
                SdlEvent::Window { window_id: id, event: SdlWindowEvent::Minimized },
            ]
        );
    }

    #[test]
    fn hit_test_is_armed_when_queued() {
        let mut video = DummyVideo::new();
        let id = window(&mut video);
        let mut hooks = AlwaysDraggable { calls: 0 };

        let unarmed = video.query_hit_test(id, (1, 1));
        video.set_window_hit_test(id, true).unwrap();
        let armed = video.query_hit_test(id, (2, 2));
        video.set_window_hit_test(id, false).unwrap();

        assert_eq!(video.poll_event(&mut hooks), None);
        assert_eq!(unarmed.try_recv(), Ok(SdlHitTestResult::Normal));
        assert_eq!(armed.try_recv(), Ok(SdlHitTestResult::Draggable));
        assert_eq!(hooks.calls, 1);
    }

    #[test]
    fn borderless_windows_report_no_borders() {
        let borders = SdlBorders { top: 30, left: 2, bottom: 2, right: 2 };
        let mut video = DummyVideo::new().with_window_borders(borders);
        let id = window(&mut video);

        assert_eq!(video.window_borders_size(id), Ok(borders));
        assert_eq!(video.window_position(id), (2, 30));

        video.set_window_bordered(id, false);
        assert_eq!(video.window_borders_size(id), Ok(SdlBorders::default()));
    }

    #[test]
    fn display_queries_are_range_checked() {
        let video = DummyVideo::new();
        assert_eq!(video.num_video_displays(), Ok(1));
        assert!(video.display_name(0).is_ok());
        assert!(video.display_name(1).is_err());
        assert!(video.display_name(-1).is_err());
        assert!(video.display_mode(0, 1).is_err());
    }

    #[test]
    fn clipboard_update_is_queued() {
        let mut video = DummyVideo::new();
        let mut hooks = AlwaysDraggable { calls: 0 };

        video.set_clipboard_text(Some("hello"));

        assert!(video.has_clipboard_text());
        assert_eq!(video.poll_event(&mut hooks), Some(SdlEvent::ClipboardUpdate));
    }
}
