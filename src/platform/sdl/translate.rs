//=========================================================================
// SDL Event Translation
//=========================================================================
//
// Converts one native `SdlEvent` into at most one canonical event.
//
//   SdlEvent ──▶ translate() ──▶ Ok(Some((window, PlatformEvent)))  raise
//                             ├─▶ Ok(None)                           swallowed
//                             └─▶ Err(PalError::Backend)             abort pump
//
// Swallowed: shown, exposed, size-changed, take-focus, hit-test, ICC
// profile notifications, quit, unknown event types, and events for
// windows this component does not know (or has destroyed).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::video::{
    SdlEvent, SdlKeymod, SdlVideo, SdlWindowEvent, SdlWindowId, BUTTON_LEFT, BUTTON_MIDDLE,
    BUTTON_RIGHT, BUTTON_X1, BUTTON_X2,
};
use super::window::{SdlWindowComponent, COMPONENT};
use crate::core::display::DEFAULT_DPI;
use crate::core::error::{PalError, PalResult};
use crate::core::event_queue::{ClipboardFormat, PlatformEvent};
use crate::core::geometry::{Vec2, Vec2i};
use crate::core::handle::WindowHandle;
use crate::core::input::{KeyCode, Modifiers, MouseButton};
use crate::core::window::WindowMode;

//=== Mouse Conversion ====================================================

/// Fixed native button table. Any other code cannot be translated.
pub(super) fn map_mouse_button(button: u8) -> PalResult<MouseButton> {
    match button {
        BUTTON_LEFT => Ok(MouseButton::Primary),
        BUTTON_MIDDLE => Ok(MouseButton::Middle),
        BUTTON_RIGHT => Ok(MouseButton::Secondary),
        BUTTON_X1 => Ok(MouseButton::Button4),
        BUTTON_X2 => Ok(MouseButton::Button5),
        other => Err(PalError::backend(COMPONENT, format!("got unknown mouse button: {}", other))),
    }
}

/// Returns `(delta, distance)` with SDL's flipped direction undone.
pub(super) fn scroll_vectors(x: i32, y: i32, precise_x: f32, precise_y: f32, flipped: bool) -> (Vec2, Vec2) {
    let sign = if flipped { -1.0 } else { 1.0 };
    (
        Vec2::new(x as f32 * sign, y as f32 * sign),
        Vec2::new(precise_x * sign, precise_y * sign),
    )
}

//=== Key Conversion ======================================================

/// Maps an `SDL_Scancode` to a physical key.
pub(super) fn map_scancode(scancode: u32) -> KeyCode {
    match scancode {
        //--- Letters (SDL_SCANCODE_A = 4 .. Z = 29) ---
        4 => KeyCode::KeyA, 5 => KeyCode::KeyB, 6 => KeyCode::KeyC,
        7 => KeyCode::KeyD, 8 => KeyCode::KeyE, 9 => KeyCode::KeyF,
        10 => KeyCode::KeyG, 11 => KeyCode::KeyH, 12 => KeyCode::KeyI,
        13 => KeyCode::KeyJ, 14 => KeyCode::KeyK, 15 => KeyCode::KeyL,
        16 => KeyCode::KeyM, 17 => KeyCode::KeyN, 18 => KeyCode::KeyO,
        19 => KeyCode::KeyP, 20 => KeyCode::KeyQ, 21 => KeyCode::KeyR,
        22 => KeyCode::KeyS, 23 => KeyCode::KeyT, 24 => KeyCode::KeyU,
        25 => KeyCode::KeyV, 26 => KeyCode::KeyW, 27 => KeyCode::KeyX,
        28 => KeyCode::KeyY, 29 => KeyCode::KeyZ,

        //--- Number row (1 = 30 .. 9 = 38, 0 = 39) ---
        30 => KeyCode::Digit1, 31 => KeyCode::Digit2, 32 => KeyCode::Digit3,
        33 => KeyCode::Digit4, 34 => KeyCode::Digit5, 35 => KeyCode::Digit6,
        36 => KeyCode::Digit7, 37 => KeyCode::Digit8, 38 => KeyCode::Digit9,
        39 => KeyCode::Digit0,

        //--- Special ---
        40 => KeyCode::Enter,
        41 => KeyCode::Escape,
        42 => KeyCode::Backspace,
        43 => KeyCode::Tab,
        44 => KeyCode::Space,

        //--- Function keys (F1 = 58 .. F12 = 69) ---
        58 => KeyCode::F1, 59 => KeyCode::F2, 60 => KeyCode::F3,
        61 => KeyCode::F4, 62 => KeyCode::F5, 63 => KeyCode::F6,
        64 => KeyCode::F7, 65 => KeyCode::F8, 66 => KeyCode::F9,
        67 => KeyCode::F10, 68 => KeyCode::F11, 69 => KeyCode::F12,

        //--- Navigation ---
        73 => KeyCode::Insert,
        74 => KeyCode::Home,
        75 => KeyCode::PageUp,
        76 => KeyCode::Delete,
        77 => KeyCode::End,
        78 => KeyCode::PageDown,
        79 => KeyCode::ArrowRight,
        80 => KeyCode::ArrowLeft,
        81 => KeyCode::ArrowDown,
        82 => KeyCode::ArrowUp,

        //--- Modifiers ---
        224 => KeyCode::ControlLeft,
        225 => KeyCode::ShiftLeft,
        226 => KeyCode::AltLeft,
        227 => KeyCode::SuperLeft,
        228 => KeyCode::ControlRight,
        229 => KeyCode::ShiftRight,
        230 => KeyCode::AltRight,
        231 => KeyCode::SuperRight,

        _ => KeyCode::Unidentified,
    }
}

impl From<SdlKeymod> for Modifiers {
    fn from(keymod: SdlKeymod) -> Self {
        Self {
            shift: keymod.intersects(SdlKeymod::LSHIFT | SdlKeymod::RSHIFT),
            ctrl: keymod.intersects(SdlKeymod::LCTRL | SdlKeymod::RCTRL),
            alt: keymod.intersects(SdlKeymod::LALT | SdlKeymod::RALT),
            logo: keymod.intersects(SdlKeymod::LGUI | SdlKeymod::RGUI),
        }
    }
}

//=== Event Translation ===================================================

type Translated = Option<(Option<WindowHandle>, PlatformEvent)>;

impl<D: SdlVideo> SdlWindowComponent<D> {
    pub(super) fn translate(&mut self, event: SdlEvent) -> PalResult<Translated> {
        let translated = match event {
            SdlEvent::Window { window_id, event } => {
                let Some(window) = self.live_window(window_id) else {
                    return Ok(None);
                };
                self.translate_window_event(window_id, event)
                    .map(|canonical| (Some(window), canonical))
            }

            //--- Keyboard ---
            SdlEvent::KeyDown { window_id, scancode, keymod, repeat } => {
                self.live_window(window_id).map(|window| {
                    let event = PlatformEvent::KeyDown {
                        key: map_scancode(scancode),
                        scancode,
                        modifiers: Modifiers::from(keymod),
                        repeat,
                    };
                    (Some(window), event)
                })
            }
            SdlEvent::KeyUp { window_id, scancode, keymod } => {
                self.live_window(window_id).map(|window| {
                    let event = PlatformEvent::KeyUp {
                        key: map_scancode(scancode),
                        scancode,
                        modifiers: Modifiers::from(keymod),
                    };
                    (Some(window), event)
                })
            }
            SdlEvent::TextInput { window_id, text } => self
                .live_window(window_id)
                .map(|window| (Some(window), PlatformEvent::TextInput { text })),

            //--- Mouse ---
            SdlEvent::MouseMotion { window_id, x, y } => self.live_window(window_id).map(|window| {
                let position = Vec2::new(x as f32, y as f32);
                (Some(window), PlatformEvent::MouseMove { position })
            }),
            SdlEvent::MouseButtonDown { window_id, button } => {
                let button = map_mouse_button(button)?;
                self.live_window(window_id)
                    .map(|window| (Some(window), PlatformEvent::MouseDown { button }))
            }
            SdlEvent::MouseButtonUp { window_id, button } => {
                let button = map_mouse_button(button)?;
                self.live_window(window_id)
                    .map(|window| (Some(window), PlatformEvent::MouseUp { button }))
            }
            SdlEvent::MouseWheel { window_id, x, y, precise_x, precise_y, flipped } => {
                self.live_window(window_id).map(|window| {
                    let (delta, distance) = scroll_vectors(x, y, precise_x, precise_y, flipped);
                    (Some(window), PlatformEvent::Scroll { delta, distance })
                })
            }

            //--- Clipboard ---
            SdlEvent::ClipboardUpdate => {
                let format = if self.video.borrow().has_clipboard_text() {
                    ClipboardFormat::Text
                } else {
                    ClipboardFormat::None
                };
                Some((None, PlatformEvent::ClipboardUpdate { format }))
            }

            //--- Drag and drop ---
            SdlEvent::DropBegin { .. } => {
                self.drops.begin();
                None
            }
            SdlEvent::DropFile { file, .. } => {
                self.drops.push(file);
                None
            }
            SdlEvent::DropComplete { window_id } => {
                let file_paths = self.drops.complete();
                let (x, y) = self.video.borrow().global_mouse_state();
                let window = if window_id == 0 { None } else { self.live_window(window_id) };
                let event = PlatformEvent::FileDrop {
                    file_paths,
                    position: Vec2i::new(x, y),
                    dropped_in_window: window.is_some(),
                };
                Some((window, event))
            }

            //--- Displays ---
            SdlEvent::Display { display_index, event } => {
                debug!(target: "pal::sdl", "Display {} reported {:?}", display_index, event);
                Some((None, PlatformEvent::DisplayChange))
            }

            SdlEvent::Quit | SdlEvent::Other(_) => {
                trace!(target: "pal::sdl", "Ignoring {:?}", event);
                None
            }
        };

        Ok(translated)
    }

    fn translate_window_event(&self, window_id: SdlWindowId, event: SdlWindowEvent) -> Option<PlatformEvent> {
        let canonical = match event {
            SdlWindowEvent::Hidden => PlatformEvent::WindowModeChange { new_mode: WindowMode::Hidden },
            SdlWindowEvent::Minimized => PlatformEvent::WindowModeChange { new_mode: WindowMode::Minimized },
            SdlWindowEvent::Maximized => PlatformEvent::WindowModeChange { new_mode: WindowMode::Maximized },
            SdlWindowEvent::Restored => PlatformEvent::WindowModeChange { new_mode: WindowMode::Normal },

            SdlWindowEvent::Moved { x, y } => {
                let borders = self.borders(window_id);
                let client_position = Vec2i::new(x, y);
                PlatformEvent::WindowMove {
                    window_position: client_position - Vec2i::new(borders.left, borders.top),
                    client_position,
                }
            }
            SdlWindowEvent::Resized { w, h } => PlatformEvent::WindowResize { new_size: Vec2i::new(w, h) },

            SdlWindowEvent::Enter => PlatformEvent::MouseEnter { entered: true },
            SdlWindowEvent::Leave => PlatformEvent::MouseEnter { entered: false },
            SdlWindowEvent::FocusGained => PlatformEvent::Focus { gained: true },
            SdlWindowEvent::FocusLost => PlatformEvent::Focus { gained: false },
            SdlWindowEvent::Close => PlatformEvent::Close,

            SdlWindowEvent::DisplayChanged { display_index } => {
                match self.video.borrow().display_dpi(display_index) {
                    Ok((_, dpi_x, dpi_y)) => PlatformEvent::WindowDpiChange {
                        dpi_x,
                        dpi_y,
                        scale_x: dpi_x / DEFAULT_DPI,
                        scale_y: dpi_y / DEFAULT_DPI,
                    },
                    Err(e) => {
                        trace!(target: "pal::sdl", "No DPI for display {}: {}", display_index, e);
                        return None;
                    }
                }
            }

            SdlWindowEvent::Shown
            | SdlWindowEvent::Exposed
            | SdlWindowEvent::SizeChanged { .. }
            | SdlWindowEvent::TakeFocus
            | SdlWindowEvent::HitTest
            | SdlWindowEvent::IccProfileChanged => {
                trace!(target: "pal::sdl", "Ignoring window {} event {:?}", window_id, event);
                return None;
            }
        };

        Some(canonical)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_valid_button_maps() {
        let expected = [
            (BUTTON_LEFT, MouseButton::Primary),
            (BUTTON_MIDDLE, MouseButton::Middle),
            (BUTTON_RIGHT, MouseButton::Secondary),
            (BUTTON_X1, MouseButton::Button4),
            (BUTTON_X2, MouseButton::Button5),
        ];
        for (code, button) in expected {
            assert_eq!(map_mouse_button(code), Ok(button));
        }
    }

    #[test]
    fn every_other_button_is_fatal() {
        for code in (0..=u8::MAX).filter(|c| !(1..=5).contains(c)) {
            let err = map_mouse_button(code).unwrap_err();
            assert!(err.is_fatal(), "button {} should be a backend error", code);
        }
    }

    #[test]
    fn flipped_wheel_is_normalised() {
        let (delta, distance) = scroll_vectors(0, 2, 0.0, 2.5, true);
        assert_eq!(delta, Vec2::new(-0.0, -2.0));
        assert_eq!(distance, Vec2::new(-0.0, -2.5));

        let (delta, distance) = scroll_vectors(1, -1, 0.5, -1.0, false);
        assert_eq!(delta, Vec2::new(1.0, -1.0));
        assert_eq!(distance, Vec2::new(0.5, -1.0));
    }

    #[test]
    fn scancodes_map_to_physical_keys() {
        assert_eq!(map_scancode(4), KeyCode::KeyA);
        assert_eq!(map_scancode(39), KeyCode::Digit0);
        assert_eq!(map_scancode(41), KeyCode::Escape);
        assert_eq!(map_scancode(82), KeyCode::ArrowUp);
        assert_eq!(map_scancode(229), KeyCode::ShiftRight);
        assert_eq!(map_scancode(1000), KeyCode::Unidentified);
    }

    #[test]
    fn keymod_collapses_sides() {
        let mods = Modifiers::from(SdlKeymod::RCTRL | SdlKeymod::LGUI | SdlKeymod::CAPS);
        assert_eq!(mods, Modifiers { ctrl: true, logo: true, ..Modifiers::NONE });
    }
}
