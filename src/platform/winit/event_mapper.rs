//=========================================================================
// Winit Event Mapper
//
// Converts winit input identifiers into the PAL's portable types.
//
// Responsibilities:
// - Translate physical keys, mouse buttons and modifier state
// - Normalise wheel deltas into `(delta, distance)` pairs
// - Map PAL system cursors onto winit cursor icons
//
// Keys winit reports that have no PAL equivalent map to
// `KeyCode::Unidentified`; mouse buttons outside the fixed table are a
// backend error.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};
use winit::window::CursorIcon;

//=== Internal Dependencies ===============================================

use super::window::COMPONENT;
use crate::core::display::DEFAULT_DPI;
use crate::core::error::{PalError, PalResult};
use crate::core::event_queue::PlatformEvent;
use crate::core::geometry::Vec2;
use crate::core::input::{KeyCode, Modifiers, MouseButton};
use crate::core::window::SystemCursor;

//=== Constants ===========================================================

/// Pixels per wheel line when a device reports pixel deltas.
pub(super) const PIXELS_PER_LINE: f32 = 10.0;

//=== Key Conversion ======================================================

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Numeric keys -------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Alphabetic keys ----------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Function keys ------------------------------------------------
            F1 => KeyCode::F1, F2 => KeyCode::F2, F3 => KeyCode::F3,
            F4 => KeyCode::F4, F5 => KeyCode::F5, F6 => KeyCode::F6,
            F7 => KeyCode::F7, F8 => KeyCode::F8, F9 => KeyCode::F9,
            F10 => KeyCode::F10, F11 => KeyCode::F11, F12 => KeyCode::F12,

            //--- Arrow keys ---------------------------------------------------
            ArrowDown => KeyCode::ArrowDown, ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight, ArrowUp => KeyCode::ArrowUp,

            //--- Editing and navigation ---------------------------------------
            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,
            Insert => KeyCode::Insert,
            Home => KeyCode::Home,
            End => KeyCode::End,
            PageUp => KeyCode::PageUp,
            PageDown => KeyCode::PageDown,

            //--- Modifiers ----------------------------------------------------
            ShiftLeft => KeyCode::ShiftLeft, ShiftRight => KeyCode::ShiftRight,
            ControlLeft => KeyCode::ControlLeft, ControlRight => KeyCode::ControlRight,
            AltLeft => KeyCode::AltLeft, AltRight => KeyCode::AltRight,
            SuperLeft => KeyCode::SuperLeft, SuperRight => KeyCode::SuperRight,

            //--- Fallback -----------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

pub(super) fn map_physical_key(key: PhysicalKey) -> KeyCode {
    match key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
    }
}

//=== Modifier Conversion =================================================

/// Winit already folds left/right variants into one flag.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            logo: state.super_key(),
        }
    }
}

//=== Mouse Conversion ====================================================

pub(super) fn map_mouse_button(button: WinitMouseButton) -> PalResult<MouseButton> {
    match button {
        WinitMouseButton::Left => Ok(MouseButton::Primary),
        WinitMouseButton::Right => Ok(MouseButton::Secondary),
        WinitMouseButton::Middle => Ok(MouseButton::Middle),
        WinitMouseButton::Back => Ok(MouseButton::Button4),
        WinitMouseButton::Forward => Ok(MouseButton::Button5),
        WinitMouseButton::Other(code) => Err(PalError::backend(
            COMPONENT,
            format!("got unknown mouse button: Other({})", code),
        )),
    }
}

/// Wheel movement as `(delta, distance)`, both in lines.
///
/// Pixel-precise devices have no wheel ticks, so their delta is the same
/// line-scaled amount as the distance.
pub(super) fn scroll_vectors(delta: MouseScrollDelta) -> (Vec2, Vec2) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (Vec2::new(x, y), Vec2::new(x, y)),
        MouseScrollDelta::PixelDelta(pos) => {
            let lines = Vec2::new(pos.x as f32 / PIXELS_PER_LINE, pos.y as f32 / PIXELS_PER_LINE);
            (lines, lines)
        }
    }
}

//=== Window Conversion ===================================================

pub(super) fn dpi_change(scale_factor: f64) -> PlatformEvent {
    let scale = scale_factor as f32;
    PlatformEvent::WindowDpiChange {
        dpi_x: scale * DEFAULT_DPI,
        dpi_y: scale * DEFAULT_DPI,
        scale_x: scale,
        scale_y: scale,
    }
}

pub(super) fn cursor_icon(shape: SystemCursor) -> CursorIcon {
    match shape {
        SystemCursor::Arrow => CursorIcon::Default,
        SystemCursor::TextBeam => CursorIcon::Text,
        SystemCursor::Wait => CursorIcon::Wait,
        SystemCursor::Crosshair => CursorIcon::Crosshair,
        SystemCursor::Progress => CursorIcon::Progress,
        SystemCursor::ResizeNwse => CursorIcon::NwseResize,
        SystemCursor::ResizeNesw => CursorIcon::NeswResize,
        SystemCursor::ResizeEw => CursorIcon::EwResize,
        SystemCursor::ResizeNs => CursorIcon::NsResize,
        SystemCursor::ResizeAll => CursorIcon::Move,
        SystemCursor::NotAllowed => CursorIcon::NotAllowed,
        SystemCursor::Hand => CursorIcon::Pointer,
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn every_fixed_button_maps() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), Ok(MouseButton::Primary));
        assert_eq!(map_mouse_button(WinitMouseButton::Right), Ok(MouseButton::Secondary));
        assert_eq!(map_mouse_button(WinitMouseButton::Middle), Ok(MouseButton::Middle));
        assert_eq!(map_mouse_button(WinitMouseButton::Back), Ok(MouseButton::Button4));
        assert_eq!(map_mouse_button(WinitMouseButton::Forward), Ok(MouseButton::Button5));
    }

    #[test]
    fn other_buttons_are_fatal() {
        for code in [0, 6, 42, u16::MAX] {
            let err = map_mouse_button(WinitMouseButton::Other(code)).unwrap_err();
            assert!(err.is_fatal());
        }
    }

    #[test]
    fn keys_map_by_position() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyW), KeyCode::KeyW);
        assert_eq!(KeyCode::from(WinitKeyCode::F11), KeyCode::F11);
        assert_eq!(KeyCode::from(WinitKeyCode::SuperRight), KeyCode::SuperRight);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadAdd), KeyCode::Unidentified);
        assert_eq!(
            map_physical_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            KeyCode::Unidentified
        );
    }

    #[test]
    fn modifiers_include_logo() {
        let state = ModifiersState::SHIFT | ModifiersState::SUPER;
        let mods = Modifiers::from(state);
        assert!(mods.shift && mods.logo && !mods.ctrl && !mods.alt);
    }

    #[test]
    fn line_and_pixel_scrolling() {
        let (delta, distance) = scroll_vectors(MouseScrollDelta::LineDelta(-1.0, 2.0));
        assert_eq!(delta, Vec2::new(-1.0, 2.0));
        assert_eq!(distance, Vec2::new(-1.0, 2.0));

        let (delta, distance) = scroll_vectors(MouseScrollDelta::PixelDelta(PhysicalPosition::new(5.0, -20.0)));
        assert_eq!(distance, Vec2::new(0.5, -2.0));
        assert_eq!(delta, Vec2::new(0.5, -2.0));
    }

    #[test]
    fn pixel_and_line_devices_scroll_the_same_distance() {
        let (_, by_lines) = scroll_vectors(MouseScrollDelta::LineDelta(0.0, 3.0));
        let (_, by_pixels) = scroll_vectors(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 30.0)));
        assert_eq!(by_lines, by_pixels);
    }

    #[test]
    fn dpi_follows_scale_factor() {
        assert_eq!(
            dpi_change(1.5),
            PlatformEvent::WindowDpiChange { dpi_x: 144.0, dpi_y: 144.0, scale_x: 1.5, scale_y: 1.5 }
        );
    }
}
