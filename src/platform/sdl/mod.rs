//=========================================================================
// SDL2 Backend
//=========================================================================
//
// Window and display components over the SDL2 video subsystem.
//
// Layout:
// ```text
//  video      SdlVideo: the native call surface (one method per SDL call)
//  dummy      DummyVideo: in-process driver (headless hosts, tests)
//  native     Sdl2Video: libSDL2 driver (`sdl2` feature)
//  window     SdlWindowComponent  ─┐
//  display    SdlDisplayComponent ─┴─ share one Rc<RefCell<D: SdlVideo>>
//  translate  SdlEvent → PlatformEvent
//  hit_test   native hit-test hook → user callback
// ```
//
// Nothing above `SdlVideo` touches native types. `Sdl2Video` is the only
// file that links libSDL2.
//
//=========================================================================

//=== Module Declarations =================================================

mod display;
pub mod dummy;
#[cfg(feature = "sdl2")]
mod native;
mod translate;
pub mod video;
mod window;

//=== Public API ==========================================================

pub use display::SdlDisplayComponent;
pub use dummy::{DummyDisplay, DummyEventSender, DummyVideo};
#[cfg(feature = "sdl2")]
pub use native::Sdl2Video;
pub use video::{SdlEvent, SdlHooks, SdlVideo};
pub use window::SdlWindowComponent;
