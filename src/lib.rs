//=========================================================================
// Aetheric Platform - Library Root
//
// Handle-based platform abstraction layer: windows, displays and a
// synchronous event queue behind backend-independent traits.
//
// Responsibilities:
// - Define the portable surface (`core`): handles, events, the
//   `WindowComponent` and `DisplayComponent` traits
// - Provide native backends (`platform`): SDL2, winit and Win32
// - Re-export the common names through `prelude`
//
// Typical usage:
// ```no_run
// use aetheric_platform::prelude::*;
//
// fn main() -> PalResult<()> {
//     let mut windows = WinitWindowComponent::new()?;
//     let mut queue = EventQueue::new();
//     let window = windows.create(&GraphicsApiHints::None)?;
//     windows.set_title(window, "Aetheric")?;
//     windows.set_mode(window, WindowMode::Normal)?;
//
//     queue.subscribe(PlatformEventType::Close, |_, _| {
//         log::info!("close requested");
//         Ok(())
//     });
//
//     loop {
//         windows.process_events(&mut queue, true)?;
//     }
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` is backend independent and never calls a native API.
//
pub mod core;

//--- Backends ------------------------------------------------------------
//
// `platform` holds one submodule per native backend. Each exposes its
// components plus the trait seam it talks to the OS through.
//
pub mod platform;

//--- Convenience ---------------------------------------------------------
pub mod prelude;
