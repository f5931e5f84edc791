//=========================================================================
// Platform Backends
//=========================================================================
//
// Native implementations of the `core` component traits.
//
// Architecture:
// ```text
//  Host
//   │ Box<dyn WindowComponent> / Box<dyn DisplayComponent>
//   ▼
//  ┌──────────────────────────────┬──────────────────────┬──────────────┐
//  │ sdl                          │ winit                │ win32        │
//  │  SdlWindowComponent          │  WinitWindowComponent│  Win32Display│
//  │  SdlDisplayComponent         │                      │  Component   │
//  │   └─ SdlVideo (trait seam)   │   └─ EventLoop pump  │   └─ GDI API │
//  └──────────────────────────────┴──────────────────────┴──────────────┘
//             │ native events
//             ▼
//  translate → core::event_queue::EventQueue::raise → listeners
// ```
//
// Key Design Decisions:
// - **Synchronous pump**: every window component translates native events
//   on the calling thread inside `process_events`; nothing is queued
//   across threads.
// - **Trait seams over native calls**: SDL and Win32 reach the OS through
//   a small trait so the translation and bookkeeping run headless.
// - **Shared drop handling**: `drop` collapses per-file native drop
//   notifications into one `FileDrop` for every backend.
//
//=========================================================================

//=== Module Declarations =================================================

mod drop;
pub mod sdl;
pub mod win32;
#[cfg(not(any(target_arch = "wasm32", target_os = "android", target_os = "ios")))]
pub mod winit;
