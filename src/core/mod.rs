//=========================================================================
// PAL Core
//
// Backend-independent half of the platform layer: handles, the event
// queue, canonical events and the component traits every backend
// implements.
//
// Layout:
// ```text
//  error        PalError / PalResult
//  geometry     Vec2, Vec2i, Box2i
//  handle       ComponentId, Handle<K>, HandleTable (owner-checked)
//  input        KeyCode, MouseButton, Modifiers
//  event_queue  PlatformEvent + synchronous EventQueue
//  hints        GraphicsApiHints (creation-time configuration)
//  window       WindowComponent trait + window value types
//  display      DisplayComponent trait + MonitorList reconciliation
// ```
//
// Nothing in here talks to a native API. Backends live in
// `crate::platform`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod display;
pub mod error;
pub mod event_queue;
pub mod geometry;
pub mod handle;
pub mod hints;
pub mod input;
pub mod window;
