//=========================================================================
// Event Queue Module
//=========================================================================
//
// Canonical event types and the synchronous dispatch bus.
//
// Components:
// - `event`: canonical event payloads and their kinds
// - `queue`: the same-thread listener fan-out
//
//=========================================================================

//=== Module Declarations =================================================

mod event;
mod queue;

//=== Public API ==========================================================

pub use event::{ClipboardFormat, PlatformEvent, PlatformEventType};
pub use queue::{DispatchError, EventQueue, ListenerError, ListenerFailure, ListenerId, ListenerResult};
