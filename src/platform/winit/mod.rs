//=========================================================================
// Winit Backend
//=========================================================================
//
// Window component over winit 0.30.
//
//  event_mapper  winit keys, buttons, wheel and cursors → PAL types
//  window        WinitWindowComponent + the ApplicationHandler state
//
// Desktop only: the component drives winit through `pump_app_events`,
// which web and mobile targets do not offer. Displays are not exposed
// here; pair it with a display component for the host OS.
//
//=========================================================================

//=== Module Declarations =================================================

mod event_mapper;
mod window;

//=== Public API ==========================================================

pub use window::WinitWindowComponent;
