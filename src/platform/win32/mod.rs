//=========================================================================
// Win32 Backend
//=========================================================================
//
// Display enumeration through GDI display devices.
//
//  api      DisplayDeviceApi: the native call surface
//  display  Win32DisplayComponent
//  ffi      SystemDisplayApi (Windows only)
//
//=========================================================================

//=== Module Declarations =================================================

mod api;
mod display;
#[cfg(windows)]
mod ffi;

//=== Public API ==========================================================

pub use api::{DevMode, DevModeFields, DisplayDevice, DisplayDeviceApi, DisplayDeviceFlags, MonitorInfo};
pub use display::Win32DisplayComponent;
#[cfg(windows)]
pub use ffi::SystemDisplayApi;
