//=========================================================================
// Win32 Display Device API
//=========================================================================
//
// The GDI display-device calls the Win32 display component needs, in
// plain Rust types.
//
//   EnumDisplayDevices(NULL, i)      → adapter(i)
//   EnumDisplayDevices(adapter, i)   → monitor(adapter, i)
//   EnumDisplaySettings(adapter, n)  → settings(adapter, n)
//   EnumDisplaySettings(CURRENT)     → current_settings(adapter)
//   EnumDisplayMonitors + GetMonitorInfo (szDevice == adapter)
//                                    → monitor_for_adapter(adapter)
//   GetDpiForMonitor(EFFECTIVE)      → monitor_dpi(hmonitor)
//
// `SystemDisplayApi` implements it on Windows. Everything else in the
// backend only sees this trait.
//
//=========================================================================

//=== External Dependencies ===============================================

use bitflags::bitflags;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Box2i, Vec2i};

//=== Native Flags ========================================================

bitflags! {
    /// `DISPLAY_DEVICE.StateFlags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayDeviceFlags: u32 {
        const ACTIVE = 0x0000_0001;
        const MULTI_DRIVER = 0x0000_0002;
        const PRIMARY_DEVICE = 0x0000_0004;
        const MIRRORING_DRIVER = 0x0000_0008;
        const VGA_COMPATIBLE = 0x0000_0010;
        const REMOVABLE = 0x0000_0020;
    }
}

bitflags! {
    /// `DEVMODE.dmFields`: which fields of a mode are valid.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DevModeFields: u32 {
        const POSITION = 0x0000_0020;
        const BITS_PER_PEL = 0x0004_0000;
        const PELS_WIDTH = 0x0008_0000;
        const PELS_HEIGHT = 0x0010_0000;
        const DISPLAY_FLAGS = 0x0020_0000;
        const DISPLAY_FREQUENCY = 0x0040_0000;
    }
}

impl DevModeFields {
    /// Fields every listed video mode must carry.
    pub const REQUIRED: Self = Self::PELS_WIDTH
        .union(Self::PELS_HEIGHT)
        .union(Self::DISPLAY_FREQUENCY);
}

//=== Native Records ======================================================

/// One `DISPLAY_DEVICE` entry (adapter or monitor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDevice {
    /// `DeviceName`, e.g. `\\.\DISPLAY1` or `\\.\DISPLAY1\Monitor0`.
    pub name: String,
    /// `DeviceString`, the human-readable description.
    pub description: String,
    pub state: DisplayDeviceFlags,
}

/// The fields of a `DEVMODE` used by the display component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevMode {
    pub fields: DevModeFields,
    pub position: Vec2i,
    pub width: u32,
    pub height: u32,
    pub frequency: u32,
    pub bits_per_pel: u32,
}

/// `HMONITOR` plus its work area from `GetMonitorInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorInfo {
    pub handle: isize,
    pub work_area: Box2i,
}

//=== DisplayDeviceApi ====================================================

/// GDI display-device surface. Errors are native messages.
pub trait DisplayDeviceApi {
    /// Opts the process into per-monitor DPI awareness.
    fn set_dpi_awareness(&mut self) -> Result<(), String>;

    /// Adapter `index`, or `None` past the last one.
    fn adapter(&self, index: u32) -> Option<DisplayDevice>;

    /// Monitor `index` attached to `adapter`, or `None` past the last one.
    fn monitor(&self, adapter: &str, index: u32) -> Option<DisplayDevice>;

    fn current_settings(&self, adapter: &str) -> Option<DevMode>;

    /// Listed mode `mode_index`, or `None` past the last one.
    fn settings(&self, adapter: &str, mode_index: u32) -> Option<DevMode>;

    /// The `HMONITOR` whose device is `adapter`, if it is on the desktop.
    fn monitor_for_adapter(&self, adapter: &str) -> Result<Option<MonitorInfo>, String>;

    /// Effective DPI of a monitor.
    fn monitor_dpi(&self, monitor: isize) -> Result<(u32, u32), String>;
}
