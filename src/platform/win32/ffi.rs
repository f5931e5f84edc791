//=========================================================================
// Win32 System Display API
//=========================================================================
//
// `DisplayDeviceApi` over the real GDI / HiDpi entry points.
//
// Every unsafe block is a single FFI call with stack-owned, correctly
// sized out-parameters (`cb` / `dmSize` / `cbSize` set before the call).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::mem::size_of;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{BOOL, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayDevicesW, EnumDisplayMonitors, EnumDisplaySettingsW, GetMonitorInfoW, DEVMODEW, DISPLAY_DEVICEW,
    ENUM_CURRENT_SETTINGS, ENUM_DISPLAY_SETTINGS_MODE, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
};
use windows::Win32::UI::HiDpi::{
    GetDpiForMonitor, SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, MDT_EFFECTIVE_DPI,
};

//=== Internal Dependencies ===============================================

use super::api::{DevMode, DevModeFields, DisplayDevice, DisplayDeviceApi, DisplayDeviceFlags, MonitorInfo};
use crate::core::geometry::{Box2i, Vec2i};

//=== Constants ===========================================================

/// `EDD_GET_DEVICE_INTERFACE_NAME`.
const EDD_GET_DEVICE_INTERFACE_NAME: u32 = 0x0000_0001;

//=== Wide String Helpers =================================================

fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

fn from_wide(buffer: &[u16]) -> String {
    let end = buffer.iter().position(|c| *c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..end])
}

//=== SystemDisplayApi ====================================================

/// The live Win32 display API.
#[derive(Debug, Default)]
pub struct SystemDisplayApi;

impl SystemDisplayApi {
    pub fn new() -> Self {
        Self
    }

    fn display_device(parent: Option<&str>, index: u32, flags: u32) -> Option<DisplayDevice> {
        let parent = parent.map(to_wide);
        let parent_ptr = parent.as_ref().map_or(PCWSTR::null(), |p| PCWSTR(p.as_ptr()));

        let mut device = DISPLAY_DEVICEW {
            cb: size_of::<DISPLAY_DEVICEW>() as u32,
            ..Default::default()
        };
        // SAFETY: `device.cb` is set and `parent` outlives the call.
        let found = unsafe { EnumDisplayDevicesW(parent_ptr, index, &mut device, flags) };

        found.as_bool().then(|| DisplayDevice {
            name: from_wide(&device.DeviceName),
            description: from_wide(&device.DeviceString),
            state: DisplayDeviceFlags::from_bits_truncate(device.StateFlags.0),
        })
    }

    fn devmode(adapter: &str, mode: ENUM_DISPLAY_SETTINGS_MODE) -> Option<DevMode> {
        let name = to_wide(adapter);
        let mut devmode = DEVMODEW {
            dmSize: size_of::<DEVMODEW>() as u16,
            ..Default::default()
        };
        // SAFETY: `dmSize` is set and `name` outlives the call.
        let found = unsafe { EnumDisplaySettingsW(PCWSTR(name.as_ptr()), mode, &mut devmode) };
        if !found.as_bool() {
            return None;
        }

        // SAFETY: display devices fill the display arm of the union.
        let position = unsafe { devmode.Anonymous1.Anonymous2.dmPosition };

        Some(DevMode {
            fields: DevModeFields::from_bits_truncate(devmode.dmFields.0),
            position: Vec2i::new(position.x, position.y),
            width: devmode.dmPelsWidth,
            height: devmode.dmPelsHeight,
            frequency: devmode.dmDisplayFrequency,
            bits_per_pel: devmode.dmBitsPerPel,
        })
    }
}

unsafe extern "system" fn collect_monitor(monitor: HMONITOR, _: HDC, _: *mut RECT, data: LPARAM) -> BOOL {
    // SAFETY: `data` is the `&mut Vec<HMONITOR>` passed by `monitor_for_adapter`,
    // alive for the whole EnumDisplayMonitors call.
    let monitors = unsafe { &mut *(data.0 as *mut Vec<HMONITOR>) };
    monitors.push(monitor);
    BOOL::from(true)
}

impl DisplayDeviceApi for SystemDisplayApi {
    fn set_dpi_awareness(&mut self) -> Result<(), String> {
        // SAFETY: plain call with a predefined context value.
        unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) }
            .map_err(|e| e.to_string())
    }

    fn adapter(&self, index: u32) -> Option<DisplayDevice> {
        Self::display_device(None, index, EDD_GET_DEVICE_INTERFACE_NAME)
    }

    fn monitor(&self, adapter: &str, index: u32) -> Option<DisplayDevice> {
        Self::display_device(Some(adapter), index, 0)
    }

    fn current_settings(&self, adapter: &str) -> Option<DevMode> {
        Self::devmode(adapter, ENUM_CURRENT_SETTINGS)
    }

    fn settings(&self, adapter: &str, mode_index: u32) -> Option<DevMode> {
        Self::devmode(adapter, ENUM_DISPLAY_SETTINGS_MODE(mode_index))
    }

    fn monitor_for_adapter(&self, adapter: &str) -> Result<Option<MonitorInfo>, String> {
        let mut monitors: Vec<HMONITOR> = Vec::new();
        // SAFETY: the callback only pushes into `monitors`, which outlives the call.
        let ok = unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(collect_monitor),
                LPARAM(&mut monitors as *mut Vec<HMONITOR> as isize),
            )
        };
        if !ok.as_bool() {
            return Err("EnumDisplayMonitors failed".to_string());
        }

        for monitor in monitors {
            let mut info = MONITORINFOEXW::default();
            info.monitorInfo.cbSize = size_of::<MONITORINFOEXW>() as u32;
            // SAFETY: `cbSize` announces the extended struct.
            let found = unsafe { GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut MONITORINFO) };
            if found.as_bool() && from_wide(&info.szDevice) == adapter {
                let work = info.monitorInfo.rcWork;
                return Ok(Some(MonitorInfo {
                    handle: monitor.0 as isize,
                    work_area: Box2i::new(work.left, work.top, work.right, work.bottom),
                }));
            }
        }

        Ok(None)
    }

    fn monitor_dpi(&self, monitor: isize) -> Result<(u32, u32), String> {
        let (mut x, mut y) = (0u32, 0u32);
        // SAFETY: out-parameters are stack locals.
        unsafe { GetDpiForMonitor(HMONITOR(monitor as _), MDT_EFFECTIVE_DPI, &mut x, &mut y) }
            .map_err(|e| e.to_string())?;
        Ok((x, y))
    }
}
