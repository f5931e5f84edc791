//=========================================================================
// Win32 Display Component
//=========================================================================
//
// `DisplayComponent` over GDI display devices.
//
// Enumeration:
// ```text
//  for each adapter (EnumDisplayDevices(NULL, i)):
//      skip unless ACTIVE
//      current DEVMODE      → position, resolution, refresh rate
//      HMONITOR of adapter  → work area, live DPI
//      for each monitor (EnumDisplayDevices(adapter, j)):
//          Monitor { device_name: monitor name, name: description,
//                    adapter_name: adapter name,
//                    is_primary: adapter has PRIMARY_DEVICE }
// ```
//
// The list is then handed to `MonitorList::reconcile`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::api::{DevModeFields, DisplayDeviceApi, DisplayDeviceFlags};
use crate::core::display::{DisplayComponent, Monitor, MonitorList, Reconciliation, VideoMode, DEFAULT_DPI};
use crate::core::error::{PalError, PalResult};
use crate::core::event_queue::EventQueue;
use crate::core::geometry::{Box2i, Vec2, Vec2i};
use crate::core::handle::{ComponentId, DisplayHandle};

//=== Constants ===========================================================

const COMPONENT: &str = "Win32DisplayComponent";

//=== Enumeration =========================================================

fn enumerate<A: DisplayDeviceApi>(api: &A) -> PalResult<Vec<Monitor>> {
    let mut monitors = Vec::new();

    for adapter in (0..).map_while(|index| api.adapter(index)) {
        if !adapter.state.contains(DisplayDeviceFlags::ACTIVE) {
            debug!(target: "pal::win32", "Skipping inactive adapter {}", adapter.name);
            continue;
        }

        let Some(settings) = api.current_settings(&adapter.name) else {
            warn!(target: "pal::win32", "No current settings for adapter {}, skipping", adapter.name);
            continue;
        };

        let native = api
            .monitor_for_adapter(&adapter.name)
            .map_err(|e| PalError::backend(COMPONENT, e))?;

        let resolution = Vec2i::new(
            i32::try_from(settings.width).unwrap_or(i32::MAX),
            i32::try_from(settings.height).unwrap_or(i32::MAX),
        );
        let work_area = native
            .map(|info| info.work_area)
            .unwrap_or_else(|| Box2i::from_origin_size(settings.position, resolution));

        let (dpi_x, dpi_y) = match native.map(|info| api.monitor_dpi(info.handle)) {
            Some(Ok((x, y))) => (x as f32, y as f32),
            Some(Err(e)) => {
                debug!(target: "pal::win32", "No DPI for {} ({}), assuming {}", adapter.name, e, DEFAULT_DPI);
                (DEFAULT_DPI, DEFAULT_DPI)
            }
            None => (DEFAULT_DPI, DEFAULT_DPI),
        };

        let is_primary = adapter.state.contains(DisplayDeviceFlags::PRIMARY_DEVICE);

        for device in (0..).map_while(|index| api.monitor(&adapter.name, index)) {
            monitors.push(Monitor {
                device_name: device.name,
                name: device.description,
                adapter_name: adapter.name.clone(),
                is_primary,
                position: settings.position,
                resolution,
                refresh_rate: settings.frequency as f32,
                work_area,
                dpi_x,
                dpi_y,
                native_id: native.map(|info| info.handle as u64).unwrap_or(0),
            });
        }
    }

    Ok(monitors)
}

//=== Win32DisplayComponent ===============================================

/// Win32 display backend.
pub struct Win32DisplayComponent<A: DisplayDeviceApi> {
    id: ComponentId,
    api: A,
    monitors: MonitorList,
}

impl<A: DisplayDeviceApi> Win32DisplayComponent<A> {
    /// Enables per-monitor DPI awareness and takes the first snapshot.
    ///
    /// A process whose awareness was already fixed (by a manifest or
    /// another toolkit) keeps it; that failure is logged, not returned.
    ///
    /// # Errors
    ///
    /// `PalError::Backend` if the monitor enumeration fails.
    pub fn new(mut api: A) -> PalResult<Self> {
        if let Err(e) = api.set_dpi_awareness() {
            warn!(target: "pal::win32", "Could not set per-monitor DPI awareness: {}", e);
        }

        let id = ComponentId::allocate();
        let mut monitors = MonitorList::new(id);
        monitors.reconcile(enumerate(&api)?);

        if monitors.primary().is_none() {
            warn!(target: "pal::win32", "Could not find the primary monitor");
        }
        info!(target: "pal::win32", "{} {} found {} display(s)", COMPONENT, id, monitors.len());

        Ok(Self { id, api, monitors })
    }

    /// The native API, for hosts that need raw device queries.
    pub fn api(&self) -> &A {
        &self.api
    }
}

impl<A: DisplayDeviceApi> DisplayComponent for Win32DisplayComponent<A> {
    fn component_name(&self) -> &'static str {
        COMPONENT
    }

    fn id(&self) -> ComponentId {
        self.id
    }

    fn monitors(&self) -> &MonitorList {
        &self.monitors
    }

    fn refresh(&mut self, queue: &mut EventQueue) -> PalResult<Reconciliation> {
        let changes = self.monitors.reconcile(enumerate(&self.api)?);
        if changes.primary_changed() {
            info!(target: "pal::win32", "New primary monitor: {:?}", changes.primary);
        }
        changes.raise_events(queue);
        Ok(changes)
    }

    /// Every mode the adapter lists, duplicates included.
    fn supported_video_modes(&self, display: DisplayHandle) -> PalResult<Vec<VideoMode>> {
        let adapter = &self.monitors.resolve(&display)?.adapter_name;

        (0..)
            .map_while(|index| self.api.settings(adapter, index).map(|mode| (index, mode)))
            .map(|(index, mode)| {
                if !mode.fields.contains(DevModeFields::REQUIRED) {
                    return Err(PalError::backend(
                        COMPONENT,
                        format!(
                            "adapter setting {} is missing required fields (dmFields={:#x}, required={:#x})",
                            index,
                            mode.fields.bits(),
                            DevModeFields::REQUIRED.bits()
                        ),
                    ));
                }
                VideoMode::checked(
                    COMPONENT,
                    i32::try_from(mode.width).unwrap_or(i32::MAX),
                    i32::try_from(mode.height).unwrap_or(i32::MAX),
                    mode.frequency as f32,
                    mode.bits_per_pel,
                )
            })
            .collect()
    }

    /// Live effective DPI; the snapshot value may be stale.
    ///
    /// Monitors without an `HMONITOR`, or whose live query fails, answer
    /// with the snapshot value.
    fn dpi(&self, display: DisplayHandle) -> PalResult<Vec2> {
        let monitor = self.monitors.resolve(&display)?;
        let snapshot = Vec2::new(monitor.dpi_x, monitor.dpi_y);

        if monitor.native_id == 0 {
            debug!(target: "pal::win32", "{} has no HMONITOR, using snapshot DPI", monitor.device_name);
            return Ok(snapshot);
        }

        match self.api.monitor_dpi(monitor.native_id as isize) {
            Ok((x, y)) => Ok(Vec2::new(x as f32, y as f32)),
            Err(e) => {
                debug!(
                    target: "pal::win32",
                    "GetDpiForMonitor failed for {} ({}), using snapshot DPI",
                    monitor.device_name,
                    e
                );
                Ok(snapshot)
            }
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_queue::{PlatformEvent, PlatformEventType};
    use crate::platform::win32::api::{DevMode, DisplayDevice, MonitorInfo};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    //=====================================================================
    // Fake GDI
    //=====================================================================

    struct FakeAdapter {
        device: DisplayDevice,
        monitors: Vec<DisplayDevice>,
        current: DevMode,
        modes: Vec<DevMode>,
        handle: Option<isize>,
    }

    #[derive(Default)]
    struct FakeGdi {
        adapters: Vec<FakeAdapter>,
        dpi: HashMap<isize, (u32, u32)>,
        awareness_calls: usize,
        awareness_error: Option<String>,
    }

    fn mode(width: u32, height: u32, frequency: u32) -> DevMode {
        DevMode {
            fields: DevModeFields::REQUIRED | DevModeFields::BITS_PER_PEL | DevModeFields::POSITION,
            position: Vec2i::ZERO,
            width,
            height,
            frequency,
            bits_per_pel: 32,
        }
    }

    fn adapter(index: u32, flags: DisplayDeviceFlags, monitor: &str, x: i32) -> FakeAdapter {
        let name = format!(r"\\.\DISPLAY{}", index);
        let mut current = mode(1920, 1080, 60);
        current.position = Vec2i::new(x, 0);
        FakeAdapter {
            monitors: vec![DisplayDevice {
                name: format!(r"{}\Monitor0", name),
                description: monitor.to_string(),
                state: DisplayDeviceFlags::ACTIVE,
            }],
            device: DisplayDevice {
                name,
                description: "Fake GPU".to_string(),
                state: flags,
            },
            current,
            modes: vec![mode(1920, 1080, 60), mode(1280, 720, 60), mode(1280, 720, 60)],
            handle: Some(100 + index as isize),
        }
    }

    impl FakeGdi {
        fn find(&self, adapter: &str) -> Option<&FakeAdapter> {
            self.adapters.iter().find(|a| a.device.name == adapter)
        }
    }

    impl DisplayDeviceApi for FakeGdi {
        fn set_dpi_awareness(&mut self) -> Result<(), String> {
            self.awareness_calls += 1;
            self.awareness_error.clone().map_or(Ok(()), Err)
        }

        fn adapter(&self, index: u32) -> Option<DisplayDevice> {
            self.adapters.get(index as usize).map(|a| a.device.clone())
        }

        fn monitor(&self, adapter: &str, index: u32) -> Option<DisplayDevice> {
            self.find(adapter).and_then(|a| a.monitors.get(index as usize).cloned())
        }

        fn current_settings(&self, adapter: &str) -> Option<DevMode> {
            self.find(adapter).map(|a| a.current)
        }

        fn settings(&self, adapter: &str, mode_index: u32) -> Option<DevMode> {
            self.find(adapter).and_then(|a| a.modes.get(mode_index as usize).copied())
        }

        fn monitor_for_adapter(&self, adapter: &str) -> Result<Option<MonitorInfo>, String> {
            Ok(self.find(adapter).and_then(|a| {
                a.handle.map(|handle| MonitorInfo {
                    handle,
                    work_area: Box2i::new(a.current.position.x, 0, a.current.position.x + 1920, 1040),
                })
            }))
        }

        fn monitor_dpi(&self, monitor: isize) -> Result<(u32, u32), String> {
            self.dpi.get(&monitor).copied().ok_or_else(|| "E_INVALIDARG".to_string())
        }
    }

    fn two_monitor_gdi() -> FakeGdi {
        FakeGdi {
            adapters: vec![
                adapter(1, DisplayDeviceFlags::ACTIVE, "Side Panel", 1920),
                adapter(2, DisplayDeviceFlags::ACTIVE | DisplayDeviceFlags::PRIMARY_DEVICE, "Main Panel", 0),
                adapter(3, DisplayDeviceFlags::empty(), "Unplugged", 3840),
            ],
            dpi: HashMap::from([(101, (96, 96)), (102, (120, 120))]),
            ..FakeGdi::default()
        }
    }

    //=====================================================================
    // Enumeration
    //=====================================================================

    #[test]
    fn construction_sets_awareness_and_orders_primary_first() {
        let displays = Win32DisplayComponent::new(two_monitor_gdi()).unwrap();

        assert_eq!(displays.api().awareness_calls, 1);
        assert_eq!(displays.display_count(), 2, "inactive adapters are skipped");

        let primary = displays.primary().unwrap();
        assert_eq!(displays.display(0), Ok(primary));
        assert_eq!(displays.name(primary).unwrap(), "Main Panel");
        assert_eq!(displays.adapter_name(primary).unwrap(), r"\\.\DISPLAY2");
        assert_eq!(displays.device_name(primary).unwrap(), r"\\.\DISPLAY2\Monitor0");
    }

    #[test]
    fn awareness_failure_is_not_fatal() {
        let _ = env_logger::builder().is_test(true).try_init();
        let gdi = FakeGdi {
            awareness_error: Some("E_ACCESSDENIED".to_string()),
            ..two_monitor_gdi()
        };
        assert!(Win32DisplayComponent::new(gdi).is_ok());
    }

    #[test]
    fn geometry_and_live_dpi() {
        let displays = Win32DisplayComponent::new(two_monitor_gdi()).unwrap();
        let primary = displays.primary().unwrap();
        let side = displays.find_display(r"\\.\DISPLAY1").unwrap();

        assert_eq!(displays.virtual_position(side), Ok(Vec2i::new(1920, 0)));
        assert_eq!(displays.work_area(side), Ok(Box2i::new(1920, 0, 3840, 1040)));
        assert_eq!(displays.refresh_rate(primary), Ok(60.0));
        assert_eq!(displays.display_scale(primary), Ok(Vec2::new(1.25, 1.25)));
        assert_eq!(displays.display_at(Vec2i::new(2000, 500)), Some(side));
    }

    #[test]
    fn failed_live_dpi_uses_snapshot() {
        let mut gdi = two_monitor_gdi();
        gdi.adapters[0].handle = Some(999);
        let mut displays = Win32DisplayComponent::new(gdi).unwrap();
        let side = displays.find_display(r"\\.\DISPLAY1").unwrap();
        displays.api.dpi.insert(999, (144, 144));
        assert_eq!(displays.dpi(side), Ok(Vec2::new(144.0, 144.0)));

        displays.api.dpi.clear();
        assert_eq!(displays.dpi(side), Ok(Vec2::new(DEFAULT_DPI, DEFAULT_DPI)));
    }

    #[test]
    fn adapter_without_monitor_handle_keeps_default_dpi() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut gdi = two_monitor_gdi();
        gdi.adapters[1].handle = None;
        let displays = Win32DisplayComponent::new(gdi).unwrap();
        let primary = displays.primary().unwrap();

        assert_eq!(displays.dpi(primary), Ok(Vec2::new(DEFAULT_DPI, DEFAULT_DPI)));
        assert_eq!(displays.display_scale(primary), Ok(Vec2::new(1.0, 1.0)));
        assert_eq!(displays.work_area(primary), Ok(Box2i::new(0, 0, 1920, 1080)));
    }

    //=====================================================================
    // Video modes
    //=====================================================================

    #[test]
    fn duplicate_modes_are_preserved() {
        let displays = Win32DisplayComponent::new(two_monitor_gdi()).unwrap();
        let primary = displays.primary().unwrap();

        let modes = displays.supported_video_modes(primary).unwrap();
        assert_eq!(modes.len(), 3);
        assert_eq!(modes[1], modes[2]);
        assert_eq!(displays.video_mode(primary).unwrap().width, 1920);
    }

    #[test]
    fn incomplete_modes_fail() {
        let mut gdi = two_monitor_gdi();
        gdi.adapters[1].modes[1].fields = DevModeFields::PELS_WIDTH | DevModeFields::PELS_HEIGHT;
        let displays = Win32DisplayComponent::new(gdi).unwrap();
        let primary = displays.primary().unwrap();

        let err = displays.supported_video_modes(primary).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("adapter setting 1"));
    }

    //=====================================================================
    // Reconciliation
    //=====================================================================

    #[test]
    fn primary_swap_keeps_handles_and_raises_event() {
        let mut displays = Win32DisplayComponent::new(two_monitor_gdi()).unwrap();
        let main = displays.primary().unwrap();
        let side = displays.display(1).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut queue = EventQueue::new();
        let sink = seen.clone();
        queue.subscribe(PlatformEventType::PrimaryDisplayChange, move |_, event| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });

        displays.api.adapters[0].device.state |= DisplayDeviceFlags::PRIMARY_DEVICE;
        displays.api.adapters[1].device.state -= DisplayDeviceFlags::PRIMARY_DEVICE;
        let changes = displays.refresh(&mut queue).unwrap();

        assert!(changes.added.is_empty() && changes.removed.is_empty());
        assert_eq!(displays.primary(), Ok(side));
        assert_eq!(displays.display(1), Ok(main));
        assert_eq!(
            *seen.borrow(),
            vec![PlatformEvent::PrimaryDisplayChange { display: Some(side), previous: Some(main) }]
        );
    }

    #[test]
    fn deactivated_adapter_is_removed() {
        let mut displays = Win32DisplayComponent::new(two_monitor_gdi()).unwrap();
        let side = displays.display(1).unwrap();

        displays.api.adapters[0].device.state = DisplayDeviceFlags::empty();
        let changes = displays.refresh(&mut EventQueue::new()).unwrap();

        assert_eq!(changes.removed.len(), 1);
        assert_eq!(changes.removed[0].handle, side);
        assert_eq!(displays.display_count(), 1);
        assert!(matches!(displays.resolution(side), Err(PalError::InvalidHandle(_))));
    }
}
