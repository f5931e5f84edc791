//=========================================================================
// Display Component
//=========================================================================
//
// Monitor enumeration and video-mode queries.
//
// Components:
// - `monitors`: the primary-first snapshot and its reconciliation
// - `DisplayComponent`: the per-backend trait; every per-monitor query
//   has a default that reads the snapshot, so backends only provide
//   enumeration and video modes
//
// Reconciliation runs when the component is built and whenever the host
// calls `refresh`, typically after a `DisplayChange` event.
//
//=========================================================================

//=== Module Declarations =================================================

mod monitors;

//=== Public API ==========================================================

pub use monitors::{DisconnectedMonitor, Monitor, MonitorList, Reconciliation};

//=== Internal Dependencies ===============================================

use super::error::{PalError, PalResult};
use super::event_queue::EventQueue;
use super::geometry::{Box2i, Vec2, Vec2i};
use super::handle::{ComponentId, DisplayHandle};

//=== Constants ===========================================================

/// Reference DPI for a scale factor of 1.0.
pub const DEFAULT_DPI: f32 = 96.0;

//=== VideoMode ===========================================================

/// One display mode. Width, height and refresh rate are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMode {
    pub width: i32,
    pub height: i32,
    pub refresh_rate: f32,
    pub bits_per_pixel: u32,
}

impl VideoMode {
    /// Builds a mode, rejecting entries with a missing required field.
    pub fn checked(
        component: &'static str,
        width: i32,
        height: i32,
        refresh_rate: f32,
        bits_per_pixel: u32,
    ) -> PalResult<Self> {
        if width <= 0 || height <= 0 || refresh_rate <= 0.0 {
            return Err(PalError::backend(
                component,
                format!(
                    "video mode {}x{}@{} is missing a required field",
                    width, height, refresh_rate
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            refresh_rate,
            bits_per_pixel,
        })
    }
}

//=== DisplayComponent ====================================================

/// Monitor enumeration for one backend.
pub trait DisplayComponent {
    //--- Backend hooks ----------------------------------------------------

    fn component_name(&self) -> &'static str;

    fn id(&self) -> ComponentId;

    /// Current snapshot.
    fn monitors(&self) -> &MonitorList;

    /// Re-enumerates, reconciles and raises `DisplayConnection` /
    /// `PrimaryDisplayChange` on `queue`.
    fn refresh(&mut self, queue: &mut EventQueue) -> PalResult<Reconciliation>;

    /// Every mode the monitor's adapter reports, duplicates included.
    fn supported_video_modes(&self, display: DisplayHandle) -> PalResult<Vec<VideoMode>>;

    //--- Capabilities -----------------------------------------------------

    fn can_get_virtual_position(&self) -> bool {
        true
    }

    fn can_set_video_mode(&self) -> bool {
        false
    }

    fn set_video_mode(&mut self, _display: DisplayHandle, _mode: &VideoMode) -> PalResult<()> {
        Err(PalError::UnsupportedOperation("set_video_mode"))
    }

    //--- Enumeration ------------------------------------------------------

    fn display_count(&self) -> usize {
        self.monitors().len()
    }

    /// Monitor at `index`; index 0 is the primary monitor.
    fn display(&self, index: usize) -> PalResult<DisplayHandle> {
        self.monitors().handle_at(index).ok_or_else(|| {
            PalError::InvalidArgument(format!(
                "display index {} out of range ({} connected)",
                index,
                self.display_count()
            ))
        })
    }

    fn primary(&self) -> PalResult<DisplayHandle> {
        self.monitors()
            .primary()
            .or_else(|| self.monitors().handle_at(0))
            .ok_or_else(|| PalError::InvalidOperation("no display connected".to_string()))
    }

    /// Looks up a monitor by device name or adapter name.
    fn find_display(&self, name: &str) -> Option<DisplayHandle> {
        self.monitors().find(name)
    }

    /// Monitor containing `point` (virtual desktop space).
    fn display_at(&self, point: Vec2i) -> Option<DisplayHandle> {
        self.monitors().at(point)
    }

    //--- Per-monitor queries ----------------------------------------------

    fn is_primary(&self, display: DisplayHandle) -> PalResult<bool> {
        Ok(self.monitors().resolve(&display)?.is_primary)
    }

    fn name(&self, display: DisplayHandle) -> PalResult<String> {
        Ok(self.monitors().resolve(&display)?.name.clone())
    }

    fn device_name(&self, display: DisplayHandle) -> PalResult<String> {
        Ok(self.monitors().resolve(&display)?.device_name.clone())
    }

    fn adapter_name(&self, display: DisplayHandle) -> PalResult<String> {
        Ok(self.monitors().resolve(&display)?.adapter_name.clone())
    }

    /// Mode the monitor is currently running in.
    fn video_mode(&self, display: DisplayHandle) -> PalResult<VideoMode> {
        let monitor = self.monitors().resolve(&display)?;
        VideoMode::checked(
            self.component_name(),
            monitor.resolution.x,
            monitor.resolution.y,
            monitor.refresh_rate,
            32,
        )
    }

    fn supported_video_mode_count(&self, display: DisplayHandle) -> PalResult<usize> {
        Ok(self.supported_video_modes(display)?.len())
    }

    fn virtual_position(&self, display: DisplayHandle) -> PalResult<Vec2i> {
        if !self.can_get_virtual_position() {
            return Err(PalError::UnsupportedOperation("virtual_position"));
        }
        Ok(self.monitors().resolve(&display)?.position)
    }

    fn resolution(&self, display: DisplayHandle) -> PalResult<Vec2i> {
        Ok(self.monitors().resolve(&display)?.resolution)
    }

    fn work_area(&self, display: DisplayHandle) -> PalResult<Box2i> {
        Ok(self.monitors().resolve(&display)?.work_area)
    }

    fn refresh_rate(&self, display: DisplayHandle) -> PalResult<f32> {
        Ok(self.monitors().resolve(&display)?.refresh_rate)
    }

    fn dpi(&self, display: DisplayHandle) -> PalResult<Vec2> {
        let monitor = self.monitors().resolve(&display)?;
        Ok(Vec2::new(monitor.dpi_x, monitor.dpi_y))
    }

    /// Scale factor relative to [`DEFAULT_DPI`].
    fn display_scale(&self, display: DisplayHandle) -> PalResult<Vec2> {
        let dpi = self.dpi(display)?;
        Ok(Vec2::new(dpi.x / DEFAULT_DPI, dpi.y / DEFAULT_DPI))
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDisplays {
        id: ComponentId,
        monitors: MonitorList,
    }

    impl FixedDisplays {
        fn new(entries: Vec<Monitor>) -> Self {
            let id = ComponentId::allocate();
            let mut monitors = MonitorList::new(id);
            monitors.reconcile(entries);
            Self { id, monitors }
        }
    }

    impl DisplayComponent for FixedDisplays {
        fn component_name(&self) -> &'static str {
            "FixedDisplays"
        }

        fn id(&self) -> ComponentId {
            self.id
        }

        fn monitors(&self) -> &MonitorList {
            &self.monitors
        }

        fn refresh(&mut self, _queue: &mut EventQueue) -> PalResult<Reconciliation> {
            Ok(Reconciliation::default())
        }

        fn supported_video_modes(&self, display: DisplayHandle) -> PalResult<Vec<VideoMode>> {
            self.monitors.resolve(&display)?;
            Ok(vec![
                VideoMode::checked("FixedDisplays", 800, 600, 60.0, 32)?,
                VideoMode::checked("FixedDisplays", 800, 600, 60.0, 32)?,
            ])
        }
    }

    fn monitor(device: &str, primary: bool, dpi: f32) -> Monitor {
        Monitor {
            device_name: device.to_string(),
            name: device.to_lowercase(),
            adapter_name: "gpu0".to_string(),
            is_primary: primary,
            position: Vec2i::ZERO,
            resolution: Vec2i::new(1280, 720),
            refresh_rate: 75.0,
            work_area: Box2i::new(0, 0, 1280, 690),
            dpi_x: dpi,
            dpi_y: dpi,
            native_id: 0,
        }
    }

    #[test]
    fn index_zero_is_primary() {
        let displays = FixedDisplays::new(vec![monitor("B", false, 96.0), monitor("A", true, 96.0)]);

        assert_eq!(displays.display_count(), 2);
        assert_eq!(displays.display(0).unwrap(), displays.primary().unwrap());
        assert!(displays.is_primary(displays.display(0).unwrap()).unwrap());
        assert!(matches!(displays.display(2), Err(PalError::InvalidArgument(_))));
    }

    #[test]
    fn primary_falls_back_to_first_monitor() {
        let displays = FixedDisplays::new(vec![monitor("A", false, 96.0)]);
        assert_eq!(displays.primary().unwrap(), displays.display(0).unwrap());

        let empty = FixedDisplays::new(Vec::new());
        assert!(matches!(empty.primary(), Err(PalError::InvalidOperation(_))));
    }

    #[test]
    fn current_mode_comes_from_snapshot() {
        let displays = FixedDisplays::new(vec![monitor("A", true, 96.0)]);
        let mode = displays.video_mode(displays.primary().unwrap()).unwrap();

        assert_eq!((mode.width, mode.height), (1280, 720));
        assert_eq!(mode.refresh_rate, 75.0);
    }

    #[test]
    fn mode_count_matches_mode_list() {
        let displays = FixedDisplays::new(vec![monitor("A", true, 96.0)]);
        let display = displays.primary().unwrap();

        let modes = displays.supported_video_modes(display).unwrap();
        assert_eq!(displays.supported_video_mode_count(display).unwrap(), modes.len());
        assert_eq!(modes[0], modes[1], "duplicates are preserved");
    }

    #[test]
    fn incomplete_mode_is_a_backend_error() {
        for (w, h, hz) in [(0, 600, 60.0), (800, 0, 60.0), (800, 600, 0.0)] {
            let err = VideoMode::checked("test", w, h, hz, 32).unwrap_err();
            assert!(err.is_fatal());
        }
    }

    #[test]
    fn scale_is_relative_to_default_dpi() {
        let displays = FixedDisplays::new(vec![monitor("A", true, 144.0)]);
        let scale = displays.display_scale(displays.primary().unwrap()).unwrap();
        assert_eq!(scale, Vec2::new(1.5, 1.5));
    }

    #[test]
    fn setting_video_modes_is_unsupported() {
        let mut displays = FixedDisplays::new(vec![monitor("A", true, 96.0)]);
        let display = displays.primary().unwrap();
        let mode = displays.video_mode(display).unwrap();

        assert!(!displays.can_set_video_mode());
        assert_eq!(
            displays.set_video_mode(display, &mode),
            Err(PalError::UnsupportedOperation("set_video_mode"))
        );
    }
}
