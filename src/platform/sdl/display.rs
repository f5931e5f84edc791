//=========================================================================
// SDL Display Component
//=========================================================================
//
// `DisplayComponent` over SDL's indexed display list.
//
// SDL exposes displays by index only, and index 0 is the primary one.
// Display names are used as device names; duplicate names get a `#n`
// suffix in enumeration order so every monitor has a distinct identity
// for reconciliation.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::video::{SdlRect, SdlVideo};
use crate::core::display::{DisplayComponent, Monitor, MonitorList, Reconciliation, VideoMode, DEFAULT_DPI};
use crate::core::error::{PalError, PalResult};
use crate::core::event_queue::EventQueue;
use crate::core::geometry::{Box2i, Vec2i};
use crate::core::handle::{ComponentId, DisplayHandle};

//=== Constants ===========================================================

const COMPONENT: &str = "SdlDisplayComponent";

//=== Helpers =============================================================

fn backend(message: String) -> PalError {
    PalError::backend(COMPONENT, message)
}

fn rect_box(rect: SdlRect) -> Box2i {
    Box2i::new(rect.x, rect.y, rect.x + rect.w, rect.y + rect.h)
}

/// Reads every display SDL currently reports, primary first.
fn enumerate<D: SdlVideo>(video: &D) -> PalResult<Vec<Monitor>> {
    let count = video.num_video_displays().map_err(backend)?;
    let adapter = video.driver_name();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut monitors = Vec::with_capacity(usize::try_from(count).unwrap_or(0));

    for index in 0..count {
        let name = video.display_name(index).map_err(backend)?;
        let bounds = video.display_bounds(index).map_err(backend)?;
        let usable = video.display_usable_bounds(index).map_err(backend)?;
        let mode = video.current_display_mode(index).map_err(backend)?;

        let (dpi_x, dpi_y) = match video.display_dpi(index) {
            Ok((_, horizontal, vertical)) => (horizontal, vertical),
            Err(e) => {
                debug!(target: "pal::sdl", "No DPI for display {} ({}), assuming {}", index, e, DEFAULT_DPI);
                (DEFAULT_DPI, DEFAULT_DPI)
            }
        };

        let occurrence = seen.entry(name.clone()).or_insert(0);
        *occurrence += 1;
        let device_name = if *occurrence == 1 {
            name.clone()
        } else {
            format!("{}#{}", name, occurrence)
        };

        monitors.push(Monitor {
            device_name,
            name,
            adapter_name: adapter.clone(),
            is_primary: index == 0,
            position: Vec2i::new(bounds.x, bounds.y),
            resolution: Vec2i::new(bounds.w, bounds.h),
            refresh_rate: mode.refresh_rate as f32,
            work_area: rect_box(usable),
            dpi_x,
            dpi_y,
            native_id: index as u64,
        });
    }

    Ok(monitors)
}

//=== SdlDisplayComponent =================================================

/// SDL2 display backend. Shares its driver with `SdlWindowComponent`.
pub struct SdlDisplayComponent<D: SdlVideo> {
    id: ComponentId,
    video: Rc<RefCell<D>>,
    monitors: MonitorList,
}

impl<D: SdlVideo> SdlDisplayComponent<D> {
    /// Takes the initial display snapshot.
    ///
    /// # Errors
    ///
    /// `PalError::Backend` if SDL cannot enumerate its displays.
    pub fn new(video: Rc<RefCell<D>>) -> PalResult<Self> {
        let id = ComponentId::allocate();
        let mut monitors = MonitorList::new(id);
        monitors.reconcile(enumerate(&*video.borrow())?);

        info!(target: "pal::sdl", "{} {} found {} display(s)", COMPONENT, id, monitors.len());
        Ok(Self { id, video, monitors })
    }

    /// Shared driver access; fails while the window component holds it
    /// exclusively (window mutators running from a callback).
    fn video(&self) -> PalResult<Ref<'_, D>> {
        self.video
            .try_borrow()
            .map_err(|_| PalError::InvalidOperation("SDL video driver is busy".to_string()))
    }

    fn index_of(&self, display: DisplayHandle) -> PalResult<i32> {
        let monitor = self.monitors.resolve(&display)?;
        i32::try_from(monitor.native_id)
            .map_err(|_| backend(format!("display index {} out of range", monitor.native_id)))
    }
}

impl<D: SdlVideo> DisplayComponent for SdlDisplayComponent<D> {
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
        let entries = enumerate(&*self.video()?)?;
        let changes = self.monitors.reconcile(entries);
        changes.raise_events(queue);
        Ok(changes)
    }

    fn supported_video_modes(&self, display: DisplayHandle) -> PalResult<Vec<VideoMode>> {
        let index = self.index_of(display)?;
        let video = self.video()?;
        let count = video.num_display_modes(index).map_err(backend)?;

        (0..count)
            .map(|mode_index| {
                let mode = video.display_mode(index, mode_index).map_err(backend)?;
                VideoMode::checked(COMPONENT, mode.w, mode.h, mode.refresh_rate as f32, mode.bits_per_pixel)
            })
            .collect()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_queue::{PlatformEvent, PlatformEventType};
    use crate::core::geometry::Vec2;
    use crate::platform::sdl::dummy::{DummyDisplay, DummyVideo};
    use crate::platform::sdl::video::SdlDisplayMode;

    fn two_screens() -> Rc<RefCell<DummyVideo>> {
        Rc::new(RefCell::new(DummyVideo::with_displays(vec![
            DummyDisplay::new("Built-in", 1920, 1080).with_dpi(144.0, 144.0),
            DummyDisplay::new("External", 2560, 1440).with_position(1920, 0).with_refresh_rate(144),
        ])))
    }

    #[test]
    fn snapshot_is_primary_first() {
        let displays = SdlDisplayComponent::new(two_screens()).unwrap();

        assert_eq!(displays.display_count(), 2);
        let primary = displays.primary().unwrap();
        assert_eq!(displays.display(0), Ok(primary));
        assert_eq!(displays.name(primary).unwrap(), "Built-in");
        assert_eq!(displays.adapter_name(primary).unwrap(), "dummy");
        assert_eq!(displays.display_scale(primary), Ok(Vec2::new(1.5, 1.5)));
    }

    #[test]
    fn geometry_comes_from_bounds() {
        let displays = SdlDisplayComponent::new(two_screens()).unwrap();
        let external = displays.display(1).unwrap();

        assert_eq!(displays.virtual_position(external), Ok(Vec2i::new(1920, 0)));
        assert_eq!(displays.resolution(external), Ok(Vec2i::new(2560, 1440)));
        assert_eq!(displays.work_area(external), Ok(Box2i::new(1920, 0, 4480, 1400)));
        assert_eq!(displays.refresh_rate(external), Ok(144.0));
        assert_eq!(displays.display_at(Vec2i::new(2000, 10)), Some(external));
    }

    #[test]
    fn duplicate_names_stay_distinct() {
        let video = Rc::new(RefCell::new(DummyVideo::with_displays(vec![
            DummyDisplay::new("Generic PnP Monitor", 1920, 1080),
            DummyDisplay::new("Generic PnP Monitor", 1920, 1080).with_position(1920, 0),
        ])));
        let displays = SdlDisplayComponent::new(video).unwrap();

        assert_eq!(displays.display_count(), 2);
        let second = displays.display(1).unwrap();
        assert_eq!(displays.device_name(second).unwrap(), "Generic PnP Monitor#2");
        assert_eq!(displays.name(second).unwrap(), "Generic PnP Monitor");
    }

    #[test]
    fn unplugging_raises_connection_events() {
        let video = two_screens();
        let mut displays = SdlDisplayComponent::new(video.clone()).unwrap();
        let external = displays.display(1).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut queue = EventQueue::new();
        let sink = seen.clone();
        queue.subscribe(PlatformEventType::DisplayConnection, move |_, event| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });

        video
            .borrow_mut()
            .set_displays(vec![DummyDisplay::new("Built-in", 1920, 1080).with_dpi(144.0, 144.0)]);
        let changes = displays.refresh(&mut queue).unwrap();

        assert_eq!(changes.removed.len(), 1);
        assert!(!changes.primary_changed());
        assert_eq!(
            *seen.borrow(),
            vec![PlatformEvent::DisplayConnection { display: external, connected: false }]
        );
        assert!(matches!(displays.name(external), Err(PalError::InvalidHandle(_))));
    }

    #[test]
    fn video_modes_are_listed_and_checked() {
        let video = Rc::new(RefCell::new(DummyVideo::with_displays(vec![DummyDisplay::new("Panel", 1280, 720)
            .with_modes(vec![
                SdlDisplayMode { bits_per_pixel: 32, w: 1280, h: 720, refresh_rate: 60 },
                SdlDisplayMode { bits_per_pixel: 32, w: 640, h: 480, refresh_rate: 60 },
            ])])));
        let displays = SdlDisplayComponent::new(video.clone()).unwrap();
        let panel = displays.primary().unwrap();

        let modes = displays.supported_video_modes(panel).unwrap();
        assert_eq!(modes.len(), 2);
        assert_eq!(modes[1].width, 640);
        assert_eq!(displays.supported_video_mode_count(panel), Ok(2));

        video.borrow_mut().set_displays(vec![DummyDisplay::new("Panel", 1280, 720)
            .with_modes(vec![SdlDisplayMode { bits_per_pixel: 32, w: 1280, h: 720, refresh_rate: 0 }])]);
        assert!(displays.supported_video_modes(panel).unwrap_err().is_fatal());
    }

    #[test]
    fn exclusively_held_driver_is_reported_not_panicked() {
        let video = two_screens();
        let displays = SdlDisplayComponent::new(video.clone()).unwrap();
        let primary = displays.primary().unwrap();

        let _held = video.borrow_mut();
        assert!(matches!(
            displays.supported_video_modes(primary),
            Err(PalError::InvalidOperation(_))
        ));
    }

    #[test]
    fn video_modes_cannot_be_set() {
        let mut displays = SdlDisplayComponent::new(two_screens()).unwrap();
        let primary = displays.primary().unwrap();
        let mode = displays.video_mode(primary).unwrap();

        assert!(!displays.can_set_video_mode());
        assert_eq!(
            displays.set_video_mode(primary, &mode),
            Err(PalError::UnsupportedOperation("set_video_mode"))
        );
    }
}
