//=========================================================================
// Monitor List & Reconciliation
//=========================================================================
//
// The display snapshot shared by every display backend.
//
// Reconciliation is a set-diff keyed by device name:
//
//   native enumeration ──> index[device_name] ─┬─ hit  → update in place
//                                              └─ miss → insert (added)
//   previous − seen ───────────────────────────────────→ removed
//   order = survivors (previous order) ++ added; primary → index 0
//
// Records live in a `SlotMap`; handles carry the generational key, so a
// removed monitor's handle never resolves again, even if a monitor with
// the same device name reconnects later.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use log::{info, warn};
use slotmap::{Key, KeyData, SlotMap};

//=== Internal Dependencies ===============================================

use crate::core::error::{PalError, PalResult};
use crate::core::event_queue::{EventQueue, PlatformEvent};
use crate::core::geometry::{Box2i, Vec2i};
use crate::core::handle::{ComponentId, DisplayHandle};

slotmap::new_key_type! {
    /// Generational key of a monitor record.
    pub(crate) struct MonitorKey;
}

//=== Monitor =============================================================

/// One physical monitor as last enumerated.
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    /// Backend-native stable identity (e.g. `\\.\DISPLAY1`).
    pub device_name: String,
    /// Human-readable name.
    pub name: String,
    pub adapter_name: String,
    pub is_primary: bool,
    /// Top-left corner in virtual desktop space.
    pub position: Vec2i,
    pub resolution: Vec2i,
    pub refresh_rate: f32,
    pub work_area: Box2i,
    pub dpi_x: f32,
    pub dpi_y: f32,
    /// Backend id (display index, HMONITOR, ...). Not an identity.
    pub native_id: u64,
}

impl Monitor {
    /// Virtual desktop rectangle covered by the monitor.
    pub fn bounds(&self) -> Box2i {
        Box2i::from_origin_size(self.position, self.resolution)
    }
}

//=== Reconciliation ======================================================

/// A monitor dropped by reconciliation. Its handle no longer resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct DisconnectedMonitor {
    pub handle: DisplayHandle,
    pub monitor: Monitor,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Newly connected monitors, in enumeration order.
    pub added: Vec<DisplayHandle>,
    pub removed: Vec<DisconnectedMonitor>,
    pub primary: Option<DisplayHandle>,
    pub previous_primary: Option<DisplayHandle>,
}

impl Reconciliation {
    pub fn primary_changed(&self) -> bool {
        self.primary != self.previous_primary
    }

    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && !self.primary_changed()
    }

    /// Raises `DisplayConnection` for every removal and addition, then
    /// `PrimaryDisplayChange` if the primary moved.
    pub fn raise_events(&self, queue: &mut EventQueue) {
        let removed = self.removed.iter().map(|gone| (gone.handle, false));
        let added = self.added.iter().map(|handle| (*handle, true));

        for (display, connected) in removed.chain(added) {
            if let Err(e) = queue.raise(None, PlatformEvent::DisplayConnection { display, connected }) {
                warn!(target: "pal::display", "{}", e);
            }
        }

        if self.primary_changed() {
            let event = PlatformEvent::PrimaryDisplayChange {
                display: self.primary,
                previous: self.previous_primary,
            };
            if let Err(e) = queue.raise(None, event) {
                warn!(target: "pal::display", "{}", e);
            }
        }
    }
}

//=== MonitorList =========================================================

/// Ordered monitor snapshot: primary first, unique device names.
pub struct MonitorList {
    owner: ComponentId,
    records: SlotMap<MonitorKey, Monitor>,
    index: HashMap<String, MonitorKey>,
    order: Vec<MonitorKey>,
}

impl MonitorList {
    pub fn new(owner: ComponentId) -> Self {
        Self {
            owner,
            records: SlotMap::with_key(),
            index: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    //--- Reconciliation ---------------------------------------------------

    /// Merges a fresh enumeration into the snapshot.
    ///
    /// `entries` must already exclude inactive adapters.
    pub fn reconcile<I>(&mut self, entries: I) -> Reconciliation
    where
        I: IntoIterator<Item = Monitor>,
    {
        let previous_primary = self.primary();
        let mut seen: HashSet<MonitorKey> = HashSet::new();
        let mut added = Vec::new();

        for entry in entries {
            match self.index.get(&entry.device_name).copied() {
                Some(key) if seen.contains(&key) => {
                    warn!(
                        target: "pal::display",
                        "Duplicate device name {} in enumeration, ignoring",
                        entry.device_name
                    );
                }
                Some(key) => {
                    if let Some(record) = self.records.get_mut(key) {
                        *record = entry;
                    }
                    seen.insert(key);
                }
                None => {
                    info!(target: "pal::display", "Monitor connected: {} ({})", entry.device_name, entry.name);
                    let name = entry.device_name.clone();
                    let key = self.records.insert(entry);
                    self.index.insert(name, key);
                    seen.insert(key);
                    added.push(key);
                }
            }
        }

        //--- Removals ---

        let mut removed = Vec::new();
        for key in self.order.iter().copied().filter(|key| !seen.contains(key)) {
            if let Some(monitor) = self.records.remove(key) {
                info!(target: "pal::display", "Monitor disconnected: {}", monitor.device_name);
                self.index.remove(&monitor.device_name);
                removed.push(DisconnectedMonitor {
                    handle: self.handle(key),
                    monitor,
                });
            }
        }

        self.order.retain(|key| seen.contains(key));
        self.order.extend(added.iter().copied());

        //--- Primary first ---

        self.promote_primary();
        let primary = self.primary();

        if primary != previous_primary {
            if let Some(monitor) = primary.and_then(|h| self.resolve(&h).ok()) {
                info!(target: "pal::display", "Primary monitor is now {}", monitor.device_name);
            }
        }

        Reconciliation {
            added: added.into_iter().map(|key| self.handle(key)).collect(),
            removed,
            primary,
            previous_primary,
        }
    }

    fn promote_primary(&mut self) {
        let mut primary_at = None;

        for (position, key) in self.order.iter().enumerate() {
            let Some(record) = self.records.get_mut(*key) else {
                continue;
            };
            if !record.is_primary {
                continue;
            }
            if primary_at.is_none() {
                primary_at = Some(position);
            } else {
                warn!(
                    target: "pal::display",
                    "{} also reported as primary, demoting",
                    record.device_name
                );
                record.is_primary = false;
            }
        }

        if let Some(position) = primary_at {
            let key = self.order.remove(position);
            self.order.insert(0, key);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Handle of the monitor at `index` (0 is the primary, if any).
    pub fn handle_at(&self, index: usize) -> Option<DisplayHandle> {
        self.order.get(index).map(|key| self.handle(*key))
    }

    pub fn primary(&self) -> Option<DisplayHandle> {
        let key = *self.order.first()?;
        let record = self.records.get(key)?;
        record.is_primary.then(|| self.handle(key))
    }

    /// Looks a monitor up by device name, then by adapter name.
    pub fn find(&self, name: &str) -> Option<DisplayHandle> {
        if let Some(key) = self.index.get(name) {
            return Some(self.handle(*key));
        }
        self.iter()
            .find(|(_, monitor)| monitor.adapter_name == name)
            .map(|(handle, _)| handle)
    }

    /// First monitor whose bounds contain `point`.
    pub fn at(&self, point: Vec2i) -> Option<DisplayHandle> {
        self.iter()
            .find(|(_, monitor)| monitor.bounds().contains(point))
            .map(|(handle, _)| handle)
    }

    /// Monitors in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (DisplayHandle, &Monitor)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.records.get(*key).map(|record| (self.handle(*key), record)))
    }

    /// Owner-checked access to a monitor record.
    pub fn resolve(&self, handle: &DisplayHandle) -> PalResult<&Monitor> {
        let raw = handle.resolve(self.owner)?;
        let key = MonitorKey::from(KeyData::from_ffi(raw));
        self.records
            .get(key)
            .ok_or_else(|| PalError::InvalidHandle(format!("display {:?} was disconnected", handle)))
    }

    fn handle(&self, key: MonitorKey) -> DisplayHandle {
        DisplayHandle::new(self.owner, key.data().as_ffi())
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_queue::PlatformEventType;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn monitor(device: &str, primary: bool) -> Monitor {
        Monitor {
            device_name: device.to_string(),
            name: format!("Generic {}", device),
            adapter_name: format!("Adapter {}", device),
            is_primary: primary,
            position: Vec2i::ZERO,
            resolution: Vec2i::new(1920, 1080),
            refresh_rate: 60.0,
            work_area: Box2i::new(0, 0, 1920, 1040),
            dpi_x: 96.0,
            dpi_y: 96.0,
            native_id: 0,
        }
    }

    fn device_names(list: &MonitorList) -> Vec<String> {
        list.iter().map(|(_, m)| m.device_name.clone()).collect()
    }

    //=====================================================================
    // Reconciliation
    //=====================================================================

    #[test]
    fn first_pass_adds_everything() {
        let mut list = MonitorList::new(ComponentId::allocate());
        let result = list.reconcile(vec![monitor("DISPLAY1", true), monitor("DISPLAY2", false)]);

        assert_eq!(result.added.len(), 2);
        assert!(result.removed.is_empty());
        assert_eq!(result.previous_primary, None);
        assert!(result.primary_changed());
        assert_eq!(device_names(&list), vec!["DISPLAY1", "DISPLAY2"]);
    }

    #[test]
    fn removal_is_detected() {
        let mut list = MonitorList::new(ComponentId::allocate());
        list.reconcile(vec![monitor("DISPLAY1", true), monitor("DISPLAY2", false)]);
        let display2 = list.find("DISPLAY2").unwrap();

        let result = list.reconcile(vec![monitor("DISPLAY1", true)]);

        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.removed[0].handle, display2);
        assert_eq!(result.removed[0].monitor.device_name, "DISPLAY2");
        assert!(result.added.is_empty());
        assert!(!result.primary_changed());
        assert_eq!(device_names(&list), vec!["DISPLAY1"]);
        assert!(matches!(list.resolve(&display2), Err(PalError::InvalidHandle(_))));
    }

    #[test]
    fn addition_with_new_primary_reorders() {
        let mut list = MonitorList::new(ComponentId::allocate());
        list.reconcile(vec![monitor("DISPLAY1", true)]);
        let display1 = list.primary().unwrap();

        let result = list.reconcile(vec![monitor("DISPLAY1", false), monitor("DISPLAY2", true)]);

        assert_eq!(result.added.len(), 1);
        assert_eq!(device_names(&list), vec!["DISPLAY2", "DISPLAY1"]);
        assert!(result.primary_changed());
        assert_eq!(result.previous_primary, Some(display1));
        assert_eq!(result.primary, Some(result.added[0]));
    }

    #[test]
    fn identity_survives_field_changes() {
        let mut list = MonitorList::new(ComponentId::allocate());
        list.reconcile(vec![monitor("DISPLAY1", true)]);
        let handle = list.primary().unwrap();

        let mut changed = monitor("DISPLAY1", true);
        changed.resolution = Vec2i::new(2560, 1440);
        changed.refresh_rate = 144.0;
        let result = list.reconcile(vec![changed]);

        assert!(result.is_unchanged());
        let record = list.resolve(&handle).unwrap();
        assert_eq!(record.resolution, Vec2i::new(2560, 1440));
        assert_eq!(record.refresh_rate, 144.0);
    }

    #[test]
    fn survivors_keep_relative_order() {
        let mut list = MonitorList::new(ComponentId::allocate());
        list.reconcile(vec![monitor("A", false), monitor("B", false), monitor("C", false)]);

        list.reconcile(vec![monitor("D", false), monitor("C", false), monitor("A", false)]);

        assert_eq!(device_names(&list), vec!["A", "C", "D"]);
        assert_eq!(list.primary(), None);
    }

    #[test]
    fn duplicate_device_names_are_ignored() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut list = MonitorList::new(ComponentId::allocate());

        let result = list.reconcile(vec![monitor("A", true), monitor("A", false), monitor("B", false)]);

        assert_eq!(result.added.len(), 2);
        assert_eq!(device_names(&list), vec!["A", "B"]);
        assert!(list.resolve(&list.find("A").unwrap()).unwrap().is_primary);
    }

    #[test]
    fn extra_primaries_are_demoted() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut list = MonitorList::new(ComponentId::allocate());

        list.reconcile(vec![monitor("A", false), monitor("B", true), monitor("C", true)]);

        assert_eq!(device_names(&list), vec!["B", "A", "C"]);
        let primaries = list.iter().filter(|(_, m)| m.is_primary).count();
        assert_eq!(primaries, 1);
    }

    #[test]
    fn reconnected_monitor_gets_a_fresh_handle() {
        let mut list = MonitorList::new(ComponentId::allocate());
        list.reconcile(vec![monitor("A", true), monitor("B", false)]);
        let old = list.find("B").unwrap();

        list.reconcile(vec![monitor("A", true)]);
        list.reconcile(vec![monitor("A", true), monitor("B", false)]);
        let new = list.find("B").unwrap();

        assert_ne!(old, new);
        assert!(list.resolve(&old).is_err());
        assert!(list.resolve(&new).is_ok());
    }

    //=====================================================================
    // Queries
    //=====================================================================

    #[test]
    fn find_matches_adapter_name() {
        let mut list = MonitorList::new(ComponentId::allocate());
        list.reconcile(vec![monitor("A", true)]);

        assert_eq!(list.find("Adapter A"), list.find("A"));
        assert_eq!(list.find("nope"), None);
    }

    #[test]
    fn at_finds_monitor_by_point() {
        let mut list = MonitorList::new(ComponentId::allocate());
        let mut right = monitor("RIGHT", false);
        right.position = Vec2i::new(1920, 0);
        list.reconcile(vec![monitor("LEFT", true), right]);

        assert_eq!(list.at(Vec2i::new(2000, 10)), list.find("RIGHT"));
        assert_eq!(list.at(Vec2i::new(10, 10)), list.find("LEFT"));
        assert_eq!(list.at(Vec2i::new(-5, 10)), None);
    }

    #[test]
    fn foreign_handles_do_not_resolve() {
        let mut ours = MonitorList::new(ComponentId::allocate());
        let mut theirs = MonitorList::new(ComponentId::allocate());
        ours.reconcile(vec![monitor("A", true)]);
        theirs.reconcile(vec![monitor("A", true)]);

        let foreign = theirs.primary().unwrap();
        assert!(matches!(ours.resolve(&foreign), Err(PalError::InvalidHandle(_))));
    }

    //=====================================================================
    // Event surfacing
    //=====================================================================

    #[test]
    fn raise_events_reports_connections_and_primary() {
        let mut list = MonitorList::new(ComponentId::allocate());
        list.reconcile(vec![monitor("A", true), monitor("B", false)]);
        let result = list.reconcile(vec![monitor("B", true), monitor("C", false)]);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut queue = EventQueue::new();
        for kind in [PlatformEventType::DisplayConnection, PlatformEventType::PrimaryDisplayChange] {
            let sink = seen.clone();
            queue.subscribe(kind, move |_, event| {
                sink.borrow_mut().push(event.clone());
                Ok(())
            });
        }

        result.raise_events(&mut queue);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(matches!(seen[0], PlatformEvent::DisplayConnection { connected: false, .. }));
        assert!(matches!(seen[1], PlatformEvent::DisplayConnection { connected: true, .. }));
        assert!(matches!(
            seen[2],
            PlatformEvent::PrimaryDisplayChange { previous: Some(_), .. }
        ));
    }

    #[test]
    fn losing_the_only_primary_is_raised() {
        let mut list = MonitorList::new(ComponentId::allocate());
        list.reconcile(vec![monitor("A", true), monitor("B", false)]);
        let a = list.find("A").unwrap();
        let result = list.reconcile(vec![monitor("B", false)]);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut queue = EventQueue::new();
        let sink = seen.clone();
        queue.subscribe(PlatformEventType::PrimaryDisplayChange, move |_, event| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });

        result.raise_events(&mut queue);

        assert_eq!(list.primary(), None);
        assert_eq!(
            *seen.borrow(),
            vec![PlatformEvent::PrimaryDisplayChange { display: None, previous: Some(a) }]
        );
    }
}
