//=========================================================================
// Handle Registry
//=========================================================================
//
// Opaque, owner-tagged handles for every object that crosses the PAL
// boundary (windows, displays, icons, cursors).
//
// Architecture:
//   Component ──issues──> Handle<K> { owner, raw }
//                              ↓
//   Component <──resolve(owner)── caller passes handle back
//                              ↓
//   HandleTable<K, T>: raw → backend record (sole admission point)
//
// A handle is only ever resolved by the component that issued it. The
// owner check replaces runtime downcasting of backend objects.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};

//=== Internal Dependencies ===============================================

use super::error::{PalError, PalResult};

//=== ComponentId =========================================================

static NEXT_COMPONENT_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of a component instance.
///
/// Ids are never reused, so a handle from a dropped component can never
/// alias a handle of a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(NonZeroU32);

impl ComponentId {
    /// Allocates a fresh id.
    pub fn allocate() -> Self {
        let raw = NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed);
        // Counter starts at 1 and would need 2^32 components to wrap.
        Self(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MIN))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== Handle Kinds ========================================================

/// Zero-sized tag distinguishing handle families at compile time.
pub trait HandleKind: 'static {
    const NAME: &'static str;
}

/// Tag for [`WindowHandle`].
#[derive(Debug)]
pub enum WindowKind {}

/// Tag for [`DisplayHandle`].
#[derive(Debug)]
pub enum DisplayKind {}

/// Tag for [`IconHandle`].
#[derive(Debug)]
pub enum IconKind {}

/// Tag for [`CursorHandle`].
#[derive(Debug)]
pub enum CursorKind {}

impl HandleKind for WindowKind {
    const NAME: &'static str = "window";
}

impl HandleKind for DisplayKind {
    const NAME: &'static str = "display";
}

impl HandleKind for IconKind {
    const NAME: &'static str = "icon";
}

impl HandleKind for CursorKind {
    const NAME: &'static str = "cursor";
}

//=== Handle ==============================================================

/// Opaque reference to a backend-owned object.
///
/// Two handles are equal only if they share both the owning component
/// and the native id.
pub struct Handle<K: HandleKind> {
    owner: ComponentId,
    raw: u64,
    _kind: PhantomData<fn() -> K>,
}

pub type WindowHandle = Handle<WindowKind>;
pub type DisplayHandle = Handle<DisplayKind>;
pub type IconHandle = Handle<IconKind>;
pub type CursorHandle = Handle<CursorKind>;

impl<K: HandleKind> Handle<K> {
    pub(crate) fn new(owner: ComponentId, raw: u64) -> Self {
        Self {
            owner,
            raw,
            _kind: PhantomData,
        }
    }

    /// Component that issued this handle.
    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    /// Backend-native id (window id, slot key, ...).
    pub fn raw(&self) -> u64 {
        self.raw
    }

    /// Returns the native id iff `expected` issued this handle.
    pub fn resolve(&self, expected: ComponentId) -> PalResult<u64> {
        if self.owner == expected {
            Ok(self.raw)
        } else {
            Err(PalError::InvalidHandle(format!(
                "{} handle {} belongs to component {}, not {}",
                K::NAME,
                self.raw,
                self.owner,
                expected
            )))
        }
    }
}

impl<K: HandleKind> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: HandleKind> Copy for Handle<K> {}

impl<K: HandleKind> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.raw == other.raw
    }
}

impl<K: HandleKind> Eq for Handle<K> {}

impl<K: HandleKind> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.raw.hash(state);
    }
}

impl<K: HandleKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}:{})", K::NAME, self.owner, self.raw)
    }
}

//=== HandleTable =========================================================

/// Maps the raw ids of one component's handles to backend records.
///
/// Every access goes through the owner check, so a foreign handle can
/// never reach a record even if its raw id happens to collide.
pub(crate) struct HandleTable<K: HandleKind, T> {
    owner: ComponentId,
    entries: HashMap<u64, T>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: HandleKind, T> HandleTable<K, T> {
    pub(crate) fn new(owner: ComponentId) -> Self {
        Self {
            owner,
            entries: HashMap::new(),
            _kind: PhantomData,
        }
    }

    pub(crate) fn owner(&self) -> ComponentId {
        self.owner
    }

    /// Registers `record` under `raw` and issues its handle.
    pub(crate) fn insert(&mut self, raw: u64, record: T) -> Handle<K> {
        self.entries.insert(raw, record);
        Handle::new(self.owner, raw)
    }

    pub(crate) fn resolve(&self, handle: &Handle<K>) -> PalResult<&T> {
        let raw = handle.resolve(self.owner)?;
        self.entries.get(&raw).ok_or_else(|| Self::missing(raw))
    }

    pub(crate) fn resolve_mut(&mut self, handle: &Handle<K>) -> PalResult<&mut T> {
        let raw = handle.resolve(self.owner)?;
        self.entries.get_mut(&raw).ok_or_else(|| Self::missing(raw))
    }

    pub(crate) fn remove(&mut self, handle: &Handle<K>) -> PalResult<T> {
        let raw = handle.resolve(self.owner)?;
        self.entries.remove(&raw).ok_or_else(|| Self::missing(raw))
    }

    /// Lookup by native id, for native callbacks that only know the id.
    pub(crate) fn get_raw(&self, raw: u64) -> Option<&T> {
        self.entries.get(&raw)
    }

    pub(crate) fn get_raw_mut(&mut self, raw: u64) -> Option<&mut T> {
        self.entries.get_mut(&raw)
    }

    /// Issues the handle for an already registered native id.
    pub(crate) fn handle_for(&self, raw: u64) -> Option<Handle<K>> {
        self.entries
            .contains_key(&raw)
            .then(|| Handle::new(self.owner, raw))
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.entries.values_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn missing(raw: u64) -> PalError {
        PalError::InvalidHandle(format!("{} {} does not exist", K::NAME, raw))
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_ids_are_unique() {
        let a = ComponentId::allocate();
        let b = ComponentId::allocate();
        assert_ne!(a, b);
    }

    #[test]
    fn handles_compare_by_owner_and_raw() {
        let a = ComponentId::allocate();
        let b = ComponentId::allocate();

        assert_eq!(WindowHandle::new(a, 7), WindowHandle::new(a, 7));
        assert_ne!(WindowHandle::new(a, 7), WindowHandle::new(a, 8));
        assert_ne!(WindowHandle::new(a, 7), WindowHandle::new(b, 7));
    }

    #[test]
    fn resolve_rejects_foreign_owner() {
        let a = ComponentId::allocate();
        let b = ComponentId::allocate();
        let handle = DisplayHandle::new(a, 1);

        assert_eq!(handle.resolve(a), Ok(1));
        assert!(matches!(handle.resolve(b), Err(PalError::InvalidHandle(_))));
    }

    #[test]
    fn table_isolates_components_with_colliding_ids() {
        let mut left: HandleTable<WindowKind, &str> = HandleTable::new(ComponentId::allocate());
        let mut right: HandleTable<WindowKind, &str> = HandleTable::new(ComponentId::allocate());

        let from_left = left.insert(1, "left");
        let from_right = right.insert(1, "right");

        assert_eq!(left.resolve(&from_left), Ok(&"left"));
        assert!(matches!(left.resolve(&from_right), Err(PalError::InvalidHandle(_))));
        assert!(matches!(right.resolve(&from_left), Err(PalError::InvalidHandle(_))));
    }

    #[test]
    fn removed_entries_no_longer_resolve() {
        let mut table: HandleTable<IconKind, u8> = HandleTable::new(ComponentId::allocate());
        let handle = table.insert(3, 42);

        assert_eq!(table.remove(&handle), Ok(42));
        assert!(matches!(table.resolve(&handle), Err(PalError::InvalidHandle(_))));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn debug_format_names_kind() {
        let owner = ComponentId::allocate();
        let handle = CursorHandle::new(owner, 5);
        assert!(format!("{:?}", handle).starts_with("cursor("));
    }
}
