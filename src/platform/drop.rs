//=========================================================================
// Drag-and-Drop Accumulator
//=========================================================================
//
// Collapses a native Begin / File* / Complete sequence into the single
// path list carried by `PlatformEvent::FileDrop`.
//
//   begin()      → open (clears paths unless a drop is already open)
//   push(path)   → append, opening an implicit drop if needed
//   complete()   → take the paths in arrival order, close
//   cancel()     → discard, close
//
// One accumulator per window component; native backends never interleave
// drops on different windows.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use log::debug;

//=== DropAccumulator =====================================================

#[derive(Debug, Default)]
pub(crate) struct DropAccumulator {
    paths: Vec<PathBuf>,
    open: bool,
}

impl DropAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin(&mut self) {
        if self.open {
            debug!(
                target: "pal::events",
                "Drop begin while a drop is open, keeping {} pending path(s)",
                self.paths.len()
            );
        } else {
            self.paths.clear();
        }
        self.open = true;
    }

    pub(crate) fn push(&mut self, path: PathBuf) {
        if !self.open {
            debug!(target: "pal::events", "Dropped file without drop begin, starting implicit drop");
            self.open = true;
        }
        self.paths.push(path);
    }

    /// Closes the drop and returns its paths; the accumulator is empty
    /// afterwards.
    pub(crate) fn complete(&mut self) -> Vec<PathBuf> {
        self.open = false;
        std::mem::take(&mut self.paths)
    }

    pub(crate) fn cancel(&mut self) {
        if !self.paths.is_empty() {
            debug!(target: "pal::events", "Drop cancelled, discarding {} path(s)", self.paths.len());
        }
        self.open = false;
        self.paths.clear();
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn len(&self) -> usize {
        self.paths.len()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_drop_keeps_arrival_order() {
        let mut drops = DropAccumulator::new();
        drops.begin();
        drops.push("c".into());
        drops.push("a".into());
        drops.push("b".into());

        let paths = drops.complete();

        assert_eq!(paths, vec![PathBuf::from("c"), PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(drops.len(), 0);
        assert!(!drops.is_open());
    }

    #[test]
    fn file_without_begin_opens_implicit_drop() {
        let mut drops = DropAccumulator::new();
        drops.push("x".into());

        assert!(drops.is_open());
        assert_eq!(drops.complete(), vec![PathBuf::from("x")]);
    }

    #[test]
    fn second_begin_keeps_pending_paths() {
        let mut drops = DropAccumulator::new();
        drops.begin();
        drops.push("first".into());
        drops.begin();
        drops.push("second".into());

        assert_eq!(drops.complete(), vec![PathBuf::from("first"), PathBuf::from("second")]);
    }

    #[test]
    fn complete_without_files_is_empty() {
        let mut drops = DropAccumulator::new();
        drops.begin();
        assert!(drops.complete().is_empty());
    }

    #[test]
    fn cancel_discards_paths() {
        let mut drops = DropAccumulator::new();
        drops.push("gone".into());
        drops.cancel();

        assert!(!drops.is_open());
        assert!(drops.complete().is_empty());
    }
}
