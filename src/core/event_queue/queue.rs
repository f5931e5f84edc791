//=========================================================================
// Event Queue
//=========================================================================
//
// Same-thread synchronous fan-out of canonical events.
//
// Architecture:
//   Backend pump → raise(window, event) → listeners[event.kind()]
//                                            ↓ (registration order)
//                                   listener 1, listener 2, ...
//                                            ↓
//   Backend pump ← Ok / DispatchError (all listeners already ran)
//
// Pattern: subscribe → raise (N listeners, in order) → unsubscribe
//
// No buffering, no reordering, no cross-thread delivery. Listeners are
// boxed `FnMut` closures, so the queue is `!Send` and stays on the
// thread that pumps the backends.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::error::Error as StdError;

use log::error;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::event::{PlatformEvent, PlatformEventType};
use crate::core::handle::WindowHandle;

//=== Public API ==========================================================

/// Error a listener may return. Reported through [`DispatchError`].
pub type ListenerError = Box<dyn StdError>;

/// Listener result; `Err` does not stop delivery to later listeners.
pub type ListenerResult = Result<(), ListenerError>;

type Listener = Box<dyn FnMut(Option<WindowHandle>, &PlatformEvent) -> ListenerResult>;

/// Identifies a subscription for [`EventQueue::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// One failed listener invocation.
#[derive(Debug)]
pub struct ListenerFailure {
    pub listener: ListenerId,
    pub error: ListenerError,
}

/// Raised when one or more listeners failed. Every listener registered
/// for the event was still invoked.
#[derive(Error, Debug)]
#[error("{} listener(s) failed while handling {kind:?}", failures.len())]
pub struct DispatchError {
    pub kind: PlatformEventType,
    pub failures: Vec<ListenerFailure>,
}

//=========================================================================

/// Synchronous dispatch bus between backends and the host application.
pub struct EventQueue {
    listeners: HashMap<PlatformEventType, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl EventQueue {
    /// Creates a queue with no listeners.
    pub fn new() -> Self {
        EventQueue {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Registers `listener` for events of `kind`.
    ///
    /// Listeners of the same kind are invoked in registration order.
    pub fn subscribe<F>(&mut self, kind: PlatformEventType, listener: F) -> ListenerId
    where
        F: FnMut(Option<WindowHandle>, &PlatformEvent) -> ListenerResult + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));

        id
    }

    /// Removes a subscription. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(index) = listeners.iter().position(|(lid, _)| *lid == id) {
                // `remove` (not `swap_remove`) keeps registration order.
                listeners.remove(index);
                return true;
            }
        }
        false
    }

    //--- Dispatch ---------------------------------------------------------

    /// Delivers `event` to every listener registered for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] listing every listener that failed. All
    /// listeners have run by the time this returns.
    pub fn raise(
        &mut self,
        window: Option<WindowHandle>,
        event: PlatformEvent,
    ) -> Result<(), DispatchError> {
        let kind = event.kind();

        let Some(listeners) = self.listeners.get_mut(&kind) else {
            return Ok(());
        };

        let mut failures = Vec::new();
        for (id, listener) in listeners.iter_mut() {
            if let Err(error) = listener(window, &event) {
                error!(
                    target: "pal::events",
                    "Listener {:?} failed on {:?}: {}",
                    id,
                    kind,
                    error
                );
                failures.push(ListenerFailure { listener: *id, error });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError { kind, failures })
        }
    }

    //--- Query API --------------------------------------------------------

    /// Number of listeners currently registered for `kind`.
    pub fn listener_count(&self, kind: PlatformEventType) -> usize {
        self.listeners.get(&kind).map(Vec::len).unwrap_or(0)
    }

    /// True if at least one listener is registered for `kind`.
    pub fn has_listeners(&self, kind: PlatformEventType) -> bool {
        self.listener_count(kind) > 0
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Box<dyn FnMut(Option<WindowHandle>, &PlatformEvent) -> ListenerResult>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |name: &str| {
            let sink = sink.clone();
            let name = name.to_string();
            Box::new(move |_: Option<WindowHandle>, event: &PlatformEvent| {
                sink.borrow_mut().push(format!("{}:{:?}", name, event.kind()));
                Ok(())
            }) as Box<dyn FnMut(Option<WindowHandle>, &PlatformEvent) -> ListenerResult>
        };
        (log, make)
    }

    #[test]
    fn new_queue_has_no_listeners() {
        let queue = EventQueue::new();
        for kind in PlatformEventType::ALL {
            assert!(!queue.has_listeners(kind));
        }
    }

    #[test]
    fn raise_without_listeners_is_ok() {
        let mut queue = EventQueue::new();
        assert!(queue.raise(None, PlatformEvent::Close).is_ok());
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let (log, make) = recorder();
        let mut queue = EventQueue::new();
        queue.subscribe(PlatformEventType::Close, make("first"));
        queue.subscribe(PlatformEventType::Close, make("second"));
        queue.subscribe(PlatformEventType::Close, make("third"));

        queue.raise(None, PlatformEvent::Close).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["first:Close", "second:Close", "third:Close"]
        );
    }

    #[test]
    fn only_matching_kind_is_delivered() {
        let (log, make) = recorder();
        let mut queue = EventQueue::new();
        queue.subscribe(PlatformEventType::Focus, make("focus"));
        queue.subscribe(PlatformEventType::Close, make("close"));

        queue.raise(None, PlatformEvent::Focus { gained: true }).unwrap();

        assert_eq!(*log.borrow(), vec!["focus:Focus"]);
    }

    #[test]
    fn events_arrive_in_push_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut queue = EventQueue::new();
        queue.subscribe(PlatformEventType::Focus, move |_, event| {
            if let PlatformEvent::Focus { gained } = event {
                sink.borrow_mut().push(*gained);
            }
            Ok(())
        });

        queue.raise(None, PlatformEvent::Focus { gained: true }).unwrap();
        queue.raise(None, PlatformEvent::Focus { gained: false }).unwrap();
        queue.raise(None, PlatformEvent::Focus { gained: true }).unwrap();

        assert_eq!(*seen.borrow(), vec![true, false, true]);
    }

    #[test]
    fn failing_listener_does_not_block_later_listeners() {
        let (log, make) = recorder();
        let mut queue = EventQueue::new();
        queue.subscribe(PlatformEventType::Close, make("before"));
        let failing = queue.subscribe(PlatformEventType::Close, |_, _| Err("listener exploded".into()));
        queue.subscribe(PlatformEventType::Close, make("after"));

        let err = queue.raise(None, PlatformEvent::Close).unwrap_err();

        assert_eq!(err.kind, PlatformEventType::Close);
        assert_eq!(err.failures.len(), 1);
        assert_eq!(err.failures[0].listener, failing);
        assert_eq!(err.failures[0].error.to_string(), "listener exploded");
        assert_eq!(*log.borrow(), vec!["before:Close", "after:Close"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let (log, make) = recorder();
        let mut queue = EventQueue::new();
        let a = queue.subscribe(PlatformEventType::Close, make("a"));
        queue.subscribe(PlatformEventType::Close, make("b"));

        assert!(queue.unsubscribe(a));
        assert!(!queue.unsubscribe(a), "second unsubscribe should report false");
        assert_eq!(queue.listener_count(PlatformEventType::Close), 1);

        queue.raise(None, PlatformEvent::Close).unwrap();
        assert_eq!(*log.borrow(), vec!["b:Close"]);
    }

    #[test]
    fn listener_receives_window_handle() {
        use crate::core::handle::ComponentId;

        let owner = ComponentId::allocate();
        let window = WindowHandle::new(owner, 9);
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();

        let mut queue = EventQueue::new();
        queue.subscribe(PlatformEventType::Close, move |w, _| {
            *sink.borrow_mut() = w;
            Ok(())
        });
        queue.raise(Some(window), PlatformEvent::Close).unwrap();

        assert_eq!(*seen.borrow(), Some(window));
    }
}
