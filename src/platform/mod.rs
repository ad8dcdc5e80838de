//! Single-threaded pointer event delivery for the two slider handles.
//!
//! `EventBus` plays the role of the host's element listener tables: listeners
//! are registered per handle and per pointer phase, removed by id, and invoked
//! in registration order. Everything runs on one thread, so shared state uses
//! `Rc`/`RefCell` rather than locks.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::HandleKind;
use crate::interaction::TouchPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Begin,
    Move,
    End,
    Cancel,
}

/// Pointer event targeted at one handle.
///
/// `touches` lists the contacts that changed in this event: new contacts for
/// `Begin`, moved contacts for `Move`, lifted contacts for `End`/`Cancel`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub touches: SmallVec<[TouchPoint; 2]>,
}

impl PointerEvent {
    #[must_use]
    pub fn new(phase: PointerPhase, touches: impl IntoIterator<Item = TouchPoint>) -> Self {
        Self {
            phase,
            touches: touches.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn touch(phase: PointerPhase, id: u64, page_x: f64) -> Self {
        Self::new(phase, [TouchPoint::new(id, page_x)])
    }

    #[must_use]
    pub fn mouse(phase: PointerPhase, page_x: f64) -> Self {
        Self::new(phase, [TouchPoint::mouse(page_x)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type ListenerFn = Rc<RefCell<dyn FnMut(&PointerEvent)>>;

struct ListenerEntry {
    target: HandleKind,
    phase: PointerPhase,
    callback: ListenerFn,
}

#[derive(Default)]
struct EventBusInner {
    next_id: u64,
    listeners: IndexMap<ListenerId, ListenerEntry>,
}

/// Cloneable handle to a shared listener table.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<EventBusInner>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &self,
        target: HandleKind,
        phase: PointerPhase,
        callback: impl FnMut(&PointerEvent) + 'static,
    ) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = ListenerId(inner.next_id);
        inner.listeners.insert(
            id,
            ListenerEntry {
                target,
                phase,
                callback: Rc::new(RefCell::new(callback)),
            },
        );
        id
    }

    /// Removes a listener. Returns `true` when it was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.shift_remove(&id).is_some()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    #[must_use]
    pub fn listener_count_for(&self, target: HandleKind, phase: PointerPhase) -> usize {
        self.inner
            .borrow()
            .listeners
            .values()
            .filter(|entry| entry.target == target && entry.phase == phase)
            .count()
    }

    /// Delivers `event` to the listeners of `target` for its phase.
    ///
    /// A listener removed by an earlier listener of the same dispatch is not
    /// invoked. A listener already running (re-entrant dispatch) is skipped.
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, target: HandleKind, event: &PointerEvent) -> usize {
        let matching: SmallVec<[(ListenerId, ListenerFn); 4]> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, entry)| entry.target == target && entry.phase == event.phase)
            .map(|(id, entry)| (*id, Rc::clone(&entry.callback)))
            .collect();

        let mut invoked = 0;
        for (id, callback) in matching {
            if !self.inner.borrow().listeners.contains_key(&id) {
                trace!(?id, "listener removed mid-dispatch");
                continue;
            }
            let Ok(mut callback) = callback.try_borrow_mut() else {
                trace!(?id, "skipping re-entrant listener");
                continue;
            };
            (&mut *callback)(event);
            invoked += 1;
        }
        invoked
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{EventBus, PointerEvent, PointerPhase};
    use crate::core::HandleKind;

    #[test]
    fn dispatch_filters_by_target_and_phase() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        bus.add_listener(HandleKind::Start, PointerPhase::Move, move |_| {
            counter.set(counter.get() + 1);
        });

        assert_eq!(
            bus.dispatch(HandleKind::End, &PointerEvent::mouse(PointerPhase::Move, 1.0)),
            0
        );
        assert_eq!(
            bus.dispatch(HandleKind::Start, &PointerEvent::mouse(PointerPhase::Begin, 1.0)),
            0
        );
        assert_eq!(
            bus.dispatch(HandleKind::Start, &PointerEvent::mouse(PointerPhase::Move, 1.0)),
            1
        );
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn removed_listener_is_not_invoked() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = bus.add_listener(HandleKind::End, PointerPhase::Begin, move |_| {
            counter.set(counter.get() + 1);
        });
        assert!(bus.remove_listener(id));
        assert!(!bus.remove_listener(id));

        bus.dispatch(HandleKind::End, &PointerEvent::touch(PointerPhase::Begin, 1, 0.0));
        assert_eq!(hits.get(), 0);
        assert_eq!(bus.listener_count(), 0);
    }
}
