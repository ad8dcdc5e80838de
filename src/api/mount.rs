use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{HandleKind, TrackElement};
use crate::error::{SliderError, SliderResult};
use crate::platform::{EventBus, ListenerId, PointerPhase};

use super::RangeSlider;
use super::slider::SliderShared;

const LISTENED_PHASES: [PointerPhase; 4] = [
    PointerPhase::Begin,
    PointerPhase::Move,
    PointerPhase::End,
    PointerPhase::Cancel,
];

/// Type-erased teardown hooks so the guard does not carry the track type.
trait MountedControl {
    fn detach(&self);
    fn flush_events(&self);
}

impl<T: TrackElement> MountedControl for SliderShared<T> {
    fn detach(&self) {
        match self.core.try_borrow_mut() {
            Ok(mut core) => core.unmount(),
            Err(_) => {
                warn!("slider state busy during unmount; deferring until released");
                self.unmount_requested.set(true);
            }
        }
    }

    fn flush_events(&self) {
        self.flush();
    }
}

/// Scope guard holding the handle listeners of a mounted slider.
///
/// Dropping the guard unmounts: the slider stops reacting first, then every
/// listener is removed from the bus, so no handler runs after teardown
/// begins. This also covers abnormal teardown such as the owner being dropped
/// mid-drag.
#[must_use = "dropping the guard unmounts the slider immediately"]
pub struct MountGuard {
    bus: EventBus,
    listener_ids: SmallVec<[ListenerId; 8]>,
    control: Weak<dyn MountedControl>,
    released: bool,
}

impl fmt::Debug for MountGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountGuard")
            .field("listeners", &self.listener_ids.len())
            .field("released", &self.released)
            .finish()
    }
}

impl MountGuard {
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listener_ids.len()
    }

    /// Unmounts explicitly; equivalent to dropping the guard.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let control = self.control.upgrade();
        if let Some(control) = &control {
            control.detach();
        }
        let removed = self
            .listener_ids
            .drain(..)
            .filter(|id| self.bus.remove_listener(*id))
            .count();
        debug!(removed, "slider listeners released");
        if let Some(control) = control {
            control.flush_events();
        }
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: TrackElement + 'static> RangeSlider<T> {
    /// Attaches begin/move/end/cancel listeners for both handles to `bus`.
    ///
    /// The track is re-measured on mount. Listeners stay attached until the
    /// returned guard is dropped; a slider can be mounted once at a time.
    pub fn mount(&self, bus: &EventBus) -> SliderResult<MountGuard> {
        {
            let mut core = self.shared.core.borrow_mut();
            core.apply_requested_unmount(&self.shared.unmount_requested);
            if core.mounted {
                return Err(SliderError::AlreadyMounted);
            }
            core.mount();
        }

        let mut listener_ids = SmallVec::new();
        for handle in HandleKind::ALL {
            for phase in LISTENED_PHASES {
                let shared = Rc::downgrade(&self.shared);
                listener_ids.push(bus.add_listener(handle, phase, move |event| {
                    if let Some(shared) = shared.upgrade() {
                        shared.on_pointer_event(handle, event);
                    }
                }));
            }
        }
        self.shared.flush();

        let shared = Rc::downgrade(&self.shared);
        let control: Weak<dyn MountedControl> = shared;
        Ok(MountGuard {
            bus: bus.clone(),
            listener_ids,
            control,
            released: false,
        })
    }
}
