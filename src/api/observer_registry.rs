use crate::core::TrackElement;
use crate::error::{SliderError, SliderResult};
use crate::extensions::SliderObserver;

use super::RangeSlider;

const BUSY_MESSAGE: &str = "observers cannot change while slider events are being delivered";

impl<T: TrackElement> RangeSlider<T> {
    /// Registers an observer with unique identifier.
    pub fn register_observer(&self, observer: Box<dyn SliderObserver>) -> SliderResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(SliderError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        let mut listeners = self
            .shared
            .listeners
            .try_borrow_mut()
            .map_err(|_| SliderError::InvalidData(BUSY_MESSAGE.to_owned()))?;
        if listeners
            .observers
            .iter()
            .any(|entry| entry.id() == observer_id)
        {
            return Err(SliderError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        listeners.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&self, observer_id: &str) -> SliderResult<bool> {
        let mut listeners = self
            .shared
            .listeners
            .try_borrow_mut()
            .map_err(|_| SliderError::InvalidData(BUSY_MESSAGE.to_owned()))?;
        if let Some(position) = listeners
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            listeners.observers.remove(position);
            return Ok(true);
        }
        Ok(false)
    }

    /// Number of registered observers, or `None` while events are being delivered.
    #[must_use]
    pub fn observer_count(&self) -> Option<usize> {
        self.shared
            .listeners
            .try_borrow()
            .ok()
            .map(|listeners| listeners.observers.len())
    }
}
