use smallvec::SmallVec;

use crate::core::{DerivedRange, HandleKind};

/// One owner-visible hour change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourChange {
    pub handle: HandleKind,
    pub hours: u32,
}

/// Last-notified hour cache.
///
/// Changes are detected on derived hours, never on raw percents, so a burst
/// of drag moves inside one hour produces no notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeNotifier {
    last_start: Option<u32>,
    last_end: Option<u32>,
}

impl ChangeNotifier {
    /// Cache with nothing notified yet; the first observation reports both handles.
    #[must_use]
    pub fn unseeded() -> Self {
        Self::default()
    }

    /// Cache that treats `derived` as already notified.
    #[must_use]
    pub fn seeded(derived: &DerivedRange) -> Self {
        Self {
            last_start: Some(derived.start_hours),
            last_end: Some(derived.end_hours),
        }
    }

    #[must_use]
    pub fn last_notified(&self, handle: HandleKind) -> Option<u32> {
        match handle {
            HandleKind::Start => self.last_start,
            HandleKind::End => self.last_end,
        }
    }

    /// Records `derived` and returns the handles whose hours changed, start first.
    pub fn observe(&mut self, derived: &DerivedRange) -> SmallVec<[HourChange; 2]> {
        let mut changes = SmallVec::new();
        for handle in HandleKind::ALL {
            let hours = derived.hours_for(handle);
            let last = match handle {
                HandleKind::Start => &mut self.last_start,
                HandleKind::End => &mut self.last_end,
            };
            if *last != Some(hours) {
                *last = Some(hours);
                changes.push(HourChange { handle, hours });
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeNotifier, HourChange};
    use crate::core::{HandleKind, RangeState};

    #[test]
    fn unseeded_notifier_reports_both_handles_once() {
        let derived = RangeState::new(6, 18).derive();
        let mut notifier = ChangeNotifier::unseeded();
        let changes = notifier.observe(&derived);
        assert_eq!(
            changes.as_slice(),
            &[
                HourChange {
                    handle: HandleKind::Start,
                    hours: 6
                },
                HourChange {
                    handle: HandleKind::End,
                    hours: 18
                },
            ]
        );
        assert!(notifier.observe(&derived).is_empty());
    }
}
