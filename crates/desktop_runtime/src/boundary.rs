//! Per-window render-fault isolation.
//!
//! A fault recorded for one window switches only that window's body to a fallback view. Retrying
//! lifts the active fault so the reducer can remount the app; the window keeps its failure count
//! until it closes, so a fault that comes straight back reports how often it has failed.

use std::collections::BTreeMap;

use crate::model::WindowId;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fault raised by an app while rendering.
pub struct RenderFault {
    /// Message shown in the fallback.
    pub message: String,
    /// Faults reported for the window since it opened, retried ones included.
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Active render faults keyed by window.
pub struct FaultBoundary {
    active: BTreeMap<WindowId, RenderFault>,
    failures: BTreeMap<WindowId, u32>,
}

impl FaultBoundary {
    /// Records a fault for `window_id`. Returns `true` when the window was not already faulted.
    pub fn report(&mut self, window_id: WindowId, message: impl Into<String>) -> bool {
        let failures = self.failures.entry(window_id).or_insert(0);
        *failures = failures.saturating_add(1);
        let fault = RenderFault {
            message: message.into(),
            attempts: *failures,
        };
        self.active.insert(window_id, fault).is_none()
    }

    /// Lifts the active fault so the window can render again. The failure count is kept.
    pub fn retry(&mut self, window_id: WindowId) -> Option<RenderFault> {
        self.active.remove(&window_id)
    }

    /// Drops everything recorded for a closed window.
    pub fn forget(&mut self, window_id: WindowId) {
        self.active.remove(&window_id);
        self.failures.remove(&window_id);
    }

    /// Returns the active fault for `window_id`.
    pub fn fault(&self, window_id: WindowId) -> Option<&RenderFault> {
        self.active.get(&window_id)
    }

    pub fn is_faulted(&self, window_id: WindowId) -> bool {
        self.active.contains_key(&window_id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// `true` when no window is faulted and no failure history is kept.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn repeated_reports_count_attempts_without_duplicating() {
        let mut boundary = FaultBoundary::default();
        assert!(boundary.report(WindowId(1), "boom"));
        assert!(!boundary.report(WindowId(1), "boom again"));

        let fault = boundary.fault(WindowId(1)).expect("fault");
        assert_eq!(fault.attempts, 2);
        assert_eq!(fault.message, "boom again");
        assert_eq!(boundary.len(), 1);
    }

    #[test]
    fn retry_keeps_the_failure_count_until_the_window_is_forgotten() {
        let mut boundary = FaultBoundary::default();
        boundary.report(WindowId(1), "missing");
        assert!(boundary.retry(WindowId(1)).is_some());
        assert!(!boundary.is_faulted(WindowId(1)));

        assert!(boundary.report(WindowId(1), "still missing"));
        assert_eq!(
            boundary.fault(WindowId(1)),
            Some(&RenderFault {
                message: "still missing".to_string(),
                attempts: 2,
            })
        );

        boundary.forget(WindowId(1));
        assert!(boundary.is_empty());
        boundary.report(WindowId(1), "fresh");
        assert_eq!(boundary.fault(WindowId(1)).map(|f| f.attempts), Some(1));
    }

    #[test]
    fn faults_are_isolated_per_window() {
        let mut boundary = FaultBoundary::default();
        boundary.report(WindowId(1), "missing");
        assert!(!boundary.is_faulted(WindowId(2)));
        assert_eq!(boundary.fault(WindowId(2)), None);
    }
}
