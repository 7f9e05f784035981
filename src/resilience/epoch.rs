use std::collections::HashMap;

use crate::domain::spi::OperationKind;

/// Monotonic request counters, one per operation kind. A response is only
/// applied when it carries the latest epoch issued for its kind.
#[derive(Debug, Clone, Default)]
pub struct RequestEpochs {
    latest: HashMap<OperationKind, u64>,
}

impl RequestEpochs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, kind: OperationKind) -> u64 {
        let next = self.latest(kind) + 1;
        self.latest.insert(kind, next);
        next
    }

    /// Makes every outstanding epoch of `kind` stale without issuing a request.
    pub fn invalidate(&mut self, kind: OperationKind) {
        self.issue(kind);
    }

    #[must_use]
    pub fn latest(&self, kind: OperationKind) -> u64 {
        self.latest.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_current(&self, kind: OperationKind, epoch: u64) -> bool {
        epoch != 0 && self.latest(kind) == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epochs_increase_per_kind() {
        let mut epochs = RequestEpochs::new();
        assert_eq!(epochs.issue(OperationKind::Current), 1);
        assert_eq!(epochs.issue(OperationKind::Current), 2);
        assert_eq!(epochs.issue(OperationKind::Forecast), 1);
        assert_eq!(epochs.latest(OperationKind::Comparison), 0);
    }

    #[test]
    fn only_latest_epoch_is_current() {
        let mut epochs = RequestEpochs::new();
        let first = epochs.issue(OperationKind::Forecast);
        let second = epochs.issue(OperationKind::Forecast);
        assert!(!epochs.is_current(OperationKind::Forecast, first));
        assert!(epochs.is_current(OperationKind::Forecast, second));
    }

    #[test]
    fn invalidate_makes_outstanding_epoch_stale() {
        let mut epochs = RequestEpochs::new();
        let issued = epochs.issue(OperationKind::Comparison);
        epochs.invalidate(OperationKind::Comparison);
        assert!(!epochs.is_current(OperationKind::Comparison, issued));
    }

    #[test]
    fn nothing_is_current_before_first_issue() {
        let epochs = RequestEpochs::new();
        assert!(!epochs.is_current(OperationKind::Current, 0));
    }
}
