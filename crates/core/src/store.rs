use crate::types::{DetectionRecord, Status};

/// Ordered, in-memory collection of detections.
///
/// Callers must supply unique ids. Debug builds assert this on construction;
/// [`crate::dataset::validate`] checks it for data coming from outside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionStore {
    records: Vec<DetectionRecord>,
}

impl DetectionStore {
    pub fn new(records: Vec<DetectionRecord>) -> Self {
        debug_assert!(
            crate::dataset::first_duplicate_id(&records).is_none(),
            "detection ids must be unique"
        );
        Self { records }
    }

    pub fn records(&self) -> &[DetectionRecord] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&DetectionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sets the status of the record with `id`. Any status may replace any
    /// other. Position is kept. Returns `false`, leaving the store untouched,
    /// when no record has that id.
    pub fn update_status(&mut self, id: u64, status: Status) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                tracing::debug!(id, from = %record.status, to = %status, "status updated");
                record.status = status;
                true
            }
            None => {
                tracing::warn!(id, "status update for unknown detection ignored");
                false
            }
        }
    }

    /// Consuming form of [`update_status`](Self::update_status).
    pub fn with_status(mut self, id: u64, status: Status) -> Self {
        self.update_status(id, status);
        self
    }

    pub fn into_records(self) -> Vec<DetectionRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    #[test]
    fn update_status_changes_only_the_target() {
        let mut store = DetectionStore::new(dataset::sample());
        let before = store.clone();

        assert!(store.update_status(2, Status::Verified));

        for (a, b) in before.records().iter().zip(store.records()) {
            assert_eq!(a.id, b.id);
            if a.id == 2 {
                assert_eq!(b.status, Status::Verified);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn update_status_unknown_id_is_a_noop() {
        let mut store = DetectionStore::new(dataset::sample());
        let before = store.clone();

        assert!(!store.update_status(99, Status::Reviewed));
        assert_eq!(store, before);
    }

    #[test]
    fn any_status_can_follow_any_other() {
        let store = DetectionStore::new(dataset::sample())
            .with_status(3, Status::Pending)
            .with_status(3, Status::Verified)
            .with_status(3, Status::Reviewed);
        assert_eq!(store.get(3).unwrap().status, Status::Reviewed);
    }
}
