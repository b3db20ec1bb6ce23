use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DerivedStats, DetectionRecord, Status};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Live detections: date and search filters apply.
    #[default]
    All,
    /// Review history: everything that is no longer pending.
    Reviewed,
}

/// Current filter inputs of the detection log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    pub date: Option<NaiveDate>,
    pub view: ViewMode,
}

impl Filters {
    pub fn apply(&self, records: &[DetectionRecord]) -> Vec<DetectionRecord> {
        match self.view {
            ViewMode::All => {
                let by_date = date_filter(records, self.date);
                search_filter(&by_date, &self.search)
            }
            ViewMode::Reviewed => reviewed_partition(records),
        }
    }
}

/// Records whose registration number or location contains `term`, ignoring
/// case. The term is not trimmed; an empty term matches everything.
pub fn search_filter(records: &[DetectionRecord], term: &str) -> Vec<DetectionRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.registration_number.to_lowercase().contains(&needle)
                || r.location.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Records captured on `date`. Time of day is ignored; `None` keeps all.
pub fn date_filter(records: &[DetectionRecord], date: Option<NaiveDate>) -> Vec<DetectionRecord> {
    match date {
        None => records.to_vec(),
        Some(day) => records
            .iter()
            .filter(|r| r.timestamp.date() == day)
            .cloned()
            .collect(),
    }
}

pub fn reviewed_partition(records: &[DetectionRecord]) -> Vec<DetectionRecord> {
    records
        .iter()
        .filter(|r| matches!(r.status, Status::Verified | Status::Reviewed))
        .cloned()
        .collect()
}

pub fn compute_stats(records: &[DetectionRecord]) -> DerivedStats {
    let total = records.len();
    let verified = records
        .iter()
        .filter(|r| r.status == Status::Verified)
        .count();
    let pending = records
        .iter()
        .filter(|r| r.status == Status::Pending)
        .count();

    // An empty log reports 0% rather than NaN.
    let avg_confidence_percent = if total == 0 {
        0.0
    } else {
        let sum: f64 = records.iter().map(|r| r.confidence).sum();
        round_one_decimal(sum / total as f64 * 100.0)
    };

    DerivedStats {
        total,
        verified,
        pending,
        avg_confidence_percent,
    }
}

fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
