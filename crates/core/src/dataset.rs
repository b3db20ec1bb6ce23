use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};

use crate::types::{DetectionRecord, Severity, Status};

/// Parses a JSON array of detection records and checks it with [`validate`].
pub fn from_json(bytes: &[u8]) -> anyhow::Result<Vec<DetectionRecord>> {
    let records: Vec<DetectionRecord> =
        serde_json::from_slice(bytes).context("parse detections json")?;
    validate(&records)?;
    Ok(records)
}

pub fn load_json(path: &Path) -> anyhow::Result<Vec<DetectionRecord>> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let records = from_json(&bytes).with_context(|| format!("load {}", path.display()))?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded detections");
    Ok(records)
}

pub fn validate(records: &[DetectionRecord]) -> anyhow::Result<()> {
    if let Some(id) = first_duplicate_id(records) {
        anyhow::bail!("duplicate detection id {id}");
    }
    for r in records {
        if !(0.0..=1.0).contains(&r.confidence) {
            anyhow::bail!(
                "detection {} has confidence {} outside [0, 1]",
                r.id,
                r.confidence
            );
        }
    }
    Ok(())
}

pub(crate) fn first_duplicate_id(records: &[DetectionRecord]) -> Option<u64> {
    let mut seen = HashSet::with_capacity(records.len());
    records.iter().map(|r| r.id).find(|id| !seen.insert(*id))
}

/// The five detections shown by the demo dashboard.
pub fn sample() -> Vec<DetectionRecord> {
    vec![
        record(
            1,
            (14, 32, 15),
            "ABC-1234",
            "Main St & 5th Ave",
            0.89,
            Status::Verified,
            Severity::Medium,
        ),
        record(
            2,
            (14, 28, 42),
            "XYZ-9876",
            "Park Avenue",
            0.94,
            Status::Pending,
            Severity::High,
        ),
        record(
            3,
            (14, 15, 33),
            "DEF-5678",
            "Downtown Plaza",
            0.76,
            Status::Reviewed,
            Severity::Low,
        ),
        record(
            4,
            (13, 58, 21),
            "GHI-2468",
            "Shopping Center",
            0.91,
            Status::Verified,
            Severity::High,
        ),
        record(
            5,
            (13, 45, 17),
            "JKL-1357",
            "Residential Area",
            0.83,
            Status::Pending,
            Severity::Medium,
        ),
    ]
}

fn record(
    id: u64,
    (h, m, s): (u32, u32, u32),
    registration_number: &str,
    location: &str,
    confidence: f64,
    status: Status,
    severity: Severity,
) -> DetectionRecord {
    let timestamp = sample_time(h, m, s);
    DetectionRecord {
        id,
        timestamp,
        registration_number: registration_number.to_string(),
        location: location.to_string(),
        confidence,
        clip_reference: format!("/api/clips/clip-{id:03}.mp4"),
        status,
        severity,
    }
}

/// Sample detections all fall on 2024-08-02. Every call site passes a
/// literal in-range time, so the fallback is unreachable.
fn sample_time(h: u32, m: u32, s: u32) -> NaiveDateTime {
    let ts = NaiveDate::from_ymd_opt(2024, 8, 2).and_then(|d| d.and_hms_opt(h, m, s));
    debug_assert!(ts.is_some(), "sample time {h:02}:{m:02}:{s:02} out of range");
    ts.unwrap_or_default()
}
