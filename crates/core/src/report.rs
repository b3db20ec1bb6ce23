use serde::{Deserialize, Serialize};

use crate::types::{DerivedStats, DetectionRecord};

pub const CLIP_DURATION_SECS: u32 = 5;
pub const CLIP_FORMAT: &str = "MP4";

/// Display values for one row of the detection log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionRow {
    pub id: u64,
    pub date: String,
    pub time: String,
    pub registration_number: String,
    pub location: String,
    pub confidence_percent: u32,
    pub severity: String,
    pub status: String,
    pub clip_reference: String,
}

impl DetectionRow {
    pub fn from_record(r: &DetectionRecord) -> Self {
        Self {
            id: r.id,
            date: r.timestamp.format("%Y-%m-%d").to_string(),
            time: r.timestamp.format("%H:%M:%S").to_string(),
            registration_number: r.registration_number.clone(),
            location: r.location.clone(),
            confidence_percent: (r.confidence * 100.0).round() as u32,
            severity: r.severity.as_str().to_uppercase(),
            status: r.status.as_str().to_uppercase(),
            clip_reference: r.clip_reference.clone(),
        }
    }
}

/// Placeholder player shown when a clip is opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClipPreview {
    pub detection_id: u64,
    pub clip_reference: String,
    pub file_name: String,
    pub duration_secs: u32,
    pub format: String,
}

impl ClipPreview {
    pub fn for_record(r: &DetectionRecord) -> Self {
        let file_name = r
            .clip_reference
            .rsplit('/')
            .next()
            .unwrap_or(&r.clip_reference)
            .to_string();
        Self {
            detection_id: r.id,
            clip_reference: r.clip_reference.clone(),
            file_name,
            duration_secs: CLIP_DURATION_SECS,
            format: CLIP_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub stats: DerivedStats,
    pub rows: Vec<DetectionRow>,
}

impl DashboardView {
    pub fn new(stats: DerivedStats, visible: &[DetectionRecord]) -> Self {
        Self {
            stats,
            rows: visible.iter().map(DetectionRow::from_record).collect(),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut s = String::new();
        s.push_str("# litterwatch detections\n\n");

        s.push_str("## Summary\n\n");
        s.push_str(&format!("- total_detections: `{}`\n", self.stats.total));
        s.push_str(&format!("- verified: `{}`\n", self.stats.verified));
        s.push_str(&format!("- pending_review: `{}`\n", self.stats.pending));
        s.push_str(&format!(
            "- avg_confidence: `{:.1}%`\n",
            self.stats.avg_confidence_percent
        ));
        s.push('\n');

        s.push_str("## Detection log\n\n");
        if self.rows.is_empty() {
            s.push_str("- (none)\n");
            return s;
        }

        s.push_str("| Date | Time | Registration No. | Location | Confidence | Severity | Status | Clip |\n");
        s.push_str("|---|---|---|---|---|---|---|---|\n");
        for r in &self.rows {
            s.push_str(&format!(
                "| {} | {} | `{}` | {} | {}% | {} | {} | {} |\n",
                r.date,
                r.time,
                r.registration_number,
                r.location,
                r.confidence_percent,
                r.severity,
                r.status,
                r.clip_reference
            ));
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dataset, query::compute_stats};

    #[test]
    fn row_formats_percent_and_badges() {
        let records = dataset::sample();
        let row = DetectionRow::from_record(&records[1]);
        assert_eq!(row.date, "2024-08-02");
        assert_eq!(row.time, "14:28:42");
        assert_eq!(row.confidence_percent, 94);
        assert_eq!(row.severity, "HIGH");
        assert_eq!(row.status, "PENDING");
    }

    #[test]
    fn markdown_includes_summary_and_rows() {
        let records = dataset::sample();
        let view = DashboardView::new(compute_stats(&records), &records);
        let md = view.to_markdown();
        assert!(md.contains("## Summary"));
        assert!(md.contains("- avg_confidence: `86.6%`"));
        assert!(md.contains("| `ABC-1234` | Main St & 5th Ave | 89% | MEDIUM | VERIFIED |"));
    }

    #[test]
    fn markdown_marks_empty_log() {
        let view = DashboardView::new(compute_stats(&[]), &[]);
        assert!(view.to_markdown().contains("- (none)"));
    }

    #[test]
    fn preview_of_reference_without_slash_keeps_it_whole() {
        let mut record = dataset::sample().remove(0);
        record.clip_reference = "clip-x.mp4".to_string();
        assert_eq!(ClipPreview::for_record(&record).file_name, "clip-x.mp4");
    }
}
