use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Human review state of a detection. The only field that changes after load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Verified,
    Reviewed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Verified => "verified",
            Status::Reviewed => "reviewed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "verified" => Ok(Status::Verified),
            "reviewed" => Ok(Status::Reviewed),
            other => anyhow::bail!(
                "unknown status {other:?} (expected pending, verified or reviewed)"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One litter-detection event.
///
/// `timestamp` is the wall-clock time at the capture site. No zone is
/// attached, so calendar-date comparisons use it as is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionRecord {
    pub id: u64,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub registration_number: String,
    pub location: String,
    pub confidence: f64,
    pub clip_reference: String,
    pub status: Status,
    pub severity: Severity,
}

/// Aggregates over a record collection. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DerivedStats {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub avg_confidence_percent: f64,
}

pub(crate) mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveDateTime, String> {
        NaiveDateTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, ISO_FORMAT))
            .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Verified".parse::<Status>().unwrap(), Status::Verified);
        assert_eq!("PENDING".parse::<Status>().unwrap(), Status::Pending);
        assert!("approved".parse::<Status>().is_err());
    }

    #[test]
    fn timestamp_accepts_space_and_iso_separators() {
        let a = timestamp_format::parse("2024-08-02 14:32:15").unwrap();
        let b = timestamp_format::parse("2024-08-02T14:32:15").unwrap();
        assert_eq!(a, b);
        assert!(timestamp_format::parse("02/08/2024").is_err());
    }
}
