use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use litterwatch_core::query::{compute_stats, reviewed_partition, search_filter};
use litterwatch_core::store::DetectionStore;
use litterwatch_core::types::{DetectionRecord, Severity, Status};

fn status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Pending),
        Just(Status::Verified),
        Just(Status::Reviewed),
    ]
}

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Low), Just(Severity::Medium), Just(Severity::High)]
}

fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (1u32..=28, 0u32..24, 0u32..60).prop_map(|(day, h, m)| {
        NaiveDate::from_ymd_opt(2024, 8, day)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    })
}

fn records() -> impl Strategy<Value = Vec<DetectionRecord>> {
    prop::collection::vec(
        (
            timestamp(),
            "[A-Za-z]{3}-[0-9]{4}",
            "[A-Za-z &]{0,20}",
            0.0f64..=1.0,
            status(),
            severity(),
        ),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(
                |(i, (timestamp, registration_number, location, confidence, status, severity))| {
                    DetectionRecord {
                        id: i as u64 + 1,
                        timestamp,
                        registration_number,
                        location,
                        confidence,
                        clip_reference: format!("/api/clips/clip-{:03}.mp4", i + 1),
                        status,
                        severity,
                    }
                },
            )
            .collect()
    })
}

fn ids(records: &[DetectionRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

proptest! {
    #[test]
    fn empty_search_returns_everything(records in records()) {
        prop_assert_eq!(search_filter(&records, ""), records);
    }

    #[test]
    fn search_returns_exactly_the_matches(records in records(), term in "[A-Za-z -]{0,4}") {
        let hits = ids(&search_filter(&records, &term));
        let needle = term.to_lowercase();
        let expected: Vec<u64> = records
            .iter()
            .filter(|r| {
                r.registration_number.to_lowercase().contains(&needle)
                    || r.location.to_lowercase().contains(&needle)
            })
            .map(|r| r.id)
            .collect();
        prop_assert_eq!(hits, expected);
    }

    #[test]
    fn reviewed_and_pending_partition_the_log(records in records()) {
        let reviewed = ids(&reviewed_partition(&records));
        let not_pending: Vec<u64> = records
            .iter()
            .filter(|r| r.status != Status::Pending)
            .map(|r| r.id)
            .collect();
        prop_assert_eq!(&reviewed, &not_pending);

        let pending: Vec<u64> = records
            .iter()
            .filter(|r| r.status == Status::Pending)
            .map(|r| r.id)
            .collect();
        prop_assert!(pending.iter().all(|id| !reviewed.contains(id)));

        let mut recombined: Vec<u64> = reviewed.iter().chain(&pending).copied().collect();
        recombined.sort_unstable();
        prop_assert_eq!(recombined, ids(&records));
    }

    #[test]
    fn update_status_is_idempotent_and_keeps_order(
        records in records(),
        id in 0u64..25,
        new_status in status(),
    ) {
        let before = ids(&records);
        let once = DetectionStore::new(records).with_status(id, new_status);
        let twice = once.clone().with_status(id, new_status);

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(ids(once.records()), before);
    }

    #[test]
    fn average_confidence_stays_in_percent_range(records in records()) {
        let stats = compute_stats(&records);
        prop_assert!(stats.avg_confidence_percent >= 0.0);
        prop_assert!(stats.avg_confidence_percent <= 100.0);
        prop_assert!(stats.verified + stats.pending <= stats.total);
    }
}
