//! Record to event mapping.
//!
//! Turns the source's raw records into calendar events anchored on the job
//! window: record `i` starts `i` days after the job's `from` instant and lasts
//! one hour. The mapping is pure, so the same job and records always produce
//! the same events.

use calimport_core::{DEFAULT_TIMEZONE, ImportEvent, ImportJob, truncate};
use chrono::Duration;

use crate::config::MappingConfig;
use crate::record::RawRecord;

/// Upper bound on the number of events produced per import.
pub const MAX_EVENTS_PER_IMPORT: usize = 5;

/// Maximum length, in characters, of an event title including its label.
pub const TITLE_MAX_LEN: usize = 50;

/// Maximum length, in characters, of the body excerpt placed in the notes.
pub const NOTES_EXCERPT_MAX_LEN: usize = 100;

/// Duration of every generated event.
pub const EVENT_DURATION_HOURS: i64 = 1;

/// Maps the first [`MAX_EVENTS_PER_IMPORT`] records into events, in source order.
pub fn map_records(job: &ImportJob, records: &[RawRecord], config: &MappingConfig) -> Vec<ImportEvent> {
    records
        .iter()
        .take(MAX_EVENTS_PER_IMPORT)
        .enumerate()
        .map(|(index, record)| map_record(job, index, record, config))
        .collect()
}

/// Maps a single record at position `index` of the source response.
pub fn map_record(job: &ImportJob, index: usize, record: &RawRecord, config: &MappingConfig) -> ImportEvent {
    let title = format!("{}{}", config.title_label, record.title);
    let start = job.day(index);
    let end = start + Duration::hours(EVENT_DURATION_HOURS);

    ImportEvent::new(truncate(&title, TITLE_MAX_LEN), start, end)
        .with_timezone(DEFAULT_TIMEZONE)
        .with_notes(notes_for(record))
        .with_tags(config.tags.iter().cloned())
}

fn notes_for(record: &RawRecord) -> String {
    format!(
        "Demo event created from post ID {}. Content: {}",
        record.id,
        truncate(&record.body, NOTES_EXCERPT_MAX_LEN)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn job() -> ImportJob {
        ImportJob::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        )
    }

    fn records(count: usize) -> Vec<RawRecord> {
        (1..=count as i64)
            .map(|id| RawRecord::new(id, format!("post {}", id), format!("body {}", id)))
            .collect()
    }

    #[test]
    fn maps_short_long_and_empty_titles() {
        let long_title = "x".repeat(60);
        let records = vec![
            RawRecord::new(1, "A", "short body"),
            RawRecord::new(2, long_title, "second body"),
            RawRecord::new(3, "", ""),
        ];

        let events = map_records(&job(), &records, &MappingConfig::default());
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].title, "Demo Event: A");

        let expected = format!("Demo Event: {}...", "x".repeat(35));
        assert_eq!(events[1].title, expected);
        assert_eq!(events[1].title.chars().count(), TITLE_MAX_LEN);

        assert_eq!(events[2].title, "Demo Event: ");
        assert_eq!(
            events[2].notes,
            "Demo event created from post ID 3. Content: "
        );
    }

    #[test]
    fn schedules_one_hour_events_on_consecutive_days() {
        let job = job();
        let events = map_records(&job, &records(4), &MappingConfig::default());

        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.start_date, job.from + Duration::days(i as i64));
            assert_eq!(event.duration(), Duration::hours(1));
            assert_eq!(event.timezone, "UTC");
            assert_eq!(event.tags, vec!["demo", "example"]);
        }
    }

    #[test]
    fn caps_event_count() {
        let config = MappingConfig::default();
        for n in [0, 1, 4, 5, 6, 100] {
            let events = map_records(&job(), &records(n), &config);
            assert_eq!(events.len(), n.min(MAX_EVENTS_PER_IMPORT), "n = {}", n);
        }
    }

    #[test]
    fn keeps_first_records_in_order() {
        let events = map_records(&job(), &records(8), &MappingConfig::default());
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Demo Event: post 1",
                "Demo Event: post 2",
                "Demo Event: post 3",
                "Demo Event: post 4",
                "Demo Event: post 5",
            ]
        );
    }

    #[test]
    fn notes_excerpt_is_truncated() {
        let record = RawRecord::new(42, "t", "b".repeat(150));
        let event = map_record(&job(), 0, &record, &MappingConfig::default());

        let expected = format!(
            "Demo event created from post ID 42. Content: {}...",
            "b".repeat(97)
        );
        assert_eq!(event.notes, expected);
    }

    #[test]
    fn honours_custom_label_and_tags() {
        let config = MappingConfig {
            title_label: String::new(),
            tags: vec!["imported".to_string()],
        };
        let event = map_record(&job(), 0, &RawRecord::new(1, "Standup", ""), &config);
        assert_eq!(event.title, "Standup");
        assert_eq!(event.tags, vec!["imported"]);
    }

    #[test]
    fn inverted_window_still_anchors_on_from() {
        let from = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let job = ImportJob::new(from, to);

        let events = map_records(&job, &records(2), &MappingConfig::default());
        assert_eq!(events[0].start_date, from);
        assert_eq!(events[1].start_date, from + Duration::days(1));
    }
}
