//! Import data model.
//!
//! These are the types exchanged with the planner host:
//! - [`ImportJob`]: the date range the host asks the plugin to import
//! - [`ImportEvent`]: one normalized calendar event
//! - [`ImportData`]: the envelope of events handed to the host
//! - [`ImportResult`]: the host's verdict on an import

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Timezone stamped on every imported event.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// An import request handed to the plugin by the host.
///
/// `from <= to` is expected but not enforced: events are anchored at `from`
/// whatever `to` says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportJob {
    /// First day of the requested window.
    #[serde(deserialize_with = "timestamp_or_date")]
    pub from: DateTime<Utc>,
    /// Last day of the requested window.
    #[serde(deserialize_with = "timestamp_or_date")]
    pub to: DateTime<Utc>,
}

impl ImportJob {
    /// Creates a new job for the given window.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Returns true if `from` does not come after `to`.
    pub fn is_ordered(&self) -> bool {
        self.from <= self.to
    }

    /// Returns `from` shifted by `offset` whole days.
    pub fn day(&self, offset: usize) -> DateTime<Utc> {
        self.from + Duration::days(offset as i64)
    }

    /// Returns the `from` date formatted as `YYYY-MM-DD`.
    pub fn from_date(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    /// Returns the `to` date formatted as `YYYY-MM-DD`.
    pub fn to_date(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}

/// Accepts either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date
/// (interpreted as midnight UTC).
fn timestamp_or_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct TimestampOrDate;

    impl de::Visitor<'_> for TimestampOrDate {
        type Value = DateTime<Utc>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an RFC 3339 timestamp or a YYYY-MM-DD date")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<DateTime<Utc>, E> {
            if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
                return Ok(dt.with_timezone(&Utc));
            }

            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
                .ok_or_else(|| E::custom(format!("invalid date: {value}")))
        }
    }

    deserializer.deserialize_str(TimestampOrDate)
}

/// A normalized event in the shape the host's calendar accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEvent {
    /// Event title.
    pub title: String,
    /// Event start.
    pub start_date: DateTime<Utc>,
    /// Event end.
    pub end_date: DateTime<Utc>,
    /// IANA timezone name.
    pub timezone: String,
    /// Free-form notes.
    pub notes: String,
    /// Categorization labels.
    pub tags: Vec<String>,
}

impl ImportEvent {
    /// Creates a new event with UTC timezone, no notes and no tags.
    pub fn new(title: impl Into<String>, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start_date,
            end_date,
            timezone: DEFAULT_TIMEZONE.to_string(),
            notes: String::new(),
            tags: Vec::new(),
        }
    }

    /// Builder method to set the timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Builder method to set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Builder method to set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the event duration.
    pub fn duration(&self) -> Duration {
        self.end_date - self.start_date
    }
}

/// The envelope of events submitted to the host in one import call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportData {
    pub events: Vec<ImportEvent>,
}

impl ImportData {
    pub fn new(events: Vec<ImportEvent>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// The host's verdict on an import call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Whether the host accepted the events.
    pub success: bool,
    /// Failure reason, set when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportResult {
    /// A successful result.
    pub fn accepted() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failed result with the given reason.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// Returns the failure reason, or `"unknown error"` when the host gave none.
    pub fn failure_message(&self) -> &str {
        match self.error.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => "unknown error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    mod job_tests {
        use super::*;

        #[test]
        fn parses_rfc3339_timestamps() {
            let job: ImportJob = serde_json::from_str(
                r#"{"from":"2024-01-01T00:00:00Z","to":"2024-01-10T00:00:00+02:00"}"#,
            )
            .unwrap();

            assert_eq!(job.from, utc(2024, 1, 1, 0));
            assert_eq!(job.to, utc(2024, 1, 9, 22));
        }

        #[test]
        fn parses_bare_dates_as_midnight_utc() {
            let job: ImportJob =
                serde_json::from_str(r#"{"from":"2024-01-01","to":"2024-01-10"}"#).unwrap();

            assert_eq!(job.from, utc(2024, 1, 1, 0));
            assert_eq!(job.to, utc(2024, 1, 10, 0));
        }

        #[test]
        fn rejects_garbage_dates() {
            let result: Result<ImportJob, _> =
                serde_json::from_str(r#"{"from":"yesterday","to":"2024-01-10"}"#);
            assert!(result.is_err());
        }

        #[test]
        fn rejects_missing_fields() {
            let result: Result<ImportJob, _> = serde_json::from_str(r#"{"from":"2024-01-01"}"#);
            assert!(result.is_err());
        }

        #[test]
        fn day_offsets_are_whole_days() {
            let job = ImportJob::new(utc(2024, 2, 28, 9), utc(2024, 3, 5, 0));

            assert_eq!(job.day(0), utc(2024, 2, 28, 9));
            assert_eq!(job.day(1), utc(2024, 2, 29, 9));
            assert_eq!(job.day(2), utc(2024, 3, 1, 9));
        }

        #[test]
        fn ordering() {
            assert!(ImportJob::new(utc(2024, 1, 1, 0), utc(2024, 1, 1, 0)).is_ordered());
            assert!(!ImportJob::new(utc(2024, 1, 2, 0), utc(2024, 1, 1, 0)).is_ordered());
        }

        #[test]
        fn formats_dates() {
            let job = ImportJob::new(utc(2024, 1, 1, 13), utc(2024, 1, 10, 0));
            assert_eq!(job.from_date(), "2024-01-01");
            assert_eq!(job.to_date(), "2024-01-10");
        }
    }

    mod event_tests {
        use super::*;

        #[test]
        fn builder_defaults_to_utc() {
            let event = ImportEvent::new("Standup", utc(2024, 1, 1, 9), utc(2024, 1, 1, 10));

            assert_eq!(event.timezone, "UTC");
            assert!(event.notes.is_empty());
            assert!(event.tags.is_empty());
            assert_eq!(event.duration(), Duration::hours(1));
        }

        #[test]
        fn import_data_wire_shape() {
            let event = ImportEvent::new("Standup", utc(2024, 1, 1, 0), utc(2024, 1, 1, 1))
                .with_notes("daily")
                .with_tags(["demo", "example"]);
            let data = ImportData::new(vec![event]);

            insta::assert_json_snapshot!(data, @r###"
            {
              "events": [
                {
                  "title": "Standup",
                  "startDate": "2024-01-01T00:00:00Z",
                  "endDate": "2024-01-01T01:00:00Z",
                  "timezone": "UTC",
                  "notes": "daily",
                  "tags": [
                    "demo",
                    "example"
                  ]
                }
              ]
            }
            "###);
        }

        #[test]
        fn empty_import_data() {
            let data = ImportData::default();
            assert!(data.is_empty());
            assert_eq!(serde_json::to_string(&data).unwrap(), r#"{"events":[]}"#);
        }
    }

    mod result_tests {
        use super::*;

        #[test]
        fn parses_success_without_error() {
            let result: ImportResult = serde_json::from_str(r#"{"success":true}"#).unwrap();
            assert_eq!(result, ImportResult::accepted());
        }

        #[test]
        fn parses_failure_with_error() {
            let result: ImportResult =
                serde_json::from_str(r#"{"success":false,"error":"quota exceeded"}"#).unwrap();
            assert!(!result.success);
            assert_eq!(result.failure_message(), "quota exceeded");
        }

        #[test]
        fn failure_without_reason() {
            let result: ImportResult = serde_json::from_str(r#"{"success":false}"#).unwrap();
            assert_eq!(result.failure_message(), "unknown error");

            let result = ImportResult::rejected("");
            assert_eq!(result.failure_message(), "unknown error");
        }

        #[test]
        fn rejects_missing_success_flag() {
            let result: Result<ImportResult, _> = serde_json::from_str(r#"{"error":"x"}"#);
            assert!(result.is_err());
        }
    }
}
