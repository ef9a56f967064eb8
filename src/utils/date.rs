//! Timestamps: generated ids and the on-disk date format.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Date format used inside post documents (UTC, whole seconds).
pub const DOCUMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Last value handed out by [`next_stamp`].
static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// High-resolution, strictly increasing timestamp (nanoseconds since epoch).
///
/// Two calls in the same process never return the same value, even when the
/// clock does not advance between them.
pub fn next_stamp() -> i64 {
    let now = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX / 2);
    let prev = LAST_STAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(prev + 1)
}

/// Generate an opaque id from the current time.
#[inline]
pub fn next_id() -> String {
    next_stamp().to_string()
}

/// Format a timestamp for a post document.
pub fn format_document_date(date: &DateTime<Utc>) -> String {
    date.format(DOCUMENT_DATE_FORMAT).to_string()
}

/// Parse a document date.
///
/// Accepts the document format and RFC 3339 (`2024-01-15T08:30:00Z`).
pub fn parse_document_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, DOCUMENT_DATE_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_stamp_strictly_increasing() {
        let mut last = next_stamp();
        for _ in 0..1000 {
            let stamp = next_stamp();
            assert!(stamp > last);
            last = stamp;
        }
    }

    #[test]
    fn test_next_id_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..250).map(|_| next_id()).collect::<Vec<_>>()))
            .collect();

        let mut ids: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_document_date_roundtrip() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 5).unwrap();
        let text = format_document_date(&date);
        assert_eq!(text, "2024-01-15 08:30:05");
        assert_eq!(parse_document_date(&text), Some(date));
    }

    #[test]
    fn test_parse_document_date_rfc3339() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(parse_document_date("2024-01-15T08:30:00Z"), Some(date));
        assert_eq!(parse_document_date("2024-01-15T10:30:00+02:00"), Some(date));
    }

    #[test]
    fn test_parse_document_date_invalid() {
        assert_eq!(parse_document_date(""), None);
        assert_eq!(parse_document_date("yesterday"), None);
        assert_eq!(parse_document_date("2024-13-01 00:00:00"), None);
    }
}
