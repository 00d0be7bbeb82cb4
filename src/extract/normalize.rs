use crate::extract::dates::time_portion;
use crate::types::DeadlineRecord;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

const DUE_FORMAT: &str = "%d/%m/%Y %I:%M %p";
const DISPLAY_FORMAT: &str = "%d-%m-%Y %H:%M:%S";
const MILLIS_PER_DAY: i64 = 86_400_000;

static DUE_PARTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2})/(\d{1,2})/(\d{4})\s*(\d{1,2}):(\d{1,2})\s*([ap]m)\s*$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeadline {
    pub title: String,
    pub raw_date: String,
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<DeadlineRecord>,
    pub skipped: Vec<String>,
}

/// Turns collected (title, date text) pairs into records sorted by due time.
/// Unparsable dates are set aside in `skipped` rather than failing the batch.
pub fn normalize_deadlines(raw: Vec<RawDeadline>, now: DateTime<Utc>) -> Normalized {
    let mut normalized = Normalized::default();

    for deadline in raw {
        let Some(due) = parse_due(&deadline.raw_date) else {
            tracing::warn!("[Extract] Could not parse date '{}'", deadline.raw_date);
            normalized.skipped.push(deadline.raw_date);
            continue;
        };

        normalized.records.push(DeadlineRecord {
            title: deadline.title,
            due_timestamp: due,
            due_time_display: time_portion(&deadline.raw_date)
                .unwrap_or_default()
                .to_string(),
            due_date_display: due.format(DISPLAY_FORMAT).to_string(),
            days_remaining: days_between(now, due),
        });
    }

    normalized.records.sort_by_key(|record| record.due_timestamp);
    normalized
}

/// Parses `day/month/year hour:minute am|pm` as a UTC wall-clock time.
pub fn parse_due(raw: &str) -> Option<DateTime<Utc>> {
    let captures = DUE_PARTS_RE.captures(raw)?;
    let canonical = format!(
        "{}/{}/{} {}:{} {}",
        &captures[1],
        &captures[2],
        &captures[3],
        &captures[4],
        &captures[5],
        captures[6].to_ascii_uppercase()
    );
    NaiveDateTime::parse_from_str(&canonical, DUE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Whole days from `now` until `due`, rounded down.
pub fn days_between(now: DateTime<Utc>, due: DateTime<Utc>) -> i64 {
    (due - now).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_irregular_spacing_and_case() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 0).unwrap();
        assert_eq!(parse_due("01/03/2025 11:59 pm"), Some(expected));
        assert_eq!(parse_due("1/03/2025 11:59PM"), Some(expected));
        assert_eq!(parse_due("01/03/202511:59 Pm"), Some(expected));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse_due("31/02/2025 8:00 am"), None);
        assert_eq!(parse_due("01/03/2025 13:00 pm"), None);
        assert_eq!(parse_due("not a date"), None);
    }

    #[test]
    fn day_difference_rounds_down() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let due = Utc.with_ymd_and_hms(2025, 3, 3, 11, 0, 0).unwrap();
        assert_eq!(days_between(now, due), 1);
        let past = Utc.with_ymd_and_hms(2025, 3, 1, 11, 0, 0).unwrap();
        assert_eq!(days_between(now, past), -1);
    }
}
