use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Date followed by a time, in the spacing variants seen on profile pages.
/// The first entry is the strict form used for header detection.
static DATE_TIME_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)\d{1,2}/\d{2}/\d{4}\s+\d{1,2}:\d{1,2}\s+[ap]m").unwrap(),
        Regex::new(r"(?i)\d{1,2}/\d{2}/\d{4}\s*\d{1,2}:\d{1,2}\s*[ap]m").unwrap(),
        Regex::new(r"(?i)\d{1,2}/\d{2}/\d{4}\s+\d{1,2}:\d{1,2}\s*[ap]m").unwrap(),
    ]
});
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}/\d{2}/\d{4}").unwrap());
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d{1,2}:\d{1,2}\s*[ap]m").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// Day/month/year portion only.
    pub date_key: String,
    /// Matched text including the time, or the date plus the default time.
    pub raw_text: String,
    /// Byte offset of the match in the scanned text.
    pub source_offset: usize,
}

/// Finds every distinct date in `text`, ordered by position. A date seen both
/// with and without a time is reported once, with its time.
pub fn recognize_dates(text: &str, default_time: &str) -> Vec<DateMatch> {
    let mut candidates: Vec<(usize, String)> = Vec::new();

    for pattern in DATE_TIME_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            candidates.push((found.start(), found.as_str().to_string()));
        }
    }

    for found in DATE_RE.find_iter(text) {
        let date = found.as_str();
        if candidates.iter().any(|(_, raw)| raw.contains(date)) {
            continue;
        }
        candidates.push((found.start(), format!("{date} {default_time}")));
    }

    let mut seen = HashSet::new();
    let mut matches = candidates
        .into_iter()
        .filter_map(|(source_offset, raw_text)| {
            let date_key = date_portion(&raw_text)?.to_string();
            if !seen.insert(date_key.clone()) {
                return None;
            }
            Some(DateMatch {
                date_key,
                raw_text,
                source_offset,
            })
        })
        .collect::<Vec<_>>();

    matches.sort_by_key(|m| m.source_offset);
    matches
}

/// True when `text` contains a date with a time in the strict spacing form.
pub fn has_strict_date_time(text: &str) -> bool {
    DATE_TIME_PATTERNS[0].is_match(text)
}

pub fn strict_date_times(text: &str) -> Vec<String> {
    DATE_TIME_PATTERNS[0]
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn date_portion(text: &str) -> Option<&str> {
    DATE_RE.find(text).map(|m| m.as_str())
}

pub fn time_portion(text: &str) -> Option<&str> {
    TIME_RE.find(text).map(|m| m.as_str())
}

/// Cuts `text` at its first date, dropping the date and everything after it.
pub fn strip_from_first_date(text: &str) -> &str {
    match DATE_RE.find(text) {
        Some(found) => text[..found.start()].trim(),
        None => text.trim(),
    }
}
