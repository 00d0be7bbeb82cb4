//! Assessment deadline extraction for course profile pages.
//!
//! The pipeline locates the assessment section, splits it into rows, finds
//! the dates in each row, titles them, then parses and sorts the result.
//! Only a missing assessment section is an error; rows and dates that do
//! not fit are skipped and counted in [`ExtractionDiagnostics`].

pub mod dates;
pub mod html;
pub mod locator;
pub mod normalize;
pub mod rows;
pub mod titles;

use crate::config::ExtractionConfig;
use crate::error::DeadlineError;
use crate::types::DeadlineRecord;
use chrono::{DateTime, Utc};
use dates::recognize_dates;
use html::flattened_text;
use locator::{locate_section, LocatorStrategy};
use normalize::{normalize_deadlines, RawDeadline};
use rows::{segment_rows, RawRow};
use scraper::Html;
use serde::Serialize;
use titles::{build_titles, TitleRules};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionDiagnostics {
    pub strategy: Option<LocatorStrategy>,
    pub rows_seen: usize,
    pub header_skipped: bool,
    pub rows_with_dates: usize,
    pub rows_from_child_fallback: usize,
    pub rows_without_dates: usize,
    pub dates_recognized: usize,
    pub dates_skipped: usize,
    pub skipped_dates: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub deadlines: Vec<DeadlineRecord>,
    pub diagnostics: ExtractionDiagnostics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    RowText,
    ChildFallback,
    Empty,
}

pub fn extract_deadlines(html: &str, config: &ExtractionConfig) -> Result<Extraction, DeadlineError> {
    extract_deadlines_at(html, config, Utc::now())
}

/// Same as [`extract_deadlines`] with a fixed notion of "now" for
/// `days_remaining`.
pub fn extract_deadlines_at(
    html: &str,
    config: &ExtractionConfig,
    now: DateTime<Utc>,
) -> Result<Extraction, DeadlineError> {
    let document = Html::parse_document(html);
    extract_from_document(&document, config, now)
}

pub fn extract_from_document(
    document: &Html,
    config: &ExtractionConfig,
    now: DateTime<Utc>,
) -> Result<Extraction, DeadlineError> {
    let section = locate_section(document)?;
    let mut diagnostics = ExtractionDiagnostics {
        strategy: Some(section.strategy),
        ..Default::default()
    };

    let segmentation = segment_rows(section.element, config.min_label_len);
    diagnostics.rows_seen = segmentation.total_rows;
    diagnostics.header_skipped = segmentation.header_skipped;
    tracing::debug!(
        "[Extract] Found {} table rows in assessment section ({:?})",
        segmentation.total_rows,
        section.strategy
    );

    let mut collected = Vec::new();
    for row in &segmentation.rows {
        let (pairs, source) = collect_row_deadlines(row, config);
        tracing::debug!(
            "[Extract] Row {}, label '{}', {} dates ({:?})",
            row.index,
            row.label,
            pairs.len(),
            source
        );
        match source {
            RowSource::RowText => diagnostics.rows_with_dates += 1,
            RowSource::ChildFallback => diagnostics.rows_from_child_fallback += 1,
            RowSource::Empty => diagnostics.rows_without_dates += 1,
        }
        collected.extend(pairs);
    }

    diagnostics.dates_recognized = collected.len();
    let normalized = normalize_deadlines(collected, now);
    diagnostics.dates_skipped = normalized.skipped.len();
    diagnostics.skipped_dates = normalized.skipped;

    tracing::debug!(
        "[Extract] Collected {} deadlines, skipped {}",
        normalized.records.len(),
        diagnostics.dates_skipped
    );

    Ok(Extraction {
        deadlines: normalized.records,
        diagnostics,
    })
}

/// Dates from the row text, or failing that from each child element on its
/// own, each paired with its title.
pub fn collect_row_deadlines(row: &RawRow<'_>, config: &ExtractionConfig) -> (Vec<RawDeadline>, RowSource) {
    let row_rules = TitleRules {
        context_chars: config.row_context_chars,
        min_context_len: config.min_context_len,
    };
    let from_row = titled_dates(&row.text, &row.label, config, row_rules);
    if !from_row.is_empty() {
        return (from_row, RowSource::RowText);
    }

    let child_rules = TitleRules {
        context_chars: config.child_context_chars,
        ..row_rules
    };
    let from_children = row
        .child_nodes
        .iter()
        .flat_map(|child| titled_dates(&flattened_text(*child), &row.label, config, child_rules))
        .collect::<Vec<_>>();

    if from_children.is_empty() {
        (from_children, RowSource::Empty)
    } else {
        (from_children, RowSource::ChildFallback)
    }
}

fn titled_dates(text: &str, label: &str, config: &ExtractionConfig, rules: TitleRules) -> Vec<RawDeadline> {
    let matches = recognize_dates(text, &config.default_time);
    build_titles(text, label, &matches, rules)
        .into_iter()
        .zip(matches)
        .map(|(title, date)| RawDeadline {
            title,
            raw_date: date.raw_text,
        })
        .collect()
}
