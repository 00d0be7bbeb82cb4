use crate::extract::dates::{has_strict_date_time, strip_from_first_date};
use crate::extract::html::{collapse_whitespace, descendants_named, first_named, flattened_text};
use scraper::ElementRef;

pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct RawRow<'a> {
    /// Position among the section's rows, header included.
    pub index: usize,
    pub label: String,
    pub text: String,
    /// Paragraphs, cells or divs scanned when the row text yields no dates.
    pub child_nodes: Vec<ElementRef<'a>>,
}

#[derive(Debug, Clone, Default)]
pub struct Segmentation<'a> {
    pub rows: Vec<RawRow<'a>>,
    pub total_rows: usize,
    pub header_skipped: bool,
}

type LabelSource = for<'a> fn(ElementRef<'a>) -> Option<ElementRef<'a>>;

/// Where a row label may come from, in priority order.
static LABEL_SOURCES: [LabelSource; 4] = [first_cell, first_link, first_bold, first_header_cell];

/// Element categories searched for fallback scan targets; first non-empty wins.
static CHILD_CATEGORIES: [&[&str]; 3] = [&["p"], &["td"], &["div"]];

pub fn segment_rows(section: ElementRef<'_>, min_label_len: usize) -> Segmentation<'_> {
    let mut segmentation = Segmentation::default();

    for (index, row) in descendants_named(section, &["tr"]).enumerate() {
        segmentation.total_rows += 1;
        let text = flattened_text(row);

        if index == 0 && !has_strict_date_time(&text) {
            segmentation.header_skipped = true;
            tracing::debug!("[Extract] Skipping header row");
            continue;
        }

        segmentation.rows.push(RawRow {
            index,
            label: row_label(row, min_label_len),
            text,
            child_nodes: child_nodes(row),
        });
    }

    segmentation
}

pub fn row_label(row: ElementRef<'_>, min_label_len: usize) -> String {
    LABEL_SOURCES
        .iter()
        .filter_map(|source| source(row))
        .find_map(|element| clean_label(element, min_label_len))
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

pub fn child_nodes(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    CHILD_CATEGORIES
        .iter()
        .map(|names| descendants_named(row, names).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

fn clean_label(element: ElementRef<'_>, min_label_len: usize) -> Option<String> {
    let text = flattened_text(element);
    let cleaned = collapse_whitespace(strip_from_first_date(&text));
    (cleaned.chars().count() > min_label_len).then_some(cleaned)
}

fn first_cell(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    first_named(row, &["td"])
}

fn first_link(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    first_named(row, &["a"])
}

fn first_bold(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    first_named(row, &["strong", "b"])
}

fn first_header_cell(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    first_named(row, &["th"])
}
