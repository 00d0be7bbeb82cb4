//! Introspection reports for diagnosing profile and listing layout changes.

use crate::config::ExtractionConfig;
use crate::extract::dates::strict_date_times;
use crate::extract::html::{descendants_named, elements_named, flattened_text, joined_text, truncate_chars};
use crate::extract::locator::find_by_known_id;
use crate::extract::{extract_from_document, ExtractionDiagnostics};
use crate::offerings::parser::{parse_listing, profile_hrefs, ListingLink, PROFILE_LINK_STRATEGIES};
use chrono::Utc;
use scraper::Html;
use serde::Serialize;
use std::collections::BTreeMap;

const MAX_ROWS: usize = 10;
const MAX_ROW_HTML_CHARS: usize = 500;
const MAX_ROW_TEXT_CHARS: usize = 200;
const MAX_SAMPLE_LINKS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct RowReport {
    pub index: usize,
    pub html: String,
    pub text: String,
    pub td_count: usize,
    pub dates_found: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EcpReport {
    pub url: String,
    pub status_code: u16,
    pub has_assessment_section: bool,
    pub assessment_section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<RowReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tables: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_ids: Option<Vec<String>>,
    pub diagnostics: Option<ExtractionDiagnostics>,
    pub extraction_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseReport {
    pub course_code: String,
    pub url: String,
    pub status_code: u16,
    pub has_notfound: bool,
    pub has_offerings_section: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_links_in_offerings: Option<usize>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub profile_link_counts: BTreeMap<&'static str, usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sample_links: Vec<ListingLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub offerings_text: Vec<String>,
    pub parse_error: Option<String>,
}

pub fn inspect_ecp(url: &str, status_code: u16, html: &str, config: &ExtractionConfig) -> EcpReport {
    let document = Html::parse_document(html);
    let section = find_by_known_id(&document);

    let mut report = EcpReport {
        url: url.to_string(),
        status_code,
        has_assessment_section: section.is_some(),
        assessment_section_id: section.and_then(|el| el.value().id().map(ToString::to_string)),
        row_count: None,
        rows: Vec::new(),
        total_tables: None,
        table_ids: None,
        diagnostics: None,
        extraction_error: None,
    };

    match section {
        Some(section) => {
            let rows = descendants_named(section, &["tr"]).collect::<Vec<_>>();
            report.row_count = Some(rows.len());
            report.rows = rows
                .into_iter()
                .take(MAX_ROWS)
                .enumerate()
                .map(|(index, row)| RowReport {
                    index,
                    html: truncate_chars(&row.html(), MAX_ROW_HTML_CHARS).to_string(),
                    text: truncate_chars(&joined_text(row, " | "), MAX_ROW_TEXT_CHARS).to_string(),
                    td_count: descendants_named(row, &["td"]).count(),
                    dates_found: strict_date_times(&flattened_text(row)),
                })
                .collect();
        }
        None => {
            let tables = elements_named(&document, &["table"]).collect::<Vec<_>>();
            report.total_tables = Some(tables.len());
            report.table_ids = Some(
                tables
                    .iter()
                    .filter_map(|table| table.value().id().map(ToString::to_string))
                    .collect(),
            );
        }
    }

    match extract_from_document(&document, config, Utc::now()) {
        Ok(extraction) => report.diagnostics = Some(extraction.diagnostics),
        Err(err) => report.extraction_error = Some(err.to_string()),
    }

    report
}

pub fn inspect_course(course_code: &str, url: &str, status_code: u16, html: &str) -> CourseReport {
    let mut report = CourseReport {
        course_code: course_code.to_string(),
        url: url.to_string(),
        status_code,
        has_notfound: false,
        has_offerings_section: false,
        total_links_in_offerings: None,
        profile_link_counts: BTreeMap::new(),
        sample_links: Vec::new(),
        offerings_text: Vec::new(),
        parse_error: None,
    };

    let page = match parse_listing(html) {
        Ok(page) => page,
        Err(err) => {
            report.parse_error = Some(err);
            return report;
        }
    };

    report.has_notfound = page.not_found;
    report.has_offerings_section = page.has_offerings_section;
    if page.has_offerings_section {
        report.total_links_in_offerings = Some(page.links.len());
        report.profile_link_counts = PROFILE_LINK_STRATEGIES
            .iter()
            .map(|(name, filter)| (*name, profile_hrefs(&page.links, *filter).len()))
            .collect();
        report.sample_links = page.links.iter().take(MAX_SAMPLE_LINKS).cloned().collect();
        report.offerings_text = page.offering_years;
    }

    report
}
