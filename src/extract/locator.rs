use crate::error::DeadlineError;
use crate::extract::html::{
    class_contains, element_by_id, elements_named, flattened_text, following_elements,
    parent_element,
};
use scraper::{ElementRef, Html};
use serde::Serialize;

pub const SECTION_IDS: [&str; 3] = ["assessment--section", "assessment-section", "assessment"];
const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
const CONTAINERS: [&str; 2] = ["div", "section"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorStrategy {
    ElementId,
    Heading,
    TableScan,
}

#[derive(Debug, Clone, Copy)]
pub struct LocatedSection<'a> {
    pub element: ElementRef<'a>,
    pub strategy: LocatorStrategy,
}

type Strategy = fn(&Html) -> Option<ElementRef<'_>>;

static STRATEGIES: [(LocatorStrategy, Strategy); 3] = [
    (LocatorStrategy::ElementId, find_by_known_id),
    (LocatorStrategy::Heading, find_by_heading),
    (LocatorStrategy::TableScan, find_by_table_scan),
];

/// Runs each strategy in order; the first to produce an element wins.
pub fn locate_section(document: &Html) -> Result<LocatedSection<'_>, DeadlineError> {
    STRATEGIES
        .iter()
        .find_map(|(strategy, find)| {
            find(document).map(|element| LocatedSection {
                element,
                strategy: *strategy,
            })
        })
        .ok_or(DeadlineError::SectionNotFound)
}

pub fn find_by_known_id(document: &Html) -> Option<ElementRef<'_>> {
    SECTION_IDS
        .iter()
        .find_map(|id| element_by_id(document, id))
}

/// A heading mentioning "assessment", then the first table after it, else the
/// first container after it with an assessment class, else its parent.
pub fn find_by_heading(document: &Html) -> Option<ElementRef<'_>> {
    let heading = elements_named(document, &HEADINGS)
        .find(|heading| flattened_text(*heading).to_lowercase().contains("assessment"))?;

    following_elements(document, heading.id())
        .find(|el| el.value().name() == "table")
        .or_else(|| {
            following_elements(document, heading.id()).find(|el| {
                CONTAINERS.contains(&el.value().name()) && class_contains(*el, "assessment")
            })
        })
        .or_else(|| parent_element(heading))
}

pub fn find_by_table_scan(document: &Html) -> Option<ElementRef<'_>> {
    elements_named(document, &["table"]).find(|table| {
        let text = flattened_text(*table).to_lowercase();
        text.contains("assessment") && (text.contains("due") || text.contains("date"))
    })
}
