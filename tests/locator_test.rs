mod common;

use common::load_fixture;
use deadlines::error::DeadlineError;
use deadlines::extract::html::flattened_text;
use deadlines::extract::locator::{
    find_by_heading, find_by_known_id, find_by_table_scan, locate_section, LocatorStrategy,
};
use scraper::Html;

#[test]
fn finds_section_by_known_id() {
    let document = Html::parse_document(&load_fixture("ecp_profile.html"));
    let located = locate_section(&document).expect("section should be found");
    assert_eq!(located.strategy, LocatorStrategy::ElementId);
    assert_eq!(located.element.value().id(), Some("assessment--section"));
}

#[test]
fn known_ids_are_tried_in_order() {
    let document = Html::parse_document(
        "<div id='assessment'>short</div><div id='assessment-section'>long</div>",
    );
    let element = find_by_known_id(&document).expect("an id should match");
    assert_eq!(element.value().id(), Some("assessment-section"));
}

#[test]
fn finds_table_after_assessment_heading() {
    let document = Html::parse_document(&load_fixture("ecp_heading.html"));
    let located = locate_section(&document).expect("section should be found");
    assert_eq!(located.strategy, LocatorStrategy::Heading);
    assert_eq!(located.element.value().name(), "table");
    assert!(flattened_text(located.element).starts_with("Project"));
}

#[test]
fn heading_falls_back_to_assessment_container() {
    let document = Html::parse_document(
        "<div id='main'>
            <h3>Assessment tasks</h3>
            <div class='intro'>Read carefully.</div>
            <div class='Assessment-List'><p>Quiz 01/03/2025</p></div>
        </div>",
    );
    let element = find_by_heading(&document).expect("container should be found");
    assert_eq!(element.value().attr("class"), Some("Assessment-List"));
}

#[test]
fn heading_falls_back_to_parent() {
    let document = Html::parse_document(
        "<section id='wrapper'><h2>Assessment</h2><p>Quiz 01/03/2025</p></section>",
    );
    let element = find_by_heading(&document).expect("parent should be found");
    assert_eq!(element.value().id(), Some("wrapper"));
}

#[test]
fn scans_tables_for_assessment_and_due_date() {
    let document = Html::parse_document(&load_fixture("ecp_table_scan.html"));
    let located = locate_section(&document).expect("table should be found");
    assert_eq!(located.strategy, LocatorStrategy::TableScan);
    assert!(flattened_text(located.element).contains("Due Date"));
}

#[test]
fn table_scan_needs_due_or_date() {
    let document = Html::parse_document(
        "<table><tr><td>Assessment weighting</td><td>40%</td></tr></table>",
    );
    assert!(find_by_table_scan(&document).is_none());
}

#[test]
fn reports_missing_section() {
    let document = Html::parse_document(&load_fixture("ecp_missing.html"));
    let err = locate_section(&document).expect_err("no section should be found");
    assert!(matches!(err, DeadlineError::SectionNotFound));
    assert!(err.to_string().contains("page structure may have changed"));
}
