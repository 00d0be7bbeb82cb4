//! Thin node helpers over `scraper` so the extraction stages only ever ask
//! for text, descendants by tag name, and first matches.

use ego_tree::NodeId;
use scraper::{ElementRef, Html};

pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of every descendant text node, stripped, joined with single spaces.
pub fn flattened_text(element: ElementRef<'_>) -> String {
    joined_text(element, " ")
}

pub fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(collapse_whitespace)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Descendant elements (excluding `element` itself) whose tag is in `names`,
/// in document order.
pub fn descendants_named<'a>(
    element: ElementRef<'a>,
    names: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| names.contains(&el.value().name()))
}

pub fn first_named<'a>(element: ElementRef<'a>, names: &'a [&'a str]) -> Option<ElementRef<'a>> {
    descendants_named(element, names).next()
}

/// Every element of the document in document order.
pub fn all_elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.tree.root().descendants().filter_map(ElementRef::wrap)
}

pub fn elements_named<'a>(
    document: &'a Html,
    names: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    all_elements(document).filter(move |el| names.contains(&el.value().name()))
}

pub fn element_by_id<'a>(document: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    all_elements(document).find(|el| el.value().id() == Some(id))
}

/// Elements that come after `anchor` in document order.
pub fn following_elements(document: &Html, anchor: NodeId) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .tree
        .root()
        .descendants()
        .skip_while(move |node| node.id() != anchor)
        .skip(1)
        .filter_map(ElementRef::wrap)
}

pub fn class_contains(element: ElementRef<'_>, needle: &str) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|class| class.to_ascii_lowercase().contains(needle))
}

pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// First `max_chars` characters of `input`.
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((index, _)) => &input[..index],
        None => input,
    }
}
