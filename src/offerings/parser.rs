use crate::config::AppConfig;
use crate::error::DeadlineError;
use crate::types::Offering;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tl::{HTMLTag, Node, Parser, VDom};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const NOT_FOUND_ID: &str = "course-notfound";
const OFFERINGS_ID: &str = "course-current-offerings";
const OFFERING_YEAR_SELECTOR: &str = ".course-offering-year";
const HREF_MARKERS: [&str; 4] = ["course-profile", "course-profiles", "ecp", "profile"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingLink {
    pub text: String,
    pub href: Option<String>,
    pub classes: Vec<String>,
}

impl ListingLink {
    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Everything the resolver and the debug report need from a listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub not_found: bool,
    pub has_offerings_section: bool,
    pub offering_years: Vec<String>,
    pub links: Vec<ListingLink>,
}

type LinkFilter = fn(&ListingLink) -> bool;

/// Ways of recognising profile links, most specific first.
pub static PROFILE_LINK_STRATEGIES: [(&str, LinkFilter); 4] = [
    ("profile_available", is_profile_available),
    ("profile_class", has_profile_class),
    ("profile_in_class", mentions_profile_in_class),
    ("profile_in_href", mentions_profile_in_href),
];

fn is_profile_available(link: &ListingLink) -> bool {
    link.has_class("profile-available")
}

fn has_profile_class(link: &ListingLink) -> bool {
    link.has_class("profile")
}

fn mentions_profile_in_class(link: &ListingLink) -> bool {
    link.classes
        .iter()
        .any(|class| class.to_ascii_lowercase().contains("profile"))
}

fn mentions_profile_in_href(link: &ListingLink) -> bool {
    let href = link.href.as_deref().unwrap_or_default().to_ascii_lowercase();
    HREF_MARKERS.iter().any(|marker| href.contains(marker))
}

pub fn normalize_text(input: &str) -> String {
    let decoded = input
        .replace("&nbsp;", " ")
        .replace('\u{00A0}', " ")
        .replace("&amp;", "&");
    WHITESPACE_RE
        .replace_all(decoded.trim(), " ")
        .trim()
        .to_string()
}

pub fn parse_listing(html: &str) -> Result<ListingPage, String> {
    let dom = parse_dom(html)?;
    let parser = dom.parser();

    let not_found = element_by_id(&dom, NOT_FOUND_ID).is_some();
    let Some(offerings) = element_by_id(&dom, OFFERINGS_ID) else {
        return Ok(ListingPage {
            not_found,
            ..Default::default()
        });
    };

    let offering_years = select(offerings, parser, OFFERING_YEAR_SELECTOR)
        .into_iter()
        .map(|tag| normalize_text(&tag.inner_text(parser)))
        .collect();

    let links = select(offerings, parser, "a")
        .into_iter()
        .map(|tag| ListingLink {
            text: normalize_text(&tag.inner_text(parser)),
            href: attribute(tag, "href"),
            classes: attribute(tag, "class")
                .map(|class| class.split_whitespace().map(ToString::to_string).collect())
                .unwrap_or_default(),
        })
        .collect();

    Ok(ListingPage {
        not_found,
        has_offerings_section: true,
        offering_years,
        links,
    })
}

/// Pairs each offering year with the profile link at the same position.
pub fn parse_offerings(html: &str) -> Result<Vec<Offering>, DeadlineError> {
    let page = classify(html)?;
    let profiles = page
        .links
        .iter()
        .filter(|link| link.href.is_some() && is_profile_available(link))
        .collect::<Vec<_>>();

    Ok(page
        .offering_years
        .into_iter()
        .enumerate()
        .map(|(index, year)| Offering {
            index,
            year,
            ecp_url: profiles.get(index).and_then(|link| link.href.clone()),
        })
        .collect())
}

/// Hrefs of the profile links found by the first strategy that finds any.
pub fn find_profile_links(html: &str, course_code: &str) -> Result<Vec<String>, DeadlineError> {
    let page = classify(html)?;
    PROFILE_LINK_STRATEGIES
        .iter()
        .map(|(_, filter)| profile_hrefs(&page.links, *filter))
        .find(|hrefs| !hrefs.is_empty())
        .ok_or_else(|| DeadlineError::NoProfileAvailable {
            course_code: course_code.to_string(),
        })
}

pub fn profile_hrefs(links: &[ListingLink], filter: LinkFilter) -> Vec<String> {
    links
        .iter()
        .filter(|link| filter(link))
        .filter_map(|link| link.href.clone())
        .collect()
}

/// Absolute profile URL on the profile host, anchored at the assessment
/// section.
pub fn normalize_ecp_url(href: &str, config: &AppConfig) -> String {
    let href = href.trim();
    let profile_base = config.profile_base_url.trim_end_matches('/');
    let mut url = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("{profile_base}{href}")
    } else if !href.starts_with("http") {
        format!("{profile_base}/{href}")
    } else {
        href.to_string()
    };

    if !config.listing_host.is_empty() && url.contains(&config.listing_host) {
        url = url.replace(&config.listing_host, &config.profile_host);
    }

    if !url.contains("#assessment") {
        url.push_str("#assessment");
    }
    url
}

fn classify(html: &str) -> Result<ListingPage, DeadlineError> {
    let page = parse_listing(html).map_err(DeadlineError::Fetch)?;
    if page.not_found {
        return Err(DeadlineError::CourseNotFound);
    }
    if !page.has_offerings_section {
        return Err(DeadlineError::CourseNotOffered);
    }
    Ok(page)
}

fn parse_dom(html: &str) -> Result<VDom<'_>, String> {
    tl::parse(html, tl::ParserOptions::default()).map_err(|e| format!("Failed to parse HTML: {e}"))
}

fn element_by_id<'p, 'a>(dom: &'p VDom<'a>, id: &str) -> Option<&'p HTMLTag<'a>> {
    dom.nodes()
        .iter()
        .filter_map(Node::as_tag)
        .find(|tag| attribute(tag, "id").as_deref() == Some(id))
}

fn select<'p, 'a>(tag: &'p HTMLTag<'a>, parser: &'p Parser<'a>, selector: &'p str) -> Vec<&'p HTMLTag<'a>> {
    let Some(handles) = tag.query_selector(parser, selector) else {
        return Vec::new();
    };
    handles
        .filter_map(|handle| handle.get(parser))
        .filter_map(Node::as_tag)
        .collect()
}

fn attribute(tag: &HTMLTag<'_>, name: &'static str) -> Option<String> {
    tag.attributes()
        .get(name)
        .flatten()
        .map(|value| value.as_utf8_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_entities_and_whitespace() {
        assert_eq!(normalize_text("  Semester&nbsp;1,\n 2025 "), "Semester 1, 2025");
    }
}
