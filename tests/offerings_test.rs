mod common;

use common::{load_fixture, MockFetcher, LISTING_URL, PROFILE_URL};
use deadlines::config::AppConfig;
use deadlines::error::DeadlineError;
use deadlines::offerings::discover::{fetch_offerings, listing_url, resolve_profile_url};
use deadlines::offerings::parser::{find_profile_links, normalize_ecp_url, parse_offerings};

const EFGH_LISTING_URL: &str =
    "https://programs-courses.uq.edu.au/course.html?course_code=EFGH5678";

#[test]
fn builds_listing_url_from_course_code() {
    let config = AppConfig::default();
    assert_eq!(listing_url(&config, "ABCD1234"), LISTING_URL);
    assert_eq!(listing_url(&config, " ABCD1234 "), LISTING_URL);
    assert!(listing_url(&config, "AB CD").ends_with("course_code=AB%20CD"));
}

#[test]
fn pairs_offering_years_with_profile_links() {
    let offerings = parse_offerings(&load_fixture("listing_offered.html")).unwrap();
    assert_eq!(offerings.len(), 3);

    assert_eq!(offerings[0].index, 0);
    assert_eq!(offerings[0].year, "Semester 1, 2025");
    assert_eq!(
        offerings[0].ecp_url.as_deref(),
        Some("/course-profiles/ABCD1234-20250-7520")
    );
    assert_eq!(offerings[1].year, "Semester 2, 2025");
    assert_eq!(
        offerings[1].ecp_url.as_deref(),
        Some("https://programs-courses.uq.edu.au/course-profiles/ABCD1234-20260-7520")
    );
    assert_eq!(offerings[2].year, "Summer Semester, 2025");
    assert_eq!(offerings[2].ecp_url, None);
}

#[test]
fn classifies_missing_and_unoffered_courses() {
    assert!(matches!(
        parse_offerings(&load_fixture("listing_not_found.html")),
        Err(DeadlineError::CourseNotFound)
    ));
    assert!(matches!(
        parse_offerings(&load_fixture("listing_not_offered.html")),
        Err(DeadlineError::CourseNotOffered)
    ));
}

#[test]
fn finds_profile_links_by_href_when_no_class_matches() {
    let hrefs = find_profile_links(&load_fixture("listing_profile_in_href.html"), "EFGH5678").unwrap();
    assert_eq!(
        hrefs,
        vec!["//course-profiles.uq.edu.au/course-profiles/EFGH5678-20250-7520"]
    );
}

#[test]
fn reports_offering_without_profile() {
    let err = find_profile_links(&load_fixture("listing_no_profile.html"), "THES7000").unwrap_err();
    match err {
        DeadlineError::NoProfileAvailable { course_code } => assert_eq!(course_code, "THES7000"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn normalizes_profile_urls() {
    let config = AppConfig::default();
    assert_eq!(
        normalize_ecp_url("/course-profiles/ABCD1234-20250-7520", &config),
        PROFILE_URL
    );
    assert_eq!(
        normalize_ecp_url("//course-profiles.uq.edu.au/course-profiles/X-1", &config),
        "https://course-profiles.uq.edu.au/course-profiles/X-1#assessment"
    );
    assert_eq!(
        normalize_ecp_url("course-profiles/X-1", &config),
        "https://course-profiles.uq.edu.au/course-profiles/X-1#assessment"
    );
    assert_eq!(
        normalize_ecp_url(
            "https://programs-courses.uq.edu.au/course-profiles/X-1",
            &config
        ),
        "https://course-profiles.uq.edu.au/course-profiles/X-1#assessment"
    );
    assert_eq!(normalize_ecp_url(PROFILE_URL, &config), PROFILE_URL);
}

#[tokio::test]
async fn discovers_offerings_through_fetcher() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(LISTING_URL, &load_fixture("listing_offered.html"));

    let offerings = fetch_offerings(&fetcher, &AppConfig::default(), "ABCD1234")
        .await
        .unwrap();
    assert_eq!(offerings.len(), 3);
}

#[tokio::test]
async fn resolves_first_profile_url() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(LISTING_URL, &load_fixture("listing_offered.html"));

    let url = resolve_profile_url(&fetcher, &AppConfig::default(), "ABCD1234")
        .await
        .unwrap();
    assert_eq!(url, PROFILE_URL);
}

#[tokio::test]
async fn resolves_protocol_relative_profile_url() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(EFGH_LISTING_URL, &load_fixture("listing_profile_in_href.html"));

    let url = resolve_profile_url(&fetcher, &AppConfig::default(), "EFGH5678")
        .await
        .unwrap();
    assert_eq!(
        url,
        "https://course-profiles.uq.edu.au/course-profiles/EFGH5678-20250-7520#assessment"
    );
}

#[tokio::test]
async fn listing_is_classified_even_on_error_status() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_page(LISTING_URL, 404, &load_fixture("listing_not_found.html"));

    let result = fetch_offerings(&fetcher, &AppConfig::default(), "ABCD1234").await;
    assert!(matches!(result, Err(DeadlineError::CourseNotFound)));
}

#[tokio::test]
async fn unreachable_listing_is_a_fetch_error() {
    let fetcher = MockFetcher::new();
    let result = fetch_offerings(&fetcher, &AppConfig::default(), "ABCD1234").await;
    assert!(matches!(result, Err(DeadlineError::Fetch(_))));
}
