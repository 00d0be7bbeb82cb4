use crate::config::AppConfig;
use crate::error::DeadlineError;
use crate::offerings::parser::{find_profile_links, normalize_ecp_url, parse_offerings};
use crate::runtime::fetcher::{FetchedPage, Fetcher};
use crate::types::Offering;

pub fn listing_url(config: &AppConfig, course_code: &str) -> String {
    format!(
        "{}{}",
        config.listing_base_url,
        urlencoding::encode(course_code.trim())
    )
}

pub async fn fetch_listing(
    fetcher: &dyn Fetcher,
    config: &AppConfig,
    course_code: &str,
) -> Result<(String, FetchedPage), DeadlineError> {
    let url = listing_url(config, course_code);
    let page = fetcher.fetch_page(&url).await.map_err(DeadlineError::Fetch)?;
    tracing::debug!("[Offerings] {} returned {}", url, page.status);
    Ok((url, page))
}

pub async fn fetch_offerings(
    fetcher: &dyn Fetcher,
    config: &AppConfig,
    course_code: &str,
) -> Result<Vec<Offering>, DeadlineError> {
    let (_, page) = fetch_listing(fetcher, config, course_code).await?;
    let offerings = parse_offerings(&page.body)?;
    tracing::info!(
        "[Offerings] {} has {} current offerings",
        course_code,
        offerings.len()
    );
    Ok(offerings)
}

/// Normalized profile URL of the first offering that publishes one.
pub async fn resolve_profile_url(
    fetcher: &dyn Fetcher,
    config: &AppConfig,
    course_code: &str,
) -> Result<String, DeadlineError> {
    let (_, page) = fetch_listing(fetcher, config, course_code).await?;
    let hrefs = find_profile_links(&page.body, course_code)?;
    let first = hrefs.first().ok_or_else(|| DeadlineError::NoProfileAvailable {
        course_code: course_code.to_string(),
    })?;
    let url = normalize_ecp_url(first, config);
    tracing::info!("[Offerings] {} resolved to {}", course_code, url);
    Ok(url)
}
