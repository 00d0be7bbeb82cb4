#![allow(dead_code)]
use async_trait::async_trait;
use deadlines::api::{router, AppState};
use deadlines::config::AppConfig;
use deadlines::runtime::fetcher::{FetchedPage, Fetcher};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub const LISTING_URL: &str =
    "https://programs-courses.uq.edu.au/course.html?course_code=ABCD1234";
pub const PROFILE_URL: &str =
    "https://course-profiles.uq.edu.au/course-profiles/ABCD1234-20250-7520#assessment";

pub fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture(filename: &str) -> String {
    let path = Path::new(&fixtures_dir()).join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub struct MockFetcher {
    pub pages: HashMap<String, FetchedPage>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    pub fn add_fixture(&mut self, url: &str, content: &str) {
        self.add_page(url, 200, content);
    }

    pub fn add_page(&mut self, url: &str, status: u16, content: &str) {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                status,
                body: content.to_string(),
            },
        );
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| format!("MockFetcher: No fixture for URL: {}", url))
    }
}

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_app(fetcher: MockFetcher) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test listener should bind");
    let addr = listener.local_addr().expect("listener has an address");
    let app = router(AppState::new(AppConfig::default(), Arc::new(fetcher)));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    format!("http://{addr}")
}
