use crate::extract::Extraction;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. `RUST_LOG` wins over the default filter.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn log_extraction(url: &str, extraction: &Extraction) {
    let diagnostics = &extraction.diagnostics;
    tracing::info!(
        url,
        strategy = ?diagnostics.strategy,
        rows = diagnostics.rows_seen,
        child_fallback_rows = diagnostics.rows_from_child_fallback,
        dates_skipped = diagnostics.dates_skipped,
        "[Extract] Extracted {} deadlines",
        extraction.deadlines.len()
    );
    for raw in &diagnostics.skipped_dates {
        tracing::debug!(url, "[Extract] Skipped unparsable date '{}'", raw);
    }
}
