//! File-based logging module for movie-search
//!
//! This module sets up tracing-based logging that writes to a file instead of stdout,
//! since the application uses a TUI that occupies the terminal.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::model::{ApiError, ItemDetail, SearchOutcome};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "movie-search";
const DEFAULT_FILTER: &str = "movie_search=debug,reqwest=info,warn";

/// Initialize the logging system.
///
/// Logs are written to `.logs/movie-search.YYYY-MM-DD.log` with daily rotation.
/// The log level can be controlled via the `RUST_LOG` environment variable.
///
/// Default log levels:
/// - `movie_search` modules: DEBUG
/// - `reqwest`: INFO
/// - Other crates: WARN
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);

    // Non-blocking so slow disks never stall the UI loop
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes on drop; it has to live as long as the process
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Logging initialized - logs written to {}/", LOG_DIR);

    Ok(())
}

/// Record how a search call ended. A `Response: "False"` answer reached OMDb
/// and is logged as a rejection, apart from transport and decode failures.
pub fn log_search_result(query: &str, page: u32, result: &Result<SearchOutcome, ApiError>) {
    match result {
        Ok(SearchOutcome::Found(rows)) => {
            tracing::info!(query, page, rows = rows.len(), "Search answered");
        }
        Ok(SearchOutcome::Rejected(reason)) => {
            tracing::warn!(
                query,
                page,
                reason = reason.as_deref().unwrap_or("none given"),
                "Search rejected by OMDb"
            );
        }
        Err(e) => {
            tracing::error!(query, page, error = %e, "Search request failed");
        }
    }
}

/// Record how a lookup-by-id ended
pub fn log_detail_result(id: &str, result: &Result<ItemDetail, ApiError>) {
    match result {
        Ok(detail) => tracing::info!(id, title = %detail.title, "Details loaded"),
        Err(ApiError::Rejected(reason)) => {
            tracing::warn!(id, reason = %reason, "Lookup rejected by OMDb");
        }
        Err(e) => tracing::warn!(id, error = %e, "Failed to fetch movie details"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn rejected_search_logs_warning_with_api_reason() {
        let output = capture(|| {
            log_search_result(
                "zzzznonexistentmovie",
                1,
                &Ok(SearchOutcome::Rejected(Some("Movie not found!".to_string()))),
            )
        });

        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("Movie not found!"), "{output}");
        assert!(!output.contains("Search answered"), "{output}");
    }

    #[test]
    fn transport_failure_logs_error() {
        let output = capture(|| log_search_result("batman", 2, &Err(ApiError::Status(502))));

        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("502"), "{output}");
    }

    #[test]
    fn found_page_logs_info_with_row_count() {
        let rows = vec![crate::model::SearchResult {
            id: "tt0372784".to_string(),
            title: "Batman Begins".to_string(),
            year: "2005".to_string(),
        }];
        let output = capture(|| log_search_result("batman", 1, &Ok(SearchOutcome::Found(rows))));

        assert!(output.contains("INFO"), "{output}");
        assert!(output.contains("rows=1"), "{output}");
    }
}
