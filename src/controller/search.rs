//! Search-related controller methods (query commits, pagination)

use std::time::Instant;
use tokio::task::JoinHandle;

use crate::model::{PageRequest, PageResponse};
use crate::logging::log_search_result;
use super::AppController;

impl AppController {
    /// Issue the request for the default query that the list starts with
    pub async fn start(&self) -> JoinHandle<()> {
        let request = self.model.lock().await.initial_request().await;
        self.spawn_search(request)
    }

    /// Commit the search input once it has been idle for the debounce window
    pub async fn tick(&self, now: Instant) -> Option<JoinHandle<()>> {
        let request = self.model.lock().await.take_due_commit(now).await?;
        tracing::debug!(query = %request.query, "Query committed");
        Some(self.spawn_search(request))
    }

    /// Scroll-proximity trigger, called after the selection moved towards the end
    pub async fn load_more_if_near_end(&self) -> Option<JoinHandle<()>> {
        let request = self.model.lock().await.request_next_page_if_near_end().await?;
        Some(self.spawn_search(request))
    }

    fn spawn_search(&self, request: PageRequest) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.perform_search(request).await;
        })
    }

    pub async fn perform_search(&self, request: PageRequest) {
        tracing::debug!(query = %request.query, page = request.page, "Search request started");

        let Some(api) = self.model.lock().await.get_api_client().await else {
            tracing::warn!("No API client configured, dropping search request");
            return;
        };

        let result = api.search(&request.query, request.page).await;
        log_search_result(&request.query, request.page, &result);

        let response = match result {
            Ok(outcome) => PageResponse::Outcome(outcome),
            Err(_) => PageResponse::NetworkFailure,
        };

        let model = self.model.lock().await;
        if model.apply_search_response(&request, response).await {
            let search = model.get_search_state().await;
            tracing::info!(
                query = %request.query,
                page = request.page,
                loaded = search.results().len(),
                end_reached = search.is_end_reached(),
                "Search page applied"
            );
        } else {
            tracing::debug!(
                query = %request.query,
                page = request.page,
                "Dropped response for superseded query"
            );
        }
    }
}
