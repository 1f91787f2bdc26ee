//! Row expansion and lazy detail lookups

use tokio::task::JoinHandle;

use crate::model::{DetailPanel, DetailState};
use crate::logging::log_detail_result;
use super::AppController;

impl AppController {
    /// Expand or collapse the selected row; expanding starts a lookup
    pub async fn toggle_selected(&self) -> Option<JoinHandle<()>> {
        let panel = self.model.lock().await.toggle_selected().await?;
        let controller = self.clone();
        Some(tokio::spawn(async move {
            controller.fetch_details(panel).await;
        }))
    }

    /// Lookup for a freshly mounted panel. Failures are logged and leave the
    /// row without details.
    pub async fn fetch_details(&self, panel: DetailPanel) {
        tracing::debug!(id = %panel.id, mount = panel.mount, "Lookup started");

        let Some(api) = self.model.lock().await.get_api_client().await else {
            tracing::warn!("No API client configured, dropping detail lookup");
            return;
        };

        let result = api.details(&panel.id).await;
        log_detail_result(&panel.id, &result);
        let state = match result {
            Ok(detail) => DetailState::Loaded(detail),
            Err(_) => DetailState::Failed,
        };

        let applied = self
            .model
            .lock()
            .await
            .apply_detail(&panel.id, panel.mount, state)
            .await;
        if !applied {
            tracing::debug!(id = %panel.id, mount = panel.mount, "Dropped details for unmounted row");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::model::{ApiError, DetailState};
    use super::super::test_support::{controller_with, detail, rows, FakeApi};

    async fn loaded_controller(api: Arc<FakeApi>) -> super::AppController {
        api.push_search(Ok(rows("tt", 10)));
        let controller = controller_with(api);
        controller.start().await.await.unwrap();
        controller
    }

    #[tokio::test]
    async fn expanding_a_row_fetches_its_details() {
        let api = Arc::new(FakeApi::default());
        api.push_detail(Ok(detail("tt0")));
        let controller = loaded_controller(api.clone()).await;

        controller.toggle_selected().await.expect("lookup spawned").await.unwrap();

        assert_eq!(api.lookups(), vec!["tt0".to_string()]);
        let panel = controller.model.lock().await.get_detail_panel().await.unwrap();
        assert_eq!(panel.state, DetailState::Loaded(detail("tt0")));
    }

    #[tokio::test]
    async fn expanding_a_second_row_collapses_the_first() {
        let api = Arc::new(FakeApi::default());
        api.push_detail(Ok(detail("tt0")));
        api.push_detail(Ok(detail("tt1")));
        let controller = loaded_controller(api.clone()).await;

        controller.toggle_selected().await.unwrap().await.unwrap();
        controller.model.lock().await.content_move_down().await;
        controller.toggle_selected().await.unwrap().await.unwrap();

        {
            let model = controller.model.lock().await;
            assert_eq!(model.get_search_state().await.expanded(), Some("tt1"));
            let panel = model.get_detail_panel().await.unwrap();
            assert_eq!(panel.id, "tt1");
            assert_eq!(panel.detail().map(|d| d.director.as_str()), Some("Jane Doe"));
        }

        // collapsing B leaves nothing expanded
        assert!(controller.toggle_selected().await.is_none());
        let model = controller.model.lock().await;
        assert_eq!(model.get_search_state().await.expanded(), None);
        assert_eq!(model.get_detail_panel().await, None);
    }

    #[tokio::test]
    async fn reexpanding_fetches_again() {
        let api = Arc::new(FakeApi::default());
        api.push_detail(Ok(detail("tt0")));
        api.push_detail(Ok(detail("tt0")));
        let controller = loaded_controller(api.clone()).await;

        controller.toggle_selected().await.unwrap().await.unwrap();
        assert!(controller.toggle_selected().await.is_none());
        controller.toggle_selected().await.unwrap().await.unwrap();

        assert_eq!(api.lookups(), vec!["tt0".to_string(), "tt0".to_string()]);
    }

    #[tokio::test]
    async fn failed_lookup_renders_no_details_and_sets_no_error() {
        let api = Arc::new(FakeApi::default());
        api.push_detail(Err(ApiError::Rejected("Incorrect IMDb ID.".to_string())));
        let controller = loaded_controller(api.clone()).await;

        controller.toggle_selected().await.unwrap().await.unwrap();

        let model = controller.model.lock().await;
        let panel = model.get_detail_panel().await.unwrap();
        assert_eq!(panel.state, DetailState::Failed);
        assert_eq!(panel.detail(), None);
        assert_eq!(model.get_search_state().await.error(), None);
    }

    #[tokio::test]
    async fn toggling_with_no_rows_does_nothing() {
        let api = Arc::new(FakeApi::default());
        api.push_search(Err(ApiError::Status(502)));
        let controller = controller_with(api.clone());
        controller.start().await.await.unwrap();

        assert!(controller.toggle_selected().await.is_none());
        assert!(api.lookups().is_empty());
    }
}
