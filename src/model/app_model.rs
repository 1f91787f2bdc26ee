//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::debounce::Debouncer;
use super::details::{DetailPanel, DetailState};
use super::omdb_client::SharedApi;
use super::search_state::{PageRequest, PageResponse, SearchState};
use super::types::{ActiveSection, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub api: Option<SharedApi>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub search_state: Arc<Mutex<SearchState>>,
    detail_panel: Arc<Mutex<Option<DetailPanel>>>,
    mount_counter: Arc<Mutex<u64>>,
    debouncer: Arc<Mutex<Debouncer>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(debounce: Duration) -> Self {
        Self {
            api: None,
            ui_state: Arc::new(Mutex::new(UiState::default())),
            search_state: Arc::new(Mutex::new(SearchState::default())),
            detail_panel: Arc::new(Mutex::new(None)),
            mount_counter: Arc::new(Mutex::new(0)),
            debouncer: Arc::new(Mutex::new(Debouncer::new(debounce))),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_api_client(&mut self, api: SharedApi) {
        self.api = Some(api);
    }

    pub async fn get_api_client(&self) -> Option<SharedApi> {
        self.api.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn append_to_search(&self, c: char, now: Instant) {
        let mut state = self.ui_state.lock().await;
        state.search_input.push(c);
        self.debouncer.lock().await.schedule(now);
    }

    pub async fn backspace_search(&self, now: Instant) {
        let mut state = self.ui_state.lock().await;
        if state.search_input.pop().is_some() {
            self.debouncer.lock().await.schedule(now);
        }
    }

    pub async fn clear_search(&self, now: Instant) {
        let mut state = self.ui_state.lock().await;
        if !state.search_input.is_empty() {
            state.search_input.clear();
            self.debouncer.lock().await.schedule(now);
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Search & Pagination
    // ========================================================================

    pub async fn get_search_state(&self) -> SearchState {
        self.search_state.lock().await.clone()
    }

    pub async fn initial_request(&self) -> PageRequest {
        self.search_state.lock().await.initial_request()
    }

    /// Commit the search input if the debounce window has elapsed
    pub async fn take_due_commit(&self, now: Instant) -> Option<PageRequest> {
        if !self.debouncer.lock().await.poll(now) {
            return None;
        }

        let input = self.ui_state.lock().await.search_input.clone();
        let mut search = self.search_state.lock().await;
        let request = search.commit_query(&input);
        self.sync_detail_panel(&search).await;
        request
    }

    /// The scroll-proximity trigger: next page once the selection nears the end
    pub async fn request_next_page_if_near_end(&self) -> Option<PageRequest> {
        let mut search = self.search_state.lock().await;
        if !search.near_end() {
            return None;
        }
        search.request_next_page()
    }

    pub async fn apply_search_response(&self, request: &PageRequest, response: PageResponse) -> bool {
        let mut search = self.search_state.lock().await;
        let applied = search.apply_response(request, response);
        self.sync_detail_panel(&search).await;
        applied
    }

    pub async fn content_move_up(&self) {
        self.search_state.lock().await.move_up();
    }

    pub async fn content_move_down(&self) {
        self.search_state.lock().await.move_down();
    }

    pub async fn content_move_by(&self, delta: isize) {
        self.search_state.lock().await.move_by(delta);
    }

    pub async fn content_select_first(&self) {
        self.search_state.lock().await.select_first();
    }

    pub async fn content_select_last(&self) {
        self.search_state.lock().await.select_last();
    }

    // ========================================================================
    // Expansion & Details
    // ========================================================================

    pub async fn get_detail_panel(&self) -> Option<DetailPanel> {
        self.detail_panel.lock().await.clone()
    }

    /// Toggle the selected row.
    ///
    /// Returns the freshly mounted panel when a row was expanded, so the
    /// caller can start its lookup.
    pub async fn toggle_selected(&self) -> Option<DetailPanel> {
        let mut search = self.search_state.lock().await;
        let id = search.selected_result()?.id.clone();
        let expanded = search.toggle_expanded(&id).map(str::to_string);

        let mut panel = self.detail_panel.lock().await;
        match expanded {
            Some(id) => {
                let mut counter = self.mount_counter.lock().await;
                *counter += 1;
                let mounted = DetailPanel::mount(&id, *counter);
                *panel = Some(mounted.clone());
                Some(mounted)
            }
            None => {
                *panel = None;
                None
            }
        }
    }

    /// Store a finished lookup; dropped if its panel is no longer mounted
    pub async fn apply_detail(&self, id: &str, mount: u64, state: DetailState) -> bool {
        let mut panel = self.detail_panel.lock().await;
        match panel.as_mut() {
            Some(current) if current.id == id && current.mount == mount => {
                current.state = state;
                true
            }
            _ => false,
        }
    }

    /// Unmount the panel when the row it belongs to is no longer expanded
    async fn sync_detail_panel(&self, search: &SearchState) {
        let mut panel = self.detail_panel.lock().await;
        let still_expanded = panel
            .as_ref()
            .is_some_and(|p| search.expanded() == Some(p.id.as_str()));
        if !still_expanded {
            *panel = None;
        }
    }
}
