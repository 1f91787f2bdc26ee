//! Query, pagination and result-list state for the search view
//!
//! All transitions are plain synchronous methods so the controller can apply
//! them under a single lock and tests can drive them without a runtime.

use super::omdb_client::SearchOutcome;
use super::types::SearchResult;

/// Term searched when the committed input is empty
pub const DEFAULT_QUERY: &str = "batman";
/// Nominal OMDb page size; a shorter page means there are no more
pub const PAGE_SIZE: usize = 10;
/// How close to the end of the list the selection must get to load the next page
pub const PAGINATION_THRESHOLD: usize = 3;

pub const FALLBACK_ERROR: &str = "Unable to fetch movies.";
pub const NETWORK_ERROR: &str = "An error occurred while fetching movies.";

/// One search call, tagged with the query session it belongs to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub query: String,
    pub page: u32,
    pub generation: u64,
}

/// How a search call ended, as seen by the state machine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageResponse {
    Outcome(SearchOutcome),
    /// Transport, HTTP status or decode failure
    NetworkFailure,
}

#[derive(Clone, Debug)]
pub struct SearchState {
    query: String,
    page: u32,
    results: Vec<SearchResult>,
    end_reached: bool,
    in_flight: usize,
    error: Option<String>,
    /// Id of the single expanded row
    expanded: Option<String>,
    selected: usize,
    generation: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            page: 1,
            results: Vec::new(),
            end_reached: false,
            in_flight: 0,
            error: None,
            expanded: None,
            selected: 0,
            generation: 0,
        }
    }
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_end_reached(&self) -> bool {
        self.end_reached
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The error line is only shown while there is nothing else to show
    pub fn visible_error(&self) -> Option<&str> {
        if self.results.is_empty() {
            self.error()
        } else {
            None
        }
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }

    /// Request for the current query and page, used once at startup
    pub fn initial_request(&mut self) -> PageRequest {
        self.begin_request()
    }

    /// Commit debounced input as the active query.
    ///
    /// Returns the page-1 request to issue, or `None` when neither the query
    /// nor the page actually changed.
    pub fn commit_query(&mut self, input: &str) -> Option<PageRequest> {
        let term = if input.is_empty() { DEFAULT_QUERY } else { input };
        let changed = term != self.query || self.page != 1;

        self.query = term.to_string();
        self.page = 1;
        self.end_reached = false;

        if !changed {
            return None;
        }

        self.generation += 1;
        self.results.clear();
        self.expanded = None;
        self.selected = 0;
        Some(self.begin_request())
    }

    /// Advance to the next page unless a fetch is running or the end was reached
    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        if self.is_loading() || self.end_reached {
            return None;
        }
        self.page += 1;
        Some(self.begin_request())
    }

    /// Whether the selection is close enough to the end to want another page.
    /// An empty list has nothing to scroll, so it never asks for more.
    pub fn near_end(&self) -> bool {
        !self.results.is_empty() && self.selected + PAGINATION_THRESHOLD >= self.results.len()
    }

    fn begin_request(&mut self) -> PageRequest {
        self.in_flight += 1;
        self.error = None;
        PageRequest {
            query: self.query.clone(),
            page: self.page,
            generation: self.generation,
        }
    }

    /// Fold a finished search call into the state.
    ///
    /// Returns `false` when the response belonged to an older query session and
    /// was dropped.
    pub fn apply_response(&mut self, request: &PageRequest, response: PageResponse) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if request.generation != self.generation {
            return false;
        }

        match response {
            PageResponse::Outcome(SearchOutcome::Found(mut rows)) => {
                self.end_reached = rows.len() < PAGE_SIZE;
                if request.page == 1 {
                    self.results = rows;
                    self.selected = 0;
                } else {
                    self.results.append(&mut rows);
                }
            }
            PageResponse::Outcome(SearchOutcome::Rejected(message)) => {
                if request.page == 1 {
                    self.results.clear();
                    self.selected = 0;
                    self.expanded = None;
                }
                self.error = Some(message.unwrap_or_else(|| FALLBACK_ERROR.to_string()));
                self.end_reached = true;
            }
            PageResponse::NetworkFailure => {
                self.error = Some(NETWORK_ERROR.to_string());
            }
        }
        true
    }

    /// Toggle the row with `id`; returns the id that is expanded afterwards
    pub fn toggle_expanded(&mut self, id: &str) -> Option<&str> {
        if self.expanded.as_deref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.to_string());
        }
        self.expanded.as_deref()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected < self.results.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn move_by(&mut self, delta: isize) {
        let last = self.results.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.results.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(prefix: &str, count: usize) -> Vec<SearchResult> {
        (0..count)
            .map(|i| SearchResult {
                id: format!("{prefix}{i}"),
                title: format!("{prefix} title {i}"),
                year: "2001".to_string(),
            })
            .collect()
    }

    fn found(prefix: &str, count: usize) -> PageResponse {
        PageResponse::Outcome(SearchOutcome::Found(rows(prefix, count)))
    }

    #[test]
    fn initial_request_uses_default_term_on_page_one() {
        let mut state = SearchState::default();
        let request = state.initial_request();

        assert_eq!(request.query, DEFAULT_QUERY);
        assert_eq!(request.page, 1);
        assert!(state.is_loading());
    }

    #[test]
    fn full_first_page_replaces_results_and_keeps_paginating() {
        let mut state = SearchState::default();
        let request = state.initial_request();

        assert!(state.apply_response(&request, found("bat", 10)));

        assert_eq!(state.results().len(), 10);
        assert!(!state.is_end_reached());
        assert!(!state.is_loading());
        assert_eq!(state.expanded(), None);
        assert_eq!(state.visible_error(), None);
    }

    #[test]
    fn next_page_appends_and_short_page_ends_pagination() {
        let mut state = SearchState::default();
        let first = state.initial_request();
        state.apply_response(&first, found("a", 10));

        let second = state.request_next_page().expect("page 2 should be requested");
        assert_eq!(second.page, 2);
        assert_eq!(second.query, DEFAULT_QUERY);

        state.apply_response(&second, found("b", 4));
        assert_eq!(state.results().len(), 14);
        assert_eq!(state.results()[10].id, "b0");
        assert!(state.is_end_reached());

        assert_eq!(state.request_next_page(), None);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn no_page_increment_while_a_fetch_is_outstanding() {
        let mut state = SearchState::default();
        let _first = state.initial_request();

        assert_eq!(state.request_next_page(), None);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn committing_new_query_resets_page_and_end_flag() {
        let mut state = SearchState::default();
        let first = state.initial_request();
        state.apply_response(&first, found("a", 3));
        assert!(state.is_end_reached());

        let request = state.commit_query("alien").expect("new query issues a request");
        assert_eq!(request.query, "alien");
        assert_eq!(request.page, 1);
        assert_eq!(state.page(), 1);
        assert!(!state.is_end_reached());
        assert!(state.results().is_empty());
    }

    #[test]
    fn empty_input_commits_default_term() {
        let mut state = SearchState::default();
        let first = state.initial_request();
        state.apply_response(&first, found("a", 10));
        state.commit_query("alien");

        let request = state.commit_query("").expect("switching back issues a request");
        assert_eq!(request.query, DEFAULT_QUERY);
    }

    #[test]
    fn recommitting_same_query_on_page_one_issues_nothing() {
        let mut state = SearchState::default();
        let first = state.initial_request();
        state.apply_response(&first, found("a", 10));

        assert_eq!(state.commit_query(""), None);
        assert_eq!(state.commit_query(DEFAULT_QUERY), None);
        assert_eq!(state.results().len(), 10);
    }

    #[test]
    fn recommitting_same_query_past_page_one_restarts_from_page_one() {
        let mut state = SearchState::default();
        let first = state.initial_request();
        state.apply_response(&first, found("a", 10));
        let second = state.request_next_page().unwrap();
        state.apply_response(&second, found("b", 10));

        let request = state.commit_query(DEFAULT_QUERY).expect("page reset issues a request");
        assert_eq!(request.page, 1);
    }

    #[test]
    fn api_rejection_on_first_page_clears_list_and_shows_message() {
        let mut state = SearchState::default();
        let request = state.commit_query("zzzznonexistentmovie").unwrap();

        state.apply_response(
            &request,
            PageResponse::Outcome(SearchOutcome::Rejected(Some("Movie not found!".to_string()))),
        );

        assert!(state.results().is_empty());
        assert_eq!(state.visible_error(), Some("Movie not found!"));
        assert!(state.is_end_reached());
    }

    #[test]
    fn api_rejection_without_message_uses_fallback() {
        let mut state = SearchState::default();
        let request = state.initial_request();
        state.apply_response(&request, PageResponse::Outcome(SearchOutcome::Rejected(None)));

        assert_eq!(state.visible_error(), Some(FALLBACK_ERROR));
    }

    #[test]
    fn rejection_on_later_page_keeps_rows_and_hides_error() {
        let mut state = SearchState::default();
        let first = state.initial_request();
        state.apply_response(&first, found("a", 10));
        let second = state.request_next_page().unwrap();

        state.apply_response(
            &second,
            PageResponse::Outcome(SearchOutcome::Rejected(Some("Movie not found!".to_string()))),
        );

        assert_eq!(state.results().len(), 10);
        assert_eq!(state.error(), Some("Movie not found!"));
        assert_eq!(state.visible_error(), None);
        assert!(state.is_end_reached());
    }

    #[test]
    fn network_failure_keeps_results_and_sets_generic_error() {
        let mut state = SearchState::default();
        let first = state.initial_request();
        state.apply_response(&first, found("a", 10));
        let second = state.request_next_page().unwrap();

        state.apply_response(&second, PageResponse::NetworkFailure);

        assert_eq!(state.results().len(), 10);
        assert_eq!(state.error(), Some(NETWORK_ERROR));
        assert!(!state.is_loading());
        assert!(!state.is_end_reached());
    }

    #[test]
    fn failed_first_page_never_triggers_pagination() {
        let mut state = SearchState::default();
        let first = state.initial_request();
        state.apply_response(&first, PageResponse::NetworkFailure);

        assert!(state.results().is_empty());
        assert!(!state.is_end_reached());
        assert!(!state.near_end());
    }

    #[test]
    fn stale_response_from_previous_query_is_dropped() {
        let mut state = SearchState::default();
        let old = state.initial_request();
        let new = state.commit_query("alien").unwrap();

        assert!(!state.apply_response(&old, found("old", 10)));
        assert!(state.results().is_empty());
        assert!(state.is_loading());

        assert!(state.apply_response(&new, found("alien", 2)));
        assert_eq!(state.results()[0].id, "alien0");
        assert!(!state.is_loading());
    }

    #[test]
    fn expanding_second_row_collapses_first() {
        let mut state = SearchState::default();

        assert_eq!(state.toggle_expanded("a"), Some("a"));
        assert_eq!(state.toggle_expanded("b"), Some("b"));
        assert_eq!(state.expanded(), Some("b"));
        assert_eq!(state.toggle_expanded("b"), None);
        assert_eq!(state.expanded(), None);
    }

    #[test]
    fn selection_stays_within_loaded_rows() {
        let mut state = SearchState::default();
        let first = state.initial_request();
        state.apply_response(&first, found("a", 10));

        state.move_up();
        assert_eq!(state.selected(), 0);
        state.move_by(25);
        assert_eq!(state.selected(), 9);
        state.move_down();
        assert_eq!(state.selected(), 9);
        assert!(state.near_end());

        state.select_first();
        assert!(!state.near_end());
        state.select_last();
        assert_eq!(state.selected_result().map(|r| r.id.as_str()), Some("a9"));
    }
}
