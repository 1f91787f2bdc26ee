//! Core type definitions for the application

/// Which part of the UI receives key input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Search,
    Results,
}

/// A single row returned by the search endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub year: String,
}

/// Extended attributes returned by the lookup-by-id endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDetail {
    pub id: String,
    pub title: String,
    /// `None` when the API reports no poster
    pub poster: Option<String>,
    pub genre: String,
    pub director: String,
    pub plot: String,
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    /// Raw text in the search box, committed after the debounce window
    pub search_input: String,
    pub show_help_popup: bool,
}
