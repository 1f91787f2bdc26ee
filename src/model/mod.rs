//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (search rows, details, UI state)
//! - `omdb_client`: OMDb API client and the `MovieApi` seam
//! - `debounce`: Resettable timer for committing search input
//! - `search_state`: Query/pagination state machine
//! - `details`: Per-expansion detail fetch state
//! - `app_model`: Main application model with state management methods

mod types;
mod omdb_client;
mod debounce;
mod search_state;
mod details;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ActiveSection, ItemDetail, SearchResult, UiState};

pub use omdb_client::{ApiError, OmdbClient, SearchOutcome};
#[cfg(test)]
pub use omdb_client::MovieApi;

pub use debounce::DEFAULT_DEBOUNCE;

pub use search_state::{PageRequest, PageResponse, SearchState};

pub use details::{DetailPanel, DetailState};

pub use app_model::AppModel;
