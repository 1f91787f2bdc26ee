//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (scrollable lists, truncation, wrapping)
//! - `layout`: Search bar and status line
//! - `content`: Result rows and inline details
//! - `overlays`: Help popup

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{DetailPanel, SearchState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        search: &SearchState,
        detail_panel: Option<&DetailPanel>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Result list
                Constraint::Length(1), // Status line
            ])
            .split(frame.area());

        layout::render_search_bar(frame, chunks[0], ui_state);
        content::render_results(frame, chunks[1], ui_state, search, detail_panel);
        layout::render_status_bar(frame, chunks[2], search);

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
