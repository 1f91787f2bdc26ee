//! Layout rendering (search bar, status line)

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, SearchState, UiState};

pub fn render_search_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let is_focused = ui_state.active_section == ActiveSection::Search;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let search = if ui_state.search_input.is_empty() {
        Paragraph::new("Search movies...").style(Style::default().fg(Color::DarkGray))
    } else {
        let cursor = if is_focused { "▏" } else { "" };
        Paragraph::new(format!("{}{}", ui_state.search_input, cursor))
            .style(Style::default().fg(Color::White))
    };

    let search = search.block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search Movie (Tab to browse) ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
    frame.render_widget(search, area);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, search: &SearchState) {
    let mut spans = vec![
        Span::styled(format!(" \"{}\"", search.query()), Style::default().fg(Color::Cyan)),
        Span::raw(format!("  page {}", search.page())),
        Span::raw(format!("  {} loaded", search.results().len())),
    ];

    if search.is_loading() {
        spans.push(Span::styled("  loading", Style::default().fg(Color::Yellow)));
    } else if search.is_end_reached() {
        spans.push(Span::styled("  end of results", Style::default().fg(Color::DarkGray)));
    }

    spans.push(Span::styled("   ? help", Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
