//! Result list rendering with the inline details of the expanded row

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, DetailPanel, DetailState, ItemDetail, SearchResult, SearchState, UiState};
use super::utils::{render_scrollable_list, truncate_string, wrap_words};
use unicode_width::UnicodeWidthStr;

/// Left indent of the detail lines under an expanded row
const DETAIL_INDENT: &str = "    ";

pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    search: &SearchState,
    detail_panel: Option<&DetailPanel>,
) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Movies ")
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    if search.results().is_empty() {
        let message = if search.is_loading() {
            Line::styled("Loading...", Style::default().fg(Color::Yellow))
        } else if let Some(error) = search.visible_error() {
            Line::styled(error.to_string(), Style::default().fg(Color::Red))
        } else {
            Line::styled("No movies to show", Style::default().fg(Color::DarkGray))
        };
        let content = Paragraph::new(message)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    // borders + horizontal padding
    let content_width = area.width.saturating_sub(4) as usize;

    let mut items: Vec<ListItem> = search
        .results()
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let is_selected = i == search.selected();
            let panel = detail_panel.filter(|p| search.expanded() == Some(result.id.as_str()) && p.id == result.id);
            let mut lines = vec![render_row(result, is_selected, is_focused, panel.is_some(), content_width)];
            if let Some(panel) = panel {
                lines.extend(render_details(panel, content_width));
            }
            ListItem::new(lines)
        })
        .collect();

    if search.is_loading() {
        items.push(ListItem::new(Line::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )));
    }

    render_scrollable_list(frame, area, items, search.selected(), block);
}

fn render_row(
    result: &SearchResult,
    is_selected: bool,
    is_focused: bool,
    is_expanded: bool,
    width: usize,
) -> Line<'static> {
    let marker = if is_expanded { "▾ " } else { "▸ " };
    let year_width = result.year.width() + 3;
    let title = truncate_string(&result.title, width.saturating_sub(year_width + 2));

    let title_style = if is_selected && is_focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(marker, title_style),
        Span::styled(title, title_style),
        Span::styled(format!("  {}", result.year), Style::default().fg(Color::DarkGray)),
    ])
}

fn render_details(panel: &DetailPanel, width: usize) -> Vec<Line<'static>> {
    if panel.state == DetailState::Loading {
        return vec![Line::styled(
            format!("{DETAIL_INDENT}Loading details..."),
            Style::default().fg(Color::Yellow),
        )];
    }
    // a failed lookup renders nothing under the row
    panel
        .detail()
        .map(|detail| detail_lines(detail, width))
        .unwrap_or_default()
}

fn detail_lines(detail: &ItemDetail, width: usize) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    if let Some(poster) = &detail.poster {
        lines.push(Line::from(vec![
            Span::styled(format!("{DETAIL_INDENT}Poster: "), label),
            Span::styled(poster.clone(), Style::default().fg(Color::Blue)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{DETAIL_INDENT}Genre: "), label),
        Span::raw(detail.genre.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{DETAIL_INDENT}Director: "), label),
        Span::raw(detail.director.clone()),
    ]));
    lines.push(Line::styled(format!("{DETAIL_INDENT}Plot:"), label));
    let plot_width = width.saturating_sub(DETAIL_INDENT.len() * 2);
    for line in wrap_words(&detail.plot, plot_width) {
        lines.push(Line::raw(format!("{DETAIL_INDENT}{DETAIL_INDENT}{line}")));
    }

    lines
}
