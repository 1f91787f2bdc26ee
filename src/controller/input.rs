//! Key event handling

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

/// Rows moved by PageUp / PageDown
const PAGE_STEP: isize = 10;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Help popup blocks all other interactions
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;
        let now = Instant::now();

        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                    model.set_active_section(ActiveSection::Results).await;
                }
                KeyCode::Esc => model.clear_search(now).await,
                KeyCode::Backspace => model.backspace_search(now).await,
                KeyCode::Char(c) => model.append_to_search(c, now).await,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Char('?') => model.show_help_popup().await,
            KeyCode::Tab | KeyCode::Char('/') | KeyCode::Esc => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Up | KeyCode::Char('k') => model.content_move_up().await,
            KeyCode::PageUp => model.content_move_by(-PAGE_STEP).await,
            KeyCode::Home | KeyCode::Char('g') => model.content_select_first().await,
            KeyCode::Down | KeyCode::Char('j') => {
                model.content_move_down().await;
                drop(model);
                self.load_more_if_near_end().await;
            }
            KeyCode::PageDown => {
                model.content_move_by(PAGE_STEP).await;
                drop(model);
                self.load_more_if_near_end().await;
            }
            KeyCode::End | KeyCode::Char('G') => {
                model.content_select_last().await;
                drop(model);
                self.load_more_if_near_end().await;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                drop(model);
                self.toggle_selected().await;
            }
            _ => {}
        }

        Ok(())
    }
}
